pub mod catalog;
pub mod category;
pub mod code;
pub mod location;

pub use catalog::{Catalog, DEFAULT_ENTRIES};
pub use category::ItemCategory;
pub use code::Code;
pub use location::StorageLocation;
