use serde::Serialize;
use shelfscan_core::{Code, ItemCategory, StorageLocation};

/// Result of one successful scan: the code read off the label and where
/// the item belongs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub code: Code,
    #[serde(rename = "item_type")]
    pub category: ItemCategory,
    #[serde(rename = "storage_position")]
    pub location: StorageLocation,
}
