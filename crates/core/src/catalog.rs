use std::collections::HashMap;

use crate::category::ItemCategory;
use crate::code::Code;
use crate::location::StorageLocation;

/// Codes the scanner recognizes out of the box.
pub const DEFAULT_ENTRIES: &[(&str, ItemCategory)] = &[
    ("1234567890", ItemCategory::Fragile),
    ("0987654321", ItemCategory::Perishable),
    ("1122334455", ItemCategory::Heavy),
];

/// Read-only code → category table. Built once, then only queried.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<String, ItemCategory>,
}

impl Catalog {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, ItemCategory)>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The built-in reference table.
    pub fn reference() -> Self {
        Self::new(DEFAULT_ENTRIES.iter().copied())
    }

    /// Returns a new catalog with `extra` layered over this one; on a key
    /// clash the extra entry wins.
    pub fn merged<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = (S, ItemCategory)>,
        S: Into<String>,
    {
        let mut entries = self.entries.clone();
        entries.extend(extra.into_iter().map(|(k, v)| (k.into(), v)));
        Self { entries }
    }

    /// Exact-match lookup. A miss is a normal outcome and yields
    /// [`ItemCategory::Unknown`].
    pub fn classify(&self, code: &Code) -> ItemCategory {
        self.entries.get(code.as_str()).copied().unwrap_or_default()
    }

    /// Classify and place in one step.
    pub fn place(&self, code: &Code) -> (ItemCategory, StorageLocation) {
        let category = self.classify(code);
        (category, StorageLocation::for_category(category))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}
