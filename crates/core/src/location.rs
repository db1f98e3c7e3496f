use serde::{Deserialize, Serialize};
use std::fmt;

use crate::category::ItemCategory;

/// Where an item should be shelved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageLocation {
    #[serde(rename = "Upper Section")]
    Upper,
    #[serde(rename = "Near Exit")]
    NearExit,
    #[serde(rename = "Lower Section")]
    Lower,
    #[serde(rename = "General Section")]
    General,
}

impl StorageLocation {
    pub fn label(self) -> &'static str {
        match self {
            StorageLocation::Upper => "Upper Section",
            StorageLocation::NearExit => "Near Exit",
            StorageLocation::Lower => "Lower Section",
            StorageLocation::General => "General Section",
        }
    }

    /// Placement rule table. Total: anything without a dedicated rule goes
    /// to the general section.
    pub fn for_category(category: ItemCategory) -> Self {
        match category {
            ItemCategory::Fragile => StorageLocation::Upper,
            ItemCategory::Perishable => StorageLocation::NearExit,
            ItemCategory::Heavy => StorageLocation::Lower,
            ItemCategory::Unknown => StorageLocation::General,
        }
    }

    /// Resolve from a free-form category label. Labels that don't name a
    /// known category land in the general section.
    pub fn for_label(label: &str) -> Self {
        label
            .parse::<ItemCategory>()
            .map(Self::for_category)
            .unwrap_or(StorageLocation::General)
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
