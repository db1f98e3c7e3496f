use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification assigned to a scanned code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemCategory {
    #[serde(rename = "Fragile Item")]
    Fragile,
    #[serde(rename = "Perishable Item")]
    Perishable,
    #[serde(rename = "Heavy Item")]
    Heavy,
    #[default]
    #[serde(rename = "Unknown Item")]
    Unknown,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 4] = [
        ItemCategory::Fragile,
        ItemCategory::Perishable,
        ItemCategory::Heavy,
        ItemCategory::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Fragile => "Fragile Item",
            ItemCategory::Perishable => "Perishable Item",
            ItemCategory::Heavy => "Heavy Item",
            ItemCategory::Unknown => "Unknown Item",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemCategory::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("Unknown item category: '{s}'"))
    }
}
