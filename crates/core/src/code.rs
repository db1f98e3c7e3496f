use serde::{Deserialize, Serialize};
use std::fmt;

/// A cleaned-up barcode string, used as the catalog key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(String);

impl Code {
    /// Trim surrounding whitespace, then drop every line break left inside.
    /// Fragments are joined with no separator. Returns `None` when nothing
    /// is left.
    pub fn normalize(raw: &str) -> Option<Code> {
        let joined: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r'))
            .collect();
        if joined.is_empty() {
            None
        } else {
            Some(Code(joined))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
