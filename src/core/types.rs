//! Strongly-typed wrappers for advisor concepts
//!
//! Card ids and display names are both strings in the catalog. Wrapping
//! them in distinct types keeps a name from ever being used as a lookup key.

use deunicode::deunicode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog identifier of a card (e.g., "OGN-045")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(s: impl Into<String>) -> Self {
        CardId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId(s)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

/// Card display name (distinct from other string types)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardName(String);

impl CardName {
    pub fn new(s: impl Into<String>) -> Self {
        CardName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    /// ASCII-folded lowercase form used for name-reference matching
    ///
    /// "Kai'Sa, Daughter of the Void" and "kai'sa, daughter of the void"
    /// normalize to the same string, as do accented variants.
    pub fn normalized(&self) -> String {
        normalize_text(&self.0)
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CardName {
    fn from(s: String) -> Self {
        CardName(s)
    }
}

impl From<&str> for CardName {
    fn from(s: &str) -> Self {
        CardName(s.to_string())
    }
}

/// Fold free text to lowercase ASCII for substring matching
pub fn normalize_text(text: &str) -> String {
    deunicode(text).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new("OGN-045");
        assert_eq!(id.as_str(), "OGN-045");
        assert_eq!(id.to_string(), "OGN-045");
    }

    #[test]
    fn test_card_name_normalized() {
        let name = CardName::new("Jinx, Lööse Cannon");
        assert_eq!(name.as_str(), "Jinx, Lööse Cannon");
        assert_eq!(name.normalized(), "jinx, loose cannon");
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let id = CardId::new("OGS-001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"OGS-001\"");
    }
}
