//! Flower shape identifiers.
//!
//! Each shape selects one procedural layout in the composer. The set is
//! closed: a [`ShapeKind`] always names one of the six catalog entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PetalError, Result};

/// A flower shape from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Daisy,
    Tulip,
    Rose,
    Sunflower,
    Lily,
    Orchid,
}

impl ShapeKind {
    /// Every shape, in menu order.
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Daisy,
        ShapeKind::Tulip,
        ShapeKind::Rose,
        ShapeKind::Sunflower,
        ShapeKind::Lily,
        ShapeKind::Orchid,
    ];

    /// Lowercase identifier, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Daisy => "daisy",
            ShapeKind::Tulip => "tulip",
            ShapeKind::Rose => "rose",
            ShapeKind::Sunflower => "sunflower",
            ShapeKind::Lily => "lily",
            ShapeKind::Orchid => "orchid",
        }
    }

    /// Look up a shape by name, ignoring case.
    pub fn lookup(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(wanted))
    }
}

impl FromStr for ShapeKind {
    type Err = PetalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::lookup(s).ok_or_else(|| PetalError::Parse {
            message: format!("Unknown shape: {}", s),
            help: Some(format!(
                "Choose one of: {}",
                Self::ALL.map(|s| s.name()).join(", ")
            )),
        })
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(ShapeKind::lookup("Sunflower"), Some(ShapeKind::Sunflower));
        assert_eq!(ShapeKind::lookup(" lily "), Some(ShapeKind::Lily));
        assert_eq!(ShapeKind::lookup("cactus"), None);
    }

    #[test]
    fn test_parse_unknown_has_help() {
        let err = "cactus".parse::<ShapeKind>().unwrap_err();
        match err {
            PetalError::Parse { message, help } => {
                assert!(message.contains("cactus"));
                assert!(help.unwrap().contains("orchid"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_is_daisy() {
        assert_eq!(ShapeKind::default(), ShapeKind::Daisy);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ShapeKind::Sunflower).unwrap();
        assert_eq!(json, "\"sunflower\"");
        let back: ShapeKind = serde_json::from_str("\"tulip\"").unwrap();
        assert_eq!(back, ShapeKind::Tulip);
    }
}
