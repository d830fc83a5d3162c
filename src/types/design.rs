//! The user's current flower design.

use serde::{Deserialize, Serialize};

use crate::error::{PetalError, Result};

use super::{FlowerColour, ShapeKind};

/// Stem length in display units, always within [`StemHeight::MIN`]..=[`StemHeight::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct StemHeight(u32);

impl StemHeight {
    pub const MIN: u32 = 20;
    pub const MAX: u32 = 150;
    pub const DEFAULT: u32 = 80;

    /// Create a stem height, rejecting values outside the slider range.
    pub fn new(value: u32) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PetalError::Parse {
                message: format!("Stem height {} is out of range", value),
                help: Some(format!("Use a value between {} and {}", Self::MIN, Self::MAX)),
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for StemHeight {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<u32> for StemHeight {
    type Error = PetalError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StemHeight> for u32 {
    fn from(stem: StemHeight) -> Self {
        stem.0
    }
}

/// A snapshot of every user-controlled input, read at export time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    pub shape: ShapeKind,
    pub colour: FlowerColour,
    pub stem: StemHeight,
    /// Free text attached to the shared image; may be empty.
    pub caption: String,
}
