//! In-memory project model
//!
//! A [`Project`] owns its pages; each [`Page`] owns its photo slots, text
//! boxes and paint order. Photo properties live inside their slot so that
//! removing or reordering slots carries the properties along.

mod page;
mod project;
mod slot;
mod text;

pub use page::{Page, ZDirection};
pub use project::Project;
pub use slot::{PhotoProperties, PhotoSlot, SlotGeometry};
pub use text::TextBox;

use crate::{PhotobookError, Result};
use std::fmt;
use std::str::FromStr;

/// Address of one photo slot in a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhotoKey {
    pub page: usize,
    pub slot: usize,
}

impl PhotoKey {
    pub fn new(page: usize, slot: usize) -> Self {
        Self { page, slot }
    }
}

/// Formats as `(page, slot)`, the key used in project files
impl fmt::Display for PhotoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.page, self.slot)
    }
}

impl FromStr for PhotoKey {
    type Err = PhotobookError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || PhotobookError::InvalidInput(format!("Invalid photo key: {s:?}"));
        let inner = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let (page, slot) = inner.split_once(',').ok_or_else(invalid)?;
        let page = page.trim().parse().map_err(|_| invalid())?;
        let slot = slot.trim().parse().map_err(|_| invalid())?;
        Ok(Self { page, slot })
    }
}

mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    impl Serialize for PhotoKey {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for PhotoKey {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        }
    }
}
