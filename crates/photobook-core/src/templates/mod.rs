//! Slot geometry templates
//!
//! This module holds the page layouts used when creating pages and by the
//! wizards:
//! - Fixed N-photo layouts with a generic grid for larger counts
//! - The orientation-aware template library of the smart wizard

mod grid;
mod smart;

pub use grid::*;
pub use smart::*;
