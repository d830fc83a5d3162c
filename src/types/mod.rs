//! Core domain types for petal.
//!
//! - `Colour` - RGBA colour values
//! - `FlowerColour` - The nine petal colours
//! - `ShapeKind` - The six flower shapes
//! - `Design` - A snapshot of the user's choices

mod colour;
mod design;
mod shape;

pub use colour::{Colour, FlowerColour};
pub use design::{Design, StemHeight};
pub use shape::ShapeKind;
