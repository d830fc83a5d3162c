//! Rendering module for petal.
//!
//! Rasterizes scene markup onto an offscreen surface and encodes the
//! result as PNG.

mod png;
mod raster;

pub use png::{encode_png, PNG_MIME};
pub use raster::{decode, draw, natural_size, rasterize, MAX_SCALE, MAX_SURFACE_PIXELS};
