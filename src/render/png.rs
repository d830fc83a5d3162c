//! PNG encoding for rasterized scenes.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::error::{PetalError, Result};

/// MIME type of every encoded artifact.
pub const PNG_MIME: &str = "image/png";

/// Encode an image as PNG into memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| PetalError::Encode {
            message: e.to_string(),
        })?;
    Ok(bytes)
}
