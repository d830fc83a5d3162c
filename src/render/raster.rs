//! SVG rasterization.
//!
//! Markup is decoded into a `usvg` tree first, then drawn onto a pixmap
//! sized to the tree's natural dimensions. The two steps fail separately so
//! callers can tell malformed markup from a missing drawing surface.

use image::{ImageBuffer, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{PetalError, Result};

/// Largest upscale factor accepted from the command line and config.
pub const MAX_SCALE: u32 = 32;

/// Largest surface, in pixels, the drawing step will allocate.
pub const MAX_SURFACE_PIXELS: u64 = 8192 * 8192;

/// Decode SVG markup into a render tree.
pub fn decode(markup: &str) -> Result<Tree> {
    if markup.trim().is_empty() {
        return Err(PetalError::Rasterization {
            message: "markup is empty".to_string(),
        });
    }

    Tree::from_str(markup, &Options::default()).map_err(|e| PetalError::Rasterization {
        message: e.to_string(),
    })
}

/// Pixel size of a tree at an integer scale factor (minimum 1).
pub fn natural_size(tree: &Tree, scale: u32) -> (u32, u32) {
    let scale = scale.max(1) as f32;
    let size = tree.size();
    (
        (size.width() * scale).ceil() as u32,
        (size.height() * scale).ceil() as u32,
    )
}

/// Draw a tree onto a fresh surface and return its straight-alpha pixels.
pub fn draw(tree: &Tree, scale: u32) -> Result<RgbaImage> {
    let (width, height) = natural_size(tree, scale);
    if u64::from(width) * u64::from(height) > MAX_SURFACE_PIXELS {
        return Err(PetalError::SurfaceUnavailable { width, height });
    }

    let mut pixmap =
        Pixmap::new(width, height).ok_or(PetalError::SurfaceUnavailable { width, height })?;

    let factor = scale.max(1) as f32;
    resvg::render(tree, Transform::from_scale(factor, factor), &mut pixmap.as_mut());

    // tiny-skia stores premultiplied alpha; PNG wants straight alpha.
    let mut buffer = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        buffer.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    ImageBuffer::from_raw(width, height, buffer)
        .ok_or(PetalError::SurfaceUnavailable { width, height })
}

/// Decode and draw in one step.
pub fn rasterize(markup: &str, scale: u32) -> Result<RgbaImage> {
    let tree = decode(markup)?;
    draw(&tree, scale)
}
