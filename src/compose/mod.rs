//! Illustration composer.
//!
//! Turns a (shape, colour) pair into a [`Scene`]. Composition is pure and
//! cheap, so callers recompose on every input change instead of caching.

mod bouquet;
mod layout;
mod scene;

pub use bouquet::{compose_bouquet, LEAF_DARKEN_PERCENT, STEM_WIDTH};
pub use layout::{layout, Disc, DiscFill, Layout, Ring, CENTRE};
pub use scene::{Element, ElementKind, Rotation, Scene, CANVAS_SIZE};

use crate::types::{FlowerColour, ShapeKind};

/// Compose the flower head for a shape painted in `colour`.
pub fn compose(shape: ShapeKind, colour: FlowerColour) -> Scene {
    let paint = colour.colour();
    let mut scene = Scene::empty();

    match layout(shape) {
        Layout::Radial { disc, ring } => {
            let (cx, cy) = CENTRE;
            let disc_fill = match disc.fill {
                DiscFill::Fixed(c) => c,
                DiscFill::Petal => paint,
            };
            scene.push(Element::Circle {
                cx,
                cy,
                r: disc.radius,
                fill: disc_fill,
            });

            for i in 0..ring.count {
                let (px, py) = ring.petal_centre(i);
                scene.push(Element::Ellipse {
                    cx: px,
                    cy: py,
                    rx: ring.rx,
                    ry: ring.ry,
                    fill: paint,
                });
            }
        }
        Layout::Outline(d) => scene.push(Element::Path {
            d: d.to_string(),
            fill: paint,
        }),
        Layout::Polygon(points) => scene.push(Element::Polygon {
            points: points.to_vec(),
            fill: paint,
        }),
    }

    scene
}

/// Compose from a shape name. Unknown names give an empty scene.
pub fn compose_named(shape: &str, colour: FlowerColour) -> Scene {
    match ShapeKind::lookup(shape) {
        Some(kind) => compose(kind, colour),
        None => Scene::empty(),
    }
}
