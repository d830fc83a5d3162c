//! Flower head on a stem, with a pair of leaves.

use crate::types::{Colour, Design};

use super::{compose, Element, Rotation, Scene, CANVAS_SIZE};

/// Stem thickness in canvas units.
pub const STEM_WIDTH: f64 = 8.0;

/// Leaves are the stem colour darkened by this much.
pub const LEAF_DARKEN_PERCENT: f32 = 20.0;

const LEAF_WIDTH: f64 = 40.0;
const LEAF_HEIGHT: f64 = 12.0;
const LEAF_TOP: f64 = 125.0;
const LEAF_ANGLE: f64 = 45.0;

/// Lowest point any rotated leaf can reach.
const MIN_CANVAS_HEIGHT: u32 = 150;

/// Compose the full flower: head, stem of `design.stem` units and two leaves.
pub fn compose_bouquet(design: &Design, stem_colour: Colour) -> Scene {
    let head = compose(design.shape, design.colour);
    let stem = design.stem.get();

    let width = CANVAS_SIZE;
    let height = (CANVAS_SIZE + stem).max(MIN_CANVAS_HEIGHT);
    let mut scene = Scene::new(width, height);

    for element in head.elements() {
        scene.push(element.clone());
    }

    let mid = f64::from(width) / 2.0;
    scene.push(Element::Rect {
        x: mid - STEM_WIDTH / 2.0,
        y: f64::from(CANVAS_SIZE),
        width: STEM_WIDTH,
        height: f64::from(stem),
        fill: stem_colour,
        rotate: None,
    });

    let leaf_colour = stem_colour.darken(LEAF_DARKEN_PERCENT);
    let left_x = -1.0;
    let right_x = f64::from(width) + 1.0 - LEAF_WIDTH;
    for (x, degrees) in [(left_x, -LEAF_ANGLE), (right_x, LEAF_ANGLE)] {
        scene.push(Element::Rect {
            x,
            y: LEAF_TOP,
            width: LEAF_WIDTH,
            height: LEAF_HEIGHT,
            fill: leaf_colour,
            rotate: Some(Rotation {
                degrees,
                cx: x + LEAF_WIDTH / 2.0,
                cy: LEAF_TOP + LEAF_HEIGHT / 2.0,
            }),
        });
    }

    scene
}
