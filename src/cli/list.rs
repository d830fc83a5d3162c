//! List command implementation.
//!
//! Prints the shape catalog and the colour set.

use crate::compose::{compose, ElementKind, Scene};
use crate::output::{plural, Printer};
use crate::types::{FlowerColour, ShapeKind};

pub fn run(printer: &Printer) {
    for shape in ShapeKind::ALL {
        let scene = compose(shape, FlowerColour::default());
        printer.info(shape.name(), &describe(&scene));
    }

    for colour in FlowerColour::ALL {
        printer.info(colour.name(), &printer.dim(&colour.colour().to_string()));
    }
}

/// Short inventory of a scene's primitives, e.g. "1 disc, 8 petals".
fn describe(scene: &Scene) -> String {
    let parts = [
        (ElementKind::Circle, "disc", "discs"),
        (ElementKind::Ellipse, "petal", "petals"),
        (ElementKind::Path, "path", "paths"),
        (ElementKind::Polygon, "polygon", "polygons"),
    ];

    parts
        .iter()
        .filter_map(|&(kind, one, many)| match scene.count(kind) {
            0 => None,
            n => Some(plural(n, one, many)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
