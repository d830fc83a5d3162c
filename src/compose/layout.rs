//! Per-shape geometry.
//!
//! Every [`ShapeKind`] maps to one [`Layout`] value. Radial layouts place
//! `count` petals evenly around the canvas centre; petal `i` sits at
//! `i * (360 / count)` degrees.

use crate::types::{Colour, ShapeKind};

/// Centre of the flower canvas.
pub const CENTRE: (f64, f64) = (50.0, 50.0);

/// Where the centre disc gets its paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiscFill {
    Fixed(Colour),
    /// Same colour as the petals.
    Petal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub radius: f64,
    pub fill: DiscFill,
}

/// A ring of elliptical petals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub count: usize,
    /// Distance from the canvas centre to each petal centre.
    pub orbit: f64,
    pub rx: f64,
    pub ry: f64,
}

impl Ring {
    /// Angle of petal `index`, in degrees.
    pub fn angle(&self, index: usize) -> f64 {
        index as f64 * (360.0 / self.count as f64)
    }

    /// Centre point of petal `index`.
    pub fn petal_centre(&self, index: usize) -> (f64, f64) {
        let angle = self.angle(index).to_radians();
        let (cx, cy) = CENTRE;
        (cx + self.orbit * angle.cos(), cy + self.orbit * angle.sin())
    }
}

/// The procedural layout of one shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
    /// Centre disc painted first, then a ring of petals.
    Radial { disc: Disc, ring: Ring },
    /// A single closed path.
    Outline(&'static str),
    /// A single closed polygon.
    Polygon(&'static [(f64, f64)]),
}

const TULIP_OUTLINE: &str = "M50 10 C 65 20, 65 40, 50 50 C 35 40, 35 20, 50 10";

const LILY_POINTS: &[(f64, f64)] = &[(50.0, 10.0), (60.0, 40.0), (50.0, 50.0), (40.0, 40.0)];

/// Look up the layout for a shape.
pub fn layout(shape: ShapeKind) -> Layout {
    match shape {
        ShapeKind::Daisy => Layout::Radial {
            disc: Disc {
                radius: 15.0,
                fill: DiscFill::Fixed(Colour::YELLOW),
            },
            ring: Ring {
                count: 8,
                orbit: 25.0,
                rx: 8.0,
                ry: 12.0,
            },
        },
        ShapeKind::Tulip => Layout::Outline(TULIP_OUTLINE),
        ShapeKind::Rose => Layout::Radial {
            disc: Disc {
                radius: 10.0,
                fill: DiscFill::Fixed(Colour::RED),
            },
            ring: Ring {
                count: 5,
                orbit: 20.0,
                rx: 8.0,
                ry: 15.0,
            },
        },
        ShapeKind::Sunflower => Layout::Radial {
            disc: Disc {
                radius: 20.0,
                fill: DiscFill::Fixed(Colour::BROWN),
            },
            ring: Ring {
                count: 12,
                orbit: 30.0,
                rx: 10.0,
                ry: 18.0,
            },
        },
        ShapeKind::Lily => Layout::Polygon(LILY_POINTS),
        ShapeKind::Orchid => Layout::Radial {
            disc: Disc {
                radius: 15.0,
                fill: DiscFill::Petal,
            },
            ring: Ring {
                count: 5,
                orbit: 20.0,
                rx: 8.0,
                ry: 12.0,
            },
        },
    }
}
