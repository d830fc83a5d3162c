//! Declarative vector scenes and their SVG serialization.

use std::fmt;

use crate::types::Colour;

/// Logical size of the flower canvas, in both axes.
pub const CANVAS_SIZE: u32 = 100;

/// A rotation about a fixed point, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: f64,
    pub cx: f64,
    pub cy: f64,
}

/// A single geometric primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Colour,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        fill: Colour,
    },
    /// Closed outline described by SVG path data.
    Path { d: String, fill: Colour },
    Polygon {
        points: Vec<(f64, f64)>,
        fill: Colour,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Colour,
        rotate: Option<Rotation>,
    },
}

/// Discriminant of an [`Element`], for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Circle,
    Ellipse,
    Path,
    Polygon,
    Rect,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Circle { .. } => ElementKind::Circle,
            Element::Ellipse { .. } => ElementKind::Ellipse,
            Element::Path { .. } => ElementKind::Path,
            Element::Polygon { .. } => ElementKind::Polygon,
            Element::Rect { .. } => ElementKind::Rect,
        }
    }

    pub fn fill(&self) -> Colour {
        match self {
            Element::Circle { fill, .. }
            | Element::Ellipse { fill, .. }
            | Element::Path { fill, .. }
            | Element::Polygon { fill, .. }
            | Element::Rect { fill, .. } => *fill,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Circle { cx, cy, r, fill } => {
                write!(f, r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#)
            }
            Element::Ellipse {
                cx,
                cy,
                rx,
                ry,
                fill,
            } => write!(
                f,
                r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" fill="{fill}"/>"#
            ),
            Element::Path { d, fill } => write!(f, r#"<path d="{d}" fill="{fill}"/>"#),
            Element::Polygon { points, fill } => {
                f.write_str(r#"<polygon points=""#)?;
                for (i, (x, y)) in points.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{x},{y}")?;
                }
                write!(f, r#"" fill="{fill}"/>"#)
            }
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
                rotate,
            } => {
                write!(
                    f,
                    r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{fill}""#
                )?;
                if let Some(Rotation { degrees, cx, cy }) = rotate {
                    write!(f, r#" transform="rotate({degrees} {cx} {cy})""#)?;
                }
                f.write_str("/>")
            }
        }
    }
}

/// A vector illustration: a fixed-size canvas and its primitives in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    elements: Vec<Element>,
}

impl Scene {
    /// Create an empty scene with the given canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// An empty flower canvas.
    pub fn empty() -> Self {
        Self::new(CANVAS_SIZE, CANVAS_SIZE)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Count the primitives of one kind.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind() == kind).count()
    }

    /// Serialize to a standalone SVG document.
    pub fn to_markup(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = self.size();
        writeln!(
            f,
            r#"<svg id="flower-svg" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        for element in &self.elements {
            writeln!(f, "  {element}")?;
        }
        writeln!(f, "</svg>")
    }
}
