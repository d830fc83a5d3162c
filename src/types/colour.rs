//! Colour values and the fixed petal colour set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PetalError, Result};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Disc colour at the heart of a daisy.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);

    /// Disc colour at the heart of a rose.
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Disc colour at the heart of a sunflower.
    pub const BROWN: Self = Self::rgb(165, 42, 42);

    /// Default stem colour.
    pub const STEM: Self = Self::rgb(0x15, 0x80, 0x3D);

    /// Parse a hex colour string.
    ///
    /// Supports `#RGB` and `#RRGGBB`; the leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        match hex.len() {
            _ if !hex.is_ascii() => Err(PetalError::Parse {
                message: format!("Invalid hex colour: {}", s),
                help: None,
            }),
            3 => {
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b] = digits;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(PetalError::Parse {
                message: format!("Invalid hex colour: {}", s),
                help: Some("Use #RGB or #RRGGBB format".to_string()),
            }),
        }
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Darken by a percentage of the current HSL lightness.
    pub fn darken(self, percent: f32) -> Self {
        use palette::{Hsl, IntoColor, Srgb};

        let rgb: Srgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );

        let mut hsl: Hsl = rgb.into_color();
        hsl.lightness -= hsl.lightness * (percent / 100.0).clamp(0.0, 1.0);

        let rgb_out: Srgb<f32> = hsl.into_color();
        Self::new(
            (rgb_out.red * 255.0).round() as u8,
            (rgb_out.green * 255.0).round() as u8,
            (rgb_out.blue * 255.0).round() as u8,
            self.a,
        )
    }
}

impl FromStr for Colour {
    type Err = PetalError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PetalError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PetalError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

/// The petal colours a flower can be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowerColour {
    #[default]
    Red,
    Yellow,
    Pink,
    Purple,
    White,
    Orange,
    Blue,
    Lavender,
    Green,
}

impl FlowerColour {
    /// Every colour, in menu order.
    pub const ALL: [FlowerColour; 9] = [
        FlowerColour::Red,
        FlowerColour::Yellow,
        FlowerColour::Pink,
        FlowerColour::Purple,
        FlowerColour::White,
        FlowerColour::Orange,
        FlowerColour::Blue,
        FlowerColour::Lavender,
        FlowerColour::Green,
    ];

    /// Lowercase identifier, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            FlowerColour::Red => "red",
            FlowerColour::Yellow => "yellow",
            FlowerColour::Pink => "pink",
            FlowerColour::Purple => "purple",
            FlowerColour::White => "white",
            FlowerColour::Orange => "orange",
            FlowerColour::Blue => "blue",
            FlowerColour::Lavender => "lavender",
            FlowerColour::Green => "green",
        }
    }

    /// The paint value, matching the CSS colour keyword of the same name.
    pub fn colour(self) -> Colour {
        match self {
            FlowerColour::Red => Colour::rgb(255, 0, 0),
            FlowerColour::Yellow => Colour::rgb(255, 255, 0),
            FlowerColour::Pink => Colour::rgb(255, 192, 203),
            FlowerColour::Purple => Colour::rgb(128, 0, 128),
            FlowerColour::White => Colour::rgb(255, 255, 255),
            FlowerColour::Orange => Colour::rgb(255, 165, 0),
            FlowerColour::Blue => Colour::rgb(0, 0, 255),
            FlowerColour::Lavender => Colour::rgb(230, 230, 250),
            FlowerColour::Green => Colour::rgb(0, 128, 0),
        }
    }
}

impl FromStr for FlowerColour {
    type Err = PetalError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PetalError::Parse {
                message: format!("Unknown colour: {}", s),
                help: Some(format!(
                    "Choose one of: {}",
                    Self::ALL.map(|c| c.name()).join(", ")
                )),
            })
    }
}

impl fmt::Display for FlowerColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
