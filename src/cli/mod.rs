pub mod completions;
pub mod compose;
pub mod export;
pub mod list;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::compose::{compose, compose_bouquet, compose_named, Scene};
use crate::logging::LogFormat;
use crate::types::{Colour, Design, FlowerColour, ShapeKind, StemHeight};

/// petal - Compose a flower and share it as a PNG
#[derive(Parser, Debug)]
#[command(name = "petal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Diagnostic log format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Config file (default: ./petal.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the flower's SVG markup
    Compose(compose::ComposeArgs),

    /// Render the flower to PNG and share or download it
    Export(export::ExportArgs),

    /// List available shapes and colours
    List,

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// The user's flower choices.
#[derive(Args, Debug, Clone)]
pub struct DesignArgs {
    /// Flower shape (daisy, tulip, rose, sunflower, lily, orchid)
    #[arg(long, default_value = "daisy")]
    pub shape: String,

    /// Petal colour
    #[arg(long, visible_alias = "color", default_value_t = FlowerColour::Red)]
    pub colour: FlowerColour,

    /// Stem height
    #[arg(
        long,
        default_value_t = StemHeight::DEFAULT,
        value_parser = clap::value_parser!(u32).range(StemHeight::MIN as i64..=StemHeight::MAX as i64)
    )]
    pub stem: u32,

    /// Draw the stem and leaves under the flower
    #[arg(long)]
    pub with_stem: bool,
}

impl DesignArgs {
    /// The design these flags describe, or `None` for an unknown shape.
    pub fn design(&self, caption: &str) -> Option<Design> {
        let shape = ShapeKind::lookup(&self.shape)?;
        // The value parser already enforces the range.
        let stem = StemHeight::new(self.stem).unwrap_or_default();
        Some(Design {
            shape,
            colour: self.colour,
            stem,
            caption: caption.to_string(),
        })
    }

    /// Compose the scene for these flags.
    pub fn scene(&self, stem_colour: Colour) -> Scene {
        self.scene_for(self.design("").as_ref(), stem_colour)
    }

    /// Compose the scene for an already snapshotted design.
    pub fn scene_for(&self, design: Option<&Design>, stem_colour: Colour) -> Scene {
        match design {
            Some(design) if self.with_stem => compose_bouquet(design, stem_colour),
            Some(design) => compose(design.shape, design.colour),
            None => compose_named(&self.shape, self.colour),
        }
    }
}
