//! Compose command implementation.
//!
//! Prints the scene markup to stdout so it can be piped elsewhere.

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::output::Printer;
use crate::types::ShapeKind;

use super::DesignArgs;

/// Print the flower's SVG markup
#[derive(Args, Debug)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub design: DesignArgs,
}

pub fn run(args: ComposeArgs, config: &Config, printer: &Printer) -> Result<()> {
    if ShapeKind::lookup(&args.design.shape).is_none() {
        printer.warning(
            "Unknown",
            &format!("shape '{}', composing an empty scene", args.design.shape),
        );
    }

    let scene = args.design.scene(config.stem_colour()?);
    print!("{}", scene.to_markup());
    Ok(())
}
