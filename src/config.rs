//! Project configuration (petal.yaml) parsing.
//!
//! Every field is optional; command-line flags override whatever the file
//! sets.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PetalError, Result};
use crate::export::{CommandShare, ExportOptions, DEFAULT_CAPTION, DEFAULT_TITLE};
use crate::render::MAX_SCALE;
use crate::types::Colour;

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "petal.yaml";

/// An external share command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ShareCommand {
    pub fn platform(&self) -> CommandShare {
        CommandShare::new(self.program.clone(), self.args.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory downloads are written to.
    pub output: PathBuf,

    /// Integer upscale for exported images.
    pub scale: u32,

    /// Title attached to shares.
    pub title: String,

    /// Share text used when no message is given.
    pub default_caption: String,

    /// Stem colour for bouquet scenes, as `#RRGGBB`.
    pub stem_colour: Option<String>,

    /// Share command; without one, exports fall back to downloading.
    pub share: Option<ShareCommand>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            scale: 1,
            title: DEFAULT_TITLE.to_string(),
            default_caption: DEFAULT_CAPTION.to_string(),
            stem_colour: None,
            share: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PetalError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load an explicit config file, else `petal.yaml` from `dir` if present,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as all defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| PetalError::Config {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILE)),
        })?;

        if !(1..=MAX_SCALE).contains(&config.scale) {
            return Err(PetalError::Config {
                message: format!("scale must be between 1 and {}", MAX_SCALE),
                help: None,
            });
        }

        // Surface a bad colour at load time rather than at export time.
        config.stem_colour()?;

        Ok(config)
    }

    /// The configured stem colour, or the default green.
    pub fn stem_colour(&self) -> Result<Colour> {
        match &self.stem_colour {
            Some(hex) => Colour::from_hex(hex).map_err(|_| PetalError::Config {
                message: format!("Invalid stem_colour: {}", hex),
                help: Some("Use #RGB or #RRGGBB format".to_string()),
            }),
            None => Ok(Colour::STEM),
        }
    }

    /// Export options derived from this config.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            title: self.title.clone(),
            default_caption: self.default_caption.clone(),
            scale: self.scale,
            ..ExportOptions::default()
        }
    }
}
