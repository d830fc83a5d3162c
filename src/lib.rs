//! petal - Flower composer and PNG export pipeline
//!
//! Composes a small vector flower from a fixed catalog of shapes and
//! colours, rasterizes it to PNG, and hands the image to a share surface,
//! falling back to a direct download when sharing is unavailable.

pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod output;
pub mod render;
pub mod types;

pub use compose::{compose, compose_bouquet, compose_named, Element, ElementKind, Scene};
pub use config::Config;
pub use error::{PetalError, Result};
pub use export::{
    CommandShare, DeliveryRoute, DirectoryDownload, Downloader, ExportLock, ExportOptions,
    ExportReport, ExportState, Exporter, NoShare, Notifier, SharePayload, SharePlatform,
    ShareOutcome, SharedFile,
};
pub use render::{encode_png, rasterize};
pub use types::{Colour, Design, FlowerColour, ShapeKind, StemHeight};
