use miette::Diagnostic;
use thiserror::Error;

/// Main error type for petal operations
#[derive(Error, Diagnostic, Debug)]
pub enum PetalError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(petal::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(petal::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(petal::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Output error: {message}")]
    #[diagnostic(code(petal::output))]
    Output { message: String },

    #[error("Could not rasterize scene: {message}")]
    #[diagnostic(
        code(petal::rasterize),
        help("The scene markup must be a well-formed SVG document")
    )]
    Rasterization { message: String },

    #[error("No drawing surface available for a {width}x{height} image")]
    #[diagnostic(code(petal::surface))]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("Could not encode PNG: {message}")]
    #[diagnostic(code(petal::encode))]
    Encode { message: String },

    #[error("Sharing is not available for this payload")]
    #[diagnostic(code(petal::share_unavailable))]
    ShareUnavailable,

    #[error("Delivery failed: {message}")]
    #[diagnostic(code(petal::delivery))]
    Delivery {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, PetalError>;
