use thiserror::Error;

/// Why a colour pick fell back to the sentinel colour.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickError {
    /// The swatch has no image buffer or crop region to read from.
    #[error("Swatch resource missing: {0}")]
    MissingResource(&'static str),
    /// The click could not be converted into the swatch's local space.
    #[error("Failed to convert screen point to swatch-local point")]
    TransformFailure,
}

/// Errors raised by engine operations
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum EngineError {
    #[error("Brush width must be positive and finite, got {0}")]
    InvalidBrushWidth(f32),
}

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
