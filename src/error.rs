//! Error type shared by parsing, configuration and export.
//!
//! Drawing a module never fails; only the outer surfaces (reading a dot type
//! tag, building a grid from text, loading a config file, writing files) do.

use thiserror::Error;

/// Errors returned by `qidots`.
#[derive(Debug, Error)]
pub enum Error {
    /// A dot type tag that is not one of the seven known styles.
    #[error("unknown dot type `{0}`")]
    UnknownDotType(String),

    /// A text grid whose rows do not all have the same length as the row count.
    #[error("grid row {row} has {found} modules, expected {expected}")]
    RaggedGrid {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// An output setting outside the range the renderer accepts.
    #[error("output `{field}` is {value}, expected {min}..={max}")]
    OutputRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// The TOML configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
