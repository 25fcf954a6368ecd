//! # Render Configuration
//!
//! Settings for whole-matrix rendering, loadable from a TOML file:
//!
//! ```toml
//! [dots]
//! type = "classy-rounded"
//! scale = 0.9
//! seed = 42
//!
//! [output]
//! module_size = 12
//! border = 4
//! supersample = 4
//! directory = "generated"
//! ```
//!
//! Every key is optional; missing keys take their default value.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::dot::{DotOptions, DotType};
use crate::error::{Error, Result};
use crate::raster::MAX_SUPERSAMPLE;

/// Largest accepted `module_size`, in pixels.
pub const MAX_MODULE_SIZE: u32 = 1024;
/// Largest accepted `border`, in modules.
pub const MAX_BORDER: u32 = 1024;

/// Complete rendering configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Module style
    pub dots: DotsConfig,
    /// Image and file output
    pub output: OutputConfig,
}

/// Module style configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DotsConfig {
    /// Style tag, e.g. "rounded" or "morse"
    #[serde(rename = "type")]
    pub dot_type: DotType,
    /// Shape scale factor, clamped to 0.1..=1.0 by the renderer
    pub scale: f64,
    /// Seed for the morse tie-break; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Side length of one module in pixels
    pub module_size: u32,
    /// Light modules around the symbol on every side
    pub border: u32,
    /// Samples per pixel along each axis when rasterizing
    pub supersample: u32,
    /// Directory files are saved to when none is given
    pub directory: String,
}

impl Default for DotsConfig {
    fn default() -> Self {
        DotsConfig {
            dot_type: DotType::Square,
            scale: 1.0,
            seed: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            module_size: 10,
            border: 4,
            supersample: 4,
            directory: "generated".to_string(),
        }
    }
}

impl OutputConfig {
    /// Checks every setting against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputRange`] for the first setting out of range.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("module_size", self.module_size, 1, MAX_MODULE_SIZE),
            ("border", self.border, 0, MAX_BORDER),
            ("supersample", self.supersample, 1, MAX_SUPERSAMPLE),
        ];
        for (field, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(Error::OutputRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl DotsConfig {
    pub fn options(&self) -> DotOptions {
        DotOptions::new(self.dot_type).with_scale(self.scale)
    }
}

impl RenderConfig {
    /// Convenience constructor for a style with every other setting defaulted.
    pub fn with_dot_type(dot_type: DotType) -> Self {
        RenderConfig {
            dots: DotsConfig {
                dot_type,
                ..DotsConfig::default()
            },
            ..RenderConfig::default()
        }
    }

    /// Parses a configuration from TOML text and validates the output settings.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: RenderConfig = toml::from_str(contents)?;
        config.output.validate()?;
        Ok(config)
    }

    /// Loads configuration from the given path.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, a config error if it
    /// is not valid TOML for this structure, and a range error if an output
    /// setting is out of bounds.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&contents)?;
        info!(
            "loaded render config from {} ({} dots)",
            path.as_ref().display(),
            config.dots.dot_type
        );
        Ok(config)
    }

    /// Loads configuration from the given path, falling back to the defaults
    /// if the file doesn't exist or is invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "using default render config, {} unusable: {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.dots.dot_type, DotType::Square);
        assert_eq!(config.dots.scale, 1.0);
        assert_eq!(config.dots.seed, None);
        assert_eq!(config.output.module_size, 10);
        assert_eq!(config.output.border, 4);
        assert_eq!(config.output.supersample, 4);
        assert_eq!(config.output.directory, "generated");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            RenderConfig::from_toml_str("[dots]\ntype = \"extra-rounded\"\nscale = 0.8\n").unwrap();
        assert_eq!(config.dots.dot_type, DotType::ExtraRounded);
        assert_eq!(config.dots.scale, 0.8);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.dots.options(), DotOptions::new(DotType::ExtraRounded).with_scale(0.8));
    }

    #[test]
    fn test_unknown_dot_type_is_rejected() {
        let err = RenderConfig::from_toml_str("[dots]\ntype = \"hexagon\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_out_of_range_output_is_rejected() {
        let err = RenderConfig::from_toml_str("[output]\nborder = 2147483648\n").unwrap_err();
        assert!(matches!(
            err,
            Error::OutputRange {
                field: "border",
                value: 2147483648,
                ..
            }
        ));

        let err = RenderConfig::from_toml_str("[output]\nsupersample = 70000\n").unwrap_err();
        assert!(matches!(err, Error::OutputRange { field: "supersample", .. }));

        let err = RenderConfig::from_toml_str("[output]\nmodule_size = 0\n").unwrap_err();
        assert!(matches!(err, Error::OutputRange { field: "module_size", .. }));

        assert!(RenderConfig::default().output.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_out_of_range_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nborder = 5000").unwrap();
        assert!(matches!(
            RenderConfig::load_from_path(file.path()),
            Err(Error::OutputRange { field: "border", .. })
        ));
        assert_eq!(RenderConfig::load_or_default(file.path()), RenderConfig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = RenderConfig::with_dot_type(DotType::Morse);
        config.dots.seed = Some(7);
        config.output.module_size = 6;
        let parsed = RenderConfig::from_toml_str(&config.to_toml_string()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[dots]\ntype = \"classy\"\nseed = 3\n\n[output]\nborder = 2").unwrap();
        let config = RenderConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.dots.dot_type, DotType::Classy);
        assert_eq!(config.dots.seed, Some(3));
        assert_eq!(config.output.border, 2);
        assert_eq!(config.output.module_size, 10);
    }

    #[test]
    fn test_load_nonexistent_file() {
        assert!(matches!(
            RenderConfig::load_from_path("/nonexistent/qidots.toml"),
            Err(Error::Io(_))
        ));
        // Should fallback to default
        let config = RenderConfig::load_or_default("/nonexistent/qidots.toml");
        assert_eq!(config, RenderConfig::default());
    }
}
