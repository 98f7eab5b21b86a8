//! Layered settings.
//!
//! Defaults, then an optional TOML file, then `JUJULENS_*` environment
//! variables, then command-line flags.

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use jujulens_types::PlatformVersion;
use serde::Deserialize;

use crate::data::Baseline;

/// Environment variable prefix for settings.
pub const ENV_PREFIX: &str = "JUJULENS";

/// When the plain renderer emits color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Auto => "auto",
            ColorMode::Always => "always",
            ColorMode::Never => "never",
        }
    }

    /// Whether rows should be decorated.
    pub fn decorate(&self) -> bool {
        match self {
            ColorMode::Auto => std::io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub version_floor: Option<String>,
    pub latest_version: Option<String>,
    pub color: Option<ColorMode>,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub version_floor: String,
    pub latest_version: String,
    pub canonical_origin: String,
    pub color: ColorMode,
}

impl Settings {
    /// Load settings from every layer.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("version_floor", "2.0.0")?
            .set_default("latest_version", "2.5.1")?
            .set_default("canonical_origin", "jujucharms")?
            .set_default("color", ColorMode::default().as_str())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("version_floor", overrides.version_floor.clone())?
            .set_override_option("latest_version", overrides.latest_version.clone())?
            .set_override_option("color", overrides.color.map(|c| c.as_str()))?
            .build()
            .context("failed to load settings")?;

        Ok(config.try_deserialize()?)
    }

    /// The comparison points handed to row projection.
    pub fn baseline(&self) -> Result<Baseline> {
        let parse = |key: &str, value: &str| {
            value
                .parse::<PlatformVersion>()
                .with_context(|| format!("invalid {}: {:?}", key, value))
        };
        Ok(Baseline {
            version_floor: parse("version_floor", &self.version_floor)?,
            latest_version: parse("latest_version", &self.latest_version)?,
            canonical_origin: self.canonical_origin.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None, &Overrides::default()).unwrap();
        assert_eq!(settings.canonical_origin, "jujucharms");
        assert_eq!(settings.baseline().unwrap(), Baseline::default());
    }

    #[test]
    fn test_file_then_overrides() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "latest_version = \"3.1.0\"\nversion_floor = \"2.9.0\"\ncolor = \"never\""
        )
        .unwrap();

        let overrides = Overrides {
            latest_version: Some("3.4.0".to_string()),
            ..Overrides::default()
        };
        let settings = Settings::load(Some(file.path()), &overrides).unwrap();

        assert_eq!(settings.version_floor, "2.9.0");
        assert_eq!(settings.latest_version, "3.4.0");
        assert_eq!(settings.color, ColorMode::Never);
        assert_eq!(
            settings.baseline().unwrap().latest_version,
            PlatformVersion::new(3, 4, 0)
        );
    }

    #[test]
    fn test_invalid_version_rejected() {
        let overrides = Overrides {
            version_floor: Some("two".to_string()),
            ..Overrides::default()
        };
        let settings = Settings::load(None, &overrides).unwrap();
        let err = settings.baseline().unwrap_err();
        assert!(err.to_string().contains("version_floor"));
    }

    #[test]
    fn test_color_mode() {
        assert!(ColorMode::Always.decorate());
        assert!(!ColorMode::Never.decorate());
    }
}
