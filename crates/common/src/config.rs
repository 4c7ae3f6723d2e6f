//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where generated archives are written.
    pub output_dir: PathBuf,

    /// Default rendering parameters.
    pub render: RenderDefaults,

    /// Default catalog source.
    pub catalog: CatalogDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default rendering parameters.
///
/// The defaults describe a 64x64 surface with a 54px face and the baseline
/// anchored at (6, 54), which keeps a color emoji centered with a small
/// margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderDefaults {
    /// Surface width in pixels.
    pub surface_width: u32,

    /// Surface height in pixels.
    pub surface_height: u32,

    /// Font size in pixels.
    pub font_px: f32,

    /// Horizontal draw origin.
    pub origin_x: f32,

    /// Baseline vertical position.
    pub baseline_y: f32,

    /// Explicit font file to load instead of system discovery.
    pub font_path: Option<PathBuf>,

    /// Preferred font family for system discovery.
    pub font_family: Option<String>,
}

/// Default catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDefaults {
    /// URL of the catalog JSON, fetched once before a run.
    pub url: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "glyphpack=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            render: RenderDefaults::default(),
            catalog: CatalogDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            surface_width: 64,
            surface_height: 64,
            font_px: 54.0,
            origin_x: 6.0,
            baseline_y: 54.0,
            font_path: None,
            font_family: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("glyphpack").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let defaults = RenderDefaults::default();
        assert_eq!(defaults.surface_width, 64);
        assert_eq!(defaults.surface_height, 64);
        assert!((defaults.font_px - 54.0).abs() < f32::EPSILON);
        assert!((defaults.origin_x - 6.0).abs() < f32::EPSILON);
        assert!((defaults.baseline_y - 54.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.output_dir, config.output_dir);
        assert_eq!(back.logging.level, "info");
    }
}
