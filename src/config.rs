//! qrcanvas runtime configuration handling
//!
//! A configuration bundles everything needed to reproduce an export: the
//! encoded content, the style, the output size and logging. It doubles as
//! the import/export format for sharing a design.

use crate::error::{Error, Result};
use crate::qr::{DotShape, ErrorCorrection};
use crate::style::{BorderStyle, Color, StyleParameters};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name for exported configurations
pub const DEFAULT_CONFIG_FILENAME: &str = "qr-config.json";

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrCanvasConfig {
    /// What the QR code encodes and how its modules are drawn
    pub content: ContentOptions,
    /// Background, border and padding styling
    pub style: StyleParameters,
    /// Output size and destination
    pub export: ExportOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrCanvasConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrcanvas.{{toml,yaml,json}} found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in [
            "qrcanvas.toml",
            "qrcanvas.yaml",
            "qrcanvas.yml",
            "qrcanvas.json",
        ] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrcanvas");
            for candidate in ["config.toml", "config.yaml", "config.json"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match extension(path).as_str() {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            "json" => Self::from_json(&contents),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml/json",
                other
            ))),
        }
    }

    /// Parse a pasted JSON configuration.
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| Error::Config(format!("Invalid JSON configuration: {e}")))
    }

    /// Pretty-printed JSON suitable for copying or sharing.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the configuration to `path`, choosing the format by extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = match extension(path).as_str() {
            "toml" => toml::to_string_pretty(self)
                .map_err(|e| Error::Config(format!("Failed to serialise TOML: {e}")))?,
            "yaml" | "yml" => serde_yaml::to_string(self)
                .map_err(|e| Error::Config(format!("Failed to serialise YAML: {e}")))?,
            _ => self.to_json_pretty()?,
        };

        fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write {}: {e}", path.display())))?;
        tracing::info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.content.apply_env_overrides();
        apply_style_env_overrides(&mut self.style);
        self.export.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse::<T>().ok())
}

/// What gets encoded and how the bundled renderer draws it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentOptions {
    /// Text or URL encoded in the QR code
    pub data: String,
    /// Module shape
    pub dot_shape: DotShape,
    /// Error correction level
    pub ec_level: ErrorCorrection,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            data: "https://example.com".to_string(),
            dot_shape: DotShape::Square,
            ec_level: ErrorCorrection::M,
        }
    }
}

impl ContentOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(data) = env::var("QRCANVAS_DATA") {
            self.data = data;
        }
        if let Some(shape) = env::var("QRCANVAS_DOT_SHAPE")
            .ok()
            .and_then(|v| DotShape::parse(&v))
        {
            self.dot_shape = shape;
        }
    }
}

fn apply_style_env_overrides(style: &mut StyleParameters) {
    if let Some(color) = parse_env::<Color>("QRCANVAS_BACKGROUND") {
        style.background_color = color;
    }
    if let Some(color) = parse_env::<Color>("QRCANVAS_STROKE") {
        style.stroke_color = color;
    }
    if let Some(margin) = parse_env::<f32>("QRCANVAS_MARGIN") {
        style.margin = margin;
    }
    if let Some(radius) = parse_env::<f32>("QRCANVAS_BORDER_RADIUS") {
        style.border_radius = radius;
    }
    if let Some(width) = parse_env::<f32>("QRCANVAS_BORDER_WIDTH") {
        style.border_width = width;
    }
    if let Some(border_style) = env::var("QRCANVAS_BORDER_STYLE")
        .ok()
        .and_then(|v| BorderStyle::parse(&v))
    {
        style.border_style = border_style;
    }
}

/// Output sizing and destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Pixel footprint of the QR artwork in the exported image
    pub download_size: u32,
    /// Destination file for the exported PNG
    pub filename: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            download_size: 1000,
            filename: PathBuf::from(crate::canvas::DEFAULT_FILENAME),
        }
    }
}

impl ExportOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Some(size) = parse_env::<u32>("QRCANVAS_SIZE") {
            self.download_size = size.max(1);
        }
        if let Ok(file) = env::var("QRCANVAS_OUTPUT") {
            self.filename = PathBuf::from(file);
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRCANVAS_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRCANVAS_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRCANVAS_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRCANVAS_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRCANVAS_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Temporary directory removed again when dropped
    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Self {
            let dir = env::temp_dir().join(format!("qrcanvas-config-{}", Uuid::new_v4()));
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn file(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_defaults() {
        let config = QrCanvasConfig::default();
        assert_eq!(config.export.download_size, 1000);
        assert_eq!(config.export.filename, PathBuf::from("qr-code.png"));
        assert_eq!(config.style.margin, 10.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = QrCanvasConfig::from_json(
            r##"{ "style": { "border_width": 4, "border_style": "rounded", "stroke_color": "#336699" } }"##,
        )
        .unwrap();
        assert_eq!(config.style.border_width, 4.0);
        assert_eq!(config.style.border_style, BorderStyle::Rounded);
        assert_eq!(config.style.stroke_color, Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(config.style.background_color, Color::WHITE);
        assert_eq!(config.export.download_size, 1000);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            QrCanvasConfig::from_json("{ not json"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            QrCanvasConfig::from_json(r#"{ "style": { "background_color": "blue" } }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_save_and_reload_each_format() {
        let mut config = QrCanvasConfig::default();
        config.content.data = "https://example.org/menu".to_string();
        config.style.border_radius = 25.0;
        config.style.border_style = BorderStyle::Rounded;
        config.export.download_size = 2048;

        let scratch = Scratch::new();
        for name in ["design.json", "design.toml", "design.yaml"] {
            let path = scratch.file(name);
            config.save(&path).unwrap();
            let loaded = QrCanvasConfig::from_file(&path).unwrap();
            assert_eq!(loaded, config, "{name} did not survive a save/load");
        }
    }

    #[test]
    fn test_scratch_dir_is_removed() {
        let scratch = Scratch::new();
        let dir = scratch.0.clone();
        QrCanvasConfig::default()
            .save(&scratch.file(DEFAULT_CONFIG_FILENAME))
            .unwrap();
        drop(scratch);
        assert!(!dir.exists());
    }

    #[test]
    fn test_unsupported_extension() {
        let scratch = Scratch::new();
        let path = scratch.file("design.ini");
        fs::write(&path, "x=1").unwrap();
        assert!(matches!(
            QrCanvasConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_toml_sections() {
        let scratch = Scratch::new();
        let path = scratch.file("qrcanvas.toml");
        fs::write(
            &path,
            r##"
[content]
data = "hello"
dot_shape = "dots"
ec_level = "H"

[style]
margin = 0
background_color = "#000"

[export]
download_size = 512
"##,
        )
        .unwrap();

        let config = QrCanvasConfig::from_file(&path).unwrap();
        assert_eq!(config.content.data, "hello");
        assert_eq!(config.content.dot_shape, DotShape::Dots);
        assert_eq!(config.content.ec_level, ErrorCorrection::H);
        assert_eq!(config.style.margin, 0.0);
        assert_eq!(config.style.background_color, Color::BLACK);
        assert_eq!(config.export.download_size, 512);
    }
}
