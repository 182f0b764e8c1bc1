//! Configuration persistence for snaplabel settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::export::{DEFAULT_JPEG_QUALITY, ExportFormat};

/// Save location for exported snapshots (Pictures or Documents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Pictures,
    Documents,
}

impl SaveLocation {
    /// Resolve to a directory, falling back to the home directory
    pub fn dir(self) -> Option<PathBuf> {
        match self {
            SaveLocation::Pictures => {
                dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))
            }
            SaveLocation::Documents => {
                dirs::document_dir().or_else(|| dirs::home_dir().map(|h| h.join("Documents")))
            }
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapLabelConfig {
    /// Output file name without extension
    pub filename: String,
    /// Formats written by a single save, in order
    pub export_formats: Vec<ExportFormat>,
    /// Where to save snapshots when no directory is given
    pub save_location: SaveLocation,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Display box used to report the fit-to-container scale
    pub container: Option<(f32, f32)>,
}

impl Default for SnapLabelConfig {
    fn default() -> Self {
        Self {
            filename: "snapshot".to_string(),
            // Save writes both a WebP and a PNG
            export_formats: vec![ExportFormat::Webp, ExportFormat::Png],
            save_location: SaveLocation::Pictures,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            container: None,
        }
    }
}

impl SnapLabelConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "snaplabel";

    /// Default config file location
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("Could not locate config directory, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Could not read config {}: {:?}", path.display(), err);
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) {
        match Self::path() {
            Some(path) => {
                if let Err(err) = self.save_to(&path) {
                    log::error!("Failed to save config: {:?}", err);
                }
            }
            None => log::error!("Could not locate config directory for saving"),
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Configured file stem, or a timestamped one if it is blank
    pub fn default_filename(&self) -> String {
        let stem = self.filename.trim();
        if stem.is_empty() {
            chrono::Local::now()
                .format("Snapshot_%Y-%m-%d_%H-%M-%S")
                .to_string()
        } else {
            stem.to_string()
        }
    }

    /// One file name per configured format
    pub fn export_filenames(&self, stem: &str) -> Vec<String> {
        self.export_formats
            .iter()
            .map(|format| format!("{}.{}", stem, format.extension()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SnapLabelConfig::default();
        assert_eq!(config.filename, "snapshot");
        assert_eq!(
            config.export_filenames("snapshot"),
            vec!["snapshot.webp", "snapshot.png"]
        );
    }

    #[test]
    fn test_round_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = SnapLabelConfig {
            filename: "callouts".to_string(),
            export_formats: vec![ExportFormat::Jpeg],
            save_location: SaveLocation::Documents,
            jpeg_quality: 75,
            container: Some((800.0, 600.0)),
        };
        config.save_to(&path).unwrap();
        assert_eq!(SnapLabelConfig::load_from(&path), config);
    }

    #[test]
    fn test_missing_fields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "filename": "shot", "export_formats": ["png"] }"#).unwrap();
        let config = SnapLabelConfig::load_from(&path);
        assert_eq!(config.filename, "shot");
        assert_eq!(config.export_formats, vec![ExportFormat::Png]);
        assert_eq!(config.jpeg_quality, DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn test_malformed_or_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(SnapLabelConfig::load_from(&path), SnapLabelConfig::default());
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(SnapLabelConfig::load_from(&path), SnapLabelConfig::default());
    }

    #[test]
    fn test_blank_filename_uses_timestamp() {
        let config = SnapLabelConfig {
            filename: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.default_filename().starts_with("Snapshot_"));
    }
}
