//! Application configuration file.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use shakyo_core::config::CanvasConfig;
use shakyo_render::PaperStyle;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "shakyo.config.json";

/// Shakyo configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Canvas sizing, eraser and document defaults
    pub canvas: CanvasConfig,
    /// Paper colors and ruling
    pub paper: PaperStyle,
    /// Document directory; the platform data dir when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load config from a directory, or defaults if it has none
    pub fn load(cwd: &Path) -> AppResult<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from an explicit file, which must exist
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| AppError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakyo_core::color::HexColor;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "canvas": { "maxWidth": 1000, "defaultGroupId": "3-1" },
            "paper": { "rulePitch": 24, "ruleColor": "#cccccc" },
            "storageDir": "/tmp/notes"
        }"##;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.canvas.max_width, 1000);
        assert_eq!(config.canvas.max_height, 800);
        assert_eq!(config.canvas.default_group_id, "3-1");
        assert_eq!(config.paper.rule_pitch, 24);
        assert_eq!(config.paper.rule_color, HexColor::new(0xcc, 0xcc, 0xcc));
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/notes")));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{"canvas": {"eraseThreshold": 12}}"#,
        )
        .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.canvas.erase_threshold, 12.0);
        assert_eq!(config.paper, PaperStyle::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(matches!(AppConfig::from_file(&path), Err(AppError::Json { .. })));
        assert!(matches!(
            AppConfig::from_file(&dir.path().join("absent.json")),
            Err(AppError::Io { .. })
        ));
    }
}
