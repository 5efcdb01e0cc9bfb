//! Run settings: loading, saving and splitting into per-crate options.

use std::path::Path;

use bom_explode::{DEFAULT_LENGTH_MARKER, DEFAULT_MAX_DEPTH, ExplodeSettings};
use bom_graph::InvalidQuantityPolicy;
use bom_ingest::{Encoding, IngestOptions};
use bom_ingest::table::DEFAULT_SEPARATOR;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Everything a run can be configured with. Every field has a default,
/// so an empty YAML file (or no file at all) is a valid configuration.
///
/// ```yaml
/// max_depth: 64
/// length_marker: mm
/// invalid_quantity: skip
/// separator: "(#)"
/// encoding: latin1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub max_depth: usize,
    pub length_marker: String,
    pub invalid_quantity: InvalidQuantityPolicy,
    pub separator: String,
    pub encoding: Encoding,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            length_marker: DEFAULT_LENGTH_MARKER.to_string(),
            invalid_quantity: InvalidQuantityPolicy::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
            encoding: Encoding::default(),
        }
    }
}

impl AppSettings {
    /// Override the recursion budget (CLI flag wins over the file).
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        if let Some(depth) = max_depth {
            self.max_depth = depth;
        }
        self
    }

    pub fn explode_settings(&self) -> ExplodeSettings {
        ExplodeSettings {
            max_depth: self.max_depth,
            length_marker: self.length_marker.clone(),
            invalid_quantity: self.invalid_quantity,
        }
    }

    pub fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            separator: self.separator.clone(),
            encoding: self.encoding,
        }
    }

    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_depth == 0 {
            return Err(AppError::Settings(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.separator.is_empty() {
            return Err(AppError::Settings("separator must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Load settings from a YAML file.
pub fn load_settings(path: &Path) -> AppResult<AppSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::SettingsFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    // serde_yaml reads an empty document as unit, not as an empty map
    if content.trim().is_empty() {
        return Ok(AppSettings::default());
    }

    let settings: AppSettings = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Settings(format!("Failed to parse settings YAML: {}", e)))?;
    settings.validate()?;

    Ok(settings)
}

/// Load settings from `path` if given, defaults otherwise.
pub fn load_optional_settings(path: Option<&Path>) -> AppResult<AppSettings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(AppSettings::default()),
    }
}

/// Save settings to a YAML file.
pub fn save_settings(path: &Path, settings: &AppSettings) -> AppResult<()> {
    let content = serde_yaml::to_string(settings)
        .map_err(|e| AppError::Settings(format!("Failed to serialize settings: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::SettingsFileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let settings: AppSettings =
            serde_yaml::from_str("invalid_quantity: skip\nencoding: utf8\n").unwrap();
        assert_eq!(settings.invalid_quantity, InvalidQuantityPolicy::Skip);
        assert_eq!(settings.encoding, Encoding::Utf8);
        assert_eq!(settings.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(settings.length_marker, "mm");
        assert_eq!(settings.separator, "(#)");
    }

    #[test]
    fn cli_override_wins() {
        let settings = AppSettings {
            max_depth: 10,
            ..AppSettings::default()
        };
        assert_eq!(settings.clone().with_max_depth(Some(3)).max_depth, 3);
        assert_eq!(settings.with_max_depth(None).max_depth, 10);
    }

    #[test]
    fn split_into_crate_options() {
        let settings = AppSettings {
            length_marker: "MTR".to_string(),
            separator: ";".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(settings.explode_settings().length_marker, "MTR");
        assert_eq!(settings.ingest_options().separator, ";");
    }

    #[test]
    fn zero_depth_is_rejected() {
        let settings = AppSettings {
            max_depth: 0,
            ..AppSettings::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::Settings(_))));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let result: Result<AppSettings, _> = serde_yaml::from_str("invalid_quantity: ignore\n");
        assert!(result.is_err());
    }
}
