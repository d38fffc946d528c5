//! Settings file management.

use pdcrier_core::{CrierError, FileSettings, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings file location used when `HOME` is not set, e.g. inside a
/// Home Assistant container.
const FALLBACK_SETTINGS_PATH: &str = "/config/pagerduty.yaml";

/// Default settings file path: `$HOME/.hass-tools/pagerduty.yaml`.
pub fn default_settings_path() -> PathBuf {
    settings_path_for_home(std::env::var_os("HOME"))
}

/// Settings path for a given value of `HOME`. An unset or empty `HOME`
/// selects the fallback; the user database is not consulted.
fn settings_path_for_home(home: Option<OsString>) -> PathBuf {
    home.filter(|h| !h.is_empty()).map_or_else(
        || PathBuf::from(FALLBACK_SETTINGS_PATH),
        |home| PathBuf::from(home).join(".hass-tools").join("pagerduty.yaml"),
    )
}

/// Load settings from a YAML file.
///
/// A missing file is treated as empty so everything can come from flags.
pub fn load(path: &Path) -> Result<FileSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "settings file not found, using flags only");
        return Ok(FileSettings::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        CrierError::Settings(format!("could not read settings file {}: {e}", path.display()))
    })?;

    // An empty document deserializes as null
    if content.trim().is_empty() {
        return Ok(FileSettings::default());
    }

    serde_yaml::from_str(&content).map_err(|e| {
        CrierError::Settings(format!("invalid settings file {}: {e}", path.display()))
    })
}

/// Save settings to a YAML file.
pub fn save(path: &Path, settings: &FileSettings) -> Result<()> {
    let write_error = |e: &dyn std::fmt::Display| {
        CrierError::Settings(format!(
            "could not write settings file {}: {e}",
            path.display()
        ))
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_error(&e))?;
    }

    let content = serde_yaml::to_string(settings).map_err(|e| write_error(&e))?;
    std::fs::write(path, content).map_err(|e| write_error(&e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_set_uses_hass_tools_dir() {
        let path = settings_path_for_home(Some(OsString::from("/home/ops")));
        assert_eq!(path, PathBuf::from("/home/ops/.hass-tools/pagerduty.yaml"));
    }

    #[test]
    fn test_home_unset_falls_back_to_config() {
        assert_eq!(
            settings_path_for_home(None),
            PathBuf::from("/config/pagerduty.yaml")
        );
        assert_eq!(
            settings_path_for_home(Some(OsString::new())),
            PathBuf::from("/config/pagerduty.yaml")
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(settings, FileSettings::default());
    }

    #[test]
    fn test_empty_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagerduty.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(load(&path).unwrap(), FileSettings::default());
    }

    #[test]
    fn test_invalid_yaml_is_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagerduty.yaml");
        std::fs::write(&path, "- just\n- a list\n").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, CrierError::Settings(_)));
        assert!(err.is_config_error());
        assert!(err.to_string().contains("invalid settings file"));
    }

    #[test]
    fn test_unwritable_path_is_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let err = save(&blocker.join("pagerduty.yaml"), &FileSettings::default()).unwrap_err();
        assert!(matches!(err, CrierError::Settings(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pagerduty.yaml");
        let settings = FileSettings {
            api_token: Some("TOK".into()),
            sender: Some("a@b.com".into()),
            service_id: Some("SVC1".into()),
            incident_key: None,
        };

        save(&path, &settings).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("pagerduty-api-token: TOK"));
        assert!(written.contains("service_id: SVC1"));
        assert!(!written.contains("incident-key"));
        assert_eq!(load(&path).unwrap(), settings);
    }
}
