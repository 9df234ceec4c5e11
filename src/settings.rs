//! YAML configuration file: which notifiers are enabled and dialog settings.
//!
//! Files live in `~/.config/notify/`. A missing file is replaced by a default
//! configuration enabling every backend, which is written to disk on first use.

use crate::notifier::{AudioNotifier, DialogNotifier};
use crate::types::{NotifyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default configuration file name inside the config directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Title used for dialogs when neither the CLI nor the file provides one.
pub const DEFAULT_TITLE: &str = "Notification";

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Ids of the backends to notify through.
    pub enabled_notifiers: Vec<String>,
    /// Dialog backend settings. Recognized key: `title`.
    pub dialog_settings: BTreeMap<String, String>,
}

impl Settings {
    /// The configuration written when no file exists yet.
    pub fn initial() -> Self {
        let mut dialog_settings = BTreeMap::new();
        dialog_settings.insert("title".to_string(), DEFAULT_TITLE.to_string());

        Self {
            enabled_notifiers: vec![
                AudioNotifier::ID.to_string(),
                DialogNotifier::ID.to_string(),
            ],
            dialog_settings,
        }
    }

    /// Settings enabling the given ids and nothing else.
    pub fn with_enabled<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled_notifiers: ids.into_iter().map(Into::into).collect(),
            dialog_settings: BTreeMap::new(),
        }
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled_notifiers.iter().any(|n| n == id)
    }

    /// Configured dialog title, if any.
    pub fn dialog_title(&self) -> Option<&str> {
        self.dialog_settings
            .get("title")
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Parse settings from YAML text. Blank input is an empty configuration.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the settings to `path`, creating its directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml()?)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }
}

/// Directory holding all configuration files.
pub fn config_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".config").join("notify"),
        None => PathBuf::from("notify"),
    }
}

/// Resolve a configuration file name against `dir`.
///
/// No name selects the default file; absolute paths are used as given.
pub fn config_path_in(dir: &Path, file: Option<&str>) -> PathBuf {
    match file.filter(|f| !f.is_empty()) {
        Some(f) if Path::new(f).is_absolute() => PathBuf::from(f),
        Some(f) => dir.join(f),
        None => dir.join(DEFAULT_CONFIG_FILE),
    }
}

/// Resolve a configuration file name against [`config_dir`].
pub fn config_path(file: Option<&str>) -> PathBuf {
    config_path_in(&config_dir(), file)
}

/// Load settings from `path`, creating the default file if it is missing.
pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        let settings = Settings::initial();
        settings.save(path)?;
        info!("Created default configuration at {}", path.display());
        return Ok(settings);
    }

    let text = fs::read_to_string(path)?;
    Settings::from_yaml(&text).map_err(|e| {
        NotifyError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
    })
}

/// Load the named configuration file from the config directory.
pub fn load(file: Option<&str>) -> Result<Settings> {
    load_from(&config_path(file))
}

/// Read settings from `path` without writing anything.
///
/// A missing file yields the defaults [`load_from`] would create; an unreadable
/// one yields an empty configuration.
pub fn read_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::initial();
    }

    match fs::read_to_string(path)
        .map_err(NotifyError::from)
        .and_then(|text| Settings::from_yaml(&text))
    {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Ignoring configuration {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

/// Names of the `.yaml`/`.yml` files in `dir`, sorted.
///
/// The directory is created if it does not exist yet.
pub fn list_config_files_in(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    files.sort();
    Ok(files)
}

/// Configuration files in [`config_dir`].
pub fn list_config_files() -> Result<Vec<String>> {
    list_config_files_in(&config_dir())
}
