//! Shared config utilities for loading/saving JSON config files.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::mascot::MascotError;

/// Lenient wrapper over [`try_load_json_config`]. A missing file is logged
/// at info and a parse failure at warn; both yield `T::default()`.
pub fn load_json_config<T: DeserializeOwned + Default>(path: &Path, label: &str) -> T {
    match try_load_json_config(path) {
        Ok(config) => {
            tracing::info!("[{}] Loaded config from {}", label, path.display());
            config
        }
        Err(MascotError::ConfigIo { .. }) => {
            tracing::info!(
                "[{}] No config file at {}, using defaults",
                label,
                path.display()
            );
            T::default()
        }
        Err(e) => {
            tracing::warn!("[{}] {}, using defaults", label, e);
            T::default()
        }
    }
}

/// Strict load: reports missing files and parse errors to the caller.
pub fn try_load_json_config<T: DeserializeOwned>(path: &Path) -> Result<T, MascotError> {
    let content = std::fs::read_to_string(path).map_err(|source| MascotError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str::<T>(&content).map_err(|source| MascotError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Generic save for any Serde config type.
pub fn save_json_config<T: Serialize>(
    path: &Path,
    config: &T,
    label: &str,
) -> Result<(), MascotError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| MascotError::ConfigIo {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json).map_err(|source| MascotError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("[{}] Saved config to {}", label, path.display());
    Ok(())
}

/// `<platform config dir>/<app>/<file>`, if the platform has one.
pub fn default_config_path(app: &str, file: &str) -> Option<PathBuf> {
    dirs_next::config_dir().map(|dir| dir.join(app).join(file))
}
