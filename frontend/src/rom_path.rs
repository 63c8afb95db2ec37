//! ROM image loading and persisted host configuration (window scale, last
//! ROM/tape paths, color mode) under the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tk2000::rom::Rom;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    pub last_rom_path: Option<PathBuf>,
    pub last_tape_path: Option<PathBuf>,
    pub color_mode: bool,
    pub scale: Option<u32>,
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("phosphor-tk2000").join("config.toml"))
}

/// Load the persisted config, falling back to defaults if it doesn't exist
/// or fails to parse (a corrupt config file should never block startup).
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => toml::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %path.display(), "ignoring malformed config");
            Config::default()
        }),
        Err(_) => Config::default(),
    }
}

pub fn save_config(config: &Config) {
    let Some(path) = config_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        tracing::warn!(error = %e, "failed to create config directory");
        return;
    }
    match toml::to_string_pretty(config) {
        Ok(text) => {
            if let Err(e) = std::fs::write(&path, text) {
                tracing::warn!(error = %e, "failed to save config");
            }
        }
        Err(e) => tracing::warn!(error = %e, "failed to serialize config"),
    }
}

/// Load a 16 KiB raw ROM image from disk.
pub fn load_rom(path: &Path) -> Result<Rom, tk2000::error::CoreError> {
    Rom::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rom_is_a_recoverable_error() {
        let err = load_rom(Path::new("/nonexistent/rom.bin")).unwrap_err();
        assert!(matches!(err, tk2000::error::CoreError::RomMissing { .. }));
    }
}
