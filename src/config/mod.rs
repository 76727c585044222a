//! Configuration loading: `setup.toml` settings, built-in package sets, and
//! the line-oriented package manifests.
pub mod manifest;
pub mod packages;
pub mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use settings::Settings;

/// All loaded configuration for a provisioning run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing `setup.toml` and the manifests.
    pub root: PathBuf,
    /// Parsed `setup.toml` (defaults when the file is absent).
    pub settings: Settings,
}

impl Config {
    /// Load all configuration from `root`.
    ///
    /// Manifests are deliberately **not** loaded here: per the install
    /// contract they are read at the start of their batch, so a manifest
    /// created between startup and the batch is still picked up and a
    /// missing one is reported by the batch itself.
    ///
    /// # Errors
    ///
    /// Returns an error if `setup.toml` exists but cannot be parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let settings = Settings::load(root).context("loading setup.toml")?;
        Ok(Self {
            root: root.to_path_buf(),
            settings,
        })
    }

    /// Path of the dnf package manifest.
    #[must_use]
    pub fn pkg_manifest(&self) -> PathBuf {
        self.root.join("pkg.txt")
    }

    /// Path of the Flatpak manifest.
    #[must_use]
    pub fn fpk_manifest(&self) -> PathBuf {
        self.root.join("fpk.txt")
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn load_from_empty_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.root, dir.path());
        assert!(config.settings.repos.rpmfusion_free);
    }

    #[test]
    fn manifest_paths_are_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.pkg_manifest(), dir.path().join("pkg.txt"));
        assert_eq!(config.fpk_manifest(), dir.path().join("fpk.txt"));
    }

    #[test]
    fn load_propagates_settings_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("setup.toml"), "not = [valid").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
