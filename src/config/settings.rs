//! `setup.toml` model: repositories, fonts, DNS, desktop settings, services.
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that arise from loading `setup.toml`.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading the settings file.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file contains invalid TOML.
    #[error("invalid TOML in {path}: {source}")]
    Parse {
        /// Path to the file that could not be parsed.
        path: String,
        /// Underlying TOML error.
        source: Box<toml::de::Error>,
    },
}

/// All settings loaded from `setup.toml`.
///
/// Every section is optional; a missing file yields the defaults, which keep
/// the repository, Flathub, and service tweaks enabled with empty lists.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub repos: Repos,
    pub flathub: Flathub,
    pub fonts: Vec<Font>,
    pub dns: Option<Dns>,
    pub desktop: Vec<DesktopSetting>,
    pub services: Services,
}

/// Repository enablement settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Repos {
    /// Enable the RPM Fusion free repository.
    pub rpmfusion_free: bool,
    /// Enable the RPM Fusion nonfree repository.
    pub rpmfusion_nonfree: bool,
    /// COPR projects to enable (`owner/project`).
    pub copr: Vec<String>,
}

impl Default for Repos {
    fn default() -> Self {
        Self {
            rpmfusion_free: true,
            rpmfusion_nonfree: true,
            copr: Vec::new(),
        }
    }
}

/// Flatpak remote settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Flathub {
    /// Remote name used for `flatpak install`.
    pub remote: String,
    /// Flatpakrepo URL registered via `flatpak remote-add`.
    pub url: String,
}

impl Default for Flathub {
    fn default() -> Self {
        Self {
            remote: "flathub".to_string(),
            url: "https://dl.flathub.org/repo/flathub.flatpakrepo".to_string(),
        }
    }
}

/// A font to install from a downloadable archive.
#[derive(Debug, Clone, Deserialize)]
pub struct Font {
    /// Family name as it appears in `fc-list` output.
    pub name: String,
    /// Archive URL (`.zip`, `.tar.gz`, or `.tar.xz`).
    pub url: String,
}

/// systemd-resolved DNS settings, rendered into a `[Resolve]` drop-in.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Dns {
    pub servers: Vec<String>,
    pub fallback: Vec<String>,
    pub dns_over_tls: bool,
}

impl Default for Dns {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            fallback: Vec::new(),
            dns_over_tls: true,
        }
    }
}

/// A desktop configuration key managed through gsettings.
#[derive(Debug, Clone, Deserialize)]
pub struct DesktopSetting {
    pub schema: String,
    pub key: String,
    pub value: String,
}

/// Background services to enable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Services {
    /// Units passed to `systemctl enable --now`.
    pub enable: Vec<String>,
}

impl Settings {
    /// Load settings from `setup.toml` under `root`.
    ///
    /// A missing file is not an error; it yields [`Settings::default`].
    ///
    /// # Errors
    ///
    /// Returns a [`SettingsError`] if the file exists but cannot be read or
    /// contains invalid TOML.
    pub fn load(root: &Path) -> Result<Self, SettingsError> {
        let path = root.join("setup.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source: Box::new(source),
        })
    }
}
