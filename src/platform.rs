use std::fmt;
use std::path::Path;

/// Platform information for the current system.
#[derive(Debug, Clone)]
pub struct Platform {
    /// Whether the OS is Linux at all.
    pub is_linux: bool,
    /// Whether the distribution is Fedora (or a Fedora variant).
    pub is_fedora: bool,
    /// Fedora release number parsed from os-release, when available.
    pub release: Option<u32>,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fedora {
            match self.release {
                Some(n) => write!(f, "fedora {n}"),
                None => write!(f, "fedora"),
            }
        } else if self.is_linux {
            write!(f, "linux")
        } else {
            write!(f, "unsupported")
        }
    }
}

impl Platform {
    /// Detect the current platform from `/etc/os-release`.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_os_release_file(Path::new("/etc/os-release"))
    }

    /// Create a platform with explicit values (for testing).
    #[must_use]
    pub const fn new(is_fedora: bool, release: Option<u32>) -> Self {
        Self {
            is_linux: cfg!(target_os = "linux"),
            is_fedora,
            release,
        }
    }

    fn from_os_release_file(path: &Path) -> Self {
        let contents = if cfg!(target_os = "linux") {
            std::fs::read_to_string(path).unwrap_or_default()
        } else {
            String::new()
        };
        let (is_fedora, release) = Self::parse_os_release(&contents);
        Self {
            is_linux: cfg!(target_os = "linux"),
            is_fedora,
            release,
        }
    }

    /// Parse `ID=`/`ID_LIKE=`/`VERSION_ID=` fields out of os-release content.
    fn parse_os_release(contents: &str) -> (bool, Option<u32>) {
        let mut id = "";
        let mut id_like = "";
        let mut version_id = "";
        for line in contents.lines() {
            if let Some(value) = line.strip_prefix("ID=") {
                id = value.trim_matches('"');
            } else if let Some(value) = line.strip_prefix("ID_LIKE=") {
                id_like = value.trim_matches('"');
            } else if let Some(value) = line.strip_prefix("VERSION_ID=") {
                version_id = value.trim_matches('"');
            }
        }
        let is_fedora = id == "fedora" || id_like.split_whitespace().any(|t| t == "fedora");
        let release = version_id.parse::<u32>().ok();
        (is_fedora, release)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fedora_workstation() {
        let contents = "NAME=\"Fedora Linux\"\nVERSION_ID=41\nID=fedora\n";
        let (is_fedora, release) = Platform::parse_os_release(contents);
        assert!(is_fedora);
        assert_eq!(release, Some(41));
    }

    #[test]
    fn parse_fedora_variant_via_id_like() {
        let contents = "ID=nobara\nID_LIKE=\"fedora\"\nVERSION_ID=41\n";
        let (is_fedora, release) = Platform::parse_os_release(contents);
        assert!(is_fedora, "ID_LIKE=fedora should count as Fedora");
        assert_eq!(release, Some(41));
    }

    #[test]
    fn parse_non_fedora() {
        let contents = "ID=debian\nVERSION_ID=\"12\"\n";
        let (is_fedora, release) = Platform::parse_os_release(contents);
        assert!(!is_fedora);
        assert_eq!(release, Some(12));
    }

    #[test]
    fn parse_empty_contents() {
        let (is_fedora, release) = Platform::parse_os_release("");
        assert!(!is_fedora);
        assert_eq!(release, None);
    }

    #[test]
    fn parse_quoted_version() {
        let contents = "ID=\"fedora\"\nVERSION_ID=\"42\"\n";
        let (is_fedora, release) = Platform::parse_os_release(contents);
        assert!(is_fedora);
        assert_eq!(release, Some(42));
    }

    #[test]
    fn display_fedora_with_release() {
        let p = Platform::new(true, Some(41));
        assert_eq!(p.to_string(), "fedora 41");
    }

    #[test]
    fn display_fedora_without_release() {
        let p = Platform::new(true, None);
        assert_eq!(p.to_string(), "fedora");
    }

    #[test]
    fn detect_does_not_panic() {
        let _ = Platform::detect();
    }
}
