//! Built-in package sets applied on every provisioned machine.
//!
//! Machine-specific extras belong in `pkg.txt` / `fpk.txt`, not here.

/// Baseline tooling the rest of the run depends on (plugin support for
/// `dnf copr`, Flatpak itself, fontconfig for the font cache).
pub const SYSTEM_PACKAGES: &[&str] = &[
    "dnf-plugins-core",
    "flatpak",
    "fontconfig",
    "unzip",
    "tar",
];

/// Everyday CLI packages expected on every machine.
pub const REQUIRED_PACKAGES: &[&str] = &[
    "git",
    "curl",
    "wget",
    "vim-enhanced",
    "zsh",
    "htop",
    "fastfetch",
    "ripgrep",
    "fd-find",
    "fzf",
    "bat",
    "jq",
];

/// Desktop applications installed from Flathub.
pub const FLATPAK_APPS: &[&str] = &[
    "com.github.tchx84.Flatseal",
    "org.videolan.VLC",
    "md.obsidian.Obsidian",
    "com.spotify.Client",
    "org.signal.Signal",
];

/// Additional applications that depend on RPM Fusion being enabled
/// (multimedia codecs and friends), so they run as a separate late batch.
pub const EXTRA_PACKAGES: &[&str] = &[
    "gstreamer1-plugins-bad-free",
    "gstreamer1-plugins-good",
    "gstreamer1-plugin-openh264",
    "libva-utils",
    "mozilla-openh264",
];
