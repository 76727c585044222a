//! Fedora post-install provisioning engine.
//!
//! Automates the first-boot configuration of a Fedora desktop: system
//! update, repository enablement (RPM Fusion, COPR, Flathub), package
//! installation from built-in lists and the optional `pkg.txt` / `fpk.txt`
//! manifests, font installation, DNS configuration, service enablement, and
//! desktop tweaks — all driven by `setup.toml` in the working directory.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — parse and validate `setup.toml` and the manifests
//! - **[`resources`]** — idempotent `check + apply` primitives (packages, remotes, …)
//! - **[`tasks`]** — named units of work in a fixed order, wired to resources
//! - **[`commands`]** — top-level subcommand orchestration (`install`, `check`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod tasks;
