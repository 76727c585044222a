//! Line-oriented package manifest parser (`pkg.txt`, `fpk.txt`).
use std::path::Path;

use anyhow::{Context, Result};

/// Load package identifiers from a manifest file.
///
/// Returns `Ok(None)` if the file does not exist — the caller decides how to
/// report the absent manifest (the install tasks warn and skip the batch).
///
/// A line qualifies as a package identifier iff it is non-empty after
/// trimming and does not start with `#`. All other lines are silently
/// dropped. Order is preserved and duplicates are kept; deduplication is the
/// package manager's concern.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load(path: &Path) -> Result<Option<Vec<String>>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    Ok(Some(parse(&contents)))
}

/// Parse manifest content into an ordered list of package identifiers.
fn parse(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
