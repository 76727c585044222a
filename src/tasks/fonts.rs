use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};

use super::{Context, Task, TaskResult};
use crate::config::settings::Font;

/// Download and install the configured fonts.
///
/// Each font absent from `fc-list` is downloaded as an archive, extracted
/// into `~/.local/share/fonts/<dir>`, and the font cache is refreshed once
/// at the end. The whole pipeline is a prerequisite for the desktop settings
/// that reference these fonts, so it fails fast.
pub struct InstallFonts;

impl Task for InstallFonts {
    fn name(&self) -> &str {
        "Install fonts"
    }

    fn fail_fast(&self) -> bool {
        true
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.settings.fonts.is_empty() && ctx.executor.which("fc-list")
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let font_list = installed_fonts(ctx);
        let missing: Vec<&Font> = ctx
            .config
            .settings
            .fonts
            .iter()
            .filter(|font| !font_list.contains(&font.name))
            .collect();

        let present = ctx.config.settings.fonts.len() - missing.len();
        if missing.is_empty() {
            ctx.log.info(&format!("{present} fonts already installed"));
            return Ok(TaskResult::Ok);
        }

        if ctx.dry_run {
            for font in &missing {
                ctx.log
                    .dry_run(&format!("download and install {}", font.name));
            }
            return Ok(TaskResult::DryRun);
        }

        for font in &missing {
            install_font(ctx, font)?;
        }
        refresh_font_cache(ctx)?;

        ctx.log.info(&format!(
            "{} installed, {present} already installed",
            missing.len()
        ));
        Ok(TaskResult::Ok)
    }
}

/// Query installed fonts once and return the raw `fc-list` output.
fn installed_fonts(ctx: &Context) -> String {
    ctx.executor
        .run_unchecked("fc-list", &[])
        .map(|r| r.stdout)
        .unwrap_or_default()
}

/// Download and extract one font archive.
fn install_font(ctx: &Context, font: &Font) -> Result<()> {
    let dest = font_dest_dir(&ctx.fonts_dir(), &font.name);
    std::fs::create_dir_all(&dest)
        .with_context(|| format!("creating font directory {}", dest.display()))?;

    ctx.log.debug(&format!("downloading {}", font.url));
    let archive = download_archive(&font.url)?;

    let (program, args) = extract_command(archive.path(), &dest, &font.url)?;
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    ctx.executor
        .run(program, &arg_refs)
        .with_context(|| format!("extracting font archive for {}", font.name))?;

    ctx.log.success(&format!("Installed {}", font.name));
    Ok(())
}

/// Fetch the archive into a temp file, keeping the extension so the
/// extraction tool can be chosen from it.
fn download_archive(url: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::NamedTempFile::new().context("creating download staging file")?;
    let mut response = ureq::get(url)
        .call()
        .with_context(|| format!("downloading {url}"))?;
    let mut reader = response.body_mut().as_reader();
    std::io::copy(&mut reader, &mut file)
        .with_context(|| format!("writing download of {url}"))?;
    file.flush().context("flushing downloaded archive")?;
    Ok(file)
}

/// Per-font target directory under the user fonts dir.
fn font_dest_dir(fonts_dir: &Path, name: &str) -> PathBuf {
    fonts_dir.join(name.replace(char::is_whitespace, "-"))
}

/// Choose the extraction command from the archive URL's extension.
///
/// The extraction tool is an external collaborator; only the dispatch lives
/// here.
fn extract_command(archive: &Path, dest: &Path, url: &str) -> Result<(&'static str, Vec<String>)> {
    let archive = archive.display().to_string();
    let dest = dest.display().to_string();
    if url.ends_with(".zip") {
        Ok(("unzip", vec!["-o".into(), archive, "-d".into(), dest]))
    } else if url.ends_with(".tar.gz")
        || url.ends_with(".tgz")
        || url.ends_with(".tar.xz")
        || url.ends_with(".tar.bz2")
    {
        Ok(("tar", vec!["-xf".into(), archive, "-C".into(), dest]))
    } else {
        bail!("unsupported font archive format: {url}");
    }
}

/// Rebuild the font cache after new fonts were installed.
fn refresh_font_cache(ctx: &Context) -> Result<()> {
    ctx.executor
        .run("fc-cache", &["-f"])
        .context("refreshing font cache")?;
    Ok(())
}
