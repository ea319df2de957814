use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use crate::config;

pub fn self_path() -> Result<PathBuf> {
    std::env::current_exe().context("current_exe")
}

pub fn root_dir() -> Result<PathBuf> {
    if let Ok(dev_root) = std::env::var("DYMATIC_ROOT") {
        return Ok(PathBuf::from(dev_root));
    }
    let exe = self_path()?;
    Ok(exe.parent().context("exe has no parent")?.to_path_buf())
}

/// The engine checkout root. The tools live two levels down, in
/// scripts/Registration, so everything they reference sits at ../..
pub fn engine_root(root: &Path) -> PathBuf {
    root.join("..").join("..")
}

pub fn editor_exe(root: &Path) -> PathBuf {
    engine_root(root).join(config::EDITOR_EXE)
}

pub fn editor_working_dir(root: &Path) -> PathBuf {
    engine_root(root).join(config::EDITOR_WORKING_DIR)
}

pub fn icon_path(root: &Path) -> PathBuf {
    engine_root(root).join(config::ICON)
}

pub fn shell_new_template(root: &Path) -> PathBuf {
    engine_root(root).join(config::SHELL_NEW_TEMPLATE)
}

pub fn script_path(root: &Path, name: &str) -> Result<PathBuf> {
    if name.is_empty() {
        bail!("script name is empty");
    }
    Ok(root.join(name))
}

pub fn desktop_dir() -> Result<PathBuf> {
    let profile = std::env::var("USERPROFILE").context("USERPROFILE not set")?;
    Ok(PathBuf::from(profile).join("Desktop"))
}

pub fn start_menu_programs_dir() -> Result<PathBuf> {
    let appdata = std::env::var("APPDATA").context("APPDATA not set")?;
    Ok(PathBuf::from(appdata)
        .join("Microsoft")
        .join("Windows")
        .join("Start Menu")
        .join("Programs"))
}
