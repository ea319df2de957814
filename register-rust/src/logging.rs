use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

const LOG_FILE_NAME: &str = "register.log";

pub fn logs_dir(root: &Path) -> PathBuf {
    root.join("logs")
}

pub fn init(root: &Path) -> Result<PathBuf> {
    let dir = logs_dir(root);
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    let log_path = dir.join(LOG_FILE_NAME);
    let _file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("open {}", log_path.display()))?;
    Ok(log_path)
}
