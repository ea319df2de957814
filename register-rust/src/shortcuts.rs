use anyhow::{bail, Context, Result};
use std::{
    path::{Path, PathBuf},
    process::Command,
};

pub fn shortcut_path(dir: &Path, name: &str) -> Result<PathBuf> {
    if name.is_empty() {
        bail!("shortcut name is empty");
    }
    Ok(dir.join(format!("{name}.lnk")))
}

pub fn create_shortcut(
    dir: &Path,
    name: &str,
    target: &Path,
    working_dir: &Path,
    icon: Option<&Path>,
) -> Result<PathBuf> {
    let lnk_path = shortcut_path(dir, name)?;
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let lnk = ps_quote(&lnk_path.display().to_string());
    let tgt = ps_quote(&target.display().to_string());
    let wdir = ps_quote(&working_dir.display().to_string());
    let icon = icon.map(|p| ps_quote(&p.display().to_string()));

    let mut script = format!(
        "$WshShell = New-Object -ComObject WScript.Shell; \
         $Shortcut = $WshShell.CreateShortcut({lnk}); \
         $Shortcut.TargetPath = {tgt}; \
         $Shortcut.WorkingDirectory = {wdir}; "
    );
    if let Some(icon_path) = icon {
        script.push_str(&format!("$Shortcut.IconLocation = {icon_path}; "));
    }
    script.push_str("$Shortcut.Save();");

    let status = Command::new("powershell")
        .arg("-NoProfile")
        .arg("-Command")
        .arg(script)
        .status()
        .context("run powershell")?;

    if !status.success() {
        bail!("failed to create shortcut (exit {:?})", status.code());
    }

    Ok(lnk_path)
}

pub fn remove_shortcut(dir: &Path, name: &str) -> Result<()> {
    let lnk_path = shortcut_path(dir, name)?;
    if lnk_path.exists() {
        std::fs::remove_file(&lnk_path)
            .with_context(|| format!("remove {}", lnk_path.display()))?;
    }
    Ok(())
}

fn ps_quote(value: &str) -> String {
    let escaped = value.replace('\'', "''");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcut_path_adds_lnk() {
        let base = PathBuf::from("StartMenu");
        let out = shortcut_path(&base, "Dymatic Engine").unwrap();
        assert_eq!(out, base.join("Dymatic Engine.lnk"));
    }

    #[test]
    fn shortcut_path_rejects_empty_name() {
        let base = PathBuf::from("StartMenu");
        let err = shortcut_path(&base, "").unwrap_err();
        assert!(err.to_string().contains("shortcut name is empty"));
    }

    #[test]
    fn ps_quote_escapes_single_quotes() {
        assert_eq!(ps_quote("it's"), "'it''s'");
    }

    #[test]
    fn remove_shortcut_ignores_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        remove_shortcut(tmp.path(), "NotThere").unwrap();
    }

    #[test]
    fn remove_shortcut_deletes_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let lnk = tmp.path().join("Dymatic Engine.lnk");
        std::fs::write(&lnk, "stub").unwrap();
        remove_shortcut(tmp.path(), "Dymatic Engine").unwrap();
        assert!(!lnk.exists());
    }
}
