use anyhow::{Context, Result};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Receipt of what the last registration run wrote. Informational only:
/// every run rewrites the shell state regardless (the writes are
/// create-or-overwrite), but the receipt lets a re-run report what it is
/// refreshing and lets unregistration know a registration happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Registration {
    pub product_name: String,
    pub extension: String,
    pub shortcuts: Vec<String>,
    pub gpu_preference_set: bool,
    #[serde(default)]
    pub tool_version: String,
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join("registration.json")
}

pub fn read_state(state_path: &Path) -> Result<Registration> {
    let s = fs::read_to_string(state_path).context("read registration.json")?;
    serde_json::from_str(&s).context("parse registration.json")
}

pub fn write_state(state_path: &Path, state: &Registration) -> Result<()> {
    if let Some(parent) = state_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let contents = serde_json::to_string_pretty(state).context("serialize registration.json")?;
    fs::write(state_path, contents).context("write registration.json")?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRelation {
    Same,
    Older,
    Newer,
    Unknown,
}

pub fn compare_versions(recorded: &str, current: &str) -> VersionRelation {
    if recorded.trim() == current.trim() {
        return VersionRelation::Same;
    }
    let recorded = Version::parse(recorded.trim());
    let current = Version::parse(current.trim());
    match (recorded, current) {
        (Ok(recorded), Ok(current)) => match current.cmp(&recorded) {
            std::cmp::Ordering::Greater => VersionRelation::Newer,
            std::cmp::Ordering::Less => VersionRelation::Older,
            std::cmp::Ordering::Equal => VersionRelation::Same,
        },
        _ => VersionRelation::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip_registration() {
        let state = Registration {
            product_name: "Dymatic Engine".to_string(),
            extension: ".dymatic".to_string(),
            shortcuts: vec!["Desktop\\Dymatic Engine.lnk".to_string()],
            gpu_preference_set: true,
            tool_version: "0.1.0".to_string(),
        };
        let s = serde_json::to_string(&state).unwrap();
        let out: Registration = serde_json::from_str(&s).unwrap();
        assert_eq!(state, out);
    }

    #[test]
    fn write_then_read_state() {
        let tmp = tempfile::tempdir().unwrap();
        let path = state_path(tmp.path());
        let state = Registration {
            product_name: "Dymatic Engine".to_string(),
            extension: ".dymatic".to_string(),
            shortcuts: vec![],
            gpu_preference_set: false,
            tool_version: "0.1.0".to_string(),
        };
        write_state(&path, &state).unwrap();
        assert_eq!(read_state(&path).unwrap(), state);
    }

    #[test]
    fn compare_versions_relations() {
        assert_eq!(compare_versions("0.1.0", "0.1.0"), VersionRelation::Same);
        assert_eq!(compare_versions("0.1.0", "0.2.0"), VersionRelation::Newer);
        assert_eq!(compare_versions("0.2.0", "0.1.0"), VersionRelation::Older);
        assert_eq!(compare_versions("", "0.1.0"), VersionRelation::Unknown);
    }
}
