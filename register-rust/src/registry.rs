//! Registry keys for the .dymatic file type and the DirectX GPU preference.
//!
//! All writes are create-or-overwrite, so re-running registration is safe.

use std::path::{Path, PathBuf};

use crate::{config, paths};

pub const GPU_PREFERENCES_KEY: &str = r"Software\Microsoft\DirectX\UserGpuPreferences";

/// Everything the classes-root tree needs for one document type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeSpec {
    pub class_name: String,
    pub class_description: String,
    pub extension: String,
    pub content_type: String,
    pub perceived_type: String,
    pub icon: PathBuf,
    pub shell_new_template: PathBuf,
}

impl FileTypeSpec {
    pub fn from_config(root: &Path) -> Self {
        Self {
            class_name: config::CLASS_NAME.to_string(),
            class_description: config::CLASS_DESCRIPTION.to_string(),
            extension: config::EXTENSION.to_string(),
            content_type: config::CONTENT_TYPE.to_string(),
            perceived_type: config::PERCEIVED_TYPE.to_string(),
            icon: paths::icon_path(root),
            shell_new_template: paths::shell_new_template(root),
        }
    }
}

/// The value written under UserGpuPreferences for the editor executable.
pub fn gpu_flags() -> &'static str {
    config::GPU_FLAGS
}

/// UserGpuPreferences entries are matched against the executable's
/// absolute path, so the `..` hops from the engine-relative layout must be
/// folded out of the value name or the entry never takes effect.
pub fn gpu_value_name(exe: &Path) -> String {
    normalize(exe).display().to_string()
}

fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(windows)]
pub fn register_file_type(spec: &FileTypeSpec) -> anyhow::Result<()> {
    use anyhow::Context;
    use winreg::enums::HKEY_CLASSES_ROOT;
    use winreg::RegKey;

    let hkcr = RegKey::predef(HKEY_CLASSES_ROOT);

    let (class_key, _) = hkcr
        .create_subkey(&spec.class_name)
        .with_context(|| format!("create HKCR\\{}", spec.class_name))?;
    class_key
        .set_value("", &spec.class_description)
        .context("set class description")?;

    let (ext_key, _) = hkcr
        .create_subkey(&spec.extension)
        .with_context(|| format!("create HKCR\\{}", spec.extension))?;
    ext_key
        .set_value("", &spec.class_name)
        .context("set extension class")?;
    ext_key
        .set_value("Content Type", &spec.content_type)
        .context("set Content Type")?;
    ext_key
        .set_value("PerceivedType", &spec.perceived_type)
        .context("set PerceivedType")?;

    let (icon_key, _) = ext_key
        .create_subkey("DefaultIcon")
        .context("create DefaultIcon")?;
    icon_key
        .set_value("", &spec.icon.display().to_string())
        .context("set DefaultIcon")?;

    let (new_key, _) = ext_key
        .create_subkey("ShellNew")
        .context("create ShellNew")?;
    new_key
        .set_value("FileName", &spec.shell_new_template.display().to_string())
        .context("set ShellNew FileName")?;

    Ok(())
}

#[cfg(windows)]
pub fn unregister_file_type(spec: &FileTypeSpec) -> anyhow::Result<()> {
    use anyhow::Context;
    use winreg::enums::HKEY_CLASSES_ROOT;
    use winreg::RegKey;

    let hkcr = RegKey::predef(HKEY_CLASSES_ROOT);
    for key in [spec.extension.as_str(), spec.class_name.as_str()] {
        match hkcr.delete_subkey_all(key) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                return Err(err).with_context(|| format!("delete HKCR\\{key}"));
            }
        }
    }
    Ok(())
}

#[cfg(windows)]
pub fn set_gpu_preference(exe: &Path) -> anyhow::Result<()> {
    use anyhow::Context;
    use winreg::enums::HKEY_CURRENT_USER;
    use winreg::RegKey;

    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let (key, _) = hkcu
        .create_subkey(GPU_PREFERENCES_KEY)
        .context("create UserGpuPreferences")?;
    key.set_value(gpu_value_name(exe), &gpu_flags().to_string())
        .context("set GPU preference")?;
    Ok(())
}

#[cfg(windows)]
pub fn clear_gpu_preference(exe: &Path) -> anyhow::Result<()> {
    use anyhow::Context;
    use winreg::enums::{HKEY_CURRENT_USER, KEY_SET_VALUE};
    use winreg::RegKey;

    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let key = match hkcu.open_subkey_with_flags(GPU_PREFERENCES_KEY, KEY_SET_VALUE) {
        Ok(key) => key,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err).context("open UserGpuPreferences"),
    };
    match key.delete_value(gpu_value_name(exe)) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).context("delete GPU preference"),
    }
}
