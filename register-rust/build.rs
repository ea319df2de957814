use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use serde::Deserialize;

fn main() {
    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set");
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let manifest_dir = PathBuf::from(manifest_dir);
    let repo_root = manifest_dir.join("..");

    let config = load_config(&repo_root).unwrap_or_else(|err| {
        panic!("failed to load config.toml: {err}");
    });

    if let Err(err) = write_config_rs(&PathBuf::from(&out_dir), &config) {
        panic!("failed to write config: {err}");
    }

    if let Err(err) = embed_metadata(&repo_root, &config) {
        panic!("failed to embed resource metadata: {err}");
    }
}

#[derive(Debug, Deserialize)]
struct Config {
    product_name: String,
    class_name: String,
    class_description: String,
    extension: String,
    content_type: String,
    perceived_type: String,
    version: String,
    editor_exe: String,
    editor_working_dir: String,
    icon: String,
    shell_new_template: String,
    gpu_flags: String,
    bootstrap_script: String,
    filetype_script: String,
    #[serde(default)]
    legacy_mode: bool,
}

fn load_config(repo_root: &Path) -> io::Result<Config> {
    let config_path = repo_root.join("config.toml");
    println!("cargo:rerun-if-changed={}", config_path.display());
    let contents = fs::read_to_string(&config_path)?;
    let cfg: Config = toml::from_str(&contents)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(cfg)
}

#[cfg(windows)]
fn embed_metadata(repo_root: &Path, config: &Config) -> io::Result<()> {
    let mut res = winres::WindowsResource::new();
    let icon_path = repo_root.join("..").join("..").join(&config.icon);
    if icon_path.exists() {
        res.set_icon(icon_path.to_string_lossy().as_ref());
    }
    res.set("ProductName", &config.product_name);
    res.set("FileDescription", "Dymatic Engine shell registration");
    if !config.version.is_empty() {
        res.set("FileVersion", &config.version);
        res.set("ProductVersion", &config.version);
    }
    res.compile()?;
    Ok(())
}

#[cfg(not(windows))]
fn embed_metadata(_repo_root: &Path, _config: &Config) -> io::Result<()> {
    Ok(())
}

fn write_config_rs(out_dir: &Path, config: &Config) -> io::Result<()> {
    let out_path = out_dir.join("dymatic_config.rs");
    let mut file = File::create(&out_path)?;
    writeln!(file, "pub const PRODUCT_NAME: &str = {:?};", config.product_name)?;
    writeln!(file, "pub const CLASS_NAME: &str = {:?};", config.class_name)?;
    writeln!(
        file,
        "pub const CLASS_DESCRIPTION: &str = {:?};",
        config.class_description
    )?;
    writeln!(file, "pub const EXTENSION: &str = {:?};", config.extension)?;
    writeln!(file, "pub const CONTENT_TYPE: &str = {:?};", config.content_type)?;
    writeln!(
        file,
        "pub const PERCEIVED_TYPE: &str = {:?};",
        config.perceived_type
    )?;
    writeln!(file, "pub const VERSION: &str = {:?};", config.version)?;
    writeln!(file, "pub const EDITOR_EXE: &str = {:?};", config.editor_exe)?;
    writeln!(
        file,
        "pub const EDITOR_WORKING_DIR: &str = {:?};",
        config.editor_working_dir
    )?;
    writeln!(file, "pub const ICON: &str = {:?};", config.icon)?;
    writeln!(
        file,
        "pub const SHELL_NEW_TEMPLATE: &str = {:?};",
        config.shell_new_template
    )?;
    writeln!(file, "pub const GPU_FLAGS: &str = {:?};", config.gpu_flags)?;
    writeln!(
        file,
        "pub const BOOTSTRAP_SCRIPT: &str = {:?};",
        config.bootstrap_script
    )?;
    writeln!(
        file,
        "pub const FILETYPE_SCRIPT: &str = {:?};",
        config.filetype_script
    )?;
    writeln!(file, "pub const LEGACY_MODE: bool = {:?};", config.legacy_mode)?;
    Ok(())
}
