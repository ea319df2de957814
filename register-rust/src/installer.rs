use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};

use crate::{config, paths, registry::FileTypeSpec, state};

pub fn run_from_args(root: &Path) -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--unregister") {
        return run_unregister(root);
    }
    run(root)
}

#[cfg(windows)]
pub fn run(root: &Path) -> Result<()> {
    use crate::{consent, registry, shortcuts};

    let log_path = crate::logging::init(root)?;
    let spec = FileTypeSpec::from_config(root);
    let editor_exe = paths::editor_exe(root);
    let desktop = paths::desktop_dir()?;
    let start_menu = paths::start_menu_programs_dir()?;

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout();

    run_with_deps(
        root,
        &spec,
        &editor_exe,
        &desktop,
        &start_menu,
        config::LEGACY_MODE,
        |cmd| exec_with_log(cmd, Some(&log_path)),
        |dir, name, target, working_dir, icon| {
            shortcuts::create_shortcut(dir, name, target, working_dir, icon)
        },
        registry::register_file_type,
        || {
            consent::ask_yes_no(
                "Enable GPU High Performance? (Recommended) [Y/N]:",
                &mut stdin,
                &mut stdout,
            )
        },
        registry::set_gpu_preference,
        Some(&log_path),
    )?;

    println!("{} registration with Windows complete!", config::PRODUCT_NAME);
    Ok(())
}

#[cfg(not(windows))]
pub fn run(_root: &Path) -> Result<()> {
    anyhow::bail!("shell registration is only supported on Windows")
}

/// The registration sequence with every side effect injected, so tests can
/// observe ordering and idempotence without touching the shell. Batch
/// scripts are invoked with `nopause`; their exit codes are logged, never
/// inspected.
#[allow(clippy::too_many_arguments)]
pub fn run_with_deps(
    root: &Path,
    spec: &FileTypeSpec,
    editor_exe: &Path,
    desktop_dir: &Path,
    start_menu_dir: &Path,
    legacy_mode: bool,
    mut exec: impl FnMut(&mut Command) -> Result<ExitStatus>,
    create_shortcut_fn: impl Fn(&Path, &str, &Path, &Path, Option<&Path>) -> Result<PathBuf>,
    register_fn: impl Fn(&FileTypeSpec) -> Result<()>,
    mut prompt_gpu: impl FnMut() -> Result<bool>,
    set_gpu_fn: impl Fn(&Path) -> Result<()>,
    log_path: Option<&Path>,
) -> Result<()> {
    log_line(
        log_path,
        &format!("Starting registration for {}", config::PRODUCT_NAME),
    )?;

    let state_path = state::state_path(root);
    if state_path.exists() {
        let existing = state::read_state(&state_path)?;
        match state::compare_versions(&existing.tool_version, config::VERSION) {
            state::VersionRelation::Same => {
                log_line(log_path, "Already registered at this version, refreshing")?;
            }
            _ => {
                log_line(
                    log_path,
                    &format!(
                        "Previously registered by version {}, re-registering",
                        existing.tool_version
                    ),
                )?;
            }
        }
    }

    log_line(log_path, "Installing required submodules")?;
    let bootstrap = paths::script_path(root, config::BOOTSTRAP_SCRIPT)?;
    let mut cmd = Command::new(&bootstrap);
    cmd.arg("nopause");
    let status = exec(&mut cmd)?;
    log_line(
        log_path,
        &format!("{} exited with {:?}", config::BOOTSTRAP_SCRIPT, status.code()),
    )?;

    let working_dir = paths::editor_working_dir(root);

    // Shortcut icons come from the executable itself; the .ico file only
    // backs the registry DefaultIcon.
    log_line(log_path, "Setting up desktop shortcut")?;
    let desktop_lnk = create_shortcut_fn(
        desktop_dir,
        config::PRODUCT_NAME,
        editor_exe,
        &working_dir,
        Some(editor_exe),
    )?;

    log_line(log_path, "Setting up start menu shortcut")?;
    let start_menu_lnk = create_shortcut_fn(
        start_menu_dir,
        config::PRODUCT_NAME,
        editor_exe,
        &working_dir,
        Some(editor_exe),
    )?;

    log_line(log_path, "Writing file type keys to registry")?;
    register_fn(spec)?;

    let mut gpu_preference_set = false;
    if !legacy_mode {
        if prompt_gpu()? {
            log_line(log_path, "Enabling high performance GPU preference")?;
            set_gpu_fn(editor_exe)?;
            gpu_preference_set = true;
        }

        log_line(log_path, "Binding default application for the file type")?;
        let filetype = paths::script_path(root, config::FILETYPE_SCRIPT)?;
        let mut cmd = Command::new(&filetype);
        cmd.arg("nopause");
        let status = exec(&mut cmd)?;
        log_line(
            log_path,
            &format!("{} exited with {:?}", config::FILETYPE_SCRIPT, status.code()),
        )?;
    }

    let receipt = state::Registration {
        product_name: config::PRODUCT_NAME.to_string(),
        extension: spec.extension.clone(),
        shortcuts: vec![
            desktop_lnk.display().to_string(),
            start_menu_lnk.display().to_string(),
        ],
        gpu_preference_set,
        tool_version: config::VERSION.to_string(),
    };
    state::write_state(&state_path, &receipt)?;

    log_line(log_path, "Registration complete")?;
    Ok(())
}

#[cfg(windows)]
fn run_unregister(root: &Path) -> Result<()> {
    use crate::{registry, shortcuts};

    let log_path = crate::logging::init(root)?;
    let spec = FileTypeSpec::from_config(root);

    log_line(Some(&log_path), "Removing shortcuts")?;
    if let Ok(desktop) = paths::desktop_dir() {
        shortcuts::remove_shortcut(&desktop, config::PRODUCT_NAME)?;
    }
    if let Ok(start_menu) = paths::start_menu_programs_dir() {
        shortcuts::remove_shortcut(&start_menu, config::PRODUCT_NAME)?;
    }

    log_line(Some(&log_path), "Removing registry keys")?;
    registry::unregister_file_type(&spec)?;
    registry::clear_gpu_preference(&paths::editor_exe(root))?;

    let state_path = state::state_path(root);
    if state_path.exists() {
        fs::remove_file(&state_path)
            .with_context(|| format!("remove {}", state_path.display()))?;
    }

    log_line(Some(&log_path), "Unregistration complete")?;
    println!("{} has been unregistered.", config::PRODUCT_NAME);
    Ok(())
}

#[cfg(not(windows))]
fn run_unregister(_root: &Path) -> Result<()> {
    anyhow::bail!("shell registration is only supported on Windows")
}

pub fn log_line(path: Option<&Path>, line: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;
    writeln!(file, "{line}")?;
    Ok(())
}

#[cfg(windows)]
fn exec_with_log(cmd: &mut Command, log_path: Option<&Path>) -> Result<ExitStatus> {
    if let Some(log_path) = log_path {
        let _ = log_line(Some(log_path), &format!("> {}", format_command(cmd)));
    }
    let output = cmd.output().context("spawn command")?;
    if let Some(log_path) = log_path {
        if !output.stdout.is_empty() {
            let text = String::from_utf8_lossy(&output.stdout);
            let _ = log_line(Some(log_path), text.trim_end());
        }
        if !output.stderr.is_empty() {
            let text = String::from_utf8_lossy(&output.stderr);
            let _ = log_line(Some(log_path), text.trim_end());
        }
    }
    Ok(output.status)
}

#[cfg(windows)]
fn format_command(cmd: &Command) -> String {
    let program = cmd.get_program().to_string_lossy();
    let args = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {args}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_line_appends_to_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("register.log");
        log_line(Some(&path), "first").unwrap();
        log_line(Some(&path), "second").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn log_line_without_path_is_a_noop() {
        log_line(None, "dropped").unwrap();
    }
}
