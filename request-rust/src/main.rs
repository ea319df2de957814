mod consent;

use anyhow::{Context, Result};
use std::{
    io::{BufRead, Write},
    path::PathBuf,
    process::Command,
};

const EXPLANATION: &str = "Registering Dymatic with Windows will add it to the start menu, \
desktop, and setup Windows to recognise Dymatic files.";
const PROMPT: &str = "Would you like to register Dymatic with Windows? [Y/N]:";

fn main() -> Result<()> {
    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout();
    run(&mut stdin, &mut stdout, || {
        let registrar = registrar_path()?;
        launch_registrar(&registrar)
    })
}

/// Consent gate: `n` exits without doing anything, `y` hands off to the
/// registration tool. The explanation is repeated before every attempt,
/// and the registrar's exit status is not inspected.
fn run(
    input: &mut impl BufRead,
    output: &mut impl Write,
    mut launch: impl FnMut() -> Result<()>,
) -> Result<()> {
    loop {
        writeln!(output, "{EXPLANATION}").context("write explanation")?;
        match consent::read_reply(PROMPT, input, output)? {
            Some(true) => return launch(),
            Some(false) => return Ok(()),
            None => {}
        }
    }
}

fn registrar_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("resolve current exe")?;
    let dir = exe.parent().context("exe has no parent")?;
    Ok(dir.join(registrar_exe_name()))
}

fn registrar_exe_name() -> &'static str {
    if cfg!(windows) {
        "dymatic-register.exe"
    } else {
        "dymatic-register"
    }
}

fn launch_registrar(registrar: &std::path::Path) -> Result<()> {
    // The registrar elevates itself, so a plain spawn is enough here.
    let _ = Command::new(registrar)
        .status()
        .with_context(|| format!("run {}", registrar.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Cursor;

    #[test]
    fn declining_never_launches() {
        let launched = Cell::new(false);
        let mut input = Cursor::new(b"n\n".to_vec());
        let mut output = Vec::new();

        run(&mut input, &mut output, || {
            launched.set(true);
            Ok(())
        })
        .unwrap();

        assert!(!launched.get());
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Registering Dymatic with Windows"));
    }

    #[test]
    fn accepting_launches_the_registrar() {
        let launched = Cell::new(false);
        let mut input = Cursor::new(b"y\n".to_vec());
        let mut output = Vec::new();

        run(&mut input, &mut output, || {
            launched.set(true);
            Ok(())
        })
        .unwrap();

        assert!(launched.get());
    }

    #[test]
    fn garbage_then_no_still_exits_cleanly() {
        let launched = Cell::new(false);
        let mut input = Cursor::new(b"maybe\nhelp\nN\n".to_vec());
        let mut output = Vec::new();

        run(&mut input, &mut output, || {
            launched.set(true);
            Ok(())
        })
        .unwrap();

        assert!(!launched.get());
    }

    #[test]
    fn explanation_repeats_on_every_attempt() {
        let mut input = Cursor::new(b"maybe\nhelp\ny\n".to_vec());
        let mut output = Vec::new();

        run(&mut input, &mut output, || Ok(())).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("Registering Dymatic with Windows").count(), 3);
        assert_eq!(text.matches(PROMPT).count(), 3);
    }

    #[test]
    fn registrar_exe_name_matches_platform() {
        if cfg!(windows) {
            assert_eq!(registrar_exe_name(), "dymatic-register.exe");
        } else {
            assert_eq!(registrar_exe_name(), "dymatic-register");
        }
    }
}
