use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

/// Prompts until the reply starts with y or n, case-insensitive.
/// Generic over the streams so tests can drive it with a fake input.
pub fn ask_yes_no(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<bool> {
    loop {
        write!(output, "{prompt} ").context("write prompt")?;
        output.flush().context("flush prompt")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("read reply")?;
        if read == 0 {
            bail!("input closed before an answer was given");
        }

        match line.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => {}
        }
    }
}
