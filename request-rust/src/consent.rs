use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

/// Prints the prompt and reads a single reply. The first character of the
/// trimmed input decides, case-insensitive; anything unrecognised yields
/// None so the caller can ask again.
pub fn read_reply(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<bool>> {
    write!(output, "{prompt} ").context("write prompt")?;
    output.flush().context("flush prompt")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("read reply")?;
    if read == 0 {
        bail!("input closed before an answer was given");
    }

    Ok(match line.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('y') => Some(true),
        Some('n') => Some(false),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn first_character_decides() {
        let mut out = Vec::new();
        let mut yes = Cursor::new(b"Yes\n".to_vec());
        assert_eq!(read_reply("[Y/N]:", &mut yes, &mut out).unwrap(), Some(true));

        let mut no = Cursor::new(b"nope\n".to_vec());
        assert_eq!(read_reply("[Y/N]:", &mut no, &mut out).unwrap(), Some(false));
    }

    #[test]
    fn unrecognised_input_is_none() {
        let mut out = Vec::new();
        let mut input = Cursor::new(b"what\n".to_vec());
        assert_eq!(read_reply("[Y/N]:", &mut input, &mut out).unwrap(), None);
    }

    #[test]
    fn errors_on_closed_input() {
        let mut out = Vec::new();
        let mut input = Cursor::new(Vec::new());
        let err = read_reply("[Y/N]:", &mut input, &mut out).unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }
}
