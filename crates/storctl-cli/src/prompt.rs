//! Interactive password entry.

use std::io::{self, Write};

use dialoguer::Password;

/// Source of secrets typed by the operator.
pub trait PasswordReader {
    /// Shows `prompt` and blocks until one line of input is read.
    fn read_password(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads from the controlling terminal with echo turned off.
pub struct TerminalReader;

impl PasswordReader for TerminalReader {
    fn read_password(&mut self, prompt: &str) -> io::Result<String> {
        Password::new()
            .with_prompt(label(prompt))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

/// Prompt text without the trailing `": "`; the terminal theme adds its own.
fn label(prompt: &str) -> &str {
    prompt.trim_end_matches([':', ' '])
}

/// Asks for a password twice, repeating until both entries match.
pub fn prompt_new_password(reader: &mut dyn PasswordReader, err: &mut dyn Write) -> io::Result<String> {
    loop {
        let first = reader.read_password("Password: ")?;
        let second = reader.read_password("Confirm Password: ")?;
        if first == second {
            return Ok(first);
        }
        writeln!(err, "Passwords don't match, please retry...")?;
    }
}
