//! Line-oriented terminal I/O used by every menu.

use crate::errors::Result;
use std::{
    fmt::Display,
    io::{BufRead, Write},
};
use tracing::{debug, error};

const CLEAR_SEQUENCE: &str = "\x1B[2J\x1B[1;1H";

/// Reads trimmed lines from `input` and writes prompts and messages to
/// `output`.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Wraps an input and an output stream.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `message` without a newline and reads one line.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("End of input reached");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prints a line.
    pub fn say(&mut self, message: impl Display) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Clears the screen and moves the cursor home.
    pub fn clear(&mut self) -> Result<()> {
        write!(self.output, "{CLEAR_SEQUENCE}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Unwraps a result, turning a user-facing error into a printed message.
    ///
    /// Recoverable errors are printed and yield `Ok(None)`; anything else is
    /// propagated.
    pub fn recover<T>(&mut self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_recoverable() => {
                debug!("Operation aborted: {}", e);
                self.say(format!("❌ {e}"))?;
                Ok(None)
            }
            Err(e) => {
                error!("Unrecoverable error: {}", e);
                Err(e)
            }
        }
    }

    /// Consumes the terminal and returns the output stream.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Whether an answer to a yes/no question means yes.
#[must_use]
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "s" | "si"
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use std::io::Cursor;

    #[test]
    fn test_prompt_trims_and_detects_end_of_input() {
        let mut term = Terminal::new(Cursor::new("  0001 \n"), Vec::new());
        assert_eq!(term.prompt("Code: ").unwrap(), Some("0001".to_string()));
        assert_eq!(term.prompt("Code: ").unwrap(), None);

        let output = String::from_utf8(term.into_output()).unwrap();
        assert_eq!(output, "Code: Code: ");
    }

    #[test]
    fn test_recover_prints_user_facing_errors() {
        let mut term = Terminal::new(Cursor::new(""), Vec::new());
        let value: Option<u8> = term
            .recover(Err(Error::InvalidNumber {
                input: "x".to_string(),
            }))
            .unwrap();
        assert_eq!(value, None);

        let output = String::from_utf8(term.into_output()).unwrap();
        assert!(output.contains("Invalid input 'x'"));
    }

    #[test]
    fn test_recover_propagates_other_errors() {
        let mut term = Terminal::new(Cursor::new(""), Vec::new());
        let result: Result<Option<u8>> = term.recover(Err(Error::Config {
            message: "boom".to_string(),
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("Y"));
        assert!(is_yes("s"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
