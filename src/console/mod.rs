//! Console I/O
//!
//! The session talks to the user through the [`Console`] trait, so games can
//! be driven by stdin/stdout or by a script in tests.
//!
//! - `input`: prompt answer parsing
//! - `render`: probability table and menus

pub mod input;
pub mod render;

use std::io::{self, BufRead, Write};

pub use input::{parse_die_choice, parse_index, Command, InputError};
pub use render::{die_menu, render_matrix};

/// Line-oriented interactive console.
pub trait Console {
    /// Show `prompt` and read one line without its line terminator.
    /// Returns None at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Write one line of output.
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<C: Console + ?Sized> Console for &mut C {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Console on the process's stdin and stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        read_lossy_line(&mut io::stdin().lock())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{}", line)
    }
}

/// Read one line, replacing invalid UTF-8 with U+FFFD so the prompt parser
/// rejects it like any other garbage. None at end of input.
fn read_lossy_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut bytes = Vec::new();
    if reader.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&bytes);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Scripted console for tests: canned input lines, captured output.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: std::collections::VecDeque<String>,
    /// Everything written, prompts included, one entry per line.
    pub output: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    /// Create with the lines the "user" will type.
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Whether any output line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|l| l.contains(needle))
    }

    /// Input lines not consumed.
    pub fn unread(&self) -> usize {
        self.input.len()
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.push(prompt.to_string());
        Ok(self.input.pop_front())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.output.extend(line.lines().map(str::to_string));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_utf8_line_is_kept_as_text() {
        let mut reader = io::Cursor::new(b"\xff\xfe\n1\r\n2".to_vec());

        let garbled = read_lossy_line(&mut reader).unwrap().unwrap();
        assert_eq!(garbled, "\u{FFFD}\u{FFFD}");
        assert!(parse_index(&garbled, 2).is_err());

        assert_eq!(read_lossy_line(&mut reader).unwrap().as_deref(), Some("1"));
        assert_eq!(read_lossy_line(&mut reader).unwrap().as_deref(), Some("2"));
        assert_eq!(read_lossy_line(&mut reader).unwrap(), None);
    }
}
