use crate::error::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// Somewhere the loop can read answers to its prompts from.
///
/// `Ok(None)` means the input is exhausted.
pub trait LineSource {
    /// Show `prompt` and read one line without its trailing newline.
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<Option<String>>;
}

/// Interactive terminal input backed by rustyline, with history.
///
/// The editor draws the prompt itself, so `out` is not written to.
pub struct Readline {
    editor: DefaultEditor,
}

impl Readline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Readline {
    fn read_line(&mut self, prompt: &str, _out: &mut dyn Write) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Line input from any buffered reader: piped stdin, files, in-memory scripts.
///
/// Prompts are written to `out` before each read.
pub struct BufferedLines<R> {
    reader: R,
}

impl<R: BufRead> BufferedLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for BufferedLines<R> {
    fn read_line(&mut self, prompt: &str, out: &mut dyn Write) -> Result<Option<String>> {
        write!(out, "{}", prompt)?;
        out.flush()?;

        // Bytes that are not UTF-8 are replaced, never treated as a read failure.
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}
