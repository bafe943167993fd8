//! Interactive confirmation prompt.

use std::cell::RefCell;
use std::io::{BufRead, Write};

use crate::catalog::Confirm;
use crate::error::Result;

/// Asks a `[y/N]` question on a writer and reads the answer from a reader.
///
/// Anything other than `y`/`yes` (case-insensitive) is a no, including EOF.
#[derive(Debug)]
pub struct PromptConfirm<R, W> {
    io: RefCell<(R, W)>,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    /// Create a prompt over the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            io: RefCell::new((reader, writer)),
        }
    }
}

impl PromptConfirm<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on stdout, read from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let mut io = self.io.borrow_mut();
        let (reader, writer) = &mut *io;

        write!(writer, "{prompt} [y/N] ")?;
        writer.flush()?;

        let mut input = String::new();
        reader.read_line(&mut input)?;
        let answer = input.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}
