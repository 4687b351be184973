//! Line-oriented console I/O.

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// The console surface the workflow talks to.
pub trait Console {
    /// Reads one line without its terminator.
    ///
    /// # Errors
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] once input is exhausted.
    fn read_line(&mut self) -> io::Result<String>;

    /// Reads a single key press. `None` means input is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates read failures.
    fn read_key(&mut self) -> io::Result<Option<char>>;

    /// Writes text without a line break (for prompts).
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Writes text followed by a line break.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    fn write_line(&mut self, text: &str) -> io::Result<()>;
}

/// A [`Console`] over any buffered reader and writer.
///
/// Key presses are read as whole lines; the first non-whitespace character is
/// the key, and an empty line counts as a key press of `'\n'`.
#[derive(Debug)]
pub struct StdConsole<R, W> {
    input: R,
    output: W,
}

impl StdConsole<BufReader<Stdin>, Stdout> {
    /// A console over the process's stdin and stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> StdConsole<R, W> {
    /// Creates a console from a reader and a writer.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the writer.
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// Consumes the console and returns the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self) -> io::Result<String> {
        self.next_line()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "console input closed"))
    }

    fn read_key(&mut self) -> io::Result<Option<char>> {
        Ok(self
            .next_line()?
            .map(|line| line.trim().chars().next().unwrap_or('\n')))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }
}
