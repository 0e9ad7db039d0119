use std::io::{self, BufRead, Stdout, StdinLock, Write};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Line-based terminal the session reads from and writes to.
pub trait Terminal {
    /// Prints `text` on its own line and reads one line of input with the
    /// line ending stripped. Returns `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>>;

    fn clear(&mut self) -> io::Result<()>;

    fn show(&mut self, lines: &[String]) -> io::Result<()>;
}

/// Terminal over any reader/writer pair. The binary runs it on stdin/stdout;
/// tests feed it a `Cursor` and inspect the bytes written.
pub struct StdTerminal<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl StdTerminal<StdinLock<'static>, Stdout> {
    pub fn stdio(clear_screen: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), clear_screen)
    }
}

impl<R: BufRead, W: Write> StdTerminal<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Terminal for StdTerminal<R, W> {
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn show(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.output, "{}", line)?;
        }
        self.output.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_strips_line_endings() {
        let mut term = StdTerminal::new(Cursor::new("first\r\nsecond\nlast"), Vec::new(), false);
        assert_eq!(term.prompt("a").unwrap().as_deref(), Some("first"));
        assert_eq!(term.prompt("b").unwrap().as_deref(), Some("second"));
        assert_eq!(term.prompt("c").unwrap().as_deref(), Some("last"));
        assert_eq!(term.prompt("d").unwrap(), None);

        let out = String::from_utf8(term.into_output()).unwrap();
        assert_eq!(out, "a\nb\nc\nd\n");
    }

    #[test]
    fn clear_is_optional() {
        let mut quiet = StdTerminal::new(Cursor::new(""), Vec::new(), false);
        quiet.clear().unwrap();
        assert!(quiet.into_output().is_empty());

        let mut clearing = StdTerminal::new(Cursor::new(""), Vec::new(), true);
        clearing.clear().unwrap();
        assert_eq!(clearing.into_output(), CLEAR_SCREEN.as_bytes());
    }
}
