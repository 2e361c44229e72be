//! Console sink implementation

use std::io::{self, Write};

/// Standard stream a [`ConsoleSink`] writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleStream {
    Stdout,
    #[default]
    Stderr,
}

/// Writes log lines to stdout or stderr
///
/// Each line is written while holding the stream's own lock, so lines do
/// not interleave with other users of the stream that also lock it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    stream: ConsoleStream,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stdout() -> Self {
        Self {
            stream: ConsoleStream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: ConsoleStream::Stderr,
        }
    }

    pub fn stream(&self) -> ConsoleStream {
        self.stream
    }
}

impl Write for ConsoleSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().lock().write(buf),
            ConsoleStream::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().lock().write_all(buf),
            ConsoleStream::Stderr => io::stderr().lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.stream {
            ConsoleStream::Stdout => io::stdout().flush(),
            ConsoleStream::Stderr => io::stderr().flush(),
        }
    }
}
