//! In-memory sink shared between clones

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    bytes: Vec<u8>,
    write_calls: usize,
}

/// Cloneable in-memory sink
///
/// Every clone appends to the same buffer. Hand one clone to a logger and
/// keep another to read what was written.
///
/// # Example
///
/// ```
/// use rust_level_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::new(buffer.clone(), "", LogFlags::NONE);
/// logger.infof(format_args!("{} items", 3));
///
/// assert_eq!(buffer.lines(), vec!["[INFO] 3 items".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Inner>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock().bytes).into_owned()
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.inner.lock().bytes.clone()
    }

    /// Written lines without their terminators
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Number of `write` calls received
    pub fn write_calls(&self) -> usize {
        self.inner.lock().write_calls
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().bytes.is_empty()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.bytes.clear();
        inner.write_calls = 0;
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self.inner.lock();
        inner.bytes.extend_from_slice(buf);
        inner.write_calls += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
