//! Destination for `print()` output.
//!
//! The host picks where script output goes:
//! - Stdout: the CLI default
//! - Buffer: captured for tests and embedding hosts
//! - Silent: discarded
//!
//! Enum dispatch keeps the call static; handlers are shared behind an `Arc`
//! so one compiled expression can be evaluated from several threads, each
//! with its own interpreter, writing to the same sink.

use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to the process's stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn write(&self, text: &str) {
        print!("{text}");
    }
}

/// Collects output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    /// Everything written so far.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    /// Discards all output.
    Silent,
}

impl PrintHandlerImpl {
    /// Write `text` verbatim; `print()` supplies its own separators and
    /// line ending.
    pub fn write(&self, text: &str) {
        match self {
            Self::Stdout(h) => h.write(text),
            Self::Buffer(h) => h.write(text),
            Self::Silent => {}
        }
    }

    pub fn println(&self, line: &str) {
        self.write(line);
        self.write("\n");
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared print handler.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

/// Create a handler that captures output for later inspection.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
