//! Output sink implementations
//!
//! A logger accepts any `std::io::Write + Send` as its sink. These are the
//! ones shipped with the crate.

pub mod console;
pub mod file;
pub mod shared;

pub use console::{ConsoleSink, ConsoleStream};
pub use file::FileSink;
pub use shared::SharedBuffer;
