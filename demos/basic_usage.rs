//! Basic logger usage example
//!
//! Demonstrates a logger instance, level filtering, both call shapes and
//! the process-wide default logger.
//!
//! Run with: cargo run --example basic_usage

use rust_level_logger::prelude::*;
use rust_level_logger::{global, info, log_values, warn};

fn main() -> Result<()> {
    println!("=== Rust Level Logger - Basic Usage Example ===\n");

    let logger = Logger::new(ConsoleSink::stdout(), "demo: ", LogFlags::STD);

    println!("1. Logging at different levels (ceiling INFO):");
    logger.debug(&[&"This is a debug message (hidden)"]);
    logger.info(&[&"This is an info message"]);
    logger.warn(&[&"disk", &"full"]);
    logger.errorf(format_args!("request {} failed with {}", 17, 503));

    println!("\n2. Raising verbosity to DEBUG:");
    logger.set_level(parse_level("debug")?);
    logger.debug(&[&"Debug message (visible)"]);

    println!("\n3. Macros:");
    let port = 8080;
    info!(logger, "Server listening on port {}", port);
    warn!(logger, "Retry attempt {} of {}", 3, 5);
    log_values!(logger, LogLevel::Info, "user", 42, "logged in");

    println!("\n4. Header flags:");
    logger.set_flags(LogFlags::DATETIME | LogFlags::MICROSECONDS);
    logger.info(&[&"time with microseconds, no location"]);
    logger.set_flags(LogFlags::NONE);
    logger.set_prefix("");
    logger.info(&[&"bare line"]);

    println!("\n5. Default logger:");
    global::set_output(ConsoleSink::stdout());
    global::infof(format_args!("default logger at {:?}", global::default_logger().level()));

    println!("\nLines written: {}", logger.metrics().lines_written());
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
