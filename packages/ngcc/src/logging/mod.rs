//! Logging
//!
//! The transformation core never prints on its own; it reports progress and
//! non-fatal oddities through a [`Logger`] handed in by the driver.

mod console_logger;
mod logger;

pub use console_logger::ConsoleLogger;
pub use logger::{LogLevel, Logger, NullLogger};
