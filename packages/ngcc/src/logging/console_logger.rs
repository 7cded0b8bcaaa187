// Console Logger
//
// `info` goes to stdout so that a run can be piped; everything else goes to
// stderr with its level as prefix.

use super::logger::{LogLevel, Logger};

pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    fn write(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }
        match level {
            LogLevel::Info => println!("{}", msg),
            _ => eprintln!("[{}] {}", level.as_str().to_uppercase(), msg),
        }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.write(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.write(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.write(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.write(LogLevel::Error, msg);
    }
}
