//! Test helpers shared by the unit tests of every module.

use oxc_allocator::Allocator;
use oxc_ast::ast::Expression;
use oxc_span::GetSpan;

use crate::host::DeclarationNode;
use crate::logging::{LogLevel, Logger};
use crate::source_file::SourceFile;
use std::sync::Mutex;

/// An in-memory module fixture.
#[derive(Debug, Clone, Copy)]
pub struct TestFile {
    pub name: &'static str,
    pub contents: &'static str,
}

pub fn parse<'a>(allocator: &'a Allocator, file: TestFile) -> SourceFile<'a> {
    SourceFile::parse(allocator, file.name, file.contents).expect("fixture should parse")
}

pub fn get_declaration<'a>(source_file: &SourceFile<'a>, name: &str) -> DeclarationNode<'a> {
    source_file
        .find_declaration(name)
        .unwrap_or_else(|| panic!("no declaration named `{}`", name))
}

pub fn text_of<'a>(source_file: &SourceFile<'a>, expression: &Expression<'a>) -> &'a str {
    source_file.text_of(expression.span())
}

/// Logger recording every message it receives.
#[derive(Default)]
pub struct MockLogger {
    pub logs: Mutex<Vec<(LogLevel, String)>>,
}

impl MockLogger {
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    fn record(&self, level: LogLevel, msg: &str) {
        self.logs.lock().unwrap().push((level, msg.to_string()));
    }
}

impl Logger for MockLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Debug
    }
    fn debug(&self, msg: &str) {
        self.record(LogLevel::Debug, msg);
    }
    fn info(&self, msg: &str) {
        self.record(LogLevel::Info, msg);
    }
    fn warn(&self, msg: &str) {
        self.record(LogLevel::Warn, msg);
    }
    fn error(&self, msg: &str) {
        self.record(LogLevel::Error, msg);
    }
}
