//! File parsers
//!
//! Walk the top-level statements of one module and collect the declarations
//! that are classes in the module's dialect.

mod api;
mod esm2015_parser;
mod esm5_parser;

pub use api::{FileParser, ParsedClass, ParsedFile};
pub use esm2015_parser::Esm2015FileParser;
pub use esm5_parser::Esm5FileParser;
