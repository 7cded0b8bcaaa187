//! Source maps
//!
//! Version 3 source maps for rendered files. Every rendered file maps back to
//! exactly one original file, so the generator only tracks a single source.

mod raw_source_map;
mod source_map_generator;

pub use raw_source_map::{encode_vlq, RawSourceMap};
pub use source_map_generator::SourceMapGenerator;
