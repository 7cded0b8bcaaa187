mod analyzer;

pub use analyzer::{AnalyzedClass, AnalyzedFile, Analyzer};

#[cfg(test)]
mod test;
