// Source Map Generator
//
// Collects mapping segments line by line and encodes them into a
// `RawSourceMap`.

use super::raw_source_map::{encode_vlq, RawSourceMap};

/// A mapping from a generated column to an original position, all zero-based.
#[derive(Debug, Clone, Copy)]
struct Mapping {
    column: u32,
    original_line: u32,
    original_column: u32,
}

/// Running values that each VLQ field is encoded relative to. The generated
/// column restarts on every line, the original position never does.
#[derive(Default)]
struct Previous {
    column: i64,
    original_line: i64,
    original_column: i64,
}

impl Previous {
    fn encode(&mut self, mapping: &Mapping, out: &mut String) {
        let column = i64::from(mapping.column);
        let original_line = i64::from(mapping.original_line);
        let original_column = i64::from(mapping.original_column);

        out.push_str(&encode_vlq(column - self.column));
        // Single source, always index 0.
        out.push_str(&encode_vlq(0));
        out.push_str(&encode_vlq(original_line - self.original_line));
        out.push_str(&encode_vlq(original_column - self.original_column));

        self.column = column;
        self.original_line = original_line;
        self.original_column = original_column;
    }
}

/// Builds the mappings of one generated file against one original file.
///
/// Segments must be added in output order: lines are opened with
/// [`SourceMapGenerator::add_line`] and segments within a line have
/// increasing generated columns.
pub struct SourceMapGenerator {
    file: String,
    source: String,
    lines: Vec<Vec<Mapping>>,
}

impl SourceMapGenerator {
    pub fn new(file: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            source: source.into(),
            lines: vec![Vec::new()],
        }
    }

    pub fn add_line(&mut self) -> &mut Self {
        self.lines.push(Vec::new());
        self
    }

    pub fn add_mapping(&mut self, column: u32, original_line: u32, original_column: u32) -> &mut Self {
        let mapping = Mapping {
            column,
            original_line,
            original_column,
        };
        if let Some(line) = self.lines.last_mut() {
            // Two mappings at one generated column: the later one wins.
            match line.last_mut() {
                Some(last) if last.column == column => *last = mapping,
                _ => line.push(mapping),
            }
        }
        self
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn to_source_map(&self) -> RawSourceMap {
        let mut mappings = String::new();
        let mut previous = Previous::default();

        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                mappings.push(';');
            }
            previous.column = 0;
            for (position, mapping) in line.iter().enumerate() {
                if position > 0 {
                    mappings.push(',');
                }
                previous.encode(mapping, &mut mappings);
            }
        }

        let mut map = RawSourceMap::new(self.file.clone());
        map.sources.push(self.source.clone());
        map.sources_content.push(None);
        map.mappings = mappings;
        map
    }
}
