//! Source buffer
//!
//! An edit list over an original text. Insertions and removals are recorded
//! against original offsets and only applied when the buffer is rendered,
//! which lets the output text and its source map be produced in one pass.

use std::fmt;

use crate::error::RenderError;
use crate::sourcemaps::{RawSourceMap, SourceMapGenerator};

#[derive(Debug, Clone)]
enum EditKind {
    Insert(String),
    Remove { end: u32 },
}

#[derive(Debug, Clone)]
struct Edit {
    start: u32,
    kind: EditKind,
}

impl Edit {
    fn is_removal(&self) -> bool {
        matches!(self.kind, EditKind::Remove { .. })
    }
}

#[derive(Debug, Clone)]
pub struct SourceBuffer<'a> {
    original: &'a str,
    /// Offset of the first character of every original line.
    line_starts: Vec<usize>,
    edits: Vec<Edit>,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(original: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(original.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Self {
            original,
            line_starts,
            edits: Vec::new(),
        }
    }

    pub fn original(&self) -> &'a str {
        self.original
    }

    /// The original text between two offsets, clamped to the text.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        let len = self.original.len();
        let start = (start as usize).min(len);
        let end = (end as usize).clamp(start, len);
        self.original.get(start..end).unwrap_or("")
    }

    /// Insert `text` at the end of the original text.
    pub fn append(&mut self, text: &str) -> &mut Self {
        self.edits.push(Edit {
            start: self.original.len() as u32,
            kind: EditKind::Insert(text.to_string()),
        });
        self
    }

    /// Insert `text` at `index`. Insertions at one index keep their call order.
    pub fn append_left(&mut self, index: u32, text: &str) -> Result<&mut Self, RenderError> {
        self.check_offset(index, index)?;
        let inside_removal = self.edits.iter().any(|edit| match edit.kind {
            EditKind::Remove { end } => edit.start < index && index < end,
            EditKind::Insert(_) => false,
        });
        if inside_removal {
            return Err(RenderError::InvalidEdit {
                start: index,
                end: index,
                reason: "insertion inside a removed range",
            });
        }
        self.edits.push(Edit {
            start: index,
            kind: EditKind::Insert(text.to_string()),
        });
        Ok(self)
    }

    /// Drop the original text in `start..end`.
    pub fn remove(&mut self, start: u32, end: u32) -> Result<&mut Self, RenderError> {
        self.check_offset(start, end)?;
        if start == end {
            return Ok(self);
        }
        for edit in &self.edits {
            let conflict = match edit.kind {
                EditKind::Remove { end: other_end } => start < other_end && edit.start < end,
                EditKind::Insert(_) => start < edit.start && edit.start < end,
            };
            if conflict {
                return Err(RenderError::InvalidEdit {
                    start,
                    end,
                    reason: "overlaps an earlier edit",
                });
            }
        }
        self.edits.push(Edit {
            start,
            kind: EditKind::Remove { end },
        });
        Ok(self)
    }

    fn check_offset(&self, start: u32, end: u32) -> Result<(), RenderError> {
        let reason = if start > end {
            "start is after end"
        } else if end as usize > self.original.len() {
            "range is outside of the text"
        } else if !self.original.is_char_boundary(start as usize)
            || !self.original.is_char_boundary(end as usize)
        {
            "range splits a character"
        } else {
            return Ok(());
        };
        Err(RenderError::InvalidEdit { start, end, reason })
    }

    /// Render the edited text together with a map back to the original.
    pub fn render_with_map(&self, file: &str, source: &str) -> (String, RawSourceMap) {
        let mut generator = SourceMapGenerator::new(file, source);
        let text = self.render(Some(&mut generator));
        (text, generator.to_source_map())
    }

    fn render(&self, map: Option<&mut SourceMapGenerator>) -> String {
        let mut edits: Vec<&Edit> = self.edits.iter().collect();
        // Stable: insertions at one offset stay in call order and precede a
        // removal starting there.
        edits.sort_by_key(|edit| (edit.start, edit.is_removal()));

        let mut writer = Writer {
            buffer: self,
            out: String::with_capacity(self.original.len()),
            col: 0,
            map,
        };
        let mut pos = 0usize;
        for edit in edits {
            let start = edit.start as usize;
            if start > pos {
                writer.write_original(pos, start);
                pos = start;
            }
            match &edit.kind {
                EditKind::Insert(text) => writer.write_inserted(text),
                EditKind::Remove { end } => pos = pos.max(*end as usize),
            }
        }
        writer.write_original(pos, self.original.len());
        writer.out
    }

    /// Zero-based line and UTF-16 column of an original offset.
    fn location(&self, offset: usize) -> (u32, u32) {
        let line = self.line_starts.partition_point(|start| *start <= offset) - 1;
        let line_start = self.line_starts[line];
        let col = self.original[line_start..offset].encode_utf16().count();
        (line as u32, col as u32)
    }
}

impl fmt::Display for SourceBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(None))
    }
}

struct Writer<'b, 'a, 'm> {
    buffer: &'b SourceBuffer<'a>,
    out: String,
    /// Generated column, in UTF-16 code units.
    col: u32,
    map: Option<&'m mut SourceMapGenerator>,
}

impl Writer<'_, '_, '_> {
    fn write_original(&mut self, from: usize, to: usize) {
        if from >= to {
            return;
        }
        let (mut line, source_col) = self.buffer.location(from);
        if let Some(map) = self.map.as_deref_mut() {
            map.add_mapping(self.col, line, source_col);
        }

        let chunk = &self.buffer.original[from..to];
        for (index, ch) in chunk.char_indices() {
            self.out.push(ch);
            if ch == '\n' {
                self.col = 0;
                line += 1;
                if let Some(map) = self.map.as_deref_mut() {
                    map.add_line();
                    if from + index + 1 < to {
                        map.add_mapping(0, line, 0);
                    }
                }
            } else {
                self.col += ch.len_utf16() as u32;
            }
        }
    }

    fn write_inserted(&mut self, text: &str) {
        for ch in text.chars() {
            self.out.push(ch);
            if ch == '\n' {
                self.col = 0;
                if let Some(map) = self.map.as_deref_mut() {
                    map.add_line();
                }
            } else {
                self.col += ch.len_utf16() as u32;
            }
        }
    }
}
