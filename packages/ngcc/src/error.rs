//! Errors
//!
//! Malformed decorator metadata is never an error: it degrades to "no
//! metadata" inside the reflection hosts. The errors below are the cases where
//! a whole file cannot be transformed.

use thiserror::Error;

/// Failure to transform a single file.
#[derive(Debug, Error)]
pub enum NgccError {
    #[error("Failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A broken contract between the analysis results and the rendered text.
///
/// These never stem from user data; they mean the renderer was asked to edit
/// something that does not exist in the original file.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Compiled class `{class}` could not be located in {file}")]
    ClassNotFound { class: String, file: String },

    #[error("No insertion point for the definitions of `{class}`")]
    MissingAnchor { class: String },

    #[error("Decorator container at {start}..{end} has no surviving text")]
    MissingDecoratorContainer { start: u32, end: u32 },

    #[error("Invalid edit {start}..{end}: {reason}")]
    InvalidEdit {
        start: u32,
        end: u32,
        reason: &'static str,
    },

    #[error("Failed to serialize source map: {0}")]
    SourceMap(#[from] serde_json::Error),
}
