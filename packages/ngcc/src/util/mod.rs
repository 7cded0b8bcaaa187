//! Utilities

pub mod path;
