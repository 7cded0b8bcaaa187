//! Finds the IIFE-wrapped classes of an ESM5 module.
//!
//! ESM5 bundles often declare the class variable first and export it later
//! with an `export { ... }` clause, so every top-level `var` is a candidate;
//! the host decides which of them are classes.

use super::api::{parse_class, parsed_file, FileParser, ParsedFile};
use crate::host::{DeclarationNode, NgccReflectionHost};

pub struct Esm5FileParser<'h, H> {
    host: &'h H,
}

impl<'h, H> Esm5FileParser<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }
}

impl<'h, 'a, H> FileParser<'a> for Esm5FileParser<'h, H>
where
    H: NgccReflectionHost<'a>,
{
    fn parse_file(&self) -> ParsedFile<'a> {
        let classes = self
            .host
            .source_file()
            .top_level_declarations()
            .into_iter()
            .filter(|declaration| matches!(declaration.node, DeclarationNode::Variable(_)))
            .filter_map(|declaration| parse_class(self.host, declaration.node))
            .collect();

        parsed_file(self.host, classes)
    }
}
