//! Finds the exported class declarations of an ESM2015 module.

use super::api::{parse_class, parsed_file, FileParser, ParsedFile};
use crate::host::{DeclarationNode, NgccReflectionHost};

pub struct Esm2015FileParser<'h, H> {
    host: &'h H,
}

impl<'h, H> Esm2015FileParser<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }
}

impl<'h, 'a, H> FileParser<'a> for Esm2015FileParser<'h, H>
where
    H: NgccReflectionHost<'a>,
{
    fn parse_file(&self) -> ParsedFile<'a> {
        let classes = self
            .host
            .source_file()
            .top_level_declarations()
            .into_iter()
            .filter(|declaration| {
                declaration.exported && matches!(declaration.node, DeclarationNode::Class(_))
            })
            .filter_map(|declaration| parse_class(self.host, declaration.node))
            .collect();

        parsed_file(self.host, classes)
    }
}
