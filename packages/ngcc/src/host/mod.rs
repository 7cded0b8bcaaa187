//! Reflection hosts
//!
//! Normalize the dialects of compiled Angular code into one model of classes,
//! decorators, members and constructor parameters.

mod api;
mod esm2015_host;
mod esm5_host;
pub mod utils;

pub use api::{
    ClassMember, ClassMemberKind, ClassSymbol, ClassValueDeclaration, DeclarationNode, Decorator,
    DecoratorContainer, Import, NgccReflectionHost, Parameter, CONSTRUCTOR_PARAMS, DECORATORS,
    PROP_DECORATORS,
};
pub use esm2015_host::Esm2015ReflectionHost;
pub use esm5_host::{get_iife_body, get_return_identifier, Esm5ReflectionHost};

use serde::Deserialize;

use crate::source_file::SourceFile;

/// Dialect of a compiled module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    Esm2015,
    Esm5,
}

impl std::fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleFormat::Esm2015 => write!(f, "esm2015"),
            ModuleFormat::Esm5 => write!(f, "esm5"),
        }
    }
}

/// Probe the top-level declarations of a module for its dialect.
///
/// Any class declaration means ESM2015; otherwise a `var` initialized with an
/// IIFE means ESM5.
pub fn detect_format(source_file: &SourceFile<'_>) -> Option<ModuleFormat> {
    let declarations = source_file.top_level_declarations();

    if declarations
        .iter()
        .any(|declaration| matches!(declaration.node, DeclarationNode::Class(_)))
    {
        return Some(ModuleFormat::Esm2015);
    }

    declarations
        .iter()
        .any(|declaration| match declaration.node {
            DeclarationNode::Variable(declarator) => declarator
                .init
                .as_ref()
                .and_then(get_iife_body)
                .is_some(),
            _ => false,
        })
        .then_some(ModuleFormat::Esm5)
}
