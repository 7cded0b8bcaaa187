//! Static definitions generated from Angular decorator metadata.

mod compiler;
pub mod selector;

pub use compiler::{
    CompiledDefinition, CoreDefinitionCompiler, DecoratorKind, DefinitionCompiler, InjectFlags,
};
