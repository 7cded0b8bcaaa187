//! ESM5 rendering
//!
//! Same edits as ESM2015 except that definitions go inside the class IIFE,
//! right before it returns the constructor function.

use super::esm2015_renderer::Esm2015Renderer;
use super::renderer::{DecoratorRemovals, RenderStrategy};
use super::source_buffer::SourceBuffer;
use crate::analysis::AnalyzedClass;
use crate::error::RenderError;
use crate::host::utils::get_return_statement;
use crate::host::NgccReflectionHost;
use crate::import_manager::NewImport;
use oxc_ast::ast::Statement;
use oxc_span::GetSpan;

pub struct Esm5Renderer<'h, H: ?Sized> {
    base: Esm2015Renderer<'h, H>,
}

impl<'h, H: ?Sized> Esm5Renderer<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self {
            base: Esm2015Renderer::new(host),
        }
    }
}

impl<'h, 'a, H> RenderStrategy<'a> for Esm5Renderer<'h, H>
where
    H: NgccReflectionHost<'a> + ?Sized,
{
    fn add_imports(&self, output: &mut SourceBuffer<'a>, imports: &[NewImport]) {
        self.base.add_imports(output, imports);
    }

    fn add_definitions(
        &self,
        output: &mut SourceBuffer<'a>,
        analyzed_class: &AnalyzedClass<'a>,
        definitions: &str,
    ) -> Result<(), RenderError> {
        let class_symbol = self.base.class_symbol(output, analyzed_class)?;
        let statements = class_symbol.statements;
        let return_statement =
            get_return_statement(statements).ok_or_else(|| RenderError::MissingAnchor {
                class: analyzed_class.name.clone(),
            })?;

        // Insert after the statement preceding the `return`, so that the
        // definitions sit on their own line ahead of it.
        let insertion_point = statements
            .iter()
            .take_while(|statement| !matches!(statement, Statement::ReturnStatement(_)))
            .last()
            .map(|statement| statement.span().end)
            .unwrap_or(return_statement.span.start);
        output.append_left(insertion_point, &format!("\n{}", definitions))?;
        Ok(())
    }

    fn remove_decorators(
        &self,
        output: &mut SourceBuffer<'a>,
        decorators_to_remove: &DecoratorRemovals<'a>,
    ) -> Result<(), RenderError> {
        self.base.remove_decorators(output, decorators_to_remove)
    }
}
