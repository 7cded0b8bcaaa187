//! ESM2015 rendering
//!
//! Definitions follow the class declaration, imports are namespace imports at
//! the top of the file, and consumed `decorators` arrays are dropped together
//! with the statement or class field that owns them.

use super::renderer::{DecoratorRemovals, RenderStrategy};
use super::source_buffer::SourceBuffer;
use crate::analysis::AnalyzedClass;
use crate::error::RenderError;
use crate::host::{ClassSymbol, NgccReflectionHost};
use crate::import_manager::NewImport;

pub struct Esm2015Renderer<'h, H: ?Sized> {
    host: &'h H,
}

impl<'h, H: ?Sized> Esm2015Renderer<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    pub(super) fn class_symbol<'a>(
        &self,
        output: &SourceBuffer<'a>,
        analyzed_class: &AnalyzedClass<'a>,
    ) -> Result<ClassSymbol<'a>, RenderError>
    where
        H: NgccReflectionHost<'a>,
    {
        let class_symbol = self
            .host
            .get_class_symbol(analyzed_class.declaration)
            .ok_or_else(|| RenderError::ClassNotFound {
                class: analyzed_class.name.clone(),
                file: self.host.source_file().file_name.clone(),
            })?;
        if class_symbol.declaration.span().end as usize > output.original().len() {
            return Err(RenderError::ClassNotFound {
                class: analyzed_class.name.clone(),
                file: self.host.source_file().file_name.clone(),
            });
        }
        Ok(class_symbol)
    }
}

impl<'h, 'a, H> RenderStrategy<'a> for Esm2015Renderer<'h, H>
where
    H: NgccReflectionHost<'a> + ?Sized,
{
    fn add_imports(&self, output: &mut SourceBuffer<'a>, imports: &[NewImport]) {
        let text: String = imports
            .iter()
            .map(|import| format!("import * as {} from '{}';\n", import.alias, import.name))
            .collect();
        if !text.is_empty() {
            // Offset 0 is never inside a removal.
            let _ = output.append_left(0, &text);
        }
    }

    fn add_definitions(
        &self,
        output: &mut SourceBuffer<'a>,
        analyzed_class: &AnalyzedClass<'a>,
        definitions: &str,
    ) -> Result<(), RenderError> {
        let class_symbol = self.class_symbol(output, analyzed_class)?;
        let insertion_point = class_symbol.declaration.span().end;
        output.append_left(insertion_point, &format!("\n{}", definitions))?;
        Ok(())
    }

    fn remove_decorators(
        &self,
        output: &mut SourceBuffer<'a>,
        decorators_to_remove: &DecoratorRemovals<'a>,
    ) -> Result<(), RenderError> {
        for removal in decorators_to_remove.values() {
            let container = removal.container;
            let array = container.array.span;
            if container.owner.end as usize > output.original().len()
                || array.start < container.owner.start
                || array.end > container.owner.end
            {
                return Err(RenderError::MissingDecoratorContainer {
                    start: array.start,
                    end: array.end,
                });
            }

            if removal.decorators.len() == container.array.elements.len() {
                let start = full_start(output, container.owner.start);
                output.remove(start, container.owner.end)?;
            } else {
                for node in &removal.decorators {
                    let start = full_start(output, node.span.start);
                    // The separating comma may be preceded by whitespace.
                    let after = output.slice(node.span.end, array.end);
                    let gap = after.len() - after.trim_start().len();
                    let end = if after[gap..].starts_with(',') {
                        node.span.end + gap as u32 + 1
                    } else {
                        node.span.end
                    };
                    output.remove(start, end)?;
                }
            }
        }
        Ok(())
    }
}

/// `offset` moved back over the whitespace that precedes it.
fn full_start(output: &SourceBuffer<'_>, offset: u32) -> u32 {
    let before = output.slice(0, offset);
    let trimmed = before.trim_end();
    trimmed.len() as u32
}
