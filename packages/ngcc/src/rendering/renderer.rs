// Renderer
//
// Applies the analysis of one file to its original text. What the edits look
// like depends on the module format and is left to a `RenderStrategy`; the
// renderer decides what is edited, in which order, and how the result and its
// source map are named.

use indexmap::IndexMap;
use oxc_ast::ast::ObjectExpression;
use oxc_span::Span;

use super::source_buffer::SourceBuffer;
use crate::analysis::{AnalyzedClass, AnalyzedFile};
use crate::error::RenderError;
use crate::host::DecoratorContainer;
use crate::import_manager::NewImport;
use crate::util::path::{get_basename, get_dirname, relative};

/// A decorator container and the decorator literals to drop from it.
#[derive(Debug, Clone)]
pub struct DecoratorRemoval<'a> {
    pub container: DecoratorContainer<'a>,
    pub decorators: Vec<&'a ObjectExpression<'a>>,
}

/// Removals keyed by the span of the container array, in analysis order.
pub type DecoratorRemovals<'a> = IndexMap<Span, DecoratorRemoval<'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: String,
    pub contents: String,
}

/// A rendered file and its source map, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub source: FileInfo,
    pub map: FileInfo,
}

/// Format specific text edits.
pub trait RenderStrategy<'a> {
    fn add_imports(&self, output: &mut SourceBuffer<'a>, imports: &[NewImport]);

    fn add_definitions(
        &self,
        output: &mut SourceBuffer<'a>,
        analyzed_class: &AnalyzedClass<'a>,
        definitions: &str,
    ) -> Result<(), RenderError>;

    fn remove_decorators(
        &self,
        output: &mut SourceBuffer<'a>,
        decorators_to_remove: &DecoratorRemovals<'a>,
    ) -> Result<(), RenderError>;
}

pub struct Renderer<S> {
    strategy: S,
}

impl<S> Renderer<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Render `file` as if it were going to be written to `target_path`.
    ///
    /// The map is named `<target_path>.map` and refers back to the original
    /// file relative to its own directory.
    pub fn render_file<'a>(
        &self,
        file: &AnalyzedFile<'a>,
        target_path: &str,
    ) -> Result<RenderResult, RenderError>
    where
        S: RenderStrategy<'a>,
    {
        let mut output = SourceBuffer::new(file.source_text);

        for analyzed_class in &file.analyzed_classes {
            self.strategy
                .add_definitions(&mut output, analyzed_class, &analyzed_class.definition)?;
        }
        self.strategy
            .add_imports(&mut output, &file.imports.get_all_imports());

        let decorators_to_remove = get_decorators_to_remove(&file.analyzed_classes);
        self.strategy
            .remove_decorators(&mut output, &decorators_to_remove)?;

        let map_path = format!("{}.map", target_path);
        // Unrelatable paths are recorded as given.
        let source = relative(get_dirname(&map_path), &file.file_name)
            .unwrap_or_else(|| file.file_name.clone());
        let (contents, map) = output.render_with_map(get_basename(target_path), &source);

        Ok(RenderResult {
            source: FileInfo {
                path: target_path.to_string(),
                contents: format!("{}\n//# sourceMappingURL={}", contents, map_path),
            },
            map: FileInfo {
                path: map_path,
                contents: map.to_json()?,
            },
        })
    }
}

/// Group the decorators consumed by the analysis by the array holding them.
pub fn get_decorators_to_remove<'a>(classes: &[AnalyzedClass<'a>]) -> DecoratorRemovals<'a> {
    let mut removals = DecoratorRemovals::new();
    for decorator in classes.iter().flat_map(|class| &class.decorators) {
        removals
            .entry(decorator.container.array.span)
            .or_insert_with(|| DecoratorRemoval {
                container: decorator.container,
                decorators: Vec::new(),
            })
            .decorators
            .push(decorator.node);
    }
    removals
}
