// Analyzer
//
// Decides which parsed classes get a generated definition. Every class that
// carries decorators is offered to the definition compiler; the classes it
// produces text for become `AnalyzedClass`es, the rest are dropped.

use crate::definitions::DefinitionCompiler;
use crate::host::{DeclarationNode, Decorator};
use crate::import_manager::ImportManager;
use crate::logging::Logger;
use crate::parsing::{ParsedClass, ParsedFile};
use std::collections::HashSet;

// ============================================================================
// AnalyzedClass / AnalyzedFile
// ============================================================================

/// A class that will receive a generated definition.
#[derive(Debug, Clone)]
pub struct AnalyzedClass<'a> {
    pub name: String,
    pub declaration: DeclarationNode<'a>,
    /// Decorators consumed by the definition; these are stripped on render.
    pub decorators: Vec<Decorator<'a>>,
    pub definition: String,
}

#[derive(Debug, Clone)]
pub struct AnalyzedFile<'a> {
    pub file_name: String,
    pub source_text: &'a str,
    pub analyzed_classes: Vec<AnalyzedClass<'a>>,
    /// Imports the definitions refer to.
    pub imports: ImportManager,
}

impl<'a> AnalyzedFile<'a> {
    pub fn is_empty(&self) -> bool {
        self.analyzed_classes.is_empty()
    }
}

// ============================================================================
// Analyzer
// ============================================================================

pub struct Analyzer<'c> {
    compiler: &'c dyn DefinitionCompiler,
    logger: &'c dyn Logger,
    import_prefix: String,
}

impl<'c> Analyzer<'c> {
    pub fn new(
        compiler: &'c dyn DefinitionCompiler,
        logger: &'c dyn Logger,
        import_prefix: impl Into<String>,
    ) -> Self {
        Self {
            compiler,
            logger,
            import_prefix: import_prefix.into(),
        }
    }

    /// Analyze every decorated class of `parsed_file`.
    ///
    /// `used_names` are the bindings already declared in the file; generated
    /// import aliases never collide with them.
    pub fn analyze_file<'a>(
        &self,
        parsed_file: &ParsedFile<'a>,
        used_names: HashSet<String>,
    ) -> AnalyzedFile<'a> {
        let mut imports = ImportManager::new(self.import_prefix.clone(), used_names);
        let analyzed_classes = parsed_file
            .decorated_classes
            .iter()
            .filter(|class| class.has_decorators())
            .filter_map(|class| self.analyze_class(class, parsed_file, &mut imports))
            .collect();

        AnalyzedFile {
            file_name: parsed_file.file_name.clone(),
            source_text: parsed_file.source_text,
            analyzed_classes,
            imports,
        }
    }

    fn analyze_class<'a>(
        &self,
        class: &ParsedClass<'a>,
        parsed_file: &ParsedFile<'a>,
        imports: &mut ImportManager,
    ) -> Option<AnalyzedClass<'a>> {
        let Some(compiled) = self.compiler.compile(class, parsed_file.source_text, imports) else {
            self.logger.debug(&format!(
                "{}: skipping class {}, no definition to generate",
                parsed_file.file_name, class.name
            ));
            return None;
        };

        if !compiled.ignored.is_empty() {
            self.logger.warn(&format!(
                "{}: class {} has several Angular decorators, only @{} is compiled (ignored: {})",
                parsed_file.file_name,
                class.name,
                compiled
                    .decorators
                    .first()
                    .map(|decorator| decorator.name.as_str())
                    .unwrap_or_default(),
                compiled
                    .ignored
                    .iter()
                    .map(|name| format!("@{}", name))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
        self.logger.debug(&format!(
            "{}: analyzed class {}",
            parsed_file.file_name, class.name
        ));

        Some(AnalyzedClass {
            name: class.name.clone(),
            declaration: class.declaration,
            decorators: compiled.decorators,
            definition: compiled.text,
        })
    }
}
