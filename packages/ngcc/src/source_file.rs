//! Source File
//!
//! One parsed module: its text, its arena-allocated syntax tree and the
//! symbol table built over it. Everything the reflection hosts hand out
//! borrows from here.

use std::collections::{HashMap, HashSet};

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Declaration, ExportDefaultDeclarationKind, IdentifierReference, ImportDeclarationSpecifier,
    Program, Statement,
};
use oxc_parser::Parser;
use oxc_semantic::{Scoping, SemanticBuilder};
use oxc_span::{SourceType, Span};
use oxc_syntax::symbol::SymbolId;

use crate::error::NgccError;
use crate::host::{DeclarationNode, Import};

/// A top-level declaration of a module.
#[derive(Debug, Clone, Copy)]
pub struct TopLevelDeclaration<'a> {
    pub node: DeclarationNode<'a>,
    pub exported: bool,
}

pub struct SourceFile<'a> {
    pub file_name: String,
    pub text: &'a str,
    pub program: &'a Program<'a>,
    scoping: Scoping,
    imports: HashMap<SymbolId, Import>,
}

impl<'a> SourceFile<'a> {
    /// Parse `text` as an ES module and resolve its symbols.
    pub fn parse(
        allocator: &'a Allocator,
        file_name: impl Into<String>,
        text: &'a str,
    ) -> Result<Self, NgccError> {
        let file_name = file_name.into();
        let ret = Parser::new(allocator, text, SourceType::mjs()).parse();

        if ret.panicked || !ret.errors.is_empty() {
            let message = ret
                .errors
                .iter()
                .map(|e| format!("{:?}", e))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(NgccError::Parse {
                file: file_name,
                message,
            });
        }

        let program: &'a Program<'a> = allocator.alloc(ret.program);
        let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
        let imports = collect_imports(program);

        Ok(Self {
            file_name,
            text,
            program,
            scoping,
            imports,
        })
    }

    pub fn statements(&self) -> &'a [Statement<'a>] {
        &self.program.body
    }

    /// Original text covered by `span`.
    pub fn text_of(&self, span: Span) -> &'a str {
        &self.text[span.start as usize..span.end as usize]
    }

    /// The symbol an identifier reference resolves to, if it is bound in
    /// this module.
    pub fn symbol_of_reference(&self, ident: &IdentifierReference<'a>) -> Option<SymbolId> {
        let reference_id = ident.reference_id.get()?;
        self.scoping.get_reference(reference_id).symbol_id()
    }

    /// The import that binds `ident`, if any.
    pub fn import_of(&self, ident: &IdentifierReference<'a>) -> Option<&Import> {
        self.symbol_of_reference(ident)
            .and_then(|symbol_id| self.imports.get(&symbol_id))
    }

    /// Names of every binding declared anywhere in the module.
    pub fn declared_names(&self) -> HashSet<String> {
        self.scoping.symbol_names().map(str::to_string).collect()
    }

    /// Top-level class, function and variable declarations in source order.
    ///
    /// Declarations exported through a later `export { ... }` clause are
    /// flagged as exported as well.
    pub fn top_level_declarations(&self) -> Vec<TopLevelDeclaration<'a>> {
        let mut declarations = Vec::new();
        let mut exported_names: HashSet<String> = HashSet::new();

        for statement in self.statements() {
            match statement {
                Statement::ClassDeclaration(class) => {
                    declarations.push(TopLevelDeclaration {
                        node: DeclarationNode::Class(class),
                        exported: false,
                    });
                }
                Statement::FunctionDeclaration(function) => {
                    declarations.push(TopLevelDeclaration {
                        node: DeclarationNode::Function(function),
                        exported: false,
                    });
                }
                Statement::VariableDeclaration(variable) => {
                    for declarator in &variable.declarations {
                        declarations.push(TopLevelDeclaration {
                            node: DeclarationNode::Variable(declarator),
                            exported: false,
                        });
                    }
                }
                Statement::ExportNamedDeclaration(export) => match &export.declaration {
                    Some(Declaration::ClassDeclaration(class)) => {
                        declarations.push(TopLevelDeclaration {
                            node: DeclarationNode::Class(class),
                            exported: true,
                        });
                    }
                    Some(Declaration::FunctionDeclaration(function)) => {
                        declarations.push(TopLevelDeclaration {
                            node: DeclarationNode::Function(function),
                            exported: true,
                        });
                    }
                    Some(Declaration::VariableDeclaration(variable)) => {
                        for declarator in &variable.declarations {
                            declarations.push(TopLevelDeclaration {
                                node: DeclarationNode::Variable(declarator),
                                exported: true,
                            });
                        }
                    }
                    Some(_) => {}
                    None => {
                        // Re-exports from another module do not name local declarations.
                        if export.source.is_none() {
                            for specifier in &export.specifiers {
                                exported_names.insert(specifier.local.name().to_string());
                            }
                        }
                    }
                },
                Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        declarations.push(TopLevelDeclaration {
                            node: DeclarationNode::Class(class),
                            exported: true,
                        });
                    }
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        declarations.push(TopLevelDeclaration {
                            node: DeclarationNode::Function(function),
                            exported: true,
                        });
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        for declaration in &mut declarations {
            if let Some(name) = declaration.node.name() {
                if exported_names.contains(name) {
                    declaration.exported = true;
                }
            }
        }

        declarations
    }

    /// Find a top-level declaration by name.
    pub fn find_declaration(&self, name: &str) -> Option<DeclarationNode<'a>> {
        self.top_level_declarations()
            .into_iter()
            .map(|declaration| declaration.node)
            .find(|node| node.name() == Some(name))
    }
}

fn collect_imports(program: &Program<'_>) -> HashMap<SymbolId, Import> {
    let mut imports = HashMap::new();

    for statement in &program.body {
        let Statement::ImportDeclaration(import) = statement else {
            continue;
        };
        let Some(specifiers) = &import.specifiers else {
            continue;
        };
        let from = import.source.value.to_string();

        for specifier in specifiers {
            let (name, local) = match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(s) => {
                    (s.imported.name().to_string(), &s.local)
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                    ("default".to_string(), &s.local)
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                    ("*".to_string(), &s.local)
                }
            };
            if let Some(symbol_id) = local.symbol_id.get() {
                imports.insert(
                    symbol_id,
                    Import {
                        name,
                        from: from.clone(),
                    },
                );
            }
        }
    }

    imports
}
