//! ESM2015 reflection host
//!
//! Classes are real class declarations. Their decorator metadata is attached
//! after the class body:
//!
//! ```js
//! export class SomeDirective {
//!   constructor(viewContainer) {}
//! }
//! SomeDirective.decorators = [
//!   { type: Directive, args: [{ selector: '[someDirective]' }] }
//! ];
//! SomeDirective.ctorParameters = () => [{ type: ViewContainerRef }];
//! SomeDirective.propDecorators = { "input1": [{ type: Input }] };
//! ```
//!
//! The same properties may also be declared as `static` class fields.

use oxc_ast::ast::{ClassElement, FormalParameter, MethodDefinitionKind};

use super::api::{ClassSymbol, ClassValueDeclaration, DeclarationNode, NgccReflectionHost};
use crate::source_file::SourceFile;

pub struct Esm2015ReflectionHost<'a> {
    source_file: SourceFile<'a>,
}

impl<'a> Esm2015ReflectionHost<'a> {
    pub fn new(source_file: SourceFile<'a>) -> Self {
        Self { source_file }
    }
}

impl<'a> NgccReflectionHost<'a> for Esm2015ReflectionHost<'a> {
    fn source_file(&self) -> &SourceFile<'a> {
        &self.source_file
    }

    fn get_class_symbol(&self, declaration: DeclarationNode<'a>) -> Option<ClassSymbol<'a>> {
        let DeclarationNode::Class(class) = declaration else {
            return None;
        };
        let id = class.id.as_ref()?;
        Some(ClassSymbol {
            name: id.name.to_string(),
            symbol_id: id.symbol_id.get()?,
            declaration: ClassValueDeclaration::Class(class),
            statements: self.source_file.statements(),
        })
    }

    fn get_constructor_parameter_declarations(
        &self,
        class_symbol: &ClassSymbol<'a>,
    ) -> &'a [FormalParameter<'a>] {
        let ClassValueDeclaration::Class(class) = class_symbol.declaration else {
            return &[];
        };
        class
            .body
            .body
            .iter()
            .find_map(|element| match element {
                ClassElement::MethodDefinition(method)
                    if method.kind == MethodDefinitionKind::Constructor =>
                {
                    Some(&method.value.params.items[..])
                }
                _ => None,
            })
            .unwrap_or(&[])
    }
}
