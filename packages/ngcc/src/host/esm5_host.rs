//! ESM5 reflection host
//!
//! ESM5 packages contain IIFEs that act like classes:
//!
//! ```js
//! var CommonModule = (function () {
//!   function CommonModule() {
//!   }
//!   CommonModule.decorators = [ ... ];
//!   return CommonModule;
//! })();
//! ```
//!
//! The class is the function declaration returned by the IIFE, and its
//! metadata lives in static property assignments inside the IIFE body.

use oxc_ast::ast::{Expression, FormalParameter, FunctionBody, IdentifierReference, Statement};

use super::api::{ClassSymbol, ClassValueDeclaration, DeclarationNode, NgccReflectionHost};
use super::esm2015_host::Esm2015ReflectionHost;
use super::utils::{get_return_statement, skip_parens};
use crate::source_file::SourceFile;

pub struct Esm5ReflectionHost<'a> {
    base: Esm2015ReflectionHost<'a>,
}

impl<'a> Esm5ReflectionHost<'a> {
    pub fn new(source_file: SourceFile<'a>) -> Self {
        Self {
            base: Esm2015ReflectionHost::new(source_file),
        }
    }
}

impl<'a> NgccReflectionHost<'a> for Esm5ReflectionHost<'a> {
    fn source_file(&self) -> &SourceFile<'a> {
        self.base.source_file()
    }

    /// Digs through `var X = (function () { function X() {} ... return X; })();`
    /// to the inner constructor function.
    fn get_class_symbol(&self, declaration: DeclarationNode<'a>) -> Option<ClassSymbol<'a>> {
        let DeclarationNode::Variable(declarator) = declaration else {
            return None;
        };
        let body = get_iife_body(declarator.init.as_ref()?)?;
        let returned = get_return_identifier(body)?;
        let symbol_id = self.source_file().symbol_of_reference(returned)?;

        body.statements.iter().find_map(|statement| match statement {
            Statement::FunctionDeclaration(function) => {
                let id = function.id.as_ref()?;
                (id.symbol_id.get() == Some(symbol_id)).then(|| ClassSymbol {
                    name: id.name.to_string(),
                    symbol_id,
                    declaration: ClassValueDeclaration::Function(function),
                    statements: &body.statements,
                })
            }
            _ => None,
        })
    }

    /// There is no class in ESM5: the constructor is the inner function itself.
    fn get_constructor_parameter_declarations(
        &self,
        class_symbol: &ClassSymbol<'a>,
    ) -> &'a [FormalParameter<'a>] {
        match class_symbol.declaration {
            ClassValueDeclaration::Function(function) => &function.params.items[..],
            ClassValueDeclaration::Class(_) => &[],
        }
    }
}

/// The body of a no-argument IIFE, in either `(function () {...})()` or
/// `(function () {...}())` form.
pub fn get_iife_body<'a>(initializer: &'a Expression<'a>) -> Option<&'a FunctionBody<'a>> {
    let Expression::CallExpression(call) = skip_parens(initializer) else {
        return None;
    };
    if !call.arguments.is_empty() {
        return None;
    }
    match skip_parens(&call.callee) {
        Expression::FunctionExpression(function) => function.body.as_deref(),
        _ => None,
    }
}

/// The identifier returned by the first `return` statement of `body`.
pub fn get_return_identifier<'a>(body: &'a FunctionBody<'a>) -> Option<&'a IdentifierReference<'a>> {
    let ret = get_return_statement(&body.statements)?;
    match skip_parens(ret.argument.as_ref()?) {
        Expression::Identifier(ident) => Some(&**ident),
        _ => None,
    }
}
