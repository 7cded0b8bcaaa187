use oxc_ast::ast;
use oxc_span::Span;
use oxc_syntax::symbol::SymbolId;

use super::utils::{
    find_property, find_static_property, get_returned_array, reflect_decorators,
    reflect_object_literal, skip_parens,
};
use crate::source_file::SourceFile;

/// Name under which a static property holds the class decorators.
pub const DECORATORS: &str = "decorators";
/// Name under which a static property holds the member decorators.
pub const PROP_DECORATORS: &str = "propDecorators";
/// Name under which a static property holds the constructor parameter metadata.
pub const CONSTRUCTOR_PARAMS: &str = "ctorParameters";

/// Resolved provenance of an imported identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Import {
    /// Name exported by the source module, never the local alias.
    pub name: String,
    /// Module specifier of the import.
    pub from: String,
}

/// The array literal a decorator descriptor was found in.
#[derive(Debug, Clone, Copy)]
pub struct DecoratorContainer<'a> {
    pub array: &'a ast::ArrayExpression<'a>,
    /// Span of the construct that exists only to hold the array: the
    /// `X.decorators = [...];` statement, the `static decorators = [...]`
    /// field or the `decorators: [...]` property.
    pub owner: Span,
}

/// Metadata extracted from one decorator descriptor, `{ type: X, args: [...] }`.
#[derive(Debug, Clone)]
pub struct Decorator<'a> {
    /// Name of the identifier referenced by `type`.
    pub name: String,

    /// `Import` by which the decorator was brought into the module.
    pub import: Option<Import>,

    /// The descriptor object literal.
    pub node: &'a ast::ObjectExpression<'a>,

    pub container: DecoratorContainer<'a>,

    /// Arguments of the decorator. Empty when there is no usable `args`.
    pub args: Vec<&'a ast::Expression<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMemberKind {
    Constructor,
    Getter,
    Setter,
    Property,
    Method,
}

#[derive(Debug, Clone)]
pub struct ClassMember<'a> {
    pub name: String,
    pub kind: ClassMemberKind,
    pub is_static: bool,
    pub decorators: Option<Vec<Decorator<'a>>>,
    pub type_node: Option<&'a ast::Expression<'a>>,
    pub value: Option<&'a ast::Expression<'a>>,
}

/// One constructor parameter, aligned with the real parameter list.
#[derive(Debug, Clone)]
pub struct Parameter<'a> {
    /// `None` for destructured parameters.
    pub name: Option<String>,
    pub node: &'a ast::FormalParameter<'a>,
    /// The `type` entry of the matching `ctorParameters` element.
    pub type_expression: Option<&'a ast::Expression<'a>>,
    pub decorators: Option<Vec<Decorator<'a>>>,
}

/// A candidate top-level declaration.
#[derive(Debug, Clone, Copy)]
pub enum DeclarationNode<'a> {
    Class(&'a ast::Class<'a>),
    Function(&'a ast::Function<'a>),
    Variable(&'a ast::VariableDeclarator<'a>),
}

impl<'a> DeclarationNode<'a> {
    pub fn name(&self) -> Option<&'a str> {
        match self {
            DeclarationNode::Class(class) => class.id.as_ref().map(|id| id.name.as_str()),
            DeclarationNode::Function(function) => {
                function.id.as_ref().map(|id| id.name.as_str())
            }
            DeclarationNode::Variable(declarator) => match &declarator.id.kind {
                ast::BindingPatternKind::BindingIdentifier(id) => Some(id.name.as_str()),
                _ => None,
            },
        }
    }

    pub fn span(&self) -> Span {
        match self {
            DeclarationNode::Class(class) => class.span,
            DeclarationNode::Function(function) => function.span,
            DeclarationNode::Variable(declarator) => declarator.span,
        }
    }
}

/// The node that actually implements a class.
#[derive(Debug, Clone, Copy)]
pub enum ClassValueDeclaration<'a> {
    Class(&'a ast::Class<'a>),
    /// The constructor function of a down-levelled class.
    Function(&'a ast::Function<'a>),
}

impl<'a> ClassValueDeclaration<'a> {
    pub fn span(&self) -> Span {
        match self {
            ClassValueDeclaration::Class(class) => class.span,
            ClassValueDeclaration::Function(function) => function.span,
        }
    }
}

/// The symbol standing for a class in a given dialect.
#[derive(Debug, Clone)]
pub struct ClassSymbol<'a> {
    pub name: String,
    pub symbol_id: SymbolId,
    pub declaration: ClassValueDeclaration<'a>,
    /// Statements searched for `X.prop = value;` static property assignments.
    pub statements: &'a [ast::Statement<'a>],
}

/// Reflection over a dialect of compiled Angular code.
///
/// The provided methods implement the metadata conventions shared by every
/// dialect (`decorators`, `propDecorators` and `ctorParameters` static
/// properties). Dialects only say how to find the class and its constructor.
pub trait NgccReflectionHost<'a> {
    fn source_file(&self) -> &SourceFile<'a>;

    /// The symbol standing for the class declared by `declaration`, or `None`
    /// if the declaration is not a class in this dialect.
    fn get_class_symbol(&self, declaration: DeclarationNode<'a>) -> Option<ClassSymbol<'a>>;

    fn get_constructor_parameter_declarations(
        &self,
        class_symbol: &ClassSymbol<'a>,
    ) -> &'a [ast::FormalParameter<'a>];

    fn is_class(&self, declaration: DeclarationNode<'a>) -> bool {
        self.get_class_symbol(declaration).is_some()
    }

    /// `None` when the declaration is not a class or has no `decorators`
    /// property; `Some(vec![])` when the property is not an array literal.
    fn get_decorators_of_declaration(
        &self,
        declaration: DeclarationNode<'a>,
    ) -> Option<Vec<Decorator<'a>>> {
        let class_symbol = self.get_class_symbol(declaration)?;
        let property = find_static_property(self.source_file(), &class_symbol, DECORATORS)?;

        match skip_parens(property.value) {
            ast::Expression::ArrayExpression(array) => {
                let container = DecoratorContainer {
                    array,
                    owner: property.owner,
                };
                Some(reflect_decorators(container, |ident| {
                    self.get_import_of_identifier(ident)
                }))
            }
            _ => Some(Vec::new()),
        }
    }

    fn get_members_of_class(&self, declaration: DeclarationNode<'a>) -> Vec<ClassMember<'a>> {
        let Some(class_symbol) = self.get_class_symbol(declaration) else {
            return Vec::new();
        };
        let Some(property) = find_static_property(self.source_file(), &class_symbol, PROP_DECORATORS)
        else {
            return Vec::new();
        };
        let ast::Expression::ObjectExpression(object) = skip_parens(property.value) else {
            return Vec::new();
        };

        reflect_object_literal(object)
            .filter_map(|(name, property)| match skip_parens(&property.value) {
                ast::Expression::ArrayExpression(array) => {
                    let container = DecoratorContainer {
                        array,
                        owner: property.span,
                    };
                    let decorators = reflect_decorators(container, |ident| {
                        self.get_import_of_identifier(ident)
                    });
                    Some(ClassMember {
                        name: name.to_string(),
                        kind: ClassMemberKind::Property,
                        is_static: false,
                        decorators: Some(decorators),
                        type_node: None,
                        value: None,
                    })
                }
                _ => None,
            })
            .collect()
    }

    /// One entry per declared constructor parameter. Parameters without
    /// usable `ctorParameters` metadata carry neither type nor decorators.
    fn get_constructor_parameters(&self, declaration: DeclarationNode<'a>) -> Vec<Parameter<'a>> {
        let Some(class_symbol) = self.get_class_symbol(declaration) else {
            return Vec::new();
        };
        let declarations = self.get_constructor_parameter_declarations(&class_symbol);
        if declarations.is_empty() {
            return Vec::new();
        }

        let metadata = find_static_property(self.source_file(), &class_symbol, CONSTRUCTOR_PARAMS)
            .and_then(|property| get_returned_array(property.value));

        declarations
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let element = metadata
                    .and_then(|array| array.elements.get(index))
                    .and_then(|element| element.as_expression())
                    .map(skip_parens);

                let (type_expression, decorators) = match element {
                    Some(ast::Expression::ObjectExpression(object)) => {
                        let type_expression =
                            find_property(object, "type").map(|property| &property.value);
                        let decorators = find_property(object, DECORATORS).and_then(|property| {
                            match skip_parens(&property.value) {
                                ast::Expression::ArrayExpression(array) => {
                                    let container = DecoratorContainer {
                                        array,
                                        owner: property.span,
                                    };
                                    Some(reflect_decorators(container, |ident| {
                                        self.get_import_of_identifier(ident)
                                    }))
                                }
                                _ => None,
                            }
                        });
                        (type_expression, decorators)
                    }
                    _ => (None, None),
                };

                Parameter {
                    name: node
                        .pattern
                        .get_identifier_name()
                        .map(|name| name.to_string()),
                    node,
                    type_expression,
                    decorators,
                }
            })
            .collect()
    }

    /// Where `ident` was imported from, with the name it has in the
    /// exporting module.
    fn get_import_of_identifier(&self, ident: &ast::IdentifierReference<'a>) -> Option<Import> {
        self.source_file().import_of(ident).cloned()
    }
}
