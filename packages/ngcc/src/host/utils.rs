//! Shape matching over compiled output.
//!
//! Small extraction functions shared by every dialect. Each one answers
//! `None` (or skips the element) when the syntax does not have the expected
//! shape; none of them fail.

use oxc_ast::ast::{
    ArrayExpression, AssignmentTarget, ClassElement, Expression, FunctionBody, IdentifierReference,
    ObjectExpression, ObjectProperty, ObjectPropertyKind, PropertyKey, ReturnStatement, Statement,
};
use oxc_span::Span;
use oxc_syntax::operator::AssignmentOperator;

use super::api::{ClassSymbol, ClassValueDeclaration, Decorator, DecoratorContainer, Import};
use crate::source_file::SourceFile;

/// A static property attached to a class.
#[derive(Debug, Clone, Copy)]
pub struct StaticProperty<'a> {
    pub value: &'a Expression<'a>,
    /// The assignment statement or class field that declares the property.
    pub owner: Span,
}

pub fn skip_parens<'a>(mut expression: &'a Expression<'a>) -> &'a Expression<'a> {
    while let Expression::ParenthesizedExpression(parenthesized) = expression {
        expression = &parenthesized.expression;
    }
    expression
}

/// The name of a non-computed property key.
pub fn property_key_name<'a>(key: &'a PropertyKey<'a>) -> Option<&'a str> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.as_str()),
        PropertyKey::StringLiteral(literal) => Some(literal.value.as_str()),
        _ => None,
    }
}

/// The `key: value` entries of an object literal, in source order.
///
/// Shorthand, computed, spread and method entries are left out.
pub fn reflect_object_literal<'a>(
    object: &'a ObjectExpression<'a>,
) -> impl Iterator<Item = (&'a str, &'a ObjectProperty<'a>)> + 'a {
    object.properties.iter().filter_map(|property| match property {
        ObjectPropertyKind::ObjectProperty(property)
            if !property.shorthand && !property.computed && !property.method =>
        {
            property_key_name(&property.key).map(|name| (name, &**property))
        }
        _ => None,
    })
}

pub fn find_property<'a>(
    object: &'a ObjectExpression<'a>,
    name: &str,
) -> Option<&'a ObjectProperty<'a>> {
    reflect_object_literal(object)
        .find(|(key, _)| *key == name)
        .map(|(_, property)| property)
}

/// Decorator descriptors of a `[{ type: X, args: [...] }, ...]` array.
///
/// Elements that are not object literals, lack `type`, or whose `type` is
/// not a plain identifier are skipped.
pub fn reflect_decorators<'a, F>(container: DecoratorContainer<'a>, get_import: F) -> Vec<Decorator<'a>>
where
    F: Fn(&IdentifierReference<'a>) -> Option<Import>,
{
    container
        .array
        .elements
        .iter()
        .filter_map(|element| element.as_expression())
        .filter_map(|element| match skip_parens(element) {
            Expression::ObjectExpression(object) => Some(&**object),
            _ => None,
        })
        .filter_map(|object| {
            let type_property = find_property(object, "type")?;
            let Expression::Identifier(type_identifier) = skip_parens(&type_property.value) else {
                return None;
            };

            let args = match find_property(object, "args").map(|args| skip_parens(&args.value)) {
                Some(Expression::ArrayExpression(args)) => args
                    .elements
                    .iter()
                    .filter_map(|arg| arg.as_expression())
                    .collect(),
                _ => Vec::new(),
            };

            Some(Decorator {
                name: type_identifier.name.to_string(),
                import: get_import(&**type_identifier),
                node: object,
                container,
                args,
            })
        })
        .collect()
}

/// Find the static property `name` of a class.
///
/// Class fields (`static name = value`) are checked first, then
/// `X.name = value;` statements whose `X` resolves to the class symbol.
pub fn find_static_property<'a>(
    source_file: &SourceFile<'a>,
    class_symbol: &ClassSymbol<'a>,
    name: &str,
) -> Option<StaticProperty<'a>> {
    if let ClassValueDeclaration::Class(class) = class_symbol.declaration {
        let field = class.body.body.iter().find_map(|element| match element {
            ClassElement::PropertyDefinition(field)
                if field.r#static && property_key_name(&field.key) == Some(name) =>
            {
                field.value.as_ref().map(|value| StaticProperty {
                    value,
                    owner: field.span,
                })
            }
            _ => None,
        });
        if field.is_some() {
            return field;
        }
    }

    class_symbol.statements.iter().find_map(|statement| {
        let Statement::ExpressionStatement(statement) = statement else {
            return None;
        };
        let Expression::AssignmentExpression(assignment) = skip_parens(&statement.expression)
        else {
            return None;
        };
        if assignment.operator != AssignmentOperator::Assign {
            return None;
        }
        let AssignmentTarget::StaticMemberExpression(member) = &assignment.left else {
            return None;
        };
        if member.property.name.as_str() != name {
            return None;
        }
        let Expression::Identifier(object) = skip_parens(&member.object) else {
            return None;
        };
        if source_file.symbol_of_reference(object) != Some(class_symbol.symbol_id) {
            return None;
        }
        Some(StaticProperty {
            value: &assignment.right,
            owner: statement.span,
        })
    })
}

pub fn get_return_statement<'a>(statements: &'a [Statement<'a>]) -> Option<&'a ReturnStatement<'a>> {
    statements.iter().find_map(|statement| match statement {
        Statement::ReturnStatement(ret) => Some(&**ret),
        _ => None,
    })
}

/// The array literal returned by a zero-argument arrow or function
/// expression, e.g. `() => [...]` or `function () { return [...]; }`.
pub fn get_returned_array<'a>(initializer: &'a Expression<'a>) -> Option<&'a ArrayExpression<'a>> {
    let returned = match skip_parens(initializer) {
        Expression::ArrowFunctionExpression(arrow) if arrow.params.items.is_empty() => {
            if arrow.expression {
                match arrow.body.statements.first() {
                    Some(Statement::ExpressionStatement(statement)) => Some(&statement.expression),
                    _ => None,
                }
            } else {
                returned_expression(&arrow.body)
            }
        }
        Expression::FunctionExpression(function) if function.params.items.is_empty() => {
            function.body.as_ref().and_then(|body| returned_expression(body))
        }
        _ => None,
    }?;

    match skip_parens(returned) {
        Expression::ArrayExpression(array) => Some(&**array),
        _ => None,
    }
}

fn returned_expression<'a>(body: &'a FunctionBody<'a>) -> Option<&'a Expression<'a>> {
    get_return_statement(&body.statements).and_then(|ret| ret.argument.as_ref())
}
