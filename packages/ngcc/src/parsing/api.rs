use crate::host::{ClassMember, DeclarationNode, Decorator, NgccReflectionHost, Parameter};

/// A class found while parsing a file, with its raw decorator metadata.
#[derive(Debug, Clone)]
pub struct ParsedClass<'a> {
    pub name: String,
    pub declaration: DeclarationNode<'a>,
    pub decorators: Option<Vec<Decorator<'a>>>,
    pub members: Vec<ClassMember<'a>>,
    pub constructor_parameters: Vec<Parameter<'a>>,
}

impl<'a> ParsedClass<'a> {
    pub fn has_decorators(&self) -> bool {
        self.decorators
            .as_ref()
            .is_some_and(|decorators| !decorators.is_empty())
    }
}

/// The classes of one module, in source order.
#[derive(Debug, Clone)]
pub struct ParsedFile<'a> {
    pub file_name: String,
    pub source_text: &'a str,
    pub decorated_classes: Vec<ParsedClass<'a>>,
}

pub trait FileParser<'a> {
    fn parse_file(&self) -> ParsedFile<'a>;
}

/// Build a `ParsedClass` for `declaration`, or `None` if it is not a class.
pub(super) fn parse_class<'a, H>(host: &H, declaration: DeclarationNode<'a>) -> Option<ParsedClass<'a>>
where
    H: NgccReflectionHost<'a> + ?Sized,
{
    let class_symbol = host.get_class_symbol(declaration)?;
    Some(ParsedClass {
        name: class_symbol.name,
        declaration,
        decorators: host.get_decorators_of_declaration(declaration),
        members: host.get_members_of_class(declaration),
        constructor_parameters: host.get_constructor_parameters(declaration),
    })
}

pub(super) fn parsed_file<'a, H>(host: &H, decorated_classes: Vec<ParsedClass<'a>>) -> ParsedFile<'a>
where
    H: NgccReflectionHost<'a> + ?Sized,
{
    let source_file = host.source_file();
    ParsedFile {
        file_name: source_file.file_name.clone(),
        source_text: source_file.text,
        decorated_classes,
    }
}
