//! Definition compiler
//!
//! Turns the decorator metadata of a parsed class into the static
//! definition fields the newer runtime reads, e.g.
//!
//! ```js
//! A.ngDirectiveDef = ɵ0.ɵdefineDirective({ type: A, selectors: [["", "a", ""]], factory: function A_Factory() { return new A(); } });
//! ```
//!
//! Only the text is produced here; where it goes is the renderer's business.

use bitflags::bitflags;
use oxc_ast::ast::{Expression, ObjectExpression};
use oxc_span::GetSpan;

use super::selector::render_selectors;
use crate::config::NgccConfig;
use crate::host::utils::{find_property, skip_parens};
use crate::host::{Decorator, Parameter};
use crate::import_manager::ImportManager;
use crate::parsing::ParsedClass;
use crate::util::path::is_valid_identifier;

/// Generated definition text for one class.
#[derive(Debug, Clone)]
pub struct CompiledDefinition<'a> {
    pub text: String,
    /// Decorators consumed by the definition, to be removed from the output.
    pub decorators: Vec<Decorator<'a>>,
    /// Names of further recognized decorators that were not compiled.
    pub ignored: Vec<String>,
}

/// Produces definition text for the classes it recognizes.
pub trait DefinitionCompiler: Send + Sync {
    /// `None` when the class carries no decorator this compiler handles.
    fn compile<'a>(
        &self,
        class: &ParsedClass<'a>,
        source_text: &'a str,
        imports: &mut ImportManager,
    ) -> Option<CompiledDefinition<'a>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoratorKind {
    Component,
    Directive,
    Injectable,
    NgModule,
    Pipe,
}

impl DecoratorKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Component" => Some(DecoratorKind::Component),
            "Directive" => Some(DecoratorKind::Directive),
            "Injectable" => Some(DecoratorKind::Injectable),
            "NgModule" => Some(DecoratorKind::NgModule),
            "Pipe" => Some(DecoratorKind::Pipe),
            _ => None,
        }
    }

    /// Injection function used by the factory of this kind of class.
    fn inject_fn(&self) -> &'static str {
        match self {
            DecoratorKind::Component | DecoratorKind::Directive | DecoratorKind::Pipe => {
                "ɵdirectiveInject"
            }
            DecoratorKind::Injectable | DecoratorKind::NgModule => "inject",
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InjectFlags: u32 {
        const HOST = 0b0001;
        const SELF = 0b0010;
        const SKIP_SELF = 0b0100;
        const OPTIONAL = 0b1000;
    }
}

/// Compiles the decorators of the Angular core package.
#[derive(Debug, Clone)]
pub struct CoreDefinitionCompiler {
    core_module: String,
    is_core: bool,
}

impl CoreDefinitionCompiler {
    pub fn new(core_module: impl Into<String>, is_core: bool) -> Self {
        Self {
            core_module: core_module.into(),
            is_core,
        }
    }

    pub fn from_config(config: &NgccConfig) -> Self {
        Self::new(config.core_module.clone(), config.is_core)
    }

    /// Whether `decorator` is the core decorator called `name`.
    fn is_core_decorator(&self, decorator: &Decorator<'_>, name: &str) -> bool {
        match &decorator.import {
            Some(import) => import.from == self.core_module && import.name == name,
            None => self.is_core && decorator.name == name,
        }
    }

    fn recognize(&self, decorator: &Decorator<'_>) -> Option<DecoratorKind> {
        let name = match &decorator.import {
            Some(import) if import.from == self.core_module => import.name.as_str(),
            None if self.is_core => decorator.name.as_str(),
            _ => return None,
        };
        DecoratorKind::from_name(name)
    }
}

impl DefinitionCompiler for CoreDefinitionCompiler {
    fn compile<'a>(
        &self,
        class: &ParsedClass<'a>,
        source_text: &'a str,
        imports: &mut ImportManager,
    ) -> Option<CompiledDefinition<'a>> {
        let recognized: Vec<(DecoratorKind, &Decorator<'a>)> = class
            .decorators
            .as_ref()?
            .iter()
            .filter_map(|decorator| self.recognize(decorator).map(|kind| (kind, decorator)))
            .collect();
        let (kind, decorator) = *recognized.first()?;

        let builder = DefinitionBuilder {
            compiler: self,
            class,
            source_text,
            metadata: decorator.args.first().copied().and_then(|arg| match skip_parens(arg) {
                Expression::ObjectExpression(object) => Some(&**object),
                _ => None,
            }),
        };
        let text = builder.build(kind, imports)?;

        Some(CompiledDefinition {
            text,
            decorators: vec![decorator.clone()],
            ignored: recognized[1..]
                .iter()
                .map(|(_, decorator)| decorator.name.clone())
                .collect(),
        })
    }
}

struct DefinitionBuilder<'c, 'a> {
    compiler: &'c CoreDefinitionCompiler,
    class: &'c ParsedClass<'a>,
    source_text: &'a str,
    /// The object literal passed to the decorator, if any.
    metadata: Option<&'a ObjectExpression<'a>>,
}

impl<'c, 'a> DefinitionBuilder<'c, 'a> {
    fn build(&self, kind: DecoratorKind, imports: &mut ImportManager) -> Option<String> {
        let name = &self.class.name;

        // Everything that can reject the class is checked before an import is
        // allocated for it.
        let selectors = match kind {
            DecoratorKind::Component | DecoratorKind::Directive => {
                match self.string_property("selector") {
                    Some(selector) => Some(render_selectors(&selector).ok()?),
                    None => Some("[]".to_string()),
                }
            }
            _ => None,
        };
        let pipe_name = match kind {
            DecoratorKind::Pipe => Some(self.string_property("name")?),
            _ => None,
        };

        let ns = if self.compiler.is_core {
            String::new()
        } else {
            format!(
                "{}.",
                imports.generate_namespace_import(&self.compiler.core_module)
            )
        };
        let factory = self.factory(&ns, kind.inject_fn());

        let text = match kind {
            DecoratorKind::Directive | DecoratorKind::Component => {
                let (field, define) = if kind == DecoratorKind::Component {
                    ("ngComponentDef", "ɵdefineComponent")
                } else {
                    ("ngDirectiveDef", "ɵdefineDirective")
                };
                let mut fields = vec![
                    format!("type: {}", name),
                    format!("selectors: {}", selectors.unwrap_or_default()),
                    format!("factory: {}", factory),
                ];
                if let Some(inputs) = self.property_map("Input") {
                    fields.push(format!("inputs: {}", inputs));
                }
                if let Some(outputs) = self.property_map("Output") {
                    fields.push(format!("outputs: {}", outputs));
                }
                format!(
                    "{}.{} = {}{}({{ {} }});",
                    name,
                    field,
                    ns,
                    define,
                    fields.join(", ")
                )
            }
            DecoratorKind::Injectable => format!(
                "{}.ngInjectableDef = {}defineInjectable({{ providedIn: {}, factory: {} }});",
                name,
                ns,
                self.property_text("providedIn").unwrap_or("null"),
                factory
            ),
            DecoratorKind::Pipe => format!(
                "{}.ngPipeDef = {}ɵdefinePipe({{ name: {:?}, type: {}, factory: {}, pure: {} }});",
                name,
                ns,
                pipe_name.unwrap_or_default(),
                name,
                factory,
                self.property_text("pure").unwrap_or("true")
            ),
            DecoratorKind::NgModule => {
                let module_def = format!(
                    "{}.ngModuleDef = {}ɵdefineNgModule({{ type: {}, bootstrap: {}, declarations: {}, imports: {}, exports: {} }});",
                    name,
                    ns,
                    name,
                    self.property_text("bootstrap").unwrap_or("[]"),
                    self.property_text("declarations").unwrap_or("[]"),
                    self.property_text("imports").unwrap_or("[]"),
                    self.property_text("exports").unwrap_or("[]"),
                );
                let injector_def = format!(
                    "{}.ngInjectorDef = {}defineInjector({{ factory: {}, providers: {}, imports: {} }});",
                    name,
                    ns,
                    factory,
                    self.property_text("providers").unwrap_or("[]"),
                    self.property_text("imports").unwrap_or("[]"),
                );
                format!("{}\n{}", module_def, injector_def)
            }
        };
        Some(text)
    }

    fn text(&self, expression: &Expression<'a>) -> &'a str {
        let span = expression.span();
        &self.source_text[span.start as usize..span.end as usize]
    }

    fn property_text(&self, name: &str) -> Option<&'a str> {
        let property = find_property(self.metadata?, name)?;
        Some(self.text(&property.value))
    }

    fn string_property(&self, name: &str) -> Option<String> {
        let property = find_property(self.metadata?, name)?;
        string_value(&property.value)
    }

    fn factory(&self, ns: &str, inject_fn: &str) -> String {
        let args: Vec<String> = self
            .class
            .constructor_parameters
            .iter()
            .map(|parameter| self.inject_parameter(parameter, ns, inject_fn))
            .collect();
        format!(
            "function {}_Factory() {{ return new {}({}); }}",
            self.class.name,
            self.class.name,
            args.join(", ")
        )
    }

    fn inject_parameter(&self, parameter: &Parameter<'a>, ns: &str, inject_fn: &str) -> String {
        let mut token = parameter
            .type_expression
            .filter(|expression| !is_undefined(*expression))
            .map(|expression| self.text(expression))
            .unwrap_or("null");
        let mut flags = InjectFlags::empty();

        for decorator in parameter.decorators.iter().flatten() {
            let is = |name: &str| self.compiler.is_core_decorator(decorator, name);
            if is("Inject") {
                if let Some(arg) = decorator.args.first() {
                    token = self.text(arg);
                }
            } else if is("Attribute") {
                let name = decorator.args.first().map(|arg| self.text(arg)).unwrap_or("null");
                return format!("{}ɵinjectAttribute({})", ns, name);
            } else if is("Optional") {
                flags |= InjectFlags::OPTIONAL;
            } else if is("Self") {
                flags |= InjectFlags::SELF;
            } else if is("SkipSelf") {
                flags |= InjectFlags::SKIP_SELF;
            } else if is("Host") {
                flags |= InjectFlags::HOST;
            }
        }

        if flags.is_empty() {
            format!("{}{}({})", ns, inject_fn, token)
        } else {
            format!("{}{}({}, {})", ns, inject_fn, token, flags.bits())
        }
    }

    /// `{ publicName: "propertyName", ... }` for members decorated with the
    /// core decorator `decorator_name`.
    fn property_map(&self, decorator_name: &str) -> Option<String> {
        let entries: Vec<String> = self
            .class
            .members
            .iter()
            .flat_map(move |member| {
                member
                    .decorators
                    .iter()
                    .flatten()
                    .filter(move |decorator| self.compiler.is_core_decorator(decorator, decorator_name))
                    .map(move |decorator| {
                        let public_name = decorator
                            .args
                            .first()
                            .and_then(|arg| string_value(*arg))
                            .unwrap_or_else(|| member.name.clone());
                        format!("{}: {:?}", property_key(&public_name), member.name)
                    })
            })
            .collect();

        if entries.is_empty() {
            None
        } else {
            Some(format!("{{ {} }}", entries.join(", ")))
        }
    }
}

fn string_value<'a>(expression: &'a Expression<'a>) -> Option<String> {
    match skip_parens(expression) {
        Expression::StringLiteral(literal) => Some(literal.value.to_string()),
        Expression::TemplateLiteral(template) if template.expressions.is_empty() => template
            .quasis
            .first()
            .and_then(|quasi| quasi.value.cooked.as_ref())
            .map(|cooked| cooked.to_string()),
        _ => None,
    }
}

fn is_undefined<'a>(expression: &'a Expression<'a>) -> bool {
    matches!(skip_parens(expression), Expression::Identifier(ident) if ident.name == "undefined")
}

fn property_key(name: &str) -> String {
    if is_valid_identifier(name) {
        name.to_string()
    } else {
        format!("{:?}", name)
    }
}
