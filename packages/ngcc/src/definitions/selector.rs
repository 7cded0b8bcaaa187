//! CSS selectors
//!
//! Parses the `selector` of a directive and converts it to the array form
//! expected by the runtime's `selectors` definition field.

use bitflags::bitflags;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static SELECTOR_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?P<not>:not\()|(?P<simple>(?P<prefix>[.#]?)[-\w]+)|\[(?P<attr>[-.\w*\\$]+)(?:=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\]]*)))?\]|(?P<close>\))|(?P<comma>\s*,\s*)"#,
    )
    .expect("selector token regexp is valid")
});

/// A lexical piece of a selector list. Text the regexp does not recognize
/// is ignored.
#[derive(Debug, PartialEq, Eq)]
enum Token<'s> {
    NotStart,
    NotEnd,
    Element(&'s str),
    Class(&'s str),
    Id(&'s str),
    Attribute(&'s str, &'s str),
    Comma,
}

fn tokenize(selector: &str) -> Vec<Token<'_>> {
    SELECTOR_TOKEN
        .captures_iter(selector)
        .filter_map(|cap| {
            if cap.name("not").is_some() {
                Some(Token::NotStart)
            } else if let Some(simple) = cap.name("simple") {
                let text = simple.as_str();
                Some(match cap.name("prefix").map(|m| m.as_str()) {
                    Some(".") => Token::Class(&text[1..]),
                    Some("#") => Token::Id(&text[1..]),
                    _ => Token::Element(text),
                })
            } else if let Some(name) = cap.name("attr") {
                let value = ["dq", "sq", "bare"]
                    .into_iter()
                    .find_map(|group| cap.name(group))
                    .map_or("", |m| m.as_str());
                Some(Token::Attribute(name.as_str(), value))
            } else if cap.name("close").is_some() {
                Some(Token::NotEnd)
            } else if cap.name("comma").is_some() {
                Some(Token::Comma)
            } else {
                None
            }
        })
        .collect()
}

bitflags! {
    /// Marks the start of a new kind of part in a runtime selector array.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SelectorFlags: u32 {
        const NOT = 0b0001;
        const ATTRIBUTE = 0b0010;
        const ELEMENT = 0b0100;
        const CLASS = 0b1000;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    Text(String),
    Flags(SelectorFlags),
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorPart::Text(text) => write!(f, "{:?}", text),
            SelectorPart::Flags(flags) => write!(f, "{}", flags.bits()),
        }
    }
}

/// One compound selector of a selector list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssSelector {
    pub element: Option<String>,
    pub class_names: Vec<String>,
    /// Attributes stored in pairs: [name, value, name, value, ...]
    pub attrs: Vec<String>,
    pub not_selectors: Vec<CssSelector>,
}

impl CssSelector {
    /// Parse a comma separated selector list.
    pub fn parse(selector: &str) -> Result<Vec<CssSelector>, String> {
        let mut list = Vec::new();
        let mut compound = CssSelector::default();
        // Set while inside `:not(...)`; holds the negated compound.
        let mut negated: Option<CssSelector> = None;

        for token in tokenize(selector) {
            match token {
                Token::NotStart if negated.is_some() => {
                    return Err(format!("nested :not() in selector \"{}\"", selector));
                }
                Token::NotStart => negated = Some(CssSelector::default()),
                Token::NotEnd => {
                    if let Some(not_selector) = negated.take() {
                        compound.not_selectors.push(not_selector);
                    }
                }
                Token::Comma if negated.is_some() => {
                    return Err(format!("selector list inside :not() in \"{}\"", selector));
                }
                Token::Comma => list.push(std::mem::take(&mut compound).finish()),
                simple => {
                    let target = negated.as_mut().unwrap_or(&mut compound);
                    match simple {
                        Token::Element(name) => target.set_element(name),
                        Token::Class(name) => target.add_class_name(name),
                        Token::Id(id) => target.add_attribute("id", id),
                        Token::Attribute(name, value) => {
                            target.add_attribute(&unescape_attribute(name)?, value)
                        }
                        _ => {}
                    }
                }
            }
        }

        // An unterminated `:not(` still applies to the compound.
        if let Some(not_selector) = negated {
            compound.not_selectors.push(not_selector);
        }
        list.push(compound.finish());
        Ok(list)
    }

    fn finish(mut self) -> Self {
        if !self.not_selectors.is_empty()
            && self.element.is_none()
            && self.class_names.is_empty()
            && self.attrs.is_empty()
        {
            self.element = Some("*".to_string());
        }
        self
    }

    pub fn set_element(&mut self, element: &str) {
        self.element = Some(element.to_string());
    }

    pub fn add_attribute(&mut self, name: &str, value: &str) {
        self.attrs.push(name.to_string());
        self.attrs.push(value.to_lowercase());
    }

    pub fn add_class_name(&mut self, name: &str) {
        self.class_names.push(name.to_lowercase());
    }

    /// `[element, ...attrs, CLASS, ...classes, ...negative selectors]`
    pub fn to_r3_selector(&self) -> Vec<SelectorPart> {
        let element = match self.element.as_deref() {
            Some("*") | None => "",
            Some(element) => element,
        };
        let mut parts = vec![SelectorPart::Text(element.to_string())];
        parts.extend(self.attrs.iter().cloned().map(SelectorPart::Text));
        parts.extend(self.class_parts(SelectorFlags::CLASS));

        for not_selector in &self.not_selectors {
            parts.extend(not_selector.to_negative_selector());
        }
        parts
    }

    fn to_negative_selector(&self) -> Vec<SelectorPart> {
        let mut parts = Vec::new();
        if let Some(element) = &self.element {
            parts.push(SelectorPart::Flags(SelectorFlags::NOT | SelectorFlags::ELEMENT));
            parts.push(SelectorPart::Text(element.clone()));
            parts.extend(self.attrs.iter().cloned().map(SelectorPart::Text));
            parts.extend(self.class_parts(SelectorFlags::CLASS));
        } else if !self.attrs.is_empty() {
            parts.push(SelectorPart::Flags(SelectorFlags::NOT | SelectorFlags::ATTRIBUTE));
            parts.extend(self.attrs.iter().cloned().map(SelectorPart::Text));
            parts.extend(self.class_parts(SelectorFlags::CLASS));
        } else {
            parts.extend(self.class_parts(SelectorFlags::NOT | SelectorFlags::CLASS));
        }
        parts
    }

    fn class_parts(&self, flags: SelectorFlags) -> Vec<SelectorPart> {
        if self.class_names.is_empty() {
            return Vec::new();
        }
        std::iter::once(SelectorPart::Flags(flags))
            .chain(self.class_names.iter().cloned().map(SelectorPart::Text))
            .collect()
    }
}

/// Drops the backslashes of `\\$` escapes. A bare `$` is rejected.
fn unescape_attribute(name: &str) -> Result<String, String> {
    let mut unescaped = String::with_capacity(name.len());
    let mut chars = name.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => unescaped.extend(chars.next()),
            '$' => return Err(format!("unescaped \"$\" in attribute selector \"{}\"", name)),
            other => unescaped.push(other),
        }
    }
    Ok(unescaped)
}

/// Render a selector list as `[["", "a", ""], ...]`.
pub fn render_selectors(selector: &str) -> Result<String, String> {
    let selectors = CssSelector::parse(selector)?
        .iter()
        .map(|selector| {
            let parts: Vec<String> = selector
                .to_r3_selector()
                .iter()
                .map(|part| part.to_string())
                .collect();
            format!("[{}]", parts.join(", "))
        })
        .collect::<Vec<_>>();
    Ok(format!("[{}]", selectors.join(", ")))
}
