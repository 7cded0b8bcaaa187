//! Import Manager
//!
//! Hands out the namespace aliases under which generated definitions refer
//! to other modules, e.g. `ɵ0` for `import * as ɵ0 from '@angular/core';`.

use indexmap::IndexMap;
use std::collections::HashSet;

/// An import statement to add to a rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewImport {
    /// Module specifier.
    pub name: String,
    /// Namespace alias of the module.
    pub alias: String,
}

#[derive(Debug, Clone)]
pub struct ImportManager {
    prefix: String,
    /// Bindings already declared in the file, never reused as aliases.
    used_names: HashSet<String>,
    imports: IndexMap<String, String>,
    next_index: usize,
}

impl ImportManager {
    pub fn new(prefix: impl Into<String>, used_names: HashSet<String>) -> Self {
        Self {
            prefix: prefix.into(),
            used_names,
            imports: IndexMap::new(),
            next_index: 0,
        }
    }

    /// The alias of `module_name`, allocating one on first use.
    pub fn generate_namespace_import(&mut self, module_name: &str) -> String {
        if let Some(alias) = self.imports.get(module_name) {
            return alias.clone();
        }

        let alias = loop {
            let candidate = format!("{}{}", self.prefix, self.next_index);
            self.next_index += 1;
            if !self.used_names.contains(&candidate) {
                break candidate;
            }
        };
        self.used_names.insert(alias.clone());
        self.imports.insert(module_name.to_string(), alias.clone());
        alias
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Every allocated import, in allocation order.
    pub fn get_all_imports(&self) -> Vec<NewImport> {
        self.imports
            .iter()
            .map(|(name, alias)| NewImport {
                name: name.clone(),
                alias: alias.clone(),
            })
            .collect()
    }
}
