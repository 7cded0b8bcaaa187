use anyhow::{bail, Context};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::host::ModuleFormat;
use crate::logging::LogLevel;
use crate::util::path::is_valid_identifier;

/// Which dialect to read input files as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatOption {
    /// Probe every file for its dialect.
    #[default]
    Auto,
    Esm2015,
    Esm5,
}

impl FormatOption {
    pub fn fixed(self) -> Option<ModuleFormat> {
        match self {
            FormatOption::Auto => None,
            FormatOption::Esm2015 => Some(ModuleFormat::Esm2015),
            FormatOption::Esm5 => Some(ModuleFormat::Esm5),
        }
    }
}

impl FromStr for FormatOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(FormatOption::Auto),
            "esm2015" => Ok(FormatOption::Esm2015),
            "esm5" => Ok(FormatOption::Esm5),
            other => Err(format!(
                "unknown format `{}`, expected one of: auto, esm2015, esm5",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NgccConfig {
    pub format: FormatOption,
    /// Prefix of the namespace aliases of added imports.
    pub import_prefix: String,
    /// Module the recognized decorators must be imported from.
    pub core_module: String,
    /// The files being processed are the core module itself: decorators are
    /// recognized by name and generated code refers to local symbols.
    pub is_core: bool,
    pub log_level: LogLevel,
}

impl Default for NgccConfig {
    fn default() -> Self {
        Self {
            format: FormatOption::Auto,
            import_prefix: "ɵ".to_string(),
            core_module: "@angular/core".to_string(),
            is_core: false,
            log_level: LogLevel::Info,
        }
    }
}

impl NgccConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: NgccConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_valid_identifier(&format!("{}0", self.import_prefix)) {
            bail!(
                "importPrefix `{}` does not produce valid identifiers",
                self.import_prefix
            );
        }
        if self.core_module.is_empty() {
            bail!("coreModule must not be empty");
        }
        Ok(())
    }
}
