//! Configuration management for angunav LSP

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::role::{ROLE_ORDER, Role};

/// Default suffix of the logic file
const DEFAULT_COMPONENT_SUFFIX: &str = "component.ts";

/// Default suffix of the markup file
const DEFAULT_TEMPLATE_SUFFIX: &str = "component.html";

/// Default suffix of the style file
const DEFAULT_STYLE_SUFFIX: &str = "component.scss";

/// LSP configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Filename suffix for each role
    pub suffixes: SuffixConfig,
    /// Code actions configuration
    #[serde(alias = "codeActions")]
    pub code_actions: CodeActionsConfig,
}

/// Filename suffix for each role.
///
/// Suffixes are matched after a dot, so `component.ts` and `.component.ts`
/// are the same setting. The three suffixes are expected to be pairwise
/// distinct; this is a configuration contract and is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SuffixConfig {
    #[serde(alias = "componentSuffix")]
    pub component_suffix: String,
    #[serde(alias = "templateSuffix")]
    pub template_suffix: String,
    #[serde(alias = "styleSuffix")]
    pub style_suffix: String,
}

impl Default for SuffixConfig {
    fn default() -> Self {
        Self {
            component_suffix: DEFAULT_COMPONENT_SUFFIX.to_string(),
            template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            style_suffix: DEFAULT_STYLE_SUFFIX.to_string(),
        }
    }
}

impl SuffixConfig {
    /// Suffix configured for `role`, without any leading dot
    pub fn suffix(&self, role: Role) -> &str {
        let raw = match role {
            Role::Component => &self.component_suffix,
            Role::Template => &self.template_suffix,
            Role::Style => &self.style_suffix,
        };
        raw.trim().trim_start_matches('.')
    }

    /// Replace the suffix for a single role
    pub fn set_suffix(&mut self, role: Role, suffix: impl Into<String>) {
        let slot = match role {
            Role::Component => &mut self.component_suffix,
            Role::Template => &mut self.template_suffix,
            Role::Style => &mut self.style_suffix,
        };
        *slot = suffix.into();
    }

    /// Pairs of roles sharing the same suffix
    pub fn duplicates(&self) -> Vec<(Role, Role)> {
        let mut pairs = Vec::new();
        for (i, a) in ROLE_ORDER.iter().enumerate() {
            for b in &ROLE_ORDER[i + 1..] {
                if self.suffix(*a) == self.suffix(*b) {
                    pairs.push((*a, *b));
                }
            }
        }
        pairs
    }
}

/// Code actions configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CodeActionsConfig {
    /// Offer "Go to ..." code actions
    pub enabled: bool,
}

impl Default for CodeActionsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Parse configuration from initialization options
    pub fn from_init_options(options: Option<serde_json::Value>) -> Self {
        match options {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// Parse configuration from a `workspace/didChangeConfiguration` payload.
    ///
    /// Clients usually send every extension's settings; ours live under the
    /// `angunav` key. A payload without that key is read as our settings.
    pub fn from_settings(settings: serde_json::Value) -> Self {
        let scoped = match settings.get("angunav") {
            Some(section) => section.clone(),
            None => settings,
        };
        Self::from_init_options(Some(scoped))
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
