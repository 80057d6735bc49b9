//! Seam between the navigator and the editor it runs in
//!
//! The navigator never owns editor state. It asks the host for the active
//! file, asks it to open documents, and hands it messages to show. It
//! reads its suffix configuration from a [`SuffixSource`] once per
//! operation, so edits to the settings apply to the very next command.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::config::{Config, SuffixConfig};
use crate::error::Severity;

/// Editor-side collaborator of the navigator
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Absolute path of the file currently focused, if any
    fn active_file(&self) -> Option<PathBuf>;

    /// Ask the editor to open `path` as the active document
    async fn open_document(&self, path: &Path) -> anyhow::Result<()>;

    /// Show a message to the user
    async fn notify(&self, severity: Severity, message: &str);
}

/// Provider of the current suffix configuration
pub trait SuffixSource: Send + Sync {
    fn suffixes(&self) -> SuffixConfig;
}

impl SuffixSource for SuffixConfig {
    fn suffixes(&self) -> SuffixConfig {
        self.clone()
    }
}

impl SuffixSource for RwLock<Config> {
    fn suffixes(&self) -> SuffixConfig {
        self.read()
            .map(|c| c.suffixes.clone())
            .unwrap_or_default()
    }
}
