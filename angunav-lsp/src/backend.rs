//! Language server backend: document tracking, commands and code actions

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use dashmap::DashMap;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::commands::{self, NavCommand};
use crate::config::Config;
use crate::document::DocumentState;
use crate::error::{NavigationError, Severity};
use crate::host::{EditorHost, SuffixSource};
use crate::navigator::{Navigator, Outcome};
use crate::providers::code_actions::create_code_actions;
use crate::visibility::visibility_flags;

pub struct AngunavBackend {
    client: Client,
    /// Configuration, read afresh by every command
    config: RwLock<Config>,
    /// Open documents and their advisory navigation state
    documents: DashMap<Url, DocumentState>,
    /// Document the user is currently working in
    active: RwLock<Option<Url>>,
}

/// [`EditorHost`] backed by the LSP client
struct LspHost<'a> {
    client: &'a Client,
    active: Option<PathBuf>,
}

#[async_trait]
impl EditorHost for LspHost<'_> {
    fn active_file(&self) -> Option<PathBuf> {
        self.active.clone()
    }

    async fn open_document(&self, path: &Path) -> anyhow::Result<()> {
        let uri = Url::from_file_path(path)
            .map_err(|_| anyhow::anyhow!("Not an absolute path: {}", path.display()))?;

        let shown = self
            .client
            .show_document(ShowDocumentParams {
                uri,
                external: Some(false),
                take_focus: Some(true),
                selection: None,
            })
            .await
            .map_err(|e| anyhow::anyhow!("window/showDocument failed: {e}"))?;

        if !shown {
            anyhow::bail!("Client declined to show {}", path.display());
        }
        Ok(())
    }

    async fn notify(&self, severity: Severity, message: &str) {
        let typ = match severity {
            Severity::Info => MessageType::INFO,
            Severity::Warning => MessageType::WARNING,
            Severity::Error => MessageType::ERROR,
        };
        self.client.show_message(typ, message).await;
    }
}

impl AngunavBackend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config: RwLock::new(Config::default()),
            documents: DashMap::new(),
            active: RwLock::new(None),
        }
    }

    /// Replace the configuration, warning about suffixes shared by two roles
    fn set_config(&self, config: Config) {
        for (a, b) in config.suffixes.duplicates() {
            tracing::warn!(
                "The {} and {} roles share the suffix {:?}; navigation between them is ambiguous",
                a,
                b,
                config.suffixes.suffix(a)
            );
        }
        tracing::info!("Configuration: {:?}", config);

        match self.config.write() {
            Ok(mut cfg) => *cfg = config,
            Err(e) => {
                tracing::error!("Failed to store configuration: {}", e);
                return;
            }
        }

        // Flags depend on the suffixes
        let suffixes = self.config.suffixes();
        for mut doc in self.documents.iter_mut() {
            let path = doc.path.clone();
            *doc = DocumentState::new(path, &suffixes);
        }
    }

    /// Handle the active document changing to `uri`.
    ///
    /// Recomputes the document's role and visibility flags from the current
    /// configuration. Non-file URIs are ignored.
    pub fn active_document_changed(&self, uri: &Url) {
        let Ok(path) = uri.to_file_path() else {
            tracing::debug!("Ignoring non-file document {}", uri);
            return;
        };

        let doc = DocumentState::new(path, &self.config.suffixes());
        tracing::debug!(
            "Active document {} (role: {:?}, flags: {:?})",
            uri,
            doc.role,
            doc.flags
        );
        self.documents.insert(uri.clone(), doc);

        if let Ok(mut active) = self.active.write() {
            *active = Some(uri.clone());
        }
    }

    fn active_path(&self) -> Option<PathBuf> {
        let active = self.active.read().ok()?.clone()?;
        active.to_file_path().ok()
    }

    /// Run a navigation command on behalf of the client
    async fn run_navigation(&self, command: NavCommand) -> serde_json::Value {
        let host = LspHost {
            client: &self.client,
            active: self.active_path(),
        };
        let navigator = Navigator::new(&host, &self.config);

        let result = match command {
            NavCommand::To(role) => navigator.navigate_to(role).await,
            NavCommand::Cycle(direction) => navigator.navigate_cyclic(direction).await,
        };

        self.navigation_finished(command, host.active.as_deref(), result)
    }

    /// Record the outcome of a navigation and build the command result.
    ///
    /// An opened file becomes the active document straight away: the client
    /// sends no `didOpen` for a file it already has open.
    fn navigation_finished(
        &self,
        command: NavCommand,
        active: Option<&Path>,
        result: std::result::Result<Outcome, NavigationError>,
    ) -> serde_json::Value {
        match result {
            Ok(Outcome::Opened(path)) => {
                tracing::info!("{} opened {}", command.name(), path.display());
                match Url::from_file_path(&path) {
                    Ok(uri) => self.active_document_changed(&uri),
                    Err(()) => tracing::warn!("Cannot track {} as a document", path.display()),
                }
                serde_json::json!({ "ok": true, "path": path.display().to_string() })
            }
            Ok(Outcome::AlreadyThere(_)) => {
                let path = active.map(|p| p.display().to_string());
                serde_json::json!({ "ok": true, "path": path })
            }
            Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }),
        }
    }

    /// Visibility flags of the active document
    fn visibility_report(&self) -> serde_json::Value {
        let Some(uri) = self.active.read().ok().and_then(|a| a.clone()) else {
            return serde_json::json!({ "error": "No active editor!" });
        };

        let flags = match self.documents.get(&uri) {
            Some(doc) => doc.flags,
            None => match uri.to_file_path() {
                Ok(path) => visibility_flags(&path, &self.config.suffixes()),
                Err(()) => Default::default(),
            },
        };

        serde_json::to_value(flags).unwrap_or(serde_json::Value::Null)
    }
}

/// Document URI passed as the first command argument, either bare or as
/// `{"uri": "..."}`
fn uri_argument(arguments: &[serde_json::Value]) -> Option<Url> {
    let first = arguments.first()?;
    let raw = first
        .as_str()
        .or_else(|| first.get("uri").and_then(|v| v.as_str()))?;
    Url::parse(raw).ok()
}

#[tower_lsp::async_trait]
impl LanguageServer for AngunavBackend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        // Parse configuration from initialization options
        let config = Config::from_init_options(params.initialization_options);
        self.set_config(config);

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "angunav-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::INCREMENTAL),
                        ..Default::default()
                    },
                )),
                code_action_provider: Some(CodeActionProviderCapability::Simple(true)),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: commands::command_names(),
                    ..Default::default()
                }),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "angunav LSP initialized")
            .await;
        tracing::info!("angunav LSP initialized");
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("angunav LSP shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document opened: {}", uri);
        self.active_document_changed(&uri);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // Editing a document means it has focus
        self.active_document_changed(&params.text_document.uri);
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::debug!("Document closed: {}", uri);
        self.documents.remove(&uri);

        if let Ok(mut active) = self.active.write()
            && *active == Some(uri.clone())
        {
            *active = None;
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        tracing::debug!("Configuration changed");
        self.set_config(Config::from_settings(params.settings));
    }

    async fn code_action(&self, params: CodeActionParams) -> Result<Option<CodeActionResponse>> {
        let uri = &params.text_document.uri;

        let enabled = self
            .config
            .read()
            .map(|c| c.code_actions.enabled)
            .unwrap_or(true);
        if !enabled {
            return Ok(Some(vec![]));
        }

        // Asking for actions means the document has focus
        self.active_document_changed(uri);

        let Some(doc) = self.documents.get(uri) else {
            return Ok(Some(vec![]));
        };

        Ok(Some(create_code_actions(uri, &doc)))
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> Result<Option<serde_json::Value>> {
        if let Some(uri) = uri_argument(&params.arguments) {
            self.active_document_changed(&uri);
        }

        if params.command == commands::VISIBILITY {
            return Ok(Some(self.visibility_report()));
        }

        match NavCommand::from_name(&params.command) {
            Some(command) => Ok(Some(self.run_navigation(command).await)),
            None => {
                tracing::warn!("Unknown command: {}", params.command);
                Ok(None)
            }
        }
    }
}
