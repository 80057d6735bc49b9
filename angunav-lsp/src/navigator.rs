//! Jumping between a component's logic, template and style files
//!
//! Every operation starts from scratch: it asks the host for the active
//! file, reads the suffix configuration once, computes the sibling path,
//! checks it exists and asks the host to open it. Nothing is kept between
//! calls.

use std::path::{Path, PathBuf};

use crate::config::SuffixConfig;
use crate::error::{NavigationError, Severity};
use crate::host::{EditorHost, SuffixSource};
use crate::resolve::{candidate_path, has_role, role_of};
use crate::role::{Direction, Role};

/// Successful result of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The sibling at this path was opened
    Opened(PathBuf),
    /// The active file already is the file for this role; nothing was opened
    AlreadyThere(Role),
}

pub struct Navigator<'a, H: EditorHost, S: SuffixSource + ?Sized> {
    host: &'a H,
    source: &'a S,
}

impl<'a, H: EditorHost, S: SuffixSource + ?Sized> Navigator<'a, H, S> {
    pub fn new(host: &'a H, source: &'a S) -> Self {
        Self { host, source }
    }

    /// Open the active file's sibling for `role`.
    ///
    /// Failures are reported to the host before being returned.
    pub async fn navigate_to(&self, role: Role) -> Result<Outcome, NavigationError> {
        let result = match self.host.active_file() {
            Some(active) => {
                let suffixes = self.source.suffixes();
                self.open_sibling(&active, role, &suffixes).await
            }
            None => Err(NavigationError::NoActiveEditor),
        };
        self.report(result).await
    }

    /// Open the next (or previous) file in the component trio.
    ///
    /// If the neighbouring file does not exist a warning naming it is shown
    /// and the remaining role is tried, so this resolves whenever any sibling
    /// exists.
    pub async fn navigate_cyclic(&self, direction: Direction) -> Result<Outcome, NavigationError> {
        let result = self.cycle(direction).await;
        self.report(result).await
    }

    async fn cycle(&self, direction: Direction) -> Result<Outcome, NavigationError> {
        let active = self
            .host
            .active_file()
            .ok_or(NavigationError::NoActiveEditor)?;
        let suffixes = self.source.suffixes();

        let current = role_of(&active, &suffixes)
            .ok_or_else(|| NavigationError::UnrecognizedRole { path: active.clone() })?;

        for hop in 1..=2 {
            let target = current.offset(hop * direction.step());
            match self.open_sibling(&active, target, &suffixes).await {
                Err(e @ NavigationError::TargetMissing { .. }) => {
                    tracing::debug!("No {} file for hop {}: {}", target, hop, e);
                    self.host.notify(e.severity(), &e.to_string()).await;
                }
                other => return other,
            }
        }

        Err(NavigationError::NoCyclicTarget)
    }

    async fn open_sibling(
        &self,
        active: &Path,
        role: Role,
        suffixes: &SuffixConfig,
    ) -> Result<Outcome, NavigationError> {
        if has_role(active, role, suffixes) {
            return Ok(Outcome::AlreadyThere(role));
        }

        let candidate = candidate_path(active, role, suffixes);
        if !is_file(&candidate).await {
            return Err(NavigationError::TargetMissing { path: candidate });
        }

        tracing::debug!("Opening {} for {}", candidate.display(), active.display());
        self.host
            .open_document(&candidate)
            .await
            .map_err(|e| NavigationError::OpenFailed {
                path: candidate.clone(),
                reason: e.to_string(),
            })?;

        Ok(Outcome::Opened(candidate))
    }

    async fn report(
        &self,
        result: Result<Outcome, NavigationError>,
    ) -> Result<Outcome, NavigationError> {
        match &result {
            Ok(Outcome::AlreadyThere(role)) => {
                let message = format!("You're already in the {role} file.");
                self.host.notify(Severity::Info, &message).await;
            }
            Ok(Outcome::Opened(_)) => {}
            Err(e) => {
                tracing::debug!("Navigation failed: {}", e);
                self.host.notify(e.severity(), &e.to_string()).await;
            }
        }
        result
    }
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
