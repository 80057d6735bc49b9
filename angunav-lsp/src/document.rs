//! Per-document navigation state
//!
//! Recomputed whenever a document becomes active. The role and flags are
//! advisory; navigation commands recompute everything from the path.

use std::path::PathBuf;

use crate::config::SuffixConfig;
use crate::resolve::role_of;
use crate::role::Role;
use crate::visibility::{VisibilityFlags, visibility_flags};

#[derive(Debug, Clone)]
pub struct DocumentState {
    pub path: PathBuf,
    pub role: Option<Role>,
    pub flags: VisibilityFlags,
}

impl DocumentState {
    pub fn new(path: PathBuf, suffixes: &SuffixConfig) -> Self {
        let role = role_of(&path, suffixes);
        let flags = visibility_flags(&path, suffixes);
        Self { path, role, flags }
    }
}
