//! Which "go to" commands make sense for a file
//!
//! The flags are advisory. They only check the file's own role and never
//! probe the filesystem, so a flag can be set for a sibling that does not
//! exist. Navigation itself never reads them.

use std::path::Path;

use serde::Serialize;

use crate::config::SuffixConfig;
use crate::resolve::has_role;
use crate::role::{ROLE_ORDER, Role};

/// One flag per role: set when the file has some *other* role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityFlags {
    pub can_navigate_to_component: bool,
    pub can_navigate_to_template: bool,
    pub can_navigate_to_style: bool,
}

impl VisibilityFlags {
    pub fn get(&self, role: Role) -> bool {
        match role {
            Role::Component => self.can_navigate_to_component,
            Role::Template => self.can_navigate_to_template,
            Role::Style => self.can_navigate_to_style,
        }
    }

    /// Roles whose flag is set, in [`ROLE_ORDER`]
    pub fn enabled_roles(&self) -> impl Iterator<Item = Role> + '_ {
        ROLE_ORDER.into_iter().filter(|role| self.get(*role))
    }
}

/// Compute the flags for `path`
pub fn visibility_flags(path: &Path, suffixes: &SuffixConfig) -> VisibilityFlags {
    let other_role = |target: Role| {
        ROLE_ORDER
            .into_iter()
            .filter(|role| *role != target)
            .any(|role| has_role(path, role, suffixes))
    };

    VisibilityFlags {
        can_navigate_to_component: other_role(Role::Component),
        can_navigate_to_template: other_role(Role::Template),
        can_navigate_to_style: other_role(Role::Style),
    }
}
