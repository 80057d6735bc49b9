//! Path arithmetic for sibling files
//!
//! A file has a role when its path ends with `"." + suffix`. The base path
//! of a file is its path with the first matching known suffix removed
//! (checked in [`ROLE_ORDER`]); a file with no known suffix is its own base.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::SuffixConfig;
use crate::role::{ROLE_ORDER, Role};

/// Whether `path` ends with `"." + suffix`.
///
/// Empty suffixes never match, otherwise every path ending in a dot would.
fn has_suffix(path: &str, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .strip_suffix(suffix)
            .is_some_and(|rest| rest.ends_with('.'))
}

/// Whether `path` is the file for `role`
pub fn has_role(path: &Path, role: Role, suffixes: &SuffixConfig) -> bool {
    path.to_str()
        .is_some_and(|p| has_suffix(p, suffixes.suffix(role)))
}

/// First role in [`ROLE_ORDER`] whose suffix `path` ends with
pub fn role_of(path: &Path, suffixes: &SuffixConfig) -> Option<Role> {
    ROLE_ORDER
        .into_iter()
        .find(|role| has_role(path, *role, suffixes))
}

/// `path` with its known suffix (and the dot before it) removed.
///
/// Returns `path` unchanged when none of the configured suffixes match.
pub fn base_path(path: &Path, suffixes: &SuffixConfig) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };

    for role in ROLE_ORDER {
        let suffix = suffixes.suffix(role);
        if has_suffix(s, suffix) {
            let cut = s.len() - suffix.len() - 1;
            return PathBuf::from(&s[..cut]);
        }
    }

    path.to_path_buf()
}

/// Path of the `target` sibling of `path`: base path + "." + target suffix
pub fn candidate_path(path: &Path, target: Role, suffixes: &SuffixConfig) -> PathBuf {
    let mut candidate = OsString::from(base_path(path, suffixes));
    candidate.push(".");
    candidate.push(suffixes.suffix(target));
    PathBuf::from(candidate)
}
