//! Component roles and their cyclic ordering

use std::fmt;

/// Logical facet of a multi-file UI component.
///
/// Each variant maps to one configured filename suffix and decides which
/// sibling file a navigation command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Logic file (e.g. `foo.component.ts`)
    Component,
    /// Markup file (e.g. `foo.component.html`)
    Template,
    /// Style file (e.g. `foo.component.scss`)
    Style,
}

/// Fixed order used for next/previous navigation.
///
/// The position of each role here defines what "next" and "previous" mean.
pub const ROLE_ORDER: [Role; 3] = [Role::Component, Role::Template, Role::Style];

/// Direction of a cyclic navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Signed step through [`ROLE_ORDER`]
    pub fn step(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Prev => -1,
        }
    }
}

impl Role {
    /// Index of this role in [`ROLE_ORDER`]
    pub fn index(self) -> usize {
        match self {
            Role::Component => 0,
            Role::Template => 1,
            Role::Style => 2,
        }
    }

    /// Role reached by moving `offset` positions through [`ROLE_ORDER`],
    /// wrapping around in both directions.
    pub fn offset(self, offset: isize) -> Role {
        let len = ROLE_ORDER.len() as isize;
        let index = (self.index() as isize + offset).rem_euclid(len);
        ROLE_ORDER[index as usize]
    }

    /// Lowercase name, as shown in messages
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Component => "component",
            Role::Template => "template",
            Role::Style => "style",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
