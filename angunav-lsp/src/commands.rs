//! Commands exposed through `workspace/executeCommand`

use crate::role::{Direction, Role};

pub const NAVIGATE_TO_COMPONENT: &str = "angunav.navigateToComponent";
pub const NAVIGATE_TO_TEMPLATE: &str = "angunav.navigateToTemplate";
pub const NAVIGATE_TO_STYLE: &str = "angunav.navigateToStyle";
pub const NEXT_CYCLIC_NAVIGATION: &str = "angunav.nextCyclicNavigation";
pub const PREV_CYCLIC_NAVIGATION: &str = "angunav.prevCyclicNavigation";
/// Returns the visibility flags of the active document
pub const VISIBILITY: &str = "angunav.visibility";

/// A navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    To(Role),
    Cycle(Direction),
}

impl NavCommand {
    pub const ALL: [NavCommand; 5] = [
        NavCommand::To(Role::Component),
        NavCommand::To(Role::Template),
        NavCommand::To(Role::Style),
        NavCommand::Cycle(Direction::Next),
        NavCommand::Cycle(Direction::Prev),
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            NavCommand::To(Role::Component) => NAVIGATE_TO_COMPONENT,
            NavCommand::To(Role::Template) => NAVIGATE_TO_TEMPLATE,
            NavCommand::To(Role::Style) => NAVIGATE_TO_STYLE,
            NavCommand::Cycle(Direction::Next) => NEXT_CYCLIC_NAVIGATION,
            NavCommand::Cycle(Direction::Prev) => PREV_CYCLIC_NAVIGATION,
        }
    }

    /// Title shown in the client's code action menu
    pub fn title(self) -> &'static str {
        match self {
            NavCommand::To(Role::Component) => "Go to component",
            NavCommand::To(Role::Template) => "Go to template",
            NavCommand::To(Role::Style) => "Go to style",
            NavCommand::Cycle(Direction::Next) => "Go to next related file",
            NavCommand::Cycle(Direction::Prev) => "Go to previous related file",
        }
    }
}

/// Every command name advertised in the server capabilities
pub fn command_names() -> Vec<String> {
    NavCommand::ALL
        .iter()
        .map(|cmd| cmd.name().to_string())
        .chain(std::iter::once(VISIBILITY.to_string()))
        .collect()
}
