//! Code actions provider for jumping to related component files

use tower_lsp::lsp_types::*;

use crate::commands::NavCommand;
use crate::document::DocumentState;
use crate::role::Direction;

/// Create the navigation actions offered for a document.
///
/// One "Go to ..." action per role the visibility flags allow, then the
/// next/previous actions when the document belongs to a component.
pub fn create_code_actions(uri: &Url, doc: &DocumentState) -> Vec<CodeActionOrCommand> {
    let direct = doc.flags.enabled_roles().map(NavCommand::To);

    let cyclic = doc
        .role
        .into_iter()
        .flat_map(|_| [Direction::Next, Direction::Prev])
        .map(NavCommand::Cycle);

    direct
        .chain(cyclic)
        .map(|cmd| create_command(uri, cmd))
        .collect()
}

fn create_command(uri: &Url, cmd: NavCommand) -> CodeActionOrCommand {
    CodeActionOrCommand::Command(Command {
        title: cmd.title().to_string(),
        command: cmd.name().to_string(),
        arguments: Some(vec![serde_json::Value::String(uri.to_string())]),
    })
}
