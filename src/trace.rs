use crate::host::{FocusPurpose, HostCommand};
use crate::keyboard::describe;
use crate::menu::{ActionResponse, MenuAction};

fn purpose_label(purpose: FocusPurpose) -> &'static str {
    match purpose {
        FocusPurpose::SelectStart => "selection start",
        FocusPurpose::SelectEnd => "selection end",
        FocusPurpose::FinishSelection => "final selection end",
    }
}

/// One console line describing a command sent to the host.
pub fn command_line(command: &HostCommand) -> String {
    match command {
        HostCommand::RequestFocus(request) => {
            format!("Focus? ({})", purpose_label(request.purpose))
        }
        HostCommand::SetDocumentSelection(sel) => format!(
            "Select {}[{}] -> {}[{}]",
            sel.anchor_node, sel.anchor_offset, sel.focus_node, sel.focus_offset
        ),
        HostCommand::SimulateKeyPress(key) => format!("Key {}", describe(*key)),
        HostCommand::AddSelectionListener(node) => format!("Listen {node}"),
        HostCommand::RemoveSelectionListener(node) => format!("Unlisten {node}"),
        HostCommand::AddClipboardListener => "Listen clipboard".to_string(),
        HostCommand::EnterKeyboard => "Keyboard".to_string(),
        HostCommand::ToggleDictation => "Dictation".to_string(),
    }
}

pub fn action_line(action: MenuAction, response: ActionResponse) -> String {
    format!("Action {action:?} -> {response:?}")
}

pub fn print_trace_line(line: &str) {
    const RESET: &str = "\x1b[0m";
    const ACTION: &str = "\x1b[1m";
    const KEY: &str = "\x1b[34m";
    const SELECT: &str = "\x1b[33m";

    if let Some(rest) = line.strip_prefix("Action") {
        eprintln!("{ACTION}Action{RESET}{rest}");
    } else if let Some(rest) = line.strip_prefix("Key") {
        eprintln!("{KEY}Key{RESET}{rest}");
    } else if let Some(rest) = line.strip_prefix("Select") {
        eprintln!("{SELECT}Select{RESET}{rest}");
    } else {
        eprintln!("  {line}");
    }
}
