use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keyboard::KeyPress;

/// Opaque handle to a node owned by the host's accessibility tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field-{}", self.0)
    }
}

/// The focused node as reported by the host, with its current text selection
/// offsets when it has any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusedNode {
    pub id: NodeId,
    pub text_sel_start: Option<usize>,
    pub text_sel_end: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusPurpose {
    SelectStart,
    /// Extend the selection to the focus after a caret movement.
    SelectEnd,
    /// Commit the selection and end the gesture.
    FinishSelection,
}

/// A focus query. The host echoes it back unchanged in [`HostEvent::Focus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusRequest {
    pub purpose: FocusPurpose,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSelection {
    pub anchor_node: NodeId,
    pub anchor_offset: usize,
    pub focus_node: NodeId,
    pub focus_offset: usize,
}

impl DocumentSelection {
    pub fn collapsed(node: NodeId, offset: usize) -> Self {
        Self {
            anchor_node: node,
            anchor_offset: offset,
            focus_node: node,
            focus_offset: offset,
        }
    }
}

/// Notifications delivered by the host, in the order it fires them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Focus {
        request: FocusRequest,
        node: Option<FocusedNode>,
    },
    TextSelectionChanged {
        node: NodeId,
    },
    ClipboardDataChanged,
}

/// Commands sent to the host. None of them return anything; results, if any,
/// come back later as [`HostEvent`]s.
pub trait TextHost {
    fn request_focus(&mut self, request: FocusRequest);
    fn set_document_selection(&mut self, selection: DocumentSelection);
    fn simulate_key_press(&mut self, key: KeyPress);
    fn add_selection_listener(&mut self, node: NodeId);
    fn remove_selection_listener(&mut self, node: NodeId);
    fn add_clipboard_listener(&mut self);
    fn enter_keyboard(&mut self);
    fn toggle_dictation(&mut self);
}

/// Record of a command sent to a host. Used for tracing and by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum HostCommand {
    RequestFocus(FocusRequest),
    SetDocumentSelection(DocumentSelection),
    SimulateKeyPress(KeyPress),
    AddSelectionListener(NodeId),
    RemoveSelectionListener(NodeId),
    AddClipboardListener,
    EnterKeyboard,
    ToggleDictation,
}
