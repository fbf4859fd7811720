use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::host::{
    DocumentSelection, FocusPurpose, FocusRequest, FocusedNode, NodeId, TextHost,
};
use crate::keyboard::{KeyPress, KEY_DOWN, KEY_END, KEY_HOME, KEY_LEFT, KEY_RIGHT, KEY_UP};

/// Caret movements relayed to the host as simulated key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMovement {
    ForwardOneChar,
    BackwardOneChar,
    ForwardOneWord,
    BackwardOneWord,
    UpOneLine,
    DownOneLine,
    ToBeginning,
    ToEnd,
}

impl TextMovement {
    pub fn key(self) -> KeyPress {
        match self {
            TextMovement::ForwardOneChar => KeyPress::plain(KEY_RIGHT),
            TextMovement::BackwardOneChar => KeyPress::plain(KEY_LEFT),
            TextMovement::ForwardOneWord => KeyPress::ctrl(KEY_RIGHT),
            TextMovement::BackwardOneWord => KeyPress::ctrl(KEY_LEFT),
            TextMovement::UpOneLine => KeyPress::plain(KEY_UP),
            TextMovement::DownOneLine => KeyPress::plain(KEY_DOWN),
            TextMovement::ToBeginning => KeyPress::ctrl(KEY_HOME),
            TextMovement::ToEnd => KeyPress::ctrl(KEY_END),
        }
    }

    /// Whether the caret must first be collapsed onto the selection end.
    ///
    /// Word and boundary jumps extend from wherever the host left the caret, so
    /// they skip the collapse.
    pub fn resets_cursor(self) -> bool {
        matches!(
            self,
            TextMovement::ForwardOneChar
                | TextMovement::BackwardOneChar
                | TextMovement::UpOneLine
                | TextMovement::DownOneLine
        )
    }
}

/// Tracks the anchor and focus of an extended text selection made by relaying
/// key presses into a host text field.
///
/// Offsets are `None` when unset. Every host interaction is fire-and-forget:
/// focus lookups come back later through [`TextNavigationManager::handle_focus`]
/// and selection changes through [`TextNavigationManager::on_nav_change`].
#[derive(Debug, Default)]
pub struct TextNavigationManager {
    selection_start_index: Option<usize>,
    selection_end_index: Option<usize>,
    selection_start_node: Option<NodeId>,
    selection_end_node: Option<NodeId>,
    currently_selecting: bool,
    selection_exists: bool,
    clipboard_has_data: bool,

    listening_on: Option<NodeId>,
    generation: u64,
}

impl TextNavigationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a selection gesture is active and its anchor offset is known.
    pub fn currently_selecting(&self) -> bool {
        self.currently_selecting && self.selection_start_index.is_some()
    }

    pub fn sel_start_index(&self) -> Option<usize> {
        self.selection_start_index
    }

    pub fn sel_end_index(&self) -> Option<usize> {
        self.selection_end_index
    }

    pub fn sel_start_node(&self) -> Option<NodeId> {
        self.selection_start_node
    }

    pub fn sel_end_node(&self) -> Option<NodeId> {
        self.selection_end_node
    }

    pub fn reset_sel_start_index(&mut self) {
        self.selection_start_index = None;
    }

    pub fn set_sel_start_index_and_node(&mut self, start_index: usize, node: NodeId) {
        self.selection_start_index = Some(start_index);
        self.selection_start_node = Some(node);
    }

    pub fn selection_exists(&self) -> bool {
        self.selection_exists
    }

    pub fn set_selection_exists(&mut self, exists: bool) {
        self.selection_exists = exists;
    }

    pub fn clipboard_has_data(&self) -> bool {
        self.clipboard_has_data
    }

    /// Node the selection-change listener is currently attached to.
    pub fn listening_on(&self) -> Option<NodeId> {
        self.listening_on
    }

    pub fn jump_to_beginning<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.move_cursor(TextMovement::ToBeginning, host);
    }

    pub fn jump_to_end<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.move_cursor(TextMovement::ToEnd, host);
    }

    pub fn move_backward_one_char<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.move_cursor(TextMovement::BackwardOneChar, host);
    }

    pub fn move_forward_one_char<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.move_cursor(TextMovement::ForwardOneChar, host);
    }

    pub fn move_backward_one_word<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.move_cursor(TextMovement::BackwardOneWord, host);
    }

    pub fn move_forward_one_word<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.move_cursor(TextMovement::ForwardOneWord, host);
    }

    pub fn move_up_one_line<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.move_cursor(TextMovement::UpOneLine, host);
    }

    pub fn move_down_one_line<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.move_cursor(TextMovement::DownOneLine, host);
    }

    pub fn move_cursor<H: TextHost + ?Sized>(&mut self, movement: TextMovement, host: &mut H) {
        if self.currently_selecting {
            self.setup_dynamic_selection(movement.resets_cursor(), host);
        }
        host.simulate_key_press(movement.key());
    }

    /// Ends the gesture: detaches the listener, then clears both offsets.
    ///
    /// Focus lookups already in flight are not cancelled. Their responses are
    /// discarded when they arrive.
    pub fn reset_currently_selecting<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        self.detach_listener(host);
        self.currently_selecting = false;
        self.selection_start_index = None;
        self.selection_end_index = None;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Asks the host for the focused node and anchors the selection there.
    pub fn save_select_start<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        host.request_focus(self.focus_request(FocusPurpose::SelectStart));
    }

    /// Asks the host for the focused node, commits the selection up to it and
    /// ends the gesture.
    pub fn save_select_end<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        host.request_focus(self.focus_request(FocusPurpose::FinishSelection));
    }

    /// Handles a selection change fired on the node the listener is attached to.
    pub fn on_nav_change<H: TextHost + ?Sized>(&mut self, node: NodeId, host: &mut H) {
        if self.listening_on != Some(node) {
            debug!(%node, "ignoring selection change without an attached listener");
            return;
        }

        self.detach_listener(host);
        if self.currently_selecting {
            host.request_focus(self.focus_request(FocusPurpose::SelectEnd));
        }
    }

    /// Completes a focus lookup started by this manager.
    pub fn handle_focus<H: TextHost + ?Sized>(
        &mut self,
        request: FocusRequest,
        node: Option<FocusedNode>,
        host: &mut H,
    ) {
        if request.generation != self.generation {
            debug!(?request, "dropping focus response issued before a reset");
            return;
        }

        match request.purpose {
            FocusPurpose::SelectStart => {
                self.selection_start_node = node.map(|n| n.id);
                self.selection_start_index = node.and_then(|n| n.text_sel_start);
                self.currently_selecting = true;
            }
            FocusPurpose::SelectEnd | FocusPurpose::FinishSelection => {
                if !self.currently_selecting {
                    debug!(?request, "dropping focus response: no selection in progress");
                    return;
                }

                self.selection_end_node = node.map(|n| n.id);
                self.selection_end_index = node.and_then(|n| n.text_sel_end);
                self.save_selection(host);

                if request.purpose == FocusPurpose::FinishSelection {
                    self.detach_listener(host);
                    self.currently_selecting = false;
                }
            }
        }
    }

    /// Records a clipboard change. Returns true so callers know the available
    /// actions changed.
    pub fn on_clipboard_data_changed(&mut self) -> bool {
        self.clipboard_has_data = true;
        true
    }

    fn focus_request(&self, purpose: FocusPurpose) -> FocusRequest {
        FocusRequest {
            purpose,
            generation: self.generation,
        }
    }

    fn save_selection<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        let (
            Some(anchor_node),
            Some(anchor_offset),
            Some(focus_node),
            Some(focus_offset),
        ) = (
            self.selection_start_node,
            self.selection_start_index,
            self.selection_end_node,
            self.selection_end_index,
        )
        else {
            warn!(
                start = ?self.selection_start_index,
                end = ?self.selection_end_index,
                "selection bounds are not set properly; skipping commit"
            );
            return;
        };

        host.set_document_selection(DocumentSelection {
            anchor_node,
            anchor_offset,
            focus_node,
            focus_offset,
        });
        self.selection_exists = anchor_node != focus_node || anchor_offset != focus_offset;
    }

    fn setup_dynamic_selection<H: TextHost + ?Sized>(&mut self, reset_cursor: bool, host: &mut H) {
        if reset_cursor && self.currently_selecting() {
            if let (Some(node), Some(offset)) = (self.selection_end_node, self.selection_end_index) {
                host.set_document_selection(DocumentSelection::collapsed(node, offset));
            }
        }
        self.attach_listener(host);
    }

    fn attach_listener<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        let Some(node) = self.selection_start_node else {
            return;
        };
        if self.listening_on == Some(node) {
            return;
        }
        self.detach_listener(host);
        host.add_selection_listener(node);
        self.listening_on = Some(node);
    }

    fn detach_listener<H: TextHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(node) = self.listening_on.take() {
            host.remove_selection_listener(node);
        }
    }
}
