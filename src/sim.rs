use std::collections::BTreeSet;
use std::sync::mpsc::Sender;

use tracing::{debug, warn};

use crate::host::{
    DocumentSelection, FocusRequest, FocusedNode, HostCommand, HostEvent, NodeId, TextHost,
};
use crate::keyboard::{
    KeyPress, KEY_C, KEY_DOWN, KEY_END, KEY_HOME, KEY_LEFT, KEY_RIGHT, KEY_UP, KEY_V, KEY_X,
};
use crate::model::FieldSummary;
use crate::word_utils::{next_word_end, previous_word_start};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct SimField {
    buf: Vec<char>,
    anchor: usize,
    focus: usize,
}

impl SimField {
    fn new(text: &str, caret: Option<usize>) -> Self {
        let buf: Vec<char> = text.chars().collect();
        let caret = caret.unwrap_or(buf.len()).min(buf.len());
        Self {
            buf,
            anchor: caret,
            focus: caret,
        }
    }

    fn text(&self) -> String {
        self.buf.iter().collect()
    }

    fn range(&self) -> (usize, usize) {
        (self.anchor.min(self.focus), self.anchor.max(self.focus))
    }

    fn has_selection(&self) -> bool {
        self.anchor != self.focus
    }

    fn selected_text(&self) -> String {
        let (start, end) = self.range();
        self.buf[start..end].iter().collect()
    }

    fn set_focus(&mut self, offset: usize, extend: bool) {
        self.focus = offset.min(self.buf.len());
        if !extend {
            self.anchor = self.focus;
        }
    }

    fn line_start(&self, offset: usize) -> usize {
        self.buf[..offset]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |idx| idx + 1)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.buf[offset..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.buf.len(), |idx| offset + idx)
    }

    fn move_left(&mut self, extend: bool) {
        if self.has_selection() && !extend {
            let (start, _) = self.range();
            self.set_focus(start, false);
            return;
        }
        self.set_focus(self.focus.saturating_sub(1), extend);
    }

    fn move_right(&mut self, extend: bool) {
        if self.has_selection() && !extend {
            let (_, end) = self.range();
            self.set_focus(end, false);
            return;
        }
        self.set_focus(self.focus + 1, extend);
    }

    fn move_word_left(&mut self, extend: bool) {
        let target = previous_word_start(&self.text(), self.focus);
        self.set_focus(target, extend);
    }

    fn move_word_right(&mut self, extend: bool) {
        let target = next_word_end(&self.text(), self.focus, None);
        self.set_focus(target, extend);
    }

    fn move_up(&mut self, extend: bool) {
        let start = self.line_start(self.focus);
        if start == 0 {
            self.set_focus(0, extend);
            return;
        }
        let column = self.focus - start;
        let prev_start = self.line_start(start - 1);
        let prev_len = (start - 1) - prev_start;
        self.set_focus(prev_start + column.min(prev_len), extend);
    }

    fn move_down(&mut self, extend: bool) {
        let end = self.line_end(self.focus);
        if end == self.buf.len() {
            self.set_focus(end, extend);
            return;
        }
        let column = self.focus - self.line_start(self.focus);
        let next_start = end + 1;
        let next_len = self.line_end(next_start) - next_start;
        self.set_focus(next_start + column.min(next_len), extend);
    }

    fn delete_selection(&mut self) {
        let (start, end) = self.range();
        self.buf.drain(start..end);
        self.set_focus(start, false);
    }

    fn insert(&mut self, text: &str) {
        self.delete_selection();
        for c in text.chars() {
            self.buf.insert(self.focus, c);
            self.focus += 1;
        }
        self.anchor = self.focus;
    }
}

/// In-memory host holding a set of editable text fields.
///
/// Keys behave like a native text field: Left/Right by char, Ctrl+Left/Right by
/// word, Up/Down by line, Ctrl+Home/End to either end, Ctrl+X/C/V against an
/// internal clipboard. Selection changes caused by keys are reported to
/// attached listeners; changes made through `set_document_selection` are not.
#[derive(Debug)]
pub struct SimHost {
    fields: Vec<SimField>,
    focused: Option<usize>,
    clipboard: Option<String>,
    selection_listeners: BTreeSet<NodeId>,
    clipboard_listener: bool,
    keyboard_open: bool,
    dictation_active: bool,
    events: Sender<HostEvent>,
    log: Vec<HostCommand>,
}

impl SimHost {
    pub fn new(events: Sender<HostEvent>) -> Self {
        Self {
            fields: Vec::new(),
            focused: None,
            clipboard: None,
            selection_listeners: BTreeSet::new(),
            clipboard_listener: false,
            keyboard_open: false,
            dictation_active: false,
            events,
            log: Vec::new(),
        }
    }

    /// Adds a text field and focuses it. `caret` defaults to the end of `text`.
    pub fn add_field(&mut self, text: &str, caret: Option<usize>) -> NodeId {
        self.fields.push(SimField::new(text, caret));
        let index = self.fields.len() - 1;
        self.focused = Some(index);
        node_id(index)
    }

    pub fn focus(&mut self, node: NodeId) -> bool {
        let index = node.0 as usize;
        if index >= self.fields.len() {
            return false;
        }
        self.focused = Some(index);
        true
    }

    pub fn focused_node(&self) -> Option<NodeId> {
        self.focused.map(node_id)
    }

    pub fn text(&self, node: NodeId) -> Option<String> {
        self.field(node).map(SimField::text)
    }

    /// `(anchor, focus)` offsets of the field's selection.
    pub fn selection(&self, node: NodeId) -> Option<(usize, usize)> {
        self.field(node).map(|f| (f.anchor, f.focus))
    }

    pub fn selected_text(&self, node: NodeId) -> Option<String> {
        self.field(node).map(SimField::selected_text)
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub fn is_listening(&self, node: NodeId) -> bool {
        self.selection_listeners.contains(&node)
    }

    pub fn keyboard_open(&self) -> bool {
        self.keyboard_open
    }

    pub fn dictation_active(&self) -> bool {
        self.dictation_active
    }

    pub fn commands(&self) -> &[HostCommand] {
        &self.log
    }

    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.log)
    }

    pub fn summaries(&self) -> Vec<FieldSummary> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| FieldSummary {
                id: node_id(index).to_string(),
                text: field.text(),
                anchor: field.anchor,
                focus: field.focus,
                selected_text: field.selected_text(),
            })
            .collect()
    }

    fn field(&self, node: NodeId) -> Option<&SimField> {
        self.fields.get(node.0 as usize)
    }

    fn emit(&self, event: HostEvent) {
        // A dropped receiver means nobody is listening anymore.
        let _ = self.events.send(event);
    }

    fn handle_key(&mut self, key: KeyPress) {
        let Some(index) = self.focused else {
            debug!(?key, "key press with no focused field");
            return;
        };
        let before = self.fields[index].clone();
        let mut clipboard_changed = false;

        let field = &mut self.fields[index];
        let extend = key.shift;
        match (key.keycode, key.ctrl) {
            (KEY_LEFT, false) => field.move_left(extend),
            (KEY_LEFT, true) => field.move_word_left(extend),
            (KEY_RIGHT, false) => field.move_right(extend),
            (KEY_RIGHT, true) => field.move_word_right(extend),
            (KEY_UP, _) => field.move_up(extend),
            (KEY_DOWN, _) => field.move_down(extend),
            (KEY_HOME, true) => field.set_focus(0, extend),
            (KEY_END, true) => field.set_focus(field.buf.len(), extend),
            (KEY_HOME, false) => field.set_focus(field.line_start(field.focus), extend),
            (KEY_END, false) => field.set_focus(field.line_end(field.focus), extend),
            (KEY_C, true) | (KEY_X, true) => {
                if field.has_selection() {
                    self.clipboard = Some(field.selected_text());
                    clipboard_changed = true;
                    if key.keycode == KEY_X {
                        field.delete_selection();
                    }
                }
            }
            (KEY_V, true) => {
                if let Some(text) = &self.clipboard {
                    field.insert(text);
                }
            }
            _ => debug!(?key, "unhandled key press"),
        }

        if clipboard_changed && self.clipboard_listener {
            self.emit(HostEvent::ClipboardDataChanged);
        }

        let node = node_id(index);
        if self.fields[index] != before && self.selection_listeners.contains(&node) {
            self.emit(HostEvent::TextSelectionChanged { node });
        }
    }
}

fn node_id(index: usize) -> NodeId {
    NodeId(u32::try_from(index).unwrap_or(u32::MAX))
}

impl TextHost for SimHost {
    fn request_focus(&mut self, request: FocusRequest) {
        self.log.push(HostCommand::RequestFocus(request));
        let node = self.focused.map(|index| {
            let field = &self.fields[index];
            FocusedNode {
                id: node_id(index),
                text_sel_start: Some(field.anchor),
                text_sel_end: Some(field.focus),
            }
        });
        self.emit(HostEvent::Focus { request, node });
    }

    fn set_document_selection(&mut self, selection: DocumentSelection) {
        self.log.push(HostCommand::SetDocumentSelection(selection));
        if selection.anchor_node != selection.focus_node {
            warn!(?selection, "selections spanning fields are not supported");
            return;
        }
        let Some(field) = self.fields.get_mut(selection.focus_node.0 as usize) else {
            warn!(?selection, "selection targets an unknown field");
            return;
        };
        let len = field.buf.len();
        field.anchor = selection.anchor_offset.min(len);
        field.focus = selection.focus_offset.min(len);
    }

    fn simulate_key_press(&mut self, key: KeyPress) {
        self.log.push(HostCommand::SimulateKeyPress(key));
        self.handle_key(key);
    }

    fn add_selection_listener(&mut self, node: NodeId) {
        self.log.push(HostCommand::AddSelectionListener(node));
        self.selection_listeners.insert(node);
    }

    fn remove_selection_listener(&mut self, node: NodeId) {
        self.log.push(HostCommand::RemoveSelectionListener(node));
        self.selection_listeners.remove(&node);
    }

    fn add_clipboard_listener(&mut self) {
        self.log.push(HostCommand::AddClipboardListener);
        self.clipboard_listener = true;
    }

    fn enter_keyboard(&mut self) {
        self.log.push(HostCommand::EnterKeyboard);
        self.keyboard_open = true;
    }

    fn toggle_dictation(&mut self) {
        self.log.push(HostCommand::ToggleDictation);
        self.dictation_active = !self.dictation_active;
    }
}
