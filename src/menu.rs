//! Action menu for editable text fields.
//!
//! [`dispatch`] is pure: it decides what the menu does next and which effect
//! to run. `Session` runs the effect against the host.

use serde::{Deserialize, Serialize};

use crate::keyboard::{KeyPress, KEY_C, KEY_V, KEY_X};
use crate::model::SwitchAccessConfig;
use crate::text_navigation::{TextMovement, TextNavigationManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    Keyboard,
    Dictation,
    MoveCursor,
    Cut,
    Copy,
    Paste,
    StartTextSelection,
    EndTextSelection,
    JumpToBeginningOfText,
    JumpToEndOfText,
    MoveBackwardOneCharOfText,
    MoveForwardOneCharOfText,
    MoveBackwardOneWordOfText,
    MoveForwardOneWordOfText,
    MoveDownOneLineOfText,
    MoveUpOneLineOfText,
}

impl MenuAction {
    pub fn movement(self) -> Option<TextMovement> {
        let movement = match self {
            MenuAction::JumpToBeginningOfText => TextMovement::ToBeginning,
            MenuAction::JumpToEndOfText => TextMovement::ToEnd,
            MenuAction::MoveBackwardOneCharOfText => TextMovement::BackwardOneChar,
            MenuAction::MoveForwardOneCharOfText => TextMovement::ForwardOneChar,
            MenuAction::MoveBackwardOneWordOfText => TextMovement::BackwardOneWord,
            MenuAction::MoveForwardOneWordOfText => TextMovement::ForwardOneWord,
            MenuAction::MoveDownOneLineOfText => TextMovement::DownOneLine,
            MenuAction::MoveUpOneLineOfText => TextMovement::UpOneLine,
            _ => return None,
        };
        Some(movement)
    }
}

/// What the menu should do after an action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionResponse {
    CloseMenu,
    RemainOpen,
    ReloadMenu,
    /// Open the text navigation submenu.
    OpenSubmenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    EnterKeyboard,
    ToggleDictation,
    KeyPress(KeyPress),
    StartSelection,
    EndSelection,
    Move(TextMovement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionPlan {
    pub response: ActionResponse,
    pub effect: Option<ActionEffect>,
}

impl ActionPlan {
    fn new(response: ActionResponse, effect: ActionEffect) -> Self {
        Self {
            response,
            effect: Some(effect),
        }
    }
}

pub fn dispatch(action: MenuAction) -> ActionPlan {
    use ActionResponse::*;

    match action {
        MenuAction::Keyboard => ActionPlan::new(CloseMenu, ActionEffect::EnterKeyboard),
        MenuAction::Dictation => ActionPlan::new(CloseMenu, ActionEffect::ToggleDictation),
        MenuAction::MoveCursor => ActionPlan {
            response: OpenSubmenu,
            effect: None,
        },
        MenuAction::Cut => ActionPlan::new(RemainOpen, ActionEffect::KeyPress(KeyPress::ctrl(KEY_X))),
        MenuAction::Copy => {
            ActionPlan::new(RemainOpen, ActionEffect::KeyPress(KeyPress::ctrl(KEY_C)))
        }
        MenuAction::Paste => {
            ActionPlan::new(RemainOpen, ActionEffect::KeyPress(KeyPress::ctrl(KEY_V)))
        }
        MenuAction::StartTextSelection => {
            ActionPlan::new(OpenSubmenu, ActionEffect::StartSelection)
        }
        MenuAction::EndTextSelection => ActionPlan::new(ReloadMenu, ActionEffect::EndSelection),
        movement => ActionPlan {
            response: RemainOpen,
            effect: movement.movement().map(ActionEffect::Move),
        },
    }
}

/// Actions offered for a focused editable text field.
pub fn available_actions(
    config: &SwitchAccessConfig,
    manager: &TextNavigationManager,
) -> Vec<MenuAction> {
    let mut actions = vec![MenuAction::Keyboard, MenuAction::Dictation];
    if !config.improved_text_input {
        return actions;
    }

    actions.extend([
        MenuAction::MoveCursor,
        MenuAction::JumpToBeginningOfText,
        MenuAction::JumpToEndOfText,
        MenuAction::MoveBackwardOneCharOfText,
        MenuAction::MoveForwardOneCharOfText,
        MenuAction::MoveBackwardOneWordOfText,
        MenuAction::MoveForwardOneWordOfText,
        MenuAction::MoveDownOneLineOfText,
        MenuAction::MoveUpOneLineOfText,
        MenuAction::StartTextSelection,
    ]);

    if manager.currently_selecting() {
        actions.push(MenuAction::EndTextSelection);
    }
    if manager.selection_exists() {
        actions.extend([MenuAction::Cut, MenuAction::Copy]);
    }
    if manager.clipboard_has_data() {
        actions.push(MenuAction::Paste);
    }
    actions
}
