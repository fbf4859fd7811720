use std::sync::mpsc::{channel, Receiver};

use tracing::debug;

use crate::host::{HostEvent, TextHost};
use crate::menu::{self, ActionEffect, ActionResponse, MenuAction};
use crate::model::SwitchAccessConfig;
use crate::sim::SimHost;
use crate::text_navigation::TextNavigationManager;

/// Something the owner of a session should react to after pumping events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The set of available menu actions changed.
    ReloadActions,
}

/// Owns the text navigation state for one running host, and the receiving end
/// of the host's event channel.
///
/// All state is touched from the thread that calls into the session; host
/// replies only take effect when [`Session::pump`] processes them.
#[derive(Debug)]
pub struct Session<H> {
    config: SwitchAccessConfig,
    manager: TextNavigationManager,
    host: H,
    events: Receiver<HostEvent>,
}

impl<H: TextHost> Session<H> {
    pub fn new(config: SwitchAccessConfig, mut host: H, events: Receiver<HostEvent>) -> Self {
        if config.improved_text_input {
            host.add_clipboard_listener();
        }
        Self {
            config,
            manager: TextNavigationManager::new(),
            host,
            events,
        }
    }

    pub fn config(&self) -> &SwitchAccessConfig {
        &self.config
    }

    pub fn manager(&self) -> &TextNavigationManager {
        &self.manager
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn available_actions(&self) -> Vec<MenuAction> {
        menu::available_actions(&self.config, &self.manager)
    }

    /// Runs a menu action. Host replies it triggers are left queued until the
    /// next [`Session::pump`].
    pub fn perform(&mut self, action: MenuAction) -> ActionResponse {
        if !self.available_actions().contains(&action) {
            debug!(?action, "performing an action the menu does not currently offer");
        }

        let plan = menu::dispatch(action);
        if let Some(effect) = plan.effect {
            self.apply(effect);
        }
        plan.response
    }

    pub fn reset_currently_selecting(&mut self) {
        self.manager.reset_currently_selecting(&mut self.host);
    }

    /// Handles the next queued host event, if any.
    pub fn dispatch_next(&mut self) -> Option<Option<Notification>> {
        let event = self.events.try_recv().ok()?;
        Some(self.handle_event(event))
    }

    /// Handles queued host events until none are left, including events
    /// queued while handling earlier ones.
    pub fn pump(&mut self) -> Vec<Notification> {
        let mut notifications = Vec::new();
        while let Some(notification) = self.dispatch_next() {
            notifications.extend(notification);
        }
        notifications
    }

    /// Settles the session: every queued host reply, and every reply those
    /// replies trigger, has been handled when this returns.
    pub fn run_until_idle(&mut self) -> Vec<Notification> {
        self.pump()
    }

    fn handle_event(&mut self, event: HostEvent) -> Option<Notification> {
        match event {
            HostEvent::Focus { request, node } => {
                self.manager.handle_focus(request, node, &mut self.host);
                None
            }
            HostEvent::TextSelectionChanged { node } => {
                self.manager.on_nav_change(node, &mut self.host);
                None
            }
            HostEvent::ClipboardDataChanged => {
                let changed = self.manager.on_clipboard_data_changed();
                (changed && self.config.improved_text_input).then_some(Notification::ReloadActions)
            }
        }
    }

    fn apply(&mut self, effect: ActionEffect) {
        match effect {
            ActionEffect::EnterKeyboard => self.host.enter_keyboard(),
            ActionEffect::ToggleDictation => self.host.toggle_dictation(),
            ActionEffect::KeyPress(key) => self.host.simulate_key_press(key),
            ActionEffect::StartSelection => self.manager.save_select_start(&mut self.host),
            ActionEffect::EndSelection => self.manager.save_select_end(&mut self.host),
            ActionEffect::Move(movement) => self.manager.move_cursor(movement, &mut self.host),
        }
    }
}

/// A session wired to a fresh [`SimHost`].
pub fn sim_session(config: SwitchAccessConfig) -> Session<SimHost> {
    let (tx, rx) = channel();
    Session::new(config, SimHost::new(tx), rx)
}
