use serde::{Deserialize, Serialize};

// Linux evdev keycodes (see linux/input-event-codes.h)
pub const KEY_C: u32 = 46;
pub const KEY_V: u32 = 47;
pub const KEY_X: u32 = 45;

pub const KEY_HOME: u32 = 102;
pub const KEY_UP: u32 = 103;
pub const KEY_LEFT: u32 = 105;
pub const KEY_RIGHT: u32 = 106;
pub const KEY_END: u32 = 107;
pub const KEY_DOWN: u32 = 108;

/// A single simulated key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub keycode: u32,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyPress {
    pub const fn plain(keycode: u32) -> Self {
        Self {
            keycode,
            ctrl: false,
            shift: false,
        }
    }

    pub const fn ctrl(keycode: u32) -> Self {
        Self {
            keycode,
            ctrl: true,
            shift: false,
        }
    }
}

pub fn key_name(keycode: u32) -> Option<&'static str> {
    let name = match keycode {
        KEY_C => "C",
        KEY_V => "V",
        KEY_X => "X",
        KEY_HOME => "Home",
        KEY_UP => "Up",
        KEY_LEFT => "Left",
        KEY_RIGHT => "Right",
        KEY_END => "End",
        KEY_DOWN => "Down",
        _ => return None,
    };
    Some(name)
}

/// Human readable chord, e.g. `Ctrl+Right`.
pub fn describe(key: KeyPress) -> String {
    let mut out = String::new();
    if key.ctrl {
        out.push_str("Ctrl+");
    }
    if key.shift {
        out.push_str("Shift+");
    }
    match key_name(key.keycode) {
        Some(name) => out.push_str(name),
        None => out.push_str(&format!("keycode {}", key.keycode)),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_modified_chords() {
        assert_eq!(describe(KeyPress::ctrl(KEY_RIGHT)), "Ctrl+Right");
        assert_eq!(describe(KeyPress::plain(KEY_DOWN)), "Down");
        assert_eq!(
            describe(KeyPress {
                keycode: 999,
                ctrl: false,
                shift: true
            }),
            "Shift+keycode 999"
        );
    }
}
