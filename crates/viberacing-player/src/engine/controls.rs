//! Split-keyboard bindings
//!
//! Blue drives with W/S/A/D, Yellow with the arrow keys. Key state is polled
//! (held, not edge-triggered) once per frame into an `InputSnapshot`.

use minifb::{Key, Window};
use viberacing_sim::{ControlIntents, IntentSource, PlayerSlot};

/// Restarts the countdown and puts both cars back on the grid
pub const RESET_KEY: Key = Key::R;
pub const QUIT_KEY: Key = Key::Escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: Key,
    pub backward: Key,
    pub steer_left: Key,
    pub steer_right: Key,
}

impl KeyBindings {
    pub fn for_slot(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::Blue => Self {
                forward: Key::W,
                backward: Key::S,
                steer_left: Key::A,
                steer_right: Key::D,
            },
            PlayerSlot::Yellow => Self {
                forward: Key::Up,
                backward: Key::Down,
                steer_left: Key::Left,
                steer_right: Key::Right,
            },
        }
    }

    /// Resolve held keys into intents
    pub fn read(&self, is_down: impl Fn(Key) -> bool) -> ControlIntents {
        ControlIntents {
            forward: is_down(self.forward),
            backward: is_down(self.backward),
            steer_left: is_down(self.steer_left),
            steer_right: is_down(self.steer_right),
        }
    }

    #[cfg(test)]
    pub fn keys(&self) -> [Key; 4] {
        [self.forward, self.backward, self.steer_left, self.steer_right]
    }
}

/// Bindings for every slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    bindings: [KeyBindings; PlayerSlot::COUNT],
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            bindings: PlayerSlot::ALL.map(KeyBindings::for_slot),
        }
    }
}

impl Controls {
    pub fn bindings(&self, slot: PlayerSlot) -> &KeyBindings {
        &self.bindings[slot.index()]
    }

    /// Bind these controls to a window's live key state
    pub fn poll<'a>(&'a self, window: &'a Window) -> WindowInput<'a> {
        WindowInput { controls: self, window }
    }
}

/// Reads intents straight from minifb's key state
pub struct WindowInput<'a> {
    controls: &'a Controls,
    window: &'a Window,
}

impl IntentSource for WindowInput<'_> {
    fn intents(&self, slot: PlayerSlot) -> ControlIntents {
        self.controls
            .bindings(slot)
            .read(|key| self.window.is_key_down(key))
    }
}
