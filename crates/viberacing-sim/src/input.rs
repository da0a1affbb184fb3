//! Player slots and control intents
//!
//! The host owns the physical bindings (which keys drive which car). The
//! core only ever sees one `InputSnapshot` per step, copied by value, so an
//! event loop updating key state mid-frame cannot tear a step.

/// One of the two competitors. Order is fixed: `Blue` is car 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    Blue,
    Yellow,
}

impl PlayerSlot {
    pub const COUNT: usize = 2;
    pub const ALL: [PlayerSlot; Self::COUNT] = [PlayerSlot::Blue, PlayerSlot::Yellow];

    pub fn index(self) -> usize {
        match self {
            PlayerSlot::Blue => 0,
            PlayerSlot::Yellow => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlayerSlot::Blue => "Blue",
            PlayerSlot::Yellow => "Yellow",
        }
    }

    /// Grid position relative to the grid anchor
    pub fn grid_offset(self) -> (f64, f64) {
        match self {
            PlayerSlot::Blue => (0.0, -16.0),
            PlayerSlot::Yellow => (-26.0, 16.0),
        }
    }
}

/// Held state of the four driving intents for one car
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlIntents {
    pub forward: bool,
    pub backward: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl ControlIntents {
    pub const IDLE: ControlIntents = ControlIntents {
        forward: false,
        backward: false,
        steer_left: false,
        steer_right: false,
    };

    /// +1 forward, -1 backward, 0 when neither or both are held
    pub fn throttle_axis(&self) -> f64 {
        f64::from(u8::from(self.forward)) - f64::from(u8::from(self.backward))
    }

    /// +1 right (clockwise on screen), -1 left
    pub fn steer_axis(&self) -> f64 {
        f64::from(u8::from(self.steer_right)) - f64::from(u8::from(self.steer_left))
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

/// Intents for every slot, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    intents: [ControlIntents; PlayerSlot::COUNT],
}

impl InputSnapshot {
    pub fn get(&self, slot: PlayerSlot) -> ControlIntents {
        self.intents[slot.index()]
    }

    pub fn set(&mut self, slot: PlayerSlot, intents: ControlIntents) {
        self.intents[slot.index()] = intents;
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, slot: PlayerSlot, intents: ControlIntents) -> Self {
        self.set(slot, intents);
        self
    }
}

/// Anything that can report the current held intents per slot
pub trait IntentSource {
    fn intents(&self, slot: PlayerSlot) -> ControlIntents;

    fn snapshot(&self) -> InputSnapshot {
        PlayerSlot::ALL
            .iter()
            .fold(InputSnapshot::default(), |snap, &slot| snap.with(slot, self.intents(slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_indices_match_order() {
        for (i, slot) in PlayerSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn opposing_intents_cancel() {
        let both = ControlIntents { forward: true, backward: true, steer_left: true, steer_right: true };
        assert_eq!(both.throttle_axis(), 0.0);
        assert_eq!(both.steer_axis(), 0.0);
        assert!(!both.is_idle());
        assert!(ControlIntents::IDLE.is_idle());
    }

    #[test]
    fn axes_signs() {
        let fwd_right = ControlIntents { forward: true, steer_right: true, ..ControlIntents::IDLE };
        assert_eq!(fwd_right.throttle_axis(), 1.0);
        assert_eq!(fwd_right.steer_axis(), 1.0);
        let back_left = ControlIntents { backward: true, steer_left: true, ..ControlIntents::IDLE };
        assert_eq!(back_left.throttle_axis(), -1.0);
        assert_eq!(back_left.steer_axis(), -1.0);
    }

    struct Fixed;

    impl IntentSource for Fixed {
        fn intents(&self, slot: PlayerSlot) -> ControlIntents {
            match slot {
                PlayerSlot::Blue => ControlIntents { forward: true, ..ControlIntents::IDLE },
                PlayerSlot::Yellow => ControlIntents::IDLE,
            }
        }
    }

    #[test]
    fn snapshot_collects_every_slot() {
        let snap = Fixed.snapshot();
        assert!(snap.get(PlayerSlot::Blue).forward);
        assert!(snap.get(PlayerSlot::Yellow).is_idle());
    }
}
