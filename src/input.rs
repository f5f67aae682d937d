//! Per-frame button input and held-key acceleration
//!
//! The input source hands us two bitmasks per frame: buttons that went down
//! this frame and buttons currently held. Up/Down are run through a
//! [`RepeatTracker`] so holding them scrolls with increasing speed.

use std::ops::{BitOr, BitOrAssign};

/// Bitmask of pad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Buttons(u16);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const A: Buttons = Buttons(1 << 0);
    pub const B: Buttons = Buttons(1 << 1);
    pub const R: Buttons = Buttons(1 << 2);
    pub const PLUS: Buttons = Buttons(1 << 3);
    pub const UP: Buttons = Buttons(1 << 4);
    pub const DOWN: Buttons = Buttons(1 << 5);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Buttons) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Buttons) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Buttons) {
        self.0 &= !other.0;
    }
}

impl BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

impl BitOrAssign for Buttons {
    fn bitor_assign(&mut self, rhs: Buttons) {
        self.0 |= rhs.0;
    }
}

/// One frame of raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    pub pressed: Buttons,
    pub held: Buttons,
}

impl InputFrame {
    pub fn pressed(buttons: Buttons) -> Self {
        Self {
            pressed: buttons,
            held: buttons,
        }
    }

    pub fn held(buttons: Buttons) -> Self {
        Self {
            pressed: Buttons::NONE,
            held: buttons,
        }
    }
}

/// Counter value at which a held direction fires.
pub const REPEAT_THRESHOLD: u32 = 1000;
/// Step right after a fresh press.
pub const INITIAL_STEP: u32 = 50;
/// Growth of the step after every repeat.
pub const STEP_INCREMENT: u32 = 50;
/// Upper bound for the step.
pub const MAX_STEP: u32 = 250;

/// Turns a held direction into repeating activations that speed up the
/// longer the direction is held.
///
/// State is only reset by a fresh press, never by idling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatTracker {
    step: u32,
    counter: u32,
}

impl Default for RepeatTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RepeatTracker {
    pub const fn new() -> Self {
        Self {
            step: INITIAL_STEP,
            counter: 0,
        }
    }

    /// Feed one frame. Returns whether the direction activates this frame.
    pub fn update(&mut self, pressed: bool, held: bool) -> bool {
        if pressed {
            self.step = INITIAL_STEP;
            self.counter = 0;
            return true;
        }
        if !held {
            return false;
        }

        self.counter += self.step;
        if self.counter >= REPEAT_THRESHOLD {
            self.counter = 0;
            self.step = (self.step + STEP_INCREMENT).min(MAX_STEP);
            true
        } else {
            false
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }
}

/// Decoded actions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    /// A: toggle selection / confirm.
    pub accept: bool,
    /// B: quit from the list / back out of the confirm prompt.
    pub back: bool,
    /// Plus: start deleting the selection.
    pub delete: bool,
    /// R: cycle the sort order.
    pub cycle_sort: bool,
    pub up: bool,
    pub down: bool,
}

/// Maps raw frames to [`Controls`], with one repeat tracker per direction.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    up: RepeatTracker,
    down: RepeatTracker,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, frame: &InputFrame) -> Controls {
        let tap = |b: Buttons| frame.pressed.contains(b);
        Controls {
            accept: tap(Buttons::A),
            back: tap(Buttons::B),
            delete: tap(Buttons::PLUS),
            cycle_sort: tap(Buttons::R),
            up: self
                .up
                .update(tap(Buttons::UP), frame.held.contains(Buttons::UP)),
            down: self
                .down
                .update(tap(Buttons::DOWN), frame.held.contains(Buttons::DOWN)),
        }
    }

    pub fn up_tracker(&self) -> &RepeatTracker {
        &self.up
    }

    pub fn down_tracker(&self) -> &RepeatTracker {
        &self.down
    }
}
