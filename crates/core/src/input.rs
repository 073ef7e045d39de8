//! Input-state providers polled once per tick.
//! This module exists so the session never reads a keyboard directly.
//! It does not own key bindings; front ends map their devices onto `InputState`.

use std::collections::VecDeque;
use std::iter::repeat_n;

/// Held directions plus the jump edge for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
}

impl InputState {
    pub const IDLE: InputState =
        InputState { up: false, down: false, left: false, right: false, jump_pressed: false };

    /// Horizontal and vertical intent in `-1..=1`; opposite keys cancel.
    pub fn axes(&self) -> (i8, i8) {
        let horizontal = i8::from(self.right) - i8::from(self.left);
        let vertical = i8::from(self.down) - i8::from(self.up);
        (horizontal, vertical)
    }
}

pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

/// Replays a fixed sequence of frames, then reports idle input forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputState>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputState>) -> Self {
        Self { frames: frames.into_iter().collect() }
    }

    /// Holds `frame` for `ticks` consecutive polls.
    pub fn hold(mut self, frame: InputState, ticks: usize) -> Self {
        self.frames.extend(repeat_n(frame, ticks));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        self.frames.pop_front().unwrap_or_default()
    }
}
