use std::mem;

use macroquad::prelude::KeyCode;
use roomwalk_core::{InputState, Session, TickOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Starfield title screen shown before play starts.
    #[default]
    Title,
    Playing,
    /// Play is frozen behind the "leave this run?" prompt.
    ExitPrompt,
    Defeated,
}

/// Requests the frame loop must act on outside of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRequest {
    /// Build a fresh session and start playing it.
    NewRun,
    Quit,
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Set during `tick` for the caller to drain.
    pub request: Option<AppRequest>,
    /// Outcome of the session tick run this frame, if any.
    pub last_outcome: Option<TickOutcome>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playing() -> Self {
        Self { mode: AppMode::Playing, ..Self::default() }
    }

    /// Process keys and advance the session for a single frame.
    /// `keys_pressed` holds the edge-triggered menu keys; `input` is the held movement state.
    pub fn tick(&mut self, session: &mut Session, input: &InputState, keys_pressed: &[KeyCode]) {
        self.request = None;
        self.last_outcome = None;

        match self.mode {
            AppMode::Title => {
                if keys_pressed.contains(&KeyCode::Enter) || keys_pressed.contains(&KeyCode::Space)
                {
                    self.request = Some(AppRequest::NewRun);
                } else if keys_pressed.contains(&KeyCode::Escape) {
                    self.request = Some(AppRequest::Quit);
                }
            }
            AppMode::Playing => {
                if keys_pressed.contains(&KeyCode::Escape) {
                    self.mode = AppMode::ExitPrompt;
                    return;
                }
                let outcome = session.tick(input);
                if outcome == TickOutcome::Defeated {
                    self.mode = AppMode::Defeated;
                }
                self.last_outcome = Some(outcome);
            }
            AppMode::ExitPrompt => {
                if keys_pressed.contains(&KeyCode::Enter) {
                    self.mode = AppMode::Title;
                } else if keys_pressed.contains(&KeyCode::Escape) {
                    self.mode = AppMode::Playing;
                }
            }
            AppMode::Defeated => {
                if keys_pressed.contains(&KeyCode::R) {
                    self.request = Some(AppRequest::NewRun);
                } else if keys_pressed.contains(&KeyCode::Escape) {
                    self.mode = AppMode::Title;
                }
            }
        }
    }

    /// Called once the frame loop has replaced the session after `AppRequest::NewRun`.
    pub fn start_run(&mut self) {
        self.mode = AppMode::Playing;
        self.request = None;
        self.last_outcome = None;
    }

    pub fn take_request(&mut self) -> Option<AppRequest> {
        self.request.take()
    }
}

/// Key presses seen on rendered frames, held until a fixed step consumes them.
#[derive(Debug, Default)]
pub struct PendingEdges {
    keys: Vec<KeyCode>,
    jump: bool,
}

impl PendingEdges {
    pub fn record(&mut self, keys_pressed: &[KeyCode], jump_pressed: bool) {
        for key in keys_pressed {
            if !self.keys.contains(key) {
                self.keys.push(*key);
            }
        }
        self.jump |= jump_pressed;
    }

    /// Drains the buffered edges for one step; `held` supplies the direction keys.
    pub fn take_for_step(&mut self, held: InputState) -> (Vec<KeyCode>, InputState) {
        let movement = InputState { jump_pressed: mem::take(&mut self.jump), ..held };
        (mem::take(&mut self.keys), movement)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && !self.jump
    }
}
