//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};
use roomwalk_core::{InputSource, InputState};

const MENU_KEYS: [KeyCode; 4] = [KeyCode::Enter, KeyCode::Escape, KeyCode::Space, KeyCode::R];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub movement: InputState,
}

/// Reads the live keyboard as a session input source.
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> InputState {
        InputState {
            up: any_down(&[KeyCode::Up, KeyCode::W]),
            down: any_down(&[KeyCode::Down, KeyCode::S]),
            left: any_down(&[KeyCode::Left, KeyCode::A]),
            right: any_down(&[KeyCode::Right, KeyCode::D]),
            jump_pressed: any_pressed(&[KeyCode::Up, KeyCode::W, KeyCode::Space]),
        }
    }
}

pub fn capture_frame_input(keyboard: &mut KeyboardInput) -> FrameInput {
    let keys_pressed = MENU_KEYS.into_iter().filter(|key| is_key_pressed(*key)).collect();
    FrameInput { keys_pressed, movement: keyboard.poll() }
}

fn any_down(keys: &[KeyCode]) -> bool {
    keys.iter().any(|key| is_key_down(*key))
}

fn any_pressed(keys: &[KeyCode]) -> bool {
    keys.iter().any(|key| is_key_pressed(*key))
}
