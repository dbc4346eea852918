//! Logical key state
//!
//! The host updates this from OS/browser events between frames; the session
//! only ever reads it.
//!
//! - **Held:** `is_held(key)` is true every frame the key is down. Movement
//!   and jump read this.
//! - **Just pressed:** true only for the frame the press happened, cleared by
//!   `end_frame()`. Retry, pause and fullscreen read this.

use std::collections::HashSet;

use crate::sim::TickInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    MoveLeft,
    MoveRight,
    Jump,
    Retry,
    Pause,
    ToggleFullscreen,
}

impl Key {
    /// Map a host key code (DOM `KeyboardEvent.code` names) to a logical key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Key::MoveRight),
            "Space" | "ArrowUp" | "KeyW" => Some(Key::Jump),
            "KeyR" => Some(Key::Retry),
            "KeyP" | "Escape" => Some(Key::Pause),
            "KeyF" => Some(Key::ToggleFullscreen),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Feed a raw host key code; unknown codes are ignored
    pub fn code_down(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_down(key);
        }
    }

    pub fn code_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_up(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Clear edge-triggered state once a frame has consumed it
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Drop everything (focus loss)
    pub fn release_all(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
    }

    /// Movement snapshot for the simulation tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.is_held(Key::MoveLeft),
            right: self.is_held(Key::MoveRight),
            jump: self.is_held(Key::Jump),
        }
    }
}
