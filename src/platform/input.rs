//! Keyboard state to tick input

use crate::sim::{Cursors, TickInput};

/// One-shot commands triggered by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Pause,
    ToggleIdle,
    ToggleMute,
    ToggleFps,
}

/// Tracks held keys and pending one-shot commands between frames
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    cursors: Cursors,
    pause: bool,
    idle_mode: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a DOM `keydown` key string; returns any command it triggers
    pub fn key_down(&mut self, key: &str) -> Option<KeyCommand> {
        if self.set_cursor(key, true) {
            return None;
        }
        let command = match key {
            "Escape" | "p" | "P" => {
                self.pause = true;
                KeyCommand::Pause
            }
            "i" | "I" => {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
                KeyCommand::ToggleIdle
            }
            "m" | "M" => KeyCommand::ToggleMute,
            "f" | "F" => KeyCommand::ToggleFps,
            _ => return None,
        };
        Some(command)
    }

    /// Handle a DOM `keyup` key string
    pub fn key_up(&mut self, key: &str) {
        self.set_cursor(key, false);
    }

    /// Release everything (window lost focus, scene changed)
    pub fn release_all(&mut self) {
        self.cursors = Cursors::default();
        self.clear_commands();
    }

    /// Drop one-shot commands that no tick has consumed yet
    pub fn clear_commands(&mut self) {
        self.pause = false;
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    /// Input for the next tick; one-shot flags are consumed
    pub fn take_input(&mut self) -> TickInput {
        TickInput {
            cursors: self.cursors,
            pause: std::mem::take(&mut self.pause),
            idle_mode: self.idle_mode,
        }
    }

    fn set_cursor(&mut self, key: &str, down: bool) -> bool {
        let slot = match key {
            "ArrowLeft" | "a" | "A" => &mut self.cursors.left,
            "ArrowRight" | "d" | "D" => &mut self.cursors.right,
            "ArrowUp" | "w" | "W" => &mut self.cursors.up,
            "ArrowDown" | "s" | "S" => &mut self.cursors.down,
            _ => return false,
        };
        *slot = down;
        true
    }
}
