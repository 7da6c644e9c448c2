//! Input sampling
//!
//! Host events (keys, pointer) land here as flags at any time. The frame loop
//! calls `sample()` once per tick:
//! - Jump is a level: true while any jump source is held.
//! - Pause, restart and start are edges: set by a press, cleared by sampling.
//!
//! Several presses between two ticks collapse into one sample.

use crate::sim::TickInput;

/// Host-independent keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    ArrowUp,
    W,
    Enter,
    Escape,
    P,
    R,
    /// Mute toggle; a host setting, never reaches the sim
    M,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            " " | "Spacebar" => Some(Key::Space),
            "ArrowUp" => Some(Key::ArrowUp),
            "w" | "W" => Some(Key::W),
            "Enter" => Some(Key::Enter),
            "Escape" => Some(Key::Escape),
            "p" | "P" => Some(Key::P),
            "r" | "R" => Some(Key::R),
            "m" | "M" => Some(Key::M),
            _ => None,
        }
    }

    /// Map a keydown with its modifier state. Chords (Ctrl/Cmd/Alt + key)
    /// belong to the browser, so they map to nothing.
    pub fn from_dom_event(key: &str, modifier_held: bool) -> Option<Self> {
        if modifier_held {
            return None;
        }
        Self::from_dom_key(key)
    }

    /// Keys whose default action scrolls the page
    pub fn scrolls_page(self) -> bool {
        matches!(self, Key::Space | Key::ArrowUp)
    }

    fn is_jump(self) -> bool {
        matches!(self, Key::Space | Key::ArrowUp | Key::W)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    jump_keys_held: u8,
    pointer_held: bool,
    pause: bool,
    restart: bool,
    start: bool,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key pressed. `repeat` is the browser's auto-repeat flag.
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        if repeat {
            return;
        }
        if key.is_jump() {
            self.jump_keys_held = self.jump_keys_held.saturating_add(1);
            self.start = true;
        }
        match key {
            Key::Enter => self.start = true,
            Key::Escape | Key::P => self.pause = true,
            Key::R => self.restart = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if key.is_jump() {
            self.jump_keys_held = self.jump_keys_held.saturating_sub(1);
        }
    }

    /// Pointer/touch down on the canvas: jump and start
    pub fn pointer_down(&mut self) {
        self.pointer_held = true;
        self.start = true;
    }

    pub fn pointer_up(&mut self) {
        self.pointer_held = false;
    }

    /// Ask for a pause toggle from outside the keyboard (pause menu, blur)
    pub fn request_pause(&mut self) {
        self.pause = true;
    }

    /// Restart button
    pub fn request_restart(&mut self) {
        self.restart = true;
    }

    /// Drop every held and pending input (e.g. when focus leaves the page
    /// and key-up events will never arrive)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    /// Read the input for this tick and clear the edges
    pub fn sample(&mut self) -> TickInput {
        let input = TickInput {
            jump: self.jump_keys_held > 0 || self.pointer_held,
            pause: self.pause,
            restart: self.restart,
            start: self.start,
        };
        self.pause = false;
        self.restart = false;
        self.start = false;
        input
    }
}
