//! Per-frame input snapshot fed by the window layer.
//!
//! Keys and mouse buttons are tracked two ways:
//!
//! - **Held** (level-triggered): true every frame the key is down. Movement
//!   reads this.
//! - **Just pressed / just released** (edge-triggered): true only for the
//!   frame the transition happened. Jump, attack, menu clicks and text entry
//!   read these.
//!
//! Transients are cleared by `end_frame()`. The main loop calls it only after
//! at least one fixed step ran, so a click landing on a render frame with no
//! simulation step is not lost.
//!
//! Printable characters are buffered alongside the key edges for the
//! name-entry screen.

use std::collections::HashSet;

/// Keys the game reacts to. Everything else is dropped by the window layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Space,
    F,
    Enter,
    Backspace,
    Escape,
    F3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    pressed: HashSet<Key>,
    released: HashSet<Key>,

    mouse_held: HashSet<MouseBtn>,
    mouse_pressed: HashSet<MouseBtn>,

    typed: String,

    /// Cursor position in canvas (logical) coordinates.
    pub mouse_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        // OS key repeat re-sends presses; only the first one is an edge.
        if self.held.insert(key) {
            self.pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.released.insert(key);
        }
    }

    pub fn mouse_down(&mut self, btn: MouseBtn) {
        if self.mouse_held.insert(btn) {
            self.mouse_pressed.insert(btn);
        }
    }

    pub fn mouse_up(&mut self, btn: MouseBtn) {
        self.mouse_held.remove(&btn);
    }

    /// Buffer printable text; control characters are dropped.
    pub fn push_text(&mut self, text: &str) {
        self.typed.extend(text.chars().filter(|c| !c.is_control()));
    }

    /// Characters typed since the last `end_frame()`.
    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.released.contains(&key)
    }

    pub fn is_mouse_held(&self, btn: MouseBtn) -> bool {
        self.mouse_held.contains(&btn)
    }

    /// Left button went down this frame. Menu buttons fire on this edge.
    pub fn clicked(&self) -> bool {
        self.mouse_pressed.contains(&MouseBtn::Left)
    }

    /// Horizontal intent from the arrow keys: -1, 0 or +1. Right wins when
    /// both are held.
    pub fn horizontal_axis(&self) -> f32 {
        if self.is_held(Key::Right) {
            1.0
        } else if self.is_held(Key::Left) {
            -1.0
        } else {
            0.0
        }
    }

    pub fn end_frame(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.mouse_pressed.clear();
        self.typed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_an_edge_and_a_hold() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        assert!(input.is_held(Key::Space));
        assert!(input.is_just_pressed(Key::Space));

        input.end_frame();
        assert!(input.is_held(Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
    }

    #[test]
    fn repeat_press_while_held_is_not_a_new_edge() {
        let mut input = InputState::new();
        input.key_down(Key::F);
        input.end_frame();
        input.key_down(Key::F);
        assert!(!input.is_just_pressed(Key::F));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut input = InputState::new();
        input.key_up(Key::Escape);
        assert!(!input.is_just_released(Key::Escape));
    }

    #[test]
    fn release_sets_edge_until_end_frame() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_up(Key::Left);
        assert!(!input.is_held(Key::Left));
        assert!(input.is_just_released(Key::Left));
        input.end_frame();
        assert!(!input.is_just_released(Key::Left));
    }

    #[test]
    fn click_lasts_one_frame() {
        let mut input = InputState::new();
        input.mouse_down(MouseBtn::Left);
        assert!(input.clicked());
        assert!(input.is_mouse_held(MouseBtn::Left));
        input.end_frame();
        assert!(!input.clicked());

        input.mouse_up(MouseBtn::Left);
        input.mouse_down(MouseBtn::Right);
        assert!(!input.clicked());
    }

    #[test]
    fn typed_text_drops_control_chars() {
        let mut input = InputState::new();
        input.push_text("ab");
        input.push_text("\r");
        input.push_text("\u{8}");
        input.push_text("c");
        assert_eq!(input.typed_text(), "abc");
        input.end_frame();
        assert_eq!(input.typed_text(), "");
    }

    #[test]
    fn horizontal_axis_prefers_right() {
        let mut input = InputState::new();
        assert_eq!(input.horizontal_axis(), 0.0);
        input.key_down(Key::Left);
        assert_eq!(input.horizontal_axis(), -1.0);
        input.key_down(Key::Right);
        assert_eq!(input.horizontal_axis(), 1.0);
        input.key_up(Key::Right);
        assert_eq!(input.horizontal_axis(), -1.0);
    }
}
