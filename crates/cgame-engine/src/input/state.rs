use std::collections::HashSet;

use crate::coords::Vec2;

use super::event::Event;
use super::types::{Key, Modifiers, MouseButton};

/// Current input state for the window.
///
/// Holds "is down" information and the pointer position, plus the keys and
/// buttons that went down during the current frame. The runtime feeds every
/// translated event through [`apply`](InputState::apply) and calls
/// [`end_frame`](InputState::end_frame) after the game's frame callback.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Last known pointer position in logical pixels; `None` until the
    /// pointer has been seen. Kept after the pointer leaves the window.
    pub pointer_pos: Option<(f32, f32)>,

    /// Whether the pointer is currently over the window.
    pub pointer_inside: bool,

    keys_down: HashSet<Key>,
    buttons_down: HashSet<MouseButton>,

    keys_pressed: HashSet<Key>,
    buttons_pressed: HashSet<MouseButton>,
}

impl InputState {
    /// Updates the state from a translated event.
    pub fn apply(&mut self, ev: &Event) {
        match ev {
            Event::FocusGained => {
                self.focused = true;
            }

            Event::FocusLost => {
                self.focused = false;
                // Releases never arrive once focus is gone; drop held state.
                self.keys_down.clear();
                self.buttons_down.clear();
                self.modifiers = Modifiers::default();
            }

            Event::MouseMotion { x, y } => {
                self.pointer_pos = Some((*x, *y));
                self.pointer_inside = true;
            }

            Event::KeyDown { key, modifiers, .. } => {
                self.modifiers = *modifiers;
                if self.keys_down.insert(*key) {
                    self.keys_pressed.insert(*key);
                }
            }

            Event::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                self.keys_down.remove(key);
            }

            Event::MouseDown { button, x, y } => {
                self.pointer_pos = Some((*x, *y));
                self.pointer_inside = true;
                if self.buttons_down.insert(*button) {
                    self.buttons_pressed.insert(*button);
                }
            }

            Event::MouseUp { button, x, y } => {
                self.pointer_pos = Some((*x, *y));
                self.pointer_inside = true;
                self.buttons_down.remove(button);
            }

            Event::Quit | Event::MouseWheel { .. } => {}
        }
    }

    /// Pointer left the window surface; its last position is kept.
    pub fn pointer_left(&mut self) {
        self.pointer_inside = false;
    }

    /// Clears the per-frame "went down" sets.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// True when `key` went down since the last frame.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    pub fn button_pressed(&self, btn: MouseButton) -> bool {
        self.buttons_pressed.contains(&btn)
    }

    /// Last known pointer position, `(0, 0)` before the pointer has been seen.
    pub fn mouse_pos(&self) -> Vec2 {
        self.pointer_pos.map(Vec2::from).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: Key) -> Event {
        Event::KeyDown { key, modifiers: Modifiers::default(), repeat: false }
    }

    fn key_up(key: Key) -> Event {
        Event::KeyUp { key, modifiers: Modifiers::default() }
    }

    #[test]
    fn key_press_and_release() {
        let mut s = InputState::default();
        s.apply(&key_down(Key::A));
        assert!(s.key_down(Key::A));
        assert!(s.key_pressed(Key::A));

        s.end_frame();
        assert!(s.key_down(Key::A));
        assert!(!s.key_pressed(Key::A));

        s.apply(&key_up(Key::A));
        assert!(!s.key_down(Key::A));
    }

    #[test]
    fn repeat_does_not_count_as_new_press() {
        let mut s = InputState::default();
        s.apply(&key_down(Key::Space));
        s.end_frame();
        s.apply(&Event::KeyDown { key: Key::Space, modifiers: Modifiers::default(), repeat: true });
        assert!(!s.key_pressed(Key::Space));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        s.apply(&Event::FocusGained);
        s.apply(&key_down(Key::W));
        s.apply(&Event::MouseDown { button: MouseButton::Left, x: 1.0, y: 2.0 });
        s.apply(&Event::FocusLost);
        assert!(!s.focused);
        assert!(!s.key_down(Key::W));
        assert!(!s.button_down(MouseButton::Left));
    }

    #[test]
    fn mouse_pos_tracks_pointer_events() {
        let mut s = InputState::default();
        assert_eq!(s.mouse_pos(), Vec2::zero());
        s.apply(&Event::MouseMotion { x: 10.0, y: 20.0 });
        assert_eq!(s.mouse_pos(), Vec2::new(10.0, 20.0));
        s.apply(&Event::MouseUp { button: MouseButton::Right, x: 5.0, y: 6.0 });
        assert_eq!(s.mouse_pos(), Vec2::new(5.0, 6.0));
    }

    #[test]
    fn leaving_the_window_keeps_last_position() {
        let mut s = InputState::default();
        s.apply(&Event::MouseMotion { x: 600.0, y: 400.0 });
        assert!(s.pointer_inside);
        s.pointer_left();
        assert!(!s.pointer_inside);
        assert_eq!(s.mouse_pos(), Vec2::new(600.0, 400.0));
        assert!(!crate::coords::Rect::new(0.0, 0.0, 50.0, 50.0).collidevec(s.mouse_pos()));
    }
}
