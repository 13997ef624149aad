use super::types::{Key, Modifiers, MouseButton};

/// Coarse event kind, for callers that only branch on the category.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventType {
    Quit,
    KeyDown,
    KeyUp,
    MouseDown,
    MouseUp,
    MouseMotion,
    MouseWheel,
    Focus,
}

/// A polled input notification.
///
/// Pointer coordinates are logical pixels relative to the window's top-left.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user asked to close the window.
    Quit,

    KeyDown {
        key: Key,
        modifiers: Modifiers,
        /// True for auto-repeat presses.
        repeat: bool,
    },

    KeyUp {
        key: Key,
        modifiers: Modifiers,
    },

    MouseDown {
        button: MouseButton,
        x: f32,
        y: f32,
    },

    MouseUp {
        button: MouseButton,
        x: f32,
        y: f32,
    },

    MouseMotion {
        x: f32,
        y: f32,
    },

    /// Scroll amount in lines (positive `y` scrolls up).
    MouseWheel {
        x: f32,
        y: f32,
    },

    FocusGained,
    FocusLost,
}

impl Event {
    pub fn kind(&self) -> EventType {
        match self {
            Event::Quit => EventType::Quit,
            Event::KeyDown { .. } => EventType::KeyDown,
            Event::KeyUp { .. } => EventType::KeyUp,
            Event::MouseDown { .. } => EventType::MouseDown,
            Event::MouseUp { .. } => EventType::MouseUp,
            Event::MouseMotion { .. } => EventType::MouseMotion,
            Event::MouseWheel { .. } => EventType::MouseWheel,
            Event::FocusGained | Event::FocusLost => EventType::Focus,
        }
    }

    /// The key carried by a key event.
    pub fn key(&self) -> Option<Key> {
        match self {
            Event::KeyDown { key, .. } | Event::KeyUp { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// True for a (non-repeat or repeat) press of `key`.
    pub fn is_key_down(&self, key: Key) -> bool {
        matches!(self, Event::KeyDown { key: k, .. } if *k == key)
    }

    /// Pointer position carried by mouse button and motion events.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        match self {
            Event::MouseDown { x, y, .. }
            | Event::MouseUp { x, y, .. }
            | Event::MouseMotion { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}
