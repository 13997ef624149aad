//! winit → [`Event`] translation.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use super::{Event, InputState, Key, Modifiers, MouseButton};

/// Pixels per scroll line when a touchpad reports pixel deltas.
const PIXELS_PER_LINE: f32 = 20.0;

/// Translates a winit `WindowEvent` into a game [`Event`].
///
/// Bookkeeping-only events (modifier changes, pointer leaving the window)
/// update `state` directly and yield `None`, as does everything the game
/// does not see (resize, redraw, IME, ...).
pub fn translate_window_event(
    scale_factor: f64,
    state: &mut InputState,
    event: &WindowEvent,
) -> Option<Event> {
    match event {
        WindowEvent::CloseRequested => Some(Event::Quit),

        WindowEvent::Focused(true) => Some(Event::FocusGained),
        WindowEvent::Focused(false) => Some(Event::FocusLost),

        WindowEvent::ModifiersChanged(m) => {
            state.modifiers = map_modifiers(m.state());
            None
        }

        WindowEvent::CursorLeft { .. } => {
            state.pointer_left();
            None
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale_factor, *position);
            Some(Event::MouseMotion { x, y })
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let button = map_mouse_button(*button);

            // winit 0.30 has no cursor query; use the tracked pointer position.
            let (x, y) = state.pointer_pos.unwrap_or((0.0, 0.0));

            Some(match st {
                ElementState::Pressed => Event::MouseDown { button, x, y },
                ElementState::Released => Event::MouseUp { button, x, y },
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = to_logical_f32(scale_factor, *p);
                    (x / PIXELS_PER_LINE, y / PIXELS_PER_LINE)
                }
            };
            Some(Event::MouseWheel { x, y })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let key = map_key(event.physical_key);
            let modifiers = state.modifiers;

            Some(match event.state {
                ElementState::Pressed => Event::KeyDown { key, modifiers, repeat: event.repeat },
                ElementState::Released => Event::KeyUp { key, modifiers },
            })
        }

        _ => None,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => {
            match code {
                KeyCode::Escape => Key::Escape,
                KeyCode::Enter => Key::Enter,
                KeyCode::Tab => Key::Tab,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Space => Key::Space,

                KeyCode::Insert => Key::Insert,
                KeyCode::Delete => Key::Delete,
                KeyCode::Home => Key::Home,
                KeyCode::End => Key::End,
                KeyCode::PageUp => Key::PageUp,
                KeyCode::PageDown => Key::PageDown,

                KeyCode::ArrowUp => Key::ArrowUp,
                KeyCode::ArrowDown => Key::ArrowDown,
                KeyCode::ArrowLeft => Key::ArrowLeft,
                KeyCode::ArrowRight => Key::ArrowRight,

                KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
                KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
                KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
                KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

                KeyCode::KeyA => Key::A,
                KeyCode::KeyB => Key::B,
                KeyCode::KeyC => Key::C,
                KeyCode::KeyD => Key::D,
                KeyCode::KeyE => Key::E,
                KeyCode::KeyF => Key::F,
                KeyCode::KeyG => Key::G,
                KeyCode::KeyH => Key::H,
                KeyCode::KeyI => Key::I,
                KeyCode::KeyJ => Key::J,
                KeyCode::KeyK => Key::K,
                KeyCode::KeyL => Key::L,
                KeyCode::KeyM => Key::M,
                KeyCode::KeyN => Key::N,
                KeyCode::KeyO => Key::O,
                KeyCode::KeyP => Key::P,
                KeyCode::KeyQ => Key::Q,
                KeyCode::KeyR => Key::R,
                KeyCode::KeyS => Key::S,
                KeyCode::KeyT => Key::T,
                KeyCode::KeyU => Key::U,
                KeyCode::KeyV => Key::V,
                KeyCode::KeyW => Key::W,
                KeyCode::KeyX => Key::X,
                KeyCode::KeyY => Key::Y,
                KeyCode::KeyZ => Key::Z,

                KeyCode::Digit0 => Key::Digit0,
                KeyCode::Digit1 => Key::Digit1,
                KeyCode::Digit2 => Key::Digit2,
                KeyCode::Digit3 => Key::Digit3,
                KeyCode::Digit4 => Key::Digit4,
                KeyCode::Digit5 => Key::Digit5,
                KeyCode::Digit6 => Key::Digit6,
                KeyCode::Digit7 => Key::Digit7,
                KeyCode::Digit8 => Key::Digit8,
                KeyCode::Digit9 => Key::Digit9,

                KeyCode::F1 => Key::F1,
                KeyCode::F2 => Key::F2,
                KeyCode::F3 => Key::F3,
                KeyCode::F4 => Key::F4,
                KeyCode::F5 => Key::F5,
                KeyCode::F6 => Key::F6,
                KeyCode::F7 => Key::F7,
                KeyCode::F8 => Key::F8,
                KeyCode::F9 => Key::F9,
                KeyCode::F10 => Key::F10,
                KeyCode::F11 => Key::F11,
                KeyCode::F12 => Key::F12,

                other => Key::Unknown(other as u32),
            }
        }

        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_is_quit() {
        let mut s = InputState::default();
        assert_eq!(translate_window_event(1.0, &mut s, &WindowEvent::CloseRequested), Some(Event::Quit));
    }

    #[test]
    fn focus_changes() {
        let mut s = InputState::default();
        assert_eq!(translate_window_event(1.0, &mut s, &WindowEvent::Focused(true)), Some(Event::FocusGained));
        assert_eq!(translate_window_event(1.0, &mut s, &WindowEvent::Focused(false)), Some(Event::FocusLost));
    }

    #[test]
    fn modifiers_update_state_without_event() {
        let mut s = InputState::default();
        let ev = WindowEvent::ModifiersChanged((ModifiersState::SHIFT | ModifiersState::CONTROL).into());
        assert_eq!(translate_window_event(1.0, &mut s, &ev), None);
        assert!(s.modifiers.shift && s.modifiers.ctrl);
        assert!(!s.modifiers.alt);
    }

    #[test]
    fn unrelated_events_are_dropped() {
        let mut s = InputState::default();
        assert_eq!(translate_window_event(1.0, &mut s, &WindowEvent::RedrawRequested), None);
    }

    #[test]
    fn cursor_leaving_keeps_position() {
        // SAFETY: the dummy id is only compared, never dereferenced.
        let device_id = unsafe { winit::event::DeviceId::dummy() };
        let mut s = InputState::default();

        let moved = WindowEvent::CursorMoved { device_id, position: PhysicalPosition::new(600.0, 400.0) };
        let ev = translate_window_event(1.0, &mut s, &moved);
        assert_eq!(ev, Some(Event::MouseMotion { x: 600.0, y: 400.0 }));
        if let Some(ev) = &ev {
            s.apply(ev);
        }

        assert_eq!(translate_window_event(1.0, &mut s, &WindowEvent::CursorLeft { device_id }), None);
        assert!(!s.pointer_inside);
        assert_eq!(s.mouse_pos(), crate::coords::Vec2::new(600.0, 400.0));
    }

    #[test]
    fn key_mapping() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Q);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Key::Shift);
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::NumpadAdd)), Key::Unknown(_)));
    }

    #[test]
    fn pixel_positions_become_logical() {
        let (x, y) = to_logical_f32(2.0, PhysicalPosition::new(100.0, 50.0));
        assert_eq!((x, y), (50.0, 25.0));
        assert_eq!(map_mouse_button(WinitMouseButton::Middle).number(), 2);
    }
}
