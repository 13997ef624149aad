//! Input subsystem.
//!
//! Games see platform-agnostic [`Event`]s pulled one at a time from an
//! [`EventQueue`], plus the held-key / pointer snapshot in [`InputState`].
//! The runtime translates winit events through [`translate`].

mod event;
mod queue;
mod state;
mod types;

pub mod translate;

pub use event::{Event, EventType};
pub use queue::{EventQueue, MAX_PENDING_EVENTS};
pub use state::InputState;
pub use types::{Key, Modifiers, MouseButton};
