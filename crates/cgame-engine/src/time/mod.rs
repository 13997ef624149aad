//! Time subsystem.
//!
//! [`Clock`] measures the time between frames and, when asked for a target
//! frame rate, sleeps off whatever is left of the frame budget.

mod clock;

pub use clock::{frame_budget, Clock, FrameTime};
