//! Input subsystem: terminal events → timeline actions.

pub mod service;

// Modules outside this crate should prefer importing from `crate::input`
// rather than reaching into submodules.
pub use service::{FocusDirection, InputAction, InputService, InputState, InputStateMachine};
