//! Input subsystem.
//!
//! Public API is platform-agnostic. `platform` translates winit events into
//! `InputEvent`s; the runtime applies them to `InputState` as they arrive.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, PointerMoveEvent, ResizeEvent};
