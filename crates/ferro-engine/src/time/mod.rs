//! Time subsystem.
//!
//! Provides frame timing without coupling to the runtime:
//! - one `FrameClock` per window
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - `FrameTime::elapsed` feeds the `time` uniform of the noise field

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
