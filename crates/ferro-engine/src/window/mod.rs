//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the Window, and wires them to the GPU layer.

mod listener;
mod runtime;

pub use listener::ListenerGuard;
pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
