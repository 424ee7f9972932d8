//! Ferrofluid engine crate.
//!
//! Owns the platform + GPU runtime (window, device, input, frame clock) and the
//! noise field: the WGSL program that draws it and a CPU reference of the same
//! math.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod field;

mod app;

pub use app::{FerrofluidApp, KeyAction};
