//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and builds them
//! lazily against the current surface format.

mod common;
mod ctx;
mod ferrofluid;

pub use ctx::{RenderCtx, RenderTarget};
pub use ferrofluid::{FerrofluidRenderer, FerrofluidUniform, FERROFLUID_WGSL};
