//! Coordinate and geometry types shared by the runtime, input and renderers.
//!
//! Spaces in use:
//! - Logical pixels (DPI-aware), origin top-left, +X right, +Y down.
//! - Physical surface pixels (`SurfaceSize`), what the swapchain is sized in.
//! - Normalized device coordinates, origin at the centre, +Y up, `[-1, 1]^2`.

mod ndc;
mod size;
mod vec2;
mod viewport;

pub use ndc::to_ndc;
pub use size::SurfaceSize;
pub use vec2::Vec2;
pub use viewport::Viewport;
