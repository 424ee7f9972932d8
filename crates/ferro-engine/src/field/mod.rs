//! CPU reference of the ferrofluid noise field.
//!
//! Mirrors `render/shaders/ferrofluid.wgsl` in double precision. The GPU path
//! draws the demo; this module pins down the math for tests and renders
//! snapshots without a window.
//!
//! Pipeline per pixel:
//! 1. `st` = fragment / resolution, x scaled by the aspect ratio
//! 2. double domain warp `q`, `r` built from [`fbm`]
//! 3. `f = fbm(st + r)`, then the pointer ramp
//! 4. palette blends gated by `f²`, `|q|` and `|r.x|`, scaled by `f³ + 0.6f² + 0.5f`

mod dvec2;
mod noise;
mod raster;
mod shade;

pub use dvec2::DVec2;
pub use noise::{fbm, fract, mix, noise, octave, octave_amplitude, random, smoothstep, OCTAVES};
pub use raster::{render_rgba8, MAX_RASTER_DIM};
pub use shade::{
    evaluate, field_value, intensity, palette, pointer_attenuation, sample_st, shade, warp,
    Rgb, Sample, Uniforms, Warp, NIGHT_BLUE, OLIVE, PALE_CYAN, POINTER_RADIUS, TEAL,
};
