//! Domain-warped fbm shading of a single pixel.

use super::noise::{fbm, mix, smoothstep};
use super::DVec2;

/// Linear RGB triple.
pub type Rgb = [f64; 3];

/// Base of the primary blend (low `f`).
pub const TEAL: Rgb = [0.101961, 0.619608, 0.666667];
/// Target of the primary blend (high `f`).
pub const OLIVE: Rgb = [0.666667, 0.666667, 0.498039];
/// Blended in by the magnitude of the first warp vector.
pub const NIGHT_BLUE: Rgb = [0.0, 0.0, 0.164706];
/// Blended in by the magnitude of the second warp's x component.
pub const PALE_CYAN: Rgb = [0.666667, 1.0, 1.0];

/// Radius (in `st` units) over which the pointer ramp goes from 0 to 1.
pub const POINTER_RADIUS: f64 = 0.3;

/// Per-frame inputs of the field, constant across all pixels of a frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Uniforms {
    /// Seconds since the first frame.
    pub time: f64,
    /// Pointer position in NDC.
    pub mouse: DVec2,
    /// Surface size in pixels. Both components must be > 0.
    pub resolution: DVec2,
}

impl Uniforms {
    pub fn new(time: f64, mouse: DVec2, resolution: DVec2) -> Self {
        Self { time, mouse, resolution }
    }
}

/// The two domain-warp vectors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Warp {
    pub q: DVec2,
    pub r: DVec2,
}

/// Every intermediate of one pixel evaluation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sample {
    /// Aspect-corrected working coordinate.
    pub st: DVec2,
    pub warp: Warp,
    /// Distance from `st` to the pointer in `st` space.
    pub dist: f64,
    /// Field value after pointer attenuation.
    pub f: f64,
    /// Output RGBA, not clamped; alpha is always 1.
    pub color: [f64; 4],
}

/// Normalizes a fragment coordinate (origin bottom-left, pixel centres at
/// `.5`) to `st`, scaling x by the aspect ratio so noise cells stay square.
#[inline]
pub fn sample_st(frag_coord: DVec2, resolution: DVec2) -> DVec2 {
    let st = frag_coord / resolution;
    DVec2::new(st.x * (resolution.x / resolution.y), st.y)
}

/// Computes the double warp `q`, `r` at `st` for `time`.
pub fn warp(st: DVec2, time: f64) -> Warp {
    let q = DVec2::new(fbm(st + 0.1 * time), fbm(st + DVec2::splat(1.0)));

    let r = DVec2::new(
        fbm(st + q + DVec2::new(1.7, 9.2) + 0.15 * time),
        fbm(st + q + DVec2::new(8.3, 2.8) + 0.126 * time),
    );

    Warp { q, r }
}

/// Warped field value at `st`, before the pointer term.
#[inline]
pub fn field_value(st: DVec2, warp: &Warp) -> f64 {
    fbm(st + warp.r)
}

/// Blends `f` toward `f * 0.5` with a smoothstep ramp over `[0, POINTER_RADIUS]` of `dist`.
#[inline]
pub fn pointer_attenuation(f: f64, dist: f64) -> f64 {
    mix(f, f * 0.5, smoothstep(0.0, POINTER_RADIUS, dist))
}

/// Brightness curve applied to the final color: `f³ + 0.6f² + 0.5f`.
#[inline]
pub fn intensity(f: f64) -> f64 {
    f * f * f + 0.6 * f * f + 0.5 * f
}

/// Color ramp for a field value and its warp vectors.
///
/// The last blend is gated by `|r.x|`, the x component alone, not `|r|`.
pub fn palette(f: f64, warp: &Warp) -> Rgb {
    let color = mix3(TEAL, OLIVE, (f * f * 4.0).clamp(0.0, 1.0));
    let color = mix3(color, NIGHT_BLUE, warp.q.length().clamp(0.0, 1.0));
    mix3(color, PALE_CYAN, warp.r.x.abs().clamp(0.0, 1.0))
}

/// Evaluates one fragment, keeping every intermediate.
pub fn evaluate(frag_coord: DVec2, uniforms: &Uniforms) -> Sample {
    let st = sample_st(frag_coord, uniforms.resolution);

    // The pointer is in NDC but shares the pixel divisor; kept as-is.
    let mouse_pos = uniforms.mouse / uniforms.resolution;
    let dist = st.distance(mouse_pos);

    let warp = warp(st, uniforms.time);
    let f = pointer_attenuation(field_value(st, &warp), dist);

    let rgb = palette(f, &warp);
    let k = intensity(f);

    Sample {
        st,
        warp,
        dist,
        f,
        color: [rgb[0] * k, rgb[1] * k, rgb[2] * k, 1.0],
    }
}

/// Output RGBA of one fragment. Values above 1.0 are passed through.
#[inline]
pub fn shade(frag_coord: DVec2, uniforms: &Uniforms) -> [f64; 4] {
    evaluate(frag_coord, uniforms).color
}

#[inline]
fn mix3(a: Rgb, b: Rgb, t: f64) -> Rgb {
    [mix(a[0], b[0], t), mix(a[1], b[1], t), mix(a[2], b[2], t)]
}
