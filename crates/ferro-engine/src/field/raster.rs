use anyhow::{ensure, Context, Result};

use crate::coords::SurfaceSize;

use super::shade::{shade, Uniforms};
use super::DVec2;

/// Largest width or height [`render_rgba8`] accepts.
pub const MAX_RASTER_DIM: u32 = 16384;

/// Rasterizes one frame of the field on the CPU into tightly packed RGBA8.
///
/// Rows are written top-down. Fragment coordinates follow the GPU convention
/// (origin bottom-left, pixel centres at `.5`). Channels are clamped to
/// `[0, 1]` only when quantizing to bytes.
pub fn render_rgba8(size: SurfaceSize, time: f64, mouse: DVec2) -> Result<Vec<u8>> {
    ensure!(size.is_valid(), "cannot render a {}x{} surface", size.width, size.height);
    ensure!(
        size.width <= MAX_RASTER_DIM && size.height <= MAX_RASTER_DIM,
        "cannot render a {}x{} surface: limit is {MAX_RASTER_DIM} px per side",
        size.width,
        size.height
    );

    let uniforms = Uniforms::new(
        time,
        mouse,
        DVec2::new(size.width as f64, size.height as f64),
    );

    let (w, h) = (size.width as usize, size.height as usize);
    let len = w
        .checked_mul(h)
        .and_then(|px| px.checked_mul(4))
        .context("RGBA8 buffer size overflows usize")?;
    let mut out = Vec::with_capacity(len);

    for row in 0..h {
        let y = (h - 1 - row) as f64 + 0.5;
        for col in 0..w {
            let c = shade(DVec2::new(col as f64 + 0.5, y), &uniforms);
            out.extend(c.iter().map(|&v| quantize(v)));
        }
    }

    log::debug!("rasterized {}x{} field at t={time}", size.width, size.height);
    Ok(out)
}

#[inline]
fn quantize(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert!(render_rgba8(SurfaceSize::new(0, 10), 0.0, DVec2::default()).is_err());
    }

    #[test]
    fn oversized_surface_is_rejected_before_allocating() {
        let err = render_rgba8(SurfaceSize::new(100_000, 100_000), 0.0, DVec2::default())
            .unwrap_err();
        assert!(err.to_string().contains("limit"), "{err}");
        assert!(render_rgba8(SurfaceSize::new(1, MAX_RASTER_DIM + 1), 0.0, DVec2::default()).is_err());
    }

    #[test]
    fn buffer_is_tightly_packed_and_opaque() {
        let px = render_rgba8(SurfaceSize::new(5, 3), 1.0, DVec2::default()).unwrap();
        assert_eq!(px.len(), 5 * 3 * 4);
        assert!(px.chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn first_row_is_the_top_of_the_surface() {
        let size = SurfaceSize::new(4, 4);
        let px = render_rgba8(size, 0.0, DVec2::default()).unwrap();

        let u = Uniforms::new(0.0, DVec2::default(), DVec2::new(4.0, 4.0));
        let top_left = shade(DVec2::new(0.5, 3.5), &u);
        let expected: Vec<u8> = top_left.iter().map(|&v| quantize(v)).collect();
        assert_eq!(&px[..4], expected.as_slice());
    }

    #[test]
    fn quantize_clamps_overbright() {
        assert_eq!(quantize(2.5), 255);
        assert_eq!(quantize(-0.1), 0);
        assert_eq!(quantize(0.5), 128);
    }
}
