/// Drawable surface size in physical pixels.
///
/// Minimized windows report `0x0`; such sizes are tracked but never uploaded
/// as the resolution uniform (see [`SurfaceSize::is_valid`]).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are non-zero.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width over height. Only meaningful for valid sizes.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }

    #[inline]
    pub fn to_array(self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_invalid() {
        assert!(!SurfaceSize::new(0, 600).is_valid());
        assert!(!SurfaceSize::new(800, 0).is_valid());
        assert!(SurfaceSize::new(1, 1).is_valid());
    }

    #[test]
    fn aspect_is_width_over_height() {
        assert!((SurfaceSize::new(800, 600).aspect() - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(SurfaceSize::new(600, 600).aspect(), 1.0);
    }
}
