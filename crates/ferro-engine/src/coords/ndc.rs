use super::{Vec2, Viewport};

/// Maps a pointer position in logical pixels to normalized device coordinates.
///
/// `(2*x/width - 1, -(2*y/height - 1))`: the window origin is top-left with +Y
/// down, NDC is centred with +Y up. Results are clamped to `[-1, 1]^2` because
/// some platforms keep reporting positions outside the window during a drag.
///
/// An invalid viewport maps every position to the origin.
pub fn to_ndc(pos: Vec2, viewport: Viewport) -> Vec2 {
    if !viewport.is_valid() || !pos.is_finite() {
        return Vec2::zero();
    }

    let x = 2.0 * pos.x / viewport.width - 1.0;
    let y = -(2.0 * pos.y / viewport.height - 1.0);
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport { Viewport::new(800.0, 600.0) }

    #[test]
    fn centre_maps_to_origin() {
        assert_eq!(to_ndc(Vec2::new(400.0, 300.0), vp()), Vec2::zero());
    }

    #[test]
    fn top_left_maps_to_minus_one_plus_one() {
        // Vertical flip: top of the window is +1.
        assert_eq!(to_ndc(Vec2::new(0.0, 0.0), vp()), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn bottom_right_maps_to_plus_one_minus_one() {
        assert_eq!(to_ndc(Vec2::new(800.0, 600.0), vp()), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn outside_positions_are_clamped() {
        let p = to_ndc(Vec2::new(-50.0, 900.0), vp());
        assert_eq!(p, Vec2::new(-1.0, -1.0));
    }

    #[test]
    fn invalid_viewport_yields_origin() {
        let p = to_ndc(Vec2::new(10.0, 10.0), Viewport::new(0.0, 600.0));
        assert_eq!(p, Vec2::zero());
    }
}
