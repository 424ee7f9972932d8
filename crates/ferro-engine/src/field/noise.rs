//! Hash, value noise and fractal Brownian motion.

use super::DVec2;

/// Number of fbm octaves.
pub const OCTAVES: u32 = 6;

const HASH_DIR: DVec2 = DVec2::new(12.9898, 78.233);
const HASH_SCALE: f64 = 43758.5453123;

/// GLSL `fract`: `x - floor(x)`.
#[inline]
pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

/// GLSL `mix`: `a * (1 - t) + b * t`.
#[inline]
pub fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// GLSL `smoothstep`: Hermite ramp `3t² - 2t³` of `x` over `[edge0, edge1]`.
#[inline]
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Deterministic pseudo-random value in `[0, 1)` for a 2D coordinate.
///
/// `fract(sin(dot(p, (12.9898, 78.233))) * 43758.5453123)`. Changing any of
/// these constants changes the texture.
#[inline]
pub fn random(p: DVec2) -> f64 {
    fract(p.dot(HASH_DIR).sin() * HASH_SCALE)
}

/// Value noise: bilinear blend of the four surrounding lattice hashes with a
/// Hermite-eased fractional part. Continuous everywhere, in `[0, 1]`.
pub fn noise(p: DVec2) -> f64 {
    let i = p.floor();
    let f = p.fract();

    let a = random(i);
    let b = random(i + DVec2::new(1.0, 0.0));
    let c = random(i + DVec2::new(0.0, 1.0));
    let d = random(i + DVec2::new(1.0, 1.0));

    let u = f * f * (DVec2::splat(3.0) - f * 2.0);

    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

/// Amplitude of octave `i` (0-based): `0.5, 0.25, 0.125, ...`.
#[inline]
pub fn octave_amplitude(i: u32) -> f64 {
    0.5_f64.powi(i as i32 + 1)
}

/// Contribution of octave `i` to `fbm(p)` in isolation.
#[inline]
pub fn octave(p: DVec2, i: u32) -> f64 {
    octave_amplitude(i) * noise(p * 2.0_f64.powi(i as i32))
}

/// Fractal Brownian motion: `OCTAVES` octaves of [`noise`], doubling the
/// frequency and halving the amplitude each step. Range `[0, 1 - 2^-OCTAVES]`.
pub fn fbm(p: DVec2) -> f64 {
    let mut st = p;
    let mut value = 0.0;
    let mut amplitude = 0.5;
    for _ in 0..OCTAVES {
        value += amplitude * noise(st);
        st = st * 2.0;
        amplitude *= 0.5;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_is_deterministic() {
        let p = DVec2::new(3.25, -17.5);
        assert_eq!(random(p).to_bits(), random(p).to_bits());
    }

    #[test]
    fn random_matches_literal_formula() {
        let expected = fract((12.9898_f64).sin() * 43758.5453123);
        assert_eq!(random(DVec2::new(1.0, 0.0)), expected);
        assert_eq!(random(DVec2::new(0.0, 0.0)), 0.0);
    }

    #[test]
    fn random_stays_in_unit_interval() {
        for i in -50..50 {
            for j in -50..50 {
                let v = random(DVec2::new(i as f64 * 0.37, j as f64 * 1.13));
                assert!((0.0..1.0).contains(&v), "random out of range: {v}");
            }
        }
    }

    #[test]
    fn noise_equals_hash_on_lattice() {
        let p = DVec2::new(4.0, -2.0);
        assert!((noise(p) - random(p)).abs() < 1e-12);
    }

    #[test]
    fn noise_is_continuous_across_lattice_lines() {
        let eps = 1e-7;
        for (x, y) in [(3.0, 5.0), (-1.0, 0.0), (10.0, -7.0)] {
            let lattice = DVec2::new(x, y);
            let at = noise(lattice);
            for dir in [
                DVec2::new(eps, 0.0),
                DVec2::new(-eps, 0.0),
                DVec2::new(0.0, eps),
                DVec2::new(0.0, -eps),
                DVec2::new(eps, eps),
                DVec2::new(-eps, -eps),
            ] {
                let near = noise(lattice + dir);
                assert!((near - at).abs() < 1e-5, "jump at {lattice:?} dir {dir:?}");
            }

            // Midpoint of a cell edge, approached from both cells.
            let edge = DVec2::new(x, y + 0.5);
            let left = noise(edge - DVec2::new(eps, 0.0));
            let right = noise(edge + DVec2::new(eps, 0.0));
            assert!((left - right).abs() < 1e-5);
        }
    }

    #[test]
    fn octave_amplitudes_halve() {
        let amps: Vec<f64> = (0..OCTAVES).map(octave_amplitude).collect();
        assert_eq!(amps[0], 0.5);
        for w in amps.windows(2) {
            assert!(w[1] < w[0]);
            assert_eq!(w[1], w[0] * 0.5);
        }
    }

    #[test]
    fn octave_contribution_is_bounded_by_its_amplitude() {
        let p = DVec2::new(0.731, 2.19);
        for i in 0..OCTAVES {
            let c = octave(p, i);
            assert!(c >= 0.0 && c <= octave_amplitude(i));
        }
    }

    #[test]
    fn fbm_is_sum_of_octaves() {
        let p = DVec2::new(1.7, 9.2);
        let sum: f64 = (0..OCTAVES).map(|i| octave(p, i)).sum();
        assert!((fbm(p) - sum).abs() < 1e-12);
    }

    #[test]
    fn fbm_range() {
        let max = 1.0 - 0.5_f64.powi(OCTAVES as i32);
        for i in 0..40 {
            let v = fbm(DVec2::new(i as f64 * 0.173, i as f64 * -0.311));
            assert!((0.0..=max).contains(&v));
        }
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 0.3, 0.0), 0.0);
        assert_eq!(smoothstep(0.0, 0.3, 0.3), 1.0);
        assert_eq!(smoothstep(0.0, 0.3, 5.0), 1.0);
        assert!((smoothstep(0.0, 0.3, 0.15) - 0.5).abs() < 1e-12);
    }
}
