use core::ops::{Add, Div, Mul, Sub};

/// Double-precision 2D vector with the GLSL helpers the field needs.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DVec2 {
    pub x: f64,
    pub y: f64,
}

impl DVec2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    #[inline]
    pub fn dot(self, rhs: DVec2) -> f64 {
        self.x * rhs.x + self.y * rhs.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, rhs: DVec2) -> f64 {
        (self - rhs).length()
    }

    #[inline]
    pub fn floor(self) -> DVec2 {
        DVec2::new(self.x.floor(), self.y.floor())
    }

    /// `x - floor(x)` per component, always in `[0, 1)`.
    #[inline]
    pub fn fract(self) -> DVec2 {
        self - self.floor()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for DVec2 {
    type Output = DVec2;
    #[inline]
    fn add(self, rhs: DVec2) -> DVec2 {
        DVec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Scalar broadcast, as in GLSL `vec2 + float`.
impl Add<f64> for DVec2 {
    type Output = DVec2;
    #[inline]
    fn add(self, rhs: f64) -> DVec2 {
        DVec2::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for DVec2 {
    type Output = DVec2;
    #[inline]
    fn sub(self, rhs: DVec2) -> DVec2 {
        DVec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for DVec2 {
    type Output = DVec2;
    #[inline]
    fn mul(self, rhs: f64) -> DVec2 {
        DVec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Component-wise product.
impl Mul for DVec2 {
    type Output = DVec2;
    #[inline]
    fn mul(self, rhs: DVec2) -> DVec2 {
        DVec2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

/// Component-wise quotient.
impl Div for DVec2 {
    type Output = DVec2;
    #[inline]
    fn div(self, rhs: DVec2) -> DVec2 {
        DVec2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl From<crate::coords::Vec2> for DVec2 {
    fn from(v: crate::coords::Vec2) -> Self {
        DVec2::new(v.x as f64, v.y as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fract_of_negative_is_positive() {
        let f = DVec2::new(-0.25, -3.75).fract();
        assert_eq!(f, DVec2::new(0.75, 0.25));
    }

    #[test]
    fn scalar_add_broadcasts() {
        assert_eq!(DVec2::new(1.0, 2.0) + 0.5, DVec2::new(1.5, 2.5));
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(DVec2::new(0.0, 0.0).distance(DVec2::new(3.0, 4.0)), 5.0);
    }
}
