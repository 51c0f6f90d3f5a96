//! 2D geometry primitives for the bubble field.
//!
//! Positions are top-left corners of a bubble's bounding square; the center
//! is `position + diameter / 2` on each axis. Velocities are per-tick
//! displacements.

use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D vector, used for both positions and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit-circle direction at `angle` radians, scaled to `magnitude`.
    pub fn from_angle(angle: f64, magnitude: f64) -> Self {
        Self {
            x: angle.cos() * magnitude,
            y: angle.sin() * magnitude,
        }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Distance to another vector interpreted as a point.
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    /// Rescale to the given length, preserving direction.
    ///
    /// A zero vector has no direction and is returned unchanged.
    pub fn with_length(&self, target: f64) -> Self {
        let len = self.length();
        if len == 0.0 {
            return *self;
        }
        *self * (target / len)
    }

    /// Rotate by `angle` radians. Length is preserved.
    pub fn rotated(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Container dimensions for the bubble field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create new bounds.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A zero-area container cannot host bubbles; the field defers
    /// initialization until valid bounds are observed.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn from_angle_points_along_axes() {
        let east = Vec2::from_angle(0.0, 2.0);
        assert!((east.x - 2.0).abs() < EPS);
        assert!(east.y.abs() < EPS);

        let south = Vec2::from_angle(FRAC_PI_2, 3.0);
        assert!(south.x.abs() < EPS);
        assert!((south.y - 3.0).abs() < EPS);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec2::new(3.0, 4.0);
        for angle in [0.1, -0.5, PI, 2.0 * PI] {
            assert!((v.rotated(angle).length() - 5.0).abs() < EPS);
        }
    }

    #[test]
    fn with_length_rescales() {
        let v = Vec2::new(3.0, 4.0).with_length(10.0);
        assert!((v.length() - 10.0).abs() < EPS);
        // Direction preserved
        assert!((v.x - 6.0).abs() < EPS);
        assert!((v.y - 8.0).abs() < EPS);
    }

    #[test]
    fn with_length_on_zero_vector_is_zero() {
        assert_eq!(Vec2::ZERO.with_length(5.0), Vec2::ZERO);
    }

    #[test]
    fn degenerate_bounds_are_invalid() {
        assert!(Bounds::new(800.0, 600.0).is_valid());
        assert!(!Bounds::new(0.0, 600.0).is_valid());
        assert!(!Bounds::new(800.0, 0.0).is_valid());
        assert!(!Bounds::default().is_valid());
    }
}
