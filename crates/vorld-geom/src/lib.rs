//! Geometry primitives shared by the voxel crates: vectors, cardinal directions and rotations.
#![forbid(unsafe_code)]

mod cardinal;

pub use cardinal::{Axis, Direction, Rotation};

use core::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const HALF: Vec3 = Vec3 {
        x: 0.5,
        y: 0.5,
        z: 0.5,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[inline]
    pub fn floor(self) -> Vec3 {
        Vec3::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    /// Component-wise `self - self.floor()`.
    #[inline]
    pub fn fract(self) -> Vec3 {
        self - self.floor()
    }

    #[inline]
    pub fn component(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // fract stays in [0,1) and floor + fract reconstructs the input
        #[test]
        fn floor_plus_fract_is_identity(v in any::<Vec3>()) {
            prop_assume!(v.x.is_finite() && v.y.is_finite() && v.z.is_finite());
            prop_assume!(v.x.abs() < 1e6 && v.y.abs() < 1e6 && v.z.abs() < 1e6);
            let f = v.fract();
            for c in [f.x, f.y, f.z] {
                prop_assert!((0.0..=1.0).contains(&c));
            }
            let back = v.floor() + f;
            prop_assert!((back.x - v.x).abs() < 1e-3);
            prop_assert!((back.y - v.y).abs() < 1e-3);
            prop_assert!((back.z - v.z).abs() < 1e-3);
        }
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }
}
