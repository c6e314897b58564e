use std::ops;

use super::{
    point::Point,
    tuple::{Axis, Tuple, impl_componentwise_op, impl_tuple},
};

/// Direction in space, w = 0.
#[derive(Copy, Clone, Debug, Default)]
pub struct Vector {
    x: f64,
    y: f64,
    z: f64,
}

impl_tuple!(Vector, w = 0.);

impl_componentwise_op!(Vector, Vector => Vector, Add::add, +);
impl_componentwise_op!(Vector, Vector => Vector, Sub::sub, -);
impl_componentwise_op!(Vector, Point => Point, Add::add, +);

impl Vector {
    /// Vector of `length` along a single axis.
    pub fn along(axis: Axis, length: f64) -> Self {
        match axis {
            Axis::X => Self::new(length, 0., 0.),
            Axis::Y => Self::new(0., length, 0.),
            Axis::Z => Self::new(0., 0., length),
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// The zero vector normalizes to itself.
    pub fn normalize(&self) -> Self {
        let len = self.magnitude();
        if len == 0. { Self::zero() } else { *self / len }
    }

    pub fn cross(&self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }

    pub fn dot(&self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Mirrors `self` around `normal`.
    pub fn reflect(&self, normal: Self) -> Self {
        *self - normal * (2. * self.dot(normal))
    }
}

impl ops::Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self * -1.
    }
}

impl ops::Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, factor: f64) -> Self::Output {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl ops::Div<f64> for Vector {
    type Output = Self;

    fn div(self, divisor: f64) -> Self::Output {
        Self::new(self.x / divisor, self.y / divisor, self.z / divisor)
    }
}
