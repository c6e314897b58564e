use std::fmt::Display;

use super::{point::Point, vector::Vector};
use crate::{
    approx_eq::ApproxEq,
    error::{Error, Result},
};

/// Homogeneous coordinate with a fixed `w`.
/// `Point` has w = 1 and `Vector` has w = 0.
pub trait Tuple: Copy {
    fn new(x: f64, y: f64, z: f64) -> Self;

    fn x(&self) -> f64;
    fn y(&self) -> f64;
    fn z(&self) -> f64;
    fn w(&self) -> f64;

    fn zero() -> Self {
        Self::new(0., 0., 0.)
    }
}

/// Implements `Tuple`, axis indexing and approximate equality
/// for a struct with `x`, `y` and `z` fields and a constant `w`.
macro_rules! impl_tuple {
    ($name:ident, w = $w:expr) => {
        impl $crate::math::tuple::Tuple for $name {
            fn new(x: f64, y: f64, z: f64) -> Self {
                Self { x, y, z }
            }
            fn x(&self) -> f64 {
                self.x
            }
            fn y(&self) -> f64 {
                self.y
            }
            fn z(&self) -> f64 {
                self.z
            }
            fn w(&self) -> f64 {
                $w
            }
        }

        impl std::ops::Index<$crate::math::tuple::Axis> for $name {
            type Output = f64;

            fn index(&self, axis: $crate::math::tuple::Axis) -> &f64 {
                use $crate::math::tuple::Axis;
                match axis {
                    Axis::X => &self.x,
                    Axis::Y => &self.y,
                    Axis::Z => &self.z,
                }
            }
        }

        impl $crate::approx_eq::ApproxEq for $name {
            fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
                use $crate::approx_eq::ApproxEq as _;
                [self.x, self.y, self.z]
                    .as_slice()
                    .approx_eq_epsilon([other.x, other.y, other.z].as_slice(), epsilon)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::approx_eq::ApproxEq::approx_eq(self, other)
            }
        }
    };
}
pub(crate) use impl_tuple;

/// `lhs op rhs` applied to each coordinate.
macro_rules! impl_componentwise_op {
    ($lhs:ty, $rhs:ty => $out:ty, $trait:ident :: $method:ident, $op:tt) => {
        impl std::ops::$trait<$rhs> for $lhs {
            type Output = $out;

            fn $method(self, rhs: $rhs) -> $out {
                use $crate::math::tuple::Tuple;
                <$out>::new(self.x() $op rhs.x(), self.y() $op rhs.y(), self.z() $op rhs.z())
            }
        }
    };
}
pub(crate) use impl_componentwise_op;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "x" | "X" => Some(Self::X),
            "y" | "Y" => Some(Self::Y),
            "z" | "Z" => Some(Self::Z),
            _ => None,
        }
    }
}

/// A 4-component tuple whose kind is only known at runtime.
/// Arithmetic that would produce neither a point nor a vector is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tuple4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Tuple4 {
    pub const SIZE: usize = 4;

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.)
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0.)
    }

    pub fn is_point(&self) -> bool {
        self.w.approx_eq(&1.)
    }

    pub fn is_vector(&self) -> bool {
        self.w.approx_eq(&0.)
    }

    fn kind(&self) -> &'static str {
        if self.is_point() {
            "point"
        } else if self.is_vector() {
            "vector"
        } else {
            "tuple"
        }
    }

    pub fn get(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(Error::IndexOutOfRange {
                index,
                size: Self::SIZE,
            }),
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        if self.is_point() && rhs.is_point() {
            return Err(Error::InvalidOperation(
                "cannot add a point to a point".to_string(),
            ));
        }
        Ok(Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        ))
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        if self.is_vector() && rhs.is_point() {
            return Err(Error::InvalidOperation(
                "cannot subtract a point from a vector".to_string(),
            ));
        }
        Ok(Self::new(
            self.x - rhs.x,
            self.y - rhs.y,
            self.z - rhs.z,
            self.w - rhs.w,
        ))
    }

    pub fn negate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.z * factor,
            self.w * factor,
        )
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2) + self.w.powi(2)).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.magnitude();
        if len == 0. {
            return *self;
        }
        self.scale(1. / len)
    }

    fn require_vectors(&self, rhs: &Self, operation: &str) -> Result<()> {
        if self.is_vector() && rhs.is_vector() {
            return Ok(());
        }
        Err(Error::InvalidOperation(format!(
            "{operation} is defined only for vectors, got {} and {}",
            self.kind(),
            rhs.kind()
        )))
    }

    pub fn dot(&self, rhs: &Self) -> Result<f64> {
        self.require_vectors(rhs, "dot product")?;
        Ok(self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w)
    }

    pub fn cross(&self, rhs: &Self) -> Result<Self> {
        self.require_vectors(rhs, "cross product")?;
        Ok(Self::vector(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        ))
    }
}

impl ApproxEq for Tuple4 {
    fn approx_eq_epsilon(&self, other: &Self, epsilon: f64) -> bool {
        self.as_array()
            .as_slice()
            .approx_eq_epsilon(other.as_array().as_slice(), epsilon)
    }
}

impl PartialEq for Tuple4 {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other)
    }
}

impl Display for Tuple4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl From<Point> for Tuple4 {
    fn from(point: Point) -> Self {
        Self::new(point.x(), point.y(), point.z(), point.w())
    }
}

impl From<Vector> for Tuple4 {
    fn from(vector: Vector) -> Self {
        Self::new(vector.x(), vector.y(), vector.z(), vector.w())
    }
}

impl TryFrom<Tuple4> for Point {
    type Error = Error;

    fn try_from(tuple: Tuple4) -> Result<Self> {
        if !tuple.is_point() {
            return Err(Error::TypeMismatch(format!("{tuple} is not a point")));
        }
        Ok(Point::new(tuple.x, tuple.y, tuple.z))
    }
}

impl TryFrom<Tuple4> for Vector {
    type Error = Error;

    fn try_from(tuple: Tuple4) -> Result<Self> {
        if !tuple.is_vector() {
            return Err(Error::TypeMismatch(format!("{tuple} is not a vector")));
        }
        Ok(Vector::new(tuple.x, tuple.y, tuple.z))
    }
}
