use super::{
    tuple::{impl_componentwise_op, impl_tuple},
    vector::Vector,
};

/// Position in space, w = 1.
#[derive(Copy, Clone, Debug, Default)]
pub struct Point {
    x: f64,
    y: f64,
    z: f64,
}

impl_tuple!(Point, w = 1.);

impl_componentwise_op!(Point, Vector => Point, Add::add, +);
impl_componentwise_op!(Point, Vector => Point, Sub::sub, -);
impl_componentwise_op!(Point, Point => Vector, Sub::sub, -);
