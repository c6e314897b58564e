use super::{Truncated, solve_quadratic};
use crate::{
    approx_eq::{ApproxEq, EPSILON},
    math::{point::Point, tuple::Tuple, vector::Vector},
    render::ray::{Ray, intersection::IntersectionCollector},
};

/// Cylinder with radius 1 around the y axis, open between `y_min` and `y_max`
#[derive(Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub y_min: f64,
    pub y_max: f64,
    pub closed: bool,
}

impl Truncated for Cylinder {
    fn y_min(&self) -> f64 {
        self.y_min
    }
    fn y_max(&self) -> f64 {
        self.y_max
    }
    fn closed(&self) -> bool {
        self.closed
    }
    fn cap_radius_squared(&self, _y: f64) -> f64 {
        Self::RADIUS * Self::RADIUS
    }
}

impl Cylinder {
    pub const RADIUS: f64 = 1.;

    pub fn new(y_min: f64, y_max: f64, closed: bool) -> Self {
        Self {
            y_min,
            y_max,
            closed,
        }
    }

    pub fn local_normal_at(&self, object_point: Point) -> Vector {
        let (x, y, z) = (object_point.x(), object_point.y(), object_point.z());
        let on_cap_disk = x * x + z * z < Self::RADIUS;

        if on_cap_disk && y >= self.y_max - EPSILON {
            Vector::new(0., 1., 0.)
        } else if on_cap_disk && y <= self.y_min + EPSILON {
            Vector::new(0., -1., 0.)
        } else {
            Vector::new(x, 0., z)
        }
    }

    pub fn local_intersect(&self, object_ray: &Ray, collector: &mut IntersectionCollector) {
        let (origin, dir) = (object_ray.origin(), object_ray.direction());
        let a = dir.x().powi(2) + dir.z().powi(2);

        // rays parallel to the axis only hit the caps
        if !a.approx_eq(&0.) {
            let b = 2. * (origin.x() * dir.x() + origin.z() * dir.z());
            let c = origin.x().powi(2) + origin.z().powi(2) - Self::RADIUS;
            if let Some((t0, t1)) = solve_quadratic(a, b, c) {
                self.add_body_hits(object_ray, [t0, t1], collector);
            }
        }
        self.add_cap_hits(object_ray, collector);
    }
}

impl Default for Cylinder {
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false)
    }
}
