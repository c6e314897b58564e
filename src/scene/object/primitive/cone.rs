use super::{Truncated, solve_quadratic};
use crate::{
    approx_eq::{ApproxEq, EPSILON},
    math::{point::Point, tuple::Tuple, vector::Vector},
    render::ray::{Ray, intersection::IntersectionCollector},
};

/// Double-napped cone with the tips meeting at the origin, open between `y_min` and `y_max`
#[derive(Clone, Debug, PartialEq)]
pub struct Cone {
    pub y_min: f64,
    pub y_max: f64,
    pub closed: bool,
}

impl Truncated for Cone {
    fn y_min(&self) -> f64 {
        self.y_min
    }
    fn y_max(&self) -> f64 {
        self.y_max
    }
    fn closed(&self) -> bool {
        self.closed
    }
    fn cap_radius_squared(&self, y: f64) -> f64 {
        y * y
    }
}

impl Cone {
    pub fn new(y_min: f64, y_max: f64, closed: bool) -> Self {
        Self {
            y_min,
            y_max,
            closed,
        }
    }

    pub fn local_normal_at(&self, object_point: Point) -> Vector {
        let (x, y, z) = (object_point.x(), object_point.y(), object_point.z());
        let dist = x * x + z * z;

        if dist < self.cap_radius_squared(self.y_max) && y >= self.y_max - EPSILON {
            return Vector::new(0., 1., 0.);
        }
        if dist < self.cap_radius_squared(self.y_min) && y <= self.y_min + EPSILON {
            return Vector::new(0., -1., 0.);
        }
        let slope = if y > 0. { -dist.sqrt() } else { dist.sqrt() };
        Vector::new(x, slope, z)
    }

    pub fn local_intersect(&self, object_ray: &Ray, collector: &mut IntersectionCollector) {
        let (origin, dir) = (object_ray.origin(), object_ray.direction());

        let a = dir.x().powi(2) - dir.y().powi(2) + dir.z().powi(2);
        let b = 2. * (origin.x() * dir.x() - origin.y() * dir.y() + origin.z() * dir.z());
        let c = origin.x().powi(2) - origin.y().powi(2) + origin.z().powi(2);

        if a.approx_eq(&0.) {
            // parallel to one of the halves: a single hit on the other one
            if !b.approx_eq(&0.) {
                collector.add(-c / (2. * b));
            }
        } else if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            self.add_body_hits(object_ray, [t0, t1], collector);
        }
        self.add_cap_hits(object_ray, collector);
    }
}

impl Default for Cone {
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false)
    }
}
