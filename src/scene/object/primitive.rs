use crate::{
    approx_eq::ApproxEq,
    math::tuple::Tuple,
    render::ray::{Ray, intersection::IntersectionCollector},
};

pub mod cone;
pub mod cube;
pub mod cylinder;
pub mod plane;
pub mod shape;
pub mod sphere;

/// Real roots of `a t^2 + b t + c = 0`, smaller first.
fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4. * a * c;
    if discriminant < 0. || a == 0. {
        return None;
    }
    let root = discriminant.sqrt();
    let t0 = (-b - root) / (2. * a);
    let t1 = (-b + root) / (2. * a);
    Some((t0.min(t1), t0.max(t1)))
}

/// Height bounds shared by cylinders and cones.
trait Truncated {
    fn y_min(&self) -> f64;
    fn y_max(&self) -> f64;
    fn closed(&self) -> bool;
    /// Squared radius of the cap disk at height `y`.
    fn cap_radius_squared(&self, y: f64) -> f64;

    /// Keeps only the body hits strictly between the bounds.
    fn add_body_hits(&self, ray: &Ray, times: [f64; 2], collector: &mut IntersectionCollector) {
        for t in times {
            let y = ray.position(t).y();
            if self.y_min() < y && y < self.y_max() {
                collector.add(t);
            }
        }
    }

    fn add_cap_hits(&self, ray: &Ray, collector: &mut IntersectionCollector) {
        let dir_y = ray.direction().y();
        if !self.closed() || dir_y.approx_eq(&0.) {
            return;
        }
        for y in [self.y_min(), self.y_max()] {
            let t = (y - ray.origin().y()) / dir_y;
            let hit = ray.position(t);
            if hit.x().powi(2) + hit.z().powi(2) <= self.cap_radius_squared(y) {
                collector.add(t);
            }
        }
    }
}
