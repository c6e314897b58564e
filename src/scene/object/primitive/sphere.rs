use super::solve_quadratic;
use crate::{
    math::{point::Point, tuple::Tuple, vector::Vector},
    render::ray::{Ray, intersection::IntersectionCollector},
};

/// Unit sphere centered at the origin
pub struct UnitSphere {}

impl UnitSphere {
    pub fn local_normal_at(object_point: Point) -> Vector {
        object_point - Point::zero()
    }

    pub fn local_intersect(object_ray: &Ray, collector: &mut IntersectionCollector) {
        let direction = *object_ray.direction();
        let from_center = *object_ray.origin() - Point::zero();

        let a = direction.dot(direction);
        let b = 2. * direction.dot(from_center);
        let c = from_center.dot(from_center) - 1.;

        if let Some((t0, t1)) = solve_quadratic(a, b, c) {
            collector.add(t0);
            collector.add(t1);
        }
    }
}
