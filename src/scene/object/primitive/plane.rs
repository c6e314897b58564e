use crate::{
    approx_eq::ApproxEq,
    math::{tuple::Tuple, vector::Vector},
    render::ray::{Ray, intersection::IntersectionCollector},
};

/// The xz plane at y = 0
pub struct PlaneXZ {}

impl PlaneXZ {
    pub fn local_normal_at() -> Vector {
        Vector::new(0., 1., 0.)
    }

    /// Rays parallel to the plane never hit it, coplanar ones included.
    pub fn local_intersect(object_ray: &Ray, collector: &mut IntersectionCollector) {
        let dir_y = object_ray.direction().y();
        if !dir_y.approx_eq(&0.) {
            collector.add(-object_ray.origin().y() / dir_y);
        }
    }
}
