use crate::{
    approx_eq::EPSILON,
    math::{point::Point, tuple::Axis, vector::Vector},
    render::ray::{Ray, intersection::IntersectionCollector},
};

const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

/// Axis aligned cube spanning [-1, 1] on every axis
pub struct UnitCube {}

impl UnitCube {
    /// Points along the axis with the largest coordinate; ties go to the earlier axis.
    pub fn local_normal_at(object_point: Point) -> Vector {
        let face = AXES
            .into_iter()
            .reduce(|best, axis| {
                if object_point[axis].abs() > object_point[best].abs() {
                    axis
                } else {
                    best
                }
            })
            .unwrap_or(Axis::X);
        Vector::along(face, object_point[face])
    }

    pub fn local_intersect(object_ray: &Ray, collector: &mut IntersectionCollector) {
        let origin = object_ray.origin();
        let direction = object_ray.direction();

        let (t_enter, t_exit) = AXES
            .into_iter()
            .map(|axis| Self::slab_times(origin[axis], direction[axis]))
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(enter, exit), (near, far)| {
                (enter.max(near), exit.min(far))
            });

        if t_enter <= t_exit {
            collector.add(t_enter);
            collector.add(t_exit);
        }
    }

    /// When the ray crosses the planes at -1 and 1 of a single axis.
    /// A parallel ray is inside the slab for all time or never, boundary included.
    fn slab_times(origin: f64, direction: f64) -> (f64, f64) {
        if direction.abs() < EPSILON {
            return if (-1. ..=1.).contains(&origin) {
                (f64::NEG_INFINITY, f64::INFINITY)
            } else {
                (f64::INFINITY, f64::NEG_INFINITY)
            };
        }
        let near = (-1. - origin) / direction;
        let far = (1. - origin) / direction;
        (near.min(far), near.max(far))
    }
}
