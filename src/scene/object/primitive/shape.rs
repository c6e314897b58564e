use crate::{
    math::{point::Point, vector::Vector},
    render::ray::{Ray, intersection::IntersectionCollector},
};

use super::{
    cone::Cone, cube::UnitCube, cylinder::Cylinder, plane::PlaneXZ, sphere::UnitSphere,
};

/// Geometry of a primitive in its own object space.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere,
    Plane,
    Cube,
    Cylinder(Cylinder),
    Cone(Cone),
}

impl Shape {
    pub fn local_normal_at(&self, object_point: Point) -> Vector {
        match self {
            Shape::Sphere => UnitSphere::local_normal_at(object_point),
            Shape::Plane => PlaneXZ::local_normal_at(),
            Shape::Cube => UnitCube::local_normal_at(object_point),
            Shape::Cylinder(cyl) => cyl.local_normal_at(object_point),
            Shape::Cone(cone) => cone.local_normal_at(object_point),
        }
    }

    pub fn local_intersect(&self, object_ray: &Ray, collector: &mut IntersectionCollector) {
        match self {
            Shape::Sphere => UnitSphere::local_intersect(object_ray, collector),
            Shape::Plane => PlaneXZ::local_intersect(object_ray, collector),
            Shape::Cube => UnitCube::local_intersect(object_ray, collector),
            Shape::Cylinder(cyl) => cyl.local_intersect(object_ray, collector),
            Shape::Cone(cone) => cone.local_intersect(object_ray, collector),
        }
    }

    pub fn cylinder(y_min: f64, y_max: f64, closed: bool) -> Self {
        Shape::Cylinder(Cylinder::new(y_min, y_max, closed))
    }

    pub fn default_cylinder() -> Self {
        Shape::Cylinder(Cylinder::default())
    }

    pub fn cone(y_min: f64, y_max: f64, closed: bool) -> Self {
        Shape::Cone(Cone::new(y_min, y_max, closed))
    }

    pub fn default_cone() -> Self {
        Shape::Cone(Cone::default())
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Plane => "plane",
            Shape::Cube => "cube",
            Shape::Cylinder(_) => "cylinder",
            Shape::Cone(_) => "cone",
        }
    }
}
