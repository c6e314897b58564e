pub mod material;
pub mod primitive;

use std::sync::atomic::{AtomicU64, Ordering};

use material::{Material, MaterialId, MaterialRef};
use primitive::shape::Shape;

use crate::{
    error::Result,
    math::{matrix::Matrix, point::Point, transform::Transform, vector::Vector},
    render::ray::{Ray, intersection::IntersectionCollector},
};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of an object. Clones of an object share it, `Object::duplicate` makes a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Clone, Debug)]
pub struct Object {
    id: ObjectId,
    shape: Shape,
    material: MaterialRef,
    transformation: Matrix,
    transformation_inverse: Matrix,
    transformation_inverse_transpose: Matrix,
    casts_shadow: bool,
}

impl Object {
    pub fn primitive_with_shape(shape: Shape) -> Self {
        Self {
            id: ObjectId::next(),
            shape,
            material: MaterialRef::default(),
            transformation: Matrix::identity(),
            transformation_inverse: Matrix::identity(),
            transformation_inverse_transpose: Matrix::identity(),
            casts_shadow: true,
        }
    }

    pub fn primitive(shape: Shape, material: Material, transformation: Matrix) -> Result<Self> {
        Ok(Self::primitive_with_transformation(shape, transformation)?.with_material(material))
    }

    pub fn primitive_with_transformation(shape: Shape, transformation: Matrix) -> Result<Self> {
        let mut object = Self::primitive_with_shape(shape);
        object.set_transformation(transformation)?;
        Ok(object)
    }

    /// A copy of this object with its own identity.
    pub fn duplicate(&self) -> Self {
        Self {
            id: ObjectId::next(),
            ..self.clone()
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = MaterialRef::Owned(material);
        self
    }

    pub fn with_shared_material(mut self, id: MaterialId) -> Self {
        self.material = MaterialRef::Shared(id);
        self
    }

    pub fn with_material_ref(mut self, material: impl Into<MaterialRef>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material_ref(&self) -> &MaterialRef {
        &self.material
    }

    /// Gives the object its own material.
    /// Switching to a shared one goes through `World::set_material`, which checks the id.
    pub fn set_material(&mut self, material: Material) {
        self.material = MaterialRef::Owned(material);
    }

    pub(crate) fn set_material_ref(&mut self, material: MaterialRef) {
        self.material = material;
    }

    /// The object's own material, `None` when it points at a shared one.
    pub fn material_mut(&mut self) -> Option<&mut Material> {
        match &mut self.material {
            MaterialRef::Owned(material) => Some(material),
            MaterialRef::Shared(_) => None,
        }
    }

    pub fn casts_shadow(&self) -> bool {
        self.casts_shadow
    }

    pub fn set_casts_shadow(&mut self, casts_shadow: bool) {
        self.casts_shadow = casts_shadow;
    }

    pub fn transformation(&self) -> &Matrix {
        &self.transformation
    }

    pub fn transformation_inverse(&self) -> &Matrix {
        &self.transformation_inverse
    }

    /// Replaces the transformation. A non-invertible matrix is rejected and the object is left as it was.
    pub fn set_transformation(&mut self, transformation: Matrix) -> Result<()> {
        let inverse = transformation.inverse()?;
        self.transformation = transformation;
        self.transformation_inverse = inverse;
        self.transformation_inverse_transpose = inverse.transpose();
        Ok(())
    }

    /// Composes `transformation` after the current one.
    pub fn apply_transformation(&mut self, transformation: &Matrix) -> Result<()> {
        self.set_transformation(self.transformation.transform_new(transformation))
    }

    pub fn intersect(&self, world_ray: &Ray, collector: &mut IntersectionCollector) {
        let object_ray = world_ray.transform_new(&self.transformation_inverse);
        self.shape.local_intersect(&object_ray, collector);
    }

    /// Intersection times in the order the shape produced them.
    pub fn intersection_times(&self, world_ray: &Ray) -> Vec<f64> {
        let mut collector = IntersectionCollector::new();
        self.intersect(world_ray, &mut collector);
        collector.into_times()
    }

    pub fn is_intersected_by_ray(&self, world_ray: &Ray) -> bool {
        !self.intersection_times(world_ray).is_empty()
    }

    pub fn normal_vector_at(&self, world_point: Point) -> Vector {
        let object_point = self.transformation_inverse * world_point;
        let object_normal = self.shape.local_normal_at(object_point);
        let world_normal = self.transformation_inverse_transpose * object_normal;
        world_normal.normalize()
    }
}
