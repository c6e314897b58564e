pub mod camera;
pub mod io {
    pub mod yaml;
}
pub mod light;
pub mod object;

use light::point_light::PointLightSource;
use object::{
    Object, ObjectId,
    material::{Material, MaterialId, MaterialRef},
};

use crate::error::{Error, Result};

/// Everything that can be seen: the objects, at most one light and the shared materials.
#[derive(Debug, Clone, Default)]
pub struct World {
    objects: Vec<Object>,
    light: Option<PointLightSource>,
    materials: Vec<Material>,
}

impl World {
    pub fn new(objects: Vec<Object>, light: Option<PointLightSource>) -> Result<Self> {
        let mut world = Self {
            light,
            ..Default::default()
        };
        for object in objects {
            world.add_object(object)?;
        }
        Ok(world)
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.iter_mut().find(|object| object.id() == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|object| object.id() == id)
    }

    /// Adds an object. A shared material id unknown to this world is rejected,
    /// and so is an object whose id is already in the world.
    pub fn add_object(&mut self, object: Object) -> Result<ObjectId> {
        if let MaterialRef::Shared(material_id) = object.material_ref() {
            self.check_material_id(*material_id)?;
        }
        let id = object.id();
        if self.contains(id) {
            return Err(Error::InvalidOperation(format!(
                "{id:?} is already in the world, add a duplicate instead"
            )));
        }
        self.objects.push(object);
        Ok(id)
    }

    pub fn light(&self) -> Option<&PointLightSource> {
        self.light.as_ref()
    }

    /// Sets the single light, returning the one it replaces.
    pub fn set_light(&mut self, light: PointLightSource) -> Option<PointLightSource> {
        self.light.replace(light)
    }

    pub fn add_shared_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId::new(self.materials.len() - 1)
    }

    pub fn shared_material(&self, id: MaterialId) -> Result<&Material> {
        self.check_material_id(id)?;
        Ok(&self.materials[id.index()])
    }

    /// Changes here are seen by every object using `id`.
    pub fn shared_material_mut(&mut self, id: MaterialId) -> Result<&mut Material> {
        self.check_material_id(id)?;
        Ok(&mut self.materials[id.index()])
    }

    /// Points an object of this world at another material.
    pub fn set_material(&mut self, id: ObjectId, material: impl Into<MaterialRef>) -> Result<()> {
        let material = material.into();
        if let MaterialRef::Shared(material_id) = material {
            self.check_material_id(material_id)?;
        }
        let size = self.objects.len();
        let object = self.object_mut(id).ok_or_else(|| {
            Error::InvalidOperation(format!("{id:?} is not one of the {size} objects"))
        })?;
        object.set_material_ref(material);
        Ok(())
    }

    /// Resolves the material an object is drawn with.
    ///
    /// # Panics
    /// When the object refers to a shared material of another world.
    /// Objects of this world never do: `add_object` and `set_material` check the id.
    pub fn material_of<'a>(&'a self, object: &'a Object) -> &'a Material {
        match object.material_ref() {
            MaterialRef::Owned(material) => material,
            MaterialRef::Shared(id) => &self.materials[id.index()],
        }
    }

    fn check_material_id(&self, id: MaterialId) -> Result<()> {
        if id.index() >= self.materials.len() {
            return Err(Error::IndexOutOfRange {
                index: id.index(),
                size: self.materials.len(),
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn default_testing() -> Self {
        use crate::math::{color::Color, matrix::Matrix, point::Point, tuple::Tuple};
        use object::{material::pattern::Pattern, primitive::shape::Shape};

        let material = Material {
            pattern: Pattern::Const(Color::new(0.8, 1.0, 0.6)),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        };

        let obj1 = Object::primitive_with_shape(Shape::Sphere).with_material(material);
        let obj2 = Object::primitive_with_transformation(Shape::Sphere, Matrix::scaling_uniform(0.5))
            .expect("scaling by 0.5 is invertible");

        let light = PointLightSource::new(Point::new(-10., 10., -10.), Color::white());

        Self::new(vec![obj1, obj2], Some(light)).expect("objects own their materials")
    }
}
