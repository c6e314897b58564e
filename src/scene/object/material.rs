pub mod pattern;

use pattern::Pattern;

use super::Object;
use crate::{
    approx_eq::ApproxEq,
    math::{color::Color, point::Point},
};

pub const AIR_REFRACTIVE_INDEX: f64 = 1.0;
pub const GLASS_REFRACTIVE_INDEX: f64 = 1.5;

/// Surface properties for Phong shading, reflection and refraction.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub pattern: Pattern,
    /// Light reflected regardless of light sources, in [0, 1].
    pub ambient: f64,
    /// Matte reflection, in [0, 1].
    pub diffuse: f64,
    /// Strength of the highlight, in [0, 1].
    pub specular: f64,
    /// Larger values give a smaller, tighter highlight.
    pub shininess: f64,
    /// 0 is fully matte, 1 a perfect mirror.
    pub reflectivity: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Material {
    pub fn with_pattern(pattern: Pattern) -> Self {
        Self {
            pattern,
            ..Self::default()
        }
    }

    pub fn with_color(color: Color) -> Self {
        Self::with_pattern(Pattern::Const(color))
    }

    /// Solid color with a dim, wide highlight.
    pub fn matte_with_color(color: Color) -> Self {
        Self {
            specular: 0.05,
            shininess: 15.,
            ..Self::with_color(color)
        }
    }

    /// Clear glass, mostly transparent and strongly reflective.
    pub fn glass() -> Self {
        Self {
            pattern: Pattern::Const(Color::black()),
            ambient: 0.025,
            diffuse: 0.2,
            specular: 1.,
            shininess: 300.,
            reflectivity: 0.9,
            transparency: 0.9,
            refractive_index: GLASS_REFRACTIVE_INDEX,
        }
    }

    pub fn mirror() -> Self {
        Self {
            reflectivity: 0.98,
            transparency: 0.,
            ..Self::glass()
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0. && !self.reflectivity.approx_eq(&0.)
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency > 0. && !self.transparency.approx_eq(&0.)
    }

    pub fn color_at_object(&self, object: &Object, point: Point) -> Color {
        self.pattern.color_at_object(object, point)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pattern: Pattern::Const(Color::white()),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.,
            reflectivity: 0.,
            transparency: 0.,
            refractive_index: AIR_REFRACTIVE_INDEX,
        }
    }
}

/// Index into a world's shared material table.
/// Handed out only by `World::add_shared_material`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(usize);

impl MaterialId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// How an object holds its material.
/// Edits through a world's shared material show up on every object pointing at it.
#[derive(Clone, Debug, PartialEq)]
pub enum MaterialRef {
    Owned(Material),
    Shared(MaterialId),
}

impl Default for MaterialRef {
    fn default() -> Self {
        Self::Owned(Material::default())
    }
}

impl From<Material> for MaterialRef {
    fn from(material: Material) -> Self {
        Self::Owned(material)
    }
}

impl From<MaterialId> for MaterialRef {
    fn from(id: MaterialId) -> Self {
        Self::Shared(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq_low_prec;

    #[test]
    fn default_material() {
        let m = Material::default();

        assert_eq!(m.pattern(), &Pattern::Const(Color::white()));
        assert_approx_eq_low_prec!(m.ambient, 0.1);
        assert_approx_eq_low_prec!(m.diffuse, 0.9);
        assert_approx_eq_low_prec!(m.specular, 0.9);
        assert_approx_eq_low_prec!(m.shininess, 200.0);
        assert_approx_eq_low_prec!(m.reflectivity, 0.0);
        assert_approx_eq_low_prec!(m.transparency, 0.0);
        assert_approx_eq_low_prec!(m.refractive_index, AIR_REFRACTIVE_INDEX);
    }

    #[test]
    fn glass_material() {
        let m = Material::glass();

        assert!(m.is_transparent());
        assert!(m.is_reflective());
        assert_approx_eq_low_prec!(m.transparency, 0.9);
        assert_approx_eq_low_prec!(m.refractive_index, 1.5);
    }

    #[test]
    fn matte_material_keeps_color() {
        let m = Material::matte_with_color(Color::red());

        assert_eq!(m.pattern(), &Pattern::Const(Color::red()));
        assert_approx_eq_low_prec!(m.specular, 0.05);
        assert!(!m.is_transparent());
        assert!(!m.is_reflective());
    }

    #[test]
    fn mirror_is_opaque_glass() {
        let m = Material::mirror();

        assert_approx_eq_low_prec!(m.transparency, 0.);
        assert_approx_eq_low_prec!(m.reflectivity, 0.98);
        assert_approx_eq_low_prec!(m.shininess, Material::glass().shininess);
    }

    #[test]
    fn material_ref_defaults_to_owned_copy() {
        assert_eq!(MaterialRef::default(), MaterialRef::Owned(Material::default()));
        assert_eq!(
            MaterialRef::from(MaterialId::new(3)),
            MaterialRef::Shared(MaterialId::new(3))
        );
    }
}
