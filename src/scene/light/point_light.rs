use crate::{
    math::{color::Color, point::Point, tuple::Tuple, vector::Vector},
    scene::object::{Object, material::Material},
};

/// Light emitted equally in every direction from a single point.
#[derive(PartialEq, Debug, Clone)]
pub struct PointLightSource {
    position: Point,
    intensity: Color,
}

impl Default for PointLightSource {
    fn default() -> Self {
        Self::new(Point::zero(), Color::white())
    }
}

impl PointLightSource {
    pub fn new(position: Point, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Phong shading: ambient, plus diffuse and specular terms unless the point is in shadow.
    pub fn color_of_illuminated_point(
        &self,
        material: &Material,
        object: &Object,
        point: Point,
        eye_v: Vector,
        normal_v: Vector,
        in_shadow: bool,
    ) -> Color {
        let surface = material.color_at_object(object, point) * self.intensity;
        let ambient = surface * material.ambient;
        if in_shadow {
            return ambient;
        }

        let to_light = (self.position - point).normalize();
        let cos_incidence = to_light.dot(normal_v);
        if cos_incidence < 0. {
            // lit from behind
            return ambient;
        }

        ambient
            + surface * (material.diffuse * cos_incidence)
            + self.specular(material, to_light, eye_v, normal_v)
    }

    fn specular(
        &self,
        material: &Material,
        to_light: Vector,
        eye_v: Vector,
        normal_v: Vector,
    ) -> Color {
        let cos_reflection = (-to_light).reflect(normal_v).dot(eye_v);
        if cos_reflection <= 0. {
            return Color::black();
        }
        self.intensity * (material.specular * cos_reflection.powf(material.shininess))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_1_SQRT_2;

    use super::*;
    use crate::{
        assert_approx_eq_low_prec,
        scene::object::{material::pattern::Pattern, primitive::shape::Shape},
    };

    fn shade(
        material: &Material,
        light_at: Point,
        point: Point,
        eye_v: Vector,
        in_shadow: bool,
    ) -> Color {
        let sphere = Object::primitive_with_shape(Shape::Sphere);
        PointLightSource::new(light_at, Color::white()).color_of_illuminated_point(
            material,
            &sphere,
            point,
            eye_v,
            Vector::new(0., 0., -1.),
            in_shadow,
        )
    }

    fn gray(v: f64) -> Color {
        Color::new(v, v, v)
    }

    #[test]
    fn default_material_under_various_angles() {
        let toward_surface = Vector::new(0., 0., -1.);
        let cases = [
            (Point::new(0., 0., -10.), toward_surface, 1.9),
            (Point::new(0., 0., -10.), Vector::new(0., FRAC_1_SQRT_2, -FRAC_1_SQRT_2), 1.),
            (Point::new(0., 10., -10.), toward_surface, 0.1 + 0.9 * FRAC_1_SQRT_2),
            (
                Point::new(0., 10., -10.),
                Vector::new(0., -FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
                1. + 0.9 * FRAC_1_SQRT_2,
            ),
            // light behind the surface leaves only ambient
            (Point::new(0., 0., 10.), toward_surface, 0.1),
        ];

        for (light_at, eye_v, expected) in cases {
            assert_approx_eq_low_prec!(
                shade(&Material::default(), light_at, Point::zero(), eye_v, false),
                gray(expected)
            );
        }
    }

    #[test]
    fn shadow_leaves_only_ambient() {
        let light_at = Point::new(0., 0., -10.);
        let eye_v = Vector::new(0., 0., -1.);

        assert_approx_eq_low_prec!(
            shade(&Material::default(), light_at, Point::zero(), eye_v, true),
            gray(0.1)
        );
    }

    #[test]
    fn light_color_tints_result() {
        let light = PointLightSource::new(Point::new(0., 0., -10.), Color::new(1., 0., 0.5));
        let sphere = Object::primitive_with_shape(Shape::Sphere);
        let toward = Vector::new(0., 0., -1.);

        let color = light.color_of_illuminated_point(
            &Material::default(),
            &sphere,
            Point::zero(),
            toward,
            toward,
            false,
        );

        assert_approx_eq_low_prec!(color, Color::new(1.9, 0., 0.95));
    }

    #[test]
    fn pattern_color_is_used() {
        let material = Material {
            pattern: Pattern::stripe(Color::white(), Color::black()),
            ambient: 1.,
            diffuse: 0.,
            specular: 0.,
            ..Default::default()
        };
        let light_at = Point::new(0., 0., -10.);
        let eye_v = Vector::new(0., 0., -1.);

        assert_approx_eq_low_prec!(
            shade(&material, light_at, Point::new(0.9, 0., 0.), eye_v, false),
            Color::white()
        );
        assert_approx_eq_low_prec!(
            shade(&material, light_at, Point::new(1.1, 0., 0.), eye_v, false),
            Color::black()
        );
    }
}
