use derive_builder::Builder;

use crate::{
    approx_eq::ApproxEq,
    math::{color::Color, point::Point, vector::Vector},
    render::ray::{
        Ray,
        intersection::{IntersecComputations, IntersectionCollection},
    },
    scene::{World, light::schlick_reflectance},
};

/// Whitted-style ray tracer over a world: Phong shading, hard shadows,
/// recursive reflection and refraction.
#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct Integrator {
    world: World,
    /// Bounces left for a primary ray
    /// 0 means no reflections or refractions
    #[builder(default = "Integrator::MAX_RECURSIVE_DEPTH")]
    max_recursive_depth: usize,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            world: World::default(),
            max_recursive_depth: Self::MAX_RECURSIVE_DEPTH,
        }
    }
}

impl Integrator {
    pub const MAX_RECURSIVE_DEPTH: usize = 5;

    pub fn intersect(&self, ray: Ray) -> IntersectionCollection<'_> {
        IntersectionCollection::from_world(ray, &self.world)
    }

    /// Colour seen along a primary ray.
    pub fn color_at(&self, ray: Ray) -> Color {
        self.color_at_remaining(ray, self.max_recursive_depth)
    }

    /// Like `color_at`, with `remaining` bounces left for reflection and refraction.
    pub fn color_at_remaining(&self, ray: Ray, remaining: usize) -> Color {
        match self.intersect(ray).hit_computations(&self.world) {
            Some(hit_comps) => self.shade_hit(hit_comps, remaining),
            None => Color::black(),
        }
    }

    /// True when a shadow casting object sits between the point and the light.
    pub fn is_shadowed(&self, point: Point) -> bool {
        let Some(light) = self.world.light() else {
            return false;
        };
        let to_light = light.position() - point;
        let distance = to_light.magnitude();
        let occluders = self.world.objects().iter().filter(|object| object.casts_shadow());

        IntersectionCollection::from_ray_and_mult_objects(
            Ray::new(point, to_light.normalize()),
            occluders,
        )
        .hit()
        .is_some_and(|blocker| blocker.time() < distance)
    }

    /// Colour seen along a secondary ray, scaled by `weight`. Black once the bounces run out.
    fn secondary_color(&self, ray: Ray, weight: f64, remaining: usize) -> Color {
        if remaining == 0 || weight.approx_eq(&0.) {
            return Color::black();
        }
        self.color_at_remaining(ray, remaining - 1) * weight
    }

    pub fn reflected_color(&self, hit_comps: &IntersecComputations, remaining: usize) -> Color {
        let reflectivity = self.world.material_of(hit_comps.object()).reflectivity;
        let ray = Ray::new(hit_comps.over_point(), hit_comps.reflect_v());
        self.secondary_color(ray, reflectivity, remaining)
    }

    /// Direction of the transmitted ray by Snell's law, `None` under total internal reflection.
    fn refraction_direction(hit_comps: &IntersecComputations) -> Option<Vector> {
        let n_ratio = hit_comps.refractive_from() / hit_comps.refractive_to();
        let cos_incidence = hit_comps.eye_v().dot(hit_comps.normal_v());
        let sin2_transmitted = n_ratio * n_ratio * (1. - cos_incidence * cos_incidence);
        if sin2_transmitted > 1. {
            return None;
        }
        let cos_transmitted = (1. - sin2_transmitted).sqrt();
        Some(
            hit_comps.normal_v() * (n_ratio * cos_incidence - cos_transmitted)
                - hit_comps.eye_v() * n_ratio,
        )
    }

    pub fn refracted_color(&self, hit_comps: &IntersecComputations, remaining: usize) -> Color {
        let transparency = self.world.material_of(hit_comps.object()).transparency;
        if transparency.approx_eq(&0.) {
            return Color::black();
        }
        match Self::refraction_direction(hit_comps) {
            Some(direction) => {
                let ray = Ray::new(hit_comps.under_point(), direction);
                self.secondary_color(ray, transparency, remaining)
            }
            None => Color::black(),
        }
    }

    pub fn shade_hit(&self, hit_comps: IntersecComputations, remaining: usize) -> Color {
        let Some(light) = self.world.light() else {
            return Color::black();
        };
        let material = self.world.material_of(hit_comps.object());

        let surface = light.color_of_illuminated_point(
            material,
            hit_comps.object(),
            hit_comps.over_point(),
            hit_comps.eye_v(),
            hit_comps.normal_v(),
            self.is_shadowed(hit_comps.over_point()),
        );
        let reflected = self.reflected_color(&hit_comps, remaining);
        let refracted = self.refracted_color(&hit_comps, remaining);

        if material.is_reflective() && material.is_transparent() {
            let reflectance = schlick_reflectance(&hit_comps);
            surface + reflected * reflectance + refracted * (1. - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    pub fn max_recursive_depth(&self) -> usize {
        self.max_recursive_depth
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

#[cfg(test)]
impl Integrator {
    pub fn default_testing(world: World) -> Self {
        Self {
            world,
            max_recursive_depth: Self::MAX_RECURSIVE_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

    use super::*;
    use crate::{
        assert_approx_eq_low_prec,
        math::{matrix::Matrix, tuple::Tuple, vector::Vector},
        scene::{
            light::point_light::PointLightSource,
            object::{
                Object,
                material::{Material, pattern::Pattern},
                primitive::shape::Shape,
            },
        },
    };

    fn material_mut(world: &mut World, index: usize) -> &mut Material {
        let id = world.objects()[index].id();
        world
            .object_mut(id)
            .and_then(|object| object.material_mut())
            .unwrap()
    }

    fn reflective_floor(reflectivity: f64, y: f64) -> Object {
        Object::primitive(
            Shape::Plane,
            Material {
                reflectivity,
                ..Default::default()
            },
            Matrix::translation(0., y, 0.),
        )
        .unwrap()
    }

    fn test_color_at(world: World, ray: Ray, expected_color: Color) {
        let integrator = Integrator::default_testing(world);

        assert_approx_eq_low_prec!(integrator.color_at(ray), expected_color);
    }

    #[test]
    fn intersect_world_with_ray() {
        let integrator = Integrator::default_testing(World::default_testing());
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        assert_eq!(integrator.intersect(ray).times_vec(), vec![4., 4.5, 5.5, 6.]);
    }

    #[test]
    fn shade_intersection() {
        test_color_at(
            World::default_testing(),
            Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.)),
            Color::new(0.38066, 0.47583, 0.2855),
        );
    }

    #[test]
    fn shade_intersection_from_inside() {
        let mut world = World::default_testing();
        world.set_light(PointLightSource::new(
            Point::new(0., 0.25, 0.),
            Color::white(),
        ));

        test_color_at(
            world,
            Ray::new(Point::new(0., 0., 0.), Vector::new(0., 0., 1.)),
            Color::new(0.90498, 0.90498, 0.90498),
        );
    }

    #[test]
    fn color_when_ray_misses() {
        test_color_at(
            World::default_testing(),
            Ray::new(Point::new(0., 0., -5.), Vector::new(0., 1., 0.)),
            Color::black(),
        );
    }

    #[test]
    fn color_with_intersection_behind_ray() {
        let mut world = World::default_testing();
        material_mut(&mut world, 0).ambient = 1.;
        material_mut(&mut world, 1).ambient = 1.;
        let inner_color = material_mut(&mut world, 1).pattern.color_at(&Point::zero());

        test_color_at(
            world,
            Ray::new(Point::new(0., 0., 0.75), Vector::new(0., 0., -1.)),
            inner_color,
        );
    }

    #[test]
    fn world_without_light_is_black() {
        let world = World::new(
            vec![Object::primitive_with_shape(Shape::Sphere)],
            None,
        )
        .unwrap();

        test_color_at(
            world,
            Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.)),
            Color::black(),
        );
    }

    #[test]
    fn no_shadow_when_nothing_is_collinear_with_point_and_light() {
        let integrator = Integrator::default_testing(World::default_testing());

        assert!(!integrator.is_shadowed(Point::new(0., 10., 0.)));
    }

    #[test]
    fn shadow_when_object_is_between_point_and_light() {
        let integrator = Integrator::default_testing(World::default_testing());

        assert!(integrator.is_shadowed(Point::new(10., -10., 10.)));
    }

    #[test]
    fn no_shadow_when_object_is_behind_light() {
        let integrator = Integrator::default_testing(World::default_testing());

        assert!(!integrator.is_shadowed(Point::new(-20., 20., -20.)));
    }

    #[test]
    fn no_shadow_when_object_is_behind_point() {
        let integrator = Integrator::default_testing(World::default_testing());

        assert!(!integrator.is_shadowed(Point::new(-2., 2., -2.)));
    }

    #[test]
    fn objects_without_shadow_flag_do_not_block_light() {
        let mut world = World::default_testing();
        let ids: Vec<_> = world.objects().iter().map(|object| object.id()).collect();
        for id in ids {
            world.object_mut(id).unwrap().set_casts_shadow(false);
        }
        let integrator = Integrator::default_testing(world);

        assert!(!integrator.is_shadowed(Point::new(10., -10., 10.)));
    }

    #[test]
    fn shade_hit_intersection_in_shadow() {
        let world = World::new(
            vec![
                Object::primitive_with_shape(Shape::Sphere),
                Object::primitive_with_transformation(
                    Shape::Sphere,
                    Matrix::translation(0., 0., 10.),
                )
                .unwrap(),
            ],
            Some(PointLightSource::new(
                Point::new(0., 0., -10.),
                Color::white(),
            )),
        )
        .unwrap();
        let integrator = Integrator::default_testing(world);

        let ray = Ray::new(Point::new(0., 0., 5.), Vector::new(0., 0., 1.));
        let intersections = IntersectionCollection::from_times_and_obj(
            ray,
            vec![4.],
            &integrator.world().objects()[1],
        );
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(
            integrator.shade_hit(comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::new(0.1, 0.1, 0.1)
        );
    }

    #[test]
    fn reflected_color_for_non_reflective_material() {
        let mut world = World::default_testing();
        material_mut(&mut world, 1).ambient = 1.;
        let integrator = Integrator::default_testing(world);

        let ray = Ray::new(Point::new(0., 0., 0.), Vector::new(0., 0., 1.));
        let intersections = IntersectionCollection::from_times_and_obj(
            ray,
            vec![1.],
            &integrator.world().objects()[1],
        );
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(
            integrator.reflected_color(&comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::black()
        );
    }

    #[test]
    fn reflected_color_for_reflective_material() {
        let mut world = World::default_testing();
        world.add_object(reflective_floor(0.5, -1.)).unwrap();
        let integrator = Integrator::default_testing(world);

        let ray = Ray::new(
            Point::new(0., 0., -3.),
            Vector::new(0., -FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        );
        let plane = &integrator.world().objects()[2];
        let intersections = IntersectionCollection::from_times_and_obj(ray, vec![SQRT_2], plane);
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(
            integrator.reflected_color(&comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::new(0.19032, 0.2379, 0.14274)
        );
    }

    #[test]
    fn shade_hit_with_reflective_material() {
        let mut world = World::default_testing();
        world.add_object(reflective_floor(0.5, -1.)).unwrap();
        let integrator = Integrator::default_testing(world);

        let ray = Ray::new(
            Point::new(0., 0., -3.),
            Vector::new(0., -FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        );
        let plane = &integrator.world().objects()[2];
        let intersections = IntersectionCollection::from_times_and_obj(ray, vec![SQRT_2], plane);
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(
            integrator.shade_hit(comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::new(0.87677, 0.92436, 0.82918)
        );
    }

    #[test]
    fn ray_bouncing_between_mutually_reflective_surfaces_terminates() {
        let world = World::new(
            vec![reflective_floor(1., -1.), reflective_floor(1., 1.)],
            Some(PointLightSource::new(Point::zero(), Color::white())),
        )
        .unwrap();
        let integrator = IntegratorBuilder::default().world(world).build().unwrap();

        let ray = Ray::new(Point::zero(), Vector::new(0., 1., 0.));

        let _ = integrator.color_at(ray);
    }

    #[test]
    fn reflected_color_with_no_remaining_bounces() {
        let mut world = World::default_testing();
        world.add_object(reflective_floor(0.5, -1.)).unwrap();
        let integrator = Integrator::default_testing(world);

        let ray = Ray::new(
            Point::new(0., 0., -3.),
            Vector::new(0., -FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        );
        let plane = &integrator.world().objects()[2];
        let intersections = IntersectionCollection::from_times_and_obj(ray, vec![SQRT_2], plane);
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(integrator.reflected_color(&comps, 0), Color::black());
    }

    #[test]
    fn refracted_color_with_opaque_surface() {
        let integrator = Integrator::default_testing(World::default_testing());
        let shape = &integrator.world().objects()[0];
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let intersections = IntersectionCollection::from_times_and_obj(ray, vec![4., 6.], shape);
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(
            integrator.refracted_color(&comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::black()
        );
    }

    #[test]
    fn refracted_color_with_no_remaining_bounces() {
        let mut world = World::default_testing();
        let material = material_mut(&mut world, 0);
        material.transparency = 1.;
        material.refractive_index = 1.5;
        let integrator = Integrator::default_testing(world);

        let shape = &integrator.world().objects()[0];
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let intersections = IntersectionCollection::from_times_and_obj(ray, vec![4., 6.], shape);
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(integrator.refracted_color(&comps, 0), Color::black());
    }

    #[test]
    fn refracted_color_under_total_internal_reflection() {
        let mut world = World::default_testing();
        let material = material_mut(&mut world, 0);
        material.transparency = 1.;
        material.refractive_index = 1.5;
        let integrator = Integrator::default_testing(world);

        let shape = &integrator.world().objects()[0];
        let ray = Ray::new(Point::new(0., 0., FRAC_1_SQRT_2), Vector::new(0., 1., 0.));
        let intersections = IntersectionCollection::from_times_and_obj(
            ray,
            vec![-FRAC_1_SQRT_2, FRAC_1_SQRT_2],
            shape,
        );
        let comps = intersections
            .computations_at_id(1, integrator.world())
            .unwrap();

        assert_approx_eq_low_prec!(
            integrator.refracted_color(&comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::black()
        );
    }

    #[test]
    fn refracted_color_with_refracted_ray() {
        let mut world = World::default_testing();
        let a = material_mut(&mut world, 0);
        a.ambient = 1.;
        a.pattern = Pattern::test_pattern();
        let b = material_mut(&mut world, 1);
        b.transparency = 1.;
        b.refractive_index = 1.5;
        let integrator = Integrator::default_testing(world);

        let ray = Ray::new(Point::new(0., 0., 0.1), Vector::new(0., 1., 0.));
        let intersections = integrator.intersect(ray);
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(
            integrator.refracted_color(&comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::new(0., 0.99888, 0.04725)
        );
    }

    fn floor_and_ball_world(floor_material: Material) -> World {
        let mut world = World::default_testing();
        let floor =
            Object::primitive(Shape::Plane, floor_material, Matrix::translation(0., -1., 0.))
                .unwrap();
        let ball = Object::primitive(
            Shape::Sphere,
            Material {
                pattern: Pattern::Const(Color::red()),
                ambient: 0.5,
                ..Default::default()
            },
            Matrix::translation(0., -3.5, -0.5),
        )
        .unwrap();
        world.add_object(floor).unwrap();
        world.add_object(ball).unwrap();
        world
    }

    #[test]
    fn shading_transparent_material() {
        let integrator = Integrator::default_testing(floor_and_ball_world(Material {
            transparency: 0.5,
            refractive_index: 1.5,
            ..Default::default()
        }));

        let ray = Ray::new(
            Point::new(0., 0., -3.),
            Vector::new(0., -FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        );
        let intersections = integrator.intersect(ray);
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(
            integrator.shade_hit(comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::new(0.93642, 0.68642, 0.68642)
        );
    }

    #[test]
    fn shading_reflective_transparent_material() {
        let integrator = Integrator::default_testing(floor_and_ball_world(Material {
            transparency: 0.5,
            reflectivity: 0.5,
            refractive_index: 1.5,
            ..Default::default()
        }));

        let ray = Ray::new(
            Point::new(0., 0., -3.),
            Vector::new(0., -FRAC_1_SQRT_2, FRAC_1_SQRT_2),
        );
        let intersections = integrator.intersect(ray);
        let comps = intersections.hit_computations(integrator.world()).unwrap();

        assert_approx_eq_low_prec!(
            integrator.shade_hit(comps, Integrator::MAX_RECURSIVE_DEPTH),
            Color::new(0.93391, 0.69643, 0.69243)
        );
    }

    #[test]
    fn shared_material_is_used_for_shading() {
        let mut owned = World::default_testing();
        let mut shared = World::default();
        shared.set_light(owned.light().cloned().unwrap());

        let ids: Vec<_> = owned.objects().iter().map(|object| object.id()).collect();
        for id in ids {
            let object = owned.object_mut(id).unwrap();
            let material = object.material_mut().unwrap().clone();
            let material_id = shared.add_shared_material(material);
            let copy = object.clone().with_shared_material(material_id);
            shared.add_object(copy).unwrap();
        }

        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        assert_approx_eq_low_prec!(
            Integrator::default_testing(shared).color_at(ray),
            Integrator::default_testing(owned).color_at(ray)
        );
    }

    #[test]
    fn default_integrator_builder() {
        let built = IntegratorBuilder::default().build().unwrap();

        assert_eq!(built.max_recursive_depth(), Integrator::MAX_RECURSIVE_DEPTH);
        assert!(built.world().objects().is_empty());
        assert_eq!(
            Integrator::default().max_recursive_depth(),
            Integrator::MAX_RECURSIVE_DEPTH
        );
    }
}
