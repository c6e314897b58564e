use crate::render::ray::intersection::IntersecComputations;

pub mod point_light;

/// Fraction of light reflected at the surface, Schlick's approximation of the Fresnel equations.
pub fn schlick_reflectance(comps: &IntersecComputations) -> f64 {
    let (n1, n2) = (comps.refractive_from(), comps.refractive_to());
    let cos_incidence = comps.eye_v().dot(comps.normal_v());

    let cos = if n1 > n2 {
        let sin2_transmitted = (n1 / n2).powi(2) * (1. - cos_incidence.powi(2));
        if sin2_transmitted > 1. {
            // total internal reflection
            return 1.;
        }
        (1. - sin2_transmitted).sqrt()
    } else {
        cos_incidence
    };

    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    r0 + (1. - r0) * (1. - cos).powi(5)
}
