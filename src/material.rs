use std::ops::Neg;

use nalgebra::Vector3;

use crate::picture::Color;
use crate::ray::{Face, Hit, Ray};
use crate::render::{random, random_unit_vec, random_vec_in_unit_sphere};

#[derive(Clone, Debug)]
pub enum Material {
    Lambert { albedo: Color },
    Metal { albedo: Color, fuzz: f32 },
    Dielectric { index_of_refraction: f32 },
}

fn reflect(v: &Vector3<f32>, n: &Vector3<f32>) -> Vector3<f32> {
    v - 2.0 * v.dot(n) * n
}

fn refract(uv: &Vector3<f32>, n: &Vector3<f32>, etai_over_etat: f32) -> Vector3<f32> {
    let cos_theta = f32::min((-uv).dot(n), 1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = (1.0 - r_out_perp.magnitude_squared()).abs().sqrt().neg() * n;
    r_out_perp + r_out_parallel
}

fn reflectance(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = ((1.0 - ref_idx) / (1.0 + ref_idx)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

impl Material {
    /// Scatter decision for a hit: the attenuation and the bounced ray, or
    /// `None` when the surface absorbs the sample.
    pub fn scatter(&self, ray: &Ray, hit: &Hit) -> Option<(Color, Ray)> {
        match self {
            Material::Lambert { albedo } => {
                let scatter_direction = hit.normal + random_unit_vec();
                let scatter_ray = Ray::new(hit.point, scatter_direction);
                Some((*albedo, scatter_ray))
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(&ray.direction.normalize(), &hit.normal)
                    + *fuzz * random_vec_in_unit_sphere();
                // Fuzzed reflections below the surface are absorbed.
                if reflected.dot(&hit.normal) <= 0.0 {
                    return None;
                }
                Some((*albedo, Ray::new(hit.point, reflected)))
            }
            Material::Dielectric { index_of_refraction } => {
                let refraction_ratio = match hit.face {
                    Face::Front => 1.0 / index_of_refraction,
                    Face::Back => *index_of_refraction,
                };

                let unit_direction = ray.direction.normalize();

                let cos_theta = unit_direction.neg().dot(&hit.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                let direction = if refraction_ratio * sin_theta > 1.0
                    || reflectance(cos_theta, refraction_ratio) > random()
                {
                    reflect(&unit_direction, &hit.normal)
                } else {
                    refract(&unit_direction, &hit.normal, refraction_ratio)
                };

                Some((Color::WHITE, Ray::new(hit.point, direction)))
            }
        }
    }

    pub fn lambert(albedo: Color) -> Material {
        Material::Lambert { albedo }
    }

    pub fn metal(albedo: Color, fuzz: f32) -> Material {
        Material::Metal { albedo, fuzz }
    }

    pub fn dielectric(index_of_refraction: f32) -> Material {
        Material::Dielectric { index_of_refraction }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn reflect_mirrors_across_normal() {
        let v = vector![1.0, -1.0, 0.0];
        let n = vector![0.0, 1.0, 0.0];
        assert_eq!(reflect(&v, &n), vector![1.0, 1.0, 0.0]);
    }

    #[test]
    fn smooth_metal_reflects_exactly() {
        let metal = Material::metal(Color::new(0.8, 0.8, 0.8), 0.0);
        let ray = Ray::new(point![0.0, 1.0, 0.0], vector![1.0, -1.0, 0.0]);
        let hit = Hit {
            point: point![1.0, 0.0, 0.0],
            normal: vector![0.0, 1.0, 0.0],
            face: Face::Front,
            t: 1.0,
            material: &metal,
        };

        let (attenuation, scattered) = metal.scatter(&ray, &hit).unwrap();
        assert_eq!(attenuation, Color::new(0.8, 0.8, 0.8));
        let expected = reflect(&ray.direction.normalize(), &hit.normal);
        assert!((scattered.direction - expected).magnitude() < 1e-6);
    }

    #[test]
    fn metal_absorbs_grazing_reflection_below_surface() {
        let metal = Material::metal(Color::WHITE, 0.0);
        // Hit reported with a normal pointing along the incoming ray; the
        // reflection lands below the surface and the sample dies.
        let ray = Ray::new(point![0.0, 1.0, 0.0], vector![0.0, 1.0, 0.0]);
        let hit = Hit {
            point: point![0.0, 2.0, 0.0],
            normal: vector![0.0, 1.0, 0.0],
            face: Face::Back,
            t: 1.0,
            material: &metal,
        };
        assert!(metal.scatter(&ray, &hit).is_none());
    }

    #[test]
    fn dielectric_scatters_along_axis_head_on() {
        let glass = Material::dielectric(1.5);
        let ray = Ray::new(point![0.0, 0.0, 5.0], vector![0.0, 0.0, -1.0]);
        let hit = Hit {
            point: point![0.0, 0.0, 1.0],
            normal: vector![0.0, 0.0, 1.0],
            face: Face::Front,
            t: 4.0,
            material: &glass,
        };

        // At normal incidence both outcomes stay on the axis: transmission
        // continues along -z, the occasional Schlick reflection goes +z.
        let (attenuation, scattered) = glass.scatter(&ray, &hit).unwrap();
        assert_eq!(attenuation, Color::WHITE);
        let dir = scattered.direction.normalize();
        assert!(dir.x.abs() < 1e-6 && dir.y.abs() < 1e-6);
        assert!(dir.z.abs() > 0.99);
    }

    #[test]
    fn dielectric_always_reflects_past_critical_angle() {
        let glass = Material::dielectric(1.5);
        // Leaving the medium at a shallow angle: sin(theta') > 1, so total
        // internal reflection regardless of the RNG.
        let incoming = vector![0.8, -0.6, 0.0].normalize();
        let ray = Ray::new(point![0.0, 1.0, 0.0], incoming);
        let hit = Hit {
            point: point![0.8, 0.4, 0.0],
            normal: vector![0.0, 1.0, 0.0],
            face: Face::Back,
            t: 1.0,
            material: &glass,
        };

        let (_, scattered) = glass.scatter(&ray, &hit).unwrap();
        let expected = reflect(&incoming, &hit.normal);
        assert!((scattered.direction.normalize() - expected).magnitude() < 1e-6);
    }
}
