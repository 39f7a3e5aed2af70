use std::ops::RangeBounds;
use std::sync::Arc;

use float_ord::FloatOrd;
use nalgebra::Point3;

use crate::diamond::Diamond;
use crate::material::Material;
use crate::ray::{Face, Hit, Ray};

#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Point3<f32>,
    pub radius: f32,
    pub material: Arc<Material>,
}

impl Sphere {
    pub fn new(center: Point3<f32>, radius: f32, material: Arc<Material>) -> Self {
        Sphere { center, radius, material }
    }

    pub fn hit<R>(&self, ray: &Ray, t_rng: R) -> Option<Hit>
        where R: RangeBounds<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.magnitude_squared();
        let half_b = oc.dot(&ray.direction);
        let c = oc.magnitude_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrtd = discriminant.sqrt();

        // find the nearest root that lies in the acceptable range.
        let mut root = (-half_b - sqrtd) / a;
        if !t_rng.contains(&root) {
            root = (-half_b + sqrtd) / a;
            if !t_rng.contains(&root) {
                return None;
            }
        }

        let point = ray.at(root);
        let outward_normal = (point - self.center) / self.radius;
        let (face, normal) = if ray.direction.dot(&outward_normal) < 0.0 {
            (Face::Front, outward_normal)
        } else {
            (Face::Back, -outward_normal)
        };
        Some(Hit {
            point,
            normal,
            t: root,
            face,
            material: &self.material,
        })
    }
}

#[derive(Clone, Debug)]
pub enum Object {
    Sphere(Sphere),
    Diamond(Diamond),
    List(Vec<Object>),
}

impl Object {
    pub fn hit<R>(&self, ray: &Ray, t_rng: R) -> Option<Hit>
        where R: RangeBounds<f32> + Clone {
        match self {
            Object::Sphere(sphere) => sphere.hit(ray, t_rng),
            Object::Diamond(diamond) => diamond.hit(ray, t_rng),
            Object::List(list) => {
                list.iter()
                    .filter_map(|obj| obj.hit(ray, t_rng.clone()))
                    .min_by_key(|hit| FloatOrd(hit.t))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{point, vector};

    use super::*;

    fn grey() -> Arc<Material> {
        Arc::new(Material::lambert(crate::picture::Color::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn sphere_front_hit() {
        let sphere = Sphere::new(point![0.0, 0.0, -2.0], 1.0, grey());
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, -1.0]);

        let hit = sphere.hit(&ray, 0.001..).unwrap();
        assert!((hit.t - 1.0).abs() < 1e-5);
        assert_eq!(hit.face, Face::Front);
        assert!((hit.normal - vector![0.0, 0.0, 1.0]).magnitude() < 1e-5);
    }

    #[test]
    fn sphere_inside_hit_flips_normal() {
        let sphere = Sphere::new(point![0.0, 0.0, 0.0], 1.0, grey());
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, -1.0]);

        let hit = sphere.hit(&ray, 0.001..).unwrap();
        assert_eq!(hit.face, Face::Back);
        assert!((hit.normal - vector![0.0, 0.0, 1.0]).magnitude() < 1e-5);
    }

    #[test]
    fn sphere_miss() {
        let sphere = Sphere::new(point![0.0, 5.0, -2.0], 1.0, grey());
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, -1.0]);
        assert!(sphere.hit(&ray, 0.001..).is_none());
    }

    #[test]
    fn list_returns_nearest_child() {
        let list = Object::List(vec![
            Object::Sphere(Sphere::new(point![0.0, 0.0, -5.0], 1.0, grey())),
            Object::Sphere(Sphere::new(point![0.0, 0.0, -2.0], 0.5, grey())),
        ]);
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, -1.0]);

        let hit = list.hit(&ray, 0.001..).unwrap();
        assert!((hit.t - 1.5).abs() < 1e-5);
    }

    #[test]
    fn empty_list_misses() {
        let list = Object::List(Vec::new());
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, -1.0]);
        assert!(list.hit(&ray, 0.001..).is_none());
    }
}
