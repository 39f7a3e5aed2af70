use std::f32::consts::PI;
use std::ops::RangeBounds;
use std::sync::Arc;

use nalgebra::{point, Point3, Vector3};

use crate::material::Material;
use crate::ray::{Face, Hit, Ray};

/// A faceted gem solid: a hexagonal pavilion of six triangles meeting in a
/// bottom apex, a girdle band of six quads, and a flat hexagonal table on
/// top. `height` is the distance from the center to the bottom apex and
/// doubles as the girdle hexagon's circumradius; the table sits at
/// `center.y + height / 2` with half that radius. All vertices are derived
/// from `center` and `height` on each hit test.
#[derive(Clone, Debug)]
pub struct Diamond {
    pub center: Point3<f32>,
    pub height: f32,
    pub material: Arc<Material>,
}

struct Vertices {
    bottom: Point3<f32>,
    middle: [Point3<f32>; 6],
    top: [Point3<f32>; 6],
    cap_center: Point3<f32>,
}

impl Diamond {
    pub fn new(center: Point3<f32>, height: f32, material: Arc<Material>) -> Self {
        assert!(height > 0.0, "diamond height must be positive");
        Diamond { center, height, material }
    }

    /// Both hexagonal rings run counter-clockwise seen from above, starting
    /// at the vertex with the largest x coordinate.
    fn vertices(&self) -> Vertices {
        let half = self.height / 2.0;
        let mut middle = [self.center; 6];
        let mut top = [self.center; 6];
        for i in 0..6 {
            let (sin, cos) = (PI * i as f32 / 3.0).sin_cos();
            middle[i] = point![
                self.center.x + self.height * cos,
                self.center.y,
                self.center.z - self.height * sin
            ];
            top[i] = point![
                self.center.x + half * cos,
                self.center.y + half,
                self.center.z - half * sin
            ];
        }
        Vertices {
            bottom: point![self.center.x, self.center.y - self.height, self.center.z],
            middle,
            top,
            cap_center: point![self.center.x, self.center.y + half, self.center.z],
        }
    }

    /// Cheap necessary-condition filter: every vertex lies within `height`
    /// of the center, so a ray that misses that sphere misses the solid.
    /// Also rejects when the sphere is behind the origin or the origin is
    /// inside it.
    fn hits_bounding_sphere(&self, ray: &Ray) -> bool {
        let oc = ray.origin - self.center;
        let a = ray.direction.magnitude_squared();
        let half_b = oc.dot(&ray.direction);
        let c = oc.magnitude_squared() - self.height * self.height;

        let discriminant = half_b * half_b - a * c;
        if discriminant <= 0.0 {
            return false;
        }
        (-half_b - discriminant.sqrt()) / a > 0.0
    }

    /// Parameter of the ray's crossing with the plane through `on_plane`
    /// with the given (unnormalized) normal, or `None` when the ray runs
    /// parallel to the plane.
    fn plane_hit(
        ray: &Ray,
        on_plane: &Point3<f32>,
        normal: &Vector3<f32>,
        epsilon: f32,
    ) -> Option<f32> {
        let denom = ray.direction.dot(normal);
        if denom.abs() < epsilon {
            return None;
        }
        Some((on_plane - ray.origin).dot(normal) / denom)
    }

    pub fn hit<R>(&self, ray: &Ray, t_rng: R) -> Option<Hit>
        where R: RangeBounds<f32> {
        if !self.hits_bounding_sphere(ray) {
            return None;
        }

        let v = self.vertices();
        let epsilon = f32::min(1e-6, (1e-6 * self.height).abs());
        let mut nearest: Option<(f32, Vector3<f32>)> = None;

        // Pavilion: six triangles fanned around the bottom apex.
        for i in 0..6 {
            let (a, b, c) = (v.bottom, v.middle[i], v.middle[(i + 1) % 6]);
            let normal = (b - a).cross(&(c - a));
            let Some(t) = Self::plane_hit(ray, &a, &normal, epsilon) else {
                continue;
            };
            if !t_rng.contains(&t) {
                continue;
            }
            if !point_in_triangle(&a, &b, &c, &ray.at(t)) {
                continue;
            }
            if nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, normal));
            }
        }

        // Girdle band: six quads, each tested as two triangles sharing the
        // diagonal from middle[i] to top[i + 1].
        for i in 0..6 {
            let (a, b) = (v.middle[i], v.middle[(i + 1) % 6]);
            let (c, d) = (v.top[(i + 1) % 6], v.top[i]);
            let normal = (b - a).cross(&(c - a));
            let Some(t) = Self::plane_hit(ray, &a, &normal, epsilon) else {
                continue;
            };
            if !t_rng.contains(&t) {
                continue;
            }
            let p = ray.at(t);
            if !point_in_triangle(&a, &b, &c, &p) && !point_in_triangle(&c, &d, &a, &p) {
                continue;
            }
            if nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, normal));
            }
        }

        // Table: a single plane, contained when the point falls in any of
        // the six triangles fanned around the cap centroid.
        let normal = (v.top[1] - v.top[0]).cross(&(v.top[2] - v.top[0]));
        if let Some(t) = Self::plane_hit(ray, &v.top[0], &normal, epsilon) {
            if t_rng.contains(&t) {
                let p = ray.at(t);
                let inside = (0..6).any(|i| {
                    point_in_triangle(&v.top[i], &v.top[(i + 1) % 6], &v.cap_center, &p)
                });
                if inside && nearest.map_or(true, |(best, _)| t < best) {
                    nearest = Some((t, normal));
                }
            }
        }

        let (t, plane_normal) = nearest?;
        let point = ray.at(t);

        // The center is interior to the convex solid, so the outward face
        // normal has a positive dot with any face point seen from it.
        let mut outward = plane_normal.normalize();
        if outward.dot(&(point - self.center)) < 0.0 {
            outward = -outward;
        }
        let (face, normal) = if ray.direction.dot(&outward) < 0.0 {
            (Face::Front, outward)
        } else {
            (Face::Back, -outward)
        };
        Some(Hit {
            point,
            normal,
            face,
            t,
            material: &self.material,
        })
    }
}

/// Barycentric-sign containment for a point already on the triangle's
/// plane: the point is inside iff it sits on the same rotational side of
/// all three edges. Strictly positive dots, so boundary points are out.
fn point_in_triangle(
    a: &Point3<f32>,
    b: &Point3<f32>,
    c: &Point3<f32>,
    pt: &Point3<f32>,
) -> bool {
    let e = (pt - a).cross(&(pt - b));
    let f = (pt - b).cross(&(pt - c));
    let g = (pt - c).cross(&(pt - a));
    e.dot(&f) > 0.0 && f.dot(&g) > 0.0 && g.dot(&e) > 0.0
}
