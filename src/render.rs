use std::iter::repeat_with;

use log::trace;
use nalgebra::{point, Point2, vector, Vector3};
use rayon::prelude::*;

use crate::camera::Viewport;
use crate::object::Object;
use crate::picture::{Color, Picture, Rgb8};
use crate::ray::Ray;

pub fn random() -> f32 {
    fastrand::f32()
}

pub fn random_vec() -> Vector3<f32> {
    vector![random() * 2.0 - 1.0, random() * 2.0 - 1.0, random() * 2.0 - 1.0]
}

pub fn random_vec_in_unit_sphere() -> Vector3<f32> {
    repeat_with(random_vec)
        .find(|vec| vec.magnitude_squared() < 1.0)
        .expect("infinite iterator")
}

pub fn random_unit_vec() -> Vector3<f32> {
    random_vec_in_unit_sphere().normalize()
}

const MAX_BOUNCES: u32 = 50;

pub fn render_ray(ray: &Ray, object: &Object, bounces_left: u32) -> Color {
    if bounces_left == 0 {
        return Color::BLACK;
    }

    if let Some(hit) = object.hit(ray, 0.001..) {
        return match hit.material.scatter(ray, &hit) {
            Some((attenuation, scattered)) => {
                attenuation * render_ray(&scattered, object, bounces_left - 1)
            }
            None => Color::BLACK,
        };
    }

    // Sky gradient background.
    let unit_direction = ray.direction.normalize();
    let t = 0.5 * (unit_direction.y + 1.0);
    (1.0 - t) * Color::WHITE + t * Color::new(0.5, 0.7, 1.0)
}

/// Produces the color of a single pixel using n randomly jittered samples,
/// averaged and gamma corrected with the square-root curve.
pub fn render_pixel(p: Point2<u32>, viewport: &Viewport, object: &Object, samples: u32) -> Color {
    let sum: Color = (0..samples)
        .map(|_| {
            let u = (p.x as f32 + random()) / (viewport.image_width - 1.0);
            let v = (p.y as f32 + random()) / (viewport.image_height - 1.0);
            viewport.emit_ray(&point![u, v])
        })
        .map(|ray| render_ray(&ray, object, MAX_BOUNCES))
        .sum();
    let samples = samples as f32;
    Color::new(
        (sum.r / samples).sqrt(),
        (sum.g / samples).sqrt(),
        (sum.b / samples).sqrt(),
    )
}

/// Renders the whole frame, parallelized over pixel rows. The buffer is in
/// row-major order with the top row first, ready for the PPM writer.
pub fn render_frame(
    width: u32,
    height: u32,
    samples: u32,
    viewport: &Viewport,
    object: &Object,
) -> Picture {
    let mut pixels = vec![Rgb8::default(); width as usize * height as usize];

    pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(row, buffer)| {
            trace!(target: "app", "Rendering row {row}");
            // Buffer row 0 is the top of the image; viewport v grows upward.
            let y = height - 1 - row as u32;
            for (x, pixel) in buffer.iter_mut().enumerate() {
                *pixel = render_pixel(point![x as u32, y], viewport, object, samples).into();
            }
        });

    Picture::new(pixels, (width, height))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nalgebra::vector;

    use crate::camera::Camera;
    use crate::material::Material;
    use crate::object::Sphere;
    use crate::picture::Color;

    use super::*;

    #[test]
    fn random_vec_in_unit_sphere_is_inside() {
        for _ in 0..100 {
            assert!(random_vec_in_unit_sphere().magnitude_squared() < 1.0);
        }
    }

    #[test]
    fn random_unit_vec_is_normalized() {
        for _ in 0..100 {
            assert!((random_unit_vec().magnitude() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn miss_renders_sky_gradient() {
        let empty = Object::List(Vec::new());

        let up = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 1.0, 0.0]);
        assert_eq!(render_ray(&up, &empty, MAX_BOUNCES), Color::new(0.5, 0.7, 1.0));

        let down = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, -1.0, 0.0]);
        assert_eq!(render_ray(&down, &empty, MAX_BOUNCES), Color::WHITE);
    }

    #[test]
    fn exhausted_bounce_budget_is_black() {
        let empty = Object::List(Vec::new());
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 1.0, 0.0]);
        assert_eq!(render_ray(&ray, &empty, 0), Color::BLACK);
    }

    #[test]
    fn render_frame_fills_every_pixel() {
        let world = Object::List(vec![Object::Sphere(Sphere::new(
            point![0.0, 0.0, -2.0],
            0.5,
            Arc::new(Material::lambert(Color::new(0.5, 0.5, 0.5))),
        ))]);
        let camera = Camera::new(point![0.0, 0.0, 0.0], 90.0, 1.0);
        let viewport = camera.viewport(8, 6);

        let picture = render_frame(8, 6, 2, &viewport, &world);
        assert_eq!(picture.width(), 8);
        assert_eq!(picture.height(), 6);
        // Sky above, ground-ish below; just check the corners exist and the
        // image is not uniformly black.
        let any_lit = (0..6).any(|y| (0..8).any(|x| *picture.pixel(x, y) != Rgb8::default()));
        assert!(any_lit);
    }
}
