//! Offline ray tracer for scenes of spheres and faceted diamond solids,
//! following the [Ray Tracing in One Weekend](https://raytracing.github.io/)
//! book series. Renders a single frame and writes it as a plain-text PPM.

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::sync::Arc;
use std::time::Instant;

use log::info;
use nalgebra::point;

use crate::camera::Camera;
use crate::diamond::Diamond;
use crate::material::Material;
use crate::object::{Object, Sphere};
use crate::picture::Color;
use crate::render::{random, render_frame};

mod camera;
mod diamond;
mod material;
mod object;
mod picture;
mod ray;
mod render;

const IMAGE_WIDTH: u32 = 1024;
const IMAGE_HEIGHT: u32 = 768;
const SAMPLES_PER_PIXEL: u32 = 10;
const OUTPUT_PATH: &str = "image.ppm";

/// Ground sphere, a jittered grid of small diamonds, and three feature
/// diamonds in the middle.
fn random_scene() -> Object {
    let ground = Arc::new(Material::lambert(Color::new(0.5, 0.5, 0.5)));
    let grey = Arc::new(Material::lambert(Color::new(0.2, 0.2, 0.2)));
    let glass = Arc::new(Material::dielectric(2.4));
    let cyan_mirror = Arc::new(Material::metal(Color::new(0.0, 0.9, 0.9), 0.0));

    let mut objects = vec![Object::Sphere(Sphere::new(
        point![0.0, -1000.0, 0.0],
        1000.0,
        ground,
    ))];

    for a in -11..11 {
        for b in -11..11 {
            let center = point![a as f32 + 0.9 * random(), 0.2, b as f32 + 0.9 * random()];
            if (center - point![4.0, 0.2, 0.0]).magnitude() > 0.9 {
                objects.push(Object::Diamond(Diamond::new(center, 0.2, Arc::clone(&grey))));
            }
        }
    }

    objects.push(Object::Diamond(Diamond::new(
        point![0.0, 1.0, 0.0],
        1.0,
        Arc::clone(&glass),
    )));
    objects.push(Object::Diamond(Diamond::new(
        point![-4.0, 1.0, 0.0],
        1.0,
        cyan_mirror,
    )));
    objects.push(Object::Diamond(Diamond::new(point![4.0, 1.0, 0.0], 1.0, glass)));

    Object::List(objects)
}

fn main() -> io::Result<()> {
    env_logger::builder().target(env_logger::Target::Stdout).init();

    fastrand::seed(42);
    let world = random_scene();
    let camera = Camera::look_at(point![100.0, 100.0, 100.0], point![2.0, 1.0, 0.0], 20.0);
    let viewport = camera.viewport(IMAGE_WIDTH, IMAGE_HEIGHT);

    info!(target: "app", "Starting frame render...");
    let start = Instant::now();
    let picture = render_frame(IMAGE_WIDTH, IMAGE_HEIGHT, SAMPLES_PER_PIXEL, &viewport, &world);
    let elapsed = start.elapsed();
    info!(target: "app", "Finished rendering. Took {:?}", elapsed);

    let mut out = BufWriter::new(File::create(OUTPUT_PATH)?);
    picture.write_ppm(&mut out)?;
    info!(target: "app", "Wrote {OUTPUT_PATH}");

    Ok(())
}
