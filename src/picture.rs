use std::io;
use std::io::Write;
use std::iter::Sum;
use std::ops::{Add, Mul};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Sum for Color {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut acc = Color::BLACK;
        for color in iter {
            acc = acc + color;
        }
        acc
    }
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Self) -> Self::Output {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        rhs * self
    }
}

// Component-wise, used for attenuation along a scattered path.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb8 {
    r: u8,
    g: u8,
    b: u8,
}

impl From<Color> for Rgb8 {
    fn from(value: Color) -> Self {
        Rgb8::new_norm(value.r, value.g, value.b)
    }
}

fn normalize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.99) as u8
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }

    pub fn new_norm(r: f32, g: f32, b: f32) -> Self {
        Rgb8::new(normalize(r), normalize(g), normalize(b))
    }
}

/// A finished frame: quantized pixels in row-major order, top row first.
pub struct Picture {
    pixels: Vec<Rgb8>,
    size: (u32, u32),
}

impl Picture {
    pub fn new(pixels: Vec<Rgb8>, size: (u32, u32)) -> Self {
        assert_eq!(pixels.len(), size.0 as usize * size.1 as usize);
        Picture { pixels, size }
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    fn to_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width() as usize + x as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> &Rgb8 {
        &self.pixels[self.to_index(x, y)]
    }

    /// Writes the plain-text PPM form: `P3`, dimensions, max value 255, then
    /// one `R G B` triple per line.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width(), self.height())?;
        writeln!(out, "255")?;
        for pixel in &self.pixels {
            writeln!(out, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
        }
        Ok(())
    }
}
