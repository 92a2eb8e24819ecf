//! Image-space coordinates.

use serde::{Deserialize, Serialize};

/// A sub-pixel position as delivered by the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: f64,
    pub y: f64,
}

impl ImagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Nearest integer pixel.
    pub fn to_pixel(self) -> Pixel {
        Pixel::from_subpixel(self.x, self.y)
    }
}

impl From<(f64, f64)> for ImagePoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An integer pixel coordinate in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Round a sub-pixel position to the nearest pixel (halves away from zero).
    pub fn from_subpixel(x: f64, y: f64) -> Self {
        Self {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }
}

impl From<ImagePoint> for Pixel {
    fn from(point: ImagePoint) -> Self {
        point.to_pixel()
    }
}
