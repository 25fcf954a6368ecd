//! Cell boxes, rotations and the scaled-geometry derivation shared by every
//! basic shape.
//!
//! A module occupies a `size × size` square in pixel space. Shapes are drawn in
//! a box that is shrunk toward the center of that square by the renderer's
//! scale factor, so that neighbouring modules get visual spacing.
use core::f64::consts::{FRAC_PI_2, PI};

/// An axis-aligned box in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CellBox {
    /// Creates a box from its origin and dimensions.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        CellBox { x, y, width, height }
    }

    /// The unscaled footprint of a module.
    pub fn square(x: f64, y: f64, size: f64) -> Self {
        CellBox::new(x, y, size, size)
    }

    /// The footprint of a module shrunk by `scale` and centered in the cell.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Top-left corner of the cell.
    /// * `size` - Side length of the cell.
    /// * `scale` - Scale factor, already clamped by the renderer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qidots::geometry::CellBox;
    ///
    /// let cell = CellBox::scaled(10.0, 20.0, 10.0, 0.5);
    /// assert_eq!(cell, CellBox::new(12.5, 22.5, 5.0, 5.0));
    /// ```
    pub fn scaled(x: f64, y: f64, size: f64, scale: f64) -> Self {
        let scaled = size * scale;
        let offset = (size - scaled) / 2.0;
        CellBox::new(x + offset, y + offset, scaled, scaled)
    }

    /// Center of the box.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// The rotations a module shape can be drawn with.
///
/// Every shape is built in its canonical orientation and then turned about
/// the center of its cell. Angles follow SVG screen coordinates, so a positive
/// quarter turn moves a right-facing feature to the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    /// π/2
    Quarter,
    /// π
    Half,
    /// -π/2
    NegQuarter,
}

impl Rotation {
    pub fn radians(self) -> f64 {
        match self {
            Rotation::None => 0.0,
            Rotation::Quarter => FRAC_PI_2,
            Rotation::Half => PI,
            Rotation::NegQuarter => -FRAC_PI_2,
        }
    }

    pub fn degrees(self) -> f64 {
        match self {
            Rotation::None => 0.0,
            Rotation::Quarter => 90.0,
            Rotation::Half => 180.0,
            Rotation::NegQuarter => -90.0,
        }
    }
}

/// A rotation about an arbitrary pivot, stored in degrees as SVG expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub degrees: f64,
    pub cx: f64,
    pub cy: f64,
}

impl Transform {
    pub fn rotate(degrees: f64, cx: f64, cy: f64) -> Self {
        Transform { degrees, cx, cy }
    }

    pub fn radians(&self) -> f64 {
        self.degrees.to_radians()
    }

    /// Maps a point through the rotation.
    pub fn apply(&self, px: f64, py: f64) -> (f64, f64) {
        rotate_about(px, py, self.cx, self.cy, self.radians())
    }

    /// Maps a point through the inverse rotation.
    pub fn invert(&self, px: f64, py: f64) -> (f64, f64) {
        rotate_about(px, py, self.cx, self.cy, -self.radians())
    }

    /// The SVG `transform` attribute value.
    pub fn to_svg(&self) -> String {
        format!("rotate({},{},{})", self.degrees, self.cx, self.cy)
    }
}

fn rotate_about(px: f64, py: f64, cx: f64, cy: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    let dx = px - cx;
    let dy = py - cy;
    (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
}
