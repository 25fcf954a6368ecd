//! Rasterization of drawn elements into grayscale image buffers.
//!
//! Each pixel is sampled on an `n × n` sub-grid and its gray level is the
//! share of samples that fall outside every dark shape. Rotated elements are
//! tested by mapping the sample point back through the inverse rotation.

use image::{ImageBuffer, Luma};

use crate::figure::{Element, Shape};
use crate::geometry::CellBox;

/// Segments used to approximate each quarter or half arc.
const ARC_SEGMENTS: usize = 16;

/// Largest number of samples per pixel along each axis.
pub const MAX_SUPERSAMPLE: u32 = 16;

enum Coverage {
    Circle { cx: f64, cy: f64, r_sq: f64 },
    Rect(CellBox),
    Polygon(Vec<(f64, f64)>),
}

struct Prepared<'a> {
    element: &'a Element,
    coverage: Coverage,
    bounds: (f64, f64, f64, f64),
}

impl<'a> Prepared<'a> {
    fn new(element: &'a Element) -> Self {
        let coverage = match &element.shape {
            Shape::Circle { cx, cy, r } => Coverage::Circle {
                cx: *cx,
                cy: *cy,
                r_sq: r * r,
            },
            Shape::Rect { x, y, width, height } => {
                Coverage::Rect(CellBox::new(*x, *y, *width, *height))
            }
            Shape::Path(data) => Coverage::Polygon(data.flatten(ARC_SEGMENTS)),
        };
        let bounds = rotated_bounds(element, &coverage);
        Prepared {
            element,
            coverage,
            bounds,
        }
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        let (min_x, min_y, max_x, max_y) = self.bounds;
        if px < min_x || px > max_x || py < min_y || py > max_y {
            return false;
        }
        let (px, py) = match self.element.transform {
            Some(t) => t.invert(px, py),
            None => (px, py),
        };
        match &self.coverage {
            Coverage::Circle { cx, cy, r_sq } => {
                let dx = px - cx;
                let dy = py - cy;
                dx * dx + dy * dy <= *r_sq
            }
            Coverage::Rect(cell) => cell.contains(px, py),
            Coverage::Polygon(points) => polygon_contains(points, px, py),
        }
    }
}

fn unrotated_corners(coverage: &Coverage) -> Vec<(f64, f64)> {
    match coverage {
        Coverage::Circle { cx, cy, r_sq } => {
            let r = r_sq.sqrt();
            vec![(cx - r, cy - r), (cx + r, cy + r)]
        }
        Coverage::Rect(cell) => {
            let (x1, y1) = (cell.x + cell.width, cell.y + cell.height);
            vec![(cell.x, cell.y), (x1, cell.y), (x1, y1), (cell.x, y1)]
        }
        Coverage::Polygon(points) => points.clone(),
    }
}

fn rotated_bounds(element: &Element, coverage: &Coverage) -> (f64, f64, f64, f64) {
    let mut corners = unrotated_corners(coverage);
    if let Some(t) = element.transform {
        // A circle's box must be rotated as a full rectangle.
        if let Coverage::Circle { .. } = coverage {
            let (a, b) = (corners[0], corners[1]);
            corners = vec![a, (b.0, a.1), b, (a.0, b.1)];
        }
        corners = corners.into_iter().map(|(x, y)| t.apply(x, y)).collect();
    }
    corners.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(min_x, min_y, max_x, max_y), &(x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        },
    )
}

// Even-odd ray casting.
fn polygon_contains(points: &[(f64, f64)], px: f64, py: f64) -> bool {
    let mut inside = false;
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Renders elements as black shapes on a white `width × height` image.
///
/// # Arguments
///
/// * `elements` - Shapes in pixel coordinates.
/// * `width`, `height` - Image dimensions in pixels.
/// * `supersample` - Samples per pixel along each axis, clamped to
///   `1..=MAX_SUPERSAMPLE`.
pub fn rasterize(
    elements: &[Element],
    width: u32,
    height: u32,
    supersample: u32,
) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let samples = supersample.clamp(1, MAX_SUPERSAMPLE);
    let prepared: Vec<Prepared> = elements.iter().map(Prepared::new).collect();
    let mut img = ImageBuffer::new(width, height);
    let total = f64::from(samples * samples);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let mut covered = 0u32;
        for sy in 0..samples {
            for sx in 0..samples {
                let px = f64::from(x) + (f64::from(sx) + 0.5) / f64::from(samples);
                let py = f64::from(y) + (f64::from(sy) + 0.5) / f64::from(samples);
                if prepared.iter().any(|p| p.contains(px, py)) {
                    covered += 1;
                }
            }
        }
        let light = 1.0 - f64::from(covered) / total;
        *pixel = Luma([(light * 255.0).round() as u8]);
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{basic_corner_rounded, basic_side_rounded};
    use crate::geometry::{CellBox, Rotation};

    #[test]
    fn test_rect_fills_pixels() {
        let img = rasterize(&[Element::rect(2.0, 2.0, 4.0, 4.0)], 8, 8, 1);
        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(img.get_pixel(3, 3)[0], 0);
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        assert_eq!(img.get_pixel(7, 7)[0], 255);
    }

    #[test]
    fn test_circle_leaves_corners_white() {
        let img = rasterize(&[Element::circle(10.0, 10.0, 10.0)], 20, 20, 2);
        assert_eq!(img.get_pixel(10, 10)[0], 0);
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        assert_eq!(img.get_pixel(19, 0)[0], 255);
    }

    #[test]
    fn test_side_rounded_rotation_moves_the_cap() {
        let cell = CellBox::square(0.0, 0.0, 20.0);

        // Rotation 0: right side rounded, left corners sharp.
        let img = rasterize(&[basic_side_rounded(cell, Rotation::None)], 20, 20, 1);
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(19, 0)[0], 255);

        // Half turn: the cap faces left.
        let img = rasterize(&[basic_side_rounded(cell, Rotation::Half)], 20, 20, 1);
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        assert_eq!(img.get_pixel(19, 0)[0], 0);
    }

    #[test]
    fn test_corner_rounded_cuts_one_corner() {
        let cell = CellBox::square(0.0, 0.0, 20.0);
        let img = rasterize(&[basic_corner_rounded(cell, Rotation::None)], 20, 20, 1);
        assert_eq!(img.get_pixel(19, 0)[0], 255);
        assert_eq!(img.get_pixel(0, 0)[0], 0);
        assert_eq!(img.get_pixel(0, 19)[0], 0);
        assert_eq!(img.get_pixel(19, 19)[0], 0);
    }

    #[test]
    fn test_partial_coverage_is_gray() {
        // Covers the left half of pixel (0, 0).
        let img = rasterize(&[Element::rect(0.0, 0.0, 0.5, 1.0)], 1, 1, 4);
        let level = img.get_pixel(0, 0)[0];
        assert!(level > 0 && level < 255, "level {}", level);
    }

    #[test]
    fn test_oversized_supersample_is_capped() {
        let capped = rasterize(&[Element::rect(0.0, 0.0, 0.5, 1.0)], 1, 1, 70000);
        let max = rasterize(&[Element::rect(0.0, 0.0, 0.5, 1.0)], 1, 1, MAX_SUPERSAMPLE);
        assert_eq!(capped, max);

        let zero = rasterize(&[Element::rect(0.0, 0.0, 1.0, 1.0)], 1, 1, 0);
        assert_eq!(zero.get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn test_polygon_contains() {
        let square = [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)];
        assert!(polygon_contains(&square, 2.0, 2.0));
        assert!(!polygon_contains(&square, 5.0, 2.0));
        assert!(!polygon_contains(&square[..2], 1.0, 0.0));
    }
}
