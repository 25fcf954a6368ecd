//! Drawn elements and the basic shape primitives every dot style is built from.
//!
//! Each primitive receives the (already scaled) box it should fill and a
//! rotation. Shapes are laid out in a canonical orientation and then turned
//! about the center of the box, so a primitive only has to describe one
//! orientation of its rounded feature.

use crate::geometry::{CellBox, Rotation, Transform};
use crate::path::PathData;

/// The geometry of one drawn element.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { cx: f64, cy: f64, r: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Path(PathData),
}

/// A single vector element produced for one module.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    pub transform: Option<Transform>,
}

impl Element {
    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Element {
            shape: Shape::Circle { cx, cy, r },
            transform: None,
        }
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Element {
            shape: Shape::Rect { x, y, width, height },
            transform: None,
        }
    }

    pub fn path(data: PathData) -> Self {
        Element {
            shape: Shape::Path(data),
            transform: None,
        }
    }

    /// Rotates the element about `(cx, cy)`. A zero rotation leaves it untouched.
    pub fn rotated(mut self, rotation: Rotation, cx: f64, cy: f64) -> Self {
        if rotation != Rotation::None {
            self.transform = Some(Transform::rotate(rotation.degrees(), cx, cy));
        }
        self
    }

    /// Rotation of the element in degrees, 0 when it has no transform.
    pub fn rotation_degrees(&self) -> f64 {
        self.transform.map_or(0.0, |t| t.degrees)
    }

    /// Serializes the element as a single SVG tag.
    pub fn to_svg(&self) -> String {
        let transform = self
            .transform
            .map(|t| format!(" transform=\"{}\"", t.to_svg()))
            .unwrap_or_default();
        match &self.shape {
            Shape::Circle { cx, cy, r } => {
                format!("<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>", cx, cy, r, transform)
            }
            Shape::Rect { x, y, width, height } => format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}/>",
                x, y, width, height, transform
            ),
            Shape::Path(data) => format!("<path d=\"{}\"{}/>", data.to_svg_d(), transform),
        }
    }
}

/// Radii of the four corners of a rounded rectangle, 0 meaning sharp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

/*---- Primitives ----*/

fn rotate_in_cell(element: Element, cell: CellBox, rotation: Rotation) -> Element {
    let (cx, cy) = cell.center();
    element.rotated(rotation, cx, cy)
}

/// A circle inscribed in the box.
pub fn basic_dot(cell: CellBox, rotation: Rotation) -> Element {
    let (cx, cy) = cell.center();
    rotate_in_cell(Element::circle(cx, cy, cell.width / 2.0), cell, rotation)
}

/// A rectangle filling the box.
pub fn basic_square(cell: CellBox, rotation: Rotation) -> Element {
    rotate_in_cell(
        Element::rect(cell.x, cell.y, cell.width, cell.height),
        cell,
        rotation,
    )
}

/// A closed rectangle with an independent radius per corner.
///
/// The contour runs top edge, top-right arc, right edge, bottom-right arc,
/// bottom edge, bottom-left arc, left edge, top-left arc. Every arc turns
/// clockwise, so the contour stays simple whichever radii are zero.
pub fn basic_rounded_rect(cell: CellBox, radii: CornerRadii, rotation: Rotation) -> Element {
    let CornerRadii {
        top_left: tl,
        top_right: tr,
        bottom_right: br,
        bottom_left: bl,
    } = radii;

    let mut data = PathData::new()
        .move_to(cell.x + tl, cell.y)
        .horizontal(cell.width - tl - tr);
    if tr > 0.0 {
        data = data.arc(tr, tr, tr);
    }
    data = data.vertical(cell.height - tr - br);
    if br > 0.0 {
        data = data.arc(br, -br, br);
    }
    data = data.horizontal(-(cell.width - bl - br));
    if bl > 0.0 {
        data = data.arc(bl, -bl, -bl);
    }
    data = data.vertical(-(cell.height - tl - bl));
    if tl > 0.0 {
        data = data.arc(tl, tl, -tl);
    }

    rotate_in_cell(Element::path(data.close()), cell, rotation)
}

/// Rotation 0 rounds the right side into a half circle.
pub fn basic_side_rounded(cell: CellBox, rotation: Rotation) -> Element {
    let radius = cell.width / 2.0;
    basic_rounded_rect(
        cell,
        CornerRadii {
            top_right: radius,
            bottom_right: radius,
            ..CornerRadii::default()
        },
        rotation,
    )
}

/// Rotation 0 rounds the top-right corner with half the box size.
pub fn basic_corner_rounded(cell: CellBox, rotation: Rotation) -> Element {
    basic_rounded_rect(
        cell,
        CornerRadii {
            top_right: cell.width / 2.0,
            ..CornerRadii::default()
        },
        rotation,
    )
}

/// Rotation 0 rounds the top-right corner with the full box size.
pub fn basic_corner_extra_rounded(cell: CellBox, rotation: Rotation) -> Element {
    basic_rounded_rect(
        cell,
        CornerRadii {
            top_right: cell.width,
            ..CornerRadii::default()
        },
        rotation,
    )
}

/// Rotation 0 rounds the bottom-left and top-right corners.
pub fn basic_corners_rounded(cell: CellBox, rotation: Rotation) -> Element {
    let radius = cell.width / 2.0;
    basic_rounded_rect(
        cell,
        CornerRadii {
            top_right: radius,
            bottom_left: radius,
            ..CornerRadii::default()
        },
        rotation,
    )
}
