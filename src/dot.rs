//! Module shape selection.
//!
//! A [`DotRenderer`] draws one module at a time. The configured [`DotType`]
//! decides which primitive is used and how it is rotated, based on which
//! orthogonal neighbors are dark. The morse style additionally keeps a
//! per-render cache of line decisions, so one renderer must be used for
//! exactly one matrix.

use core::fmt;
use core::str::FromStr;

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::error::Error;
use crate::figure::{
    basic_corner_extra_rounded, basic_corner_rounded, basic_corners_rounded, basic_dot,
    basic_rounded_rect, basic_side_rounded, basic_square, CornerRadii, Element,
};
use crate::geometry::{CellBox, Rotation};
use crate::morse::{Cell, LineDecision, LineDecisions, LineDirection, LinePosition};
use crate::neighbors::{NeighborQuery, Neighbors};

/// Smallest accepted scale factor.
pub const MIN_SCALE: f64 = 0.1;
/// Largest accepted scale factor.
pub const MAX_SCALE: f64 = 1.0;

/// The visual style of the modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotType {
    Dots,
    #[default]
    Square,
    Rounded,
    ExtraRounded,
    Classy,
    ClassyRounded,
    Morse,
}

impl DotType {
    pub const ALL: [DotType; 7] = [
        DotType::Dots,
        DotType::Square,
        DotType::Rounded,
        DotType::ExtraRounded,
        DotType::Classy,
        DotType::ClassyRounded,
        DotType::Morse,
    ];

    /// The tag used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            DotType::Dots => "dots",
            DotType::Square => "square",
            DotType::Rounded => "rounded",
            DotType::ExtraRounded => "extra-rounded",
            DotType::Classy => "classy",
            DotType::ClassyRounded => "classy-rounded",
            DotType::Morse => "morse",
        }
    }
}

impl fmt::Display for DotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DotType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DotType::ALL
            .into_iter()
            .find(|dot_type| dot_type.as_str() == s)
            .ok_or_else(|| Error::UnknownDotType(s.to_string()))
    }
}

/// Construction options of a [`DotRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotOptions {
    pub dot_type: DotType,
    /// Shrinks every shape toward its cell center, clamped to `[0.1, 1.0]`.
    pub scale: f64,
}

impl Default for DotOptions {
    fn default() -> Self {
        DotOptions {
            dot_type: DotType::default(),
            scale: MAX_SCALE,
        }
    }
}

impl DotOptions {
    pub fn new(dot_type: DotType) -> Self {
        DotOptions {
            dot_type,
            ..DotOptions::default()
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

fn clamp_scale(scale: f64) -> f64 {
    let clamped = if scale.is_nan() {
        MAX_SCALE
    } else {
        scale.clamp(MIN_SCALE, MAX_SCALE)
    };
    if clamped != scale {
        warn!("dot scale {} out of range, using {}", scale, clamped);
    }
    clamped
}

/// Draws QR modules in one of the [`DotType`] styles.
///
/// `R` is the random source used to break ties in the morse style.
///
/// # Example
///
/// ```rust
/// use qidots::dot::{DotOptions, DotRenderer, DotType};
/// use qidots::figure::Shape;
/// use qidots::neighbors::NoNeighbors;
///
/// let mut renderer = DotRenderer::new(DotOptions::new(DotType::Rounded));
/// let element = renderer.draw(0.0, 0.0, 10.0, &NoNeighbors, None);
/// assert_eq!(element.shape, Shape::Circle { cx: 5.0, cy: 5.0, r: 5.0 });
/// ```
#[derive(Debug, Clone)]
pub struct DotRenderer<R = StdRng> {
    dot_type: DotType,
    scale: f64,
    decisions: LineDecisions,
    rng: R,
}

impl DotRenderer<StdRng> {
    /// Creates a renderer whose morse tie-breaks come from system entropy.
    pub fn new(options: DotOptions) -> Self {
        DotRenderer::with_rng(options, StdRng::from_entropy())
    }

    /// Creates a renderer with reproducible morse tie-breaks.
    pub fn with_seed(options: DotOptions, seed: u64) -> Self {
        DotRenderer::with_rng(options, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DotRenderer<R> {
    pub fn with_rng(options: DotOptions, rng: R) -> Self {
        DotRenderer {
            dot_type: options.dot_type,
            scale: clamp_scale(options.scale),
            decisions: LineDecisions::new(),
            rng,
        }
    }

    pub fn dot_type(&self) -> DotType {
        self.dot_type
    }

    /// The effective, clamped scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Morse line decisions committed so far.
    pub fn decisions(&self) -> &LineDecisions {
        &self.decisions
    }

    /// Draws the module whose cell has its top-left corner at `(x, y)`.
    ///
    /// # Arguments
    ///
    /// * `x`, `y` - Pixel origin of the cell.
    /// * `size` - Side length of the cell in pixels.
    /// * `neighbors` - Occupancy relative to this module.
    /// * `cell` - Grid coordinate; required by the morse style, which
    ///   falls back to a plain dot without it.
    pub fn draw<Q>(
        &mut self,
        x: f64,
        y: f64,
        size: f64,
        neighbors: &Q,
        cell: Option<Cell>,
    ) -> Element
    where
        Q: NeighborQuery + ?Sized,
    {
        let scaled = CellBox::scaled(x, y, size, self.scale);
        match self.dot_type {
            DotType::Dots => basic_dot(scaled, Rotation::None),
            DotType::Square => basic_square(scaled, Rotation::None),
            DotType::Rounded => {
                draw_rounded(scaled, Neighbors::query(neighbors), basic_corner_rounded)
            }
            DotType::ExtraRounded => {
                draw_rounded(scaled, Neighbors::query(neighbors), basic_corner_extra_rounded)
            }
            DotType::Classy => {
                draw_classy(scaled, Neighbors::query(neighbors), basic_corner_rounded)
            }
            DotType::ClassyRounded => {
                draw_classy(scaled, Neighbors::query(neighbors), basic_corner_extra_rounded)
            }
            DotType::Morse => match cell {
                Some(cell) => {
                    let decision = self.decisions.decide(cell, neighbors, &mut self.rng);
                    apply_morse_decision(decision, x, y, size, self.scale)
                }
                None => basic_dot(scaled, Rotation::None),
            },
        }
    }

    /// Draws the module and attaches the element to `document`.
    pub fn draw_into<D, Q>(
        &mut self,
        document: &mut D,
        x: f64,
        y: f64,
        size: f64,
        neighbors: &Q,
        cell: Option<Cell>,
    ) where
        D: Document + ?Sized,
        Q: NeighborQuery + ?Sized,
    {
        let element = self.draw(x, y, size, neighbors, cell);
        document.attach(element);
    }
}

type CornerPrimitive = fn(CellBox, Rotation) -> Element;

// Shared by rounded and extra-rounded, which only differ in the corner primitive.
fn draw_rounded(cell: CellBox, n: Neighbors, corner: CornerPrimitive) -> Element {
    let count = n.count();

    if count == 0 {
        return basic_dot(cell, Rotation::None);
    }

    if count > 2 || (n.left && n.right) || (n.top && n.bottom) {
        return basic_square(cell, Rotation::None);
    }

    if count == 2 {
        let rotation = if n.left && n.top {
            Rotation::Quarter
        } else if n.top && n.right {
            Rotation::Half
        } else if n.right && n.bottom {
            Rotation::NegQuarter
        } else {
            Rotation::None
        };
        return corner(cell, rotation);
    }

    let rotation = if n.top {
        Rotation::Quarter
    } else if n.right {
        Rotation::Half
    } else if n.bottom {
        Rotation::NegQuarter
    } else {
        Rotation::None
    };
    basic_side_rounded(cell, rotation)
}

fn draw_classy(cell: CellBox, n: Neighbors, corner: CornerPrimitive) -> Element {
    if n.count() == 0 {
        return basic_corners_rounded(cell, Rotation::Quarter);
    }

    if !n.left && !n.top {
        return corner(cell, Rotation::NegQuarter);
    }

    if !n.right && !n.bottom {
        return corner(cell, Rotation::Quarter);
    }

    basic_square(cell, Rotation::None)
}

// Run ends reach the inner edge of their cell so they meet the neighbouring
// segment; only the rounded outer side keeps the centering offset.
fn apply_morse_decision(decision: LineDecision, x: f64, y: f64, size: f64, scale: f64) -> Element {
    let scaled = CellBox::scaled(x, y, size, scale);
    let offset = scaled.x - x;
    let radius = scaled.width / 2.0;
    let extended = size - offset;

    match (decision.direction, decision.position) {
        (LineDirection::Single, _) => basic_dot(scaled, Rotation::None),
        (LineDirection::Horizontal, LinePosition::Middle) => {
            basic_square(CellBox::new(x, scaled.y, size, scaled.height), Rotation::None)
        }
        (LineDirection::Vertical, LinePosition::Middle) => {
            basic_square(CellBox::new(scaled.x, y, scaled.width, size), Rotation::None)
        }
        (LineDirection::Horizontal, LinePosition::Start) => basic_rounded_rect(
            CellBox::new(scaled.x, scaled.y, extended, scaled.height),
            CornerRadii {
                top_left: radius,
                bottom_left: radius,
                ..CornerRadii::default()
            },
            Rotation::None,
        ),
        (LineDirection::Horizontal, LinePosition::End) => basic_rounded_rect(
            CellBox::new(x, scaled.y, extended, scaled.height),
            CornerRadii {
                top_right: radius,
                bottom_right: radius,
                ..CornerRadii::default()
            },
            Rotation::None,
        ),
        (LineDirection::Vertical, LinePosition::Start) => basic_rounded_rect(
            CellBox::new(scaled.x, scaled.y, scaled.width, extended),
            CornerRadii {
                top_left: radius,
                top_right: radius,
                ..CornerRadii::default()
            },
            Rotation::None,
        ),
        (LineDirection::Vertical, LinePosition::End) => basic_rounded_rect(
            CellBox::new(scaled.x, y, scaled.width, extended),
            CornerRadii {
                bottom_left: radius,
                bottom_right: radius,
                ..CornerRadii::default()
            },
            Rotation::None,
        ),
    }
}
