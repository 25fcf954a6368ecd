//! SVG path commands used by the rounded module shapes.
//!
//! Only the small subset of the path grammar the shapes need is modelled:
//! an absolute move, relative horizontal and vertical lines, relative
//! circular arcs (large-arc flag always 0) and close.

use core::f64::consts::TAU;

/// A single path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// `M x y`
    MoveTo { x: f64, y: f64 },
    /// `h dx`
    HorizontalBy(f64),
    /// `v dy`
    VerticalBy(f64),
    /// `a r r 0 0 sweep dx dy`, a circular arc of the given radius.
    ArcBy {
        radius: f64,
        clockwise: bool,
        dx: f64,
        dy: f64,
    },
    /// `z`
    Close,
}

/// An ordered list of path commands forming one contour.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        PathData { commands: Vec::new() }
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo { x, y });
        self
    }

    pub fn horizontal(mut self, dx: f64) -> Self {
        self.commands.push(PathCommand::HorizontalBy(dx));
        self
    }

    pub fn vertical(mut self, dy: f64) -> Self {
        self.commands.push(PathCommand::VerticalBy(dy));
        self
    }

    /// Appends a clockwise circular arc.
    pub fn arc(mut self, radius: f64, dx: f64, dy: f64) -> Self {
        self.commands.push(PathCommand::ArcBy {
            radius,
            clockwise: true,
            dx,
            dy,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of arc commands in the path.
    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::ArcBy { .. }))
            .count()
    }

    /// Serializes the path into the value of an SVG `d` attribute.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qidots::path::PathData;
    ///
    /// let d = PathData::new().move_to(0.0, 0.0).horizontal(4.0).arc(2.0, 2.0, 2.0).close();
    /// assert_eq!(d.to_svg_d(), "M 0 0 h 4 a 2 2 0 0 1 2 2 z");
    /// ```
    pub fn to_svg_d(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.commands.len());
        for command in &self.commands {
            parts.push(match *command {
                PathCommand::MoveTo { x, y } => format!("M {} {}", num(x), num(y)),
                PathCommand::HorizontalBy(dx) => format!("h {}", num(dx)),
                PathCommand::VerticalBy(dy) => format!("v {}", num(dy)),
                PathCommand::ArcBy {
                    radius,
                    clockwise,
                    dx,
                    dy,
                } => format!(
                    "a {} {} 0 0 {} {} {}",
                    radius,
                    radius,
                    u8::from(clockwise),
                    num(dx),
                    num(dy)
                ),
                PathCommand::Close => "z".to_string(),
            });
        }
        parts.join(" ")
    }

    /// Converts the contour into absolute polygon vertices.
    ///
    /// Each arc is approximated by `segments_per_arc` straight segments. The
    /// polygon is implicitly closed; `Close` does not repeat the first point.
    pub fn flatten(&self, segments_per_arc: usize) -> Vec<(f64, f64)> {
        let segments = segments_per_arc.max(1);
        let mut points: Vec<(f64, f64)> = Vec::new();
        let mut current = (0.0, 0.0);
        let mut start = (0.0, 0.0);

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } => {
                    current = (x, y);
                    start = current;
                    points.push(current);
                }
                PathCommand::HorizontalBy(dx) => {
                    current.0 += dx;
                    points.push(current);
                }
                PathCommand::VerticalBy(dy) => {
                    current.1 += dy;
                    points.push(current);
                }
                PathCommand::ArcBy {
                    radius,
                    clockwise,
                    dx,
                    dy,
                } => {
                    let end = (current.0 + dx, current.1 + dy);
                    points.extend(arc_points(current, end, radius, clockwise, segments));
                    current = end;
                }
                PathCommand::Close => {
                    current = start;
                }
            }
        }
        points
    }
}

// Negative zero prints as "-0"; emit plain zero instead.
fn num(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

// Endpoint-to-center conversion for a circular arc with large-arc = 0.
// Returns the interpolated points after `from`, ending exactly at `to`.
fn arc_points(
    from: (f64, f64),
    to: (f64, f64),
    radius: f64,
    clockwise: bool,
    segments: usize,
) -> Vec<(f64, f64)> {
    let half_x = (from.0 - to.0) / 2.0;
    let half_y = (from.1 - to.1) / 2.0;
    let half_chord_sq = half_x * half_x + half_y * half_y;
    if half_chord_sq == 0.0 || radius == 0.0 {
        return vec![to];
    }

    // Radii too small for the chord are scaled up, as SVG renderers do.
    let radius_sq = (radius * radius).max(half_chord_sq);
    let factor = ((radius_sq - half_chord_sq) / half_chord_sq).sqrt();
    let sign = if clockwise { 1.0 } else { -1.0 };
    let cx = sign * factor * half_y + (from.0 + to.0) / 2.0;
    let cy = -sign * factor * half_x + (from.1 + to.1) / 2.0;

    let start_angle = (from.1 - cy).atan2(from.0 - cx);
    let end_angle = (to.1 - cy).atan2(to.0 - cx);
    let mut sweep = end_angle - start_angle;
    if clockwise && sweep < 0.0 {
        sweep += TAU;
    } else if !clockwise && sweep > 0.0 {
        sweep -= TAU;
    }

    let r = radius_sq.sqrt();
    let mut points = Vec::with_capacity(segments);
    for i in 1..segments {
        let angle = start_angle + sweep * (i as f64) / (segments as f64);
        points.push((cx + r * angle.cos(), cy + r * angle.sin()));
    }
    points.push(to);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_d_serialization() {
        let path = PathData::new()
            .move_to(1.5, 2.0)
            .horizontal(3.0)
            .vertical(-2.5)
            .arc(1.0, -1.0, 1.0)
            .close();
        assert_eq!(path.to_svg_d(), "M 1.5 2 h 3 v -2.5 a 1 1 0 0 1 -1 1 z");
        assert_eq!(path.arc_count(), 1);

        let zero = PathData::new().move_to(0.0, 0.0).vertical(-(4.0 - 2.0 - 2.0));
        assert_eq!(zero.to_svg_d(), "M 0 0 v 0");
    }

    #[test]
    fn test_flatten_square() {
        let path = PathData::new()
            .move_to(0.0, 0.0)
            .horizontal(2.0)
            .vertical(2.0)
            .horizontal(-2.0)
            .close();
        assert_eq!(
            path.flatten(8),
            vec![(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]
        );
    }

    #[test]
    fn test_quarter_arc_stays_on_circle() {
        // Top-right corner of a rounded rect: center at (0, 2), radius 2.
        let points = arc_points((0.0, 0.0), (2.0, 2.0), 2.0, true, 8);
        assert_eq!(points.len(), 8);
        assert_eq!(*points.last().unwrap(), (2.0, 2.0));
        for (x, y) in points {
            let dist = (x * x + (y - 2.0) * (y - 2.0)).sqrt();
            assert!((dist - 2.0).abs() < 1e-9, "point off circle: {}", dist);
            assert!(x >= -1e-9 && y <= 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_counter_clockwise_arc_bulges_other_way() {
        let cw = arc_points((0.0, 0.0), (2.0, 2.0), 2.0, true, 4);
        let ccw = arc_points((0.0, 0.0), (2.0, 2.0), 2.0, false, 4);
        // The clockwise arc passes above the chord, the other one below it.
        assert!(cw[1].1 < cw[1].0);
        assert!(ccw[1].1 > ccw[1].0);
    }
}
