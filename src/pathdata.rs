// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::units::write_num;
use crate::Transform;

/// A path's absolute segment.
///
/// Unlike SVG path data, can contain only `M`, `C` and `Z` segments.
/// Lines, quadratic curves and arcs are converted into cubic curves.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PathSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    ClosePath,
}

/// A cubic superpath.
///
/// All segments are in absolute coordinates.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct PathData(pub Vec<PathSegment>);

impl PathData {
    /// Creates a new path.
    pub fn new() -> Self {
        PathData(Vec::new())
    }

    /// Parses an SVG path data.
    ///
    /// Unlike renderers, which stop at the first error,
    /// any error in the data is reported.
    pub fn parse(text: &str) -> Result<Self, svgtypes::Error> {
        let mut path = PathData::new();
        for segment in svgtypes::SimplifyingPathParser::from(text) {
            match segment? {
                svgtypes::SimplePathSegment::MoveTo { x, y } => {
                    path.push_move_to(x, y);
                }
                svgtypes::SimplePathSegment::LineTo { x, y } => {
                    path.push_line_to(x, y);
                }
                svgtypes::SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    path.push_quad_to(x1, y1, x, y);
                }
                svgtypes::SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    path.push_curve_to(x1, y1, x2, y2, x, y);
                }
                svgtypes::SimplePathSegment::ClosePath => {
                    path.push_close_path();
                }
            }
        }

        Ok(path)
    }

    /// Pushes a MoveTo segment to the path.
    pub fn push_move_to(&mut self, x: f64, y: f64) {
        self.push(PathSegment::MoveTo { x, y });
    }

    /// Pushes a line to the path.
    ///
    /// Stored as a cubic curve with control points at the line ends.
    pub fn push_line_to(&mut self, x: f64, y: f64) {
        let (px, py) = self.last_point().unwrap_or((x, y));
        self.push_curve_to(px, py, x, y, x, y);
    }

    /// Pushes a quadratic curve to the path.
    pub fn push_quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        let (px, py) = self.last_point().unwrap_or((x, y));
        let quad = kurbo::QuadBez::new((px, py), (x1, y1), (x, y));
        let cubic = quad.raise();
        self.push_curve_to(cubic.p1.x, cubic.p1.y, cubic.p2.x, cubic.p2.y, x, y);
    }

    /// Pushes a CurveTo segment to the path.
    pub fn push_curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.push(PathSegment::CurveTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
    }

    /// Pushes an elliptical arc to the path.
    ///
    /// The arc is approximated by cubic curves.
    /// Arcs with a zero radius degrade into lines.
    #[allow(clippy::too_many_arguments)]
    pub fn push_arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) {
        let (px, py) = match self.last_point() {
            Some(v) => v,
            None => return,
        };

        let svg_arc = kurbo::SvgArc {
            from: kurbo::Point::new(px, py),
            to: kurbo::Point::new(x, y),
            radii: kurbo::Vec2::new(rx, ry),
            x_rotation: x_axis_rotation.to_radians(),
            large_arc,
            sweep,
        };

        match kurbo::Arc::from_svg_arc(&svg_arc) {
            Some(arc) => {
                arc.to_cubic_beziers(0.1, |p1, p2, p| {
                    self.push_curve_to(p1.x, p1.y, p2.x, p2.y, p.x, p.y);
                });
            }
            None => {
                self.push_line_to(x, y);
            }
        }
    }

    /// Pushes a ClosePath segment to the path.
    pub fn push_close_path(&mut self) {
        self.push(PathSegment::ClosePath);
    }

    /// Returns the current point.
    ///
    /// After a ClosePath this is the start of the closed subpath.
    pub fn last_point(&self) -> Option<(f64, f64)> {
        let mut close = false;
        for seg in self.iter().rev() {
            match *seg {
                PathSegment::MoveTo { x, y } => return Some((x, y)),
                PathSegment::CurveTo { x, y, .. } if !close => return Some((x, y)),
                PathSegment::CurveTo { .. } => {}
                PathSegment::ClosePath => close = true,
            }
        }

        None
    }

    /// Applies the transform to every anchor and control point.
    pub fn transform(&mut self, ts: &Transform) {
        for seg in self.iter_mut() {
            match seg {
                PathSegment::MoveTo { x, y } => {
                    ts.apply_to(x, y);
                }
                PathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    ts.apply_to(x1, y1);
                    ts.apply_to(x2, y2);
                    ts.apply_to(x, y);
                }
                PathSegment::ClosePath => {}
            }
        }
    }

    /// Writes the path as an SVG path data string.
    pub fn to_string_with_precision(&self, precision: u8) -> String {
        let mut buf = String::new();
        for seg in self.iter() {
            match *seg {
                PathSegment::MoveTo { x, y } => {
                    buf.push_str("M ");
                    write_coords(&[x, y], precision, &mut buf);
                }
                PathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    buf.push_str("C ");
                    write_coords(&[x1, y1, x2, y2, x, y], precision, &mut buf);
                }
                PathSegment::ClosePath => {
                    buf.push_str("Z ");
                }
            }
        }

        buf.pop();
        buf
    }
}

fn write_coords(list: &[f64], precision: u8, buf: &mut String) {
    for n in list {
        write_num(*n, precision, buf);
        buf.push(' ');
    }
}

impl std::ops::Deref for PathData {
    type Target = Vec<PathSegment>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for PathData {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
