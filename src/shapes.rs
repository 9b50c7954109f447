// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::fuse::Context;
use crate::pathdata::PathData;
use crate::svgtree::{AId, EId, Node};
use crate::Error;

/// Attributes replaced by `d` after a shape conversion.
pub(crate) const GEOMETRY_ATTRIBUTES: &[AId] = &[
    AId::X,
    AId::Y,
    AId::Width,
    AId::Height,
    AId::Rx,
    AId::Ry,
    AId::Cx,
    AId::Cy,
    AId::R,
    AId::X1,
    AId::Y1,
    AId::X2,
    AId::Y2,
    AId::Points,
];

/// Converts a basic shape into a path in its own coordinate system.
///
/// Returns `None` for non-shape elements and for shapes that are not rendered,
/// like a rect with a zero width.
pub(crate) fn convert(node: Node, ctx: &Context) -> Result<Option<PathData>, Error> {
    match node.tag_id() {
        Some(EId::Rect) => convert_rect(node, ctx),
        Some(EId::Circle) => convert_circle(node, ctx),
        Some(EId::Ellipse) => convert_ellipse(node, ctx),
        Some(EId::Line) => convert_line(node, ctx),
        Some(EId::Polyline) => convert_points(node, false, ctx),
        Some(EId::Polygon) => convert_points(node, true, ctx),
        _ => Ok(None),
    }
}

fn number(node: Node, aid: AId, ctx: &Context) -> Result<f64, Error> {
    Ok(ctx.length(node, aid)?.map(|v| v.value).unwrap_or(0.0))
}

fn convert_rect(node: Node, ctx: &Context) -> Result<Option<PathData>, Error> {
    // 'width' and 'height' attributes must be positive and non-zero.
    let width = number(node, AId::Width, ctx)?;
    let height = number(node, AId::Height, ctx)?;
    if !(width > 0.0 && height > 0.0) {
        log::warn!(
            "Rect '{}' has an invalid size. Not converted.",
            node.element_id()
        );
        return Ok(None);
    }

    let x = number(node, AId::X, ctx)?;
    let y = number(node, AId::Y, ctx)?;

    let (mut rx, mut ry) = resolve_rx_ry(node, ctx)?;

    // Clamp rx/ry to the half of the width/height.
    if rx > width / 2.0 {
        rx = width / 2.0;
    }
    if ry > height / 2.0 {
        ry = height / 2.0;
    }

    let mut path = PathData::new();
    if rx > 0.0 && ry > 0.0 {
        path.push_move_to(x + rx, y);

        path.push_line_to(x + width - rx, y);
        path.push_arc_to(rx, ry, 0.0, false, true, x + width, y + ry);

        path.push_line_to(x + width, y + height - ry);
        path.push_arc_to(rx, ry, 0.0, false, true, x + width - rx, y + height);

        path.push_line_to(x + rx, y + height);
        path.push_arc_to(rx, ry, 0.0, false, true, x, y + height - ry);

        path.push_line_to(x, y + ry);
        path.push_arc_to(rx, ry, 0.0, false, true, x + rx, y);
    } else {
        path.push_move_to(x, y);
        path.push_line_to(x + width, y);
        path.push_line_to(x + width, y + height);
        path.push_line_to(x, y + height);
    }
    path.push_close_path();

    Ok(Some(path))
}

fn resolve_rx_ry(node: Node, ctx: &Context) -> Result<(f64, f64), Error> {
    // Negative values are ignored.
    let rx = ctx.length(node, AId::Rx)?.map(|v| v.value).filter(|v| *v >= 0.0);
    let ry = ctx.length(node, AId::Ry)?.map(|v| v.value).filter(|v| *v >= 0.0);

    Ok(match (rx, ry) {
        (None, None) => (0.0, 0.0),
        (Some(rx), None) => (rx, rx),
        (None, Some(ry)) => (ry, ry),
        (Some(rx), Some(ry)) => (rx, ry),
    })
}

fn convert_circle(node: Node, ctx: &Context) -> Result<Option<PathData>, Error> {
    let cx = number(node, AId::Cx, ctx)?;
    let cy = number(node, AId::Cy, ctx)?;
    let r = number(node, AId::R, ctx)?;

    if !(r > 0.0) {
        log::warn!(
            "Circle '{}' has an invalid 'r' value. Not converted.",
            node.element_id()
        );
        return Ok(None);
    }

    Ok(Some(ellipse_to_path(cx, cy, r, r)))
}

fn convert_ellipse(node: Node, ctx: &Context) -> Result<Option<PathData>, Error> {
    let cx = number(node, AId::Cx, ctx)?;
    let cy = number(node, AId::Cy, ctx)?;
    let (rx, ry) = resolve_rx_ry(node, ctx)?;

    if !(rx > 0.0 && ry > 0.0) {
        log::warn!(
            "Ellipse '{}' has an invalid radius. Not converted.",
            node.element_id()
        );
        return Ok(None);
    }

    Ok(Some(ellipse_to_path(cx, cy, rx, ry)))
}

fn ellipse_to_path(cx: f64, cy: f64, rx: f64, ry: f64) -> PathData {
    let mut path = PathData::new();
    path.push_move_to(cx + rx, cy);
    path.push_arc_to(rx, ry, 0.0, false, true, cx, cy + ry);
    path.push_arc_to(rx, ry, 0.0, false, true, cx - rx, cy);
    path.push_arc_to(rx, ry, 0.0, false, true, cx, cy - ry);
    path.push_arc_to(rx, ry, 0.0, false, true, cx + rx, cy);
    path.push_close_path();
    path
}

fn convert_line(node: Node, ctx: &Context) -> Result<Option<PathData>, Error> {
    let x1 = number(node, AId::X1, ctx)?;
    let y1 = number(node, AId::Y1, ctx)?;
    let x2 = number(node, AId::X2, ctx)?;
    let y2 = number(node, AId::Y2, ctx)?;

    let mut path = PathData::new();
    path.push_move_to(x1, y1);
    path.push_line_to(x2, y2);
    Ok(Some(path))
}

fn convert_points(node: Node, close: bool, ctx: &Context) -> Result<Option<PathData>, Error> {
    let points = ctx.points(node)?;

    // 'polyline' and 'polygon' elements must contain at least 2 points.
    if points.len() < 2 {
        log::warn!(
            "An element '{}' has less than 2 points. Not converted.",
            node.element_id()
        );
        return Ok(None);
    }

    let mut path = PathData::new();
    for (i, (x, y)) in points.iter().enumerate() {
        if i == 0 {
            path.push_move_to(x.value, y.value);
        } else {
            path.push_line_to(x.value, y.value);
        }
    }

    if close {
        path.push_close_path();
    }

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathdata::PathSegment;
    use crate::svgtree::Document;
    use crate::{DocumentUnit, Options, Unit};

    fn convert_str(text: &str) -> Option<PathData> {
        let doc = Document::parse_str(&format!(
            "<svg xmlns='http://www.w3.org/2000/svg'>{}</svg>",
            text
        ))
        .unwrap();
        let opt = Options::default();
        let ctx = Context {
            opt: &opt,
            document_unit: DocumentUnit::new(Unit::Px),
        };

        convert(doc.element_by_id("e").unwrap(), &ctx).unwrap()
    }

    #[test]
    fn rect() {
        let path = convert_str("<rect id='e' x='1' y='2' width='10' height='20'/>").unwrap();
        assert_eq!(
            path.to_string_with_precision(8),
            "M 1 2 C 1 2 11 2 11 2 C 11 2 11 22 11 22 C 11 22 1 22 1 22 Z"
        );
    }

    #[test]
    fn rect_rounded() {
        let path = convert_str("<rect id='e' width='10' height='10' rx='20'/>").unwrap();
        assert_eq!(path[0], PathSegment::MoveTo { x: 5.0, y: 0.0 });
        assert_eq!(path.last(), Some(&PathSegment::ClosePath));
    }

    #[test]
    fn rect_zero_size() {
        assert!(convert_str("<rect id='e' width='0' height='10'/>").is_none());
    }

    #[test]
    fn circle() {
        let path = convert_str("<circle id='e' cx='10' cy='10' r='5'/>").unwrap();
        assert_eq!(path[0], PathSegment::MoveTo { x: 15.0, y: 10.0 });
        assert!(path.len() >= 6);
    }

    #[test]
    fn polyline() {
        let path = convert_str("<polyline id='e' points='0,0 10,0 10,10'/>").unwrap();
        assert_eq!(path.len(), 3);
        assert_ne!(path.last(), Some(&PathSegment::ClosePath));
    }

    #[test]
    fn polygon_single_point() {
        assert!(convert_str("<polygon id='e' points='0,0'/>").is_none());
    }

    #[test]
    fn not_a_shape() {
        assert!(convert_str("<text id='e' x='1'/>").is_none());
    }
}
