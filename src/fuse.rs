// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use crate::geom::FuzzyZero;
use crate::pathdata::PathData;
use crate::shapes;
use crate::style::Style;
use crate::svgtree::{
    AId, Attribute, Document, EId, Node, NodeId, INKSCAPE_NS, SODIPODI_NS, SVG_NS,
};
use crate::units::{detect_document_unit, DocumentUnit, Unit, UnitValue};
use crate::{Error, Options, Transform};

/// A shape category.
///
/// Defines how a transform is baked into element's geometry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShapeKind {
    /// Grouping and resource elements. Only the transform is passed down.
    Container,
    /// `path`
    Path,
    /// `polygon`
    Polygon,
    /// `polyline`
    Polyline,
    /// `line`
    Line,
    /// `circle`
    Circle,
    /// `ellipse`
    Ellipse,
    /// `rect`, `image` and `foreignObject`
    Rect,
    /// A nested `svg`.
    ///
    /// Positioned like a `rect`, while its content gets a separate transform.
    Viewport,
    /// Any other element. Geometry is detected by attribute presence.
    Generic,
}

impl ShapeKind {
    /// Classifies an element.
    ///
    /// Non-SVG elements, like `sodipodi:namedview`, are containers.
    pub fn classify(node: Node) -> ShapeKind {
        let name = match node.tag_name() {
            Some(v) => v,
            None => return ShapeKind::Container,
        };

        let eid = match node.tag_id() {
            Some(v) => v,
            None => {
                return match name.namespace.as_deref() {
                    None | Some(SVG_NS) => ShapeKind::Generic,
                    Some(_) => ShapeKind::Container,
                };
            }
        };

        match eid {
            EId::Path => ShapeKind::Path,
            EId::Polygon => ShapeKind::Polygon,
            EId::Polyline => ShapeKind::Polyline,
            EId::Line => ShapeKind::Line,
            EId::Circle => ShapeKind::Circle,
            EId::Ellipse => ShapeKind::Ellipse,
            EId::Rect | EId::Image | EId::ForeignObject => ShapeKind::Rect,
            EId::Svg if node.parent_element().is_some() => ShapeKind::Viewport,
            EId::Svg
            | EId::G
            | EId::A
            | EId::Defs
            | EId::Symbol
            | EId::Switch
            | EId::Marker
            | EId::Pattern
            | EId::ClipPath
            | EId::Mask
            | EId::LinearGradient
            | EId::RadialGradient
            | EId::Filter
            | EId::Style
            | EId::Metadata
            | EId::Title
            | EId::Desc => ShapeKind::Container,
            EId::Text | EId::TextPath | EId::Tspan | EId::Use => ShapeKind::Generic,
        }
    }
}

/// Resolves element IDs into nodes.
///
/// Unknown IDs are logged and skipped.
pub fn resolve_selection<S: AsRef<str>>(doc: &Document, ids: &[S]) -> Vec<NodeId> {
    let mut selection = Vec::with_capacity(ids.len());
    for id in ids {
        match doc.element_by_id(id.as_ref()) {
            Some(node) => selection.push(node.id()),
            None => log::warn!("Element '{}' not found. Skipped.", id.as_ref()),
        }
    }

    selection
}

/// Bakes `transform` attributes into the geometry.
///
/// Each selected subtree is processed starting from the identity transform.
/// An empty selection processes the whole document.
///
/// The document is modified in place. On error, it can be left partially processed.
pub fn fuse_transforms(
    doc: &mut Document,
    selection: &[NodeId],
    opt: &Options,
) -> Result<(), Error> {
    let ctx = Context {
        document_unit: opt
            .document_unit
            .map(DocumentUnit::new)
            .unwrap_or_else(|| detect_document_unit(doc)),
        opt,
    };

    if selection.is_empty() {
        let root = doc.root_element().id();
        walk(doc, root, &ctx)
    } else {
        for id in selection {
            walk(doc, *id, &ctx)?;
        }

        Ok(())
    }
}

fn walk(doc: &mut Document, root: NodeId, ctx: &Context) -> Result<(), Error> {
    let mut stack = vec![(root, Transform::default())];
    while let Some((id, inherited)) = stack.pop() {
        if !doc.get(id).is_element() {
            continue;
        }

        let ts = fuse_node(doc, id, &inherited, ctx)?;

        // Reversed, so children are processed in the document order.
        let children: Vec<_> = doc
            .get(id)
            .children()
            .filter(|n| n.is_element())
            .map(|n| (n.id(), ts))
            .collect();
        stack.extend(children.into_iter().rev());
    }

    Ok(())
}

enum Change {
    Set(AId, String),
    Remove(AId),
    Rename(EId),
}

fn fuse_node(
    doc: &mut Document,
    id: NodeId,
    inherited: &Transform,
    ctx: &Context,
) -> Result<Transform, Error> {
    let node = doc.get(id);
    let ts = Transform::compose(inherited, &Transform::parse(node.attribute(AId::Transform)));
    let kind = ShapeKind::classify(node);

    let mut changes = Vec::new();
    let mut children_ts = ts;
    if !ts.is_default() {
        scale_stroke_width(node, &ts, ctx, &mut changes)?;

        match kind {
            ShapeKind::Container => {}
            ShapeKind::Viewport => children_ts = fuse_viewport(node, &ts, ctx, &mut changes)?,
            _ => {
                let converted = if ctx.opt.convert_shapes && ts.has_rotate_or_skew() {
                    convert_to_path(node, &ts, ctx, &mut changes)?
                } else {
                    false
                };

                if !converted {
                    fuse_geometry(node, kind, &ts, ctx, &mut changes)?;
                }
            }
        }
    }

    let mut node = doc.get_mut(id);
    node.remove_attribute(AId::Transform);

    if kind == ShapeKind::Path {
        node.retain_attributes(|attr| !is_editor_attribute(attr));
    }

    for change in changes {
        match change {
            Change::Set(aid, value) => node.set_attribute(aid, value),
            Change::Remove(aid) => {
                node.remove_attribute(aid);
            }
            Change::Rename(eid) => node.set_tag_name(eid),
        }
    }

    Ok(children_ts)
}

fn is_editor_attribute(attr: &Attribute) -> bool {
    if let Some(ref ns) = attr.name.namespace {
        if ns == INKSCAPE_NS || ns == SODIPODI_NS {
            return true;
        }
    }

    let name = attr.name.to_string();
    name.contains("sodipodi") || name.contains("inkscape")
}

fn scale_stroke_width(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    let scale = ts.mean_scale();

    if let Some(text) = node.attribute(AId::Style) {
        let mut style = Style::parse(text);
        if let Some(value) = style.get("stroke-width").map(str::to_string) {
            if let Some(value) = scale_length(node, AId::Style, &value, scale, ctx)? {
                style.set("stroke-width", &value);
                changes.push(Change::Set(AId::Style, style.to_string()));
            }
        }
    }

    if let Some(value) = node.attribute(AId::StrokeWidth) {
        if let Some(value) = scale_length(node, AId::StrokeWidth, value, scale, ctx)? {
            changes.push(Change::Set(AId::StrokeWidth, value));
        }
    }

    Ok(())
}

fn scale_length(
    node: Node,
    aid: AId,
    value: &str,
    scale: f64,
    ctx: &Context,
) -> Result<Option<String>, Error> {
    // CSS-wide keywords have nothing to scale.
    if matches!(value.trim(), "inherit" | "initial" | "unset") {
        return Ok(None);
    }

    let v = UnitValue::parse(value, ctx.document_unit)
        .ok_or_else(|| invalid_attribute(node, aid.to_str(), value))?;
    Ok(Some(ctx.format(v.value * scale, v.unit)))
}

fn convert_to_path(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<bool, Error> {
    let mut path = match shapes::convert(node, ctx)? {
        Some(v) => v,
        None => return Ok(false),
    };

    log::debug!("'{}' converted into a path.", shape_name(node));

    path.transform(ts);

    for aid in shapes::GEOMETRY_ATTRIBUTES {
        if node.has_attribute(*aid) {
            changes.push(Change::Remove(*aid));
        }
    }

    changes.push(Change::Rename(EId::Path));
    changes.push(Change::Set(
        AId::D,
        path.to_string_with_precision(ctx.opt.precision),
    ));

    Ok(true)
}

fn fuse_geometry(
    node: Node,
    kind: ShapeKind,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    match kind {
        ShapeKind::Container | ShapeKind::Viewport => {}
        ShapeKind::Path => fuse_path(node, ts, ctx, changes)?,
        ShapeKind::Polygon | ShapeKind::Polyline => fuse_points(node, ts, ctx, changes)?,
        ShapeKind::Line => fuse_line(node, ts, ctx, changes)?,
        ShapeKind::Circle => {
            fuse_center(node, ts, ctx, changes)?;
            fuse_circle_radius(node, ts, ctx, changes)?;
        }
        ShapeKind::Ellipse => {
            fuse_center(node, ts, ctx, changes)?;
            fuse_radii(node, ts, ctx, changes)?;
        }
        ShapeKind::Rect => {
            fuse_radii(node, ts, ctx, changes)?;
            fuse_position_and_size(node, ts, ctx, changes)?;
        }
        ShapeKind::Generic => {
            fuse_path(node, ts, ctx, changes)?;
            fuse_center(node, ts, ctx, changes)?;
            fuse_radius(node, ts, ctx, changes)?;
            fuse_radii(node, ts, ctx, changes)?;
            fuse_position_and_size(node, ts, ctx, changes)?;
        }
    }

    Ok(())
}

fn fuse_path(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    let text = match node.attribute(AId::D) {
        Some(v) => v,
        None => return Ok(()),
    };

    let mut path = PathData::parse(text).map_err(|_| invalid_attribute(node, "d", text))?;
    path.transform(ts);
    changes.push(Change::Set(
        AId::D,
        path.to_string_with_precision(ctx.opt.precision),
    ));

    Ok(())
}

fn fuse_points(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    if !node.has_attribute(AId::Points) {
        return Ok(());
    }

    let points = ctx.points(node)?;
    let mut list = Vec::with_capacity(points.len());
    for (x, y) in points {
        let (tx, ty) = ts.apply(x.value, y.value);
        list.push(format!("{},{}", ctx.format(tx, x.unit), ctx.format(ty, x.unit)));
    }

    changes.push(Change::Set(AId::Points, list.join(" ")));
    Ok(())
}

fn fuse_line(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    for (ax, ay) in [(AId::X1, AId::Y1), (AId::X2, AId::Y2)] {
        let x = ctx.length(node, ax)?;
        let y = ctx.length(node, ay)?;
        let (tx, ty) = ts.apply(value_or_zero(x), value_or_zero(y));
        changes.push(Change::Set(ax, ctx.format(tx, x.and_then(|v| v.unit))));
        changes.push(Change::Set(ay, ctx.format(ty, y.and_then(|v| v.unit))));
    }

    Ok(())
}

fn fuse_center(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    let cx = ctx.length(node, AId::Cx)?;
    let cy = ctx.length(node, AId::Cy)?;
    if cx.is_none() && cy.is_none() {
        return Ok(());
    }

    // Both coordinates are written using the `cx` unit.
    let unit = cx.or(cy).and_then(|v| v.unit);
    let (x, y) = ts.apply(value_or_zero(cx), value_or_zero(cy));
    changes.push(Change::Set(AId::Cx, ctx.format(x, unit)));
    changes.push(Change::Set(AId::Cy, ctx.format(y, unit)));

    Ok(())
}

fn fuse_circle_radius(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    let r = match ctx.length(node, AId::R)? {
        Some(v) => v,
        None => return Ok(()),
    };

    if ts.has_uniform_scale() {
        changes.push(Change::Set(AId::R, ctx.format(r.value * ts.a.abs(), r.unit)));
    } else {
        changes.push(Change::Set(AId::Rx, ctx.format(r.value * ts.a.abs(), r.unit)));
        changes.push(Change::Set(AId::Ry, ctx.format(r.value * ts.d.abs(), r.unit)));
        changes.push(Change::Remove(AId::R));
        changes.push(Change::Rename(EId::Ellipse));
    }

    Ok(())
}

// Unlike a circle, an unknown element cannot be turned into an ellipse.
fn fuse_radius(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    if let Some(r) = ctx.length(node, AId::R)? {
        changes.push(Change::Set(AId::R, ctx.format(r.value * ts.mean_scale(), r.unit)));
    }

    Ok(())
}

fn fuse_radii(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    let (rx, ry) = match (ctx.length(node, AId::Rx)?, ctx.length(node, AId::Ry)?) {
        (None, None) => return Ok(()),
        (Some(rx), None) => (rx, rx),
        (None, Some(ry)) => (ry, ry),
        (Some(rx), Some(ry)) => (rx, ry),
    };

    changes.push(Change::Set(AId::Rx, ctx.format(rx.value * ts.a.abs(), rx.unit)));
    changes.push(Change::Set(AId::Ry, ctx.format(ry.value * ts.d.abs(), ry.unit)));

    Ok(())
}

fn fuse_position_and_size(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<(), Error> {
    let bounds = Bounds {
        x: ctx.length(node, AId::X)?,
        y: ctx.length(node, AId::Y)?,
        width: ctx.length(node, AId::Width)?,
        height: ctx.length(node, AId::Height)?,
        relative_x: false,
        relative_y: false,
    };

    bounds.transform(ts, ctx.opt.translate_positions).write(ctx, changes);
    Ok(())
}

// Returns the transform for the viewport content.
fn fuse_viewport(
    node: Node,
    ts: &Transform,
    ctx: &Context,
    changes: &mut Vec<Change>,
) -> Result<Transform, Error> {
    let old = Bounds {
        x: ctx.absolute_length(node, AId::X)?,
        y: ctx.absolute_length(node, AId::Y)?,
        width: ctx.absolute_length(node, AId::Width)?,
        height: ctx.absolute_length(node, AId::Height)?,
        relative_x: is_relative(node, AId::X),
        relative_y: is_relative(node, AId::Y),
    };

    let new = old.transform(ts, ctx.opt.translate_positions);
    new.write(ctx, changes);

    let view_box = node
        .attribute(AId::ViewBox)
        .and_then(|v| svgtypes::ViewBox::from_str(v).ok())
        .filter(|vb| vb.w > 0.0 && vb.h > 0.0);
    let aspect = node
        .attribute(AId::PreserveAspectRatio)
        .and_then(|v| svgtypes::AspectRatio::from_str(v).ok())
        .unwrap_or_default();

    // The content is placed by the new viewport, so it has to be
    // mapped back from it: new^-1 * ts * old.
    let old_ts = old.viewport_transform(view_box, aspect);
    let new_ts = new.viewport_transform(view_box, aspect);
    let content_ts = match (old_ts, new_ts) {
        (Some(old_ts), Some(new_ts)) => new_ts
            .invert()
            .map(|inv| Transform::compose(&Transform::compose(&inv, ts), &old_ts)),
        _ => None,
    };

    match content_ts {
        Some(v) => Ok(v),
        None => {
            log::warn!(
                "Viewport '{}' has a relative or invalid geometry. Its content may move.",
                shape_name(node)
            );
            Ok(*ts)
        }
    }
}

/// An element position and size in user units.
#[derive(Clone, Copy, Debug)]
struct Bounds {
    x: Option<UnitValue>,
    y: Option<UnitValue>,
    width: Option<UnitValue>,
    height: Option<UnitValue>,
    // Percentages are kept as is.
    relative_x: bool,
    relative_y: bool,
}

impl Bounds {
    fn transform(&self, ts: &Transform, translate: bool) -> Bounds {
        let (dx, dy) = if translate { (ts.e, ts.f) } else { (0.0, 0.0) };

        let mut x = transform_position(self.x, self.relative_x, ts.a, dx);
        let mut y = transform_position(self.y, self.relative_y, ts.d, dy);

        let mut width = self.width.map(|v| UnitValue { value: v.value * ts.a, ..v });
        if let Some(ref mut w) = width {
            // Keep the far edge in place.
            if w.value < 0.0 {
                if !self.relative_x {
                    x.get_or_insert(UnitValue { value: dx, unit: None }).value += w.value;
                }

                w.value = -w.value;
            }
        }

        let mut height = self.height.map(|v| UnitValue { value: v.value * ts.d, ..v });
        if let Some(ref mut h) = height {
            if h.value < 0.0 {
                if !self.relative_y {
                    y.get_or_insert(UnitValue { value: dy, unit: None }).value += h.value;
                }

                h.value = -h.value;
            }
        }

        Bounds {
            x,
            y,
            width,
            height,
            ..*self
        }
    }

    // Maps the viewport content into the parent user space.
    fn viewport_transform(
        &self,
        view_box: Option<svgtypes::ViewBox>,
        aspect: svgtypes::AspectRatio,
    ) -> Option<Transform> {
        if self.relative_x || self.relative_y {
            return None;
        }

        let origin = Transform::new_translate(value_or_zero(self.x), value_or_zero(self.y));
        let view_box = match view_box {
            Some(v) => v,
            None => return Some(origin),
        };

        match (self.width, self.height) {
            (Some(w), Some(h)) if w.value > 0.0 && h.value > 0.0 => {
                let fit = Transform::from_view_box(view_box, aspect, w.value, h.value);
                Some(Transform::compose(&origin, &fit))
            }
            _ => None,
        }
    }

    fn write(&self, ctx: &Context, changes: &mut Vec<Change>) {
        let values = [
            (AId::Width, self.width),
            (AId::Height, self.height),
            (AId::X, self.x),
            (AId::Y, self.y),
        ];

        for (aid, v) in values {
            if let Some(v) = v {
                changes.push(Change::Set(aid, ctx.format(v.value, v.unit)));
            }
        }
    }
}

fn transform_position(
    v: Option<UnitValue>,
    relative: bool,
    scale: f64,
    offset: f64,
) -> Option<UnitValue> {
    if relative {
        return None;
    }

    match v {
        Some(v) => Some(UnitValue {
            value: v.value * scale + offset,
            unit: v.unit,
        }),
        None if !offset.is_fuzzy_zero() => Some(UnitValue {
            value: offset,
            unit: None,
        }),
        None => None,
    }
}

fn is_relative(node: Node, aid: AId) -> bool {
    node.attribute(aid)
        .map(|v| v.trim_end().ends_with('%'))
        .unwrap_or(false)
}

#[inline]
fn value_or_zero(v: Option<UnitValue>) -> f64 {
    v.map(|v| v.value).unwrap_or(0.0)
}

fn shape_name(node: Node) -> String {
    match node.attribute(AId::Id) {
        Some(id) => id.to_string(),
        None => node.tag_name().map(|n| n.to_string()).unwrap_or_default(),
    }
}

pub(crate) fn invalid_attribute(node: Node, attribute: &str, value: &str) -> Error {
    Error::InvalidAttribute {
        element: shape_name(node),
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

pub(crate) struct Context<'a> {
    pub opt: &'a Options,
    pub document_unit: DocumentUnit,
}

impl Context<'_> {
    /// Parses a length attribute into user units.
    pub fn length(&self, node: Node, aid: AId) -> Result<Option<UnitValue>, Error> {
        match node.attribute(aid) {
            Some(text) => UnitValue::parse(text, self.document_unit)
                .map(Some)
                .ok_or_else(|| invalid_attribute(node, aid.to_str(), text)),
            None => Ok(None),
        }
    }

    /// Like [`length`](Self::length), but percentages are skipped.
    pub fn absolute_length(&self, node: Node, aid: AId) -> Result<Option<UnitValue>, Error> {
        if is_relative(node, aid) {
            Ok(None)
        } else {
            self.length(node, aid)
        }
    }

    /// Parses the `points` attribute.
    ///
    /// Coordinates can be separated by commas and/or spaces.
    /// A `y` coordinate without a unit uses the `x` one.
    pub fn points(&self, node: Node) -> Result<Vec<(UnitValue, UnitValue)>, Error> {
        let text = node.attribute(AId::Points).unwrap_or_default();
        let error = || invalid_attribute(node, AId::Points.to_str(), text);

        let numbers: Vec<&str> = text
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|s| !s.is_empty())
            .collect();

        if numbers.len() % 2 != 0 {
            return Err(error());
        }

        let mut points = Vec::with_capacity(numbers.len() / 2);
        for pair in numbers.chunks(2) {
            let x = UnitValue::parse(pair[0], self.document_unit).ok_or_else(error)?;
            let y = UnitValue::parse_with_unit(pair[1], x.unit, self.document_unit)
                .ok_or_else(error)?;
            points.push((x, y));
        }

        Ok(points)
    }

    pub fn format(&self, value: f64, unit: Option<Unit>) -> String {
        UnitValue::format(value, unit, self.document_unit, self.opt.precision)
    }
}
