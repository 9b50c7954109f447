// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use crate::geom::{FuzzyEq, FuzzyZero};

/// Representation of the [`<transform>`] type.
///
/// The matrix is stored in the SVG order:
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// [`<transform>`]: https://www.w3.org/TR/SVG2/coords.html#InterfaceSVGTransform
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl From<svgtypes::Transform> for Transform {
    fn from(ts: svgtypes::Transform) -> Self {
        Transform::new(ts.a, ts.b, ts.c, ts.d, ts.e, ts.f)
    }
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a new translate transform.
    #[inline]
    pub fn new_translate(x: f64, y: f64) -> Self {
        Transform::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Constructs a new scale transform.
    #[inline]
    pub fn new_scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a new rotate transform.
    #[inline]
    pub fn new_rotate(angle: f64) -> Self {
        let v = angle.to_radians();
        let a = v.cos();
        let b = v.sin();
        let c = -b;
        let d = a;
        Transform::new(a, b, c, d, 0.0, 0.0)
    }

    /// Parses a `transform` attribute value.
    ///
    /// An absent, empty or malformed value results in the identity transform.
    /// Malformed values are logged.
    pub fn parse(text: Option<&str>) -> Self {
        let text = match text {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Transform::default(),
        };

        match svgtypes::Transform::from_str(text) {
            Ok(ts) => Transform::from(ts),
            Err(_) => {
                log::warn!("Failed to parse transform: '{}'. Ignored.", text);
                Transform::default()
            }
        }
    }

    /// Composes a parent transform with a local one.
    ///
    /// The resulting transform applies `local` first and `parent` second.
    #[inline]
    pub fn compose(parent: &Transform, local: &Transform) -> Transform {
        multiply(parent, local)
    }

    /// Returns a transform that maps `view_box` into a viewport of the specified size.
    pub fn from_view_box(
        view_box: svgtypes::ViewBox,
        aspect: svgtypes::AspectRatio,
        width: f64,
        height: f64,
    ) -> Self {
        let sx = width / view_box.w;
        let sy = height / view_box.h;

        let (sx, sy) = if aspect.align == svgtypes::Align::None {
            (sx, sy)
        } else {
            let s = if aspect.slice { sx.max(sy) } else { sx.min(sy) };
            (s, s)
        };

        let x = -view_box.x * sx;
        let y = -view_box.y * sy;
        let w = width - view_box.w * sx;
        let h = height - view_box.h * sy;

        let (tx, ty) = aligned_pos(aspect.align, x, y, w, h);
        Transform::new(sx, 0.0, 0.0, sy, tx, ty)
    }

    /// Returns an inverted transform.
    ///
    /// Returns `None` when the transform is not invertible.
    pub fn invert(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if det.is_fuzzy_zero() {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Transform {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            e: (self.c * self.f - self.d * self.e) * inv_det,
            f: (self.b * self.e - self.a * self.f) * inv_det,
        })
    }

    /// Returns `true` if the transform is default, aka `(1 0 0 1 0 0)`.
    pub fn is_default(&self) -> bool {
        self.a.fuzzy_eq(&1.0)
            && self.b.is_fuzzy_zero()
            && self.c.is_fuzzy_zero()
            && self.d.fuzzy_eq(&1.0)
            && self.e.is_fuzzy_zero()
            && self.f.is_fuzzy_zero()
    }

    /// Returns `true` if the transform contains rotate or skew parts.
    ///
    /// Such transforms cannot be expressed by scaling axis-aligned shapes.
    pub fn has_rotate_or_skew(&self) -> bool {
        !(self.b.is_fuzzy_zero() && self.c.is_fuzzy_zero())
    }

    /// Returns `true` if the transform scales both axes by the same factor.
    ///
    /// Only the diagonal is checked.
    #[inline]
    pub fn has_uniform_scale(&self) -> bool {
        self.a.fuzzy_eq(&self.d)
    }

    /// Returns the average of the X and Y scale factors.
    ///
    /// Used to approximate a stroke width scaling,
    /// which is not exact for non-uniform or skewed transforms.
    #[inline]
    pub fn mean_scale(&self) -> f64 {
        ((self.a * self.a + self.d * self.d) / 2.0).sqrt()
    }

    /// Applies transform to selected coordinates.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let new_x = self.a * x + self.c * y + self.e;
        let new_y = self.b * x + self.d * y + self.f;
        (new_x, new_y)
    }

    /// Applies transform to selected coordinates.
    #[inline]
    pub fn apply_to(&self, x: &mut f64, y: &mut f64) {
        let tx = *x;
        let ty = *y;
        *x = self.a * tx + self.c * ty + self.e;
        *y = self.b * tx + self.d * ty + self.f;
    }
}

#[inline(never)]
fn multiply(ts1: &Transform, ts2: &Transform) -> Transform {
    Transform {
        a: ts1.a * ts2.a + ts1.c * ts2.b,
        b: ts1.b * ts2.a + ts1.d * ts2.b,
        c: ts1.a * ts2.c + ts1.c * ts2.d,
        d: ts1.b * ts2.c + ts1.d * ts2.d,
        e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
        f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
    }
}

fn aligned_pos(align: svgtypes::Align, x: f64, y: f64, w: f64, h: f64) -> (f64, f64) {
    use svgtypes::Align;

    match align {
        Align::None => (x, y),
        Align::XMinYMin => (x, y),
        Align::XMidYMin => (x + w / 2.0, y),
        Align::XMaxYMin => (x + w, y),
        Align::XMinYMid => (x, y + h / 2.0),
        Align::XMidYMid => (x + w / 2.0, y + h / 2.0),
        Align::XMaxYMid => (x + w, y + h / 2.0),
        Align::XMinYMax => (x, y + h),
        Align::XMidYMax => (x + w / 2.0, y + h),
        Align::XMaxYMax => (x + w, y + h),
    }
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}
