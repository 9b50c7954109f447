// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt::Write;
use std::str::FromStr;

use crate::geom::FuzzyZero;
use crate::svgtree::{AId, Document, Node};

/// An absolute length unit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum Unit {
    In,
    Pt,
    Px,
    Mm,
    Cm,
    M,
    Km,
    Pc,
    Yd,
    Ft,
}

// Longer suffixes go first, so `mm` and `km` are never matched as `m`.
const SUFFIXES: &[(&str, Unit)] = &[
    ("in", Unit::In),
    ("pt", Unit::Pt),
    ("px", Unit::Px),
    ("mm", Unit::Mm),
    ("cm", Unit::Cm),
    ("km", Unit::Km),
    ("pc", Unit::Pc),
    ("yd", Unit::Yd),
    ("ft", Unit::Ft),
    ("m", Unit::M),
];

impl Unit {
    /// Parses a unit name.
    pub fn from_str(text: &str) -> Option<Self> {
        SUFFIXES
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, unit)| *unit)
    }

    /// Returns the unit name.
    pub fn to_str(self) -> &'static str {
        match self {
            Unit::In => "in",
            Unit::Pt => "pt",
            Unit::Px => "px",
            Unit::Mm => "mm",
            Unit::Cm => "cm",
            Unit::M => "m",
            Unit::Km => "km",
            Unit::Pc => "pc",
            Unit::Yd => "yd",
            Unit::Ft => "ft",
        }
    }

    /// Returns the number of pixels in one unit.
    pub const fn factor(self) -> f64 {
        match self {
            Unit::In => 96.0,
            Unit::Pt => 1.33333333333,
            Unit::Px => 1.0,
            Unit::Mm => 3.77952755913,
            Unit::Cm => 37.7952755913,
            Unit::M => 3779.52755913,
            Unit::Km => 3779527.55913,
            Unit::Pc => 16.0,
            Unit::Yd => 3456.0,
            Unit::Ft => 1152.0,
        }
    }

    /// Splits a known unit suffix from the text.
    fn split_suffix(text: &str) -> (&str, Option<Unit>) {
        for (name, unit) in SUFFIXES {
            if let Some(number) = text.strip_suffix(name) {
                return (number, Some(*unit));
            }
        }

        (text, None)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// The document unit together with the size of one user unit.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DocumentUnit {
    /// The unit that plain numbers are written in.
    pub unit: Unit,
    /// The number of pixels in one user unit.
    pub scale: f64,
}

impl DocumentUnit {
    /// Creates a document unit where one user unit equals one `unit`.
    pub const fn new(unit: Unit) -> Self {
        DocumentUnit {
            unit,
            scale: unit.factor(),
        }
    }
}

impl From<Unit> for DocumentUnit {
    fn from(unit: Unit) -> Self {
        DocumentUnit::new(unit)
    }
}

/// A length in user units together with the unit it was written in.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct UnitValue {
    /// The value in user units.
    pub value: f64,
    /// The original unit. `None` when the value had no suffix.
    pub unit: Option<Unit>,
}

impl UnitValue {
    /// Parses a length.
    ///
    /// Returns `None` when the numeric part is malformed.
    /// A plain number is already in user units.
    pub fn parse(text: &str, document_unit: DocumentUnit) -> Option<UnitValue> {
        let text = text.trim();
        let (number, unit) = Unit::split_suffix(text);
        let n = svgtypes::Number::from_str(number.trim_end()).ok()?.0;

        let value = match unit {
            Some(unit) => n * unit.factor() / document_unit.scale,
            None => n,
        };

        Some(UnitValue { value, unit })
    }

    /// Parses a length, using an explicit unit when the text has no suffix.
    pub(crate) fn parse_with_unit(
        text: &str,
        unit: Option<Unit>,
        document_unit: DocumentUnit,
    ) -> Option<UnitValue> {
        let mut v = UnitValue::parse(text, document_unit)?;
        if v.unit.is_none() {
            if let Some(unit) = unit {
                v.value = v.value * unit.factor() / document_unit.scale;
                v.unit = Some(unit);
            }
        }

        Some(v)
    }

    /// Formats a value in user units.
    ///
    /// When `unit` is `None` or matches the document unit, a plain number is written.
    /// Otherwise the value is converted into `unit` and the suffix is appended.
    pub fn format(
        value: f64,
        unit: Option<Unit>,
        document_unit: DocumentUnit,
        precision: u8,
    ) -> String {
        let mut s = String::new();
        match unit {
            Some(unit) if unit != document_unit.unit => {
                write_num(value * document_unit.scale / unit.factor(), precision, &mut s);
                s.push_str(unit.to_str());
            }
            _ => write_num(value, precision, &mut s),
        }

        s
    }
}

/// Writes a number rounded to `precision` fractional digits.
pub(crate) fn write_num(num: f64, precision: u8, buf: &mut String) {
    // Round numbers to prevent writing ugly numbers like 29.999999999999996.
    let p = 10f64.powi(precision as i32);
    let v = (num * p).round() / p;

    if v.fract().is_fuzzy_zero() && v.abs() < i64::MAX as f64 {
        // Also turns `-0` into `0`.
        write!(buf, "{}", v as i64).unwrap_or_default();
    } else {
        write!(buf, "{}", v).unwrap_or_default();
    }
}

/// Detects the document unit.
///
/// The size of a user unit is the root `width` divided by the `viewBox` width.
/// Without a `viewBox`, a user unit is one pixel.
/// The document unit is the one whose size matches a user unit, or `px` otherwise.
pub fn detect_document_unit(doc: &Document) -> DocumentUnit {
    let scale = user_unit_scale(doc.root_element()).unwrap_or(1.0);
    let unit = SUFFIXES
        .iter()
        .map(|(_, unit)| *unit)
        .find(|unit| (unit.factor() / scale - 1.0).abs() < 0.01)
        .unwrap_or(Unit::Px);

    DocumentUnit { unit, scale }
}

fn user_unit_scale(root: Node) -> Option<f64> {
    let view_box = svgtypes::ViewBox::from_str(root.attribute(AId::ViewBox)?).ok()?;
    let width = UnitValue::parse(root.attribute(AId::Width)?, DocumentUnit::new(Unit::Px))?;

    if width.value > 0.0 && view_box.w > 0.0 {
        Some(width.value / view_box.w)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    const PX: DocumentUnit = DocumentUnit::new(Unit::Px);
    const MM: DocumentUnit = DocumentUnit::new(Unit::Mm);

    #[test]
    fn parse_plain() {
        let v = UnitValue::parse("10", PX).unwrap();
        assert_eq!(v, UnitValue { value: 10.0, unit: None });
    }

    #[test]
    fn parse_with_spaces() {
        let v = UnitValue::parse(" 2.5e1 ", PX).unwrap();
        assert_eq!(v.value, 25.0);
    }

    #[test]
    fn parse_mm_in_px_document() {
        let v = UnitValue::parse("10mm", PX).unwrap();
        assert_eq!(v.unit, Some(Unit::Mm));
        assert_approx_eq!(f64, v.value, 37.7952755913, epsilon = 1e-9);
    }

    #[test]
    fn parse_mm_in_mm_document() {
        let v = UnitValue::parse("10mm", MM).unwrap();
        assert_eq!(v.value, 10.0);
    }

    #[test]
    fn parse_longest_suffix() {
        assert_eq!(UnitValue::parse("1km", Unit::Km.into()).unwrap().unit, Some(Unit::Km));
        assert_eq!(UnitValue::parse("1cm", Unit::Cm.into()).unwrap().unit, Some(Unit::Cm));
        assert_eq!(UnitValue::parse("1m", Unit::M.into()).unwrap().unit, Some(Unit::M));
    }

    #[test]
    fn parse_invalid() {
        assert!(UnitValue::parse("", PX).is_none());
        assert!(UnitValue::parse("abc", PX).is_none());
        assert!(UnitValue::parse("10%", PX).is_none());
        assert!(UnitValue::parse("1 2", PX).is_none());
    }

    #[test]
    fn parse_explicit_unit() {
        let v = UnitValue::parse_with_unit("2", Some(Unit::In), PX).unwrap();
        assert_eq!(v.value, 192.0);
        assert_eq!(v.unit, Some(Unit::In));
    }

    #[test]
    fn format_document_unit() {
        assert_eq!(UnitValue::format(20.0, None, PX, 8), "20");
        assert_eq!(UnitValue::format(20.0, Some(Unit::Px), PX, 8), "20");
        assert_eq!(UnitValue::format(1.5, None, MM, 8), "1.5");
    }

    #[test]
    fn format_other_unit() {
        assert_eq!(UnitValue::format(192.0, Some(Unit::In), PX, 8), "2in");

        let v = UnitValue::parse("10mm", PX).unwrap();
        assert_eq!(UnitValue::format(v.value * 2.0, v.unit, PX, 8), "20mm");
    }

    #[test]
    fn format_precision() {
        assert_eq!(UnitValue::format(1.0 / 3.0, None, PX, 3), "0.333");
        assert_eq!(UnitValue::format(29.999999999999996, None, PX, 8), "30");
        assert_eq!(UnitValue::format(-0.0000000001, None, PX, 8), "0");
    }

    #[test]
    fn unit_names() {
        for (name, unit) in SUFFIXES {
            assert_eq!(Unit::from_str(name), Some(*unit));
            assert_eq!(unit.to_str(), *name);
        }

        assert_eq!(Unit::from_str("em"), None);
    }

    #[test]
    fn document_unit_from_view_box() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg' width='210mm' viewBox='0 0 210 297'/>",
        )
        .unwrap();
        let unit = detect_document_unit(&doc);
        assert_eq!(unit.unit, Unit::Mm);
        assert_approx_eq!(f64, unit.scale, 3.77952755913, epsilon = 1e-9);
    }

    #[test]
    fn document_unit_px_view_box() {
        // A typical Inkscape document: sized in millimeters, drawn in pixels.
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg' \
                  width='210mm' viewBox='0 0 793.7007874 1122.519685'/>",
        )
        .unwrap();
        let unit = detect_document_unit(&doc);
        assert_eq!(unit.unit, Unit::Px);
        assert_approx_eq!(f64, unit.scale, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn document_unit_without_view_box() {
        let doc =
            Document::parse_str("<svg xmlns='http://www.w3.org/2000/svg' width='210mm'/>").unwrap();
        assert_eq!(detect_document_unit(&doc), PX);
    }

    #[test]
    fn document_unit_odd_scale() {
        let doc = Document::parse_str(
            "<svg xmlns='http://www.w3.org/2000/svg' width='200' viewBox='0 0 100 100'/>",
        )
        .unwrap();
        let unit = detect_document_unit(&doc);
        assert_eq!(unit.unit, Unit::Px);
        assert_eq!(unit.scale, 2.0);

        let v = UnitValue::parse("10px", unit).unwrap();
        assert_eq!(v.value, 5.0);
        assert_eq!(UnitValue::format(v.value * 2.0, Some(Unit::Mm), unit, 3), "5.292mm");
    }

    #[test]
    fn document_unit_default() {
        let doc =
            Document::parse_str("<svg xmlns='http://www.w3.org/2000/svg' width='100%'/>").unwrap();
        assert_eq!(detect_document_unit(&doc), PX);
    }
}
