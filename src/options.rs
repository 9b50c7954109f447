// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::Unit;

/// Transform fusion options.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// The unit that plain numbers are expressed in.
    ///
    /// A user unit is then exactly one such unit.
    ///
    /// `None` detects it from the ratio of the root element `width`
    /// to the `viewBox` width. Falls back to `px`.
    ///
    /// Default: None
    pub document_unit: Option<Unit>,

    /// Adds the transform translation to `x` and `y` attributes.
    ///
    /// By default, only the scale part is applied to positions,
    /// which is not enough for elements moved by a `translate`.
    ///
    /// Default: false
    pub translate_positions: bool,

    /// Converts shapes into paths when the transform has a rotation or a skew.
    ///
    /// Such transforms cannot be applied to axis-aligned shapes exactly.
    ///
    /// Default: false
    pub convert_shapes: bool,

    /// The maximum number of fractional digits in written numbers.
    ///
    /// Default: 8
    pub precision: u8,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            document_unit: None,
            translate_positions: false,
            convert_shapes: false,
            precision: 8,
        }
    }
}
