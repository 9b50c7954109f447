// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgfuse` bakes [SVG] `transform` attributes into the element geometry.

After processing, elements have no `transform` attribute, while the rendered result
stays the same. Transforms of groups are pushed down to their children
and applied to path data, points, positions, radii, sizes and stroke widths.

## Features

- Nested transforms are composed, so only the leaf geometry is changed
- Paths are converted into absolute cubic curves
- Circles scaled non-uniformly become ellipses
- Negative scales are applied to `rect` without negative sizes
- Nested `svg` viewports are moved together with their content
- User units follow the root `width` and `viewBox`
- Length units are preserved: `10mm` stays in millimeters
- Optional exact conversion of rotated and skewed shapes into paths
- Editor-specific attributes are removed from paths
- Unknown elements, attributes, namespaces, text and comments are preserved

## Limitations

- Without a shape conversion, rotations and skews are not applied to shapes
  like `rect` and `circle`, only their scale part
- `x` and `y` attributes ignore the transform translation by default
- Stroke width scaling is approximate for non-uniform scales
- Percentages and font-relative units are not supported

[SVG]: https://en.wikipedia.org/wiki/Scalable_Vector_Graphics
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

mod error;
mod fuse;
mod geom;
mod options;
mod pathdata;
mod shapes;
mod style;
mod svgtree;
mod transform;
mod units;
mod writer;

pub use crate::error::*;
pub use crate::fuse::{fuse_transforms, resolve_selection, ShapeKind};
pub use crate::geom::{FuzzyEq, FuzzyZero};
pub use crate::options::*;
pub use crate::pathdata::{PathData, PathSegment};
pub use crate::style::{Declaration, Style};
pub use crate::svgtree::*;
pub use crate::transform::Transform;
pub use crate::units::{detect_document_unit, DocumentUnit, Unit, UnitValue};
pub use crate::writer::{compress_svgz, Indent, WriteOptions};
