// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

macro_rules! names {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:expr,)+ }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            /// Parses a name from a string.
            pub fn from_str(text: &str) -> Option<Self> {
                match text {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Returns the name as a string.
            pub fn to_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.to_str())
            }
        }
    };
}

names!(
    /// An SVG element name.
    EId {
        A => "a",
        Circle => "circle",
        ClipPath => "clipPath",
        Defs => "defs",
        Desc => "desc",
        Ellipse => "ellipse",
        Filter => "filter",
        ForeignObject => "foreignObject",
        G => "g",
        Image => "image",
        Line => "line",
        LinearGradient => "linearGradient",
        Marker => "marker",
        Mask => "mask",
        Metadata => "metadata",
        Path => "path",
        Pattern => "pattern",
        Polygon => "polygon",
        Polyline => "polyline",
        RadialGradient => "radialGradient",
        Rect => "rect",
        Style => "style",
        Svg => "svg",
        Switch => "switch",
        Symbol => "symbol",
        Text => "text",
        TextPath => "textPath",
        Title => "title",
        Tspan => "tspan",
        Use => "use",
    }
);

names!(
    /// An SVG attribute name.
    ///
    /// Only attributes in the null namespace are listed.
    AId {
        Cx => "cx",
        Cy => "cy",
        D => "d",
        Height => "height",
        Id => "id",
        Points => "points",
        PreserveAspectRatio => "preserveAspectRatio",
        R => "r",
        Rx => "rx",
        Ry => "ry",
        StrokeWidth => "stroke-width",
        Style => "style",
        Transform => "transform",
        ViewBox => "viewBox",
        Width => "width",
        X => "x",
        X1 => "x1",
        X2 => "x2",
        Y => "y",
        Y1 => "y1",
        Y2 => "y2",
    }
);
