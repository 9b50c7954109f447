// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Compressed SVG must use the GZip algorithm.
    MalformedGZip,

    /// We do not allow SVG with more than 1_000_000 elements
    /// or deeper than 1024 levels for security reasons.
    ElementsLimitReached,

    /// The root element is not an `svg` element.
    NoRootSvg,

    /// Failed to parse an SVG data.
    ParsingFailed(roxmltree::Error),

    /// A geometry attribute has a malformed numeric value.
    ///
    /// `element` is the element's `id` or its tag name, when `id` is not set.
    #[allow(missing_docs)]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::ParsingFailed(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::MalformedGZip => {
                write!(f, "provided data has a malformed GZip content")
            }
            Error::ElementsLimitReached => {
                write!(f, "the maximum number of SVG elements has been reached")
            }
            Error::NoRootSvg => {
                write!(f, "the root element is not 'svg'")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "SVG data parsing failed cause {}", e)
            }
            Error::InvalidAttribute {
                ref element,
                ref attribute,
                ref value,
            } => {
                write!(
                    f,
                    "element '{}' has an invalid '{}' value: '{}'",
                    element, attribute, value
                )
            }
        }
    }
}

impl std::error::Error for Error {}
