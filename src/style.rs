// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A single `style` declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct Declaration {
    /// Property name.
    pub name: String,
    /// Property value, without `!important`.
    pub value: String,
    /// `!important` flag.
    pub important: bool,
}

/// An ordered list of `style` attribute declarations.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Style(pub Vec<Declaration>);

impl Style {
    /// Parses a `style` attribute value.
    ///
    /// Malformed declarations are skipped.
    pub fn parse(text: &str) -> Self {
        let declarations = simplecss::DeclarationTokenizer::from(text)
            .map(|d| Declaration {
                name: d.name.to_string(),
                value: d.value.to_string(),
                important: d.important,
            })
            .collect();

        Style(declarations)
    }

    /// Returns the value of the last declaration with the specified name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    /// Replaces the value of every declaration with the specified name.
    pub fn set(&mut self, name: &str, value: &str) {
        for d in self.0.iter_mut().filter(|d| d.name == name) {
            d.value = value.to_string();
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ";")?;
            }

            write!(f, "{}:{}", d.name, d.value)?;
            if d.important {
                write!(f, " !important")?;
            }
        }

        Ok(())
    }
}
