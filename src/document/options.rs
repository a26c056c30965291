/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Settings which control how source bytes are turned into a tree.
///
/// The defaults give a tolerant parser which drops whitespace-only
/// text, so that indentation between elements never shows up as an
/// element value.
///
/// ```
/// use xml_reader::ParseOptions;
///
/// let options = ParseOptions::new().recover(false).keep_blanks(true);
/// assert!(!options.is_recover());
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseOptions {
    recover: bool,
    keep_blanks: bool,
    trim_text: bool,
}

impl ParseOptions {
    pub fn new() -> ParseOptions {
        ParseOptions {
            recover: true,
            keep_blanks: false,
            trim_text: false,
        }
    }

    /// Closes mismatched or unclosed tags and ignores content outside
    /// of the root element instead of failing.
    pub fn recover(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    /// Keeps whitespace-only text nodes in the tree.
    pub fn keep_blanks(mut self, keep_blanks: bool) -> Self {
        self.keep_blanks = keep_blanks;
        self
    }

    /// Removes leading and trailing whitespace from every text node.
    pub fn trim_text(mut self, trim_text: bool) -> Self {
        self.trim_text = trim_text;
        self
    }

    pub fn is_recover(&self) -> bool {
        self.recover
    }

    pub fn is_keep_blanks(&self) -> bool {
        self.keep_blanks
    }

    pub fn is_trim_text(&self) -> bool {
        self.trim_text
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}
