/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::str::Utf8Error;

use thiserror::Error;

use crate::NoMemory;

/// Reasons a document could not be built from its source bytes.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DocumentError {
    #[error("not enough memory")]
    NoMemory,

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    /// Syntax problem reported by the XML parser or found while
    /// building the tree. Position is the byte offset in the input.
    #[error("invalid XML syntax at byte {position}: {message}")]
    Syntax { message: String, position: u64 },

    #[error("end tag `{found}` does not match the start tag `{expected}`")]
    TagMismatch { expected: String, found: String },

    #[error("document has no root element")]
    NoRoot,

    #[error("document has more than one root element")]
    MultipleRoots,
}

impl From<NoMemory> for DocumentError {
    fn from(_: NoMemory) -> Self {
        DocumentError::NoMemory
    }
}

impl DocumentError {
    pub(super) fn syntax(message: impl Into<String>, position: u64) -> Self {
        DocumentError::Syntax {
            message: message.into(),
            position,
        }
    }
}

pub(super) mod description {
    pub(in super::super) const CDATA_OUTSIDE_ROOT: &str =
        "character data not allowed outside of the root element";
    pub(in super::super) const CLOSE_WITHOUT_OPEN: &str = "end tag without a start tag";
    pub(in super::super) const DUPLICATE_ATTRIBUTE: &str =
        "attribute name already used in this tag";
    pub(in super::super) const OPEN_TAGS: &str = "document has unclosed tags";
}
