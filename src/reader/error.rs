/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use thiserror::Error;

use crate::DocumentError;

/// Failure of a document load.
///
/// A failed load leaves the reader without a document. Read failures
/// of a named source are reported separately from parse failures.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("unable to read `{name}`: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse XML buffer: {0}")]
    InvalidBuffer(#[source] DocumentError),

    #[error("unable to parse file `{name}`: {source}")]
    InvalidFile {
        name: String,
        #[source]
        source: DocumentError,
    },
}

impl ReaderError {
    /// The underlying parse failure, `None` for read failures.
    pub fn document_error(&self) -> Option<&DocumentError> {
        match self {
            ReaderError::Io { .. } => None,
            ReaderError::InvalidBuffer(err) => Some(err),
            ReaderError::InvalidFile { source, .. } => Some(source),
        }
    }
}

/// Kind of the latched navigation failure.
///
/// Once set by a failed [enter](super::XmlReader::enter) it stays in
/// place until [leave](super::XmlReader::leave) clears it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum NavigationError {
    #[error("element not found")]
    UnknownElement,
}
