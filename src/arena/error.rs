/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::TryReserveError;

use thiserror::Error;

/// Error type for memory allocation failures.
///
/// Arena methods return this error when growing one of the node,
/// attribute, or string buffers fails. Best action is to abort the
/// current load and release the partially built document.
///
/// Details about the failed allocation are not included since the
/// allocation size is always in relation to the size of the input
/// given to the parser.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("not enough memory")]
pub struct NoMemory;

impl From<TryReserveError> for NoMemory {
    fn from(_: TryReserveError) -> Self {
        NoMemory
    }
}
