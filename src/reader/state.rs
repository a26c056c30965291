/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::NodeId;

use super::NavigationError;

/// Position of the reader cursor.
///
/// `current` and `parent` are handles into the loaded document.
/// [NodeId::DOCUMENT] stands for the position above the root element,
/// which is where a freshly loaded reader starts and where leaving
/// the root element returns to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CursorState {
    /// No document is loaded.
    #[default]
    Empty,

    /// Cursor is inside `current`. `parent` is the structural parent
    /// of `current`, the element a leave returns to.
    Positioned {
        current: NodeId,
        parent: Option<NodeId>,
    },

    /// The last enter failed. `parent` is where the cursor was at the
    /// time, leave recovers back to it.
    Error {
        kind: NavigationError,
        parent: NodeId,
    },
}

impl CursorState {
    /// Current element, `None` when not inside any element.
    pub fn current_element(&self) -> Option<NodeId> {
        match *self {
            CursorState::Positioned { current, .. } if current != NodeId::DOCUMENT => {
                Some(current)
            }
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CursorState::Error { .. })
    }
}

/// State changes of the reader, each with the cached values it
/// releases.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Transition {
    Load,
    Enter,
    EnterFailed,
    Leave,
    Recover,
    ReadAttribute,
}

/// Which cached values a transition releases.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Release {
    pub(super) element_value: bool,
    pub(super) attribute: bool,
    pub(super) attribute_value: bool,
}

impl Transition {
    pub(super) fn release(self) -> Release {
        match self {
            Transition::Load | Transition::Enter | Transition::Leave => Release {
                element_value: true,
                attribute: true,
                attribute_value: true,
            },
            // The cached values stay for the element recovered to
            Transition::EnterFailed => Release {
                element_value: false,
                attribute: true,
                attribute_value: false,
            },
            Transition::Recover => Release {
                element_value: false,
                attribute: false,
                attribute_value: false,
            },
            Transition::ReadAttribute => Release {
                element_value: false,
                attribute: false,
                attribute_value: true,
            },
        }
    }
}
