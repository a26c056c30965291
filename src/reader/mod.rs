/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;
mod state;

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::AttributeId;
use crate::Document;
use crate::DocumentError;
use crate::DocumentParser;
use crate::Element;
use crate::NodeId;
use crate::ParseOptions;

pub use error::NavigationError;
pub use error::ReaderError;
pub use state::CursorState;
use state::Transition;

/// Cursor based XML reader.
///
/// The reader walks a loaded document by entering and leaving named
/// child elements. Navigation never returns errors: operations give
/// back `false`, `None`, or `-1` when something is missing, and a
/// failed [enter](XmlReader::enter) latches the reader into an error
/// state which [check_error](XmlReader::check_error) reports and
/// [leave](XmlReader::leave) clears. This allows probing for optional
/// elements with straight-line code.
///
/// # Examples
///
/// ```
/// use xml_reader::XmlReader;
///
/// let mut reader = XmlReader::new();
/// reader.load_from_data("<book><author>Jane</author><title>Sky</title></book>")?;
///
/// reader.enter("book");
/// reader.enter("author");
/// let author = reader.current_element_value().map(str::to_owned);
/// reader.leave();
/// reader.enter("title");
/// let title = reader.current_element_value().map(str::to_owned);
/// reader.leave();
/// reader.leave();
///
/// assert_eq!(author.as_deref(), Some("Jane"));
/// assert_eq!(title.as_deref(), Some("Sky"));
/// # Ok::<(), xml_reader::ReaderError>(())
/// ```
///
/// Probing for an optional element:
///
/// ```
/// use xml_reader::{NavigationError, XmlReader};
///
/// let mut reader = XmlReader::new();
/// reader.load_from_data("<node role='a'/>")?;
/// reader.enter("node");
///
/// if !reader.enter("label") {
///     assert_eq!(reader.check_error(), Some(NavigationError::UnknownElement));
///     reader.leave();
/// }
/// assert_eq!(reader.current_element_name(), Some("node"));
/// # Ok::<(), xml_reader::ReaderError>(())
/// ```
#[derive(Debug, Default)]
pub struct XmlReader {
    options: ParseOptions,
    source_name: Option<String>,
    document: Option<Document>,
    state: CursorState,
    depth: usize,
    attribute: Option<AttributeId>,
    element_value: Option<String>,
    attribute_value: Option<String>,
}

impl XmlReader {
    pub fn new() -> XmlReader {
        XmlReader::default()
    }

    /// Creates a reader which parses every loaded document with the
    /// given options.
    pub fn with_options(options: ParseOptions) -> XmlReader {
        XmlReader {
            options,
            ..XmlReader::default()
        }
    }

    //
    // Loading
    //

    /// Loads a document from XML text.
    ///
    /// Any previous document and cursor state is discarded first,
    /// including a latched error. On failure the reader is left
    /// without a document.
    pub fn load_from_data(&mut self, buffer: &str) -> Result<(), ReaderError> {
        self.source_name = None;
        let result = DocumentParser::with_options(self.options).parse_str(buffer);
        self.load_document(result)
    }

    /// Loads a document from UTF-8 encoded bytes.
    pub fn load_from_bytes(&mut self, buffer: &[u8]) -> Result<(), ReaderError> {
        self.source_name = None;
        let result = DocumentParser::with_options(self.options).parse_bytes(buffer);
        self.load_document(result)
    }

    /// Reads a file and loads its content.
    ///
    /// The file name is remembered for the error messages of this
    /// and later failed parses, until a buffer is loaded.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), ReaderError> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(source) => {
                self.reset();
                return Err(ReaderError::Io { name, source });
            }
        };
        self.source_name = Some(name);
        let result = DocumentParser::with_options(self.options).parse_bytes(&bytes);
        self.load_document(result)
    }

    fn load_document(&mut self, result: Result<Document, DocumentError>) -> Result<(), ReaderError> {
        self.reset();
        let document = result.map_err(|err| match &self.source_name {
            Some(name) => ReaderError::InvalidFile {
                name: name.clone(),
                source: err,
            },
            None => ReaderError::InvalidBuffer(err),
        })?;

        debug!(
            source = self.source_name.as_deref().unwrap_or("<buffer>"),
            root = document.root().name(),
            nodes = document.arena_stats().nr_nodes,
            "document loaded"
        );
        self.document = Some(document);
        self.state = CursorState::Positioned {
            current: NodeId::DOCUMENT,
            parent: None,
        };
        Ok(())
    }

    fn reset(&mut self) {
        self.apply(Transition::Load);
        self.document = None;
        self.state = CursorState::Empty;
        self.depth = 0;
    }

    /// Releases the cached values a transition invalidates.
    fn apply(&mut self, transition: Transition) {
        let release = transition.release();
        if release.element_value {
            self.element_value = None;
        }
        if release.attribute {
            self.attribute = None;
        }
        if release.attribute_value {
            self.attribute_value = None;
        }
    }

    //
    // Navigation
    //

    /// Moves the cursor into the first child element named `name`.
    ///
    /// Before the first successful enter the only candidate is the
    /// root element. Afterwards the direct children of the current
    /// element are scanned in document order, and the first element
    /// with exactly that name is taken.
    ///
    /// When nothing matches, the reader latches into the error state
    /// and every further enter fails until [leave](XmlReader::leave)
    /// is called.
    pub fn enter(&mut self, name: &str) -> bool {
        let current = match self.state {
            CursorState::Positioned { current, .. } => current,
            CursorState::Error { .. } => {
                debug!(name, "enter ignored while in error state");
                return false;
            }
            CursorState::Empty => {
                warn!(name, "no document loaded");
                return false;
            }
        };
        let Some(document) = &self.document else {
            return false;
        };

        match document.find_child(current, name) {
            Some(node) => {
                let value = document
                    .element(node)
                    .and_then(|element| element.text())
                    .map(str::to_owned);
                self.apply(Transition::Enter);
                self.element_value = value;
                self.state = CursorState::Positioned {
                    current: node,
                    parent: Some(current),
                };
                self.depth += 1;
                trace!(name, depth = self.depth, "entered element");
                true
            }
            None => {
                self.apply(Transition::EnterFailed);
                self.state = CursorState::Error {
                    kind: NavigationError::UnknownElement,
                    parent: current,
                };
                trace!(name, depth = self.depth, "element not found");
                false
            }
        }
    }

    /// Moves the cursor back to the parent of the current element.
    ///
    /// In the error state this is the recovery step instead: the latch
    /// is cleared and the cursor returns to where the failed enter was
    /// attempted, without changing the depth. The element value cached
    /// there is available again.
    pub fn leave(&mut self) {
        let Some(document) = &self.document else {
            warn!("no cursor set");
            return;
        };
        match self.state {
            CursorState::Error { parent, .. } => {
                let grandparent = document.parent_of(parent);
                self.apply(Transition::Recover);
                self.state = CursorState::Positioned {
                    current: parent,
                    parent: grandparent,
                };
                trace!(depth = self.depth, "recovered from error state");
            }
            CursorState::Positioned { current, .. } if current == NodeId::DOCUMENT => {
                warn!("no cursor set");
            }
            CursorState::Positioned { parent, .. } => {
                // Never dangle, unwinding past the root lands on the document
                let current = parent.unwrap_or(NodeId::DOCUMENT);
                let parent = document.parent_of(current);
                self.apply(Transition::Leave);
                self.state = CursorState::Positioned { current, parent };
                self.depth = self.depth.saturating_sub(1);
                trace!(depth = self.depth, "left element");
            }
            CursorState::Empty => {
                warn!("no cursor set");
            }
        }
    }

    //
    // State queries
    //

    /// Reports the latched navigation error, `None` when not latched.
    pub fn check_error(&self) -> Option<NavigationError> {
        match self.state {
            CursorState::Error { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn in_error_state(&self) -> bool {
        self.state.is_error()
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Name of the last loaded file, `None` for buffer loads.
    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    fn current_element(&self) -> Option<Element<'_>> {
        self.document.as_ref()?.element(self.state.current_element()?)
    }

    /// Current element for the attribute operations, warning about
    /// calls made outside of any element.
    fn attribute_element(&self) -> Option<Element<'_>> {
        if self.state.is_error() {
            return None;
        }
        let element = self.current_element();
        if element.is_none() {
            warn!("no cursor set");
        }
        element
    }

    //
    // Element accessors
    //

    /// Name of the current element.
    pub fn current_element_name(&self) -> Option<&str> {
        self.current_element().map(|element| element.name())
    }

    /// Leading text of the current element, as captured when it was
    /// entered.
    pub fn current_element_value(&self) -> Option<&str> {
        if self.state.is_error() {
            return None;
        }
        self.element_value.as_deref()
    }

    //
    // Attributes
    //

    pub fn has_attributes(&self) -> bool {
        self.attribute_element()
            .is_some_and(|element| element.attributes().next().is_some())
    }

    /// Number of attributes of the current element, -1 if there is no
    /// current element.
    pub fn count_attributes(&self) -> i32 {
        if self.state.is_error() {
            return -1;
        }
        match self.current_element() {
            Some(element) => i32::try_from(element.attributes().count()).unwrap_or(i32::MAX),
            None => -1,
        }
    }

    /// Moves the attribute cursor to the attribute at `index`.
    ///
    /// A missing attribute is a plain failure, it never latches the
    /// error state.
    pub fn read_attribute_at(&mut self, index: usize) -> bool {
        let found = self
            .attribute_element()
            .and_then(|element| element.attribute_at(index))
            .map(|attr| (attr.id(), attr.value().to_owned()));
        self.set_attribute(found)
    }

    /// Moves the attribute cursor to the attribute named `name`.
    ///
    /// On failure the previously read attribute stays current.
    pub fn read_attribute_named(&mut self, name: &str) -> bool {
        let found = self
            .attribute_element()
            .and_then(|element| element.attribute(name))
            .map(|attr| (attr.id(), attr.value().to_owned()));
        self.set_attribute(found)
    }

    fn set_attribute(&mut self, found: Option<(AttributeId, String)>) -> bool {
        match found {
            Some((id, value)) => {
                self.apply(Transition::ReadAttribute);
                self.attribute = Some(id);
                self.attribute_value = Some(value);
                true
            }
            None => false,
        }
    }

    pub fn current_attribute_name(&self) -> Option<&str> {
        let document = self.document.as_ref()?;
        Some(document.attribute_view(self.attribute?).name())
    }

    /// Value of the last successfully read attribute.
    ///
    /// A failed enter and the recovering leave keep it, only a
    /// successful enter or leave releases it.
    pub fn current_attribute_value(&self) -> Option<&str> {
        self.attribute_value.as_deref()
    }
}

#[cfg(test)]
mod tests;

mod nocompile;
