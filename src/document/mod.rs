/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod builder;
mod error;
mod iterators;
mod options;
mod parser;

use std::fmt::Debug;
use std::str::FromStr;

use crate::Arena;
use crate::ArenaStats;
use crate::AttributeId;
use crate::NodeId;
use crate::arena::NodePayload;

pub use error::DocumentError;
pub use iterators::Attributes;
pub use iterators::ChildElements;
pub use iterators::Children;
pub use options::ParseOptions;
pub use parser::DocumentParser;

/// A parsed XML document.
///
/// The whole tree lives in a single arena. Nodes are addressed by
/// [NodeId] handles, and the [Element] and [Attribute] views borrow
/// the document so they cannot outlive it. The tree is immutable once
/// built.
pub struct Document {
    arena: Arena,
    root: NodeId,
}

impl Document {
    /// Parses UTF-8 bytes with the default [ParseOptions].
    pub fn from_bytes(bytes: &[u8]) -> Result<Document, DocumentError> {
        DocumentParser::new().parse_bytes(bytes)
    }

    pub fn root(&self) -> Element<'_> {
        Element {
            document: self,
            id: self.root,
        }
    }

    /// Returns the element view for a handle, `None` if the handle
    /// is not an element of this document.
    pub fn element(&self, id: NodeId) -> Option<Element<'_>> {
        match self.arena.get_node(id)?.payload {
            NodePayload::Element { .. } => Some(Element { document: self, id }),
            _ => None,
        }
    }

    /// Structural parent of a node. The root element's parent is
    /// [NodeId::DOCUMENT], which itself has no parent.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get_node(id)?.parent
    }

    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }

    /// First child element of the node with the given name, in
    /// document order. The document node has the root element as its
    /// only child.
    pub(crate) fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let mut child = self.arena.get_node(id)?.first_child;
        while let Some(node) = child {
            if let NodePayload::Element { name: tag, .. } = self.arena.node(node).payload
                && self.arena.str(tag) == name
            {
                return Some(node);
            }
            child = self.arena.node(node).next;
        }
        None
    }

    fn attribute_range(&self, id: NodeId) -> (usize, usize) {
        match self.arena.node(id).payload {
            NodePayload::Element {
                attributes_start,
                attributes_end,
                ..
            } => (attributes_start, attributes_end),
            _ => (0, 0),
        }
    }

    pub(crate) fn attribute_view(&self, id: AttributeId) -> Attribute<'_> {
        Attribute { document: self, id }
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentParser::new().parse_str(s)
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root().name())
            .field("stats", &self.arena_stats())
            .finish()
    }
}

/// Read-only view of an element node.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    document: &'a Document,
    id: NodeId,
}

/// A child node: either an element or a text run.
#[derive(Clone, Copy, Debug)]
pub enum Child<'a> {
    Element(Element<'a>),
    Text(&'a str),
}

impl<'a> Element<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        match self.document.arena.node(self.id).payload {
            NodePayload::Element { name, .. } => self.document.arena.str(name),
            _ => "",
        }
    }

    /// Parent element, `None` for the root element.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.document.element(self.document.parent_of(self.id)?)
    }

    pub fn first_child(&self) -> Option<Child<'a>> {
        self.children().next()
    }

    pub fn children(&self) -> Children<'a> {
        Children::new(self.document, self.document.arena.node(self.id).first_child)
    }

    pub fn child_elements(&self) -> ChildElements<'a> {
        ChildElements::new(self.children())
    }

    pub fn find_child(&self, name: &str) -> Option<Element<'a>> {
        self.document
            .find_child(self.id, name)
            .map(|id| Element {
                document: self.document,
                id,
            })
    }

    /// Text of the leading text child.
    ///
    /// Only a text node which is the very first child counts, text
    /// after a child element is not part of the value.
    pub fn text(&self) -> Option<&'a str> {
        match self.first_child()? {
            Child::Text(text) => Some(text),
            Child::Element(_) => None,
        }
    }

    pub fn attributes(&self) -> Attributes<'a> {
        let (start, end) = self.document.attribute_range(self.id);
        Attributes::new(self.document, start, end)
    }

    pub fn nr_attributes(&self) -> usize {
        let (start, end) = self.document.attribute_range(self.id);
        end - start
    }

    pub fn attribute_at(&self, index: usize) -> Option<Attribute<'a>> {
        self.attributes().nth(index)
    }

    pub fn attribute(&self, name: &str) -> Option<Attribute<'a>> {
        self.attributes().find(|attr| attr.name() == name)
    }
}

impl Debug for Element<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element ({:?} {})", self.id, self.name())
    }
}

impl PartialEq for Element<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.id == other.id
    }
}

/// Read-only view of an attribute.
#[derive(Clone, Copy)]
pub struct Attribute<'a> {
    document: &'a Document,
    id: AttributeId,
}

impl<'a> Attribute<'a> {
    pub fn id(&self) -> AttributeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        let arena = &self.document.arena;
        arena.str(arena.attribute(self.id).name)
    }

    pub fn value(&self) -> &'a str {
        let arena = &self.document.arena;
        arena.str(arena.attribute(self.id).value)
    }
}

impl Debug for Attribute<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Attribute ({}=\"{}\")", self.name(), self.value())
    }
}


mod nocompile;
