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

pub use error::NoMemory;

const MIN_NODES: usize = 32;

const MIN_DATA_BYTES: usize = 256;

/// Handle of a node inside a [Document](crate::Document).
///
/// Handles are plain indices into the arena of the document which
/// created them. They stay valid as long as that document is alive,
/// and they are meaningless for any other document.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    /// The document node. It is not an element and is the parent of
    /// the root element.
    pub const DOCUMENT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of an attribute inside a [Document](crate::Document).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct AttributeId(usize);

impl AttributeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Memory usage counters of an arena.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ArenaStats {
    /// Number of nodes including the document node.
    pub nr_nodes: usize,
    /// Number of attributes over all elements.
    pub nr_attributes: usize,
    /// Bytes used by names, text, and attribute values.
    pub nr_string_bytes: usize,
    /// Bytes reserved by all the buffers of the arena.
    pub nr_allocated_bytes: usize,
}

/// Location of a string in the packed string buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StrSpan {
    start: usize,
    len: usize,
}

#[derive(Debug)]
pub(crate) enum NodePayload {
    Document,
    Element {
        name: StrSpan,
        attributes_start: usize,
        attributes_end: usize,
    },
    Text(StrSpan),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) previous: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) payload: NodePayload,
}

#[derive(Debug)]
pub(crate) struct AttributeData {
    pub(crate) name: StrSpan,
    pub(crate) value: StrSpan,
}

/// Index based storage of the XML structures and character data.
///
/// Nodes link to their parent, siblings, and children by [NodeId]
/// so the tree can be walked in both directions without any
/// references into the arena itself. All strings are packed into
/// a single buffer and nodes only keep their positions.
///
/// The arena is append only. Nothing is ever freed individually,
/// the whole structure is released when the arena is dropped.
#[derive(Debug)]
pub struct Arena {
    nodes: Vec<Node>,
    attributes: Vec<AttributeData>,
    data: String,
}

impl Arena {
    /// Creates a new 'Arena' holding only the document node.
    pub fn new() -> Result<Arena, NoMemory> {
        // Minimums are defaults
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(nr_nodes: usize, nr_data_bytes: usize) -> Result<Arena, NoMemory> {
        let mut nodes = Vec::new();
        nodes.try_reserve(nr_nodes.max(MIN_NODES))?;
        let mut data = String::new();
        data.try_reserve(nr_data_bytes.max(MIN_DATA_BYTES))?;

        nodes.push(Node {
            parent: None,
            next: None,
            previous: None,
            first_child: None,
            last_child: None,
            payload: NodePayload::Document,
        });

        Ok(Arena {
            nodes,
            attributes: Vec::new(),
            data,
        })
    }

    pub(crate) fn push_str(&mut self, s: &str) -> Result<StrSpan, NoMemory> {
        self.data.try_reserve(s.len())?;
        let start = self.data.len();
        self.data.push_str(s);

        Ok(StrSpan {
            start,
            len: s.len(),
        })
    }

    pub(crate) fn str(&self, span: StrSpan) -> &str {
        &self.data[span.start..span.start + span.len]
    }

    fn push_node(&mut self, parent: NodeId, payload: NodePayload) -> Result<NodeId, NoMemory> {
        self.nodes.try_reserve(1)?;
        let id = NodeId(self.nodes.len());
        let previous = self.nodes[parent.0].last_child;
        self.nodes.push(Node {
            parent: Some(parent),
            next: None,
            previous,
            first_child: None,
            last_child: None,
            payload,
        });

        match previous {
            Some(previous) => self.nodes[previous.0].next = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);

        Ok(id)
    }

    /// Appends a new element as the last child of the parent.
    pub(crate) fn push_element(&mut self, parent: NodeId, name: &str) -> Result<NodeId, NoMemory> {
        let name = self.push_str(name)?;
        let position = self.attributes.len();
        self.push_node(
            parent,
            NodePayload::Element {
                name,
                attributes_start: position,
                attributes_end: position,
            },
        )
    }

    /// Appends a new text node as the last child of the parent.
    pub(crate) fn push_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, NoMemory> {
        let text = self.push_str(text)?;
        self.push_node(parent, NodePayload::Text(text))
    }

    /// Adds an attribute to the last pushed element.
    ///
    /// Attributes of an element must be pushed before any other
    /// element is created so that they stay contiguous.
    pub(crate) fn push_attribute(
        &mut self,
        element: NodeId,
        name: &str,
        value: &str,
    ) -> Result<AttributeId, NoMemory> {
        let name = self.push_str(name)?;
        let value = self.push_str(value)?;
        self.attributes.try_reserve(1)?;
        let id = AttributeId(self.attributes.len());
        self.attributes.push(AttributeData { name, value });

        if let NodePayload::Element { attributes_end, .. } = &mut self.nodes[element.0].payload {
            debug_assert_eq!(*attributes_end, id.0);
            *attributes_end = id.0 + 1;
        }

        Ok(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub(crate) fn attribute(&self, id: AttributeId) -> &AttributeData {
        &self.attributes[id.0]
    }

    pub(crate) fn attribute_id(index: usize) -> AttributeId {
        AttributeId(index)
    }

    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            nr_nodes: self.nodes.len(),
            nr_attributes: self.attributes.len(),
            nr_string_bytes: self.data.len(),
            nr_allocated_bytes: self.nodes.capacity() * size_of::<Node>()
                + self.attributes.capacity() * size_of::<AttributeData>()
                + self.data.capacity(),
        }
    }
}
