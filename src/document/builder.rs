/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::Arena;
use crate::NodeId;
use crate::arena::NodePayload;

use super::Document;
use super::ParseOptions;
use super::error::DocumentError;
use super::error::description;

/// A parsed XML construct handed to the builder.
#[derive(Debug, Eq, PartialEq)]
pub(super) enum TreeEvent<'a> {
    StartTag(&'a str),
    Attribute(&'a str, &'a str),
    EmptyElementTag,
    EndTag(&'a str),
    CData(&'a str),
}

pub(super) struct DocumentBuilder {
    options: ParseOptions,
    arena: Arena,
    stack: Vec<NodeId>,
    root: Option<NodeId>,
    // Nesting level inside an ignored second root element
    skip_depth: usize,
    text: String,
}

impl DocumentBuilder {
    pub(super) fn new(options: ParseOptions) -> Result<Self, DocumentError> {
        Ok(DocumentBuilder {
            options,
            arena: Arena::new()?,
            stack: Vec::new(),
            root: None,
            skip_depth: 0,
            text: String::new(),
        })
    }

    pub(super) fn append(&mut self, event: TreeEvent, position: u64) -> Result<(), DocumentError> {
        match event {
            TreeEvent::StartTag(name) => self.start_tag(name),
            TreeEvent::Attribute(name, value) => self.attribute(name, value, position),
            TreeEvent::EmptyElementTag => {
                if self.skip_depth > 0 {
                    self.skip_depth -= 1;
                } else {
                    self.stack.pop();
                }
                Ok(())
            }
            TreeEvent::EndTag(name) => self.end_tag(name, position),
            TreeEvent::CData(text) => self.cdata(text, position),
        }
    }

    fn start_tag(&mut self, name: &str) -> Result<(), DocumentError> {
        self.flush_text()?;
        if self.skip_depth > 0 {
            self.skip_depth += 1;
            return Ok(());
        }
        match self.stack.last() {
            Some(&parent) => {
                let node = self.arena.push_element(parent, name)?;
                self.stack.push(node);
            }
            None if self.root.is_none() => {
                let node = self.arena.push_element(NodeId::DOCUMENT, name)?;
                self.root = Some(node);
                self.stack.push(node);
            }
            None if self.options.is_recover() => {
                tracing::debug!(name, "ignoring extra root element");
                self.skip_depth = 1;
            }
            None => return Err(DocumentError::MultipleRoots),
        }
        Ok(())
    }

    fn attribute(&mut self, name: &str, value: &str, position: u64) -> Result<(), DocumentError> {
        if self.skip_depth > 0 {
            return Ok(());
        }
        let Some(&node) = self.stack.last() else {
            return Ok(());
        };
        if let NodePayload::Element {
            attributes_start,
            attributes_end,
            ..
        } = self.arena.node(node).payload
        {
            let duplicate = (attributes_start..attributes_end).any(|index| {
                let attr = self.arena.attribute(Arena::attribute_id(index));
                self.arena.str(attr.name) == name
            });
            if duplicate {
                if self.options.is_recover() {
                    tracing::debug!(name, "ignoring duplicate attribute");
                    return Ok(());
                }
                return Err(DocumentError::syntax(
                    description::DUPLICATE_ATTRIBUTE,
                    position,
                ));
            }
        }
        self.arena.push_attribute(node, name, value)?;
        Ok(())
    }

    fn end_tag(&mut self, name: &str, position: u64) -> Result<(), DocumentError> {
        self.flush_text()?;
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return Ok(());
        }
        let Some(&top) = self.stack.last() else {
            if self.options.is_recover() {
                return Ok(());
            }
            return Err(DocumentError::syntax(
                description::CLOSE_WITHOUT_OPEN,
                position,
            ));
        };
        if self.element_name(top) == name {
            self.stack.pop();
            return Ok(());
        }
        if !self.options.is_recover() {
            return Err(DocumentError::TagMismatch {
                expected: self.element_name(top).to_string(),
                found: name.to_string(),
            });
        }
        // Close everything up to the matching open element, a stray
        // end tag with no open counterpart is dropped
        if let Some(level) = self
            .stack
            .iter()
            .rposition(|&node| self.element_name(node) == name)
        {
            tracing::debug!(name, "closing unclosed elements");
            self.stack.truncate(level);
        }
        Ok(())
    }

    fn cdata(&mut self, text: &str, position: u64) -> Result<(), DocumentError> {
        if self.skip_depth > 0 {
            return Ok(());
        }
        if self.stack.is_empty() {
            if text.trim().is_empty() || self.options.is_recover() {
                return Ok(());
            }
            return Err(DocumentError::syntax(
                description::CDATA_OUTSIDE_ROOT,
                position,
            ));
        }
        self.text.push_str(text);
        Ok(())
    }

    fn flush_text(&mut self) -> Result<(), DocumentError> {
        if self.text.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.text);
        let Some(&parent) = self.stack.last() else {
            return Ok(());
        };
        let content = if self.options.is_trim_text() {
            text.trim()
        } else {
            text.as_str()
        };
        if content.is_empty() || (!self.options.is_keep_blanks() && content.trim().is_empty()) {
            return Ok(());
        }
        self.arena.push_text(parent, content)?;
        Ok(())
    }

    fn element_name(&self, node: NodeId) -> &str {
        match self.arena.node(node).payload {
            NodePayload::Element { name, .. } => self.arena.str(name),
            _ => "",
        }
    }

    pub(super) fn finish(mut self, position: u64) -> Result<Document, DocumentError> {
        self.flush_text()?;
        if !self.stack.is_empty() && !self.options.is_recover() {
            return Err(DocumentError::syntax(description::OPEN_TAGS, position));
        }
        let root = self.root.ok_or(DocumentError::NoRoot)?;
        Ok(Document {
            arena: self.arena,
            root,
        })
    }
}
