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

use super::Attribute;
use super::Child;
use super::Document;
use super::Element;

pub struct Attributes<'a> {
    document: &'a Document,
    current: usize,
    end: usize,
}

impl<'a> Attributes<'a> {
    pub(super) fn new(document: &'a Document, start: usize, end: usize) -> Self {
        Attributes {
            document,
            current: start,
            end,
        }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = Attribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.end {
            return None;
        }
        let result = self.document.attribute_view(Arena::attribute_id(self.current));
        self.current += 1;
        Some(result)
    }
}

pub struct Children<'a> {
    document: &'a Document,
    current: Option<NodeId>,
}

impl<'a> Children<'a> {
    pub(super) fn new(document: &'a Document, first: Option<NodeId>) -> Self {
        Children {
            document,
            current: first,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Child<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.document.arena.node(id);
        self.current = node.next;
        match node.payload {
            NodePayload::Text(text) => Some(Child::Text(self.document.arena.str(text))),
            _ => Some(Child::Element(Element {
                document: self.document,
                id,
            })),
        }
    }
}

pub struct ChildElements<'a> {
    children: Children<'a>,
}

impl<'a> ChildElements<'a> {
    pub(super) fn new(children: Children<'a>) -> Self {
        ChildElements { children }
    }
}

impl<'a> Iterator for ChildElements<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.children.find_map(|child| match child {
            Child::Element(element) => Some(element),
            Child::Text(_) => None,
        })
    }
}
