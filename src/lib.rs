/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod arena;
mod document;
mod reader;

pub(crate) use arena::Arena;
pub use arena::ArenaStats;
pub use arena::AttributeId;
pub use arena::NoMemory;
pub use arena::NodeId;

pub use document::Attribute;
pub use document::Attributes;
pub use document::Child;
pub use document::ChildElements;
pub use document::Children;
pub use document::Document;
pub use document::DocumentError;
pub use document::DocumentParser;
pub use document::Element;
pub use document::ParseOptions;

pub use reader::CursorState;
pub use reader::NavigationError;
pub use reader::ReaderError;
pub use reader::XmlReader;
