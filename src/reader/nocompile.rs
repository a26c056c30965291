/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Element name cannot be used after the cursor moves:
/// ```compile_fail
/// use xml_reader::XmlReader;
/// let mut reader = XmlReader::new();
/// reader.load_from_data("<a><b/></a>").unwrap();
/// reader.enter("a");
/// let name = reader.current_element_name();
/// reader.enter("b");
/// println!("{:?}", name);
/// ```
///
/// Element value cannot be used after leaving:
/// ```compile_fail
/// use xml_reader::XmlReader;
/// let mut reader = XmlReader::new();
/// reader.load_from_data("<a>text</a>").unwrap();
/// reader.enter("a");
/// let value = reader.current_element_value();
/// reader.leave();
/// println!("{:?}", value);
/// ```
///
/// Attribute value cannot be used after the next attribute read:
/// ```compile_fail
/// use xml_reader::XmlReader;
/// let mut reader = XmlReader::new();
/// reader.load_from_data("<a x='1' y='2'/>").unwrap();
/// reader.enter("a");
/// reader.read_attribute_named("x");
/// let value = reader.current_attribute_value();
/// reader.read_attribute_named("y");
/// println!("{:?}", value);
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
