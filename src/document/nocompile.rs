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
/// Returned Element cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xml_reader::Document;
/// use xml_reader::Element;
/// let e: Element;
/// {
///     let doc = Document::from_str("<a><b/></a>")?;
///     e = doc.root();
/// }
/// println!("{:?}", e);
/// # Ok(())
/// # }
/// ```
///
/// Attribute values cannot outlive the Document:
/// ```compile_fail
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use std::str::FromStr;
/// use xml_reader::Document;
/// let value: &str;
/// {
///     let doc = Document::from_str("<a x='1'/>")?;
///     value = doc.root().attribute("x").unwrap().value();
/// }
/// println!("{}", value);
/// # Ok(())
/// # }
/// ```
///
#[cfg(doctest)]
struct MustNotCompileTests;
