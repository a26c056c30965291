/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape;
use quick_xml::escape::EscapeError;
use quick_xml::events::BytesStart;
use quick_xml::events::Event;

use super::Document;
use super::ParseOptions;
use super::builder::DocumentBuilder;
use super::builder::TreeEvent;
use super::error::DocumentError;

/// Builds a [Document] from XML text.
///
/// Tokenizing is done by `quick-xml`; this struct feeds the tokens to
/// the tree builder and applies the [ParseOptions].
///
/// ```
/// use xml_reader::{DocumentParser, ParseOptions};
///
/// let parser = DocumentParser::with_options(ParseOptions::new().keep_blanks(true));
/// let doc = parser.parse_str("<a> <b/></a>").unwrap();
/// assert_eq!(doc.root().text(), Some(" "));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DocumentParser {
    options: ParseOptions,
}

impl DocumentParser {
    pub fn new() -> DocumentParser {
        DocumentParser {
            options: ParseOptions::new(),
        }
    }

    pub fn with_options(options: ParseOptions) -> DocumentParser {
        DocumentParser { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Document, DocumentError> {
        self.parse_str(std::str::from_utf8(bytes)?)
    }

    pub fn parse_str(&self, text: &str) -> Result<Document, DocumentError> {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        // Tag balance is checked by the builder so that it can recover
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.expand_empty_elements = false;
        config.trim_text(false);

        let mut builder = DocumentBuilder::new(self.options)?;
        loop {
            let position = reader.buffer_position();
            let event = reader.read_event().map_err(|err| {
                DocumentError::syntax(err.to_string(), reader.error_position())
            })?;
            match event {
                Event::Start(tag) => {
                    start_tag(&mut builder, &self.options, &tag, position)?;
                }
                Event::Empty(tag) => {
                    start_tag(&mut builder, &self.options, &tag, position)?;
                    builder.append(TreeEvent::EmptyElementTag, position)?;
                }
                Event::End(tag) => {
                    let name = std::str::from_utf8(tag.name().into_inner())?;
                    builder.append(TreeEvent::EndTag(name), position)?;
                }
                Event::Text(text) => {
                    let text = unescape(std::str::from_utf8(&text)?, &self.options, position)?;
                    builder.append(TreeEvent::CData(&text), position)?;
                }
                Event::CData(cdata) => {
                    let text = std::str::from_utf8(cdata.as_ref())?;
                    builder.append(TreeEvent::CData(text), position)?;
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        builder.finish(reader.buffer_position())
    }
}

fn start_tag(
    builder: &mut DocumentBuilder,
    options: &ParseOptions,
    tag: &BytesStart,
    position: u64,
) -> Result<(), DocumentError> {
    let name = std::str::from_utf8(tag.name().into_inner())?;
    builder.append(TreeEvent::StartTag(name), position)?;
    // Duplicates are handled by the builder according to the options
    for attr in tag.attributes().with_checks(false) {
        let attr = attr.map_err(|err| DocumentError::syntax(err.to_string(), position))?;
        let name = std::str::from_utf8(attr.key.into_inner())?;
        let value = unescape(std::str::from_utf8(&attr.value)?, options, position)?;
        builder.append(TreeEvent::Attribute(name, &value), position)?;
    }
    Ok(())
}

/// Resolves character and predefined entity references. In recover
/// mode undeclared entity references are kept as written.
fn unescape<'t>(
    raw: &'t str,
    options: &ParseOptions,
    position: u64,
) -> Result<Cow<'t, str>, DocumentError> {
    let result = if options.is_recover() {
        unescape_lenient(raw)
    } else {
        escape::unescape(raw)
    };
    result.map_err(|err| DocumentError::syntax(err.to_string(), position))
}

fn unescape_lenient(raw: &str) -> Result<Cow<'_, str>, EscapeError> {
    let mut rest = raw;
    let mut result = String::new();
    loop {
        match escape::unescape(rest) {
            Ok(text) if rest.len() == raw.len() => return Ok(text),
            Ok(text) => {
                result.push_str(&text);
                return Ok(Cow::Owned(result));
            }
            Err(EscapeError::UnrecognizedEntity(name, _)) => {
                // name is the range between '&' and ';'
                let reference = name.start - 1..name.end + 1;
                result.push_str(&escape::unescape(&rest[..reference.start])?);
                result.push_str(&rest[reference.clone()]);
                rest = &rest[reference.end..];
            }
            Err(err) => return Err(err),
        }
    }
}
