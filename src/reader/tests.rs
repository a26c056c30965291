/*
** This file is a part of xml-reader (cursor based XML reader)
** Copyright (C) 2025 The xml-reader Authors
**
** xml-reader is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::io::Write;

use rstest::rstest;

use super::*;

const BOOK: &str = "<book><author>Jane</author><title>Sky</title></book>";

const LIBRARY: &str = concat!(
    "<library name='city' open='yes'>",
    "<shelf id='1'><book lang='en'>First<note/></book><book lang='fr'>Second</book></shelf>",
    "<shelf id='2'><box><book>Third</book></box></shelf>",
    "<empty/>",
    "</library>",
);

fn loaded(xml: &str) -> XmlReader {
    let mut reader = XmlReader::new();
    reader.load_from_data(xml).unwrap();
    reader
}

fn check_parent_invariant(reader: &XmlReader) {
    if let CursorState::Positioned { current, parent } = reader.state() {
        let document = reader.document().unwrap();
        assert_eq!(parent, document.parent_of(current));
    }
}

#[test]
fn book_walk() {
    let mut reader = loaded(BOOK);
    assert_eq!(reader.depth(), 0);
    assert_eq!(reader.current_element_name(), None);

    assert!(reader.enter("book"));
    assert_eq!(reader.current_element_name(), Some("book"));
    assert_eq!(reader.depth(), 1);

    assert!(reader.enter("author"));
    assert_eq!(reader.current_element_name(), Some("author"));
    assert_eq!(reader.current_element_value(), Some("Jane"));
    assert_eq!(reader.depth(), 2);
    check_parent_invariant(&reader);

    reader.leave();
    assert_eq!(reader.current_element_name(), Some("book"));
    assert_eq!(reader.current_element_value(), None);
    assert_eq!(reader.depth(), 1);

    assert!(reader.enter("title"));
    assert_eq!(reader.current_element_value(), Some("Sky"));
    reader.leave();
    reader.leave();
    assert_eq!(reader.depth(), 0);
    assert_eq!(reader.current_element_name(), None);
    assert_eq!(
        reader.state(),
        CursorState::Positioned {
            current: NodeId::DOCUMENT,
            parent: None
        }
    );

    // The walk can start over
    assert!(reader.enter("book"));
    assert!(reader.enter("title"));
    assert_eq!(reader.current_element_value(), Some("Sky"));
}

#[test]
fn missing_element_latches() {
    let mut reader = loaded(BOOK);
    assert!(reader.enter("book"));
    assert_eq!(reader.check_error(), None);

    assert!(!reader.enter("missing"));
    assert_eq!(reader.check_error(), Some(NavigationError::UnknownElement));
    assert!(reader.in_error_state());
    assert_eq!(reader.current_element_name(), None);
    assert_eq!(reader.current_element_value(), None);
    assert_eq!(reader.depth(), 1);

    // Existing elements cannot be entered while latched
    assert!(!reader.enter("author"));
    assert_eq!(reader.check_error(), Some(NavigationError::UnknownElement));

    // Checking the error does not clear it
    assert!(reader.in_error_state());

    reader.leave();
    assert_eq!(reader.check_error(), None);
    assert_eq!(reader.current_element_name(), Some("book"));
    assert_eq!(reader.depth(), 1);
    check_parent_invariant(&reader);

    assert!(reader.enter("author"));
    assert_eq!(reader.current_element_value(), Some("Jane"));
}

#[test]
fn missing_root_latches() {
    let mut reader = loaded(BOOK);
    assert!(!reader.enter("magazine"));
    assert_eq!(
        reader.state(),
        CursorState::Error {
            kind: NavigationError::UnknownElement,
            parent: NodeId::DOCUMENT
        }
    );

    reader.leave();
    assert_eq!(reader.check_error(), None);
    assert_eq!(reader.current_element_name(), None);
    assert_eq!(reader.depth(), 0);
    assert!(reader.enter("book"));
}

#[test]
fn missing_element_anywhere() {
    let mut reader = loaded(BOOK);
    assert!(reader.enter("book"));
    assert!(reader.enter("author"));
    assert!(!reader.enter("missing"));
    assert_eq!(reader.check_error(), Some(NavigationError::UnknownElement));
    reader.leave();
    assert_eq!(reader.current_element_name(), Some("author"));
    assert_eq!(reader.depth(), 2);
}

#[test]
fn root_is_only_candidate_at_start() {
    let mut reader = loaded(BOOK);
    // Children of the root are not reachable before entering the root
    assert!(!reader.enter("author"));
    reader.leave();
    assert!(reader.enter("book"));
    assert!(!reader.enter("book"));
}

#[test]
fn first_match_wins() {
    let mut reader = loaded("<r><a n='1'>one</a><b/><a n='2'>two</a></r>");
    assert!(reader.enter("r"));
    for _ in 0..3 {
        assert!(reader.enter("a"));
        assert_eq!(reader.current_element_value(), Some("one"));
        assert!(reader.read_attribute_named("n"));
        assert_eq!(reader.current_attribute_value(), Some("1"));
        reader.leave();

        assert!(reader.enter("b"));
        reader.leave();
    }
}

#[test]
fn names_are_exact() {
    let mut reader = loaded("<Root><ns:item/></Root>");
    assert!(!reader.enter("root"));
    reader.leave();
    assert!(reader.enter("Root"));
    assert!(!reader.enter("item"));
    reader.leave();
    assert!(reader.enter("ns:item"));
}

#[rstest]
#[case::leading_text("<x>hello<y/></x>", Some("hello"))]
#[case::trailing_text("<x><y/>hello</x>", None)]
#[case::only_text("<x>hello</x>", Some("hello"))]
#[case::empty("<x/>", None)]
#[case::blank_before_child("<x>\n  <y/>hello</x>", None)]
#[case::references("<x>a &lt; b</x>", Some("a < b"))]
fn element_value(#[case] xml: &str, #[case] expected: Option<&str>) {
    let mut reader = loaded(xml);
    assert!(reader.enter("x"));
    assert_eq!(reader.current_element_value(), expected);
}

#[test]
fn element_value_is_not_stale() {
    let mut reader = loaded("<r><a>text</a><b><c/></b></r>");
    assert!(reader.enter("r"));
    assert!(reader.enter("a"));
    assert_eq!(reader.current_element_value(), Some("text"));
    reader.leave();
    assert!(reader.enter("b"));
    assert_eq!(reader.current_element_value(), None);
}

#[test]
fn blanks_can_be_kept() {
    let mut reader = XmlReader::with_options(ParseOptions::new().keep_blanks(true));
    reader.load_from_data("<x>\n  <y/></x>").unwrap();
    assert!(reader.enter("x"));
    assert_eq!(reader.current_element_value(), Some("\n  "));
}

#[rstest]
#[case::root(&["library"])]
#[case::shelf(&["library", "shelf"])]
#[case::book(&["library", "shelf", "book"])]
#[case::note(&["library", "shelf", "book", "note"])]
#[case::empty(&["library", "empty"])]
fn enter_leave_round_trip(#[case] path: &[&str]) {
    let mut reader = loaded(LIBRARY);
    // Start from the document level and from inside the root
    for prefix in 0..2 {
        for step in &path[..prefix.min(path.len())] {
            assert!(reader.enter(step));
        }
        let before = (reader.state(), reader.depth());

        for step in &path[prefix.min(path.len())..] {
            assert!(reader.enter(step));
            check_parent_invariant(&reader);
        }
        for _ in prefix.min(path.len())..path.len() {
            reader.leave();
            check_parent_invariant(&reader);
        }
        assert_eq!((reader.state(), reader.depth()), before);

        for _ in 0..prefix.min(path.len()) {
            reader.leave();
        }
        assert_eq!(reader.depth(), 0);
    }
}

#[test]
fn leave_without_cursor() {
    let mut reader = XmlReader::new();
    reader.leave();
    assert_eq!(reader.state(), CursorState::Empty);

    let mut reader = loaded(BOOK);
    reader.leave();
    reader.leave();
    assert_eq!(reader.depth(), 0);
    assert!(!reader.in_error_state());
    assert!(reader.enter("book"));
}

#[test]
fn without_document() {
    let mut reader = XmlReader::new();
    assert!(!reader.has_document());
    assert!(!reader.enter("book"));
    assert!(!reader.in_error_state());
    assert_eq!(reader.current_element_name(), None);
    assert_eq!(reader.current_element_value(), None);
    assert!(!reader.has_attributes());
    assert_eq!(reader.count_attributes(), -1);
    assert!(!reader.read_attribute_at(0));
    assert!(!reader.read_attribute_named("x"));
    assert_eq!(reader.current_attribute_value(), None);
    assert_eq!(reader.current_attribute_name(), None);
}

#[test]
fn attributes() {
    let mut reader = loaded(LIBRARY);
    assert!(!reader.has_attributes());
    assert_eq!(reader.count_attributes(), -1);

    assert!(reader.enter("library"));
    assert!(reader.has_attributes());
    assert_eq!(reader.count_attributes(), 2);
    assert_eq!(reader.current_attribute_value(), None);

    assert!(reader.read_attribute_at(1));
    assert_eq!(reader.current_attribute_name(), Some("open"));
    assert_eq!(reader.current_attribute_value(), Some("yes"));
    assert!(reader.read_attribute_named("name"));
    assert_eq!(reader.current_attribute_name(), Some("name"));
    assert_eq!(reader.current_attribute_value(), Some("city"));

    assert!(reader.enter("empty"));
    assert!(!reader.has_attributes());
    assert_eq!(reader.count_attributes(), 0);
    assert!(!reader.read_attribute_at(0));
    assert_eq!(reader.current_attribute_value(), None);
}

#[test]
fn positional_and_named_reads_agree() {
    let mut reader = loaded("<e a='1' b='two' c='' d='&amp;'/>");
    assert!(reader.enter("e"));
    let count = reader.count_attributes();
    assert_eq!(count, 4);

    for index in 0..count as usize {
        assert!(reader.read_attribute_at(index));
        let name = reader.current_attribute_name().unwrap().to_string();
        let value = reader.current_attribute_value().map(str::to_owned);

        assert!(reader.read_attribute_named(&name));
        assert_eq!(reader.current_attribute_name(), Some(name.as_str()));
        assert_eq!(reader.current_attribute_value().map(str::to_owned), value);
    }
    assert!(reader.read_attribute_named("d"));
    assert_eq!(reader.current_attribute_value(), Some("&"));
}

#[test]
fn failed_attribute_reads_are_local() {
    let mut reader = loaded(LIBRARY);
    assert!(reader.enter("library"));
    assert!(reader.read_attribute_named("name"));

    assert!(!reader.read_attribute_at(2));
    assert!(!reader.in_error_state());
    assert_eq!(reader.current_attribute_value(), Some("city"));

    assert!(!reader.read_attribute_named("missing"));
    assert!(!reader.in_error_state());
    assert_eq!(reader.current_attribute_name(), Some("name"));
    assert_eq!(reader.current_attribute_value(), Some("city"));

    // Navigation is not disturbed
    assert!(reader.enter("shelf"));
}

#[test]
fn attribute_cache_follows_transitions() {
    let mut reader = loaded(LIBRARY);
    assert!(reader.enter("library"));
    assert!(reader.read_attribute_named("name"));

    assert!(reader.enter("shelf"));
    assert_eq!(reader.current_attribute_name(), None);
    assert_eq!(reader.current_attribute_value(), None);
    assert!(reader.read_attribute_named("id"));
    assert_eq!(reader.current_attribute_value(), Some("1"));

    reader.leave();
    assert_eq!(reader.current_attribute_name(), None);
    assert_eq!(reader.current_attribute_value(), None);

    assert!(reader.read_attribute_named("open"));
    assert!(!reader.enter("missing"));
    assert_eq!(reader.current_attribute_name(), None);
    assert_eq!(reader.current_attribute_value(), Some("yes"));
}

#[test]
fn recovery_keeps_cached_values() {
    let mut reader = loaded("<node role='a'>hello<child/></node>");
    assert!(reader.enter("node"));
    assert!(reader.read_attribute_named("role"));

    assert!(!reader.enter("label"));
    assert_eq!(reader.current_element_value(), None);
    assert_eq!(reader.current_attribute_name(), None);
    assert_eq!(reader.current_attribute_value(), Some("a"));

    reader.leave();
    assert_eq!(reader.current_element_name(), Some("node"));
    assert_eq!(reader.current_element_value(), Some("hello"));
    assert_eq!(reader.current_attribute_name(), None);
    assert_eq!(reader.current_attribute_value(), Some("a"));

    // Probing twice in a row changes nothing either
    assert!(!reader.enter("label"));
    reader.leave();
    assert_eq!(reader.current_element_value(), Some("hello"));

    assert!(reader.read_attribute_at(0));
    assert_eq!(reader.current_attribute_name(), Some("role"));

    assert!(reader.enter("child"));
    assert_eq!(reader.current_element_value(), None);
    assert_eq!(reader.current_attribute_value(), None);
}

#[test]
fn attributes_while_latched() {
    let mut reader = loaded(LIBRARY);
    assert!(reader.enter("library"));
    assert!(!reader.enter("missing"));

    assert!(!reader.has_attributes());
    assert_eq!(reader.count_attributes(), -1);
    assert!(!reader.read_attribute_at(0));
    assert!(!reader.read_attribute_named("name"));

    reader.leave();
    assert_eq!(reader.count_attributes(), 2);
    assert!(reader.read_attribute_named("name"));
}

#[test]
fn reload_discards_state() {
    let mut reader = loaded(BOOK);
    assert!(reader.enter("book"));
    assert!(!reader.enter("missing"));

    reader.load_from_data(LIBRARY).unwrap();
    assert!(!reader.in_error_state());
    assert_eq!(reader.depth(), 0);
    assert_eq!(reader.current_element_value(), None);
    assert!(reader.enter("library"));
    assert_eq!(reader.current_element_name(), Some("library"));
}

#[test]
fn bad_buffer() {
    let mut reader = loaded(BOOK);
    assert!(reader.enter("book"));

    let err = reader.load_from_data("<a><b></a>").err();
    assert!(err.is_none(), "recover mode accepts mismatched tags");

    let err = reader.load_from_data("").unwrap_err();
    assert!(matches!(err, ReaderError::InvalidBuffer(DocumentError::NoRoot)));
    assert!(err.to_string().starts_with("unable to parse XML buffer"));
    assert!(!reader.has_document());
    assert_eq!(reader.state(), CursorState::Empty);
    assert_eq!(reader.depth(), 0);
    assert!(!reader.enter("book"));
}

#[test]
fn bad_bytes() {
    let mut reader = XmlReader::new();
    let err = reader.load_from_bytes(b"<a>\xfe</a>").unwrap_err();
    assert!(matches!(err.document_error(), Some(DocumentError::Utf8(_))));

    reader.load_from_bytes(BOOK.as_bytes()).unwrap();
    assert!(reader.enter("book"));
}

#[test]
fn strict_options() {
    let mut reader = XmlReader::with_options(ParseOptions::new().recover(false));
    let err = reader.load_from_data("<a><b></a>").unwrap_err();
    assert!(matches!(
        err,
        ReaderError::InvalidBuffer(DocumentError::TagMismatch { .. })
    ));
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BOOK.as_bytes()).unwrap();

    let mut reader = XmlReader::new();
    reader.load_from_file(file.path()).unwrap();
    assert_eq!(reader.source_name(), Some(file.path().display().to_string().as_str()));
    assert!(reader.enter("book"));
    assert!(reader.enter("title"));
    assert_eq!(reader.current_element_value(), Some("Sky"));

    reader.load_from_data(BOOK).unwrap();
    assert_eq!(reader.source_name(), None);
}

#[test]
fn unparsable_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"just text").unwrap();
    let name = file.path().display().to_string();

    let mut reader = XmlReader::new();
    let err = reader.load_from_file(file.path()).unwrap_err();
    match &err {
        ReaderError::InvalidFile { name: failed, .. } => assert_eq!(failed, &name),
        err => panic!("unexpected error {:?}", err),
    }
    assert!(
        err.to_string()
            .starts_with(&format!("unable to parse file `{}`", name))
    );
    assert!(!reader.has_document());
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.xml");

    let mut reader = loaded(BOOK);
    let err = reader.load_from_file(&path).unwrap_err();
    assert!(matches!(err, ReaderError::Io { .. }));
    assert!(err.document_error().is_none());
    assert!(!reader.has_document());
}
