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
use std::io::stdin;
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xml_reader::{ParseOptions, ReaderError, XmlReader};

/// Walks element paths in an XML document and prints their values.
///
/// Each PATH is a list of element names separated by '/', optionally
/// followed by '@name' to print an attribute instead of the element
/// value, e.g. `book/author` or `book/title@lang`.
#[derive(Debug, Parser)]
#[command(
    name = "xmlwalk",
    version,
    after_help = "Missing elements are reported on stderr and make the exit status 1."
)]
struct Args {
    /// XML file to process, standard input is read when omitted
    #[arg(short, long, value_name = "FILE.xml")]
    file: Option<PathBuf>,

    /// List the attributes of each reached element
    #[arg(short, long)]
    attributes: bool,

    /// Keep whitespace-only text as element values
    #[arg(long)]
    keep_blanks: bool,

    /// Fail on mismatched or unclosed tags instead of recovering
    #[arg(long)]
    strict: bool,

    /// Log loading and navigation details
    #[arg(short, long)]
    verbose: bool,

    /// Element paths to read
    #[arg(value_name = "PATH", required = true)]
    paths: Vec<String>,
}

#[derive(Debug, Eq, PartialEq)]
struct WalkPath<'a> {
    steps: Vec<&'a str>,
    attribute: Option<&'a str>,
}

impl<'a> WalkPath<'a> {
    fn parse(path: &'a str) -> WalkPath<'a> {
        let (elements, attribute) = match path.rsplit_once('@') {
            Some((elements, attribute)) => (elements, Some(attribute)),
            None => (path, None),
        };
        WalkPath {
            steps: elements.split('/').filter(|step| !step.is_empty()).collect(),
            attribute,
        }
    }
}

enum WalkError {
    Io(std::io::Error),
    Reader(ReaderError),
}

impl From<std::io::Error> for WalkError {
    fn from(err: std::io::Error) -> Self {
        WalkError::Io(err)
    }
}

impl From<ReaderError> for WalkError {
    fn from(err: ReaderError) -> Self {
        WalkError::Reader(err)
    }
}

/// Follows one path from the document level, prints what it reaches,
/// and unwinds back. Returns false if any step was missing.
fn walk(
    reader: &mut XmlReader,
    path: &WalkPath,
    list_attributes: bool,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    let mut entered = 0;
    let mut found = true;
    for step in &path.steps {
        if !reader.enter(step) {
            // Clear the latch, the cursor stays on the last found element
            reader.leave();
            found = false;
            break;
        }
        entered += 1;
    }

    if found {
        match path.attribute {
            Some(name) => {
                if reader.read_attribute_named(name) {
                    writeln!(out, "{}", reader.current_attribute_value().unwrap_or(""))?;
                } else {
                    found = false;
                }
            }
            None => {
                writeln!(out, "{}", reader.current_element_value().unwrap_or(""))?;
            }
        }
        if list_attributes {
            let count = reader.count_attributes().max(0) as usize;
            for index in 0..count {
                if reader.read_attribute_at(index) {
                    writeln!(
                        out,
                        "  {}=\"{}\"",
                        reader.current_attribute_name().unwrap_or(""),
                        reader.current_attribute_value().unwrap_or("")
                    )?;
                }
            }
        }
    }

    for _ in 0..entered {
        reader.leave();
    }
    Ok(found)
}

fn process(args: &Args) -> Result<bool, WalkError> {
    let options = ParseOptions::new()
        .keep_blanks(args.keep_blanks)
        .recover(!args.strict);
    let mut reader = XmlReader::with_options(options);
    match &args.file {
        Some(file) => reader.load_from_file(file)?,
        None => reader.load_from_data(&std::io::read_to_string(stdin())?)?,
    }

    let mut out = stdout().lock();
    let mut all_found = true;
    for path in &args.paths {
        if !walk(&mut reader, &WalkPath::parse(path), args.attributes, &mut out)? {
            eprintln!("not found: {}", path);
            all_found = false;
        }
    }
    Ok(all_found)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match process(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(WalkError::Io(err)) => {
            eprintln!("IO Error: {}", err);
            ExitCode::FAILURE
        }
        Err(WalkError::Reader(err)) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
