pub mod arena;
mod decode;
pub mod document;
pub mod encode;
pub mod error;
pub mod json;
pub mod num;
pub mod options;
pub mod pointer;
pub mod value;
pub mod visit;

use std::io::{Read, Write};

pub use crate::arena::Allocator;
pub use crate::document::Document;
pub use crate::encode::Writer;
pub use crate::error::{Error, ErrorKind, Location};
pub use crate::num::Number;
pub use crate::options::{Indent, ParseOptions, WriteOptions};
pub use crate::pointer::Pointer;
pub use crate::value::{ArrayIter, ArrayView, Member, MemberIter, ObjectView, Text, Type, Value};
pub use crate::visit::Handler;

pub type Result<T> = std::result::Result<T, Error>;

/// Parses strict JSON into a new document.
///
/// # Examples
/// ```
/// let doc = arena_json::from_str(r#"{"sats": [1, 2]}"#)?;
/// assert_eq!(doc["sats"].size(), 2);
/// # Ok::<(), arena_json::Error>(())
/// ```
pub fn from_str(input: &str) -> Result<Document> {
    from_str_with_options(input, &ParseOptions::default())
}

pub fn from_str_with_options(input: &str, options: &ParseOptions) -> Result<Document> {
    let mut doc = Document::new();
    doc.parse_with(input, options);
    finish(doc)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Document> {
    from_reader_with_options(reader, &ParseOptions::default())
}

pub fn from_reader_with_options<R: Read>(reader: R, options: &ParseOptions) -> Result<Document> {
    let mut doc = Document::new();
    doc.parse_stream(reader, options);
    finish(doc)
}

fn finish(doc: Document) -> Result<Document> {
    match doc.parse_error() {
        Some(err) => Err(err.clone()),
        None => Ok(doc),
    }
}

pub fn to_string(value: &Value) -> Result<String> {
    encode::to_string(value)
}

pub fn to_string_with_options(value: &Value, options: &WriteOptions) -> Result<String> {
    encode::to_string_with_options(value, options)
}

pub fn to_writer<W: Write>(writer: W, value: &Value) -> Result<()> {
    to_writer_with_options(writer, value, &WriteOptions::default())
}

pub fn to_writer_with_options<W: Write>(
    writer: W,
    value: &Value,
    options: &WriteOptions,
) -> Result<()> {
    encode::to_writer(writer, value, options)
}
