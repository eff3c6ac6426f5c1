//! Text input: the lenient pre-pass and the load into a node arena.

mod relax;

use std::borrow::Cow;
use std::fmt;
use std::io::Read;

use memchr::{memchr_iter, memrchr};
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use smol_str::SmolStr;

use crate::arena::{Arena, Node, NodeId};
use crate::error::Error;
use crate::num::Number;
use crate::options::ParseOptions;
use crate::Result;

/// Parses `input` into a fresh arena rooted at the document value. Every
/// object member is kept in text order, repeated keys included.
pub(crate) fn parse_arena(input: &str, options: &ParseOptions) -> Result<Arena> {
    let text = if options.is_strict() {
        Cow::Borrowed(input)
    } else {
        relax::relax(input, options)?
    };
    if text.trim_start().is_empty() {
        return Err(Error::document_empty());
    }
    let mut arena = Arena::new();
    let mut de = serde_json::Deserializer::from_str(&text);
    let root = NodeSeed { arena: &mut arena }
        .deserialize(&mut de)
        .and_then(|root| de.end().map(|()| root))
        .map_err(|err| settle_location(Error::from(err), &text))?;
    arena.set_root(root);
    Ok(arena)
}

pub(crate) fn read_to_string<R: Read>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .map_err(|err| Error::io(&err))?;
    Ok(buf)
}

/// `serde_json` reports the position after the last byte it consumed. When
/// that byte was a line break, point at the end of the line it closed.
fn settle_location(mut err: Error, text: &str) -> Error {
    if let Some(location) = err.location.as_mut() {
        if location.column == 0 && location.line > 1 {
            location.line -= 1;
            location.column = text.lines().nth(location.line - 1).map_or(0, str::len);
        }
    }
    err
}

/// 1-based line and column of `offset`.
fn location_at(bytes: &[u8], offset: usize) -> (usize, usize) {
    let before = &bytes[..offset.min(bytes.len())];
    let line = memchr_iter(b'\n', before).count() + 1;
    let line_start = memrchr(b'\n', before).map_or(0, |at| at + 1);
    (line, before.len() - line_start + 1)
}

/// Builds arena nodes straight from the parser's events.
struct NodeSeed<'a> {
    arena: &'a mut Arena,
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = NodeId;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> std::result::Result<NodeId, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<NodeId, E> {
        Ok(self.arena.alloc(Node::Null))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> std::result::Result<NodeId, E> {
        Ok(self.arena.alloc(Node::Bool(value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<NodeId, E> {
        Ok(self.arena.alloc(Node::Number(Number::Int(value))))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<NodeId, E> {
        Ok(self.arena.alloc(Node::Number(Number::Uint(value))))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<NodeId, E> {
        Ok(self.arena.alloc(Node::Number(Number::Double(value))))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<NodeId, E> {
        Ok(self.arena.alloc(Node::String(SmolStr::new(value))))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<NodeId, A::Error> {
        let arena = self.arena;
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(id) = seq.next_element_seed(NodeSeed { arena: &mut *arena })? {
            items.push(id);
        }
        Ok(arena.alloc(Node::Array(items)))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<NodeId, A::Error> {
        let arena = self.arena;
        let mut pairs = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            let id = map.next_value_seed(NodeSeed { arena: &mut *arena })?;
            pairs.push((SmolStr::from(key), id));
        }
        Ok(arena.alloc(Node::Object(pairs)))
    }
}
