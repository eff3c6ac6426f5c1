use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;

use smol_str::SmolStr;

use super::{Payload, Storage, Value};
use crate::arena::Node;
use crate::num::Number;

/// A string read out of a value: borrowed from a detached payload or shared
/// from an arena node.
#[derive(Debug, Clone)]
pub enum Text<'a> {
    Borrowed(&'a str),
    Shared(SmolStr),
}

impl Text<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Text::Borrowed(s) => s,
            Text::Shared(s) => s.as_str(),
        }
    }
}

impl Deref for Text<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Text<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Text<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Text<'_> {}

impl PartialEq<str> for Text<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Text<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A child seen during traversal: the cached overlay entry when one exists,
/// otherwise the backing child.
pub(crate) enum Child<'a> {
    Borrowed(&'a Value),
    Owned(Value),
}

impl Deref for Child<'_> {
    type Target = Value;

    fn deref(&self) -> &Value {
        match self {
            Child::Borrowed(value) => value,
            Child::Owned(value) => value,
        }
    }
}

/// One level of a value with the overlay already applied.
///
/// Building a shape holds the arena borrow only while the node is copied out,
/// so callers are free to touch the arena again while walking the children.
pub(crate) enum Shape<'a> {
    Null,
    Bool(bool),
    Number(Number),
    String(Text<'a>),
    Array(Vec<Child<'a>>),
    Object(Vec<(Text<'a>, Child<'a>)>),
}

impl Value {
    pub(crate) fn shape(&self) -> Shape<'_> {
        match &self.storage {
            Storage::Detached(payload) => self.detached_shape(payload),
            Storage::Attached(node) => {
                let Some(copied) = node.read(|_, current| current.clone()) else {
                    return Shape::Null;
                };
                match copied {
                    Node::Null => Shape::Null,
                    Node::Bool(b) => Shape::Bool(b),
                    Node::Number(n) => Shape::Number(n),
                    Node::String(s) => Shape::String(Text::Shared(s)),
                    Node::Array(ids) => Shape::Array(
                        ids.into_iter()
                            .enumerate()
                            .map(|(index, id)| match self.peek_element(index) {
                                Some(cached) => Child::Borrowed(cached),
                                None => Child::Owned(Value::attached(node.child(id))),
                            })
                            .collect(),
                    ),
                    Node::Object(pairs) => {
                        let firsts = first_occurrences(pairs.iter().map(|(name, _)| name.as_str()));
                        Shape::Object(
                            pairs
                                .into_iter()
                                .zip(firsts)
                                .enumerate()
                                .map(|(position, ((name, id), first))| {
                                    let child = match self.peek_pair(&name, position, first) {
                                        Some(cached) => Child::Borrowed(cached),
                                        None => Child::Owned(Value::attached(node.child(id))),
                                    };
                                    (Text::Shared(name), child)
                                })
                                .collect(),
                        )
                    }
                }
            }
        }
    }

    fn detached_shape<'a>(&'a self, payload: &'a Payload) -> Shape<'a> {
        match payload {
            Payload::Null => Shape::Null,
            Payload::Bool(b) => Shape::Bool(*b),
            Payload::Int64(i) => Shape::Number(Number::Int(*i)),
            Payload::Uint64(u) => Shape::Number(Number::Uint(*u)),
            Payload::Double(d) => Shape::Number(Number::Double(*d)),
            Payload::String(s) => Shape::String(Text::Borrowed(s)),
            Payload::Array(items) => Shape::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| Child::Borrowed(self.peek_element(index).unwrap_or(item)))
                    .collect(),
            ),
            Payload::Object(pairs) => {
                let firsts = first_occurrences(pairs.iter().map(|(name, _)| name.as_str()));
                Shape::Object(
                    pairs
                        .iter()
                        .zip(firsts)
                        .enumerate()
                        .map(|(position, ((name, item), first))| {
                            let child = self.peek_pair(name, position, first).unwrap_or(item);
                            (Text::Borrowed(name.as_str()), Child::Borrowed(child))
                        })
                        .collect(),
                )
            }
        }
    }

    /// Name entries overlay the first member with that name only. Later
    /// members with the same name read their positional entry.
    fn peek_pair(&self, name: &str, position: usize, first: bool) -> Option<&Value> {
        if first {
            self.peek_member(name)
        } else {
            self.peek_repeat(position)
        }
    }
}

/// `true` for each name that did not appear earlier in the sequence.
pub(crate) fn first_occurrences<'n>(names: impl IntoIterator<Item = &'n str>) -> Vec<bool> {
    let mut seen = HashSet::new();
    names.into_iter().map(|name| seen.insert(name)).collect()
}
