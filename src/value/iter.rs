use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::ptr;

use super::shape::first_occurrences;
use super::{Payload, Storage, Text, Value};
use crate::arena::Node;

/// One object member as seen by [`MemberIter`]. `value` is the cached child.
/// For the first member with a name it is the same reference `parent[name]`
/// returns; later members with that name get their own entry.
#[derive(Debug, Clone)]
pub struct Member<'a> {
    pub name: Text<'a>,
    pub value: &'a Value,
}

impl Member<'_> {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Member traversal in insertion order.
///
/// The key list is captured when the iterator is created; values are looked
/// up through the parent's cache as the iterator advances. The default
/// iterator is exhausted and serves as the end sentinel.
#[derive(Debug, Default, Clone)]
pub struct MemberIter<'a> {
    parent: Option<&'a Value>,
    names: Vec<Text<'a>>,
    firsts: Vec<bool>,
    position: usize,
}

impl<'a> MemberIter<'a> {
    pub(crate) fn new(parent: &'a Value) -> Self {
        let names = parent.member_names();
        let firsts = first_occurrences(names.iter().map(Text::as_str));
        Self {
            parent: Some(parent),
            names,
            firsts,
            position: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.parent.is_some() && self.position < self.names.len()
    }
}

impl<'a> Iterator for MemberIter<'a> {
    type Item = Member<'a>;

    fn next(&mut self) -> Option<Member<'a>> {
        let parent = self.parent?;
        let position = self.position;
        let name = self.names.get(position)?.clone();
        self.position += 1;
        let value = if self.firsts.get(position).copied().unwrap_or(true) {
            parent.get(&name)
        } else {
            parent.get_repeat(position)
        };
        Some(Member { name, value })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.has_next() {
            self.names.len() - self.position
        } else {
            0
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MemberIter<'_> {}

impl FusedIterator for MemberIter<'_> {}

/// Equality only compares whether either side still has members to yield.
impl PartialEq for MemberIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.has_next() == other.has_next()
    }
}

impl Value {
    pub(crate) fn member_names(&self) -> Vec<Text<'_>> {
        match &self.storage {
            Storage::Detached(Payload::Object(pairs)) => pairs
                .iter()
                .map(|(name, _)| Text::Borrowed(name.as_str()))
                .collect(),
            Storage::Detached(_) => Vec::new(),
            Storage::Attached(node) => node
                .read(|_, current| match current {
                    Node::Object(pairs) => pairs
                        .iter()
                        .map(|(name, _)| Text::Shared(name.clone()))
                        .collect(),
                    _ => Vec::new(),
                })
                .unwrap_or_default(),
        }
    }
}

/// Random-access cursor over an array.
///
/// Dereferencing goes through `parent[index]`, so it yields the cached child
/// and out-of-range positions yield the null placeholder. The half-open range
/// `[index, end)` drives the `Iterator` impls; cursor arithmetic only moves
/// `index`.
#[derive(Debug, Clone, Copy)]
pub struct ArrayIter<'a> {
    parent: &'a Value,
    index: usize,
    end: usize,
}

impl<'a> ArrayIter<'a> {
    pub(crate) fn new(parent: &'a Value) -> Self {
        Self {
            parent,
            index: 0,
            end: parent.size(),
        }
    }

    /// A cursor positioned one past the last element.
    pub fn end_of(parent: &'a Value) -> Self {
        let end = parent.size();
        Self {
            parent,
            index: end,
            end,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &'a Value {
        self.parent.get_index(self.index)
    }

    /// The element `offset` positions away from the cursor.
    pub fn at(&self, offset: isize) -> &'a Value {
        self.parent.get_index(self.index.saturating_add_signed(offset))
    }
}

impl<'a> Iterator for ArrayIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        if self.index >= self.end {
            return None;
        }
        let value = self.parent.get_index(self.index);
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.index);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<&'a Value> {
        self.index = self.index.saturating_add(n);
        self.next()
    }
}

impl DoubleEndedIterator for ArrayIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.end <= self.index {
            return None;
        }
        self.end -= 1;
        Some(self.parent.get_index(self.end))
    }
}

impl ExactSizeIterator for ArrayIter<'_> {}

impl FusedIterator for ArrayIter<'_> {}

impl Add<isize> for ArrayIter<'_> {
    type Output = Self;

    fn add(mut self, offset: isize) -> Self {
        self += offset;
        self
    }
}

impl Sub<isize> for ArrayIter<'_> {
    type Output = Self;

    fn sub(mut self, offset: isize) -> Self {
        self -= offset;
        self
    }
}

impl AddAssign<isize> for ArrayIter<'_> {
    fn add_assign(&mut self, offset: isize) {
        self.index = self.index.saturating_add_signed(offset);
    }
}

impl SubAssign<isize> for ArrayIter<'_> {
    fn sub_assign(&mut self, offset: isize) {
        self.index = self.index.saturating_add_signed(offset.saturating_neg());
    }
}

/// Distance between two cursors.
impl<'a> Sub for ArrayIter<'a> {
    type Output = isize;

    fn sub(self, other: ArrayIter<'a>) -> isize {
        self.index as isize - other.index as isize
    }
}

impl PartialEq for ArrayIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.parent, other.parent) && self.index == other.index
    }
}

/// Cursors over different arrays are unordered.
impl PartialOrd for ArrayIter<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        ptr::eq(self.parent, other.parent).then(|| self.index.cmp(&other.index))
    }
}
