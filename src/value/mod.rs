//! The JSON value type.
//!
//! A [`Value`] is either attached to a node of a [`Document`](crate::Document)
//! arena or detached and owning its content. Child lookups are memoized per
//! value, so `&v["k"]` keeps its address across calls, and writes through the
//! returned references form an overlay that traversal prefers over the arena.

mod cache;
mod iter;
mod shape;
mod view;

use std::borrow::Cow;
use std::cell::OnceCell;
use std::fmt;
use std::ops::{Index, IndexMut};

use smol_str::SmolStr;

use crate::arena::{Allocator, Arena, Node, NodeId, NodeRef};
use crate::error::Error;
use crate::num::Number;
use crate::Result;

use cache::{ChildrenCache, Plan};
pub use iter::{ArrayIter, Member, MemberIter};
pub(crate) use shape::Shape;
pub use shape::Text;
pub use view::{ArrayView, ObjectView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Type::Null => "null",
            Type::Bool => "bool",
            Type::Number => "number",
            Type::String => "string",
            Type::Array => "array",
            Type::Object => "object",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) enum Payload {
    #[default]
    Null,
    Bool(bool),
    Int64(i64),
    Uint64(u64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

impl Payload {
    fn kind(&self) -> Type {
        match self {
            Payload::Null => Type::Null,
            Payload::Bool(_) => Type::Bool,
            Payload::Int64(_) | Payload::Uint64(_) | Payload::Double(_) => Type::Number,
            Payload::String(_) => Type::String,
            Payload::Array(_) => Type::Array,
            Payload::Object(_) => Type::Object,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Storage {
    Attached(NodeRef),
    Detached(Payload),
}

pub struct Value {
    pub(crate) storage: Storage,
    children: OnceCell<Box<ChildrenCache>>,
}

impl Value {
    pub fn null() -> Self {
        Self::detached(Payload::Null)
    }

    /// An empty value of the given type: `false`, `0`, `""`, `[]` or `{}`.
    pub fn new(kind: Type) -> Self {
        Self::detached(match kind {
            Type::Null => Payload::Null,
            Type::Bool => Payload::Bool(false),
            Type::Number => Payload::Int64(0),
            Type::String => Payload::String(String::new()),
            Type::Array => Payload::Array(Vec::new()),
            Type::Object => Payload::Object(Vec::new()),
        })
    }

    pub fn object() -> Self {
        Self::new(Type::Object)
    }

    pub fn array() -> Self {
        Self::new(Type::Array)
    }

    pub(crate) fn detached(payload: Payload) -> Self {
        Self {
            storage: Storage::Detached(payload),
            children: OnceCell::new(),
        }
    }

    pub(crate) fn attached(node: NodeRef) -> Self {
        Self {
            storage: Storage::Attached(node),
            children: OnceCell::new(),
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.storage, Storage::Attached(_))
    }

    pub fn get_type(&self) -> Type {
        match &self.storage {
            Storage::Detached(payload) => payload.kind(),
            Storage::Attached(node) => node.read(|_, current| current.kind()).unwrap_or(Type::Null),
        }
    }

    pub fn is_null(&self) -> bool {
        self.get_type() == Type::Null
    }

    pub fn is_bool(&self) -> bool {
        self.get_type() == Type::Bool
    }

    pub fn is_true(&self) -> bool {
        self.is_bool() && self.get_bool()
    }

    pub fn is_false(&self) -> bool {
        self.is_bool() && !self.get_bool()
    }

    pub fn is_object(&self) -> bool {
        self.get_type() == Type::Object
    }

    pub fn is_array(&self) -> bool {
        self.get_type() == Type::Array
    }

    pub fn is_number(&self) -> bool {
        self.get_type() == Type::Number
    }

    pub fn is_string(&self) -> bool {
        self.get_type() == Type::String
    }

    /// Exactly representable as `i32`.
    pub fn is_int(&self) -> bool {
        self.number().is_some_and(|n| n.is_i32())
    }

    pub fn is_uint(&self) -> bool {
        self.number().is_some_and(|n| n.is_u32())
    }

    pub fn is_int64(&self) -> bool {
        self.number().is_some_and(|n| n.is_i64())
    }

    pub fn is_uint64(&self) -> bool {
        self.number().is_some_and(|n| n.is_u64())
    }

    /// Every number reads as a double.
    pub fn is_double(&self) -> bool {
        self.is_number()
    }

    pub fn is_float(&self) -> bool {
        self.is_number()
    }

    /// The stored number, if this is a number.
    pub fn number(&self) -> Option<Number> {
        match &self.storage {
            Storage::Detached(Payload::Int64(i)) => Some(Number::Int(*i)),
            Storage::Detached(Payload::Uint64(u)) => Some(Number::Uint(*u)),
            Storage::Detached(Payload::Double(d)) => Some(Number::Double(*d)),
            Storage::Detached(_) => None,
            Storage::Attached(node) => node
                .read(|_, current| match current {
                    Node::Number(n) => Some(*n),
                    _ => None,
                })
                .flatten(),
        }
    }

    pub fn get_bool(&self) -> bool {
        match &self.storage {
            Storage::Detached(payload) => matches!(payload, Payload::Bool(true)),
            Storage::Attached(node) => node
                .read(|_, current| matches!(current, Node::Bool(true)))
                .unwrap_or(false),
        }
    }

    pub fn get_int(&self) -> i32 {
        self.number().map_or(0, |n| n.as_i32_lossy())
    }

    pub fn get_uint(&self) -> u32 {
        self.number().map_or(0, |n| n.as_u32_lossy())
    }

    pub fn get_int64(&self) -> i64 {
        self.number().map_or(0, |n| n.as_i64_lossy())
    }

    pub fn get_uint64(&self) -> u64 {
        self.number().map_or(0, |n| n.as_u64_lossy())
    }

    pub fn get_double(&self) -> f64 {
        self.number().map_or(0.0, |n| n.as_f64())
    }

    pub fn get_float(&self) -> f32 {
        self.get_double() as f32
    }

    /// The string content, or `""` for non-strings.
    pub fn get_string(&self) -> Cow<'_, str> {
        match &self.storage {
            Storage::Detached(Payload::String(s)) => Cow::Borrowed(s),
            Storage::Detached(_) => Cow::Borrowed(""),
            Storage::Attached(node) => node
                .read(|_, current| match current {
                    Node::String(s) => Some(s.to_string()),
                    _ => None,
                })
                .flatten()
                .map_or(Cow::Borrowed(""), Cow::Owned),
        }
    }

    /// Length in bytes of the string content.
    pub fn get_string_length(&self) -> usize {
        match &self.storage {
            Storage::Detached(Payload::String(s)) => s.len(),
            Storage::Detached(_) => 0,
            Storage::Attached(node) => node
                .read(|_, current| match current {
                    Node::String(s) => s.len(),
                    _ => 0,
                })
                .unwrap_or(0),
        }
    }

    pub fn set_null(&mut self) -> &mut Self {
        self.retag(Node::Null, Payload::Null)
    }

    pub fn set_bool(&mut self, b: bool) -> &mut Self {
        self.retag(Node::Bool(b), Payload::Bool(b))
    }

    pub fn set_int(&mut self, i: i32) -> &mut Self {
        self.set_int64(i64::from(i))
    }

    pub fn set_uint(&mut self, u: u32) -> &mut Self {
        self.set_uint64(u64::from(u))
    }

    pub fn set_int64(&mut self, i: i64) -> &mut Self {
        self.retag(Node::Number(Number::Int(i)), Payload::Int64(i))
    }

    pub fn set_uint64(&mut self, u: u64) -> &mut Self {
        self.retag(Node::Number(Number::Uint(u)), Payload::Uint64(u))
    }

    pub fn set_double(&mut self, d: f64) -> &mut Self {
        self.retag(Node::Number(Number::Double(d)), Payload::Double(d))
    }

    pub fn set_string(&mut self, s: &str) -> &mut Self {
        self.retag(Node::String(SmolStr::new(s)), Payload::String(s.to_owned()))
    }

    pub fn set_object(&mut self) -> &mut Self {
        self.retag(Node::Object(Vec::new()), Payload::Object(Vec::new()))
    }

    pub fn set_array(&mut self) -> &mut Self {
        self.retag(Node::Array(Vec::new()), Payload::Array(Vec::new()))
    }

    /// Attached values rewrite their node in place; detached values swap payload.
    fn retag(&mut self, node: Node, payload: Payload) -> &mut Self {
        self.children.take();
        if let Storage::Attached(handle) = &self.storage {
            if handle.write(|arena, id| arena.replace(id, node)).is_none() {
                log::debug!("ignoring retag of a dangling attached value");
            }
            return self;
        }
        self.storage = Storage::Detached(payload);
        self
    }

    /// Member `name`, or a cached null placeholder when absent.
    pub fn get(&self, name: &str) -> &Value {
        let plan = self.plan_member(name);
        self.cache().member_or_insert(name, plan)
    }

    pub fn get_mut(&mut self, name: &str) -> &mut Value {
        let plan = self.plan_member(name);
        self.cache_mut().member_or_insert_mut(name, plan)
    }

    /// Element `index`, or a cached null placeholder when out of range.
    pub fn get_index(&self, index: usize) -> &Value {
        let plan = self.plan_element(index);
        self.cache().element_or_insert(index, plan)
    }

    pub fn get_index_mut(&mut self, index: usize) -> &mut Value {
        let plan = self.plan_element(index);
        self.cache_mut().element_or_insert_mut(index, plan)
    }

    /// Whether the backing object has a member `name`. Overlay writes to
    /// absent keys do not count.
    pub fn has_member(&self, name: &str) -> bool {
        match &self.storage {
            Storage::Detached(Payload::Object(pairs)) => pairs.iter().any(|(key, _)| key == name),
            Storage::Detached(_) => false,
            Storage::Attached(node) => node
                .read(|arena, _| arena.object_get(node.id(), name).is_some())
                .unwrap_or(false),
        }
    }

    pub fn member_count(&self) -> usize {
        match &self.storage {
            Storage::Detached(Payload::Object(pairs)) => pairs.len(),
            Storage::Detached(_) => 0,
            Storage::Attached(node) => node
                .read(|_, current| match current {
                    Node::Object(pairs) => pairs.len(),
                    _ => 0,
                })
                .unwrap_or(0),
        }
    }

    /// Array length; `0` for everything else.
    pub fn size(&self) -> usize {
        match &self.storage {
            Storage::Detached(Payload::Array(items)) => items.len(),
            Storage::Detached(_) => 0,
            Storage::Attached(node) => node
                .read(|_, current| match current {
                    Node::Array(items) => items.len(),
                    _ => 0,
                })
                .unwrap_or(0),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self.get_type() {
            Type::Array => self.size() == 0,
            Type::Object => self.member_count() == 0,
            _ => false,
        }
    }

    /// Appends a member. Attached objects receive a deep copy of `value`
    /// allocated in their own arena, so `allocator` must belong to that arena.
    /// Detached objects take `value` as is and ignore `allocator`.
    pub fn add_member(
        &mut self,
        name: &str,
        value: impl Into<Value>,
        allocator: &Allocator,
    ) -> Result<()> {
        let value = value.into();
        match &mut self.storage {
            Storage::Detached(Payload::Object(pairs)) => pairs.push((name.to_owned(), value)),
            Storage::Detached(other) => return Err(Error::not_an_object(other.kind().name())),
            Storage::Attached(node) => {
                if !allocator.owns(node) {
                    return Err(Error::foreign_allocator());
                }
                let flattened = value.deep_copy();
                let key = SmolStr::new(name);
                node.write(|arena, id| {
                    let kind = arena.get(id).map_or(Type::Null, Node::kind);
                    if kind != Type::Object {
                        return Err(Error::not_an_object(kind.name()));
                    }
                    let child = materialize(arena, &flattened);
                    if let Some(Node::Object(pairs)) = arena.get_mut(id) {
                        pairs.push((key, child));
                    }
                    Ok(())
                })
                .unwrap_or_else(|| Err(Error::dangling()))?;
            }
        }
        if let Some(cache) = self.children.get_mut() {
            cache.forget_member_placeholder(name);
        }
        Ok(())
    }

    /// Appends an element; the allocator rules match [`Value::add_member`].
    pub fn push_back(&mut self, value: impl Into<Value>, allocator: &Allocator) -> Result<()> {
        let value = value.into();
        let index = match &mut self.storage {
            Storage::Detached(Payload::Array(items)) => {
                items.push(value);
                items.len() - 1
            }
            Storage::Detached(other) => return Err(Error::not_an_array(other.kind().name())),
            Storage::Attached(node) => {
                if !allocator.owns(node) {
                    return Err(Error::foreign_allocator());
                }
                let flattened = value.deep_copy();
                node.write(|arena, id| {
                    let kind = arena.get(id).map_or(Type::Null, Node::kind);
                    if kind != Type::Array {
                        return Err(Error::not_an_array(kind.name()));
                    }
                    let child = materialize(arena, &flattened);
                    match arena.get_mut(id) {
                        Some(Node::Array(items)) => {
                            items.push(child);
                            Ok(items.len() - 1)
                        }
                        _ => Err(Error::not_an_array(kind.name())),
                    }
                })
                .unwrap_or_else(|| Err(Error::dangling()))?
            }
        };
        if let Some(cache) = self.children.get_mut() {
            cache.forget_element_placeholder(index);
        }
        Ok(())
    }

    /// Removes every member named `name` and returns how many were removed.
    pub fn remove_member(&mut self, name: &str) -> usize {
        let removed = match &mut self.storage {
            Storage::Detached(Payload::Object(pairs)) => {
                let before = pairs.len();
                pairs.retain(|(key, _)| key != name);
                before - pairs.len()
            }
            Storage::Detached(_) => 0,
            Storage::Attached(node) => node
                .write(|arena, id| {
                    let Some(Node::Object(pairs)) = arena.get_mut(id) else {
                        return 0;
                    };
                    let mut doomed = Vec::new();
                    pairs.retain(|(key, child)| {
                        let keep = key != name;
                        if !keep {
                            doomed.push(*child);
                        }
                        keep
                    });
                    let count = doomed.len();
                    for child in doomed {
                        arena.free(child);
                    }
                    count
                })
                .unwrap_or(0),
        };
        if let Some(cache) = self.children.get_mut() {
            cache.forget_member(name);
        }
        if removed > 0 {
            log::debug!("removed {removed} member(s) named {name:?}");
        }
        removed
    }

    /// Recursive copy of the visible content, overlay included, into a new
    /// detached tree.
    pub fn deep_copy(&self) -> Value {
        let payload = match self.shape() {
            Shape::Null => Payload::Null,
            Shape::Bool(b) => Payload::Bool(b),
            Shape::Number(Number::Int(i)) => Payload::Int64(i),
            Shape::Number(Number::Uint(u)) => Payload::Uint64(u),
            Shape::Number(Number::Double(d)) => Payload::Double(d),
            Shape::String(s) => Payload::String(s.to_string()),
            Shape::Array(children) => {
                Payload::Array(children.iter().map(|child| child.deep_copy()).collect())
            }
            Shape::Object(members) => Payload::Object(
                members
                    .iter()
                    .map(|(name, child)| (name.to_string(), child.deep_copy()))
                    .collect(),
            ),
        };
        Value::detached(payload)
    }

    /// Replaces `self` with a detached deep copy of `rhs`.
    pub fn copy_from(&mut self, rhs: &Value) -> &mut Self {
        *self = rhs.deep_copy();
        self
    }

    pub fn members(&self) -> MemberIter<'_> {
        MemberIter::new(self)
    }

    pub fn iter(&self) -> ArrayIter<'_> {
        ArrayIter::new(self)
    }

    pub fn get_array(&self) -> ArrayView<'_> {
        ArrayView::new(self)
    }

    pub fn get_object(&self) -> ObjectView<'_> {
        ObjectView::new(self)
    }

    /// An untouched absent-key placeholder.
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self.storage, Storage::Detached(Payload::Null))
            && self.children.get().map_or(true, |cache| cache.is_empty())
    }

    pub(crate) fn peek_member(&self, name: &str) -> Option<&Value> {
        let (cached, placeholder) = self.children.get()?.member(name)?;
        (!(placeholder && cached.is_blank())).then_some(cached)
    }

    pub(crate) fn peek_element(&self, index: usize) -> Option<&Value> {
        let (cached, placeholder) = self.children.get()?.element(index)?;
        (!(placeholder && cached.is_blank())).then_some(cached)
    }

    /// The cached child for the member at `position` when that member repeats
    /// an earlier name.
    pub(crate) fn peek_repeat(&self, position: usize) -> Option<&Value> {
        self.children.get()?.repeat(position)
    }

    /// The member at `position`, for members whose name already appeared
    /// earlier in the object. Name lookups never reach these.
    pub(crate) fn get_repeat(&self, position: usize) -> &Value {
        let plan = match self.peek_repeat(position) {
            Some(_) => Plan::Cached,
            None => match self.resolve_position(position) {
                Some(child) => Plan::Insert(child, false),
                None => Plan::Insert(Value::null(), true),
            },
        };
        self.cache().repeat_or_insert(position, plan)
    }

    fn cache(&self) -> &ChildrenCache {
        self.children.get_or_init(|| Box::new(ChildrenCache::new()))
    }

    fn cache_mut(&mut self) -> &mut ChildrenCache {
        if self.children.get().is_none() {
            self.children = OnceCell::from(Box::new(ChildrenCache::new()));
        }
        match self.children.get_mut() {
            Some(cache) => &mut **cache,
            None => unreachable!("children cache initialised above"),
        }
    }

    fn resolve_member(&self, name: &str) -> Option<Value> {
        match &self.storage {
            Storage::Detached(Payload::Object(pairs)) => pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, child)| child.clone()),
            Storage::Detached(_) => None,
            Storage::Attached(node) => node
                .read(|arena, _| arena.object_get(node.id(), name))
                .flatten()
                .map(|id| Value::attached(node.child(id))),
        }
    }

    fn resolve_position(&self, position: usize) -> Option<Value> {
        match &self.storage {
            Storage::Detached(Payload::Object(pairs)) => {
                pairs.get(position).map(|(_, child)| child.clone())
            }
            Storage::Detached(_) => None,
            Storage::Attached(node) => node
                .read(|_, current| match current {
                    Node::Object(pairs) => pairs.get(position).map(|(_, id)| *id),
                    _ => None,
                })
                .flatten()
                .map(|id| Value::attached(node.child(id))),
        }
    }

    fn resolve_element(&self, index: usize) -> Option<Value> {
        match &self.storage {
            Storage::Detached(Payload::Array(items)) => items.get(index).cloned(),
            Storage::Detached(_) => None,
            Storage::Attached(node) => node
                .read(|arena, _| arena.array_get(node.id(), index))
                .flatten()
                .map(|id| Value::attached(node.child(id))),
        }
    }

    fn plan_member(&self, name: &str) -> Plan {
        match self.children.get().and_then(|cache| cache.member(name)) {
            Some((cached, true)) if cached.is_blank() => match self.resolve_member(name) {
                Some(fresh) => {
                    log::debug!("member {name:?} appeared after lookup, refreshing placeholder");
                    Plan::Insert(fresh, false)
                }
                None => Plan::Cached,
            },
            Some(_) => Plan::Cached,
            None => match self.resolve_member(name) {
                Some(child) => Plan::Insert(child, false),
                None => Plan::Insert(Value::null(), true),
            },
        }
    }

    fn plan_element(&self, index: usize) -> Plan {
        match self.children.get().and_then(|cache| cache.element(index)) {
            Some((cached, true)) if cached.is_blank() => match self.resolve_element(index) {
                Some(fresh) => {
                    log::debug!("element {index} appeared after lookup, refreshing placeholder");
                    Plan::Insert(fresh, false)
                }
                None => Plan::Cached,
            },
            Some(_) => Plan::Cached,
            None => match self.resolve_element(index) {
                Some(child) => Plan::Insert(child, false),
                None => Plan::Insert(Value::null(), true),
            },
        }
    }
}

/// Allocates a detached tree into `arena`. Attached values inside the tree
/// become null; callers flatten with [`Value::deep_copy`] first.
pub(crate) fn materialize(arena: &mut Arena, value: &Value) -> NodeId {
    let node = match &value.storage {
        Storage::Attached(_) => Node::Null,
        Storage::Detached(payload) => match payload {
            Payload::Null => Node::Null,
            Payload::Bool(b) => Node::Bool(*b),
            Payload::Int64(i) => Node::Number(Number::Int(*i)),
            Payload::Uint64(u) => Node::Number(Number::Uint(*u)),
            Payload::Double(d) => Node::Number(Number::Double(*d)),
            Payload::String(s) => Node::String(SmolStr::new(s)),
            Payload::Array(items) => {
                Node::Array(items.iter().map(|item| materialize(arena, item)).collect())
            }
            Payload::Object(pairs) => Node::Object(
                pairs
                    .iter()
                    .map(|(name, item)| (SmolStr::new(name), materialize(arena, item)))
                    .collect(),
            ),
        },
    };
    arena.alloc(node)
}

impl Default for Value {
    fn default() -> Self {
        Value::null()
    }
}

impl Clone for Value {
    /// Attached clones share the node; detached clones copy the payload.
    /// Cached children come along so overlay writes stay visible.
    fn clone(&self) -> Self {
        let copy = Value {
            storage: self.storage.clone(),
            children: OnceCell::new(),
        };
        if let Some(cache) = self.children.get() {
            let _ = copy.children.set(Box::new(cache.duplicate()));
        }
        copy
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.shape(), other.shape()) {
            (Shape::Null, Shape::Null) => true,
            (Shape::Bool(a), Shape::Bool(b)) => a == b,
            (Shape::Number(a), Shape::Number(b)) => a == b,
            (Shape::String(a), Shape::String(b)) => a == b,
            (Shape::Array(a), Shape::Array(b)) => {
                a.len() == b.len() && a.iter().zip(&b).all(|(x, y)| **x == **y)
            }
            (Shape::Object(a), Shape::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(&b)
                        .all(|((ka, va), (kb, vb))| ka == kb && **va == **vb)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.is_attached() { "Attached" } else { "Detached" };
        f.debug_tuple(mode).field(&format_args!("{self}")).finish()
    }
}

impl fmt::Display for Value {
    /// Compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::encode::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        self.get(name)
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, name: &str) -> &mut Value {
        self.get_mut(name)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index)
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.get_index_mut(index)
    }
}

impl From<Type> for Value {
    fn from(kind: Type) -> Self {
        Value::new(kind)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::detached(Payload::Bool(b))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::detached(Payload::Int64(i64::from(i)))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::detached(Payload::Int64(i))
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::detached(Payload::Uint64(u64::from(u)))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::detached(Payload::Uint64(u))
    }
}

impl From<f32> for Value {
    fn from(d: f32) -> Self {
        Value::detached(Payload::Double(f64::from(d)))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::detached(Payload::Double(d))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::detached(Payload::String(s.to_owned()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::detached(Payload::String(s))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::detached(Payload::Array(items))
    }
}

impl From<Vec<(String, Value)>> for Value {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        Value::detached(Payload::Object(pairs))
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        Value::detached(match number {
            Number::Int(i) => Payload::Int64(i),
            Number::Uint(u) => Payload::Uint64(u),
            Number::Double(d) => Payload::Double(d),
        })
    }
}
