use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smol_str::SmolStr;

use crate::num::Number;
use crate::value::Type;

/// Index of a node inside an [`Arena`], tagged with the slot generation it
/// was allocated under. Freed slots bump their generation, so an id held past
/// a free resolves to nothing instead of to whatever reused the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(SmolStr),
    Array(Vec<NodeId>),
    Object(Vec<(SmolStr, NodeId)>),
}

impl Node {
    pub fn kind(&self) -> Type {
        match self {
            Node::Null => Type::Null,
            Node::Bool(_) => Type::Bool,
            Node::Number(_) => Type::Number,
            Node::String(_) => Type::String,
            Node::Array(_) => Type::Array,
            Node::Object(_) => Type::Object,
        }
    }

    fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let items: &[NodeId] = match self {
            Node::Array(items) => items,
            _ => &[],
        };
        let pairs: &[(SmolStr, NodeId)] = match self {
            Node::Object(pairs) => pairs,
            _ => &[],
        };
        items
            .iter()
            .copied()
            .chain(pairs.iter().map(|(_, id)| *id))
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Bulk storage for one mutable JSON tree. Nodes are only reachable through
/// [`NodeId`]s; the whole arena is released at once when its owner drops it.
#[derive(Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    vacant: Vec<u32>,
    root: Option<NodeId>,
    live: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.vacant.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Rewrites a node in place, freeing the children of the old content.
    pub fn replace(&mut self, id: NodeId, node: Node) -> bool {
        let Some(slot) = self.get_mut(id) else {
            return false;
        };
        let old = std::mem::replace(slot, node);
        let orphans: Vec<NodeId> = old.child_ids().collect();
        for orphan in orphans {
            self.free(orphan);
        }
        true
    }

    /// Releases a node and its whole subtree.
    pub fn free(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.slots.get_mut(current.index as usize) else {
                continue;
            };
            if slot.generation != current.generation {
                continue;
            }
            let Some(node) = slot.node.take() else {
                continue;
            };
            slot.generation = slot.generation.wrapping_add(1);
            self.vacant.push(current.index);
            self.live -= 1;
            stack.extend(node.child_ids());
        }
        log::trace!("arena freed subtree rooted at slot {}", id.index);
    }

    pub fn object_get(&self, id: NodeId, key: &str) -> Option<NodeId> {
        match self.get(id)? {
            Node::Object(pairs) => pairs
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, child)| *child),
            _ => None,
        }
    }

    pub fn array_get(&self, id: NodeId, index: usize) -> Option<NodeId> {
        match self.get(id)? {
            Node::Array(items) => items.get(index).copied(),
            _ => None,
        }
    }
}

/// Non-owning reference to a node of a document's arena.
#[derive(Debug, Clone)]
pub(crate) struct NodeRef {
    arena: Weak<RefCell<Arena>>,
    id: NodeId,
}

impl NodeRef {
    pub(crate) fn new(arena: Weak<RefCell<Arena>>, id: NodeId) -> Self {
        Self { arena, id }
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn child(&self, id: NodeId) -> NodeRef {
        NodeRef::new(self.arena.clone(), id)
    }

    pub(crate) fn arena(&self) -> &Weak<RefCell<Arena>> {
        &self.arena
    }

    /// Runs `f` against the live node; `None` if the arena is gone, the
    /// node was freed, or the arena is already borrowed mutably.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Arena, &Node) -> R) -> Option<R> {
        let arena = self.arena.upgrade()?;
        let arena = arena.try_borrow().ok()?;
        let node = arena.get(self.id)?;
        Some(f(&arena, node))
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Arena, NodeId) -> R) -> Option<R> {
        let arena = self.arena.upgrade()?;
        let mut arena = arena.try_borrow_mut().ok()?;
        if !arena.contains(self.id) {
            return None;
        }
        Some(f(&mut arena, self.id))
    }
}

/// Handle to the arena of one [`Document`](crate::Document). Values that are
/// attached to that document materialize new content through it.
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    arena: Weak<RefCell<Arena>>,
}

impl Allocator {
    pub(crate) fn new(arena: &Rc<RefCell<Arena>>) -> Self {
        Self {
            arena: Rc::downgrade(arena),
        }
    }

    /// Whether the owning document is still alive.
    pub fn is_alive(&self) -> bool {
        self.arena.strong_count() > 0
    }

    /// Live nodes in the arena, `0` once the document is gone.
    pub fn node_count(&self) -> usize {
        self.arena
            .upgrade()
            .and_then(|arena| arena.try_borrow().ok().map(|arena| arena.len()))
            .unwrap_or(0)
    }

    pub(crate) fn owns(&self, node: &NodeRef) -> bool {
        Weak::ptr_eq(&self.arena, node.arena())
    }
}
