use std::borrow::Borrow;
use std::cell::{Cell, RefCell};
use std::collections::hash_map;
use std::hash::Hash;

use elsa::{FrozenMap, FrozenVec};

use super::Value;

/// What a lookup should do with the cache.
pub(crate) enum Plan {
    /// The cached entry is current.
    Cached,
    /// Store a freshly resolved child; `true` marks an absent-key placeholder.
    Insert(Value, bool),
}

/// One cached child.
///
/// Refreshing through `&self` stacks a newer version so references handed out
/// earlier stay valid. The stack collapses to the latest version on the next
/// mutable access.
struct Entry {
    base: Box<Value>,
    newer: FrozenVec<Box<Value>>,
    placeholder: Cell<bool>,
}

impl Entry {
    fn new(value: Value, placeholder: bool) -> Self {
        Self {
            base: Box::new(value),
            newer: FrozenVec::new(),
            placeholder: Cell::new(placeholder),
        }
    }

    fn current(&self) -> &Value {
        self.newer
            .len()
            .checked_sub(1)
            .and_then(|last| self.newer.get(last))
            .unwrap_or(&*self.base)
    }

    fn refresh(&self, value: Value, placeholder: bool) -> &Value {
        self.placeholder.set(placeholder);
        self.newer.push_get(Box::new(value))
    }

    fn current_mut(&mut self) -> &mut Value {
        let newer = self.newer.as_mut();
        if let Some(latest) = newer.pop() {
            self.base = latest;
            newer.clear();
        }
        &mut self.base
    }

    fn replace(&mut self, value: Value, placeholder: bool) {
        self.newer.as_mut().clear();
        *self.base = value;
        self.placeholder.set(placeholder);
    }
}

/// Append-only through `&self`, removable through `&mut self`. `keys` keeps
/// insertion order so the table can be copied from a shared reference.
struct Table<K> {
    entries: FrozenMap<K, Box<Entry>>,
    keys: RefCell<Vec<K>>,
}

impl<K: Eq + Hash + Clone> Table<K> {
    fn new() -> Self {
        Self {
            entries: FrozenMap::new(),
            keys: RefCell::new(Vec::new()),
        }
    }

    fn lookup<Q>(&self, key: &Q) -> Option<(&Value, bool)>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let entry = self.entries.get(key)?;
        Some((entry.current(), entry.placeholder.get()))
    }

    fn resolve<Q>(&self, key: &Q, plan: Plan) -> &Value
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ToOwned<Owned = K> + ?Sized,
    {
        match (self.entries.get(key), plan) {
            (Some(entry), Plan::Cached) => entry.current(),
            (Some(entry), Plan::Insert(value, placeholder)) => entry.refresh(value, placeholder),
            (None, Plan::Cached) => self.insert(key.to_owned(), Value::null(), true),
            (None, Plan::Insert(value, placeholder)) => self.insert(key.to_owned(), value, placeholder),
        }
    }

    fn resolve_mut<Q>(&mut self, key: &Q, plan: Plan) -> &mut Value
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ToOwned<Owned = K> + ?Sized,
    {
        let keys = self.keys.get_mut();
        let entry = match self.entries.as_mut().entry(key.to_owned()) {
            hash_map::Entry::Occupied(slot) => {
                let entry = slot.into_mut();
                if let Plan::Insert(value, placeholder) = plan {
                    entry.replace(value, placeholder);
                }
                entry
            }
            hash_map::Entry::Vacant(slot) => {
                keys.push(slot.key().clone());
                let (value, placeholder) = match plan {
                    Plan::Cached => (Value::null(), true),
                    Plan::Insert(value, placeholder) => (value, placeholder),
                };
                slot.insert(Box::new(Entry::new(value, placeholder)))
            }
        };
        entry.current_mut()
    }

    fn insert(&self, key: K, value: Value, placeholder: bool) -> &Value {
        self.keys.borrow_mut().push(key.clone());
        self.entries
            .insert(key, Box::new(Entry::new(value, placeholder)))
            .current()
    }

    fn forget<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let removed = self.entries.as_mut().remove(key).is_some();
        if removed {
            self.keys
                .get_mut()
                .retain(|kept| <K as Borrow<Q>>::borrow(kept) != key);
        }
        removed
    }

    fn clear(&mut self) {
        self.entries.as_mut().clear();
        self.keys.get_mut().clear();
    }

    fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    fn duplicate(&self) -> Self {
        let copy = Table::new();
        for key in self.keys.borrow().iter() {
            if let Some(entry) = self.entries.get(key) {
                copy.insert(key.clone(), entry.current().clone(), entry.placeholder.get());
            }
        }
        copy
    }
}

/// Memo table of materialized children.
///
/// Members are keyed by name and resolve to the first member with that name.
/// Later members that repeat a name are keyed by their position. Elements
/// are keyed by index.
pub(crate) struct ChildrenCache {
    members: Table<String>,
    repeats: Table<usize>,
    elements: Table<usize>,
}

impl ChildrenCache {
    pub(crate) fn new() -> Self {
        Self {
            members: Table::new(),
            repeats: Table::new(),
            elements: Table::new(),
        }
    }

    pub(crate) fn member(&self, name: &str) -> Option<(&Value, bool)> {
        self.members.lookup(name)
    }

    pub(crate) fn repeat(&self, position: usize) -> Option<&Value> {
        self.repeats.lookup(&position).map(|(value, _)| value)
    }

    pub(crate) fn element(&self, index: usize) -> Option<(&Value, bool)> {
        self.elements.lookup(&index)
    }

    pub(crate) fn member_or_insert(&self, name: &str, plan: Plan) -> &Value {
        self.members.resolve(name, plan)
    }

    pub(crate) fn repeat_or_insert(&self, position: usize, plan: Plan) -> &Value {
        self.repeats.resolve(&position, plan)
    }

    pub(crate) fn element_or_insert(&self, index: usize, plan: Plan) -> &Value {
        self.elements.resolve(&index, plan)
    }

    pub(crate) fn member_or_insert_mut(&mut self, name: &str, plan: Plan) -> &mut Value {
        self.members.resolve_mut(name, plan)
    }

    pub(crate) fn element_or_insert_mut(&mut self, index: usize, plan: Plan) -> &mut Value {
        self.elements.resolve_mut(&index, plan)
    }

    /// Drops the entry for `name` and every positional entry, since removing
    /// members shifts positions.
    pub(crate) fn forget_member(&mut self, name: &str) -> bool {
        self.repeats.clear();
        self.members.forget(name)
    }

    /// Drops the entry for `name` only if it is still an untouched placeholder.
    pub(crate) fn forget_member_placeholder(&mut self, name: &str) -> bool {
        let stale = self
            .member(name)
            .is_some_and(|(value, placeholder)| placeholder && value.is_blank());
        stale && self.members.forget(name)
    }

    pub(crate) fn forget_element_placeholder(&mut self, index: usize) -> bool {
        let stale = self
            .element(index)
            .is_some_and(|(value, placeholder)| placeholder && value.is_blank());
        stale && self.elements.forget(&index)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of live entries.
    pub(crate) fn len(&self) -> usize {
        self.members.len() + self.repeats.len() + self.elements.len()
    }

    /// Copies every live entry into a new cache.
    pub(crate) fn duplicate(&self) -> ChildrenCache {
        ChildrenCache {
            members: self.members.duplicate(),
            repeats: self.repeats.duplicate(),
            elements: self.elements.duplicate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ChildrenCache, Plan};
    use crate::Value;

    #[rstest::rstest]
    fn test_cached_entry_keeps_address() {
        let cache = ChildrenCache::new();
        let first = cache.member_or_insert("a", Plan::Insert(Value::from(1), false)) as *const Value;
        let again = cache.member_or_insert("a", Plan::Cached) as *const Value;
        assert_eq!(first, again);
        for index in 0..64 {
            cache.element_or_insert(index, Plan::Insert(Value::from(index as u64), false));
        }
        let after_growth = cache.member("a").map(|(value, _)| value as *const Value);
        assert_eq!(after_growth, Some(first));
    }

    #[rstest::rstest]
    fn test_refresh_through_shared_ref_keeps_old_reference() {
        let cache = ChildrenCache::new();
        let old = cache.member_or_insert("k", Plan::Insert(Value::null(), true));
        let fresh = cache.member_or_insert("k", Plan::Insert(Value::from("now"), false));
        assert!(old.is_null());
        assert_eq!(fresh.get_string(), "now");
        assert_eq!(cache.member("k").map(|(_, placeholder)| placeholder), Some(false));
    }

    #[rstest::rstest]
    fn test_mutable_access_collapses_refreshes() {
        let mut cache = ChildrenCache::new();
        cache.member_or_insert("k", Plan::Insert(Value::null(), true));
        cache.member_or_insert("k", Plan::Insert(Value::from(1), false));
        cache.member_or_insert("k", Plan::Insert(Value::from(2), false));
        *cache.member_or_insert_mut("k", Plan::Cached) = Value::from(3);
        assert_eq!(cache.member("k").map(|(value, _)| value.get_int()), Some(3));
        assert_eq!(cache.len(), 1);
    }

    #[rstest::rstest]
    fn test_forget_releases_entries() {
        let mut cache = ChildrenCache::new();
        for _ in 0..1000 {
            cache.member_or_insert("k", Plan::Insert(Value::from(1), false));
            cache.repeat_or_insert(3, Plan::Insert(Value::from(2), false));
            assert!(cache.forget_member("k"));
        }
        assert!(cache.is_empty());
        assert!(cache.repeat(3).is_none());
    }

    #[rstest::rstest]
    fn test_forget_placeholder_only_when_untouched() {
        let mut cache = ChildrenCache::new();
        cache.member_or_insert("gone", Plan::Insert(Value::null(), true));
        *cache.member_or_insert_mut("set", Plan::Insert(Value::null(), true)) = Value::from(3);
        assert!(cache.forget_member_placeholder("gone"));
        assert!(!cache.forget_member_placeholder("set"));
        assert!(cache.member("set").is_some());
    }

    #[rstest::rstest]
    fn test_duplicate_is_independent() {
        let mut cache = ChildrenCache::new();
        cache.element_or_insert(0, Plan::Insert(Value::from(1), false));
        cache.repeat_or_insert(1, Plan::Insert(Value::from(5), false));
        let copy = cache.duplicate();
        *cache.element_or_insert_mut(0, Plan::Cached) = Value::from(2);
        assert_eq!(copy.element(0).map(|(value, _)| value.get_int()), Some(1));
        assert_eq!(copy.repeat(1).map(Value::get_int), Some(5));
        assert_eq!(copy.len(), 2);
    }
}
