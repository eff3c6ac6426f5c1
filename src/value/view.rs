use super::{ArrayIter, Member, MemberIter, Value};

/// Read-only view of an array value.
#[derive(Debug, Clone, Copy)]
pub struct ArrayView<'a> {
    value: &'a Value,
}

impl<'a> ArrayView<'a> {
    pub(crate) fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn size(&self) -> usize {
        self.value.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn get(&self, index: usize) -> &'a Value {
        self.value.get_index(index)
    }

    pub fn iter(&self) -> ArrayIter<'a> {
        self.value.iter()
    }
}

impl<'a> IntoIterator for ArrayView<'a> {
    type Item = &'a Value;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> ArrayIter<'a> {
        self.iter()
    }
}

/// Read-only view of an object value.
#[derive(Debug, Clone, Copy)]
pub struct ObjectView<'a> {
    value: &'a Value,
}

impl<'a> ObjectView<'a> {
    pub(crate) fn new(value: &'a Value) -> Self {
        Self { value }
    }

    pub fn member_count(&self) -> usize {
        self.value.member_count()
    }

    pub fn is_empty(&self) -> bool {
        self.member_count() == 0
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.value.has_member(name)
    }

    pub fn get(&self, name: &str) -> &'a Value {
        self.value.get(name)
    }

    pub fn members(&self) -> MemberIter<'a> {
        self.value.members()
    }
}

impl<'a> IntoIterator for ObjectView<'a> {
    type Item = Member<'a>;
    type IntoIter = MemberIter<'a>;

    fn into_iter(self) -> MemberIter<'a> {
        self.members()
    }
}

impl<'a> IntoIterator for &'a Value {
    type Item = &'a Value;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> ArrayIter<'a> {
        self.iter()
    }
}
