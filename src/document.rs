use std::cell::RefCell;
use std::io::Read;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::rc::Rc;
use std::str::FromStr;

use crate::arena::{Allocator, Arena, Node, NodeRef};
use crate::decode;
use crate::error::Error;
use crate::options::ParseOptions;
use crate::value::{materialize, Value};
use crate::Result;

/// Owner of one arena and the root value attached to it.
///
/// Values reached from the root stay attached to the arena and become null
/// once the document is dropped. Parsing replaces the arena wholesale.
pub struct Document {
    arena: Rc<RefCell<Arena>>,
    root: Value,
    parse_error: Option<Error>,
}

impl Document {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.alloc(Node::Null);
        arena.set_root(root);
        Self::from_arena(arena, None)
    }

    fn from_arena(arena: Arena, parse_error: Option<Error>) -> Self {
        let root_id = arena.root();
        let arena = Rc::new(RefCell::new(arena));
        let root = match root_id {
            Some(id) => Value::attached(NodeRef::new(Rc::downgrade(&arena), id)),
            None => Value::null(),
        };
        Self {
            arena,
            root,
            parse_error,
        }
    }

    /// Parses strict JSON. Errors are recorded, see [`Document::parse_error`].
    pub fn parse(&mut self, text: &str) -> &mut Self {
        self.parse_with(text, &ParseOptions::default())
    }

    pub fn parse_with(&mut self, text: &str, options: &ParseOptions) -> &mut Self {
        let parsed = decode::parse_arena(text, options);
        self.install(parsed)
    }

    /// Reads the whole stream, then parses it like [`Document::parse_with`].
    pub fn parse_stream<R: Read>(&mut self, reader: R, options: &ParseOptions) -> &mut Self {
        let parsed = decode::read_to_string(reader).and_then(|text| decode::parse_arena(&text, options));
        self.install(parsed)
    }

    fn install(&mut self, parsed: Result<Arena>) -> &mut Self {
        *self = match parsed {
            Ok(arena) => {
                log::debug!("parsed document into {} nodes", arena.len());
                Self::from_arena(arena, None)
            }
            Err(err) => {
                log::debug!("parse failed: {err}");
                let mut empty = Document::new();
                empty.parse_error = Some(err);
                empty
            }
        };
        self
    }

    pub fn has_parse_error(&self) -> bool {
        self.parse_error.is_some()
    }

    pub fn parse_error(&self) -> Option<&Error> {
        self.parse_error.as_ref()
    }

    /// Handle used to add content to values attached to this document.
    pub fn allocator(&self) -> Allocator {
        Allocator::new(&self.arena)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Moves the content out, leaving a fresh null document behind.
    pub fn take(&mut self) -> Document {
        std::mem::take(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

/// Full copy into a new arena. Overlay writes are folded into the copy.
impl Clone for Document {
    fn clone(&self) -> Self {
        let flattened = self.root.deep_copy();
        let mut arena = Arena::new();
        let root = materialize(&mut arena, &flattened);
        arena.set_root(root);
        Self::from_arena(arena, self.parse_error.clone())
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let mut doc = Document::new();
        doc.parse(text);
        match doc.parse_error.take() {
            Some(err) => Err(err),
            None => Ok(doc),
        }
    }
}

impl Deref for Document {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.root
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Value {
        &mut self.root
    }
}

impl Index<&str> for Document {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        self.root.get(name)
    }
}

impl IndexMut<&str> for Document {
    fn index_mut(&mut self, name: &str) -> &mut Value {
        self.root.get_mut(name)
    }
}

impl Index<usize> for Document {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.root.get_index(index)
    }
}

impl IndexMut<usize> for Document {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.root.get_index_mut(index)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("nodes", &self.arena.try_borrow().map(|arena| arena.len()).ok())
            .field("parse_error", &self.parse_error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Type};

    #[rstest::rstest]
    fn test_new_document_is_attached_null() {
        let doc = Document::new();
        assert!(doc.is_null());
        assert!(doc.root().is_attached());
        assert!(!doc.has_parse_error());
        assert_eq!(doc.allocator().node_count(), 1);
    }

    #[rstest::rstest]
    fn test_parse_replaces_arena() {
        let mut doc = Document::new();
        doc.parse(r#"{"a": [1, 2, 3]}"#);
        let old = doc.allocator();
        assert_eq!(old.node_count(), 5);
        doc.parse("true");
        assert!(!old.is_alive());
        assert!(doc.is_true());
    }

    #[rstest::rstest]
    fn test_parse_failure_leaves_null_with_error() {
        let mut doc = Document::new();
        doc.parse(r#"{"a": 1}"#).parse("{\"a\": }");
        assert!(doc.has_parse_error());
        assert!(doc.is_null());
        let err = doc.parse_error().unwrap();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.location.map(|loc| loc.line), Some(1));
        doc.parse("[]");
        assert!(!doc.has_parse_error());
    }

    #[rstest::rstest]
    fn test_parse_stream_with_options() {
        let options = ParseOptions::new().with_comments(true);
        let mut doc = Document::new();
        doc.parse_stream("// header\n{\"n\": 2}".as_bytes(), &options);
        assert_eq!(doc["n"].get_int(), 2);
    }

    #[rstest::rstest]
    fn test_take_moves_content() {
        let mut a: Document = r#"{"k": "v"}"#.parse().unwrap();
        let b = a.take();
        assert!(a.is_null());
        assert_eq!(b["k"].get_string(), "v");
        drop(a);
        assert_eq!(b.member_count(), 1);
    }

    #[rstest::rstest]
    fn test_clone_is_independent_and_keeps_number_kinds() {
        let mut original: Document = r#"{"i": 3, "d": 3.0}"#.parse().unwrap();
        original["i"] = Value::from(4);
        let copy = original.clone();
        original["d"].set_string("changed");
        assert_eq!(copy["i"].get_int(), 4);
        assert!(copy["d"].number().is_some_and(|n| n.is_f64()));
        assert_eq!(copy.get_type(), Type::Object);
        assert!(copy.allocator().node_count() >= 3);
    }

    #[rstest::rstest]
    fn test_values_outlive_document_safely() {
        let doc: Document = r#"{"a": {"b": 1}}"#.parse().unwrap();
        let inner = doc["a"].clone();
        drop(doc);
        assert!(inner.is_null());
        assert!(inner["b"].is_null());
        assert_eq!(inner.to_string(), "null");
    }

    #[rstest::rstest]
    fn test_from_str_error() {
        let err = "[1, 2".parse::<Document>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
    }
}
