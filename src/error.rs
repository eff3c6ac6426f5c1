use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input holds no value at all.
    DocumentEmpty,
    /// The input ended inside a value.
    UnexpectedEof,
    Syntax,
    InvalidData,
    Io,
    NotAnObject,
    NotAnArray,
    InvalidPointer,
    ForeignAllocator,
    /// The attached node no longer exists (document dropped or node removed).
    Dangling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub location: Option<Location>,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            location: None,
        }
    }

    pub fn not_an_object(found: &'static str) -> Self {
        Self::new(
            ErrorKind::NotAnObject,
            format!("expected object, found {found}"),
        )
    }

    pub fn not_an_array(found: &'static str) -> Self {
        Self::new(ErrorKind::NotAnArray, format!("expected array, found {found}"))
    }

    pub fn foreign_allocator() -> Self {
        Self::new(
            ErrorKind::ForeignAllocator,
            "allocator belongs to a different document",
        )
    }

    pub fn dangling() -> Self {
        Self::new(ErrorKind::Dangling, "attached node is no longer alive")
    }

    pub fn invalid_pointer(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPointer, message)
    }

    pub fn document_empty() -> Self {
        Self::new(ErrorKind::DocumentEmpty, "the document is empty")
    }

    pub fn io(err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io, format!("read failed: {err}"))
    }

    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.location = Some(Location { line, column });
        self
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let kind = match err.classify() {
            Category::Eof => ErrorKind::UnexpectedEof,
            Category::Syntax => ErrorKind::Syntax,
            Category::Data => ErrorKind::InvalidData,
            Category::Io => ErrorKind::Io,
        };
        let (line, column) = (err.line(), err.column());
        Error::new(kind, format!("parse failed: {err}")).with_location(line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_from_serde_json_keeps_location() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": ?\n}").unwrap_err();
        let err = Error::from(err);
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert_eq!(err.location.map(|loc| loc.line), Some(2));
    }

    #[rstest::rstest]
    fn test_from_serde_json_eof() {
        let err = serde_json::from_str::<serde_json::Value>("[1, 2").unwrap_err();
        assert_eq!(Error::from(err).kind, ErrorKind::UnexpectedEof);
    }

    #[rstest::rstest]
    fn test_display_is_message() {
        let err = Error::not_an_array("string");
        assert_eq!(err.to_string(), "expected array, found string");
    }
}
