#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Accept `//` line comments and `/* */` block comments.
    pub allow_comments: bool,
    /// Accept a single trailing comma before `]` or `}`.
    pub allow_trailing_commas: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(mut self, allow: bool) -> Self {
        self.allow_comments = allow;
        self
    }

    pub fn with_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }

    pub(crate) fn is_strict(&self) -> bool {
        !self.allow_comments && !self.allow_trailing_commas
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
}

impl Indent {
    pub fn spaces(count: usize) -> Self {
        Indent::Spaces(count)
    }

    pub fn get_spaces(&self) -> usize {
        let Indent::Spaces(count) = *self;
        count
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// `None` writes compact output.
    pub indent: Option<Indent>,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compact() -> Self {
        Self { indent: None }
    }

    pub fn pretty() -> Self {
        Self {
            indent: Some(Indent::default()),
        }
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = Some(indent);
        self
    }
}
