use crate::error::{Error, ErrorKind};
use crate::options::WriteOptions;
use crate::visit::Handler;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

#[derive(Debug)]
struct Frame {
    scope: Scope,
    count: usize,
    after_key: bool,
}

/// A [`Handler`] that renders JSON text.
///
/// Compact by default; an indent in [`WriteOptions`] switches to one member
/// or element per line.
pub struct Writer {
    buffer: Vec<u8>,
    options: WriteOptions,
    stack: Vec<Frame>,
    indent_unit: String,
    indent_cache: Vec<String>,
}

impl Writer {
    pub fn new(options: WriteOptions) -> Self {
        let indent_unit = options
            .indent
            .map(|indent| " ".repeat(indent.get_spaces()))
            .unwrap_or_default();
        Self {
            buffer: Vec::new(),
            options,
            stack: Vec::new(),
            indent_unit,
            indent_cache: vec![String::new()],
        }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// True once a complete top-level value has been written.
    pub fn is_complete(&self) -> bool {
        self.stack.is_empty() && !self.buffer.is_empty()
    }

    pub fn finish(self) -> String {
        match String::from_utf8(self.buffer) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    pub fn finish_bytes(self) -> Vec<u8> {
        self.buffer
    }

    fn pretty(&self) -> bool {
        self.options.indent.is_some()
    }

    fn write_newline(&mut self) {
        self.buffer.push(b'\n');
    }

    fn write_indent(&mut self, depth: usize) {
        if depth == 0 || self.indent_unit.is_empty() {
            return;
        }
        if depth >= self.indent_cache.len() {
            self.extend_indent_cache(depth);
        }
        self.buffer
            .extend_from_slice(self.indent_cache[depth].as_bytes());
    }

    fn extend_indent_cache(&mut self, depth: usize) {
        while self.indent_cache.len() <= depth {
            let next = match self.indent_cache.last() {
                Some(prev) => {
                    let mut s = String::with_capacity(prev.len() + self.indent_unit.len());
                    s.push_str(prev);
                    s.push_str(&self.indent_unit);
                    s
                }
                None => String::new(),
            };
            self.indent_cache.push(next);
        }
    }

    /// Separator and indentation in front of the next entry of the open
    /// container.
    fn begin_entry(&mut self) {
        let depth = self.stack.len();
        let Some(frame) = self.stack.last_mut() else {
            return;
        };
        let first = frame.count == 0;
        frame.count += 1;
        if !first {
            self.buffer.push(b',');
        }
        if self.pretty() {
            self.write_newline();
            self.write_indent(depth);
        }
    }

    fn begin_value(&mut self) -> Result<()> {
        match self.stack.last_mut() {
            None if !self.buffer.is_empty() => Err(Error::new(
                ErrorKind::InvalidData,
                "writer already holds a complete value",
            )),
            None => Ok(()),
            Some(frame) if frame.scope == Scope::Object => {
                if !frame.after_key {
                    return Err(Error::new(
                        ErrorKind::InvalidData,
                        "object member written without a key",
                    ));
                }
                frame.after_key = false;
                Ok(())
            }
            Some(_) => {
                self.begin_entry();
                Ok(())
            }
        }
    }

    fn write_quoted_string(&mut self, s: &str) {
        self.buffer.push(b'"');
        escape_json_into(&mut self.buffer, s);
        self.buffer.push(b'"');
    }

    fn open(&mut self, scope: Scope, bracket: u8) -> Result<()> {
        self.begin_value()?;
        self.buffer.push(bracket);
        self.stack.push(Frame {
            scope,
            count: 0,
            after_key: false,
        });
        Ok(())
    }

    fn close(&mut self, scope: Scope, bracket: u8) -> Result<()> {
        let frame = match self.stack.pop() {
            Some(frame) if frame.scope == scope && !frame.after_key => frame,
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    format!("unbalanced close of {scope:?}"),
                ))
            }
        };
        if self.pretty() && frame.count > 0 {
            self.write_newline();
            self.write_indent(self.stack.len());
        }
        self.buffer.push(bracket);
        Ok(())
    }
}

impl Handler for Writer {
    type Error = Error;

    fn null(&mut self) -> Result<()> {
        self.begin_value()?;
        self.buffer.extend_from_slice(b"null");
        Ok(())
    }

    fn bool(&mut self, value: bool) -> Result<()> {
        self.begin_value()?;
        let text: &[u8] = if value { b"true" } else { b"false" };
        self.buffer.extend_from_slice(text);
        Ok(())
    }

    fn int64(&mut self, value: i64) -> Result<()> {
        self.begin_value()?;
        let mut buf = itoa::Buffer::new();
        self.buffer.extend_from_slice(buf.format(value).as_bytes());
        Ok(())
    }

    fn uint64(&mut self, value: u64) -> Result<()> {
        self.begin_value()?;
        let mut buf = itoa::Buffer::new();
        self.buffer.extend_from_slice(buf.format(value).as_bytes());
        Ok(())
    }

    /// Non-finite doubles have no JSON form and are written as `null`.
    fn double(&mut self, value: f64) -> Result<()> {
        self.begin_value()?;
        if value.is_finite() {
            let mut buf = ryu::Buffer::new();
            self.buffer.extend_from_slice(buf.format_finite(value).as_bytes());
        } else {
            self.buffer.extend_from_slice(b"null");
        }
        Ok(())
    }

    fn string(&mut self, value: &str) -> Result<()> {
        self.begin_value()?;
        self.write_quoted_string(value);
        Ok(())
    }

    fn start_object(&mut self) -> Result<()> {
        self.open(Scope::Object, b'{')
    }

    fn key(&mut self, name: &str) -> Result<()> {
        match self.stack.last() {
            Some(frame) if frame.scope == Scope::Object && !frame.after_key => {}
            _ => {
                return Err(Error::new(
                    ErrorKind::InvalidData,
                    "key written outside of an object",
                ))
            }
        }
        self.begin_entry();
        self.write_quoted_string(name);
        self.buffer.push(b':');
        if self.pretty() {
            self.buffer.push(b' ');
        }
        if let Some(frame) = self.stack.last_mut() {
            frame.after_key = true;
        }
        Ok(())
    }

    fn end_object(&mut self, _member_count: usize) -> Result<()> {
        self.close(Scope::Object, b'}')
    }

    fn start_array(&mut self) -> Result<()> {
        self.open(Scope::Array, b'[')
    }

    fn end_array(&mut self, _element_count: usize) -> Result<()> {
        self.close(Scope::Array, b']')
    }
}

/// Appends `s` with JSON string escapes applied.
pub(crate) fn escape_json_into(out: &mut Vec<u8>, s: &str) {
    let bytes = s.as_bytes();
    let mut start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let escape: &[u8] = match byte {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"\\r",
            b'\t' => b"\\t",
            0x08 => b"\\b",
            0x0c => b"\\f",
            0x00..=0x1f => {
                out.extend_from_slice(&bytes[start..i]);
                out.extend_from_slice(b"\\u00");
                out.push(HEX[(byte >> 4) as usize]);
                out.push(HEX[(byte & 0x0f) as usize]);
                start = i + 1;
                continue;
            }
            _ => continue,
        };
        out.extend_from_slice(&bytes[start..i]);
        out.extend_from_slice(escape);
        start = i + 1;
    }
    out.extend_from_slice(&bytes[start..]);
}

const HEX: &[u8; 16] = b"0123456789abcdef";
