//! JSON output.

pub mod writer;

use std::io::Write;

pub use writer::Writer;

use crate::error::Error;
use crate::options::WriteOptions;
use crate::value::Value;
use crate::Result;

/// Compact JSON text of `value`, overlay included.
///
/// # Examples
/// ```
/// use arena_json::Document;
///
/// let mut doc = Document::new();
/// doc.parse(r#"{"x": 1}"#);
/// doc["x"] = 42.into();
/// assert_eq!(arena_json::encode::to_string(&doc)?, r#"{"x":42}"#);
/// # Ok::<(), arena_json::Error>(())
/// ```
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with_options(value, &WriteOptions::compact())
}

/// Pretty JSON with the default four-space indent.
pub fn to_string_pretty(value: &Value) -> Result<String> {
    to_string_with_options(value, &WriteOptions::pretty())
}

pub fn to_string_with_options(value: &Value, options: &WriteOptions) -> Result<String> {
    let mut writer = Writer::new(*options);
    value.accept(&mut writer)?;
    Ok(writer.finish())
}

pub fn to_vec(value: &Value, options: &WriteOptions) -> Result<Vec<u8>> {
    let mut writer = Writer::new(*options);
    value.accept(&mut writer)?;
    Ok(writer.finish_bytes())
}

/// Writes the JSON text of `value` into `out`.
pub fn to_writer<W: Write>(mut out: W, value: &Value, options: &WriteOptions) -> Result<()> {
    let bytes = to_vec(value, options)?;
    out.write_all(&bytes).map_err(|err| Error::io(&err))?;
    out.flush().map_err(|err| Error::io(&err))
}
