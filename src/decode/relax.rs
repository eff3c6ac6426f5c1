use std::borrow::Cow;

use memchr::{memchr, memchr2, memmem};

use super::location_at;
use crate::error::{Error, ErrorKind};
use crate::options::ParseOptions;
use crate::Result;

/// Rewrites the lenient extensions enabled in `options` into plain JSON.
///
/// Comments and accepted trailing commas are overwritten with spaces
/// (line breaks are kept), so byte offsets, lines and columns of the result
/// match the input and parser errors point at the original text. A block
/// comment without its closing `*/` is an error.
pub(crate) fn relax<'a>(input: &'a str, options: &ParseOptions) -> Result<Cow<'a, str>> {
    let mut bytes = input.as_bytes().to_vec();
    let mut changed = false;
    if options.allow_comments {
        changed |= blank_comments(&mut bytes)?;
    }
    if options.allow_trailing_commas {
        changed |= blank_trailing_commas(&mut bytes);
    }
    if !changed {
        return Ok(Cow::Borrowed(input));
    }
    Ok(match String::from_utf8(bytes) {
        Ok(text) => Cow::Owned(text),
        Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
    })
}

/// Index just past the string literal opening at `start`.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let mut idx = start + 1;
    while idx < bytes.len() {
        let Some(offset) = memchr2(b'"', b'\\', &bytes[idx..]) else {
            break;
        };
        let at = idx + offset;
        if bytes[at] == b'\\' {
            idx = at + 2;
            continue;
        }
        return at + 1;
    }
    bytes.len()
}

fn blank(bytes: &mut [u8]) {
    for byte in bytes.iter_mut().filter(|b| !matches!(b, b'\n' | b'\r')) {
        *byte = b' ';
    }
}

fn blank_comments(bytes: &mut [u8]) -> Result<bool> {
    let mut changed = false;
    let mut idx = 0;
    while idx < bytes.len() {
        let Some(offset) = memchr2(b'"', b'/', &bytes[idx..]) else {
            break;
        };
        idx += offset;
        if bytes[idx] == b'"' {
            idx = skip_string(bytes, idx);
            continue;
        }
        let end = match bytes.get(idx + 1) {
            Some(b'/') => memchr(b'\n', &bytes[idx..]).map_or(bytes.len(), |o| idx + o),
            Some(b'*') => match memmem::find(&bytes[idx + 2..], b"*/") {
                Some(o) => idx + 2 + o + 2,
                None => {
                    let (line, column) = location_at(bytes, idx);
                    return Err(Error::new(ErrorKind::UnexpectedEof, "unterminated block comment")
                        .with_location(line, column));
                }
            },
            _ => {
                idx += 1;
                continue;
            }
        };
        blank(&mut bytes[idx..end]);
        changed = true;
        idx = end;
    }
    Ok(changed)
}

fn blank_trailing_commas(bytes: &mut [u8]) -> bool {
    let mut changed = false;
    let mut idx = 0;
    while idx < bytes.len() {
        let Some(offset) = memchr2(b'"', b',', &bytes[idx..]) else {
            break;
        };
        idx += offset;
        if bytes[idx] == b'"' {
            idx = skip_string(bytes, idx);
            continue;
        }
        let closes = next_significant(bytes, idx + 1).is_some_and(|b| matches!(b, b']' | b'}'));
        let follows_value = prev_significant(bytes, idx).is_some_and(|b| !matches!(b, b'[' | b'{' | b','));
        if closes && follows_value {
            bytes[idx] = b' ';
            changed = true;
        }
        idx += 1;
    }
    changed
}

fn next_significant(bytes: &[u8], from: usize) -> Option<u8> {
    bytes.get(from..)?.iter().copied().find(|b| !b.is_ascii_whitespace())
}

fn prev_significant(bytes: &[u8], before: usize) -> Option<u8> {
    bytes[..before].iter().rev().copied().find(|b| !b.is_ascii_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient() -> ParseOptions {
        ParseOptions::new().with_comments(true).with_trailing_commas(true)
    }

    #[rstest::rstest]
    #[case("{\"a\": 1 // note\n}", "{\"a\": 1        \n}")]
    #[case("[1, /* two */ 2]", "[1,           2]")]
    #[case("[1, 2,]", "[1, 2 ]")]
    #[case("{\"a\": [1,],\n}", "{\"a\": [1 ] \n}")]
    fn test_relax_blanks_extensions(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(relax(input, &lenient()).unwrap(), expected);
    }

    #[rstest::rstest]
    #[case("{\"url\": \"http://x/*y*/\"}")]
    #[case("[\"a,]\", \"\\\",]\"]")]
    #[case("[1, 2]")]
    fn test_relax_leaves_strings_alone(#[case] input: &str) {
        assert!(matches!(relax(input, &lenient()).unwrap(), Cow::Borrowed(_)));
    }

    #[rstest::rstest]
    fn test_relax_keeps_line_structure() {
        let input = "{\n/* a\nb */ \"k\": 1,\n}";
        let relaxed = relax(input, &lenient()).unwrap();
        assert_eq!(relaxed.len(), input.len());
        assert_eq!(relaxed.matches('\n').count(), 3);
        let parsed: serde_json::Value = serde_json::from_str(&relaxed).unwrap();
        assert_eq!(parsed["k"], 1);
    }

    #[rstest::rstest]
    fn test_relax_rejects_empty_slots() {
        assert_eq!(relax("[,]", &lenient()).unwrap(), "[,]");
        assert_eq!(relax("[1,,]", &lenient()).unwrap(), "[1,,]");
    }

    #[rstest::rstest]
    fn test_options_are_independent() {
        let comments_only = ParseOptions::new().with_comments(true);
        assert_eq!(relax("[1,] // c", &comments_only).unwrap(), "[1,]     ");
        let commas_only = ParseOptions::new().with_trailing_commas(true);
        assert_eq!(relax("[1,] // c", &commas_only).unwrap(), "[1 ] // c");
    }

    #[rstest::rstest]
    fn test_unterminated_block_comment_is_rejected() {
        let err = relax("[1]\n  /* open", &lenient()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
        let location = err.location.unwrap();
        assert_eq!((location.line, location.column), (2, 3));
        assert!(relax("[1] /* closed */", &lenient()).is_ok());
    }
}
