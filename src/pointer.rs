//! JSON Pointer lookups (`/servers/0/name`).

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::error::Error;
use crate::value::Value;
use crate::Result;

type TokenBuf = SmallVec<[String; 8]>;

/// A parsed pointer path.
///
/// `""` and `"/"` both address the root. A trailing `/` adds no token.
/// Inside a token `~0` stands for `~` and `~1` for `/`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pointer {
    tokens: TokenBuf,
}

impl Pointer {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() || path == "/" {
            return Ok(Self::root());
        }
        let Some(rest) = path.strip_prefix('/') else {
            return Err(Error::invalid_pointer(format!(
                "pointer {path:?} must start with '/'"
            )));
        };
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        let tokens = rest
            .split('/')
            .map(|raw| unescape(raw, path))
            .collect::<Result<TokenBuf>>()?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The parent pointer and the final token; `None` for the root.
    pub fn split_last(&self) -> Option<(Pointer, &str)> {
        let (last, rest) = self.tokens.split_last()?;
        let parent = Self {
            tokens: rest.iter().cloned().collect(),
        };
        Some((parent, last.as_str()))
    }

    /// Resolves the pointer against `root`; `None` when any step is missing.
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for token in &self.tokens {
            current = if current.is_array() {
                current.get_index(array_index(token, current.size())?)
            } else if current.is_object() && current.has_member(token) {
                current.get(token)
            } else {
                return None;
            };
        }
        Some(current)
    }

    /// Like [`Pointer::get`], returning the cached child for overlay writes.
    pub fn get_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        let mut current = root;
        for token in &self.tokens {
            current = if current.is_array() {
                let index = array_index(token, current.size())?;
                current.get_index_mut(index)
            } else if current.is_object() && current.has_member(token) {
                current.get_mut(token)
            } else {
                return None;
            };
        }
        Some(current)
    }
}

fn unescape(raw: &str, path: &str) -> Result<String> {
    if !raw.contains('~') {
        return Ok(raw.to_owned());
    }
    let mut token = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '~' {
            token.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => token.push('~'),
            Some('1') => token.push('/'),
            _ => {
                return Err(Error::invalid_pointer(format!(
                    "invalid escape in pointer {path:?}"
                )))
            }
        }
    }
    Ok(token)
}

/// Array tokens are plain decimal indices without leading zeros.
fn array_index(token: &str, size: usize) -> Option<usize> {
    let digits_only = !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (token.len() > 1 && token.starts_with('0')) {
        return None;
    }
    token.parse::<usize>().ok().filter(|&index| index < size)
}

impl FromStr for Pointer {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        Pointer::parse(path)
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tokens.is_empty() {
            return f.write_str("/");
        }
        for token in &self.tokens {
            f.write_str("/")?;
            f.write_str(&token.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}
