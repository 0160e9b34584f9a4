use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

/// A decoded bencoded value.
///
/// Dict keys are kept in a [`BTreeMap`], which orders them by byte value —
/// the same order the encoding format requires, so canonical ordering falls
/// out of the container rather than being a property callers must check.
#[derive(Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Bytes(Bytes),
    List(Vec<Value>),
    Dict(BTreeMap<Bytes, Value>),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict().and_then(|d| d.get(key))
    }

    pub fn bytes(s: impl Into<Bytes>) -> Value {
        Value::Bytes(s.into())
    }
}

/// Renders non-UTF8-safe bytes the way a human reading a log line wants them:
/// escaped, not replaced with U+FFFD.
pub fn escape_bytes(buf: &[u8]) -> String {
    let mut out = String::with_capacity(buf.len());
    for &b in buf {
        for c in std::ascii::escape_default(b) {
            out.push(c as char);
        }
    }
    out
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "Integer({i})"),
            Value::Bytes(b) => write!(f, "Bytes(\"{}\")", escape_bytes(b)),
            Value::List(l) => f.debug_list().entries(l.iter()).finish(),
            Value::Dict(d) => f
                .debug_map()
                .entries(d.iter().map(|(k, v)| (escape_bytes(k), v)))
                .finish(),
        }
    }
}
