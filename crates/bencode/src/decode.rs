use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::value::Value;

/// Recursive-descent bencode reader.
///
/// Position tracking is done by comparing the remaining slice's length
/// against the original input rather than carrying an explicit cursor,
/// the same trick the raw-info-capture code in the teacher's deserializer
/// uses to recover a byte range after the fact.
struct Decoder<'a> {
    buf: &'a [u8],
    orig: &'a [u8],
    capture_info: bool,
    info_range: Option<(usize, usize)>,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8], capture_info: bool) -> Self {
        Decoder {
            buf: input,
            orig: input,
            capture_info,
            info_range: None,
        }
    }

    fn pos(&self) -> usize {
        self.orig.len() - self.buf.len()
    }

    fn peek(&self) -> Result<u8> {
        self.buf.first().copied().ok_or(Error::UnexpectedEof)
    }

    fn advance(&mut self, n: usize) {
        self.buf = &self.buf[n..];
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        match self.peek()? {
            b'i' => self.parse_integer(),
            b'l' => self.parse_list(depth),
            b'd' => self.parse_dict(depth),
            b'0'..=b'9' => self.parse_bytes().map(Value::Bytes),
            other => Err(Error::UnknownTag(other, self.pos())),
        }
    }

    fn parse_integer(&mut self) -> Result<Value> {
        self.advance(1); // 'i'
        let start = self.pos();
        let end = memchr::memchr(b'e', self.buf).ok_or(Error::UnexpectedEof)?;
        let digits = &self.buf[..end];
        validate_integer_digits(digits, start)?;
        let n: i64 = atoi::atoi(digits).ok_or(Error::InvalidInteger(start))?;
        self.advance(end + 1);
        Ok(Value::Integer(n))
    }

    fn parse_length(&mut self) -> Result<usize> {
        let start = self.pos();
        let colon = memchr::memchr(b':', self.buf).ok_or(Error::UnexpectedEof)?;
        let digits = &self.buf[..colon];
        if digits.is_empty() || (digits.len() > 1 && digits[0] == b'0') {
            return Err(Error::InvalidLength(start));
        }
        let len: usize = atoi::atoi(digits).ok_or(Error::InvalidLength(start))?;
        self.advance(colon + 1);
        Ok(len)
    }

    fn parse_bytes(&mut self) -> Result<Bytes> {
        let len = self.parse_length()?;
        if self.buf.len() < len {
            return Err(Error::UnexpectedEof);
        }
        let slice = &self.buf[..len];
        self.advance(len);
        Ok(Bytes::copy_from_slice(slice))
    }

    fn parse_list(&mut self, depth: usize) -> Result<Value> {
        self.advance(1); // 'l'
        let mut items = Vec::new();
        loop {
            if self.peek()? == b'e' {
                self.advance(1);
                break;
            }
            items.push(self.parse_value(depth + 1)?);
        }
        Ok(Value::List(items))
    }

    fn parse_dict(&mut self, depth: usize) -> Result<Value> {
        self.advance(1); // 'd'
        let mut map = BTreeMap::new();
        let mut last_key: Option<Bytes> = None;
        loop {
            if self.peek()? == b'e' {
                self.advance(1);
                break;
            }
            let key_start = self.pos();
            let key = self.parse_bytes()?;
            if let Some(prev) = &last_key {
                match key.as_ref().cmp(prev.as_ref()) {
                    std::cmp::Ordering::Equal => return Err(Error::DuplicateKey(key_start)),
                    std::cmp::Ordering::Less => return Err(Error::UnorderedKeys(key_start)),
                    std::cmp::Ordering::Greater => {}
                }
            }
            let value_start = self.pos();
            let value = self.parse_value(depth + 1)?;
            let value_end = self.pos();
            if self.capture_info && depth == 0 && key.as_ref() == b"info" {
                self.info_range = Some((value_start, value_end));
            }
            last_key = Some(key.clone());
            map.insert(key, value);
        }
        Ok(Value::Dict(map))
    }
}

fn validate_integer_digits(digits: &[u8], start: usize) -> Result<()> {
    if digits.is_empty() {
        return Err(Error::InvalidInteger(start));
    }
    let (sign, rest) = match digits.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, digits),
    };
    if rest.is_empty() || !rest.iter().all(u8::is_ascii_digit) {
        return Err(Error::InvalidInteger(start));
    }
    if sign && rest == b"0" {
        // "-0" is not a canonical integer encoding.
        return Err(Error::InvalidInteger(start));
    }
    if rest.len() > 1 && rest[0] == b'0' {
        return Err(Error::LeadingZero(start));
    }
    Ok(())
}

/// Decodes a single canonical bencoded value, rejecting trailing bytes.
pub fn decode(input: &[u8]) -> Result<Value> {
    let mut dec = Decoder::new(input, false);
    let value = dec.parse_value(0)?;
    if !dec.buf.is_empty() {
        return Err(Error::TrailingBytes(dec.buf.len()));
    }
    Ok(value)
}

/// Decodes a value the same way [`decode`] does, additionally returning the
/// raw bytes of the top-level `info` dict entry, if present, without
/// re-encoding them — the only way to keep an infohash stable across a
/// decode/encode round trip.
pub fn decode_with_raw_info(input: &Bytes) -> Result<(Value, Option<Bytes>)> {
    let mut dec = Decoder::new(input.as_ref(), true);
    let value = dec.parse_value(0)?;
    if !dec.buf.is_empty() {
        return Err(Error::TrailingBytes(dec.buf.len()));
    }
    let info_bytes = dec.info_range.map(|(s, e)| input.slice(s..e));
    Ok((value, info_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_integer() {
        assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
        assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
        assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
    }

    #[test]
    fn rejects_leading_zero() {
        assert_eq!(decode(b"i04e").unwrap_err(), Error::LeadingZero(1));
    }

    #[test]
    fn rejects_negative_zero() {
        assert!(decode(b"i-0e").is_err());
    }

    #[test]
    fn decodes_bytes() {
        assert_eq!(
            decode(b"4:spam").unwrap(),
            Value::Bytes(Bytes::from_static(b"spam"))
        );
    }

    #[test]
    fn rejects_truncated_bytes() {
        assert_eq!(decode(b"4:sp").unwrap_err(), Error::UnexpectedEof);
    }

    #[test]
    fn decodes_list() {
        let v = decode(b"l4:spami42ee").unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Bytes(Bytes::from_static(b"spam")),
                Value::Integer(42)
            ])
        );
    }

    #[test]
    fn decodes_dict_in_canonical_order() {
        let v = decode(b"d3:bar4:spam3:fooi42ee").unwrap();
        let d = v.as_dict().unwrap();
        let keys: Vec<&[u8]> = d.keys().map(|k| k.as_ref()).collect();
        assert_eq!(keys, vec![b"bar".as_ref(), b"foo".as_ref()]);
    }

    #[test]
    fn rejects_unordered_dict_keys() {
        let err = decode(b"d3:fooi1e3:bari2ee").unwrap_err();
        assert!(matches!(err, Error::UnorderedKeys(_)));
    }

    #[test]
    fn rejects_duplicate_dict_keys() {
        let err = decode(b"d3:fooi1e3:fooi2ee").unwrap_err();
        assert!(matches!(err, Error::DuplicateKey(_)));
    }

    #[test]
    fn rejects_trailing_bytes() {
        assert_eq!(decode(b"i1ei2e").unwrap_err(), Error::TrailingBytes(3));
    }

    #[test]
    fn captures_raw_info_bytes() {
        let input = Bytes::from_static(b"d8:announce3:foo4:infod6:lengthi5e4:name1:xee");
        let (value, info) = decode_with_raw_info(&input).unwrap();
        assert!(value.get(b"info").is_some());
        let info = info.expect("info dict present");
        assert_eq!(info.as_ref(), b"d6:lengthi5e4:name1:xe".as_slice());
        // Must be decodable on its own and re-produce the same structure.
        let reparsed = decode(&info).unwrap();
        assert_eq!(reparsed.get(b"length").unwrap().as_integer(), Some(5));
    }

    #[test]
    fn nested_info_key_is_not_captured() {
        // Only the top-level "info" key participates in infohash capture.
        let input = Bytes::from_static(b"d4:metad4:infoi1eee");
        let (_, info) = decode_with_raw_info(&input).unwrap();
        assert!(info.is_none());
    }
}
