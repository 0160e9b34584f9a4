use std::io::Write;

use crate::value::Value;

/// Encodes a value to canonical bencode. Dict keys come out sorted because
/// [`Value::Dict`] is backed by a [`std::collections::BTreeMap`] — there is
/// no separate sorting step to get wrong.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_value(&mut out, value).expect("writing to a Vec<u8> never fails");
    out
}

fn write_value(w: &mut impl Write, value: &Value) -> std::io::Result<()> {
    match value {
        Value::Integer(i) => write!(w, "i{i}e"),
        Value::Bytes(b) => {
            write!(w, "{}:", b.len())?;
            w.write_all(b)
        }
        Value::List(items) => {
            w.write_all(b"l")?;
            for item in items {
                write_value(w, item)?;
            }
            w.write_all(b"e")
        }
        Value::Dict(map) => {
            w.write_all(b"d")?;
            for (k, v) in map {
                write!(w, "{}:", k.len())?;
                w.write_all(k)?;
                write_value(w, v)?;
            }
            w.write_all(b"e")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use bytes::Bytes;
    use std::collections::BTreeMap;

    #[test]
    fn encodes_integer() {
        assert_eq!(encode(&Value::Integer(42)), b"i42e");
        assert_eq!(encode(&Value::Integer(-1)), b"i-1e");
    }

    #[test]
    fn encodes_bytes() {
        assert_eq!(encode(&Value::bytes(&b"spam"[..])), b"4:spam");
    }

    #[test]
    fn encodes_dict_sorted_regardless_of_insertion_order() {
        let mut map = BTreeMap::new();
        map.insert(Bytes::from_static(b"zebra"), Value::Integer(1));
        map.insert(Bytes::from_static(b"apple"), Value::Integer(2));
        let out = encode(&Value::Dict(map));
        assert_eq!(out, b"d5:applei2e5:zebrai1ee");
    }

    #[test]
    fn round_trips_arbitrary_canonical_input() {
        let input: &[u8] = b"d8:announce22:http://example.com/ann4:infod6:lengthi12345e4:name8:file.bin12:piece lengthi16384e6:pieces20:01234567890123456789ee";
        let value = decode(input).unwrap();
        let out = encode(&value);
        assert_eq!(out, input);
    }
}
