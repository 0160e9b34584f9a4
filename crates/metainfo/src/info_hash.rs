use std::fmt;
use std::str::FromStr;

/// SHA-1 digest of a torrent's canonical `info` bytes.
///
/// A deliberately narrower cousin of the teacher's `Id<const N: usize>` —
/// this subsystem never needs the DHT's XOR distance metric or base32
/// parsing, only a stable, hashable, hex-displayable 20-byte identity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InfoHash(pub [u8; 20]);

impl InfoHash {
    pub fn new(bytes: [u8; 20]) -> Self {
        InfoHash(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", hex::encode(self.0))
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseInfoHashError {
    #[error("expected a 40-character hex string, got {0} characters")]
    WrongLength(usize),
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl FromStr for InfoHash {
    type Err = ParseInfoHashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.len() != 40 {
            return Err(ParseInfoHashError::WrongLength(s.len()));
        }
        let mut out = [0u8; 20];
        hex::decode_to_slice(s, &mut out)?;
        Ok(InfoHash(out))
    }
}
