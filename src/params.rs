use crate::error::{ChaChaError, Result};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Key size in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Nonce size in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Key words in the state
pub const KEY_WORDS: usize = KEY_SIZE / 4;

/// Nonce words in the state
pub const NONCE_WORDS: usize = NONCE_SIZE / 4;

/// How the driver treats a block counter that would pass `u32::MAX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CounterPolicy {
    /// Refuse any call that needs a counter beyond `u32::MAX`
    #[default]
    Strict,
    /// Counter arithmetic is modulo 2^32
    Wrapping,
}

impl std::str::FromStr for CounterPolicy {
    type Err = ChaChaError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "wrapping" | "wrap" => Ok(Self::Wrapping),
            _ => Err(ChaChaError::UnsupportedPolicy(s.to_string())),
        }
    }
}

impl CounterPolicy {
    /// Counter value for block `index` of a message starting at `base`
    pub fn counter_for(self, base: u32, index: usize) -> Result<u32> {
        match self {
            Self::Strict => u32::try_from(index)
                .ok()
                .and_then(|i| base.checked_add(i))
                .ok_or(ChaChaError::CounterOverflow {
                    base,
                    blocks: index + 1,
                }),
            // Truncating the index is the same reduction mod 2^32
            Self::Wrapping => Ok(base.wrapping_add(index as u32)),
        }
    }

    /// Check up front that `blocks` consecutive counters are available from `base`
    pub fn check_range(self, base: u32, blocks: usize) -> Result<()> {
        if blocks == 0 {
            return Ok(());
        }
        self.counter_for(base, blocks - 1)
            .map(|_| ())
            .map_err(|_| ChaChaError::CounterOverflow { base, blocks })
    }
}

/// 256-bit secret key, wiped from memory on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: [u8; KEY_SIZE],
}

impl Key {
    pub const fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a key from a slice, rejecting anything but exactly 32 bytes
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_SIZE] =
            data.try_into()
                .map_err(|_| ChaChaError::InvalidKeyLength {
                    expected: KEY_SIZE,
                    actual: data.len(),
                })?;
        Ok(Self { bytes })
    }

    /// Parse a key from 64 hex characters
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut decoded = hex::decode(s.trim())?;
        let key = Self::from_slice(&decoded);
        decoded.zeroize();
        key
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Key as little-endian words, in state order
    pub fn words(&self) -> [u32; KEY_WORDS] {
        le_words(&self.bytes)
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key(..)")
    }
}

/// 96-bit nonce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce {
    bytes: [u8; NONCE_SIZE],
}

impl Nonce {
    pub const fn new(bytes: [u8; NONCE_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build a nonce from a slice, rejecting anything but exactly 12 bytes
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let bytes: [u8; NONCE_SIZE] =
            data.try_into()
                .map_err(|_| ChaChaError::InvalidNonceLength {
                    expected: NONCE_SIZE,
                    actual: data.len(),
                })?;
        Ok(Self { bytes })
    }

    /// Parse a nonce from 24 hex characters
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_slice(&hex::decode(s.trim())?)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.bytes
    }

    pub fn words(&self) -> [u32; NONCE_WORDS] {
        le_words(&self.bytes)
    }
}

/// Pack bytes into words, 4 bytes per word, least significant byte first
pub fn le_words<const N: usize>(bytes: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from(chunk[0])
            | u32::from(chunk[1]) << 8
            | u32::from(chunk[2]) << 16
            | u32::from(chunk[3]) << 24;
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_length_is_enforced() {
        assert!(Key::from_slice(&[0u8; 32]).is_ok());
        for len in [0, 31, 33, 64] {
            match Key::from_slice(&vec![0u8; len]) {
                Err(ChaChaError::InvalidKeyLength { expected, actual }) => {
                    assert_eq!(expected, 32);
                    assert_eq!(actual, len);
                }
                other => panic!("expected InvalidKeyLength for {} bytes, got {:?}", len, other),
            }
        }
    }

    #[test]
    fn test_nonce_length_is_enforced() {
        assert!(Nonce::from_slice(&[0u8; 12]).is_ok());
        for len in [0, 11, 13] {
            assert!(matches!(
                Nonce::from_slice(&vec![0u8; len]),
                Err(ChaChaError::InvalidNonceLength { actual, .. }) if actual == len
            ));
        }
    }

    #[test]
    fn test_le_word_packing() {
        let key: Vec<u8> = (0u8..32).collect();
        let key = Key::from_slice(&key).unwrap();
        let words = key.words();
        assert_eq!(words[0], 0x03020100);
        assert_eq!(words[7], 0x1f1e1d1c);

        let nonce = Nonce::new([0, 0, 0, 0x09, 0, 0, 0, 0x4a, 0, 0, 0, 0]);
        assert_eq!(nonce.words(), [0x09000000, 0x4a000000, 0]);
    }

    #[test]
    fn test_hex_parsing() {
        let key = Key::from_hex(
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        )
        .unwrap();
        assert_eq!(key.as_bytes()[31], 0x1f);

        assert!(matches!(Key::from_hex("zz"), Err(ChaChaError::InvalidHex(_))));
        assert!(matches!(
            Nonce::from_hex("0000"),
            Err(ChaChaError::InvalidNonceLength { actual: 2, .. })
        ));
    }

    #[test]
    fn test_key_debug_hides_material() {
        let key = Key::new([0xAB; 32]);
        assert_eq!(format!("{:?}", key), "Key(..)");
    }

    #[test]
    fn test_counter_policy_parse() {
        assert_eq!("strict".parse::<CounterPolicy>().unwrap(), CounterPolicy::Strict);
        assert_eq!("Wrapping".parse::<CounterPolicy>().unwrap(), CounterPolicy::Wrapping);
        assert!("sometimes".parse::<CounterPolicy>().is_err());
    }

    #[test]
    fn test_strict_counter_overflow() {
        let policy = CounterPolicy::Strict;
        assert_eq!(policy.counter_for(u32::MAX, 0).unwrap(), u32::MAX);
        assert!(policy.counter_for(u32::MAX, 1).is_err());
        assert!(policy.check_range(u32::MAX, 1).is_ok());
        assert!(matches!(
            policy.check_range(u32::MAX - 1, 3),
            Err(ChaChaError::CounterOverflow { base, blocks: 3 }) if base == u32::MAX - 1
        ));
        assert!(policy.check_range(u32::MAX, 0).is_ok());
    }

    #[test]
    fn test_wrapping_counter() {
        let policy = CounterPolicy::Wrapping;
        assert_eq!(policy.counter_for(u32::MAX, 1).unwrap(), 0);
        assert_eq!(policy.counter_for(u32::MAX - 1, 5).unwrap(), 3);
        assert!(policy.check_range(u32::MAX, 10).is_ok());
    }
}
