use super::State;
use crate::error::Result;
use crate::params::{Key, Nonce};

/// "expand 32-byte k" as little-endian words
pub const CONSTANTS: [u32; 4] = [0x61707865, 0x3320646e, 0x79622d32, 0x6b206574];

/// Index of the block counter word
pub const COUNTER_INDEX: usize = 12;

/// Lay out constants, key, counter and nonce
/// Layout: [const: 0..4][key: 4..12][counter: 12][nonce: 13..16]
pub fn build_state(key: &Key, nonce: &Nonce, counter: u32) -> State {
    let mut state = [0u32; 16];
    state[0..4].copy_from_slice(&CONSTANTS);
    state[4..12].copy_from_slice(&key.words());
    state[COUNTER_INDEX] = counter;
    state[13..16].copy_from_slice(&nonce.words());
    state
}

/// Build a state from raw key and nonce bytes
pub fn init_state(key: &[u8], nonce: &[u8], counter: u32) -> Result<State> {
    let key = Key::from_slice(key)?;
    let nonce = Nonce::from_slice(nonce)?;
    Ok(build_state(&key, &nonce, counter))
}

/// Copy of `state` with its counter word replaced
pub fn with_counter(state: &State, counter: u32) -> State {
    let mut patched = *state;
    patched[COUNTER_INDEX] = counter;
    patched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChaChaError;

    fn rfc_key() -> Vec<u8> {
        (0u8..32).collect()
    }

    #[test]
    fn test_state_layout() {
        let nonce = [0, 0, 0, 0x09, 0, 0, 0, 0x4a, 0, 0, 0, 0];
        let state = init_state(&rfc_key(), &nonce, 1).unwrap();

        let expected: State = [
            0x61707865, 0x3320646e, 0x79622d32, 0x6b206574,
            0x03020100, 0x07060504, 0x0b0a0908, 0x0f0e0d0c,
            0x13121110, 0x17161514, 0x1b1a1918, 0x1f1e1d1c,
            0x00000001, 0x09000000, 0x4a000000, 0x00000000,
        ];
        assert_eq!(state, expected);
    }

    #[test]
    fn test_init_state_rejects_bad_lengths() {
        assert!(matches!(
            init_state(&[0u8; 31], &[0u8; 12], 0),
            Err(ChaChaError::InvalidKeyLength { .. })
        ));
        assert!(matches!(
            init_state(&[0u8; 33], &[0u8; 12], 0),
            Err(ChaChaError::InvalidKeyLength { .. })
        ));
        assert!(matches!(
            init_state(&[0u8; 32], &[0u8; 11], 0),
            Err(ChaChaError::InvalidNonceLength { .. })
        ));
        assert!(matches!(
            init_state(&[0u8; 32], &[0u8; 13], 0),
            Err(ChaChaError::InvalidNonceLength { .. })
        ));
    }

    #[test]
    fn test_with_counter_leaves_original() {
        let state = init_state(&rfc_key(), &[0u8; 12], 1).unwrap();
        let patched = with_counter(&state, 99);
        assert_eq!(patched[COUNTER_INDEX], 99);
        assert_eq!(state[COUNTER_INDEX], 1);
        assert_eq!(&patched[..12], &state[..12]);
        assert_eq!(&patched[13..], &state[13..]);
    }
}
