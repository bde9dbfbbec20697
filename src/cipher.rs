use crate::block::{block_transform, serialize, with_counter, Block, Keystream, State};
use crate::driver::{apply_parallel, apply_sequential, KeystreamPlan, WorkerPool};
use crate::error::Result;
use crate::params::{CounterPolicy, Key, Nonce};

/// ChaCha20 cipher context
///
/// Holds the key, nonce, base block counter and counter policy. Nothing else
/// survives between calls, so one context can serve any number of messages
/// (as long as the caller never reuses a nonce for different plaintexts).
#[derive(Debug, Clone)]
pub struct ChaCha20 {
    key: Key,
    nonce: Nonce,
    counter: u32,
    policy: CounterPolicy,
}

impl ChaCha20 {
    /// Build a context from raw bytes: 32-byte key, 12-byte nonce
    pub fn new(key: &[u8], nonce: &[u8], counter: u32) -> Result<Self> {
        Ok(Self::from_parts(
            Key::from_slice(key)?,
            Nonce::from_slice(nonce)?,
            counter,
        ))
    }

    pub fn from_parts(key: Key, nonce: Nonce, counter: u32) -> Self {
        Self {
            key,
            nonce,
            counter,
            policy: CounterPolicy::default(),
        }
    }

    pub fn with_counter_policy(mut self, policy: CounterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn counter_policy(&self) -> CounterPolicy {
        self.policy
    }

    /// Encrypt or decrypt `text`, one block after another
    pub fn cipher(&self, text: &[u8]) -> Result<Vec<u8>> {
        apply_sequential(&self.plan(), text)
    }

    /// Encrypt or decrypt `text` with blocks spread over `pool`
    ///
    /// Always returns the same bytes as [`ChaCha20::cipher`].
    pub fn cipher_parallel(&self, pool: &WorkerPool, text: &[u8]) -> Result<Vec<u8>> {
        apply_parallel(pool, &self.plan(), text)
    }

    /// Initial state for an arbitrary counter value
    pub fn init_state(&self, counter: u32) -> State {
        with_counter(self.plan().state(), counter)
    }

    /// Transformed block for an arbitrary counter value
    pub fn block(&self, counter: u32) -> Block {
        block_transform(&self.init_state(counter))
    }

    /// 64 bytes of keystream for an arbitrary counter value
    pub fn keystream_block(&self, counter: u32) -> Keystream {
        serialize(&self.block(counter))
    }

    fn plan(&self) -> KeystreamPlan {
        KeystreamPlan::new(&self.key, &self.nonce, self.counter, self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChaChaError;

    const SUNSCREEN: &[u8] = b"Ladies and Gentlemen of the class of '99: If I could offer you only one tip for the future, sunscreen would be it.";

    fn rfc_cipher() -> ChaCha20 {
        let key: Vec<u8> = (0u8..32).collect();
        let nonce = [0, 0, 0, 0, 0, 0, 0, 0x4a, 0, 0, 0, 0];
        ChaCha20::new(&key, &nonce, 1).unwrap()
    }

    #[test]
    fn test_construction_rejects_bad_lengths() {
        assert!(matches!(
            ChaCha20::new(&[0; 31], &[0; 12], 0),
            Err(ChaChaError::InvalidKeyLength { actual: 31, .. })
        ));
        assert!(matches!(
            ChaCha20::new(&[0; 33], &[0; 12], 0),
            Err(ChaChaError::InvalidKeyLength { actual: 33, .. })
        ));
        assert!(matches!(
            ChaCha20::new(&[0; 32], &[0; 11], 0),
            Err(ChaChaError::InvalidNonceLength { actual: 11, .. })
        ));
        assert!(matches!(
            ChaCha20::new(&[0; 32], &[0; 13], 0),
            Err(ChaChaError::InvalidNonceLength { actual: 13, .. })
        ));
    }

    #[test]
    fn test_sunscreen_vector() {
        let expected = hex::decode(concat!(
            "6e2e359a2568f98041ba0728dd0d6981",
            "e97e7aec1d4360c20a27afccfd9fae0b",
            "f91b65c5524733ab8f593dabcd62b357",
            "1639d624e65152ab8f530c359f0861d8",
            "07ca0dbf500d6a6156a38e088a22b65e",
            "52bc514d16ccf806818ce91ab7793736",
            "5af90bbf74a35be6b40b8eedf2785e42",
            "874d",
        ))
        .unwrap();

        let cc = rfc_cipher();
        let ct = cc.cipher(SUNSCREEN).unwrap();
        assert_eq!(ct, expected);
        assert_eq!(cc.cipher(&ct).unwrap(), SUNSCREEN);
    }

    #[test]
    fn test_parallel_sunscreen() {
        let cc = rfc_cipher();
        let pool = WorkerPool::new(3).unwrap();
        let text = SUNSCREEN.repeat(3);
        let sequential = cc.cipher(&text).unwrap();
        let parallel = cc.cipher_parallel(&pool, &text).unwrap();
        assert_eq!(sequential, parallel);
        assert_eq!(cc.cipher_parallel(&pool, &parallel).unwrap(), text);
    }

    #[test]
    fn test_keystream_block_matches_cipher_of_zeros() {
        let cc = rfc_cipher();
        let zeros = [0u8; 128];
        let ks = cc.cipher(&zeros).unwrap();
        assert_eq!(&ks[..64], &cc.keystream_block(1)[..]);
        assert_eq!(&ks[64..], &cc.keystream_block(2)[..]);
    }

    #[test]
    fn test_init_state_sets_counter_only() {
        let cc = rfc_cipher();
        let state = cc.init_state(77);
        assert_eq!(state[12], 77);
        assert_eq!(state[15], 0);
        assert_eq!(state[14], 0x4a000000);
    }

    #[test]
    fn test_counter_policy_is_carried() {
        let cc = rfc_cipher().with_counter_policy(CounterPolicy::Wrapping);
        assert_eq!(cc.counter_policy(), CounterPolicy::Wrapping);

        let strict = ChaCha20::new(&[0; 32], &[0; 12], u32::MAX).unwrap();
        assert!(strict.cipher(&[0u8; 100]).is_err());
        let wrapping = strict.with_counter_policy(CounterPolicy::Wrapping);
        assert_eq!(wrapping.cipher(&[0u8; 100]).unwrap().len(), 100);
    }
}
