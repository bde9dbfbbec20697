use crate::cipher::ChaCha20;
use crate::driver::WorkerPool;
use crate::error::{ChaChaError, Result};
use crate::params::{CounterPolicy, Key, Nonce, KEY_SIZE, NONCE_SIZE};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use zeroize::Zeroize;

fn default_counter() -> u32 {
    1
}

fn default_blocks_per_job() -> usize {
    1
}

/// Cipher parameters as stored on disk (JSON)
/// Key and nonce are hex strings so the file can be edited by hand
#[derive(Clone, Serialize, Deserialize)]
pub struct CipherConfig {
    /// 64 hex characters
    pub key: String,
    /// 24 hex characters
    pub nonce: String,
    #[serde(default = "default_counter")]
    pub counter: u32,
    #[serde(default)]
    pub counter_policy: CounterPolicy,
    /// Worker threads for parallel runs; `None` uses available parallelism
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(default = "default_blocks_per_job")]
    pub blocks_per_job: usize,
}

impl Drop for CipherConfig {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl std::fmt::Debug for CipherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherConfig")
            .field("key", &"..")
            .field("nonce", &self.nonce)
            .field("counter", &self.counter)
            .field("counter_policy", &self.counter_policy)
            .field("workers", &self.workers)
            .field("blocks_per_job", &self.blocks_per_job)
            .finish()
    }
}

impl CipherConfig {
    pub fn new(key: &Key, nonce: &Nonce, counter: u32) -> Self {
        Self {
            key: hex::encode(key.as_bytes()),
            nonce: hex::encode(nonce.as_bytes()),
            counter,
            counter_policy: CounterPolicy::default(),
            workers: None,
            blocks_per_job: default_blocks_per_job(),
        }
    }

    /// Fresh random key and nonce from the OS RNG
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        let mut nonce = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut key);
        OsRng.fill_bytes(&mut nonce);

        let config = Self::new(&Key::new(key), &Nonce::new(nonce), default_counter());
        key.zeroize();
        config
    }

    /// Check every field without building anything
    pub fn validate(&self) -> Result<()> {
        Key::from_hex(&self.key)?;
        Nonce::from_hex(&self.nonce)?;
        if self.workers == Some(0) {
            return Err(ChaChaError::InvalidWorkerCount(0));
        }
        if self.blocks_per_job == 0 {
            return Err(ChaChaError::InvalidConfig(
                "blocks_per_job must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Write the config as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_cipher(&self) -> Result<ChaCha20> {
        let key = Key::from_hex(&self.key)?;
        let nonce = Nonce::from_hex(&self.nonce)?;
        Ok(ChaCha20::from_parts(key, nonce, self.counter).with_counter_policy(self.counter_policy))
    }

    pub fn worker_pool(&self) -> Result<WorkerPool> {
        let pool = match self.workers {
            Some(n) => WorkerPool::new(n)?,
            None => WorkerPool::with_available_parallelism()?,
        };
        pool.with_blocks_per_job(self.blocks_per_job)
    }
}
