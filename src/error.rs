use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChaChaError {
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid nonce length: expected {expected} bytes, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("Length mismatch: {data} data bytes but only {keystream} keystream bytes")]
    LengthMismatch { data: usize, keystream: usize },

    #[error("Block counter overflow: base {base} cannot address {blocks} blocks")]
    CounterOverflow { base: u32, blocks: usize },

    #[error("Parallel task failed: {0}")]
    TaskFailure(String),

    #[error("Invalid worker count: {0}. Must be at least 1")]
    InvalidWorkerCount(usize),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported counter policy: {0}")]
    UnsupportedPolicy(String),

    #[error("Self-test failed: {0} known-answer checks did not match")]
    SelfTestFailed(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChaChaError>;
