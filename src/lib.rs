//! parchacha - ChaCha20 stream cipher with sequential and parallel drivers
//!
//! Implements the RFC 8439 variant of ChaCha20: 256-bit key, 96-bit nonce,
//! 32-bit block counter. Every 64-byte keystream block depends only on
//! `(key, nonce, counter + i)`, so blocks can be computed in any order and on
//! any thread.
//!
//! ## Pipeline
//!
//! ```text
//! Key, Nonce, Counter → State → 20 rounds + feed-forward → Serialize → XOR → Output
//! ```
//!
//! - **State**: constants, key, counter and nonce as sixteen 32-bit words
//! - **Transform**: ten double rounds over a copy, then added to the original
//! - **Serialize**: words to 64 little-endian bytes
//! - **Combine**: XOR with the input, last block truncated
//!
//! The sequential driver walks the blocks in order. The parallel driver queues
//! one job per block (or per run of blocks) on a caller-owned [`WorkerPool`] and
//! places each result by its byte offset.
//!
//! ## Example
//!
//! ```
//! use parchacha::{ChaCha20, WorkerPool};
//!
//! let cipher = ChaCha20::new(&[7u8; 32], &[1u8; 12], 1).unwrap();
//! let pool = WorkerPool::new(2).unwrap();
//!
//! let ciphertext = cipher.cipher(b"attack at dawn").unwrap();
//! assert_eq!(cipher.cipher_parallel(&pool, b"attack at dawn").unwrap(), ciphertext);
//! assert_eq!(cipher.cipher(&ciphertext).unwrap(), b"attack at dawn");
//! ```

pub mod block;
pub mod cipher;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod params;
pub mod vectors;

pub use block::{block_transform, init_state, serialize, Block, Keystream, State, BLOCK_SIZE};
pub use cipher::ChaCha20;
pub use config::CipherConfig;
pub use driver::WorkerPool;
pub use error::{ChaChaError, Result};
pub use params::{CounterPolicy, Key, Nonce, KEY_SIZE, NONCE_SIZE};
