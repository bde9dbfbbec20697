pub mod combine;
pub mod serialize;
pub mod state;
pub mod transform;

pub use combine::*;
pub use serialize::*;
pub use state::*;
pub use transform::*;

use crate::error::Result;

/// Bytes of keystream produced per block
pub const BLOCK_SIZE: usize = 64;

/// 32-bit words in the state and in a block
pub const STATE_WORDS: usize = 16;

/// Working state: constants, key, counter, nonce
pub type State = [u32; STATE_WORDS];

/// Output of the block transform
pub type Block = [u32; STATE_WORDS];

/// Serialized block
pub type Keystream = [u8; BLOCK_SIZE];


/// Apply one block of keystream to `chunk`
///
/// Patches the counter into a copy of `base`, runs the transform, serializes,
/// and XORs. Both drivers go through here so their outputs cannot diverge.
pub fn apply_block(base: &State, counter: u32, chunk: &[u8]) -> Result<Vec<u8>> {
    let state = with_counter(base, counter);
    let keystream = serialize(&block_transform(&state));
    combine(chunk, &keystream)
}
