use super::{Block, Keystream};

/// Serialize a block to keystream, each word least significant byte first
pub fn serialize(block: &Block) -> Keystream {
    let mut out = [0u8; 64];
    for (chunk, word) in out.chunks_exact_mut(4).zip(block.iter()) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}
