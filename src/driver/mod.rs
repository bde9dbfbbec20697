pub mod parallel;
pub mod sequential;

pub use parallel::*;
pub use sequential::*;

use crate::block::BLOCK_SIZE;

/// One block's slice of the input: `[offset, offset + len)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    /// Block index from the start of the message
    pub index: usize,
    /// Byte offset into the input and output
    pub offset: usize,
    /// 1..=64 bytes, only the last span may be short
    pub len: usize,
}

impl BlockSpan {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// Number of blocks needed for `len` bytes
pub fn block_count(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE)
}

/// Split `len` bytes into disjoint, contiguous block spans
pub fn partition(len: usize) -> Vec<BlockSpan> {
    (0..block_count(len))
        .map(|index| {
            let offset = index * BLOCK_SIZE;
            BlockSpan {
                index,
                offset,
                len: (len - offset).min(BLOCK_SIZE),
            }
        })
        .collect()
}
