use super::{Block, State};

/// Double rounds per block (20 rounds)
pub const DOUBLE_ROUNDS: usize = 10;

/// Index groups of the column round
const COLUMNS: [[usize; 4]; 4] = [[0, 4, 8, 12], [1, 5, 9, 13], [2, 6, 10, 14], [3, 7, 11, 15]];

/// Index groups of the diagonal round
const DIAGONALS: [[usize; 4]; 4] = [[0, 5, 10, 15], [1, 6, 11, 12], [2, 7, 8, 13], [3, 4, 9, 14]];

/// The add-rotate-xor primitive on four words
#[inline]
pub fn quarter_round(mut a: u32, mut b: u32, mut c: u32, mut d: u32) -> (u32, u32, u32, u32) {
    a = a.wrapping_add(b);
    d ^= a;
    d = d.rotate_left(16);

    c = c.wrapping_add(d);
    b ^= c;
    b = b.rotate_left(12);

    a = a.wrapping_add(b);
    d ^= a;
    d = d.rotate_left(8);

    c = c.wrapping_add(d);
    b ^= c;
    b = b.rotate_left(7);

    (a, b, c, d)
}

/// Run a quarter round on four state words in place
#[inline]
pub fn quarter_round_on_state(state: &mut State, i0: usize, i1: usize, i2: usize, i3: usize) {
    let (a, b, c, d) = quarter_round(state[i0], state[i1], state[i2], state[i3]);
    state[i0] = a;
    state[i1] = b;
    state[i2] = c;
    state[i3] = d;
}

/// One column round followed by one diagonal round
#[inline]
pub fn double_round(state: &mut State) {
    for [a, b, c, d] in COLUMNS.into_iter().chain(DIAGONALS) {
        quarter_round_on_state(state, a, b, c, d);
    }
}

/// ChaCha20 block function
///
/// Runs the rounds on a copy of `state`, then adds the original state back in
/// word by word. The input is left untouched, so the same state always yields
/// the same block.
pub fn block_transform(state: &State) -> Block {
    let mut working = *state;
    for _ in 0..DOUBLE_ROUNDS {
        double_round(&mut working);
    }

    for (w, s) in working.iter_mut().zip(state.iter()) {
        *w = w.wrapping_add(*s);
    }
    working
}
