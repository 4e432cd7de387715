use super::{ChaCha20Core, COUNTER_WORD, STATE_WORDS};
use crate::codec::words_to_le_bytes;
use cipher::{consts::U64, Block, BlockSizeUser, ParBlocksSizeUser, StreamBackend};

const DOUBLE_ROUNDS: usize = 10;

/// The software backend for ChaCha20.
pub(crate) struct Backend<'a>(pub(crate) &'a mut ChaCha20Core);

impl BlockSizeUser for Backend<'_> {
    type BlockSize = U64;
}

impl ParBlocksSizeUser for Backend<'_> {
    type ParBlocksSize = cipher::consts::U1;
}

impl StreamBackend for Backend<'_> {
    #[inline(always)]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        let inner = &mut *self.0;
        let res = block_function(&inner.state);
        let (next, wrapped) = inner.state[COUNTER_WORD].overflowing_add(1);
        inner.state[COUNTER_WORD] = next;
        inner.exhausted = wrapped;
        words_to_le_bytes(&res, block);
    }
}

/// Twenty rounds over a copy of `state`, then the feed-forward addition.
#[inline(always)]
pub(crate) fn block_function(state: &[u32; STATE_WORDS]) -> [u32; STATE_WORDS] {
    let mut x = *state;
    for _ in 0..DOUBLE_ROUNDS {
        // column rounds
        quarter_round(0, 4, 8, 12, &mut x);
        quarter_round(1, 5, 9, 13, &mut x);
        quarter_round(2, 6, 10, 14, &mut x);
        quarter_round(3, 7, 11, 15, &mut x);

        // diagonal rounds
        quarter_round(0, 5, 10, 15, &mut x);
        quarter_round(1, 6, 11, 12, &mut x);
        quarter_round(2, 7, 8, 13, &mut x);
        quarter_round(3, 4, 9, 14, &mut x);
    }

    for (s1, s0) in x.iter_mut().zip(state.iter()) {
        *s1 = s1.wrapping_add(*s0);
    }
    x
}

#[inline(always)]
fn quarter_round(a: usize, b: usize, c: usize, d: usize, state: &mut [u32; STATE_WORDS]) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}
