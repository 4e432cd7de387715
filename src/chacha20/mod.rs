//! ChaCha20 as specified in RFC 7539: 256-bit key, 96-bit nonce and a
//! 32-bit block counter.

use crate::{codec::le_bytes_to_words, error::Error};
use cipher::{
    consts::{U12, U32, U64},
    BlockSizeUser, Iv, IvSizeUser, Key, KeyIvInit, KeySizeUser, StreamCipher,
    StreamCipherCore, StreamCipherCoreWrapper, StreamCipherSeekCore, StreamClosure,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

mod soft;

pub(crate) const STATE_WORDS: usize = 16;

/// "expand 32-byte k"
const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

pub(crate) const COUNTER_WORD: usize = 12;

/// The ChaCha20 block function state.
#[derive(Clone)]
pub struct ChaCha20Core {
    pub(crate) state: [u32; STATE_WORDS],
    /// Set once the block at counter `u32::MAX` has been produced.
    pub(crate) exhausted: bool,
}

/// ChaCha20 stream cipher.
pub type ChaCha20 = StreamCipherCoreWrapper<ChaCha20Core>;

impl KeySizeUser for ChaCha20Core {
    type KeySize = U32;
}

impl IvSizeUser for ChaCha20Core {
    type IvSize = U12;
}

impl BlockSizeUser for ChaCha20Core {
    type BlockSize = U64;
}

impl KeyIvInit for ChaCha20Core {
    fn new(key: &Key<Self>, iv: &Iv<Self>) -> Self {
        let mut state = [0u32; STATE_WORDS];
        state[..4].copy_from_slice(&CONSTANTS);
        le_bytes_to_words(key, &mut state[4..12]);
        le_bytes_to_words(iv, &mut state[13..16]);
        Self {
            state,
            exhausted: false,
        }
    }
}

impl StreamCipherCore for ChaCha20Core {
    #[inline(always)]
    fn remaining_blocks(&self) -> Option<usize> {
        if self.exhausted {
            return Some(0);
        }
        // The block at `u32::MAX` itself is still usable.
        let rem = usize::try_from(u32::MAX - self.get_block_pos())
            .ok()
            .and_then(|r| r.checked_add(1))
            .unwrap_or(usize::MAX);
        Some(rem)
    }

    fn process_with_backend(&mut self, f: impl StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut soft::Backend(self));
    }
}

impl StreamCipherSeekCore for ChaCha20Core {
    type Counter = u32;

    #[inline(always)]
    fn get_block_pos(&self) -> u32 {
        self.state[COUNTER_WORD]
    }

    #[inline(always)]
    fn set_block_pos(&mut self, pos: u32) {
        self.state[COUNTER_WORD] = pos;
        self.exhausted = false;
    }
}

impl Drop for ChaCha20Core {
    fn drop(&mut self) {
        self.state.zeroize();
        self.exhausted.zeroize();
    }
}

impl ZeroizeOnDrop for ChaCha20Core {}

/// Applies the ChaCha20 keystream starting at block `counter` to `data`.
///
/// Fails with [`Error::KeystreamExhausted`] when `data` would need more
/// blocks than the 32-bit counter has left.
pub fn chacha20(
    key: &[u8; 32],
    counter: u32,
    nonce: &[u8; 12],
    data: &mut [u8],
) -> Result<(), Error> {
    let mut inner = ChaCha20Core::new(key.into(), nonce.into());
    inner.set_block_pos(counter);
    let mut cipher = ChaCha20::from_core(inner);
    cipher.try_apply_keystream(data)?;
    Ok(())
}
