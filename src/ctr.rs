//! Counter mode over any 64- or 128-bit block cipher.
//!
//! Keystream block `i` is `E(nonce ^ be(i))`, where `be(i)` is the counter
//! written big-endian across the full block width. The counter wraps at the
//! block width, so a 64-bit cipher repeats after `2^64` blocks.

use cipher::{
    consts::U1, crypto_common::InnerUser, Block, BlockCipher, BlockEncrypt, BlockSizeUser,
    InnerIvInit, Iv, IvSizeUser, ParBlocksSizeUser, StreamBackend, StreamCipherCore,
    StreamCipherCoreWrapper, StreamCipherSeekCore, StreamClosure, Unsigned,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Widest block the 128-bit counter register can cover.
const MAX_BLOCK_SIZE: usize = 16;

/// Counter-mode core wrapping the block cipher `B`.
#[derive(Clone)]
pub struct CtrCore<B: BlockEncrypt + BlockCipher> {
    cipher: B,
    nonce: Block<B>,
    counter: u128,
}

/// Byte-oriented counter-mode stream cipher.
pub type Ctr<B> = StreamCipherCoreWrapper<CtrCore<B>>;

#[inline(always)]
fn counter_mask(block_size: usize) -> u128 {
    if block_size >= MAX_BLOCK_SIZE {
        u128::MAX
    } else {
        (1u128 << (8 * block_size)) - 1
    }
}

impl<B: BlockEncrypt + BlockCipher> CtrCore<B> {
    /// Returns the underlying block cipher.
    pub fn cipher(&self) -> &B {
        &self.cipher
    }

    /// Writes `nonce ^ counter` into `block`.
    #[inline(always)]
    fn load_counter_block(&self, block: &mut Block<B>) {
        let bs = B::BlockSize::USIZE;
        let ctr = self.counter.to_be_bytes();
        for ((out, n), c) in block
            .iter_mut()
            .zip(self.nonce.iter())
            .zip(&ctr[MAX_BLOCK_SIZE - bs..])
        {
            *out = n ^ c;
        }
    }
}

impl<B: BlockEncrypt + BlockCipher> BlockSizeUser for CtrCore<B> {
    type BlockSize = B::BlockSize;
}

impl<B: BlockEncrypt + BlockCipher> InnerUser for CtrCore<B> {
    type Inner = B;
}

impl<B: BlockEncrypt + BlockCipher> IvSizeUser for CtrCore<B> {
    type IvSize = B::BlockSize;
}

impl<B: BlockEncrypt + BlockCipher> InnerIvInit for CtrCore<B> {
    /// # Panics
    /// If the block size of `B` exceeds 16 bytes.
    fn inner_iv_init(cipher: B, iv: &Iv<Self>) -> Self {
        assert!(
            B::BlockSize::USIZE <= MAX_BLOCK_SIZE,
            "counter mode supports blocks of at most {} bytes",
            MAX_BLOCK_SIZE
        );
        Self {
            cipher,
            nonce: iv.clone(),
            counter: 0,
        }
    }
}

impl<B: BlockEncrypt + BlockCipher> StreamCipherCore for CtrCore<B> {
    #[inline(always)]
    fn remaining_blocks(&self) -> Option<usize> {
        None
    }

    fn process_with_backend(&mut self, f: impl StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut Backend(self));
    }
}

impl<B: BlockEncrypt + BlockCipher> StreamCipherSeekCore for CtrCore<B> {
    type Counter = u128;

    fn get_block_pos(&self) -> u128 {
        self.counter
    }

    fn set_block_pos(&mut self, pos: u128) {
        self.counter = pos & counter_mask(B::BlockSize::USIZE);
    }
}

impl<B: BlockEncrypt + BlockCipher> Drop for CtrCore<B> {
    fn drop(&mut self) {
        self.nonce.zeroize();
        self.counter.zeroize();
    }
}

impl<B: BlockEncrypt + BlockCipher + ZeroizeOnDrop> ZeroizeOnDrop for CtrCore<B> {}

struct Backend<'a, B: BlockEncrypt + BlockCipher>(&'a mut CtrCore<B>);

impl<B: BlockEncrypt + BlockCipher> BlockSizeUser for Backend<'_, B> {
    type BlockSize = B::BlockSize;
}

impl<B: BlockEncrypt + BlockCipher> ParBlocksSizeUser for Backend<'_, B> {
    type ParBlocksSize = U1;
}

impl<B: BlockEncrypt + BlockCipher> StreamBackend for Backend<'_, B> {
    #[inline(always)]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        let state = &mut *self.0;
        state.load_counter_block(block);
        state.cipher.encrypt_block(block);
        state.counter = state.counter.wrapping_add(1) & counter_mask(B::BlockSize::USIZE);
    }
}
