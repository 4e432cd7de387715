//! Simon and Speck block ciphers.
//!
//! Both families are two-word Feistel-like networks. A block is stored as
//! `y || x`, each half a little-endian word, and keys are little-endian
//! words with the lowest word first.

use crate::codec::Word;
use cipher::{
    consts::U1, inout::InOut, Block, BlockBackend, BlockSizeUser, ParBlocksSizeUser,
};

pub mod simon;
pub mod speck;
mod variant;

pub use variant::{block_cipher_ctr, BlockCipherVariant};

/// Round function over the two halves of a block.
pub trait WordPairCipher: BlockSizeUser {
    type Word: Word;

    fn encrypt_words(&self, x: &mut Self::Word, y: &mut Self::Word);
    fn decrypt_words(&self, x: &mut Self::Word, y: &mut Self::Word);
}

#[inline(always)]
fn load_pair<W: Word>(block: &[u8]) -> (W, W) {
    let y = W::load_le(&block[..W::BYTES]);
    let x = W::load_le(&block[W::BYTES..2 * W::BYTES]);
    (x, y)
}

#[inline(always)]
fn store_pair<W: Word>(x: W, y: W, block: &mut [u8]) {
    y.store_le(&mut block[..W::BYTES]);
    x.store_le(&mut block[W::BYTES..2 * W::BYTES]);
}

/// Encrypting backend handed to `BlockEncrypt` closures.
pub(crate) struct EncBackend<'a, C>(pub(crate) &'a C);

impl<C: WordPairCipher> BlockSizeUser for EncBackend<'_, C> {
    type BlockSize = C::BlockSize;
}

impl<C: WordPairCipher> ParBlocksSizeUser for EncBackend<'_, C> {
    type ParBlocksSize = U1;
}

impl<C: WordPairCipher> BlockBackend for EncBackend<'_, C> {
    #[inline(always)]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let (mut x, mut y) = load_pair::<C::Word>(block.get_in());
        self.0.encrypt_words(&mut x, &mut y);
        store_pair(x, y, block.get_out());
    }
}

/// Decrypting backend handed to `BlockDecrypt` closures.
pub(crate) struct DecBackend<'a, C>(pub(crate) &'a C);

impl<C: WordPairCipher> BlockSizeUser for DecBackend<'_, C> {
    type BlockSize = C::BlockSize;
}

impl<C: WordPairCipher> ParBlocksSizeUser for DecBackend<'_, C> {
    type ParBlocksSize = U1;
}

impl<C: WordPairCipher> BlockBackend for DecBackend<'_, C> {
    #[inline(always)]
    fn proc_block(&mut self, mut block: InOut<'_, '_, Block<Self>>) {
        let (mut x, mut y) = load_pair::<C::Word>(block.get_in());
        self.0.decrypt_words(&mut x, &mut y);
        store_pair(x, y, block.get_out());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_layout() {
        let block = [0x63, 0x6c, 0x69, 0x6e, 0x67, 0x20, 0x72, 0x6f];
        let (x, y) = load_pair::<u32>(&block);
        assert_eq!(y, 0x6e69_6c63);
        assert_eq!(x, 0x6f72_2067);

        let mut out = [0u8; 8];
        store_pair(x, y, &mut out);
        assert_eq!(out, block);
    }
}
