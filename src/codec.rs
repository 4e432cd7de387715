//! Fixed-width packing between byte slices and 32/64-bit words.
//!
//! Cipher words are little-endian; SHA-512 words are big-endian. Every
//! conversion copies and checks lengths up front, so a mis-sized buffer
//! panics instead of reading past its end.

use core::ops::{BitAnd, BitXor, Not};
use zeroize::Zeroize;

/// A machine word the block ciphers and hash are built from.
pub trait Word:
    Copy
    + Default
    + Eq
    + core::fmt::Debug
    + Zeroize
    + BitXor<Output = Self>
    + BitAnd<Output = Self>
    + Not<Output = Self>
{
    /// Width in bytes.
    const BYTES: usize;

    fn rotl(self, n: u32) -> Self;
    fn rotr(self, n: u32) -> Self;
    fn wadd(self, rhs: Self) -> Self;
    fn wsub(self, rhs: Self) -> Self;

    /// Truncating conversion, used for round indices and constant bits.
    fn from_u64(v: u64) -> Self;

    /// Reads one word from exactly `Self::BYTES` bytes.
    fn load_le(bytes: &[u8]) -> Self;
    fn load_be(bytes: &[u8]) -> Self;

    /// Writes one word into exactly `Self::BYTES` bytes.
    fn store_le(self, bytes: &mut [u8]);
    fn store_be(self, bytes: &mut [u8]);
}

macro_rules! impl_word {
    ($($t:ty),*) => {
        $(
            impl Word for $t {
                const BYTES: usize = core::mem::size_of::<$t>();

                #[inline(always)]
                fn rotl(self, n: u32) -> Self {
                    self.rotate_left(n)
                }

                #[inline(always)]
                fn rotr(self, n: u32) -> Self {
                    self.rotate_right(n)
                }

                #[inline(always)]
                fn wadd(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                #[inline(always)]
                fn wsub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                #[inline(always)]
                fn from_u64(v: u64) -> Self {
                    v as $t
                }

                #[inline(always)]
                fn load_le(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; core::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_le_bytes(buf)
                }

                #[inline(always)]
                fn load_be(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; core::mem::size_of::<$t>()];
                    buf.copy_from_slice(bytes);
                    <$t>::from_be_bytes(buf)
                }

                #[inline(always)]
                fn store_le(self, bytes: &mut [u8]) {
                    bytes.copy_from_slice(&self.to_le_bytes());
                }

                #[inline(always)]
                fn store_be(self, bytes: &mut [u8]) {
                    bytes.copy_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

impl_word!(u32, u64);

#[inline]
fn check_len<W: Word>(bytes: usize, words: usize) {
    assert!(
        bytes == words * W::BYTES,
        "codec length mismatch: {} bytes for {} words of {} bytes",
        bytes,
        words,
        W::BYTES
    );
}

/// Unpacks little-endian words.
///
/// # Panics
/// If `bytes.len() != words.len() * W::BYTES`.
pub fn le_bytes_to_words<W: Word>(bytes: &[u8], words: &mut [W]) {
    check_len::<W>(bytes.len(), words.len());
    for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(W::BYTES)) {
        *w = W::load_le(chunk);
    }
}

/// Packs words as little-endian bytes.
///
/// # Panics
/// If `bytes.len() != words.len() * W::BYTES`.
pub fn words_to_le_bytes<W: Word>(words: &[W], bytes: &mut [u8]) {
    check_len::<W>(bytes.len(), words.len());
    for (w, chunk) in words.iter().zip(bytes.chunks_exact_mut(W::BYTES)) {
        w.store_le(chunk);
    }
}

/// Unpacks big-endian words.
///
/// # Panics
/// If `bytes.len() != words.len() * W::BYTES`.
pub fn be_bytes_to_words<W: Word>(bytes: &[u8], words: &mut [W]) {
    check_len::<W>(bytes.len(), words.len());
    for (w, chunk) in words.iter_mut().zip(bytes.chunks_exact(W::BYTES)) {
        *w = W::load_be(chunk);
    }
}

/// Packs words as big-endian bytes.
///
/// # Panics
/// If `bytes.len() != words.len() * W::BYTES`.
pub fn words_to_be_bytes<W: Word>(words: &[W], bytes: &mut [u8]) {
    check_len::<W>(bytes.len(), words.len());
    for (w, chunk) in words.iter().zip(bytes.chunks_exact_mut(W::BYTES)) {
        w.store_be(chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_le_word_order() {
        let bytes = [0x00, 0x01, 0x02, 0x03, 0x08, 0x09, 0x0a, 0x0b];
        let mut words = [0u32; 2];
        le_bytes_to_words(&bytes, &mut words);
        assert_eq!(words, [0x0302_0100, 0x0b0a_0908]);

        let mut wide = [0u64; 1];
        le_bytes_to_words(&bytes, &mut wide);
        assert_eq!(wide, [0x0b0a_0908_0302_0100]);
    }

    #[test]
    fn test_be_word_order() {
        let bytes = [0x6a, 0x09, 0xe6, 0x67, 0xf3, 0xbc, 0xc9, 0x08];
        let mut words = [0u64; 1];
        be_bytes_to_words(&bytes, &mut words);
        assert_eq!(words, [0x6a09_e667_f3bc_c908]);
    }

    #[test]
    fn test_round_trip_is_identity() {
        let bytes: [u8; 48] = core::array::from_fn(|i| (i * 37 + 5) as u8);

        let mut w32 = [0u32; 12];
        let mut out = [0u8; 48];
        le_bytes_to_words(&bytes, &mut w32);
        words_to_le_bytes(&w32, &mut out);
        assert_eq!(out, bytes);

        let mut w64 = [0u64; 6];
        be_bytes_to_words(&bytes, &mut w64);
        words_to_be_bytes(&w64, &mut out);
        assert_eq!(out, bytes);
    }

    #[test]
    #[should_panic(expected = "codec length mismatch")]
    fn test_undersized_buffer_panics() {
        let mut words = [0u64; 2];
        le_bytes_to_words(&[0u8; 15], &mut words);
    }

    #[test]
    fn test_word_helpers() {
        assert_eq!(0x8000_0001u32.rotl(1), 0x0000_0003);
        assert_eq!(0x8000_0001u32.rotr(1), 0xc000_0000);
        assert_eq!(u64::MAX.wadd(2), 1);
        assert_eq!(0u32.wsub(1), u32::MAX);
        assert_eq!(<u32 as Word>::from_u64(0x1_0000_0005), 5);
    }
}
