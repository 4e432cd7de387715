//! Trivium stream cipher, 64 keystream bits per step.
//!
//! The 288-bit state is kept as three register pairs `(s0, s1)`, `(s2, s3)`
//! and `(s4, s5)` of little-endian 64-bit words. Each step emits one word and
//! shifts every register by one word.

use crate::codec::le_bytes_to_words;
use cipher::{
    consts::{U10, U8},
    BlockSizeUser, Iv, IvSizeUser, Key, KeyIvInit, KeySizeUser, StreamCipher,
    StreamCipherCore, StreamCipherCoreWrapper, StreamClosure,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

mod soft;

const STATE_BYTES: usize = 48;

/// Warm-up steps discarded after loading key and IV (18 × 64 = 1152 bits).
const WARMUP_STEPS: usize = 18;

/// Register C is all zero except its three final bits.
const C_PATTERN_BYTE: usize = 42;
const C_PATTERN: u8 = 0x0E;

/// Trivium keystream generator.
#[derive(Clone)]
pub struct TriviumCore {
    state: [u64; 6],
}

/// Trivium stream cipher.
pub type Trivium = StreamCipherCoreWrapper<TriviumCore>;

impl TriviumCore {
    /// Computes the next keystream word and shifts the registers.
    #[inline(always)]
    pub(crate) fn step(&mut self) -> u64 {
        let [s0, s1, s2, s3, s4, s5] = self.state;

        let mut t1 = ((s0 << 2) ^ (s1 >> 62)) ^ ((s0 << 29) ^ (s1 >> 35));
        let mut t2 = ((s2 << 5) ^ (s3 >> 59)) ^ ((s2 << 20) ^ (s3 >> 44));
        let mut t3 = ((s4 << 2) ^ (s5 >> 62)) ^ ((s4 << 47) ^ (s5 >> 17));
        let z = t1 ^ t2 ^ t3;

        t1 ^= (((s0 << 27) ^ (s1 >> 37)) & ((s0 << 28) ^ (s1 >> 36))) ^ ((s2 << 14) ^ (s3 >> 50));
        t2 ^= (((s2 << 18) ^ (s3 >> 46)) & ((s2 << 19) ^ (s3 >> 45))) ^ ((s4 << 23) ^ (s5 >> 41));
        t3 ^= (((s4 << 45) ^ (s5 >> 19)) & ((s4 << 46) ^ (s5 >> 18))) ^ ((s0 << 5) ^ (s1 >> 59));

        self.state = [t3, s0, t1, s2, t2, s4];
        z
    }
}

impl KeySizeUser for TriviumCore {
    type KeySize = U10;
}

impl IvSizeUser for TriviumCore {
    type IvSize = U10;
}

impl BlockSizeUser for TriviumCore {
    type BlockSize = U8;
}

impl KeyIvInit for TriviumCore {
    fn new(key: &Key<Self>, iv: &Iv<Self>) -> Self {
        // Each register's leading bits sit in its second word, with the
        // first two key/IV bytes at the top.
        let mut bytes = [0u8; STATE_BYTES];
        bytes[..8].copy_from_slice(&key[2..]);
        bytes[14] = key[0];
        bytes[15] = key[1];
        bytes[16..24].copy_from_slice(&iv[2..]);
        bytes[30] = iv[0];
        bytes[31] = iv[1];
        bytes[C_PATTERN_BYTE] = C_PATTERN;

        let mut state = [0u64; 6];
        le_bytes_to_words(&bytes, &mut state);
        bytes.zeroize();

        let mut inner = Self { state };
        for _ in 0..WARMUP_STEPS {
            inner.step();
        }
        inner
    }
}

impl StreamCipherCore for TriviumCore {
    #[inline(always)]
    fn remaining_blocks(&self) -> Option<usize> {
        None
    }

    fn process_with_backend(&mut self, f: impl StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut soft::Backend(self));
    }
}

impl Drop for TriviumCore {
    fn drop(&mut self) {
        self.state.zeroize();
    }
}

impl ZeroizeOnDrop for TriviumCore {}

/// Writes `out.len()` bytes of Trivium keystream into `out`.
///
/// XOR the result with plaintext to encrypt, or use [`Trivium`] directly.
pub fn trivium_keystream(key: &[u8; 10], iv: &[u8; 10], out: &mut [u8]) {
    out.fill(0);
    let mut cipher = Trivium::new(key.into(), iv.into());
    cipher.apply_keystream(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    // eSTREAM Set 1, vector 0 (all-zero key and IV).
    #[test]
    fn test_zero_key_zero_iv() {
        let mut ks = [0xffu8; 32];
        trivium_keystream(&[0u8; 10], &[0u8; 10], &mut ks);
        assert_eq!(
            hex::encode(ks),
            "fbe0bf265859051b517a2e4e239fc97f563203161907cf2de7a8790fa1b2e9cd"
        );
    }

    #[test]
    fn test_counting_key_and_iv() {
        let key: [u8; 10] = core::array::from_fn(|i| i as u8 + 1);
        let iv: [u8; 10] = core::array::from_fn(|i| 0x80 + i as u8);
        let mut ks = [0u8; 24];
        trivium_keystream(&key, &iv, &mut ks);
        assert_eq!(
            hex::encode(ks),
            "7115e547f6002a9dfe494ad34872c707cf26ee373aba961b"
        );
    }

    #[test]
    fn test_unaligned_lengths_match_keystream_prefix() {
        let key = [0x11u8; 10];
        let iv = [0x22u8; 10];
        let mut full = [0u8; 40];
        trivium_keystream(&key, &iv, &mut full);

        for len in [1usize, 5, 8, 13, 39] {
            let mut part = std::vec![0u8; len];
            trivium_keystream(&key, &iv, &mut part);
            assert_eq!(part[..], full[..len]);
        }

        // Chunked application continues the same stream.
        let mut data = [0u8; 40];
        let mut cipher = Trivium::new(&key.into(), &iv.into());
        for chunk in data.chunks_mut(7) {
            cipher.apply_keystream(chunk);
        }
        assert_eq!(data, full);
    }

    #[test]
    fn test_xor_round_trip() {
        let key = [0x42u8; 10];
        let iv = [0x24u8; 10];
        let msg = *b"telemetry frame 0017: alt=1520m";
        let mut buf = msg;
        Trivium::new(&key.into(), &iv.into()).apply_keystream(&mut buf);
        assert_ne!(buf, msg);
        Trivium::new(&key.into(), &iv.into()).apply_keystream(&mut buf);
        assert_eq!(buf, msg);
    }

    #[test]
    fn test_single_bit_changes_keystream() {
        let mut base = [0u8; 64];
        trivium_keystream(&[0u8; 10], &[0u8; 10], &mut base);
        let mut key = [0u8; 10];
        key[9] = 1;
        let mut by_key = [0u8; 64];
        trivium_keystream(&key, &[0u8; 10], &mut by_key);
        let mut iv = [0u8; 10];
        iv[0] = 0x80;
        let mut by_iv = [0u8; 64];
        trivium_keystream(&[0u8; 10], &iv, &mut by_iv);

        let same_k = base.iter().zip(&by_key).filter(|(a, b)| a == b).count();
        let same_v = base.iter().zip(&by_iv).filter(|(a, b)| a == b).count();
        assert!(same_k < 8);
        assert!(same_v < 8);
    }
}
