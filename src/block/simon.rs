//! Simon: AND-rotate Feistel network with an LFSR-derived key schedule.

use super::{DecBackend, EncBackend, WordPairCipher};
use crate::codec::{le_bytes_to_words, Word};
use cipher::{
    consts::{U12, U16, U24, U32, U8},
    AlgorithmName, ArrayLength, BlockCipher, BlockClosure, BlockDecrypt, BlockEncrypt,
    BlockSizeUser, Key, KeyInit, KeySizeUser,
};
use core::{fmt, marker::PhantomData};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Largest round count across the Simon parameter sets.
const MAX_ROUNDS: usize = 72;

// Round-constant sequences, read least significant bit first.
const Z2: u64 = 0x7369_f885_192c_0ef5;
const Z3: u64 = 0xfc2c_e512_07a6_35db;
const Z4: u64 = 0xfdc9_4c3a_046d_678b;

/// Parameter set of one Simon instance.
pub trait SimonVariant: 'static {
    type Word: Word;
    type BlockSize: ArrayLength<u8> + 'static;
    type KeySize: ArrayLength<u8> + 'static;
    /// Number of key words (`m`).
    const KEY_WORDS: usize;
    const ROUNDS: usize;
    /// Round-constant sequence `z_j`.
    const Z: u64;
    const NAME: &'static str;
}

macro_rules! simon_variant {
    ($name:ident, $word:ty, $bs:ty, $ks:ty, $m:expr, $rounds:expr, $z:expr, $label:expr) => {
        #[doc = concat!($label, " parameter set.")]
        #[derive(Clone, Copy, Debug)]
        pub struct $name;

        impl SimonVariant for $name {
            type Word = $word;
            type BlockSize = $bs;
            type KeySize = $ks;
            const KEY_WORDS: usize = $m;
            const ROUNDS: usize = $rounds;
            const Z: u64 = $z;
            const NAME: &'static str = $label;
        }
    };
}

simon_variant!(Simon64_96, u32, U8, U12, 3, 42, Z2, "Simon64/96");
simon_variant!(Simon64_128, u32, U8, U16, 4, 44, Z3, "Simon64/128");
simon_variant!(Simon128_128, u64, U16, U16, 2, 68, Z2, "Simon128/128");
simon_variant!(Simon128_192, u64, U16, U24, 3, 69, Z3, "Simon128/192");
simon_variant!(Simon128_256, u64, U16, U32, 4, 72, Z4, "Simon128/256");

/// Simon block cipher keyed with an expanded round-key schedule.
pub struct Simon<V: SimonVariant> {
    round_keys: [V::Word; MAX_ROUNDS],
    _variant: PhantomData<V>,
}

#[inline(always)]
fn f<W: Word>(x: W) -> W {
    (x.rotl(1) & x.rotl(8)) ^ x.rotl(2)
}

impl<V: SimonVariant> Simon<V> {
    fn expand_key(key: &[u8]) -> [V::Word; MAX_ROUNDS] {
        let m = V::KEY_WORDS;
        let mut rk = [V::Word::default(); MAX_ROUNDS];
        le_bytes_to_words(key, &mut rk[..m]);

        let c = !V::Word::from_u64(3);
        for i in m..V::ROUNDS {
            let mut t = rk[i - 1].rotr(3);
            if m == 4 {
                t = t ^ rk[i - 3];
            }
            t = t ^ t.rotr(1);
            let z = V::Word::from_u64((V::Z >> ((i - m) % 62)) & 1);
            rk[i] = c ^ z ^ rk[i - m] ^ t;
        }
        rk
    }

    #[inline(always)]
    fn keys(&self) -> &[V::Word] {
        &self.round_keys[..V::ROUNDS]
    }
}

impl<V: SimonVariant> WordPairCipher for Simon<V> {
    type Word = V::Word;

    fn encrypt_words(&self, x: &mut V::Word, y: &mut V::Word) {
        let mut pairs = self.keys().chunks_exact(2);
        for k in &mut pairs {
            *y = *y ^ f(*x) ^ k[0];
            *x = *x ^ f(*y) ^ k[1];
        }
        // Odd round counts finish with a single swapping round.
        if let [k] = pairs.remainder() {
            let t = *x;
            *x = *y ^ f(*x) ^ *k;
            *y = t;
        }
    }

    fn decrypt_words(&self, x: &mut V::Word, y: &mut V::Word) {
        let pairs = self.keys().chunks_exact(2);
        if let [k] = pairs.remainder() {
            let t = *y;
            *y = *x ^ f(*y) ^ *k;
            *x = t;
        }
        for k in pairs.rev() {
            *x = *x ^ f(*y) ^ k[1];
            *y = *y ^ f(*x) ^ k[0];
        }
    }
}

impl<V: SimonVariant> KeySizeUser for Simon<V> {
    type KeySize = V::KeySize;
}

impl<V: SimonVariant> BlockSizeUser for Simon<V> {
    type BlockSize = V::BlockSize;
}

impl<V: SimonVariant> BlockCipher for Simon<V> {}

impl<V: SimonVariant> KeyInit for Simon<V> {
    fn new(key: &Key<Self>) -> Self {
        Self {
            round_keys: Self::expand_key(key),
            _variant: PhantomData,
        }
    }
}

impl<V: SimonVariant> BlockEncrypt for Simon<V> {
    fn encrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut EncBackend(self))
    }
}

impl<V: SimonVariant> BlockDecrypt for Simon<V> {
    fn decrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut DecBackend(self))
    }
}

impl<V: SimonVariant> Clone for Simon<V> {
    fn clone(&self) -> Self {
        Self {
            round_keys: self.round_keys,
            _variant: PhantomData,
        }
    }
}

impl<V: SimonVariant> AlgorithmName for Simon<V> {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(V::NAME)
    }
}

impl<V: SimonVariant> fmt::Debug for Simon<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ... }}", V::NAME)
    }
}

impl<V: SimonVariant> Drop for Simon<V> {
    fn drop(&mut self) {
        self.round_keys.zeroize();
    }
}

impl<V: SimonVariant> ZeroizeOnDrop for Simon<V> {}
