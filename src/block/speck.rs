//! Speck: add-rotate-xor network whose key schedule reuses the round function.

use super::{DecBackend, EncBackend, WordPairCipher};
use crate::codec::{le_bytes_to_words, Word};
use cipher::{
    consts::{U12, U16, U24, U32, U8},
    AlgorithmName, ArrayLength, BlockCipher, BlockClosure, BlockDecrypt, BlockEncrypt,
    BlockSizeUser, Key, KeyInit, KeySizeUser,
};
use core::{fmt, marker::PhantomData};
use zeroize::{Zeroize, ZeroizeOnDrop};

const MAX_ROUNDS: usize = 34;
const ALPHA: u32 = 8;
const BETA: u32 = 3;

/// Parameter set of one Speck instance.
pub trait SpeckVariant: 'static {
    type Word: Word;
    type BlockSize: ArrayLength<u8> + 'static;
    type KeySize: ArrayLength<u8> + 'static;
    const KEY_WORDS: usize;
    const ROUNDS: usize;
    const NAME: &'static str;
}

macro_rules! speck_variant {
    ($name:ident, $word:ty, $bs:ty, $ks:ty, $m:expr, $rounds:expr, $label:expr) => {
        #[doc = concat!($label, " parameter set.")]
        #[derive(Clone, Copy, Debug)]
        pub struct $name;

        impl SpeckVariant for $name {
            type Word = $word;
            type BlockSize = $bs;
            type KeySize = $ks;
            const KEY_WORDS: usize = $m;
            const ROUNDS: usize = $rounds;
            const NAME: &'static str = $label;
        }
    };
}

speck_variant!(Speck64_96, u32, U8, U12, 3, 26, "Speck64/96");
speck_variant!(Speck64_128, u32, U8, U16, 4, 27, "Speck64/128");
speck_variant!(Speck128_128, u64, U16, U16, 2, 32, "Speck128/128");
speck_variant!(Speck128_192, u64, U16, U24, 3, 33, "Speck128/192");
speck_variant!(Speck128_256, u64, U16, U32, 4, 34, "Speck128/256");

/// Speck block cipher keyed with an expanded round-key schedule.
pub struct Speck<V: SpeckVariant> {
    round_keys: [V::Word; MAX_ROUNDS],
    _variant: PhantomData<V>,
}

impl<V: SpeckVariant> Speck<V> {
    fn expand_key(key: &[u8]) -> [V::Word; MAX_ROUNDS] {
        let m = V::KEY_WORDS;
        let mut k = [V::Word::default(); 4];
        le_bytes_to_words(key, &mut k[..m]);

        // `l` is a ring of the m - 1 words not yet folded into `a`.
        let mut a = k[0];
        let mut l = [V::Word::default(); 3];
        l[..m - 1].copy_from_slice(&k[1..m]);

        let mut rk = [V::Word::default(); MAX_ROUNDS];
        for (i, slot) in rk[..V::ROUNDS].iter_mut().enumerate() {
            *slot = a;
            let j = i % (m - 1);
            l[j] = l[j].rotr(ALPHA).wadd(a) ^ V::Word::from_u64(i as u64);
            a = a.rotl(BETA) ^ l[j];
        }

        k.zeroize();
        l.zeroize();
        a.zeroize();
        rk
    }

    #[inline(always)]
    fn keys(&self) -> &[V::Word] {
        &self.round_keys[..V::ROUNDS]
    }
}

impl<V: SpeckVariant> WordPairCipher for Speck<V> {
    type Word = V::Word;

    fn encrypt_words(&self, x: &mut V::Word, y: &mut V::Word) {
        for &k in self.keys() {
            *x = x.rotr(ALPHA).wadd(*y) ^ k;
            *y = y.rotl(BETA) ^ *x;
        }
    }

    fn decrypt_words(&self, x: &mut V::Word, y: &mut V::Word) {
        for &k in self.keys().iter().rev() {
            *y = (*y ^ *x).rotr(BETA);
            *x = (*x ^ k).wsub(*y).rotl(ALPHA);
        }
    }
}

impl<V: SpeckVariant> KeySizeUser for Speck<V> {
    type KeySize = V::KeySize;
}

impl<V: SpeckVariant> BlockSizeUser for Speck<V> {
    type BlockSize = V::BlockSize;
}

impl<V: SpeckVariant> BlockCipher for Speck<V> {}

impl<V: SpeckVariant> KeyInit for Speck<V> {
    fn new(key: &Key<Self>) -> Self {
        Self {
            round_keys: Self::expand_key(key),
            _variant: PhantomData,
        }
    }
}

impl<V: SpeckVariant> BlockEncrypt for Speck<V> {
    fn encrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut EncBackend(self))
    }
}

impl<V: SpeckVariant> BlockDecrypt for Speck<V> {
    fn decrypt_with_backend(&self, f: impl BlockClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut DecBackend(self))
    }
}

impl<V: SpeckVariant> Clone for Speck<V> {
    fn clone(&self) -> Self {
        Self {
            round_keys: self.round_keys,
            _variant: PhantomData,
        }
    }
}

impl<V: SpeckVariant> AlgorithmName for Speck<V> {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(V::NAME)
    }
}

impl<V: SpeckVariant> fmt::Debug for Speck<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{ ... }}", V::NAME)
    }
}

impl<V: SpeckVariant> Drop for Speck<V> {
    fn drop(&mut self) {
        self.round_keys.zeroize();
    }
}

impl<V: SpeckVariant> ZeroizeOnDrop for Speck<V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use cipher::generic_array::GenericArray;

    fn check<V: SpeckVariant>(key: &str, pt: &str, ct: &str) {
        let key = hex::decode(key).unwrap();
        let pt = hex::decode(pt).unwrap();
        let ct = hex::decode(ct).unwrap();

        let cipher = Speck::<V>::new_from_slice(&key).unwrap();
        let mut block = GenericArray::clone_from_slice(&pt);
        cipher.encrypt_block(&mut block);
        assert_eq!(block.as_slice(), ct.as_slice(), "{} encrypt", V::NAME);
        cipher.decrypt_block(&mut block);
        assert_eq!(block.as_slice(), pt.as_slice(), "{} decrypt", V::NAME);
    }

    #[test]
    fn test_speck64_96_vector() {
        check::<Speck64_96>("0001020308090a0b10111213", "65616e7320466174", "6c947541ec52799f");
    }

    #[test]
    fn test_speck64_128_vector() {
        check::<Speck64_128>(
            "0001020308090a0b1011121318191a1b",
            "2d4375747465723b",
            "8b024e4548a56f8c",
        );
    }

    #[test]
    fn test_speck128_128_vector() {
        check::<Speck128_128>(
            "000102030405060708090a0b0c0d0e0f",
            "206d616465206974206571756976616c",
            "180d575cdffe60786532787951985da6",
        );
    }

    #[test]
    fn test_speck128_192_vector() {
        check::<Speck128_192>(
            "000102030405060708090a0b0c0d0e0f1011121314151617",
            "656e7420746f20436869656620486172",
            "86183ce05d18bcf9665513133acfe41b",
        );
    }

    #[test]
    fn test_speck128_256_vector() {
        check::<Speck128_256>(
            "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
            "706f6f6e65722e20496e2074686f7365",
            "438f189c8db4ee4e3ef5c00504010941",
        );
    }

    #[test]
    fn test_first_round_key_is_first_key_word() {
        let key: [u8; 16] = core::array::from_fn(|i| i as u8);
        let cipher = Speck::<Speck128_128>::new_from_slice(&key).unwrap();
        assert_eq!(cipher.round_keys[0], 0x0706_0504_0302_0100);
        assert!(cipher.round_keys[32..].iter().all(|&w| w == 0));
    }
}
