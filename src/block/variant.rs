use super::{
    simon::{self, Simon},
    speck::{self, Speck},
};
use crate::{
    ctr::Ctr,
    error::{check_key_len, check_nonce_len, Error},
};
use cipher::{
    typenum::{IsLess, Le, NonZero, U256},
    BlockCipher, BlockEncrypt, KeyInit, KeyIvInit, StreamCipher,
};
use core::fmt;

/// Runtime selector over the ten Simon and Speck parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCipherVariant {
    Simon64_96,
    Simon64_128,
    Simon128_128,
    Simon128_192,
    Simon128_256,
    Speck64_96,
    Speck64_128,
    Speck128_128,
    Speck128_192,
    Speck128_256,
}

impl BlockCipherVariant {
    pub const ALL: [Self; 10] = [
        Self::Simon64_96,
        Self::Simon64_128,
        Self::Simon128_128,
        Self::Simon128_192,
        Self::Simon128_256,
        Self::Speck64_96,
        Self::Speck64_128,
        Self::Speck128_128,
        Self::Speck128_192,
        Self::Speck128_256,
    ];

    /// Key length in bytes.
    pub const fn key_len(self) -> usize {
        match self {
            Self::Simon64_96 | Self::Speck64_96 => 12,
            Self::Simon64_128 | Self::Speck64_128 => 16,
            Self::Simon128_128 | Self::Speck128_128 => 16,
            Self::Simon128_192 | Self::Speck128_192 => 24,
            Self::Simon128_256 | Self::Speck128_256 => 32,
        }
    }

    /// Block (and nonce) length in bytes.
    pub const fn block_size(self) -> usize {
        match self {
            Self::Simon64_96 | Self::Simon64_128 | Self::Speck64_96 | Self::Speck64_128 => 8,
            _ => 16,
        }
    }

    pub const fn rounds(self) -> usize {
        use simon::SimonVariant;
        use speck::SpeckVariant;

        match self {
            Self::Simon64_96 => simon::Simon64_96::ROUNDS,
            Self::Simon64_128 => simon::Simon64_128::ROUNDS,
            Self::Simon128_128 => simon::Simon128_128::ROUNDS,
            Self::Simon128_192 => simon::Simon128_192::ROUNDS,
            Self::Simon128_256 => simon::Simon128_256::ROUNDS,
            Self::Speck64_96 => speck::Speck64_96::ROUNDS,
            Self::Speck64_128 => speck::Speck64_128::ROUNDS,
            Self::Speck128_128 => speck::Speck128_128::ROUNDS,
            Self::Speck128_192 => speck::Speck128_192::ROUNDS,
            Self::Speck128_256 => speck::Speck128_256::ROUNDS,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Simon64_96 => "Simon64/96",
            Self::Simon64_128 => "Simon64/128",
            Self::Simon128_128 => "Simon128/128",
            Self::Simon128_192 => "Simon128/192",
            Self::Simon128_256 => "Simon128/256",
            Self::Speck64_96 => "Speck64/96",
            Self::Speck64_128 => "Speck64/128",
            Self::Speck128_128 => "Speck128/128",
            Self::Speck128_192 => "Speck128/192",
            Self::Speck128_256 => "Speck128/256",
        }
    }
}

impl fmt::Display for BlockCipherVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn apply_ctr<B>(nonce: &[u8], key: &[u8], data: &mut [u8]) -> Result<(), Error>
where
    B: BlockEncrypt + BlockCipher + KeyInit,
    B::BlockSize: IsLess<U256>,
    Le<B::BlockSize, U256>: NonZero,
{
    check_key_len(B::key_size(), key)?;
    check_nonce_len(B::block_size(), nonce)?;
    let mut cipher = Ctr::<B>::new_from_slices(key, nonce).map_err(|_| Error::InvalidKeyLength {
        expected: B::key_size(),
        actual: key.len(),
    })?;
    cipher.try_apply_keystream(data)?;
    Ok(())
}

/// Encrypts or decrypts `data` in place with `variant` in counter mode.
///
/// `nonce` must be exactly one block long and `key` exactly
/// [`BlockCipherVariant::key_len`] bytes. The counter starts at zero, so a
/// nonce must never be reused under the same key.
pub fn block_cipher_ctr(
    variant: BlockCipherVariant,
    nonce: &[u8],
    key: &[u8],
    data: &mut [u8],
) -> Result<(), Error> {
    use BlockCipherVariant as V;

    match variant {
        V::Simon64_96 => apply_ctr::<Simon<simon::Simon64_96>>(nonce, key, data),
        V::Simon64_128 => apply_ctr::<Simon<simon::Simon64_128>>(nonce, key, data),
        V::Simon128_128 => apply_ctr::<Simon<simon::Simon128_128>>(nonce, key, data),
        V::Simon128_192 => apply_ctr::<Simon<simon::Simon128_192>>(nonce, key, data),
        V::Simon128_256 => apply_ctr::<Simon<simon::Simon128_256>>(nonce, key, data),
        V::Speck64_96 => apply_ctr::<Speck<speck::Speck64_96>>(nonce, key, data),
        V::Speck64_128 => apply_ctr::<Speck<speck::Speck64_128>>(nonce, key, data),
        V::Speck128_128 => apply_ctr::<Speck<speck::Speck128_128>>(nonce, key, data),
        V::Speck128_192 => apply_ctr::<Speck<speck::Speck128_192>>(nonce, key, data),
        V::Speck128_256 => apply_ctr::<Speck<speck::Speck128_256>>(nonce, key, data),
    }
}
