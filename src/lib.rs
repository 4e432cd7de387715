//! Lightweight symmetric primitives for constrained telemetry links.
//!
//! * Simon and Speck block ciphers (ten variants) with a counter mode driver
//! * Rabbit, Trivium and ChaCha20 stream ciphers
//! * SHA-512
//! * A blocking OS-backed random source for key and IV material (`std` only)
//!
//! Ciphers implement the `cipher` crate traits. Slice-level helpers such as
//! [`block_cipher_ctr`] and [`chacha20()`] check lengths and return [`Error`].
//!
//! ```
//! use light_crypto::{BlockCipherVariant, block_cipher_ctr};
//!
//! let key = [7u8; 16];
//! let nonce = [1u8; 8];
//! let mut msg = *b"position fix 42";
//! block_cipher_ctr(BlockCipherVariant::Speck64_128, &nonce, &key, &mut msg).unwrap();
//! block_cipher_ctr(BlockCipherVariant::Speck64_128, &nonce, &key, &mut msg).unwrap();
//! assert_eq!(&msg, b"position fix 42");
//! ```

#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

pub use cipher; // Re-export cipher crate for downstream users

pub mod block;
pub mod chacha20;
pub mod codec;
pub mod ctr;
pub mod error;
pub mod rabbit;
pub mod sha512;
pub mod trivium;

#[cfg(feature = "std")]
pub mod random;

pub use block::{block_cipher_ctr, BlockCipherVariant};
pub use chacha20::{chacha20, ChaCha20};
pub use ctr::Ctr;
pub use error::Error;
pub use rabbit::{rabbit, Rabbit};
pub use sha512::{sha512, Sha512};
pub use trivium::{trivium_keystream, Trivium};

#[cfg(feature = "std")]
pub use random::{random_bytes, SystemRandom};

use block::{simon, speck, simon::Simon, speck::Speck};

// --- Convenience Type Aliases for Users ---
pub type SimonCipher64_96 = Simon<simon::Simon64_96>;
pub type SimonCipher64_128 = Simon<simon::Simon64_128>;
pub type SimonCipher128_128 = Simon<simon::Simon128_128>;
pub type SimonCipher128_192 = Simon<simon::Simon128_192>;
pub type SimonCipher128_256 = Simon<simon::Simon128_256>;

pub type SpeckCipher64_96 = Speck<speck::Speck64_96>;
pub type SpeckCipher64_128 = Speck<speck::Speck64_128>;
pub type SpeckCipher128_128 = Speck<speck::Speck128_128>;
pub type SpeckCipher128_192 = Speck<speck::Speck128_192>;
pub type SpeckCipher128_256 = Speck<speck::Speck128_256>;

pub type SimonCtr64_96 = Ctr<SimonCipher64_96>;
pub type SimonCtr64_128 = Ctr<SimonCipher64_128>;
pub type SimonCtr128_128 = Ctr<SimonCipher128_128>;
pub type SimonCtr128_192 = Ctr<SimonCipher128_192>;
pub type SimonCtr128_256 = Ctr<SimonCipher128_256>;

pub type SpeckCtr64_96 = Ctr<SpeckCipher64_96>;
pub type SpeckCtr64_128 = Ctr<SpeckCipher64_128>;
pub type SpeckCtr128_128 = Ctr<SpeckCipher128_128>;
pub type SpeckCtr128_192 = Ctr<SpeckCipher128_192>;
pub type SpeckCtr128_256 = Ctr<SpeckCipher128_256>;
