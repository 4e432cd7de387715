//! Rabbit stream cipher (RFC 4503).
//!
//! Key setup produces a master state. IV setup derives a fresh working
//! state from the master, so one keyed core can be re-used across IVs
//! without repeating the key schedule.

use crate::codec::le_bytes_to_words;
use cipher::{
    consts::{U16, U8},
    BlockSizeUser, Iv, IvSizeUser, Key, KeyIvInit, KeySizeUser, StreamCipher,
    StreamCipherCore, StreamCipherCoreWrapper, StreamClosure,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

mod soft;

/// Counter increments, repeating `0x4D34D34D, 0xD34D34D3, 0x34D34D34`.
const A: [u32; 8] = [
    0x4D34_D34D, 0xD34D_34D3, 0x34D3_4D34, 0x4D34_D34D,
    0xD34D_34D3, 0x34D3_4D34, 0x4D34_D34D, 0xD34D_34D3,
];

/// One Rabbit instance: state words, counters and the counter carry bit.
#[derive(Clone, Default, Zeroize)]
pub(crate) struct State {
    pub(crate) x: [u32; 8],
    pub(crate) c: [u32; 8],
    pub(crate) carry: u32,
}

#[inline(always)]
fn g(u: u32, v: u32) -> u32 {
    let sum = u.wrapping_add(v) as u64;
    let sq = sum * sum;
    (sq ^ (sq >> 32)) as u32
}

impl State {
    /// Advances the counters and applies one round of the next-state function.
    pub(crate) fn next_state(&mut self) {
        for (c, a) in self.c.iter_mut().zip(A) {
            let t = *c as u64 + a as u64 + self.carry as u64;
            *c = t as u32;
            self.carry = (t >> 32) as u32;
        }

        let mut gv = [0u32; 8];
        for (i, g_i) in gv.iter_mut().enumerate() {
            *g_i = g(self.x[i], self.c[i]);
        }

        let x = &mut self.x;
        x[0] = gv[0].wrapping_add(gv[7].rotate_left(16)).wrapping_add(gv[6].rotate_left(16));
        x[1] = gv[1].wrapping_add(gv[0].rotate_left(8)).wrapping_add(gv[7]);
        x[2] = gv[2].wrapping_add(gv[1].rotate_left(16)).wrapping_add(gv[0].rotate_left(16));
        x[3] = gv[3].wrapping_add(gv[2].rotate_left(8)).wrapping_add(gv[1]);
        x[4] = gv[4].wrapping_add(gv[3].rotate_left(16)).wrapping_add(gv[2].rotate_left(16));
        x[5] = gv[5].wrapping_add(gv[4].rotate_left(8)).wrapping_add(gv[3]);
        x[6] = gv[6].wrapping_add(gv[5].rotate_left(16)).wrapping_add(gv[4].rotate_left(16));
        x[7] = gv[7].wrapping_add(gv[6].rotate_left(8)).wrapping_add(gv[5]);

        gv.zeroize();
    }

    /// Extracts 128 bits of output from the current state.
    #[inline(always)]
    pub(crate) fn extract(&self) -> [u32; 4] {
        let x = &self.x;
        [
            x[0] ^ (x[5] >> 16) ^ (x[3] << 16),
            x[2] ^ (x[7] >> 16) ^ (x[5] << 16),
            x[4] ^ (x[1] >> 16) ^ (x[7] << 16),
            x[6] ^ (x[3] >> 16) ^ (x[1] << 16),
        ]
    }
}

/// Rabbit keystream generator holding both the master and working state.
#[derive(Clone)]
pub struct RabbitCore {
    master: State,
    pub(crate) work: State,
}

/// Rabbit stream cipher.
pub type Rabbit = StreamCipherCoreWrapper<RabbitCore>;

impl RabbitCore {
    /// Runs the key schedule only. The working state equals the master
    /// state, which is Rabbit's IV-less mode.
    pub fn from_key(key: &Key<Self>) -> Self {
        let mut k = [0u32; 4];
        le_bytes_to_words(key, &mut k);

        let mut master = State {
            x: [
                k[0],
                (k[3] << 16) | (k[2] >> 16),
                k[1],
                (k[0] << 16) | (k[3] >> 16),
                k[2],
                (k[1] << 16) | (k[0] >> 16),
                k[3],
                (k[2] << 16) | (k[1] >> 16),
            ],
            c: [
                k[2].rotate_left(16),
                (k[0] & 0xFFFF_0000) | (k[1] & 0xFFFF),
                k[3].rotate_left(16),
                (k[1] & 0xFFFF_0000) | (k[2] & 0xFFFF),
                k[0].rotate_left(16),
                (k[2] & 0xFFFF_0000) | (k[3] & 0xFFFF),
                k[1].rotate_left(16),
                (k[3] & 0xFFFF_0000) | (k[0] & 0xFFFF),
            ],
            carry: 0,
        };
        k.zeroize();

        for _ in 0..4 {
            master.next_state();
        }
        for i in 0..8 {
            master.c[(i + 4) & 7] ^= master.x[i];
        }

        Self {
            work: master.clone(),
            master,
        }
    }

    /// Re-derives the working state from the master state and `iv`,
    /// restarting the keystream.
    pub fn set_iv(&mut self, iv: &Iv<Self>) {
        let mut v = [0u32; 2];
        le_bytes_to_words(iv, &mut v);
        let (i0, i2) = (v[0], v[1]);
        let mut i = [i0, (i0 >> 16) | (i2 & 0xFFFF_0000), i2, (i2 << 16) | (i0 & 0xFFFF)];
        v.zeroize();

        self.work.x = self.master.x;
        self.work.carry = self.master.carry;
        for (j, (w, m)) in self.work.c.iter_mut().zip(self.master.c).enumerate() {
            *w = m ^ i[j & 3];
        }
        i.zeroize();

        for _ in 0..4 {
            self.work.next_state();
        }
    }
}

impl KeySizeUser for RabbitCore {
    type KeySize = U16;
}

impl IvSizeUser for RabbitCore {
    type IvSize = U8;
}

impl BlockSizeUser for RabbitCore {
    type BlockSize = U16;
}

impl KeyIvInit for RabbitCore {
    fn new(key: &Key<Self>, iv: &Iv<Self>) -> Self {
        let mut inner = Self::from_key(key);
        inner.set_iv(iv);
        inner
    }
}

impl StreamCipherCore for RabbitCore {
    #[inline(always)]
    fn remaining_blocks(&self) -> Option<usize> {
        None
    }

    fn process_with_backend(&mut self, f: impl StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut soft::Backend(self));
    }
}

impl Drop for RabbitCore {
    fn drop(&mut self) {
        self.master.zeroize();
        self.work.zeroize();
    }
}

impl ZeroizeOnDrop for RabbitCore {}

/// Encrypts or decrypts `data` in place with Rabbit under `key` and `iv`.
///
/// Any length is accepted; the final block's keystream is truncated.
pub fn rabbit(iv: &[u8; 8], key: &[u8; 16], data: &mut [u8]) {
    let mut cipher = Rabbit::new(key.into(), iv.into());
    cipher.apply_keystream(data);
}
