use super::TriviumCore;
use cipher::{
    consts::{U1, U8},
    Block, BlockSizeUser, ParBlocksSizeUser, StreamBackend,
};

/// The software backend for Trivium.
pub(crate) struct Backend<'a>(pub(crate) &'a mut TriviumCore);

impl BlockSizeUser for Backend<'_> {
    type BlockSize = U8;
}

impl ParBlocksSizeUser for Backend<'_> {
    type ParBlocksSize = U1;
}

impl StreamBackend for Backend<'_> {
    #[inline(always)]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        block.copy_from_slice(&self.0.step().to_le_bytes());
    }
}
