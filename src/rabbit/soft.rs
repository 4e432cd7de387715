use super::RabbitCore;
use crate::codec::words_to_le_bytes;
use cipher::{
    consts::{U1, U16},
    Block, BlockSizeUser, ParBlocksSizeUser, StreamBackend,
};

/// The software backend for Rabbit.
pub(crate) struct Backend<'a>(pub(crate) &'a mut RabbitCore);

impl BlockSizeUser for Backend<'_> {
    type BlockSize = U16;
}

impl ParBlocksSizeUser for Backend<'_> {
    type ParBlocksSize = U1;
}

impl StreamBackend for Backend<'_> {
    #[inline(always)]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        let work = &mut self.0.work;
        work.next_state();
        words_to_le_bytes(&work.extract(), block);
    }
}
