//! # 空闲块链表
//!
//! 链表直接存放在空闲块中：每块的前 4 字节是下一个空闲块的编号，
//! 最后一块为 [`UNUSED`]。

use crate::layout::SuperBlock;
use crate::writer::Cursor;
use crate::{BOOT_SIZE, BlockId, Error, Geometry, Result, UNUSED};

/// 把游标之后的全部块依次串成空闲链表，返回链表头
pub fn build(output: &mut [u8], geo: &Geometry, cursor: &Cursor) -> Result<i32> {
    let first = u32::from(cursor.position());
    let blocks = geo.data_blocks();

    for i in first..blocks {
        let block = &mut output[geo.block_range(BlockId::new(i))?];
        block.fill(0);

        let next = if i + 1 < blocks { (i + 1) as i32 } else { UNUSED };
        geo.endian.write_i32(block, next);
    }

    let head = if first < blocks { first as i32 } else { UNUSED };
    log::debug!("free list: head={head}, {} blocks", blocks.saturating_sub(first));
    Ok(head)
}

/// 从超级块记录的链表头开始遍历空闲链表
pub fn walk<'a>(image: &'a [u8], geo: &'a Geometry) -> Walk<'a> {
    let head = SuperBlock::decode(&image[BOOT_SIZE..], geo.endian).free_block;

    Walk {
        image,
        geo,
        next: head,
        visited: 0,
    }
}

#[derive(Debug)]
pub struct Walk<'a> {
    image: &'a [u8],
    geo: &'a Geometry,
    next: i32,
    visited: u32,
}

impl Iterator for Walk<'_> {
    type Item = Result<BlockId>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = match BlockId::decode(self.next)? {
            Ok(id) => id,
            Err(raw) => {
                let e = Error::BlockOutOfRange {
                    block: raw as i64,
                    blocks: self.geo.data_blocks(),
                };
                return Some(Err(self.stop(e)));
            }
        };

        // 链表长度不可能超过数据区的块数
        if self.visited >= self.geo.data_blocks() {
            return Some(Err(self.stop(Error::FreeListLoop {
                block: id.raw() as i64,
            })));
        }

        let range = match self.geo.block_range(id) {
            Ok(range) => range,
            Err(e) => return Some(Err(self.stop(e))),
        };
        self.next = self.geo.endian.read_i32(&self.image[range]);
        self.visited += 1;

        Some(Ok(id))
    }
}

impl Walk<'_> {
    /// 出错后结束遍历
    fn stop(&mut self, e: Error) -> Error {
        self.next = UNUSED;
        e
    }
}
