//! # 数据块的写入
//!
//! 从游标处开始无间隙地放置文件的数据块，并重建文件大小所需的最小索引树。
//! 索引块先于其下的块分配，因此一个文件的块按
//! 直接块、一级索引块及其数据块、二级索引……的顺序连续排列。
//!
//! 文件不需要的每个编号都写为 [`UNUSED`]，保证游标之后的块全部空闲。

use alloc::vec::Vec;

use crate::extract::FileBlocks;
use crate::layout::{DiskInode, IndexBlock};
use crate::{BlockId, Error, Geometry, Result, UNUSED};

/// 数据区内下一个未使用的块，在整个整理过程中只增不减
#[derive(Debug)]
pub struct Cursor {
    next: BlockId,
    /// 数据区的块数
    limit: u32,
}

impl Cursor {
    pub fn new(geo: &Geometry) -> Self {
        Self {
            next: BlockId::new(0),
            limit: geo.data_blocks(),
        }
    }

    #[inline]
    pub fn position(&self) -> BlockId {
        self.next
    }

    /// 分配游标处的块
    pub fn alloc(&mut self) -> Result<BlockId> {
        if u32::from(self.next) >= self.limit {
            return Err(Error::DataRegionFull { blocks: self.limit });
        }

        let id = self.next;
        self.next = id + 1u32;
        Ok(id)
    }
}

/// 一个文件写入后的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub data_blocks: usize,
    pub index_blocks: usize,
}

/// 把 `blocks` 写到 `output` 的游标处，并在 `inode` 中记录新的块编号
pub fn place(
    output: &mut [u8],
    geo: &Geometry,
    cursor: &mut Cursor,
    blocks: &FileBlocks,
    inode: &mut DiskInode,
) -> Result<Placement> {
    let mut writer = Writer {
        output,
        geo,
        cursor,
        blocks,
        placement: Placement::default(),
    };

    writer.fill_slots(&mut inode.direct, 0)?;
    writer.fill_slots(&mut inode.indirect, 1)?;
    writer.fill_slots(core::slice::from_mut(&mut inode.indirect2), 2)?;
    writer.fill_slots(core::slice::from_mut(&mut inode.indirect3), 3)?;

    Ok(writer.placement)
}

struct Writer<'a> {
    output: &'a mut [u8],
    geo: &'a Geometry,
    cursor: &'a mut Cursor,
    blocks: &'a FileBlocks,
    placement: Placement,
}

impl Writer<'_> {
    #[inline]
    fn remaining(&self) -> bool {
        self.placement.data_blocks < self.blocks.len()
    }

    /// 依次填写一级中的各个编号，用不上的置为 [`UNUSED`]
    fn fill_slots(&mut self, slots: &mut [i32], depth: u32) -> Result<()> {
        for slot in slots {
            *slot = if self.remaining() {
                self.write_node(depth)?.raw()
            } else {
                UNUSED
            };
        }

        Ok(())
    }

    /// 在游标处分配一个块，`depth` 为其下的索引层数，0 即数据块
    fn write_node(&mut self, depth: u32) -> Result<BlockId> {
        let id = self.cursor.alloc()?;
        let range = self.geo.block_range(id)?;

        if depth == 0 {
            let index = self.placement.data_blocks;
            log::trace!("block {index} -> {id:?}");
            self.output[range].copy_from_slice(self.blocks.block(index));
            self.placement.data_blocks += 1;
        } else {
            let mut entries = Vec::with_capacity(self.geo.entries_per_block());
            while self.remaining() && entries.len() < self.geo.entries_per_block() {
                entries.push(self.write_node(depth - 1)?.raw());
            }
            IndexBlock::write(&mut self.output[range], &entries, self.geo.endian);
            self.placement.index_blocks += 1;
        }

        Ok(id)
    }
}
