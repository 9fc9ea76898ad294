//! # 镜像几何
//!
//! 启动区 | 超级块区 | inode 区 | 数据区 | 交换区
//!
//! 各区域的起点由超级块中的块偏移推导，偏移从超级块区之后起算。

use core::ops::Range;

use crate::layout::{self, DIRECT_COUNT, DiskInode, INDIRECT_COUNT, INODE_SIZE, SuperBlock};
use crate::{BOOT_SIZE, BlockId, Endian, Error, HEADER_END, Result};

#[derive(Debug, Clone)]
pub struct Geometry {
    pub super_block: SuperBlock,
    pub endian: Endian,
    pub block_size: usize,
    pub inode_start: usize,
    pub data_start: usize,
    pub swap_start: usize,
    pub total_size: usize,
}

impl Geometry {
    pub fn decode(image: &[u8], endian: Endian) -> Result<Self> {
        layout::check_record_sizes()?;

        let total_size = image.len();
        if total_size < HEADER_END {
            return Err(Error::ImageTooSmall { size: total_size });
        }

        let super_block = SuperBlock::decode(&image[BOOT_SIZE..], endian);
        // 至少要容得下一个块编号
        if super_block.block_size < 4 {
            return Err(Error::InvalidBlockSize(super_block.block_size));
        }
        let block_size = super_block.block_size as i64;
        let region_start = |offset: i32| HEADER_END as i64 + offset as i64 * block_size;

        let inode_start = region_start(super_block.inode_offset);
        if !(HEADER_END as i64..=total_size as i64).contains(&inode_start) {
            return Err(Error::InvalidRegion {
                region: "inode",
                start: inode_start,
            });
        }

        let data_start = region_start(super_block.data_offset);
        if !(inode_start..=total_size as i64).contains(&data_start) {
            return Err(Error::InvalidRegion {
                region: "data",
                start: data_start,
            });
        }

        // 交换区越界时视为不存在
        let mut swap_start = region_start(super_block.swap_offset);
        if swap_start < 0 || swap_start > total_size as i64 {
            log::debug!("swap region at {swap_start} ignored, image is {total_size} bytes");
            swap_start = total_size as i64;
        }
        if swap_start < data_start {
            return Err(Error::InvalidRegion {
                region: "swap",
                start: swap_start,
            });
        }

        Ok(Self {
            super_block,
            endian,
            block_size: block_size as usize,
            inode_start: inode_start as usize,
            data_start: data_start as usize,
            swap_start: swap_start as usize,
            total_size,
        })
    }

    /// inode 区内的记录数
    #[inline]
    pub fn inode_count(&self) -> usize {
        (self.data_start - self.inode_start) / INODE_SIZE
    }

    pub fn inode_range(&self, index: usize) -> Range<usize> {
        let start = self.inode_start + index * INODE_SIZE;
        start..start + INODE_SIZE
    }

    pub fn inode(&self, image: &[u8], index: usize) -> DiskInode {
        DiskInode::decode(&image[self.inode_range(index)], self.endian)
    }

    /// 数据区的整块数，块编号须能以 4 字节有符号整数表示
    pub fn data_blocks(&self) -> u32 {
        ((self.swap_start - self.data_start) / self.block_size).min(i32::MAX as usize) as u32
    }

    /// 索引块可容纳的编号数
    #[inline]
    pub fn entries_per_block(&self) -> usize {
        self.block_size / 4
    }

    /// 一个 inode 最多能编号的数据块数
    pub fn inode_capacity(&self) -> usize {
        let per_block = self.entries_per_block();
        let indirect2 = per_block.saturating_mul(per_block);
        let indirect3 = indirect2.saturating_mul(per_block);

        (DIRECT_COUNT + INDIRECT_COUNT * per_block)
            .saturating_add(indirect2)
            .saturating_add(indirect3)
    }

    /// 块在镜像内的字节范围
    pub fn block_range(&self, id: BlockId) -> Result<Range<usize>> {
        let blocks = self.data_blocks();
        if u32::from(id) >= blocks {
            return Err(Error::BlockOutOfRange {
                block: u32::from(id) as i64,
                blocks,
            });
        }

        let start = self.data_start + id.index() * self.block_size;
        Ok(start..start + self.block_size)
    }

    /// 容纳 `size` 字节需要多少个数据块
    #[inline]
    pub fn count_data_block(&self, size: usize) -> usize {
        size.div_ceil(self.block_size)
    }
}
