//! # 磁盘数据结构层
//!
//! 所有结构都按固定字节偏移显式编解码，不把内存直接解释为结构体。

mod index_block;
mod inode;
mod super_block;

pub use self::{
    index_block::IndexBlock,
    inode::{DIRECT_COUNT, DiskInode, INDIRECT_COUNT},
    super_block::SuperBlock,
};
use crate::{Error, Result};

/// 超级块在磁盘上的大小
pub const SUPER_BLOCK_SIZE: usize = 24;
/// inode 在磁盘上的大小
pub const INODE_SIZE: usize = 100;

/// 整数字段的宽度
const FIELD_SIZE: usize = 4;

/// 校验编解码所用的字段表与磁盘记录的大小一致。
pub fn check_record_sizes() -> Result<()> {
    check_record("Superblock", SUPER_BLOCK_SIZE, SuperBlock::SIZE)?;
    check_record("Inode", INODE_SIZE, DiskInode::SIZE)
}

fn check_record(record: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::RecordSize {
            record,
            expected,
            actual,
        })
    }
}
