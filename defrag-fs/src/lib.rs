#![no_std]

extern crate alloc;


/* 碎片整理引擎的整体架构，自上而下 */

// 整理流程：遍历存活 inode，逐个搬运文件
mod defrag;

// 数据块的读出：沿索引树按逻辑顺序收集数据块
pub mod extract;

// 数据块的写入：连续放置数据块并重建最小索引树
pub mod writer;

// 空闲块链表的重建与遍历
pub mod free_list;

// 镜像几何：由超级块推导各区域的边界
mod geometry;

// 磁盘数据结构层：超级块、inode 与索引块的编解码
pub mod layout;

mod block;
mod error;

pub use self::{
    block::{BlockId, Endian},
    defrag::{Report, defragment, live_inodes},
    error::{Error, Result},
    geometry::Geometry,
    layout::{DiskInode, IndexBlock, SuperBlock},
    writer::Cursor,
};

/// 启动区大小
pub const BOOT_SIZE: usize = 512;
/// 超级块区大小，仅前 [`SuperBlock::SIZE`] 字节有意义
pub const SUPER_SIZE: usize = 512;
/// 各区域偏移量的起算点
pub const HEADER_END: usize = BOOT_SIZE + SUPER_SIZE;

/// 块编号的哨兵值：未使用/终止
pub const UNUSED: i32 = -1;
