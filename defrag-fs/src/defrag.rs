//! # 整理流程
//!
//! 静态区域原样复制 → 按编号升序搬运每个存活 inode 的文件 → 重建空闲链表。
//! 所有文件共用一个游标，因此数据区从 0 号块起被无间隙地填满。

use alloc::vec;
use alloc::vec::Vec;

use crate::extract;
use crate::free_list;
use crate::layout::DiskInode;
use crate::writer::{self, Cursor};
use crate::{BOOT_SIZE, Endian, Geometry, HEADER_END, Result};

/// 一次整理的统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// 搬运了数据的存活文件数
    pub files: usize,
    /// 大小为 0 的存活文件数
    pub empty_files: usize,
    /// 分配的块少于文件大小所需、尾部以零填充的文件数
    pub short_files: usize,
    pub data_blocks: usize,
    pub index_blocks: usize,
    pub free_blocks: usize,
    /// 新的空闲链表头
    pub free_head: i32,
}

/// 整理 `input` 镜像，返回新镜像与统计。输入镜像不会被修改。
pub fn defragment(input: &[u8], endian: Endian) -> Result<(Vec<u8>, Report)> {
    let geo = Geometry::decode(input, endian)?;
    log::debug!("{geo:?}");

    let mut output = vec![0; geo.total_size];
    copy_static_regions(input, &mut output, &geo);

    let mut cursor = Cursor::new(&geo);
    let mut report = Report::default();

    for (index, inode) in live_inodes(input, &geo) {
        let count = extract::blocks_needed(&geo, index, &inode)?;
        if count == 0 {
            report.empty_files += 1;
            continue;
        }

        let blocks = extract::extract(input, &geo, &inode, count)?;
        if blocks.is_short() {
            log::warn!(
                "inode {index}: size {} needs {count} blocks, only {} allocated",
                inode.size,
                blocks.read_count()
            );
            report.short_files += 1;
        }

        let start = cursor.position();
        let mut rebuilt = inode.clone();
        let placement = writer::place(&mut output, &geo, &mut cursor, &blocks, &mut rebuilt)?;
        rebuilt.encode_pointers(&mut output[geo.inode_range(index)], endian);
        log::debug!(
            "inode {index}: {count} blocks + {} index blocks at {start:?}",
            placement.index_blocks
        );

        report.files += 1;
        report.data_blocks += placement.data_blocks;
        report.index_blocks += placement.index_blocks;
    }

    let head = free_list::build(&mut output, &geo, &cursor)?;
    let mut super_block = geo.super_block;
    super_block.free_block = head;
    super_block.encode(&mut output[BOOT_SIZE..], endian);

    report.free_blocks = (geo.data_blocks() - u32::from(cursor.position())) as usize;
    report.free_head = head;

    Ok((output, report))
}

/// 按编号升序产出全部存活（链接数非零）的 inode
pub fn live_inodes<'a>(
    image: &'a [u8],
    geo: &'a Geometry,
) -> impl Iterator<Item = (usize, DiskInode)> + 'a {
    (0..geo.inode_count())
        .map(|index| (index, geo.inode(image, index)))
        .filter(|(_, inode)| !inode.is_free())
}

/// 原样复制不参与整理的区域：启动区、超级块区、inode 区与交换区
fn copy_static_regions(input: &[u8], output: &mut [u8], geo: &Geometry) {
    for range in [
        0..HEADER_END,
        geo.inode_start..geo.data_start,
        geo.swap_start..geo.total_size,
    ] {
        output[range.clone()].copy_from_slice(&input[range]);
    }
}
