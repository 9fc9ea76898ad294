//! # 数据块的读出
//!
//! 沿 inode 的索引树按逻辑顺序收集文件的数据块：
//! 直接索引 → 一级索引 → 二级索引 → 三级索引。
//!
//! 每一级遇到 [`UNUSED`](crate::UNUSED) 只终止该级的遍历，上一级继续处理下一项；
//! 收集满所需块数后立即停止，不论索引块中是否还有编号。

use alloc::vec;
use alloc::vec::Vec;

use crate::layout::{DiskInode, IndexBlock};
use crate::{BlockId, Error, Geometry, Result};

/// 一个文件按逻辑顺序排列的数据块，每块恰为一个块大小
#[derive(Debug)]
pub struct FileBlocks {
    data: Vec<u8>,
    block_size: usize,
    /// 文件大小所需的块数
    count: usize,
    /// 实际从镜像读到的块数，其后的块保持为零
    read: usize,
}

impl FileBlocks {
    fn new(count: usize, block_size: usize) -> Self {
        Self {
            data: vec![0; count * block_size],
            block_size,
            count,
            read: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 索引树实际提供的块数
    #[inline]
    pub fn read_count(&self) -> usize {
        self.read
    }

    /// inode 分配的块少于文件大小所需
    #[inline]
    pub fn is_short(&self) -> bool {
        self.read < self.count
    }

    pub fn block(&self, index: usize) -> &[u8] {
        &self.data[index * self.block_size..(index + 1) * self.block_size]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.block_size)
    }

    /// 截取前 `size` 字节作为文件内容
    pub fn into_bytes(mut self, size: usize) -> Vec<u8> {
        self.data.truncate(size);
        self.data
    }

    fn is_full(&self) -> bool {
        self.read == self.count
    }
}

/// 文件大小所需的数据块数，并校验其可被 inode 编号
pub fn blocks_needed(geo: &Geometry, index: usize, inode: &DiskInode) -> Result<usize> {
    let size = usize::try_from(inode.size).map_err(|_| Error::InvalidFileSize {
        inode: index,
        size: inode.size,
    })?;

    let blocks = geo.count_data_block(size);
    let capacity = geo.inode_capacity();
    if blocks > capacity {
        return Err(Error::FileTooLarge {
            inode: index,
            blocks,
            capacity,
        });
    }

    Ok(blocks)
}

/// 按逻辑顺序读出 `inode` 的前 `count` 个数据块
pub fn extract(
    image: &[u8],
    geo: &Geometry,
    inode: &DiskInode,
    count: usize,
) -> Result<FileBlocks> {
    let mut extractor = Extractor {
        image,
        geo,
        blocks: FileBlocks::new(count, geo.block_size),
    };

    extractor.read_slots(inode.direct, 0)?;
    extractor.read_slots(inode.indirect, 1)?;
    extractor.read_slots([inode.indirect2], 2)?;
    extractor.read_slots([inode.indirect3], 3)?;

    Ok(extractor.blocks)
}

/// 读出第 `index` 个 inode 所描述文件的全部字节
pub fn read_file(image: &[u8], geo: &Geometry, index: usize) -> Result<Vec<u8>> {
    let inode = geo.inode(image, index);
    let count = blocks_needed(geo, index, &inode)?;

    Ok(extract(image, geo, &inode, count)?.into_bytes(inode.size as usize))
}

struct Extractor<'a> {
    image: &'a [u8],
    geo: &'a Geometry,
    blocks: FileBlocks,
}

impl Extractor<'_> {
    /// 依次读取一级中的各个编号，`depth` 为编号所指块之下的索引层数
    fn read_slots(&mut self, slots: impl IntoIterator<Item = i32>, depth: u32) -> Result<()> {
        for raw in slots {
            if self.blocks.is_full() {
                break;
            }
            let Some(id) = self.resolve(raw)? else {
                break;
            };
            self.read_node(id, depth)?;
        }

        Ok(())
    }

    fn read_node(&mut self, id: BlockId, depth: u32) -> Result<()> {
        let image = self.image;
        let range = self.geo.block_range(id)?;

        if depth == 0 {
            log::trace!("block {} <- {id:?}", self.blocks.read);
            let start = self.blocks.read * self.blocks.block_size;
            self.blocks.data[start..start + self.blocks.block_size].copy_from_slice(&image[range]);
            self.blocks.read += 1;
            Ok(())
        } else {
            let index = IndexBlock::new(&image[range], self.geo.endian);
            self.read_slots(index.iter(), depth - 1)
        }
    }

    fn resolve(&self, raw: i32) -> Result<Option<BlockId>> {
        match BlockId::decode(raw) {
            None => Ok(None),
            Some(Ok(id)) => Ok(Some(id)),
            Some(Err(raw)) => Err(Error::BlockOutOfRange {
                block: raw as i64,
                blocks: self.geo.data_blocks(),
            }),
        }
    }
}
