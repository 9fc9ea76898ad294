//! 磁盘上的 inode
//!
//! - 直接索引：[`DIRECT_COUNT`] 个块编号，每个指向一个**数据块**
//! - 一级索引：[`INDIRECT_COUNT`] 个块编号，每个指向一个一级索引块
//! - 二级索引：一个块编号，指向的块中每项都指向一个一级索引块
//! - 三级索引：一个块编号，指向的块中每项都指向一个二级索引块
//!
//! 任一级的 [`UNUSED`](crate::UNUSED) 都表示此处及之后没有分配块。

use super::FIELD_SIZE;
use crate::Endian;

/// 直接索引的个数
pub const DIRECT_COUNT: usize = 10;
/// 一级索引的个数
pub const INDIRECT_COUNT: usize = 4;

/// 元数据字段个数：next_inode, protect, nlink, size, uid, gid, ctime, mtime, atime
const META_FIELDS: usize = 9;
/// 块编号字段在记录内的起始偏移
const POINTERS_OFFSET: usize = META_FIELDS * FIELD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiskInode {
    /// 空闲 inode 链表
    pub next_inode: i32,
    pub protect: i32,
    /// 硬链接个数，为 0 时 inode 空闲
    pub nlink: i32,
    /// 文件字节数
    pub size: i32,
    pub uid: i32,
    pub gid: i32,
    pub ctime: i32,
    pub mtime: i32,
    pub atime: i32,
    pub direct: [i32; DIRECT_COUNT],
    pub indirect: [i32; INDIRECT_COUNT],
    pub indirect2: i32,
    pub indirect3: i32,
}

impl DiskInode {
    const FIELDS: usize = META_FIELDS + DIRECT_COUNT + INDIRECT_COUNT + 2;
    pub const SIZE: usize = Self::FIELDS * FIELD_SIZE;

    pub fn decode(buf: &[u8], endian: Endian) -> Self {
        let field = |i: usize| endian.read_i32(&buf[i * FIELD_SIZE..]);

        let mut inode = Self {
            next_inode: field(0),
            protect: field(1),
            nlink: field(2),
            size: field(3),
            uid: field(4),
            gid: field(5),
            ctime: field(6),
            mtime: field(7),
            atime: field(8),
            indirect2: field(Self::FIELDS - 2),
            indirect3: field(Self::FIELDS - 1),
            ..Default::default()
        };
        for (i, ptr) in inode.direct.iter_mut().enumerate() {
            *ptr = field(META_FIELDS + i);
        }
        for (i, ptr) in inode.indirect.iter_mut().enumerate() {
            *ptr = field(META_FIELDS + DIRECT_COUNT + i);
        }

        inode
    }

    /// 写出整条记录
    pub fn encode(&self, buf: &mut [u8], endian: Endian) {
        let meta = [
            self.next_inode,
            self.protect,
            self.nlink,
            self.size,
            self.uid,
            self.gid,
            self.ctime,
            self.mtime,
            self.atime,
        ];
        for (chunk, value) in buf[..POINTERS_OFFSET].chunks_exact_mut(FIELD_SIZE).zip(meta) {
            endian.write_i32(chunk, value);
        }
        self.encode_pointers(buf, endian);
    }

    /// 只写出块编号字段，元数据保持原样
    pub fn encode_pointers(&self, buf: &mut [u8], endian: Endian) {
        let pointers = self
            .direct
            .iter()
            .chain(&self.indirect)
            .chain([&self.indirect2, &self.indirect3]);
        for (chunk, &value) in buf[POINTERS_OFFSET..Self::SIZE]
            .chunks_exact_mut(FIELD_SIZE)
            .zip(pointers)
        {
            endian.write_i32(chunk, value);
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        self.nlink == 0
    }
}
