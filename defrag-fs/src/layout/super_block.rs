use super::FIELD_SIZE;
use crate::Endian;

/// 超级块：位于启动区之后，定位其它连续区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuperBlock {
    /// 块大小（字节）
    pub block_size: i32,
    /// inode 区的偏移（块）
    pub inode_offset: i32,
    /// 数据区的偏移（块）
    pub data_offset: i32,
    /// 交换区的偏移（块）
    pub swap_offset: i32,
    /// 空闲 inode 链表头，原样保留
    pub free_inode: i32,
    /// 空闲块链表头
    pub free_block: i32,
}

impl SuperBlock {
    const FIELDS: usize = 6;
    pub const SIZE: usize = Self::FIELDS * FIELD_SIZE;

    pub fn decode(buf: &[u8], endian: Endian) -> Self {
        let field = |i: usize| endian.read_i32(&buf[i * FIELD_SIZE..]);

        Self {
            block_size: field(0),
            inode_offset: field(1),
            data_offset: field(2),
            swap_offset: field(3),
            free_inode: field(4),
            free_block: field(5),
        }
    }

    pub fn encode(&self, buf: &mut [u8], endian: Endian) {
        let fields = [
            self.block_size,
            self.inode_offset,
            self.data_offset,
            self.swap_offset,
            self.free_inode,
            self.free_block,
        ];
        for (chunk, value) in buf[..Self::SIZE].chunks_exact_mut(FIELD_SIZE).zip(fields) {
            endian.write_i32(chunk, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_order() {
        let sb = SuperBlock {
            block_size: 512,
            inode_offset: 0,
            data_offset: 2,
            swap_offset: 40,
            free_inode: 3,
            free_block: -1,
        };
        let mut buf = [0xAAu8; 32];
        sb.encode(&mut buf, Endian::Little);

        assert_eq!(&buf[..4], &512i32.to_le_bytes());
        assert_eq!(&buf[8..12], &2i32.to_le_bytes());
        assert_eq!(&buf[20..24], &[0xFF; 4]);
        // 记录之后的字节不受影响
        assert_eq!(&buf[24..], &[0xAA; 8]);
        assert_eq!(SuperBlock::decode(&buf, Endian::Little), sb);
    }
}
