use super::FIELD_SIZE;
use crate::{Endian, UNUSED};

/// 间接索引块：整个块连续存储**块编号**，遇到 [`UNUSED`] 即提前终止
#[derive(Debug, Clone, Copy)]
pub struct IndexBlock<'a> {
    data: &'a [u8],
    endian: Endian,
}

impl<'a> IndexBlock<'a> {
    #[inline]
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self { data, endian }
    }

    /// 块内可容纳的编号数
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len() / FIELD_SIZE
    }

    pub fn get(&self, index: usize) -> i32 {
        self.endian.read_i32(&self.data[index * FIELD_SIZE..])
    }

    pub fn iter(self) -> impl Iterator<Item = i32> + 'a {
        let endian = self.endian;
        self.data
            .chunks_exact(FIELD_SIZE)
            .map(move |chunk| endian.read_i32(chunk))
    }

    /// 把 `entries` 写入块首，其余编号置为 [`UNUSED`]；
    /// 块尾不足一个编号的字节清零。
    pub fn write(block: &mut [u8], entries: &[i32], endian: Endian) {
        block.fill(0);
        for (i, chunk) in block.chunks_exact_mut(FIELD_SIZE).enumerate() {
            endian.write_i32(chunk, entries.get(i).copied().unwrap_or(UNUSED));
        }
    }
}
