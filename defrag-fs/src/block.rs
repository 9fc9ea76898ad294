use byteorder::{BigEndian, ByteOrder, LittleEndian};
use derive_more::{Add, From, Into};

use crate::UNUSED;

/// 数据区内的块编号，从数据区首块起算
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Add, From, Into)]
#[repr(transparent)]
pub struct BlockId(u32);

impl core::ops::Add<u32> for BlockId {
    type Output = Self;

    fn add(self, rhs: u32) -> Self::Output {
        self + Self(rhs)
    }
}

impl BlockId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// 解析磁盘上的块编号字段，[`UNUSED`] 表示空指针。
    /// 其它负值无法表示任何块，原样交给调用者报错。
    pub fn decode(raw: i32) -> Option<Result<Self, i32>> {
        match raw {
            UNUSED => None,
            raw if raw < 0 => Some(Err(raw)),
            raw => Some(Ok(Self(raw as u32))),
        }
    }

    /// 磁盘上的编码
    pub const fn raw(self) -> i32 {
        self.0 as i32
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// 磁盘上 4 字节整数的字节序。
///
/// 格式本身不记录字节序，默认与生成镜像的 x86 平台一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    #[inline]
    pub fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Endian::Little => LittleEndian::read_i32(buf),
            Endian::Big => BigEndian::read_i32(buf),
        }
    }

    #[inline]
    pub fn write_i32(self, buf: &mut [u8], value: i32) {
        match self {
            Endian::Little => LittleEndian::write_i32(buf, value),
            Endian::Big => BigEndian::write_i32(buf, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_sentinel_and_negative() {
        assert_eq!(BlockId::decode(UNUSED), None);
        assert_eq!(BlockId::decode(-7), Some(Err(-7)));
        assert_eq!(BlockId::decode(42), Some(Ok(BlockId::new(42))));
    }

    #[test]
    fn byte_order() {
        let mut buf = [0u8; 4];
        Endian::Little.write_i32(&mut buf, 0x0102_0304);
        assert_eq!(buf, [4, 3, 2, 1]);
        Endian::Big.write_i32(&mut buf, 0x0102_0304);
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(Endian::Big.read_i32(&[0xFF; 4]), UNUSED);
    }
}
