use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{record} size wrong: {actual} (expected {expected})")]
    RecordSize {
        record: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("image too small: {size} bytes")]
    ImageTooSmall { size: usize },

    #[error("invalid block size: {0}")]
    InvalidBlockSize(i32),

    #[error("{region} region starts at byte {start}, outside the image")]
    InvalidRegion { region: &'static str, start: i64 },

    #[error("block {block} is outside the data region of {blocks} blocks")]
    BlockOutOfRange { block: i64, blocks: u32 },

    #[error("inode {inode} has negative size {size}")]
    InvalidFileSize { inode: usize, size: i32 },

    #[error("inode {inode} needs {blocks} blocks, more than the {capacity} an inode can address")]
    FileTooLarge {
        inode: usize,
        blocks: usize,
        capacity: usize,
    },

    #[error("free list loops back at block {block}")]
    FreeListLoop { block: i64 },

    #[error("data region full: all {blocks} blocks are in use")]
    DataRegionFull { blocks: u32 },
}
