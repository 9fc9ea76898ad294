use clap::{Parser, ValueEnum};
use defrag_fs::Endian;
use std::path::PathBuf;

/// Defragment a disk image: pack every file contiguously and relink the free blocks.
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// Disk image to defragment
    pub image: PathBuf,

    /// Byte order of the integers stored in the image
    #[arg(long, value_enum, default_value_t = ByteOrder::Little)]
    pub byte_order: ByteOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ByteOrder {
    Little,
    Big,
}

impl From<ByteOrder> for Endian {
    fn from(order: ByteOrder) -> Self {
        match order {
            ByteOrder::Little => Endian::Little,
            ByteOrder::Big => Endian::Big,
        }
    }
}
