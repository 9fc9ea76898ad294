use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] clap::Error),

    #[error("cannot open file {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("read error: {0}")]
    Read(io::Error),

    #[error("read error: got {read} of {expected} bytes")]
    ShortRead { read: usize, expected: u64 },

    #[error("cannot create output file {path:?}: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("write error: {0}")]
    Write(io::Error),

    #[error(transparent)]
    Format(#[from] defrag_fs::Error),
}
