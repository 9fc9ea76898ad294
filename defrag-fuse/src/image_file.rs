use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::Error;

/// The defragmented image is always written here, relative to the working directory.
pub const OUTPUT_FILE: &str = "disk_defrag";

/// Reads the whole image into memory.
pub fn read(path: &Path) -> Result<Vec<u8>, Error> {
    let open_error = |source| Error::Open {
        path: path.to_owned(),
        source,
    };
    let mut fd = File::open(path).map_err(open_error)?;
    let expected = fd.metadata().map_err(open_error)?.len();

    let mut image = Vec::with_capacity(expected as usize);
    fd.read_to_end(&mut image).map_err(Error::Read)?;
    if image.len() as u64 != expected {
        return Err(Error::ShortRead {
            read: image.len(),
            expected,
        });
    }

    Ok(image)
}

/// Writes `image` to `path` through a temporary file in the same directory,
/// so `path` only ever holds a complete image.
pub fn write(path: &Path, image: &[u8]) -> Result<(), Error> {
    let create_error = |source| Error::Create {
        path: path.to_owned(),
        source,
    };
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut fd = NamedTempFile::new_in(dir).map_err(create_error)?;
    fd.write_all(image).map_err(Error::Write)?;
    fd.as_file().sync_all().map_err(Error::Write)?;
    fd.persist(path).map_err(|e| create_error(e.error))?;

    Ok(())
}
