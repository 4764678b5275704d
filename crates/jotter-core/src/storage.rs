use std::{
    fs,
    io::{self, Write as _},
    path::Path,
};

use tempfile::NamedTempFile;

use crate::{
    MAX_FILE_BYTES,
    error::{IoError, IoOp},
};

/// Whole-file text storage used by [`crate::DocumentSession`].
pub trait Storage {
    fn read_text(&self, path: &Path) -> Result<String, IoError>;
    fn write_text(&self, path: &Path, contents: &str) -> Result<(), IoError>;
}

/// The real file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn read_text(&self, path: &Path) -> Result<String, IoError> {
        read_utf8(path).map_err(|err| IoError::new(IoOp::Read, path, err))
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<(), IoError> {
        atomic_write_utf8(path, contents).map_err(|err| IoError::new(IoOp::Write, path, err))
    }
}

fn read_utf8(path: &Path) -> io::Result<String> {
    let len = fs::metadata(path)?.len();
    if len > MAX_FILE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("file is too large ({len} bytes)"),
        ));
    }
    fs::read_to_string(path)
}

/// Writes through a temp file in the destination directory so a failed save
/// never leaves a truncated file behind.
fn atomic_write_utf8(path: &Path, contents: &str) -> io::Result<()> {
    if path.file_name().is_none() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path is missing a file name",
        ));
    }
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}
