use crate::error::{Result, StatementError};

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

const FILE_SCHEME: &str = "file://";

/// Opens the byte stream a statement is generated from.
///
/// The returned reader is read once, front to back, and closed when dropped.
pub trait Source {
    type Reader: Read;

    fn open(&self, uri: &str) -> Result<Self::Reader>;
}

/// Local files, addressed by path or by a `file://` URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
    pub fn resolve(uri: &str) -> PathBuf {
        match uri.strip_prefix(FILE_SCHEME) {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(uri),
        }
    }
}

impl Source for FileSource {
    type Reader = File;

    fn open(&self, uri: &str) -> Result<File> {
        File::open(Self::resolve(uri)).map_err(|source| StatementError::Open {
            uri: uri.to_string(),
            source,
        })
    }
}
