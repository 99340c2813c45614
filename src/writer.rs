//! Artifact serialization
//!
//! The encoded index is written to a temporary file next to the target and renamed
//! into place once fully flushed, so readers never observe a truncated artifact.

use prost::Message;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::checksum::Checksum;
use crate::error::{BuildError, Result};
use crate::schema::SchoolIndex;

/// A published artifact
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenArtifact {
    pub path: PathBuf,
    pub bytes: u64,
    pub checksum: Checksum,
}

impl WrittenArtifact {
    /// Size in KiB, as reported to the console
    pub fn size_kib(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

/// Encode the index to its wire bytes
pub fn encode_index(index: &SchoolIndex) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(index.encoded_len());
    index.encode(&mut buf)?;
    Ok(buf)
}

/// Decode wire bytes into an index
pub fn decode_index(bytes: &[u8]) -> Result<SchoolIndex> {
    Ok(SchoolIndex::decode(bytes)?)
}

/// Encode and publish the index at `path`, replacing any previous artifact
pub fn write_index(index: &SchoolIndex, path: &Path) -> Result<WrittenArtifact> {
    let bytes = encode_index(index)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| BuildError::io(&dir, e))?;

    let mut staged = tempfile::NamedTempFile::new_in(&dir).map_err(|e| BuildError::io(&dir, e))?;
    staged
        .write_all(&bytes)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| BuildError::io(staged.path(), e))?;
    debug!(staged = %staged.path().display(), len = bytes.len(), "staged artifact");

    staged.persist(path).map_err(|e| BuildError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(WrittenArtifact {
        path: path.to_path_buf(),
        bytes: bytes.len() as u64,
        checksum: Checksum::from_bytes(&bytes),
    })
}

/// Read a previously written artifact
pub fn read_index(path: &Path) -> Result<SchoolIndex> {
    let bytes = fs::read(path).map_err(|e| BuildError::io(path, e))?;
    decode_index(&bytes)
}
