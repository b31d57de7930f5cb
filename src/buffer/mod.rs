use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::RhxError;

/// The whole file, held in memory as a flat byte vector.
///
/// Every insert and delete shifts the tail of the vector, so edits are O(n)
/// in the file size. That is fine for the interactively sized files this
/// editor targets; files larger than memory are not supported.
pub struct ByteBuffer {
    bytes: Vec<u8>,
    filename: PathBuf,
    readonly: bool,
    is_new: bool,
}

impl ByteBuffer {
    pub fn new(filename: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            filename: filename.into(),
            readonly: false,
            is_new: false,
        }
    }

    /// Load a file from disk. A path that does not exist yet yields an empty
    /// buffer which will be created on the first write.
    pub fn from_file(path: PathBuf) -> Result<Self, RhxError> {
        let meta = match std::fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(target: "io", file = %path.display(), "new_file");
                return Ok(Self {
                    is_new: true,
                    ..Self::new(path, Vec::new())
                });
            }
            Err(e) => {
                return Err(RhxError::FileRead {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        if !meta.is_file() {
            return Err(RhxError::NotRegularFile {
                path: path.display().to_string(),
            });
        }

        let bytes = std::fs::read(&path).map_err(|e| RhxError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        tracing::info!(target: "io", file = %path.display(), size_bytes = bytes.len(), "file_read_ok");

        Ok(Self {
            readonly: meta.permissions().readonly(),
            ..Self::new(path, bytes)
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn get(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn readonly(&self) -> bool {
        self.readonly
    }

    /// True when the file did not exist on disk when the buffer was opened.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Write the buffer back over its file.
    pub fn write(&mut self) -> Result<(), RhxError> {
        let file = std::fs::File::create(&self.filename).map_err(|e| RhxError::FileWrite {
            path: self.filename.display().to_string(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&self.bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| RhxError::FileWrite {
                path: self.filename.display().to_string(),
                source: e,
            })?;
        self.is_new = false;
        tracing::info!(target: "io", file = %self.filename.display(), size_bytes = self.bytes.len(), "file_write_ok");
        Ok(())
    }

    // -- Mutation --

    /// Insert `byte` at `offset`, or just past it when `after` is set.
    /// Inserting after on an empty buffer lands at 0. Returns the offset the
    /// byte was written to.
    pub fn insert(&mut self, offset: usize, byte: u8, after: bool) -> usize {
        let at = if after && !self.bytes.is_empty() {
            offset + 1
        } else {
            offset
        };
        let at = at.min(self.bytes.len());
        self.bytes.insert(at, byte);
        at
    }

    /// Remove and return the byte at `offset`, or `None` when there is nothing there.
    pub fn delete(&mut self, offset: usize) -> Option<u8> {
        if offset >= self.bytes.len() {
            return None;
        }
        Some(self.bytes.remove(offset))
    }

    /// Overwrite the byte at `offset`, returning the value it replaced.
    pub fn replace(&mut self, offset: usize, byte: u8) -> Option<u8> {
        let slot = self.bytes.get_mut(offset)?;
        Some(std::mem::replace(slot, byte))
    }
}
