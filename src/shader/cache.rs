/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! On-disk cache of linked program binaries.
//!
//! Each entry is a file named after the 64-digit hex [ContentHash] of the
//! program's shader sources, containing the binary format as a native-endian
//! `u32` followed by the binary itself. Entries are written to a temporary
//! file and renamed into place, so readers never see half an entry. Two
//! processes writing the same entry race harmlessly: the content is the same.
//!
//! The cache never trusts an entry: it's only a hit if the driver accepts the
//! binary and reports the program as linked. Anything else (a driver update
//! changed the format, the file got truncated...) deletes the entry.

use crate::gles::gles32::types::{GLenum, GLuint};
use crate::hash::ContentHash;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramBinary {
    pub format: GLenum,
    pub blob: Vec<u8>,
}

impl ProgramBinary {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(4 + self.blob.len());
        bytes.extend_from_slice(&self.format.to_ne_bytes());
        bytes.extend_from_slice(&self.blob);
        bytes
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let format: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
        Some(ProgramBinary {
            format: GLenum::from_ne_bytes(format),
            blob: bytes[4..].to_vec(),
        })
    }
}

/// The part of the driver the cache talks to.
pub trait ProgramDriver {
    /// Get the binary of a linked program. [None] if the driver can't provide
    /// one (e.g. it supports no binary formats).
    fn program_binary(&mut self, program: GLuint) -> Option<ProgramBinary>;

    /// Load `binary` into `program`, returning whether the program is linked
    /// afterwards.
    fn load_program_binary(&mut self, program: GLuint, binary: &ProgramBinary) -> bool;
}

#[derive(Debug)]
pub struct ProgramCache {
    dir: PathBuf,
}

impl ProgramCache {
    /// Use `dir` for the cache, creating it if needed. Its parent must exist.
    pub fn open(dir: PathBuf) -> Result<Self, String> {
        crate::paths::ensure_dir(&dir)?;
        log_dbg!("Program cache in {}", dir.display());
        Ok(ProgramCache { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, key: &ContentHash) -> PathBuf {
        self.dir.join(key.to_hex())
    }

    /// Read an entry. Files too short to hold a format are deleted.
    pub fn read(&self, key: &ContentHash) -> Option<ProgramBinary> {
        let path = self.entry_path(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    log!("Couldn't read {}: {}", path.display(), err);
                }
                return None;
            }
        };
        let binary = ProgramBinary::decode(&bytes);
        if binary.is_none() {
            log!("Truncated cache entry {}, removing it", path.display());
            self.remove(key);
        }
        binary
    }

    pub fn write(&self, key: &ContentHash, binary: &ProgramBinary) -> Result<(), String> {
        let path = self.entry_path(key);
        let temp = self
            .dir
            .join(format!("{}.{}.tmp", key.to_hex(), std::process::id()));
        std::fs::write(&temp, binary.encode())
            .and_then(|()| std::fs::rename(&temp, &path))
            .map_err(|err| {
                let _ = std::fs::remove_file(&temp);
                format!("Couldn't write {}: {}", path.display(), err)
            })
    }

    pub fn remove(&self, key: &ContentHash) {
        let path = self.entry_path(key);
        if let Err(err) = std::fs::remove_file(&path) {
            if err.kind() != ErrorKind::NotFound {
                log!("Couldn't remove {}: {}", path.display(), err);
            }
        }
    }

    /// Try to link `program` from the entry for `key`. Returns `true` only if
    /// the driver accepted the stored binary.
    pub fn load<D: ProgramDriver>(&self, key: &ContentHash, program: GLuint, driver: &mut D) -> bool {
        let Some(binary) = self.read(key) else {
            log_dbg!("Cache miss for program {} ({})", program, key);
            return false;
        };
        if driver.load_program_binary(program, &binary) {
            log_dbg!("Program {} loaded from cache ({})", program, key);
            true
        } else {
            log!(
                "Driver rejected cached binary for program {}, removing {}",
                program,
                key
            );
            self.remove(key);
            false
        }
    }

    /// Store the binary of the freshly linked `program` under `key`.
    pub fn save<D: ProgramDriver>(&self, key: &ContentHash, program: GLuint, driver: &mut D) {
        let Some(binary) = driver.program_binary(program) else {
            log_dbg!("No binary available for program {}", program);
            return;
        };
        if binary.blob.is_empty() {
            return;
        }
        match self.write(key, &binary) {
            Ok(()) => log_dbg!("Program {} cached as {}", program, key),
            Err(err) => log!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding() {
        let binary = ProgramBinary {
            format: 7,
            blob: vec![1, 2, 3, 4],
        };
        let bytes = binary.encode();
        assert_eq!(&bytes[..4], &7u32.to_ne_bytes());
        assert_eq!(&bytes[4..], &[1, 2, 3, 4]);
        assert_eq!(ProgramBinary::decode(&bytes), Some(binary));
        assert_eq!(ProgramBinary::decode(&[1, 2, 3]), None);
        assert_eq!(
            ProgramBinary::decode(&[0, 0, 0, 0]),
            Some(ProgramBinary {
                format: 0,
                blob: Vec::new()
            })
        );
    }
}
