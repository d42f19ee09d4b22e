/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Paths for host files used by glxes.
//!
//! There is only one category: files glxes creates and may delete at any
//! time, i.e. the program binary cache in [CACHE_SUBDIR].

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Home-relative directory where linked program binaries are stored.
pub const CACHE_SUBDIR: &str = ".cache/glxes";

/// Default cache directory, or [None] if there is no usable home directory.
pub fn default_cache_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    if home.is_empty() {
        return None;
    }
    Some(Path::new(&home).join(CACHE_SUBDIR))
}

/// Create `dir` if it doesn't exist yet. Only the last component is created:
/// a missing parent is an error, not something to paper over.
pub fn ensure_dir(dir: &Path) -> Result<(), String> {
    match std::fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(err) => Err(format!("Couldn't create {}: {}", dir.display(), err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_dir_is_not_recursive() {
        let base = std::env::temp_dir().join(format!("glxes-paths-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&base);

        assert!(ensure_dir(&base.join("a/b")).is_err());
        assert!(ensure_dir(&base).is_ok());
        assert!(ensure_dir(&base).is_ok());
        assert!(base.is_dir());

        std::fs::remove_dir_all(&base).unwrap();
    }
}
