/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Buffer mapping and storage on top of what ES offers.

use super::gles32;
use super::gles32::types::*;
use std::ffi::c_void;

// Desktop glMapBuffer access values.
pub const READ_ONLY: GLenum = 0x88B8;
pub const WRITE_ONLY: GLenum = 0x88B9;
pub const READ_WRITE: GLenum = 0x88BA;

/// Map bits equivalent to a `glMapBuffer` access value.
pub fn map_access_bits(access: GLenum) -> GLbitfield {
    match access {
        READ_ONLY => gles32::MAP_READ_BIT,
        WRITE_ONLY => gles32::MAP_WRITE_BIT,
        READ_WRITE => gles32::MAP_READ_BIT | gles32::MAP_WRITE_BIT,
        _ => 0,
    }
}

/// Persistent mappings need immutable storage from `EXT_buffer_storage`.
/// Without it the best we can do is an ordinary mapping.
pub fn strip_persistence(access: GLbitfield, have_buffer_storage: bool) -> GLbitfield {
    if have_buffer_storage || access & gles32::MAP_PERSISTENT_BIT_EXT == 0 {
        access
    } else {
        access & !(gles32::MAP_PERSISTENT_BIT_EXT | gles32::MAP_COHERENT_BIT_EXT)
    }
}

pub fn have_buffer_storage() -> bool {
    gles32::BufferStorageEXT::is_loaded()
}

pub unsafe fn map_buffer_range(
    target: GLenum,
    offset: GLintptr,
    length: GLsizeiptr,
    access: GLbitfield,
) -> *mut c_void {
    gles32::MapBufferRange(
        target,
        offset,
        length,
        strip_persistence(access, have_buffer_storage()),
    )
}

/// `glMapBuffer`: `OES_mapbuffer` if the driver has it, otherwise a range
/// covering the whole buffer.
pub unsafe fn map_buffer(target: GLenum, access: GLenum) -> *mut c_void {
    if gles32::MapBufferOES::is_loaded() {
        return gles32::MapBufferOES(target, access);
    }
    let mut size: GLint = 0;
    gles32::GetBufferParameteriv(target, gles32::BUFFER_SIZE, &mut size);
    gles32::MapBufferRange(target, 0, size as GLsizeiptr, map_access_bits(access))
}

/// `glBufferStorage`, falling back to mutable storage.
pub unsafe fn buffer_storage(
    target: GLenum,
    size: GLsizeiptr,
    data: *const c_void,
    flags: GLbitfield,
) {
    if have_buffer_storage() {
        gles32::BufferStorageEXT(target, size, data, flags);
    } else {
        gles32::BufferData(target, size, data, gles32::STATIC_DRAW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_bits() {
        assert_eq!(map_access_bits(READ_ONLY), gles32::MAP_READ_BIT);
        assert_eq!(map_access_bits(WRITE_ONLY), gles32::MAP_WRITE_BIT);
        assert_eq!(
            map_access_bits(READ_WRITE),
            gles32::MAP_READ_BIT | gles32::MAP_WRITE_BIT
        );
        assert_eq!(map_access_bits(0), 0);
    }

    #[test]
    fn persistence_needs_buffer_storage() {
        let access = gles32::MAP_WRITE_BIT
            | gles32::MAP_PERSISTENT_BIT_EXT
            | gles32::MAP_COHERENT_BIT_EXT;
        assert_eq!(strip_persistence(access, true), access);
        assert_eq!(strip_persistence(access, false), gles32::MAP_WRITE_BIT);
        // Coherent alone is left for the driver to reject.
        let coherent = gles32::MAP_READ_BIT | gles32::MAP_COHERENT_BIT_EXT;
        assert_eq!(strip_persistence(coherent, false), coherent);
    }
}
