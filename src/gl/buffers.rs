/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Buffer mapping, immutable storage and direct state access for buffers.

use crate::gles::buffers::{buffer_storage, map_buffer, map_buffer_range};
use crate::gles::gles32;
use crate::gles::gles32::types::*;
use std::ffi::c_void;

/// Run `f` with `buffer` bound to `GL_COPY_WRITE_BUFFER`, which nothing else
/// depends on, then restore the previous binding.
unsafe fn with_buffer_bound<R>(buffer: GLuint, f: impl FnOnce(GLenum) -> R) -> R {
    let mut old_buffer: GLint = 0;
    gles32::GetIntegerv(gles32::COPY_WRITE_BUFFER_BINDING, &mut old_buffer);
    gles32::BindBuffer(gles32::COPY_WRITE_BUFFER, buffer);
    let result = f(gles32::COPY_WRITE_BUFFER);
    gles32::BindBuffer(gles32::COPY_WRITE_BUFFER, old_buffer as GLuint);
    result
}

export_gl! {
    fn glMapBuffer(target: GLenum, access: GLenum) -> *mut c_void {
        map_buffer(target, access)
    }

    fn glMapBufferRange(
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        map_buffer_range(target, offset, length, access)
    }

    fn glBufferStorage(target: GLenum, size: GLsizeiptr, data: *const c_void, flags: GLbitfield) {
        buffer_storage(target, size, data, flags)
    }

    fn glCreateBuffers(n: GLsizei, buffers: *mut GLuint) {
        gles32::GenBuffers(n, buffers);
        if buffers.is_null() {
            return;
        }
        // DSA-created names are buffer objects right away; ES names only
        // become objects when first bound.
        for i in 0..usize::try_from(n).unwrap_or(0) {
            with_buffer_bound(*buffers.add(i), |_| ());
        }
    }

    fn glNamedBufferData(buffer: GLuint, size: GLsizeiptr, data: *const c_void, usage: GLenum) {
        with_buffer_bound(buffer, |target| gles32::BufferData(target, size, data, usage))
    }

    fn glNamedBufferSubData(
        buffer: GLuint,
        offset: GLintptr,
        size: GLsizeiptr,
        data: *const c_void,
    ) {
        with_buffer_bound(buffer, |target| {
            gles32::BufferSubData(target, offset, size, data)
        })
    }

    fn glNamedBufferStorage(
        buffer: GLuint,
        size: GLsizeiptr,
        data: *const c_void,
        flags: GLbitfield,
    ) {
        with_buffer_bound(buffer, |target| buffer_storage(target, size, data, flags))
    }

    fn glMapNamedBufferRange(
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        with_buffer_bound(buffer, |target| {
            map_buffer_range(target, offset, length, access)
        })
    }

    fn glUnmapNamedBuffer(buffer: GLuint) -> GLboolean {
        with_buffer_bound(buffer, |target| gles32::UnmapBuffer(target))
    }

    fn glCopyNamedBufferSubData(
        read_buffer: GLuint,
        write_buffer: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) {
        let mut old_read: GLint = 0;
        gles32::GetIntegerv(gles32::COPY_READ_BUFFER_BINDING, &mut old_read);
        gles32::BindBuffer(gles32::COPY_READ_BUFFER, read_buffer);
        with_buffer_bound(write_buffer, |target| {
            gles32::CopyBufferSubData(
                gles32::COPY_READ_BUFFER,
                target,
                read_offset,
                write_offset,
                size,
            )
        });
        gles32::BindBuffer(gles32::COPY_READ_BUFFER, old_read as GLuint);
    }
}
