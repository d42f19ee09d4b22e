/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Desktop-only entry points.
//!
//! Some have an ES equivalent under a different name or signature. The
//! version queries report a desktop 4.6 core context, since that is what the
//! application asked for and what the shader translator accepts. Everything
//! else here is unimplemented: the first call says so, and later calls are
//! silently ignored.

use crate::gles::gles32;
use crate::gles::gles32::types::*;
use crate::gles::native::get_string;
use std::ffi::{c_void, CString};
use std::sync::OnceLock;

pub const CONTEXT_PROFILE_MASK: GLenum = 0x9126;
pub const CONTEXT_CORE_PROFILE_BIT: GLint = 0x1;

/// The version of desktop OpenGL we claim to be.
pub const DESKTOP_VERSION: (GLint, GLint) = (4, 6);

/// Desktop-only color buffer names for the default framebuffer.
const DEFAULT_FRAMEBUFFER_BUFFERS: &[GLenum] = &[
    0x0400, // GL_FRONT_LEFT
    0x0401, // GL_FRONT_RIGHT
    0x0402, // GL_BACK_LEFT
    0x0403, // GL_BACK_RIGHT
    0x0404, // GL_FRONT
    0x0406, // GL_LEFT
    0x0407, // GL_RIGHT
    0x0408, // GL_FRONT_AND_BACK
];

/// The string we report for `name`, given the driver's own string for it.
/// [None] means the driver's string is passed through.
pub fn desktop_string(name: GLenum, es_string: &str) -> Option<String> {
    let (major, minor) = DESKTOP_VERSION;
    match name {
        gles32::VERSION => Some(format!("{}.{} Core Profile | {}", major, minor, es_string)),
        gles32::SHADING_LANGUAGE_VERSION => {
            Some(format!("{}.{}0 | {}", major, minor, es_string))
        }
        gles32::RENDERER => Some(format!("glxes | {}", es_string)),
        _ => None,
    }
}

/// The value we report for an integer query, if it is one where the desktop
/// answer differs from the driver's.
pub fn desktop_integer(pname: GLenum) -> Option<GLint> {
    match pname {
        gles32::MAJOR_VERSION => Some(DESKTOP_VERSION.0),
        gles32::MINOR_VERSION => Some(DESKTOP_VERSION.1),
        CONTEXT_PROFILE_MASK => Some(CONTEXT_CORE_PROFILE_BIT),
        _ => None,
    }
}

/// ES only has one color buffer in the default framebuffer, `GL_BACK`.
pub fn es_draw_buffer(buffer: GLenum) -> GLenum {
    if DEFAULT_FRAMEBUFFER_BUFFERS.contains(&buffer) {
        gles32::BACK
    } else {
        buffer
    }
}

/// The pointer handed out by `glGetString` has to stay valid, so each string
/// is built once and kept for the rest of the process.
unsafe fn cached_desktop_string(name: GLenum) -> Option<*const GLubyte> {
    static VERSION: OnceLock<CString> = OnceLock::new();
    static SHADING_LANGUAGE_VERSION: OnceLock<CString> = OnceLock::new();
    static RENDERER: OnceLock<CString> = OnceLock::new();

    let cell = match name {
        gles32::VERSION => &VERSION,
        gles32::SHADING_LANGUAGE_VERSION => &SHADING_LANGUAGE_VERSION,
        gles32::RENDERER => &RENDERER,
        _ => return None,
    };
    if cell.get().is_none() {
        let es_string = get_string(name)?;
        let string = desktop_string(name, &es_string)?;
        let _ = cell.set(CString::new(string).ok()?);
    }
    cell.get().map(|string| string.as_ptr() as *const GLubyte)
}

export_gl! {
    fn glGetString(name: GLenum) -> *const GLubyte {
        match cached_desktop_string(name) {
            Some(string) => string,
            None => gles32::GetString(name),
        }
    }

    fn glGetIntegerv(pname: GLenum, data: *mut GLint) {
        match desktop_integer(pname) {
            Some(value) if !data.is_null() => *data = value,
            _ => gles32::GetIntegerv(pname, data),
        }
    }

    fn glClearDepth(depth: f64) {
        gles32::ClearDepthf(depth as GLfloat);
    }

    fn glDepthRange(near: f64, far: f64) {
        gles32::DepthRangef(near as GLfloat, far as GLfloat);
    }

    fn glDrawBuffer(buf: GLenum) {
        let buf = es_draw_buffer(buf);
        gles32::DrawBuffers(1, &buf);
    }

    fn glBeginConditionalRender(id: GLuint, mode: GLenum) {
        if gles32::BeginConditionalRenderNV::is_loaded() {
            gles32::BeginConditionalRenderNV(id, mode);
        } else {
            log_once!("glBeginConditionalRender: no conditional rendering, drawing unconditionally");
        }
    }

    fn glEndConditionalRender() {
        if gles32::EndConditionalRenderNV::is_loaded() {
            gles32::EndConditionalRenderNV();
        }
    }

    fn glGetBufferSubData(target: GLenum, offset: GLintptr, size: GLsizeiptr, data: *mut c_void) {
        let Ok(length) = usize::try_from(size) else {
            return;
        };
        let mapped = gles32::MapBufferRange(target, offset, size, gles32::MAP_READ_BIT);
        if mapped.is_null() {
            log!("glGetBufferSubData: could not map buffer for reading");
            return;
        }
        std::ptr::copy_nonoverlapping(mapped as *const u8, data as *mut u8, length);
        gles32::UnmapBuffer(target);
    }

    fn glLogicOp(_opcode: GLenum) {
        log_once!("TODO: glLogicOp (no ES equivalent, ignored)");
    }

    fn glPolygonMode(_face: GLenum, mode: GLenum) {
        if mode != 0x1B02 {
            // GL_FILL is the only mode ES draws.
            log_once!("TODO: glPolygonMode {:#x} (ignored)", mode);
        }
    }

    fn glPointSize(_size: GLfloat) {
        log_once!("TODO: glPointSize (ES only has gl_PointSize, ignored)");
    }

    fn glClampColor(_target: GLenum, _clamp: GLenum) {
        log_once!("TODO: glClampColor (ignored)");
    }

    fn glPrimitiveRestartIndex(_index: GLuint) {
        log_once!("TODO: glPrimitiveRestartIndex (ignored)");
    }

    fn glProvokingVertex(_mode: GLenum) {
        log_once!("TODO: glProvokingVertex (ignored)");
    }

    fn glGetTexImage(
        _target: GLenum,
        _level: GLint,
        _format: GLenum,
        _type: GLenum,
        _pixels: *mut c_void,
    ) {
        log_once!("TODO: glGetTexImage (ignored)");
    }

    fn glTexImage2DMultisample(
        _target: GLenum,
        _samples: GLsizei,
        _internalformat: GLenum,
        _width: GLsizei,
        _height: GLsizei,
        _fixedsamplelocations: GLboolean,
    ) {
        log_once!("TODO: glTexImage2DMultisample (ignored)");
    }
}
