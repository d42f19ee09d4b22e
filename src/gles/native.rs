/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The native ES driver behind our traits.

use super::gles32;
use super::gles32::types::*;
use crate::shader::cache::{ProgramBinary, ProgramDriver};
use std::ffi::{c_void, CStr};

/// [ProgramDriver] for whatever context is current.
pub struct NativeProgramDriver;

impl ProgramDriver for NativeProgramDriver {
    fn program_binary(&mut self, program: GLuint) -> Option<ProgramBinary> {
        unsafe {
            let mut length: GLint = 0;
            gles32::GetProgramiv(program, gles32::PROGRAM_BINARY_LENGTH, &mut length);
            if length <= 0 {
                return None;
            }
            let mut blob = vec![0u8; length as usize];
            let mut written: GLsizei = 0;
            let mut format: GLenum = 0;
            gles32::GetProgramBinary(
                program,
                length,
                &mut written,
                &mut format,
                blob.as_mut_ptr() as *mut c_void,
            );
            if written <= 0 {
                return None;
            }
            blob.truncate(written as usize);
            Some(ProgramBinary { format, blob })
        }
    }

    fn load_program_binary(&mut self, program: GLuint, binary: &ProgramBinary) -> bool {
        let Ok(length) = GLsizei::try_from(binary.blob.len()) else {
            return false;
        };
        unsafe {
            gles32::ProgramBinary(
                program,
                binary.format,
                binary.blob.as_ptr() as *const c_void,
                length,
            );
            link_status(program)
        }
    }
}

pub unsafe fn link_status(program: GLuint) -> bool {
    let mut status: GLint = 0;
    gles32::GetProgramiv(program, gles32::LINK_STATUS, &mut status);
    status == gles32::TRUE as GLint
}

pub unsafe fn get_string(name: GLenum) -> Option<String> {
    let string = gles32::GetString(name);
    if string.is_null() {
        None
    } else {
        Some(
            CStr::from_ptr(string as *const _)
                .to_string_lossy()
                .into_owned(),
        )
    }
}

/// `GL_VERSION`, `GL_VENDOR` and `GL_RENDERER` of the current context.
pub unsafe fn driver_description() -> String {
    let get = |name| get_string(name).unwrap_or_else(|| "?".to_string());
    // ES requires the version to be prefixed "OpenGL ES", so it doesn't need
    // to be contextualized.
    format!(
        "{} / {} / {}",
        get(gles32::VERSION),
        get(gles32::VENDOR),
        get(gles32::RENDERER)
    )
}
