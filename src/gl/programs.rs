/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Shader and program lifecycle.
//!
//! These keep [crate::shader::objects] in step with the driver's objects,
//! translate sources on their way in, and put the program binary cache in
//! front of the driver's linker.

use super::state;
use crate::gles::gles32;
use crate::gles::gles32::types::*;
use crate::gles::native::{link_status, NativeProgramDriver};
use crate::shader::{concat_fragments, ShaderStage};
use std::ffi::CStr;

/// The fragments of a `glShaderSource` call. Fragments with a negative or no
/// explicit length are NUL-terminated; null fragments are skipped.
///
/// # Safety
/// `strings` must point to `count` string pointers and `lengths`, if not
/// null, to `count` lengths, as `glShaderSource` requires.
pub unsafe fn source_fragments<'a>(
    count: GLsizei,
    strings: *const *const GLchar,
    lengths: *const GLint,
) -> Vec<&'a [u8]> {
    let mut fragments = Vec::new();
    for i in 0..usize::try_from(count).unwrap_or(0) {
        let string = *strings.add(i);
        if string.is_null() {
            continue;
        }
        let length = if lengths.is_null() { -1 } else { *lengths.add(i) };
        let fragment = match usize::try_from(length) {
            Ok(length) => std::slice::from_raw_parts(string as *const u8, length),
            Err(_) => CStr::from_ptr(string).to_bytes(),
        };
        fragments.push(fragment);
    }
    fragments
}

export_gl! {
    fn glCreateShader(type_: GLenum) -> GLuint {
        let shader = gles32::CreateShader(type_);
        if shader != 0 {
            match ShaderStage::from_gl(type_) {
                Some(stage) => state().shaders().objects.create_shader(shader, stage),
                None => log!("Unknown shader type {:#x}", type_),
            }
        }
        shader
    }

    fn glShaderSource(
        shader: GLuint,
        count: GLsizei,
        string: *const *const GLchar,
        length: *const GLint,
    ) {
        if count <= 0 || string.is_null() {
            gles32::ShaderSource(shader, count, string, length);
            return;
        }
        let source = concat_fragments(source_fragments(count, string, length));
        let translated = state().shaders().shader_source(shader, source);

        let Ok(translated_length) = GLint::try_from(translated.len()) else {
            log!("Shader {} source is too long", shader);
            return;
        };
        let translated_ptr = translated.as_ptr() as *const GLchar;
        gles32::ShaderSource(shader, 1, &translated_ptr, &translated_length);
    }

    fn glDeleteShader(shader: GLuint) {
        state().shaders().remove_shader(shader);
        gles32::DeleteShader(shader);
    }

    fn glCreateProgram() -> GLuint {
        let program = gles32::CreateProgram();
        if program != 0 {
            state().shaders().objects.create_program(program);
        }
        program
    }

    fn glDeleteProgram(program: GLuint) {
        state().shaders().objects.delete_program(program);
        gles32::DeleteProgram(program);
    }

    fn glAttachShader(program: GLuint, shader: GLuint) {
        state().shaders().objects.attach(program, shader);
        gles32::AttachShader(program, shader);
    }

    fn glDetachShader(program: GLuint, shader: GLuint) {
        state().shaders().objects.detach(program, shader);
        gles32::DetachShader(program, shader);
    }

    fn glLinkProgram(program: GLuint) {
        let mut driver = NativeProgramDriver;
        let mut state = state();
        let shaders = state.shaders();
        if shaders.load_program(program, &mut driver) {
            return;
        }
        gles32::ProgramParameteri(
            program,
            gles32::PROGRAM_BINARY_RETRIEVABLE_HINT,
            gles32::TRUE as GLint,
        );
        gles32::LinkProgram(program);
        if link_status(program) {
            shaders.save_program(program, &mut driver);
        } else {
            log_dbg!("Program {} failed to link", program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn fragments_with_and_without_lengths() {
        let a = b"#version 330\nignored";
        let b = b"void main() {}\0";
        let strings = [a.as_ptr() as *const GLchar, ptr::null(), b.as_ptr() as *const GLchar];
        let lengths = [13, 5, -1];
        let fragments = unsafe { source_fragments(3, strings.as_ptr(), lengths.as_ptr()) };
        assert_eq!(concat_fragments(fragments), "#version 330\nvoid main() {}");

        let c = b"out vec4 c;\0";
        let strings = [c.as_ptr() as *const GLchar];
        let fragments = unsafe { source_fragments(1, strings.as_ptr(), ptr::null()) };
        assert_eq!(fragments, [b"out vec4 c;".as_slice()]);
    }
}
