/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Texture binding and direct state access emulation.

use super::state;
use crate::gles::gles32;
use crate::gles::gles32::types::*;
use crate::gles::textures::{es_target, with_texture_bound};
use std::ffi::c_void;

/// Run `f` with `texture` bound to its recorded target. Textures we've never
/// seen bound or created have no target, so nothing can be done for them.
unsafe fn with_texture(texture: GLuint, function: &str, f: impl FnOnce(GLenum)) {
    let target = state().textures.target(texture);
    match target {
        Some(target) => with_texture_bound(target, texture, f),
        None => log!("{}: texture {} has no known target", function, texture),
    }
}

export_gl! {
    fn glBindTexture(target: GLenum, texture: GLuint) {
        state().textures.record(texture, target);
        gles32::BindTexture(es_target(target), texture);
    }

    fn glGenTextures(n: GLsizei, textures: *mut GLuint) {
        gles32::GenTextures(n, textures);
    }

    fn glCreateTextures(target: GLenum, n: GLsizei, textures: *mut GLuint) {
        gles32::GenTextures(n, textures);
        if textures.is_null() {
            return;
        }
        let mut state = state();
        for i in 0..usize::try_from(n).unwrap_or(0) {
            state.textures.record(*textures.add(i), target);
        }
    }

    fn glDeleteTextures(n: GLsizei, textures: *const GLuint) {
        if textures.is_null() {
            return;
        }
        {
            let mut state = state();
            for i in 0..usize::try_from(n).unwrap_or(0) {
                state.textures.remove(*textures.add(i));
            }
        }
        gles32::DeleteTextures(n, textures);
    }

    fn glBindTextureUnit(unit: GLuint, texture: GLuint) {
        let target = state().textures.target(texture);
        let mut old_unit: GLint = 0;
        gles32::GetIntegerv(gles32::ACTIVE_TEXTURE, &mut old_unit);
        gles32::ActiveTexture(gles32::TEXTURE0 + unit);
        match target {
            Some(target) => gles32::BindTexture(es_target(target), texture),
            // Texture 0 unbinds. Without a target, the best guess is 2D.
            None => gles32::BindTexture(gles32::TEXTURE_2D, texture),
        }
        gles32::ActiveTexture(old_unit as GLenum);
    }

    fn glTextureParameteri(texture: GLuint, pname: GLenum, param: GLint) {
        with_texture(texture, "glTextureParameteri", |target| {
            gles32::TexParameteri(target, pname, param)
        });
    }

    fn glTextureParameterf(texture: GLuint, pname: GLenum, param: GLfloat) {
        with_texture(texture, "glTextureParameterf", |target| {
            gles32::TexParameterf(target, pname, param)
        });
    }

    fn glTextureParameteriv(texture: GLuint, pname: GLenum, params: *const GLint) {
        with_texture(texture, "glTextureParameteriv", |target| {
            gles32::TexParameteriv(target, pname, params)
        });
    }

    fn glTextureParameterfv(texture: GLuint, pname: GLenum, params: *const GLfloat) {
        with_texture(texture, "glTextureParameterfv", |target| {
            gles32::TexParameterfv(target, pname, params)
        });
    }

    fn glTextureStorage2D(
        texture: GLuint,
        levels: GLsizei,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
    ) {
        with_texture(texture, "glTextureStorage2D", |target| {
            gles32::TexStorage2D(target, levels, internalformat, width, height)
        });
    }

    fn glTextureStorage3D(
        texture: GLuint,
        levels: GLsizei,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    ) {
        with_texture(texture, "glTextureStorage3D", |target| {
            gles32::TexStorage3D(target, levels, internalformat, width, height, depth)
        });
    }

    fn glTextureSubImage2D(
        texture: GLuint,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void,
    ) {
        with_texture(texture, "glTextureSubImage2D", |target| {
            gles32::TexSubImage2D(
                target, level, xoffset, yoffset, width, height, format, type_, pixels,
            )
        });
    }

    fn glGenerateTextureMipmap(texture: GLuint) {
        with_texture(texture, "glGenerateTextureMipmap", |target| {
            gles32::GenerateMipmap(target)
        });
    }

    fn glTexImage1D(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void,
    ) {
        gles32::TexImage2D(
            es_target(target),
            level,
            internalformat,
            width,
            1,
            border,
            format,
            type_,
            pixels,
        );
    }
}
