/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Draw calls that feed the uniforms replacing `gl_DrawID`, `gl_BaseVertex`
//! and `gl_BaseInstance` (see [crate::shader::preprocess]).
//!
//! Multi-draws become a loop of single draws, so that the draw index can be
//! set in between.

use crate::gles::gles32;
use crate::gles::gles32::types::*;
use crate::shader::preprocess::BUILTIN_POLYFILLS;
use std::ffi::{c_void, CString};

/// Location of the uniform standing in for `builtin` in the current program,
/// if the program uses it.
unsafe fn polyfill_location(builtin: &str) -> Option<GLint> {
    let polyfill = BUILTIN_POLYFILLS.iter().find(|p| p.builtin == builtin)?;
    let mut program: GLint = 0;
    gles32::GetIntegerv(gles32::CURRENT_PROGRAM, &mut program);
    if program == 0 {
        return None;
    }
    let name = CString::new(polyfill.replacement).ok()?;
    let location = gles32::GetUniformLocation(program as GLuint, name.as_ptr());
    (location >= 0).then_some(location)
}

unsafe fn set_polyfill(location: Option<GLint>, value: GLint) {
    if let Some(location) = location {
        gles32::Uniform1i(location, value);
    }
}

/// Run one draw per element of a multi-draw, setting the draw index for each.
unsafe fn multi_draw(drawcount: GLsizei, counts: *const GLsizei, mut draw: impl FnMut(usize)) {
    if counts.is_null() {
        return;
    }
    let draw_id = polyfill_location("gl_DrawID");
    for i in 0..usize::try_from(drawcount).unwrap_or(0) {
        if *counts.add(i) <= 0 {
            continue;
        }
        set_polyfill(draw_id, i as GLint);
        draw(i);
    }
    set_polyfill(draw_id, 0);
}

export_gl! {
    fn glMultiDrawArrays(
        mode: GLenum,
        first: *const GLint,
        count: *const GLsizei,
        drawcount: GLsizei,
    ) {
        multi_draw(drawcount, count, |i| {
            gles32::DrawArrays(mode, *first.add(i), *count.add(i))
        });
    }

    fn glMultiDrawElements(
        mode: GLenum,
        count: *const GLsizei,
        type_: GLenum,
        indices: *const *const c_void,
        drawcount: GLsizei,
    ) {
        multi_draw(drawcount, count, |i| {
            gles32::DrawElements(mode, *count.add(i), type_, *indices.add(i))
        });
    }

    fn glMultiDrawElementsBaseVertex(
        mode: GLenum,
        count: *const GLsizei,
        type_: GLenum,
        indices: *const *const c_void,
        drawcount: GLsizei,
        basevertex: *const GLint,
    ) {
        let base_vertex = polyfill_location("gl_BaseVertex");
        multi_draw(drawcount, count, |i| {
            let basevertex = *basevertex.add(i);
            set_polyfill(base_vertex, basevertex);
            gles32::DrawElementsBaseVertex(mode, *count.add(i), type_, *indices.add(i), basevertex)
        });
        set_polyfill(base_vertex, 0);
    }

    fn glDrawElementsBaseVertex(
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        basevertex: GLint,
    ) {
        let base_vertex = polyfill_location("gl_BaseVertex");
        set_polyfill(base_vertex, basevertex);
        gles32::DrawElementsBaseVertex(mode, count, type_, indices, basevertex);
        set_polyfill(base_vertex, 0);
    }

    fn glDrawElementsInstancedBaseVertex(
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        basevertex: GLint,
    ) {
        let base_vertex = polyfill_location("gl_BaseVertex");
        set_polyfill(base_vertex, basevertex);
        gles32::DrawElementsInstancedBaseVertex(
            mode,
            count,
            type_,
            indices,
            instancecount,
            basevertex,
        );
        set_polyfill(base_vertex, 0);
    }

    fn glDrawArraysInstancedBaseInstance(
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instancecount: GLsizei,
        baseinstance: GLuint,
    ) {
        // Only shaders reading gl_BaseInstance see the offset. Instanced
        // attributes still start at instance 0.
        let base_instance = polyfill_location("gl_BaseInstance");
        set_polyfill(base_instance, baseinstance as GLint);
        gles32::DrawArraysInstanced(mode, first, count, instancecount);
        set_polyfill(base_instance, 0);
    }

    fn glDrawElementsInstancedBaseInstance(
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        baseinstance: GLuint,
    ) {
        let base_instance = polyfill_location("gl_BaseInstance");
        set_polyfill(base_instance, baseinstance as GLint);
        gles32::DrawElementsInstanced(mode, count, type_, indices, instancecount);
        set_polyfill(base_instance, 0);
    }

    fn glDrawElementsInstancedBaseVertexBaseInstance(
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
        basevertex: GLint,
        baseinstance: GLuint,
    ) {
        let base_vertex = polyfill_location("gl_BaseVertex");
        let base_instance = polyfill_location("gl_BaseInstance");
        set_polyfill(base_vertex, basevertex);
        set_polyfill(base_instance, baseinstance as GLint);
        gles32::DrawElementsInstancedBaseVertex(
            mode,
            count,
            type_,
            indices,
            instancecount,
            basevertex,
        );
        set_polyfill(base_vertex, 0);
        set_polyfill(base_instance, 0);
    }
}
