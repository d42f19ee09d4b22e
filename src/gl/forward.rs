/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Functions that exist in ES with the same signature and meaning.

use crate::gles::gles32::types::*;
use std::ffi::c_void;

forward_gl! {
    // State
    glActiveTexture => ActiveTexture(texture: GLenum);
    glBlendColor => BlendColor(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat);
    glBlendEquation => BlendEquation(mode: GLenum);
    glBlendEquationSeparate => BlendEquationSeparate(mode_rgb: GLenum, mode_alpha: GLenum);
    glBlendEquationi => BlendEquationi(buf: GLuint, mode: GLenum);
    glBlendFunc => BlendFunc(sfactor: GLenum, dfactor: GLenum);
    glBlendFuncSeparate => BlendFuncSeparate(
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    );
    glBlendFunci => BlendFunci(buf: GLuint, src: GLenum, dst: GLenum);
    glColorMask => ColorMask(red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean);
    glColorMaski => ColorMaski(index: GLuint, r: GLboolean, g: GLboolean, b: GLboolean, a: GLboolean);
    glCullFace => CullFace(mode: GLenum);
    glDepthFunc => DepthFunc(func: GLenum);
    glDepthMask => DepthMask(flag: GLboolean);
    glDepthRangef => DepthRangef(n: GLfloat, f: GLfloat);
    glDisable => Disable(cap: GLenum);
    glDisablei => Disablei(target: GLenum, index: GLuint);
    glEnable => Enable(cap: GLenum);
    glEnablei => Enablei(target: GLenum, index: GLuint);
    glFrontFace => FrontFace(mode: GLenum);
    glHint => Hint(target: GLenum, mode: GLenum);
    glIsEnabled => IsEnabled(cap: GLenum) -> GLboolean;
    glLineWidth => LineWidth(width: GLfloat);
    glPixelStorei => PixelStorei(pname: GLenum, param: GLint);
    glPolygonOffset => PolygonOffset(factor: GLfloat, units: GLfloat);
    glSampleCoverage => SampleCoverage(value: GLfloat, invert: GLboolean);
    glScissor => Scissor(x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    glStencilFunc => StencilFunc(func: GLenum, ref_: GLint, mask: GLuint);
    glStencilFuncSeparate => StencilFuncSeparate(face: GLenum, func: GLenum, ref_: GLint, mask: GLuint);
    glStencilMask => StencilMask(mask: GLuint);
    glStencilMaskSeparate => StencilMaskSeparate(face: GLenum, mask: GLuint);
    glStencilOp => StencilOp(fail: GLenum, zfail: GLenum, zpass: GLenum);
    glStencilOpSeparate => StencilOpSeparate(face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum);
    glViewport => Viewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei);

    // Queries
    glGetBooleanv => GetBooleanv(pname: GLenum, data: *mut GLboolean);
    glGetError => GetError() -> GLenum;
    glGetFloatv => GetFloatv(pname: GLenum, data: *mut GLfloat);
    glGetInteger64v => GetInteger64v(pname: GLenum, data: *mut GLint64);
    glGetIntegeri_v => GetIntegeri_v(target: GLenum, index: GLuint, data: *mut GLint);
    glGetStringi => GetStringi(name: GLenum, index: GLuint) -> *const GLubyte;
    glBeginQuery => BeginQuery(target: GLenum, id: GLuint);
    glDeleteQueries => DeleteQueries(n: GLsizei, ids: *const GLuint);
    glEndQuery => EndQuery(target: GLenum);
    glGenQueries => GenQueries(n: GLsizei, ids: *mut GLuint);
    glGetQueryObjectuiv => GetQueryObjectuiv(id: GLuint, pname: GLenum, params: *mut GLuint);
    glGetQueryiv => GetQueryiv(target: GLenum, pname: GLenum, params: *mut GLint);
    glIsQuery => IsQuery(id: GLuint) -> GLboolean;

    // Clearing and drawing
    glClear => Clear(mask: GLbitfield);
    glClearBufferfi => ClearBufferfi(buffer: GLenum, drawbuffer: GLint, depth: GLfloat, stencil: GLint);
    glClearBufferfv => ClearBufferfv(buffer: GLenum, drawbuffer: GLint, value: *const GLfloat);
    glClearBufferiv => ClearBufferiv(buffer: GLenum, drawbuffer: GLint, value: *const GLint);
    glClearBufferuiv => ClearBufferuiv(buffer: GLenum, drawbuffer: GLint, value: *const GLuint);
    glClearColor => ClearColor(red: GLfloat, green: GLfloat, blue: GLfloat, alpha: GLfloat);
    glClearDepthf => ClearDepthf(d: GLfloat);
    glClearStencil => ClearStencil(s: GLint);
    glDispatchCompute => DispatchCompute(num_groups_x: GLuint, num_groups_y: GLuint, num_groups_z: GLuint);
    glDispatchComputeIndirect => DispatchComputeIndirect(indirect: GLintptr);
    glDrawArrays => DrawArrays(mode: GLenum, first: GLint, count: GLsizei);
    glDrawArraysIndirect => DrawArraysIndirect(mode: GLenum, indirect: *const c_void);
    glDrawArraysInstanced => DrawArraysInstanced(mode: GLenum, first: GLint, count: GLsizei, instancecount: GLsizei);
    glDrawBuffers => DrawBuffers(n: GLsizei, bufs: *const GLenum);
    glDrawElements => DrawElements(mode: GLenum, count: GLsizei, type_: GLenum, indices: *const c_void);
    glDrawElementsIndirect => DrawElementsIndirect(mode: GLenum, type_: GLenum, indirect: *const c_void);
    glDrawElementsInstanced => DrawElementsInstanced(
        mode: GLenum,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
        instancecount: GLsizei,
    );
    glDrawRangeElements => DrawRangeElements(
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        type_: GLenum,
        indices: *const c_void,
    );
    glFinish => Finish();
    glFlush => Flush();
    glMemoryBarrier => MemoryBarrier(barriers: GLbitfield);
    glReadBuffer => ReadBuffer(src: GLenum);
    glReadPixels => ReadPixels(
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *mut c_void,
    );

    // Buffers and vertex arrays
    glBindBuffer => BindBuffer(target: GLenum, buffer: GLuint);
    glBindBufferBase => BindBufferBase(target: GLenum, index: GLuint, buffer: GLuint);
    glBindBufferRange => BindBufferRange(
        target: GLenum,
        index: GLuint,
        buffer: GLuint,
        offset: GLintptr,
        size: GLsizeiptr,
    );
    glBindVertexArray => BindVertexArray(array: GLuint);
    glBufferData => BufferData(target: GLenum, size: GLsizeiptr, data: *const c_void, usage: GLenum);
    glBufferSubData => BufferSubData(target: GLenum, offset: GLintptr, size: GLsizeiptr, data: *const c_void);
    glCopyBufferSubData => CopyBufferSubData(
        read_target: GLenum,
        write_target: GLenum,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    );
    glDeleteBuffers => DeleteBuffers(n: GLsizei, buffers: *const GLuint);
    glDeleteVertexArrays => DeleteVertexArrays(n: GLsizei, arrays: *const GLuint);
    glDisableVertexAttribArray => DisableVertexAttribArray(index: GLuint);
    glEnableVertexAttribArray => EnableVertexAttribArray(index: GLuint);
    glFlushMappedBufferRange => FlushMappedBufferRange(target: GLenum, offset: GLintptr, length: GLsizeiptr);
    glGenBuffers => GenBuffers(n: GLsizei, buffers: *mut GLuint);
    glGenVertexArrays => GenVertexArrays(n: GLsizei, arrays: *mut GLuint);
    glGetBufferParameteriv => GetBufferParameteriv(target: GLenum, pname: GLenum, params: *mut GLint);
    glGetBufferPointerv => GetBufferPointerv(target: GLenum, pname: GLenum, params: *mut *mut c_void);
    glGetVertexAttribfv => GetVertexAttribfv(index: GLuint, pname: GLenum, params: *mut GLfloat);
    glGetVertexAttribiv => GetVertexAttribiv(index: GLuint, pname: GLenum, params: *mut GLint);
    glGetVertexAttribPointerv => GetVertexAttribPointerv(index: GLuint, pname: GLenum, pointer: *mut *mut c_void);
    glIsBuffer => IsBuffer(buffer: GLuint) -> GLboolean;
    glIsVertexArray => IsVertexArray(array: GLuint) -> GLboolean;
    glUnmapBuffer => UnmapBuffer(target: GLenum) -> GLboolean;
    glVertexAttrib1f => VertexAttrib1f(index: GLuint, x: GLfloat);
    glVertexAttrib2f => VertexAttrib2f(index: GLuint, x: GLfloat, y: GLfloat);
    glVertexAttrib3f => VertexAttrib3f(index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat);
    glVertexAttrib4f => VertexAttrib4f(index: GLuint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat);
    glVertexAttrib4fv => VertexAttrib4fv(index: GLuint, v: *const GLfloat);
    glVertexAttribDivisor => VertexAttribDivisor(index: GLuint, divisor: GLuint);
    glVertexAttribIPointer => VertexAttribIPointer(
        index: GLuint,
        size: GLint,
        type_: GLenum,
        stride: GLsizei,
        pointer: *const c_void,
    );
    glVertexAttribPointer => VertexAttribPointer(
        index: GLuint,
        size: GLint,
        type_: GLenum,
        normalized: GLboolean,
        stride: GLsizei,
        pointer: *const c_void,
    );

    // Framebuffers and renderbuffers
    glBindFramebuffer => BindFramebuffer(target: GLenum, framebuffer: GLuint);
    glBindRenderbuffer => BindRenderbuffer(target: GLenum, renderbuffer: GLuint);
    glBlitFramebuffer => BlitFramebuffer(
        src_x0: GLint,
        src_y0: GLint,
        src_x1: GLint,
        src_y1: GLint,
        dst_x0: GLint,
        dst_y0: GLint,
        dst_x1: GLint,
        dst_y1: GLint,
        mask: GLbitfield,
        filter: GLenum,
    );
    glCheckFramebufferStatus => CheckFramebufferStatus(target: GLenum) -> GLenum;
    glDeleteFramebuffers => DeleteFramebuffers(n: GLsizei, framebuffers: *const GLuint);
    glDeleteRenderbuffers => DeleteRenderbuffers(n: GLsizei, renderbuffers: *const GLuint);
    glFramebufferRenderbuffer => FramebufferRenderbuffer(
        target: GLenum,
        attachment: GLenum,
        renderbuffertarget: GLenum,
        renderbuffer: GLuint,
    );
    glFramebufferTexture2D => FramebufferTexture2D(
        target: GLenum,
        attachment: GLenum,
        textarget: GLenum,
        texture: GLuint,
        level: GLint,
    );
    glFramebufferTextureLayer => FramebufferTextureLayer(
        target: GLenum,
        attachment: GLenum,
        texture: GLuint,
        level: GLint,
        layer: GLint,
    );
    glGenFramebuffers => GenFramebuffers(n: GLsizei, framebuffers: *mut GLuint);
    glGenRenderbuffers => GenRenderbuffers(n: GLsizei, renderbuffers: *mut GLuint);
    glGetFramebufferAttachmentParameteriv => GetFramebufferAttachmentParameteriv(
        target: GLenum,
        attachment: GLenum,
        pname: GLenum,
        params: *mut GLint,
    );
    glInvalidateFramebuffer => InvalidateFramebuffer(
        target: GLenum,
        num_attachments: GLsizei,
        attachments: *const GLenum,
    );
    glIsFramebuffer => IsFramebuffer(framebuffer: GLuint) -> GLboolean;
    glIsRenderbuffer => IsRenderbuffer(renderbuffer: GLuint) -> GLboolean;
    glRenderbufferStorage => RenderbufferStorage(
        target: GLenum,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
    );
    glRenderbufferStorageMultisample => RenderbufferStorageMultisample(
        target: GLenum,
        samples: GLsizei,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
    );

    // Textures and samplers. Anything that takes a target goes straight
    // through: the target tracking only needs to see names being bound.
    glBindImageTexture => BindImageTexture(
        unit: GLuint,
        texture: GLuint,
        level: GLint,
        layered: GLboolean,
        layer: GLint,
        access: GLenum,
        format: GLenum,
    );
    glBindSampler => BindSampler(unit: GLuint, sampler: GLuint);
    glCompressedTexImage2D => CompressedTexImage2D(
        target: GLenum,
        level: GLint,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        image_size: GLsizei,
        data: *const c_void,
    );
    glCompressedTexSubImage2D => CompressedTexSubImage2D(
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        image_size: GLsizei,
        data: *const c_void,
    );
    glCopyTexSubImage2D => CopyTexSubImage2D(
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        x: GLint,
        y: GLint,
        width: GLsizei,
        height: GLsizei,
    );
    glDeleteSamplers => DeleteSamplers(count: GLsizei, samplers: *const GLuint);
    glGenSamplers => GenSamplers(count: GLsizei, samplers: *mut GLuint);
    glGenerateMipmap => GenerateMipmap(target: GLenum);
    glGetTexParameterfv => GetTexParameterfv(target: GLenum, pname: GLenum, params: *mut GLfloat);
    glGetTexParameteriv => GetTexParameteriv(target: GLenum, pname: GLenum, params: *mut GLint);
    glIsTexture => IsTexture(texture: GLuint) -> GLboolean;
    glSamplerParameterf => SamplerParameterf(sampler: GLuint, pname: GLenum, param: GLfloat);
    glSamplerParameterfv => SamplerParameterfv(sampler: GLuint, pname: GLenum, param: *const GLfloat);
    glSamplerParameteri => SamplerParameteri(sampler: GLuint, pname: GLenum, param: GLint);
    glSamplerParameteriv => SamplerParameteriv(sampler: GLuint, pname: GLenum, param: *const GLint);
    glTexBuffer => TexBuffer(target: GLenum, internalformat: GLenum, buffer: GLuint);
    glTexImage2D => TexImage2D(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void,
    );
    glTexImage3D => TexImage3D(
        target: GLenum,
        level: GLint,
        internalformat: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        border: GLint,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void,
    );
    glTexParameterf => TexParameterf(target: GLenum, pname: GLenum, param: GLfloat);
    glTexParameterfv => TexParameterfv(target: GLenum, pname: GLenum, params: *const GLfloat);
    glTexParameteri => TexParameteri(target: GLenum, pname: GLenum, param: GLint);
    glTexParameteriv => TexParameteriv(target: GLenum, pname: GLenum, params: *const GLint);
    glTexStorage2D => TexStorage2D(
        target: GLenum,
        levels: GLsizei,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
    );
    glTexStorage3D => TexStorage3D(
        target: GLenum,
        levels: GLsizei,
        internalformat: GLenum,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
    );
    glTexSubImage2D => TexSubImage2D(
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void,
    );
    glTexSubImage3D => TexSubImage3D(
        target: GLenum,
        level: GLint,
        xoffset: GLint,
        yoffset: GLint,
        zoffset: GLint,
        width: GLsizei,
        height: GLsizei,
        depth: GLsizei,
        format: GLenum,
        type_: GLenum,
        pixels: *const c_void,
    );

    // Shaders and programs not needing our attention
    glBindAttribLocation => BindAttribLocation(program: GLuint, index: GLuint, name: *const GLchar);
    glCompileShader => CompileShader(shader: GLuint);
    glGetActiveAttrib => GetActiveAttrib(
        program: GLuint,
        index: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        size: *mut GLint,
        type_: *mut GLenum,
        name: *mut GLchar,
    );
    glGetActiveUniform => GetActiveUniform(
        program: GLuint,
        index: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        size: *mut GLint,
        type_: *mut GLenum,
        name: *mut GLchar,
    );
    glGetActiveUniformBlockiv => GetActiveUniformBlockiv(
        program: GLuint,
        uniform_block_index: GLuint,
        pname: GLenum,
        params: *mut GLint,
    );
    glGetAttribLocation => GetAttribLocation(program: GLuint, name: *const GLchar) -> GLint;
    glGetFragDataLocation => GetFragDataLocation(program: GLuint, name: *const GLchar) -> GLint;
    glGetProgramBinary => GetProgramBinary(
        program: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        binary_format: *mut GLenum,
        binary: *mut c_void,
    );
    glGetProgramInfoLog => GetProgramInfoLog(
        program: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    );
    glGetProgramiv => GetProgramiv(program: GLuint, pname: GLenum, params: *mut GLint);
    glGetShaderInfoLog => GetShaderInfoLog(
        shader: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        info_log: *mut GLchar,
    );
    glGetShaderSource => GetShaderSource(
        shader: GLuint,
        buf_size: GLsizei,
        length: *mut GLsizei,
        source: *mut GLchar,
    );
    glGetShaderiv => GetShaderiv(shader: GLuint, pname: GLenum, params: *mut GLint);
    glGetUniformBlockIndex => GetUniformBlockIndex(program: GLuint, uniform_block_name: *const GLchar) -> GLuint;
    glGetUniformLocation => GetUniformLocation(program: GLuint, name: *const GLchar) -> GLint;
    glGetUniformfv => GetUniformfv(program: GLuint, location: GLint, params: *mut GLfloat);
    glGetUniformiv => GetUniformiv(program: GLuint, location: GLint, params: *mut GLint);
    glIsProgram => IsProgram(program: GLuint) -> GLboolean;
    glIsShader => IsShader(shader: GLuint) -> GLboolean;
    glProgramBinary => ProgramBinary(
        program: GLuint,
        binary_format: GLenum,
        binary: *const c_void,
        length: GLsizei,
    );
    glProgramParameteri => ProgramParameteri(program: GLuint, pname: GLenum, value: GLint);
    glTransformFeedbackVaryings => TransformFeedbackVaryings(
        program: GLuint,
        count: GLsizei,
        varyings: *const *const GLchar,
        buffer_mode: GLenum,
    );
    glUniformBlockBinding => UniformBlockBinding(
        program: GLuint,
        uniform_block_index: GLuint,
        uniform_block_binding: GLuint,
    );
    glUseProgram => UseProgram(program: GLuint);
    glValidateProgram => ValidateProgram(program: GLuint);

    // Uniforms
    glUniform1f => Uniform1f(location: GLint, v0: GLfloat);
    glUniform2f => Uniform2f(location: GLint, v0: GLfloat, v1: GLfloat);
    glUniform3f => Uniform3f(location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat);
    glUniform4f => Uniform4f(location: GLint, v0: GLfloat, v1: GLfloat, v2: GLfloat, v3: GLfloat);
    glUniform1i => Uniform1i(location: GLint, v0: GLint);
    glUniform2i => Uniform2i(location: GLint, v0: GLint, v1: GLint);
    glUniform3i => Uniform3i(location: GLint, v0: GLint, v1: GLint, v2: GLint);
    glUniform4i => Uniform4i(location: GLint, v0: GLint, v1: GLint, v2: GLint, v3: GLint);
    glUniform1ui => Uniform1ui(location: GLint, v0: GLuint);
    glUniform2ui => Uniform2ui(location: GLint, v0: GLuint, v1: GLuint);
    glUniform3ui => Uniform3ui(location: GLint, v0: GLuint, v1: GLuint, v2: GLuint);
    glUniform4ui => Uniform4ui(location: GLint, v0: GLuint, v1: GLuint, v2: GLuint, v3: GLuint);
    glUniform1fv => Uniform1fv(location: GLint, count: GLsizei, value: *const GLfloat);
    glUniform2fv => Uniform2fv(location: GLint, count: GLsizei, value: *const GLfloat);
    glUniform3fv => Uniform3fv(location: GLint, count: GLsizei, value: *const GLfloat);
    glUniform4fv => Uniform4fv(location: GLint, count: GLsizei, value: *const GLfloat);
    glUniform1iv => Uniform1iv(location: GLint, count: GLsizei, value: *const GLint);
    glUniform2iv => Uniform2iv(location: GLint, count: GLsizei, value: *const GLint);
    glUniform3iv => Uniform3iv(location: GLint, count: GLsizei, value: *const GLint);
    glUniform4iv => Uniform4iv(location: GLint, count: GLsizei, value: *const GLint);
    glUniform1uiv => Uniform1uiv(location: GLint, count: GLsizei, value: *const GLuint);
    glUniform2uiv => Uniform2uiv(location: GLint, count: GLsizei, value: *const GLuint);
    glUniform3uiv => Uniform3uiv(location: GLint, count: GLsizei, value: *const GLuint);
    glUniform4uiv => Uniform4uiv(location: GLint, count: GLsizei, value: *const GLuint);
    glUniformMatrix2fv => UniformMatrix2fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    glUniformMatrix3fv => UniformMatrix3fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    glUniformMatrix4fv => UniformMatrix4fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    glUniformMatrix2x3fv => UniformMatrix2x3fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    glUniformMatrix3x2fv => UniformMatrix3x2fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    glUniformMatrix2x4fv => UniformMatrix2x4fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    glUniformMatrix4x2fv => UniformMatrix4x2fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    glUniformMatrix3x4fv => UniformMatrix3x4fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);
    glUniformMatrix4x3fv => UniformMatrix4x3fv(location: GLint, count: GLsizei, transpose: GLboolean, value: *const GLfloat);

    // Sync objects and transform feedback
    glClientWaitSync => ClientWaitSync(sync: GLsync, flags: GLbitfield, timeout: GLuint64) -> GLenum;
    glDeleteSync => DeleteSync(sync: GLsync);
    glFenceSync => FenceSync(condition: GLenum, flags: GLbitfield) -> GLsync;
    glGetSynciv => GetSynciv(
        sync: GLsync,
        pname: GLenum,
        buf_size: GLsizei,
        length: *mut GLsizei,
        values: *mut GLint,
    );
    glIsSync => IsSync(sync: GLsync) -> GLboolean;
    glWaitSync => WaitSync(sync: GLsync, flags: GLbitfield, timeout: GLuint64);
    glBeginTransformFeedback => BeginTransformFeedback(primitive_mode: GLenum);
    glBindTransformFeedback => BindTransformFeedback(target: GLenum, id: GLuint);
    glDeleteTransformFeedbacks => DeleteTransformFeedbacks(n: GLsizei, ids: *const GLuint);
    glEndTransformFeedback => EndTransformFeedback();
    glGenTransformFeedbacks => GenTransformFeedbacks(n: GLsizei, ids: *mut GLuint);

    // Debug output
    glDebugMessageCallback => DebugMessageCallback(callback: GLDEBUGPROC, user_param: *const c_void);
    glDebugMessageControl => DebugMessageControl(
        source: GLenum,
        type_: GLenum,
        severity: GLenum,
        count: GLsizei,
        ids: *const GLuint,
        enabled: GLboolean,
    );
    glObjectLabel => ObjectLabel(identifier: GLenum, name: GLuint, length: GLsizei, label: *const GLchar);
    glPopDebugGroup => PopDebugGroup();
    glPushDebugGroup => PushDebugGroup(source: GLenum, id: GLuint, length: GLsizei, message: *const GLchar);
}
