/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Texture target tracking.
//!
//! Desktop GL's direct state access functions take just a texture name. ES
//! only has the bind-then-modify functions, which need the texture's target,
//! and offers no way to ask for it. So we remember the target each texture was
//! created or first bound with.

use super::gles32;
use super::gles32::types::*;
use std::collections::HashMap;

/// Desktop-only target. ES has no 1D textures, so these become 2D ones.
pub const TEXTURE_1D: GLenum = 0x0DE0;

#[derive(Debug, Default)]
pub struct TextureTargets {
    targets: HashMap<GLuint, GLenum>,
}

impl TextureTargets {
    /// Texture 0 is the default texture of every target and is never
    /// recorded.
    pub fn record(&mut self, texture: GLuint, target: GLenum) {
        if texture != 0 {
            self.targets.insert(texture, target);
        }
    }

    pub fn target(&self, texture: GLuint) -> Option<GLenum> {
        self.targets.get(&texture).copied()
    }

    pub fn remove(&mut self, texture: GLuint) {
        self.targets.remove(&texture);
    }
}

/// The ES target for a desktop target.
pub fn es_target(target: GLenum) -> GLenum {
    match target {
        TEXTURE_1D => gles32::TEXTURE_2D,
        _ => target,
    }
}

/// The `glGetIntegerv` parameter that reports what's bound to `target`.
pub fn binding_query(target: GLenum) -> GLenum {
    match target {
        TEXTURE_1D | gles32::TEXTURE_2D => gles32::TEXTURE_BINDING_2D,
        gles32::TEXTURE_2D_MULTISAMPLE => gles32::TEXTURE_BINDING_2D_MULTISAMPLE,
        gles32::TEXTURE_2D_ARRAY => gles32::TEXTURE_BINDING_2D_ARRAY,
        gles32::TEXTURE_2D_MULTISAMPLE_ARRAY => gles32::TEXTURE_BINDING_2D_MULTISAMPLE_ARRAY,
        gles32::TEXTURE_3D => gles32::TEXTURE_BINDING_3D,
        gles32::TEXTURE_CUBE_MAP => gles32::TEXTURE_BINDING_CUBE_MAP,
        gles32::TEXTURE_CUBE_MAP_ARRAY => gles32::TEXTURE_BINDING_CUBE_MAP_ARRAY,
        gles32::TEXTURE_BUFFER => gles32::TEXTURE_BINDING_BUFFER,
        _ => {
            log!("Unknown texture target {:#x}, assuming 2D", target);
            gles32::TEXTURE_BINDING_2D
        }
    }
}

/// Run `f` with `texture` bound to `target` on the active texture unit, then
/// put back whatever was bound there before.
pub unsafe fn with_texture_bound<R>(target: GLenum, texture: GLuint, f: impl FnOnce(GLenum) -> R) -> R {
    let es_target = es_target(target);
    let mut old_texture: GLint = 0;
    gles32::GetIntegerv(binding_query(target), &mut old_texture);
    gles32::BindTexture(es_target, texture);
    let result = f(es_target);
    gles32::BindTexture(es_target, old_texture as GLuint);
    result
}
