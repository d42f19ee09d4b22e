/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! GLX attribute lists, and what they mean in EGL terms.

use super::backend::{SURFACE_TYPE_PBUFFER_BIT, SURFACE_TYPE_WINDOW_BIT};
use std::ffi::c_int;

pub const GLX_USE_GL: c_int = 1;
pub const GLX_BUFFER_SIZE: c_int = 2;
pub const GLX_LEVEL: c_int = 3;
pub const GLX_RGBA: c_int = 4;
pub const GLX_DOUBLEBUFFER: c_int = 5;
pub const GLX_STEREO: c_int = 6;
pub const GLX_AUX_BUFFERS: c_int = 7;
pub const GLX_RED_SIZE: c_int = 8;
pub const GLX_GREEN_SIZE: c_int = 9;
pub const GLX_BLUE_SIZE: c_int = 10;
pub const GLX_ALPHA_SIZE: c_int = 11;
pub const GLX_DEPTH_SIZE: c_int = 12;
pub const GLX_STENCIL_SIZE: c_int = 13;
pub const GLX_CONFIG_CAVEAT: c_int = 0x20;
pub const GLX_X_VISUAL_TYPE: c_int = 0x22;
pub const GLX_VISUAL_ID: c_int = 0x800B;
pub const GLX_DRAWABLE_TYPE: c_int = 0x8010;
pub const GLX_RENDER_TYPE: c_int = 0x8011;
pub const GLX_X_RENDERABLE: c_int = 0x8012;
pub const GLX_FBCONFIG_ID: c_int = 0x8013;
pub const GLX_SAMPLE_BUFFERS: c_int = 100000;
pub const GLX_SAMPLES: c_int = 100001;

pub const GLX_NONE: c_int = 0x8000;
pub const GLX_TRUE_COLOR: c_int = 0x8002;
pub const GLX_WINDOW_BIT: c_int = 0x1;
pub const GLX_PBUFFER_BIT: c_int = 0x4;
pub const GLX_RGBA_BIT: c_int = 0x1;
pub const GLX_RGBA_TYPE: c_int = 0x8014;
pub const GLX_DONT_CARE: c_int = -1;

pub const GLX_CONTEXT_MAJOR_VERSION_ARB: c_int = 0x2091;
pub const GLX_CONTEXT_MINOR_VERSION_ARB: c_int = 0x2092;
pub const GLX_CONTEXT_FLAGS_ARB: c_int = 0x2094;
pub const GLX_CONTEXT_PROFILE_MASK_ARB: c_int = 0x9126;
pub const GLX_CONTEXT_CORE_PROFILE_BIT_ARB: c_int = 0x1;
pub const GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB: c_int = 0x2;

const EGL_BUFFER_SIZE: i32 = 0x3020;
const EGL_ALPHA_SIZE: i32 = 0x3021;
const EGL_BLUE_SIZE: i32 = 0x3022;
const EGL_GREEN_SIZE: i32 = 0x3023;
const EGL_RED_SIZE: i32 = 0x3024;
const EGL_DEPTH_SIZE: i32 = 0x3025;
const EGL_STENCIL_SIZE: i32 = 0x3026;
const EGL_CONFIG_ID: i32 = 0x3028;
const EGL_NATIVE_VISUAL_ID: i32 = 0x302E;
const EGL_SAMPLES: i32 = 0x3031;
const EGL_SAMPLE_BUFFERS: i32 = 0x3032;
const EGL_SURFACE_TYPE: i32 = 0x3033;
const EGL_NONE: i32 = 0x3038;
const EGL_RENDERABLE_TYPE: i32 = 0x3040;
const EGL_OPENGL_ES3_BIT: i32 = 0x0040;

/// Attributes of the legacy `glXChooseVisual` list that are flags, with no
/// value following them.
pub fn is_visual_flag(attribute: c_int) -> bool {
    matches!(
        attribute,
        GLX_USE_GL | GLX_RGBA | GLX_DOUBLEBUFFER | GLX_STEREO
    )
}

/// Read a `None`-terminated attribute list into pairs. With `legacy`, it's a
/// `glXChooseVisual` list, where flags have no value and count as set.
///
/// # Safety
/// `list` must be null or a properly terminated attribute list.
pub unsafe fn read_attrib_list(list: *const c_int, legacy: bool) -> Vec<(c_int, c_int)> {
    let mut pairs = Vec::new();
    if list.is_null() {
        return pairs;
    }
    let mut cursor = list;
    loop {
        let attribute = *cursor;
        cursor = cursor.add(1);
        if attribute == 0 {
            break;
        }
        if legacy && is_visual_flag(attribute) {
            pairs.push((attribute, 1));
        } else {
            pairs.push((attribute, *cursor));
            cursor = cursor.add(1);
        }
    }
    pairs
}

/// A framebuffer config request in EGL terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRequest {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
    pub alpha: i32,
    pub depth: i32,
    pub stencil: i32,
    pub sample_buffers: i32,
    pub samples: i32,
    pub surface_type: i32,
}

impl Default for ConfigRequest {
    /// What an application gets when it doesn't say: RGBA8888 with a 24-bit
    /// depth buffer, usable for windows and pbuffers.
    fn default() -> Self {
        ConfigRequest {
            red: 8,
            green: 8,
            blue: 8,
            alpha: 8,
            depth: 24,
            stencil: 0,
            sample_buffers: 0,
            samples: 0,
            surface_type: SURFACE_TYPE_WINDOW_BIT | SURFACE_TYPE_PBUFFER_BIT,
        }
    }
}

impl ConfigRequest {
    /// Build a request from GLX attribute pairs. Anything not mentioned
    /// keeps its [Default] value; `GLX_DONT_CARE` means zero.
    pub fn from_glx_attribs(pairs: &[(c_int, c_int)]) -> Self {
        let mut request = ConfigRequest::default();
        for &(attribute, value) in pairs {
            let value = if value == GLX_DONT_CARE { 0 } else { value };
            match attribute {
                GLX_RED_SIZE => request.red = value,
                GLX_GREEN_SIZE => request.green = value,
                GLX_BLUE_SIZE => request.blue = value,
                GLX_ALPHA_SIZE => request.alpha = value,
                GLX_DEPTH_SIZE => request.depth = value,
                GLX_STENCIL_SIZE => request.stencil = value,
                GLX_SAMPLE_BUFFERS => request.sample_buffers = value,
                GLX_SAMPLES => request.samples = value,
                // Whatever was asked for, both window and pbuffer surfaces
                // are needed to present at all.
                GLX_DRAWABLE_TYPE => (),
                // Always RGBA, always double buffered, always renderable.
                GLX_RGBA | GLX_RENDER_TYPE | GLX_DOUBLEBUFFER | GLX_X_RENDERABLE
                | GLX_USE_GL | GLX_X_VISUAL_TYPE | GLX_CONFIG_CAVEAT | GLX_LEVEL => (),
                _ => log_dbg!("Ignoring config attribute {:#x} = {}", attribute, value),
            }
        }
        request
    }

    /// The `eglChooseConfig` attribute list, terminated by `EGL_NONE`.
    pub fn egl_attribs(&self) -> Vec<i32> {
        let mut attribs = vec![
            EGL_RED_SIZE,
            self.red,
            EGL_GREEN_SIZE,
            self.green,
            EGL_BLUE_SIZE,
            self.blue,
            EGL_ALPHA_SIZE,
            self.alpha,
            EGL_DEPTH_SIZE,
            self.depth,
            EGL_STENCIL_SIZE,
            self.stencil,
            EGL_SURFACE_TYPE,
            self.surface_type,
            EGL_RENDERABLE_TYPE,
            EGL_OPENGL_ES3_BIT,
        ];
        if self.sample_buffers > 0 {
            attribs.extend([
                EGL_SAMPLE_BUFFERS,
                self.sample_buffers,
                EGL_SAMPLES,
                self.samples,
            ]);
        }
        attribs.push(EGL_NONE);
        attribs
    }

    /// The same request without window support, for platforms that have
    /// none. Presentation then has to go through a pbuffer.
    pub fn pbuffer_only(&self) -> Self {
        ConfigRequest {
            surface_type: SURFACE_TYPE_PBUFFER_BIT,
            ..self.clone()
        }
    }
}

/// Where the answer to a `glXGetFBConfigAttrib` query comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAttribute {
    /// Query this EGL config attribute.
    Egl(i32),
    /// The same for every config we hand out.
    Fixed(c_int),
}

pub fn config_attribute(attribute: c_int) -> Option<ConfigAttribute> {
    use ConfigAttribute::*;
    Some(match attribute {
        GLX_BUFFER_SIZE => Egl(EGL_BUFFER_SIZE),
        GLX_RED_SIZE => Egl(EGL_RED_SIZE),
        GLX_GREEN_SIZE => Egl(EGL_GREEN_SIZE),
        GLX_BLUE_SIZE => Egl(EGL_BLUE_SIZE),
        GLX_ALPHA_SIZE => Egl(EGL_ALPHA_SIZE),
        GLX_DEPTH_SIZE => Egl(EGL_DEPTH_SIZE),
        GLX_STENCIL_SIZE => Egl(EGL_STENCIL_SIZE),
        GLX_SAMPLE_BUFFERS => Egl(EGL_SAMPLE_BUFFERS),
        GLX_SAMPLES => Egl(EGL_SAMPLES),
        GLX_VISUAL_ID => Egl(EGL_NATIVE_VISUAL_ID),
        GLX_FBCONFIG_ID => Egl(EGL_CONFIG_ID),
        GLX_USE_GL | GLX_RGBA | GLX_DOUBLEBUFFER | GLX_X_RENDERABLE => Fixed(1),
        GLX_LEVEL | GLX_STEREO | GLX_AUX_BUFFERS => Fixed(0),
        GLX_RENDER_TYPE => Fixed(GLX_RGBA_BIT),
        // Windows work one way or another, see super::session.
        GLX_DRAWABLE_TYPE => Fixed(GLX_WINDOW_BIT | GLX_PBUFFER_BIT),
        GLX_X_VISUAL_TYPE => Fixed(GLX_TRUE_COLOR),
        GLX_CONFIG_CAVEAT => Fixed(GLX_NONE),
        _ => return None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Core,
    Compatibility,
}

/// The desktop context an application asked for with
/// `glXCreateContextAttribsARB`. Only logged: the ES version is negotiated
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextAttribs {
    pub major: c_int,
    pub minor: c_int,
    pub profile: Profile,
    pub flags: c_int,
}

impl Default for ContextAttribs {
    fn default() -> Self {
        ContextAttribs {
            major: 1,
            minor: 0,
            profile: Profile::Core,
            flags: 0,
        }
    }
}

pub fn parse_context_attribs(pairs: &[(c_int, c_int)]) -> ContextAttribs {
    let mut attribs = ContextAttribs::default();
    for &(attribute, value) in pairs {
        match attribute {
            GLX_CONTEXT_MAJOR_VERSION_ARB => attribs.major = value,
            GLX_CONTEXT_MINOR_VERSION_ARB => attribs.minor = value,
            GLX_CONTEXT_PROFILE_MASK_ARB => {
                if value & GLX_CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB != 0 {
                    log!("Compatibility profile requested, providing a core profile instead");
                    attribs.profile = Profile::Compatibility;
                }
            }
            GLX_CONTEXT_FLAGS_ARB => {
                attribs.flags = value;
                log_dbg!("Context flags {:#x} requested", value);
            }
            _ => log!("Ignoring unknown context attribute {:#x} = {}", attribute, value),
        }
    }
    attribs
}
