/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! This package contains OpenGL ES and EGL bindings generated with the
//! `gl_generator` crate.

#![allow(non_snake_case)]

#[allow(warnings)]
pub mod gles32 {
    include!(concat!(env!("OUT_DIR"), "/gles32.rs"));
}

#[allow(warnings)]
pub mod egl {
    // The EGL registry leaves the platform types to the includer. These are
    // the Xlib definitions: windows and pixmaps are XIDs, not pointers.
    pub type khronos_utime_nanoseconds_t = u64;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = isize;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *mut std::os::raw::c_void;
    pub type EGLNativePixmapType = std::os::raw::c_ulong;
    pub type EGLNativeWindowType = std::os::raw::c_ulong;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;

    include!(concat!(env!("OUT_DIR"), "/egl.rs"));
}
