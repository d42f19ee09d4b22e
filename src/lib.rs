/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! glxes lets applications written for desktop OpenGL and GLX run on systems
//! that only have OpenGL ES and EGL.
//!
//! It is built as `libGL.so`, to be preloaded or put in front of the real
//! one. Desktop GL calls are forwarded to the ES driver where ES has the same
//! function, and emulated where it doesn't. Shaders are translated to GLSL ES
//! on their way to the driver, and linked programs are cached on disk. GLX is
//! implemented on EGL.
//!
//! In various places, the terms "desktop" and "ES" are used to distinguish
//! between the API the application uses and the API the driver provides.
//! For example:
//! - A "desktop shader" is what the application passed to `glShaderSource`.
//! - An "ES shader" is what we pass to the driver.
//!
//! Nothing here runs until the application calls one of the exported
//! functions. The native libraries are loaded on that first call.

// Allow the crate to have a non-snake-case name (GL).
// This also allows items in the crate to have non-snake-case names, which
// every exported function has.
#![allow(non_snake_case)]
// The documentation for this crate is intended to include private items.
#![allow(rustdoc::private_intra_doc_links)]

#[macro_use]
mod log;
#[macro_use]
pub mod gl;
pub mod gles;
pub mod glx;
pub mod hash;
pub mod options;
pub mod paths;
pub mod shader;
