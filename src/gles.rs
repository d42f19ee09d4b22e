/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The OpenGL ES and EGL driver underneath us.
//!
//! - [loader] opens the native EGL and GLES libraries and fills in the
//!   generated bindings.
//! - [gles32] and [egl] are the raw bindings generated from the Khronos
//!   registry. **Their functions must only be called after
//!   [ensure_loaded].**
//! - [native] implements the parts of the driver other modules talk to
//!   through traits, e.g. [crate::shader::cache::ProgramDriver].
//! - [textures] tracks texture targets, which ES has no way to query.
//! - [buffers] has the buffer mapping helpers.
//!
//! Useful resources:
//! - [OpenGL ES 3.2 reference pages](https://registry.khronos.org/OpenGL-Refpages/es3/)
//! - [EGL 1.5 specification](https://registry.khronos.org/EGL/specs/eglspec.1.5.pdf)
//! - Extensions:
//!   - [EXT_buffer_storage](https://registry.khronos.org/OpenGL/extensions/EXT/EXT_buffer_storage.txt)
//!   - [OES_mapbuffer](https://registry.khronos.org/OpenGL/extensions/OES/OES_mapbuffer.txt)
//!   - [NV_conditional_render](https://registry.khronos.org/OpenGL/extensions/NV/NV_conditional_render.txt)

pub mod buffers;
mod loader;
pub mod native;
pub mod textures;

pub use glxes_gl_bindings::{egl, gles32};
pub use loader::{egl_proc_address, ensure_loaded, library_candidates, Libraries};
