/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! GLX, implemented with EGL.
//!
//! - [entry_points] has the exported `glX*` functions.
//! - [session] is the state machine deciding how frames reach the window.
//! - [backend] is the trait it talks to the platform through, implemented by
//!   [egl_x11].
//! - [config] translates GLX attribute lists.
//! - [fault_guard] recovers from drivers crashing in the one call known to do
//!   that.
//!
//! Only one display, one current context and one drawable are supported at a
//! time. That covers the single-window applications this is for.

pub mod backend;
pub mod config;
pub mod egl_x11;
pub mod entry_points;
pub mod fault_guard;
pub mod session;

use std::ffi::c_void;

/// Resolve a function name for `glXGetProcAddress`: our own GL functions
/// first, then our GLX functions, then whatever the driver has. GLX names we
/// don't implement resolve to null rather than something from the driver.
pub fn proc_address(name: &str) -> *const c_void {
    if let Some(function) = crate::gl::lookup(name) {
        return function;
    }
    if let Some(&(_, function)) = entry_points::FUNCTIONS
        .iter()
        .find(|(candidate, _)| *candidate == name)
    {
        return function as *const c_void;
    }
    if name.starts_with("glX") {
        log_dbg!("No {}", name);
        return std::ptr::null();
    }
    let function = crate::gles::egl_proc_address(name);
    if function.is_null() {
        log_dbg!("No {}, neither here nor in the driver", name);
    }
    function
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_ours_first() {
        assert!(!proc_address("glLinkProgram").is_null());
        assert!(!proc_address("glClearDepth").is_null());
        assert!(!proc_address("glXSwapBuffers").is_null());
        assert!(!proc_address("glXCreateContextAttribsARB").is_null());
        assert!(proc_address("glXCreateGLXPixmap").is_null());
    }
}
