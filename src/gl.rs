/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The desktop OpenGL entry points we export.
//!
//! Every function here is `#[no_mangle]`, so applications linking against
//! `libGL.so` get ours, and is also listed in a table so [lookup] can hand it
//! out from `glXGetProcAddress`.
//!
//! - [forward] has the ones that map 1:1 onto an ES function.
//! - [programs] hooks the shader and program lifecycle: translation on
//!   `glShaderSource`, the program binary cache on `glLinkProgram`.
//! - [textures] tracks texture targets and emulates direct state access.
//! - [buffers] does buffer mapping and direct state access for buffers.
//! - [draws] emulates the draw calls whose built-ins we polyfill.
//! - [desktop] has desktop-only functions, some emulated, some stubs.

use crate::gles::textures::TextureTargets;
use crate::shader::ShaderState;
use std::ffi::c_void;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Type-erased entry point, as stored in the lookup tables.
pub type GLFunction = unsafe extern "C" fn();

/// Define exported GL functions and a `FUNCTIONS` table listing them.
///
/// Each function makes sure the native libraries are loaded before running
/// its body.
macro_rules! export_gl {
    (
        $(
            $(#[$meta:meta])*
            fn $name:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)? $body:block
        )*
    ) => {
        $(
            $(#[$meta])*
            #[no_mangle]
            pub unsafe extern "C" fn $name($($arg: $ty),*) $(-> $ret)? {
                $crate::gles::ensure_loaded();
                $body
            }
        )*

        pub const FUNCTIONS: &[(&str, $crate::gl::GLFunction)] = &[
            $(
                (
                    stringify!($name),
                    // Safety: only ever called through a pointer cast back to
                    // the real signature by the application.
                    unsafe {
                        std::mem::transmute::<
                            unsafe extern "C" fn($($ty),*) $(-> $ret)?,
                            $crate::gl::GLFunction,
                        >($name)
                    },
                ),
            )*
        ];
    };
}

/// Define exported GL functions that call the ES function of the same
/// signature.
macro_rules! forward_gl {
    (
        $(
            $name:ident => $es:ident($($arg:ident: $ty:ty),* $(,)?) $(-> $ret:ty)?;
        )*
    ) => {
        export_gl! {
            $(
                fn $name($($arg: $ty),*) $(-> $ret)? {
                    $crate::gles::gles32::$es($($arg),*)
                }
            )*
        }
    };
}

pub mod buffers;
pub mod desktop;
pub mod draws;
pub mod forward;
pub mod programs;
pub mod textures;

/// Our state for the current context. There is only ever one.
#[derive(Default)]
pub struct GlState {
    pub shaders: Option<ShaderState>,
    pub textures: TextureTargets,
}

impl GlState {
    pub fn shaders(&mut self) -> &mut ShaderState {
        self.shaders
            .get_or_insert_with(|| ShaderState::new(crate::options::get()))
    }
}

/// Lock the [GlState]. Never call into the application with this held.
pub fn state() -> MutexGuard<'static, GlState> {
    static STATE: OnceLock<Mutex<GlState>> = OnceLock::new();
    STATE
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn tables() -> [&'static [(&'static str, GLFunction)]; 6] {
    [
        forward::FUNCTIONS,
        programs::FUNCTIONS,
        textures::FUNCTIONS,
        buffers::FUNCTIONS,
        draws::FUNCTIONS,
        desktop::FUNCTIONS,
    ]
}

/// Find one of our GL functions by name.
pub fn lookup(name: &str) -> Option<*const c_void> {
    tables()
        .into_iter()
        .flatten()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, function)| function as *const c_void)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lookup_by_name() {
        assert!(lookup("glLinkProgram").is_some());
        assert!(lookup("glClear").is_some());
        assert!(lookup("glTextureParameteri").is_some());
        assert!(lookup("glClearDepth").is_some());
        assert!(lookup("glXSwapBuffers").is_none());
        assert!(lookup("glNotAFunction").is_none());
    }

    #[test]
    fn names_are_unique() {
        let mut seen = HashSet::new();
        for (name, _) in tables().into_iter().flatten() {
            assert!(name.starts_with("gl"), "{}", name);
            assert!(seen.insert(*name), "{} is listed twice", name);
        }
    }
}
