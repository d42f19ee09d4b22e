/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Opening the native libraries.
//!
//! This happens lazily, on the first call into any of our entry points, rather
//! than when we are loaded: running code from a library constructor is fragile
//! and would make the crate's own tests try to find a GPU driver.

use super::{egl, gles32};
use crate::options::Options;
use libloading::Library;
use std::ffi::{c_char, c_void, CString};
use std::ptr;
use std::sync::OnceLock;

type GetProcAddressFn = unsafe extern "C" fn(*const c_char) -> *const c_void;

const DEFAULT_EGL_LIBRARIES: &[&str] = &["libEGL.so.1", "libEGL.so"];
const DEFAULT_GLES_LIBRARIES: &[&str] = &["libGLESv2.so.2", "libGLESv2.so"];

/// EGL functions the window system bridge can't work without.
const REQUIRED_EGL_FUNCTIONS: &[(&str, fn() -> bool)] = &[
    ("eglGetDisplay", egl::GetDisplay::is_loaded),
    ("eglInitialize", egl::Initialize::is_loaded),
    ("eglChooseConfig", egl::ChooseConfig::is_loaded),
    ("eglGetConfigAttrib", egl::GetConfigAttrib::is_loaded),
    ("eglBindAPI", egl::BindAPI::is_loaded),
    ("eglCreateContext", egl::CreateContext::is_loaded),
    ("eglDestroyContext", egl::DestroyContext::is_loaded),
    ("eglCreateWindowSurface", egl::CreateWindowSurface::is_loaded),
    ("eglCreatePbufferSurface", egl::CreatePbufferSurface::is_loaded),
    ("eglDestroySurface", egl::DestroySurface::is_loaded),
    ("eglMakeCurrent", egl::MakeCurrent::is_loaded),
    ("eglSwapBuffers", egl::SwapBuffers::is_loaded),
    ("eglQueryString", egl::QueryString::is_loaded),
];

/// Library names to try, in order. A configured name replaces the defaults.
pub fn library_candidates(configured: Option<&str>, defaults: &[&str]) -> Vec<String> {
    match configured {
        Some(name) => vec![name.to_string()],
        None => defaults.iter().map(|name| name.to_string()).collect(),
    }
}

fn open_first(candidates: &[String]) -> Result<Library, String> {
    let mut errors = Vec::new();
    for name in candidates {
        // Safety: these are the system's driver libraries. Their initializers
        // are trusted as much as anything else in the process.
        match unsafe { Library::new(name) } {
            Ok(library) => {
                log_dbg!("Loaded {}", name);
                return Ok(library);
            }
            Err(err) => errors.push(format!("{}: {}", name, err)),
        }
    }
    Err(format!("Couldn't load any of: {}", errors.join("; ")))
}

fn symbol(library: &Library, name: &str) -> *const c_void {
    let Ok(name) = CString::new(name) else {
        return ptr::null();
    };
    unsafe { library.get::<*const c_void>(name.as_bytes_with_nul()) }
        .map(|symbol| *symbol)
        .unwrap_or(ptr::null())
}

/// The native EGL and GLES libraries. Kept open for the rest of the process.
pub struct Libraries {
    egl: Library,
    gles: Library,
    get_proc_address: GetProcAddressFn,
}

impl Libraries {
    pub fn load(options: &Options) -> Result<Self, String> {
        let egl_library = open_first(&library_candidates(
            options.egl_library.as_deref(),
            DEFAULT_EGL_LIBRARIES,
        ))?;
        let gles_library = open_first(&library_candidates(
            options.gles_library.as_deref(),
            DEFAULT_GLES_LIBRARIES,
        ))?;

        let get_proc_address: GetProcAddressFn =
            *unsafe { egl_library.get::<GetProcAddressFn>(b"eglGetProcAddress\0") }
                .map_err(|err| format!("eglGetProcAddress not found: {}", err))?;
        let libraries = Libraries {
            egl: egl_library,
            gles: gles_library,
            get_proc_address,
        };

        egl::load_with(|name| {
            let address = symbol(&libraries.egl, name);
            if address.is_null() {
                libraries.proc_address(name)
            } else {
                address
            }
        });
        for &(name, is_loaded) in REQUIRED_EGL_FUNCTIONS {
            if !is_loaded() {
                return Err(format!("Required EGL function {} is missing", name));
            }
        }

        let mut missing = 0;
        gles32::load_with(|name| {
            let mut address = symbol(&libraries.gles, name);
            if address.is_null() {
                address = libraries.proc_address(name);
            }
            missing += usize::from(address.is_null());
            address
        });
        log_dbg!("GLES functions loaded, {} unavailable", missing);
        Ok(libraries)
    }

    /// `eglGetProcAddress`. Null if the driver doesn't know the name.
    pub fn proc_address(&self, name: &str) -> *const c_void {
        let Ok(name) = CString::new(name) else {
            return ptr::null();
        };
        unsafe { (self.get_proc_address)(name.as_ptr()) }
    }
}

static LIBRARIES: OnceLock<Libraries> = OnceLock::new();

/// Load the native libraries if that hasn't happened yet. Not being able to
/// is fatal: there is nothing we could render with.
pub fn ensure_loaded() -> &'static Libraries {
    LIBRARIES.get_or_init(|| match Libraries::load(crate::options::get()) {
        Ok(libraries) => libraries,
        Err(err) => {
            log!("{}", err);
            log!("Can't continue without the native EGL and GLES libraries");
            std::process::exit(1);
        }
    })
}

pub fn egl_proc_address(name: &str) -> *const c_void {
    ensure_loaded().proc_address(name)
}
