/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The exported `glX*` functions.
//!
//! Errors never cross this boundary as anything but what GLX itself uses:
//! `False`, null handles and GLX error codes.

use super::backend::{Config, Context, DisplayBackend};
use super::config::{
    config_attribute, parse_context_attribs, read_attrib_list, ConfigAttribute, ConfigRequest,
};
use super::egl_x11::{visual_info, EglX11Backend};
use super::session::BridgeSession;
use crate::gles::gles32;
use crate::gles::native::driver_description;
use std::collections::HashMap;
use std::ffi::{c_char, c_int, c_ulong, c_void, CStr, CString};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use x11_dl::xlib;

pub type Bool = c_int;
pub type GLXContext = *mut c_void;
pub type GLXFBConfig = *mut c_void;
pub type GLXDrawable = c_ulong;

const TRUE: Bool = 1;
const FALSE: Bool = 0;

const SUCCESS: c_int = 0;
const GLX_BAD_CONTEXT: c_int = 5;
const GLX_BAD_ATTRIBUTE: c_int = 2;

const GLX_VENDOR: c_int = 1;
const GLX_VERSION: c_int = 2;
const GLX_EXTENSIONS: c_int = 3;

const EGL_NATIVE_VISUAL_ID: i32 = 0x302E;
const EGL_NONE: i32 = 0x3038;

/// The GLX version we claim to implement.
pub const GLX_VERSION_NUMBER: (c_int, c_int) = (1, 4);

/// GLX extensions we implement ourselves.
pub const OWN_EXTENSIONS: &[&str] = &[
    "GLX_ARB_create_context",
    "GLX_ARB_create_context_profile",
    "GLX_ARB_get_proc_address",
];

/// The extensions string: the driver's EGL extensions, followed by ours.
pub fn extensions_string(egl_extensions: &str) -> String {
    egl_extensions
        .split_ascii_whitespace()
        .chain(OWN_EXTENSIONS.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Default)]
struct GlxState {
    session: Option<BridgeSession<EglX11Backend>>,
    /// Configs behind the visuals we've handed out, for `glXCreateContext`.
    visual_configs: HashMap<xlib::VisualID, Config>,
}

impl GlxState {
    /// The session, created on the first call that has a display. Without a
    /// working EGL display nothing can be rendered, so failing is fatal.
    fn session(&mut self, display: *mut xlib::Display) -> &mut BridgeSession<EglX11Backend> {
        self.session
            .get_or_insert_with(|| match EglX11Backend::new(display) {
                Ok(backend) => BridgeSession::new(backend, crate::options::get()),
                Err(err) => {
                    log!("{}", err);
                    log!("Can't continue without an EGL display");
                    std::process::exit(1);
                }
            })
    }
}

fn state() -> MutexGuard<'static, GlxState> {
    static STATE: OnceLock<Mutex<GlxState>> = OnceLock::new();
    STATE
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Configs for `request`, falling back to pbuffer-only configs on platforms
/// without window surfaces.
fn choose_configs(
    session: &mut BridgeSession<EglX11Backend>,
    request: &ConfigRequest,
) -> Vec<Config> {
    let configs = session.backend().choose_configs(&request.egl_attribs());
    if !configs.is_empty() {
        return configs;
    }
    log_dbg!("No window-capable configs for {:?}", request);
    session
        .backend()
        .choose_configs(&request.pbuffer_only().egl_attribs())
}

/// A `malloc`ed array of configs, which the application frees with `XFree`.
unsafe fn config_array(configs: &[Config], nelements: *mut c_int) -> *mut GLXFBConfig {
    if !nelements.is_null() {
        *nelements = 0;
    }
    if configs.is_empty() {
        return std::ptr::null_mut();
    }
    let array =
        libc::malloc(std::mem::size_of::<GLXFBConfig>() * configs.len()) as *mut GLXFBConfig;
    if array.is_null() {
        return array;
    }
    for (i, config) in configs.iter().enumerate() {
        *array.add(i) = config.0 as GLXFBConfig;
    }
    if !nelements.is_null() {
        *nelements = configs.len() as c_int;
    }
    array
}

fn config_handle(config: GLXFBConfig) -> Option<Config> {
    (!config.is_null()).then_some(Config(config as usize))
}

fn context_handle(context: GLXContext) -> Option<Context> {
    (!context.is_null()).then_some(Context(context as usize))
}

unsafe fn visual_for_config(
    state: &mut GlxState,
    display: *mut xlib::Display,
    screen: c_int,
    config: Config,
) -> *mut xlib::XVisualInfo {
    let session = state.session(display);
    let visual_id = session
        .backend()
        .config_attrib(config, EGL_NATIVE_VISUAL_ID)
        .unwrap_or(0);
    let info = visual_info(session.backend(), screen, visual_id as xlib::VisualID);
    if info.is_null() {
        log!("No X visual for config {:?}", config);
    } else {
        state.visual_configs.insert((*info).visualid, config);
    }
    info
}

unsafe fn create_context(
    display: *mut xlib::Display,
    config: Option<Config>,
    share: GLXContext,
) -> GLXContext {
    let mut state = state();
    let session = state.session(display);
    let config = match config {
        Some(config) => config,
        None => match choose_configs(session, &ConfigRequest::default()).first() {
            Some(&config) => config,
            None => {
                log!("No EGL config for the default GLX config");
                return std::ptr::null_mut();
            }
        },
    };
    match session.create_context(config, context_handle(share)) {
        Ok(context) => context.0 as GLXContext,
        Err(err) => {
            log!("{}", err);
            std::ptr::null_mut()
        }
    }
}

unsafe fn make_current(
    display: *mut xlib::Display,
    drawable: GLXDrawable,
    context: GLXContext,
) -> Bool {
    let current = {
        let mut state = state();
        state
            .session(display)
            .make_current((drawable != 0).then_some(drawable), context_handle(context))
    };
    if current && !context.is_null() {
        log_once!("OpenGL ES driver: {}", driver_description());
    }
    if current {
        TRUE
    } else {
        FALSE
    }
}

unsafe fn client_string(display: *mut xlib::Display, name: c_int) -> *const c_char {
    match name {
        GLX_VENDOR => b"glxes\0".as_ptr() as *const c_char,
        GLX_VERSION => b"1.4\0".as_ptr() as *const c_char,
        GLX_EXTENSIONS => glXQueryExtensionsString(display, 0),
        _ => std::ptr::null(),
    }
}

fn swap_interval(interval: c_int) -> c_int {
    let mut state = state();
    let set = state
        .session
        .as_mut()
        .is_some_and(|session| session.swap_interval(interval));
    if set {
        SUCCESS
    } else {
        GLX_BAD_CONTEXT
    }
}

unsafe fn get_proc_address(name: *const u8) -> *const c_void {
    if name.is_null() {
        return std::ptr::null();
    }
    match CStr::from_ptr(name as *const c_char).to_str() {
        Ok(name) => super::proc_address(name),
        Err(_) => std::ptr::null(),
    }
}

export_gl! {
    fn glXChooseFBConfig(
        dpy: *mut xlib::Display,
        _screen: c_int,
        attrib_list: *const c_int,
        nelements: *mut c_int,
    ) -> *mut GLXFBConfig {
        let request = ConfigRequest::from_glx_attribs(&read_attrib_list(attrib_list, false));
        let mut state = state();
        let configs = choose_configs(state.session(dpy), &request);
        config_array(&configs, nelements)
    }

    fn glXGetFBConfigs(
        dpy: *mut xlib::Display,
        _screen: c_int,
        nelements: *mut c_int,
    ) -> *mut GLXFBConfig {
        let mut state = state();
        let configs = state.session(dpy).backend().choose_configs(&[EGL_NONE]);
        config_array(&configs, nelements)
    }

    fn glXGetFBConfigAttrib(
        dpy: *mut xlib::Display,
        config: GLXFBConfig,
        attribute: c_int,
        value: *mut c_int,
    ) -> c_int {
        let (Some(config), false) = (config_handle(config), value.is_null()) else {
            return GLX_BAD_ATTRIBUTE;
        };
        let result = match config_attribute(attribute) {
            Some(ConfigAttribute::Fixed(fixed)) => Some(fixed),
            Some(ConfigAttribute::Egl(egl_attribute)) => {
                state().session(dpy).backend().config_attrib(config, egl_attribute)
            }
            None => {
                log_dbg!("Unknown config attribute {:#x}", attribute);
                None
            }
        };
        match result {
            Some(result) => {
                *value = result;
                SUCCESS
            }
            None => GLX_BAD_ATTRIBUTE,
        }
    }

    fn glXGetVisualFromFBConfig(
        dpy: *mut xlib::Display,
        config: GLXFBConfig,
    ) -> *mut xlib::XVisualInfo {
        let Some(config) = config_handle(config) else {
            return std::ptr::null_mut();
        };
        let mut state = state();
        let backend = state.session(dpy).backend();
        let screen = (backend.xlib().XDefaultScreen)(backend.x_display());
        visual_for_config(&mut state, dpy, screen, config)
    }

    fn glXChooseVisual(
        dpy: *mut xlib::Display,
        screen: c_int,
        attrib_list: *const c_int,
    ) -> *mut xlib::XVisualInfo {
        let request = ConfigRequest::from_glx_attribs(&read_attrib_list(attrib_list, true));
        let mut state = state();
        let Some(&config) = choose_configs(state.session(dpy), &request).first() else {
            log!("No EGL config matches {:?}", request);
            return std::ptr::null_mut();
        };
        visual_for_config(&mut state, dpy, screen, config)
    }

    fn glXCreateContext(
        dpy: *mut xlib::Display,
        vis: *mut xlib::XVisualInfo,
        share_list: GLXContext,
        _direct: Bool,
    ) -> GLXContext {
        let config = if vis.is_null() {
            None
        } else {
            state().visual_configs.get(&(*vis).visualid).copied()
        };
        create_context(dpy, config, share_list)
    }

    fn glXCreateNewContext(
        dpy: *mut xlib::Display,
        config: GLXFBConfig,
        _render_type: c_int,
        share_list: GLXContext,
        _direct: Bool,
    ) -> GLXContext {
        create_context(dpy, config_handle(config), share_list)
    }

    fn glXCreateContextAttribsARB(
        dpy: *mut xlib::Display,
        config: GLXFBConfig,
        share_context: GLXContext,
        _direct: Bool,
        attrib_list: *const c_int,
    ) -> GLXContext {
        let attribs = parse_context_attribs(&read_attrib_list(attrib_list, false));
        log_dbg!(
            "Desktop OpenGL {}.{} ({:?} profile) context requested",
            attribs.major,
            attribs.minor,
            attribs.profile
        );
        create_context(dpy, config_handle(config), share_context)
    }

    fn glXDestroyContext(dpy: *mut xlib::Display, ctx: GLXContext) {
        if let Some(context) = context_handle(ctx) {
            state().session(dpy).destroy_context(context);
        }
    }

    fn glXMakeCurrent(dpy: *mut xlib::Display, drawable: GLXDrawable, ctx: GLXContext) -> Bool {
        make_current(dpy, drawable, ctx)
    }

    fn glXMakeContextCurrent(
        dpy: *mut xlib::Display,
        draw: GLXDrawable,
        read: GLXDrawable,
        ctx: GLXContext,
    ) -> Bool {
        if read != draw {
            log_once!("Separate read drawables are not supported, reading from the draw drawable");
        }
        make_current(dpy, draw, ctx)
    }

    fn glXSwapBuffers(dpy: *mut xlib::Display, drawable: GLXDrawable) {
        state().session(dpy).swap_buffers(drawable);
    }

    fn glXQueryExtensionsString(dpy: *mut xlib::Display, _screen: c_int) -> *const c_char {
        static EXTENSIONS: OnceLock<CString> = OnceLock::new();
        EXTENSIONS
            .get_or_init(|| {
                let egl_extensions = state().session(dpy).backend().extensions();
                CString::new(extensions_string(&egl_extensions)).unwrap_or_default()
            })
            .as_ptr()
    }

    fn glXQueryExtension(
        _dpy: *mut xlib::Display,
        error_base: *mut c_int,
        event_base: *mut c_int,
    ) -> Bool {
        if !error_base.is_null() {
            *error_base = 0;
        }
        if !event_base.is_null() {
            *event_base = 0;
        }
        TRUE
    }

    fn glXQueryVersion(_dpy: *mut xlib::Display, major: *mut c_int, minor: *mut c_int) -> Bool {
        if !major.is_null() {
            *major = GLX_VERSION_NUMBER.0;
        }
        if !minor.is_null() {
            *minor = GLX_VERSION_NUMBER.1;
        }
        TRUE
    }

    fn glXGetClientString(dpy: *mut xlib::Display, name: c_int) -> *const c_char {
        client_string(dpy, name)
    }

    fn glXQueryServerString(dpy: *mut xlib::Display, _screen: c_int, name: c_int) -> *const c_char {
        client_string(dpy, name)
    }

    fn glXIsDirect(_dpy: *mut xlib::Display, _ctx: GLXContext) -> Bool {
        TRUE
    }

    fn glXGetCurrentContext() -> GLXContext {
        let state = state();
        match state.session.as_ref().and_then(|session| session.current_context()) {
            Some(context) => context.0 as GLXContext,
            None => std::ptr::null_mut(),
        }
    }

    fn glXGetCurrentDrawable() -> GLXDrawable {
        let state = state();
        state
            .session
            .as_ref()
            .and_then(|session| session.current_drawable())
            .unwrap_or(0)
    }

    fn glXGetCurrentDisplay() -> *mut xlib::Display {
        let mut state = state();
        match state.session.as_mut() {
            Some(session) if session.current_context().is_some() => {
                session.backend().x_display()
            }
            _ => std::ptr::null_mut(),
        }
    }

    fn glXSwapIntervalEXT(_dpy: *mut xlib::Display, _drawable: GLXDrawable, interval: c_int) {
        swap_interval(interval);
    }

    fn glXSwapIntervalMESA(interval: u32) -> c_int {
        swap_interval(interval.min(c_int::MAX as u32) as c_int)
    }

    fn glXSwapIntervalSGI(interval: c_int) -> c_int {
        swap_interval(interval)
    }

    fn glXWaitGL() {
        gles32::Finish();
    }

    fn glXWaitX() {}

    fn glXGetProcAddress(proc_name: *const u8) -> *const c_void {
        get_proc_address(proc_name)
    }

    fn glXGetProcAddressARB(proc_name: *const u8) -> *const c_void {
        get_proc_address(proc_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions() {
        assert_eq!(
            extensions_string("EGL_KHR_create_context  EGL_KHR_surfaceless_context"),
            "EGL_KHR_create_context EGL_KHR_surfaceless_context GLX_ARB_create_context \
             GLX_ARB_create_context_profile GLX_ARB_get_proc_address"
        );
        assert_eq!(extensions_string(""), OWN_EXTENSIONS.join(" "));
    }

    #[test]
    fn config_arrays() {
        let mut count = -1;
        let array = unsafe { config_array(&[Config(0x10), Config(0x20)], &mut count) };
        assert_eq!(count, 2);
        unsafe {
            assert_eq!(*array as usize, 0x10);
            assert_eq!(*array.add(1) as usize, 0x20);
            libc::free(array as *mut c_void);
        }

        let array = unsafe { config_array(&[], &mut count) };
        assert!(array.is_null());
        assert_eq!(count, 0);
    }
}
