/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The bridge's state: which context is current, on which drawable, and how
//! frames get to the screen.
//!
//! Presentation starts out [PresentationMode::Uninitialized]. The first time
//! a drawable is made current, a surface for it is created:
//!
//! 1. If the config says it supports window surfaces, and no earlier attempt
//!    has failed, try rendering straight into the application's window
//!    ([PresentationMode::NativeWindow]). The driver call is wrapped in
//!    [catch_fault], because on some platforms it crashes instead of failing.
//! 2. Otherwise, or if that failed, render into a pbuffer the size of the
//!    window, and copy every frame into the window on swap
//!    ([PresentationMode::PbufferCopy]).
//!
//! Binding a different drawable tears the surface down and starts over.

use super::backend::{Config, Context, Drawable, DisplayBackend, Surface};
use super::fault_guard::catch_fault;
use crate::options::Options;
use std::collections::HashMap;

/// Bytes per pixel of the readback buffer (RGBA8888).
pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationMode {
    Uninitialized,
    NativeWindow,
    PbufferCopy {
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    },
}

/// Highest minor version worth asking for, per ES major version.
pub fn max_minor_version(major: i32) -> i32 {
    match major {
        3 => 2,
        _ => 0,
    }
}

fn pixel_buffer(width: u32, height: u32) -> Vec<u8> {
    vec![0; width as usize * height as usize * BYTES_PER_PIXEL]
}

pub struct BridgeSession<B: DisplayBackend> {
    backend: B,
    /// Every live context, and the config it was created with.
    contexts: HashMap<Context, Config>,
    current_context: Option<Context>,
    drawable: Option<Drawable>,
    surface: Option<Surface>,
    mode: PresentationMode,
    /// Set once a native-window surface has failed or crashed, so later
    /// drawables go straight to the pbuffer.
    native_window_failed: bool,
    force_pbuffer: bool,
    gles_major: i32,
}

impl<B: DisplayBackend> BridgeSession<B> {
    pub fn new(backend: B, options: &Options) -> Self {
        BridgeSession {
            backend,
            contexts: HashMap::new(),
            current_context: None,
            drawable: None,
            surface: None,
            mode: PresentationMode::Uninitialized,
            native_window_failed: false,
            force_pbuffer: options.force_pbuffer,
            gles_major: options.gles_major,
        }
    }

    pub fn backend(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn mode(&self) -> &PresentationMode {
        &self.mode
    }

    pub fn current_context(&self) -> Option<Context> {
        self.current_context
    }

    /// The drawable of the current context, if any.
    pub fn current_drawable(&self) -> Option<Drawable> {
        self.current_context.and(self.drawable)
    }

    pub fn native_window_failed(&self) -> bool {
        self.native_window_failed
    }

    pub fn context_config(&self, context: Context) -> Option<Config> {
        self.contexts.get(&context).copied()
    }

    /// Create a context with the configured ES major version and the highest
    /// minor version the driver accepts.
    pub fn create_context(
        &mut self,
        config: Config,
        share: Option<Context>,
    ) -> Result<Context, String> {
        let major = self.gles_major;
        for minor in (0..=max_minor_version(major)).rev() {
            if let Some(context) = self.backend.create_context(config, share, major, minor) {
                log_dbg!("Created OpenGL ES {}.{} context {:?}", major, minor, context);
                self.contexts.insert(context, config);
                return Ok(context);
            }
            log_dbg!("OpenGL ES {}.{} context creation failed", major, minor);
        }
        Err(format!(
            "Couldn't create an OpenGL ES {}.x context with config {:?}",
            major, config
        ))
    }

    pub fn destroy_context(&mut self, context: Context) {
        if self.current_context == Some(context) {
            self.backend.make_current(None, None);
            self.current_context = None;
            self.teardown_surface();
            self.drawable = None;
        }
        if self.contexts.remove(&context).is_some() {
            self.backend.destroy_context(context);
        } else {
            log!("Ignoring destruction of unknown context {:?}", context);
        }
    }

    /// Make `context` current on `drawable`, creating a surface for the
    /// drawable if needed. Passing [None] for either releases the current
    /// context.
    pub fn make_current(&mut self, drawable: Option<Drawable>, context: Option<Context>) -> bool {
        let (Some(drawable), Some(context)) = (drawable, context) else {
            self.current_context = None;
            return self.backend.make_current(None, None);
        };
        let Some(config) = self.context_config(context) else {
            log!("Can't make unknown context {:?} current", context);
            return false;
        };

        if self.drawable != Some(drawable) {
            if self.drawable.is_some() {
                log_dbg!("Drawable changed to {:#x}, recreating surface", drawable);
            }
            self.teardown_surface();
            self.drawable = Some(drawable);
        }
        if self.mode == PresentationMode::Uninitialized {
            if let Err(err) = self.initialize_surface(config, drawable) {
                log!("{}", err);
                return false;
            }
        }

        if self.backend.make_current(self.surface, Some(context)) {
            self.current_context = Some(context);
            true
        } else {
            log!("Couldn't make context {:?} current", context);
            false
        }
    }

    fn initialize_surface(&mut self, config: Config, drawable: Drawable) -> Result<(), String> {
        if let Some(surface) = self.try_native_window(config, drawable) {
            self.surface = Some(surface);
            self.mode = PresentationMode::NativeWindow;
            log!("Rendering directly to window {:#x}", drawable);
            return Ok(());
        }

        let (width, height) = self
            .backend
            .drawable_size(drawable)
            .ok_or_else(|| format!("Couldn't get the size of drawable {:#x}", drawable))?;
        let surface = self
            .backend
            .create_pbuffer_surface(config, width, height)
            .ok_or_else(|| format!("Couldn't create a {}x{} pbuffer", width, height))?;
        self.surface = Some(surface);
        self.mode = PresentationMode::PbufferCopy {
            width,
            height,
            pixels: pixel_buffer(width, height),
        };
        log!(
            "Rendering to a {}x{} pbuffer, copied to window {:#x} on swap",
            width,
            height,
            drawable
        );
        Ok(())
    }

    fn try_native_window(&mut self, config: Config, drawable: Drawable) -> Option<Surface> {
        if self.force_pbuffer || self.native_window_failed {
            return None;
        }
        if !self.backend.config_supports_window(config) {
            log_dbg!("Config {:?} has no window support", config);
            return None;
        }
        let backend = &mut self.backend;
        match catch_fault(|| backend.create_window_surface(config, drawable)) {
            Ok(Some(surface)) => return Some(surface),
            Ok(None) => log!("Window surface creation failed, falling back to a pbuffer"),
            Err(fault) => log!(
                "Window surface creation crashed with {}, falling back to a pbuffer",
                fault
            ),
        }
        self.native_window_failed = true;
        None
    }

    fn teardown_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            // EGL only destroys a surface once it's no longer current.
            if self.current_context.is_some() {
                self.backend.make_current(None, None);
            }
            self.backend.destroy_surface(surface);
        }
        self.mode = PresentationMode::Uninitialized;
    }

    /// Present the current frame. Failures are logged and otherwise ignored.
    pub fn swap_buffers(&mut self, drawable: Drawable) {
        if self.drawable != Some(drawable) {
            log_dbg!("Ignoring swap of drawable {:#x}, which isn't current", drawable);
            return;
        }
        let Some(surface) = self.surface else {
            return;
        };
        match self.mode {
            PresentationMode::Uninitialized => (),
            PresentationMode::NativeWindow => {
                if !self.backend.swap_buffers(surface) {
                    log!("eglSwapBuffers failed");
                }
            }
            PresentationMode::PbufferCopy { .. } => self.copy_to_window(drawable),
        }
    }

    fn copy_to_window(&mut self, drawable: Drawable) {
        self.resize_pbuffer(drawable);
        let PresentationMode::PbufferCopy {
            width,
            height,
            ref mut pixels,
        } = self.mode
        else {
            return;
        };
        self.backend.read_pixels(width, height, pixels);
        if !self.backend.put_pixels(drawable, width, height, pixels) {
            log!("Couldn't copy frame to window {:#x}", drawable);
        }
    }

    /// Follow the window's size. The old pbuffer's contents are lost, which
    /// only matters for the one frame rendered before the resize was noticed.
    fn resize_pbuffer(&mut self, drawable: Drawable) {
        let PresentationMode::PbufferCopy { width, height, .. } = self.mode else {
            return;
        };
        let Some((new_width, new_height)) = self.backend.drawable_size(drawable) else {
            return;
        };
        if (new_width, new_height) == (width, height) {
            return;
        }
        let (Some(context), Some(config)) = (
            self.current_context,
            self.current_context.and_then(|c| self.context_config(c)),
        ) else {
            return;
        };
        let Some(new_surface) = self
            .backend
            .create_pbuffer_surface(config, new_width, new_height)
        else {
            log!("Couldn't resize pbuffer to {}x{}", new_width, new_height);
            return;
        };
        if !self.backend.make_current(Some(new_surface), Some(context)) {
            log!("Couldn't switch to resized pbuffer");
            self.backend.destroy_surface(new_surface);
            return;
        }
        if let Some(old_surface) = self.surface.replace(new_surface) {
            self.backend.destroy_surface(old_surface);
        }
        log_dbg!("Pbuffer resized to {}x{}", new_width, new_height);
        self.mode = PresentationMode::PbufferCopy {
            width: new_width,
            height: new_height,
            pixels: pixel_buffer(new_width, new_height),
        };
    }

    pub fn swap_interval(&mut self, interval: i32) -> bool {
        self.backend.swap_interval(interval)
    }
}
