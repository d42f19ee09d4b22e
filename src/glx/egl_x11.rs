/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! [DisplayBackend] on top of EGL, on the application's X11 display.
//!
//! Xlib is only needed for the pixel-copy path and for visuals. It is loaded
//! at runtime with `x11-dl`.

use super::backend::{Config, Context, DisplayBackend, Drawable, Surface};
use crate::gles::gles32::types::*;
use crate::gles::{egl, gles32};
use std::ffi::{c_int, c_void};
use std::ptr;
use x11_dl::xlib;

use egl::types::{EGLConfig, EGLContext, EGLSurface, EGLint};

/// Convert bottom-up RGBA rows, as `glReadPixels` returns them, to top-down
/// BGRA rows, which is what a 24/32-bit TrueColor `XImage` expects on a
/// little-endian machine.
pub fn rgba_to_x_image(src: &[u8], width: usize, height: usize, dst: &mut Vec<u8>) {
    let row_bytes = width * 4;
    dst.clear();
    dst.reserve(row_bytes * height);
    for row in src.chunks_exact(row_bytes).take(height).rev() {
        for pixel in row.chunks_exact(4) {
            dst.extend_from_slice(&[pixel[2], pixel[1], pixel[0], pixel[3]]);
        }
    }
}

pub struct EglX11Backend {
    xlib: xlib::Xlib,
    x_display: *mut xlib::Display,
    display: egl::types::EGLDisplay,
    /// Reused between frames.
    image_data: Vec<u8>,
}

// The bridge is used from one thread at a time, under a lock.
unsafe impl Send for EglX11Backend {}

impl EglX11Backend {
    /// Connect EGL to the application's X display. Must be called after
    /// [crate::gles::ensure_loaded].
    pub fn new(x_display: *mut xlib::Display) -> Result<Self, String> {
        let xlib = xlib::Xlib::open().map_err(|err| format!("Couldn't load Xlib: {}", err))?;
        unsafe {
            let display = egl::GetDisplay(x_display as egl::types::EGLNativeDisplayType);
            if display == egl::NO_DISPLAY {
                return Err("eglGetDisplay failed".to_string());
            }
            let mut major = 0;
            let mut minor = 0;
            if egl::Initialize(display, &mut major, &mut minor) == 0 {
                return Err(format!("eglInitialize failed: {:#x}", egl::GetError()));
            }
            if egl::BindAPI(egl::OPENGL_ES_API) == 0 {
                return Err("eglBindAPI(EGL_OPENGL_ES_API) failed".to_string());
            }
            log!("Using EGL {}.{}", major, minor);
            Ok(EglX11Backend {
                xlib,
                x_display,
                display,
                image_data: Vec::new(),
            })
        }
    }

    pub fn xlib(&self) -> &xlib::Xlib {
        &self.xlib
    }

    pub fn x_display(&self) -> *mut xlib::Display {
        self.x_display
    }

    /// The EGL extensions string.
    pub fn extensions(&self) -> String {
        unsafe {
            let string = egl::QueryString(self.display, egl::EXTENSIONS as EGLint);
            if string.is_null() {
                String::new()
            } else {
                std::ffi::CStr::from_ptr(string)
                    .to_string_lossy()
                    .into_owned()
            }
        }
    }

    fn window_attributes(&self, drawable: Drawable) -> Option<xlib::XWindowAttributes> {
        unsafe {
            let mut attributes: xlib::XWindowAttributes = std::mem::zeroed();
            let status =
                (self.xlib.XGetWindowAttributes)(self.x_display, drawable, &mut attributes);
            (status != 0).then_some(attributes)
        }
    }
}

fn egl_config(config: Config) -> EGLConfig {
    config.0 as EGLConfig
}

fn egl_context(context: Option<Context>) -> EGLContext {
    context.map_or(egl::NO_CONTEXT, |context| context.0 as EGLContext)
}

fn egl_surface(surface: Option<Surface>) -> EGLSurface {
    surface.map_or(egl::NO_SURFACE, |surface| surface.0 as EGLSurface)
}

impl DisplayBackend for EglX11Backend {
    fn choose_configs(&mut self, attribs: &[i32]) -> Vec<Config> {
        unsafe {
            let mut count: EGLint = 0;
            if egl::ChooseConfig(self.display, attribs.as_ptr(), ptr::null_mut(), 0, &mut count)
                == 0
            {
                return Vec::new();
            }
            let mut configs: Vec<EGLConfig> = vec![ptr::null(); usize::try_from(count).unwrap_or(0)];
            if egl::ChooseConfig(
                self.display,
                attribs.as_ptr(),
                configs.as_mut_ptr(),
                count,
                &mut count,
            ) == 0
            {
                return Vec::new();
            }
            configs.truncate(usize::try_from(count).unwrap_or(0));
            configs
                .into_iter()
                .map(|config| Config(config as usize))
                .collect()
        }
    }

    fn config_attrib(&mut self, config: Config, attribute: i32) -> Option<i32> {
        let mut value: EGLint = 0;
        let ok = unsafe {
            egl::GetConfigAttrib(self.display, egl_config(config), attribute, &mut value)
        };
        (ok != 0).then_some(value)
    }

    fn create_context(
        &mut self,
        config: Config,
        share: Option<Context>,
        major: i32,
        minor: i32,
    ) -> Option<Context> {
        let attribs = [
            egl::CONTEXT_MAJOR_VERSION as EGLint,
            major,
            egl::CONTEXT_MINOR_VERSION as EGLint,
            minor,
            egl::NONE as EGLint,
        ];
        let context = unsafe {
            egl::CreateContext(
                self.display,
                egl_config(config),
                egl_context(share),
                attribs.as_ptr(),
            )
        };
        (context != egl::NO_CONTEXT).then_some(Context(context as usize))
    }

    fn destroy_context(&mut self, context: Context) {
        unsafe {
            egl::DestroyContext(self.display, egl_context(Some(context)));
        }
    }

    fn create_window_surface(&mut self, config: Config, drawable: Drawable) -> Option<Surface> {
        let surface = unsafe {
            egl::CreateWindowSurface(self.display, egl_config(config), drawable, ptr::null())
        };
        (surface != egl::NO_SURFACE).then_some(Surface(surface as usize))
    }

    fn create_pbuffer_surface(
        &mut self,
        config: Config,
        width: u32,
        height: u32,
    ) -> Option<Surface> {
        let attribs = [
            egl::WIDTH as EGLint,
            EGLint::try_from(width).ok()?,
            egl::HEIGHT as EGLint,
            EGLint::try_from(height).ok()?,
            egl::NONE as EGLint,
        ];
        let surface = unsafe {
            egl::CreatePbufferSurface(self.display, egl_config(config), attribs.as_ptr())
        };
        (surface != egl::NO_SURFACE).then_some(Surface(surface as usize))
    }

    fn destroy_surface(&mut self, surface: Surface) {
        unsafe {
            egl::DestroySurface(self.display, egl_surface(Some(surface)));
        }
    }

    fn make_current(&mut self, surface: Option<Surface>, context: Option<Context>) -> bool {
        let surface = egl_surface(surface);
        unsafe { egl::MakeCurrent(self.display, surface, surface, egl_context(context)) != 0 }
    }

    fn swap_buffers(&mut self, surface: Surface) -> bool {
        unsafe { egl::SwapBuffers(self.display, egl_surface(Some(surface))) != 0 }
    }

    fn swap_interval(&mut self, interval: i32) -> bool {
        unsafe { egl::SwapInterval(self.display, interval) != 0 }
    }

    fn drawable_size(&mut self, drawable: Drawable) -> Option<(u32, u32)> {
        let attributes = self.window_attributes(drawable)?;
        Some((
            u32::try_from(attributes.width).ok()?,
            u32::try_from(attributes.height).ok()?,
        ))
    }

    fn read_pixels(&mut self, width: u32, height: u32, pixels: &mut [u8]) {
        unsafe {
            let mut old_read_framebuffer: GLint = 0;
            let mut old_pack_buffer: GLint = 0;
            gles32::GetIntegerv(gles32::READ_FRAMEBUFFER_BINDING, &mut old_read_framebuffer);
            gles32::GetIntegerv(gles32::PIXEL_PACK_BUFFER_BINDING, &mut old_pack_buffer);
            gles32::BindFramebuffer(gles32::READ_FRAMEBUFFER, 0);
            gles32::BindBuffer(gles32::PIXEL_PACK_BUFFER, 0);

            gles32::ReadPixels(
                0,
                0,
                width as GLsizei,
                height as GLsizei,
                gles32::RGBA,
                gles32::UNSIGNED_BYTE,
                pixels.as_mut_ptr() as *mut c_void,
            );

            gles32::BindBuffer(gles32::PIXEL_PACK_BUFFER, old_pack_buffer as GLuint);
            gles32::BindFramebuffer(gles32::READ_FRAMEBUFFER, old_read_framebuffer as GLuint);
        }
    }

    fn put_pixels(&mut self, drawable: Drawable, width: u32, height: u32, pixels: &[u8]) -> bool {
        let Some(attributes) = self.window_attributes(drawable) else {
            return false;
        };
        if width == 0 || height == 0 {
            return true;
        }
        // If the window shrank since the frame was rendered, the X server
        // clips the image.
        rgba_to_x_image(pixels, width as usize, height as usize, &mut self.image_data);

        unsafe {
            let image = (self.xlib.XCreateImage)(
                self.x_display,
                attributes.visual,
                attributes.depth as u32,
                xlib::ZPixmap,
                0,
                self.image_data.as_mut_ptr() as *mut _,
                width,
                height,
                32,
                0,
            );
            if image.is_null() {
                return false;
            }
            let screen = (self.xlib.XScreenNumberOfScreen)(attributes.screen);
            let gc = (self.xlib.XDefaultGC)(self.x_display, screen);
            (self.xlib.XPutImage)(
                self.x_display,
                drawable,
                gc,
                image,
                0,
                0,
                0,
                0,
                width,
                height,
            );
            (self.xlib.XFlush)(self.x_display);
            // XDestroyImage would free our buffer too.
            (*image).data = ptr::null_mut();
            (self.xlib.XFree)(image as *mut c_void);
        }
        true
    }
}

/// `XVisualInfo` for a visual ID, allocated by Xlib so the application can
/// `XFree` it. Visual ID 0 means the screen's default visual.
pub fn visual_info(
    backend: &EglX11Backend,
    screen: c_int,
    visual_id: xlib::VisualID,
) -> *mut xlib::XVisualInfo {
    let xlib = backend.xlib();
    let x_display = backend.x_display();
    unsafe {
        let visual_id = if visual_id == 0 {
            let visual = (xlib.XDefaultVisual)(x_display, screen);
            (xlib.XVisualIDFromVisual)(visual)
        } else {
            visual_id
        };
        let mut template: xlib::XVisualInfo = std::mem::zeroed();
        template.visualid = visual_id;
        template.screen = screen;
        let mut count = 0;
        (xlib.XGetVisualInfo)(
            x_display,
            xlib::VisualIDMask | xlib::VisualScreenMask,
            &mut template,
            &mut count,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_rows_and_swizzles() {
        // 2x2: bottom row first, as glReadPixels returns it.
        let rgba = [
            1, 2, 3, 4, 5, 6, 7, 8, // bottom
            9, 10, 11, 12, 13, 14, 15, 16, // top
        ];
        let mut bgra = Vec::new();
        rgba_to_x_image(&rgba, 2, 2, &mut bgra);
        assert_eq!(
            bgra,
            [
                11, 10, 9, 12, 15, 14, 13, 16, // top
                3, 2, 1, 4, 7, 6, 5, 8, // bottom
            ]
        );
    }

    #[test]
    fn extra_rows_are_ignored() {
        let rgba = [0u8; 3 * 4 * 2];
        let mut bgra = vec![1; 100];
        rgba_to_x_image(&rgba, 3, 1, &mut bgra);
        assert_eq!(bgra.len(), 3 * 4);
    }
}
