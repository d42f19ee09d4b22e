/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The display and surface operations the bridge needs from the platform.
//!
//! [super::egl_x11::EglX11Backend] is the real implementation. Keeping the
//! [super::session::BridgeSession] behind this trait means its state machine
//! can be exercised without a display or a GPU.

use std::ffi::c_ulong;

/// An X11 window (or other drawable) XID.
pub type Drawable = c_ulong;

/// Opaque handle to a framebuffer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Config(pub usize);

/// Opaque handle to a rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context(pub usize);

/// Opaque handle to a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Surface(pub usize);

pub const SURFACE_TYPE_WINDOW_BIT: i32 = 0x0004;
pub const SURFACE_TYPE_PBUFFER_BIT: i32 = 0x0001;

pub trait DisplayBackend {
    /// Configs matching an EGL-style attribute list (terminated by
    /// `EGL_NONE`), best first.
    fn choose_configs(&mut self, attribs: &[i32]) -> Vec<Config>;

    fn config_attrib(&mut self, config: Config, attribute: i32) -> Option<i32>;

    /// Whether `config` claims to support window surfaces. This is the safe
    /// capability check done before the native-window attempt.
    fn config_supports_window(&mut self, config: Config) -> bool {
        // EGL_SURFACE_TYPE
        self.config_attrib(config, 0x3033)
            .is_some_and(|surface_type| surface_type & SURFACE_TYPE_WINDOW_BIT != 0)
    }

    /// Create an OpenGL ES context of exactly the given version.
    fn create_context(
        &mut self,
        config: Config,
        share: Option<Context>,
        major: i32,
        minor: i32,
    ) -> Option<Context>;

    fn destroy_context(&mut self, context: Context);

    /// The risky call: some drivers crash instead of returning [None].
    fn create_window_surface(&mut self, config: Config, drawable: Drawable) -> Option<Surface>;

    fn create_pbuffer_surface(
        &mut self,
        config: Config,
        width: u32,
        height: u32,
    ) -> Option<Surface>;

    fn destroy_surface(&mut self, surface: Surface);

    /// Bind (or, with [None], unbind) a surface and context to the calling
    /// thread.
    fn make_current(&mut self, surface: Option<Surface>, context: Option<Context>) -> bool;

    fn swap_buffers(&mut self, surface: Surface) -> bool;

    fn swap_interval(&mut self, interval: i32) -> bool;

    /// Current size in pixels of the drawable, if it still exists.
    fn drawable_size(&mut self, drawable: Drawable) -> Option<(u32, u32)>;

    /// Read the current surface's pixels as bottom-up RGBA8888 into `pixels`,
    /// which is `width * height * 4` bytes long.
    fn read_pixels(&mut self, width: u32, height: u32, pixels: &mut [u8]);

    /// Copy bottom-up RGBA8888 pixels into the drawable.
    fn put_pixels(&mut self, drawable: Drawable, width: u32, height: u32, pixels: &[u8]) -> bool;
}
