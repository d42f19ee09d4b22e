/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The presentation state machine, driven through a scripted backend.

use std::collections::HashMap;
use GL::glx::backend::{
    Config, Context, DisplayBackend, Drawable, Surface, SURFACE_TYPE_PBUFFER_BIT,
    SURFACE_TYPE_WINDOW_BIT,
};
use GL::glx::session::{BridgeSession, PresentationMode};
use GL::options::Options;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Window {
    Works,
    Fails,
    Crashes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Created {
    Window(Drawable),
    Pbuffer(u32, u32),
}

struct FakeBackend {
    window_support: bool,
    window: Window,
    max_minor: i32,
    sizes: HashMap<Drawable, (u32, u32)>,
    next_handle: usize,
    surfaces: HashMap<Surface, Created>,
    destroyed: Vec<Surface>,
    window_attempts: usize,
    context_requests: Vec<(i32, i32)>,
    current: Option<(Option<Surface>, Option<Context>)>,
    frames_put: Vec<(Drawable, u32, u32, usize)>,
    native_swaps: usize,
}

impl FakeBackend {
    fn new(window: Window) -> Self {
        FakeBackend {
            window_support: true,
            window,
            max_minor: 2,
            sizes: HashMap::from([(1, (64, 32)), (2, (16, 16))]),
            next_handle: 100,
            surfaces: HashMap::new(),
            destroyed: Vec::new(),
            window_attempts: 0,
            context_requests: Vec::new(),
            current: None,
            frames_put: Vec::new(),
            native_swaps: 0,
        }
    }

    fn handle(&mut self) -> usize {
        self.next_handle += 1;
        self.next_handle
    }

    fn add_surface(&mut self, created: Created) -> Surface {
        let surface = Surface(self.handle());
        self.surfaces.insert(surface, created);
        surface
    }

    fn live_surfaces(&self) -> Vec<&Created> {
        self.surfaces
            .iter()
            .filter(|(surface, _)| !self.destroyed.contains(surface))
            .map(|(_, created)| created)
            .collect()
    }
}

impl DisplayBackend for FakeBackend {
    fn choose_configs(&mut self, _attribs: &[i32]) -> Vec<Config> {
        vec![Config(1)]
    }

    fn config_attrib(&mut self, _config: Config, attribute: i32) -> Option<i32> {
        match attribute {
            0x3033 if self.window_support => {
                Some(SURFACE_TYPE_WINDOW_BIT | SURFACE_TYPE_PBUFFER_BIT)
            }
            0x3033 => Some(SURFACE_TYPE_PBUFFER_BIT),
            _ => None,
        }
    }

    fn create_context(
        &mut self,
        _config: Config,
        _share: Option<Context>,
        major: i32,
        minor: i32,
    ) -> Option<Context> {
        self.context_requests.push((major, minor));
        (minor <= self.max_minor).then(|| Context(self.handle()))
    }

    fn destroy_context(&mut self, _context: Context) {}

    fn create_window_surface(&mut self, _config: Config, drawable: Drawable) -> Option<Surface> {
        self.window_attempts += 1;
        match self.window {
            Window::Works => Some(self.add_surface(Created::Window(drawable))),
            Window::Fails => None,
            Window::Crashes => {
                unsafe {
                    libc::raise(libc::SIGSEGV);
                }
                unreachable!()
            }
        }
    }

    fn create_pbuffer_surface(
        &mut self,
        _config: Config,
        width: u32,
        height: u32,
    ) -> Option<Surface> {
        Some(self.add_surface(Created::Pbuffer(width, height)))
    }

    fn destroy_surface(&mut self, surface: Surface) {
        assert!(
            self.current.map_or(true, |(current, _)| current != Some(surface)),
            "destroyed a current surface"
        );
        self.destroyed.push(surface);
    }

    fn make_current(&mut self, surface: Option<Surface>, context: Option<Context>) -> bool {
        self.current = Some((surface, context));
        true
    }

    fn swap_buffers(&mut self, _surface: Surface) -> bool {
        self.native_swaps += 1;
        true
    }

    fn swap_interval(&mut self, _interval: i32) -> bool {
        true
    }

    fn drawable_size(&mut self, drawable: Drawable) -> Option<(u32, u32)> {
        self.sizes.get(&drawable).copied()
    }

    fn read_pixels(&mut self, width: u32, height: u32, pixels: &mut [u8]) {
        assert_eq!(pixels.len(), width as usize * height as usize * 4);
        pixels.fill(0x7f);
    }

    fn put_pixels(&mut self, drawable: Drawable, width: u32, height: u32, pixels: &[u8]) -> bool {
        assert!(pixels.iter().all(|&byte| byte == 0x7f));
        self.frames_put.push((drawable, width, height, pixels.len()));
        true
    }
}

fn options(force_pbuffer: bool) -> Options {
    Options {
        force_pbuffer,
        gles_major: 3,
        ..Default::default()
    }
}

fn session_with(backend: FakeBackend) -> (BridgeSession<FakeBackend>, Context) {
    let mut session = BridgeSession::new(backend, &options(false));
    let context = session.create_context(Config(1), None).unwrap();
    (session, context)
}

#[test]
fn native_window_when_it_works() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Works));
    assert!(session.make_current(Some(1), Some(context)));
    assert_eq!(*session.mode(), PresentationMode::NativeWindow);
    assert_eq!(session.current_drawable(), Some(1));

    session.swap_buffers(1);
    assert_eq!(session.backend().native_swaps, 1);
    assert!(session.backend().frames_put.is_empty());
}

#[test]
fn failed_window_falls_back_to_pbuffer() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Fails));
    assert!(session.make_current(Some(1), Some(context)));
    assert!(session.native_window_failed());
    match session.mode() {
        PresentationMode::PbufferCopy {
            width,
            height,
            pixels,
        } => {
            assert_eq!((*width, *height), (64, 32));
            assert_eq!(pixels.len(), 64 * 32 * 4);
        }
        other => panic!("unexpected mode {:?}", other),
    }

    session.swap_buffers(1);
    assert_eq!(session.backend().frames_put, [(1, 64, 32, 64 * 32 * 4)]);
    assert_eq!(session.backend().native_swaps, 0);
}

#[test]
fn crashing_window_falls_back_to_pbuffer() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Crashes));
    assert!(session.make_current(Some(1), Some(context)));
    assert!(session.native_window_failed());
    assert!(matches!(
        session.mode(),
        PresentationMode::PbufferCopy { .. }
    ));
    assert_eq!(session.backend().window_attempts, 1);
}

#[test]
fn failure_is_remembered() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Fails));
    assert!(session.make_current(Some(1), Some(context)));
    assert!(session.make_current(Some(2), Some(context)));
    assert_eq!(session.backend().window_attempts, 1);
    assert!(matches!(
        session.mode(),
        PresentationMode::PbufferCopy {
            width: 16,
            height: 16,
            ..
        }
    ));
}

#[test]
fn drawable_change_recreates_surface() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Works));
    assert!(session.make_current(Some(1), Some(context)));
    assert!(session.make_current(Some(1), Some(context)));
    assert_eq!(session.backend().window_attempts, 1);

    assert!(session.make_current(Some(2), Some(context)));
    assert_eq!(session.backend().window_attempts, 2);
    assert_eq!(session.backend().destroyed.len(), 1);
    assert_eq!(session.backend().live_surfaces(), [&Created::Window(2)]);
    assert_eq!(session.current_drawable(), Some(2));
}

#[test]
fn no_window_support_skips_the_attempt() {
    let mut backend = FakeBackend::new(Window::Works);
    backend.window_support = false;
    let (mut session, context) = session_with(backend);
    assert!(session.make_current(Some(1), Some(context)));
    assert_eq!(session.backend().window_attempts, 0);
    assert!(matches!(
        session.mode(),
        PresentationMode::PbufferCopy { .. }
    ));
}

#[test]
fn forced_pbuffer() {
    let mut session = BridgeSession::new(FakeBackend::new(Window::Works), &options(true));
    let context = session.create_context(Config(1), None).unwrap();
    assert!(session.make_current(Some(1), Some(context)));
    assert_eq!(session.backend().window_attempts, 0);
    // Forcing isn't a failure.
    assert!(!session.native_window_failed());
    assert!(matches!(
        session.mode(),
        PresentationMode::PbufferCopy { .. }
    ));
}

#[test]
fn minor_version_is_negotiated_down() {
    let mut backend = FakeBackend::new(Window::Works);
    backend.max_minor = 0;
    let (mut session, context) = session_with(backend);
    assert_eq!(session.context_config(context), Some(Config(1)));
    assert_eq!(session.backend().context_requests, [(3, 2), (3, 1), (3, 0)]);
}

#[test]
fn no_acceptable_version_is_an_error() {
    let mut backend = FakeBackend::new(Window::Works);
    backend.max_minor = -1;
    let mut session = BridgeSession::new(backend, &options(false));
    assert!(session.create_context(Config(1), None).is_err());
}

#[test]
fn swap_before_make_current_does_nothing() {
    let (mut session, _context) = session_with(FakeBackend::new(Window::Works));
    session.swap_buffers(1);
    assert_eq!(*session.mode(), PresentationMode::Uninitialized);
    assert_eq!(session.backend().native_swaps, 0);
    assert!(session.backend().frames_put.is_empty());
}

#[test]
fn swap_of_another_drawable_is_ignored() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Fails));
    assert!(session.make_current(Some(1), Some(context)));
    session.swap_buffers(2);
    assert!(session.backend().frames_put.is_empty());
}

#[test]
fn pbuffer_follows_window_size() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Fails));
    assert!(session.make_current(Some(1), Some(context)));
    session.swap_buffers(1);

    session.backend().sizes.insert(1, (100, 50));
    session.swap_buffers(1);
    assert_eq!(
        session.backend().frames_put,
        [(1, 64, 32, 64 * 32 * 4), (1, 100, 50, 100 * 50 * 4)]
    );
    assert!(matches!(
        session.mode(),
        PresentationMode::PbufferCopy {
            width: 100,
            height: 50,
            ..
        }
    ));
    assert_eq!(
        session.backend().live_surfaces(),
        [&Created::Pbuffer(100, 50)]
    );
}

#[test]
fn destroying_current_context_tears_down() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Works));
    assert!(session.make_current(Some(1), Some(context)));
    session.destroy_context(context);
    assert_eq!(session.current_context(), None);
    assert_eq!(session.current_drawable(), None);
    assert_eq!(*session.mode(), PresentationMode::Uninitialized);
    assert!(session.backend().live_surfaces().is_empty());
    assert_eq!(session.context_config(context), None);
}

#[test]
fn release_keeps_the_surface() {
    let (mut session, context) = session_with(FakeBackend::new(Window::Works));
    assert!(session.make_current(Some(1), Some(context)));
    assert!(session.make_current(None, None));
    assert_eq!(session.current_context(), None);
    assert_eq!(session.backend().current, Some((None, None)));

    assert!(session.make_current(Some(1), Some(context)));
    assert_eq!(session.backend().window_attempts, 1);
}

#[test]
fn unknown_context_is_refused() {
    let (mut session, _context) = session_with(FakeBackend::new(Window::Works));
    assert!(!session.make_current(Some(1), Some(Context(9999))));
    assert_eq!(session.backend().window_attempts, 0);
}
