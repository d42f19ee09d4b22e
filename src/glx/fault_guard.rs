/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Recovering from a crash inside a single driver call.
//!
//! Some EGL drivers crash rather than fail when asked for a surface on an X11
//! window they can't present to. This is a last resort for that one call: the
//! capability check in [super::session] avoids it where the driver tells the
//! truth about window support.
//!
//! Catching a fault is inherently best-effort. The driver may be left in a bad
//! state, and anything the interrupted code owned is leaked, since its frames
//! are jumped over without running destructors. Only wrap calls that own
//! nothing.

use glxes_fault_guard_wrapper::glxes_catch_fault;
use std::ffi::{c_int, c_void};

/// The signal that interrupted a guarded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault {
    pub signal: c_int,
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.signal {
            libc::SIGSEGV => "SIGSEGV",
            libc::SIGBUS => "SIGBUS",
            libc::SIGILL => "SIGILL",
            libc::SIGFPE => "SIGFPE",
            _ => "signal",
        };
        write!(f, "{} ({})", name, self.signal)
    }
}

struct Call<F, R> {
    f: Option<F>,
    result: Option<R>,
}

unsafe extern "C" fn trampoline<F: FnOnce() -> R, R>(data: *mut c_void) {
    let call = &mut *(data as *mut Call<F, R>);
    if let Some(f) = call.f.take() {
        call.result = Some(f());
    }
}

/// Run `f`, turning a memory access violation (or similar fault) inside it
/// into an [Err]. The fault handlers are only installed for the duration of
/// the call, and whatever was installed before is put back afterwards.
pub fn catch_fault<F: FnOnce() -> R, R>(f: F) -> Result<R, Fault> {
    let mut call = Call {
        f: Some(f),
        result: None,
    };
    let signal = unsafe {
        glxes_catch_fault(
            trampoline::<F, R>,
            &mut call as *mut Call<F, R> as *mut c_void,
        )
    };
    match call.result.take() {
        Some(result) if signal == 0 => Ok(result),
        _ => Err(Fault { signal }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::MaybeUninit;
    use std::sync::Mutex;

    // Signal handlers are process-wide, so guards on different test threads
    // would save and restore each other's handlers.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn current_handler(signal: c_int) -> libc::sighandler_t {
        unsafe {
            let mut action = MaybeUninit::<libc::sigaction>::zeroed();
            libc::sigaction(signal, std::ptr::null(), action.as_mut_ptr());
            action.assume_init().sa_sigaction
        }
    }

    #[test]
    fn returns_value() {
        let _serial = SERIAL.lock().unwrap_or_else(|err| err.into_inner());
        assert_eq!(catch_fault(|| 6 * 7), Ok(42));
    }

    #[test]
    fn catches_segfault() {
        let _serial = SERIAL.lock().unwrap_or_else(|err| err.into_inner());
        let before = current_handler(libc::SIGSEGV);
        let result = catch_fault(|| unsafe {
            libc::raise(libc::SIGSEGV);
        });
        assert_eq!(
            result,
            Err(Fault {
                signal: libc::SIGSEGV
            })
        );
        assert_eq!(current_handler(libc::SIGSEGV), before);
        // Still usable afterwards.
        assert_eq!(catch_fault(|| "ok"), Ok("ok"));
    }

    #[test]
    fn nested_guards() {
        let _serial = SERIAL.lock().unwrap_or_else(|err| err.into_inner());
        let result = catch_fault(|| {
            let inner = catch_fault(|| unsafe {
                libc::raise(libc::SIGBUS);
            });
            inner.map_err(|fault| fault.signal)
        });
        assert_eq!(result, Ok(Err(libc::SIGBUS)));
    }
}
