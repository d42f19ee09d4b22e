/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! This is separated out into its own package so the C part can be built
//! with `cc` without a build script on the main crate.

use std::ffi::{c_int, c_void};

// See build.rs and lib.c
extern "C" {
    /// Calls `callback(data)` with handlers for `SIGSEGV`, `SIGBUS`, `SIGILL`
    /// and `SIGFPE` installed, restoring the previous handlers afterwards.
    /// Returns 0 if the callback returned normally, or the number of the
    /// signal that interrupted it.
    pub fn glxes_catch_fault(
        callback: unsafe extern "C" fn(data: *mut c_void),
        data: *mut c_void,
    ) -> c_int;
}
