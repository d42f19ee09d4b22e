/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
use gl_generator::{Api, Fallbacks, GlobalGenerator, Profile, Registry};
use std::fs::File;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());

    let mut file = File::create(out_dir.join("gles32.rs")).unwrap();
    Registry::new(
        Api::Gles2,
        (3, 2),
        Profile::Core,
        Fallbacks::None,
        [
            // Each of these backs a desktop entry point that ES 3.2 lacks.
            "GL_EXT_buffer_storage",
            "GL_OES_mapbuffer",
            "GL_NV_conditional_render",
            "GL_EXT_blend_func_extended",
        ],
    )
    .write_bindings(GlobalGenerator, &mut file)
    .unwrap();

    let mut file = File::create(out_dir.join("egl.rs")).unwrap();
    Registry::new(
        Api::Egl,
        (1, 5),
        Profile::Core,
        Fallbacks::All,
        ["EGL_KHR_create_context", "EGL_EXT_platform_base"],
    )
    .write_bindings(GlobalGenerator, &mut file)
    .unwrap();
}
