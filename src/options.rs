/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Parsing and management of user-configurable options.
//!
//! A library has no command line, so options come from environment variables.
//! They are read once, the first time anything asks for them.

use std::path::PathBuf;
use std::sync::OnceLock;

pub const DOCUMENTATION: &str = "\
Library options:
    LIBGL_EGL=...
    LIBGL_GLES=...
        Name or path of the EGL and OpenGL ES 2/3 libraries to load.

        The defaults are libEGL.so.1 and libGLESv2.so.2, with the unversioned
        names tried afterwards.

Shader options:
    GLXES_TRANSLATE=0
        Don't run shaders through the full translation pipeline. The version
        directive is still rewritten and the usual polyfills still applied.

    GLXES_SHADER_CACHE=0
        Don't store or reuse linked program binaries.

    GLXES_CACHE_DIR=...
        Directory for program binaries. The default is ~/.cache/glxes.

Window system options:
    GLXES_FORCE_PBUFFER=1
        Never try to render directly to the application's window. Frames are
        rendered off-screen and copied into the window on each swap.

    GLXES_GLES_MAJOR=...
        OpenGL ES major version requested for every context. The highest
        minor version the driver accepts is used. The default is 3.

Debugging options:
    GLXES_DEBUG=...
        Comma-separated list of module paths to print debug logging for, or
        `all`.
";

/// Struct containing all user-configurable options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub egl_library: Option<String>,
    pub gles_library: Option<String>,
    pub translate_shaders: bool,
    pub shader_cache: bool,
    pub cache_dir: Option<PathBuf>,
    pub force_pbuffer: bool,
    pub gles_major: i32,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            egl_library: None,
            gles_library: None,
            translate_shaders: true,
            shader_cache: true,
            cache_dir: None,
            force_pbuffer: false,
            gles_major: 3,
        }
    }
}

/// Every variable [Options::apply] knows about.
pub const VARIABLES: &[&str] = &[
    "LIBGL_EGL",
    "LIBGL_GLES",
    "GLXES_TRANSLATE",
    "GLXES_SHADER_CACHE",
    "GLXES_CACHE_DIR",
    "GLXES_FORCE_PBUFFER",
    "GLXES_GLES_MAJOR",
];

impl Options {
    /// Apply one environment variable. Returns `Ok(true)` if the variable was
    /// valid and has been applied, and `Ok(false)` if it was not recognized.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<bool, String> {
        fn parse_flag(value: &str, name: &str) -> Result<bool, String> {
            match value {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(format!("Value for {} is not a boolean", name)),
            }
        }

        match key {
            "LIBGL_EGL" => self.egl_library = Some(value.to_string()),
            "LIBGL_GLES" => self.gles_library = Some(value.to_string()),
            "GLXES_TRANSLATE" => self.translate_shaders = parse_flag(value, key)?,
            "GLXES_SHADER_CACHE" => self.shader_cache = parse_flag(value, key)?,
            "GLXES_CACHE_DIR" => {
                if value.is_empty() {
                    return Err("Cache directory is empty".to_string());
                }
                self.cache_dir = Some(PathBuf::from(value));
            }
            "GLXES_FORCE_PBUFFER" => self.force_pbuffer = parse_flag(value, key)?,
            "GLXES_GLES_MAJOR" => {
                let major: i32 = value
                    .parse()
                    .map_err(|_| format!("Value for {} is invalid", key))?;
                if !(2..=3).contains(&major) {
                    return Err(format!("Value for {} is out of range", key));
                }
                self.gles_major = major;
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Build options from `lookup`, which maps a variable name to its value.
    /// Bad values are reported and the default is kept.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut options = Options::default();
        for &key in VARIABLES {
            let Some(value) = lookup(key) else {
                continue;
            };
            if let Err(err) = options.apply(key, &value) {
                log!("Ignoring {}={:?}: {}", key, value, err);
            }
        }
        options
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// The process-wide options, read from the environment on first use.
pub fn get() -> &'static Options {
    static OPTIONS: OnceLock<Options> = OnceLock::new();
    OPTIONS.get_or_init(Options::from_env)
}
