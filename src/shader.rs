/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Shader objects, shader translation and the program binary cache.
//!
//! Desktop applications hand us desktop GLSL. The ES driver only accepts ES
//! GLSL, so every shader's source goes through [translate] on its way to the
//! driver. Because translation and linking are slow, linked programs are
//! stored on disk by [cache], keyed by a hash of the sources the application
//! supplied. Those sources are kept alongside the rest of each shader object's
//! state in [objects].
//!
//! - [preprocess] has the purely textual passes: built-in polyfills, legacy
//!   syntax, version directives, precision.
//! - [layouts] adds the locations and bindings the front end wants.
//! - [translate] runs the compile round trip through `naga`.

pub mod cache;
mod interface;
pub mod layouts;
pub mod objects;
pub mod preprocess;
pub mod translate;

use crate::gles::gles32;
use crate::gles::gles32::types::{GLenum, GLuint};
use crate::options::Options;
use cache::{ProgramCache, ProgramDriver};
use objects::ShaderObjects;
use std::fmt;
use translate::{TranslateMode, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderStage {
    pub fn from_gl(shader_type: GLenum) -> Option<Self> {
        match shader_type {
            gles32::VERTEX_SHADER => Some(Self::Vertex),
            gles32::FRAGMENT_SHADER => Some(Self::Fragment),
            gles32::GEOMETRY_SHADER => Some(Self::Geometry),
            gles32::TESS_CONTROL_SHADER => Some(Self::TessControl),
            gles32::TESS_EVALUATION_SHADER => Some(Self::TessEvaluation),
            gles32::COMPUTE_SHADER => Some(Self::Compute),
            _ => None,
        }
    }

    pub fn to_gl(self) -> GLenum {
        match self {
            Self::Vertex => gles32::VERTEX_SHADER,
            Self::Fragment => gles32::FRAGMENT_SHADER,
            Self::Geometry => gles32::GEOMETRY_SHADER,
            Self::TessControl => gles32::TESS_CONTROL_SHADER,
            Self::TessEvaluation => gles32::TESS_EVALUATION_SHADER,
            Self::Compute => gles32::COMPUTE_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
            Self::Geometry => "geometry",
            Self::TessControl => "tessellation control",
            Self::TessEvaluation => "tessellation evaluation",
            Self::Compute => "compute",
        })
    }
}

/// Join the fragments of a shader source array into one string. Invalid UTF-8
/// is replaced rather than rejected; the driver will complain about it anyway.
pub fn concat_fragments<'a, I>(fragments: I) -> String
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut bytes = Vec::new();
    for fragment in fragments {
        bytes.extend_from_slice(fragment);
    }
    match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Everything the shader entry points need: the object table, the translator
/// and (if enabled) the program cache.
pub struct ShaderState {
    pub objects: ShaderObjects,
    translator: Translator,
    cache: Option<ProgramCache>,
}

impl ShaderState {
    pub fn new(options: &Options) -> Self {
        let mode = if options.translate_shaders {
            TranslateMode::Full
        } else {
            TranslateMode::RewriteOnly
        };
        let cache = if options.shader_cache {
            Self::open_cache(options)
        } else {
            log_dbg!("Program cache disabled");
            None
        };
        Self::with_parts(Translator::new(mode), cache)
    }

    fn open_cache(options: &Options) -> Option<ProgramCache> {
        let Some(dir) = options
            .cache_dir
            .clone()
            .or_else(crate::paths::default_cache_dir)
        else {
            log!("No home directory, program cache disabled");
            return None;
        };
        match ProgramCache::open(dir) {
            Ok(cache) => Some(cache),
            Err(err) => {
                log!("{}, program cache disabled", err);
                None
            }
        }
    }

    pub fn with_parts(translator: Translator, cache: Option<ProgramCache>) -> Self {
        ShaderState {
            objects: ShaderObjects::default(),
            translator,
            cache,
        }
    }

    pub fn cache(&self) -> Option<&ProgramCache> {
        self.cache.as_ref()
    }

    /// Record the application's source for `shader` and return what should be
    /// handed to the driver instead.
    pub fn shader_source(&mut self, shader: GLuint, source: String) -> String {
        let stage = self.objects.set_source(shader, source.clone());
        match stage {
            Some(stage) => self.translator.translate(stage, &source),
            None => {
                log!(
                    "Unknown stage for shader {}, passing its source through",
                    shader
                );
                source
            }
        }
    }

    /// Try to satisfy a link of `program` from the cache. Returns `true` if
    /// the program is now linked.
    pub fn load_program<D: ProgramDriver>(&mut self, program: GLuint, driver: &mut D) -> bool {
        let (Some(cache), Some(key)) = (&self.cache, self.objects.program_key(program)) else {
            return false;
        };
        cache.load(&key, program, driver)
    }

    /// Store the freshly linked `program` in the cache.
    pub fn save_program<D: ProgramDriver>(&mut self, program: GLuint, driver: &mut D) {
        let (Some(cache), Some(key)) = (&self.cache, self.objects.program_key(program)) else {
            return;
        };
        cache.save(&key, program, driver);
    }

    /// Forget a deleted shader. Cache entries stay valid: they're keyed by
    /// content, not by handle.
    pub fn remove_shader(&mut self, shader: GLuint) {
        self.objects.delete_shader(shader);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_round_trip() {
        for stage in [
            ShaderStage::Vertex,
            ShaderStage::Fragment,
            ShaderStage::Geometry,
            ShaderStage::TessControl,
            ShaderStage::TessEvaluation,
            ShaderStage::Compute,
        ] {
            assert_eq!(ShaderStage::from_gl(stage.to_gl()), Some(stage));
        }
        assert_eq!(ShaderStage::from_gl(0), None);
    }

    #[test]
    fn fragments_are_joined() {
        let parts: [&[u8]; 3] = [b"#version 330\n", b"void main()", b" {}"];
        assert_eq!(concat_fragments(parts), "#version 330\nvoid main() {}");
        let parts: [&[u8]; 2] = [b"a\xff", b"b"];
        assert_eq!(concat_fragments(parts), "a\u{fffd}b");
    }

    #[test]
    fn source_without_known_stage_is_untouched() {
        let mut state = ShaderState::with_parts(Translator::new(TranslateMode::RewriteOnly), None);
        let out = state.shader_source(12, "#version 330\nvoid main(){}".to_string());
        assert_eq!(out, "#version 330\nvoid main(){}");
        assert_eq!(
            state.objects.shader(12).and_then(|s| s.source()),
            Some("#version 330\nvoid main(){}")
        );
    }

    #[test]
    fn rewrite_only_translation() {
        let mut state = ShaderState::with_parts(Translator::new(TranslateMode::RewriteOnly), None);
        state.objects.create_shader(3, ShaderStage::Fragment);
        let out = state.shader_source(
            3,
            "#version 330\nout vec4 c;\nvoid main() { c = vec4(gl_DrawID); }\n".to_string(),
        );
        assert_eq!(
            out,
            "#version 320 es\nprecision mediump float;\nprecision mediump int;\n\
             uniform int glxes_DrawID;\nout vec4 c;\nvoid main() { c = vec4(glxes_DrawID); }\n"
        );
    }
}
