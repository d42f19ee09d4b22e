/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Our view of the application's shader and program objects.
//!
//! The driver owns the real objects. We only keep what we need: each shader's
//! stage and the source the application gave it (before translation), and the
//! order in which shaders were attached to each program. A record lives
//! exactly as long as the object, so a handle the driver reuses after deletion
//! starts with a clean slate.

use super::ShaderStage;
use crate::gles::gles32::types::GLuint;
use crate::hash::ContentHash;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ShaderObject {
    stage: Option<ShaderStage>,
    source: Option<String>,
}

impl ShaderObject {
    pub fn stage(&self) -> Option<ShaderStage> {
        self.stage
    }
    /// The source as the application wrote it, if it has supplied one.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct ProgramObject {
    attached: Vec<GLuint>,
}

#[derive(Debug, Default)]
pub struct ShaderObjects {
    shaders: HashMap<GLuint, ShaderObject>,
    programs: HashMap<GLuint, ProgramObject>,
}

impl ShaderObjects {
    pub fn create_shader(&mut self, shader: GLuint, stage: ShaderStage) {
        self.shaders.insert(
            shader,
            ShaderObject {
                stage: Some(stage),
                source: None,
            },
        );
    }

    /// Replace the shader's source, returning its stage if known. Shaders we
    /// didn't see being created (e.g. made before we were loaded) get a record
    /// without a stage.
    pub fn set_source(&mut self, shader: GLuint, source: String) -> Option<ShaderStage> {
        let object = self.shaders.entry(shader).or_default();
        object.source = Some(source);
        object.stage
    }

    pub fn shader(&self, shader: GLuint) -> Option<&ShaderObject> {
        self.shaders.get(&shader)
    }

    pub fn delete_shader(&mut self, shader: GLuint) {
        self.shaders.remove(&shader);
    }

    pub fn create_program(&mut self, program: GLuint) {
        self.programs.insert(program, ProgramObject::default());
    }

    pub fn attach(&mut self, program: GLuint, shader: GLuint) {
        let attached = &mut self.programs.entry(program).or_default().attached;
        if !attached.contains(&shader) {
            attached.push(shader);
        }
    }

    pub fn detach(&mut self, program: GLuint, shader: GLuint) {
        if let Some(object) = self.programs.get_mut(&program) {
            object.attached.retain(|&s| s != shader);
        }
    }

    pub fn delete_program(&mut self, program: GLuint) {
        self.programs.remove(&program);
    }

    pub fn attached(&self, program: GLuint) -> &[GLuint] {
        self.programs
            .get(&program)
            .map_or(&[], |object| object.attached.as_slice())
    }

    /// Cache key for `program`: the hash of its attached shaders' sources,
    /// concatenated in attachment order. [None] if there's nothing attached or
    /// any attached shader's source is unknown to us, since then the key
    /// wouldn't describe the whole program.
    pub fn program_key(&self, program: GLuint) -> Option<ContentHash> {
        let attached = self.attached(program);
        if attached.is_empty() {
            return None;
        }
        let sources = attached
            .iter()
            .map(|shader| self.shader(*shader)?.source())
            .collect::<Option<Vec<&str>>>()?;
        Some(ContentHash::of_concatenation(
            sources.into_iter().map(str::as_bytes),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program_with(objects: &mut ShaderObjects, program: GLuint, sources: &[(GLuint, &str)]) {
        objects.create_program(program);
        for &(shader, source) in sources {
            objects.create_shader(shader, ShaderStage::Vertex);
            objects.set_source(shader, source.to_string());
            objects.attach(program, shader);
        }
    }

    #[test]
    fn key_is_content_addressed() {
        let mut objects = ShaderObjects::default();
        program_with(&mut objects, 1, &[(10, "void main(){}"), (11, "out vec4 c;")]);
        program_with(&mut objects, 2, &[(20, "void main(){}"), (21, "out vec4 c;")]);
        let key = objects.program_key(1).unwrap();
        assert_eq!(objects.program_key(2), Some(key));
        assert_eq!(
            key,
            ContentHash::of(b"void main(){}out vec4 c;")
        );

        objects.set_source(21, "out vec4 d;".to_string());
        assert_ne!(objects.program_key(2), Some(key));
    }

    #[test]
    fn attachment_order_matters() {
        let mut objects = ShaderObjects::default();
        program_with(&mut objects, 1, &[(10, "a"), (11, "b")]);
        program_with(&mut objects, 2, &[(21, "b"), (20, "a")]);
        assert_ne!(objects.program_key(1), objects.program_key(2));

        objects.detach(2, 21);
        objects.attach(2, 21);
        assert_eq!(objects.attached(2), &[20, 21]);
        assert_eq!(objects.program_key(1), objects.program_key(2));
    }

    #[test]
    fn unknown_sources_are_not_keyed() {
        let mut objects = ShaderObjects::default();
        assert_eq!(objects.program_key(5), None);
        program_with(&mut objects, 5, &[(50, "a")]);
        objects.attach(5, 51);
        assert_eq!(objects.program_key(5), None);
    }

    #[test]
    fn deleted_shader_forgets_source() {
        let mut objects = ShaderObjects::default();
        program_with(&mut objects, 1, &[(10, "a")]);
        objects.delete_shader(10);
        assert!(objects.shader(10).is_none());
        assert_eq!(objects.program_key(1), None);

        // A reused handle starts over.
        objects.create_shader(10, ShaderStage::Fragment);
        assert_eq!(objects.shader(10).unwrap().source(), None);
        assert_eq!(
            objects.shader(10).unwrap().stage(),
            Some(ShaderStage::Fragment)
        );
    }
}
