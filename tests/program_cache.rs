/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! The program binary cache, against a scripted driver.

use std::collections::HashMap;
use std::path::PathBuf;
use GL::gles::gles32::types::GLuint;
use GL::hash::ContentHash;
use GL::shader::cache::{ProgramBinary, ProgramCache, ProgramDriver};
use GL::shader::objects::ShaderObjects;
use GL::shader::translate::{TranslateMode, Translator};
use GL::shader::{ShaderStage, ShaderState};

/// A cache directory that is removed again when the test ends.
struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "glxes-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        TempDir(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Hands out one fixed binary for every program, and only accepts that
/// binary back.
struct FakeDriver {
    binary: ProgramBinary,
    loaded: HashMap<GLuint, ProgramBinary>,
}

impl FakeDriver {
    fn new() -> Self {
        FakeDriver {
            binary: ProgramBinary {
                format: 7,
                blob: vec![1, 2, 3, 4],
            },
            loaded: HashMap::new(),
        }
    }
}

impl ProgramDriver for FakeDriver {
    fn program_binary(&mut self, _program: GLuint) -> Option<ProgramBinary> {
        Some(self.binary.clone())
    }

    fn load_program_binary(&mut self, program: GLuint, binary: &ProgramBinary) -> bool {
        self.loaded.insert(program, binary.clone());
        *binary == self.binary
    }
}

#[test]
fn entry_round_trip() {
    let dir = TempDir::new("round-trip");
    let cache = ProgramCache::open(dir.0.clone()).unwrap();
    let key = ContentHash::of(b"void main() {}");
    let binary = ProgramBinary {
        format: 7,
        blob: vec![1, 2, 3, 4],
    };

    assert_eq!(cache.read(&key), None);
    cache.write(&key, &binary).unwrap();
    assert_eq!(cache.read(&key), Some(binary));

    let path = cache.entry_path(&key);
    assert_eq!(path.file_name().unwrap().len(), 64);
    // No temporary files are left behind.
    assert_eq!(std::fs::read_dir(&dir.0).unwrap().count(), 1);
}

#[test]
fn corrupt_entry_is_a_miss_and_removed() {
    let dir = TempDir::new("corrupt");
    let cache = ProgramCache::open(dir.0.clone()).unwrap();
    let key = ContentHash::of(b"corrupt me");
    let mut driver = FakeDriver::new();

    cache.save(&key, 1, &mut driver);
    assert!(cache.load(&key, 2, &mut driver));
    assert_eq!(driver.loaded[&2].blob, [1, 2, 3, 4]);

    let path = cache.entry_path(&key);
    let mut bytes = std::fs::read(&path).unwrap();
    *bytes.last_mut().unwrap() ^= 0xff;
    std::fs::write(&path, bytes).unwrap();

    assert!(!cache.load(&key, 3, &mut driver));
    assert!(!path.exists());
    // Still a miss the second time round, now because there's no file.
    assert!(!cache.load(&key, 3, &mut driver));
}

#[test]
fn truncated_entry_is_removed() {
    let dir = TempDir::new("truncated");
    let cache = ProgramCache::open(dir.0.clone()).unwrap();
    let key = ContentHash::of(b"short");
    std::fs::write(cache.entry_path(&key), [7u8, 0]).unwrap();

    assert_eq!(cache.read(&key), None);
    assert!(!cache.entry_path(&key).exists());
}

#[test]
fn empty_binaries_are_not_stored() {
    let dir = TempDir::new("empty");
    let cache = ProgramCache::open(dir.0.clone()).unwrap();
    let key = ContentHash::of(b"unsupported");
    let mut driver = FakeDriver::new();
    driver.binary.blob.clear();

    cache.save(&key, 1, &mut driver);
    assert!(!cache.entry_path(&key).exists());
}

#[test]
fn keys_are_content_addressed() {
    let mut objects = ShaderObjects::default();
    let sources = ["#version 330\nvoid main() {}\n", "#version 330\nout vec4 c;\nvoid main() {}\n"];
    for (program, shaders) in [(1, [10, 11]), (2, [20, 21])] {
        objects.create_program(program);
        for (shader, source) in shaders.into_iter().zip(sources) {
            objects.create_shader(shader, ShaderStage::Vertex);
            objects.set_source(shader, source.to_string());
            objects.attach(program, shader);
        }
    }
    let key = objects.program_key(1).unwrap();
    assert_eq!(objects.program_key(2), Some(key));

    objects.set_source(21, sources[1].replace("c;", "d;"));
    assert_ne!(objects.program_key(2), Some(key));

    objects.create_program(3);
    assert_eq!(objects.program_key(3), None);
}

#[test]
fn second_run_links_from_cache() {
    let dir = TempDir::new("second-run");
    let vertex = "#version 330\nvoid main() { gl_Position = vec4(0.0); }\n";
    let fragment = "#version 330\nout vec4 c;\nvoid main() { c = vec4(1.0); }\n";

    let link = |handles: (GLuint, GLuint, GLuint), driver: &mut FakeDriver| {
        let cache = ProgramCache::open(dir.0.clone()).unwrap();
        let mut state =
            ShaderState::with_parts(Translator::new(TranslateMode::RewriteOnly), Some(cache));
        let (program, vs, fs) = handles;
        state.objects.create_shader(vs, ShaderStage::Vertex);
        state.objects.create_shader(fs, ShaderStage::Fragment);
        state.shader_source(vs, vertex.to_string());
        state.shader_source(fs, fragment.to_string());
        state.objects.create_program(program);
        state.objects.attach(program, vs);
        state.objects.attach(program, fs);
        if state.load_program(program, driver) {
            true
        } else {
            state.save_program(program, driver);
            false
        }
    };

    let mut driver = FakeDriver::new();
    assert!(!link((1, 2, 3), &mut driver), "first run can't hit");
    // Different handles, same sources.
    assert!(link((7, 8, 9), &mut driver), "second run should hit");
    assert_eq!(driver.loaded[&7].format, 7);
}
