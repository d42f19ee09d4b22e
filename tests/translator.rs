/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Shader translation, from the outside.

use GL::shader::layouts::SAMPLER_PREFIX;
use GL::shader::preprocess::{
    normalize_version, polyfill_builtins, FRAGMENT_PRECISION_PREAMBLE, FRAG_COLOR_OUTPUT,
};
use GL::shader::translate::{TranslateMode, Translator, TARGET_VERSION};
use GL::shader::ShaderStage;

fn version_directives(source: &str) -> usize {
    source
        .lines()
        .filter(|line| line.trim_start().starts_with("#version"))
        .count()
}

#[test]
fn version_is_normalized() {
    let source = "#version 330\nvoid main(){}";
    assert_eq!(
        normalize_version(source, TARGET_VERSION),
        "#version 320 es\nvoid main(){}"
    );

    let mut translator = Translator::new(TranslateMode::RewriteOnly);
    let output = translator.translate(ShaderStage::Vertex, source);
    assert!(output.starts_with("#version 320 es\n"));
    assert!(output.ends_with("void main(){}"));
    assert_eq!(version_directives(&output), 1);
}

#[test]
fn missing_version_is_added() {
    let mut translator = Translator::new(TranslateMode::RewriteOnly);
    let output = translator.translate(ShaderStage::Vertex, "void main(){}");
    assert!(output.starts_with("#version 320 es\n"));
    assert_eq!(version_directives(&output), 1);
}

#[test]
fn polyfills_are_idempotent() {
    let source = "#version 460\n\
                  out flat int id;\n\
                  void main() { id = gl_DrawID + gl_BaseInstance; }\n";
    let once = polyfill_builtins(source);
    assert_ne!(once, source);
    assert!(!once.contains("gl_DrawID"));
    assert!(!once.contains("gl_BaseInstance"));
    assert_eq!(polyfill_builtins(&once), once);
}

#[test]
fn invalid_source_comes_back_unchanged() {
    let source = "#version 330 core\nvoid main() {\n    gl_Position = vec4(0.0);\n";
    let mut translator = Translator::new(TranslateMode::Full);
    assert_eq!(translator.translate(ShaderStage::Vertex, source), source);
}

#[test]
fn fragment_shaders_get_a_precision() {
    let mut translator = Translator::new(TranslateMode::RewriteOnly);
    let output = translator.translate(
        ShaderStage::Fragment,
        "#version 330\nout vec4 color;\nvoid main() { color = vec4(1.0); }\n",
    );
    assert!(output.starts_with(&format!("#version 320 es\n{}", FRAGMENT_PRECISION_PREAMBLE)));

    let already = "#version 330\nprecision highp float;\nout vec4 color;\nvoid main() {}\n";
    let output = translator.translate(ShaderStage::Fragment, already);
    assert!(!output.contains(FRAGMENT_PRECISION_PREAMBLE));
}

/// Number of declarations of `name` at global scope in generated GLSL, where
/// every global declaration is on a line of its own.
fn global_declarations_of(source: &str, name: &str) -> usize {
    let mut depth = 0usize;
    let mut count = 0;
    for line in source.lines() {
        let mut rest = line.trim();
        while let Some(after) = rest.strip_prefix('}') {
            depth = depth.saturating_sub(1);
            rest = after.trim_start();
        }
        if depth == 0 {
            if let Some(after_layout) = rest.strip_prefix("layout(") {
                rest = after_layout.split_once(')').map_or("", |(_, decl)| decl);
            }
            count += rest
                .split(';')
                .filter(|statement| {
                    let head = statement
                        .split(|c| c == '=' || c == '[')
                        .next()
                        .unwrap_or_default();
                    let words: Vec<&str> = head.split_whitespace().collect();
                    words.len() >= 2 && words[words.len() - 1] == name
                })
                .count();
        }
        depth += rest.matches('{').count();
        depth = depth.saturating_sub(rest.matches('}').count());
    }
    count
}

#[test]
fn declaration_counting() {
    let text = "layout(location = 0) out vec4 color;\n\
                vec4 color_1 = vec4(0.0);\n\
                uniform Light {\n    vec4 color;\n} light;\n\
                void main() {\n    vec4 color = color_1;\n}\n";
    assert_eq!(global_declarations_of(text, "color"), 1);
    assert_eq!(global_declarations_of(text, "color_1"), 1);
    assert_eq!(global_declarations_of(text, "light"), 0);
    assert_eq!(
        global_declarations_of("vec4 color = vec4(0.0);\nout vec4 color;\n", "color"),
        2
    );
}

/// Every shader here must make it through the whole pipeline, with each of
/// the listed names declared exactly once in the result. A shader that falls
/// back to its original source is a translator regression. Shaders are
/// translated in order by one translator, so vertex outputs and fragment
/// inputs of neighbouring entries line up.
#[test]
fn corpus_translates() {
    let corpus: &[(ShaderStage, &str, &[&str])] = &[
        (
            ShaderStage::Vertex,
            "#version 330 core\n\
             layout(location = 0) in vec3 position;\n\
             void main() {\n\
                 gl_Position = vec4(position, 1.0);\n\
             }\n",
            &["position"],
        ),
        (
            ShaderStage::Fragment,
            "#version 330 core\n\
             layout(location = 0) out vec4 color;\n\
             void main() {\n\
                 color = vec4(1.0, 0.5, 0.25, 1.0);\n\
             }\n",
            &["color"],
        ),
        (
            ShaderStage::Vertex,
            "#version 330 core\n\
             layout(std140) uniform Matrices {\n\
                 mat4 mvp;\n\
                 mat4 model;\n\
             };\n\
             in vec3 position;\n\
             in vec2 texcoord;\n\
             out vec2 v_texcoord;\n\
             void main() {\n\
                 v_texcoord = texcoord;\n\
                 gl_Position = mvp * model * vec4(position, 1.0);\n\
             }\n",
            &["position", "texcoord"],
        ),
        (
            ShaderStage::Fragment,
            "#version 330 core\n\
             uniform sampler2D diffuse;\n\
             uniform vec4 tint;\n\
             in vec2 v_texcoord;\n\
             out vec4 frag_color;\n\
             void main() {\n\
                 frag_color = texture(diffuse, v_texcoord) * tint;\n\
             }\n",
            &["diffuse", "tint", "frag_color"],
        ),
        (
            ShaderStage::Vertex,
            "#version 120\n\
             attribute vec4 corner;\n\
             uniform mat4 projection;\n\
             varying vec2 coord;\n\
             void main() {\n\
                 coord = corner.zw;\n\
                 gl_Position = projection * vec4(corner.xy, 0.0, 1.0);\n\
             }\n",
            &["corner", "projection"],
        ),
        (
            ShaderStage::Fragment,
            "#version 120\n\
             uniform sampler2D glyphs;\n\
             uniform vec3 text_color;\n\
             varying vec2 coord;\n\
             void main() {\n\
                 gl_FragColor = vec4(text_color, texture2D(glyphs, coord).r);\n\
             }\n",
            &["glyphs", "text_color", FRAG_COLOR_OUTPUT],
        ),
        (
            ShaderStage::Fragment,
            "#version 420 core\n\
             layout(binding = 0) uniform sampler2D scene;\n\
             layout(std140, binding = 1) uniform Light {\n\
                 vec4 color;\n\
                 vec4 direction;\n\
             } light;\n\
             in vec3 normal;\n\
             layout(location = 0) out vec4 color;\n\
             void main() {\n\
                 float d = max(dot(normalize(normal), -light.direction.xyz), 0.0);\n\
                 color = texture(scene, vec2(d)) * light.color * d;\n\
             }\n",
            &["scene", "color"],
        ),
    ];
    let mut translator = Translator::new(TranslateMode::Full);
    for &(stage, source, names) in corpus {
        let output = translator
            .try_translate(stage, source)
            .unwrap_or_else(|err| panic!("{} shader didn't translate: {}", stage, err));
        assert!(output.starts_with(TARGET_VERSION), "{}", output);
        assert_eq!(version_directives(&output), 1, "{}", output);
        assert!(output.contains("void main()"), "{}", output);
        for name in names {
            assert_eq!(
                global_declarations_of(&output, name),
                1,
                "{} should be declared once in:\n{}",
                name,
                output
            );
        }
        for generated in ["_p2vs_location", "_fs2p_location", SAMPLER_PREFIX] {
            assert!(!output.contains(generated), "{}", output);
        }
    }
}

#[test]
fn sampled_textures_keep_their_names() {
    let mut translator = Translator::new(TranslateMode::Full);
    let output = translator
        .try_translate(
            ShaderStage::Fragment,
            "#version 330 core\n\
             uniform sampler2D base;\n\
             uniform sampler2D detail;\n\
             in vec2 uv;\n\
             out vec4 color;\n\
             void main() {\n\
                 color = texture(base, uv) * texture(detail, uv * 8.0);\n\
             }\n",
        )
        .unwrap();
    assert!(output.contains("texture(base,"), "{}", output);
    assert!(output.contains("texture(detail,"), "{}", output);
    assert_eq!(output.matches("sampler2D ").count(), 2, "{}", output);
}
