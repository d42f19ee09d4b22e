/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Textual passes run on GLSL before (or instead of) compilation.
//!
//! None of these understand GLSL beyond identifiers and lines. They're only
//! meant to get desktop sources into a shape the front end (or, in rewrite-only
//! mode, the ES driver) accepts.

use super::ShaderStage;

/// A desktop-only built-in variable and the uniform standing in for it.
#[derive(Debug)]
pub struct Polyfill {
    pub builtin: &'static str,
    pub replacement: &'static str,
    pub declaration: &'static str,
}

/// Built-ins from `ARB_shader_draw_parameters` that OpenGL ES lacks.
pub const BUILTIN_POLYFILLS: &[Polyfill] = &[
    Polyfill {
        builtin: "gl_DrawID",
        replacement: "glxes_DrawID",
        declaration: "uniform int glxes_DrawID;",
    },
    Polyfill {
        builtin: "gl_BaseInstance",
        replacement: "glxes_BaseInstance",
        declaration: "uniform int glxes_BaseInstance;",
    },
    Polyfill {
        builtin: "gl_BaseVertex",
        replacement: "glxes_BaseVertex",
        declaration: "uniform int glxes_BaseVertex;",
    },
];

/// Name of the output declared to replace `gl_FragColor`.
pub const FRAG_COLOR_OUTPUT: &str = "glxes_FragColor";

pub const FRAGMENT_PRECISION_PREAMBLE: &str = "precision mediump float;\nprecision mediump int;\n";

pub(super) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(super) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Copy `text`, replacing every whole identifier for which `rename` returns a
/// new name. Numeric literals are skipped so that e.g. `1e5` is never seen as
/// the identifier `e5`.
pub fn rewrite_identifiers<F>(text: &str, mut rename: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    rewrite_identifier_uses(text, |ident, _| rename(ident))
}

/// Like [rewrite_identifiers], but `rename` is also told whether the
/// identifier follows a `.`, i.e. is a member name or a swizzle.
pub fn rewrite_identifier_uses<F>(text: &str, mut rename: F) -> String
where
    F: FnMut(&str, bool) -> Option<String>,
{
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if is_ident_start(bytes[i]) {
            let start = i;
            while i < bytes.len() && is_ident_char(bytes[i]) {
                i += 1;
            }
            let after_dot = text[..start].trim_end().ends_with('.');
            if let Some(new_name) = rename(&text[start..i], after_dot) {
                out.push_str(&text[copied..start]);
                out.push_str(&new_name);
                copied = i;
            }
        } else if bytes[i].is_ascii_digit() {
            while i < bytes.len() && (is_ident_char(bytes[i]) || bytes[i] == b'.') {
                i += 1;
            }
        } else {
            i += 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Replace whole-identifier occurrences of `from` with `to`.
pub fn replace_identifier(text: &str, from: &str, to: &str) -> String {
    rewrite_identifiers(text, |ident| (ident == from).then(|| to.to_string()))
}

pub fn contains_identifier(text: &str, ident: &str) -> bool {
    let mut found = false;
    rewrite_identifiers(text, |candidate| {
        found |= candidate == ident;
        None
    });
    found
}

/// Location of a `#version` directive line in some source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDirective {
    /// Byte offset of the start of the line.
    pub start: usize,
    /// Byte offset just past the line, including its newline if it has one.
    pub end: usize,
    /// The number, or 0 if it didn't parse.
    pub version: u32,
    pub es: bool,
}

impl VersionDirective {
    /// Whether the source predates `in`/`out` storage qualifiers.
    pub fn is_legacy(&self) -> bool {
        if self.es {
            self.version < 300
        } else {
            self.version < 130
        }
    }
}

pub fn find_version_directive(source: &str) -> Option<VersionDirective> {
    let mut offset = 0;
    for line in source.split_inclusive('\n') {
        let directive = line
            .trim_start()
            .strip_prefix('#')
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix("version"))
            .filter(|args| args.is_empty() || args.starts_with(|c: char| c.is_whitespace()));
        if let Some(args) = directive {
            let mut words = args.split_whitespace();
            let version = words.next().and_then(|w| w.parse().ok()).unwrap_or(0);
            let es = words.next() == Some("es");
            return Some(VersionDirective {
                start: offset,
                end: offset + line.len(),
                version,
                es,
            });
        }
        offset += line.len();
    }
    None
}

/// Insert `text` on the line after the version directive, or at the very start
/// if there is none. `text` should end with a newline.
pub fn insert_after_version(source: &str, text: &str) -> String {
    let at = find_version_directive(source).map_or(0, |d| d.end);
    let mut out = String::with_capacity(source.len() + text.len() + 1);
    out.push_str(&source[..at]);
    if at > 0 && !source[..at].ends_with('\n') {
        out.push('\n');
    }
    out.push_str(text);
    out.push_str(&source[at..]);
    out
}

/// Replace the version directive with `directive`, which always ends up on
/// the first line. A directive further down (after a comment, say) is removed
/// too, so exactly one remains. Everything else is kept as it was.
pub fn normalize_version(source: &str, directive: &str) -> String {
    let mut out = String::with_capacity(source.len() + directive.len() + 1);
    out.push_str(directive);
    out.push('\n');
    match find_version_directive(source) {
        Some(d) => {
            out.push_str(&source[..d.start]);
            out.push_str(&source[d.end..]);
        }
        None => out.push_str(source),
    }
    out
}

/// Replace desktop-only built-ins with uniforms, declaring each uniform that
/// ends up being used. Running this on its own output changes nothing.
pub fn polyfill_builtins(source: &str) -> String {
    let found: Vec<&Polyfill> = BUILTIN_POLYFILLS
        .iter()
        .filter(|p| contains_identifier(source, p.builtin))
        .collect();
    if found.is_empty() {
        return source.to_string();
    }
    let replaced = rewrite_identifiers(source, |ident| {
        found
            .iter()
            .find(|p| p.builtin == ident)
            .map(|p| p.replacement.to_string())
    });
    let declarations: String = found
        .iter()
        .map(|p| format!("{}\n", p.declaration))
        .collect();
    insert_after_version(&replaced, &declarations)
}

/// Bring GLSL 1.10/1.20 (and ES 1.00) syntax up to what later versions accept:
/// `attribute`/`varying` qualifiers, the `texture2D` family and
/// `gl_FragColor`. Sources with a newer version directive are left alone.
pub fn modernize_legacy(source: &str, stage: ShaderStage) -> String {
    let legacy = find_version_directive(source).map_or(true, |d| d.is_legacy());
    if !legacy {
        return source.to_string();
    }

    let mut uses_frag_color = false;
    let rewritten = rewrite_identifiers(source, |ident| {
        let new_name = match (ident, stage) {
            ("attribute", ShaderStage::Vertex) => "in",
            ("varying", ShaderStage::Vertex) => "out",
            ("varying", ShaderStage::Fragment) => "in",
            ("texture2D" | "texture3D" | "textureCube", _) => "texture",
            ("texture2DProj" | "texture3DProj", _) => "textureProj",
            ("texture2DLod" | "textureCubeLod", _) => "textureLod",
            ("gl_FragColor", ShaderStage::Fragment) => {
                uses_frag_color = true;
                FRAG_COLOR_OUTPUT
            }
            _ => return None,
        };
        Some(new_name.to_string())
    });
    if uses_frag_color {
        insert_after_version(&rewritten, &format!("out vec4 {};\n", FRAG_COLOR_OUTPUT))
    } else {
        rewritten
    }
}

pub fn has_default_float_precision(source: &str) -> bool {
    source.lines().any(|line| {
        let line = line.trim();
        line.starts_with("precision ") && line.trim_end_matches(';').trim_end().ends_with(" float")
    })
}

/// ES fragment shaders have no default float precision, so supply one unless
/// the source already does.
pub fn ensure_fragment_precision(source: &str) -> String {
    if has_default_float_precision(source) {
        source.to_string()
    } else {
        insert_after_version(source, FRAGMENT_PRECISION_PREAMBLE)
    }
}
