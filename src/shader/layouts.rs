/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Automatic `layout(location)` and `layout(binding)` assignment.
//!
//! Desktop GLSL lets the linker pick locations and bindings. The front end we
//! compile with doesn't: every interface variable needs a location and every
//! resource a binding, so they are added to the source text before parsing.
//!
//! Bindings we invent go in descriptor set 1, leaving set 0 for bindings the
//! application wrote itself. That's how the translator later tells the two
//! apart when numbering texture units and buffer binding points for ES.
//!
//! The front end also has no combined samplers, so [separate_samplers] turns
//! each one into a texture and a sampler object first.

use super::preprocess::{is_ident_char, rewrite_identifier_uses};
use super::ShaderStage;
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

/// Descriptor set used for bindings assigned by [assign_layouts].
pub const AUTO_BINDING_SET: u32 = 1;

/// Prefix of the sampler object [separate_samplers] adds for each combined
/// sampler. The texture keeps the application's name.
pub const SAMPLER_PREFIX: &str = "glxes_sampler_";

/// Highest number of varying locations handed out through
/// [VaryingLocations]. ES 3.2 guarantees 15 varying vectors.
pub const VARYING_LOCATION_LIMIT: u32 = 15;

/// Names of a shader's vertex inputs or fragment outputs, by location. The ES
/// back end renames these, and the application looks them up by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InterfaceNames {
    pub inputs: BTreeMap<u32, String>,
    pub outputs: BTreeMap<u32, String>,
}

/// Process-wide varying name → location registry, so that a vertex shader's
/// output and a fragment shader's input with the same name are given the same
/// location even though they're translated separately.
#[derive(Debug, Default)]
pub struct VaryingLocations {
    assigned: HashMap<String, u32>,
    next: u32,
}

impl VaryingLocations {
    fn locate(&mut self, name: &str, slots: u32, used: &UsedSlots) -> u32 {
        if let Some(&location) = self.assigned.get(name) {
            if used.is_free(location, slots) {
                return location;
            }
        }
        let mut location = used.first_free(self.next, slots);
        if location + slots > VARYING_LOCATION_LIMIT {
            // Out of globally unique locations. Matching between stages now
            // relies on both stages declaring things in the same order.
            log_dbg!("Varying locations exhausted, {} assigned per shader", name);
            location = used.first_free(0, slots);
        } else {
            self.next = location + slots;
        }
        self.assigned.insert(name.to_string(), location);
        location
    }
}

#[derive(Debug, Default)]
struct UsedSlots(Vec<Range<u32>>);

impl UsedSlots {
    fn is_free(&self, start: u32, slots: u32) -> bool {
        let wanted = start..start + slots;
        !self
            .0
            .iter()
            .any(|r| r.start < wanted.end && wanted.start < r.end)
    }
    fn first_free(&self, from: u32, slots: u32) -> u32 {
        let mut start = from;
        while !self.is_free(start, slots) {
            start += 1;
        }
        start
    }
    fn claim(&mut self, start: u32, slots: u32) {
        self.0.push(start..start + slots);
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

fn skip_line(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

fn skip_block_comment(bytes: &[u8], mut i: usize) -> usize {
    i += 2;
    while i < bytes.len() {
        if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            return i + 2;
        }
        i += 1;
    }
    i
}

/// Skip a preprocessor line, including backslash continuations.
fn skip_directive(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'\n') {
            i += 1;
        }
        i += 1;
    }
    i
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut line_start = true;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\n' {
            line_start = true;
            i += 1;
        } else if b.is_ascii_whitespace() {
            i += 1;
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            i = skip_line(bytes, i);
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i = skip_block_comment(bytes, i);
        } else if b == b'#' && line_start {
            i = skip_directive(bytes, i);
        } else {
            line_start = false;
            let start = i;
            i += 1;
            if is_ident_char(b) {
                while i < bytes.len() && is_ident_char(bytes[i]) {
                    i += 1;
                }
            } else {
                while i < bytes.len() && !bytes[i].is_ascii() {
                    i += 1;
                }
            }
            tokens.push(Token {
                text: &text[start..i],
                start,
                end: i,
            });
        }
    }
    tokens
}

/// Byte ranges (without the `;`) of every statement at global scope. Function
/// definitions and preprocessor lines are skipped.
fn global_statements(source: &str) -> Vec<Range<usize>> {
    let bytes = source.as_bytes();
    let mut statements = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut function_body = false;
    let mut line_start = true;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            i = skip_line(bytes, i);
            continue;
        }
        if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i = skip_block_comment(bytes, i);
            continue;
        }
        if b == b'#' && line_start {
            i = skip_directive(bytes, i);
            if depth == 0 && source[start..i].trim_start().starts_with('#') {
                start = i;
            }
            continue;
        }
        match b {
            b'{' => {
                if depth == 0 {
                    function_body = source[start..i].trim_end().ends_with(')');
                }
                depth += 1;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 && function_body {
                    function_body = false;
                    start = i + 1;
                }
            }
            b';' if depth == 0 => {
                statements.push(start..i);
                start = i + 1;
            }
            _ => (),
        }
        if b == b'\n' {
            line_start = true;
        } else if !b.is_ascii_whitespace() {
            line_start = false;
        }
        i += 1;
    }
    statements
}

/// [global_statements] with their tokens, offsets relative to `source`.
fn global_declarations(source: &str) -> Vec<(Range<usize>, Vec<Token<'_>>)> {
    global_statements(source)
        .into_iter()
        .map(|range| {
            let mut tokens = tokenize(&source[range.clone()]);
            for token in &mut tokens {
                token.start += range.start;
                token.end += range.start;
            }
            (range, tokens)
        })
        .filter(|(_, tokens)| !tokens.is_empty())
        .collect()
}

const AUXILIARY_QUALIFIERS: &[&str] = &[
    "flat",
    "smooth",
    "noperspective",
    "centroid",
    "sample",
    "patch",
    "invariant",
    "precise",
    "highp",
    "mediump",
    "lowp",
    "readonly",
    "writeonly",
    "coherent",
    "volatile",
    "restrict",
    "const",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Storage {
    In,
    Out,
    Uniform,
    Buffer,
}

/// A parsed global declaration. Token indices refer to the statement's token
/// list.
#[derive(Debug)]
struct Declaration {
    storage: Storage,
    /// Index of the `(` after `layout`, if there is a layout qualifier.
    layout_open: Option<usize>,
    layout_args: Vec<(String, Option<u32>)>,
    /// Index of the first token after the qualifiers: the type, or the block
    /// name.
    type_index: usize,
    block: bool,
}

fn parse_declaration(tokens: &[Token]) -> Option<Declaration> {
    let mut storage = None;
    let mut layout_open = None;
    let mut layout_args = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match tokens[i].text {
            "layout" => {
                if tokens.get(i + 1)?.text != "(" {
                    return None;
                }
                layout_open = Some(i + 1);
                i += 2;
                let mut arg: Option<(String, Option<u32>)> = None;
                let mut after_equals = false;
                loop {
                    let token = tokens.get(i)?;
                    match token.text {
                        ")" | "," => {
                            layout_args.extend(arg.take());
                            after_equals = false;
                            if token.text == ")" {
                                break;
                            }
                        }
                        "=" => after_equals = true,
                        text if after_equals => {
                            if let Some((_, value)) = arg.as_mut() {
                                *value = text.parse().ok();
                            }
                        }
                        text => arg = Some((text.to_string(), None)),
                    }
                    i += 1;
                }
            }
            "in" => storage = Some(Storage::In),
            "out" => storage = Some(Storage::Out),
            "uniform" => storage = Some(Storage::Uniform),
            "buffer" => storage = Some(Storage::Buffer),
            text if AUXILIARY_QUALIFIERS.contains(&text) => (),
            _ => break,
        }
        i += 1;
    }
    let storage = storage?;
    if i >= tokens.len() {
        // Something like `layout(local_size_x = 8) in`.
        return None;
    }
    Some(Declaration {
        storage,
        layout_open,
        layout_args,
        type_index: i,
        block: tokens.iter().any(|t| t.text == "{"),
    })
}

impl Declaration {
    fn layout_value(&self, name: &str) -> Option<Option<u32>> {
        self.layout_args
            .iter()
            .find(|(arg, _)| arg == name)
            .map(|(_, value)| *value)
    }
}

/// One declarator of a declaration like `out vec4 a, b[2];`.
#[derive(Debug)]
struct Declarator<'a> {
    name: &'a str,
    array_len: u32,
    range: Range<usize>,
}

fn declarators<'a>(tokens: &[Token<'a>], first: usize) -> Vec<Declarator<'a>> {
    let mut result = Vec::new();
    let mut nesting = 0i32;
    let mut group_start = first;
    for i in first..=tokens.len() {
        let at_end = i == tokens.len();
        if !at_end {
            match tokens[i].text {
                "(" | "[" => nesting += 1,
                ")" | "]" => nesting -= 1,
                _ => (),
            }
        }
        if at_end || (nesting == 0 && tokens[i].text == ",") {
            let group = &tokens[group_start..i];
            if let Some(name) = group.first() {
                let array_len = match group.get(1..4) {
                    Some([open, len, close]) if open.text == "[" && close.text == "]" => {
                        len.text.parse().unwrap_or(1)
                    }
                    _ => 1,
                };
                result.push(Declarator {
                    name: name.text,
                    array_len,
                    range: name.start..group[group.len() - 1].end,
                });
            }
            group_start = i + 1;
        }
    }
    result
}

/// Number of consecutive locations a value of this type occupies.
fn location_slots(type_name: &str) -> u32 {
    let columns = type_name
        .strip_prefix("dmat")
        .or_else(|| type_name.strip_prefix("mat"))
        .and_then(|dims| dims.bytes().next());
    match columns {
        Some(b'2') => 2,
        Some(b'3') => 3,
        Some(b'4') => 4,
        _ => 1,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Namespace {
    Inputs,
    Outputs,
    Bindings,
}

/// Which of a stage's interfaces get locations, and whether they're matched
/// between stages by name.
fn location_namespace(stage: ShaderStage, storage: Storage) -> Option<(Namespace, bool)> {
    match (stage, storage) {
        (ShaderStage::Vertex, Storage::In) => Some((Namespace::Inputs, false)),
        (ShaderStage::Vertex, Storage::Out) => Some((Namespace::Outputs, true)),
        (ShaderStage::Fragment, Storage::In) => Some((Namespace::Inputs, true)),
        (ShaderStage::Fragment, Storage::Out) => Some((Namespace::Outputs, false)),
        _ => None,
    }
}

struct Edit {
    range: Range<usize>,
    text: String,
}

/// The texture type and sampler type a combined sampler type like
/// `isampler2DArray` or `sampler2DShadow` is made of.
fn split_sampler_type(combined: &str) -> Option<(String, &'static str)> {
    let (kind, dims) = ["", "i", "u"].iter().find_map(|kind| {
        combined
            .strip_prefix(kind)
            .and_then(|rest| rest.strip_prefix("sampler"))
            .map(|dims| (*kind, dims))
    })?;
    let (dims, shadow) = match dims.strip_suffix("Shadow") {
        Some(dims) => (dims, true),
        None => (dims, false),
    };
    let known = matches!(
        dims,
        "1D" | "2D" | "3D" | "Cube" | "1DArray" | "2DArray" | "CubeArray" | "2DMS" | "2DMSArray"
    );
    if !known || (shadow && (!kind.is_empty() || matches!(dims, "3D" | "2DMS" | "2DMSArray"))) {
        return None;
    }
    let sampler = if shadow { "samplerShadow" } else { "sampler" };
    Some((format!("{}texture{}", kind, dims), sampler))
}

/// Split every global combined sampler (`uniform sampler2D tex;`) into a
/// texture and a sampler object, and combine the two again wherever `tex` is
/// used: `texture(sampler2D(tex, glxes_sampler_tex), uv)`. The texture keeps
/// the name and any layout qualifier. Arrays of samplers are left alone.
pub fn separate_samplers(source: &str) -> String {
    let mut edits = Vec::new();
    let mut constructors: HashMap<String, String> = HashMap::new();
    for (_, tokens) in global_declarations(source) {
        let Some(decl) = parse_declaration(&tokens) else {
            continue;
        };
        if decl.storage != Storage::Uniform || decl.block {
            continue;
        }
        let combined = tokens[decl.type_index].text;
        let Some((texture, sampler)) = split_sampler_type(combined) else {
            continue;
        };
        let declarators = declarators(&tokens, decl.type_index + 1);
        if declarators.is_empty() || declarators.iter().any(|d| d.range.len() != d.name.len()) {
            continue;
        }
        let head = &source[tokens[0].start..tokens[decl.type_index].start];
        let parts: Vec<String> = declarators
            .iter()
            .map(|declarator| {
                constructors.insert(declarator.name.to_string(), combined.to_string());
                format!(
                    "{}{} {}; uniform {} {}{}",
                    head, texture, declarator.name, sampler, SAMPLER_PREFIX, declarator.name
                )
            })
            .collect();
        edits.push(Edit {
            range: tokens[0].start..tokens[tokens.len() - 1].end,
            text: parts.join("; "),
        });
    }
    if edits.is_empty() {
        return source.to_string();
    }

    let combine = |text: &str| {
        rewrite_identifier_uses(text, |ident, after_dot| {
            let constructor = constructors.get(ident).filter(|_| !after_dot)?;
            Some(format!("{}({}, {}{})", constructor, ident, SAMPLER_PREFIX, ident))
        })
    };
    let mut out = String::with_capacity(source.len() + edits.len() * 64);
    let mut copied = 0;
    for edit in edits {
        out.push_str(&combine(&source[copied..edit.range.start]));
        out.push_str(&edit.text);
        copied = edit.range.end;
    }
    out.push_str(&combine(&source[copied..]));
    out
}

/// Give every global interface variable a location and every resource a
/// binding, returning the rewritten source together with the names of the
/// vertex inputs and fragment outputs.
pub fn assign_layouts(
    source: &str,
    stage: ShaderStage,
    varyings: &mut VaryingLocations,
) -> (String, InterfaceNames) {
    let statements = global_declarations(source);

    let parsed: Vec<Option<Declaration>> = statements
        .iter()
        .map(|(_, tokens)| parse_declaration(tokens))
        .collect();

    // First pass: everything the source already pins down.
    let mut used: HashMap<Namespace, UsedSlots> = HashMap::new();
    let mut names = InterfaceNames::default();
    for ((_, tokens), decl) in statements.iter().zip(&parsed) {
        let Some(decl) = decl else { continue };
        if matches!(decl.storage, Storage::Uniform | Storage::Buffer) {
            if let Some(Some(binding)) = decl.layout_value("binding") {
                used.entry(Namespace::Bindings)
                    .or_default()
                    .claim(binding, 1);
            }
            continue;
        }
        let Some((namespace, _)) = location_namespace(stage, decl.storage) else {
            continue;
        };
        if let Some(Some(location)) = decl.layout_value("location") {
            let type_name = tokens[decl.type_index].text;
            let mut slots = 0;
            for declarator in declarators(tokens, decl.type_index + 1) {
                record_name(&mut names, namespace, location + slots, declarator.name);
                slots += location_slots(type_name) * declarator.array_len;
            }
            used.entry(namespace).or_default().claim(location, slots.max(1));
        }
    }

    let mut edits = Vec::new();
    let mut next_binding = 0;
    for ((_, tokens), decl) in statements.iter().zip(&parsed) {
        let Some(decl) = decl else { continue };
        let type_token = tokens[decl.type_index];
        if type_token.text.starts_with("gl_") {
            continue;
        }
        let resource = matches!(decl.storage, Storage::Uniform | Storage::Buffer);
        if resource {
            if decl.layout_value("binding").is_some() {
                continue;
            }
            let binding_slots = used.entry(Namespace::Bindings).or_default();
            if decl.block {
                let binding = binding_slots.first_free(next_binding, 1);
                binding_slots.claim(binding, 1);
                next_binding = binding + 1;
                edits.push(layout_edit(
                    tokens,
                    decl,
                    &format!("set = {}, binding = {}", AUTO_BINDING_SET, binding),
                ));
                continue;
            }
            let mut parts = Vec::new();
            for declarator in declarators(tokens, decl.type_index + 1) {
                let binding = binding_slots.first_free(next_binding, 1);
                binding_slots.claim(binding, 1);
                next_binding = binding + 1;
                parts.push((
                    format!("set = {}, binding = {}", AUTO_BINDING_SET, binding),
                    declarator,
                ));
            }
            edits.extend(split_declaration(source, tokens, decl, parts));
            continue;
        }

        let Some((namespace, shared)) = location_namespace(stage, decl.storage) else {
            continue;
        };
        if decl.block || decl.layout_value("location").is_some() {
            continue;
        }
        let slot_map = used.entry(namespace).or_default();
        let mut parts = Vec::new();
        for declarator in declarators(tokens, decl.type_index + 1) {
            if declarator.name.starts_with("gl_") {
                continue;
            }
            let slots = location_slots(type_token.text) * declarator.array_len;
            let location = if shared {
                varyings.locate(declarator.name, slots, slot_map)
            } else {
                slot_map.first_free(0, slots)
            };
            slot_map.claim(location, slots);
            record_name(&mut names, namespace, location, declarator.name);
            parts.push((format!("location = {}", location), declarator));
        }
        if !parts.is_empty() {
            edits.extend(split_declaration(source, tokens, decl, parts));
        }
    }

    (apply_edits(source, edits), names)
}

fn record_name(names: &mut InterfaceNames, namespace: Namespace, location: u32, name: &str) {
    let map = match namespace {
        Namespace::Inputs => &mut names.inputs,
        Namespace::Outputs => &mut names.outputs,
        Namespace::Bindings => return,
    };
    map.insert(location, name.to_string());
}

/// Add `arg` to the declaration's layout qualifier, creating one if needed.
fn layout_edit(tokens: &[Token], decl: &Declaration, arg: &str) -> Edit {
    match decl.layout_open {
        Some(open) => {
            let at = tokens[open].end;
            Edit {
                range: at..at,
                text: format!("{}, ", arg),
            }
        }
        None => {
            let at = tokens[0].start;
            Edit {
                range: at..at,
                text: format!("layout({}) ", arg),
            }
        }
    }
}

/// Rewrite a declaration so that each declarator gets its own layout
/// argument. A single declarator only needs an insertion.
fn split_declaration(
    source: &str,
    tokens: &[Token],
    decl: &Declaration,
    mut parts: Vec<(String, Declarator)>,
) -> Vec<Edit> {
    if parts.len() == 1 {
        let (arg, _) = parts.remove(0);
        return vec![layout_edit(tokens, decl, &arg)];
    }
    let head = &source[tokens[0].start..tokens[decl.type_index].end];
    let statements: Vec<String> = parts
        .iter()
        .map(|(arg, declarator)| {
            let head = match decl.layout_open {
                Some(open) => {
                    let at = tokens[open].end - tokens[0].start;
                    format!("{}{}, {}", &head[..at], arg, &head[at..])
                }
                None => format!("layout({}) {}", arg, head),
            };
            format!("{} {}", head, &source[declarator.range.clone()])
        })
        .collect();
    let last = tokens[tokens.len() - 1].end;
    vec![Edit {
        range: tokens[0].start..last,
        text: statements.join("; "),
    }]
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by_key(|edit| edit.range.start);
    let mut out = String::with_capacity(source.len() + edits.len() * 32);
    let mut copied = 0;
    for edit in edits {
        out.push_str(&source[copied..edit.range.start]);
        out.push_str(&edit.text);
        copied = edit.range.end;
    }
    out.push_str(&source[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(source: &str, stage: ShaderStage) -> (String, InterfaceNames) {
        assign_layouts(source, stage, &mut VaryingLocations::default())
    }

    #[test]
    fn statements_skip_functions_and_directives() {
        let src = "#version 460\nin vec3 a;\nvoid f(in vec3 x) { int y; }\n\
                   uniform Block { mat4 m; } blk;\nout vec4 c;";
        let statements: Vec<&str> = global_statements(src)
            .into_iter()
            .map(|r| src[r].trim())
            .collect();
        assert_eq!(
            statements,
            vec!["in vec3 a", "uniform Block { mat4 m; } blk", "out vec4 c"]
        );
    }

    #[test]
    fn vertex_inputs_and_outputs() {
        let src = "#version 460\nin vec3 position;\nlayout(location = 0) in vec2 uv;\n\
                   in mat4 instance;\nout vec2 v_uv;\nvoid main() {}\n";
        let (out, names) = assign(src, ShaderStage::Vertex);
        assert_eq!(
            out,
            "#version 460\nlayout(location = 1) in vec3 position;\nlayout(location = 0) in vec2 uv;\n\
             layout(location = 2) in mat4 instance;\nlayout(location = 0) out vec2 v_uv;\nvoid main() {}\n"
        );
        assert_eq!(names.inputs.get(&0).map(String::as_str), Some("uv"));
        assert_eq!(names.inputs.get(&1).map(String::as_str), Some("position"));
        assert_eq!(names.inputs.get(&2).map(String::as_str), Some("instance"));
        assert_eq!(names.outputs.get(&0).map(String::as_str), Some("v_uv"));
    }

    #[test]
    fn varyings_agree_between_stages() {
        let mut varyings = VaryingLocations::default();
        let (vs, _) = assign_layouts(
            "out vec3 normal;\nout vec2 uv;\n",
            ShaderStage::Vertex,
            &mut varyings,
        );
        let (fs, _) = assign_layouts(
            "in vec2 uv;\nin vec3 normal;\nout vec4 color;\n",
            ShaderStage::Fragment,
            &mut varyings,
        );
        assert_eq!(
            vs,
            "layout(location = 0) out vec3 normal;\nlayout(location = 1) out vec2 uv;\n"
        );
        assert_eq!(
            fs,
            "layout(location = 1) in vec2 uv;\nlayout(location = 0) in vec3 normal;\n\
             layout(location = 0) out vec4 color;\n"
        );
    }

    #[test]
    fn bindings() {
        let src = "uniform sampler2D a, b;\nlayout(binding = 0) uniform sampler2D c;\n\
                   layout(std140) uniform Block { vec4 x; };\nuniform mat4 mvp;\n";
        let (out, _) = assign(src, ShaderStage::Fragment);
        assert_eq!(
            out,
            "layout(set = 1, binding = 1) uniform sampler2D a; \
             layout(set = 1, binding = 2) uniform sampler2D b;\n\
             layout(binding = 0) uniform sampler2D c;\n\
             layout(set = 1, binding = 3, std140) uniform Block { vec4 x; };\n\
             layout(set = 1, binding = 4) uniform mat4 mvp;\n"
        );
    }

    #[test]
    fn sampler_types() {
        assert_eq!(
            split_sampler_type("sampler2D"),
            Some(("texture2D".to_string(), "sampler"))
        );
        assert_eq!(
            split_sampler_type("usamplerCubeArray"),
            Some(("utextureCubeArray".to_string(), "sampler"))
        );
        assert_eq!(
            split_sampler_type("sampler2DArrayShadow"),
            Some(("texture2DArray".to_string(), "samplerShadow"))
        );
        assert_eq!(split_sampler_type("isampler2DShadow"), None);
        assert_eq!(split_sampler_type("samplerBuffer"), None);
        assert_eq!(split_sampler_type("sampler"), None);
        assert_eq!(split_sampler_type("vec4"), None);
    }

    #[test]
    fn combined_samplers_are_separated() {
        let src = "uniform sampler2D tex;\n\
                   layout(binding = 2) uniform highp isampler3D vol;\n\
                   uniform sampler2D a, b;\n\
                   uniform sampler2D many[2];\n\
                   void main() {\n\
                   c = texture(tex, uv) + vec4(texelFetch(vol, p, 0)) + light.tex;\n\
                   c += texture(a, uv) * textureSize(b, 0).x + texture(many[0], uv);\n\
                   }\n";
        assert_eq!(
            separate_samplers(src),
            "uniform texture2D tex; uniform sampler glxes_sampler_tex;\n\
             layout(binding = 2) uniform highp itexture3D vol; uniform sampler glxes_sampler_vol;\n\
             uniform texture2D a; uniform sampler glxes_sampler_a; \
             uniform texture2D b; uniform sampler glxes_sampler_b;\n\
             uniform sampler2D many[2];\n\
             void main() {\n\
             c = texture(sampler2D(tex, glxes_sampler_tex), uv) + \
             vec4(texelFetch(isampler3D(vol, glxes_sampler_vol), p, 0)) + light.tex;\n\
             c += texture(sampler2D(a, glxes_sampler_a), uv) * \
             textureSize(sampler2D(b, glxes_sampler_b), 0).x + texture(many[0], uv);\n\
             }\n"
        );
        let plain = "uniform vec4 tint;\nvoid main() {}\n";
        assert_eq!(separate_samplers(plain), plain);
    }

    #[test]
    fn separated_samplers_get_bindings() {
        let separated =
            separate_samplers("layout(binding = 0) uniform sampler2D a;\nuniform sampler2D b;\n");
        let (out, _) = assign(&separated, ShaderStage::Fragment);
        assert_eq!(
            out,
            "layout(binding = 0) uniform texture2D a; \
             layout(set = 1, binding = 1) uniform sampler glxes_sampler_a;\n\
             layout(set = 1, binding = 2) uniform texture2D b; \
             layout(set = 1, binding = 3) uniform sampler glxes_sampler_b;\n"
        );
    }

    #[test]
    fn builtins_and_qualifiers() {
        let src = "flat out int id;\nout gl_PerVertex { vec4 gl_Position; };\n\
                   layout(local_size_x = 8) in;\n";
        let (out, names) = assign(src, ShaderStage::Vertex);
        assert_eq!(
            out,
            "layout(location = 0) flat out int id;\nout gl_PerVertex { vec4 gl_Position; };\n\
             layout(local_size_x = 8) in;\n"
        );
        assert_eq!(names.outputs.len(), 1);
    }

    #[test]
    fn array_outputs_take_several_locations() {
        let (out, _) = assign("out vec4 colors[2];\nout vec4 extra;\n", ShaderStage::Fragment);
        assert_eq!(
            out,
            "layout(location = 0) out vec4 colors[2];\nlayout(location = 2) out vec4 extra;\n"
        );
    }

    #[test]
    fn varying_registry_limit() {
        let mut varyings = VaryingLocations::default();
        let used = UsedSlots::default();
        assert_eq!(varyings.locate("a", 14, &used), 0);
        assert_eq!(varyings.locate("b", 4, &used), 0);
        assert_eq!(varyings.locate("a", 14, &used), 0);
    }
}
