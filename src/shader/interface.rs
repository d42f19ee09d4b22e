/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Putting the application's names back into generated ES GLSL.
//!
//! The ES back end names resources after their bindings
//! (`_group_1_binding_0_fs`), names vertex inputs and fragment outputs after
//! their locations (`_p2vs_location0`, `_fs2p_location0`), and writes every
//! uniform as an interface block. Applications find uniforms, attributes and
//! fragment outputs by name, so all of that has to be undone on the text.
//! Varyings between stages keep their generated names: they match by location.

use super::layouts::InterfaceNames;
use super::preprocess::{
    contains_identifier, is_ident_char, is_ident_start, replace_identifier, rewrite_identifier_uses,
    rewrite_identifiers,
};
use super::ShaderStage;
use std::collections::HashMap;

/// What we know about the resource at a `(group, binding)` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceInfo {
    /// The name it had in the application's source, if any. Anonymous blocks
    /// have none.
    pub name: Option<String>,
    /// Declared as a plain `uniform T name;` rather than a block.
    pub loose: bool,
    /// Original member names, if its type is a struct.
    pub members: Vec<String>,
}

pub type Resources = HashMap<(u32, u32), ResourceInfo>;

/// Parse a name like `_group_1_binding_0_fs`.
fn parse_resource_ident(ident: &str) -> Option<(u32, u32)> {
    let rest = ident.strip_prefix("_group_")?;
    let (group, rest) = rest.split_once("_binding_")?;
    let (binding, stage) = rest.split_once('_')?;
    if !matches!(stage, "vs" | "fs" | "cs") {
        return None;
    }
    Some((group.parse().ok()?, binding.parse().ok()?))
}

/// Parse a name like `_p2vs_location3` for the given prefix.
fn parse_location_ident(ident: &str, prefix: &str) -> Option<u32> {
    ident
        .strip_prefix(prefix)?
        .strip_prefix("_location")?
        .parse()
        .ok()
}

/// A line like
/// `layout(std140, binding = 0) uniform T_block_0Fragment { T _group_1_binding_0_fs; };`
#[derive(Debug, PartialEq, Eq)]
struct BlockDecl<'a> {
    /// Everything up to and including the `uniform`/`buffer` keyword.
    prefix: &'a str,
    member_type: &'a str,
    instance: &'a str,
}

fn parse_block_decl(line: &str) -> Option<BlockDecl<'_>> {
    let body = line.trim().strip_suffix("};")?;
    let (head, inner) = body.split_once('{')?;
    let mut parts = inner.trim().strip_suffix(';')?.split_whitespace();
    let (member_type, instance) = (parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let (prefix, block_name) = head.trim_end().rsplit_once(' ')?;
    if !(prefix.ends_with("uniform") || prefix.ends_with("buffer")) || !block_name.contains("_block_") {
        return None;
    }
    Some(BlockDecl {
        prefix,
        member_type,
        instance,
    })
}

fn count_identifier(text: &str, ident: &str) -> usize {
    let mut count = 0;
    rewrite_identifiers(text, |candidate| {
        count += usize::from(candidate == ident);
        None
    });
    count
}

/// Name declared by a member line like `highp vec4 colors[2];`.
fn declared_name(line: &str) -> Option<&str> {
    let decl = line.trim().trim_end_matches(';');
    let decl = decl.split('[').next()?;
    decl.split_whitespace().last()
}

/// Replace every `instance.member` with whatever `replace` makes of `member`.
fn rewrite_member_access<F>(text: &str, instance: &str, mut replace: F) -> String
where
    F: FnMut(&str) -> String,
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
            if &text[start..i] != instance || bytes.get(i) != Some(&b'.') {
                continue;
            }
            let member_start = i + 1;
            let mut end = member_start;
            while end < bytes.len() && is_ident_char(bytes[end]) {
                end += 1;
            }
            if end > member_start {
                out.push_str(&text[copied..start]);
                out.push_str(&replace(&text[member_start..end]));
                copied = end;
                i = end;
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

fn join_lines(lines: &[String], trailing_newline: bool) -> String {
    let mut text = lines.join("\n");
    if trailing_newline {
        text.push('\n');
    }
    text
}

/// Turn one generated interface block back into what the application
/// declared. [None] if the block doesn't look like something we can undo.
fn flatten_block(text: &str, decl_line: &str, resources: &Resources) -> Option<String> {
    let decl = parse_block_decl(decl_line)?;
    let resource = resources.get(&parse_resource_ident(decl.instance)?)?;
    let mut lines: Vec<String> = text.lines().map(String::from).collect();
    let decl_index = lines.iter().position(|l| l == decl_line)?;
    let trailing_newline = text.ends_with('\n');

    let header = format!("struct {} {{", decl.member_type);
    let Some(struct_start) = lines.iter().position(|l| l.trim() == header) else {
        // The member isn't a struct: a loose uniform written as a block.
        if !resource.loose {
            return None;
        }
        lines[decl_index] = format!("uniform {} {};", decl.member_type, decl.instance);
        return Some(join_lines(&lines, trailing_newline));
    };
    let struct_end = struct_start + lines[struct_start..].iter().position(|l| l.trim() == "};")?;
    if count_identifier(text, decl.member_type) != 2 {
        // The struct type is used for something else too, so it must stay.
        return None;
    }
    let member_lines: Vec<String> = lines[struct_start + 1..struct_end]
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    let (replacement, rewrite): (String, Box<dyn Fn(&str) -> String>) =
        if resource.loose && member_lines.len() == 1 {
            let name = resource.name.clone()?;
            let member = declared_name(&member_lines[0])?;
            let declaration = replace_identifier(member_lines[0].trim_end_matches(';'), member, &name);
            (
                format!("uniform {};", declaration),
                Box::new(move |_: &str| name.clone()),
            )
        } else {
            let mut renames = HashMap::new();
            let mut members = Vec::new();
            for (i, line) in member_lines.iter().enumerate() {
                let emitted = declared_name(line)?.to_string();
                let original = resource
                    .members
                    .get(i)
                    .filter(|name| !name.is_empty() && member_lines.len() == resource.members.len())
                    .cloned()
                    .unwrap_or_else(|| emitted.clone());
                members.push(format!("    {}", replace_identifier(line, &emitted, &original)));
                renames.insert(emitted, original);
            }
            let (suffix, access_prefix) = match resource.name {
                Some(ref name) => (format!(" {}", name), format!("{}.", name)),
                None => (String::new(), String::new()),
            };
            (
                format!(
                    "{} {} {{\n{}\n}}{};",
                    decl.prefix,
                    decl.member_type,
                    members.join("\n"),
                    suffix
                ),
                Box::new(move |member: &str| {
                    let member = renames.get(member).map_or(member, String::as_str);
                    format!("{}{}", access_prefix, member)
                }),
            )
        };

    lines[decl_index] = replacement;
    lines.drain(struct_start..=struct_end);
    let text = join_lines(&lines, trailing_newline);
    Some(rewrite_member_access(&text, decl.instance, rewrite))
}

/// Whether `name` could be read as a swizzle, e.g. `xy` or `rgba`.
fn is_swizzle(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 4
        && ["xyzw", "rgba", "stpq"]
            .iter()
            .any(|set| name.chars().all(|c| set.contains(c)))
}

/// Give a fresh name to every identifier that is already called something
/// in `restored`. The back end keeps the application's names on private
/// copies of inputs and outputs (`vec4 color = vec4(0.0);`), and those would
/// otherwise be declared twice once the interface gets its names back.
fn rename_clashes(text: &str, restored: &[String]) -> String {
    let mut renames: HashMap<&str, String> = HashMap::new();
    for name in restored {
        if renames.contains_key(name.as_str()) || !contains_identifier(text, name) {
            continue;
        }
        let mut n = 1;
        let fresh = loop {
            let candidate = format!("{}_{}", name, n);
            if !contains_identifier(text, &candidate)
                && !restored.contains(&candidate)
                && !renames.values().any(|taken| *taken == candidate)
            {
                break candidate;
            }
            n += 1;
        };
        log_dbg!("Renaming {} to {} to make room for the interface", name, fresh);
        renames.insert(name.as_str(), fresh);
    }
    if renames.is_empty() {
        return text.to_string();
    }

    // Members are renamed along with the name, swizzles are not.
    rewrite_identifier_uses(text, |ident, after_dot| {
        if after_dot && is_swizzle(ident) {
            return None;
        }
        renames.get(ident).cloned()
    })
}

/// Undo the back end's renaming. See the module documentation.
pub fn restore_names(
    text: &str,
    stage: ShaderStage,
    names: &InterfaceNames,
    resources: &Resources,
) -> String {
    let mut restored: Vec<String> = resources
        .values()
        .filter_map(|resource| resource.name.clone())
        .filter(|name| !name.starts_with("gl_"))
        .collect();
    match stage {
        ShaderStage::Vertex => restored.extend(names.inputs.values().cloned()),
        ShaderStage::Fragment => restored.extend(names.outputs.values().cloned()),
        _ => (),
    }
    let mut text = rename_clashes(text, &restored);
    let block_lines: Vec<String> = text
        .lines()
        .filter(|line| parse_block_decl(line).is_some())
        .map(String::from)
        .collect();
    for line in block_lines {
        if let Some(flattened) = flatten_block(&text, &line, resources) {
            text = flattened;
        } else {
            log_dbg!("Leaving generated block as is: {}", line.trim());
        }
    }

    rewrite_identifiers(&text, |ident| {
        if let Some(key) = parse_resource_ident(ident) {
            return resources
                .get(&key)?
                .name
                .clone()
                .filter(|name| !name.starts_with("gl_"));
        }
        let location = match stage {
            ShaderStage::Vertex => names.inputs.get(&parse_location_ident(ident, "_p2vs")?),
            ShaderStage::Fragment => names.outputs.get(&parse_location_ident(ident, "_fs2p")?),
            _ => None,
        };
        location.cloned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names() {
        assert_eq!(parse_resource_ident("_group_1_binding_12_fs"), Some((1, 12)));
        assert_eq!(parse_resource_ident("_group_1_binding_12_xx"), None);
        assert_eq!(parse_resource_ident("group_1_binding_12_fs"), None);
        assert_eq!(parse_location_ident("_p2vs_location3", "_p2vs"), Some(3));
        assert_eq!(parse_location_ident("_vs2fs_location3", "_p2vs"), None);
    }

    #[test]
    fn block_declaration() {
        assert_eq!(
            parse_block_decl(
                "layout(std140, binding = 0) uniform T_block_0Fragment { T _group_1_binding_0_fs; };"
            ),
            Some(BlockDecl {
                prefix: "layout(std140, binding = 0) uniform",
                member_type: "T",
                instance: "_group_1_binding_0_fs",
            })
        );
        assert_eq!(parse_block_decl("struct T {"), None);
        assert_eq!(parse_block_decl("uniform Foo { vec4 a; vec4 b; };"), None);
    }

    #[test]
    fn swizzles() {
        assert!(is_swizzle("xy"));
        assert!(is_swizzle("rgba"));
        assert!(!is_swizzle("xr"));
        assert!(!is_swizzle("color"));
        assert!(!is_swizzle("xyzwx"));
    }

    #[test]
    fn private_copies_are_renamed() {
        let text = "\
struct Light {
    vec4 color;
};
uniform Light light_;
vec4 color = vec4(0.0);
vec4 color_1 = vec4(0.0);
vec4 x = vec4(0.0);
layout(location = 0) out vec4 _fs2p_location0;
void main() {
    color = light_.color + x.xxxx;
    _fs2p_location0 = color;
}
";
        let restored = ["color".to_string(), "x".to_string()];
        assert_eq!(
            rename_clashes(text, &restored),
            "\
struct Light {
    vec4 color_2;
};
uniform Light light_;
vec4 color_2 = vec4(0.0);
vec4 color_1 = vec4(0.0);
vec4 x_1 = vec4(0.0);
layout(location = 0) out vec4 _fs2p_location0;
void main() {
    color_2 = light_.color_2 + x_1.xxxx;
    _fs2p_location0 = color_2;
}
"
        );
        assert_eq!(rename_clashes("void main() {}", &restored), "void main() {}");
    }

    #[test]
    fn restored_output_is_declared_once() {
        let text = "\
#version 320 es

precision highp float;
precision highp int;

vec4 color = vec4(0.0);

layout(location = 0) out vec4 _fs2p_location0;

void main_1() {
    color = vec4(1.0, 0.0, 0.0, 1.0);
    return;
}

void main() {
    main_1();
    vec4 _e1 = color;
    _fs2p_location0 = _e1;
    return;
}
";
        let mut names = InterfaceNames::default();
        names.outputs.insert(0, "color".to_string());
        let restored = restore_names(text, ShaderStage::Fragment, &names, &Resources::new());
        assert!(restored.contains("vec4 color_1 = vec4(0.0);"));
        assert!(restored.contains("layout(location = 0) out vec4 color;"));
        assert!(restored.contains("color = _e1;"));
        assert_eq!(restored.matches("vec4 color ").count(), 0);
        assert_eq!(restored.matches("vec4 color;").count(), 1);
    }

    const GENERATED: &str = "\
#version 320 es

precision highp float;
precision highp int;

struct type_2 {
    vec4 member;
};
struct Matrices {
    mat4 mvp_;
    mat4 model;
};
layout(std140, binding = 0) uniform type_2_block_0Fragment { type_2 _group_1_binding_0_fs; };

layout(std140, binding = 1) uniform Matrices_block_1Fragment { Matrices _group_1_binding_1_fs; };

uniform highp sampler2D _group_0_binding_3_fs;

layout(location = 0) smooth in vec2 _vs2fs_location0;
layout(location = 0) out vec4 _fs2p_location0;

void main() {
    vec2 uv = _vs2fs_location0;
    _fs2p_location0 = (texture(_group_0_binding_3_fs, uv) * _group_1_binding_0_fs.member) * _group_1_binding_1_fs.mvp_[0];
    return;
}
";

    #[test]
    fn restores_fragment_interface() {
        let mut resources = Resources::new();
        resources.insert(
            (1, 0),
            ResourceInfo {
                name: Some("tint".to_string()),
                loose: true,
                members: vec![String::new()],
            },
        );
        resources.insert(
            (1, 1),
            ResourceInfo {
                name: None,
                loose: false,
                members: vec!["mvp".to_string(), "model".to_string()],
            },
        );
        resources.insert(
            (0, 3),
            ResourceInfo {
                name: Some("tex".to_string()),
                loose: false,
                members: Vec::new(),
            },
        );
        let mut names = InterfaceNames::default();
        names.outputs.insert(0, "color".to_string());

        let restored = restore_names(GENERATED, ShaderStage::Fragment, &names, &resources);
        assert_eq!(
            restored,
            "\
#version 320 es

precision highp float;
precision highp int;

uniform vec4 tint;

layout(std140, binding = 1) uniform Matrices {
    mat4 mvp;
    mat4 model;
};

uniform highp sampler2D tex;

layout(location = 0) smooth in vec2 _vs2fs_location0;
layout(location = 0) out vec4 color;

void main() {
    vec2 uv = _vs2fs_location0;
    color = (texture(tex, uv) * tint) * mvp[0];
    return;
}
"
        );
    }

    #[test]
    fn named_block_instance_and_unwrapped_uniform() {
        let text = "\
struct Light {
    vec4 color;
};
layout(std140, binding = 0) uniform Light_block_0Vertex { Light _group_1_binding_0_vs; };
layout(std140, binding = 1) uniform type_block_1Vertex { float _group_1_binding_1_vs; };
layout(location = 0) in vec3 _p2vs_location0;
void main() {
    gl_Position = vec4(_p2vs_location0, _group_1_binding_1_vs) * _group_1_binding_0_vs.color;
}
";
        let mut resources = Resources::new();
        resources.insert(
            (1, 0),
            ResourceInfo {
                name: Some("light".to_string()),
                loose: false,
                members: vec!["color".to_string()],
            },
        );
        resources.insert(
            (1, 1),
            ResourceInfo {
                name: Some("scale".to_string()),
                loose: true,
                members: Vec::new(),
            },
        );
        let mut names = InterfaceNames::default();
        names.inputs.insert(0, "position".to_string());

        assert_eq!(
            restore_names(text, ShaderStage::Vertex, &names, &resources),
            "\
layout(std140, binding = 0) uniform Light {
    vec4 color;
} light;
uniform float scale;
layout(location = 0) in vec3 position;
void main() {
    gl_Position = vec4(position, scale) * light.color;
}
"
        );
    }
}
