/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */
//! Desktop GLSL to ES GLSL translation.
//!
//! The full translation is a compile round trip through `naga`:
//!
//! 1. Textual preparation ([super::preprocess], [super::layouts]): legacy
//!    syntax, built-in polyfills, `#version 460`, separate samplers,
//!    locations and bindings.
//! 2. GLSL front end, validation.
//! 3. Lowering to SPIR-V and parsing that back. This flattens away most of
//!    the desktop-only constructs the ES back end would choke on.
//! 4. Zero-initialization of function-local variables.
//! 5. ES GLSL 3.20 back end, then [super::interface] puts the application's
//!    names back and fragment shaders get a default precision.
//!
//! Any failure along the way is logged and the application's source is handed
//! to the driver unchanged: its own compile errors are the best diagnostics
//! the application can get.

use super::interface::{self, ResourceInfo, Resources};
use super::layouts::{
    assign_layouts, separate_samplers, InterfaceNames, VaryingLocations, AUTO_BINDING_SET,
};
use super::preprocess::{
    ensure_fragment_precision, modernize_legacy, normalize_version, polyfill_builtins,
};
use super::ShaderStage;
use naga::back::glsl;
use naga::back::spv;
use naga::valid::{Capabilities, ModuleInfo, TypeFlags, ValidationFlags, Validator};
use naga::{AddressSpace, Expression, ResourceBinding, Span, TypeInner};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Version the front end is given. The ES back end doesn't care what the
/// source claimed, only what's in the module.
pub const REFERENCE_VERSION: &str = "#version 460";

/// Version of everything handed to the driver.
pub const TARGET_VERSION: &str = "#version 320 es";

const ES_VERSION: u16 = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateMode {
    /// The whole compile round trip.
    Full,
    /// Textual rewrites only, for drivers that accept most desktop GLSL once
    /// it claims to be ES.
    RewriteOnly,
}

#[derive(Debug)]
pub struct TranslateError {
    pub stage: ShaderStage,
    /// The source as it was when the failing step got it.
    pub processed: String,
    pub message: String,
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shader: {}", self.stage, self.message)
    }
}

/// Which kind of ES binding point a resource takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BindingCategory {
    TextureUnit,
    UniformBlock,
    StorageBlock,
}

impl BindingCategory {
    fn of(space: AddressSpace) -> Option<Self> {
        match space {
            AddressSpace::Handle => Some(Self::TextureUnit),
            AddressSpace::Uniform => Some(Self::UniformBlock),
            AddressSpace::Storage { .. } => Some(Self::StorageBlock),
            _ => None,
        }
    }
}

/// Number ES binding points. Bindings the application chose (set 0) keep
/// their numbers. Ones we made up (set [AUTO_BINDING_SET]) are numbered from
/// 0 per category, skipping numbers the application already uses there.
fn assign_binding_points(
    resources: &[(ResourceBinding, BindingCategory)],
) -> glsl::BindingMap {
    let mut map = glsl::BindingMap::new();
    let mut taken: BTreeMap<BindingCategory, BTreeSet<u32>> = BTreeMap::new();
    for (binding, category) in resources {
        if binding.group != AUTO_BINDING_SET {
            if let Ok(point) = u8::try_from(binding.binding) {
                map.insert(binding.clone(), point);
                taken.entry(*category).or_default().insert(binding.binding);
            }
        }
    }

    let mut automatic: Vec<&(ResourceBinding, BindingCategory)> = resources
        .iter()
        .filter(|(binding, _)| binding.group == AUTO_BINDING_SET)
        .collect();
    automatic.sort_by_key(|(binding, _)| binding.binding);
    let mut next: BTreeMap<BindingCategory, u32> = BTreeMap::new();
    for (binding, category) in automatic {
        let used = taken.entry(*category).or_default();
        let counter = next.entry(*category).or_default();
        while used.contains(counter) {
            *counter += 1;
        }
        let Ok(point) = u8::try_from(*counter) else {
            log!("Out of binding points for {:?}", binding);
            continue;
        };
        used.insert(*counter);
        map.insert(binding.clone(), point);
    }
    map
}

/// Sampler objects have no ES counterpart: the back end folds each one into
/// the texture it is used with.
fn is_sampler(module: &naga::Module, var: &naga::GlobalVariable) -> bool {
    matches!(module.types[var.ty].inner, TypeInner::Sampler { .. })
}

fn es_binding_map(module: &naga::Module) -> glsl::BindingMap {
    let resources: Vec<(ResourceBinding, BindingCategory)> = module
        .global_variables
        .iter()
        .filter(|(_, var)| !is_sampler(module, var))
        .filter_map(|(_, var)| Some((var.binding.clone()?, BindingCategory::of(var.space)?)))
        .collect();
    assign_binding_points(&resources)
}

/// Collect the application's names for resources, before lowering loses them.
fn resource_infos(module: &naga::Module) -> Resources {
    let mut resources = Resources::new();
    for (_, var) in module.global_variables.iter() {
        let Some(ref binding) = var.binding else {
            continue;
        };
        if is_sampler(module, var) {
            continue;
        }
        let (loose, members) = match module.types[var.ty].inner {
            TypeInner::Struct { ref members, .. } => (
                false,
                members
                    .iter()
                    .map(|m| m.name.clone().unwrap_or_default())
                    .collect(),
            ),
            _ => (var.space == AddressSpace::Uniform, Vec::new()),
        };
        resources.insert(
            (binding.group, binding.binding),
            ResourceInfo {
                name: var.name.clone(),
                loose,
                members,
            },
        );
    }
    resources
}

/// Give every function-local variable without an initializer a zero one.
/// Reads of uninitialized locals are undefined in ES and some drivers really
/// do return garbage.
fn zero_initialize_locals(module: &mut naga::Module, info: &ModuleInfo) {
    let functions = module
        .functions
        .iter_mut()
        .map(|(_, fun)| fun)
        .chain(module.entry_points.iter_mut().map(|ep| &mut ep.function));
    for fun in functions {
        for (_, local) in fun.local_variables.iter_mut() {
            if local.init.is_none() && info[local.ty].contains(TypeFlags::CONSTRUCTIBLE) {
                let zero = fun
                    .expressions
                    .append(Expression::ZeroValue(local.ty), Span::UNDEFINED);
                local.init = Some(zero);
            }
        }
    }
}

fn naga_stage(stage: ShaderStage) -> Option<naga::ShaderStage> {
    match stage {
        ShaderStage::Vertex => Some(naga::ShaderStage::Vertex),
        ShaderStage::Fragment => Some(naga::ShaderStage::Fragment),
        ShaderStage::Compute => Some(naga::ShaderStage::Compute),
        ShaderStage::Geometry | ShaderStage::TessControl | ShaderStage::TessEvaluation => None,
    }
}

fn validate(module: &naga::Module) -> Result<ModuleInfo, String> {
    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(module)
        .map_err(|err| format!("{:?}", err))
}

/// Steps 2 to 5 of the round trip, on already prepared source.
fn compile_round_trip(
    stage: naga::ShaderStage,
    source: &str,
) -> Result<(String, Resources), String> {
    let module = naga::front::glsl::Frontend::default()
        .parse(&naga::front::glsl::Options::from(stage), source)
        .map_err(|err| format!("{:?}", err))?;
    let info = validate(&module)?;
    let resources = resource_infos(&module);

    let mut spv_options = spv::Options::default();
    spv_options.flags.remove(spv::WriterFlags::ADJUST_COORDINATE_SPACE);
    spv_options.flags |= spv::WriterFlags::DEBUG;
    let words = spv::write_vec(&module, &info, &spv_options, None)
        .map_err(|err| format!("{:?}", err))?;
    let bytes: Vec<u8> = words.iter().flat_map(|word| word.to_le_bytes()).collect();

    let mut module = naga::front::spv::parse_u8_slice(
        &bytes,
        &naga::front::spv::Options {
            adjust_coordinate_space: false,
            ..Default::default()
        },
    )
    .map_err(|err| format!("{:?}", err))?;
    let info = validate(&module)?;
    zero_initialize_locals(&mut module, &info);
    let info = validate(&module)?;

    let options = glsl::Options {
        version: glsl::Version::Embedded {
            version: ES_VERSION,
            is_webgl: false,
        },
        writer_flags: glsl::WriterFlags::empty(),
        binding_map: es_binding_map(&module),
        ..Default::default()
    };
    let pipeline_options = glsl::PipelineOptions {
        shader_stage: stage,
        entry_point: "main".to_string(),
        multiview: None,
    };
    let mut output = String::new();
    glsl::Writer::new(
        &mut output,
        &module,
        &info,
        &options,
        &pipeline_options,
        naga::proc::BoundsCheckPolicies::default(),
    )
    .and_then(|mut writer| writer.write())
    .map_err(|err| format!("{:?}", err))?;
    Ok((output, resources))
}

/// The textual passes shared by both modes, up to the version directive.
fn rewrite_source(stage: ShaderStage, source: &str, version: &str) -> String {
    let source = modernize_legacy(source, stage);
    let source = polyfill_builtins(&source);
    normalize_version(&source, version)
}

pub struct Translator {
    mode: TranslateMode,
    varyings: VaryingLocations,
}

impl Translator {
    pub fn new(mode: TranslateMode) -> Self {
        Translator {
            mode,
            varyings: VaryingLocations::default(),
        }
    }

    pub fn mode(&self) -> TranslateMode {
        self.mode
    }

    /// Translate `source`, falling back to returning it unchanged.
    pub fn translate(&mut self, stage: ShaderStage, source: &str) -> String {
        if self.mode == TranslateMode::RewriteOnly {
            let rewritten = rewrite_source(stage, source, TARGET_VERSION);
            return if stage == ShaderStage::Fragment {
                ensure_fragment_precision(&rewritten)
            } else {
                rewritten
            };
        }

        match self.try_translate(stage, source) {
            Ok(translated) => {
                log_dbg!("Translated {} shader:\n{}", stage, translated);
                translated
            }
            Err(err) => {
                log!("Couldn't translate {}", err);
                log!("Source at the point of failure:\n{}", err.processed);
                source.to_string()
            }
        }
    }

    pub fn try_translate(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> Result<String, TranslateError> {
        let prepared = rewrite_source(stage, source, REFERENCE_VERSION);
        let Some(naga_stage) = naga_stage(stage) else {
            return Err(TranslateError {
                stage,
                processed: prepared,
                message: "no ES translation for this stage".to_string(),
            });
        };
        let prepared = separate_samplers(&prepared);
        let (prepared, names): (String, InterfaceNames) =
            assign_layouts(&prepared, stage, &mut self.varyings);
        log_dbg!("Prepared {} shader:\n{}", stage, prepared);

        let (output, resources) =
            compile_round_trip(naga_stage, &prepared).map_err(|message| TranslateError {
                stage,
                processed: prepared.clone(),
                message,
            })?;
        let output = interface::restore_names(&output, stage, &names, &resources);
        Ok(if stage == ShaderStage::Fragment {
            ensure_fragment_precision(&output)
        } else {
            output
        })
    }
}
