use std::{collections::HashMap, sync::Arc};

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::{
    fields::{FieldCondition, FieldDescriptor},
    presets,
    render_state::{
        Blend, BlendOp, ConditionalRenderState, Cull, DirectiveValue, RenderState,
        RenderStateCollection, StencilDescriptor, ZTest, ZWrite,
    },
};

/// JSON description of one pass's render states.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PassStateDSL {
    pub version: String,
    pub metadata: Metadata,
    /// Name of a bundled preset whose states are written before `states`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub states: Vec<StateEntry>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Metadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StateEntry {
    #[serde(flatten)]
    pub state: StateSpec,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ConditionSpec>,
}

/// Token strings are matched against the enumerated values first; anything
/// unrecognised (e.g. `[_CullMode]`) is written as given.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "kind")]
pub enum StateSpec {
    Cull {
        value: String,
    },
    Blend {
        /// A complete directive, used verbatim.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dst: Option<String>,
        #[serde(default, rename = "alphaSrc", skip_serializing_if = "Option::is_none")]
        alpha_src: Option<String>,
        #[serde(default, rename = "alphaDst", skip_serializing_if = "Option::is_none")]
        alpha_dst: Option<String>,
    },
    BlendOp {
        op: String,
        #[serde(default, rename = "opAlpha", skip_serializing_if = "Option::is_none")]
        op_alpha: Option<String>,
    },
    DepthTest {
        value: String,
    },
    DepthWrite {
        value: String,
    },
    ColorMask {
        value: String,
    },
    ClipBehavior {
        value: String,
    },
    Stencil(StencilDescriptor),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConditionSpec {
    /// Qualified field name, `tag.name` or `name`.
    pub field: String,
    #[serde(default = "default_condition")]
    pub condition: bool,
}

fn default_condition() -> bool {
    true
}

impl StateSpec {
    pub fn to_render_state(&self) -> Result<RenderState> {
        Ok(match self {
            StateSpec::Cull { value } => {
                RenderState::cull(DirectiveValue::<Cull>::parse_lenient(value))
            }
            StateSpec::Blend {
                value,
                src,
                dst,
                alpha_src,
                alpha_dst,
            } => parse_blend(
                value.as_deref(),
                src.as_deref(),
                dst.as_deref(),
                alpha_src.as_deref(),
                alpha_dst.as_deref(),
            )?,
            StateSpec::BlendOp { op, op_alpha } => {
                let op = DirectiveValue::<BlendOp>::parse_lenient(op);
                match op_alpha {
                    Some(a) => RenderState::blend_op_separate(
                        op,
                        DirectiveValue::<BlendOp>::parse_lenient(a),
                    ),
                    None => RenderState::blend_op(op),
                }
            }
            StateSpec::DepthTest { value } => {
                RenderState::depth_test(DirectiveValue::<ZTest>::parse_lenient(value))
            }
            StateSpec::DepthWrite { value } => {
                RenderState::depth_write(DirectiveValue::<ZWrite>::parse_lenient(value))
            }
            StateSpec::ColorMask { value } => RenderState::color_mask(value.as_str()),
            StateSpec::ClipBehavior { value } => RenderState::clip_behavior(value),
            StateSpec::Stencil(stencil) => RenderState::stencil(stencil),
        })
    }
}

fn parse_blend(
    value: Option<&str>,
    src: Option<&str>,
    dst: Option<&str>,
    alpha_src: Option<&str>,
    alpha_dst: Option<&str>,
) -> Result<RenderState> {
    let factor = DirectiveValue::<Blend>::parse_lenient;
    if let Some(value) = value {
        if src.is_some() || dst.is_some() || alpha_src.is_some() || alpha_dst.is_some() {
            bail!("Blend: `value` cannot be combined with src/dst factors");
        }
        return Ok(RenderState::blend_raw(value));
    }

    let (Some(src), Some(dst)) = (src, dst) else {
        bail!("Blend: expected either `value` or both `src` and `dst`");
    };
    Ok(match (alpha_src, alpha_dst) {
        (None, None) => RenderState::blend(factor(src), factor(dst)),
        (Some(a_src), Some(a_dst)) => {
            RenderState::blend_separate(factor(src), factor(dst), factor(a_src), factor(a_dst))
        }
        _ => bail!("Blend: `alphaSrc` and `alphaDst` must be given together"),
    })
}

/// Qualified field name to its shared descriptor.
#[derive(Debug, Default)]
pub(crate) struct FieldRegistry {
    fields: HashMap<String, Arc<FieldDescriptor>>,
}

impl FieldRegistry {
    pub(crate) fn from_fields(fields: &[FieldDescriptor]) -> Self {
        let mut registry = Self::default();
        registry.extend(fields);
        registry
    }

    /// Later declarations replace earlier ones with the same qualified name.
    pub(crate) fn extend(&mut self, fields: &[FieldDescriptor]) {
        for f in fields {
            self.fields.insert(f.qualified_name(), Arc::new(f.clone()));
        }
    }

    fn resolve(&self, name: &str) -> Result<Arc<FieldDescriptor>> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("undeclared field: {name}"))
    }

    pub(crate) fn build_states(
        &self,
        states: &[StateEntry],
    ) -> Result<Vec<ConditionalRenderState>> {
        states
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let render_state = entry
                    .state
                    .to_render_state()
                    .with_context(|| format!("states[{i}]"))?;
                let conditions = entry
                    .conditions
                    .iter()
                    .map(|c| {
                        self.resolve(&c.field)
                            .map(|field| FieldCondition::new(field, c.condition))
                    })
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("states[{i}] ({})", render_state.kind()))?;
                Ok(ConditionalRenderState::new(render_state, conditions))
            })
            .collect()
    }
}

/// Builds the pass's collection: preset states first (if any), then the
/// pass's own states in authored order.
///
/// Conditions may name fields declared by the pass or by the bundled presets.
pub fn build_collection(dsl: &PassStateDSL) -> Result<RenderStateCollection> {
    let table = presets::load_default_presets()?;

    let mut collection = RenderStateCollection::new();
    if let Some(name) = dsl.preset.as_deref() {
        collection.add_collection(&table.collection(name)?);
    }

    let mut registry = FieldRegistry::from_fields(table.fields());
    registry.extend(&dsl.fields);
    collection.extend(
        registry
            .build_states(&dsl.states)
            .with_context(|| format!("pass {}", dsl.metadata.name))?,
    );
    Ok(collection)
}

/// The only document version the pass-state and preset formats understand.
pub const SUPPORTED_VERSION: &str = "1";

pub(crate) fn check_version(version: &str) -> Result<()> {
    if version.trim() != SUPPORTED_VERSION {
        bail!("unsupported version: {version} (expected {SUPPORTED_VERSION})");
    }
    Ok(())
}

pub fn parse_pass_state_str(text: &str) -> Result<PassStateDSL> {
    let dsl: PassStateDSL =
        serde_json::from_str(text).context("failed to parse pass state json")?;
    check_version(&dsl.version).with_context(|| format!("pass {}", dsl.metadata.name))?;
    Ok(dsl)
}

pub fn load_pass_state_from_path(path: impl AsRef<std::path::Path>) -> Result<PassStateDSL> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pass state json at {}", path.display()))?;
    parse_pass_state_str(&text).with_context(|| format!("in {}", path.display()))
}
