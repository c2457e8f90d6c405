use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::{
    dsl::{FieldRegistry, StateEntry, check_version},
    fields::FieldDescriptor,
    render_state::RenderStateCollection,
};

const DEFAULT_PRESETS_JSON: &str = include_str!("../assets/render-state-presets.json");

/// Named render-state lists sharing one set of condition fields.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetTable {
    version: String,
    #[serde(default)]
    fields: Vec<FieldDescriptor>,
    presets: BTreeMap<String, Vec<StateEntry>>,
}

impl PresetTable {
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn collection(&self, name: &str) -> Result<RenderStateCollection> {
        let states = self.presets.get(name).ok_or_else(|| {
            anyhow!(
                "unknown render state preset: {name} (available: {})",
                self.names().collect::<Vec<_>>().join(", ")
            )
        })?;
        let registry = FieldRegistry::from_fields(&self.fields);
        let states = registry
            .build_states(states)
            .with_context(|| format!("preset {name}"))?;
        Ok(states.into_iter().collect())
    }
}

pub fn parse_presets_str(text: &str) -> Result<PresetTable> {
    let table: PresetTable =
        serde_json::from_str(text).context("failed to parse render state presets json")?;
    check_version(&table.version).context("render state presets")?;
    Ok(table)
}

pub fn load_default_presets() -> Result<PresetTable> {
    parse_presets_str(DEFAULT_PRESETS_JSON)
        .context("bundled assets/render-state-presets.json is invalid")
}
