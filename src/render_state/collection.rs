use std::slice;

use crate::fields::{FieldCondition, FieldContext};

use super::descriptor::RenderState;

/// A string destined for generated shader source that is only written when
/// all of its field conditions hold.
pub trait ConditionalShaderString {
    fn value(&self) -> &str;

    fn field_conditions(&self) -> &[FieldCondition];

    /// Logical AND over the conditions; no conditions means always active.
    fn test_active(&self, ctx: &(impl FieldContext + ?Sized)) -> bool {
        self.field_conditions().iter().all(|c| c.evaluate(ctx))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalRenderState {
    pub render_state: RenderState,
    pub field_conditions: Vec<FieldCondition>,
}

impl ConditionalRenderState {
    pub fn new(render_state: RenderState, field_conditions: Vec<FieldCondition>) -> Self {
        Self {
            render_state,
            field_conditions,
        }
    }

    pub fn always(render_state: RenderState) -> Self {
        Self::new(render_state, Vec::new())
    }
}

impl ConditionalShaderString for ConditionalRenderState {
    fn value(&self) -> &str {
        self.render_state.text()
    }

    fn field_conditions(&self) -> &[FieldCondition] {
        &self.field_conditions
    }
}

/// Render states in the order they will be written to the pass.
///
/// Append-only: order is significant (later directives of the same kind win
/// in ShaderLab), so there is no removal or reordering, and duplicates are
/// kept as authored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderStateCollection {
    render_states: Vec<ConditionalRenderState>,
}

impl RenderStateCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, render_state: RenderState) -> &mut Self {
        self.render_states.push(ConditionalRenderState::always(render_state));
        self
    }

    pub fn add_with_condition(
        &mut self,
        render_state: RenderState,
        field_condition: FieldCondition,
    ) -> &mut Self {
        self.render_states.push(ConditionalRenderState::new(render_state, vec![field_condition]));
        self
    }

    pub fn add_with_conditions(
        &mut self,
        render_state: RenderState,
        field_conditions: impl IntoIterator<Item = FieldCondition>,
    ) -> &mut Self {
        self.render_states.push(ConditionalRenderState::new(
            render_state,
            field_conditions.into_iter().collect(),
        ));
        self
    }

    /// Appends every entry of `other`, keeping its order.
    pub fn add_collection(&mut self, other: &RenderStateCollection) -> &mut Self {
        self.render_states.extend(other.iter().cloned());
        self
    }

    pub fn len(&self) -> usize {
        self.render_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.render_states.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, ConditionalRenderState> {
        self.render_states.iter()
    }
}

impl<'a> IntoIterator for &'a RenderStateCollection {
    type Item = &'a ConditionalRenderState;
    type IntoIter = slice::Iter<'a, ConditionalRenderState>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ConditionalRenderState> for RenderStateCollection {
    fn from_iter<I: IntoIterator<Item = ConditionalRenderState>>(iter: I) -> Self {
        Self {
            render_states: iter.into_iter().collect(),
        }
    }
}

impl Extend<ConditionalRenderState> for RenderStateCollection {
    fn extend<I: IntoIterator<Item = ConditionalRenderState>>(&mut self, iter: I) {
        self.render_states.extend(iter);
    }
}
