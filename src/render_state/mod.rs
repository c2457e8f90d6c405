//! Typed pass-state directives and the ordered, conditional collection that
//! carries them to the pass generator.
//!
//! - `types`: directive kinds and the enumerated ShaderLab tokens
//! - `descriptor`: `RenderState` and its kind-specific factories
//! - `stencil`: the stencil value object and the `ToShaderString` contract
//! - `collection`: `ConditionalRenderState` and `RenderStateCollection`

pub mod collection;
pub mod descriptor;
pub mod stencil;
pub mod types;

pub use collection::{ConditionalRenderState, ConditionalShaderString, RenderStateCollection};
pub use descriptor::RenderState;
pub use stencil::{StencilDescriptor, ToShaderString};
pub use types::{Blend, BlendOp, Cull, DirectiveValue, RenderStateKind, ZTest, ZWrite};
