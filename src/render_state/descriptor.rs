use serde::Serialize;

use super::{
    stencil::ToShaderString,
    types::{Blend, BlendOp, Cull, DirectiveValue, RenderStateKind, ZTest, ZWrite},
};

/// One pre-formatted pass-state directive.
///
/// The text is fixed at construction time by one of the kind-specific
/// factories below; there is no way to change it afterwards. Raw-string
/// arguments are written as given and never validated, so a malformed value
/// only surfaces when the generated shader is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RenderState {
    kind: RenderStateKind,
    text: String,
}

impl RenderState {
    fn new(kind: RenderStateKind, text: String) -> Self {
        Self { kind, text }
    }

    pub fn kind(&self) -> RenderStateKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `Cull {mode}`
    pub fn cull(mode: impl Into<DirectiveValue<Cull>>) -> Self {
        Self::new(RenderStateKind::Cull, format!("Cull {}", mode.into()))
    }

    /// `Blend {src} {dst}`: one equation for color and alpha.
    pub fn blend(
        src: impl Into<DirectiveValue<Blend>>,
        dst: impl Into<DirectiveValue<Blend>>,
    ) -> Self {
        Self::new(
            RenderStateKind::Blend,
            format!("Blend {} {}", src.into(), dst.into()),
        )
    }

    /// `Blend {src} {dst}, {alpha_src} {alpha_dst}`: separate color and alpha
    /// equations.
    pub fn blend_separate(
        src: impl Into<DirectiveValue<Blend>>,
        dst: impl Into<DirectiveValue<Blend>>,
        alpha_src: impl Into<DirectiveValue<Blend>>,
        alpha_dst: impl Into<DirectiveValue<Blend>>,
    ) -> Self {
        Self::new(
            RenderStateKind::Blend,
            format!(
                "Blend {} {}, {} {}",
                src.into(),
                dst.into(),
                alpha_src.into(),
                alpha_dst.into()
            ),
        )
    }

    /// A complete blend directive, stored verbatim.
    pub fn blend_raw(directive: impl Into<String>) -> Self {
        Self::new(RenderStateKind::Blend, directive.into())
    }

    /// `BlendOp {op}`
    pub fn blend_op(op: impl Into<DirectiveValue<BlendOp>>) -> Self {
        Self::new(RenderStateKind::BlendOp, format!("BlendOp {}", op.into()))
    }

    /// `BlendOp {op}, {op_alpha}`
    pub fn blend_op_separate(
        op: impl Into<DirectiveValue<BlendOp>>,
        op_alpha: impl Into<DirectiveValue<BlendOp>>,
    ) -> Self {
        Self::new(
            RenderStateKind::BlendOp,
            format!("BlendOp {}, {}", op.into(), op_alpha.into()),
        )
    }

    /// `ZTest {mode}`
    pub fn depth_test(mode: impl Into<DirectiveValue<ZTest>>) -> Self {
        Self::new(RenderStateKind::DepthTest, format!("ZTest {}", mode.into()))
    }

    /// `ZWrite {mode}`
    pub fn depth_write(mode: impl Into<DirectiveValue<ZWrite>>) -> Self {
        Self::new(RenderStateKind::DepthWrite, format!("ZWrite {}", mode.into()))
    }

    /// `ZClip {value}`. Accepted values are platform specific, so there is no
    /// enumerated form.
    pub fn clip_behavior(value: impl AsRef<str>) -> Self {
        Self::new(
            RenderStateKind::ClipBehavior,
            format!("ZClip {}", value.as_ref()),
        )
    }

    /// The value is the whole directive; no keyword is prepended.
    pub fn color_mask(value: impl Into<String>) -> Self {
        Self::new(RenderStateKind::ColorMask, value.into())
    }

    pub fn stencil<S>(stencil: &S) -> Self
    where
        S: ToShaderString + ?Sized,
    {
        Self::new(RenderStateKind::Stencil, stencil.to_shader_string())
    }
}
