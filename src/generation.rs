//! Writes conditional shader strings into generated pass source.

use std::collections::HashMap;

use crate::{
    fields::FieldContext,
    render_state::{
        ConditionalRenderState, ConditionalShaderString, RenderStateCollection, RenderStateKind,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

/// Line-oriented builder that tracks an indentation level.
#[derive(Debug, Clone)]
pub struct ShaderStringBuilder {
    lines: Vec<String>,
    indent_level: usize,
    indent_width: usize,
}

impl Default for ShaderStringBuilder {
    fn default() -> Self {
        Self::with_options(GenerationOptions::default())
    }
}

impl ShaderStringBuilder {
    pub fn with_options(options: GenerationOptions) -> Self {
        Self {
            lines: Vec::new(),
            indent_level: 0,
            indent_width: options.indent_width,
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn deindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn append_line(&mut self, line: &str) {
        if line.is_empty() {
            self.lines.push(String::new());
            return;
        }
        let pad = " ".repeat(self.indent_level * self.indent_width);
        self.lines.push(format!("{pad}{line}"));
    }

    /// Appends every line of `text` at the current indentation. Nested
    /// indentation inside `text` is kept relative to it, and the lines are
    /// otherwise written unchanged. Empty text still takes one line.
    pub fn append_lines(&mut self, text: &str) {
        if text.is_empty() {
            self.append_line("");
            return;
        }
        for line in text.lines() {
            self.append_line(line);
        }
    }

    /// Writes `{`, runs `f` one level deeper, then writes `}`.
    pub fn block(&mut self, f: impl FnOnce(&mut Self)) {
        self.append_line("{");
        self.indent();
        f(self);
        self.deindent();
        self.append_line("}");
    }

    pub fn into_string(self) -> String {
        self.lines.join("\n")
    }
}

/// Appends the value of each entry whose conditions hold, in iteration order.
///
/// Returns the number of entries written.
pub fn append_conditional_strings<'a, T, I>(
    builder: &mut ShaderStringBuilder,
    entries: I,
    ctx: &(impl FieldContext + ?Sized),
) -> usize
where
    T: ConditionalShaderString + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut written = 0;
    for entry in entries {
        if !entry.test_active(ctx) {
            log::trace!("skipping inactive entry: {}", entry.value());
            continue;
        }
        builder.append_lines(entry.value());
        written += 1;
    }
    written
}

/// Like [`append_conditional_strings`], but also reports render-state kinds
/// that are written more than once. The later directive is the one the shader
/// compiler keeps; nothing is dropped here.
pub fn append_render_states<'a>(
    builder: &mut ShaderStringBuilder,
    render_states: impl IntoIterator<Item = &'a ConditionalRenderState>,
    ctx: &(impl FieldContext + ?Sized),
) -> usize {
    let mut seen: HashMap<RenderStateKind, &str> = HashMap::new();
    let mut written = 0;
    for s in render_states {
        if !s.test_active(ctx) {
            log::trace!("skipping inactive render state: {}", s.value());
            continue;
        }
        if let Some(prev) = seen.insert(s.render_state.kind(), s.value()) {
            log::debug!(
                "render state {} written again: `{}` follows `{}`",
                s.render_state.kind(),
                s.value(),
                prev
            );
        }
        builder.append_lines(s.value());
        written += 1;
    }
    written
}

/// Renders the active entries of `collection` as a pass state block body.
pub fn render_state_block(
    collection: &RenderStateCollection,
    ctx: &(impl FieldContext + ?Sized),
    options: GenerationOptions,
) -> String {
    let mut builder = ShaderStringBuilder::with_options(options);
    append_render_states(&mut builder, collection, ctx);
    builder.into_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        fields::{ActiveFields, FieldCondition, FieldDescriptor},
        render_state::{Cull, RenderState, StencilDescriptor, ZWrite},
    };

    #[test]
    fn builder_indents_blocks_and_multiline_text() {
        let mut b = ShaderStringBuilder::default();
        b.append_line("Pass");
        b.block(|b| {
            b.append_lines("Stencil\n{\n    Ref 1\n}");
            b.append_line("Cull Back");
        });
        assert_eq!(
            b.into_string(),
            "Pass\n{\n    Stencil\n    {\n        Ref 1\n    }\n    Cull Back\n}"
        );
    }

    #[test]
    fn indent_width_is_configurable() {
        let mut b = ShaderStringBuilder::with_options(GenerationOptions { indent_width: 2 });
        b.block(|b| b.append_line("ZWrite On"));
        assert_eq!(b.into_string(), "{\n  ZWrite On\n}");
    }

    #[test]
    fn skipped_entries_keep_relative_order_of_the_rest() {
        let transparent = Arc::new(FieldDescriptor::new("SurfaceType", "Transparent"));
        let mut c = RenderStateCollection::new();
        c.add(RenderState::cull(Cull::Back));
        c.add_with_condition(
            RenderState::depth_write(ZWrite::On),
            FieldCondition::is_unset(transparent.clone()),
        );
        c.add_with_condition(
            RenderState::depth_write(ZWrite::Off),
            FieldCondition::is_set(transparent),
        );
        c.add(RenderState::color_mask("ColorMask RGB"));

        let opaque = render_state_block(&c, &ActiveFields::new(), GenerationOptions::default());
        assert_eq!(opaque, "Cull Back\nZWrite On\nColorMask RGB");

        let fields: ActiveFields = ["SurfaceType.Transparent"].into_iter().collect();
        let transparent = render_state_block(&c, &fields, GenerationOptions::default());
        assert_eq!(transparent, "Cull Back\nZWrite Off\nColorMask RGB");
    }

    #[test]
    fn duplicate_kinds_are_all_written_in_order() {
        let mut c = RenderStateCollection::new();
        c.add(RenderState::cull(Cull::Back));
        c.add(RenderState::cull(Cull::Off));
        let mut b = ShaderStringBuilder::default();
        let written = append_render_states(&mut b, &c, &ActiveFields::new());
        assert_eq!(written, 2);
        assert_eq!(b.into_string(), "Cull Back\nCull Off");
    }

    #[test]
    fn raw_text_is_written_unchanged_one_line_per_entry() {
        let mut c = RenderStateCollection::new();
        c.add(RenderState::cull("Back"));
        c.add(RenderState::color_mask(""));
        c.add(RenderState::blend_raw("Blend One Zero   "));

        let mut b = ShaderStringBuilder::default();
        let written = append_render_states(&mut b, &c, &ActiveFields::new());
        assert_eq!(written, 3);
        assert_eq!(b.into_string(), "Cull Back\n\nBlend One Zero   ");
    }

    #[test]
    fn any_conditional_string_can_be_appended() {
        struct Pragma {
            line: String,
            conditions: Vec<FieldCondition>,
        }
        impl ConditionalShaderString for Pragma {
            fn value(&self) -> &str {
                &self.line
            }
            fn field_conditions(&self) -> &[FieldCondition] {
                &self.conditions
            }
        }

        let instancing = Arc::new(FieldDescriptor::new("", "Instancing"));
        let pragmas = vec![
            Pragma {
                line: "#pragma target 4.5".to_string(),
                conditions: Vec::new(),
            },
            Pragma {
                line: "#pragma multi_compile_instancing".to_string(),
                conditions: vec![FieldCondition::is_set(instancing)],
            },
        ];

        let mut b = ShaderStringBuilder::default();
        let written = append_conditional_strings(&mut b, &pragmas, &ActiveFields::new());
        assert_eq!(written, 1);
        assert_eq!(b.into_string(), "#pragma target 4.5");
    }

    #[test]
    fn stencil_block_is_indented_as_a_unit() {
        let mut c = RenderStateCollection::new();
        c.add(RenderState::stencil(&StencilDescriptor {
            reference: Some("1".to_string()),
            comp: Some("Always".to_string()),
            ..Default::default()
        }));

        let mut b = ShaderStringBuilder::default();
        b.indent();
        append_render_states(&mut b, &c, &ActiveFields::new());
        assert_eq!(
            b.into_string(),
            "    Stencil\n    {\n        Ref 1\n        Comp Always\n    }"
        );
    }
}
