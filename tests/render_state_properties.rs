use std::sync::Arc;

use proptest::prelude::*;
use render_state_forge::{
    fields::{ActiveFields, FieldCondition, FieldDescriptor},
    generation::{GenerationOptions, render_state_block},
    render_state::{
        Blend, BlendOp, ConditionalRenderState, ConditionalShaderString, Cull, RenderState,
        RenderStateCollection, ZTest, ZWrite,
    },
};

const FIELD_NAMES: [&str; 4] = ["A", "B", "C", "D"];

fn any_render_state() -> impl Strategy<Value = RenderState> {
    prop_oneof![
        prop::sample::select(Cull::ALL).prop_map(RenderState::cull),
        (prop::sample::select(Blend::ALL), prop::sample::select(Blend::ALL))
            .prop_map(|(s, d)| RenderState::blend(s, d)),
        prop::sample::select(BlendOp::ALL).prop_map(RenderState::blend_op),
        prop::sample::select(ZTest::ALL).prop_map(RenderState::depth_test),
        prop::sample::select(ZWrite::ALL).prop_map(RenderState::depth_write),
        "[A-Z ]{0,4}".prop_map(RenderState::color_mask),
        "Blend [A-Za-z ]{0,6}".prop_map(RenderState::blend_raw),
    ]
}

/// Each entry carries up to three (field index, expected activity) pairs.
fn any_entry() -> impl Strategy<Value = (RenderState, Vec<(usize, bool)>)> {
    (
        any_render_state(),
        prop::collection::vec((0..FIELD_NAMES.len(), any::<bool>()), 0..3),
    )
}

fn field(i: usize) -> Arc<FieldDescriptor> {
    Arc::new(FieldDescriptor::new("", FIELD_NAMES[i]))
}

fn build(entries: &[(RenderState, Vec<(usize, bool)>)]) -> RenderStateCollection {
    let mut c = RenderStateCollection::new();
    for (state, conditions) in entries {
        c.add_with_conditions(
            state.clone(),
            conditions
                .iter()
                .map(|&(i, cond)| FieldCondition::new(field(i), cond)),
        );
    }
    c
}

proptest! {
    #[test]
    fn iteration_matches_append_order(entries in prop::collection::vec(any_entry(), 0..24)) {
        let c = build(&entries);
        let expected: Vec<&str> = entries.iter().map(|(s, _)| s.text()).collect();

        let first: Vec<&str> = c.iter().map(|e| e.value()).collect();
        let second: Vec<&str> = c.iter().map(|e| e.value()).collect();
        prop_assert_eq!(&first, &expected);
        prop_assert_eq!(&second, &expected);
    }

    #[test]
    fn emission_is_the_ordered_and_filtered_subsequence(
        entries in prop::collection::vec(any_entry(), 0..24),
        active in prop::collection::vec(any::<bool>(), FIELD_NAMES.len()),
    ) {
        let c = build(&entries);
        let fields: ActiveFields = FIELD_NAMES
            .iter()
            .zip(&active)
            .filter(|(_, on)| **on)
            .map(|(name, _)| *name)
            .collect();

        let expected: Vec<&str> = entries
            .iter()
            .filter(|(_, conds)| conds.iter().all(|&(i, cond)| active[i] == cond))
            .map(|(s, _)| s.text())
            .collect();

        // Every surviving entry is exactly one line, written unchanged.
        let block = render_state_block(&c, &fields, GenerationOptions::default());
        prop_assert_eq!(block, expected.join("\n"));
    }

    #[test]
    fn entry_is_active_iff_every_condition_holds(
        conditions in prop::collection::vec((0..FIELD_NAMES.len(), any::<bool>()), 0..5),
        active in prop::collection::vec(any::<bool>(), FIELD_NAMES.len()),
    ) {
        let entry = ConditionalRenderState::new(
            RenderState::cull(Cull::Back),
            conditions.iter().map(|&(i, cond)| FieldCondition::new(field(i), cond)).collect(),
        );
        let ctx = |f: &FieldDescriptor| {
            FIELD_NAMES.iter().position(|n| *n == f.name).is_some_and(|i| active[i])
        };
        let expected = conditions.iter().all(|&(i, cond)| active[i] == cond);
        prop_assert_eq!(entry.test_active(&ctx), expected);
    }
}

#[test]
fn same_kind_entries_are_emitted_in_append_order() {
    let mut c = RenderStateCollection::new();
    c.add(RenderState::depth_test(ZTest::Less));
    c.add(RenderState::depth_write(ZWrite::On));
    c.add(RenderState::depth_test(ZTest::Always));
    let block = render_state_block(&c, &ActiveFields::new(), GenerationOptions::default());
    assert_eq!(block, "ZTest Less\nZWrite On\nZTest Always");
}
