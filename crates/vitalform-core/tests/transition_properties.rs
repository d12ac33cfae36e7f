//! End-to-end properties of the transition layer: any reachable state keeps
//! its chains intact, and its override list rebuilds the same state.

use proptest::prelude::*;
use vitalform_core::{Command, ConfigState};
use vitalform_order::FieldStatus;
use vitalform_schema::{
    Event, FieldDefinition, FieldId, FieldType, FormSchema, Group, Section,
};

fn schema() -> FormSchema {
    FormSchema {
        sections: vec![
            Section {
                id: "child".to_string(),
                groups: vec![
                    Group {
                        id: "child-view-group".to_string(),
                        fields: vec![
                            FieldDefinition::new("firstName", FieldType::Text, "First name"),
                            FieldDefinition::new("familyName", FieldType::Text, "Family name"),
                        ],
                    },
                    Group {
                        id: "child-details-group".to_string(),
                        fields: vec![FieldDefinition::new(
                            "birthDate",
                            FieldType::Date,
                            "Date of birth",
                        )],
                    },
                ],
            },
            Section {
                id: "mother".to_string(),
                groups: vec![Group {
                    id: "mother-view-group".to_string(),
                    fields: vec![FieldDefinition::new(
                        "nationalId",
                        FieldType::Text,
                        "National ID",
                    )],
                }],
            },
        ],
    }
}

/// Pick a field from the state by flat traversal position, wrapping around.
fn field_at(state: &ConfigState, position: usize) -> Option<FieldId> {
    let mut all = Vec::new();
    for (_, section) in state.field_map().iter() {
        all.extend(section.ordered_ids().expect("chain must traverse"));
    }
    if all.is_empty() {
        return None;
    }
    Some(all[position % all.len()].clone())
}

#[derive(Debug, Clone)]
enum Op {
    ShiftUp(usize),
    ShiftDown(usize),
    Disable(usize),
    Require(usize),
    AddCustom(u8),
    RemoveAt(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..16usize).prop_map(Op::ShiftUp),
        (0..16usize).prop_map(Op::ShiftDown),
        (0..16usize).prop_map(Op::Disable),
        (0..16usize).prop_map(Op::Require),
        (0..8u8).prop_map(Op::AddCustom),
        (0..16usize).prop_map(Op::RemoveAt),
    ]
}

fn apply_op(state: ConfigState, op: &Op) -> ConfigState {
    let command = match op {
        Op::ShiftUp(position) => field_at(&state, *position).map(|field_id| Command::ShiftUp { field_id }),
        Op::ShiftDown(position) => {
            field_at(&state, *position).map(|field_id| Command::ShiftDown { field_id })
        }
        Op::Disable(position) => field_at(&state, *position).map(|field_id| Command::SetFieldStatus {
            field_id,
            status: FieldStatus::Disabled,
        }),
        Op::Require(position) => field_at(&state, *position).map(|field_id| Command::SetRequired {
            field_id,
            required: true,
        }),
        Op::AddCustom(n) => Some(Command::AddCustomField {
            section_id: "child".to_string(),
            definition: FieldDefinition::new(format!("custom{n}"), FieldType::Text, "Custom"),
        }),
        Op::RemoveAt(position) => {
            field_at(&state, *position).map(|field_id| Command::RemoveCustomField { field_id })
        }
    };
    match command {
        // Rejected commands (duplicates, default-field removals) leave the
        // state as it was; that is part of the contract under test.
        Some(command) => state.apply(command).unwrap_or(state),
        None => state,
    }
}

proptest! {
    /// Every reachable state still verifies as one chain per section.
    #[test]
    fn prop_transitions_preserve_chain_shape(
        ops in proptest::collection::vec(op_strategy(), 0..32),
    ) {
        let mut state = ConfigState::load(Event::Birth, schema(), &[]);
        for op in &ops {
            state = apply_op(state, op);
            state.field_map().verify().expect("chain broken by transition");
        }
    }

    /// The extracted override list rebuilds exactly the state it came from.
    #[test]
    fn prop_overrides_round_trip_through_load(
        ops in proptest::collection::vec(op_strategy(), 0..24),
    ) {
        let mut state = ConfigState::load(Event::Birth, schema(), &[]);
        for op in &ops {
            state = apply_op(state, op);
        }
        let overrides = state.overrides().expect("state must extract");
        let reloaded = ConfigState::load(Event::Birth, schema(), &overrides);
        prop_assert_eq!(reloaded.field_map(), state.field_map());
    }
}

#[test]
fn configured_form_reflects_a_full_editing_session() {
    let state = ConfigState::load(Event::Birth, schema(), &[]);
    let child = |name: &str| FieldId::new(Event::Birth, "child", "child-view-group", name);

    let state = state
        .apply(Command::AddCustomField {
            section_id: "child".to_string(),
            definition: FieldDefinition::new("motherTongue", FieldType::Text, "Mother tongue")
                .with_required(true),
        })
        .unwrap();
    let custom_id = FieldId::new(Event::Birth, "child", "child-details-group", "motherTongue");
    let state = state.apply(Command::ShiftUp { field_id: custom_id.clone() }).unwrap();
    let state = state.apply(Command::ShiftUp { field_id: custom_id }).unwrap();
    let state = state
        .apply(Command::SetFieldStatus {
            field_id: child("familyName"),
            status: FieldStatus::Disabled,
        })
        .unwrap();

    let form = state.configured_form().unwrap();
    let names: Vec<&str> = form.sections[0]
        .groups
        .iter()
        .flat_map(|g| g.fields.iter().map(|f| f.name.as_str()))
        .collect();
    assert_eq!(names, ["firstName", "motherTongue", "birthDate"]);

    // Two deltas persist: the custom field and the moved/disabled familyName.
    // birthDate still follows familyName, exactly as in the factory schema.
    let overrides = state.overrides().unwrap();
    assert_eq!(overrides.len(), 2);
}
