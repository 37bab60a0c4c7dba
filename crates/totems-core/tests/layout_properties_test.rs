//! Property-based tests for the layout engine.
//!
//! Schemas are generated from fixed-length types only, so every rule subset
//! is legal and the expected offsets can be computed independently from the
//! placeholder widths.

use proptest::prelude::*;
use totems_core::{
    EnforcementKind, EnforcementRule, LayoutConfig, LayoutEngine, LayoutError, SchemaField,
    synthesize,
};
use totems_proto::{AntelopeEncoder, FieldEncoder, TypeTag, Value};

/// Fixed-length ABI types with their encoded width.
const FIXED_TYPES: &[(&str, usize)] = &[
    ("bool", 1),
    ("uint8", 1),
    ("int16", 2),
    ("uint32", 4),
    ("uint64", 8),
    ("float64", 8),
    ("name", 8),
    ("symbol_code", 8),
    ("symbol", 8),
    ("asset", 16),
    ("checksum160", 20),
    ("checksum256", 32),
    ("public_key", 34),
    ("time_point_sec", 4),
];

/// A literal of the given fixed type that differs from its placeholder.
fn literal(index: usize) -> Value {
    match FIXED_TYPES[index].0 {
        "bool" => Value::Bool(true),
        "uint8" => Value::Int(200),
        "int16" => Value::Int(-3),
        "uint32" => Value::Int(7),
        "uint64" => Value::Int(1 << 40),
        "float64" => Value::Float(2.5),
        "name" => Value::from("alice"),
        "symbol_code" => Value::from("EOS"),
        "symbol" => Value::from("8,WAX"),
        "asset" => Value::from("12.3456 EOS"),
        "checksum160" => Value::from("ab".repeat(20)),
        "checksum256" => Value::from("cd".repeat(32)),
        "public_key" => Value::from("EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV"),
        _ => Value::from("2024-01-01T00:00:00"),
    }
}

/// A schema of fixed-length fields plus, per field, an optional rule kind.
fn schema_and_rules() -> impl Strategy<Value = (Vec<usize>, Vec<Option<EnforcementKind>>)> {
    prop::collection::vec(0..FIXED_TYPES.len(), 1..12).prop_flat_map(|types| {
        let len = types.len();
        let kinds = prop::collection::vec(
            prop::option::of(prop_oneof![
                Just(EnforcementKind::Sender),
                Just(EnforcementKind::Dynamic),
                Just(EnforcementKind::Static),
                Just(EnforcementKind::Totem),
            ]),
            len,
        );
        (Just(types), kinds)
    })
}

fn build(
    types: &[usize],
    kinds: &[Option<EnforcementKind>],
) -> (Vec<SchemaField>, Vec<EnforcementRule>) {
    let schema = types
        .iter()
        .enumerate()
        .map(|(i, &t)| SchemaField::new(format!("f{i}"), FIXED_TYPES[t].0))
        .collect();

    let rules = types
        .iter()
        .zip(kinds)
        .enumerate()
        .filter_map(|(i, (&t, kind))| {
            let param = format!("f{i}");
            kind.map(|kind| match kind {
                EnforcementKind::Static => EnforcementRule::fixed(param, literal(t)),
                EnforcementKind::Sender => EnforcementRule::sender(param),
                EnforcementKind::Dynamic => EnforcementRule::dynamic(param),
                EnforcementKind::Totem => EnforcementRule::totem(param),
            })
        })
        .collect();

    (schema, rules)
}

proptest! {
    #[test]
    fn offsets_are_cumulative_widths((types, kinds) in schema_and_rules()) {
        let (schema, rules) = build(&types, &kinds);
        let layout = LayoutEngine::new(LayoutConfig::default())
            .layout("c", "a", &schema, &rules, "")
            .unwrap();

        let mut expected_offset = 0;
        let mut expected = Vec::new();
        for (i, &t) in types.iter().enumerate() {
            let width = FIXED_TYPES[t].1;
            if kinds[i].is_some() {
                expected.push((format!("f{i}"), expected_offset, width));
            }
            expected_offset += width;
        }

        let actual: Vec<_> =
            layout.fields.iter().map(|f| (f.param.clone(), f.offset, f.size)).collect();
        prop_assert_eq!(actual, expected);

        for pair in layout.fields.windows(2) {
            prop_assert!(pair[0].offset + pair[0].size <= pair[1].offset);
        }
    }

    #[test]
    fn unenforced_variable_fields_after_anchor_add_placeholder_bytes(
        (types, kinds) in schema_and_rules(),
        gaps in prop::collection::vec(
            prop::option::of(prop_oneof![Just("string"), Just("bytes"), Just("name[]")]),
            12,
        ),
    ) {
        let (fixed, rules) = build(&types, &kinds);
        let first_enforced = kinds.iter().position(Option::is_some);

        // Interleave variable fields after each field at or past the anchor.
        let mut schema = Vec::new();
        let mut expected = Vec::new();
        let mut offset = 0;
        for (i, field) in fixed.into_iter().enumerate() {
            let width = FIXED_TYPES[types[i]].1;
            if kinds[i].is_some() {
                expected.push((field.name.clone(), offset, width));
            }
            schema.push(field);
            offset += width;

            if let (Some(anchor), Some(variable)) = (first_enforced, gaps[i])
                && i >= anchor
            {
                schema.push(SchemaField::new(format!("gap{i}"), variable));
                offset += 1;
            }
        }

        let layout = LayoutEngine::new(LayoutConfig::default())
            .layout("c", "a", &schema, &rules, "")
            .unwrap();
        let actual: Vec<_> =
            layout.fields.iter().map(|f| (f.param.clone(), f.offset, f.size)).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn rule_order_does_not_matter(
        (types, kinds) in schema_and_rules(),
        seed in any::<u64>(),
    ) {
        let (schema, rules) = build(&types, &kinds);

        // Deterministic permutation of the rule list.
        let mut shuffled = rules.clone();
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            shuffled.swap(i, (state % (i as u64 + 1)) as usize);
        }

        let engine = LayoutEngine::new(LayoutConfig::default());
        let a = engine.layout("c", "a", &schema, &rules, "").unwrap();
        let b = engine.layout("c", "a", &schema, &shuffled, "").unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn layout_is_deterministic((types, kinds) in schema_and_rules()) {
        let (schema, rules) = build(&types, &kinds);
        let engine = LayoutEngine::new(LayoutConfig::default());
        let first = engine.layout("c", "a", &schema, &rules, "x").unwrap();
        let second = engine.layout("c", "a", &schema, &rules, "x").unwrap();
        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn static_fields_carry_literal_encoding((types, kinds) in schema_and_rules()) {
        let (schema, rules) = build(&types, &kinds);
        let layout = LayoutEngine::new(LayoutConfig::default())
            .layout("c", "a", &schema, &rules, "")
            .unwrap();

        for field in &layout.fields {
            let index: usize = field.param[1..].parse().unwrap();
            if field.kind == EnforcementKind::Static {
                let ty = TypeTag::parse(FIXED_TYPES[types[index]].0);
                let expected = AntelopeEncoder.encode(&ty, &literal(types[index])).unwrap();
                prop_assert!(!field.literal_bytes.is_empty());
                prop_assert_eq!(&field.literal_bytes, &expected);
                prop_assert_eq!(field.size, expected.len());
            } else {
                prop_assert!(field.literal_bytes.is_empty());
            }
        }
    }

    #[test]
    fn unenforced_variable_prefix_always_fails(
        (types, kinds) in schema_and_rules(),
        variable in prop_oneof![Just("string"), Just("bytes"), Just("name[]")],
    ) {
        let (mut schema, rules) = build(&types, &kinds);
        schema.insert(0, SchemaField::new("lead", variable));

        let result =
            LayoutEngine::new(LayoutConfig::default()).layout("c", "a", &schema, &rules, "");
        prop_assert!(matches!(result, Err(LayoutError::OrderingViolation(ref f)) if f == "lead"));
    }
}

#[test]
fn placeholder_widths_match_table() {
    for (ty, width) in FIXED_TYPES {
        let ty = TypeTag::parse(ty);
        let placeholder = synthesize(&ty).unwrap();
        assert_eq!(AntelopeEncoder.encode(&ty, &placeholder).unwrap().len(), *width, "{ty}");
    }
}
