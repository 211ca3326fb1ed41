use crate::{BrainId, BrainRng, NodeId, Value, ValueKind};

// ── Ids ───────────────────────────────────────────────────────────────────────

#[test]
fn id_default_is_invalid() {
    assert_eq!(NodeId::default(), NodeId::INVALID);
    assert_eq!(BrainId::default(), BrainId::INVALID);
}

#[test]
fn id_index_round_trips() {
    let id = NodeId(7);
    assert_eq!(id.index(), 7);
    assert_eq!(format!("{id}"), "NodeId(7)");
}

#[test]
fn ids_are_ordered_and_hashable() {
    use std::collections::HashMap;
    let mut map = HashMap::new();
    map.insert(NodeId(1), "a");
    map.insert(NodeId(2), "b");
    assert_eq!(map[&NodeId(2)], "b");
    assert!(NodeId(1) < NodeId(2));
}

// ── Values ────────────────────────────────────────────────────────────────────

#[test]
fn value_reports_its_kind() {
    assert_eq!(Value::Bool(true).kind(), ValueKind::Bool);
    assert_eq!(Value::Int(-3).kind(), ValueKind::Int);
    assert_eq!(Value::Float(0.5).kind(), ValueKind::Float);
    assert_eq!(Value::from("hi").kind(), ValueKind::Text);
}

#[test]
fn kind_defaults_are_neutral() {
    assert_eq!(ValueKind::Bool.default_value(), Value::Bool(false));
    assert_eq!(ValueKind::Int.default_value(), Value::Int(0));
    assert_eq!(ValueKind::Float.default_value(), Value::Float(0.0));
    assert_eq!(ValueKind::Text.default_value(), Value::Text(String::new()));
}

#[test]
fn value_accessors_are_kind_checked() {
    let v = Value::Float(2.5);
    assert_eq!(v.as_float(), Some(2.5));
    assert_eq!(v.as_int(), None);
    assert_eq!(v.as_bool(), None);
    assert_eq!(Value::from("x").as_text(), Some("x"));
}

// ── RNG ───────────────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_sequence() {
    let mut a = BrainRng::seeded(99);
    let mut b = BrainRng::seeded(99);
    for _ in 0..32 {
        assert_eq!(a.gen_range(0..1000u32), b.gen_range(0..1000u32));
    }
}

#[test]
fn brain_seeds_are_independent() {
    let mut a = BrainRng::for_brain(42, BrainId(0));
    let mut b = BrainRng::for_brain(42, BrainId(1));
    let seq_a: Vec<u32> = (0..16).map(|_| a.gen_range(0..u32::MAX)).collect();
    let seq_b: Vec<u32> = (0..16).map(|_| b.gen_range(0..u32::MAX)).collect();
    assert_ne!(seq_a, seq_b);
}

#[test]
fn pick_index_stays_in_bounds() {
    let mut rng = BrainRng::seeded(7);
    for _ in 0..1000 {
        assert!(rng.pick_index(3) < 3);
    }
}

#[test]
fn choose_on_empty_is_none() {
    let mut rng = BrainRng::seeded(7);
    let empty: [u8; 0] = [];
    assert_eq!(rng.choose(&empty), None);
}
