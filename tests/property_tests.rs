//! Property-based tests over generated documents and values: round-trip
//! identity, the numeric range law, and grammar normal forms.

use chrono::TimeDelta;
use proptest::prelude::*;
use stanza::{duration, from_str, to_string, Document, Node, Size, Value};

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

fn leaf() -> impl Strategy<Value = Node> {
    (name(), any::<i32>()).prop_map(|(name, value)| Node::new(name).unwrap().with_value(value))
}

fn node() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        (name(), any::<i32>(), prop::collection::vec(inner, 0..4)).prop_map(
            |(name, value, children)| {
                let mut node = Node::new(name).unwrap().with_value(value);
                node.nodes = children;
                node
            },
        )
    })
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec(node(), 0..5).prop_map(|nodes| Document { nodes })
}

proptest! {
    #[test]
    fn prop_document_round_trip(doc in document()) {
        let rendered = to_string(&doc);
        let reparsed = from_str(&rendered).unwrap();
        prop_assert_eq!(&reparsed, &doc);
        prop_assert_eq!(to_string(&reparsed), rendered);
    }

    #[test]
    fn prop_text_value_round_trip(text in any::<String>()) {
        let mut doc = Document::new();
        doc.nodes.push(Node::new("n").unwrap().with_value(text.as_str()));
        let reparsed = from_str(&to_string(&doc)).unwrap();
        prop_assert_eq!(reparsed.find("n"), Some(&Value::from(text.as_str())));
    }

    #[test]
    fn prop_i64_range_law(x in any::<i64>()) {
        let value = Value::I64(x);
        prop_assert_eq!(value.as_i16(), i16::try_from(x).ok());
        prop_assert_eq!(value.as_u32(), u32::try_from(x).ok());
        prop_assert_eq!(value.as_u64(), u64::try_from(x).ok());
    }

    #[test]
    fn prop_integer_widening_is_exact(x in any::<i16>()) {
        let value = Value::I16(x);
        prop_assert_eq!(value.as_i64(), Some(i64::from(x)));
        prop_assert_eq!(value.as_i128(), Some(i128::from(x)));
        prop_assert_eq!(value.as_f64(), Some(f64::from(x)));
    }

    #[test]
    fn prop_int_to_bool(x in any::<i64>()) {
        prop_assert_eq!(Value::I64(x).as_bool(), Some(x != 0));
    }

    #[test]
    fn prop_duration_dotted_normal_form(nanos in any::<i64>()) {
        let d = TimeDelta::nanoseconds(nanos);
        let dotted = duration::to_dotted_string(&d);
        prop_assert_eq!(duration::parse(&dotted), Some(d));
        // one normal form: reformatting the parse changes nothing
        prop_assert_eq!(duration::to_dotted_string(&duration::parse(&dotted).unwrap()), dotted);
    }

    #[test]
    fn prop_duration_unit_form_agrees(nanos in any::<i64>()) {
        let d = TimeDelta::nanoseconds(nanos);
        prop_assert_eq!(duration::parse(&duration::to_unit_string(&d)), Some(d));
    }

    #[test]
    fn prop_size_decimal_round_trip(x in any::<u64>()) {
        prop_assert_eq!(Size::parse(&x.to_string()), Some(Size::new(x)));
    }

    #[test]
    fn prop_size_si_multiplier(x in 0u64..1_000_000_000) {
        prop_assert_eq!(Size::parse(&format!("{x}k")), Some(Size::new(x * 1000)));
        prop_assert_eq!(Size::parse(&format!("{x}K")), Some(Size::new(x * 1000)));
    }

    #[test]
    fn prop_matcher_accepts_permuted_siblings(
        statements in prop::collection::vec((name(), any::<i32>()), 0..6).prop_shuffle()
    ) {
        let mut sorted = statements.clone();
        sorted.sort();
        let build = |pairs: &[(String, i32)]| Document {
            nodes: pairs
                .iter()
                .map(|(name, value)| Node::new(name.clone()).unwrap().with_value(*value))
                .collect(),
        };
        prop_assert!(build(&statements).matches(&build(&sorted)));
    }
}
