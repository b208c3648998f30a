//! Property-based tests for the quantified invariants: determinism,
//! round-trip, encode-idempotence, lenient totality, and streaming
//! equivalence over arbitrary finite input. Classifier safety is tested
//! in `classify.rs`'s own `#[cfg(test)]` block, since it needs the
//! private `classify_list` function.

use proptest::prelude::*;
use toon::{decode_lenient, decode_strict, encode, EncodeOptions, ToonMap, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|i| Value::Int(i as i64)),
        (-1e6f64..1e6).prop_map(Value::Float),
        "[a-zA-Z0-9_ ]{0,12}".prop_map(Value::Str),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = arb_scalar();
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6).prop_map(|fields| {
                let mut map = ToonMap::new();
                for (k, v) in fields {
                    map.insert(k, v);
                }
                Value::Object(map)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn determinism(v in arb_value()) {
        let options = EncodeOptions::default();
        let a = encode(&v, &options).unwrap();
        let b = encode(&v, &options).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn round_trip(v in arb_value()) {
        let options = EncodeOptions::default();
        let text = encode(&v, &options).unwrap();
        let decoded = decode_strict(&text).unwrap();
        prop_assert_eq!(decoded, v);
    }

    #[test]
    fn encode_idempotence(v in arb_value()) {
        let options = EncodeOptions::default();
        let once = encode(&v, &options).unwrap();
        let decoded = decode_strict(&once).unwrap();
        let twice = encode(&decoded, &options).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn lenient_totality(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        // Any byte sequence, projected through lossy UTF-8, must not
        // panic or hang the lenient decoder.
        let text = String::from_utf8_lossy(&bytes);
        let (_value, _diagnostics) = decode_lenient(&text);
    }

    #[test]
    fn streaming_equivalence_regular_list(items in prop::collection::vec(arb_scalar(), 0..12)) {
        use std::io::Cursor as IoCursor;

        let options = EncodeOptions::default();
        let mut chunks: Vec<String> = toon::stream_encode(items.clone(), &options)
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assume!(!chunks.is_empty());
        chunks[0] = chunks[0].replacen("[-]", &format!("[{}]", items.len()), 1);
        let text: String = chunks.concat();

        let rows: Vec<Value> = toon::stream_decode_rows(IoCursor::new(text.as_bytes()))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(rows, items);
    }
}
