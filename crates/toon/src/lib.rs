//! TOON (Token-Oriented Object Notation) encoder/decoder.
//!
//! TOON trims the syntactic noise JSON carries for arrays of uniform
//! records, without giving up a lossless round trip to a JSON-like value
//! model. This crate is the codec only: a deterministic encoder, a
//! fail-fast strict decoder, an error-recovering lenient decoder, and
//! streaming variants of both that run in bounded memory. It does not do
//! schema validation, token-count estimation, or host-framework glue —
//! those are built on top of the five functions re-exported here.

mod classify;
mod decode;
mod encode;
mod error;
mod line_grammar;
mod map;
mod options;
mod scalar;
mod stream;
mod value;

pub use decode::{decode_lenient, decode_strict};
pub use encode::encode;
pub use error::{DecodeError, DecodeErrorKind, Diagnostic, DiagnosticKind, EncodeError, StreamDecodeError};
pub use map::ToonMap;
pub use options::EncodeOptions;
pub use stream::{stream_decode_rows, stream_encode, RowStream, StreamEncoder};
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_roundtrip() {
        let v = Value::Int(42);
        let text = encode(&v, &EncodeOptions::default()).unwrap();
        assert_eq!(text, "42");
        assert_eq!(decode_strict(&text).unwrap(), v);
    }

    #[test]
    fn object_of_two_fields() {
        let text = "{\n  name: John\n  age: 30\n}";
        let value = decode_strict(text).unwrap();
        let mut expected = ToonMap::new();
        expected.insert("age".to_string(), Value::Int(30));
        expected.insert("name".to_string(), Value::Str("John".to_string()));
        assert_eq!(value, Value::Object(expected));
        let reencoded = encode(&value, &EncodeOptions::default()).unwrap();
        assert_eq!(reencoded, "{\n  age: 30\n  name: John\n}");
    }

    #[test]
    fn simple_list() {
        let text = "[3]:\n  1\n  2\n  3";
        let value = decode_strict(text).unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn tabular_list_sorts_columns_on_reencode() {
        let text = "[2]{sku,qty,price}:\n  A1,2,9.99\n  B2,1,14.5";
        let value = decode_strict(text).unwrap();
        let reencoded = encode(&value, &EncodeOptions::default()).unwrap();
        assert_eq!(
            reencoded,
            "[2]{price,qty,sku}:\n  9.99,2,A1\n  14.5,1,B2"
        );
    }

    #[test]
    fn empty_input_is_empty_input_error() {
        let err = decode_strict("   \n  ").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::EmptyInput);
    }

    #[test]
    fn lenient_never_panics_on_garbage() {
        let (value, diags) = decode_lenient(":::}}}]][[[{{{");
        assert!(value.is_some());
        assert!(!diags.is_empty());
    }
}
