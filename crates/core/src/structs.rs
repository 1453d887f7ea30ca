//! Conversion between `google.protobuf.Struct` and JSON objects.
//!
//! Resources travel over the wire as `Struct` values but are easiest to inspect and mutate as
//! `serde_json` objects. Both directions are lossless for every value JSON can represent. Numbers
//! are `f64` on the wire; integral values within the safe-integer range decode as JSON integers so
//! that fields like `spec.replicas` read back as `3` rather than `3.0`. Negative zero stays a float
//! so its sign survives the round trip.
//!
//! Decoding failures carry the path of the offending value, written as dotted keys with `[index]` for
//! list elements (for example `spec.forProvider.tags[2]`).

use prost_types::value::Kind;
use prost_types::{ListValue, Struct, Value};
use serde_json::{Map, Number, Value as JsonValue};

use crate::error::{StructError, StructResult};

/// Largest integer every `f64` below it represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converts a `Struct` into a JSON object.
pub fn struct_to_json(s: &Struct) -> StructResult<Map<String, JsonValue>> {
    fields_to_json(s, "")
}

/// Converts a JSON object into a `Struct`.
pub fn json_to_struct(map: &Map<String, JsonValue>) -> Struct {
    Struct {
        fields: map
            .iter()
            .map(|(key, value)| (key.clone(), json_to_value(value)))
            .collect(),
    }
}

fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_owned()
    } else {
        format!("{parent}.{key}")
    }
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

fn fields_to_json(s: &Struct, path: &str) -> StructResult<Map<String, JsonValue>> {
    s.fields
        .iter()
        .map(|(key, value)| -> StructResult<(String, JsonValue)> {
            Ok((key.clone(), value_to_json(value, &child_path(path, key))?))
        })
        .collect()
}

fn value_to_json(value: &Value, path: &str) -> StructResult<JsonValue> {
    let kind = value.kind.as_ref().ok_or_else(|| StructError::MissingKind {
        path: path.to_owned(),
    })?;

    match kind {
        Kind::NullValue(_) => Ok(JsonValue::Null),
        Kind::NumberValue(n) => number_to_json(*n, path),
        Kind::StringValue(s) => Ok(JsonValue::String(s.clone())),
        Kind::BoolValue(b) => Ok(JsonValue::Bool(*b)),
        Kind::StructValue(s) => fields_to_json(s, path).map(JsonValue::Object),
        Kind::ListValue(list) => list
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| value_to_json(v, &index_path(path, i)))
            .collect::<StructResult<Vec<_>>>()
            .map(JsonValue::Array),
    }
}

fn number_to_json(n: f64, path: &str) -> StructResult<JsonValue> {
    let negative_zero = n == 0.0 && n.is_sign_negative();
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER && !negative_zero {
        return Ok(JsonValue::Number(Number::from(n as i64)));
    }
    Number::from_f64(n)
        .map(JsonValue::Number)
        .ok_or_else(|| StructError::NonFiniteNumber {
            path: path.to_owned(),
            value: n,
        })
}

fn json_to_value(value: &JsonValue) -> Value {
    let kind = match value {
        JsonValue::Null => Kind::NullValue(0),
        JsonValue::Bool(b) => Kind::BoolValue(*b),
        // Always `Some` unless serde_json's `arbitrary_precision` feature is enabled.
        JsonValue::Number(n) => Kind::NumberValue(n.as_f64().unwrap_or(f64::NAN)),
        JsonValue::String(s) => Kind::StringValue(s.clone()),
        JsonValue::Array(items) => Kind::ListValue(ListValue {
            values: items.iter().map(json_to_value).collect(),
        }),
        JsonValue::Object(map) => Kind::StructValue(json_to_struct(map)),
    };
    Value { kind: Some(kind) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_nested_object_converts_both_ways() {
        let original = object(json!({
            "apiVersion": "test.crossplane.io/v1",
            "kind": "TestNamer",
            "metadata": {"name": "my-test-namer", "labels": {"tier": "db"}},
            "spec": {
                "replicas": 3,
                "ratio": 0.25,
                "enabled": true,
                "nothing": null,
                "tags": ["a", {"b": false}, [1, 2]]
            }
        }));

        let s = json_to_struct(&original);
        let back = struct_to_json(&s).unwrap();

        assert_eq!(JsonValue::Object(back), JsonValue::Object(original));
    }

    #[test]
    fn test_integers_become_numbers() {
        let s = json_to_struct(&object(json!({"count": 7})));

        assert_eq!(s.fields["count"].kind, Some(Kind::NumberValue(7.0)));
    }

    #[test]
    fn test_integral_numbers_decode_as_integers() {
        let s = Struct {
            fields: [
                (
                    "whole".to_string(),
                    Value {
                        kind: Some(Kind::NumberValue(-4.0)),
                    },
                ),
                (
                    "half".to_string(),
                    Value {
                        kind: Some(Kind::NumberValue(1.5)),
                    },
                ),
            ]
            .into(),
        };

        let map = struct_to_json(&s).unwrap();

        assert_eq!(map["whole"], json!(-4));
        assert!(map["whole"].is_i64());
        assert_eq!(map["half"], json!(1.5));
    }

    #[test]
    fn test_round_trip_preserves_encoded_bytes() {
        let numbers = [-0.0, 0.0, -4.0, 1.5, 1e300, MAX_SAFE_INTEGER + 1.0];
        let s = Struct {
            fields: numbers
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    (
                        format!("n{i}"),
                        Value {
                            kind: Some(Kind::NumberValue(*n)),
                        },
                    )
                })
                .collect(),
        };

        let back = json_to_struct(&struct_to_json(&s).unwrap());

        assert_eq!(back.encode_to_vec(), s.encode_to_vec());
    }

    #[test]
    fn test_negative_zero_keeps_its_sign() {
        let s = Struct {
            fields: [(
                "offset".to_string(),
                Value {
                    kind: Some(Kind::NumberValue(-0.0)),
                },
            )]
            .into(),
        };

        let map = struct_to_json(&s).unwrap();

        assert!(map["offset"].as_f64().unwrap().is_sign_negative());
    }

    #[test]
    fn test_missing_kind_reports_path() {
        let inner = Struct {
            fields: [("bad".to_string(), Value { kind: None })].into(),
        };
        let list = Value {
            kind: Some(Kind::ListValue(ListValue {
                values: vec![Value {
                    kind: Some(Kind::StructValue(inner)),
                }],
            })),
        };
        let s = Struct {
            fields: [("items".to_string(), list)].into(),
        };

        let err = struct_to_json(&s).unwrap_err();

        assert_eq!(
            err,
            StructError::MissingKind {
                path: "items[0].bad".into()
            }
        );
    }

    #[test]
    fn test_non_finite_number_is_rejected() {
        let s = Struct {
            fields: [(
                "spec".to_string(),
                Value {
                    kind: Some(Kind::NumberValue(f64::NAN)),
                },
            )]
            .into(),
        };

        let err = struct_to_json(&s).unwrap_err();

        assert!(matches!(err, StructError::NonFiniteNumber { ref path, .. } if path == "spec"));
        assert!(err.to_string().contains("not a finite number"));
    }

    #[test]
    fn test_empty_struct_is_empty_object() {
        assert!(struct_to_json(&Struct::default()).unwrap().is_empty());
    }
}
