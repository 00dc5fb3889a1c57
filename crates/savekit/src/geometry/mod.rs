//! Fixed-shape geometric value codecs.
//!
//! Each shape maps to a small JSON object with named numeric fields. Decoding
//! is lenient: `null` or a missing field resolves to the shape's zero (or
//! identity) component instead of failing, so persisted data written by an
//! older layout still loads.
//!
//! Every shape's serde impls route through [`GeometricCodec`], which keeps the
//! wire layout in one place whether a value is saved on its own or nested
//! inside a larger struct.

mod bounds;
mod color;
mod rotation;
mod transform;
mod vector;

pub use bounds::{Bounds, Rect};
pub use color::Color;
pub use rotation::Quaternion;
pub use transform::{Transform, TransformData, TransformTarget};
pub use vector::{Vector2, Vector2Int, Vector3, Vector3Int, Vector4};

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while decoding a geometric shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{shape} cannot be decoded: {reason}")]
    Unsupported {
        shape: &'static str,
        reason: &'static str,
    },

    #[error("{shape} expected a JSON object, found {found}")]
    NotAnObject { shape: &'static str, found: String },

    #[error("{shape}.{field} is not a valid number")]
    InvalidField {
        shape: &'static str,
        field: &'static str,
    },
}

/// Symmetric encode/decode rule for one geometric shape.
///
/// Codecs are stateless; `decode(&Value::Null)` yields the shape's default.
pub trait GeometricCodec: Sized {
    /// Human-readable shape name used in error messages.
    const SHAPE: &'static str;

    /// Encode into an object with named numeric fields.
    fn encode(&self) -> Map<String, Value>;

    /// Decode from an encoded object, defaulting absent fields.
    fn decode(value: &Value) -> Result<Self, CodecError>;
}

/// Borrow the object behind `value`.
///
/// Returns `None` for `null`, which callers map to the shape default.
pub(crate) fn object<'a>(
    shape: &'static str,
    value: &'a Value,
) -> Result<Option<&'a Map<String, Value>>, CodecError> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(CodecError::NotAnObject {
            shape,
            found: kind_of(other).to_string(),
        }),
    }
}

pub(crate) fn read_f32(
    shape: &'static str,
    map: &Map<String, Value>,
    field: &'static str,
    default: f32,
) -> Result<f32, CodecError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => value
            .as_f64()
            .map(|v| v as f32)
            .ok_or(CodecError::InvalidField { shape, field }),
    }
}

pub(crate) fn read_i32(
    shape: &'static str,
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<i32, CodecError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(0),
        Some(value) => value
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or(CodecError::InvalidField { shape, field }),
    }
}

/// Decode a nested shape stored under `field`, defaulting when absent.
pub(crate) fn read_nested<T: GeometricCodec>(
    map: &Map<String, Value>,
    field: &str,
    default: T,
) -> Result<T, CodecError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(value) => T::decode(value),
    }
}

pub(crate) fn number(value: f32) -> Value {
    Value::from(f64::from(value))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Implement `Serialize` + `Deserialize` for a shape by delegating to its codec.
///
/// Deserialization goes through `Option<Value>` so a struct field of this
/// shape that is missing entirely still decodes to the shape default.
macro_rules! impl_serde_via_codec {
    ($($shape:ty),* $(,)?) => {
        $(
            impl ::serde::Serialize for $shape {
                fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error> {
                    ::serde::Serialize::serialize(
                        &$crate::geometry::GeometricCodec::encode(self),
                        serializer,
                    )
                }
            }

            impl<'de> ::serde::Deserialize<'de> for $shape {
                fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::core::result::Result<Self, D::Error> {
                    let value = <Option<::serde_json::Value> as ::serde::Deserialize>::deserialize(deserializer)?
                        .unwrap_or(::serde_json::Value::Null);
                    <$shape as $crate::geometry::GeometricCodec>::decode(&value)
                        .map_err(::serde::de::Error::custom)
                }
            }
        )*
    };
}

pub(crate) use impl_serde_via_codec;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_is_rejected() {
        let err = Vector3::decode(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            CodecError::NotAnObject {
                shape: "Vector3",
                found: "an array".to_string()
            }
        );
    }

    #[test]
    fn test_non_numeric_field_is_rejected() {
        let err = Vector2::decode(&json!({"x": "left"})).unwrap_err();
        assert_eq!(
            err,
            CodecError::InvalidField {
                shape: "Vector2",
                field: "x"
            }
        );
    }
}
