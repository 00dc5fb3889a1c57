//! Float and integer vector shapes.

use serde_json::{Map, Value};

use super::{CodecError, GeometricCodec, impl_serde_via_codec, number, object, read_f32, read_i32};

/// Two-component float vector, encoded as `{x, y}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Three-component float vector, encoded as `{x, y, z}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Four-component float vector, encoded as `{x, y, z, w}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

/// Two-component integer vector, encoded as `{x, y}` with integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2Int {
    pub x: i32,
    pub y: i32,
}

impl Vector2Int {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Three-component integer vector, encoded as `{x, y, z}` with integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector3Int {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3Int {
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl GeometricCodec for Vector2 {
    const SHAPE: &'static str = "Vector2";

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("x".into(), number(self.x));
        map.insert("y".into(), number(self.y));
        map
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::ZERO);
        };
        Ok(Self {
            x: read_f32(Self::SHAPE, map, "x", 0.0)?,
            y: read_f32(Self::SHAPE, map, "y", 0.0)?,
        })
    }
}

impl GeometricCodec for Vector3 {
    const SHAPE: &'static str = "Vector3";

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("x".into(), number(self.x));
        map.insert("y".into(), number(self.y));
        map.insert("z".into(), number(self.z));
        map
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::ZERO);
        };
        Ok(Self {
            x: read_f32(Self::SHAPE, map, "x", 0.0)?,
            y: read_f32(Self::SHAPE, map, "y", 0.0)?,
            z: read_f32(Self::SHAPE, map, "z", 0.0)?,
        })
    }
}

impl GeometricCodec for Vector4 {
    const SHAPE: &'static str = "Vector4";

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("x".into(), number(self.x));
        map.insert("y".into(), number(self.y));
        map.insert("z".into(), number(self.z));
        map.insert("w".into(), number(self.w));
        map
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::ZERO);
        };
        Ok(Self {
            x: read_f32(Self::SHAPE, map, "x", 0.0)?,
            y: read_f32(Self::SHAPE, map, "y", 0.0)?,
            z: read_f32(Self::SHAPE, map, "z", 0.0)?,
            w: read_f32(Self::SHAPE, map, "w", 0.0)?,
        })
    }
}

impl GeometricCodec for Vector2Int {
    const SHAPE: &'static str = "Vector2Int";

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("x".into(), Value::from(self.x));
        map.insert("y".into(), Value::from(self.y));
        map
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::ZERO);
        };
        Ok(Self {
            x: read_i32(Self::SHAPE, map, "x")?,
            y: read_i32(Self::SHAPE, map, "y")?,
        })
    }
}

impl GeometricCodec for Vector3Int {
    const SHAPE: &'static str = "Vector3Int";

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("x".into(), Value::from(self.x));
        map.insert("y".into(), Value::from(self.y));
        map.insert("z".into(), Value::from(self.z));
        map
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::ZERO);
        };
        Ok(Self {
            x: read_i32(Self::SHAPE, map, "x")?,
            y: read_i32(Self::SHAPE, map, "y")?,
            z: read_i32(Self::SHAPE, map, "z")?,
        })
    }
}

impl_serde_via_codec!(Vector2, Vector3, Vector4, Vector2Int, Vector3Int);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vector3_encodes_named_fields() {
        let encoded = Value::Object(Vector3::new(1.0, -2.5, 3.0).encode());
        assert_eq!(encoded, json!({"x": 1.0, "y": -2.5, "z": 3.0}));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        assert_eq!(Vector2::decode(&json!({})).unwrap(), Vector2::ZERO);
        assert_eq!(
            Vector3::decode(&json!({"y": 4})).unwrap(),
            Vector3::new(0.0, 4.0, 0.0)
        );
        assert_eq!(Vector4::decode(&json!({})).unwrap(), Vector4::ZERO);
        assert_eq!(Vector3Int::decode(&json!({"z": -7})).unwrap(), Vector3Int::new(0, 0, -7));
    }

    #[test]
    fn test_null_decodes_to_zero() {
        assert_eq!(Vector2Int::decode(&Value::Null).unwrap(), Vector2Int::ZERO);
        assert_eq!(Vector4::decode(&Value::Null).unwrap(), Vector4::ZERO);
    }

    #[test]
    fn test_integer_vector_rejects_fractions() {
        assert!(Vector2Int::decode(&json!({"x": 1.5})).is_err());
    }

    #[test]
    fn test_absent_struct_field_decodes_to_zero() {
        #[derive(serde::Deserialize)]
        struct Spawn {
            origin: Vector3,
        }

        let spawn: Spawn = serde_json::from_str("{}").unwrap();
        assert_eq!(spawn.origin, Vector3::ZERO);
    }
}
