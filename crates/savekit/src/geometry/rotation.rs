//! Rotation quaternion shape.

use serde_json::{Map, Value};

use super::{CodecError, GeometricCodec, impl_serde_via_codec, number, object, read_f32};

/// Rotation quaternion, encoded as `{x, y, z, w}`.
///
/// A missing `w` decodes to `1`, so an empty or partial object yields the
/// identity rotation rather than the degenerate zero quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl GeometricCodec for Quaternion {
    const SHAPE: &'static str = "Quaternion";

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
            return Ok(Self::IDENTITY);
        };
        Ok(Self {
            x: read_f32(Self::SHAPE, map, "x", 0.0)?,
            y: read_f32(Self::SHAPE, map, "y", 0.0)?,
            z: read_f32(Self::SHAPE, map, "z", 0.0)?,
            w: read_f32(Self::SHAPE, map, "w", 1.0)?,
        })
    }
}

impl_serde_via_codec!(Quaternion);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_w_is_identity() {
        let q = Quaternion::decode(&json!({"x": 0, "y": 0, "z": 0})).unwrap();
        assert_eq!(q, Quaternion::IDENTITY);
    }

    #[test]
    fn test_null_is_identity() {
        assert_eq!(Quaternion::decode(&Value::Null).unwrap(), Quaternion::IDENTITY);
        assert_eq!(Quaternion::decode(&json!({})).unwrap(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_explicit_w_is_kept() {
        let q = Quaternion::decode(&json!({"x": 0.5, "w": 0.0})).unwrap();
        assert_eq!(q, Quaternion::new(0.5, 0.0, 0.0, 0.0));
    }
}
