//! Transform snapshots.
//!
//! Two shapes share the `{position, rotation, localScale}` layout:
//! - [`Transform`] stands in for a live scene node. It can be written but not
//!   reconstructed, because a live node is owned by its host, not by the save
//!   file. It implements `Serialize` only; its codec `decode` always fails with
//!   [`CodecError::Unsupported`].
//! - [`TransformData`] is the plain-data copy that round-trips and can be
//!   applied back onto any [`TransformTarget`].

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::{
    CodecError, GeometricCodec, Quaternion, Vector3, impl_serde_via_codec, object, read_nested,
};

/// Anything that carries a position, rotation, and local scale.
pub trait TransformTarget {
    fn position(&self) -> Vector3;
    fn rotation(&self) -> Quaternion;
    fn local_scale(&self) -> Vector3;

    fn set_position_and_rotation(&mut self, position: Vector3, rotation: Quaternion);
    fn set_local_scale(&mut self, scale: Vector3);
}

/// Live transform owned by the host. Write-only from the codec's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vector3,
    rotation: Quaternion,
    local_scale: Vector3,
}

impl Transform {
    pub fn new(position: Vector3, rotation: Quaternion, local_scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            local_scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Quaternion::IDENTITY, Vector3::ONE)
    }
}

impl TransformTarget for Transform {
    fn position(&self) -> Vector3 {
        self.position
    }

    fn rotation(&self) -> Quaternion {
        self.rotation
    }

    fn local_scale(&self) -> Vector3 {
        self.local_scale
    }

    fn set_position_and_rotation(&mut self, position: Vector3, rotation: Quaternion) {
        self.position = position;
        self.rotation = rotation;
    }

    fn set_local_scale(&mut self, scale: Vector3) {
        self.local_scale = scale;
    }
}

/// Plain position/rotation/scale triple that fully round-trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformData {
    pub position: Vector3,
    pub rotation: Quaternion,
    pub local_scale: Vector3,
}

impl TransformData {
    pub const fn new(position: Vector3, rotation: Quaternion, local_scale: Vector3) -> Self {
        Self {
            position,
            rotation,
            local_scale,
        }
    }

    /// Capture the current state of `target`.
    pub fn from_target(target: &impl TransformTarget) -> Self {
        Self::new(target.position(), target.rotation(), target.local_scale())
    }

    /// Copy all three components onto `target`.
    pub fn apply_to(&self, target: &mut impl TransformTarget) {
        target.set_position_and_rotation(self.position, self.rotation);
        target.set_local_scale(self.local_scale);
    }
}

impl Default for TransformData {
    fn default() -> Self {
        Self::new(Vector3::ZERO, Quaternion::IDENTITY, Vector3::ONE)
    }
}

fn encode_triple(position: Vector3, rotation: Quaternion, local_scale: Vector3) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("position".into(), Value::Object(position.encode()));
    map.insert("rotation".into(), Value::Object(rotation.encode()));
    map.insert("localScale".into(), Value::Object(local_scale.encode()));
    map
}

impl GeometricCodec for Transform {
    const SHAPE: &'static str = "Transform";

    fn encode(&self) -> Map<String, Value> {
        encode_triple(self.position, self.rotation, self.local_scale)
    }

    fn decode(_value: &Value) -> Result<Self, CodecError> {
        Err(CodecError::Unsupported {
            shape: Self::SHAPE,
            reason: "live transforms cannot be reconstructed; decode TransformData and apply it",
        })
    }
}

impl Serialize for Transform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode().serialize(serializer)
    }
}

impl GeometricCodec for TransformData {
    const SHAPE: &'static str = "TransformData";

    fn encode(&self) -> Map<String, Value> {
        encode_triple(self.position, self.rotation, self.local_scale)
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::default());
        };
        Ok(Self {
            position: read_nested(map, "position", Vector3::ZERO)?,
            rotation: read_nested(map, "rotation", Quaternion::IDENTITY)?,
            local_scale: read_nested(map, "localScale", Vector3::ONE)?,
        })
    }
}

impl_serde_via_codec!(TransformData);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transform_decode_is_unsupported() {
        let transform = Transform::new(Vector3::ONE, Quaternion::IDENTITY, Vector3::ONE);
        let encoded = Value::Object(transform.encode());

        for input in [encoded, json!({}), Value::Null] {
            assert!(matches!(
                Transform::decode(&input),
                Err(CodecError::Unsupported { shape: "Transform", .. })
            ));
        }
    }

    #[test]
    fn test_transform_writes_triple_layout() {
        let transform = Transform::new(
            Vector3::new(1.0, 2.0, 3.0),
            Quaternion::IDENTITY,
            Vector3::ONE,
        );
        let json = serde_json::to_value(&transform).unwrap();
        assert_eq!(json["position"], json!({"x": 1.0, "y": 2.0, "z": 3.0}));
        assert_eq!(json["rotation"]["w"], json!(1.0));
        assert_eq!(json["localScale"]["x"], json!(1.0));
    }

    #[test]
    fn test_transform_data_defaults() {
        let data = TransformData::decode(&json!({"position": {"x": 2}})).unwrap();
        assert_eq!(data.position, Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(data.rotation, Quaternion::IDENTITY);
        assert_eq!(data.local_scale, Vector3::ONE);
    }

    #[test]
    fn test_apply_to_copies_all_fields() {
        let data = TransformData::new(
            Vector3::new(5.0, 0.0, -1.0),
            Quaternion::new(0.0, 0.7071, 0.0, 0.7071),
            Vector3::new(2.0, 2.0, 2.0),
        );
        let mut target = Transform::default();
        data.apply_to(&mut target);

        assert_eq!(TransformData::from_target(&target), data);
    }
}
