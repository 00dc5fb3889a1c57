//! Rectangle and axis-aligned bounds shapes.

use serde_json::{Map, Value};

use super::{
    CodecError, GeometricCodec, Vector3, impl_serde_via_codec, number, object, read_f32,
    read_nested,
};

/// Axis-aligned rectangle, encoded as `{x, y, width, height}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Axis-aligned bounding box, encoded as nested `{center, size}` vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub center: Vector3,
    pub size: Vector3,
}

impl Bounds {
    pub const fn new(center: Vector3, size: Vector3) -> Self {
        Self { center, size }
    }

    /// Half of `size` along each axis.
    pub fn extents(&self) -> Vector3 {
        Vector3::new(self.size.x * 0.5, self.size.y * 0.5, self.size.z * 0.5)
    }
}

impl GeometricCodec for Rect {
    const SHAPE: &'static str = "Rect";

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("x".into(), number(self.x));
        map.insert("y".into(), number(self.y));
        map.insert("width".into(), number(self.width));
        map.insert("height".into(), number(self.height));
        map
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::ZERO);
        };
        Ok(Self {
            x: read_f32(Self::SHAPE, map, "x", 0.0)?,
            y: read_f32(Self::SHAPE, map, "y", 0.0)?,
            width: read_f32(Self::SHAPE, map, "width", 0.0)?,
            height: read_f32(Self::SHAPE, map, "height", 0.0)?,
        })
    }
}

impl GeometricCodec for Bounds {
    const SHAPE: &'static str = "Bounds";

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("center".into(), Value::Object(self.center.encode()));
        map.insert("size".into(), Value::Object(self.size.encode()));
        map
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::default());
        };
        Ok(Self {
            center: read_nested(map, "center", Vector3::ZERO)?,
            size: read_nested(map, "size", Vector3::ZERO)?,
        })
    }
}

impl_serde_via_codec!(Rect, Bounds);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bounds_nests_vectors() {
        let bounds = Bounds::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 4.0, 4.0));
        assert_eq!(
            Value::Object(bounds.encode()),
            json!({
                "center": {"x": 1.0, "y": 2.0, "z": 3.0},
                "size": {"x": 4.0, "y": 4.0, "z": 4.0}
            })
        );
        assert_eq!(bounds.extents(), Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_bounds_missing_size_is_zero() {
        let bounds = Bounds::decode(&json!({"center": {"x": 1}})).unwrap();
        assert_eq!(bounds.center, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(bounds.size, Vector3::ZERO);
    }

    #[test]
    fn test_rect_defaults() {
        assert_eq!(Rect::decode(&json!({"width": 10})).unwrap(), Rect::new(0.0, 0.0, 10.0, 0.0));
        assert_eq!(Rect::decode(&Value::Null).unwrap(), Rect::ZERO);
    }
}
