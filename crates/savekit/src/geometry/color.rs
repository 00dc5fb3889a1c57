//! RGBA color shape.

use serde_json::{Map, Value};

use super::{CodecError, GeometricCodec, impl_serde_via_codec, number, object, read_f32};

/// Linear RGBA color, encoded as `{r, g, b, a}`. Missing alpha means opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl GeometricCodec for Color {
    const SHAPE: &'static str = "Color";

    fn encode(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("r".into(), number(self.r));
        map.insert("g".into(), number(self.g));
        map.insert("b".into(), number(self.b));
        map.insert("a".into(), number(self.a));
        map
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let Some(map) = object(Self::SHAPE, value)? else {
            return Ok(Self::BLACK);
        };
        Ok(Self {
            r: read_f32(Self::SHAPE, map, "r", 0.0)?,
            g: read_f32(Self::SHAPE, map, "g", 0.0)?,
            b: read_f32(Self::SHAPE, map, "b", 0.0)?,
            a: read_f32(Self::SHAPE, map, "a", 1.0)?,
        })
    }
}

impl_serde_via_codec!(Color);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_alpha_is_opaque() {
        let color = Color::decode(&json!({"r": 1.0, "g": 0.5})).unwrap();
        assert_eq!(color, Color::rgb(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_explicit_clear_survives() {
        let encoded = Value::Object(Color::CLEAR.encode());
        assert_eq!(Color::decode(&encoded).unwrap(), Color::CLEAR);
    }
}
