use proptest::prelude::*;
use savekit::{
    Bounds, CodecError, Color, GeometricCodec, Quaternion, Rect, SaveKitError, Transform,
    TransformData, ValueSerializer, Vector2, Vector2Int, Vector3, Vector3Int, Vector4,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

fn roundtrip<T>(value: &T) -> T
where
    T: Serialize + DeserializeOwned,
{
    let serializer = ValueSerializer::default();
    let text = serializer.serialize(value).unwrap();
    serializer.deserialize(&text).unwrap()
}

fn component() -> impl Strategy<Value = f32> {
    -1.0e6f32..1.0e6f32
}

fn vector3() -> impl Strategy<Value = Vector3> {
    (component(), component(), component()).prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

proptest! {
    #[test]
    fn vector2_roundtrip(x in component(), y in component()) {
        let v = Vector2::new(x, y);
        prop_assert_eq!(roundtrip(&v), v);
    }

    #[test]
    fn vector3_roundtrip(v in vector3()) {
        prop_assert_eq!(roundtrip(&v), v);
    }

    #[test]
    fn vector4_roundtrip(x in component(), y in component(), z in component(), w in component()) {
        let v = Vector4::new(x, y, z, w);
        prop_assert_eq!(roundtrip(&v), v);
    }

    #[test]
    fn integer_vectors_roundtrip(x in any::<i32>(), y in any::<i32>(), z in any::<i32>()) {
        let v2 = Vector2Int::new(x, y);
        let v3 = Vector3Int::new(x, y, z);
        prop_assert_eq!(roundtrip(&v2), v2);
        prop_assert_eq!(roundtrip(&v3), v3);
    }

    #[test]
    fn quaternion_roundtrip(x in component(), y in component(), z in component(), w in component()) {
        let q = Quaternion::new(x, y, z, w);
        prop_assert_eq!(roundtrip(&q), q);
    }

    #[test]
    fn color_roundtrip(r in 0.0f32..=1.0, g in 0.0f32..=1.0, b in 0.0f32..=1.0, a in 0.0f32..=1.0) {
        let c = Color::new(r, g, b, a);
        prop_assert_eq!(roundtrip(&c), c);
    }

    #[test]
    fn rect_and_bounds_roundtrip(
        x in component(),
        y in component(),
        w in component(),
        h in component(),
        center in vector3(),
        size in vector3(),
    ) {
        let rect = Rect::new(x, y, w, h);
        let bounds = Bounds::new(center, size);
        prop_assert_eq!(roundtrip(&rect), rect);
        prop_assert_eq!(roundtrip(&bounds), bounds);
    }

    #[test]
    fn transform_data_roundtrip(position in vector3(), scale in vector3(), w in component()) {
        let data = TransformData::new(position, Quaternion::new(0.0, 0.0, 0.0, w), scale);
        prop_assert_eq!(roundtrip(&data), data);
    }
}

#[test]
fn test_empty_object_decodes_to_defaults() {
    let serializer = ValueSerializer::default();

    assert_eq!(serializer.deserialize::<Vector3>("{}").unwrap(), Vector3::ZERO);
    assert_eq!(serializer.deserialize::<Quaternion>("{}").unwrap(), Quaternion::IDENTITY);
    assert_eq!(serializer.deserialize::<Color>("{}").unwrap(), Color::BLACK);
    assert_eq!(serializer.deserialize::<Rect>("{}").unwrap(), Rect::ZERO);
    assert_eq!(
        serializer.deserialize::<TransformData>("{}").unwrap(),
        TransformData::default()
    );
}

#[test]
fn test_quaternion_missing_w_is_identity_component() {
    let q: Quaternion = ValueSerializer::default()
        .deserialize(r#"{"x":0,"y":0,"z":0}"#)
        .unwrap();
    assert_eq!(q, Quaternion::IDENTITY);
}

#[test]
fn test_transform_snapshot_is_write_only() {
    let transform = Transform::default();
    let text = ValueSerializer::default().serialize(&transform).unwrap();

    let tree: serde_json::Value = serde_json::from_str(&text).unwrap();
    let err = Transform::decode(&tree).unwrap_err();
    assert!(matches!(err, CodecError::Unsupported { shape: "Transform", .. }));

    let wrapped: SaveKitError = err.into();
    assert!(wrapped.to_string().contains("Transform"));
}

#[test]
fn test_transform_snapshot_reads_back_as_data() {
    let transform = Transform::new(
        Vector3::new(1.0, 2.0, 3.0),
        Quaternion::IDENTITY,
        Vector3::new(2.0, 2.0, 2.0),
    );
    let text = ValueSerializer::default().serialize(&transform).unwrap();

    let data: TransformData = ValueSerializer::default().deserialize(&text).unwrap();
    assert_eq!(data.position, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(data.local_scale, Vector3::new(2.0, 2.0, 2.0));
}
