//! Generic value serializer.
//!
//! Values are converted with serde into a JSON tree, cleaned, and rendered as
//! text. Selection of fields follows serde's rules: every field of a derived
//! type is written unless marked `#[serde(skip)]`, and recognised geometric
//! shapes use their custom codecs (see [`crate::geometry`]).
//!
//! Two policies apply to every tree:
//! - object properties whose value is `null` are omitted, so an unset
//!   `Option` field leaves no trace and decodes back to `None` (or to the
//!   field default under `#[serde(default)]`)
//! - reference cycles built through [`crate::Shared`] are broken silently,
//!   the re-entrant edge being omitted like any other null property
//!
//! Array elements are kept as-is, so `null` entries in a sequence survive.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// Formatting options for rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Indent output. Purely cosmetic; never affects decoding.
    pub pretty_print: bool,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self { pretty_print: true }
    }
}

/// Converts values to and from their textual JSON representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer {
    options: SerializerOptions,
}

impl ValueSerializer {
    pub fn new(options: SerializerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SerializerOptions {
        self.options
    }

    /// Build the cleaned JSON tree for `value`.
    pub fn to_tree<T: Serialize + ?Sized>(&self, value: &T) -> Result<Value> {
        let mut tree = serde_json::to_value(value)?;
        prune_nulls(&mut tree);
        Ok(tree)
    }

    /// Render `value` as JSON text.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let tree = self.to_tree(value)?;
        let text = if self.options.pretty_print {
            serde_json::to_string_pretty(&tree)?
        } else {
            serde_json::to_string(&tree)?
        };
        Ok(text)
    }

    /// Parse JSON text into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Remove `null` properties from every object in the tree.
fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(prune_nulls),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::Shared;
    use crate::geometry::{Quaternion, Vector2, Vector3};

    #[derive(Debug, Serialize, Deserialize, PartialEq, Default)]
    #[serde(default)]
    struct Profile {
        name: String,
        nickname: Option<String>,
        level: u32,
        spawn: Vector3,
        facing: Quaternion,
        tags: Vec<String>,
        #[serde(skip)]
        session_cache: Vec<u8>,
    }

    #[derive(Serialize)]
    struct Node {
        name: String,
        children: Vec<Shared<Node>>,
        parent: Option<Shared<Node>>,
    }

    fn compact() -> ValueSerializer {
        ValueSerializer::new(SerializerOptions {
            pretty_print: false,
        })
    }

    #[test]
    fn test_none_fields_are_omitted() {
        let profile = Profile {
            name: "ada".into(),
            ..Default::default()
        };
        let tree = compact().to_tree(&profile).unwrap();

        let object = tree.as_object().unwrap();
        assert!(!object.contains_key("nickname"));
        assert!(!object.contains_key("session_cache"));
        assert_eq!(tree["spawn"], json!({"x": 0.0, "y": 0.0, "z": 0.0}));
    }

    #[test]
    fn test_empty_object_decodes_to_defaults() {
        let profile: Profile = compact().deserialize("{}").unwrap();
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.facing, Quaternion::IDENTITY);
    }

    #[test]
    fn test_nested_roundtrip() {
        let profile = Profile {
            name: "grace".into(),
            nickname: Some("amazing".into()),
            level: 7,
            spawn: Vector3::new(1.0, 2.0, 3.0),
            facing: Quaternion::new(0.0, 1.0, 0.0, 0.0),
            tags: vec!["admiral".into()],
            session_cache: vec![1, 2, 3],
        };
        let text = compact().serialize(&profile).unwrap();
        let decoded: Profile = compact().deserialize(&text).unwrap();

        assert_eq!(decoded.name, profile.name);
        assert_eq!(decoded.nickname, profile.nickname);
        assert_eq!(decoded.spawn, profile.spawn);
        assert_eq!(decoded.facing, profile.facing);
        assert!(decoded.session_cache.is_empty());
    }

    #[test]
    fn test_pretty_print_does_not_change_meaning() {
        let value = BTreeMap::from([("a", Vector2::new(1.0, 2.0))]);
        let pretty = ValueSerializer::default().serialize(&value).unwrap();
        let flat = compact().serialize(&value).unwrap();

        assert!(pretty.contains('\n'));
        assert!(!flat.contains('\n'));
        let a: BTreeMap<String, Vector2> = compact().deserialize(&pretty).unwrap();
        let b: BTreeMap<String, Vector2> = compact().deserialize(&flat).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_map_insertion_order_is_kept() {
        let mut map = serde_json::Map::new();
        map.insert("zeta".into(), json!(1));
        map.insert("alpha".into(), json!(2));

        let text = compact().serialize(&map).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_array_nulls_are_kept() {
        let values = vec![Some(1), None, Some(3)];
        assert_eq!(compact().serialize(&values).unwrap(), "[1,null,3]");
    }

    #[test]
    fn test_parent_cycle_is_dropped() {
        let root = Shared::new(Node {
            name: "root".into(),
            children: Vec::new(),
            parent: None,
        });
        let child = Shared::new(Node {
            name: "child".into(),
            children: Vec::new(),
            parent: Some(root.clone()),
        });
        root.write().children.push(child);

        let tree = compact().to_tree(&root).unwrap();
        assert_eq!(
            tree,
            json!({
                "name": "root",
                "children": [{"name": "child", "children": []}]
            })
        );
    }
}
