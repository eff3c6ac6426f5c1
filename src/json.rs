//! Interop with `serde`: `Serialize` for values and documents, and
//! conversions to and from `serde_json::Value`.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::document::Document;
use crate::num::Number;
use crate::value::{Payload, Shape, Value};

impl Value {
    /// The visible content as a `serde_json` tree. Non-finite doubles become null.
    pub fn to_json(&self) -> serde_json::Value {
        match self.shape() {
            Shape::Null => serde_json::Value::Null,
            Shape::Bool(b) => serde_json::Value::Bool(b),
            Shape::Number(number) => number.to_json(),
            Shape::String(s) => serde_json::Value::String(s.to_string()),
            Shape::Array(children) => {
                serde_json::Value::Array(children.iter().map(|child| child.to_json()).collect())
            }
            Shape::Object(members) => {
                let mut map = serde_json::Map::with_capacity(members.len());
                for (name, child) in &members {
                    if !map.contains_key(name.as_str()) {
                        map.insert(name.to_string(), child.to_json());
                    }
                }
                serde_json::Value::Object(map)
            }
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        let payload = match value {
            serde_json::Value::Null => Payload::Null,
            serde_json::Value::Bool(b) => Payload::Bool(*b),
            serde_json::Value::Number(number) => match Number::from(number) {
                Number::Int(i) => Payload::Int64(i),
                Number::Uint(u) => Payload::Uint64(u),
                Number::Double(d) => Payload::Double(d),
            },
            serde_json::Value::String(s) => Payload::String(s.clone()),
            serde_json::Value::Array(items) => Payload::Array(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(map) => Payload::Object(
                map.iter()
                    .map(|(name, item)| (name.clone(), Value::from(item)))
                    .collect(),
            ),
        };
        Value::detached(payload)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from(&value)
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.shape() {
            Shape::Null => serializer.serialize_unit(),
            Shape::Bool(b) => serializer.serialize_bool(b),
            Shape::Number(Number::Int(i)) => serializer.serialize_i64(i),
            Shape::Number(Number::Uint(u)) => serializer.serialize_u64(u),
            Shape::Number(Number::Double(d)) => serializer.serialize_f64(d),
            Shape::String(s) => serializer.serialize_str(&s),
            Shape::Array(children) => {
                let mut seq = serializer.serialize_seq(Some(children.len()))?;
                for child in &children {
                    seq.serialize_element(&**child)?;
                }
                seq.end()
            }
            Shape::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (name, child) in &members {
                    map.serialize_entry(name.as_str(), &**child)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}
