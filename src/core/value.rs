//! Generic structured value for fields built at the call site
//!
//! `StructuredValue` is the explicit tagged union (null, bool, number,
//! string, array, object) a caller can build without defining a type.
//! Objects keep insertion order.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum StructuredValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Array(Vec<StructuredValue>),
    Object(IndexMap<String, StructuredValue>),
}

impl StructuredValue {
    /// Empty object
    pub fn object() -> Self {
        StructuredValue::Object(IndexMap::new())
    }

    /// Insert into an object, returning it for chaining
    ///
    /// Non-object values are returned unchanged.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StructuredValue>) -> Self {
        if let StructuredValue::Object(map) = &mut self {
            map.insert(key.into(), value.into());
        }
        self
    }

    pub fn is_null(&self) -> bool {
        matches!(self, StructuredValue::Null)
    }
}

impl Serialize for StructuredValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StructuredValue::Null => serializer.serialize_unit(),
            StructuredValue::Bool(b) => serializer.serialize_bool(*b),
            StructuredValue::Int(i) => serializer.serialize_i64(*i),
            StructuredValue::Uint(u) => serializer.serialize_u64(*u),
            StructuredValue::Float(f) => serializer.serialize_f64(*f),
            StructuredValue::String(s) => serializer.serialize_str(s),
            StructuredValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            StructuredValue::Object(map) => {
                let mut obj = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    obj.serialize_entry(key, value)?;
                }
                obj.end()
            }
        }
    }
}

impl From<bool> for StructuredValue {
    fn from(b: bool) -> Self {
        StructuredValue::Bool(b)
    }
}

impl From<i64> for StructuredValue {
    fn from(i: i64) -> Self {
        StructuredValue::Int(i)
    }
}

impl From<i32> for StructuredValue {
    fn from(i: i32) -> Self {
        StructuredValue::Int(i64::from(i))
    }
}

impl From<u64> for StructuredValue {
    fn from(u: u64) -> Self {
        StructuredValue::Uint(u)
    }
}

impl From<u32> for StructuredValue {
    fn from(u: u32) -> Self {
        StructuredValue::Uint(u64::from(u))
    }
}

impl From<f64> for StructuredValue {
    fn from(f: f64) -> Self {
        StructuredValue::Float(f)
    }
}

impl From<&str> for StructuredValue {
    fn from(s: &str) -> Self {
        StructuredValue::String(s.to_string())
    }
}

impl From<String> for StructuredValue {
    fn from(s: String) -> Self {
        StructuredValue::String(s)
    }
}

impl<T: Into<StructuredValue>> From<Option<T>> for StructuredValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StructuredValue::Null, Into::into)
    }
}

impl<T: Into<StructuredValue>> From<Vec<T>> for StructuredValue {
    fn from(items: Vec<T>) -> Self {
        StructuredValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<StructuredValue>> FromIterator<(K, V)> for StructuredValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StructuredValue::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<serde_json::Value> for StructuredValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => StructuredValue::Null,
            serde_json::Value::Bool(b) => StructuredValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    StructuredValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    StructuredValue::Uint(u)
                } else {
                    StructuredValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => StructuredValue::String(s),
            serde_json::Value::Array(items) => {
                StructuredValue::Array(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => map.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::buffer::Buffer;
    use crate::core::reflect::write_structured;

    fn render(value: &StructuredValue) -> String {
        let mut buf = Buffer::with_capacity(64);
        write_structured(&mut buf, value).expect("structured values always render");
        buf.to_string()
    }

    #[test]
    fn test_object_keeps_insertion_order() {
        let value = StructuredValue::object()
            .with("zeta", 1)
            .with("alpha", "two")
            .with("mid", StructuredValue::Null);
        assert_eq!(render(&value), r#"{"zeta":1,"alpha":"two","mid":null}"#);
    }

    #[test]
    fn test_nested_containers() {
        let value = StructuredValue::Array(vec![
            StructuredValue::object(),
            StructuredValue::Null,
            None::<i64>.into(),
            2.into(),
        ]);
        assert_eq!(render(&value), "[{},null,null,2]");
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({"a": [1, -2, 2.5, "x"], "b": {"c": true}});
        let value = StructuredValue::from(json);
        assert_eq!(render(&value), r#"{"a":[1,-2,2.5,"x"],"b":{"c":true}}"#);
    }

    #[test]
    fn test_with_on_non_object() {
        let value = StructuredValue::from(3).with("ignored", 1);
        assert_eq!(value, StructuredValue::Int(3));
        assert!(StructuredValue::default().is_null());
    }
}
