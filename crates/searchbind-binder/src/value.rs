//! Untyped source values produced by the document store.
//!
//! A fetched document arrives as a [`FieldMap`]: external field names mapped to
//! [`SourceValue`] nodes. The discriminant of each node is decided once, when
//! the store parses its payload, so the binder can branch on it directly.

use std::collections::BTreeMap;
use std::fmt;

/// Field name to value mapping for one structural level of a document.
///
/// Iteration follows lexicographic tag order, so the order in which fields are
/// applied to a target is deterministic.
pub type FieldMap = BTreeMap<String, SourceValue>;

/// A single untyped value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean value.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer that does not fit in `i64`.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// String value.
    String(String),
}

impl Scalar {
    /// Name of the scalar kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) | Scalar::UInt(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::UInt(n) => write!(f, "{}", n),
            Scalar::Float(n) => write!(f, "{}", n),
            Scalar::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// A node of the untyped value tree returned for a fetched document.
///
/// The backend only emits sequences of mappings for nested result fields. A
/// [`SourceValue::Sequence`] may still carry other shapes when a payload is
/// malformed; the binder rejects those instead of coercing them.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SourceValue {
    /// Explicit null.
    #[default]
    Null,
    /// Scalar leaf.
    Scalar(Scalar),
    /// Nested structural value.
    Mapping(FieldMap),
    /// Ordered list of nested values.
    Sequence(Vec<SourceValue>),
}

impl SourceValue {
    /// Short name of this value's shape, used in diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            SourceValue::Null => "null",
            SourceValue::Scalar(s) => s.kind_name(),
            SourceValue::Mapping(_) => "mapping",
            SourceValue::Sequence(_) => "sequence",
        }
    }

    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, SourceValue::Null)
    }

    /// Returns `true` if this is a `Scalar` value.
    pub fn is_scalar(&self) -> bool {
        matches!(self, SourceValue::Scalar(_))
    }

    /// Returns `true` if this is a `Mapping` value.
    pub fn is_mapping(&self) -> bool {
        matches!(self, SourceValue::Mapping(_))
    }

    /// Returns `true` if this is a `Sequence` value.
    pub fn is_sequence(&self) -> bool {
        matches!(self, SourceValue::Sequence(_))
    }

    /// Extracts the scalar, if present.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            SourceValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the nested mapping, if present.
    pub fn as_mapping(&self) -> Option<&FieldMap> {
        match self {
            SourceValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Extracts the sequence items, if present.
    pub fn as_sequence(&self) -> Option<&[SourceValue]> {
        match self {
            SourceValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Consumes the value and returns the mapping, if it is one.
    pub fn into_mapping(self) -> Option<FieldMap> {
        match self {
            SourceValue::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for SourceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceValue::Null => write!(f, "null"),
            SourceValue::Scalar(s) => write!(f, "{} {}", s.kind_name(), s),
            SourceValue::Mapping(m) => write!(f, "mapping with {} field(s)", m.len()),
            SourceValue::Sequence(items) => write!(f, "sequence of {} item(s)", items.len()),
        }
    }
}

impl From<serde_json::Value> for SourceValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => SourceValue::Null,
            Json::Bool(b) => SourceValue::Scalar(Scalar::Bool(b)),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SourceValue::Scalar(Scalar::Int(i))
                } else if let Some(u) = n.as_u64() {
                    SourceValue::Scalar(Scalar::UInt(u))
                } else {
                    // Every non-integer serde_json number is representable as f64.
                    SourceValue::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Json::String(s) => SourceValue::Scalar(Scalar::String(s)),
            Json::Array(items) => {
                SourceValue::Sequence(items.into_iter().map(SourceValue::from).collect())
            }
            Json::Object(map) => SourceValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, SourceValue::from(v)))
                    .collect(),
            ),
        }
    }
}

// Conversions from primitive types
impl From<Scalar> for SourceValue {
    fn from(s: Scalar) -> Self {
        SourceValue::Scalar(s)
    }
}

impl From<bool> for SourceValue {
    fn from(b: bool) -> Self {
        SourceValue::Scalar(Scalar::Bool(b))
    }
}

impl From<i32> for SourceValue {
    fn from(n: i32) -> Self {
        SourceValue::Scalar(Scalar::Int(n as i64))
    }
}

impl From<i64> for SourceValue {
    fn from(n: i64) -> Self {
        SourceValue::Scalar(Scalar::Int(n))
    }
}

impl From<u64> for SourceValue {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(i) => SourceValue::Scalar(Scalar::Int(i)),
            Err(_) => SourceValue::Scalar(Scalar::UInt(n)),
        }
    }
}

impl From<f64> for SourceValue {
    fn from(n: f64) -> Self {
        SourceValue::Scalar(Scalar::Float(n))
    }
}

impl From<&str> for SourceValue {
    fn from(s: &str) -> Self {
        SourceValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<String> for SourceValue {
    fn from(s: String) -> Self {
        SourceValue::Scalar(Scalar::String(s))
    }
}

impl From<FieldMap> for SourceValue {
    fn from(m: FieldMap) -> Self {
        SourceValue::Mapping(m)
    }
}

impl From<Vec<SourceValue>> for SourceValue {
    fn from(items: Vec<SourceValue>) -> Self {
        SourceValue::Sequence(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_scalars_keep_their_kind() {
        assert_eq!(SourceValue::from(json!(5)), SourceValue::Scalar(Scalar::Int(5)));
        assert_eq!(SourceValue::from(json!(-5)), SourceValue::Scalar(Scalar::Int(-5)));
        assert_eq!(
            SourceValue::from(json!(u64::MAX)),
            SourceValue::Scalar(Scalar::UInt(u64::MAX))
        );
        assert_eq!(
            SourceValue::from(json!(2.5)),
            SourceValue::Scalar(Scalar::Float(2.5))
        );
        assert_eq!(
            SourceValue::from(json!("x")),
            SourceValue::Scalar(Scalar::String("x".into()))
        );
        assert_eq!(SourceValue::from(json!(true)), SourceValue::from(true));
        assert_eq!(SourceValue::from(json!(null)), SourceValue::Null);
    }

    #[test]
    fn json_objects_become_mappings() {
        let value = SourceValue::from(json!({
            "name": "a",
            "items": [{"n": 1}, {"n": 2}]
        }));

        let map = value.as_mapping().unwrap();
        assert_eq!(map["name"], SourceValue::from("a"));
        let items = map["items"].as_sequence().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(SourceValue::is_mapping));
    }

    #[test]
    fn shape_names() {
        assert_eq!(SourceValue::Null.shape_name(), "null");
        assert_eq!(SourceValue::from(1i64).shape_name(), "integer");
        assert_eq!(SourceValue::from(1.0).shape_name(), "float");
        assert_eq!(SourceValue::from("s").shape_name(), "string");
        assert_eq!(SourceValue::from(false).shape_name(), "bool");
        assert_eq!(SourceValue::from(FieldMap::new()).shape_name(), "mapping");
        assert_eq!(SourceValue::from(Vec::new()).shape_name(), "sequence");
    }

    #[test]
    fn display_is_diagnostic() {
        assert_eq!(SourceValue::from("text").to_string(), "string \"text\"");
        assert_eq!(SourceValue::from(7i64).to_string(), "integer 7");
        assert_eq!(
            SourceValue::from(vec![SourceValue::Null]).to_string(),
            "sequence of 1 item(s)"
        );
    }

    #[test]
    fn small_unsigned_values_are_ints() {
        assert_eq!(SourceValue::from(3u64), SourceValue::Scalar(Scalar::Int(3)));
    }
}
