//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by a [`Row`](super::Row) field.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | boolean | `Bool` |
/// | integer | `Int` |
/// | other number | `Float` |
/// | RFC 3339 string | `DateTime` |
/// | string | `String` |
/// | array, object | `Json` |
///
/// # Example
///
/// ```
/// use grouped_table::model::Value;
///
/// let street = Value::from("Baker Street");
/// let door = Value::from(221i64);
/// let empty = Value::Null;
/// assert_eq!(empty.to_string(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// String value.
    String(String),
    /// Fallback for arrays and objects.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::DateTime(_) => "datetime",
            Value::String(_) => "string",
            Value::Json(_) => "json",
        }
    }

    /// Relational comparison between two values.
    ///
    /// Numbers compare with numbers (integers and floats cross-compare),
    /// strings lexicographically, booleans as `false < true` and datetimes
    /// chronologically. Every other pairing (mixed types, nulls, JSON, NaN)
    /// is unordered and returns `None`.
    pub fn native_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => int_float_cmp(*a, *b),
            (Value::Float(a), Value::Int(b)) => int_float_cmp(*b, *a).map(Ordering::reverse),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Exact comparison of an integer with a float. Casting the integer to `f64`
/// rounds above 2^53 and would break transitivity.
fn int_float_cmp(int: i64, float: f64) -> Option<Ordering> {
    // 2^63, exactly representable.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if float.is_nan() {
        return None;
    }
    if float >= BOUND {
        return Some(Ordering::Less);
    }
    if float < -BOUND {
        return Some(Ordering::Greater);
    }
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => whole.partial_cmp(&float),
        ordering => Some(ordering),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::DateTime(v) => write!(f, "{}", v.to_rfc3339()),
            Value::String(v) => f.write_str(v),
            Value::Json(v) => write!(f, "{v}"),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n
                    .as_f64()
                    .map(Value::Float)
                    .unwrap_or_else(|| Value::Json(n.into())),
            },
            serde_json::Value::String(s) => match DateTime::parse_from_rfc3339(&s) {
                Ok(dt) => Value::DateTime(dt.with_timezone(&Utc)),
                Err(_) => Value::String(s),
            },
            other => Value::Json(other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}
