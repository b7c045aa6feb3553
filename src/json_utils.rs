//! Typed field access over untyped `serde_json::Value` documents.
//!
//! Every lookup returns `Result<_, ParseError>` so callers can propagate with `?`
//! and a missing key surfaces as an extraction failure naming that key.

use crate::error::ParseError;
use serde_json::{Map, Value};

/// True if `v` is an object carrying `key` (any value, null included).
#[inline]
pub fn has_field(v: &Value, key: &str) -> bool {
    v.as_object().is_some_and(|m| m.contains_key(key))
}

/// Required key lookup. Null values are returned as-is.
pub fn field<'a>(v: &'a Value, key: &str) -> Result<&'a Value, ParseError> {
    v.get(key).ok_or_else(|| ParseError::MissingField(key.to_string()))
}

pub fn index<'a>(v: &'a Value, key: &str, i: usize) -> Result<&'a Value, ParseError> {
    let arr = array_field(v, key)?;
    arr.get(i).ok_or_else(|| ParseError::MissingIndex { field: key.to_string(), index: i })
}

/// Element `i` of a top-level array document.
pub fn element(v: &Value, i: usize) -> Result<&Value, ParseError> {
    let arr = v.as_array().ok_or_else(|| ParseError::wrong_type("document", "an array"))?;
    arr.get(i).ok_or_else(|| ParseError::MissingIndex { field: "document".to_string(), index: i })
}

pub fn str_field<'a>(v: &'a Value, key: &str) -> Result<&'a str, ParseError> {
    field(v, key)?.as_str().ok_or_else(|| ParseError::wrong_type(key, "a string"))
}

/// Required key whose value may be null.
pub fn opt_str_field<'a>(v: &'a Value, key: &str) -> Result<Option<&'a str>, ParseError> {
    match field(v, key)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(ParseError::wrong_type(key, "a string or null")),
    }
}

pub fn i64_field(v: &Value, key: &str) -> Result<i64, ParseError> {
    field(v, key)?.as_i64().ok_or_else(|| ParseError::wrong_type(key, "an integer"))
}

pub fn f64_field(v: &Value, key: &str) -> Result<f64, ParseError> {
    field(v, key)?.as_f64().ok_or_else(|| ParseError::wrong_type(key, "a number"))
}

pub fn bool_field(v: &Value, key: &str) -> Result<bool, ParseError> {
    field(v, key)?.as_bool().ok_or_else(|| ParseError::wrong_type(key, "a boolean"))
}

/// Epoch timestamps arrive as floats (`1690000000.0`); truncate to whole seconds.
pub fn epoch_field(v: &Value, key: &str) -> Result<i64, ParseError> {
    let n = field(v, key)?;
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    n.as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc() as i64)
        .ok_or_else(|| ParseError::wrong_type(key, "a number"))
}

pub fn array_field<'a>(v: &'a Value, key: &str) -> Result<&'a Vec<Value>, ParseError> {
    field(v, key)?.as_array().ok_or_else(|| ParseError::wrong_type(key, "an array"))
}

pub fn object_field<'a>(v: &'a Value, key: &str) -> Result<&'a Map<String, Value>, ParseError> {
    field(v, key)?.as_object().ok_or_else(|| ParseError::wrong_type(key, "an object"))
}

/// The `data` payload of a `{kind, data}` thing.
#[inline]
pub fn data(v: &Value) -> Result<&Value, ParseError> {
    field(v, "data")
}

/// `data.children` of a listing.
pub fn children(listing: &Value) -> Result<&Vec<Value>, ParseError> {
    array_field(data(listing)?, "children")
}

/// Author identity pair. Both fields disappear when the account was deleted,
/// so if either is absent the pair falls back to `(None, false)`.
pub fn author_identity(v: &Value) -> (Option<String>, bool) {
    match (str_field(v, "author_fullname"), bool_field(v, "author_premium")) {
        (Ok(id), Ok(premium)) => (Some(id.to_string()), premium),
        _ => (None, false),
    }
}
