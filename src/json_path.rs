//! Dotted path selection over `serde_json::Value`.
//!
//! Paths are dot separated. A segment that is an unsigned integer indexes
//! into an array, `#` fans the rest of the path out over every element of an
//! array (or yields its length when it is the last segment). Everything else
//! is an object key.

use std::fmt;

use serde_json::Value;

use crate::ConfigValidationError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Each,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn parse(raw: &str) -> Result<Self, ConfigValidationError> {
        if raw.trim().is_empty() {
            return Err(ConfigValidationError::json_path(raw, "path is empty"));
        }

        let segments = raw
            .split('.')
            .map(|segment| match segment {
                "" => Err(ConfigValidationError::json_path(raw, "empty segment")),
                "#" => Ok(Segment::Each),
                key => Ok(Segment::Key(key.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Value at this path, or `None` when any segment is absent
    pub fn select(&self, doc: &Value) -> Option<Value> {
        walk(doc, &self.segments)
    }

    /// Scalar at this path rendered as text
    pub fn select_str(&self, doc: &Value) -> Option<String> {
        self.select(doc).as_ref().and_then(scalar_text)
    }

    /// Number at this path; numeric strings are accepted
    pub fn select_f64(&self, doc: &Value) -> Option<f64> {
        match self.select(doc)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Scalars at this path as a list of text values.
    ///
    /// A single scalar becomes a one element list; absent values, `null` and
    /// objects become an empty list.
    pub fn select_strings(&self, doc: &Value) -> Vec<String> {
        match self.select(doc) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(other) => scalar_text(&other).into_iter().collect(),
            None => Vec::new(),
        }
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn walk(value: &Value, segments: &[Segment]) -> Option<Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(value.clone());
    };

    match head {
        Segment::Each => {
            let items = value.as_array()?;
            if rest.is_empty() {
                return Some(Value::from(items.len()));
            }
            Some(Value::Array(
                items.iter().filter_map(|item| walk(item, rest)).collect(),
            ))
        }
        Segment::Key(key) => {
            let next = match value {
                Value::Object(map) => map.get(key),
                Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
                _ => None,
            }?;
            walk(next, rest)
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
