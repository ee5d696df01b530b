use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::attribute::Tag;

const EXCERPT_LEN: usize = 80;

/// Why a value could not be converted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Reason {
    #[error("unknown DynamoDB type")]
    UnknownTag,
    #[error("malformed {tag} payload")]
    MalformedPayload { tag: Tag },
    #[error("unparseable number {text:?}")]
    InvalidNumber { text: String },
    #[error("unsupported value type: {type_name}")]
    UnsupportedType { type_name: &'static str },
    #[error("nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

/// A conversion failure, pointing at the offending value inside the input document.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{reason} at {path}: {}", excerpt(.value))]
pub struct ConversionError {
    pub reason: Reason,
    pub path: Pointer,
    pub value: Value,
}

impl ConversionError {
    pub fn new(reason: Reason, value: &Value) -> Self {
        Self {
            reason,
            path: Pointer::default(),
            value: value.clone(),
        }
    }

    pub(crate) fn unsupported(value: &Value) -> Self {
        Self::new(
            Reason::UnsupportedType {
                type_name: kind_of(value),
            },
            value,
        )
    }

    /// Prefix the error path with one more segment, walking back towards the root.
    pub(crate) fn within(mut self, segment: impl fmt::Display) -> Self {
        self.path.0.insert(0, segment.to_string());
        self
    }
}

/// JSON Pointer (RFC 6901) into the input document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pointer(Vec<String>);

impl Pointer {
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.0 {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn excerpt(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= EXCERPT_LEN {
        return text;
    }
    let mut short: String = text.chars().take(EXCERPT_LEN).collect();
    short.push_str("...");
    short
}
