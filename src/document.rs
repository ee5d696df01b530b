//! Text in, text out: parsing, direction selection and rendering around the converter.

use clap::ValueEnum;
use serde::{ser::Error as _, Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use strum::Display;
use thiserror::Error;

use crate::{convert::Converter, error::ConversionError};

pub const DEFAULT_INDENT: usize = 2;

const SAMPLE_DYNAMO: &str = r#"{
  "name": { "S": "Taro" },
  "age": { "N": "25" },
  "isActive": { "BOOL": true },
  "address": { "NULL": true },
  "hobbies": { "L": [{ "S": "reading" }, { "S": "travel" }] },
  "profile": {
    "M": {
      "bio": { "S": "engineer" },
      "skills": { "L": [{ "S": "Rust" }, { "S": "Docker" }] }
    }
  },
  "tags": { "SS": ["admin", "beta"] },
  "scores": { "NS": ["95", "87.5"] }
}"#;

const SAMPLE_PLAIN: &str = r#"{
  "name": "Hanako",
  "age": 30,
  "isActive": false,
  "address": null,
  "hobbies": ["reading", "travel"],
  "profile": {
    "bio": "engineer",
    "skills": ["Rust", "Docker"]
  }
}"#;

/// Which way a document is converted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Direction {
    /// DynamoDB JSON to plain JSON
    #[default]
    ToPlain,
    /// Plain JSON to DynamoDB JSON
    ToDynamo,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Direction::ToPlain => Direction::ToDynamo,
            Direction::ToDynamo => Direction::ToPlain,
        }
    }

    pub fn input_label(self) -> &'static str {
        match self {
            Direction::ToPlain => "DynamoDB JSON",
            Direction::ToDynamo => "Plain JSON",
        }
    }

    pub fn output_label(self) -> &'static str {
        self.flip().input_label()
    }

    /// A document that converts cleanly in this direction.
    pub fn sample(self) -> &'static str {
        match self {
            Direction::ToPlain => SAMPLE_DYNAMO,
            Direction::ToDynamo => SAMPLE_PLAIN,
        }
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("input is empty")]
    Empty,
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("input is not valid {}: {source}", .direction.input_label())]
    Conversion {
        direction: Direction,
        #[source]
        source: ConversionError,
    },
}

impl DocumentError {
    /// What the user should try next.
    pub fn hint(&self) -> &'static str {
        match self {
            DocumentError::Empty => "Paste or type a JSON document first.",
            DocumentError::Syntax(_) => {
                "The text is not JSON. Check for missing quotes, commas or brackets near the reported line."
            }
            DocumentError::Conversion { .. } => {
                "The JSON is well formed but has the wrong shape for this direction. Check the reported path, or switch the direction."
            }
        }
    }
}

/// Parse raw input text. Surrounding whitespace is ignored.
pub fn parse(input: &str) -> Result<Value, DocumentError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DocumentError::Empty);
    }
    Ok(serde_json::from_str(input)?)
}

pub fn convert(
    document: &Value,
    direction: Direction,
    converter: &Converter,
) -> Result<Value, DocumentError> {
    let converted = match direction {
        Direction::ToPlain => converter.to_plain(document),
        Direction::ToDynamo => converter.to_dynamo(document),
    };

    converted
        .map(Value::Object)
        .map_err(|source| DocumentError::Conversion { direction, source })
}

pub fn convert_text(
    input: &str,
    direction: Direction,
    converter: &Converter,
) -> Result<Value, DocumentError> {
    convert(&parse(input)?, direction, converter)
}

/// Pretty-print with `indent` spaces per level; `0` gives compact single-line JSON.
pub fn render(value: &Value, indent: usize) -> serde_json::Result<String> {
    if indent == 0 {
        return serde_json::to_string(value);
    }

    let indent = " ".repeat(indent);
    let mut serializer =
        Serializer::with_formatter(Vec::new(), PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    String::from_utf8(serializer.into_inner()).map_err(serde_json::Error::custom)
}
