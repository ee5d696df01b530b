//! Validated view over a single DynamoDB tagged value.

use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{ConversionError, Reason};

/// DynamoDB type tags, declared in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
pub enum Tag {
    S,
    N,
    #[strum(serialize = "BOOL")]
    Bool,
    #[strum(serialize = "NULL")]
    Null,
    L,
    M,
    #[strum(serialize = "SS")]
    Ss,
    #[strum(serialize = "NS")]
    Ns,
    #[strum(serialize = "BS")]
    Bs,
}

/// A DynamoDB value borrowed from its JSON wire form.
///
/// Only [`Attribute::parse`] builds one, so a held `Attribute` always has exactly
/// one recognized tag with a payload of the right JSON kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute<'a> {
    S(&'a str),
    N(&'a str),
    Bool(bool),
    Null,
    L(&'a [Value]),
    M(&'a Map<String, Value>),
    Ss(Vec<&'a str>),
    Ns(Vec<&'a str>),
    Bs(Vec<&'a str>),
}

impl<'a> Attribute<'a> {
    /// Read the first recognized tag of `value`, in [`Tag`] priority order.
    pub fn parse(value: &'a Value) -> Result<Self, ConversionError> {
        let Value::Object(map) = value else {
            return Err(ConversionError::new(Reason::UnknownTag, value));
        };

        let Some((tag, payload)) = Tag::iter().find_map(|tag| map.get(tag.as_ref()).map(|p| (tag, p))) else {
            return Err(ConversionError::new(Reason::UnknownTag, value));
        };

        let attribute = match (tag, payload) {
            (Tag::S, Value::String(s)) => Some(Attribute::S(s)),
            (Tag::N, Value::String(n)) => Some(Attribute::N(n)),
            (Tag::Bool, Value::Bool(b)) => Some(Attribute::Bool(*b)),
            // Presence of the tag means null, whatever the flag says.
            (Tag::Null, Value::Bool(_)) => Some(Attribute::Null),
            (Tag::L, Value::Array(items)) => Some(Attribute::L(items)),
            (Tag::M, Value::Object(entries)) => Some(Attribute::M(entries)),
            (Tag::Ss, Value::Array(items)) => strings(items).map(Attribute::Ss),
            (Tag::Ns, Value::Array(items)) => strings(items).map(Attribute::Ns),
            (Tag::Bs, Value::Array(items)) => strings(items).map(Attribute::Bs),
            _ => None,
        };

        attribute.ok_or_else(|| {
            ConversionError::new(Reason::MalformedPayload { tag }, payload).within(tag)
        })
    }

    pub fn tag(&self) -> Tag {
        match self {
            Attribute::S(_) => Tag::S,
            Attribute::N(_) => Tag::N,
            Attribute::Bool(_) => Tag::Bool,
            Attribute::Null => Tag::Null,
            Attribute::L(_) => Tag::L,
            Attribute::M(_) => Tag::M,
            Attribute::Ss(_) => Tag::Ss,
            Attribute::Ns(_) => Tag::Ns,
            Attribute::Bs(_) => Tag::Bs,
        }
    }
}

/// Wrap `payload` in a single-key object named after `tag`.
pub fn tagged(tag: Tag, payload: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(tag.to_string(), payload);
    Value::Object(map)
}

fn strings(items: &[Value]) -> Option<Vec<&str>> {
    items.iter().map(Value::as_str).collect()
}
