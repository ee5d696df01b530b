//! Bridges between SDK [`AttributeValue`] items and DynamoDB JSON.
//!
//! Services that fetch items with `aws-sdk-dynamodb` hold them as
//! `HashMap<String, AttributeValue>`. These helpers turn such items into the same
//! tagged JSON the converter reads, and back.

use std::collections::HashMap;

use aws_sdk_dynamodb::{primitives::Blob, types::AttributeValue};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Value};

use crate::{
    attribute::{tagged, Attribute, Tag},
    convert::{Converter, Result},
    error::{ConversionError, Reason},
};

pub type Item = HashMap<String, AttributeValue>;

/// Tagged JSON for one SDK attribute. Binary sets are written as base64 text.
pub fn attribute_to_json(attr: &AttributeValue) -> Result<Value> {
    let json = match attr {
        AttributeValue::S(s) => tagged(Tag::S, Value::String(s.clone())),
        AttributeValue::N(n) => tagged(Tag::N, Value::String(n.clone())),
        AttributeValue::Bool(b) => tagged(Tag::Bool, Value::Bool(*b)),
        AttributeValue::Null(b) => tagged(Tag::Null, Value::Bool(*b)),
        AttributeValue::L(list) => tagged(
            Tag::L,
            Value::Array(
                list.iter()
                    .enumerate()
                    .map(|(i, item)| attribute_to_json(item).map_err(|err| err.within(i).within(Tag::L)))
                    .collect::<Result<_>>()?,
            ),
        ),
        AttributeValue::M(map) => tagged(
            Tag::M,
            Value::Object(item_to_json(map).map_err(|err| err.within(Tag::M))?),
        ),
        AttributeValue::Ss(strings) => tagged(Tag::Ss, strings_to_json(strings)),
        AttributeValue::Ns(numbers) => tagged(Tag::Ns, strings_to_json(numbers)),
        AttributeValue::Bs(blobs) => tagged(
            Tag::Bs,
            Value::Array(
                blobs
                    .iter()
                    .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                    .collect(),
            ),
        ),
        AttributeValue::B(_) => return Err(unsupported("binary (B)")),
        _ => return Err(unsupported("unknown attribute")),
    };

    Ok(json)
}

/// Tagged JSON object for an SDK item, keys sorted for stable output.
pub fn item_to_json(item: &Item) -> Result<Map<String, Value>> {
    let mut keys: Vec<&String> = item.keys().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            attribute_to_json(&item[key])
                .map(|json| (key.clone(), json))
                .map_err(|err| err.within(key))
        })
        .collect()
}

/// SDK attribute for one tagged JSON value.
pub fn json_to_attribute(value: &Value) -> Result<AttributeValue> {
    let attr = match Attribute::parse(value)? {
        Attribute::S(s) => AttributeValue::S(s.to_owned()),
        Attribute::N(n) => AttributeValue::N(n.to_owned()),
        Attribute::Bool(b) => AttributeValue::Bool(b),
        Attribute::Null => AttributeValue::Null(true),
        Attribute::L(items) => AttributeValue::L(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| json_to_attribute(item).map_err(|err| err.within(i).within(Tag::L)))
                .collect::<Result<_>>()?,
        ),
        Attribute::M(entries) => {
            AttributeValue::M(json_to_item(entries).map_err(|err| err.within(Tag::M))?)
        }
        Attribute::Ss(strings) => AttributeValue::Ss(strings.into_iter().map(str::to_owned).collect()),
        Attribute::Ns(numbers) => AttributeValue::Ns(numbers.into_iter().map(str::to_owned).collect()),
        Attribute::Bs(encoded) => AttributeValue::Bs(
            encoded
                .into_iter()
                .enumerate()
                .map(|(i, text)| decode_blob(text).map_err(|err| err.within(i).within(Tag::Bs)))
                .collect::<Result<_>>()?,
        ),
    };

    Ok(attr)
}

/// SDK item for a tagged JSON object.
pub fn json_to_item(entries: &Map<String, Value>) -> Result<Item> {
    entries
        .iter()
        .map(|(key, value)| {
            json_to_attribute(value)
                .map(|attr| (key.clone(), attr))
                .map_err(|err| err.within(key))
        })
        .collect()
}

/// Plain JSON object for an SDK item.
pub fn item_to_plain(item: &Item, converter: &Converter) -> Result<Map<String, Value>> {
    converter.to_plain(&Value::Object(item_to_json(item)?))
}

/// SDK item for a plain JSON object.
pub fn plain_to_item(document: &Value, converter: &Converter) -> Result<Item> {
    json_to_item(&converter.to_dynamo(document)?)
}

fn strings_to_json(strings: &[String]) -> Value {
    Value::Array(strings.iter().cloned().map(Value::String).collect())
}

fn decode_blob(text: &str) -> Result<Blob> {
    STANDARD.decode(text).map(Blob::new).map_err(|_| {
        ConversionError::new(
            Reason::MalformedPayload { tag: Tag::Bs },
            &Value::String(text.to_owned()),
        )
    })
}

fn unsupported(type_name: &'static str) -> ConversionError {
    ConversionError::new(Reason::UnsupportedType { type_name }, &Value::Null)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn sample_item() -> Item {
        HashMap::from([
            ("name".to_string(), AttributeValue::S("Taro".to_string())),
            ("age".to_string(), AttributeValue::N("25".to_string())),
            ("active".to_string(), AttributeValue::Bool(true)),
            ("address".to_string(), AttributeValue::Null(true)),
            (
                "hobbies".to_string(),
                AttributeValue::L(vec![
                    AttributeValue::S("reading".to_string()),
                    AttributeValue::N("3".to_string()),
                ]),
            ),
            (
                "profile".to_string(),
                AttributeValue::M(HashMap::from([(
                    "bio".to_string(),
                    AttributeValue::S("engineer".to_string()),
                )])),
            ),
            (
                "tags".to_string(),
                AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]),
            ),
            (
                "blobs".to_string(),
                AttributeValue::Bs(vec![Blob::new(b"hello".to_vec())]),
            ),
        ])
    }

    #[test]
    fn test_item_to_json() {
        let json = item_to_json(&sample_item()).unwrap();

        assert_eq!(
            Value::Object(json),
            json!({
                "active": {"BOOL": true},
                "address": {"NULL": true},
                "age": {"N": "25"},
                "blobs": {"BS": ["aGVsbG8="]},
                "hobbies": {"L": [{"S": "reading"}, {"N": "3"}]},
                "name": {"S": "Taro"},
                "profile": {"M": {"bio": {"S": "engineer"}}},
                "tags": {"SS": ["a", "b"]},
            })
        );
    }

    #[test]
    fn test_item_keys_are_sorted() {
        let json = item_to_json(&sample_item()).unwrap();
        let keys: Vec<&String> = json.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_json_to_item_round_trip() {
        let item = sample_item();
        let back = json_to_item(&item_to_json(&item).unwrap()).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_item_to_plain() {
        let plain = item_to_plain(&sample_item(), &Converter::default()).unwrap();

        assert_eq!(plain["age"], json!(25));
        assert_eq!(plain["hobbies"], json!(["reading", 3]));
        assert_eq!(plain["profile"], json!({"bio": "engineer"}));
        assert_eq!(plain["blobs"], json!(["aGVsbG8="]));
        assert_eq!(plain["address"], Value::Null);
    }

    #[test]
    fn test_plain_to_item() {
        let item = plain_to_item(
            &json!({"id": "u1", "count": 2, "tags": ["x"]}),
            &Converter::default(),
        )
        .unwrap();

        assert_eq!(item["id"], AttributeValue::S("u1".to_string()));
        assert_eq!(item["count"], AttributeValue::N("2".to_string()));
        assert_eq!(
            item["tags"],
            AttributeValue::L(vec![AttributeValue::S("x".to_string())])
        );
    }

    #[test]
    fn test_binary_scalar_is_unsupported() {
        let error = attribute_to_json(&AttributeValue::B(Blob::new(vec![1, 2]))).unwrap_err();
        assert_eq!(
            error.reason,
            Reason::UnsupportedType {
                type_name: "binary (B)"
            }
        );
    }

    #[test]
    fn test_invalid_base64_in_binary_set() {
        let error = json_to_attribute(&json!({"BS": ["@@@"]})).unwrap_err();
        assert_eq!(error.reason, Reason::MalformedPayload { tag: Tag::Bs });
        assert_eq!(error.path.to_string(), "/BS/0");
    }
}
