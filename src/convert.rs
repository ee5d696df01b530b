//! Conversion between DynamoDB JSON and plain JSON.
//!
//! Both directions are a depth-first walk: the object drivers map every key
//! through the single-value converter, which recurses into `L`/`M` (or arrays and
//! objects on the plain side). The first failure aborts the whole call.

use serde_json::{Map, Value};

use crate::{
    attribute::{tagged, Attribute, Tag},
    error::{ConversionError, Reason},
    number,
};

/// Default limit on `L`/`M` nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub type Result<T> = std::result::Result<T, ConversionError>;

/// Conversion settings. Stateless between calls, so one value can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Converter {
    max_depth: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// DynamoDB JSON object -> plain JSON object.
    pub fn to_plain(&self, document: &Value) -> Result<Map<String, Value>> {
        match document {
            Value::Object(item) => self.item_to_plain(item, 0),
            other => Err(ConversionError::unsupported(other)),
        }
    }

    /// Plain JSON object -> DynamoDB JSON object.
    pub fn to_dynamo(&self, document: &Value) -> Result<Map<String, Value>> {
        match document {
            Value::Object(entries) => self.item_to_dynamo(entries, 0),
            other => Err(ConversionError::unsupported(other)),
        }
    }

    /// Convert one tagged value, e.g. `{"N": "25"}` -> `25`.
    pub fn value_to_plain(&self, value: &Value) -> Result<Value> {
        self.plain_value(value, 0)
    }

    /// Convert one plain value, e.g. `25` -> `{"N": "25"}`.
    pub fn value_to_dynamo(&self, value: &Value) -> Result<Value> {
        self.dynamo_value(value, 0)
    }

    fn item_to_plain(&self, item: &Map<String, Value>, depth: usize) -> Result<Map<String, Value>> {
        item.iter()
            .map(|(key, value)| {
                self.plain_value(value, depth)
                    .map(|plain| (key.clone(), plain))
                    .map_err(|err| err.within(key))
            })
            .collect()
    }

    /// `depth` counts the lists and maps enclosing `value`.
    fn plain_value(&self, value: &Value, depth: usize) -> Result<Value> {
        let attribute = Attribute::parse(value)?;
        if matches!(attribute, Attribute::L(_) | Attribute::M(_)) {
            self.check_depth(value, depth + 1)?;
        }

        let plain = match attribute {
            Attribute::S(s) => Value::String(s.to_owned()),
            Attribute::N(text) => parse_number(text, value).map_err(|err| err.within(Tag::N))?,
            Attribute::Bool(b) => Value::Bool(b),
            Attribute::Null => Value::Null,
            Attribute::L(items) => Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| {
                        self.plain_value(item, depth + 1)
                            .map_err(|err| err.within(i).within(Tag::L))
                    })
                    .collect::<Result<_>>()?,
            ),
            Attribute::M(entries) => Value::Object(
                self.item_to_plain(entries, depth + 1)
                    .map_err(|err| err.within(Tag::M))?,
            ),
            Attribute::Ss(strings) | Attribute::Bs(strings) => {
                Value::Array(strings.into_iter().map(|s| Value::String(s.to_owned())).collect())
            }
            Attribute::Ns(numbers) => Value::Array(
                numbers
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| {
                        parse_number(text, &Value::String(text.to_owned()))
                            .map_err(|err| err.within(i).within(Tag::Ns))
                    })
                    .collect::<Result<_>>()?,
            ),
        };

        Ok(plain)
    }

    fn item_to_dynamo(&self, entries: &Map<String, Value>, depth: usize) -> Result<Map<String, Value>> {
        entries
            .iter()
            .map(|(key, value)| {
                self.dynamo_value(value, depth)
                    .map(|tagged| (key.clone(), tagged))
                    .map_err(|err| err.within(key))
            })
            .collect()
    }

    fn dynamo_value(&self, value: &Value, depth: usize) -> Result<Value> {
        if value.is_array() || value.is_object() {
            self.check_depth(value, depth + 1)?;
        }

        let dynamo = match value {
            Value::Null => tagged(Tag::Null, Value::Bool(true)),
            Value::Bool(b) => tagged(Tag::Bool, Value::Bool(*b)),
            Value::Number(n) => tagged(Tag::N, Value::String(number::format(n))),
            Value::String(s) => tagged(Tag::S, Value::String(s.clone())),
            Value::Array(items) => tagged(
                Tag::L,
                Value::Array(
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| self.dynamo_value(item, depth + 1).map_err(|err| err.within(i)))
                        .collect::<Result<_>>()?,
                ),
            ),
            Value::Object(entries) => {
                tagged(Tag::M, Value::Object(self.item_to_dynamo(entries, depth + 1)?))
            }
        };

        Ok(dynamo)
    }

    /// `nesting` is the container level `value` would open.
    fn check_depth(&self, value: &Value, nesting: usize) -> Result<()> {
        if nesting > self.max_depth {
            return Err(ConversionError::new(
                Reason::DepthExceeded {
                    limit: self.max_depth,
                },
                value,
            ));
        }
        Ok(())
    }
}

fn parse_number(text: &str, value: &Value) -> Result<Value> {
    number::parse(text).map(Value::Number).ok_or_else(|| {
        ConversionError::new(
            Reason::InvalidNumber {
                text: text.to_owned(),
            },
            value,
        )
    })
}

/// [`Converter::to_plain`] with default settings.
pub fn to_plain(document: &Value) -> Result<Map<String, Value>> {
    Converter::default().to_plain(document)
}

/// [`Converter::to_dynamo`] with default settings.
pub fn to_dynamo(document: &Value) -> Result<Map<String, Value>> {
    Converter::default().to_dynamo(document)
}

/// [`Converter::value_to_plain`] with default settings.
pub fn value_to_plain(value: &Value) -> Result<Value> {
    Converter::default().value_to_plain(value)
}

/// [`Converter::value_to_dynamo`] with default settings.
pub fn value_to_dynamo(value: &Value) -> Result<Value> {
    Converter::default().value_to_dynamo(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_to_plain_scalars() {
        let input = json!({
            "name": {"S": "Taro"},
            "age": {"N": "25"},
            "isActive": {"BOOL": true},
            "address": {"NULL": true},
        });

        assert_eq!(
            to_plain(&input).unwrap(),
            object(json!({
                "name": "Taro",
                "age": 25,
                "isActive": true,
                "address": null,
            }))
        );
    }

    #[test]
    fn test_to_plain_nested() {
        let input = json!({
            "hobbies": {"L": [{"S": "reading"}, {"S": "travel"}]},
            "profile": {"M": {
                "bio": {"S": "engineer"},
                "score": {"N": "95"},
                "skills": {"L": [{"S": "Rust"}, {"S": "Docker"}]},
            }},
        });

        assert_eq!(
            to_plain(&input).unwrap(),
            object(json!({
                "hobbies": ["reading", "travel"],
                "profile": {
                    "bio": "engineer",
                    "score": 95,
                    "skills": ["Rust", "Docker"],
                },
            }))
        );
    }

    #[test]
    fn test_to_plain_sets_become_arrays() {
        let input = json!({
            "tags": {"SS": ["a", "b"]},
            "scores": {"NS": ["1", "2.5", "-3"]},
            "blobs": {"BS": ["aGVsbG8="]},
        });

        assert_eq!(
            to_plain(&input).unwrap(),
            object(json!({
                "tags": ["a", "b"],
                "scores": [1, 2.5, -3],
                "blobs": ["aGVsbG8="],
            }))
        );
    }

    #[test]
    fn test_null_payload_is_ignored() {
        assert_eq!(value_to_plain(&json!({"NULL": true})).unwrap(), Value::Null);
        assert_eq!(value_to_plain(&json!({"NULL": false})).unwrap(), Value::Null);
    }

    #[test]
    fn test_number_types_flip() {
        assert_eq!(value_to_plain(&json!({"N": "25"})).unwrap(), json!(25));
        assert_eq!(value_to_dynamo(&json!(25)).unwrap(), json!({"N": "25"}));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_plain(&json!({})).unwrap(), Map::new());
        assert_eq!(to_dynamo(&json!({})).unwrap(), Map::new());
        assert_eq!(
            to_dynamo(&json!({"list": []})).unwrap(),
            object(json!({"list": {"L": []}}))
        );
        assert_eq!(
            to_plain(&json!({"list": {"L": []}, "map": {"M": {}}})).unwrap(),
            object(json!({"list": [], "map": {}}))
        );
    }

    #[test]
    fn test_to_dynamo_scalars() {
        let input = json!({
            "name": "Hanako",
            "age": 30,
            "ratio": -0.5,
            "isActive": false,
            "address": null,
        });

        assert_eq!(
            to_dynamo(&input).unwrap(),
            object(json!({
                "name": {"S": "Hanako"},
                "age": {"N": "30"},
                "ratio": {"N": "-0.5"},
                "isActive": {"BOOL": false},
                "address": {"NULL": true},
            }))
        );
    }

    #[test]
    fn test_to_dynamo_nested() {
        let input = json!({"profile": {"bio": "x", "score": 1}});

        assert_eq!(
            to_dynamo(&input).unwrap(),
            object(json!({
                "profile": {"M": {"bio": {"S": "x"}, "score": {"N": "1"}}}
            }))
        );
    }

    #[test]
    fn test_arrays_never_become_sets() {
        assert_eq!(
            value_to_dynamo(&json!(["a", "b"])).unwrap(),
            json!({"L": [{"S": "a"}, {"S": "b"}]})
        );

        let set = json!({"tags": {"SS": ["a", "b"]}});
        let back = to_dynamo(&Value::Object(to_plain(&set).unwrap())).unwrap();
        assert_eq!(
            back,
            object(json!({"tags": {"L": [{"S": "a"}, {"S": "b"}]}}))
        );
    }

    #[test]
    fn test_null_always_converts_with_true_flag() {
        assert_eq!(value_to_dynamo(&Value::Null).unwrap(), json!({"NULL": true}));
    }

    #[test]
    fn test_round_trip_from_plain() {
        let plain = json!({
            "name": "Hanako",
            "age": 30,
            "balance": -12.75,
            "big": 9007199254740993u64,
            "isActive": false,
            "nothing": null,
            "matrix": [[1, 2], [], ["x", null, true]],
            "nested": {"deeper": {"deepest": {"empty": {}}}},
        });

        let dynamo = to_dynamo(&plain).unwrap();
        let back = to_plain(&Value::Object(dynamo)).unwrap();
        assert_eq!(Value::Object(back), plain);
    }

    #[test]
    fn test_round_trip_from_dynamo() {
        let dynamo = json!({
            "name": {"S": "Taro"},
            "age": {"N": "25"},
            "ratio": {"N": "0.125"},
            "isActive": {"BOOL": true},
            "address": {"NULL": true},
            "items": {"L": [{"N": "-1"}, {"M": {"k": {"S": "v"}}}, {"L": []}]},
        });

        let plain = to_plain(&dynamo).unwrap();
        let back = to_dynamo(&Value::Object(plain)).unwrap();
        assert_eq!(Value::Object(back), dynamo);
    }

    #[test]
    fn test_key_order_is_preserved() {
        let input = json!({"zeta": {"S": "z"}, "alpha": {"S": "a"}, "mid": {"S": "m"}});
        let keys: Vec<String> = to_plain(&input).unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_unknown_tag_fails() {
        let error = value_to_plain(&json!({"FOO": 1})).unwrap_err();
        assert_eq!(error.reason, Reason::UnknownTag);
        assert_eq!(error.value, json!({"FOO": 1}));
    }

    #[test]
    fn test_unparseable_number_fails() {
        let error = value_to_plain(&json!({"N": "not-a-number"})).unwrap_err();
        assert_eq!(
            error.reason,
            Reason::InvalidNumber {
                text: "not-a-number".to_string()
            }
        );
        assert_eq!(error.path.to_string(), "/N");
    }

    #[test]
    fn test_error_path_points_into_input() {
        let input = json!({
            "profile": {"M": {"scores": {"NS": ["1", "two"]}}},
        });

        let error = to_plain(&input).unwrap_err();
        assert_eq!(error.path.to_string(), "/profile/M/scores/NS/1");
        assert_eq!(error.value, json!("two"));
    }

    #[test]
    fn test_error_inside_list() {
        let input = json!({"items": {"L": [{"S": "ok"}, {"X": "bad"}]}});

        let error = to_plain(&input).unwrap_err();
        assert_eq!(error.reason, Reason::UnknownTag);
        assert_eq!(error.path.to_string(), "/items/L/1");
    }

    #[test]
    fn test_top_level_must_be_an_object() {
        for document in [json!([1, 2]), json!("text"), json!(null)] {
            let error = to_dynamo(&document).unwrap_err();
            assert!(matches!(error.reason, Reason::UnsupportedType { .. }));
            assert!(to_plain(&document).is_err());
        }

        let error = to_plain(&json!(42)).unwrap_err();
        assert_eq!(
            error.reason,
            Reason::UnsupportedType {
                type_name: "number"
            }
        );
    }

    #[test]
    fn test_depth_limit() {
        let converter = Converter::new().with_max_depth(2);
        assert_eq!(converter.max_depth(), 2);

        let shallow = json!({"a": [[1]]});
        assert!(converter.to_dynamo(&shallow).is_ok());

        let deep = json!({"a": [[[1]]]});
        let error = converter.to_dynamo(&deep).unwrap_err();
        assert_eq!(error.reason, Reason::DepthExceeded { limit: 2 });
        assert_eq!(error.path.to_string(), "/a/0/0");

        let deep_dynamo = json!({"a": {"L": [{"L": [{"L": [{"N": "1"}]}]}]}});
        let error = converter.to_plain(&deep_dynamo).unwrap_err();
        assert_eq!(error.reason, Reason::DepthExceeded { limit: 2 });
        assert_eq!(error.path.to_string(), "/a/L/0/L/0");
    }

    #[test]
    fn test_depth_limit_counts_containers_not_leaves() {
        let converter = Converter::new().with_max_depth(2);

        // Three nested containers fail whether or not the innermost one is empty.
        for deep in [json!({"a": [[[]]]}), json!({"a": [[[1]]]}), json!({"a": [[{}]]})] {
            let error = converter.to_dynamo(&deep).unwrap_err();
            assert_eq!(error.reason, Reason::DepthExceeded { limit: 2 }, "{deep}");
        }
        assert!(converter
            .to_plain(&json!({"a": {"L": [{"L": [{"L": []}]}]}}))
            .is_err());

        // Two containers with leaves inside sit exactly at the limit.
        assert!(converter.to_dynamo(&json!({"a": [[]], "b": {"c": [1]}})).is_ok());
        assert!(converter
            .to_plain(&json!({"a": {"M": {"b": {"L": [{"S": "x"}]}}}}))
            .is_ok());

        // Sets are leaves.
        assert!(Converter::new()
            .with_max_depth(0)
            .to_plain(&json!({"tags": {"SS": ["x"]}, "n": {"N": "1"}}))
            .is_ok());
    }
}
