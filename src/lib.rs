//! # dynojson
//!
//! Converts between DynamoDB's tagged JSON wire format and plain JSON.
//!
//! ```
//! use serde_json::json;
//!
//! let plain = dynojson::to_plain(&json!({
//!     "name": {"S": "Taro"},
//!     "age": {"N": "25"},
//!     "tags": {"SS": ["a", "b"]},
//! }))
//! .unwrap();
//! assert_eq!(plain["age"], json!(25));
//! assert_eq!(plain["tags"], json!(["a", "b"]));
//!
//! let dynamo = dynojson::to_dynamo(&json!({"profile": {"bio": "x", "score": 1}})).unwrap();
//! assert_eq!(
//!     dynamo["profile"],
//!     json!({"M": {"bio": {"S": "x"}, "score": {"N": "1"}}})
//! );
//! ```
//!
//! Sets (`SS`, `NS`, `BS`) flatten to plain arrays, and plain arrays always come
//! back as lists (`L`), so sets do not survive a round trip through plain JSON.
//!
//! ## Modules
//!
//! - [`mod@convert`] - the two converters and their depth-limited settings
//! - [`mod@attribute`] - validated view over one tagged value
//! - [`mod@document`] - parsing and rendering text around the converters
//! - [`mod@sdk`] - bridges to `aws-sdk-dynamodb` items

pub mod attribute;
pub mod convert;
pub mod document;
pub mod error;
pub mod number;
pub mod sdk;

pub use convert::{to_dynamo, to_plain, value_to_dynamo, value_to_plain, Converter};
pub use document::{Direction, DocumentError};
pub use error::{ConversionError, Reason};
