//! DynamoDB attribute-value codec.
//!
//! Converts dynamically-typed records into the tagged-union encoding used by
//! DynamoDB on write, and decodes envelopes back into native values on read.

mod attribute;
mod codec;
mod error;

pub use attribute::AttributeValue;
pub use codec::{
    decode, decode_json, decode_many, decode_value, encode, encode_value, stringify,
    EncodedRecord, Record,
};
pub use error::{DecodeError, Result};
