#![doc = include_str!("../README.md")]

pub mod decode;
pub mod error;
pub mod options;
pub mod value;

mod number;

pub use crate::decode::document::Document;
pub use crate::error::{ContainerKind, Error, HeaderError, Result, ScanError, ScanErrorKind};
pub use crate::options::{Options, ScanMode};
pub use crate::value::{Entry, Number, Record, Row, Value};

use std::io::{BufRead, BufReader, Read};

#[cfg(feature = "json")]
use serde::de::DeserializeOwned;

/// Lazily decode a document from any buffered line source.
pub fn documents<R: BufRead>(reader: R, options: &Options) -> Document<R> {
    Document::new(reader, options)
}

/// Decode a whole in-memory document.
pub fn decode_from_str(s: &str, options: &Options) -> Result<Vec<Entry>> {
    documents(s.as_bytes(), options).collect()
}

/// Decode a whole document from a reader.
pub fn decode_from_reader<R: Read>(reader: R, options: &Options) -> Result<Vec<Entry>> {
    documents(BufReader::new(reader), options).collect()
}

/// Decode each entry into a concrete type via serde.
///
/// Records map to structs or maps; in headerless mode rows map to sequences.
#[cfg(feature = "json")]
pub fn decode_records_from_str<T: DeserializeOwned>(s: &str, options: &Options) -> Result<Vec<T>> {
    documents(s.as_bytes(), options)
        .map(|entry| {
            let value = serde_json::Value::from(entry?);
            Ok(serde_json::from_value(value)?)
        })
        .collect()
}
