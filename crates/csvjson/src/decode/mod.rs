//! Decoding pipeline: value scanner, container grammar, row and document layers.

pub mod composite;
pub mod document;
pub mod row;
pub mod scanner;
