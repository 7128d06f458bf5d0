//! Row tokenizing and header resolution.

use crate::decode::composite;
use crate::decode::scanner::Scanner;
use crate::error::{HeaderError, ScanError, ScanErrorKind};
use crate::options::ScanMode;
use crate::value::Value;

/// Tokenize one line as the body of an implicit top-level array.
///
/// The trimmed line is wrapped as `[<line>]` and driven through the array
/// grammar, with the value scanner in the requested mode supplying elements.
/// Error positions are remapped to columns in the trimmed line.
pub fn tokenize_row(line: &str, mode: ScanMode) -> Result<Vec<Value>, ScanError> {
    let trimmed = line.trim();
    let mut wrapped = String::with_capacity(trimmed.len() + 2);
    wrapped.push('[');
    wrapped.push_str(trimmed);
    wrapped.push(']');

    let mut scanner = Scanner::new(&wrapped, mode);
    let (values, end) = composite::parse_array(&mut scanner, 1).map_err(unwrap_column)?;
    if end != wrapped.len() {
        // `end` sits just past the `]` that closed the array early; point at
        // that byte in source-line columns.
        return Err(ScanError::new(
            end.saturating_sub(2),
            ScanErrorKind::TrailingCharacters,
        ));
    }
    Ok(values)
}

/// Shift a position in the `[`-wrapped text back to the source line.
fn unwrap_column(e: ScanError) -> ScanError {
    ScanError::new(e.pos.saturating_sub(1), e.kind)
}

/// Resolve the header line to an ordered list of field names.
///
/// Entries must be uniformly bare strings, or uniformly descriptor objects
/// carrying a string `"field"` entry; other keys of a descriptor (`"type"`
/// and friends) are ignored.
pub fn resolve_header(line: &str) -> Result<Vec<String>, HeaderError> {
    // Descriptor objects require container support even when data rows are
    // scanned restricted.
    let entries = tokenize_row(line, ScanMode::Unrestricted)?;

    if entries.iter().all(|e| matches!(e, Value::Object(_))) {
        let mut names = Vec::with_capacity(entries.len());
        for entry in &entries {
            let Value::Object(pairs) = entry else {
                unreachable!()
            };
            let field = pairs.iter().find(|(k, _)| k == "field");
            match field {
                Some((_, Value::String(name))) => names.push(name.clone()),
                Some(_) => {
                    return Err(HeaderError::Invalid(
                        "header descriptor \"field\" must be a string",
                    ));
                }
                None => {
                    return Err(HeaderError::Invalid(
                        "header descriptor is missing a \"field\" name",
                    ));
                }
            }
        }
        return Ok(names);
    }

    if entries.iter().all(|e| matches!(e, Value::String(_))) {
        return Ok(entries
            .into_iter()
            .map(|e| match e {
                Value::String(s) => s,
                _ => unreachable!(),
            })
            .collect());
    }

    Err(HeaderError::Invalid(
        "all terms in the header should be strings or json-objects",
    ))
}
