//! Value scanner: recognizes one JSON-like literal at a position in a row.
//!
//! The grammar is JSON's, with the CSV-specific extensions: an empty element
//! slot (a `,` or `]` directly at the scan position) is `null`, the keywords
//! `null`/`true`/`false` match case-insensitively, and `NaN`, `Infinity`,
//! and `-Infinity` are accepted after the numeric-literal attempt. Container
//! values are dispatched to [`composite`](crate::decode::composite) in
//! unrestricted mode and rejected in restricted mode.

use std::collections::HashMap;

use crate::decode::composite;
use crate::error::{ContainerKind, ScanError, ScanErrorKind};
use crate::options::ScanMode;
use crate::value::{Number, Value};

/// Scans one row's worth of text.
///
/// A scanner is built fresh per row; the object-key memo it owns never
/// outlives the row, so no interned state leaks between rows.
pub struct Scanner<'a> {
    text: &'a str,
    mode: ScanMode,
    pub(crate) memo: HashMap<&'a str, String>,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str, mode: ScanMode) -> Self {
        Self {
            text,
            mode,
            memo: HashMap::new(),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Scan a single value starting at byte offset `pos`.
    ///
    /// Returns the value and the offset one past its final byte. Separators
    /// are never consumed: an empty element slot yields `Null` with `pos`
    /// unchanged, and literal or numeric tokens leave the following `,` or
    /// `]` for the caller.
    pub fn scan_value(&mut self, pos: usize) -> Result<(Value, usize), ScanError> {
        let Some(&b) = self.text.as_bytes().get(pos) else {
            return Err(ScanError::new(pos, ScanErrorKind::UnexpectedEnd));
        };
        match b {
            b'"' => {
                let (s, next) = composite::parse_string(self.text, pos + 1)?;
                Ok((Value::String(s), next))
            }
            b'{' => match self.mode {
                ScanMode::Unrestricted => {
                    let (pairs, next) = composite::parse_object(self, pos + 1)?;
                    Ok((Value::Object(pairs), next))
                }
                ScanMode::Restricted => Err(ScanError::new(
                    pos,
                    ScanErrorKind::ContainerNotPermitted(ContainerKind::Object),
                )),
            },
            b'[' => match self.mode {
                ScanMode::Unrestricted => {
                    let (elements, next) = composite::parse_array(self, pos + 1)?;
                    Ok((Value::Array(elements), next))
                }
                ScanMode::Restricted => Err(ScanError::new(
                    pos,
                    ScanErrorKind::ContainerNotPermitted(ContainerKind::Array),
                )),
            },
            b',' | b']' => Ok((Value::Null, pos)),
            _ => self.scan_literal(pos),
        }
    }

    fn scan_literal(&self, pos: usize) -> Result<(Value, usize), ScanError> {
        if matches_keyword(self.text, pos, "null") {
            return Ok((Value::Null, pos + 4));
        }
        if matches_keyword(self.text, pos, "true") {
            return Ok((Value::Bool(true), pos + 4));
        }
        if matches_keyword(self.text, pos, "false") {
            return Ok((Value::Bool(false), pos + 5));
        }
        if let Some(scanned) = match_number(self.text, pos) {
            return Ok(scanned);
        }
        for (literal, constant) in [
            ("NaN", f64::NAN),
            ("Infinity", f64::INFINITY),
            ("-Infinity", f64::NEG_INFINITY),
        ] {
            if self
                .text
                .as_bytes()
                .get(pos..pos + literal.len())
                .is_some_and(|span| span == literal.as_bytes())
            {
                return Ok((Value::Number(Number::F64(constant)), pos + literal.len()));
            }
        }
        Err(ScanError::new(pos, ScanErrorKind::UnexpectedToken))
    }
}

fn matches_keyword(text: &str, pos: usize, keyword: &str) -> bool {
    text.as_bytes()
        .get(pos..pos + keyword.len())
        .is_some_and(|span| span.eq_ignore_ascii_case(keyword.as_bytes()))
}

/// Longest prefix of `text[pos..]` forming a JSON numeric literal:
/// `-? (0 | [1-9][0-9]*) (\.[0-9]+)? ([eE][+-]?[0-9]+)?`.
///
/// A fraction or exponent makes the value a float; plain integers parse as
/// i64/u64 by sign, falling back to f64 on overflow.
fn match_number(text: &str, pos: usize) -> Option<(Value, usize)> {
    let bytes = text.as_bytes();
    let mut i = pos;
    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            i += 1;
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return None,
    }
    let mut fractional = false;
    if bytes.get(i) == Some(&b'.') && matches!(bytes.get(i + 1), Some(b'0'..=b'9')) {
        fractional = true;
        i += 2;
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if matches!(bytes.get(j), Some(b'0'..=b'9')) {
            fractional = true;
            while matches!(bytes.get(j), Some(b'0'..=b'9')) {
                j += 1;
            }
            i = j;
        }
    }

    let token = &text[pos..i];
    let number = if fractional {
        Number::F64(token.parse().ok()?)
    } else if token.starts_with('-') {
        match token.parse::<i64>() {
            Ok(v) => Number::I64(v),
            Err(_) => Number::F64(token.parse().ok()?),
        }
    } else {
        match token.parse::<u64>() {
            Ok(v) => Number::U64(v),
            Err(_) => Number::F64(token.parse().ok()?),
        }
    };
    Some((Value::Number(number), i))
}
