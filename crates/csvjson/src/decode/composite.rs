//! JSON container grammar: strings, objects, and arrays.
//!
//! Element values inside containers come from the row's [`Scanner`], which
//! keeps the CSV-specific scalar rules in one place while the grammar here
//! stays plain JSON. Object keys are memoized on the scanner so repeated
//! escaped keys within one row are unescaped once.

use crate::decode::scanner::Scanner;
use crate::error::{ScanError, ScanErrorKind};
use crate::value::{Value, insert_pair};

pub(crate) fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while matches!(bytes.get(pos), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        pos += 1;
    }
    pos
}

/// Find the closing quote of a string whose opening quote sits at `pos - 1`.
///
/// Returns the index of the closing quote and whether any escape sequences
/// were seen on the way.
fn scan_string_span(text: &str, pos: usize) -> Result<(usize, bool), ScanError> {
    let bytes = text.as_bytes();
    let mut has_escapes = false;
    let mut i = pos;
    loop {
        #[cfg(feature = "perf_memchr")]
        let found = memchr::memchr2(b'"', b'\\', &bytes[i..]).map(|rel| i + rel);
        #[cfg(not(feature = "perf_memchr"))]
        let found = bytes[i..]
            .iter()
            .position(|&b| b == b'"' || b == b'\\')
            .map(|rel| i + rel);
        match found {
            None => {
                return Err(ScanError::new(
                    pos.saturating_sub(1),
                    ScanErrorKind::UnterminatedString,
                ));
            }
            Some(idx) if bytes[idx] == b'"' => return Ok((idx, has_escapes)),
            Some(idx) => {
                if idx + 2 > bytes.len() {
                    return Err(ScanError::new(
                        pos.saturating_sub(1),
                        ScanErrorKind::UnterminatedString,
                    ));
                }
                has_escapes = true;
                i = idx + 2;
            }
        }
    }
}

/// Parse a string body starting just after its opening quote.
pub(crate) fn parse_string(text: &str, pos: usize) -> Result<(String, usize), ScanError> {
    let (end, has_escapes) = scan_string_span(text, pos)?;
    let raw = &text[pos..end];
    if let Some(i) = raw.bytes().position(|b| b < 0x20) {
        return Err(ScanError::new(pos + i, ScanErrorKind::ControlCharacter));
    }
    let s = if has_escapes {
        decode_escapes(raw, pos)?
    } else {
        raw.to_string()
    };
    Ok((s, end + 1))
}

/// Like [`parse_string`], but consults the scanner's per-row key memo so a
/// key that repeats across the row's objects is unescaped only once.
fn parse_key<'a>(scanner: &mut Scanner<'a>, pos: usize) -> Result<(String, usize), ScanError> {
    let text = scanner.text();
    let (end, has_escapes) = scan_string_span(text, pos)?;
    let raw = &text[pos..end];
    if let Some(i) = raw.bytes().position(|b| b < 0x20) {
        return Err(ScanError::new(pos + i, ScanErrorKind::ControlCharacter));
    }
    if !has_escapes {
        return Ok((raw.to_string(), end + 1));
    }
    if let Some(cached) = scanner.memo.get(raw) {
        return Ok((cached.clone(), end + 1));
    }
    let key = decode_escapes(raw, pos)?;
    scanner.memo.insert(raw, key.clone());
    Ok((key, end + 1))
}

/// Parse array elements starting just after the opening bracket.
pub(crate) fn parse_array<'a>(
    scanner: &mut Scanner<'a>,
    mut pos: usize,
) -> Result<(Vec<Value>, usize), ScanError> {
    let bytes = scanner.text().as_bytes();
    pos = skip_whitespace(bytes, pos);
    if bytes.get(pos) == Some(&b']') {
        return Ok((Vec::new(), pos + 1));
    }
    let mut elements = Vec::new();
    loop {
        let (value, next) = scanner.scan_value(pos)?;
        elements.push(value);
        pos = skip_whitespace(bytes, next);
        match bytes.get(pos) {
            Some(b',') => pos = skip_whitespace(bytes, pos + 1),
            Some(b']') => return Ok((elements, pos + 1)),
            Some(_) => return Err(ScanError::new(pos, ScanErrorKind::ExpectedCommaOrClose)),
            None => return Err(ScanError::new(pos, ScanErrorKind::UnexpectedEnd)),
        }
    }
}

/// Parse object members starting just after the opening brace.
pub(crate) fn parse_object<'a>(
    scanner: &mut Scanner<'a>,
    mut pos: usize,
) -> Result<(Vec<(String, Value)>, usize), ScanError> {
    let bytes = scanner.text().as_bytes();
    pos = skip_whitespace(bytes, pos);
    if bytes.get(pos) == Some(&b'}') {
        return Ok((Vec::new(), pos + 1));
    }
    let mut pairs = Vec::new();
    loop {
        if bytes.get(pos) != Some(&b'"') {
            let kind = if pos >= bytes.len() {
                ScanErrorKind::UnexpectedEnd
            } else {
                ScanErrorKind::ExpectedKey
            };
            return Err(ScanError::new(pos, kind));
        }
        let (key, next) = parse_key(scanner, pos + 1)?;
        pos = skip_whitespace(bytes, next);
        if bytes.get(pos) != Some(&b':') {
            let kind = if pos >= bytes.len() {
                ScanErrorKind::UnexpectedEnd
            } else {
                ScanErrorKind::ExpectedColon
            };
            return Err(ScanError::new(pos, kind));
        }
        pos = skip_whitespace(bytes, pos + 1);
        let (value, next) = scanner.scan_value(pos)?;
        insert_pair(&mut pairs, key, value);
        pos = skip_whitespace(bytes, next);
        match bytes.get(pos) {
            Some(b',') => pos = skip_whitespace(bytes, pos + 1),
            Some(b'}') => return Ok((pairs, pos + 1)),
            Some(_) => return Err(ScanError::new(pos, ScanErrorKind::ExpectedCommaOrClose)),
            None => return Err(ScanError::new(pos, ScanErrorKind::UnexpectedEnd)),
        }
    }
}

fn decode_escapes(raw: &str, start: usize) -> Result<String, ScanError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let invalid = ScanError::new(start + i, ScanErrorKind::InvalidEscape);
        let Some((_, esc)) = chars.next() else {
            return Err(invalid);
        };
        match esc {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let hi = hex4(&mut chars).ok_or(invalid)?;
                let code = if (0xD800..0xDC00).contains(&hi) {
                    match take_low_surrogate(&mut chars) {
                        Some(lo) => 0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00),
                        // Unpaired high surrogate; substitute below.
                        None => hi,
                    }
                } else {
                    hi
                };
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            _ => return Err(invalid),
        }
    }
    Ok(out)
}

fn hex4(chars: &mut core::str::CharIndices<'_>) -> Option<u32> {
    let mut code = 0u32;
    for _ in 0..4 {
        let (_, c) = chars.next()?;
        code = (code << 4) | c.to_digit(16)?;
    }
    Some(code)
}

/// Consume a `\uXXXX` low surrogate if one follows, leaving the iterator
/// untouched otherwise.
fn take_low_surrogate(chars: &mut core::str::CharIndices<'_>) -> Option<u32> {
    let mut probe = chars.clone();
    let (_, bs) = probe.next()?;
    let (_, u) = probe.next()?;
    if bs != '\\' || u != 'u' {
        return None;
    }
    let lo = hex4(&mut probe)?;
    if !(0xDC00..0xE000).contains(&lo) {
        return None;
    }
    *chars = probe;
    Some(lo)
}
