//! Header and row parsing shared by the strict decoder, the lenient
//! decoder, and the streaming row decoder.
//!
//! `decode_strict`/`decode_lenient` take no `EncodeOptions`, so the
//! delimiter used by a given array cannot be told to the decoder — it is
//! inferred from the header line itself: the first non-alphanumeric,
//! non-`_`, non-`.` character separating header keys becomes that array's
//! delimiter, defaulting to `,` when there is only one column.

use crate::scalar::{parse_unquoted, unescape};
use crate::Value;

/// Infers the delimiter character from a raw tabular header body (the text
/// between `{` and `}`, not yet split into columns).
#[must_use]
pub(crate) fn infer_delimiter(header: &str) -> char {
    for c in header.chars() {
        if !(c.is_alphanumeric() || c == '_' || c == '.') {
            return c;
        }
    }
    ','
}

/// Splits a raw tabular header body into trimmed column names.
#[must_use]
pub(crate) fn split_header(header: &str, delimiter: char) -> Vec<String> {
    header
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .collect()
}

/// Splits one row/element line into raw cell texts, quote-aware: a quoted
/// cell may contain the delimiter without being split on it.
#[must_use]
pub(crate) fn split_delimited(line: &str, delimiter: char) -> Vec<String> {
    let mut cells = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        let mut cell = String::new();
        if chars.peek() == Some(&'"') {
            cell.push(chars.next().unwrap());
            loop {
                match chars.next() {
                    Some('\\') => {
                        cell.push('\\');
                        if let Some(n) = chars.next() {
                            cell.push(n);
                        }
                    }
                    Some('"') => {
                        cell.push('"');
                        break;
                    }
                    Some(c) => cell.push(c),
                    None => break,
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c == delimiter {
                    break;
                }
                cell.push(c);
                chars.next();
            }
        }
        cells.push(cell);
        match chars.peek() {
            Some(&c) if c == delimiter => {
                chars.next();
            }
            _ => break,
        }
    }
    cells
}

/// Parses one raw cell (possibly quoted) into a scalar `Value`.
///
/// Returns `Err` with a short message if a quote was opened but never
/// closed; callers decide how to surface that (fatal for strict, a
/// diagnostic for lenient).
pub(crate) fn parse_cell(raw: &str) -> Result<Value, &'static str> {
    if let Some(body) = raw.strip_prefix('"') {
        if let Some(inner) = body.strip_suffix('"') {
            if !ends_with_unescaped_backslash_run(inner) || inner.is_empty() {
                return Ok(Value::Str(unescape(inner)));
            }
        }
        return Err("unterminated quoted cell");
    }
    Ok(parse_unquoted(raw))
}

/// True if `s` ends with an odd run of backslashes, meaning a trailing `"`
/// right after it would itself be escaped rather than closing the string.
fn ends_with_unescaped_backslash_run(s: &str) -> bool {
    let run = s.chars().rev().take_while(|&c| c == '\\').count();
    run % 2 == 1
}
