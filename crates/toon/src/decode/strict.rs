//! The fail-fast decoder.
//!
//! A hand-written recursive-descent parser over a position-tracked
//! character cursor. Indentation is never used to find block boundaries:
//! objects and inline-typed lists close on their own explicit delimiter
//! (`}`/`]`), and a list's declared length `N` bounds how many elements it
//! reads.

use super::cursor::Cursor;
use crate::error::{DecodeError, DecodeErrorKind};
use crate::line_grammar::{infer_delimiter, parse_cell, split_delimited, split_header};
use crate::map::ToonMap;
use crate::scalar::parse_unquoted;
use crate::Value;

/// Parses `text` into a `Value`, failing on the first grammar violation.
pub fn decode_strict(text: &str) -> Result<Value, DecodeError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_ws();
    if cursor.at_end() {
        return Err(DecodeError::new(
            DecodeErrorKind::EmptyInput,
            1,
            1,
            "input contains no value",
        ));
    }
    let value = parse_value(&mut cursor)?;
    cursor.skip_ws();
    if !cursor.at_end() {
        return Err(DecodeError::new(
            DecodeErrorKind::UnexpectedTrailing,
            cursor.line(),
            cursor.column(),
            "unexpected content after the root value",
        ));
    }
    Ok(value)
}

fn err(kind: DecodeErrorKind, cursor: &Cursor, message: impl Into<String>) -> DecodeError {
    DecodeError::new(kind, cursor.line(), cursor.column(), message)
}

fn parse_value(cursor: &mut Cursor) -> Result<Value, DecodeError> {
    match cursor.peek() {
        Some('{') => parse_object(cursor),
        Some('[') => parse_list(cursor),
        Some('"') => parse_quoted_string(cursor).map(Value::Str),
        Some(_) => {
            let token = cursor.take_while(|c| !super::cursor::VALUE_TERMINATORS.contains(&c));
            if token.is_empty() {
                Err(err(DecodeErrorKind::UnexpectedEnd, cursor, "expected a value"))
            } else {
                Ok(parse_unquoted(&token))
            }
        }
        None => Err(err(DecodeErrorKind::UnexpectedEnd, cursor, "expected a value")),
    }
}

fn parse_object(cursor: &mut Cursor) -> Result<Value, DecodeError> {
    cursor.advance(); // '{'
    let mut map = ToonMap::new();
    loop {
        cursor.skip_ws();
        match cursor.peek() {
            Some('}') => {
                cursor.advance();
                return Ok(Value::Object(map));
            }
            None => return Err(err(DecodeErrorKind::UnexpectedEnd, cursor, "unterminated object")),
            _ => {}
        }

        let raw_key = cursor.take_while(|c| c != ':' && c != '\n' && c != '\r');
        let key = raw_key.trim().to_string();
        if key.is_empty() {
            return Err(err(
                DecodeErrorKind::ExpectedCharacter,
                cursor,
                "expected an object key",
            ));
        }
        match cursor.peek() {
            Some(':') => {
                cursor.advance();
            }
            _ => {
                return Err(err(
                    DecodeErrorKind::ExpectedCharacter,
                    cursor,
                    format!("expected ':' after key '{key}'"),
                ))
            }
        }
        cursor.skip_ws();
        if cursor.at_end() {
            return Err(err(
                DecodeErrorKind::UnexpectedEnd,
                cursor,
                format!("expected a value for key '{key}'"),
            ));
        }
        let value = parse_value(cursor)?;
        map.insert(key, value);
    }
}

fn parse_list(cursor: &mut Cursor) -> Result<Value, DecodeError> {
    cursor.advance(); // '['
    cursor.skip_ws();
    let digits = cursor.take_while(|c| c.is_ascii_digit());
    if digits.is_empty() {
        return Err(err(
            DecodeErrorKind::InvalidArrayLength,
            cursor,
            "expected a non-negative integer array length",
        ));
    }
    let n: usize = digits
        .parse()
        .map_err(|_| err(DecodeErrorKind::InvalidArrayLength, cursor, "array length overflow"))?;
    cursor.skip_ws();
    match cursor.peek() {
        Some(']') => {
            cursor.advance();
        }
        _ => return Err(err(DecodeErrorKind::ExpectedCharacter, cursor, "expected ']'")),
    }
    cursor.skip_inline_ws();

    let mut columns: Option<Vec<String>> = None;
    let mut delimiter = ',';
    if cursor.peek() == Some('{') {
        cursor.advance();
        let header_raw = cursor.take_while(|c| c != '}');
        match cursor.peek() {
            Some('}') => {
                cursor.advance();
            }
            _ => {
                return Err(err(
                    DecodeErrorKind::UnexpectedEnd,
                    cursor,
                    "unterminated tabular header",
                ))
            }
        }
        delimiter = infer_delimiter(&header_raw);
        columns = Some(split_header(&header_raw, delimiter));
    }
    cursor.skip_inline_ws();
    if cursor.peek() == Some(':') {
        cursor.advance();
    }
    cursor.skip_ws();

    // `n` is the declared length straight off the wire, not yet checked
    // against how much input actually remains: pre-sizing the vector to it
    // would let a header like `[999999999999]` trigger a huge allocation
    // before the per-element `UnexpectedEnd` check below ever runs.
    let mut items = Vec::new();
    match columns {
        Some(cols) => {
            for _ in 0..n {
                cursor.skip_ws();
                if cursor.at_end() {
                    return Err(err(DecodeErrorKind::UnexpectedEnd, cursor, "expected a tabular row"));
                }
                let line = cursor.take_until_eol();
                items.push(parse_tabular_row(&line, &cols, delimiter, cursor)?);
                cursor.skip_ws();
            }
        }
        None => {
            for _ in 0..n {
                cursor.skip_ws();
                if cursor.at_end() {
                    return Err(err(DecodeErrorKind::UnexpectedEnd, cursor, "expected a list element"));
                }
                items.push(parse_value(cursor)?);
                cursor.skip_ws();
            }
        }
    }
    Ok(Value::List(items))
}

fn parse_tabular_row(
    line: &str,
    columns: &[String],
    delimiter: char,
    cursor: &Cursor,
) -> Result<Value, DecodeError> {
    let cells = split_delimited(line, delimiter);
    if cells.len() > columns.len() {
        return Err(err(
            DecodeErrorKind::UnexpectedTrailing,
            cursor,
            format!("row has {} cells, expected {}", cells.len(), columns.len()),
        ));
    }
    if cells.len() < columns.len() {
        return Err(err(
            DecodeErrorKind::UnexpectedEnd,
            cursor,
            format!("row has {} cells, expected {}", cells.len(), columns.len()),
        ));
    }
    let mut map = ToonMap::new();
    for (col, raw) in columns.iter().zip(cells.iter()) {
        let value = parse_cell(raw)
            .map_err(|_| err(DecodeErrorKind::UnterminatedString, cursor, "unterminated quoted cell"))?;
        map.insert(col.clone(), value);
    }
    Ok(Value::Object(map))
}

fn parse_quoted_string(cursor: &mut Cursor) -> Result<String, DecodeError> {
    let start_line = cursor.line();
    let start_col = cursor.column();
    cursor.advance(); // opening '"'
    let mut raw = String::new();
    loop {
        match cursor.peek() {
            Some('"') => {
                cursor.advance();
                return Ok(crate::scalar::unescape(&raw));
            }
            Some('\\') => {
                cursor.advance();
                raw.push('\\');
                match cursor.advance() {
                    Some(c) => raw.push(c),
                    None => {
                        return Err(DecodeError::new(
                            DecodeErrorKind::UnterminatedString,
                            start_line,
                            start_col,
                            "unterminated string",
                        ))
                    }
                }
            }
            Some('\n') | Some('\r') | None => {
                return Err(DecodeError::new(
                    DecodeErrorKind::UnterminatedString,
                    start_line,
                    start_col,
                    "unterminated string",
                ))
            }
            Some(c) => {
                raw.push(c);
                cursor.advance();
            }
        }
    }
}
