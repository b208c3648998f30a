//! The error-recovering decoder.
//!
//! Same grammar as the strict decoder, but every violation is recorded as a
//! [`Diagnostic`] instead of aborting; the parser resynchronises and keeps
//! building a partial value. Every recovery branch is structured to consume
//! at least one character or token per iteration, so parsing a finite input
//! always terminates even on pathological byte runs.

use super::cursor::Cursor;
use crate::error::{Diagnostic, DiagnosticKind};
use crate::line_grammar::{infer_delimiter, parse_cell, split_delimited, split_header};
use crate::map::ToonMap;
use crate::scalar::{parse_unquoted, unescape};
use crate::Value;

/// Parses `text` into a best-effort `Value` plus the diagnostics recorded
/// along the way. Never fails; returns `None` only when the input has no
/// non-whitespace content at all.
pub fn decode_lenient(text: &str) -> (Option<Value>, Vec<Diagnostic>) {
    let mut cursor = Cursor::new(text);
    cursor.skip_ws();
    if cursor.at_end() {
        return (None, Vec::new());
    }

    let mut state = State {
        cursor,
        diags: Vec::new(),
    };
    let value = state.parse_value();
    state.cursor.skip_ws();
    if !state.cursor.at_end() {
        state.record(DiagnosticKind::UnparseableElement, "unexpected trailing content");
    }
    (Some(value), state.diags)
}

struct State {
    cursor: Cursor,
    diags: Vec<Diagnostic>,
}

impl State {
    fn record(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diags.push(Diagnostic::new(
            kind,
            self.cursor.line(),
            self.cursor.column(),
            message,
        ));
    }

    fn parse_value(&mut self) -> Value {
        match self.cursor.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_list(),
            Some('"') => Value::Str(self.parse_quoted_string()),
            Some(_) => {
                let token = self
                    .cursor
                    .take_while(|c| !super::cursor::VALUE_TERMINATORS.contains(&c));
                if token.is_empty() {
                    if let Some(c) = self.cursor.advance() {
                        self.record(DiagnosticKind::UnparseableElement, format!("unexpected '{c}'"));
                    }
                    Value::Null
                } else {
                    parse_unquoted(&token)
                }
            }
            None => {
                self.record(DiagnosticKind::MissingDelimiter, "expected a value");
                Value::Null
            }
        }
    }

    fn parse_object(&mut self) -> Value {
        self.cursor.advance(); // '{'
        let mut map = ToonMap::new();
        loop {
            self.cursor.skip_ws();
            match self.cursor.peek() {
                Some('}') => {
                    self.cursor.advance();
                    break;
                }
                None => {
                    self.record(DiagnosticKind::MissingDelimiter, "missing '}' to close object");
                    break;
                }
                _ => {}
            }

            let raw_key = self.cursor.take_while(|c| c != ':' && c != '\n' && c != '\r');
            let key = raw_key.trim().to_string();
            if key.is_empty() {
                match self.cursor.advance() {
                    Some(c) => {
                        self.record(
                            DiagnosticKind::UnparseableElement,
                            format!("expected an object key, found '{c}'"),
                        );
                    }
                    None => {
                        self.record(DiagnosticKind::MissingDelimiter, "missing '}' to close object");
                        break;
                    }
                }
                continue;
            }
            match self.cursor.peek() {
                Some(':') => {
                    self.cursor.advance();
                }
                _ => {
                    self.record(
                        DiagnosticKind::MissingDelimiter,
                        format!("missing ':' after key '{key}'"),
                    );
                }
            }
            self.cursor.skip_ws();
            if self.cursor.at_end() {
                self.record(
                    DiagnosticKind::MissingDelimiter,
                    format!("missing value for key '{key}'"),
                );
                map.insert(key, Value::Null);
                break;
            }
            let value = self.parse_value();
            map.insert(key, value);
        }
        Value::Object(map)
    }

    fn parse_list(&mut self) -> Value {
        self.cursor.advance(); // '['
        self.cursor.skip_ws();
        let digits = self.cursor.take_while(|c| c.is_ascii_digit());
        let declared: Option<usize> = if digits.is_empty() {
            self.record(DiagnosticKind::MissingDelimiter, "missing array length, assuming 0");
            None
        } else {
            digits.parse().ok()
        };
        self.cursor.skip_ws();
        match self.cursor.peek() {
            Some(']') => {
                self.cursor.advance();
            }
            _ => self.record(DiagnosticKind::MissingDelimiter, "missing ']'"),
        }
        self.cursor.skip_inline_ws();

        let mut columns: Option<Vec<String>> = None;
        let mut delimiter = ',';
        if self.cursor.peek() == Some('{') {
            self.cursor.advance();
            let header_raw = self.cursor.take_while(|c| c != '}');
            match self.cursor.peek() {
                Some('}') => {
                    self.cursor.advance();
                }
                _ => self.record(
                    DiagnosticKind::MissingDelimiter,
                    "missing '}' to close tabular header",
                ),
            }
            delimiter = infer_delimiter(&header_raw);
            columns = Some(split_header(&header_raw, delimiter));
        }
        self.cursor.skip_inline_ws();
        if self.cursor.peek() == Some(':') {
            self.cursor.advance();
        }
        self.cursor.skip_ws();

        let target = declared.unwrap_or(0);
        let mut items = Vec::new();
        match columns {
            Some(cols) => {
                let mut actual = 0usize;
                while actual < target {
                    self.cursor.skip_ws();
                    if self.cursor.at_end() {
                        break;
                    }
                    let line = self.cursor.take_until_eol();
                    if line.is_empty() {
                        if self.cursor.advance().is_none() {
                            break;
                        }
                        continue;
                    }
                    let (fields, mismatch) = self.parse_row(&line, &cols, delimiter);
                    items.push(Value::Object(fields.into_iter().collect()));
                    if let Some(msg) = mismatch {
                        self.record(DiagnosticKind::RowArityMismatch, msg);
                    }
                    actual += 1;
                    self.cursor.skip_ws();
                }
                if declared.is_some() && actual != target {
                    self.record(
                        DiagnosticKind::LengthMismatch,
                        format!("declared {target} rows, found {actual}"),
                    );
                }
            }
            None => {
                let mut actual = 0usize;
                while actual < target {
                    self.cursor.skip_ws();
                    if self.cursor.at_end() || matches!(self.cursor.peek(), Some('}') | Some(']')) {
                        break;
                    }
                    items.push(self.parse_value());
                    actual += 1;
                    self.cursor.skip_ws();
                }
                if declared.is_some() && actual != target {
                    self.record(
                        DiagnosticKind::LengthMismatch,
                        format!("declared {target} elements, found {actual}"),
                    );
                }
            }
        }
        Value::List(items)
    }

    fn parse_row(
        &self,
        line: &str,
        columns: &[String],
        delimiter: char,
    ) -> (Vec<(String, Value)>, Option<String>) {
        let cells = split_delimited(line, delimiter);
        let mut fields = Vec::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            let value = match cells.get(i) {
                Some(raw) => parse_cell(raw).unwrap_or_else(|_| Value::Str(raw.trim_matches('"').to_string())),
                None => Value::Null,
            };
            fields.push((col.clone(), value));
        }
        let mismatch = if cells.len() != columns.len() {
            Some(format!(
                "row has {} cells, expected {}",
                cells.len(),
                columns.len()
            ))
        } else {
            None
        };
        (fields, mismatch)
    }

    fn parse_quoted_string(&mut self) -> String {
        self.cursor.advance(); // opening '"'
        let mut raw = String::new();
        loop {
            match self.cursor.peek() {
                Some('"') => {
                    self.cursor.advance();
                    return unescape(&raw);
                }
                Some('\\') => {
                    self.cursor.advance();
                    raw.push('\\');
                    match self.cursor.advance() {
                        Some(c) => raw.push(c),
                        None => {
                            self.record(DiagnosticKind::UnterminatedString, "unterminated string");
                            return unescape(&raw);
                        }
                    }
                }
                Some('\n') | Some('\r') => {
                    self.record(
                        DiagnosticKind::UnterminatedString,
                        "unterminated string, closed at newline",
                    );
                    return unescape(&raw);
                }
                None => {
                    self.record(
                        DiagnosticKind::UnterminatedString,
                        "unterminated string at end of input",
                    );
                    return unescape(&raw);
                }
                Some(c) => {
                    raw.push(c);
                    self.cursor.advance();
                }
            }
        }
    }
}
