//! Streaming row decoder: yields one value per line for a document whose
//! root is a (possibly unknown-length) tabular or regular list. A regular
//! (non-tabular) row is parsed as a single scalar value via the strict
//! decoder, mirroring [`crate::stream::stream_encode`]'s restriction that
//! regular-list items must be scalars.

use std::io::BufRead;

use crate::decode::decode_strict;
use crate::error::StreamDecodeError;
use crate::line_grammar::{infer_delimiter, parse_cell, split_delimited, split_header};
use crate::map::ToonMap;
use crate::Value;

/// A pull-based iterator over the rows of a streamed TOON list. Holds only
/// the source reader, the parsed header, and the current line.
pub struct RowStream<R> {
    lines: std::io::Lines<R>,
    columns: Option<Vec<String>>,
    delimiter: char,
    remaining: Option<usize>,
    line_no: usize,
    done: bool,
}

/// Reads the header line from `source` and returns an iterator yielding one
/// `Value` per subsequent row.
pub fn stream_decode_rows<R: BufRead>(mut source: R) -> Result<RowStream<R>, StreamDecodeError> {
    let mut header = String::new();
    let read = source
        .read_line(&mut header)
        .map_err(|e| StreamDecodeError::Parse {
            line: 1,
            message: e.to_string(),
        })?;
    if read == 0 {
        return Err(StreamDecodeError::Parse {
            line: 1,
            message: "input contains no header line".to_string(),
        });
    }
    let header = header.trim_end_matches(['\n', '\r']);
    let (declared, columns, delimiter) = parse_header(header)?;
    Ok(RowStream {
        lines: source.lines(),
        columns,
        delimiter,
        remaining: declared,
        line_no: 1,
        done: false,
    })
}

fn parse_header(
    line: &str,
) -> Result<(Option<usize>, Option<Vec<String>>, char), StreamDecodeError> {
    let err = |message: &str| StreamDecodeError::Parse {
        line: 1,
        message: message.to_string(),
    };
    let rest = line.strip_prefix('[').ok_or_else(|| err("expected '[' to open array header"))?;
    let close = rest.find(']').ok_or_else(|| err("expected ']' in array header"))?;
    let length_token = &rest[..close];
    let declared = if length_token == "-" {
        None
    } else {
        Some(
            length_token
                .parse::<usize>()
                .map_err(|_| err("invalid array length"))?,
        )
    };
    let after = &rest[close + 1..];
    if let Some(body_start) = after.strip_prefix('{') {
        let body_end = body_start
            .find('}')
            .ok_or_else(|| err("unterminated tabular header"))?;
        let body = &body_start[..body_end];
        let delimiter = infer_delimiter(body);
        Ok((declared, Some(split_header(body, delimiter)), delimiter))
    } else {
        Ok((declared, None, ','))
    }
}

impl<R: BufRead> Iterator for RowStream<R> {
    type Item = Result<Value, StreamDecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.remaining == Some(0) {
            self.done = true;
            return None;
        }
        loop {
            match self.lines.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(StreamDecodeError::Parse {
                        line: self.line_no,
                        message: e.to_string(),
                    }));
                }
                Some(Ok(line)) => {
                    self.line_no += 1;
                    if line.trim().is_empty() {
                        if self.remaining.is_none() {
                            self.done = true;
                            return None;
                        }
                        continue;
                    }
                    let value = match &self.columns {
                        Some(cols) => match parse_tabular_line(&line, cols, self.delimiter) {
                            Ok(v) => v,
                            Err(message) => {
                                self.done = true;
                                return Some(Err(StreamDecodeError::Parse {
                                    line: self.line_no,
                                    message,
                                }));
                            }
                        },
                        None => match decode_strict(line.trim()) {
                            Ok(v) => v,
                            Err(e) => {
                                self.done = true;
                                return Some(Err(StreamDecodeError::Parse {
                                    line: self.line_no,
                                    message: e.message,
                                }));
                            }
                        },
                    };
                    if let Some(r) = &mut self.remaining {
                        *r -= 1;
                    }
                    return Some(Ok(value));
                }
            }
        }
    }
}

fn parse_tabular_line(line: &str, columns: &[String], delimiter: char) -> Result<Value, String> {
    let cells = split_delimited(line, delimiter);
    let mut map = ToonMap::new();
    for (i, col) in columns.iter().enumerate() {
        let value = match cells.get(i) {
            Some(raw) => parse_cell(raw).map_err(|e| e.to_string())?,
            None => Value::Null,
        };
        map.insert(col.clone(), value);
    }
    Ok(Value::Object(map))
}
