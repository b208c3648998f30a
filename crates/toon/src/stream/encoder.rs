//! Streaming encoder: turns an iterator of values into an iterator of text
//! chunks without buffering the whole sequence.
//!
//! Each yielded chunk is exactly one physical line, matching the streaming
//! row decoder's line-at-a-time reader: a regular-list item that is itself
//! a composite (`Value::List`/`Value::Object` with fields) would render as
//! several lines through the batch encoder, which the row decoder could
//! never read back as a single row. Such items are rejected with an
//! `EncodeError` rather than silently corrupting the stream.

use std::collections::VecDeque;

use crate::classify::{classify_list, Shape};
use crate::error::EncodeError;
use crate::options::EncodeOptions;
use crate::scalar::{encode_scalar, QuoteContext};
use crate::Value;

enum ListShape {
    Tabular(Vec<String>),
    Regular,
}

/// Adapts an iterator of root-list elements into an iterator of TOON text
/// chunks (a header chunk followed by one chunk per item).
pub struct StreamEncoder<I> {
    rest: I,
    buffered: VecDeque<Value>,
    options: EncodeOptions,
    shape: ListShape,
    header_emitted: bool,
}

/// Builds a [`StreamEncoder`] over `items`. Peeks up to the first two items
/// to decide whether the stream is tabular or a regular list; the decision
/// is not revisited once made.
pub fn stream_encode<I>(items: I, options: &EncodeOptions) -> StreamEncoder<I::IntoIter>
where
    I: IntoIterator<Item = Value>,
{
    let mut iter = items.into_iter();
    let mut sample = Vec::with_capacity(2);
    for _ in 0..2 {
        match iter.next() {
            Some(v) => sample.push(v),
            None => break,
        }
    }
    let shape = decide_shape(&sample);
    StreamEncoder {
        rest: iter,
        buffered: sample.into(),
        options: options.clone(),
        shape,
        header_emitted: false,
    }
}

fn decide_shape(sample: &[Value]) -> ListShape {
    if sample.is_empty() {
        return ListShape::Regular;
    }
    match classify_list(sample) {
        Shape::Tabular { columns } => {
            ListShape::Tabular(columns.into_iter().map(str::to_string).collect())
        }
        Shape::RegularList | Shape::Object => ListShape::Regular,
    }
}

impl<I: Iterator<Item = Value>> Iterator for StreamEncoder<I> {
    type Item = Result<String, EncodeError>;

    fn next(&mut self) -> Option<Result<String, EncodeError>> {
        if !self.header_emitted {
            self.header_emitted = true;
            return Some(Ok(self.header_line()));
        }
        let item = self.buffered.pop_front().or_else(|| self.rest.next())?;
        Some(self.render_item(&item))
    }
}

impl<I> StreamEncoder<I> {
    fn header_line(&self) -> String {
        match &self.shape {
            ListShape::Tabular(cols) => {
                format!("[-]{{{}}}:\n", cols.join(&self.options.delimiter.to_string()))
            }
            ListShape::Regular => "[-]:\n".to_string(),
        }
    }

    fn render_item(&self, item: &Value) -> Result<String, EncodeError> {
        match &self.shape {
            ListShape::Tabular(cols) => {
                let map = item.as_object();
                let cells: Vec<String> = cols
                    .iter()
                    .map(|col| {
                        let field = map.and_then(|m| m.get(col)).cloned().unwrap_or(Value::Null);
                        encode_scalar(&field, self.options.delimiter, QuoteContext::TabularCell)
                            .unwrap_or_else(|| "null".to_string())
                    })
                    .collect();
                Ok(format!("{}\n", cells.join(&self.options.delimiter.to_string())))
            }
            ListShape::Regular => {
                let text = encode_scalar(item, self.options.delimiter, QuoteContext::Document)
                    .ok_or_else(|| {
                        EncodeError(
                            "streaming regular-list items must be scalars (got a nested list or object); \
                             a composite item would render across multiple lines, which the row-at-a-time \
                             streaming decoder cannot read back as one row"
                                .to_string(),
                        )
                    })?;
                Ok(format!("{text}\n"))
            }
        }
    }
}
