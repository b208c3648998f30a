//! The deterministic encoder.
//!
//! Every composite value is rendered as a self-contained block of lines:
//! the block's first line already carries its own indentation, so a nested
//! block can be spliced verbatim wherever it is needed (as a field's value,
//! or as a list element) simply by rendering it one level deeper.

use crate::classify::{classify_list, Shape};
use crate::error::EncodeError;
use crate::map::ToonMap;
use crate::options::EncodeOptions;
use crate::scalar::{encode_scalar, QuoteContext};
use crate::Value;

/// Renders `value` as a TOON document. The only failure mode is a
/// host-provided value with no mapping onto the `Value` model; since
/// `Value` is a closed enum every value of this type always encodes.
pub fn encode(value: &Value, options: &EncodeOptions) -> Result<String, EncodeError> {
    Ok(match value {
        Value::List(items) if items.is_empty() => "[0]".to_string(),
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::List(items) => encode_list_block(items, 0, options).join("\n"),
        Value::Object(map) => encode_object_block(map, 0, options).join("\n"),
        scalar => encode_scalar(scalar, options.delimiter, QuoteContext::Document)
            .expect("scalar variant always encodes"),
    })
}

fn indent(options: &EncodeOptions, depth: usize) -> String {
    options.indent.repeat(depth)
}

/// Renders a non-empty object as a self-contained `{ ... }` block, its
/// opening and closing lines at `depth`, its fields at `depth + 1`.
fn encode_object_block(map: &ToonMap, depth: usize, options: &EncodeOptions) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("{}{{", indent(options, depth)));
    for key in map.sorted_keys() {
        let value = map.get(key).expect("sorted key exists in map");
        lines.extend(encode_field(key, value, depth, options));
    }
    lines.push(format!("{}}}", indent(options, depth)));
    lines
}

fn encode_field(key: &str, value: &Value, depth: usize, options: &EncodeOptions) -> Vec<String> {
    let field_indent = indent(options, depth + 1);
    match value {
        Value::Object(map) if map.is_empty() => {
            vec![format!("{field_indent}{key}: {{}}")]
        }
        Value::Object(map) => {
            let mut lines = vec![format!("{field_indent}{key}:")];
            lines.extend(encode_object_block(map, depth + 1, options));
            lines
        }
        Value::List(items) if items.is_empty() => {
            vec![format!("{field_indent}{key}: [0]")]
        }
        Value::List(items) => {
            let header = list_header(items, options);
            let mut lines = vec![format!("{field_indent}{key}{header}")];
            lines.extend(list_rows(items, depth + 1, options));
            lines
        }
        scalar => {
            let text = encode_scalar(scalar, options.delimiter, QuoteContext::Document)
                .expect("scalar variant always encodes");
            vec![format!("{field_indent}{key}: {text}")]
        }
    }
}

/// Renders a non-empty list as a self-contained header-plus-rows block.
fn encode_list_block(items: &[Value], depth: usize, options: &EncodeOptions) -> Vec<String> {
    let mut lines = vec![format!("{}{}", indent(options, depth), list_header(items, options))];
    lines.extend(list_rows(items, depth + 1, options));
    lines
}

fn list_header(items: &[Value], options: &EncodeOptions) -> String {
    let n = items.len();
    let colon = if options.length_marker { ":" } else { "" };
    match classify_list(items) {
        Shape::Tabular { columns } => {
            let cols = columns.join(&options.delimiter.to_string());
            format!("[{n}]{{{cols}}}{colon}")
        }
        Shape::RegularList | Shape::Object => format!("[{n}]{colon}"),
    }
}

fn list_rows(items: &[Value], depth: usize, options: &EncodeOptions) -> Vec<String> {
    match classify_list(items) {
        Shape::Tabular { columns } => items
            .iter()
            .map(|item| {
                let map = item.as_object().expect("tabular rows are objects");
                let cells: Vec<String> = columns
                    .iter()
                    .map(|col| {
                        let field = map.get(col).unwrap_or(&Value::Null);
                        encode_scalar(field, options.delimiter, QuoteContext::TabularCell)
                            .expect("tabular cells are scalars by construction")
                    })
                    .collect();
                format!(
                    "{}{}",
                    indent(options, depth),
                    cells.join(&options.delimiter.to_string())
                )
            })
            .collect(),
        Shape::RegularList | Shape::Object => items
            .iter()
            .flat_map(|item| encode_element(item, depth, options))
            .collect(),
    }
}

fn encode_element(item: &Value, depth: usize, options: &EncodeOptions) -> Vec<String> {
    match item {
        Value::Object(map) if map.is_empty() => vec![format!("{}{{}}", indent(options, depth))],
        Value::Object(map) => encode_object_block(map, depth, options),
        Value::List(items) if items.is_empty() => vec![format!("{}[0]", indent(options, depth))],
        Value::List(items) => encode_list_block(items, depth, options),
        scalar => {
            let text = encode_scalar(scalar, options.delimiter, QuoteContext::Document)
                .expect("scalar variant always encodes");
            vec![format!("{}{}", indent(options, depth), text)]
        }
    }
}
