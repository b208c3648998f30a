//! Scalar encoding/quoting and parsing.
//!
//! A scalar's textual form depends on which delimiter, if any, is "active"
//! at the point it is emitted: a plain object field value has none, while a
//! cell inside an inline array or a tabular row is delimited by the
//! configured delimiter character and must quote it.

use crate::Value;

/// Where a scalar is being rendered, which controls whether the configured
/// delimiter character needs quoting. This format has no single-line
/// inline-array form, so the delimiter is only ever active inside a
/// tabular row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteContext {
    /// An object field value, or a list element on its own line.
    Document,
    /// A cell inside a tabular row.
    TabularCell,
}

/// Renders `value` as it would appear at a scalar position, applying
/// quoting rules for the given context. Returns `None` for composite values
/// (lists/objects), which callers handle separately.
#[must_use]
pub fn encode_scalar(value: &Value, delimiter: char, ctx: QuoteContext) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
        Value::Int(i) => Some(i.to_string()),
        Value::Float(f) => Some(format_float(*f)),
        Value::Str(s) => Some(encode_string(s, delimiter, ctx)),
        Value::List(_) | Value::Object(_) => None,
    }
}

/// Always includes a decimal point, even for whole-number floats: the
/// unquoted-scalar grammar classifies a bare integer token as `Int` on
/// decode, so a `Float` with no fractional part still has to spell one
/// out (`9.0`, not `9`) to decode back as the variant it was.
fn format_float(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    let f = if f == 0.0 { 0.0 } else { f };
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return format!("{}.0", f as i64);
    }
    let s = format!("{f}");
    if s.contains('e') || s.contains('E') {
        // Expand exponent notation: the format has no exponent syntax.
        return format!("{f:.17}")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
    }
    s
}

fn encode_string(s: &str, delimiter: char, ctx: QuoteContext) -> String {
    if needs_quoting(s, delimiter, ctx) {
        quote(s)
    } else {
        s.to_string()
    }
}

fn needs_quoting(s: &str, delimiter: char, ctx: QuoteContext) -> bool {
    if s.is_empty() {
        return true;
    }
    if s == "null" || s == "true" || s == "false" {
        return true;
    }
    if looks_numeric(s) {
        return true;
    }
    let delimiter_active = matches!(ctx, QuoteContext::TabularCell);
    for c in s.chars() {
        if delimiter_active && c == delimiter {
            return true;
        }
        if matches!(c, ':' | '{' | '}' | '[' | ']' | '"' | '\\') {
            return true;
        }
        if (c as u32) <= 0x1F || (c as u32) == 0x7F {
            return true;
        }
    }
    false
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// True if `s` parses as an integer or float per the unquoted-scalar
/// grammar, meaning it must be quoted to round-trip as a string.
#[must_use]
pub fn looks_numeric(s: &str) -> bool {
    parse_integer(s).is_some() || parse_float(s).is_some()
}

fn parse_integer(s: &str) -> Option<i64> {
    let body = s.strip_prefix('-').unwrap_or(s);
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok()
}

/// Accepts the unquoted float grammar: optional sign, digits, a required
/// '.', fractional digits, and an optional exponent. Encoding never
/// produces exponent notation, but decoding still recognizes it.
fn parse_float(s: &str) -> Option<f64> {
    let body = s.strip_prefix('-').unwrap_or(s);
    if body.is_empty() {
        return None;
    }
    let mut chars = body.chars().peekable();
    let mut saw_digit = false;
    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
        chars.next();
        saw_digit = true;
    }
    if chars.peek() != Some(&'.') {
        return None;
    }
    chars.next();
    let mut saw_frac_digit = false;
    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
        chars.next();
        saw_frac_digit = true;
    }
    if !saw_digit || !saw_frac_digit {
        return None;
    }
    if matches!(chars.peek(), Some('e') | Some('E')) {
        chars.next();
        if matches!(chars.peek(), Some('+') | Some('-')) {
            chars.next();
        }
        let mut saw_exp_digit = false;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            chars.next();
            saw_exp_digit = true;
        }
        if !saw_exp_digit {
            return None;
        }
    }
    if chars.next().is_some() {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Parses an unquoted token into a scalar `Value`, applying the precedence
/// `null` / `true` / `false` / integer / float / raw string.
#[must_use]
pub fn parse_unquoted(token: &str) -> Value {
    match token {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Some(i) = parse_integer(token) {
                Value::Int(i)
            } else if let Some(f) = parse_float(token) {
                Value::Float(f)
            } else {
                Value::Str(token.to_string())
            }
        }
    }
}

/// Unescapes a quoted string body (without the surrounding quotes),
/// applying `\" \\ \n \r \t`.
#[must_use]
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}
