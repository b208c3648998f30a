//! Error and diagnostic types.
//!
//! The strict decoder and the encoder fail fast with a single positioned
//! error; the lenient decoder never fails and instead accumulates
//! [`Diagnostic`] records of the same shape.

use thiserror::Error;

/// The kind of grammar violation the strict decoder encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    EmptyInput,
    UnexpectedEnd,
    ExpectedCharacter,
    UnterminatedString,
    InvalidArrayLength,
    UnexpectedTrailing,
}

/// A positioned decode failure from [`crate::decode_strict`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("TOON decode error at line {line}, column {column}: {message}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl DecodeError {
    pub(crate) fn new(
        kind: DecodeErrorKind,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        DecodeError {
            kind,
            line,
            column,
            message: message.into(),
        }
    }
}

/// The kind of recoverable grammar violation the lenient decoder recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    MissingDelimiter,
    UnterminatedString,
    LengthMismatch,
    RowArityMismatch,
    UnparseableElement,
}

/// A non-fatal issue recorded by [`crate::decode_lenient`].
///
/// Diagnostics are returned in the order they occurred in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new(
        kind: DiagnosticKind,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Diagnostic {
            kind,
            line,
            column,
            message: message.into(),
        }
    }
}

/// Failure from [`crate::encode`]. The only way encoding can fail is a
/// host-provided value that does not map to the [`crate::Value`] model;
/// structural errors are impossible once a `Value` exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot encode value: {0}")]
pub struct EncodeError(pub String);

/// Failure from the streaming row decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamDecodeError {
    #[error("TOON decode error at line {line}: {message}")]
    Parse { line: usize, message: String },
}
