//! Streaming adapters over bounded memory.
//!
//! These reuse the scalar codec and structural classifier but never
//! materialise the full document: the encoder looks at only the first one
//! or two items before committing to a shape, and the decoder keeps state
//! proportional to a single line plus the column schema.

mod decoder;
mod encoder;

pub use decoder::{stream_decode_rows, RowStream};
pub use encoder::{stream_encode, StreamEncoder};
