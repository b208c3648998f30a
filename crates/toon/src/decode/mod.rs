//! Decoding: the strict, fail-fast decoder and the lenient, recovering one.
//!
//! Both share the same low-level cursor and line-grammar helpers; the
//! lenient variant layers resynchronisation on top instead of aborting.

mod cursor;
mod lenient;
mod strict;

pub use lenient::decode_lenient;
pub use strict::decode_strict;
