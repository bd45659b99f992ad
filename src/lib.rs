// delimscan - incremental scanning of delimited byte streams
//
// Two scanning engines over the same byte-at-a-time loop:
// - FieldScanner: read a requested number of fields, configurable
//   delimiter/terminator/masked byte sets, empty fields rejected
// - RowScanner: read one newline-terminated row, single delimiter byte,
//   min/max field bounds with throw-or-skip policies, excess truncated
//
// Both are driven incrementally: the caller owns the stream and a reusable
// output buffer, calls scan repeatedly, and stops when the outcome reports
// end of stream. Configuration is mutable between calls; scan itself takes
// the scanner by shared reference.

pub mod core;
pub mod error;
pub mod scanner;

pub use crate::core::{CharClasses, FieldTransform, TransformError, Transforms};
pub use crate::error::ScanError;
pub use crate::scanner::{FieldScanner, RowScanner, ScanOutcome};
