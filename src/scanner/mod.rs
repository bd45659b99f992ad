// Scanning engines
//
// Two entry points over the same byte-at-a-time loop:
// - FieldScanner: read a requested quota of fields, arbitrary byte classes
// - RowScanner: read one newline-terminated row with min/max field bounds

pub mod field;
pub mod row;

pub use field::FieldScanner;
pub use row::RowScanner;

/// What a scan call did, beyond producing fields.
///
/// Every successful scan reports whether the caller's output buffer was
/// overwritten and whether the stream ran out during the call. A typical
/// read loop keeps scanning until `eof` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// The output buffer was overwritten with this call's fields. False when
    /// the result was discarded by an ignore policy.
    pub stored: bool,
    /// End of stream was reached during this call.
    pub eof: bool,
}
