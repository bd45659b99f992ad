// Quota-driven field scanner.

use std::io::Read;

use log::trace;

use crate::core::classify::CharClasses;
use crate::core::source::next_byte;
use crate::core::transform::{TransformError, Transforms};
use crate::error::ScanError;
use crate::scanner::ScanOutcome;

/// Reads a caller-requested number of fields from a byte stream.
///
/// Fields are split on any byte in the delimiter set, the scan stops at any
/// byte in the terminator set (or end of stream), and bytes in the masked set
/// are dropped wherever they appear. Empty fields are invalid. Each scan call
/// starts a fresh 1-based column count; registered transforms are applied by
/// column as fields are finalized.
///
/// ```
/// use std::io::Cursor;
/// use delimscan::FieldScanner;
///
/// let mut scanner = FieldScanner::new();
/// scanner.set_delimiters(b",").unwrap();
///
/// let mut input = Cursor::new(&b"foo,bar\nbaz,qux\n"[..]);
/// let mut fields = Vec::new();
/// let outcome = scanner.scan(&mut input, &mut fields, 2).unwrap();
/// assert_eq!(fields, vec![b"foo".to_vec(), b"bar".to_vec()]);
/// assert!(outcome.stored && !outcome.eof);
/// ```
pub struct FieldScanner {
    classes: CharClasses,
    enforce_field_number: bool,
    ignore_underfull_data: bool,
    transforms: Transforms,
}

impl Default for FieldScanner {
    fn default() -> Self {
        FieldScanner {
            classes: CharClasses::default(),
            enforce_field_number: true,
            ignore_underfull_data: true,
            transforms: Transforms::new(),
        }
    }
}

impl FieldScanner {
    /// Tab-delimited, newline-terminated, nothing masked, strict quota
    /// enforcement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes that end the current field. Default: `\t`.
    pub fn delimiters(&self) -> &[u8] {
        self.classes.delimiters()
    }

    /// Replace the delimiter set. Rejects bytes already classified as
    /// terminators or masked.
    pub fn set_delimiters(&mut self, bytes: &[u8]) -> Result<(), ScanError> {
        self.classes.set_delimiters(bytes)
    }

    /// Bytes that end the current scan. Default: `\n`.
    pub fn terminators(&self) -> &[u8] {
        self.classes.terminators()
    }

    /// Replace the terminator set. Rejects bytes already classified as
    /// delimiters or masked.
    pub fn set_terminators(&mut self, bytes: &[u8]) -> Result<(), ScanError> {
        self.classes.set_terminators(bytes)
    }

    /// Bytes dropped from the input wherever they appear. Default: empty.
    pub fn masked(&self) -> &[u8] {
        self.classes.masked()
    }

    /// Replace the masked set. Rejects bytes already classified as
    /// delimiters or terminators.
    pub fn set_masked(&mut self, bytes: &[u8]) -> Result<(), ScanError> {
        self.classes.set_masked(bytes)
    }

    /// Whether reading fewer fields than requested fails with
    /// [`ScanError::MissingFields`]. Default: true.
    pub fn enforce_field_number(&self) -> bool {
        self.enforce_field_number
    }

    pub fn set_enforce_field_number(&mut self, enforce: bool) {
        self.enforce_field_number = enforce;
    }

    /// Whether an underfull result is discarded rather than stored, when
    /// quota enforcement is off. Default: true.
    pub fn ignore_underfull_data(&self) -> bool {
        self.ignore_underfull_data
    }

    pub fn set_ignore_underfull_data(&mut self, ignore: bool) {
        self.ignore_underfull_data = ignore;
    }

    /// The per-column transform registry.
    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    pub fn transforms_mut(&mut self) -> &mut Transforms {
        &mut self.transforms
    }

    /// Register a transform for one 1-based column.
    pub fn set_transform<F>(&mut self, column: usize, transform: F)
    where
        F: Fn(&mut Vec<u8>) -> Result<(), TransformError> + Send + Sync + 'static,
    {
        self.transforms.set(column, transform);
    }

    /// Read up to `requested` fields from `input` into `fields`.
    ///
    /// Reads one byte at a time until a terminator is read, the quota is met,
    /// or the stream ends. A delimiter finalizes the accumulated bytes as the
    /// next field: empty fields fail with [`ScanError::EmptyField`], and the
    /// column's transform is applied if registered. When the loop stops short
    /// of the quota the trailing buffer is finalized the same way.
    ///
    /// If the quota is met, `fields` is overwritten with the result. If it is
    /// not: with quota enforcement on the call fails with
    /// [`ScanError::MissingFields`]; otherwise the short result is either
    /// discarded (`ignore_underfull_data`, the default) or stored. Discarded
    /// and failed calls leave `fields` untouched; the stream stays wherever
    /// reading stopped.
    ///
    /// `requested` must be at least 1.
    pub fn scan<R: Read>(
        &self,
        input: &mut R,
        fields: &mut Vec<Vec<u8>>,
        requested: usize,
    ) -> Result<ScanOutcome, ScanError> {
        if requested == 0 {
            return Err(ScanError::InvalidArgument(
                "must request a positive number of fields".into(),
            ));
        }

        let mut scanned: Vec<Vec<u8>> = Vec::with_capacity(requested);
        let mut buf: Vec<u8> = Vec::new();
        let mut count = 0usize;
        let mut eof = false;

        // Read bytes one by one and append to the field buffer. A delimiter
        // finalizes the buffer and starts a new field; a terminator or end of
        // stream stops the loop.
        loop {
            let byte = match next_byte(input)? {
                Some(b) => b,
                None => {
                    eof = true;
                    break;
                }
            };
            if self.classes.is_terminator(byte) {
                break;
            } else if self.classes.is_delimiter(byte) {
                count += 1;
                self.finish_field(&mut buf, &mut scanned, count)?;
                if count == requested {
                    break;
                }
            } else if !self.classes.is_masked(byte) {
                buf.push(byte);
            }
        }

        // Finalize the trailing field whose end was a terminator or end of
        // stream rather than a delimiter.
        if count < requested {
            count += 1;
            self.finish_field(&mut buf, &mut scanned, count)?;
        }

        if count < requested && self.enforce_field_number {
            return Err(ScanError::MissingFields {
                found: count,
                expected: requested,
            });
        }
        let stored = if count == requested || !self.ignore_underfull_data {
            *fields = scanned;
            true
        } else {
            trace!(
                "discarding underfull data: {count} of {requested} requested fields"
            );
            false
        };
        Ok(ScanOutcome { stored, eof })
    }

    // Finalizes the buffer as the field at `column`, applying its transform,
    // and clears the buffer for the next field.
    fn finish_field(
        &self,
        buf: &mut Vec<u8>,
        scanned: &mut Vec<Vec<u8>>,
        column: usize,
    ) -> Result<(), ScanError> {
        if buf.is_empty() {
            return Err(ScanError::EmptyField { column });
        }
        self.transforms.apply(column, buf)?;
        scanned.push(std::mem::take(buf));
        Ok(())
    }
}

impl std::fmt::Debug for FieldScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldScanner")
            .field("classes", &self.classes)
            .field("enforce_field_number", &self.enforce_field_number)
            .field("ignore_underfull_data", &self.ignore_underfull_data)
            .field("transforms", &self.transforms)
            .finish()
    }
}
