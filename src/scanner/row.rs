// Bounded row scanner.

use std::io::Read;

use log::trace;

use crate::core::source::next_byte;
use crate::core::transform::{FieldTransform, TransformError, Transforms};
use crate::error::ScanError;
use crate::scanner::ScanOutcome;

/// Every row ends at a newline; the terminator is not configurable here.
const ROW_TERMINATOR: u8 = b'\n';

/// Reads one newline-terminated row of delimited fields at a time.
///
/// Fields are split on a single configurable delimiter byte and empty fields
/// are valid content. Minimum and maximum field counts are enforced with
/// independent throw-vs-skip policies; once a bounded maximum is exceeded the
/// excess fields are truncated. Registered transforms are applied by 1-based
/// column as fields are finalized.
///
/// ```
/// use std::io::Cursor;
/// use delimscan::RowScanner;
///
/// let mut scanner = RowScanner::new();
/// scanner.set_delimiter(b',');
///
/// let mut input = Cursor::new(&b"a,b,c\n"[..]);
/// let mut row = Vec::new();
/// scanner.scan(&mut input, &mut row).unwrap();
/// assert_eq!(row, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
/// ```
pub struct RowScanner {
    delimiter: u8,
    min_fields: usize,
    enforce_min_fields: bool,
    ignore_underfull_row: bool,
    max_fields: usize,
    enforce_max_fields: bool,
    ignore_overfull_row: bool,
    transforms: Transforms,
}

impl Default for RowScanner {
    fn default() -> Self {
        RowScanner {
            delimiter: b'\t',
            min_fields: 0,
            enforce_min_fields: true,
            ignore_underfull_row: true,
            max_fields: 0,
            enforce_max_fields: true,
            ignore_overfull_row: true,
            transforms: Transforms::new(),
        }
    }
}

impl RowScanner {
    /// Tab-delimited, unbounded field counts, strict enforcement once bounds
    /// are set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The byte separating fields within a row. Default: `\t`.
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: u8) {
        self.delimiter = delimiter;
    }

    /// Minimum number of fields expected per row; `0` disables the bound.
    pub fn min_fields(&self) -> usize {
        self.min_fields
    }

    pub fn set_min_fields(&mut self, min: usize) {
        self.min_fields = min;
    }

    /// Whether an underfull row fails with [`ScanError::MissingFields`].
    /// Default: true.
    pub fn enforce_min_fields(&self) -> bool {
        self.enforce_min_fields
    }

    pub fn set_enforce_min_fields(&mut self, enforce: bool) {
        self.enforce_min_fields = enforce;
    }

    /// Whether an underfull row is discarded rather than stored, when the
    /// minimum is not enforced. Default: true.
    pub fn ignore_underfull_row(&self) -> bool {
        self.ignore_underfull_row
    }

    pub fn set_ignore_underfull_row(&mut self, ignore: bool) {
        self.ignore_underfull_row = ignore;
    }

    /// Maximum number of fields expected per row; `0` disables the bound.
    pub fn max_fields(&self) -> usize {
        self.max_fields
    }

    pub fn set_max_fields(&mut self, max: usize) {
        self.max_fields = max;
    }

    /// Whether an overfull row fails with [`ScanError::UnexpectedFields`].
    /// Default: true.
    pub fn enforce_max_fields(&self) -> bool {
        self.enforce_max_fields
    }

    pub fn set_enforce_max_fields(&mut self, enforce: bool) {
        self.enforce_max_fields = enforce;
    }

    /// Whether an overfull row is discarded rather than stored truncated,
    /// when the maximum is not enforced. Default: true.
    pub fn ignore_overfull_row(&self) -> bool {
        self.ignore_overfull_row
    }

    pub fn set_ignore_overfull_row(&mut self, ignore: bool) {
        self.ignore_overfull_row = ignore;
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

    /// Look up the transform registered for `column`.
    ///
    /// Fails with [`ScanError::NotFound`] when no transform is set for that
    /// column.
    pub fn transform(&self, column: usize) -> Result<&FieldTransform, ScanError> {
        self.transforms.get(column)
    }

    /// Read the next row from `input` into `row`.
    ///
    /// Reads one byte at a time until a newline is read or the stream ends,
    /// splitting fields on the configured delimiter and tracking a 1-based
    /// column count. When `max_fields` is bounded, the delimiter that pushes
    /// the count past it either fails the call immediately with
    /// [`ScanError::UnexpectedFields`] (`enforce_max_fields`, the default) or
    /// starts silent truncation: bytes and fields past the bound are dropped.
    ///
    /// After the row is read, an underfull row fails with
    /// [`ScanError::MissingFields`] if `enforce_min_fields` is set. A row
    /// that violated an unenforced bound is discarded without touching `row`
    /// when the matching ignore flag is set; otherwise `row` is overwritten
    /// with the (possibly short or truncated) field list. Failed and
    /// discarded calls leave `row` untouched; the stream stays wherever
    /// reading stopped.
    pub fn scan<R: Read>(
        &self,
        input: &mut R,
        row: &mut Vec<Vec<u8>>,
    ) -> Result<ScanOutcome, ScanError> {
        let mut scanned: Vec<Vec<u8>> = Vec::new();
        let mut buf: Vec<u8> = Vec::new();
        let mut column = 1usize;
        let mut eof = false;

        // Read bytes one by one; the delimiter finalizes the current field
        // and advances the column, a newline or end of stream ends the row.
        // The max bound is checked at the delimiter that crosses it.
        loop {
            let byte = match next_byte(input)? {
                Some(b) => b,
                None => {
                    eof = true;
                    break;
                }
            };
            if byte == ROW_TERMINATOR {
                break;
            } else if byte == self.delimiter {
                self.finish_field(&mut buf, &mut scanned, column)?;
                column += 1;
                if self.over_limit(column) && self.enforce_max_fields {
                    return Err(ScanError::UnexpectedFields {
                        max: self.max_fields,
                    });
                }
            } else if !self.over_limit(column) {
                buf.push(byte);
            }
        }

        // `column` is now the total field count of the row.
        if column < self.min_fields && self.enforce_min_fields {
            return Err(ScanError::MissingFields {
                found: column,
                expected: self.min_fields,
            });
        }
        let overfull = self.over_limit(column);
        let underfull = column < self.min_fields;
        let stored = if (!overfull || !self.ignore_overfull_row)
            && (!underfull || !self.ignore_underfull_row)
        {
            self.finish_field(&mut buf, &mut scanned, column)?;
            *row = scanned;
            true
        } else {
            trace!(
                "discarding row with {column} fields (min {}, max {})",
                self.min_fields,
                self.max_fields
            );
            false
        };
        Ok(ScanOutcome { stored, eof })
    }

    #[inline]
    fn over_limit(&self, column: usize) -> bool {
        self.max_fields > 0 && column > self.max_fields
    }

    // Finalizes the buffer as the field at `column` unless the column is past
    // a bounded maximum, in which case the buffer is dropped.
    fn finish_field(
        &self,
        buf: &mut Vec<u8>,
        scanned: &mut Vec<Vec<u8>>,
        column: usize,
    ) -> Result<(), ScanError> {
        if self.over_limit(column) {
            buf.clear();
            return Ok(());
        }
        self.transforms.apply(column, buf)?;
        scanned.push(std::mem::take(buf));
        Ok(())
    }
}

impl std::fmt::Debug for RowScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowScanner")
            .field("delimiter", &self.delimiter)
            .field("min_fields", &self.min_fields)
            .field("enforce_min_fields", &self.enforce_min_fields)
            .field("ignore_underfull_row", &self.ignore_underfull_row)
            .field("max_fields", &self.max_fields)
            .field("enforce_max_fields", &self.enforce_max_fields)
            .field("ignore_overfull_row", &self.ignore_overfull_row)
            .field("transforms", &self.transforms)
            .finish()
    }
}
