// Per-column field transforms.
//
// Transforms are applied in place to a field's bytes immediately after the
// field is delimited, before it is stored. Columns without a registered
// transform pass through unchanged.

use std::collections::HashMap;

use crate::error::ScanError;

/// Error type a transform may return; passed through to the scan caller
/// uninterpreted.
pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

/// A fallible in-place transform over a field's bytes.
pub type FieldTransform = Box<dyn Fn(&mut Vec<u8>) -> Result<(), TransformError> + Send + Sync>;

/// Registry mapping 1-based column numbers to field transforms.
#[derive(Default)]
pub struct Transforms {
    by_column: HashMap<usize, FieldTransform>,
}

impl Transforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or overwrite) the transform for one column.
    pub fn set<F>(&mut self, column: usize, transform: F)
    where
        F: Fn(&mut Vec<u8>) -> Result<(), TransformError> + Send + Sync + 'static,
    {
        self.by_column.insert(column, Box::new(transform));
    }

    /// Look up the transform registered for `column`.
    ///
    /// Fails with [`ScanError::NotFound`] when no transform is set for that
    /// column.
    pub fn get(&self, column: usize) -> Result<&FieldTransform, ScanError> {
        self.by_column
            .get(&column)
            .ok_or(ScanError::NotFound(column))
    }

    /// Replace the whole registry.
    pub fn replace(&mut self, transforms: HashMap<usize, FieldTransform>) {
        self.by_column = transforms;
    }

    /// The whole registry, keyed by column number.
    pub fn map(&self) -> &HashMap<usize, FieldTransform> {
        &self.by_column
    }

    pub fn clear(&mut self) {
        self.by_column.clear();
    }

    pub fn len(&self) -> usize {
        self.by_column.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_column.is_empty()
    }

    /// Apply the transform for `column` to `field` if one is registered.
    /// Transform failures surface as [`ScanError::Transform`].
    pub(crate) fn apply(&self, column: usize, field: &mut Vec<u8>) -> Result<(), ScanError> {
        if let Some(transform) = self.by_column.get(&column) {
            transform(field).map_err(ScanError::Transform)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Transforms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut columns: Vec<&usize> = self.by_column.keys().collect();
        columns.sort();
        f.debug_struct("Transforms").field("columns", &columns).finish()
    }
}
