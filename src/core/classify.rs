// Byte classification for field splitting.
//
// Three disjoint byte sets drive the field scanner: delimiters end the
// current field, terminators end the whole scan, masked bytes are dropped
// wherever they appear. Disjointness is enforced by the setters rather than
// left to precedence rules at scan time.

use crate::error::ScanError;

/// Check if a byte is in a classification set.
/// Optimized for the common cases of 1-3 members.
#[inline]
pub(crate) fn in_set(byte: u8, set: &[u8]) -> bool {
    match set.len() {
        0 => false,
        1 => byte == set[0],
        2 => byte == set[0] || byte == set[1],
        3 => byte == set[0] || byte == set[1] || byte == set[2],
        _ => set.contains(&byte),
    }
}

/// The delimiter/terminator/masked byte sets used by
/// [`FieldScanner`](crate::FieldScanner).
///
/// A byte may belong to at most one set; the setters reject a byte that is
/// already classified in another set.
#[derive(Debug, Clone)]
pub struct CharClasses {
    delimiters: Vec<u8>,
    terminators: Vec<u8>,
    masked: Vec<u8>,
}

impl Default for CharClasses {
    fn default() -> Self {
        CharClasses {
            delimiters: vec![b'\t'],
            terminators: vec![b'\n'],
            masked: Vec::new(),
        }
    }
}

impl CharClasses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes that end the current field.
    pub fn delimiters(&self) -> &[u8] {
        &self.delimiters
    }

    /// Bytes that end the current scan.
    pub fn terminators(&self) -> &[u8] {
        &self.terminators
    }

    /// Bytes dropped from the input wherever they appear.
    pub fn masked(&self) -> &[u8] {
        &self.masked
    }

    /// Replace the delimiter set. Rejects bytes already classified as
    /// terminators or masked.
    pub fn set_delimiters(&mut self, bytes: &[u8]) -> Result<(), ScanError> {
        let set = dedup(bytes);
        check_disjoint(&set, &self.terminators, "terminator")?;
        check_disjoint(&set, &self.masked, "masked")?;
        self.delimiters = set;
        Ok(())
    }

    /// Replace the terminator set. Rejects bytes already classified as
    /// delimiters or masked.
    pub fn set_terminators(&mut self, bytes: &[u8]) -> Result<(), ScanError> {
        let set = dedup(bytes);
        check_disjoint(&set, &self.delimiters, "delimiter")?;
        check_disjoint(&set, &self.masked, "masked")?;
        self.terminators = set;
        Ok(())
    }

    /// Replace the masked set. Rejects bytes already classified as
    /// delimiters or terminators.
    pub fn set_masked(&mut self, bytes: &[u8]) -> Result<(), ScanError> {
        let set = dedup(bytes);
        check_disjoint(&set, &self.delimiters, "delimiter")?;
        check_disjoint(&set, &self.terminators, "terminator")?;
        self.masked = set;
        Ok(())
    }

    #[inline]
    pub(crate) fn is_delimiter(&self, byte: u8) -> bool {
        in_set(byte, &self.delimiters)
    }

    #[inline]
    pub(crate) fn is_terminator(&self, byte: u8) -> bool {
        in_set(byte, &self.terminators)
    }

    #[inline]
    pub(crate) fn is_masked(&self, byte: u8) -> bool {
        in_set(byte, &self.masked)
    }
}

fn dedup(bytes: &[u8]) -> Vec<u8> {
    let mut set = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if !set.contains(&b) {
            set.push(b);
        }
    }
    set
}

fn check_disjoint(new: &[u8], other: &[u8], other_name: &str) -> Result<(), ScanError> {
    for &b in new {
        if other.contains(&b) {
            return Err(ScanError::InvalidArgument(format!(
                "byte 0x{b:02x} is already classified as a {other_name}"
            )));
        }
    }
    Ok(())
}
