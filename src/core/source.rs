// Byte-at-a-time cursor over an io::Read stream.

use std::io::{ErrorKind, Read};

/// Pull the next byte from `input`, or `None` at end of stream.
/// Interrupted reads are retried; other read errors propagate.
#[inline]
pub(crate) fn next_byte<R: Read>(input: &mut R) -> std::io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
