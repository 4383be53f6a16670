//! Randomly addressable source buffer with line indexing.
//!
//! Field resolution reads at computed offsets that may lie past the end of
//! a truncated record, or past the end of the document entirely. The buffer
//! makes every such read safe: any position at or past the end returns the
//! [`SENTINEL`] byte, which is neither a hex digit nor a line end, so
//! downstream decoding fails cleanly instead of reading garbage.
//!
//! A line-start table is built once at construction. Every classification
//! rule is line-bounded (a record never spans lines), so line lookups are
//! on the hot path of the resolvers and need to be cheap.

/// Byte returned for reads at or past the end of the source.
///
/// `0x00` fails hex decoding and is not a line end, which is exactly what
/// truncated-field handling relies on.
pub const SENTINEL: u8 = 0;

/// Immutable source text with O(log n) position-to-line resolution.
///
/// Positions are byte offsets (`u32`, like everything in this crate).
/// Line terminators are `\n`, `\r\n`, or a lone `\r`; a terminator belongs
/// to the line it ends.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    /// First position of each line, ascending. Always starts with 0.
    line_starts: Vec<u32>,
}

impl SourceBuffer {
    /// Build a buffer and its line-start table from source text.
    ///
    /// Sources larger than `u32::MAX` bytes are truncated to `u32::MAX`
    /// (positions are 32-bit throughout).
    pub fn new(source: &str) -> Self {
        let mut bytes = source.as_bytes();
        if bytes.len() > u32::MAX as usize {
            bytes = &bytes[..u32::MAX as usize];
        }

        let line_starts = scan_line_starts(bytes);

        Self {
            buf: bytes.to_vec(),
            line_starts,
        }
    }

    /// Byte at `pos`, or [`SENTINEL`] for positions at or past the end.
    #[inline]
    pub fn byte_at(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(SENTINEL)
    }

    /// Length of the source in bytes.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "construction caps the buffer at u32::MAX bytes"
    )]
    #[inline]
    pub fn len(&self) -> u32 {
        self.buf.len() as u32
    }

    /// Returns `true` if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The source bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of lines. An empty source has one (empty) line.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "one line start per source byte at most, and len() fits in u32"
    )]
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }

    /// Line index containing `pos`. Positions at or past the end resolve
    /// to the last line.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "partition point is bounded by line_count() which fits in u32"
    )]
    pub fn line_of(&self, pos: u32) -> u32 {
        let idx = self.line_starts.partition_point(|&start| start <= pos);
        // idx >= 1 because line_starts[0] == 0.
        (idx - 1) as u32
    }

    /// First position of `line`. Lines past the last resolve to `len()`.
    pub fn line_start(&self, line: u32) -> u32 {
        self.line_starts
            .get(line as usize)
            .copied()
            .unwrap_or_else(|| self.len())
    }

    /// Returns `true` if `pos` is the first position of its line.
    pub fn is_line_start(&self, pos: u32) -> bool {
        self.line_starts.binary_search(&pos).is_ok()
    }
}

/// Compute the line-start table for `bytes`.
///
/// A new line starts after every `\n`, and after every `\r` not followed
/// by `\n` (so `\r\n` counts as a single terminator).
#[allow(
    clippy::cast_possible_truncation,
    reason = "byte offsets are bounded by the capped buffer length"
)]
fn scan_line_starts(bytes: &[u8]) -> Vec<u32> {
    let mut line_starts = vec![0u32];

    for pos in memchr::memchr2_iter(b'\n', b'\r', bytes) {
        if bytes[pos] == b'\r' && bytes.get(pos + 1) == Some(&b'\n') {
            // CRLF: the '\n' match adds the line start.
            continue;
        }
        line_starts.push((pos + 1) as u32);
    }

    line_starts
}

#[cfg(test)]
mod tests;
