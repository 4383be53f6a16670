//! Field arithmetic shared by both record formats.
//!
//! Hex digit-pair decoding, line-end detection, digit-pair counting, and
//! checksum accumulation. A failed decode is data, not an error: helpers
//! return `Option` and the state machines map `None` to the `*Wrong`
//! categories.

use crate::source_buffer::SourceBuffer;

/// Checksum convention of a record format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checksum {
    /// Low byte of the complemented sum (S-Record).
    OnesComplement,
    /// Low byte of the negated sum (Intel HEX).
    TwosComplement,
}

/// Returns `true` for the line-end bytes `\n` and `\r`.
#[inline]
pub fn is_line_end(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Decode one hex digit, case-insensitive.
#[inline]
fn decode_hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Decode a digit pair into a byte. `None` if either digit is invalid.
pub fn decode_hex_pair(hi: u8, lo: u8) -> Option<u8> {
    Some(decode_hex_digit(hi)? << 4 | decode_hex_digit(lo)?)
}

/// Decode the digit pair at `pos`, `pos + 1`.
///
/// Reads past the end of a line or of the buffer yield non-digit bytes,
/// so a pair truncated by either returns `None`.
pub fn decode_pair_at(buf: &SourceBuffer, pos: u32) -> Option<u8> {
    decode_hex_pair(buf.byte_at(pos), buf.byte_at(pos.saturating_add(1)))
}

/// Returns `true` if both positions are on the same line.
pub fn same_line(buf: &SourceBuffer, pos1: u32, pos2: u32) -> bool {
    buf.line_of(pos1) == buf.line_of(pos2)
}

/// Count the digit pairs from `start` to the end of the line (or of the
/// buffer), ignoring `excluded_digits` leading digits.
///
/// An incomplete trailing pair rounds up: a record whose final checksum
/// digit is missing still reports a matching byte count. The count is
/// negative when the line is shorter than `excluded_digits`; callers treat
/// negative as never-matching.
pub fn count_digit_pairs(buf: &SourceBuffer, start: u32, excluded_digits: i32) -> i32 {
    let mut pos = start;
    while pos < buf.len() && !is_line_end(buf.byte_at(pos)) {
        pos += 1;
    }

    let digits = i32::try_from(pos - start).unwrap_or(i32::MAX);
    let mut cnt = digits.saturating_sub(excluded_digits);

    // Round up if odd (incomplete trailing pair), but never past zero for
    // a too-short line.
    if cnt >= 0 {
        cnt = cnt.saturating_add(1);
    }

    cnt / 2
}

/// Number of digits covering `pairs` digit pairs; zero for negative input.
pub(crate) fn digit_width(pairs: i32) -> u32 {
    u32::try_from(pairs).map_or(0, |p| p * 2)
}

/// Sum `digits / 2` consecutive digit pairs from `start` and fold the sum
/// into a checksum byte per `kind`.
///
/// The first undecodable pair aborts with `None`. The sum wraps; only the
/// low byte matters.
pub fn checksum(buf: &SourceBuffer, start: u32, digits: u32, kind: Checksum) -> Option<u8> {
    let mut sum = 0u8;
    let mut pos = start;
    let end = start.saturating_add(digits);

    while pos < end {
        sum = sum.wrapping_add(decode_pair_at(buf, pos)?);
        pos = pos.saturating_add(2);
    }

    Some(match kind {
        Checksum::OnesComplement => !sum,
        Checksum::TwosComplement => sum.wrapping_neg(),
    })
}
