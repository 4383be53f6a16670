//! Motorola S-Record field resolution and classification.
//!
//! Layout per record: `S`, one type digit, a two-digit byte count, a
//! 16/24/32-bit address (width selected by the type digit), data, and a
//! two-digit one's-complement checksum over everything after the type
//! digit.
//!
//! Resolver functions take a record start position and re-read the record
//! from the buffer on every call; nothing is cached between steps.

use crate::category::Category;
use crate::context::{ClassifyContext, SpanSink};
use crate::fields::{self, digit_width, Checksum};
use crate::source_buffer::SourceBuffer;

/// Digits of the `S` marker, type, and byte count fields. The byte count
/// declares everything after these.
const HEADER_DIGITS: i32 = 4;

/// Position of the `S` marker of the record around `pos`.
///
/// Scans backward until an `S` is found. Callers only invoke this from
/// inside a record, where the marker exists on the current line; on input
/// violating that, the scan stops at position 0.
pub fn find_record_start(buf: &SourceBuffer, pos: u32) -> u32 {
    let mut pos = pos;
    while pos > 0 && buf.byte_at(pos) != b'S' {
        pos -= 1;
    }
    pos
}

/// Declared byte count: the digit pair at offset 2, covering the address,
/// data, and checksum fields. An undecodable count reads as 0.
pub fn byte_count(buf: &SourceBuffer, rec_start: u32) -> i32 {
    fields::decode_pair_at(buf, rec_start.saturating_add(2)).map_or(0, i32::from)
}

/// Actual digit pairs on the line after the marker, type, and count
/// fields. Negative if the line is shorter than those fields.
pub fn counted_byte_count(buf: &SourceBuffer, rec_start: u32) -> i32 {
    fields::count_digit_pairs(buf, rec_start, HEADER_DIGITS)
}

/// Address field width in bytes, selected by the type digit. Zero for an
/// unrecognized type.
pub fn address_field_size(buf: &SourceBuffer, rec_start: u32) -> i32 {
    match buf.byte_at(rec_start.saturating_add(1)) {
        b'0' | b'1' | b'5' | b'9' => 2, // 16 bit
        b'2' | b'6' | b'8' => 3,        // 24 bit
        b'3' | b'7' => 4,               // 32 bit
        _ => 0,
    }
}

/// Meaning of the address field, selected by the type digit.
pub fn address_field_type(buf: &SourceBuffer, rec_start: u32) -> Category {
    match buf.byte_at(rec_start.saturating_add(1)) {
        b'0' => Category::NoAddress,
        b'1' | b'2' | b'3' => Category::DataAddress,
        b'5' | b'6' => Category::RecCount,
        b'7' | b'8' | b'9' => Category::StartAddress,
        // Possible future format extension.
        _ => Category::AddressFieldUnknown,
    }
}

/// Declared checksum: the digit pair after the declared byte count.
pub fn checksum_value(buf: &SourceBuffer, rec_start: u32) -> Option<u8> {
    let offset = 2u32.saturating_add(digit_width(byte_count(buf, rec_start)));
    fields::decode_pair_at(buf, rec_start.saturating_add(offset))
}

/// Checksum computed over the count, address, and data fields.
pub fn computed_checksum(buf: &SourceBuffer, rec_start: u32) -> Option<u8> {
    fields::checksum(
        buf,
        rec_start.saturating_add(2),
        digit_width(byte_count(buf, rec_start)),
        Checksum::OnesComplement,
    )
}

/// Classify `[start, start + length)` as S-Record text, resuming in
/// `init`, committing spans to `sink`.
///
/// Returns the resumption tag: the category of the last classified
/// position, to be passed as `init` when classification continues at
/// `start + length`.
pub fn classify_srec(
    buf: &SourceBuffer,
    start: u32,
    length: u32,
    init: Category,
    sink: &mut impl SpanSink,
) -> Category {
    let mut sc = ClassifyContext::new(buf, start, length, init, sink);

    while sc.more() {
        match sc.state() {
            Category::Default => {
                if sc.at_line_start() && sc.current() == b'S' {
                    sc.set_state(Category::RecordStart);
                }
                sc.forward_within_line(1);
            }

            Category::RecordStart => {
                sc.set_state(Category::RecType);
                sc.forward_within_line(1);
            }

            Category::RecType => {
                let rec_start = sc.pos().saturating_sub(2);

                if byte_count(buf, rec_start) == counted_byte_count(buf, rec_start) {
                    sc.set_state(Category::ByteCount);
                } else {
                    sc.set_state(Category::ByteCountWrong);
                }

                sc.forward_within_line(2);
            }

            Category::ByteCount | Category::ByteCountWrong => {
                let rec_start = sc.pos().saturating_sub(4);
                let addr_size = address_field_size(buf, rec_start);

                sc.set_state(address_field_type(buf, rec_start));
                sc.forward_within_line(addr_size * 2);
            }

            Category::NoAddress
            | Category::DataAddress
            | Category::RecCount
            | Category::StartAddress
            | Category::AddressFieldUnknown => {
                let rec_start = find_record_start(buf, sc.pos());
                let addr_size = address_field_size(buf, rec_start);
                // Checksum byte is part of the declared count.
                let data_size = byte_count(buf, rec_start) - addr_size - 1;

                if sc.state() == Category::AddressFieldUnknown {
                    sc.set_state(Category::DataUnknown);
                    sc.forward_within_line(data_size * 2);
                } else {
                    sc.set_state(Category::DataOdd);

                    for i in 0..data_size * 2 {
                        if i & 0x3 == 0 {
                            sc.set_state(Category::DataOdd);
                        } else if i & 0x3 == 2 {
                            sc.set_state(Category::DataEven);
                        }

                        if !sc.forward_within_line(1) {
                            break;
                        }
                    }
                }
            }

            Category::DataOdd | Category::DataEven | Category::DataUnknown => {
                let rec_start = find_record_start(buf, sc.pos());
                let declared = checksum_value(buf, rec_start);
                let computed = computed_checksum(buf, rec_start);

                match (declared, computed) {
                    (Some(a), Some(b)) if a == b => sc.set_state(Category::Checksum),
                    _ => sc.set_state(Category::ChecksumWrong),
                }

                sc.forward_within_line(2);
            }

            Category::Checksum | Category::ChecksumWrong => {
                // Record finished.
                sc.set_state(Category::Default);
                sc.forward_within_line(1);
            }

            // Tags only the Intel HEX classifier produces: not a state this
            // machine can be resumed in, reclassify as plain text.
            Category::DataEmpty | Category::ExtendedAddress => {
                sc.set_state(Category::Default);
            }
        }
    }

    sc.finish()
}

/// Classify an entire buffer as S-Record text from a fresh state.
pub fn classify_srec_document(buf: &SourceBuffer, sink: &mut impl SpanSink) -> Category {
    classify_srec(buf, 0, buf.len(), Category::Default, sink)
}
