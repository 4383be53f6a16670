use super::*;
use pretty_assertions::assert_eq;

// === byte_at ===

#[test]
fn byte_at_returns_source_bytes() {
    let buf = SourceBuffer::new("S915");
    assert_eq!(buf.byte_at(0), b'S');
    assert_eq!(buf.byte_at(3), b'5');
}

#[test]
fn byte_at_past_end_returns_sentinel() {
    let buf = SourceBuffer::new("ab");
    assert_eq!(buf.byte_at(2), SENTINEL);
    assert_eq!(buf.byte_at(100), SENTINEL);
    assert_eq!(buf.byte_at(u32::MAX), SENTINEL);
}

#[test]
fn byte_at_on_empty_source() {
    let buf = SourceBuffer::new("");
    assert!(buf.is_empty());
    assert_eq!(buf.byte_at(0), SENTINEL);
}

// === Line table ===

#[test]
fn single_line_without_terminator() {
    let buf = SourceBuffer::new("abc");
    assert_eq!(buf.line_count(), 1);
    assert_eq!(buf.line_of(0), 0);
    assert_eq!(buf.line_of(2), 0);
}

#[test]
fn lf_starts_new_line() {
    let buf = SourceBuffer::new("ab\ncd");
    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.line_of(1), 0);
    assert_eq!(buf.line_of(2), 0); // terminator belongs to its line
    assert_eq!(buf.line_of(3), 1);
    assert_eq!(buf.line_start(1), 3);
}

#[test]
fn crlf_is_one_terminator() {
    let buf = SourceBuffer::new("ab\r\ncd");
    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.line_of(2), 0); // '\r'
    assert_eq!(buf.line_of(3), 0); // '\n'
    assert_eq!(buf.line_of(4), 1);
    assert_eq!(buf.line_start(1), 4);
}

#[test]
fn lone_cr_starts_new_line() {
    let buf = SourceBuffer::new("ab\rcd");
    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.line_of(2), 0);
    assert_eq!(buf.line_of(3), 1);
    assert_eq!(buf.line_start(1), 3);
}

#[test]
fn trailing_newline_opens_empty_last_line() {
    let buf = SourceBuffer::new("ab\n");
    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.line_start(1), 3);
    // Past-the-end positions resolve to the last line.
    assert_eq!(buf.line_of(3), 1);
    assert_eq!(buf.line_of(100), 1);
}

#[test]
fn empty_source_has_one_line() {
    let buf = SourceBuffer::new("");
    assert_eq!(buf.line_count(), 1);
    assert_eq!(buf.line_of(0), 0);
    assert_eq!(buf.line_start(0), 0);
}

#[test]
fn line_start_past_last_line_is_len() {
    let buf = SourceBuffer::new("ab\ncd");
    assert_eq!(buf.line_start(2), 5);
    assert_eq!(buf.line_start(100), 5);
}

// === is_line_start ===

#[test]
fn is_line_start_at_zero_and_after_terminators() {
    let buf = SourceBuffer::new("ab\ncd\r\nef");
    assert!(buf.is_line_start(0));
    assert!(!buf.is_line_start(1));
    assert!(buf.is_line_start(3));
    assert!(!buf.is_line_start(6)); // the '\n' of CRLF
    assert!(buf.is_line_start(7));
}

#[test]
fn consecutive_newlines_each_start_a_line() {
    let buf = SourceBuffer::new("\n\n\n");
    assert_eq!(buf.line_count(), 4);
    assert!(buf.is_line_start(0));
    assert!(buf.is_line_start(1));
    assert!(buf.is_line_start(2));
}
