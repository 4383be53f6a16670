//! Classification cursor and streaming span commit.
//!
//! [`ClassifyContext`] is the state both machines drive: a position inside
//! a half-open range, the category currently being assigned, and the
//! pending run of positions not yet committed. Runs flush to a [`SpanSink`]
//! whenever the category changes, so the committed spans tile the range
//! exactly, in order, without overlap.

use crate::category::Category;
use crate::fields::is_line_end;
use crate::source_buffer::SourceBuffer;

/// A committed run of positions sharing one category. Half-open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub category: Category,
}

impl Span {
    /// Length of the run in bytes.
    pub fn len(self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` for zero-length spans (never committed).
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// Streaming target for committed spans.
///
/// Spans arrive in position order as classification progresses, not as one
/// batch at the end. A `Vec<Span>` works as a collector in tests.
pub trait SpanSink {
    fn commit(&mut self, span: Span);
}

impl SpanSink for Vec<Span> {
    fn commit(&mut self, span: Span) {
        self.push(span);
    }
}

/// Cursor driving one classification pass over `[start, end)`.
///
/// Holds no record structure: the state machines re-derive byte counts and
/// field offsets from the buffer at every step, which is what makes an
/// invocation resumable from a bare [`Category`] tag.
pub struct ClassifyContext<'a, S: SpanSink> {
    buf: &'a SourceBuffer,
    sink: &'a mut S,
    pos: u32,
    end: u32,
    state: Category,
    /// Start of the pending (uncommitted) run.
    run_start: u32,
    /// Category of the most recently committed span.
    last_committed: Option<Category>,
}

impl<'a, S: SpanSink> ClassifyContext<'a, S> {
    /// Create a context over `[start, start + length)`, clamped to the
    /// buffer, resuming in `init`.
    pub fn new(
        buf: &'a SourceBuffer,
        start: u32,
        length: u32,
        init: Category,
        sink: &'a mut S,
    ) -> Self {
        let end = start.saturating_add(length).min(buf.len());
        Self {
            buf,
            sink,
            pos: start,
            end,
            state: init,
            run_start: start,
            last_committed: None,
        }
    }

    /// Returns `true` while positions remain in the range.
    #[inline]
    pub fn more(&self) -> bool {
        self.pos < self.end
    }

    /// Byte at the cursor.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf.byte_at(self.pos)
    }

    /// Cursor position.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Category currently being assigned.
    #[inline]
    pub fn state(&self) -> Category {
        self.state
    }

    /// Returns `true` if the cursor is at the first position of a line.
    pub fn at_line_start(&self) -> bool {
        self.buf.is_line_start(self.pos)
    }

    /// Returns `true` at a line-end byte, or at the range end.
    ///
    /// `\r` counts: no field span may cover any part of a line terminator,
    /// CRLF included.
    pub fn at_line_end(&self) -> bool {
        self.pos >= self.end || is_line_end(self.current())
    }

    /// Switch category at the cursor, committing the pending run.
    pub fn set_state(&mut self, category: Category) {
        if category != self.state {
            self.flush();
            self.state = category;
        }
    }

    /// Advance one position, clamped at the range end.
    pub fn forward(&mut self) {
        if self.pos < self.end {
            self.pos += 1;
        }
    }

    /// Advance `n` positions, aborting at a line end.
    ///
    /// If the cursor sits on a line end before any step, the line is too
    /// short for the field being classified: force [`Category::Default`],
    /// advance exactly one position, and return `false`. This guarantees
    /// forward progress and keeps a malformed record from claiming
    /// characters of the next line. Non-positive `n` advances nothing.
    pub fn forward_within_line(&mut self, n: i32) -> bool {
        for _ in 0..n {
            if self.at_line_end() {
                self.set_state(Category::Default);
                self.forward();
                return false;
            }
            self.forward();
        }
        true
    }

    /// Commit the final run and return the resumption tag.
    ///
    /// The tag is the category of the last committed position, which is
    /// what an invocation continuing at the range end must be resumed in.
    /// An empty range hands the initial state back unchanged.
    pub fn finish(mut self) -> Category {
        self.flush();
        self.last_committed.unwrap_or(self.state)
    }

    fn flush(&mut self) {
        if self.run_start < self.pos {
            self.sink.commit(Span {
                start: self.run_start,
                end: self.pos,
                category: self.state,
            });
            self.last_committed = Some(self.state);
        }
        self.run_start = self.pos;
    }
}
