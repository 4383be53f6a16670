//! Incremental, line-oriented classification for firmware image text
//! formats: Motorola S-Record and Intel HEX.
//!
//! Each record occupies one line. The classifiers walk a buffer character
//! by character and commit a category (record marker, record type, byte
//! count, address, data, checksum, or plain default text) for every
//! position, re-validating each record's declared byte count and checksum
//! against what is actually on the line.
//!
//! # Motorola S-Record layout
//!
//! ```text
//!   field       digits          categories
//!
//! +----------+
//! | start    |  1 ('S')         RecordStart
//! +----------+
//! | type     |  1               RecType
//! +----------+
//! | count    |  2               ByteCount, ByteCountWrong
//! +----------+
//! | address  |  4/6/8           NoAddress, DataAddress, RecCount,
//! |          |                  StartAddress, (AddressFieldUnknown)
//! +----------+
//! | data     |  0..504/502/500  DataOdd, DataEven, (DataUnknown)
//! +----------+
//! | checksum |  2               Checksum, ChecksumWrong
//! +----------+
//! ```
//!
//! # Intel HEX layout
//!
//! ```text
//!   field       digits          categories
//!
//! +----------+
//! | start    |  1 (':')         RecordStart
//! +----------+
//! | count    |  2               ByteCount, ByteCountWrong
//! +----------+
//! | address  |  4               NoAddress, DataAddress,
//! |          |                  (AddressFieldUnknown)
//! +----------+
//! | type     |  2               RecType
//! +----------+
//! | data     |  0..510          DataOdd, DataEven, DataEmpty,
//! |          |                  ExtendedAddress, StartAddress,
//! |          |                  (DataUnknown)
//! +----------+
//! | checksum |  2               Checksum, ChecksumWrong
//! +----------+
//! ```
//!
//! # Malformed input
//!
//! Malformation is data, not failure: nothing here returns an error. A
//! wrong byte count or checksum classifies as [`Category::ByteCountWrong`]
//! or [`Category::ChecksumWrong`]; an unrecognized record type classifies
//! its fields as the `*Unknown` categories; a truncated line ends
//! classification for that line without ever reading the next line as part
//! of the broken record.
//!
//! # Resumability
//!
//! [`classify_srec`] and [`classify_ihex`] process an arbitrary
//! `[start, start + length)` slice of the buffer given only the
//! [`Category`] the previous invocation ended in. All record context
//! (byte count, field sizes, checksum position) is re-derived from the
//! buffer each step, so no parse state survives between calls.

pub mod category;
pub mod context;
pub mod fields;
pub mod ihex;
pub mod source_buffer;
pub mod srec;

pub use category::Category;
pub use context::{Span, SpanSink};
pub use ihex::{classify_ihex, classify_ihex_document};
pub use source_buffer::SourceBuffer;
pub use srec::{classify_srec, classify_srec_document};
