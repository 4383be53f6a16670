//! Field categories committed by the classifiers.
//!
//! One closed `repr(u8)` enumeration covers both formats; each classifier
//! simply never produces the variants belonging to the other format. The
//! category a previous invocation ended in doubles as the resumption tag
//! for the next one, so the whole resumable-classification contract rides
//! on this single byte.

/// Category of one classified run of characters.
///
/// Discriminants are grouped in fixed semantic ranges:
///
/// ```text
/// Record framing:   0-15
/// Byte count:      16-31
/// Address field:   32-47
/// Data field:      48-63
/// Checksum:        64-79
/// ```
///
/// The values are stable public API: embedders persist them as resumption
/// tags and map them to presentation styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Category {
    /// Text outside any record, including line terminators.
    #[default]
    Default = 0,
    /// The record marker: `S` for S-Record, `:` for Intel HEX.
    RecordStart = 1,
    /// Record type: the digit after `S`, or the Intel HEX type byte pair.
    RecType = 2,

    /// Byte count field matching the record's actual content.
    ByteCount = 16,
    /// Byte count field contradicting the record's actual content.
    ByteCountWrong = 17,

    /// Address field of a record that carries no address (S0 header).
    NoAddress = 32,
    /// Load address of a data record.
    DataAddress = 33,
    /// Record count of an S5/S6 record.
    RecCount = 34,
    /// Execution start address (S7/S8/S9, or Intel HEX start records).
    StartAddress = 35,
    /// Address field of an unrecognized record type.
    AddressFieldUnknown = 36,

    /// Odd-numbered data byte pair (first, third, ...).
    DataOdd = 48,
    /// Even-numbered data byte pair (second, fourth, ...).
    DataEven = 49,
    /// Zero-length data field of an Intel HEX end-of-file record.
    DataEmpty = 50,
    /// Data field holding an Intel HEX extended segment/linear address.
    ExtendedAddress = 51,
    /// Data field of an unrecognized record type.
    DataUnknown = 52,

    /// Checksum field matching the computed checksum.
    Checksum = 64,
    /// Checksum field that fails to decode or to match.
    ChecksumWrong = 65,
}

impl Category {
    /// Returns `true` for the address-field categories.
    pub fn is_address_field(self) -> bool {
        matches!(
            self,
            Self::NoAddress
                | Self::DataAddress
                | Self::RecCount
                | Self::StartAddress
                | Self::AddressFieldUnknown
        )
    }

    /// Returns `true` for the data-field categories.
    pub fn is_data_field(self) -> bool {
        matches!(
            self,
            Self::DataOdd
                | Self::DataEven
                | Self::DataEmpty
                | Self::ExtendedAddress
                | Self::DataUnknown
        )
    }

    /// Returns `true` for the categories that flag a failed validation.
    pub fn is_mismatch(self) -> bool {
        matches!(self, Self::ByteCountWrong | Self::ChecksumWrong)
    }

    /// Returns `true` for the categories of an unrecognized record type.
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::AddressFieldUnknown | Self::DataUnknown)
    }

    /// Stable lowercase name, for diagnostics and span dumps.
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::RecordStart => "record-start",
            Self::RecType => "record-type",
            Self::ByteCount => "byte-count",
            Self::ByteCountWrong => "byte-count-wrong",
            Self::NoAddress => "no-address",
            Self::DataAddress => "data-address",
            Self::RecCount => "record-count",
            Self::StartAddress => "start-address",
            Self::AddressFieldUnknown => "address-field-unknown",
            Self::DataOdd => "data-odd",
            Self::DataEven => "data-even",
            Self::DataEmpty => "data-empty",
            Self::ExtendedAddress => "extended-address",
            Self::DataUnknown => "data-unknown",
            Self::Checksum => "checksum",
            Self::ChecksumWrong => "checksum-wrong",
        }
    }
}
