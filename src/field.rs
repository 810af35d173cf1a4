//! Field offset definitions for IPv4 header options wire structures.
//!
//! This module defines the byte offset ranges used to parse and construct the
//! options area of an IPv4 header and the individual options inside it.
//! All offsets are defined as const ranges or const functions so they fold
//! at compile time. Offsets inside an option are relative to the option's
//! type byte.
//!
//! # Wire Format Structure
//!
//! Options area (0..=40 bytes, multiple of 4):
//! ```text
//! +--------+--------+--------+--------+
//! | option | option | ...    | EOL/pad|
//! +--------+--------+--------+--------+
//! ```
//!
//! Single-byte option (End of Option List, No Operation):
//! ```text
//! +--------+
//! |  TYPE  |
//! +--------+
//! ```
//!
//! Any other option:
//! ```text
//! +--------+--------+-----------------+
//! |  TYPE  | LENGTH |  DATA (LENGTH-2)|
//! +--------+--------+-----------------+
//! ```

#![allow(non_snake_case)]

/// Type alias for a byte range (slice index range).
pub type Field = ::core::ops::Range<usize>;

/// IPv4 header sizes bounding the options area.
pub mod header {
    /// Header length without options.
    pub const MIN_HEADER_LEN: usize = 20;

    /// Largest header length an IHL of 15 can express.
    pub const MAX_HEADER_LEN: usize = 60;

    /// Largest options area: header max minus header min.
    pub const MAX_OPTIONS_LEN: usize = MAX_HEADER_LEN - MIN_HEADER_LEN;

    /// Options areas are padded to this boundary.
    pub const OPTIONS_ALIGNMENT: usize = 4;
}

/// Common option TLV header.
pub mod option {
    use crate::field::Field;

    /// Option type field (1 byte at offset 0).
    ///
    /// Bit 7 is the copied flag, bits 5-6 the class, bits 0-4 the number.
    pub const TYPE: Field = 0..1;

    /// Option length field (1 byte at offset 1).
    ///
    /// Counts the type and length bytes too. Absent for single-byte options.
    pub const LENGTH: Field = 1..2;

    /// Size of the type and length bytes.
    pub const HEADER_LEN: usize = LENGTH.end;

    /// Option data (variable length after the length byte).
    ///
    /// # Parameters
    ///
    /// * `length` - The value of the LENGTH field
    ///
    /// # Returns
    ///
    /// Field range covering the data bytes
    pub const fn DATA(length: usize) -> Field {
        HEADER_LEN..length
    }
}

/// Route option fields (Loose/Strict Source Route, Record Route).
pub mod route_option {
    use crate::field::Field;

    /// Pointer to the next address slot (1 byte at offset 2).
    ///
    /// One-based offset into the option; the smallest legal value is 4.
    pub const POINTER: Field = 2..3;

    /// Smallest legal pointer value.
    pub const MIN_POINTER: u8 = 4;

    /// Minimum option length (no addresses).
    pub const MIN_LEN: usize = POINTER.end;

    /// Route data: a list of IPv4 addresses.
    pub const fn ADDRESSES(length: usize) -> Field {
        POINTER.end..length
    }
}

/// Timestamp option fields.
pub mod timestamp_option {
    use crate::field::Field;

    /// Pointer to the next entry (1 byte at offset 2).
    pub const POINTER: Field = 2..3;

    /// Overflow (high nibble) and flag (low nibble) packed (1 byte at offset 3).
    pub const OVERFLOW_AND_FLAG: Field = 3..4;

    /// Smallest legal pointer value.
    pub const MIN_POINTER: u8 = 5;

    /// Minimum option length (no entries).
    pub const MIN_LEN: usize = OVERFLOW_AND_FLAG.end;

    /// Timestamp entries.
    pub const fn DATA(length: usize) -> Field {
        OVERFLOW_AND_FLAG.end..length
    }
}

/// Basic Security option fields (RFC 1108).
pub mod security_option {
    use crate::field::Field;

    /// Classification level (1 byte at offset 2).
    pub const CLASSIFICATION_LEVEL: Field = 2..3;

    /// Minimum option length (no protection authority flags).
    pub const MIN_LEN: usize = CLASSIFICATION_LEVEL.end;

    /// Protection authority flags (variable length).
    pub const fn PROTECTION_AUTHORITY(length: usize) -> Field {
        CLASSIFICATION_LEVEL.end..length
    }
}

/// Stream Identifier option fields (4 bytes total).
pub mod stream_id_option {
    use crate::field::Field;

    /// Stream identifier (2 bytes at offset 2-3).
    pub const STREAM_ID: Field = 2..4;

    /// Option length.
    pub const LEN: usize = STREAM_ID.end;
}

/// Router Alert option fields (4 bytes total).
pub mod router_alert_option {
    use crate::field::Field;

    /// Alert value (2 bytes at offset 2-3). 0 = examine packet.
    pub const VALUE: Field = 2..4;

    /// Option length.
    pub const LEN: usize = VALUE.end;
}

/// Quick-Start option fields (8 bytes total, RFC 4782).
pub mod quick_start_option {
    use crate::field::Field;

    /// Function (high nibble) and rate request (low nibble) (1 byte at offset 2).
    pub const FUNCTION_AND_RATE: Field = 2..3;

    /// Quick-Start TTL (1 byte at offset 3).
    pub const TTL: Field = 3..4;

    /// 30-bit nonce followed by 2 reserved bits (4 bytes at offset 4-7).
    pub const NONCE: Field = 4..8;

    /// Largest nonce that fits its 30 bits.
    pub const NONCE_MAX: u32 = 0x3FFF_FFFF;

    /// Option length.
    pub const LEN: usize = NONCE.end;
}
