/// Error type for datagram access and IPv4 options parsing/serialization.
///
/// Only [`OptionList::new`](crate::option_list::OptionList::new), the
/// emitters and the checked constructors return these as hard failures. Decoding an
/// options area never fails; the error that stopped it is kept on the
/// resulting list instead.
///
/// # Examples
///
/// ```
/// use ipv4_options_wire::error::Error;
/// use ipv4_options_wire::datagram::Datagram;
///
/// let buffer = [0u8; 4];
/// let result: Result<Datagram<&[u8]>, Error> = Datagram::with_range(&buffer[..], 2, 4);
/// assert_eq!(result.unwrap_err(), Error::BufferTooShort);
/// ```
#[derive(PartialEq, Debug, Clone, Copy, Eq, thiserror::Error)]
pub enum Error {
    /// Buffer is too short for the expected data structure.
    ///
    /// This occurs when:
    /// - A datagram range does not fit its backing buffer
    /// - An option's header or declared length runs past the remaining bytes
    /// - An emit target is smaller than the encoded length
    #[error("buffer too short for expected structure")]
    BufferTooShort,

    /// An option's length byte is inconsistent with its type.
    #[error("invalid length {length} for option type 0x{option_type:02x}")]
    InvalidOptionLength {
        /// Type tag of the offending option.
        option_type: u8,
        /// Length byte found on the wire.
        length: u8,
    },

    /// An option's payload does not follow the layout of its type
    /// (bad pointer, unknown timestamp flag, ragged address list).
    #[error("malformed option of type 0x{0:02x}")]
    MalformedOption(u8),

    /// A second occurrence of an option that may appear at most once.
    #[error("duplicate option of type 0x{0:02x}")]
    DuplicateOption(u8),

    /// An option's encoded size does not fit its one-byte length field.
    #[error("option of type 0x{option_type:02x} is {length} bytes, more than a length byte can hold")]
    OptionTooLong {
        /// Type tag of the offending option.
        option_type: u8,
        /// Encoded size the option would need.
        length: usize,
    },

    /// A field holds a value wider than its slot on the wire.
    #[error("field value out of range for option type 0x{0:02x}")]
    FieldOutOfRange(u8),

    /// Padded options length exceeds the IPv4 options area.
    #[error("options length {0} exceeds the maximum of 40 bytes")]
    OptionsTooLong(usize),

    /// More records than an options area can hold.
    #[error("too many options")]
    TooManyOptions,
}

/// Result type alias using the crate's Error type.
pub type Result<T> = core::result::Result<T, Error>;
