//! IPv4 header option records
//!
//! This module provides a zero-copy wrapper around the common option TLV
//! header and a high-level representation of every option kind the options
//! area can carry. Payloads that vary in size (route addresses, timestamp
//! entries, security flags, unknown data) borrow from the buffer they were
//! parsed from, so decoding never copies.

use crate::error::{Error, Result};
use crate::field;
use byteorder::{ByteOrder, NetworkEndian};
use core::fmt;
use core::net::Ipv4Addr;

/// Option type enumeration for the IPv4 options this crate decodes.
///
/// Any other type value is still accepted on the wire and represented as
/// [`OptionRepr::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OptionType {
    /// End of Option List (0x00) - single byte terminator
    EndOfOptionList = 0x00,
    /// No Operation (0x01) - single byte filler
    NoOperation = 0x01,
    /// Record Route (0x07)
    RecordRoute = 0x07,
    /// Quick-Start (0x19)
    QuickStart = 0x19,
    /// Internet Timestamp (0x44)
    Timestamp = 0x44,
    /// Basic Security (0x82)
    BasicSecurity = 0x82,
    /// Loose Source and Record Route (0x83)
    LooseSourceRoute = 0x83,
    /// Stream Identifier (0x88)
    StreamIdentifier = 0x88,
    /// Strict Source and Record Route (0x89)
    StrictSourceRoute = 0x89,
    /// Router Alert (0x94)
    RouterAlert = 0x94,
}

impl OptionType {
    /// Convert a u8 value to an OptionType.
    ///
    /// # Returns
    /// * `Some(OptionType)` if value matches a known option type
    /// * `None` if value is not a known option type
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(OptionType::EndOfOptionList),
            0x01 => Some(OptionType::NoOperation),
            0x07 => Some(OptionType::RecordRoute),
            0x19 => Some(OptionType::QuickStart),
            0x44 => Some(OptionType::Timestamp),
            0x82 => Some(OptionType::BasicSecurity),
            0x83 => Some(OptionType::LooseSourceRoute),
            0x88 => Some(OptionType::StreamIdentifier),
            0x89 => Some(OptionType::StrictSourceRoute),
            0x94 => Some(OptionType::RouterAlert),
            _ => None,
        }
    }

    /// Convert the OptionType to its u8 representation.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Whether options of this type consist of the type byte only.
    pub fn is_single_byte(&self) -> bool {
        is_single_byte(self.as_u8())
    }
}

fn is_single_byte(option_type: u8) -> bool {
    option_type == OptionType::EndOfOptionList.as_u8()
        || option_type == OptionType::NoOperation.as_u8()
}

/// Zero-copy wrapper around the type/length header of one option.
///
/// Wire format:
/// ```text
/// 0               1               2
/// 0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7 0 ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-
/// |C|Cls|  Number |    Length     |  Data ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-
/// ```
///
/// End of Option List and No Operation carry the type byte only.
#[derive(Debug, Clone, Copy)]
pub struct OptionHeader<T: AsRef<[u8]>> {
    buffer: T,
}

impl<T: AsRef<[u8]>> OptionHeader<T> {
    /// Create an OptionHeader without validation.
    ///
    /// This does not validate buffer length. Use `new_checked` for validation.
    pub fn new_unchecked(buffer: T) -> Self {
        OptionHeader { buffer }
    }

    /// Create an OptionHeader from a buffer with length validation.
    ///
    /// # Returns
    /// * `Ok(OptionHeader)` if the whole option fits the buffer
    /// * `Err(Error)` if the buffer is too short or the length byte is invalid
    pub fn new_checked(buffer: T) -> Result<Self> {
        let header = Self::new_unchecked(buffer);
        header.check_len()?;
        Ok(header)
    }

    /// Validate that the buffer holds the complete option.
    ///
    /// # Returns
    /// * `Err(Error::BufferTooShort)` if the header or the declared length
    ///   runs past the end of the buffer
    /// * `Err(Error::InvalidOptionLength)` if the length byte is below 2
    pub fn check_len(&self) -> Result<()> {
        let len = self.buffer.as_ref().len();
        if len == 0 {
            return Err(Error::BufferTooShort);
        }
        if self.is_single_byte() {
            return Ok(());
        }
        if len < field::option::HEADER_LEN {
            return Err(Error::BufferTooShort);
        }
        let length = self.length();
        if (length as usize) < field::option::HEADER_LEN {
            return Err(Error::InvalidOptionLength {
                option_type: self.option_type(),
                length,
            });
        }
        if length as usize > len {
            return Err(Error::BufferTooShort);
        }
        Ok(())
    }

    /// Get the Type field (1 byte at offset 0).
    pub fn option_type(&self) -> u8 {
        self.buffer.as_ref()[field::option::TYPE.start]
    }

    /// Whether the option consists of the type byte only.
    pub fn is_single_byte(&self) -> bool {
        is_single_byte(self.option_type())
    }

    /// Get the Length field (1 byte at offset 1).
    ///
    /// Only meaningful for options that are not single-byte.
    pub fn length(&self) -> u8 {
        self.buffer.as_ref()[field::option::LENGTH.start]
    }

    /// Total size of the option in bytes, header included.
    pub fn total_len(&self) -> usize {
        if self.is_single_byte() {
            1
        } else {
            self.length() as usize
        }
    }

    /// Get the option data following the type and length bytes.
    pub fn data(&self) -> &[u8] {
        if self.is_single_byte() {
            return &[];
        }
        &self.buffer.as_ref()[field::option::DATA(self.total_len())]
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> OptionHeader<T> {
    /// Set the Type field (1 byte at offset 0).
    pub fn set_option_type(&mut self, value: u8) {
        self.buffer.as_mut()[field::option::TYPE.start] = value;
    }

    /// Set the Length field (1 byte at offset 1).
    pub fn set_length(&mut self, value: u8) {
        self.buffer.as_mut()[field::option::LENGTH.start] = value;
    }

    /// Get a mutable view of the option data, sized by the Length field.
    pub fn data_mut(&mut self) -> &mut [u8] {
        if self.is_single_byte() {
            return &mut [];
        }
        let range = field::option::DATA(self.total_len());
        &mut self.buffer.as_mut()[range]
    }
}

/// The address list of a route option, four bytes per address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteAddresses<'a>(&'a [u8]);

impl<'a> RouteAddresses<'a> {
    /// An empty address list.
    pub const EMPTY: RouteAddresses<'static> = RouteAddresses(&[]);

    /// Wrap raw route data.
    ///
    /// # Returns
    /// * `None` if the length is not a multiple of 4
    pub fn new(bytes: &'a [u8]) -> Option<Self> {
        if bytes.len() % 4 != 0 {
            return None;
        }
        Some(RouteAddresses(bytes))
    }

    /// Number of addresses.
    pub fn len(&self) -> usize {
        self.0.len() / 4
    }

    /// Returns true if the list holds no address.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Address at `index`.
    pub fn get(&self, index: usize) -> Option<Ipv4Addr> {
        let start = index.checked_mul(4)?;
        let bytes = self.0.get(start..start.checked_add(4)?)?;
        Some(Ipv4Addr::from(NetworkEndian::read_u32(bytes)))
    }

    /// Iterate over the addresses in wire order.
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> + 'a {
        self.0
            .chunks_exact(4)
            .map(|chunk| Ipv4Addr::from(NetworkEndian::read_u32(chunk)))
    }

    /// Raw route data.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Index of the address slot a route pointer refers to.
    ///
    /// Equals `len()` when the route is exhausted.
    pub fn pointed_index(pointer: u8) -> usize {
        (pointer.saturating_sub(field::route_option::MIN_POINTER) / 4) as usize
    }
}

/// Content of the Timestamp option's flag nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TimestampFlag {
    /// Timestamps only (0)
    TimestampsOnly = 0,
    /// Each timestamp preceded by the recording address (1)
    AddressAndTimestamp = 1,
    /// Timestamps for prespecified addresses (3)
    PrespecifiedAddresses = 3,
}

impl TimestampFlag {
    /// Convert a u8 value to a TimestampFlag.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(TimestampFlag::TimestampsOnly),
            1 => Some(TimestampFlag::AddressAndTimestamp),
            3 => Some(TimestampFlag::PrespecifiedAddresses),
            _ => None,
        }
    }

    /// Convert the TimestampFlag to its u8 representation.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Size of one entry in the option data.
    pub fn entry_len(&self) -> usize {
        match self {
            TimestampFlag::TimestampsOnly => 4,
            TimestampFlag::AddressAndTimestamp | TimestampFlag::PrespecifiedAddresses => 8,
        }
    }
}

/// One entry of a Timestamp option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimestampEntry {
    /// Recording or prespecified address, absent for timestamps-only options.
    pub address: Option<Ipv4Addr>,
    /// Milliseconds since midnight UT, or a non-standard value with the high bit set.
    pub timestamp: u32,
}

/// The entry list of a Timestamp option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimestampData<'a> {
    flag: TimestampFlag,
    bytes: &'a [u8],
}

impl<'a> TimestampData<'a> {
    /// Wrap raw timestamp data.
    ///
    /// # Returns
    /// * `None` if the length is not a multiple of the flag's entry size
    pub fn new(flag: TimestampFlag, bytes: &'a [u8]) -> Option<Self> {
        if bytes.len() % flag.entry_len() != 0 {
            return None;
        }
        Some(TimestampData { flag, bytes })
    }

    /// The flag describing the entry layout.
    pub fn flag(&self) -> TimestampFlag {
        self.flag
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.flag.entry_len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Iterate over the entries in wire order.
    pub fn entries(&self) -> impl Iterator<Item = TimestampEntry> + 'a {
        let flag = self.flag;
        self.bytes
            .chunks_exact(flag.entry_len())
            .map(move |chunk| match flag {
                TimestampFlag::TimestampsOnly => TimestampEntry {
                    address: None,
                    timestamp: NetworkEndian::read_u32(chunk),
                },
                _ => TimestampEntry {
                    address: Some(Ipv4Addr::from(NetworkEndian::read_u32(&chunk[..4]))),
                    timestamp: NetworkEndian::read_u32(&chunk[4..]),
                },
            })
    }

    /// Raw entry data.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// A high-level representation of one IPv4 option.
///
/// Equality and hashing cover the type and the full payload. Use
/// [`OptionRepr::is_equivalent`] to compare by type only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionRepr<'a> {
    /// End of Option List.
    EndOfOptionList,
    /// No Operation.
    NoOperation,
    /// Record Route.
    RecordRoute {
        /// One-based offset of the next free slot.
        pointer: u8,
        /// Recorded addresses and free slots.
        addresses: RouteAddresses<'a>,
    },
    /// Loose Source and Record Route.
    LooseSourceRoute {
        /// One-based offset of the next address to process.
        pointer: u8,
        /// Source route.
        addresses: RouteAddresses<'a>,
    },
    /// Strict Source and Record Route.
    StrictSourceRoute {
        /// One-based offset of the next address to process.
        pointer: u8,
        /// Source route.
        addresses: RouteAddresses<'a>,
    },
    /// Stream Identifier.
    StreamIdentifier(u16),
    /// Router Alert.
    RouterAlert(u16),
    /// Quick-Start request or report.
    QuickStart {
        /// Function (0 = rate request, 8 = rate report).
        function: u8,
        /// Rate request or report, 4 bits.
        rate: u8,
        /// Quick-Start TTL.
        ttl: u8,
        /// 30-bit nonce.
        nonce: u32,
    },
    /// Internet Timestamp.
    Timestamp {
        /// One-based offset of the next free entry.
        pointer: u8,
        /// Number of modules that could not register, 4 bits.
        overflow: u8,
        /// Entries, laid out according to their flag.
        data: TimestampData<'a>,
    },
    /// Basic Security.
    BasicSecurity {
        /// Classification level.
        classification_level: u8,
        /// Protection authority flag bytes.
        protection_authority: &'a [u8],
    },
    /// Any other option, kept as raw data.
    Unknown {
        /// Type byte.
        option_type: u8,
        /// Bytes following the length byte.
        data: &'a [u8],
    },
}

impl<'a> OptionRepr<'a> {
    /// Parse one option from the start of `bytes`.
    ///
    /// `bytes` bounds how far the option may extend; whatever follows the
    /// option is ignored.
    ///
    /// # Returns
    /// * `Err(Error::BufferTooShort)` if the option is truncated
    /// * `Err(Error::InvalidOptionLength)` if the length byte does not suit the type
    /// * `Err(Error::MalformedOption)` if the payload is inconsistent
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let header = OptionHeader::new_checked(bytes)?;
        let option_type = header.option_type();
        let length = header.total_len();
        let option: &'a [u8] = &bytes[..length];

        let invalid_length = Error::InvalidOptionLength {
            option_type,
            length: length as u8,
        };

        let kind = match OptionType::from_u8(option_type) {
            Some(kind) => kind,
            None => {
                return Ok(OptionRepr::Unknown {
                    option_type,
                    data: &option[field::option::DATA(length)],
                });
            }
        };

        match kind {
            OptionType::EndOfOptionList => Ok(OptionRepr::EndOfOptionList),
            OptionType::NoOperation => Ok(OptionRepr::NoOperation),
            OptionType::RecordRoute
            | OptionType::LooseSourceRoute
            | OptionType::StrictSourceRoute => {
                if length < field::route_option::MIN_LEN {
                    return Err(invalid_length);
                }
                let addresses = RouteAddresses::new(&option[field::route_option::ADDRESSES(length)])
                    .ok_or(invalid_length)?;
                let pointer = option[field::route_option::POINTER.start];
                if pointer < field::route_option::MIN_POINTER || pointer % 4 != 0 {
                    return Err(Error::MalformedOption(option_type));
                }
                Ok(match kind {
                    OptionType::RecordRoute => OptionRepr::RecordRoute { pointer, addresses },
                    OptionType::LooseSourceRoute => OptionRepr::LooseSourceRoute { pointer, addresses },
                    _ => OptionRepr::StrictSourceRoute { pointer, addresses },
                })
            }
            OptionType::StreamIdentifier => {
                if length != field::stream_id_option::LEN {
                    return Err(invalid_length);
                }
                Ok(OptionRepr::StreamIdentifier(NetworkEndian::read_u16(
                    &option[field::stream_id_option::STREAM_ID],
                )))
            }
            OptionType::RouterAlert => {
                if length != field::router_alert_option::LEN {
                    return Err(invalid_length);
                }
                Ok(OptionRepr::RouterAlert(NetworkEndian::read_u16(
                    &option[field::router_alert_option::VALUE],
                )))
            }
            OptionType::QuickStart => {
                if length != field::quick_start_option::LEN {
                    return Err(invalid_length);
                }
                let function_and_rate = option[field::quick_start_option::FUNCTION_AND_RATE.start];
                Ok(OptionRepr::QuickStart {
                    function: function_and_rate >> 4,
                    rate: function_and_rate & 0x0F,
                    ttl: option[field::quick_start_option::TTL.start],
                    nonce: NetworkEndian::read_u32(&option[field::quick_start_option::NONCE]) >> 2,
                })
            }
            OptionType::Timestamp => {
                if length < field::timestamp_option::MIN_LEN {
                    return Err(invalid_length);
                }
                let pointer = option[field::timestamp_option::POINTER.start];
                let overflow_and_flag = option[field::timestamp_option::OVERFLOW_AND_FLAG.start];
                if pointer < field::timestamp_option::MIN_POINTER {
                    return Err(Error::MalformedOption(option_type));
                }
                let data = TimestampFlag::from_u8(overflow_and_flag & 0x0F)
                    .and_then(|flag| {
                        TimestampData::new(flag, &option[field::timestamp_option::DATA(length)])
                    })
                    .ok_or(Error::MalformedOption(option_type))?;
                Ok(OptionRepr::Timestamp {
                    pointer,
                    overflow: overflow_and_flag >> 4,
                    data,
                })
            }
            OptionType::BasicSecurity => {
                if length < field::security_option::MIN_LEN {
                    return Err(invalid_length);
                }
                Ok(OptionRepr::BasicSecurity {
                    classification_level: option[field::security_option::CLASSIFICATION_LEVEL.start],
                    protection_authority: &option[field::security_option::PROTECTION_AUTHORITY(length)],
                })
            }
        }
    }

    /// Check that every field fits its slot on the wire.
    ///
    /// # Returns
    /// * `Err(Error::OptionTooLong)` if the encoded size exceeds 255 bytes
    /// * `Err(Error::FieldOutOfRange)` if a Quick-Start function or rate is
    ///   wider than 4 bits, its nonce wider than 30 bits, or a Timestamp
    ///   overflow count wider than 4 bits
    pub fn check_emit(&self) -> Result<()> {
        let length = self.buffer_len();
        if length > usize::from(u8::MAX) {
            return Err(Error::OptionTooLong {
                option_type: self.option_type(),
                length,
            });
        }

        let fits = match *self {
            OptionRepr::QuickStart { function, rate, nonce, .. } => {
                function <= 0x0F && rate <= 0x0F && nonce <= field::quick_start_option::NONCE_MAX
            }
            OptionRepr::Timestamp { overflow, .. } => overflow <= 0x0F,
            _ => true,
        };
        if !fits {
            return Err(Error::FieldOutOfRange(self.option_type()));
        }
        Ok(())
    }

    /// Emit the option at the start of `buffer`.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of bytes written, to advance a write cursor by
    /// * `Err(Error::BufferTooShort)` if `buffer` is shorter than `buffer_len()`
    /// * Any error from [`check_emit`](Self::check_emit); nothing is written
    pub fn emit(&self, buffer: &mut [u8]) -> Result<usize> {
        self.check_emit()?;
        let length = self.buffer_len();
        let option = buffer.get_mut(..length).ok_or(Error::BufferTooShort)?;

        {
            let mut header = OptionHeader::new_unchecked(&mut *option);
            header.set_option_type(self.option_type());
            if length > 1 {
                header.set_length(length as u8);
            }
        }

        match *self {
            OptionRepr::EndOfOptionList | OptionRepr::NoOperation => {}
            OptionRepr::RecordRoute { pointer, addresses }
            | OptionRepr::LooseSourceRoute { pointer, addresses }
            | OptionRepr::StrictSourceRoute { pointer, addresses } => {
                option[field::route_option::POINTER.start] = pointer;
                option[field::route_option::ADDRESSES(length)].copy_from_slice(addresses.as_bytes());
            }
            OptionRepr::StreamIdentifier(id) => {
                NetworkEndian::write_u16(&mut option[field::stream_id_option::STREAM_ID], id);
            }
            OptionRepr::RouterAlert(value) => {
                NetworkEndian::write_u16(&mut option[field::router_alert_option::VALUE], value);
            }
            OptionRepr::QuickStart { function, rate, ttl, nonce } => {
                option[field::quick_start_option::FUNCTION_AND_RATE.start] = (function << 4) | (rate & 0x0F);
                option[field::quick_start_option::TTL.start] = ttl;
                NetworkEndian::write_u32(&mut option[field::quick_start_option::NONCE], nonce << 2);
            }
            OptionRepr::Timestamp { pointer, overflow, data } => {
                option[field::timestamp_option::POINTER.start] = pointer;
                option[field::timestamp_option::OVERFLOW_AND_FLAG.start] =
                    (overflow << 4) | data.flag().as_u8();
                option[field::timestamp_option::DATA(length)].copy_from_slice(data.as_bytes());
            }
            OptionRepr::BasicSecurity { classification_level, protection_authority } => {
                option[field::security_option::CLASSIFICATION_LEVEL.start] = classification_level;
                option[field::security_option::PROTECTION_AUTHORITY(length)]
                    .copy_from_slice(protection_authority);
            }
            OptionRepr::Unknown { data, .. } => {
                option[field::option::DATA(length)].copy_from_slice(data);
            }
        }

        Ok(length)
    }

    /// Encoded size in bytes, type and length bytes included.
    pub fn buffer_len(&self) -> usize {
        match *self {
            OptionRepr::EndOfOptionList | OptionRepr::NoOperation => 1,
            OptionRepr::RecordRoute { addresses, .. }
            | OptionRepr::LooseSourceRoute { addresses, .. }
            | OptionRepr::StrictSourceRoute { addresses, .. } => {
                field::route_option::MIN_LEN + addresses.as_bytes().len()
            }
            OptionRepr::StreamIdentifier(_) => field::stream_id_option::LEN,
            OptionRepr::RouterAlert(_) => field::router_alert_option::LEN,
            OptionRepr::QuickStart { .. } => field::quick_start_option::LEN,
            OptionRepr::Timestamp { data, .. } => field::timestamp_option::MIN_LEN + data.as_bytes().len(),
            OptionRepr::BasicSecurity { protection_authority, .. } => {
                field::security_option::MIN_LEN + protection_authority.len()
            }
            OptionRepr::Unknown { data, .. } => field::option::HEADER_LEN + data.len(),
        }
    }

    /// The type byte.
    pub fn option_type(&self) -> u8 {
        match *self {
            OptionRepr::Unknown { option_type, .. } => option_type,
            _ => self.kind().map_or(0, |kind| kind.as_u8()),
        }
    }

    /// The known option type, `None` for [`OptionRepr::Unknown`].
    pub fn kind(&self) -> Option<OptionType> {
        let kind = match self {
            OptionRepr::EndOfOptionList => OptionType::EndOfOptionList,
            OptionRepr::NoOperation => OptionType::NoOperation,
            OptionRepr::RecordRoute { .. } => OptionType::RecordRoute,
            OptionRepr::LooseSourceRoute { .. } => OptionType::LooseSourceRoute,
            OptionRepr::StrictSourceRoute { .. } => OptionType::StrictSourceRoute,
            OptionRepr::StreamIdentifier(_) => OptionType::StreamIdentifier,
            OptionRepr::RouterAlert(_) => OptionType::RouterAlert,
            OptionRepr::QuickStart { .. } => OptionType::QuickStart,
            OptionRepr::Timestamp { .. } => OptionType::Timestamp,
            OptionRepr::BasicSecurity { .. } => OptionType::BasicSecurity,
            OptionRepr::Unknown { .. } => return None,
        };
        Some(kind)
    }

    /// Whether a valid options area may hold at most one option of this type.
    pub fn appears_at_most_once(&self) -> bool {
        !matches!(
            self,
            OptionRepr::EndOfOptionList | OptionRepr::NoOperation | OptionRepr::Unknown { .. }
        )
    }

    /// Whether both options have the same type, regardless of payload.
    pub fn is_equivalent(&self, other: &OptionRepr<'_>) -> bool {
        self.option_type() == other.option_type()
    }

    /// Copied flag: whether fragmentation copies the option into every fragment.
    pub fn is_copied(&self) -> bool {
        self.option_type() & 0x80 != 0
    }

    /// Option class (0 = control, 2 = debugging and measurement).
    pub fn option_class(&self) -> u8 {
        (self.option_type() >> 5) & 0x03
    }

    /// Option number within its class.
    pub fn option_number(&self) -> u8 {
        self.option_type() & 0x1F
    }
}

impl fmt::Display for OptionRepr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionRepr::EndOfOptionList => write!(f, "EOL"),
            OptionRepr::NoOperation => write!(f, "NOP"),
            OptionRepr::RecordRoute { pointer, addresses } => {
                write!(f, "RR(ptr={}, addrs={})", pointer, addresses.len())
            }
            OptionRepr::LooseSourceRoute { pointer, addresses } => {
                write!(f, "LSRR(ptr={}, addrs={})", pointer, addresses.len())
            }
            OptionRepr::StrictSourceRoute { pointer, addresses } => {
                write!(f, "SSRR(ptr={}, addrs={})", pointer, addresses.len())
            }
            OptionRepr::StreamIdentifier(id) => write!(f, "SID({})", id),
            OptionRepr::RouterAlert(value) => write!(f, "RTRALT({})", value),
            OptionRepr::QuickStart { function, rate, ttl, .. } => {
                write!(f, "QS(fn={}, rate={}, ttl={})", function, rate, ttl)
            }
            OptionRepr::Timestamp { pointer, overflow, data } => {
                write!(f, "TS({:?}, ptr={}, ovf={})", data.flag(), pointer, overflow)
            }
            OptionRepr::BasicSecurity { classification_level, .. } => {
                write!(f, "SEC(level=0x{:02x})", classification_level)
            }
            OptionRepr::Unknown { option_type, data } => {
                write!(f, "UNK(type=0x{:02x}, len={})", option_type, data.len())
            }
        }
    }
}
