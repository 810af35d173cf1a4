//! Options area module
//!
//! This module contains `OptionList`, the ordered and padded collection of
//! options that fills the variable part of an IPv4 header.
//!
//! There are two ways to obtain one:
//!
//! - [`OptionList::new`] builds a list for sending. It appends an End of
//!   Option List where needed, computes the padded length and refuses lists
//!   that do not fit the 40 byte options area.
//! - [`OptionList::parse`] decodes a received options area. It never fails:
//!   decoding stops at the first malformed or repeated option and the list is
//!   flagged invalid, keeping every option decoded before that point.

use crate::datagram::{Datagram, Validity};
use crate::error::{Error, Result};
use crate::field;
use crate::options::{OptionRepr, OptionType};
use core::fmt;
use core::hash::{Hash, Hasher};
use heapless::Vec;
use tracing::{debug, trace};

/// Upper bound on the number of options in one list.
///
/// Every option takes at least one byte of the options area.
pub const MAX_OPTIONS: usize = field::header::MAX_OPTIONS_LEN;

/// The shared empty options area.
pub static NO_OPTIONS: OptionList<'static> = OptionList::empty();

/// An ordered list of IPv4 options together with its encoded length.
///
/// Equality and hashing cover the encoded length and the options in order;
/// the validity flag does not take part.
///
/// # Examples
///
/// ```
/// use ipv4_options_wire::option_list::OptionList;
/// use ipv4_options_wire::options::OptionRepr;
///
/// let list = OptionList::new([OptionRepr::StreamIdentifier(7), OptionRepr::NoOperation]).unwrap();
/// assert_eq!(list.bytes_len(), 8);
///
/// let mut buffer = [0u8; 8];
/// list.emit(&mut buffer).unwrap();
/// assert_eq!(buffer, [0x88, 0x04, 0x00, 0x07, 0x01, 0x00, 0x00, 0x00]);
///
/// let parsed = OptionList::parse(&buffer);
/// assert!(parsed.is_valid());
/// assert_eq!(parsed, list);
/// ```
#[derive(Debug, Clone)]
pub struct OptionList<'a> {
    options: Vec<OptionRepr<'a>, MAX_OPTIONS>,
    bytes_len: usize,
    error: Option<Error>,
}

impl<'a> OptionList<'a> {
    /// An empty, valid list.
    pub const fn empty() -> Self {
        OptionList {
            options: Vec::new(),
            bytes_len: 0,
            error: None,
        }
    }

    /// The shared empty list.
    pub fn none() -> &'static OptionList<'static> {
        &NO_OPTIONS
    }

    /// Build a list for sending.
    ///
    /// If the options are not empty, do not already end with an End of
    /// Option List and do not fill a multiple of 4 bytes, an End of Option
    /// List is appended. The encoded length is then padded to a multiple of 4.
    ///
    /// At-most-once options are not checked here.
    ///
    /// # Returns
    /// * `Err(Error::OptionsTooLong)` if the padded length exceeds 40 bytes
    /// * Any error from [`OptionRepr::check_emit`] for an option whose fields
    ///   do not fit the wire
    pub fn new<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = OptionRepr<'a>>,
    {
        let mut list: Vec<OptionRepr<'a>, MAX_OPTIONS> = Vec::new();
        let mut unpadded: usize = 0;
        let mut overflow = false;

        for option in options {
            option.check_emit()?;
            unpadded += option.buffer_len();
            overflow |= list.push(option).is_err();
        }

        let needs_end = match list.last() {
            None => false,
            Some(last) if last.is_equivalent(&OptionRepr::EndOfOptionList) => false,
            Some(_) => unpadded % field::header::OPTIONS_ALIGNMENT != 0,
        };
        if needs_end {
            unpadded += OptionRepr::EndOfOptionList.buffer_len();
            overflow |= list.push(OptionRepr::EndOfOptionList).is_err();
        }

        let bytes_len = unpadded.next_multiple_of(field::header::OPTIONS_ALIGNMENT);
        if overflow || bytes_len > field::header::MAX_OPTIONS_LEN {
            debug!(bytes_len, "options do not fit the options area");
            return Err(Error::OptionsTooLong(bytes_len));
        }

        Ok(OptionList {
            options: list,
            bytes_len,
            error: None,
        })
    }

    /// Decode a received options area.
    ///
    /// Decoding walks `bytes` until they are exhausted or an End of Option
    /// List has been read; both leave the list valid. A malformed option, a
    /// second occurrence of an at-most-once option or running out of room
    /// stops decoding and marks the list invalid; the offending option is not
    /// included.
    ///
    /// The encoded length of the result is `bytes.len()`, trailing padding
    /// included.
    pub fn parse(bytes: &'a [u8]) -> Self {
        let mut options: Vec<OptionRepr<'a>, MAX_OPTIONS> = Vec::new();
        let mut error = None;
        let mut cursor = 0;

        while cursor != bytes.len() {
            let option = match OptionRepr::parse(&bytes[cursor..]) {
                Ok(option) => option,
                Err(err) => {
                    error = Some(err);
                    break;
                }
            };

            if option.appears_at_most_once() && options.iter().any(|seen| seen.is_equivalent(&option)) {
                error = Some(Error::DuplicateOption(option.option_type()));
                break;
            }

            if options.push(option).is_err() {
                error = Some(Error::TooManyOptions);
                break;
            }
            trace!(offset = cursor, %option, "decoded option");

            cursor += option.buffer_len();
            if option == OptionRepr::EndOfOptionList {
                break;
            }
        }

        if let Some(err) = error {
            debug!(offset = cursor, decoded = options.len(), error = %err, "invalid options area");
        }

        OptionList {
            options,
            bytes_len: bytes.len(),
            error,
        }
    }

    /// Decode the options area covered by a datagram.
    pub fn from_datagram<T, C>(datagram: &'a Datagram<T, C>) -> Self
    where
        T: AsRef<[u8]>,
        C: Validity,
    {
        Self::parse(datagram.as_slice())
    }

    /// Emit the options at the start of `buffer`, zero filling up to
    /// `bytes_len()`.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of bytes written, always `bytes_len()`
    /// * `Err(Error::BufferTooShort)` if `buffer` is shorter than `bytes_len()`
    pub fn emit(&self, buffer: &mut [u8]) -> Result<usize> {
        if buffer.len() < self.bytes_len {
            return Err(Error::BufferTooShort);
        }

        let mut cursor = 0;
        for option in &self.options {
            cursor += option.emit(&mut buffer[cursor..])?;
        }
        buffer[cursor..self.bytes_len].fill(0);

        Ok(self.bytes_len)
    }

    /// Encoded length in bytes, padding included.
    pub fn bytes_len(&self) -> usize {
        self.bytes_len
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Returns true if there are no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Whether decoding consumed the options area without a violation.
    ///
    /// Always true for lists built with [`OptionList::new`].
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The reason decoding stopped early, if it did.
    pub fn error(&self) -> Option<Error> {
        self.error
    }

    /// The options in encoding order.
    pub fn as_slice(&self) -> &[OptionRepr<'a>] {
        &self.options
    }

    /// Iterate over the options in encoding order.
    pub fn iter(&self) -> core::slice::Iter<'_, OptionRepr<'a>> {
        self.options.iter()
    }

    /// Option at `index`.
    pub fn get(&self, index: usize) -> Option<&OptionRepr<'a>> {
        self.options.get(index)
    }

    /// First option of the given type.
    pub fn find(&self, kind: OptionType) -> Option<&OptionRepr<'a>> {
        self.options.iter().find(|option| option.kind() == Some(kind))
    }
}

impl Default for OptionList<'_> {
    fn default() -> Self {
        OptionList::empty()
    }
}

impl<'l, 'a> IntoIterator for &'l OptionList<'a> {
    type Item = &'l OptionRepr<'a>;
    type IntoIter = core::slice::Iter<'l, OptionRepr<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for OptionList<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes_len == other.bytes_len && self.options.as_slice() == other.options.as_slice()
    }
}

impl Eq for OptionList<'_> {}

/// Hashes `bytes_len` and then the options in order. Equality is
/// order-sensitive, so an order-insensitive xor-fold of per-option hashes
/// would only add collisions between lists that never compare equal.
impl Hash for OptionList<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes_len.hash(state);
        self.options.as_slice().hash(state);
    }
}

impl fmt::Display for OptionList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "IPv4 Options: len={}, valid={}, [", self.bytes_len, self.is_valid())?;
        for (index, option) in self.options.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", option)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RouteAddresses;
    use std::hash::DefaultHasher;

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_new_empty() {
        let list = OptionList::new([]).unwrap();
        assert_eq!(list.bytes_len(), 0);
        assert!(list.is_valid());
        assert!(list.is_empty());
        assert_eq!(&list, OptionList::none());
    }

    #[test]
    fn test_no_options_singleton() {
        assert!(core::ptr::eq(OptionList::none(), &NO_OPTIONS));
        assert!(NO_OPTIONS.is_valid());
        assert_eq!(NO_OPTIONS.bytes_len(), 0);
        assert_eq!(NO_OPTIONS, OptionList::default());
    }

    #[test]
    fn test_new_appends_end_of_list() {
        let record_route = OptionRepr::RecordRoute { pointer: 4, addresses: RouteAddresses::EMPTY };
        assert_eq!(record_route.buffer_len(), 3);

        let list = OptionList::new([record_route]).unwrap();
        assert_eq!(list.as_slice(), &[record_route, OptionRepr::EndOfOptionList]);
        assert_eq!(list.bytes_len(), 4);
    }

    #[test]
    fn test_new_appends_end_of_list_and_pads() {
        let list = OptionList::new([OptionRepr::StreamIdentifier(1), OptionRepr::NoOperation]).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(2), Some(&OptionRepr::EndOfOptionList));
        assert_eq!(list.bytes_len(), 8);
    }

    #[test]
    fn test_new_aligned_options_are_left_alone() {
        let list = OptionList::new([OptionRepr::RouterAlert(0)]).unwrap();
        assert_eq!(list.as_slice(), &[OptionRepr::RouterAlert(0)]);
        assert_eq!(list.bytes_len(), 4);
    }

    #[test]
    fn test_new_existing_end_of_list_is_padded() {
        let list = OptionList::new([OptionRepr::NoOperation, OptionRepr::EndOfOptionList]).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.bytes_len(), 4);
    }

    #[test]
    fn test_new_does_not_check_duplicates() {
        let list = OptionList::new([OptionRepr::RouterAlert(0), OptionRepr::RouterAlert(1)]).unwrap();
        assert!(list.is_valid());
        assert_eq!(list.bytes_len(), 8);
    }

    #[test]
    fn test_new_max_length() {
        let data = [0u8; 39];

        let exact = OptionList::new([OptionRepr::Unknown { option_type: 0x9e, data: &data[..38] }]).unwrap();
        assert_eq!(exact.bytes_len(), 40);

        let too_long = OptionList::new([OptionRepr::Unknown { option_type: 0x9e, data: &data[..] }]);
        assert_eq!(too_long.unwrap_err(), Error::OptionsTooLong(44));
    }

    #[test]
    fn test_new_too_many_options() {
        let nops = [OptionRepr::NoOperation; 40];
        assert_eq!(OptionList::new(nops).unwrap().bytes_len(), 40);

        let nops = [OptionRepr::NoOperation; 41];
        assert_eq!(OptionList::new(nops).unwrap_err(), Error::OptionsTooLong(44));
    }

    #[test]
    fn test_new_rejects_fields_wider_than_their_slot() {
        let quick_start = OptionRepr::QuickStart { function: 0, rate: 20, ttl: 1, nonce: 0 };
        assert_eq!(OptionList::new([quick_start]).unwrap_err(), Error::FieldOutOfRange(0x19));
    }

    #[test]
    fn test_emit_zero_fills_padding() {
        let list = OptionList::new([OptionRepr::StreamIdentifier(0x0102), OptionRepr::NoOperation]).unwrap();
        let mut buffer = [0xffu8; 10];
        assert_eq!(list.emit(&mut buffer), Ok(8));
        assert_eq!(buffer, [0x88, 0x04, 0x01, 0x02, 0x01, 0x00, 0x00, 0x00, 0xff, 0xff]);
    }

    #[test]
    fn test_emit_buffer_too_short() {
        let list = OptionList::new([OptionRepr::StreamIdentifier(1)]).unwrap();
        let mut buffer = [0u8; 3];
        assert_eq!(list.emit(&mut buffer), Err(Error::BufferTooShort));
    }

    #[test]
    fn test_parse_empty() {
        let list = OptionList::parse(&[]);
        assert!(list.is_valid());
        assert_eq!(list, NO_OPTIONS);
    }

    #[test]
    fn test_parse_stops_at_end_of_list() {
        let bytes = [0x88, 0x04, 0x00, 0x01, 0x00, 0xde, 0xad, 0xbe];
        let list = OptionList::parse(&bytes);
        assert!(list.is_valid());
        assert_eq!(list.as_slice(), &[OptionRepr::StreamIdentifier(1), OptionRepr::EndOfOptionList]);
        assert_eq!(list.bytes_len(), 8);
    }

    #[test]
    fn test_parse_truncated_option() {
        let bytes = [0x9e, 0x02, 0x88];
        let list = OptionList::parse(&bytes);
        assert!(!list.is_valid());
        assert_eq!(list.error(), Some(Error::BufferTooShort));
        assert_eq!(list.as_slice(), &[OptionRepr::Unknown { option_type: 0x9e, data: &[] }]);
        assert_eq!(list.bytes_len(), 3);
    }

    #[test]
    fn test_parse_duplicate_at_most_once() {
        let bytes = [0x94, 0x04, 0x00, 0x00, 0x94, 0x04, 0x00, 0x01];
        let list = OptionList::parse(&bytes);
        assert!(!list.is_valid());
        assert_eq!(list.error(), Some(Error::DuplicateOption(0x94)));
        assert_eq!(list.as_slice(), &[OptionRepr::RouterAlert(0)]);
    }

    #[test]
    fn test_parse_repeatable_options() {
        let bytes = [0x01, 0x01, 0x9e, 0x02, 0x9e, 0x03, 0x07, 0x01];
        let list = OptionList::parse(&bytes);
        assert!(list.is_valid());
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_parse_malformed_option() {
        let bytes = [0x01, 0x44, 0x04, 0x05, 0x02, 0x00, 0x00, 0x00];
        let list = OptionList::parse(&bytes);
        assert!(!list.is_valid());
        assert_eq!(list.error(), Some(Error::MalformedOption(0x44)));
        assert_eq!(list.as_slice(), &[OptionRepr::NoOperation]);
    }

    #[test]
    fn test_parse_too_many_options() {
        let bytes = [0x01u8; 44];
        let list = OptionList::parse(&bytes);
        assert!(!list.is_valid());
        assert_eq!(list.error(), Some(Error::TooManyOptions));
        assert_eq!(list.len(), MAX_OPTIONS);
    }

    #[test]
    fn test_parse_from_datagram() {
        let mut header = [0u8; 24];
        header[20..24].copy_from_slice(&[0x94, 0x04, 0x00, 0x00]);
        let datagram: Datagram<_> = Datagram::new_unchecked(&header[..]);
        let options_area = datagram.subview(20, 4).unwrap();

        let list = OptionList::from_datagram(&options_area);
        assert!(list.is_valid());
        assert_eq!(list.find(OptionType::RouterAlert), Some(&OptionRepr::RouterAlert(0)));
        assert_eq!(list.find(OptionType::Timestamp), None);
    }

    #[test]
    fn test_equality_is_by_content() {
        let first = [0x88u8, 0x04, 0x00, 0x05];
        let second = [0xffu8, 0x88, 0x04, 0x00, 0x05];
        let a = OptionList::parse(&first[..]);
        let b = OptionList::parse(&second[1..]);
        let c = OptionList::new([OptionRepr::StreamIdentifier(5)]).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(hash_of(&a), hash_of(&c));
    }

    #[test]
    fn test_equality_includes_bytes_len() {
        let short = OptionList::parse(&[0x00]);
        let padded = OptionList::parse(&[0x00, 0x00, 0x00, 0x00]);
        assert_eq!(short.as_slice(), padded.as_slice());
        assert_ne!(short, padded);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a = OptionList::new([OptionRepr::StreamIdentifier(1), OptionRepr::RouterAlert(0)]).unwrap();
        let b = OptionList::new([OptionRepr::RouterAlert(0), OptionRepr::StreamIdentifier(1)]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display() {
        let list = OptionList::new([OptionRepr::StreamIdentifier(9), OptionRepr::NoOperation]).unwrap();
        assert_eq!(format!("{}", list), "IPv4 Options: len=8, valid=true, [SID(9), NOP, EOL]");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        static ADDRESS_DATA: [u8; 12] = [10, 0, 0, 1, 10, 0, 0, 2, 10, 0, 0, 3];
        static UNKNOWN_DATA: [u8; 6] = [0xa1, 0xb2, 0xc3, 0xd4, 0xe5, 0xf6];

        fn option_strategy() -> impl Strategy<Value = OptionRepr<'static>> {
            prop_oneof![
                Just(OptionRepr::NoOperation),
                any::<u16>().prop_map(OptionRepr::StreamIdentifier),
                any::<u16>().prop_map(OptionRepr::RouterAlert),
                (0u8..16, any::<u8>(), 0u32..(1 << 30)).prop_map(|(rate, ttl, nonce)| {
                    OptionRepr::QuickStart { function: 0, rate, ttl, nonce }
                }),
                (0usize..=3, 1u8..=4).prop_map(|(count, slot)| OptionRepr::RecordRoute {
                    pointer: slot * 4,
                    addresses: RouteAddresses::new(&ADDRESS_DATA[..count * 4]).unwrap(),
                }),
                (prop::sample::select(vec![0x0bu8, 0x52, 0x9e]), 0usize..=6).prop_map(
                    |(option_type, len)| OptionRepr::Unknown { option_type, data: &UNKNOWN_DATA[..len] }
                ),
            ]
        }

        fn without_duplicates(options: std::vec::Vec<OptionRepr<'static>>) -> std::vec::Vec<OptionRepr<'static>> {
            let mut kept: std::vec::Vec<OptionRepr<'static>> = std::vec::Vec::new();
            for option in options {
                if option.appears_at_most_once() && kept.iter().any(|seen| seen.is_equivalent(&option)) {
                    continue;
                }
                kept.push(option);
            }
            kept
        }

        proptest! {
            #[test]
            fn prop_emit_then_parse_roundtrips(options in prop::collection::vec(option_strategy(), 0..12)) {
                let options = without_duplicates(options);
                let unpadded: usize = options.iter().map(|option| option.buffer_len()).sum();

                match OptionList::new(options.iter().copied()) {
                    Ok(list) => {
                        prop_assert_eq!(list.bytes_len() % 4, 0);
                        prop_assert!(list.bytes_len() >= unpadded);

                        let mut buffer = [0xffu8; 40];
                        let written = list.emit(&mut buffer).unwrap();
                        prop_assert_eq!(written, list.bytes_len());

                        let parsed = OptionList::parse(&buffer[..written]);
                        prop_assert!(parsed.is_valid());
                        prop_assert_eq!(parsed, list);
                    }
                    Err(err) => {
                        prop_assert!(unpadded > 36);
                        prop_assert!(matches!(err, Error::OptionsTooLong(len) if len > 40));
                    }
                }
            }

            #[test]
            fn prop_parse_never_overruns(bytes in prop::collection::vec(any::<u8>(), 0..=40)) {
                let list = OptionList::parse(&bytes);
                let decoded: usize = list.iter().map(|option| option.buffer_len()).sum();
                prop_assert!(decoded <= bytes.len());
                prop_assert_eq!(list.bytes_len(), bytes.len());
                if list.is_valid() {
                    let mut buffer = [0u8; 40];
                    prop_assert_eq!(list.emit(&mut buffer), Ok(bytes.len()));
                }
            }
        }
    }
}
