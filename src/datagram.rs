//! Datagram module
//!
//! This module contains the `Datagram` type, a read-only zero-copy window over
//! the bytes of one protocol layer. Every protocol specific view is built on
//! top of it: it owns nothing but the handle it was given, reads fields in the
//! byte order the caller asks for, and caches the outcome of a
//! protocol-specific validity check the first time somebody asks for it.

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::net::Ipv4Addr;
use core::sync::atomic::{AtomicU8, Ordering};

const VALIDITY_UNKNOWN: u8 = 0;
const VALIDITY_VALID: u8 = 1;
const VALIDITY_INVALID: u8 = 2;

/// Byte order used to interpret multi-byte fields.
///
/// Supplied by the caller on every read; never inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Most significant byte first (network byte order).
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl Endianness {
    fn read_u16(self, buf: &[u8]) -> u16 {
        match self {
            Endianness::Big => BigEndian::read_u16(buf),
            Endianness::Little => LittleEndian::read_u16(buf),
        }
    }

    fn read_u24(self, buf: &[u8]) -> u32 {
        match self {
            Endianness::Big => BigEndian::read_u24(buf),
            Endianness::Little => LittleEndian::read_u24(buf),
        }
    }

    fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endianness::Big => BigEndian::read_u32(buf),
            Endianness::Little => LittleEndian::read_u32(buf),
        }
    }

    fn read_u48(self, buf: &[u8]) -> u64 {
        match self {
            Endianness::Big => BigEndian::read_uint(buf, 6),
            Endianness::Little => LittleEndian::read_uint(buf, 6),
        }
    }
}

/// Protocol-specific structural check run by [`Datagram::is_valid`].
///
/// Implementations must be pure: the result is cached and may be computed
/// more than once if two threads race on the first call.
pub trait Validity {
    /// Returns whether `bytes` form a structurally valid unit of the protocol.
    fn check(bytes: &[u8]) -> bool;
}

/// Accepts every byte range. The default check of a plain [`Datagram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlwaysValid;

impl Validity for AlwaysValid {
    #[inline]
    fn check(_bytes: &[u8]) -> bool {
        true
    }
}

/// Accepts byte ranges of at least `N` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinLength<const N: usize>;

impl<const N: usize> Validity for MinLength<N> {
    #[inline]
    fn check(bytes: &[u8]) -> bool {
        bytes.len() >= N
    }
}

/// A read-only zero-copy window into a byte buffer owned elsewhere.
///
/// The window covers `[offset, offset + len)` of the buffer. Field reads take
/// offsets relative to the start of the window.
///
/// Two datagrams are equal when they have the same length and the same
/// bytes, regardless of which buffer or offset they were taken from.
///
/// # Examples
///
/// ```
/// use ipv4_options_wire::datagram::{Datagram, Endianness};
///
/// let frame = [0xde, 0xad, 0x12, 0x34, 0xbe, 0xef];
/// let view: Datagram<&[u8]> = Datagram::with_range(&frame[..], 2, 2).unwrap();
///
/// assert_eq!(view.read_u16(0, Endianness::Big), 0x1234);
/// assert_eq!(view.read_u16(0, Endianness::Little), 0x3412);
/// assert!(view.is_valid());
/// ```
pub struct Datagram<T: AsRef<[u8]>, C: Validity = AlwaysValid> {
    buffer: T,
    offset: usize,
    length: usize,
    validity: AtomicU8,
    check: PhantomData<fn() -> C>,
}

impl<T: AsRef<[u8]>, C: Validity> Datagram<T, C> {
    /// Creates a `Datagram` over the whole buffer.
    ///
    /// A whole buffer always fits, so this cannot fail.
    pub fn new_unchecked(buffer: T) -> Datagram<T, C> {
        let length = buffer.as_ref().len();
        Self::with_range_unchecked(buffer, 0, length)
    }

    /// Creates a `Datagram` over the whole buffer and runs `check_len`.
    ///
    /// # Returns
    ///
    /// * `Result<Datagram>` - A new `Datagram` if the window fits the buffer.
    pub fn new_checked(buffer: T) -> Result<Datagram<T, C>> {
        let datagram = Self::new_unchecked(buffer);
        datagram.check_len()?;
        Ok(datagram)
    }

    /// Creates a `Datagram` over `buffer[offset..offset + length]` without
    /// checking that the range lies inside the buffer.
    ///
    /// Reads on a datagram whose range does not fit its buffer panic.
    pub fn with_range_unchecked(buffer: T, offset: usize, length: usize) -> Datagram<T, C> {
        Datagram {
            buffer,
            offset,
            length,
            validity: AtomicU8::new(VALIDITY_UNKNOWN),
            check: PhantomData,
        }
    }

    /// Creates a `Datagram` over `buffer[offset..offset + length]`.
    ///
    /// # Returns
    ///
    /// * `Err(Error::BufferTooShort)` if the range does not fit the buffer.
    pub fn with_range(buffer: T, offset: usize, length: usize) -> Result<Datagram<T, C>> {
        let datagram = Self::with_range_unchecked(buffer, offset, length);
        datagram.check_len()?;
        Ok(datagram)
    }

    /// Checks that the window lies inside the backing buffer.
    pub fn check_len(&self) -> Result<()> {
        match self.offset.checked_add(self.length) {
            Some(end) if end <= self.buffer.as_ref().len() => Ok(()),
            _ => Err(Error::BufferTooShort),
        }
    }

    /// Returns the inner buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Offset of the window inside the backing buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of bytes in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the window is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the bytes of the window.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer.as_ref()[self.offset..self.offset + self.length]
    }

    /// Returns the byte at `offset`.
    ///
    /// The caller guarantees `offset < self.len()`.
    #[inline]
    pub fn byte_at(&self, offset: usize) -> u8 {
        self.as_slice()[offset]
    }

    /// Returns an iterator over the bytes of the window.
    ///
    /// Iterating again re-reads the buffer; nothing is consumed.
    pub fn bytes(&self) -> core::iter::Copied<core::slice::Iter<'_, u8>> {
        self.as_slice().iter().copied()
    }

    /// Runs the protocol check on first use and returns the cached result
    /// afterwards.
    pub fn is_valid(&self) -> bool {
        match self.validity.load(Ordering::Relaxed) {
            VALIDITY_VALID => true,
            VALIDITY_INVALID => false,
            _ => {
                let valid = C::check(self.as_slice());
                let state = if valid { VALIDITY_VALID } else { VALIDITY_INVALID };
                self.validity.store(state, Ordering::Relaxed);
                valid
            }
        }
    }

    /// Reads a 16-bit field at `offset`.
    pub fn read_u16(&self, offset: usize, endianness: Endianness) -> u16 {
        endianness.read_u16(&self.as_slice()[offset..offset + 2])
    }

    /// Reads a 24-bit field at `offset`.
    pub fn read_u24(&self, offset: usize, endianness: Endianness) -> u32 {
        endianness.read_u24(&self.as_slice()[offset..offset + 3])
    }

    /// Reads a 32-bit field at `offset`.
    pub fn read_u32(&self, offset: usize, endianness: Endianness) -> u32 {
        endianness.read_u32(&self.as_slice()[offset..offset + 4])
    }

    /// Reads a 48-bit field at `offset`.
    pub fn read_u48(&self, offset: usize, endianness: Endianness) -> u64 {
        endianness.read_u48(&self.as_slice()[offset..offset + 6])
    }

    /// Reads a 6-byte hardware address at `offset`.
    ///
    /// The returned octets are in transmission order for big endian fields
    /// and reversed for little endian ones.
    pub fn read_mac_address(&self, offset: usize, endianness: Endianness) -> [u8; 6] {
        let octets = self.read_u48(offset, endianness).to_be_bytes();
        [octets[2], octets[3], octets[4], octets[5], octets[6], octets[7]]
    }

    /// Reads an IPv4 address at `offset`.
    pub fn read_ipv4_address(&self, offset: usize, endianness: Endianness) -> Ipv4Addr {
        Ipv4Addr::from(self.read_u32(offset, endianness))
    }

    /// Returns a view over `length` bytes starting at `offset` inside this
    /// window, backed by the same buffer.
    ///
    /// # Returns
    ///
    /// * `Err(Error::BufferTooShort)` if the range leaves this window.
    pub fn subview(&self, offset: usize, length: usize) -> Result<Datagram<&[u8]>> {
        Datagram::with_range(self.as_slice(), offset, length)
    }

    /// Copies the bytes of the window into `target` at `target_offset`.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of bytes written
    /// * `Err(Error::BufferTooShort)` if `target` cannot hold them
    pub fn write_into(&self, target: &mut [u8], target_offset: usize) -> Result<usize> {
        let end = target_offset
            .checked_add(self.length)
            .filter(|&end| end <= target.len())
            .ok_or(Error::BufferTooShort)?;
        target[target_offset..end].copy_from_slice(self.as_slice());
        Ok(self.length)
    }
}

impl<T: AsRef<[u8]>, C: Validity> AsRef<[u8]> for Datagram<T, C> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl<'d, T: AsRef<[u8]>, C: Validity> IntoIterator for &'d Datagram<T, C> {
    type Item = u8;
    type IntoIter = core::iter::Copied<core::slice::Iter<'d, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bytes()
    }
}

impl<T: AsRef<[u8]> + Clone, C: Validity> Clone for Datagram<T, C> {
    fn clone(&self) -> Self {
        Datagram {
            buffer: self.buffer.clone(),
            offset: self.offset,
            length: self.length,
            validity: AtomicU8::new(self.validity.load(Ordering::Relaxed)),
            check: PhantomData,
        }
    }
}

impl<T, U, C, D> PartialEq<Datagram<U, D>> for Datagram<T, C>
where
    T: AsRef<[u8]>,
    U: AsRef<[u8]>,
    C: Validity,
    D: Validity,
{
    fn eq(&self, other: &Datagram<U, D>) -> bool {
        self.length == other.length && self.as_slice() == other.as_slice()
    }
}

impl<T: AsRef<[u8]>, C: Validity> Eq for Datagram<T, C> {}

impl<T: AsRef<[u8]>, C: Validity> Hash for Datagram<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        self.bytes().fold(0u8, |acc, byte| acc ^ byte).hash(state);
    }
}

impl<T: AsRef<[u8]>, C: Validity> fmt::Debug for Datagram<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Datagram")
            .field("offset", &self.offset)
            .field("length", &self.length)
            .field("bytes", &self.as_slice())
            .finish()
    }
}

impl<T: AsRef<[u8]>, C: Validity> fmt::Display for Datagram<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Datagram: len={}, bytes=", self.length)?;
        for byte in self.bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::DefaultHasher;
    use std::sync::atomic::AtomicUsize;

    fn hash_of<H: Hash>(value: &H) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_datagram_new_unchecked() {
        let buffer = [1u8, 2, 3, 4];
        let datagram: Datagram<_> = Datagram::new_unchecked(&buffer[..]);
        assert_eq!(datagram.len(), 4);
        assert_eq!(datagram.offset(), 0);
        assert_eq!(datagram.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_datagram_new_checked() {
        let buffer = [0xaau8, 0xbb, 0xcc];
        let datagram: Datagram<&[u8]> = Datagram::new_checked(&buffer[..]).unwrap();
        assert_eq!(datagram.len(), 3);
        assert_eq!(datagram.offset(), 0);
        assert_eq!(datagram.as_slice(), &buffer[..]);

        let empty: Datagram<&[u8]> = Datagram::new_checked(&[][..]).unwrap();
        assert!(empty.is_empty());

        let checked: Datagram<&[u8], MinLength<4>> = Datagram::new_checked(&buffer[..]).unwrap();
        assert!(!checked.is_valid());
    }

    #[test]
    fn test_datagram_range_checks() {
        let buffer = [0u8; 8];
        let view = |offset, length| -> Result<Datagram<&[u8]>> {
            Datagram::with_range(&buffer[..], offset, length)
        };
        assert!(view(0, 8).is_ok());
        assert!(view(8, 0).is_ok());
        assert_eq!(view(4, 5).unwrap_err(), Error::BufferTooShort);
        assert_eq!(view(usize::MAX, 2).unwrap_err(), Error::BufferTooShort);
    }

    #[test]
    fn test_datagram_byte_at_is_relative() {
        let buffer = [10u8, 20, 30, 40, 50];
        let datagram: Datagram<_> = Datagram::with_range(&buffer[..], 2, 3).unwrap();
        assert_eq!(datagram.byte_at(0), 30);
        assert_eq!(datagram.byte_at(2), 50);
        assert!(!datagram.is_empty());
    }

    #[test]
    fn test_datagram_reads_both_byte_orders() {
        let buffer = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let datagram: Datagram<_> = Datagram::new_unchecked(&buffer[..]);

        assert_eq!(datagram.read_u16(0, Endianness::Big), 0x0102);
        assert_eq!(datagram.read_u16(0, Endianness::Little), 0x0201);
        assert_eq!(datagram.read_u24(1, Endianness::Big), 0x020304);
        assert_eq!(datagram.read_u24(1, Endianness::Little), 0x040302);
        assert_eq!(datagram.read_u32(2, Endianness::Big), 0x03040506);
        assert_eq!(datagram.read_u32(2, Endianness::Little), 0x06050403);
        assert_eq!(datagram.read_u48(0, Endianness::Big), 0x0102_0304_0506);
        assert_eq!(datagram.read_u48(0, Endianness::Little), 0x0605_0403_0201);
    }

    #[test]
    fn test_datagram_read_addresses() {
        let buffer = [0x00, 0x1b, 0x21, 0x3c, 0x4d, 0x5e, 192, 168, 1, 7];
        let datagram: Datagram<_> = Datagram::new_unchecked(&buffer[..]);

        assert_eq!(
            datagram.read_mac_address(0, Endianness::Big),
            [0x00, 0x1b, 0x21, 0x3c, 0x4d, 0x5e]
        );
        assert_eq!(
            datagram.read_mac_address(0, Endianness::Little),
            [0x5e, 0x4d, 0x3c, 0x21, 0x1b, 0x00]
        );
        assert_eq!(
            datagram.read_ipv4_address(6, Endianness::Big),
            Ipv4Addr::new(192, 168, 1, 7)
        );
    }

    #[test]
    fn test_datagram_write_into() {
        let buffer = [0xaa, 0xbb, 0xcc, 0xdd];
        let datagram: Datagram<_> = Datagram::with_range(&buffer[..], 1, 2).unwrap();

        let mut target = [0u8; 5];
        assert_eq!(datagram.write_into(&mut target, 3), Ok(2));
        assert_eq!(target, [0, 0, 0, 0xbb, 0xcc]);

        assert_eq!(datagram.write_into(&mut target, 4), Err(Error::BufferTooShort));
        assert_eq!(datagram.write_into(&mut target, usize::MAX), Err(Error::BufferTooShort));
    }

    #[test]
    fn test_datagram_equality_ignores_backing_buffer() {
        let first = [9u8, 1, 2, 3];
        let second = [1u8, 2, 3, 9, 9];
        let a: Datagram<_> = Datagram::with_range(&first[..], 1, 3).unwrap();
        let b: Datagram<_, MinLength<1>> = Datagram::with_range(&second[..], 0, 3).unwrap();

        let c: Datagram<_> = Datagram::with_range(&second[..], 0, 3).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(hash_of(&a), hash_of(&c));
    }

    #[test]
    fn test_datagram_length_mismatch_is_unequal() {
        let buffer = [1u8, 2, 3, 4];
        let short: Datagram<_> = Datagram::with_range(&buffer[..], 0, 3).unwrap();
        let long: Datagram<_> = Datagram::with_range(&buffer[..], 0, 4).unwrap();
        assert_ne!(short, long);

        let empty_a: Datagram<_> = Datagram::with_range(&buffer[..], 0, 0).unwrap();
        let empty_b: Datagram<_> = Datagram::with_range(&buffer[..], 4, 0).unwrap();
        assert_eq!(empty_a, empty_b);
    }

    #[test]
    fn test_datagram_bytes_is_restartable() {
        let buffer = [5u8, 6, 7];
        let datagram: Datagram<_> = Datagram::new_unchecked(&buffer[..]);
        let first: Vec<u8> = datagram.bytes().collect();
        let second: Vec<u8> = (&datagram).into_iter().collect();
        assert_eq!(first, vec![5, 6, 7]);
        assert_eq!(first, second);
    }

    static CHECK_CALLS: AtomicUsize = AtomicUsize::new(0);

    struct CountingCheck;

    impl Validity for CountingCheck {
        fn check(bytes: &[u8]) -> bool {
            CHECK_CALLS.fetch_add(1, Ordering::SeqCst);
            bytes.first() == Some(&0x45)
        }
    }

    #[test]
    fn test_datagram_validity_is_memoized() {
        let buffer = [0x45u8, 0x00];
        let datagram: Datagram<_, CountingCheck> = Datagram::new_unchecked(&buffer[..]);

        let before = CHECK_CALLS.load(Ordering::SeqCst);
        assert!(datagram.is_valid());
        assert!(datagram.is_valid());
        assert!(datagram.clone().is_valid());
        assert_eq!(CHECK_CALLS.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_datagram_min_length_check() {
        let buffer = [0u8; 19];
        let short: Datagram<_, MinLength<20>> = Datagram::new_unchecked(&buffer[..]);
        assert!(!short.is_valid());
        assert!(!short.is_valid());

        let buffer = [0u8; 20];
        let ok: Datagram<_, MinLength<20>> = Datagram::new_unchecked(&buffer[..]);
        assert!(ok.is_valid());
    }

    #[test]
    fn test_datagram_subview() {
        let buffer = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let outer: Datagram<_> = Datagram::with_range(&buffer[..], 2, 6).unwrap();
        let inner = outer.subview(1, 3).unwrap();
        assert_eq!(inner.as_slice(), &[3, 4, 5]);
        assert_eq!(outer.subview(4, 3).unwrap_err(), Error::BufferTooShort);
    }

    #[test]
    fn test_datagram_display() {
        let buffer = [0x0a, 0xff];
        let datagram: Datagram<_> = Datagram::new_unchecked(&buffer[..]);
        assert_eq!(format!("{}", datagram), "Datagram: len=2, bytes=0aff");
    }

    #[test]
    fn test_datagram_is_send_and_sync() {
        fn assert_send_sync<S: Send + Sync>() {}
        assert_send_sync::<Datagram<&[u8]>>();
        assert_send_sync::<Datagram<&[u8], CountingCheck>>();
    }
}
