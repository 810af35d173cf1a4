#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]

//! # ipv4-options-wire
//!
//! This crate provides a zero-copy view over protocol layer bytes and the
//! means for parsing the options area of an IPv4 header into higher-level
//! representations, and vice versa. It is designed to be used in embedded
//! environments and is a `no_std` crate by default.
//!
//! ## Features
//!
//! - `no_std` compatible by default (`std` feature for hosted builds)
//! - Zero-allocation parsing and serialization; options borrow from the input
//! - Malformed input yields an invalid but inspectable value, never a panic
//! - Content-based equality and hashing for views and option lists
//!
//! ## Architecture
//!
//! Zero-copy wrappers over the wire bytes, plus `Repr` types that parse from
//! and emit to them:
//! - `datagram` - Zero-copy window over a protocol layer's bytes
//! - `options` - Zero-copy option header wrapper and per-option representations
//! - `option_list` - The padded, validated options area
//! - `field` - Field offset definitions

/// Zero-copy byte view with typed field reads and a cached validity check.
pub mod datagram;

/// Error type for parsing and validation failures.
pub mod error;

/// Field offset definitions for all wire format structures.
pub mod field;

/// The IPv4 options area: an ordered, padded list of options.
pub mod option_list;

/// IPv4 option types (Record Route, Timestamp, Router Alert, etc.).
pub mod options;

/// Prelude module for convenient imports.
pub mod prelude;
