//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate,
//! allowing for convenient glob imports:
//!
//! ```
//! use ipv4_options_wire::prelude::*;
//! ```

pub use crate::datagram::{AlwaysValid, Datagram, Endianness, MinLength, Validity};
pub use crate::error::{Error, Result};
pub use crate::option_list::{NO_OPTIONS, OptionList};
pub use crate::options::{
    OptionHeader, OptionRepr, OptionType, RouteAddresses, TimestampData, TimestampEntry,
    TimestampFlag,
};
