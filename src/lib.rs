// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IPv4/IPv6 address values and range algebra.
//!
//! - parse text into [Address] values (complete, [PartialAddress], or error)
//! - compare, cover and subtract ranges ([IpRange], [CidrV4])
//! - carry-correct increment/decrement with fixed-width wraparound
//! - scan free text for embedded addresses ([find])
//! - expand a partially typed IPv4 prefix into candidate ranges ([candidates])

/// Serialize as the canonical string form, deserialize through [std::str::FromStr].
macro_rules! serde_via_str {
    ($($t:ty),* $(,)?) => {$(
        impl ::serde::Serialize for $t {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $t {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s: String = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                s.parse::<$t>().map_err(::serde::de::Error::custom)
            }
        }
    )*};
}

mod address;
mod cidr;
mod compare;
mod finder;
mod increment;
mod partial;
mod range;
mod strings;
mod subtract;

use std::{error, fmt};
use strings::*;

pub use address::{
    parse_address, parse_v4, parse_v6, Address, IpFam, Ipv4Value, Ipv6Value, Parsed, PartialAddress,
};
pub use cidr::CidrV4;
pub use compare::{compare, max_of, min_of};
pub use finder::{find, Pattern};
pub use increment::{decrement, increment, range, walk, AddressWalk};
pub use partial::candidates;
pub use range::{covering_union, AddressRange, IpRange, Span};
pub use subtract::subtract;

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const IPV6_BITS: u8 = 128;
pub(crate) const V4_PARTS: usize = 4;
pub(crate) const V6_PARTS: usize = 8;
pub(crate) const PART_MAX_V4: u32 = 0xff;
pub(crate) const PART_MAX_V6: u32 = 0xffff;
pub(crate) const CIDR_MIN: u8 = 1;
pub(crate) const CIDR_MAX: u8 = IPV4_BITS;

/// Short tag describing why a text was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Reason {
    Empty,
    IllegalCharacters,
    OutOfBounds,
    TooManyParts,
    /// more than one `::`, or an empty part outside of it
    MultipleElisions,
    MissingMask,
    InvalidMask,
    /// neither family accepted the text as a complete address
    NotAnAddress,
    /// an IPv6 value where only IPv4 is supported
    WrongFamily,
}

impl Reason {
    /// Whether this reason concerns the `/n` suffix of a CIDR rather than an address.
    pub fn is_mask(&self) -> bool {
        matches!(self, Reason::MissingMask | Reason::InvalidMask)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag: &str = match self {
            Reason::Empty => RSN_EMPTY,
            Reason::IllegalCharacters => RSN_ILLEGAL,
            Reason::OutOfBounds => RSN_BOUNDS,
            Reason::TooManyParts => RSN_TOO_MANY,
            Reason::MultipleElisions => RSN_ELISIONS,
            Reason::MissingMask => RSN_NO_MASK,
            Reason::InvalidMask => RSN_BAD_MASK,
            Reason::NotAnAddress => RSN_NOT_ADDR,
            Reason::WrongFamily => RSN_FAMILY,
        };
        f.write_str(tag)
    }
}

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AddressError {
    /// malformed text, with the offending input
    Invalid { input: String, reason: Reason },
    /// valid prefix of an address, but incomplete
    Partial(PartialAddress),
    /// range end sorts before its start
    RangeOrder(Address, Address),
    /// start and end are not the same IP family (v4 vs v6).
    Mismatch(Address, Address),
    NoRanges,
}

impl AddressError {
    pub(crate) fn invalid(input: impl Into<String>, reason: Reason) -> Self {
        AddressError::Invalid {
            input: input.into(),
            reason,
        }
    }

    /// The reason tag, if this is a parse error.
    pub fn reason(&self) -> Option<Reason> {
        match self {
            AddressError::Invalid { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::Invalid { input, reason } => {
                write!(f, "{ERR_INVALID_IP}: '{input}' ({reason})")
            }
            AddressError::Partial(partial) => {
                write!(f, "{ERR_PARTIAL}: '{}'", partial.input())
            }
            AddressError::RangeOrder(beg, end) => {
                write!(f, "{ERR_RNG_ORDER} ({beg} > {end})")
            }
            AddressError::Mismatch(a, b) => {
                write!(f, "{ERR_MISMATCH}: {a} - {b}")
            }
            AddressError::NoRanges => f.write_str(ERR_NO_RANGES),
        }
    }
}

impl error::Error for AddressError {}

/* -------------------------------------------------------------------------- */
