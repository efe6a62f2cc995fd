// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    address::{parse_address, parse_v4, Address, IpFam},
    cidr::CidrV4,
    compare::{max_of, min_of},
    strings::*,
    AddressError,
};
use std::{fmt, str::FromStr};

/**
Anything with an inclusive `start..=end` span of addresses.

The comparisons are closed-interval tests under [crate::compare]. Both ends
of one value share a family; values of different families never overlap
or contain each other.
*/
pub trait AddressRange {
    fn start(&self) -> &Address;
    fn end(&self) -> &Address;

    fn family(&self) -> IpFam {
        self.start().family()
    }

    /// `self.start <= other.start && self.end >= other.end`
    fn fully_contains<R: AddressRange + ?Sized>(&self, other: &R) -> bool {
        self.start() <= other.start() && self.end() >= other.end()
    }

    /// Whether the two closed intervals share at least one address.
    fn overlaps<R: AddressRange + ?Sized>(&self, other: &R) -> bool {
        self.start() <= other.end() && other.start() <= self.end()
    }

    /// Both endpoints equal.
    fn same_bounds<R: AddressRange + ?Sized>(&self, other: &R) -> bool {
        self.start() == other.start() && self.end() == other.end()
    }

    fn to_range(&self) -> IpRange {
        IpRange::new_unchecked(self.start().clone(), self.end().clone())
    }
}

/// A single address is the range `addr..=addr`.
impl AddressRange for Address {
    fn start(&self) -> &Address {
        self
    }

    fn end(&self) -> &Address {
        self
    }
}

/* -------------------------------------------------------------------------- */

/// Inclusive range of IP addresses (endpoints are included).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct IpRange {
    start: Address,
    end: Address,
}

impl IpRange {
    /// Create a new [IpRange]. Ensures that IP families match and order is correct.
    pub fn new(start: Address, end: Address) -> Result<Self, AddressError> {
        if start.family() != end.family() {
            return Err(AddressError::Mismatch(start, end));
        }
        if end < start {
            return Err(AddressError::RangeOrder(start, end));
        }
        Ok(Self { start, end })
    }

    pub fn single(addr: Address) -> Self {
        Self {
            start: addr.clone(),
            end: addr,
        }
    }

    /// Caller guarantees family and order.
    pub(crate) fn new_unchecked(start: Address, end: Address) -> Self {
        debug_assert!(
            start.family() == end.family() && start <= end,
            "{ERR_RNG_ORDER} ({start} > {end})"
        );
        Self { start, end }
    }

    /**
    Build a range from two IPv4 texts that may be incomplete.

    Missing low-order parts are zero on both sides, so `("10", "10.255")`
    spans `10.0.0.0 - 10.255.0.0`.
    */
    pub fn from_partial_v4(start: &str, end: &str) -> Result<Self, AddressError> {
        let start: Address = parse_v4(start)?.completion();
        let end: Address = parse_v4(end)?.completion();
        Self::new(start, end)
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl AddressRange for IpRange {
    fn start(&self) -> &Address {
        &self.start
    }

    fn end(&self) -> &Address {
        &self.end
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            return self.start.fmt(f);
        }
        write!(f, "{}{RANGE_SEP}{}", self.start, self.end)
    }
}

impl FromStr for IpRange {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(DASH) {
            Some((beg, end)) => {
                let beg: Address = parse_address(beg.trim())?;
                let end: Address = parse_address(end.trim())?;
                IpRange::new(beg, end)
            }
            None => Ok(IpRange::single(parse_address(s.trim())?)),
        }
    }
}

impl From<Address> for IpRange {
    fn from(addr: Address) -> Self {
        IpRange::single(addr)
    }
}

serde_via_str!(IpRange);

/* -------------------------------------------------------------------------- */

/// One hit from [crate::find] or [crate::candidates], in its own textual form.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Span {
    Address(Address),
    Range(IpRange),
    Cidr(CidrV4),
}

impl AddressRange for Span {
    fn start(&self) -> &Address {
        match self {
            Span::Address(a) => a,
            Span::Range(r) => r.start(),
            Span::Cidr(c) => c.start(),
        }
    }

    fn end(&self) -> &Address {
        match self {
            Span::Address(a) => a,
            Span::Range(r) => r.end(),
            Span::Cidr(c) => c.end(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Address(a) => a.fmt(f),
            Span::Range(r) => r.fmt(f),
            Span::Cidr(c) => c.fmt(f),
        }
    }
}

impl FromStr for Span {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(SLASH) {
            return Ok(Span::Cidr(s.parse()?));
        }
        if s.contains(DASH) {
            return Ok(Span::Range(s.parse()?));
        }
        Ok(Span::Address(parse_address(s.trim())?))
    }
}

impl From<Address> for Span {
    fn from(addr: Address) -> Self {
        Span::Address(addr)
    }
}

impl From<IpRange> for Span {
    fn from(range: IpRange) -> Self {
        Span::Range(range)
    }
}

impl From<CidrV4> for Span {
    fn from(cidr: CidrV4) -> Self {
        Span::Cidr(cidr)
    }
}

serde_via_str!(Span);

/* -------------------------------------------------------------------------- */

/**
Smallest single range covering every input: `[min(starts), max(ends)]`.

Gaps between the inputs are covered too. All inputs must be the same family.
*/
pub fn covering_union<R: AddressRange>(ranges: &[R]) -> Result<IpRange, AddressError> {
    let first: &R = ranges.first().ok_or(AddressError::NoRanges)?;
    if let Some(other) = ranges.iter().find(|r| r.family() != first.family()) {
        return Err(AddressError::Mismatch(
            first.start().clone(),
            other.start().clone(),
        ));
    }

    let start: &Address = min_of(ranges.iter().map(|r| r.start())).ok_or(AddressError::NoRanges)?;
    let end: &Address = max_of(ranges.iter().map(|r| r.end())).ok_or(AddressError::NoRanges)?;
    Ok(IpRange::new_unchecked(start.clone(), end.clone()))
}

/* -------------------------------------------------------------------------- */
