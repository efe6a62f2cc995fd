// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    address::{parse_v4, Address, Ipv4Value},
    increment::add_bytes,
    range::{AddressRange, IpRange},
    strings::*,
    AddressError, Reason, CIDR_MAX, CIDR_MIN, IPV4_BITS,
};
use ipnet::Ipv4Net;
use std::{fmt, net::Ipv4Addr, str::FromStr};

/**
An IPv4 network in CIDR notation, `A.B.C.D/n` with `n` in `1..=32`.

Host bits of the given address are cleared, so `4.0.0.28/29` is stored (and
rendered) as `4.0.0.24/29`.
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CidrV4 {
    range: IpRange,
    /// network address, same as `range.start`
    net: [u8; 4],
    prefix: u8,
}

impl CidrV4 {
    pub fn new(addr: &Address, prefix: u8) -> Result<Self, AddressError> {
        let octets: [u8; 4] = v4_octets(addr)?;
        if !(CIDR_MIN..=CIDR_MAX).contains(&prefix) {
            return Err(AddressError::invalid(
                format!("{addr}{SLASH}{prefix}"),
                Reason::InvalidMask,
            ));
        }

        let start: [u8; 4] = (u32::from_be_bytes(octets) & netmask(prefix)).to_be_bytes();
        let mut end: [u8; 4] = start;
        add_bytes(&mut end, host_count(prefix) as i128 - 1);

        Ok(Self {
            range: IpRange::new_unchecked(
                Address::V4(Ipv4Value::new(start)),
                Address::V4(Ipv4Value::new(end)),
            ),
            net: start,
            prefix,
        })
    }

    /**
    Network of `addr` under a dotted netmask.

    The prefix is `32 - floor(log2(!mask + 1))`. Non-contiguous masks are
    not rejected, they just round down: `255.255.255.228` acts as `/28`.
    */
    pub fn from_address_and_mask(addr: &Address, mask: &Address) -> Result<Self, AddressError> {
        let mask: u32 = u32::from_be_bytes(v4_octets(mask)?);
        let hosts: u64 = (!mask) as u64 + 1;
        let prefix: u32 = IPV4_BITS as u32 - hosts.ilog2();
        Self::new(addr, prefix as u8)
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Netmask as an integer, e.g. `0xffffff00` for `/24`.
    pub fn netmask(&self) -> u32 {
        netmask(self.prefix)
    }

    /// Number of addresses in the network: `2^(32 - n)`.
    pub fn count(&self) -> u64 {
        host_count(self.prefix)
    }

    pub fn range(&self) -> &IpRange {
        &self.range
    }
}

#[inline]
fn netmask(prefix: u8) -> u32 {
    u32::MAX << (IPV4_BITS - prefix)
}

#[inline]
fn host_count(prefix: u8) -> u64 {
    1u64 << (IPV4_BITS - prefix)
}

fn v4_octets(addr: &Address) -> Result<[u8; 4], AddressError> {
    match addr {
        Address::V4(a) => Ok(a.octets()),
        Address::V6(_) => Err(AddressError::invalid(addr.to_string(), Reason::WrongFamily)),
    }
}

impl AddressRange for CidrV4 {
    fn start(&self) -> &Address {
        self.range.start()
    }

    fn end(&self) -> &Address {
        self.range.end()
    }
}

impl fmt::Display for CidrV4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SLASH}{}", self.range.start(), self.prefix)
    }
}

impl FromStr for CidrV4 {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .split_once(SLASH)
            .ok_or_else(|| AddressError::invalid(s, Reason::MissingMask))?;

        let prefix: u8 = prefix
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|p| (CIDR_MIN..=CIDR_MAX).contains(p))
            .ok_or_else(|| AddressError::invalid(s, Reason::InvalidMask))?;

        let addr: Address = parse_v4(addr.trim())?.complete()?;
        Self::new(&addr, prefix)
    }
}

serde_via_str!(CidrV4);

impl From<&CidrV4> for Ipv4Net {
    fn from(cidr: &CidrV4) -> Self {
        // prefix is always within 1..=32
        Ipv4Net::new_assert(Ipv4Addr::from(cidr.net), cidr.prefix)
    }
}

impl From<CidrV4> for Ipv4Net {
    fn from(cidr: CidrV4) -> Self {
        Ipv4Net::from(&cidr)
    }
}

impl TryFrom<Ipv4Net> for CidrV4 {
    type Error = AddressError;

    fn try_from(net: Ipv4Net) -> Result<Self, Self::Error> {
        CidrV4::new(&Address::from(net.addr()), net.prefix_len())
    }
}

/* -------------------------------------------------------------------------- */
