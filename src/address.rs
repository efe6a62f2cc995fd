// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    strings::*, AddressError, Reason, IPV4_BITS, IPV6_BITS, PART_MAX_V4, PART_MAX_V6, V4_PARTS,
    V6_PARTS,
};
use std::{
    fmt,
    hash::{Hash, Hasher},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

/// IP address family
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum IpFam {
    V4,
    V6,
}

impl IpFam {
    /// Separator between the parts of an address.
    pub fn delimiter(&self) -> char {
        match self {
            IpFam::V4 => '.',
            IpFam::V6 => ':',
        }
    }

    /// Numeric base of a single part: decimal for v4, hex for v6.
    pub fn radix(&self) -> u32 {
        match self {
            IpFam::V4 => 10,
            IpFam::V6 => 16,
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            IpFam::V4 => IPV4_BITS,
            IpFam::V6 => IPV6_BITS,
        }
    }

    /// Width of the binary form in bytes.
    pub fn width(&self) -> usize {
        self.bits() as usize / 8
    }

    /// Number of parts in a complete address.
    pub fn max_parts(&self) -> usize {
        match self {
            IpFam::V4 => V4_PARTS,
            IpFam::V6 => V6_PARTS,
        }
    }

    pub(crate) fn part_max(&self) -> u32 {
        match self {
            IpFam::V4 => PART_MAX_V4,
            IpFam::V6 => PART_MAX_V6,
        }
    }

    fn render_part(&self, part: u16) -> String {
        match self {
            IpFam::V4 => part.to_string(),
            IpFam::V6 => format!("{part:x}"),
        }
    }
}

/* -------------------------------------------------------------------------- */

/// A complete IPv4 address: exactly four octets.
#[derive(Clone, Copy, Debug)]
pub struct Ipv4Value {
    octets: [u8; 4],
}

impl Ipv4Value {
    pub fn new(octets: [u8; 4]) -> Self {
        Self { octets }
    }

    pub fn octets(&self) -> [u8; 4] {
        self.octets
    }
}

impl fmt::Display for Ipv4Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

/**
A complete IPv6 address.

Parts before the elided zero run live in `head`, parts after it in `tail`.
Without an elision `tail` is `None` and `head` holds all 8 parts. Parsed
values keep the elision where the text had it, values computed from binary
compress the longest zero run (leftmost on ties, never a single part).
*/
#[derive(Clone, Debug)]
pub struct Ipv6Value {
    head: Vec<u16>,
    tail: Option<Vec<u16>>,
}

impl Ipv6Value {
    /// Build from 8 segments, compressing the longest run of zero segments.
    pub fn from_segments(seg: [u16; 8]) -> Self {
        // (start, len) of the best zero run so far
        let mut best: Option<(usize, usize)> = None;
        let mut i: usize = 0;
        while i < seg.len() {
            if seg[i] != 0 {
                i += 1;
                continue;
            }
            let beg: usize = i;
            while i < seg.len() && seg[i] == 0 {
                i += 1;
            }
            let len: usize = i - beg;
            if len >= 2 && best.map_or(true, |(_, l)| len > l) {
                best = Some((beg, len));
            }
        }

        match best {
            Some((beg, len)) => Self {
                head: seg[..beg].to_vec(),
                tail: Some(seg[beg + len..].to_vec()),
            },
            None => Self {
                head: seg.to_vec(),
                tail: None,
            },
        }
    }

    pub fn from_octets(octets: [u8; 16]) -> Self {
        let mut seg: [u16; 8] = [0; 8];
        for (i, s) in seg.iter_mut().enumerate() {
            *s = u16::from_be_bytes([octets[2 * i], octets[2 * i + 1]]);
        }
        Self::from_segments(seg)
    }

    /// All 8 segments, with the elided run filled in with zeros.
    pub fn segments(&self) -> [u16; 8] {
        let mut seg: [u16; 8] = [0; 8];
        seg[..self.head.len()].copy_from_slice(&self.head);
        if let Some(tail) = &self.tail {
            let off: usize = seg.len() - tail.len();
            seg[off..].copy_from_slice(tail);
        }
        seg
    }

    pub fn octets(&self) -> [u8; 16] {
        let mut out: [u8; 16] = [0; 16];
        for (i, s) in self.segments().iter().enumerate() {
            out[2 * i..2 * i + 2].copy_from_slice(&s.to_be_bytes());
        }
        out
    }

    /// Whether the address carries a `::` elision.
    pub fn is_elided(&self) -> bool {
        self.tail.is_some()
    }

    /// Fully expanded form, every part padded to 4 hex digits.
    pub fn expanded(&self) -> String {
        self.segments()
            .iter()
            .map(|s| format!("{s:04x}"))
            .collect::<Vec<String>>()
            .join(":")
    }

    fn parts(&self) -> Vec<String> {
        let mut out: Vec<String> = self.head.iter().map(|p| format!("{p:x}")).collect();
        if let Some(tail) = &self.tail {
            out.push(String::new());
            out.extend(tail.iter().map(|p| format!("{p:x}")));
        }
        out
    }
}

impl fmt::Display for Ipv6Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_hex(&self.head))?;
        if let Some(tail) = &self.tail {
            write!(f, "{ELISION}{}", join_hex(tail))?;
        }
        Ok(())
    }
}

fn join_hex(parts: &[u16]) -> String {
    parts
        .iter()
        .map(|p| format!("{p:x}"))
        .collect::<Vec<String>>()
        .join(":")
}

/* -------------------------------------------------------------------------- */

/**
An immutable IPv4 or IPv6 address.

Equality, hashing and ordering (see [crate::compare]) go through the
family and the binary form, so `::1` equals `0:0:0:0:0:0:0:1` even though
they render differently.
*/
#[derive(Clone, Debug)]
pub enum Address {
    V4(Ipv4Value),
    V6(Ipv6Value),
}

impl Address {
    pub fn family(&self) -> IpFam {
        match self {
            Address::V4(_) => IpFam::V4,
            Address::V6(_) => IpFam::V6,
        }
    }

    pub fn delimiter(&self) -> char {
        self.family().delimiter()
    }

    /// Fixed-width big-endian bytes: 4 for v4, 16 for v6.
    pub fn binary(&self) -> Vec<u8> {
        match self {
            Address::V4(a) => a.octets().to_vec(),
            Address::V6(a) => a.octets().to_vec(),
        }
    }

    /// Build an address from its binary form. The length picks the family.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
            return Some(Address::V4(Ipv4Value::new(octets)));
        }
        if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
            return Some(Address::V6(Ipv6Value::from_octets(octets)));
        }
        None
    }

    /// Lowercase hex of the binary form, zero-padded to full width.
    pub fn to_hex(&self) -> String {
        self.binary().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// The address as an unsigned integer. Exact for the whole v6 space.
    pub fn to_u128(&self) -> u128 {
        self.binary()
            .iter()
            .fold(0u128, |acc, b| (acc << 8) | *b as u128)
    }

    /// Decimal string of [Address::to_u128].
    pub fn to_long_string(&self) -> String {
        self.to_u128().to_string()
    }

    /// Parts as strings: decimal for v4, unpadded lowercase hex for v6.
    /// An elided v6 run shows up as one empty string in its position.
    pub fn parts(&self) -> Vec<String> {
        match self {
            Address::V4(a) => a.octets().iter().map(|o| o.to_string()).collect(),
            Address::V6(a) => a.parts(),
        }
    }

    /// v6: every part padded to 4 hex digits. v4: same as [fmt::Display].
    pub fn expanded(&self) -> String {
        match self {
            Address::V4(a) => a.to_string(),
            Address::V6(a) => a.expanded(),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::V4(a) => a.fmt(f),
            Address::V6(a) => a.fmt(f),
        }
    }
}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family().hash(state);
        self.binary().hash(state);
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s)
    }
}

serde_via_str!(Address);

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Address::V4(Ipv4Value::new(ip.octets()))
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Address::V6(Ipv6Value::from_segments(ip.segments()))
    }
}

impl From<IpAddr> for Address {
    fn from(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(a) => a.into(),
            IpAddr::V6(a) => a.into(),
        }
    }
}

impl From<&Address> for IpAddr {
    fn from(addr: &Address) -> Self {
        match addr {
            Address::V4(a) => IpAddr::V4(Ipv4Addr::from(a.octets())),
            Address::V6(a) => IpAddr::V6(Ipv6Addr::from(a.segments())),
        }
    }
}

impl From<Address> for IpAddr {
    fn from(addr: Address) -> Self {
        IpAddr::from(&addr)
    }
}

/* -------------------------------------------------------------------------- */

/**
Text that is a valid prefix of an address, but has too few parts.

Carries the parts actually given and a completion where the missing
low-order parts are zero. A partial value has no binary form of its own;
use [PartialAddress::completion] when one is needed.
*/
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartialAddress {
    input: String,
    fam: IpFam,
    /// `None` marks a part cut off by a trailing delimiter
    parts: Vec<Option<u16>>,
    completion: Address,
}

impl PartialAddress {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn family(&self) -> IpFam {
        self.fam
    }

    /// Parts as given, rendered like [Address::parts]. An absent trailing
    /// part renders as an empty string.
    pub fn parts(&self) -> Vec<String> {
        self.parts
            .iter()
            .map(|p| p.map(|v| self.fam.render_part(v)).unwrap_or_default())
            .collect()
    }

    pub(crate) fn part_values(&self) -> &[Option<u16>] {
        &self.parts
    }

    /// The zero-completed address.
    pub fn completion(&self) -> &Address {
        &self.completion
    }

    pub fn into_completion(self) -> Address {
        self.completion
    }
}

impl fmt::Display for PartialAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let delim: String = self.fam.delimiter().to_string();
        f.write_str(&self.parts().join(&delim))
    }
}

/// Outcome of parsing text that is not malformed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Parsed {
    Complete(Address),
    Partial(PartialAddress),
}

impl Parsed {
    pub fn is_partial(&self) -> bool {
        matches!(self, Parsed::Partial(_))
    }

    /// Strict view: a partial outcome becomes [AddressError::Partial].
    pub fn complete(self) -> Result<Address, AddressError> {
        match self {
            Parsed::Complete(addr) => Ok(addr),
            Parsed::Partial(p) => Err(AddressError::Partial(p)),
        }
    }

    /// Lenient view: the address itself, or the zero completion of a partial.
    pub fn completion(self) -> Address {
        match self {
            Parsed::Complete(addr) => addr,
            Parsed::Partial(p) => p.into_completion(),
        }
    }

    /// Numeric parts as given. Complete v6 values list all 8 segments.
    pub(crate) fn part_values(&self) -> Vec<Option<u16>> {
        match self {
            Parsed::Complete(Address::V4(a)) => a.octets().iter().map(|o| Some(*o as u16)).collect(),
            Parsed::Complete(Address::V6(a)) => a.segments().iter().map(|s| Some(*s)).collect(),
            Parsed::Partial(p) => p.part_values().to_vec(),
        }
    }
}

/* -------------------------------------------------------------------------- */

/**
Try IPv4, then IPv6, and return the first complete address.

Partial outcomes count as failures here; use [parse_v4] / [parse_v6]
to tell them apart from malformed input.
*/
pub fn parse_address(text: &str) -> Result<Address, AddressError> {
    if let Ok(Parsed::Complete(addr)) = parse_v4(text) {
        return Ok(addr);
    }
    if let Ok(Parsed::Complete(addr)) = parse_v6(text) {
        return Ok(addr);
    }
    Err(AddressError::invalid(text, Reason::NotAnAddress))
}

/**
Parse dotted-decimal IPv4 text.

Leading zeros are ignored (`001.000.00220.202` is `1.0.220.202`) and an
empty part is zero. An empty *final* part (trailing `.`) is kept as absent
in a partial outcome. Fewer than 4 parts gives [Parsed::Partial].
*/
pub fn parse_v4(text: &str) -> Result<Parsed, AddressError> {
    let fam: IpFam = IpFam::V4;
    if text.is_empty() {
        return Err(AddressError::invalid(text, Reason::Empty));
    }
    if !text.chars().all(|c| c.is_ascii_digit() || c == fam.delimiter()) {
        return Err(AddressError::invalid(text, Reason::IllegalCharacters));
    }

    let tokens: Vec<&str> = text.split(fam.delimiter()).collect();
    let last: usize = tokens.len() - 1;
    let mut parts: Vec<Option<u16>> = Vec::with_capacity(tokens.len());
    for (i, tok) in tokens.iter().enumerate() {
        if tok.is_empty() {
            parts.push(if i == last { None } else { Some(0) });
            continue;
        }
        let val: u16 =
            parse_part(tok, fam).ok_or_else(|| AddressError::invalid(text, Reason::OutOfBounds))?;
        parts.push(Some(val));
    }

    if parts.len() > fam.max_parts() {
        return Err(AddressError::invalid(text, Reason::TooManyParts));
    }

    let mut octets: [u8; 4] = [0; 4];
    for (o, p) in octets.iter_mut().zip(&parts) {
        *o = p.unwrap_or(0) as u8;
    }
    let addr: Address = Address::V4(Ipv4Value::new(octets));

    if parts.len() < fam.max_parts() {
        return Ok(Parsed::Partial(PartialAddress {
            input: text.into(),
            fam,
            parts,
            completion: addr,
        }));
    }
    Ok(Parsed::Complete(addr))
}

/**
Parse colon-hex IPv6 text.

Before splitting, the text is normalized:
- a leading single `:` is doubled (`:1` reads as `::1`)
- with exactly 8 delimiters, the `::` is an explicit zero part
  (`::2:3:4:5:6:7:8` reads as `0:2:3:4:5:6:7:8`)
- a trailing single `:` is dropped

Without an elision, fewer than 8 parts gives [Parsed::Partial].
*/
pub fn parse_v6(text: &str) -> Result<Parsed, AddressError> {
    let fam: IpFam = IpFam::V6;
    if text.is_empty() {
        return Err(AddressError::invalid(text, Reason::Empty));
    }
    if !text.chars().all(|c| c.is_ascii_hexdigit() || c == fam.delimiter()) {
        return Err(AddressError::invalid(text, Reason::IllegalCharacters));
    }

    let addr: String = normalize_v6(text);
    let (head, tail) = match addr.split_once(ELISION) {
        Some((head, tail)) => (head, Some(tail)),
        None => (addr.as_str(), None),
    };
    if tail.is_some_and(|t| t.contains(ELISION)) {
        return Err(AddressError::invalid(text, Reason::MultipleElisions));
    }

    let head: Vec<u16> = parse_v6_run(text, head)?;
    let tail: Option<Vec<u16>> = tail.map(|t| parse_v6_run(text, t)).transpose()?;

    match tail {
        Some(tail) => {
            if head.len() + tail.len() >= fam.max_parts() {
                return Err(AddressError::invalid(text, Reason::TooManyParts));
            }
            Ok(Parsed::Complete(Address::V6(Ipv6Value {
                head,
                tail: Some(tail),
            })))
        }
        None => {
            if head.len() > fam.max_parts() {
                return Err(AddressError::invalid(text, Reason::TooManyParts));
            }
            if head.len() < fam.max_parts() {
                let mut seg: [u16; 8] = [0; 8];
                seg[..head.len()].copy_from_slice(&head);
                return Ok(Parsed::Partial(PartialAddress {
                    input: text.into(),
                    fam,
                    parts: head.into_iter().map(Some).collect(),
                    completion: Address::V6(Ipv6Value::from_segments(seg)),
                }));
            }
            Ok(Parsed::Complete(Address::V6(Ipv6Value { head, tail: None })))
        }
    }
}

fn normalize_v6(text: &str) -> String {
    let mut addr: String = text.to_string();

    if addr.starts_with(':') && !addr.starts_with(ELISION) {
        addr.insert(0, ':');
    }

    // 8 delimiters plus an elision would read as 9 parts
    if addr.matches(':').count() == V6_PARTS && addr.contains(ELISION) {
        addr = addr.replacen(ELISION, ":0:", 1);
        if addr.starts_with(':') && !addr.starts_with(ELISION) {
            addr.remove(0);
        }
    }

    if addr.ends_with(':') && !addr.ends_with(ELISION) {
        addr.pop();
    }
    addr
}

/// Parse the `:`-separated parts on one side of an elision.
fn parse_v6_run(input: &str, run: &str) -> Result<Vec<u16>, AddressError> {
    if run.is_empty() {
        return Ok(Vec::new());
    }
    run.split(':')
        .map(|tok| {
            if tok.is_empty() {
                return Err(AddressError::invalid(input, Reason::MultipleElisions));
            }
            parse_part(tok, IpFam::V6).ok_or_else(|| AddressError::invalid(input, Reason::OutOfBounds))
        })
        .collect()
}

/// A single part in the family's radix, `None` if above the family maximum.
#[inline]
fn parse_part(tok: &str, fam: IpFam) -> Option<u16> {
    u32::from_str_radix(tok, fam.radix())
        .ok()
        .filter(|v| *v <= fam.part_max())
        .map(|v| v as u16)
}

/* -------------------------------------------------------------------------- */
