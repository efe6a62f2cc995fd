// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    address::{Address, Ipv4Value, Ipv6Value},
    range::AddressRange,
};

/**
Add a signed amount to a big-endian byte string in place, least significant
byte first, carrying (or borrowing) into the next byte.

Returns `true` if a carry fell off the most significant byte, i.e. the value
wrapped around the fixed width.
*/
pub(crate) fn add_bytes(bytes: &mut [u8], amount: i128) -> bool {
    let mut carry: i128 = amount;
    for byte in bytes.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let sum: i128 = *byte as i128 + carry;
        *byte = sum.rem_euclid(256) as u8;
        carry = sum.div_euclid(256);
    }
    carry != 0
}

/// `addr + amount` in the address' own family, and whether it wrapped.
pub(crate) fn step(addr: &Address, amount: i128) -> (Address, bool) {
    match addr {
        Address::V4(a) => {
            let mut octets: [u8; 4] = a.octets();
            let wrapped: bool = add_bytes(&mut octets, amount);
            (Address::V4(Ipv4Value::new(octets)), wrapped)
        }
        Address::V6(a) => {
            let mut octets: [u8; 16] = a.octets();
            let wrapped: bool = add_bytes(&mut octets, amount);
            (Address::V6(Ipv6Value::from_octets(octets)), wrapped)
        }
    }
}

/// Add `amount` (may be negative). Wraps silently at either end of the family.
pub fn increment(addr: &Address, amount: i64) -> Address {
    step(addr, amount as i128).0
}

pub fn decrement(addr: &Address) -> Address {
    increment(addr, -1)
}

/* -------------------------------------------------------------------------- */

/**
Lazy walk over a range, one address at a time.

Yields at most `limit` addresses and stops once the running value passes
the range end. After the family maximum the walk ends instead of wrapping
back to zero. Clone it to restart from the same position.
*/
#[derive(Clone, Debug)]
pub struct AddressWalk {
    next: Option<Address>,
    end: Address,
    remaining: usize,
}

impl Iterator for AddressWalk {
    type Item = Address;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current: Address = self.next.take()?;
        if current > self.end {
            return None;
        }

        let (succ, wrapped) = step(&current, 1);
        if !wrapped {
            self.next = Some(succ);
        }
        self.remaining -= 1;

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(_) => (0, Some(self.remaining)),
            None => (0, Some(0)),
        }
    }
}

pub fn walk<R: AddressRange + ?Sized>(range: &R, limit: usize) -> AddressWalk {
    AddressWalk {
        next: Some(range.start().clone()),
        end: range.end().clone(),
        remaining: limit,
    }
}

/// Eager form of [walk].
pub fn range<R: AddressRange + ?Sized>(range: &R, limit: usize) -> Vec<Address> {
    walk(range, limit).collect()
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::IpRange;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn rng(beg: &str, end: &str) -> IpRange {
        IpRange::new(addr(beg), addr(end)).unwrap()
    }

    fn strings(addrs: &[Address]) -> Vec<String> {
        addrs.iter().map(|a| a.to_string()).collect()
    }

    #[rustfmt::skip]
    #[test]
    fn test_increment() {
        let tests: Vec<&str> = vec![
            "1.1.1.1",              "1.1.1.2",
            "1.1.1.255",            "1.1.2.0",
            "1.255.255.255",        "2.0.0.0",
            "1.1.1.9",              "1.1.1.10",
            "::0",                  "::1",
            "::a:0:ffff",           "::a:1:0",
            "::ffff:ffff:ffff",     "::1:0:0:0",
            "::9",                  "::a",
            "::f",                  "::10",
        ];

        for i in (0..tests.len()).step_by(2) {
            let out: Address = increment(&addr(tests[i]), 1);
            assert_eq!(out.to_string(), tests[i + 1], "Failed: '{}'", tests[i]);
        }
    }

    #[test]
    fn test_wraparound() {
        assert_eq!(increment(&addr("255.255.255.255"), 1).to_string(), "0.0.0.0");
        let max: &str = "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff";
        assert_eq!(increment(&addr(max), 1).to_string(), "::");
        assert_eq!(decrement(&addr("0.0.0.0")).to_string(), "255.255.255.255");
        assert_eq!(decrement(&addr("::")).to_string(), max);
    }

    #[test]
    fn test_amounts() {
        assert_eq!(increment(&addr("1.1.1.1"), 300).to_string(), "1.1.2.45");
        assert_eq!(increment(&addr("1.1.2.0"), -256).to_string(), "1.1.1.0");
        assert_eq!(decrement(&addr("1.1.2.0")).to_string(), "1.1.1.255");
        assert_eq!(decrement(&addr("::1:0:0:0")).to_string(), "::ffff:ffff:ffff");
        assert_eq!(increment(&addr("::"), i64::MAX).to_string(), "::7fff:ffff:ffff:ffff");
        assert_eq!(increment(&addr("10.0.0.1"), 0), addr("10.0.0.1"));
    }

    #[test]
    fn test_add_bytes() {
        let mut bytes: [u8; 2] = [0x00, 0xff];
        assert!(!add_bytes(&mut bytes, 1));
        assert_eq!(bytes, [0x01, 0x00]);
        assert!(add_bytes(&mut bytes, -0x101));
        assert_eq!(bytes, [0xff, 0xff]);
    }

    #[test]
    fn test_range() {
        let out: Vec<Address> = range(&rng("1.1.1.1", "1.1.1.255"), 5);
        assert_eq!(strings(&out), vec!["1.1.1.1", "1.1.1.2", "1.1.1.3", "1.1.1.4", "1.1.1.5"]);

        let out: Vec<Address> = range(&rng("1.1.1.1", "1.1.1.1"), 10);
        assert_eq!(strings(&out), vec!["1.1.1.1"]);

        let out: Vec<Address> = range(&rng("::a", "::a"), 10);
        assert_eq!(strings(&out), vec!["::a"]);

        let out: Vec<Address> = range(&rng("::a", "::ffff"), 10);
        assert_eq!(
            strings(&out),
            vec!["::a", "::b", "::c", "::d", "::e", "::f", "::10", "::11", "::12", "::13"]
        );

        assert!(range(&rng("::a", "::ffff"), 0).is_empty());
    }

    #[test]
    fn test_walk_stops_at_family_max() {
        let out: Vec<Address> = range(&rng("255.255.255.254", "255.255.255.255"), 10);
        assert_eq!(strings(&out), vec!["255.255.255.254", "255.255.255.255"]);
    }

    #[test]
    fn test_walk_is_lazy_and_restartable() {
        let mut it: AddressWalk = walk(&rng("10.0.0.0", "10.255.255.255"), usize::MAX);
        assert_eq!(it.next().unwrap().to_string(), "10.0.0.0");
        let copy: AddressWalk = it.clone();
        assert_eq!(it.nth(255).unwrap().to_string(), "10.0.1.0");
        assert_eq!(copy.take(2).count(), 2);

        let single: Address = addr("::1");
        assert_eq!(walk(&single, 3).count(), 1);
    }
}
