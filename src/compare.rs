// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Address;
use std::cmp::Ordering;

/**
Total order over addresses: family first (v4 sorts before v6), then the
fixed-width binary form, byte by byte.

Two texts that name the same address (`::1` vs `0:0:0:0:0:0:0:1`) compare
equal.
*/
pub fn compare(a: &Address, b: &Address) -> Ordering {
    a.family()
        .cmp(&b.family())
        .then_with(|| a.binary().cmp(&b.binary()))
}

/// Smallest address of the set. Ties go to the leftmost one.
pub fn min_of<'a, I>(addrs: I) -> Option<&'a Address>
where
    I: IntoIterator<Item = &'a Address>,
{
    addrs.into_iter().fold(None, |best, addr| match best {
        Some(b) if compare(addr, b) != Ordering::Less => Some(b),
        _ => Some(addr),
    })
}

/// Largest address of the set. Ties go to the leftmost one.
pub fn max_of<'a, I>(addrs: I) -> Option<&'a Address>
where
    I: IntoIterator<Item = &'a Address>,
{
    addrs.into_iter().fold(None, |best, addr| match best {
        Some(b) if compare(addr, b) != Ordering::Greater => Some(b),
        _ => Some(addr),
    })
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for Address {}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn addrs(list: &[&str]) -> Vec<Address> {
        list.iter().map(|s| addr(s)).collect()
    }

    #[test]
    fn test_min_max_v4() {
        let set: Vec<Address> = addrs(&["123.255.255.255", "1.1.1.1", "200.0.0.0", "123.0.0.0"]);
        assert_eq!(min_of(&set).unwrap().to_string(), "1.1.1.1");
        assert_eq!(max_of(&set).unwrap().to_string(), "200.0.0.0");
    }

    #[test]
    fn test_min_max_v6() {
        let set: Vec<Address> = addrs(&["b::1", "aa::0", "::ffff", "1:2::"]);
        assert_eq!(min_of(&set).unwrap().to_string(), "::ffff");
        assert_eq!(max_of(&set).unwrap().to_string(), "b::1");
        assert!(min_of(&Vec::<Address>::new()).is_none());
    }

    #[test]
    fn test_ties_keep_leftmost() {
        let set: Vec<Address> = addrs(&["::1", "0:0:0:0:0:0:0:1", "::2", "0::2"]);
        assert_eq!(min_of(&set).unwrap().to_string(), "::1");
        assert_eq!(max_of(&set).unwrap().to_string(), "::2");
        assert!(std::ptr::eq(max_of(&set).unwrap(), &set[2]));
    }

    #[rustfmt::skip]
    #[test]
    fn test_pairwise() {
        let tests: Vec<(&str, &str, Ordering)> = vec![
            ("aa::0",               "b::1",             Ordering::Greater),
            ("abc:def:abc::ffff",   "abc:def:ddd::",    Ordering::Less),
            ("1.1.1.1",             "1.1.1.1",          Ordering::Equal),
            ("10.0.0.0",            "9.255.255.255",    Ordering::Greater),
            ("::1",                 "::0:1",            Ordering::Equal),
            ("255.255.255.255",     "::",               Ordering::Less),
        ];

        for (a, b, ord) in tests {
            assert_eq!(compare(&addr(a), &addr(b)), ord, "Failed: '{a}' vs '{b}'");
            assert_eq!(compare(&addr(b), &addr(a)), ord.reverse(), "Failed: '{b}' vs '{a}'");
        }
    }

    #[test]
    fn test_sort() {
        let mut set: Vec<Address> = addrs(&["::1", "10.0.0.1", "1.2.3.4", "::"]);
        set.sort();
        let out: Vec<String> = set.iter().map(|a| a.to_string()).collect();
        assert_eq!(out, vec!["1.2.3.4", "10.0.0.1", "::", "::1"]);
    }
}
