// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    address::{parse_v4, parse_v6},
    range::{AddressRange, Span},
    AddressError,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

const V4_BODY: &str = r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}";
const V6_PART: &str = r"[0-9a-fA-F]{1,4}";
const V6_DELIM: &str = r"::?";

// Compiled once per program execution, shared read-only afterwards.
lazy_static! {
    static ref RE_CIDR_V4: Regex =
        Regex::new(&format!(r"{V4_BODY}/[0-9]{{1,2}}")).expect("invalid CIDR regex");
    static ref RE_V4: Regex = Regex::new(V4_BODY).expect("invalid IPv4 regex");
    // a part then `:`/`::`, or `::` then a part; the bare `::` never matches
    static ref RE_V6: Regex = Regex::new(&format!(
        "(?:{p}{d}|::{p}(?:{d})?)(?:{p}{d}){{0,6}}(?:{p})?",
        p = V6_PART,
        d = V6_DELIM
    ))
    .expect("invalid IPv6 regex");
}

/// What [find] looks for, in priority order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Pattern {
    /// `A.B.C.D/n`
    Cidr,
    V4,
    V6,
}

impl Pattern {
    /// Evaluation order: earlier patterns win overlaps.
    pub const ALL: [Pattern; 3] = [Pattern::Cidr, Pattern::V4, Pattern::V6];

    pub fn regex(&self) -> &'static Regex {
        match self {
            Pattern::Cidr => &RE_CIDR_V4,
            Pattern::V4 => &RE_V4,
            Pattern::V6 => &RE_V6,
        }
    }

    /// Turn a matched substring into a value, strictly.
    pub fn build(&self, text: &str) -> Result<Span, AddressError> {
        match self {
            Pattern::Cidr => Ok(Span::Cidr(text.parse()?)),
            Pattern::V4 => Ok(Span::Address(parse_v4(text)?.complete()?)),
            Pattern::V6 => Ok(Span::Address(parse_v6(text)?.complete()?)),
        }
    }
}

/// Matches that only look like an address (`999.999.999.999`, `a:b`).
fn is_false_alarm(err: &AddressError) -> bool {
    match err {
        AddressError::Invalid { reason, .. } => !reason.is_mask(),
        AddressError::Partial(_) => true,
        _ => false,
    }
}

/**
Scan free text for embedded addresses.

Each [Pattern] runs over every haystack before the next one starts, so a
CIDR anywhere in the input beats a plain address that overlaps it. A match
overlapping anything already accepted is dropped whole.

Text that merely resembles an address is skipped. A CIDR with a bad mask
(`1.1.1.1/33`) fails the whole scan.
*/
pub fn find<S: AsRef<str>>(haystacks: &[S]) -> Result<Vec<Span>, AddressError> {
    let mut found: Vec<Span> = Vec::new();

    for pattern in Pattern::ALL {
        for haystack in haystacks {
            for m in pattern.regex().find_iter(haystack.as_ref()) {
                let span: Span = match pattern.build(m.as_str()) {
                    Ok(span) => span,
                    Err(err) if is_false_alarm(&err) => {
                        trace!(?pattern, text = m.as_str(), %err, "skipping match");
                        continue;
                    }
                    Err(err) => return Err(err),
                };

                if let Some(prev) = found.iter().find(|f| f.overlaps(&span)) {
                    trace!(%span, %prev, "dropping overlapping match");
                    continue;
                }
                found.push(span);
            }
        }
    }

    debug!(haystacks = haystacks.len(), found = found.len(), "address scan done");
    Ok(found)
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Reason;

    fn found(haystacks: &[&str]) -> Vec<String> {
        find(haystacks).unwrap().iter().map(|s| s.to_string()).collect()
    }

    #[rustfmt::skip]
    #[test]
    fn test_find_single() {
        let tests: Vec<(&str, Vec<&str>)> = vec![
            ("127.0.0.1",               vec!["127.0.0.1"]),
            ("255.255.255.255",         vec!["255.255.255.255"]),
            ("127.0a.0.1",              vec![]),
            ("127.0",                   vec![]),
            ("127.*",                   vec![]),
            ("::1",                     vec!["::1"]),
            ("::afAF",                  vec!["::afaf"]),
            ("::G",                     vec![]),
            ("::z",                     vec![]),
            ("aa:aa",                   vec![]),
            ("aa:aa:aa:aa:aa:aa:aa",    vec![]),
            ("a:",                      vec![]),
            ("::",                      vec![]),
            ("2001:4860:4860::8888F",   vec!["2001:4860:4860::8888"]),
            ("::2:3:4:5:6:7:8",         vec!["0:2:3:4:5:6:7:8"]),
            ("::3:4:5:6:7:8",           vec!["::3:4:5:6:7:8"]),
            ("::4:5:6:7:8",             vec!["::4:5:6:7:8"]),
            ("1::3:4:5:6:7:8",          vec!["1::3:4:5:6:7:8"]),
            ("1:2:3:4:5:6:7:8",         vec!["1:2:3:4:5:6:7:8"]),
            ("1:0:3:4:5:6:7:8",         vec!["1:0:3:4:5:6:7:8"]),
            ("2001:4860:4860::8888",    vec!["2001:4860:4860::8888"]),
            ("2620:0:2d0:200::7",       vec!["2620:0:2d0:200::7"]),
            ("2620:0:2d0:200::",        vec!["2620:0:2d0:200::"]),
        ];

        for (haystack, expected) in tests {
            assert_eq!(found(&[haystack]), expected, "Failed: '{haystack}'");
        }
    }

    #[test]
    fn test_find_multiple_haystacks() {
        assert_eq!(found(&["test 1.1.1.1", "te 1.2.3.4/24 st"]), vec!["1.2.3.0/24", "1.1.1.1"]);
    }

    #[test]
    fn test_dedupe() {
        // any CIDR beats a plain address, a wider CIDR does not beat an earlier narrow one
        assert_eq!(
            found(&["test 1.1.1.1 1.1.1.2/28 1.1.1.1/24 1.1.1.9/28 1.2.3.4/27 1.2.3.20/26"]),
            vec!["1.1.1.0/28", "1.2.3.0/27"]
        );
        assert_eq!(
            found(&["test 1.1.1.1/24 1.1.1.0 1.1.1.9/28 1.2.3.4/27 1.2.3.20/26"]),
            vec!["1.1.1.0/24", "1.2.3.0/27"]
        );
        // first accepted CIDR wins, regardless of width
        assert_eq!(found(&["1.1.1.1 1.1.1.2/28 1.1.1.1/24"]), vec!["1.1.1.0/28"]);
    }

    #[test]
    fn test_invalid_ips_are_skipped() {
        assert_eq!(found(&["999.999.999.999 ::g 1.1.1.1 abc:"]), vec!["1.1.1.1"]);
        assert_eq!(found(&["999.1.1.1/24 at 12:30"]), Vec::<String>::new());
    }

    #[test]
    fn test_mixed_text() {
        let log: &str = "conn from 10.0.0.7 to 2001:db8::1 via 192.168.0.0/16, 10.0.0.7 again";
        assert_eq!(found(&[log]), vec!["192.168.0.0/16", "10.0.0.7", "2001:db8::1"]);
    }

    #[test]
    fn test_mask_errors_propagate() {
        let err = find(&["net 1.1.1.1/33"]).unwrap_err();
        assert_eq!(err.reason(), Some(Reason::InvalidMask));
        assert!(find(&["1.2.3.4/0 and 5.6.7.8"]).is_err());
    }

    #[test]
    fn test_pattern_build() {
        assert!(matches!(Pattern::Cidr.build("1.2.3.4/8"), Ok(Span::Cidr(_))));
        assert!(matches!(Pattern::V4.build("1.2.3"), Err(AddressError::Partial(_))));
        assert!(Pattern::V6.regex().is_match("::1"));
        assert!(!Pattern::V6.regex().is_match("::"));
        assert!(!Pattern::V4.regex().is_match("1.2.3"));
    }

    #[test]
    fn test_empty_input() {
        assert!(find::<&str>(&[]).unwrap().is_empty());
        assert!(found(&[""]).is_empty());
    }
}
