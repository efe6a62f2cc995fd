// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    address::{parse_v4, Address, IpFam, Ipv4Value, Parsed},
    finder::find,
    range::{IpRange, Span},
    AddressError, PART_MAX_V4, V4_PARTS,
};
use tracing::debug;

const OCTET_MAX: u16 = PART_MAX_V4 as u16;

/**
Every range a partially typed IPv4 address could still turn into.

Whatever [find] sees in the text comes first. Then the last typed part is
treated as the prefix of a longer number: `1.2` may become `1.2.x.x`,
`1.2x.x.x` or `1.2xx.x.x`, so the result lists `1.2.0.0 - 1.2.255.255`,
`1.20.0.0 - 1.29.255.255` and `1.200.0.0 - 1.255.255.255`. A trailing
delimiter (`1.2.`) closes the last part and only wildcards the next one.

Text that is not IPv4 at all yields just the [find] results.
*/
pub fn candidates(text: &str) -> Result<Vec<Span>, AddressError> {
    let mut out: Vec<Span> = find(&[text])?;

    let parsed: Parsed = match parse_v4(text) {
        Ok(parsed) => parsed,
        Err(_) => return Ok(out),
    };
    let mut parts: Vec<Option<u16>> = parsed.part_values();
    // `1.2.3.` parses complete, but its last part is still open
    if text.ends_with(IpFam::V4.delimiter()) {
        if let Some(last) = parts.last_mut() {
            *last = None;
        }
    }
    let Some((last, fixed)) = parts.split_last() else {
        return Ok(out);
    };

    let last: u16 = match last {
        Some(p) => *p,
        None => {
            out.push(block(fixed, 0, OCTET_MAX));
            debug!(input = text, found = out.len(), "partial expansion done");
            return Ok(out);
        }
    };

    if fixed.len() < V4_PARTS - 1 {
        out.push(block(fixed, last, last));
    }

    if last > 0 {
        let mut scale: u16 = 10;
        while last * scale <= OCTET_MAX {
            let lo: u16 = last * scale;
            let hi: u16 = (lo + scale - 1).min(OCTET_MAX);
            out.push(block(fixed, lo, hi));
            scale *= 10;
        }
    }

    debug!(input = text, found = out.len(), "partial expansion done");
    Ok(out)
}

/// `fixed.[lo..=hi].0.0 - fixed.[lo..=hi].255.255`, padded to four octets.
fn block(fixed: &[Option<u16>], lo: u16, hi: u16) -> Span {
    let mut start: [u8; 4] = [0; 4];
    let mut end: [u8; 4] = [OCTET_MAX as u8; 4];
    for (i, p) in fixed.iter().enumerate() {
        let v: u8 = p.unwrap_or(0) as u8;
        start[i] = v;
        end[i] = v;
    }
    start[fixed.len()] = lo as u8;
    end[fixed.len()] = hi as u8;

    Span::Range(IpRange::new_unchecked(
        Address::V4(Ipv4Value::new(start)),
        Address::V4(Ipv4Value::new(end)),
    ))
}

/* -------------------------------------------------------------------------- */
