// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    address::Address,
    increment::step,
    range::{AddressRange, IpRange},
};

/**
Set difference `from \ remove`, as 0, 1 or 2 ranges (left piece first).

- `remove` covers `from`: empty
- no intersection: `from` unchanged
- otherwise whatever of `from` lies below `remove.start` and above
  `remove.end`

There is nothing below the family minimum or above the family maximum, so
a `remove` touching either end never yields a wrapped piece.
*/
pub fn subtract<A, B>(remove: &A, from: &B) -> Vec<IpRange>
where
    A: AddressRange + ?Sized,
    B: AddressRange + ?Sized,
{
    if remove.family() != from.family() {
        return vec![from.to_range()];
    }

    let (before, no_left) = step(remove.start(), -1);
    let (after, no_right) = step(remove.end(), 1);

    let lo: &Address = if no_left { remove.start() } else { &before };
    let hi: &Address = if no_right { remove.end() } else { &after };
    let envelope: IpRange = IpRange::new_unchecked(lo.clone(), hi.clone());
    if !from.overlaps(&envelope) {
        return vec![from.to_range()];
    }

    let mut out: Vec<IpRange> = Vec::with_capacity(2);
    if !no_left && from.overlaps(&before) {
        out.push(IpRange::new_unchecked(from.start().clone(), before));
    }
    if !no_right && from.overlaps(&after) {
        out.push(IpRange::new_unchecked(after, from.end().clone()));
    }
    out
}

/* -------------------------------------------------------------------------- */
