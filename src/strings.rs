// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static DASH: &str = "-";
pub(crate) static RANGE_SEP: &str = " - ";
pub(crate) static SLASH: &str = "/";
pub(crate) static ELISION: &str = "::";

// error prefixes (lib.rs)
pub(crate) static ERR_INVALID_IP: &str = "invalid IP address";
pub(crate) static ERR_PARTIAL: &str = "incomplete IP address";
pub(crate) static ERR_RNG_ORDER: &str = "invalid range: end is before start";
pub(crate) static ERR_MISMATCH: &str = "cannot mix IPv4 and IPv6 in range";
pub(crate) static ERR_NO_RANGES: &str = "cannot cover an empty set of ranges";

// reason tags
pub(crate) static RSN_EMPTY: &str = "empty address";
pub(crate) static RSN_ILLEGAL: &str = "illegal characters";
pub(crate) static RSN_BOUNDS: &str = "value out of bounds";
pub(crate) static RSN_TOO_MANY: &str = "too many parts";
pub(crate) static RSN_ELISIONS: &str = "multiple elisions";
pub(crate) static RSN_NO_MASK: &str = "missing mask";
pub(crate) static RSN_BAD_MASK: &str = "invalid mask";
pub(crate) static RSN_NOT_ADDR: &str = "not a valid IPv4 or IPv6 address";
pub(crate) static RSN_FAMILY: &str = "not an IPv4 address";
