// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{number::Address, strings::*, CalcError, IPV4_BITS, IPV4_SPACE};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

lazy_static! {
    static ref PREFIX_RE: Regex = Regex::new(r"^/?\s*([0-9]+)$").expect("static regex");
}

/// Smallest block size considered when sizing a mask for classful use.
const CLASSFUL_MIN_BLOCK: u64 = 256;

/**
Mask sizing policy.

`Classful` only hands out masks on the legacy byte boundary or wider (block
sizes of 256 addresses and up), `Cidr` allows any prefix length.
*/
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sizing {
    #[default]
    Classful,
    Cidr,
}

impl Sizing {
    const fn min_block(self) -> u64 {
        match self {
            Sizing::Classful => CLASSFUL_MIN_BLOCK,
            Sizing::Cidr => 1,
        }
    }
}

impl From<bool> for Sizing {
    /// `true` means CIDR sizing is allowed.
    fn from(cidr: bool) -> Self {
        match cidr {
            true => Sizing::Cidr,
            false => Sizing::Classful,
        }
    }
}

/// Which end of a set of masks to pick, see [Mask::extreme].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Extreme {
    /// fewest leading one-bits
    Shortest,
    /// most leading one-bits
    Longest,
}

/**
A subnet (prefix) mask: `p` one-bits followed by `32 - p` zero-bits.

The prefix length, the wildcard and the capacities are all derived from
the bit pattern. Ordering follows the integer value, so a longer prefix
compares greater.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Mask(Address);

impl Mask {
    /// Validate the bit pattern of `addr` as a prefix mask.
    pub fn new(addr: Address) -> Result<Self, CalcError> {
        ipnet::ipv4_mask_to_prefix(addr.into()).map_err(|_| CalcError::NotPrefixMask(addr))?;
        Ok(Self(addr))
    }

    /// Parse dotted-decimal text and validate it as a prefix mask.
    pub fn parse(text: impl AsRef<str>) -> Result<Self, CalcError> {
        Self::new(Address::parse(text)?)
    }

    pub fn from_prefix_len(prefix: u64) -> Result<Self, CalcError> {
        if prefix > IPV4_BITS as u64 {
            return Err(CalcError::PrefixRange(prefix));
        }
        Ok(Self::from_prefix(prefix as u8))
    }

    /// Infallible variant for prefixes known to be in range; clamps at 32.
    pub(crate) fn from_prefix(prefix: u8) -> Self {
        Self(Address::from(mask_u32(prefix.min(IPV4_BITS))))
    }

    /// Parse prefix text such as `"/24"`; the slash is optional.
    pub fn parse_prefix(text: impl AsRef<str>) -> Result<Self, CalcError> {
        let text: &str = text.as_ref().trim();
        let caps = PREFIX_RE
            .captures(text)
            .ok_or_else(|| CalcError::Parse(text.into()))?;
        let prefix: u64 = caps[1].parse().unwrap_or(u64::MAX);
        Self::from_prefix_len(prefix)
    }

    /**
    Build a mask from its wildcard (inverted) form. The wildcard must be
    zero-bits followed by one-bits.
    */
    pub fn from_wildcard(wildcard: Address) -> Result<Self, CalcError> {
        let w: u32 = wildcard.to_integer();
        if w.leading_zeros() + w.trailing_ones() != IPV4_BITS as u32 {
            return Err(CalcError::NotWildcard(wildcard));
        }
        Ok(Self(wildcard.invert()))
    }

    pub fn parse_wildcard(text: impl AsRef<str>) -> Result<Self, CalcError> {
        Self::from_wildcard(Address::parse(text)?)
    }

    pub const fn address(self) -> Address {
        self.0
    }

    pub const fn to_integer(self) -> u32 {
        self.0.to_integer()
    }

    /// Number of leading one-bits, `0..=32`.
    pub const fn prefix_len(self) -> u8 {
        self.0.to_integer().leading_ones() as u8
    }

    /// Prefix in slash notation, f.ex. `"/24"`.
    pub fn to_prefix_text(self) -> String {
        format!("{SLASH}{}", self.prefix_len())
    }

    pub const fn wildcard(self) -> Address {
        self.0.invert()
    }

    /// Addresses in one block of this mask, `2^(32 - p)`.
    pub const fn block_size(self) -> u64 {
        1u64 << (IPV4_BITS - self.prefix_len())
    }

    /**
    Usable host addresses, `2^(32 - p) - 2`.

    Clamped at zero: a /31 or /32 has no usable hosts.
    */
    pub const fn usable_hosts(self) -> u64 {
        self.block_size().saturating_sub(2)
    }

    /// Number of networks the mask can describe, `2^p`.
    pub const fn network_capacity(self) -> u64 {
        1u64 << self.prefix_len()
    }

    /**
    The longest mask whose usable host count is at least `hosts`.

    Starting from the smallest block the [Sizing] policy allows (1 for
    CIDR, 256 for classful), the block size is doubled until
    `block - 2 >= hosts`; the mask is then `2^32 - block`.

    ### Errors
    [CalcError::HostRange] if `hosts` is zero, or no block below `2^32` is
    large enough (`hosts > 2^31 - 2`).
    */
    pub fn for_host_count(hosts: u64, sizing: Sizing) -> Result<Self, CalcError> {
        if hosts == 0 || hosts >= IPV4_SPACE {
            return Err(CalcError::HostRange(hosts));
        }

        let mut block: u64 = sizing.min_block();
        while block < IPV4_SPACE {
            if block.saturating_sub(2) >= hosts {
                let value: u64 = IPV4_SPACE - block;
                return Ok(Self(Address::from(value as u32)));
            }
            block *= 2;
        }
        Err(CalcError::HostRange(hosts))
    }

    /// Shortest or longest mask of a set, compared by integer value.
    pub fn extreme(masks: &[Mask], which: Extreme) -> Option<Mask> {
        let it = masks.iter().copied();
        match which {
            Extreme::Shortest => it.min(),
            Extreme::Longest => it.max(),
        }
    }

    pub fn shortest(masks: &[Mask]) -> Option<Mask> {
        Self::extreme(masks, Extreme::Shortest)
    }

    pub fn longest(masks: &[Mask]) -> Option<Mask> {
        Self::extreme(masks, Extreme::Longest)
    }
}

/// Returns a u32 with `prefix` high bits set, `prefix` in `0..=32`.
#[inline]
const fn mask_u32(prefix: u8) -> u32 {
    if prefix == 0 {
        return 0;
    }
    u32::MAX << (IPV4_BITS - prefix)
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Mask {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Address> for Mask {
    type Error = CalcError;

    fn try_from(value: Address) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mask> for Address {
    fn from(value: Mask) -> Self {
        value.0
    }
}

impl From<Mask> for String {
    fn from(value: Mask) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Mask {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const M24: &str = "255.255.255.0";
    const M26: &str = "255.255.255.192";
    const HOLEY: &str = "255.0.255.0";
    const W24: &str = "0.0.0.255";
    const BAD_W: &str = "0.0.255.0";

    #[test]
    fn test_validate() {
        let m = Mask::parse(M24).unwrap();
        assert_eq!(m.to_string(), "255.255.255.000");
        assert_eq!(m.prefix_len(), 24);
        assert!(Mask::parse("0.0.0.0").is_ok());
        assert!(Mask::parse("255.255.255.255").is_ok());

        let holey = Address::parse(HOLEY).unwrap();
        assert_eq!(Mask::parse(HOLEY), Err(CalcError::NotPrefixMask(holey)));
        assert_eq!(Mask::new(Address::from(1)), Err(CalcError::NotPrefixMask(Address::from(1))));
        assert!(matches!(Mask::parse("255.255"), Err(CalcError::Format(_))));
    }

    #[test]
    fn test_prefix_roundtrip() {
        for p in 0..=32u64 {
            let m = Mask::from_prefix_len(p).unwrap();
            assert_eq!(m.prefix_len() as u64, p);
            assert_eq!(Mask::parse_prefix(m.to_prefix_text()).unwrap(), m);
            assert_eq!(Mask::parse(m.to_string()).unwrap(), m);
        }
        assert_eq!(Mask::from_prefix_len(33), Err(CalcError::PrefixRange(33)));
    }

    #[test]
    fn test_prefix_text() {
        assert_eq!(Mask::parse_prefix("/26").unwrap(), Mask::parse(M26).unwrap());
        assert_eq!(Mask::parse_prefix("26").unwrap().prefix_len(), 26);
        assert_eq!(Mask::parse_prefix("/40"), Err(CalcError::PrefixRange(40)));
        assert!(Mask::parse_prefix("/99999999999999999999999").unwrap_err().is_range());
        assert!(matches!(Mask::parse_prefix("/2x"), Err(CalcError::Parse(_))));
        assert!(matches!(Mask::parse_prefix("/"), Err(CalcError::Parse(_))));
        assert_eq!(Mask::parse(M24).unwrap().to_prefix_text(), "/24");
    }

    #[test]
    fn test_wildcard() {
        let m = Mask::parse(M24).unwrap();
        assert_eq!(m.wildcard().to_string(), "000.000.000.255");
        assert_eq!(Mask::parse_wildcard(W24).unwrap(), m);
        assert_eq!(Mask::from_wildcard(m.wildcard()).unwrap(), m);

        let bad = Address::parse(BAD_W).unwrap();
        assert_eq!(Mask::parse_wildcard(BAD_W), Err(CalcError::NotWildcard(bad)));
        assert_eq!(Mask::parse_wildcard("0.0.0.0").unwrap().prefix_len(), 32);
        assert_eq!(Mask::parse_wildcard("255.255.255.255").unwrap().prefix_len(), 0);
    }

    #[test]
    fn test_capacities() {
        let m = Mask::parse(M26).unwrap();
        assert_eq!(m.usable_hosts(), 62);
        assert_eq!(m.network_capacity(), 1 << 26);
        assert_eq!(m.block_size(), 64);
        assert_eq!(Mask::from_prefix(0).usable_hosts(), (1u64 << 32) - 2);
        assert_eq!(Mask::from_prefix(0).network_capacity(), 1);
    }

    #[test]
    fn test_degenerate_prefixes() {
        // no usable hosts, never negative
        assert_eq!(Mask::from_prefix(30).usable_hosts(), 2);
        assert_eq!(Mask::from_prefix(31).usable_hosts(), 0);
        assert_eq!(Mask::from_prefix(32).usable_hosts(), 0);
        assert_eq!(Mask::from_prefix(32).block_size(), 1);
    }

    #[rustfmt::skip]
    #[test]
    fn test_for_host_count() {
        let cases: Vec<(u64, Sizing, u8)> = vec![
            (1,   Sizing::Cidr,     30),
            (2,   Sizing::Cidr,     30),
            (3,   Sizing::Cidr,     29),
            (62,  Sizing::Cidr,     26),
            (63,  Sizing::Cidr,     25),
            (67,  Sizing::Cidr,     25),
            (254, Sizing::Cidr,     24),
            (1,   Sizing::Classful, 24),
            (254, Sizing::Classful, 24),
            (255, Sizing::Classful, 23),
            ((1 << 31) - 2, Sizing::Cidr, 1),
        ];
        for (hosts, sizing, prefix) in cases {
            let m = Mask::for_host_count(hosts, sizing).unwrap();
            assert_eq!(m.prefix_len(), prefix, "Failed: {hosts} {sizing:?}");
            assert!(m.usable_hosts() >= hosts);
        }
    }

    #[test]
    fn test_for_host_count_range() {
        assert_eq!(Mask::for_host_count(0, Sizing::Cidr), Err(CalcError::HostRange(0)));
        let too_many: u64 = (1 << 31) - 1;
        assert_eq!(Mask::for_host_count(too_many, Sizing::Cidr), Err(CalcError::HostRange(too_many)));
        assert_eq!(Mask::for_host_count(IPV4_SPACE, Sizing::Classful), Err(CalcError::HostRange(IPV4_SPACE)));
    }

    #[test]
    fn test_extreme() {
        let masks: Vec<Mask> = ["/16", "/26", "/8", "/30"]
            .iter()
            .map(|s| Mask::parse_prefix(s).unwrap())
            .collect();
        assert_eq!(Mask::shortest(&masks).unwrap().prefix_len(), 8);
        assert_eq!(Mask::longest(&masks).unwrap().prefix_len(), 30);
        assert_eq!(Mask::extreme(&[], Extreme::Longest), None);
    }

    #[test]
    fn test_sizing_config() {
        assert_eq!(Sizing::from(true), Sizing::Cidr);
        assert_eq!(Sizing::default(), Sizing::Classful);
        assert_eq!(serde_json::from_str::<Sizing>("\"cidr\"").unwrap(), Sizing::Cidr);
        let m: Mask = serde_json::from_str("\"255.255.255.192\"").unwrap();
        assert_eq!(m.prefix_len(), 26);
        assert!(serde_json::from_str::<Mask>("\"255.0.255.0\"").is_err());
    }

    proptest! {
        #[test]
        fn prop_mask_iff_no_zero_then_one(v in any::<u32>()) {
            let bits = Address::from(v).to_binary();
            let expected = !bits[2..].contains("01");
            prop_assert_eq!(Mask::new(Address::from(v)).is_ok(), expected);
        }

        #[test]
        fn prop_capacity_law(p in 0u8..=30) {
            let m = Mask::from_prefix(p);
            prop_assert_eq!(m.usable_hosts(), (1u64 << (32 - p)) - 2);
            prop_assert_eq!(m.network_capacity(), 1u64 << p);
        }

        #[test]
        fn prop_host_sizing_is_minimal(hosts in 1u64..(1 << 31) - 1) {
            let m = Mask::for_host_count(hosts, Sizing::Cidr).unwrap();
            prop_assert!(m.usable_hosts() >= hosts);
            // one bit longer would not fit
            let longer = Mask::from_prefix(m.prefix_len() + 1);
            prop_assert!(longer.usable_hosts() < hosts);
        }
    }
}
