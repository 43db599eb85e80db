// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{class::AddressClass, mask::Mask, strings::*, CalcError, IPV4_SPACE};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, net::Ipv4Addr, num::IntErrorKind, str::FromStr};

lazy_static! {
    // optional display marker, then the significant digits
    static ref BINARY_RE: Regex = Regex::new(r"^(?:0b)?([01]+)$").expect("static regex");
}

/**
An IPv4 number: four octets, a 32-bit integer and a 32-digit binary string
are all views of the same `u32`.

Display is zero-padded dotted decimal (`192.168.001.000`), which is the
canonical text form used for comparison and output. The alternate flag
(`{:#}`) gives the compact form (`192.168.1.0`).
*/
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[derive(Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address(u32);

impl Address {
    pub const MIN: Address = Address(u32::MIN);
    pub const MAX: Address = Address(u32::MAX);

    /**
    Parse dotted-decimal text, f.ex. `"192.168.1.0"` or `"010.000.000.001"`.

    ### Errors
    - [CalcError::Format] if there are not exactly four `.` separated fields
    - [CalcError::Parse] if a field is not an integer
    - [CalcError::OctetRange] if a field is outside `0..=255`
    */
    pub fn parse(text: impl AsRef<str>) -> Result<Self, CalcError> {
        let text: &str = text.as_ref();
        let fields: Vec<&str> = text.split(DOT).collect();
        if fields.len() != 4 {
            return Err(CalcError::Format(text.into()));
        }

        let mut octets: [u8; 4] = [0; 4];
        for (octet, field) in octets.iter_mut().zip(fields) {
            *octet = parse_octet(text, field.trim())?;
        }
        Ok(Self(u32::from_be_bytes(octets)))
    }

    /// Build from an integer, which must be in `0..2^32`.
    pub fn from_integer(value: u64) -> Result<Self, CalcError> {
        if value >= IPV4_SPACE {
            return Err(CalcError::IntegerRange(value));
        }
        Ok(Self(value as u32))
    }

    /**
    Parse a binary string. The `0b` marker is optional and carries no
    value; fewer than 32 digits are left-padded with zeros.
    */
    pub fn from_binary(text: impl AsRef<str>) -> Result<Self, CalcError> {
        let text: &str = text.as_ref().trim();
        let caps = BINARY_RE
            .captures(text)
            .ok_or_else(|| CalcError::Parse(text.into()))?;

        let digits: &str = caps[1].trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Self::MIN);
        }
        if digits.len() > 64 {
            return Err(CalcError::IntegerRange(u64::MAX));
        }
        // at most 64 binary digits, cannot fail
        let value: u64 = u64::from_str_radix(digits, 2).map_err(|_| CalcError::Parse(text.into()))?;
        Self::from_integer(value)
    }

    pub const fn to_integer(self) -> u32 {
        self.0
    }

    /// `0b` followed by exactly 32 digits, most significant bit first.
    pub fn to_binary(self) -> String {
        format!("{BIN_MARKER}{:032b}", self.0)
    }

    pub const fn octets(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Bitwise complement over all 32 bits.
    pub const fn invert(self) -> Self {
        Self(!self.0)
    }

    pub fn class(self) -> AddressClass {
        AddressClass::of(self)
    }

    /// Classful default mask (A, B, C), or `None` for class D and E.
    pub fn classful_mask(self) -> Option<Mask> {
        self.class().default_mask()
    }

    pub const fn is_even(self) -> bool {
        self.0 & 1 == 0
    }
}

/// Parse one octet field. `text` is the whole input, kept for error context.
fn parse_octet(text: &str, field: &str) -> Result<u8, CalcError> {
    match field.parse::<i64>() {
        Ok(v) if (0..=255).contains(&v) => Ok(v as u8),
        Ok(v) => Err(CalcError::OctetRange(v.to_string())),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                Err(CalcError::OctetRange(field.into()))
            }
            _ => Err(CalcError::Parse(text.into())),
        },
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        if f.alternate() {
            write!(f, "{a}.{b}.{c}.{d}")
        } else {
            write!(f, "{a:03}.{b:03}.{c:03}.{d:03}")
        }
    }
}

impl FromStr for Address {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Address> for u32 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl From<Ipv4Addr> for Address {
    fn from(value: Ipv4Addr) -> Self {
        Self(u32::from(value))
    }
}

impl From<Address> for Ipv4Addr {
    fn from(value: Address) -> Self {
        Ipv4Addr::from(value.0)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Address {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/* -------------------------------------------------------------------------- */
