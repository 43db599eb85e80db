// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{mask::Mask, number::Address};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Historical (classful) address class, derived from the leading bits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum AddressClass {
    A,
    B,
    C,
    D,
    E,
}

impl AddressClass {
    /**
    Classify an address by its leading one-bits:
    `0...` A, `10..` B, `110.` C, `1110` D, `1111` E.
    */
    pub fn of(addr: Address) -> Self {
        match addr.to_integer().leading_ones() {
            0 => AddressClass::A,
            1 => AddressClass::B,
            2 => AddressClass::C,
            3 => AddressClass::D,
            _ => AddressClass::E,
        }
    }

    /// Prefix length of the classful default mask; `None` for D and E.
    pub const fn default_prefix(self) -> Option<u8> {
        match self {
            AddressClass::A => Some(8),
            AddressClass::B => Some(16),
            AddressClass::C => Some(24),
            AddressClass::D | AddressClass::E => None,
        }
    }

    pub fn default_mask(self) -> Option<Mask> {
        self.default_prefix().map(Mask::from_prefix)
    }

    pub const fn letter(self) -> char {
        match self {
            AddressClass::A => 'A',
            AddressClass::B => 'B',
            AddressClass::C => 'C',
            AddressClass::D => 'D',
            AddressClass::E => 'E',
        }
    }

    /// Class A, B or C, i.e. usable as a network address.
    pub const fn is_classful(self) -> bool {
        self.default_prefix().is_some()
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const BOUNDARIES: [(&str, AddressClass, Option<&str>); 10] = [
        ("0.0.0.0",         AddressClass::A, Some("255.000.000.000")),
        ("10.1.2.3",        AddressClass::A, Some("255.000.000.000")),
        ("126.0.0.0",       AddressClass::A, Some("255.000.000.000")),
        ("127.255.255.255", AddressClass::A, Some("255.000.000.000")),
        ("128.0.0.0",       AddressClass::B, Some("255.255.000.000")),
        ("191.255.255.255", AddressClass::B, Some("255.255.000.000")),
        ("192.0.0.0",       AddressClass::C, Some("255.255.255.000")),
        ("223.255.255.255", AddressClass::C, Some("255.255.255.000")),
        ("224.0.0.0",       AddressClass::D, None),
        ("240.0.0.0",       AddressClass::E, None),
    ];

    #[test]
    fn test_class_boundaries() {
        for (text, class, mask) in BOUNDARIES {
            let addr = Address::parse(text).unwrap();
            assert_eq!(addr.class(), class, "Failed: '{text}'");
            assert_eq!(
                addr.classful_mask().map(|m| m.to_string()).as_deref(),
                mask,
                "Failed: '{text}'"
            );
        }
    }

    #[test]
    fn test_edges_of_d_and_e() {
        assert_eq!(Address::parse("239.255.255.255").unwrap().class(), AddressClass::D);
        assert_eq!(Address::MAX.class(), AddressClass::E);
        assert!(!AddressClass::D.is_classful());
        assert!(AddressClass::C.is_classful());
        assert_eq!(AddressClass::B.to_string(), "B");
    }
}
