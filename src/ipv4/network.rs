// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{mask::Mask, number::Address, strings::*, CalcError, NetAddrReason};
use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};
use std::fmt;

/**
A network: a validated network address paired with a subnet mask.

The address must be class A, B or C, must be even, and the mask must be
at least as long as the classful default mask of that class. Everything
else (broadcast, host range, counts) is derived on demand.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    address: Address,
    mask: Mask,
}

/// Unvalidated form used for deserializing a [Network].
#[derive(Deserialize)]
struct RawNetwork {
    address: Address,
    mask: Mask,
}

impl TryFrom<RawNetwork> for Network {
    type Error = CalcError;

    fn try_from(raw: RawNetwork) -> Result<Self, Self::Error> {
        Network::new(raw.address, raw.mask)
    }
}

/// Derived facts of a [Network], ready for display or serialization.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NetworkFacts {
    pub network: Address,
    pub mask: Mask,
    pub prefix: String,
    pub broadcast: Address,
    /// `None` for a /31 or /32
    pub first_host: Option<Address>,
    pub last_host: Option<Address>,
    pub network_count: u64,
    pub host_count: u64,
}

impl Network {
    /**
    Validate and pair a network address with a mask.

    ### Errors
    - [CalcError::InvalidNetworkAddress] if the address is odd or not class A/B/C
    - [CalcError::Capacity] if `mask` is shorter than the classful default mask
    */
    pub fn new(address: Address, mask: Mask) -> Result<Self, CalcError> {
        let address: Address = Self::validate_network_address(address)?;
        let classful: Mask = address.classful_mask().ok_or(CalcError::InvalidNetworkAddress {
            addr: address,
            reason: NetAddrReason::Class(address.class()),
        })?;

        if classful > mask {
            return Err(CalcError::Capacity {
                mask,
                required: classful.to_integer(),
                available: mask.to_integer(),
            });
        }
        Ok(Self { address, mask })
    }

    /// Parse both parts from dotted-decimal text. The mask is checked first.
    pub fn parse(address: impl AsRef<str>, mask: impl AsRef<str>) -> Result<Self, CalcError> {
        let mask: Mask = Mask::parse(mask)?;
        let address: Address = Address::parse(address)?;
        Self::new(address, mask)
    }

    /// An address usable as a network address is even and class A, B or C.
    pub fn validate_network_address(addr: Address) -> Result<Address, CalcError> {
        if !addr.is_even() {
            return Err(CalcError::InvalidNetworkAddress {
                addr,
                reason: NetAddrReason::Odd,
            });
        }
        let class = addr.class();
        if !class.is_classful() {
            return Err(CalcError::InvalidNetworkAddress {
                addr,
                reason: NetAddrReason::Class(class),
            });
        }
        Ok(addr)
    }

    /**
    Check a proposed broadcast address against a mask without knowing the
    network: every bit that is zero in `mask` must be one in `candidate`.
    */
    pub fn validate_broadcast_address(candidate: Address, mask: Mask) -> Result<Address, CalcError> {
        let host_bits: u32 = mask.wildcard().to_integer();
        if candidate.to_integer() & host_bits != host_bits {
            return Err(CalcError::InvalidBroadcastAddress {
                addr: candidate,
                mask,
            });
        }
        Ok(candidate)
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    pub const fn mask(&self) -> Mask {
        self.mask
    }

    /// `network | !mask`
    pub fn broadcast(&self) -> Address {
        Address::from(self.address.to_integer() | self.mask.wildcard().to_integer())
    }

    /// Network address + 1, or `None` when the mask leaves no usable hosts.
    pub fn first_host(&self) -> Option<Address> {
        if self.host_count() == 0 {
            return None;
        }
        Some(Address::from(self.address.to_integer() + 1))
    }

    /// Broadcast address - 1, or `None` when the mask leaves no usable hosts.
    pub fn last_host(&self) -> Option<Address> {
        if self.host_count() == 0 {
            return None;
        }
        Some(Address::from(self.broadcast().to_integer() - 1))
    }

    pub fn network_count(&self) -> u64 {
        self.mask.network_capacity()
    }

    pub fn host_count(&self) -> u64 {
        self.mask.usable_hosts()
    }

    /// True if `addr` is a usable host: network and broadcast are excluded.
    pub fn contains(&self, addr: Address) -> bool {
        match (self.first_host(), self.last_host()) {
            (Some(first), Some(last)) => first <= addr && addr <= last,
            _ => false,
        }
    }

    /// The address right after the broadcast address.
    pub fn next_block(&self) -> Result<Address, CalcError> {
        Address::from_integer(self.broadcast().to_integer() as u64 + 1)
    }

    pub fn summary(&self) -> NetworkFacts {
        NetworkFacts {
            network: self.address,
            mask: self.mask,
            prefix: self.mask.to_prefix_text(),
            broadcast: self.broadcast(),
            first_host: self.first_host(),
            last_host: self.last_host(),
            network_count: self.network_count(),
            host_count: self.host_count(),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.address, f)?;
        write!(f, "{SLASH}{}", self.mask.prefix_len())
    }
}

impl From<Network> for Ipv4Net {
    fn from(net: Network) -> Self {
        Ipv4Net::new_assert(net.address.into(), net.mask.prefix_len())
    }
}

/* -------------------------------------------------------------------------- */
