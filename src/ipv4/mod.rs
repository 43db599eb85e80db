// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IPv4 number/mask arithmetic, network facts and VLSM allocation.

mod class;
mod mask;
mod network;
mod number;
mod strings;
mod vlsm;

use std::{error, fmt};
use strings::*;

pub use class::AddressClass;
pub use mask::{Extreme, Mask, Sizing};
pub use network::{Network, NetworkFacts};
pub use number::Address;
pub use vlsm::{allocate_networks, AllocationPlan, AllocationRequest, VlsmAllocator};

pub(crate) const IPV4_BITS: u8 = 32;
/// 2^32, one past the largest IPv4 integer.
pub(crate) const IPV4_SPACE: u64 = 1u64 << IPV4_BITS;

/// Why an address was refused as a network address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NetAddrReason {
    /// low bit is set
    Odd,
    /// class D or E
    Class(AddressClass),
}

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CalcError {
    /// dotted text does not have exactly four fields
    Format(String),
    /// non-numeric octet, malformed binary or prefix text
    Parse(String),
    OctetRange(String),
    IntegerRange(u64),
    PrefixRange(u64),
    HostRange(u64),
    NotPrefixMask(Address),
    NotWildcard(Address),
    InvalidNetworkAddress { addr: Address, reason: NetAddrReason },
    /// some host bit of the candidate is zero
    InvalidBroadcastAddress { addr: Address, mask: Mask },
    /// mask is numerically smaller than the classful default mask
    Capacity { mask: Mask, required: u32, available: u32 },
    /// VLSM demand (addresses) exceeds the parent block
    InsufficientCapacity { required: u64, available: u64 },
    /// VLSM start address is not the first address of the parent block
    UnalignedStart { start: Address, parent: Mask },
    DuplicateName(String),
}

impl CalcError {
    /// True for the out-of-range family (octet, integer, prefix, host count).
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            CalcError::OctetRange(_)
                | CalcError::IntegerRange(_)
                | CalcError::PrefixRange(_)
                | CalcError::HostRange(_)
        )
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Format(s) => write!(f, "{ERR_FORMAT}: '{s}'"),
            CalcError::Parse(s) => write!(f, "{ERR_PARSE}: '{s}'"),
            CalcError::OctetRange(s) => write!(f, "{ERR_OCTET} {s}"),
            CalcError::IntegerRange(v) => write!(f, "{ERR_INTEGER} {v}"),
            CalcError::PrefixRange(v) => write!(f, "{ERR_PREFIX} {v}"),
            CalcError::HostRange(v) => write!(f, "{ERR_HOSTS} {v}"),
            CalcError::NotPrefixMask(a) => write!(f, "{ERR_NOT_MASK}: {a}"),
            CalcError::NotWildcard(a) => write!(f, "{ERR_NOT_WILDCARD}: {a}"),
            CalcError::InvalidNetworkAddress { addr, reason } => match reason {
                NetAddrReason::Odd => write!(f, "{ERR_NET_ADDR} {addr}: {ERR_NET_ODD}"),
                NetAddrReason::Class(c) => write!(f, "{ERR_NET_ADDR} {addr}: {ERR_NET_CLASS} {c}"),
            },
            CalcError::InvalidBroadcastAddress { addr, mask } => {
                write!(f, "{ERR_BROADCAST} {addr} for subnet mask {mask}")
            }
            CalcError::Capacity {
                mask,
                required,
                available,
            } => write!(
                f,
                "subnet mask {mask} {ERR_CAPACITY}: {required} required but capacity only {available}"
            ),
            CalcError::InsufficientCapacity {
                required,
                available,
            } => write!(
                f,
                "{ERR_INSUFFICIENT}: {required} addresses required, {available} available"
            ),
            CalcError::UnalignedStart { start, parent } => {
                write!(f, "{ERR_UNALIGNED} {start} for parent mask {parent}")
            }
            CalcError::DuplicateName(name) => write!(f, "{ERR_DUPLICATE}: '{name}'"),
        }
    }
}

impl error::Error for CalcError {}
