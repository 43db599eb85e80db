// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    mask::{Mask, Sizing},
    network::Network,
    number::Address,
    CalcError,
};
use serde::{ser::Serializer, Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A named group and the number of hosts it needs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub name: String,
    pub hosts: u64,
}

impl AllocationRequest {
    pub fn new(name: impl Into<String>, hosts: u64) -> Self {
        Self {
            name: name.into(),
            hosts,
        }
    }
}

impl<S: Into<String>> From<(S, u64)> for AllocationRequest {
    fn from((name, hosts): (S, u64)) -> Self {
        Self::new(name, hosts)
    }
}

/**
Result of a VLSM allocation: one [Network] per request name.

Iteration follows placement order (largest requests first). Serializes as
a map from name to network.
*/
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AllocationPlan {
    networks: Vec<(String, Network)>,
}

impl AllocationPlan {
    pub fn get(&self, name: &str) -> Option<&Network> {
        self.networks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, net)| net)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// `(name, network)` pairs in placement order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Network)> {
        self.networks.iter().map(|(n, net)| (n.as_str(), net))
    }

    /// Addresses taken by all blocks, network and broadcast included.
    pub fn total_addresses(&self) -> u64 {
        self.networks.iter().map(|(_, net)| net.mask().block_size()).sum()
    }
}

impl IntoIterator for AllocationPlan {
    type Item = (String, Network);
    type IntoIter = std::vec::IntoIter<(String, Network)>;

    fn into_iter(self) -> Self::IntoIter {
        self.networks.into_iter()
    }
}

impl Serialize for AllocationPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/**
Carves named sub-networks out of one parent block.

`start` is the first address to place a block at, `parent` the mask of the
block being divided and `sizing` the mask sizing policy. The allocator is
plain data; plans built from it are independent of each other.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct VlsmAllocator {
    pub start: Address,
    pub parent: Mask,
    #[serde(default)]
    pub sizing: Sizing,
}

impl VlsmAllocator {
    pub fn new(start: Address, parent: Mask, sizing: Sizing) -> Self {
        Self {
            start,
            parent,
            sizing,
        }
    }

    /// Parse the start address and parent mask from dotted-decimal text.
    pub fn parse(start: impl AsRef<str>, parent: impl AsRef<str>, cidr: bool) -> Result<Self, CalcError> {
        Ok(Self::new(Address::parse(start)?, Mask::parse(parent)?, cidr.into()))
    }

    /**
    Requests ordered by host count, largest first. Equal host counts keep
    their input order. The input is left untouched.
    */
    pub fn order(requests: &[AllocationRequest]) -> Vec<&AllocationRequest> {
        let mut ordered: Vec<&AllocationRequest> = requests.iter().collect();
        ordered.sort_by(|a, b| b.hosts.cmp(&a.hosts));
        ordered
    }

    /**
    Check that the ordered requests fit in the parent block.

    Each request takes a whole block of its smallest adequate mask (usable
    hosts + 2); the sum of those blocks must not exceed the parent block,
    and `start` must be the first address of that block.

    ### Returns
    The number of addresses the plan will take.
    */
    pub fn check_capacity(&self, requests: &[AllocationRequest]) -> Result<u64, CalcError> {
        let sized: Vec<(&AllocationRequest, Mask)> = self.size(&Self::order(requests))?;
        self.fits(&sized)
    }

    /**
    Build the whole plan, or nothing.

    Requests are placed largest first, each at the address right after the
    previous block's broadcast address.

    ### Errors
    - [CalcError::DuplicateName] if two requests share a name
    - [CalcError::HostRange] for a request of zero (or too many) hosts
    - [CalcError::UnalignedStart] if `start` is not on the parent block boundary
    - [CalcError::InsufficientCapacity] if the blocks do not fit the parent
    - any [Network::new] error for a block, f.ex. when placement runs past class C
    */
    pub fn allocate(&self, requests: &[AllocationRequest]) -> Result<AllocationPlan, CalcError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(requests.len());
        for req in requests {
            if !seen.insert(req.name.as_str()) {
                warn!(name = %req.name, "duplicate network name in allocation request");
                return Err(CalcError::DuplicateName(req.name.clone()));
            }
        }

        let sized: Vec<(&AllocationRequest, Mask)> = self.size(&Self::order(requests))?;
        self.fits(&sized)?;

        let mut plan: AllocationPlan = AllocationPlan {
            networks: Vec::with_capacity(sized.len()),
        };
        let mut cursor: Address = self.start;

        for (i, (req, mask)) in sized.iter().enumerate() {
            let net: Network = Network::new(cursor, *mask)?;
            debug!(name = %req.name, hosts = req.hosts, network = %net, "placed subnet");
            plan.networks.push((req.name.clone(), net));

            if i + 1 < sized.len() {
                cursor = net.next_block()?;
            }
        }
        Ok(plan)
    }

    /// Smallest adequate mask for each request, in the given order.
    fn size<'a>(
        &self,
        ordered: &[&'a AllocationRequest],
    ) -> Result<Vec<(&'a AllocationRequest, Mask)>, CalcError> {
        ordered
            .iter()
            .map(|&req| Mask::for_host_count(req.hosts, self.sizing).map(|mask| (req, mask)))
            .collect()
    }

    /// Blocks stay inside the parent only if placement starts on its boundary.
    fn check_start(&self) -> Result<(), CalcError> {
        if self.start.to_integer() & self.parent.wildcard().to_integer() != 0 {
            warn!(start = %self.start, parent = %self.parent, "start address is not on the parent block boundary");
            return Err(CalcError::UnalignedStart {
                start: self.start,
                parent: self.parent,
            });
        }
        Ok(())
    }

    fn fits(&self, sized: &[(&AllocationRequest, Mask)]) -> Result<u64, CalcError> {
        self.check_start()?;
        let required: u64 = sized.iter().map(|(_, mask)| mask.block_size()).sum();
        let available: u64 = self.parent.usable_hosts() + 2;

        debug!(required, available, parent = %self.parent, "capacity check");
        if required > available {
            warn!(required, available, "networks do not fit in the parent block");
            return Err(CalcError::InsufficientCapacity {
                required,
                available,
            });
        }
        Ok(required)
    }
}

/**
Text boundary of the allocator: `(name, hosts)` pairs, start address and
parent mask as dotted-decimal text, and the CIDR flag.
*/
pub fn allocate_networks<S: AsRef<str>>(
    requests: &[(S, u64)],
    start: &str,
    parent_mask: &str,
    cidr: bool,
) -> Result<AllocationPlan, CalcError> {
    let requests: Vec<AllocationRequest> = requests
        .iter()
        .map(|(name, hosts)| AllocationRequest::new(name.as_ref(), *hosts))
        .collect();
    VlsmAllocator::parse(start, parent_mask, cidr)?.allocate(&requests)
}

/* -------------------------------------------------------------------------- */
