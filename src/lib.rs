// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
IPv4 addressing calculator.

Validates and converts IPv4 numbers between dotted-decimal, integer and
binary forms, derives subnet mask and network facts, and allocates named
sub-networks out of a parent block with variable-length subnet masks.

```ignore
use vlsmcalc::allocate_networks;

let groups = [("A", 62), ("B", 62), ("C", 62), ("D", 62)];
let plan = allocate_networks(&groups, "192.168.0.0", "255.255.255.0", true)?;
for (name, net) in plan.iter() {
    println!("{name}: {net} broadcast {}", net.broadcast());
}
```

Everything here is a pure function of its inputs; nothing touches a real
network interface.
*/

mod ipv4;

pub use ipv4::{
    allocate_networks, Address, AddressClass, AllocationPlan, AllocationRequest, CalcError,
    Extreme, Mask, NetAddrReason, Network, NetworkFacts, Sizing, VlsmAllocator,
};
