// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static DOT: &str = ".";
pub(crate) static SLASH: &str = "/";
pub(crate) static BIN_MARKER: &str = "0b";

// number.rs
pub(crate) static ERR_FORMAT: &str = "IPv4 number must be 4 '.' separated fields";
pub(crate) static ERR_PARSE: &str = "malformed number";
pub(crate) static ERR_OCTET: &str = "IPv4 octet must be in range 0 -> 255, got";
pub(crate) static ERR_INTEGER: &str = "integer out of range 0 -> 4294967295, got";

// mask.rs
pub(crate) static ERR_PREFIX: &str = "prefix length must be in range 0 -> 32, got";
pub(crate) static ERR_NOT_MASK: &str = "not a subnet mask ('0' followed by '1')";
pub(crate) static ERR_NOT_WILDCARD: &str = "not a wildcard ('1' followed by '0')";
pub(crate) static ERR_HOSTS: &str = "host count must be in range 1 -> 2147483646, got";

// network.rs
pub(crate) static ERR_NET_ODD: &str = "must be an even number";
pub(crate) static ERR_NET_CLASS: &str = "must be a class A, B or C address, got class";
pub(crate) static ERR_NET_ADDR: &str = "invalid network address";
pub(crate) static ERR_BROADCAST: &str = "invalid broadcast address";
pub(crate) static ERR_CAPACITY: &str = "is too small for the address class";

// vlsm.rs
pub(crate) static ERR_INSUFFICIENT: &str = "networks do not fit in the parent block";
pub(crate) static ERR_UNALIGNED: &str = "start is not a parent block boundary:";
pub(crate) static ERR_DUPLICATE: &str = "duplicate network name";
