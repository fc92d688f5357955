// OrrLab: iBGP route reflection lab config synthesizer
// Copyright (C) 2024-2025 The orrlab authors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

#![deny(missing_docs, missing_debug_implementations)]

//! # OrrLab
//!
//! This is a library for synthesizing per-device network configuration for a
//! small internetwork lab from a single declarative topology description.
//! The lab runs a two-layer routing design: an IS-IS level-2 underlay
//! providing IGP reachability and metrics, and an iBGP overlay using route
//! reflection with optimal route reflection (ORR) and add-path, so that
//! clients can pick IGP-nearest exits.
//!
//! ## Main concepts
//!
//! The [`topology::Topology`] is the single input: nodes (reflectors and
//! clients, stored on a [Petgraph](https://docs.rs/petgraph) graph), links,
//! client groups with ORR hints, per-client prefix lists, and the global
//! [`topology::Settings`]. [`synthesize::synthesize`] runs the whole
//! pipeline: adjacency derivation ([`adjacency`]), role classification
//! ([`roles`]), per-node IGP and BGP generation ([`igp`], [`bgp`]), the
//! cross-node consistency check ([`checker`]), and rendering ([`export`]).
//! The run is atomic — either every node's configuration is produced and
//! globally consistent, or the run fails with an error naming the offending
//! nodes and rule.
//!
//! No protocol is executed anywhere: IS-IS and BGP exist only as generated
//! configuration statements.
//!
//! ## Example usage
//!
//! The following builds a four-node lab (two reflectors, two clients in one
//! ORR group) and synthesizes all configurations:
//!
//! ```
//! use orrlab::prelude::*;
//!
//! fn main() -> Result<(), SynthError> {
//!     let mut t = Topology::default();
//!     let rr1 = t.add_reflector("rr1", "10.0.0.1".parse().unwrap(), "49.0001.0000.0000.0001.00")?;
//!     let rr2 = t.add_reflector("rr2", "10.0.0.2".parse().unwrap(), "49.0001.0000.0000.0002.00")?;
//!     let a1 = t.add_client("a1", "10.0.1.1".parse().unwrap(), "49.0001.0000.0000.0101.00")?;
//!     let a2 = t.add_client("a2", "10.0.1.2".parse().unwrap(), "49.0001.0000.0000.0102.00")?;
//!
//!     t.add_link(rr1, "eth1", "172.16.0.0/31".parse().unwrap(),
//!                rr2, "eth1", "172.16.0.1/31".parse().unwrap(), 10)?;
//!     t.add_link(rr1, "eth2", "172.16.0.2/31".parse().unwrap(),
//!                a1, "eth1", "172.16.0.3/31".parse().unwrap(), 5)?;
//!     t.add_link(rr1, "eth3", "172.16.0.4/31".parse().unwrap(),
//!                a2, "eth1", "172.16.0.5/31".parse().unwrap(), 5)?;
//!
//!     t.add_client_group(rr1, "CLIENTS", vec![a1, a2], a1, a2)?;
//!     t.advertise_prefix(a1, "10.255.1.1/32".parse().unwrap())?;
//!
//!     let configs = synthesize(&t)?;
//!     assert_eq!(configs[0].0, "rr1");
//!     assert!(configs[0].1.contains(
//!         "set protocols bgp group CLIENTS optimal-route-reflection igp-primary 10.0.1.1"
//!     ));
//!     Ok(())
//! }
//! ```

pub mod adjacency;
pub mod bgp;
pub mod checker;
pub mod config;
pub mod export;
pub mod igp;
pub mod prelude;
pub mod roles;
pub mod synthesize;
pub mod topology;
pub mod types;

#[cfg(test)]
mod test;
