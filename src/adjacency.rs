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

//! # Adjacency Deriver
//!
//! Expands the undirected link list into a per-node adjacency table. Every
//! link contributes exactly two entries, one per endpoint, and the entries of
//! a node appear in link declaration order. The deriver owns two input
//! invariants: interface names are unique per node, and the two endpoint
//! addresses of a link lie in the same point-to-point subnet.

use std::collections::{HashMap, HashSet};

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::topology::Topology;
use crate::types::{LinkWeight, RouterId, ValidationError};

/// One entry of a node's adjacency table: the local view of one incident
/// link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacency {
    /// Local interface name.
    pub iface: String,
    /// Local interface address, including the prefix length.
    pub addr: Ipv4Net,
    /// IS-IS level-2 metric of the link.
    pub weight: LinkWeight,
    /// The node on the other end of the link.
    pub peer: RouterId,
}

/// Mapping from each router to its adjacency list. Every router of the
/// topology has an entry, possibly empty.
pub type AdjacencyMap = HashMap<RouterId, Vec<Adjacency>>;

/// Derive the adjacency table of every node from the link list. Pure; the
/// topology is not modified.
pub fn derive_adjacencies(topo: &Topology) -> Result<AdjacencyMap, ValidationError> {
    let mut adj: AdjacencyMap = topo.routers().map(|r| (r, Vec::new())).collect();
    let mut seen: HashSet<(RouterId, &str)> = HashSet::new();

    for link in topo.links() {
        if link.addr_a.trunc() != link.addr_b.trunc() {
            return Err(ValidationError::SubnetMismatch {
                a: topo.name_of(link.a).to_string(),
                net_a: link.addr_a,
                b: topo.name_of(link.b).to_string(),
                net_b: link.addr_b,
            });
        }
        let endpoints = [
            (link.a, link.iface_a.as_str(), link.addr_a, link.b),
            (link.b, link.iface_b.as_str(), link.addr_b, link.a),
        ];
        for (router, iface, addr, peer) in endpoints {
            if !seen.insert((router, iface)) {
                return Err(ValidationError::DuplicateInterface {
                    router: topo.name_of(router).to_string(),
                    iface: iface.to_string(),
                });
            }
            adj.entry(router).or_default().push(Adjacency {
                iface: iface.to_string(),
                addr,
                weight: link.weight,
                peer,
            });
        }
    }

    Ok(adj)
}
