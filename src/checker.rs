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

//! # Consistency Checker
//!
//! Verifies the cross-node invariants after generation and before anything
//! is rendered or handed out. Three rules:
//!
//! 1. every link is reflected by exactly one matching adjacency entry on
//!    each of its two endpoints, with both addresses in the same subnet
//!    (re-verification of the deriver's invariant against the final table);
//! 2. every reflector-declared membership has a matching client homing entry
//!    and vice versa (bidirectional referential integrity);
//! 3. every ORR primary/backup hint names an actual neighbor of its group.
//!
//! Any violation aborts the whole run; no per-node output is valid on its
//! own.

use log::warn;
use petgraph::visit::Dfs;

use crate::adjacency::{Adjacency, AdjacencyMap};
use crate::roles::RolePlan;
use crate::topology::Topology;
use crate::types::ConsistencyError;

/// Check all cross-node invariants. Pure apart from a log warning when the
/// underlay graph is disconnected.
pub fn check(topo: &Topology, adj: &AdjacencyMap, roles: &RolePlan) -> Result<(), ConsistencyError> {
    check_adjacency(topo, adj)?;
    check_homing(topo, roles)?;
    if topo.settings().orr {
        check_hints(topo, roles)?;
    }
    warn_if_disconnected(topo);
    Ok(())
}

/// Rule 1: link list and adjacency table must agree.
fn check_adjacency(topo: &Topology, adj: &AdjacencyMap) -> Result<(), ConsistencyError> {
    let entry = |router, iface: &str| -> Vec<&Adjacency> {
        adj.get(&router)
            .map(|list| list.iter().filter(|a| a.iface == iface).collect())
            .unwrap_or_default()
    };
    for link in topo.links() {
        let ea = entry(link.a, &link.iface_a);
        let eb = entry(link.b, &link.iface_b);
        let ok = match (ea.as_slice(), eb.as_slice()) {
            ([a], [b]) => {
                a.peer == link.b && b.peer == link.a && a.addr.trunc() == b.addr.trunc()
            }
            _ => false,
        };
        if !ok {
            return Err(ConsistencyError::AsymmetricAdjacency {
                a: topo.name_of(link.a).to_string(),
                b: topo.name_of(link.b).to_string(),
            });
        }
    }
    Ok(())
}

/// Rule 2: membership and homing edges must be exact inverses.
fn check_homing(topo: &Topology, roles: &RolePlan) -> Result<(), ConsistencyError> {
    for group in &roles.groups {
        for member in &group.members {
            if !roles.homing_of(*member).contains(&group.reflector) {
                return Err(ConsistencyError::MembershipWithoutHoming {
                    reflector: topo.name_of(group.reflector).to_string(),
                    client: topo.name_of(*member).to_string(),
                });
            }
        }
    }
    for client in topo.clients() {
        for rr in roles.homing_of(client) {
            let member = roles
                .groups
                .iter()
                .any(|g| g.reflector == *rr && g.members.contains(&client));
            if !member {
                return Err(ConsistencyError::HomingWithoutMembership {
                    client: topo.name_of(client).to_string(),
                    reflector: topo.name_of(*rr).to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Rule 3: ORR hints must be neighbors of their group.
fn check_hints(topo: &Topology, roles: &RolePlan) -> Result<(), ConsistencyError> {
    for group in &roles.groups {
        for (hint, kind) in [(group.primary, "primary"), (group.backup, "backup")] {
            if !group.members.contains(&hint) {
                return Err(ConsistencyError::HintNotNeighbor {
                    reflector: topo.name_of(group.reflector).to_string(),
                    group: group.name.clone(),
                    hint: topo.name_of(hint).to_string(),
                    kind,
                });
            }
        }
    }
    Ok(())
}

/// ORR relies on the underlay having a consistent metric view; a
/// disconnected IS-IS domain is almost certainly a topology mistake, but it
/// is not a hard error.
fn warn_if_disconnected(topo: &Topology) {
    let graph = topo.graph();
    let Some(start) = graph.node_indices().next() else {
        return;
    };
    let mut reachable = 0usize;
    let mut dfs = Dfs::new(graph, start);
    while dfs.next(graph).is_some() {
        reachable += 1;
    }
    if reachable != graph.node_count() {
        warn!(
            "underlay is disconnected: only {} of {} nodes reachable from {}",
            reachable,
            graph.node_count(),
            topo.name_of(start)
        );
    }
}
