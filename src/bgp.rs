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

//! # BGP Config Generator
//!
//! Emits the iBGP overlay statements of one node. Reflectors get one
//! `RR-PEERS` group holding the full mesh towards the other reflectors, and
//! one group per declared client subset carrying the reflector's loopback as
//! cluster identifier, the ORR primary/backup hints, and add-path send.
//! Clients get their static discard routes, the deny-by-default
//! `EXPORT-STATIC` policy, and one `RR` group listing all homing reflectors.
//!
//! Single- and dual-homed labs, and labs with or without add-path, all take
//! the same code path here; the difference is entirely in the topology data
//! and in [`Settings`](crate::topology::Settings).

use crate::config::{BgpStmt, PolicyStmt, RoutingStmt, Statement};
use crate::roles::RolePlan;
use crate::topology::Topology;
use crate::types::{NodeRole, RouterId, SynthError};

/// Name of the reflector full-mesh peer group.
pub const RR_MESH_GROUP: &str = "RR-PEERS";
/// Name of the client-side peer group towards the homing reflectors.
pub const CLIENT_GROUP: &str = "RR";
/// Name of the client export policy admitting statically originated routes.
pub const EXPORT_STATIC_POLICY: &str = "EXPORT-STATIC";
/// Term of [`EXPORT_STATIC_POLICY`] matching protocol static.
pub const STATIC_TERM: &str = "STATIC";
/// Final deny-by-default term of [`EXPORT_STATIC_POLICY`].
pub const DEFAULT_TERM: &str = "DEFAULT";

/// Generate the overlay configuration of a single node. Pure function of the
/// topology, the router, and the role plan.
pub fn overlay_config(
    topo: &Topology,
    router: RouterId,
    roles: &RolePlan,
) -> Result<Vec<Statement>, SynthError> {
    let node = topo.router(router)?;
    let mut stmts = vec![Statement::RoutingOptions(RoutingStmt::AutonomousSystem(
        topo.settings().as_id,
    ))];

    match node.role {
        NodeRole::Reflector => reflector_config(topo, router, roles, &mut stmts)?,
        NodeRole::Client => client_config(topo, router, roles, &mut stmts)?,
    }

    Ok(stmts)
}

fn reflector_config(
    topo: &Topology,
    router: RouterId,
    roles: &RolePlan,
    stmts: &mut Vec<Statement>,
) -> Result<(), SynthError> {
    let lo = topo.router(router)?.loopback;
    let settings = topo.settings();

    // full mesh towards the other reflectors
    stmts.push(Statement::Bgp(BgpStmt::GroupInternal {
        group: RR_MESH_GROUP.to_string(),
    }));
    stmts.push(Statement::Bgp(BgpStmt::LocalAddress {
        group: RR_MESH_GROUP.to_string(),
        addr: lo,
    }));
    stmts.push(Statement::Bgp(BgpStmt::FamilyInetUnicast {
        group: RR_MESH_GROUP.to_string(),
    }));
    if let Some(paths) = settings.add_path {
        stmts.push(Statement::Bgp(BgpStmt::AddPathReceive {
            group: RR_MESH_GROUP.to_string(),
        }));
        stmts.push(Statement::Bgp(BgpStmt::AddPathSend {
            group: RR_MESH_GROUP.to_string(),
            paths: paths.get(),
        }));
    }
    for peer in roles.reflectors.iter().filter(|p| **p != router) {
        stmts.push(Statement::Bgp(BgpStmt::Neighbor {
            group: RR_MESH_GROUP.to_string(),
            addr: topo.router(*peer)?.loopback,
        }));
    }

    // one group per owned client subset
    for group in roles.groups.iter().filter(|g| g.reflector == router) {
        stmts.push(Statement::Bgp(BgpStmt::GroupInternal {
            group: group.name.clone(),
        }));
        stmts.push(Statement::Bgp(BgpStmt::LocalAddress {
            group: group.name.clone(),
            addr: lo,
        }));
        stmts.push(Statement::Bgp(BgpStmt::Cluster {
            group: group.name.clone(),
            id: lo,
        }));
        stmts.push(Statement::Bgp(BgpStmt::FamilyInetUnicast {
            group: group.name.clone(),
        }));
        if let Some(paths) = settings.add_path {
            stmts.push(Statement::Bgp(BgpStmt::AddPathSend {
                group: group.name.clone(),
                paths: paths.get(),
            }));
        }
        if settings.orr {
            stmts.push(Statement::Bgp(BgpStmt::OptimalRouteReflection {
                group: group.name.clone(),
            }));
            stmts.push(Statement::Bgp(BgpStmt::OrrPrimary {
                group: group.name.clone(),
                addr: topo.router(group.primary)?.loopback,
            }));
            stmts.push(Statement::Bgp(BgpStmt::OrrBackup {
                group: group.name.clone(),
                addr: topo.router(group.backup)?.loopback,
            }));
        }
        for member in &group.members {
            stmts.push(Statement::Bgp(BgpStmt::Neighbor {
                group: group.name.clone(),
                addr: topo.router(*member)?.loopback,
            }));
        }
    }

    Ok(())
}

fn client_config(
    topo: &Topology,
    router: RouterId,
    roles: &RolePlan,
    stmts: &mut Vec<Statement>,
) -> Result<(), SynthError> {
    let lo = topo.router(router)?.loopback;
    let settings = topo.settings();

    // the export policy is emitted even for clients without any prefix, so
    // that a pure route consumer still carries the deny-by-default skeleton
    stmts.push(Statement::Policy(PolicyStmt::MatchProtocolStatic {
        policy: EXPORT_STATIC_POLICY.to_string(),
        term: STATIC_TERM.to_string(),
    }));
    stmts.push(Statement::Policy(PolicyStmt::Accept {
        policy: EXPORT_STATIC_POLICY.to_string(),
        term: STATIC_TERM.to_string(),
    }));
    stmts.push(Statement::Policy(PolicyStmt::Reject {
        policy: EXPORT_STATIC_POLICY.to_string(),
        term: DEFAULT_TERM.to_string(),
    }));

    for prefix in topo.prefixes(router) {
        stmts.push(Statement::RoutingOptions(RoutingStmt::StaticDiscard(
            *prefix,
        )));
    }

    stmts.push(Statement::Bgp(BgpStmt::GroupInternal {
        group: CLIENT_GROUP.to_string(),
    }));
    stmts.push(Statement::Bgp(BgpStmt::LocalAddress {
        group: CLIENT_GROUP.to_string(),
        addr: lo,
    }));
    stmts.push(Statement::Bgp(BgpStmt::FamilyInetUnicast {
        group: CLIENT_GROUP.to_string(),
    }));
    if settings.add_path.is_some() {
        stmts.push(Statement::Bgp(BgpStmt::AddPathReceive {
            group: CLIENT_GROUP.to_string(),
        }));
    }
    stmts.push(Statement::Bgp(BgpStmt::Export {
        group: CLIENT_GROUP.to_string(),
        policy: EXPORT_STATIC_POLICY.to_string(),
    }));
    for rr in roles.homing_of(router) {
        stmts.push(Statement::Bgp(BgpStmt::Neighbor {
            group: CLIENT_GROUP.to_string(),
            addr: topo.router(*rr)?.loopback,
        }));
    }

    Ok(())
}
