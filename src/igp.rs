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

//! # IGP Config Generator
//!
//! Emits the system, interface and IS-IS underlay statements of one node
//! from its adjacency table. The underlay is a single level-2 domain with
//! wide metrics; the loopback is passive, every link interface runs
//! point-to-point. Statement order follows adjacency order, which follows
//! link declaration order.

use crate::adjacency::Adjacency;
use crate::config::{IfaceStmt, IsisStmt, RoutingStmt, Statement, SystemStmt};
use crate::topology::Topology;
use crate::types::{ConfigError, RouterId, SynthError};

/// Name of the passive loopback interface unit.
const LOOPBACK_IFACE: &str = "lo0.0";

/// Generate the underlay configuration of a single node. Pure function of
/// the topology, the router, and its adjacency list.
pub fn underlay_config(
    topo: &Topology,
    router: RouterId,
    adj: &[Adjacency],
) -> Result<Vec<Statement>, SynthError> {
    let node = topo.router(router)?;
    let net = node
        .isis_net
        .clone()
        .ok_or_else(|| ConfigError::MissingIsisNet(node.name.clone()))?;

    let mut stmts = vec![
        Statement::System(SystemStmt::HostName(node.name.clone())),
        Statement::System(SystemStmt::SshService),
        Statement::System(SystemStmt::NetconfService),
        Statement::Interface(IfaceStmt::Loopback(node.loopback)),
    ];

    for a in adj {
        stmts.push(Statement::Interface(IfaceStmt::Description {
            iface: a.iface.clone(),
            peer: topo.name_of(a.peer).to_string(),
        }));
        stmts.push(Statement::Interface(IfaceStmt::Address {
            iface: a.iface.clone(),
            addr: a.addr,
        }));
    }

    stmts.push(Statement::RoutingOptions(RoutingStmt::RouterId(
        node.loopback,
    )));

    stmts.push(Statement::Isis(IsisStmt::Net(net)));
    stmts.push(Statement::Isis(IsisStmt::WideMetricsOnly));
    stmts.push(Statement::Isis(IsisStmt::DisableLevel1));
    stmts.push(Statement::Isis(IsisStmt::Passive {
        iface: LOOPBACK_IFACE.to_string(),
    }));
    for a in adj {
        stmts.push(Statement::Isis(IsisStmt::PointToPoint {
            iface: a.iface.clone(),
        }));
        stmts.push(Statement::Isis(IsisStmt::Metric {
            iface: a.iface.clone(),
            metric: a.weight,
        }));
    }

    Ok(stmts)
}
