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

//! # Per-node configuration statements
//!
//! A [`NodeConfig`] is the ordered list of [`Statement`]s generated for one
//! node. The grammar is closed: generators can only emit statements from
//! these enums, which is what makes the renderer total. Statements are
//! grouped by subsystem, mirroring the hierarchy of the target configuration
//! language, but a `NodeConfig` stores them flat in emission order —
//! concatenation order is stable and deterministic for identical input.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::types::{AsId, IsisNet, LinkWeight, RouterId};

/// A single configuration statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `system` subsystem.
    System(SystemStmt),
    /// `interfaces` subsystem.
    Interface(IfaceStmt),
    /// `routing-options` subsystem.
    RoutingOptions(RoutingStmt),
    /// `protocols isis` subsystem.
    Isis(IsisStmt),
    /// `protocols bgp` subsystem.
    Bgp(BgpStmt),
    /// `policy-options` subsystem.
    Policy(PolicyStmt),
}

/// Statements of the `system` subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SystemStmt {
    /// Set the host name of the device.
    HostName(String),
    /// Enable the ssh service.
    SshService,
    /// Enable netconf over ssh.
    NetconfService,
}

/// Statements of the `interfaces` subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IfaceStmt {
    /// Assign the loopback address (always a /32) to `lo0`.
    Loopback(Ipv4Addr),
    /// Describe which peer an interface points to.
    Description {
        /// Interface name.
        iface: String,
        /// Name of the remote node.
        peer: String,
    },
    /// Assign an address to an interface.
    Address {
        /// Interface name.
        iface: String,
        /// Interface address including the prefix length.
        addr: Ipv4Net,
    },
}

/// Statements of the `routing-options` subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutingStmt {
    /// Set the router-id.
    RouterId(Ipv4Addr),
    /// Set the autonomous system number.
    AutonomousSystem(AsId),
    /// Install a static discard route for a locally originated prefix.
    StaticDiscard(Ipv4Net),
}

/// Statements of the `protocols isis` subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsisStmt {
    /// Set the Network Entity Title.
    Net(IsisNet),
    /// Use level-2 wide metrics only.
    WideMetricsOnly,
    /// Disable level 1 (the lab is a single level-2 domain).
    DisableLevel1,
    /// Run an interface in passive mode (used for `lo0.0`).
    Passive {
        /// Interface name.
        iface: String,
    },
    /// Run an interface as a point-to-point adjacency.
    PointToPoint {
        /// Interface name.
        iface: String,
    },
    /// Set the level-2 metric of an interface.
    Metric {
        /// Interface name.
        iface: String,
        /// The metric value.
        metric: LinkWeight,
    },
}

/// Statements of the `protocols bgp` subsystem. All statements are scoped to
/// a peer group; the lab only uses internal (iBGP) groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BgpStmt {
    /// Declare a group of type internal.
    GroupInternal {
        /// Peer-group name.
        group: String,
    },
    /// Source iBGP sessions from the given (loopback) address.
    LocalAddress {
        /// Peer-group name.
        group: String,
        /// The local address.
        addr: Ipv4Addr,
    },
    /// Set the cluster identifier of a reflector group.
    Cluster {
        /// Peer-group name.
        group: String,
        /// Cluster identifier (the reflector's loopback).
        id: Ipv4Addr,
    },
    /// Enable the inet unicast family.
    FamilyInetUnicast {
        /// Peer-group name.
        group: String,
    },
    /// Accept multiple paths per prefix from the peers.
    AddPathReceive {
        /// Peer-group name.
        group: String,
    },
    /// Advertise up to `paths` paths per prefix to the peers.
    AddPathSend {
        /// Peer-group name.
        group: String,
        /// Number of paths to advertise.
        paths: u8,
    },
    /// Enable optimal route reflection on a reflector group.
    OptimalRouteReflection {
        /// Peer-group name.
        group: String,
    },
    /// ORR primary hint: compute best paths from this node's position.
    OrrPrimary {
        /// Peer-group name.
        group: String,
        /// Loopback of the primary node.
        addr: Ipv4Addr,
    },
    /// ORR backup hint.
    OrrBackup {
        /// Peer-group name.
        group: String,
        /// Loopback of the backup node.
        addr: Ipv4Addr,
    },
    /// Attach an export policy to a group.
    Export {
        /// Peer-group name.
        group: String,
        /// Name of the policy.
        policy: String,
    },
    /// Declare a neighbor in a group.
    Neighbor {
        /// Peer-group name.
        group: String,
        /// Loopback address of the neighbor.
        addr: Ipv4Addr,
    },
}

/// Statements of the `policy-options` subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyStmt {
    /// Match routes originated by protocol `static` in a term.
    MatchProtocolStatic {
        /// Policy name.
        policy: String,
        /// Term name.
        term: String,
    },
    /// Accept in a term.
    Accept {
        /// Policy name.
        policy: String,
        /// Term name.
        term: String,
    },
    /// Reject in a term.
    Reject {
        /// Policy name.
        policy: String,
        /// Term name.
        term: String,
    },
}

/// The accumulated, ordered statement list of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// The router this configuration belongs to.
    pub router: RouterId,
    /// Host name of the router.
    pub hostname: String,
    /// All statements, in emission order.
    pub stmts: Vec<Statement>,
}

impl NodeConfig {
    /// Create an empty configuration for a node.
    pub fn new(router: RouterId, hostname: impl Into<String>) -> Self {
        Self {
            router,
            hostname: hostname.into(),
            stmts: Vec::new(),
        }
    }

    /// Append a single statement.
    pub fn push(&mut self, stmt: Statement) {
        self.stmts.push(stmt);
    }

    /// Append a sequence of statements, preserving their order.
    pub fn extend(&mut self, stmts: impl IntoIterator<Item = Statement>) {
        self.stmts.extend(stmts)
    }

    /// Iterate over the statements in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.stmts.iter()
    }

    /// Number of statements.
    pub fn len(&self) -> usize {
        self.stmts.len()
    }

    /// Whether the configuration is empty.
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

impl<'a> IntoIterator for &'a NodeConfig {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.stmts.iter()
    }
}
