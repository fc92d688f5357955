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

//! Module containing all type definitions and the error taxonomy.

use ipnet::Ipv4Net;
use petgraph::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) type IndexType = u32;
/// Router identification (and index into the topology graph)
pub type RouterId = NodeIndex<IndexType>;

/// IS-IS link metric (level-2 wide metric)
pub type LinkWeight = u32;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsId(pub u32);

impl std::fmt::Display for AsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AS{}", self.0)
    }
}

impl From<u32> for AsId {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

/// Role of a node in the iBGP overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// A route reflector. Reflectors form an iBGP full mesh among each other
    /// and reflect routes towards their clients.
    Reflector,
    /// A reflector client. Clients only peer with the reflectors they are
    /// homed to.
    Client,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::Reflector => write!(f, "reflector"),
            NodeRole::Client => write!(f, "client"),
        }
    }
}

/// IS-IS Network Entity Title, e.g. `49.0001.0000.0000.0001.00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsisNet(String);

impl IsisNet {
    /// Create a new NET from its dotted representation.
    pub fn new(net: impl Into<String>) -> Self {
        Self(net.into())
    }

    /// The dotted representation of the NET.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IsisNet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for IsisNet {
    fn from(net: &str) -> Self {
        Self::new(net)
    }
}

impl From<String> for IsisNet {
    fn from(net: String) -> Self {
        Self::new(net)
    }
}

/// Errors raised for malformed or structurally invalid topology input. These
/// are detected while loading the topology or while deriving the adjacency
/// table and the role plan.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A router name was declared twice.
    #[error("Router {0} is declared twice")]
    DuplicateName(String),
    /// Two routers share the same loopback address.
    #[error("Loopback {loopback} of {router} is already assigned to another router")]
    DuplicateLoopback {
        /// Router that was being added.
        router: String,
        /// The loopback address in question.
        loopback: std::net::Ipv4Addr,
    },
    /// Two routers share the same IS-IS NET.
    #[error("IS-IS NET {net} of {router} is already assigned to another router")]
    DuplicateIsisNet {
        /// Router that was being added.
        router: String,
        /// The NET in question.
        net: IsisNet,
    },
    /// A link connects a router to itself.
    #[error("Link from {0} to itself")]
    SelfLoop(String),
    /// The same interface of a router is used by two different links.
    #[error("Interface {iface} on {router} is used by more than one link")]
    DuplicateInterface {
        /// Router owning the interface.
        router: String,
        /// The reused interface name.
        iface: String,
    },
    /// The two endpoint addresses of a link are not in the same point-to-point
    /// subnet.
    #[error("Link endpoints {a} ({net_a}) and {b} ({net_b}) are not in the same subnet")]
    SubnetMismatch {
        /// First endpoint router.
        a: String,
        /// Address configured on the first endpoint.
        net_a: Ipv4Net,
        /// Second endpoint router.
        b: String,
        /// Address configured on the second endpoint.
        net_b: Ipv4Net,
    },
    /// A node was used in a position that requires the other role.
    #[error("{router} is a {actual}, expected a {expected}")]
    RoleMismatch {
        /// Offending router.
        router: String,
        /// Role the router has.
        actual: NodeRole,
        /// Role that was required.
        expected: NodeRole,
    },
    /// A client group has too few or too many members.
    #[error("Client group {group} on {reflector} has {size} clients (allowed 2..={max})")]
    GroupSize {
        /// Reflector owning the group.
        reflector: String,
        /// Name of the group.
        group: String,
        /// Number of distinct members declared.
        size: usize,
        /// Configured maximum.
        max: usize,
    },
    /// A client is a member of no reflector group and has no declared homing.
    #[error("Client {0} is not a member of any reflector group")]
    UnhomedClient(String),
}

/// Cross-node referential-integrity violations, caught by the consistency
/// checker after generation and before any output is rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    /// A link is not reflected by exactly one matching adjacency entry on
    /// each of its two endpoints.
    #[error("Adjacency between {a} and {b} is asymmetric or incomplete")]
    AsymmetricAdjacency {
        /// First endpoint of the link.
        a: String,
        /// Second endpoint of the link.
        b: String,
    },
    /// A reflector lists a client that is not homed back to it.
    #[error("{reflector} lists {client} as a client, but {client} is not homed to {reflector}")]
    MembershipWithoutHoming {
        /// The reflector declaring the membership.
        reflector: String,
        /// The client missing the homing entry.
        client: String,
    },
    /// A client is homed to a reflector that does not list it in any group.
    #[error("{client} is homed to {reflector}, but no client group on {reflector} contains it")]
    HomingWithoutMembership {
        /// The client declaring the homing.
        client: String,
        /// The reflector missing the membership.
        reflector: String,
    },
    /// An ORR primary or backup hint names a node that is not a neighbor of
    /// the group it is a hint for.
    #[error("ORR {kind} hint {hint} of group {group} on {reflector} is not a neighbor of that group")]
    HintNotNeighbor {
        /// Reflector owning the group.
        reflector: String,
        /// Name of the group.
        group: String,
        /// The node named by the hint.
        hint: String,
        /// Which hint it was (`"primary"` or `"backup"`).
        kind: &'static str,
    },
}

/// A required field is missing on a node, detected during per-node
/// generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The node takes part in IS-IS but has no NET assigned.
    #[error("{0} has no IS-IS network entity title")]
    MissingIsisNet(String),
}

/// A generated statement cannot be serialized into the target syntax. Given
/// the closed statement grammar, the only way to reach this is a
/// user-supplied name that would break the line format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A name contains whitespace or quotes and cannot be emitted as a token.
    #[error("Cannot render {what} {token:?}: whitespace and quotes are not allowed")]
    BadToken {
        /// What kind of token was being rendered.
        what: &'static str,
        /// The offending string.
        token: String,
    },
}

/// Umbrella error for the whole synthesis pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SynthError {
    /// Structurally invalid topology input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Cross-node referential-integrity violation.
    #[error("Consistency error: {0}")]
    Consistency(#[from] ConsistencyError),
    /// Missing required field on a node.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// A statement could not be serialized.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    /// A router id does not exist in the topology.
    #[error("Network device was not found in topology: {0:?}")]
    DeviceNotFound(RouterId),
    /// A router name does not exist in the topology.
    #[error("Network device name was not found in topology: {0}")]
    DeviceNameNotFound(String),
    /// Json error while saving or restoring a topology.
    #[error("{0}")]
    JsonError(String),
}

impl From<serde_json::Error> for SynthError {
    fn from(value: serde_json::Error) -> Self {
        Self::JsonError(value.to_string())
    }
}
