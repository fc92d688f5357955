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

//! # Topology Model
//!
//! The [`Topology`] is the single declarative description of the lab: nodes
//! (reflectors and clients), the physical links between them, the reflector
//! client groups with their ORR hints, the per-client prefix lists, and the
//! global [`Settings`]. It is built once through the `add_*` methods and then
//! passed by shared reference into every pipeline stage; no stage ever
//! mutates it.
//!
//! Nodes live on a [`StableGraph`], and [`RouterId`] is the index into that
//! graph. The link list is kept separately in declaration order, since that
//! order determines the order of all generated per-interface statements.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::num::NonZeroU8;

use ipnet::Ipv4Net;
use petgraph::stable_graph::StableGraph;
use petgraph::Undirected;
use serde::{Deserialize, Serialize};

use crate::types::{
    AsId, IndexType, IsisNet, LinkWeight, NodeRole, RouterId, SynthError, ValidationError,
};

/// A single node of the lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Host name, unique within the topology.
    pub name: String,
    /// Role in the iBGP overlay.
    pub role: NodeRole,
    /// Loopback address, unique within the topology. Also used as router-id
    /// and, on reflectors, as the cluster identifier.
    pub loopback: Ipv4Addr,
    /// IS-IS Network Entity Title. Required for any node that takes part in
    /// the underlay; its absence is only fatal once the IGP configuration of
    /// that node is generated.
    pub isis_net: Option<IsisNet>,
}

/// An undirected physical link between two nodes. The metric is shared and
/// interpreted identically from both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// First endpoint.
    pub a: RouterId,
    /// Interface name on the first endpoint.
    pub iface_a: String,
    /// Interface address on the first endpoint.
    pub addr_a: Ipv4Net,
    /// Second endpoint.
    pub b: RouterId,
    /// Interface name on the second endpoint.
    pub iface_b: String,
    /// Interface address on the second endpoint.
    pub addr_b: Ipv4Net,
    /// IS-IS level-2 metric of the link.
    pub weight: LinkWeight,
}

/// One client subset of a reflector. The group is rendered as one iBGP peer
/// group carrying the reflector's loopback as cluster identifier, and the
/// primary/backup members as ORR hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientGroup {
    /// The reflector owning this group.
    pub reflector: RouterId,
    /// Peer-group name, e.g. `CLIENTS-REGION`.
    pub name: String,
    /// Member clients, in declaration order.
    pub members: Vec<RouterId>,
    /// ORR `igp-primary` hint.
    pub primary: RouterId,
    /// ORR `igp-backup` hint.
    pub backup: RouterId,
}

/// Global knobs of the lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// The (single) autonomous system number.
    pub as_id: AsId,
    /// Add-path path count. `None` disables add-path entirely; the
    /// `path-count` statement is then omitted rather than emitted with a
    /// count of zero.
    pub add_path: Option<NonZeroU8>,
    /// Whether to emit optimal-route-reflection statements and hints.
    pub orr: bool,
    /// Maximum number of distinct clients per group.
    pub max_group_clients: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            as_id: AsId(65000),
            add_path: None,
            orr: true,
            max_group_clients: 2,
        }
    }
}

/// The immutable topology value. See the [module documentation](self).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    graph: StableGraph<Node, LinkWeight, Undirected, IndexType>,
    links: Vec<Link>,
    groups: Vec<ClientGroup>,
    homing: Vec<(RouterId, Vec<RouterId>)>,
    prefixes: Vec<(RouterId, Vec<Ipv4Net>)>,
    names: HashMap<String, RouterId>,
    settings: Settings,
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Topology {
    /// Create an empty topology with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            graph: StableGraph::default(),
            links: Vec::new(),
            groups: Vec::new(),
            homing: Vec::new(),
            prefixes: Vec::new(),
            names: HashMap::new(),
            settings,
        }
    }

    /// Add a node to the topology. The name, the loopback, and the NET (if
    /// given) must be unique.
    pub fn add_router(
        &mut self,
        name: impl Into<String>,
        role: NodeRole,
        loopback: Ipv4Addr,
        isis_net: Option<IsisNet>,
    ) -> Result<RouterId, ValidationError> {
        let name = name.into();
        if self.names.contains_key(&name) {
            return Err(ValidationError::DuplicateName(name));
        }
        for node in self.nodes() {
            if node.loopback == loopback {
                return Err(ValidationError::DuplicateLoopback {
                    router: name,
                    loopback,
                });
            }
            if let Some(net) = &isis_net {
                if node.isis_net.as_ref() == Some(net) {
                    return Err(ValidationError::DuplicateIsisNet {
                        router: name,
                        net: net.clone(),
                    });
                }
            }
        }
        let id = self.graph.add_node(Node {
            name: name.clone(),
            role,
            loopback,
            isis_net,
        });
        self.names.insert(name, id);
        Ok(id)
    }

    /// Add a route reflector.
    pub fn add_reflector(
        &mut self,
        name: impl Into<String>,
        loopback: Ipv4Addr,
        isis_net: impl Into<IsisNet>,
    ) -> Result<RouterId, ValidationError> {
        self.add_router(name, NodeRole::Reflector, loopback, Some(isis_net.into()))
    }

    /// Add a reflector client.
    pub fn add_client(
        &mut self,
        name: impl Into<String>,
        loopback: Ipv4Addr,
        isis_net: impl Into<IsisNet>,
    ) -> Result<RouterId, ValidationError> {
        self.add_router(name, NodeRole::Client, loopback, Some(isis_net.into()))
    }

    /// Add an undirected link. Links are never self-looped; interface
    /// uniqueness and subnet pairing are validated by the adjacency deriver.
    #[allow(clippy::too_many_arguments)]
    pub fn add_link(
        &mut self,
        a: RouterId,
        iface_a: impl Into<String>,
        addr_a: Ipv4Net,
        b: RouterId,
        iface_b: impl Into<String>,
        addr_b: Ipv4Net,
        weight: LinkWeight,
    ) -> Result<(), SynthError> {
        let node_a = self.router(a)?;
        self.router(b)?;
        if a == b {
            return Err(ValidationError::SelfLoop(node_a.name.clone()).into());
        }
        self.graph.add_edge(a, b, weight);
        self.links.push(Link {
            a,
            iface_a: iface_a.into(),
            addr_a,
            b,
            iface_b: iface_b.into(),
            addr_b,
            weight,
        });
        Ok(())
    }

    /// Declare a client group on a reflector, with its ORR primary and backup
    /// hints. The declaration order of groups determines the derived homing
    /// order of dual-homed clients. Whether the hints are actually members of
    /// the group is verified by the consistency checker, not here.
    pub fn add_client_group(
        &mut self,
        reflector: RouterId,
        name: impl Into<String>,
        members: Vec<RouterId>,
        primary: RouterId,
        backup: RouterId,
    ) -> Result<(), SynthError> {
        self.expect_role(reflector, NodeRole::Reflector)?;
        for member in members.iter().chain([&primary, &backup]) {
            self.expect_role(*member, NodeRole::Client)?;
        }
        self.groups.push(ClientGroup {
            reflector,
            name: name.into(),
            members,
            primary,
            backup,
        });
        Ok(())
    }

    /// Declare the ordered reflector list a client peers with. When absent,
    /// the homing is derived from the group declaration order instead. The
    /// declared list must be the exact inverse of the group memberships; the
    /// consistency checker enforces this.
    pub fn set_client_reflectors(
        &mut self,
        client: RouterId,
        reflectors: Vec<RouterId>,
    ) -> Result<(), SynthError> {
        self.expect_role(client, NodeRole::Client)?;
        for rr in &reflectors {
            self.expect_role(*rr, NodeRole::Reflector)?;
        }
        match self.homing.iter_mut().find(|(c, _)| *c == client) {
            Some((_, list)) => *list = reflectors,
            None => self.homing.push((client, reflectors)),
        }
        Ok(())
    }

    /// Declare a locally originated prefix on a client. The prefix is
    /// rendered as a static discard route and re-advertised into BGP through
    /// the export policy.
    pub fn advertise_prefix(&mut self, client: RouterId, prefix: Ipv4Net) -> Result<(), SynthError> {
        self.expect_role(client, NodeRole::Client)?;
        match self.prefixes.iter_mut().find(|(c, _)| *c == client) {
            Some((_, list)) => list.push(prefix),
            None => self.prefixes.push((client, vec![prefix])),
        }
        Ok(())
    }

    fn expect_role(&self, router: RouterId, expected: NodeRole) -> Result<(), SynthError> {
        let node = self.router(router)?;
        if node.role != expected {
            return Err(ValidationError::RoleMismatch {
                router: node.name.clone(),
                actual: node.role,
                expected,
            }
            .into());
        }
        Ok(())
    }

    /// Get the global settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the global settings. Only meaningful while
    /// the topology is still being loaded.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Get the node behind a router id, or `None` if it does not exist.
    pub fn get_router(&self, router: RouterId) -> Option<&Node> {
        self.graph.node_weight(router)
    }

    /// Get the node behind a router id.
    pub fn router(&self, router: RouterId) -> Result<&Node, SynthError> {
        self.get_router(router)
            .ok_or(SynthError::DeviceNotFound(router))
    }

    /// Look up a router by name.
    pub fn router_id(&self, name: &str) -> Result<RouterId, SynthError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SynthError::DeviceNameNotFound(name.to_string()))
    }

    /// Get the name of a router, or `None` if it does not exist.
    pub fn get_router_name(&self, router: RouterId) -> Option<&str> {
        self.get_router(router).map(|n| n.name.as_str())
    }

    /// The name of a router, with a placeholder for unknown ids. For error
    /// context only.
    pub(crate) fn name_of(&self, router: RouterId) -> &str {
        self.get_router_name(router).unwrap_or("?")
    }

    /// Iterate over all router ids, in declaration order.
    pub fn routers(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.graph.node_indices()
    }

    /// Iterate over all nodes, in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_indices().filter_map(|i| self.graph.node_weight(i))
    }

    /// Iterate over all reflectors, in declaration order.
    pub fn reflectors(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.routers()
            .filter(|r| matches!(self.get_router(*r), Some(n) if n.role == NodeRole::Reflector))
    }

    /// Iterate over all clients, in declaration order.
    pub fn clients(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.routers()
            .filter(|r| matches!(self.get_router(*r), Some(n) if n.role == NodeRole::Client))
    }

    /// All links, in declaration order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// All client groups, in declaration order.
    pub fn groups(&self) -> &[ClientGroup] {
        &self.groups
    }

    /// The declared homing list of a client, if one was declared.
    pub fn declared_homing(&self, client: RouterId) -> Option<&[RouterId]> {
        self.homing
            .iter()
            .find(|(c, _)| *c == client)
            .map(|(_, list)| list.as_slice())
    }

    /// The declared prefixes of a client, in declaration order.
    pub fn prefixes(&self, client: RouterId) -> &[Ipv4Net] {
        self.prefixes
            .iter()
            .find(|(c, _)| *c == client)
            .map(|(_, list)| list.as_slice())
            .unwrap_or_default()
    }

    /// The underlying undirected graph of the topology.
    pub fn graph(&self) -> &StableGraph<Node, LinkWeight, Undirected, IndexType> {
        &self.graph
    }

    /// Number of routers in the topology.
    pub fn num_routers(&self) -> usize {
        self.graph.node_count()
    }

    /// Serialize the topology to a json string.
    pub fn to_json(&self) -> Result<String, SynthError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a topology from its json representation.
    pub fn from_json(json: &str) -> Result<Self, SynthError> {
        Ok(serde_json::from_str(json)?)
    }
}
