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

//! # Role Classifier
//!
//! Partitions the nodes into reflectors and clients and computes the two
//! directions of the reflection relation: per-reflector client subsets (as
//! declared) and the per-client homing list. Reflectors always form a full
//! iBGP mesh among each other.
//!
//! A dual-homed client appears in subsets of different reflectors. Its homing
//! list preserves the order in which the groups declare the memberships; an
//! explicitly declared homing list (see
//! [`Topology::set_client_reflectors`](crate::topology::Topology::set_client_reflectors))
//! takes precedence and only changes the order in which the client-side
//! neighbors are emitted — all of them are configured as active.

use std::collections::HashMap;

use itertools::Itertools;

use crate::topology::{ClientGroup, Topology};
use crate::types::{RouterId, ValidationError};

/// Output of the role classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePlan {
    /// All reflectors, in declaration order. Every reflector peers with every
    /// other one.
    pub reflectors: Vec<RouterId>,
    /// All client groups, in declaration order.
    pub groups: Vec<ClientGroup>,
    /// Effective homing: client to its ordered list of reflectors.
    pub homing: HashMap<RouterId, Vec<RouterId>>,
}

impl RolePlan {
    /// The homing list of a client. Empty for unknown routers.
    pub fn homing_of(&self, client: RouterId) -> &[RouterId] {
        self.homing
            .get(&client)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }
}

/// Classify all nodes of the topology. Fails if a client group has fewer than
/// 2 or more than [`Settings::max_group_clients`](crate::topology::Settings)
/// distinct members, or if a client ends up homed to no reflector at all.
pub fn classify(topo: &Topology) -> Result<RolePlan, ValidationError> {
    let reflectors = topo.reflectors().collect_vec();
    let groups = topo.groups().to_vec();

    let max = topo.settings().max_group_clients;
    for group in &groups {
        let size = group.members.iter().unique().count();
        if size < 2 || size > max {
            return Err(ValidationError::GroupSize {
                reflector: topo.name_of(group.reflector).to_string(),
                group: group.name.clone(),
                size,
                max,
            });
        }
    }

    let mut homing = HashMap::new();
    for client in topo.clients() {
        let list = match topo.declared_homing(client) {
            Some(declared) => declared.to_vec(),
            None => groups
                .iter()
                .filter(|g| g.members.contains(&client))
                .map(|g| g.reflector)
                .unique()
                .collect_vec(),
        };
        if list.is_empty() {
            return Err(ValidationError::UnhomedClient(
                topo.name_of(client).to_string(),
            ));
        }
        homing.insert(client, list);
    }

    Ok(RolePlan {
        reflectors,
        groups,
        homing,
    })
}
