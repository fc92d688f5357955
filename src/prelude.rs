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

//! Convenience re-export of common members.

pub use crate::adjacency::{derive_adjacencies, Adjacency, AdjacencyMap};
pub use crate::checker::check;
pub use crate::config::{NodeConfig, Statement};
pub use crate::export::{CfgRenderer, ConfigSink, JunosCfgGen};
pub use crate::roles::{classify, RolePlan};
pub use crate::synthesize::{generate, synthesize, synthesize_with};
pub use crate::topology::{ClientGroup, Link, Node, Settings, Topology};
pub use crate::types::{
    AsId, ConfigError, ConsistencyError, IsisNet, LinkWeight, NodeRole, RenderError, RouterId,
    SynthError, ValidationError,
};
