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

//! # Synthesis pipeline
//!
//! Single-pass orchestration of the stages: adjacency derivation → role
//! classification → per-node {IGP, BGP} generation → consistency check →
//! rendering. Every stage is a pure function of its predecessor's output,
//! and the run is atomic: any error aborts the whole run and no per-node
//! output is handed out, even for nodes that would have been fine on their
//! own.

use log::{debug, info};

use crate::adjacency::derive_adjacencies;
use crate::bgp::overlay_config;
use crate::checker::check;
use crate::config::NodeConfig;
use crate::export::{CfgRenderer, JunosCfgGen};
use crate::igp::underlay_config;
use crate::roles::classify;
use crate::topology::Topology;
use crate::types::SynthError;

/// Generate the checked, ordered statement list of every node, in node
/// declaration order. This is the whole core pipeline except rendering.
pub fn generate(topo: &Topology) -> Result<Vec<NodeConfig>, SynthError> {
    debug!("deriving adjacency tables for {} links", topo.links().len());
    let adj = derive_adjacencies(topo)?;
    debug!("classifying {} nodes", topo.num_routers());
    let roles = classify(topo)?;

    let empty = Vec::new();
    let mut configs = Vec::with_capacity(topo.num_routers());
    for router in topo.routers() {
        let node = topo.router(router)?;
        let mut cfg = NodeConfig::new(router, node.name.clone());
        cfg.extend(underlay_config(
            topo,
            router,
            adj.get(&router).unwrap_or(&empty),
        )?);
        cfg.extend(overlay_config(topo, router, &roles)?);
        configs.push(cfg);
    }

    check(topo, &adj, &roles)?;
    info!("synthesized {} node configurations", configs.len());
    Ok(configs)
}

/// Generate and render all configurations with the given renderer. Returns
/// `(hostname, rendered config)` pairs in node declaration order.
pub fn synthesize_with<R: CfgRenderer>(
    topo: &Topology,
    renderer: &R,
) -> Result<Vec<(String, String)>, SynthError> {
    generate(topo)?
        .iter()
        .map(|cfg| Ok((cfg.hostname.clone(), renderer.generate_config(cfg)?)))
        .collect()
}

/// Generate and render all configurations in Junos `set` syntax.
pub fn synthesize(topo: &Topology) -> Result<Vec<(String, String)>, SynthError> {
    synthesize_with(topo, &JunosCfgGen)
}
