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

//! This module provides the rendering target and the delivery seam. The
//! [`CfgRenderer`] trait turns a node's statement list into a configuration
//! text blob in a concrete device syntax; [`JunosCfgGen`] is the provided
//! target. The [`ConfigSink`] trait is the narrow interface behind which all
//! side-effecting delivery lives — the synthesis pipeline itself never does
//! I/O.

use thiserror::Error;

use crate::config::NodeConfig;
use crate::types::RenderError;

mod deliver;
mod junos;

pub use deliver::ConfigDir;
pub use junos::JunosCfgGen;

/// A trait for rendering a node's statement list into a concrete device
/// syntax.
pub trait CfgRenderer {
    /// Render the full configuration of one node. Deterministic: the same
    /// statement list always renders to the same bytes.
    fn generate_config(&self, cfg: &NodeConfig) -> Result<String, RenderError>;
}

/// A trait for delivering a rendered configuration to its device. Delivery
/// is side-effecting and failure-prone; implementations own their retry
/// policy, the pipeline only hands them finished blobs.
pub trait ConfigSink {
    /// Deliver the rendered configuration of one node.
    fn deliver(&mut self, hostname: &str, config: &str) -> Result<(), DeliverError>;
}

/// Error thrown while delivering a configuration.
#[derive(Debug, Error)]
pub enum DeliverError {
    /// Writing the configuration failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
