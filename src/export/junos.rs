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

//! Renderer for the Junos `set` command syntax.

use crate::config::{
    BgpStmt, IfaceStmt, IsisStmt, NodeConfig, PolicyStmt, RoutingStmt, Statement, SystemStmt,
};
use crate::types::RenderError;

use super::CfgRenderer;

/// Configuration generator emitting Junos `set` statements, one per line.
/// The mapping is total over the statement grammar; the only reachable
/// failure is a user-supplied name that would break the line format.
///
/// ```
/// use orrlab::config::{BgpStmt, NodeConfig, Statement, SystemStmt};
/// use orrlab::export::{CfgRenderer, JunosCfgGen};
///
/// let mut cfg = NodeConfig::new(0.into(), "rr1");
/// cfg.push(Statement::System(SystemStmt::HostName("rr1".to_string())));
/// cfg.push(Statement::Bgp(BgpStmt::GroupInternal { group: "RR-PEERS".to_string() }));
/// cfg.push(Statement::Bgp(BgpStmt::Neighbor {
///     group: "RR-PEERS".to_string(),
///     addr: "10.0.0.2".parse().unwrap(),
/// }));
///
/// assert_eq!(
///     JunosCfgGen.generate_config(&cfg).unwrap(),
///     "\
/// set system host-name rr1
/// set protocols bgp group RR-PEERS type internal
/// set protocols bgp group RR-PEERS neighbor 10.0.0.2
/// "
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JunosCfgGen;

impl CfgRenderer for JunosCfgGen {
    fn generate_config(&self, cfg: &NodeConfig) -> Result<String, RenderError> {
        let mut out = String::new();
        for stmt in cfg {
            out.push_str(&render(stmt)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Check that a user-supplied name can be emitted as a single token.
fn token<'a>(what: &'static str, t: &'a str) -> Result<&'a str, RenderError> {
    if t.is_empty() || t.contains(|c: char| c.is_whitespace() || c == '"') {
        Err(RenderError::BadToken {
            what,
            token: t.to_string(),
        })
    } else {
        Ok(t)
    }
}

fn render(stmt: &Statement) -> Result<String, RenderError> {
    Ok(match stmt {
        Statement::System(s) => match s {
            SystemStmt::HostName(name) => {
                format!("set system host-name {}", token("host name", name)?)
            }
            SystemStmt::SshService => "set system services ssh".to_string(),
            SystemStmt::NetconfService => "set system services netconf ssh".to_string(),
        },
        Statement::Interface(s) => match s {
            IfaceStmt::Loopback(lo) => {
                format!("set interfaces lo0 unit 0 family inet address {lo}/32")
            }
            IfaceStmt::Description { iface, peer } => format!(
                "set interfaces {} description \"to {}\"",
                token("interface name", iface)?,
                token("peer name", peer)?
            ),
            IfaceStmt::Address { iface, addr } => format!(
                "set interfaces {} unit 0 family inet address {addr}",
                token("interface name", iface)?
            ),
        },
        Statement::RoutingOptions(s) => match s {
            RoutingStmt::RouterId(id) => format!("set routing-options router-id {id}"),
            RoutingStmt::AutonomousSystem(as_id) => {
                format!("set routing-options autonomous-system {}", as_id.0)
            }
            RoutingStmt::StaticDiscard(prefix) => {
                format!("set routing-options static route {prefix} discard")
            }
        },
        Statement::Isis(s) => match s {
            IsisStmt::Net(net) => {
                format!("set protocols isis net {}", token("IS-IS NET", net.as_str())?)
            }
            IsisStmt::WideMetricsOnly => "set protocols isis level 2 wide-metrics-only".to_string(),
            IsisStmt::DisableLevel1 => "set protocols isis level 1 disable".to_string(),
            IsisStmt::Passive { iface } => format!(
                "set protocols isis interface {} passive",
                token("interface name", iface)?
            ),
            IsisStmt::PointToPoint { iface } => format!(
                "set protocols isis interface {} point-to-point",
                token("interface name", iface)?
            ),
            IsisStmt::Metric { iface, metric } => format!(
                "set protocols isis interface {} level 2 metric {metric}",
                token("interface name", iface)?
            ),
        },
        Statement::Bgp(s) => match s {
            BgpStmt::GroupInternal { group } => {
                format!("set protocols bgp group {} type internal", group_name(group)?)
            }
            BgpStmt::LocalAddress { group, addr } => format!(
                "set protocols bgp group {} local-address {addr}",
                group_name(group)?
            ),
            BgpStmt::Cluster { group, id } => {
                format!("set protocols bgp group {} cluster {id}", group_name(group)?)
            }
            BgpStmt::FamilyInetUnicast { group } => format!(
                "set protocols bgp group {} family inet unicast",
                group_name(group)?
            ),
            BgpStmt::AddPathReceive { group } => format!(
                "set protocols bgp group {} family inet unicast add-path receive",
                group_name(group)?
            ),
            BgpStmt::AddPathSend { group, paths } => format!(
                "set protocols bgp group {} family inet unicast add-path send path-count {paths}",
                group_name(group)?
            ),
            BgpStmt::OptimalRouteReflection { group } => format!(
                "set protocols bgp group {} optimal-route-reflection",
                group_name(group)?
            ),
            BgpStmt::OrrPrimary { group, addr } => format!(
                "set protocols bgp group {} optimal-route-reflection igp-primary {addr}",
                group_name(group)?
            ),
            BgpStmt::OrrBackup { group, addr } => format!(
                "set protocols bgp group {} optimal-route-reflection igp-backup {addr}",
                group_name(group)?
            ),
            BgpStmt::Export { group, policy } => format!(
                "set protocols bgp group {} export {}",
                group_name(group)?,
                token("policy name", policy)?
            ),
            BgpStmt::Neighbor { group, addr } => {
                format!("set protocols bgp group {} neighbor {addr}", group_name(group)?)
            }
        },
        Statement::Policy(s) => match s {
            PolicyStmt::MatchProtocolStatic { policy, term } => format!(
                "set policy-options policy-statement {} term {} from protocol static",
                token("policy name", policy)?,
                token("term name", term)?
            ),
            PolicyStmt::Accept { policy, term } => format!(
                "set policy-options policy-statement {} term {} then accept",
                token("policy name", policy)?,
                token("term name", term)?
            ),
            PolicyStmt::Reject { policy, term } => format!(
                "set policy-options policy-statement {} term {} then reject",
                token("policy name", policy)?,
                token("term name", term)?
            ),
        },
    })
}

fn group_name(group: &str) -> Result<&str, RenderError> {
    token("group name", group)
}
