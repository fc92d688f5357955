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

use itertools::Itertools;
use pretty_assertions::assert_eq;

use super::{orr_lab, small_lab};
use crate::prelude::*;

fn config_of(configs: &[(String, String)], hostname: &str) -> String {
    configs
        .iter()
        .find(|(h, _)| h == hostname)
        .map(|(_, c)| c.clone())
        .unwrap()
}

#[test]
fn reflector_emits_orr_hints() {
    let configs = synthesize(&orr_lab()).unwrap();
    let rr1 = config_of(&configs, "rr1");

    // the regional group carries the loopbacks of a1 (primary) and a2 (backup)
    assert!(rr1.contains("set protocols bgp group CLIENTS-REGION optimal-route-reflection\n"));
    assert!(rr1.contains(
        "set protocols bgp group CLIENTS-REGION optimal-route-reflection igp-primary 10.0.1.1"
    ));
    assert!(rr1.contains(
        "set protocols bgp group CLIENTS-REGION optimal-route-reflection igp-backup 10.0.1.2"
    ));
    // the adjacent group points at b1/b2 instead
    assert!(rr1.contains(
        "set protocols bgp group CLIENTS-ADJ optimal-route-reflection igp-primary 10.0.1.11"
    ));
    assert!(rr1.contains(
        "set protocols bgp group CLIENTS-ADJ optimal-route-reflection igp-backup 10.0.1.12"
    ));
    // both groups use rr1's loopback as cluster id and send up to 3 paths
    assert!(rr1.contains("set protocols bgp group CLIENTS-REGION cluster 10.0.0.1"));
    assert!(rr1.contains("set protocols bgp group CLIENTS-ADJ cluster 10.0.0.1"));
    assert!(rr1.contains(
        "set protocols bgp group CLIENTS-REGION family inet unicast add-path send path-count 3"
    ));
}

#[test]
fn client_emits_prefixes_and_ordered_neighbors() {
    let configs = synthesize(&orr_lab()).unwrap();
    let c1 = config_of(&configs, "c1");

    assert!(c1.contains("set routing-options static route 10.255.3.1/32 discard"));
    assert!(c1.contains("set routing-options static route 198.51.100.0/24 discard"));
    assert!(c1.contains(
        "set policy-options policy-statement EXPORT-STATIC term STATIC from protocol static"
    ));
    assert!(c1.contains("set protocols bgp group RR export EXPORT-STATIC"));
    assert!(c1.contains("set protocols bgp group RR family inet unicast add-path receive"));

    // c1 is homed to rr3 first, rr2 second
    let rr3 = c1.find("set protocols bgp group RR neighbor 10.0.0.3").unwrap();
    let rr2 = c1.find("set protocols bgp group RR neighbor 10.0.0.2").unwrap();
    assert!(rr3 < rr2);
}

#[test]
fn reflectors_form_a_full_mesh() {
    let t = orr_lab();
    let configs = synthesize(&t).unwrap();
    let reflectors = t.reflectors().collect_vec();

    for (a, b) in reflectors.iter().tuple_combinations() {
        let node_a = t.router(*a).unwrap();
        let node_b = t.router(*b).unwrap();
        let cfg_a = config_of(&configs, &node_a.name);
        let cfg_b = config_of(&configs, &node_b.name);
        assert!(cfg_a.contains(&format!(
            "set protocols bgp group RR-PEERS neighbor {}",
            node_b.loopback
        )));
        assert!(cfg_b.contains(&format!(
            "set protocols bgp group RR-PEERS neighbor {}",
            node_a.loopback
        )));
    }
}

#[test]
fn output_order_and_determinism() {
    let t = orr_lab();
    let first = synthesize(&t).unwrap();
    let second = synthesize(&t).unwrap();
    assert_eq!(first, second);

    let hostnames = first.iter().map(|(h, _)| h.as_str()).collect_vec();
    assert_eq!(
        hostnames,
        vec!["rr1", "rr2", "rr3", "rr4", "a1", "a2", "b1", "b2", "c1", "c2", "d1", "d2"]
    );
}

#[test]
fn generate_is_idempotent() {
    let t = orr_lab();
    assert_eq!(generate(&t).unwrap(), generate(&t).unwrap());
}

#[test]
fn add_path_disabled_omits_all_statements() {
    let configs = synthesize(&small_lab()).unwrap();
    for (_, cfg) in &configs {
        assert!(!cfg.contains("add-path"));
    }
}

#[test]
fn orr_disabled_omits_all_statements() {
    let mut t = small_lab();
    t.settings_mut().orr = false;
    let configs = synthesize(&t).unwrap();
    for (_, cfg) in &configs {
        assert!(!cfg.contains("optimal-route-reflection"));
    }
    // the group itself is still emitted
    assert!(config_of(&configs, "rr1").contains("set protocols bgp group CLIENTS type internal"));
}

#[test]
fn client_without_prefixes_keeps_export_policy() {
    let configs = synthesize(&small_lab()).unwrap();
    let a2 = config_of(&configs, "a2");
    assert!(!a2.contains("static route"));
    assert!(a2.contains(
        "set policy-options policy-statement EXPORT-STATIC term DEFAULT then reject"
    ));
    assert!(a2.contains("set protocols bgp group RR export EXPORT-STATIC"));
}
