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

use maplit::hashmap;
use pretty_assertions::assert_eq;

use super::{addr, orr_lab, small_lab};
use crate::prelude::*;

#[test]
fn full_lab_plan() {
    let t = orr_lab();
    let plan = classify(&t).unwrap();
    let id = |name: &str| t.router_id(name).unwrap();

    assert_eq!(
        plan.reflectors,
        vec![id("rr1"), id("rr2"), id("rr3"), id("rr4")]
    );
    assert_eq!(plan.groups.len(), 8);
    assert_eq!(
        plan.homing,
        hashmap! {
            id("a1") => vec![id("rr1"), id("rr4")],
            id("a2") => vec![id("rr1"), id("rr4")],
            id("b1") => vec![id("rr2"), id("rr1")],
            id("b2") => vec![id("rr2"), id("rr1")],
            id("c1") => vec![id("rr3"), id("rr2")],
            id("c2") => vec![id("rr3"), id("rr2")],
            id("d1") => vec![id("rr4"), id("rr3")],
            id("d2") => vec![id("rr4"), id("rr3")],
        }
    );
}

#[test]
fn derived_homing_follows_group_declaration_order() {
    let mut t = Topology::default();
    let rr1 = t
        .add_reflector("rr1", "10.0.0.1".parse().unwrap(), "49.0001.0000.0000.0001.00")
        .unwrap();
    let rr2 = t
        .add_reflector("rr2", "10.0.0.2".parse().unwrap(), "49.0001.0000.0000.0002.00")
        .unwrap();
    let x1 = t
        .add_client("x1", "10.0.1.1".parse().unwrap(), "49.0001.0000.0000.0101.00")
        .unwrap();
    let x2 = t
        .add_client("x2", "10.0.1.2".parse().unwrap(), "49.0001.0000.0000.0102.00")
        .unwrap();

    // rr2 declares its group first, so derived homing starts with rr2
    t.add_client_group(rr2, "G2", vec![x1, x2], x1, x2).unwrap();
    t.add_client_group(rr1, "G1", vec![x1, x2], x1, x2).unwrap();
    let plan = classify(&t).unwrap();
    assert_eq!(plan.homing_of(x1), &[rr2, rr1]);

    // a declared homing list takes precedence over the derived order
    t.set_client_reflectors(x2, vec![rr1, rr2]).unwrap();
    let plan = classify(&t).unwrap();
    assert_eq!(plan.homing_of(x1), &[rr2, rr1]);
    assert_eq!(plan.homing_of(x2), &[rr1, rr2]);
}

#[test]
fn group_too_small() {
    let mut t = small_lab();
    let rr2 = t.router_id("rr2").unwrap();
    let a1 = t.router_id("a1").unwrap();
    // two entries, but only one distinct member
    t.add_client_group(rr2, "SOLO", vec![a1, a1], a1, a1)
        .unwrap();
    assert_eq!(
        classify(&t),
        Err(ValidationError::GroupSize {
            reflector: "rr2".to_string(),
            group: "SOLO".to_string(),
            size: 1,
            max: 2,
        })
    );
}

#[test]
fn group_too_large() {
    let mut t = small_lab();
    let rr2 = t.router_id("rr2").unwrap();
    let a1 = t.router_id("a1").unwrap();
    let a2 = t.router_id("a2").unwrap();
    let a3 = t
        .add_client("a3", "10.0.1.3".parse().unwrap(), "49.0001.0000.0000.0103.00")
        .unwrap();
    t.add_link(rr2, "eth2", addr("172.16.0.6/31"), a3, "eth1", addr("172.16.0.7/31"), 5)
        .unwrap();
    t.add_client_group(rr2, "BIG", vec![a1, a2, a3], a1, a2)
        .unwrap();
    assert_eq!(
        classify(&t),
        Err(ValidationError::GroupSize {
            reflector: "rr2".to_string(),
            group: "BIG".to_string(),
            size: 3,
            max: 2,
        })
    );
}

#[test]
fn unhomed_client() {
    let mut t = small_lab();
    t.add_client("a3", "10.0.1.3".parse().unwrap(), "49.0001.0000.0000.0103.00")
        .unwrap();
    assert_eq!(
        classify(&t),
        Err(ValidationError::UnhomedClient("a3".to_string()))
    );
}

#[test]
fn homing_of_unknown_router_is_empty() {
    let t = small_lab();
    let plan = classify(&t).unwrap();
    assert_eq!(plan.homing_of(RouterId::new(100)), &[] as &[RouterId]);
}
