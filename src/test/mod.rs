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

//! Test fixtures and test modules.

use std::num::NonZeroU8;

use ipnet::Ipv4Net;

use crate::prelude::*;

mod test_generate;
mod test_roles;

pub(crate) fn addr(s: &str) -> Ipv4Net {
    s.parse().unwrap()
}

/// The full ORR lab: 4 reflectors in a ring, 8 clients dual-homed to their
/// regional and the adjacent reflector, add-path 3, ORR enabled.
pub(crate) fn orr_lab() -> Topology {
    let mut t = Topology::new(Settings {
        as_id: AsId(65000),
        add_path: NonZeroU8::new(3),
        orr: true,
        max_group_clients: 2,
    });

    let routers = [
        ("rr1", "10.0.0.1", "49.0001.0000.0000.0001.00", NodeRole::Reflector),
        ("rr2", "10.0.0.2", "49.0001.0000.0000.0002.00", NodeRole::Reflector),
        ("rr3", "10.0.0.3", "49.0001.0000.0000.0003.00", NodeRole::Reflector),
        ("rr4", "10.0.0.4", "49.0001.0000.0000.0004.00", NodeRole::Reflector),
        ("a1", "10.0.1.1", "49.0001.0000.0000.0101.00", NodeRole::Client),
        ("a2", "10.0.1.2", "49.0001.0000.0000.0102.00", NodeRole::Client),
        ("b1", "10.0.1.11", "49.0001.0000.0000.0201.00", NodeRole::Client),
        ("b2", "10.0.1.12", "49.0001.0000.0000.0202.00", NodeRole::Client),
        ("c1", "10.0.1.21", "49.0001.0000.0000.0301.00", NodeRole::Client),
        ("c2", "10.0.1.22", "49.0001.0000.0000.0302.00", NodeRole::Client),
        ("d1", "10.0.1.31", "49.0001.0000.0000.0401.00", NodeRole::Client),
        ("d2", "10.0.1.32", "49.0001.0000.0000.0402.00", NodeRole::Client),
    ];
    for (name, lo, net, role) in routers {
        t.add_router(name, role, lo.parse().unwrap(), Some(net.into()))
            .unwrap();
    }

    let id = |t: &Topology, name: &str| t.router_id(name).unwrap();

    let links = [
        ("rr1", "eth1", "172.16.0.0/31", "rr2", "eth1", "172.16.0.1/31", 10),
        ("rr2", "eth2", "172.16.0.2/31", "rr3", "eth1", "172.16.0.3/31", 10),
        ("rr3", "eth2", "172.16.0.4/31", "rr4", "eth1", "172.16.0.5/31", 50),
        ("rr4", "eth2", "172.16.0.6/31", "rr1", "eth2", "172.16.0.7/31", 50),
        ("rr1", "eth3", "172.16.0.8/31", "a1", "eth1", "172.16.0.9/31", 5),
        ("rr4", "eth5", "172.16.0.10/31", "a1", "eth2", "172.16.0.11/31", 5),
        ("rr1", "eth4", "172.16.0.12/31", "a2", "eth1", "172.16.0.13/31", 5),
        ("rr4", "eth6", "172.16.0.14/31", "a2", "eth2", "172.16.0.15/31", 5),
        ("rr2", "eth3", "172.16.0.16/31", "b1", "eth1", "172.16.0.17/31", 5),
        ("rr1", "eth5", "172.16.0.18/31", "b1", "eth2", "172.16.0.19/31", 5),
        ("rr2", "eth4", "172.16.0.20/31", "b2", "eth1", "172.16.0.21/31", 5),
        ("rr1", "eth6", "172.16.0.22/31", "b2", "eth2", "172.16.0.23/31", 5),
        ("rr3", "eth3", "172.16.0.24/31", "c1", "eth1", "172.16.0.25/31", 5),
        ("rr2", "eth5", "172.16.0.26/31", "c1", "eth2", "172.16.0.27/31", 5),
        ("rr3", "eth4", "172.16.0.28/31", "c2", "eth1", "172.16.0.29/31", 5),
        ("rr2", "eth6", "172.16.0.30/31", "c2", "eth2", "172.16.0.31/31", 5),
        ("rr4", "eth3", "172.16.0.32/31", "d1", "eth1", "172.16.0.33/31", 5),
        ("rr3", "eth5", "172.16.0.34/31", "d1", "eth2", "172.16.0.35/31", 5),
        ("rr4", "eth4", "172.16.0.36/31", "d2", "eth1", "172.16.0.37/31", 5),
        ("rr3", "eth6", "172.16.0.38/31", "d2", "eth2", "172.16.0.39/31", 5),
    ];
    for (a, ifa, ipa, b, ifb, ipb, weight) in links {
        let (a, b) = (id(&t, a), id(&t, b));
        t.add_link(a, ifa, addr(ipa), b, ifb, addr(ipb), weight)
            .unwrap();
    }

    let regional = [
        ("rr1", ["a1", "a2"]),
        ("rr2", ["b1", "b2"]),
        ("rr3", ["c1", "c2"]),
        ("rr4", ["d1", "d2"]),
    ];
    for (rr, members) in regional {
        let rr = id(&t, rr);
        let members: Vec<_> = members.iter().map(|m| id(&t, m)).collect();
        t.add_client_group(rr, "CLIENTS-REGION", members.clone(), members[0], members[1])
            .unwrap();
    }
    let adjacent = [
        ("rr1", ["b1", "b2"]),
        ("rr2", ["c1", "c2"]),
        ("rr3", ["d1", "d2"]),
        ("rr4", ["a1", "a2"]),
    ];
    for (rr, members) in adjacent {
        let rr = id(&t, rr);
        let members: Vec<_> = members.iter().map(|m| id(&t, m)).collect();
        t.add_client_group(rr, "CLIENTS-ADJ", members.clone(), members[0], members[1])
            .unwrap();
    }

    let homing = [
        ("a1", ["rr1", "rr4"]),
        ("a2", ["rr1", "rr4"]),
        ("b1", ["rr2", "rr1"]),
        ("b2", ["rr2", "rr1"]),
        ("c1", ["rr3", "rr2"]),
        ("c2", ["rr3", "rr2"]),
        ("d1", ["rr4", "rr3"]),
        ("d2", ["rr4", "rr3"]),
    ];
    for (client, rrs) in homing {
        let client = id(&t, client);
        let rrs: Vec<_> = rrs.iter().map(|r| id(&t, r)).collect();
        t.set_client_reflectors(client, rrs).unwrap();
    }

    let prefixes = [
        ("a1", vec!["10.255.1.1/32"]),
        ("a2", vec!["10.255.1.2/32"]),
        ("b1", vec!["10.255.2.1/32"]),
        ("b2", vec!["10.255.2.2/32"]),
        ("c1", vec!["10.255.3.1/32", "198.51.100.0/24"]),
        ("c2", vec!["10.255.3.2/32"]),
        ("d1", vec!["10.255.4.1/32", "198.51.100.0/24"]),
        ("d2", vec!["10.255.4.2/32"]),
    ];
    for (client, list) in prefixes {
        let client = id(&t, client);
        for prefix in list {
            t.advertise_prefix(client, addr(prefix)).unwrap();
        }
    }

    t
}

/// A minimal lab: two reflectors, two clients in one ORR group on rr1,
/// single-homed, add-path disabled.
pub(crate) fn small_lab() -> Topology {
    let mut t = Topology::default();
    let rr1 = t
        .add_reflector("rr1", "10.0.0.1".parse().unwrap(), "49.0001.0000.0000.0001.00")
        .unwrap();
    let rr2 = t
        .add_reflector("rr2", "10.0.0.2".parse().unwrap(), "49.0001.0000.0000.0002.00")
        .unwrap();
    let a1 = t
        .add_client("a1", "10.0.1.1".parse().unwrap(), "49.0001.0000.0000.0101.00")
        .unwrap();
    let a2 = t
        .add_client("a2", "10.0.1.2".parse().unwrap(), "49.0001.0000.0000.0102.00")
        .unwrap();

    t.add_link(rr1, "eth1", addr("172.16.0.0/31"), rr2, "eth1", addr("172.16.0.1/31"), 10)
        .unwrap();
    t.add_link(rr1, "eth2", addr("172.16.0.2/31"), a1, "eth1", addr("172.16.0.3/31"), 5)
        .unwrap();
    t.add_link(rr1, "eth3", addr("172.16.0.4/31"), a2, "eth1", addr("172.16.0.5/31"), 5)
        .unwrap();

    t.add_client_group(rr1, "CLIENTS", vec![a1, a2], a1, a2)
        .unwrap();
    t.advertise_prefix(a1, addr("10.255.1.1/32")).unwrap();

    t
}
