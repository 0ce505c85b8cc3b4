// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::node_info::NodeState;

fn peer(name: &str, state: NodeState, incarnation: u64) -> NodeInfo {
    NodeInfo {
        node_id: NodeId::from(name),
        address: format!("{name}.local:9000"),
        state,
        incarnation,
        last_heartbeat_ms: 0,
    }
}

#[test]
fn new_membership_contains_only_the_local_node() {
    let m = Membership::new(peer("node--self", NodeState::Alive, 0));
    assert_eq!(m.all().len(), 1);
    assert_eq!(m.alive().len(), 1);
}

#[test]
fn update_adds_an_unknown_peer() {
    let m = Membership::new(peer("node--self", NodeState::Alive, 0));
    let changed = m.update(peer("node--b", NodeState::Alive, 0));
    assert!(changed);
    assert_eq!(m.all().len(), 2);
}

#[test]
fn update_ignores_a_stale_record_for_a_known_peer() {
    let m = Membership::new(peer("node--self", NodeState::Alive, 0));
    m.update(peer("node--b", NodeState::Alive, 5));
    let changed = m.update(peer("node--b", NodeState::Suspect, 3));
    assert!(!changed);
    assert_eq!(m.get(&NodeId::from("node--b")).unwrap().incarnation, 5);
}

#[test]
fn update_accepts_a_newer_record_for_a_known_peer() {
    let m = Membership::new(peer("node--self", NodeState::Alive, 0));
    m.update(peer("node--b", NodeState::Alive, 0));
    let changed = m.update(peer("node--b", NodeState::Suspect, 1));
    assert!(changed);
    assert_eq!(
        m.get(&NodeId::from("node--b")).unwrap().state,
        NodeState::Suspect
    );
}

#[test]
fn dead_peer_drops_out_of_alive_but_stays_in_all() {
    let m = Membership::new(peer("node--self", NodeState::Alive, 0));
    m.update(peer("node--b", NodeState::Alive, 0));
    m.update(peer("node--b", NodeState::Dead, 1));
    assert_eq!(m.all().len(), 2);
    assert_eq!(m.alive().len(), 1);
}

#[test]
fn observing_self_as_suspect_bumps_incarnation_and_stays_alive() {
    let m = Membership::new(peer("node--self", NodeState::Alive, 0));
    let changed = m.update(peer("node--self", NodeState::Suspect, 0));
    assert!(changed);
    let local = m.get(&m.local_id()).unwrap();
    assert_eq!(local.state, NodeState::Alive);
    assert_eq!(local.incarnation, 1);
}

#[test]
fn observing_self_as_suspect_at_a_lower_incarnation_is_ignored() {
    let m = Membership::new(peer("node--self", NodeState::Alive, 5));
    let changed = m.update(peer("node--self", NodeState::Suspect, 2));
    assert!(!changed);
    let local = m.get(&m.local_id()).unwrap();
    assert_eq!(local.incarnation, 5);
    assert_eq!(local.state, NodeState::Alive);
}
