// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use wren_core::FakeClock;
use wren_ring::RingHandle;
use wren_transport::LoopbackNetwork;

const VIRTUAL_NODES: u32 = 32;

fn node(
    network: &LoopbackNetwork,
    id: &str,
    addr: &str,
) -> Arc<Swim<wren_transport::LoopbackTransport, FakeClock>> {
    let info = NodeInfo::new(NodeId::from(id), addr);
    let membership = Arc::new(Membership::new(info));
    let ring = Arc::new(RingHandle::new(VIRTUAL_NODES));
    ring.resync(&membership);
    Arc::new(Swim::new(
        membership,
        ring,
        Arc::new(network.transport(addr)),
        FakeClock::new(),
        GossipConfig { probe_timeout_ms: 50, suspect_timeout_ms: 200, ..GossipConfig::default() },
    ))
}

/// Registers `swim`'s request handler on `addr` so peers on `network` can
/// reach it.
async fn wire(
    network: &LoopbackNetwork,
    swim: &Arc<Swim<wren_transport::LoopbackTransport, FakeClock>>,
    addr: &str,
) {
    let transport = network.transport(addr);
    let swim = swim.clone();
    transport
        .serve(Arc::new(move |req| {
            let swim = swim.clone();
            Box::pin(async move {
                swim.handle_request(req)
                    .await
                    .unwrap_or(Response::GetStatus { found: false, status: None })
            })
        }))
        .await
        .unwrap();
}

#[tokio::test]
async fn join_merges_the_seed_snapshot() {
    let network = LoopbackNetwork::new();
    let seed = node(&network, "node--seed", "seed:9000");
    wire(&network, &seed, "seed:9000").await;

    let joiner = node(&network, "node--joiner", "joiner:9000");
    joiner.join(&["seed:9000".to_string()]).await.unwrap();

    assert_eq!(joiner.membership().all().len(), 2);
}

#[tokio::test]
async fn join_fails_when_no_seed_is_reachable() {
    let network = LoopbackNetwork::new();
    let joiner = node(&network, "node--joiner", "joiner:9000");
    let err = joiner.join(&["ghost:9000".to_string()]).await.unwrap_err();
    assert!(matches!(err, GossipError::JoinFailed));
}

#[tokio::test]
async fn probe_once_keeps_a_responsive_peer_alive() {
    let network = LoopbackNetwork::new();
    let a = node(&network, "node--a", "a:9000");
    let b = node(&network, "node--b", "b:9000");
    wire(&network, &b, "b:9000").await;

    a.membership().update(NodeInfo::new(NodeId::from("node--b"), "b:9000"));
    a.probe_once().await;

    assert_eq!(
        a.membership().get(&NodeId::from("node--b")).unwrap().state,
        NodeState::Alive
    );
}

#[tokio::test]
async fn probe_once_marks_an_unreachable_peer_suspect() {
    let network = LoopbackNetwork::new();
    let a = node(&network, "node--a", "a:9000");
    // node--b is known but never wired to the loopback network, so every
    // probe (direct and indirect) times out.
    a.membership().update(NodeInfo::new(NodeId::from("node--b"), "b:9000"));
    a.probe_once().await;

    assert_eq!(
        a.membership().get(&NodeId::from("node--b")).unwrap().state,
        NodeState::Suspect
    );
}

#[tokio::test]
async fn tick_promotes_an_expired_suspect_to_dead() {
    let network = LoopbackNetwork::new();
    let a = node(&network, "node--a", "a:9000");
    let mut suspect = NodeInfo::new(NodeId::from("node--b"), "b:9000");
    suspect.state = NodeState::Suspect;
    suspect.last_heartbeat_ms = 0;
    a.membership().update(suspect);

    a.tick().await;

    assert_eq!(
        a.membership().get(&NodeId::from("node--b")).unwrap().state,
        NodeState::Dead
    );
}

#[tokio::test]
async fn handle_request_returns_none_for_non_gossip_requests() {
    let network = LoopbackNetwork::new();
    let a = node(&network, "node--a", "a:9000");
    let resp = a
        .handle_request(Request::GetStatus { workflow_id: wren_core::WorkflowId::from("wf-1") })
        .await;
    assert!(resp.is_none());
}
