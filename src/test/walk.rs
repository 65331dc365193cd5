//! 在生成的拓扑上按推导出的路由表逐跳转发，验证任意主机对之间可达

use crate::net::{HostId, Network, NodeId, NodeKind};
use crate::routing::{RoutingTable, UplinkPolicy, UplinkSelector, derive_table};
use crate::topo::{TopologyShape, build_topology};
use std::collections::HashMap;

fn tables_for(
    net: &Network,
    shape: TopologyShape,
    uplinks: &UplinkSelector,
) -> HashMap<NodeId, RoutingTable> {
    net.switches()
        .map(|sw| (sw.id, derive_table(shape, &sw.name, uplinks).unwrap()))
        .collect()
}

fn walk(
    net: &Network,
    tables: &HashMap<NodeId, RoutingTable>,
    src: HostId,
    dst: HostId,
) -> Vec<NodeId> {
    let src_id = net.node_id(&src.name()).expect("src host");
    let mut path = vec![src_id];
    let mut at = net.neighbor(src_id, 1).expect("host uplink");
    for _ in 0..32 {
        path.push(at);
        let node = net.node(at);
        if node.kind == NodeKind::Host {
            return path;
        }
        let port = tables[&at].port_for(dst).expect("entry for dst");
        at = net
            .neighbor(at, port)
            .unwrap_or_else(|| panic!("{} has nothing on port {port}", node.name));
    }
    panic!("forwarding loop from {src} to {dst}: {path:?}");
}

fn assert_all_pairs_reachable(shape: TopologyShape, uplinks: &UplinkSelector) {
    let net = build_topology(shape).unwrap();
    let tables = tables_for(&net, shape, uplinks);
    let host_num = shape.host_num().unwrap();
    for s in 1..=host_num as u16 {
        for d in 1..=host_num as u16 {
            if s == d {
                continue;
            }
            let path = walk(&net, &tables, HostId(s), HostId(d));
            let last = *path.last().unwrap();
            assert_eq!(
                net.node(last).name,
                HostId(d).name(),
                "h{s} -> h{d} ended at the wrong host: {path:?}"
            );
        }
    }
}

#[test]
fn binary_tree_tables_reach_every_host() {
    for layers in [4, 5, 6] {
        assert_all_pairs_reachable(
            TopologyShape::BinaryTree { layers },
            &UplinkSelector::default(),
        );
    }
}

#[test]
fn binary_tree_paths_turn_at_lowest_common_ancestor() {
    let shape = TopologyShape::BinaryTree { layers: 4 };
    let net = build_topology(shape).unwrap();
    let tables = tables_for(&net, shape, &UplinkSelector::default());

    // 同一叶子交换机下：h -> d -> h
    assert_eq!(walk(&net, &tables, HostId(1), HostId(2)).len(), 3);
    // 跨越根：h -> d -> c -> b -> a -> b -> c -> d -> h
    let path = walk(&net, &tables, HostId(1), HostId(16));
    assert_eq!(path.len(), 9);
    assert_eq!(net.node(path[4]).name, "a1");
}

#[test]
fn fat_tree_tables_reach_every_host() {
    for k in [4, 6] {
        for uplinks in [
            UplinkSelector::default(),
            UplinkSelector::new(UplinkPolicy::DestinationHash, 0xC5A1_DA7A_5EED_1234),
        ] {
            assert_all_pairs_reachable(TopologyShape::FatTree { k }, &uplinks);
        }
    }
}

#[test]
fn fat_tree_path_lengths() {
    let shape = TopologyShape::FatTree { k: 4 };
    let net = build_topology(shape).unwrap();
    let tables = tables_for(&net, shape, &UplinkSelector::default());

    // h1、h2 同 ToR；h3 同 pod；h16 在 pod 3
    assert_eq!(walk(&net, &tables, HostId(1), HostId(2)).len(), 3);
    assert_eq!(walk(&net, &tables, HostId(1), HostId(3)).len(), 5);
    let inter_pod = walk(&net, &tables, HostId(1), HostId(16));
    assert_eq!(inter_pod.len(), 7);
    assert!(net.node(inter_pod[3]).name.starts_with('c'));
}
