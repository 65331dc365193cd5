use crate::error::RouteError;
use crate::net::HostId;
use crate::routing::{
    UplinkPolicy, UplinkSelector, UplinkTier, derive_fat_tree_table, derive_fat_tree_table_with,
};
use crate::topo::{FAT_TREE_K, FatTreeShape};
use std::collections::HashSet;

fn selectors() -> [UplinkSelector; 3] {
    [
        UplinkSelector::default(),
        UplinkSelector::new(UplinkPolicy::DestinationHash, 0),
        UplinkSelector::new(UplinkPolicy::DestinationHash, 0xC5A1_DA7A_5EED_1234),
    ]
}

#[test]
fn every_switch_covers_every_host_with_valid_ports() {
    for &k in FAT_TREE_K {
        let shape = FatTreeShape::new(k).unwrap();
        for uplinks in selectors() {
            for name in shape.name_table().switch_names() {
                let table = derive_fat_tree_table_with(k, &name, &uplinks).unwrap();
                assert_eq!(table.len(), shape.host_num(), "{name} k={k}");
                table.verify_coverage(shape.host_num()).unwrap();
                let unique: HashSet<_> = table.entries.iter().map(|e| e.dst).collect();
                assert_eq!(unique.len(), shape.host_num());
                assert!(
                    table
                        .entries
                        .iter()
                        .all(|e| (1..=shape.port_count()).contains(&e.port)),
                    "{name} k={k} has a port outside 1..={}",
                    shape.port_count()
                );
            }
        }
    }
}

#[test]
fn edge_switch_delivers_local_hosts_directly() {
    // k=4: t3 是 pod 1 的第一台 ToR，直连 h5、h6
    let table = derive_fat_tree_table(4, "t3").unwrap();
    assert_eq!(table.port_for(HostId(5)), Some(1));
    assert_eq!(table.port_for(HostId(6)), Some(2));
    for entry in &table.entries {
        if entry.host != HostId(5) && entry.host != HostId(6) {
            assert!((3..=4).contains(&entry.port), "{} -> {}", entry.host, entry.port);
        }
    }
}

#[test]
fn edge_uplink_is_destination_modulo_by_default() {
    let table = derive_fat_tree_table(8, "t1").unwrap();
    for entry in &table.entries {
        let idx = entry.host.index();
        if idx < 4 {
            assert_eq!(entry.port as usize, idx + 1);
        } else {
            assert_eq!(entry.port as usize, 4 + 1 + idx % 4);
        }
    }
}

#[test]
fn aggregation_switch_routes_down_inside_pod() {
    // k=4: a3 属于 pod 1，pod 1 的主机为 h5..h8
    let table = derive_fat_tree_table(4, "a3").unwrap();
    assert_eq!(table.port_for(HostId(5)), Some(1));
    assert_eq!(table.port_for(HostId(6)), Some(1));
    assert_eq!(table.port_for(HostId(7)), Some(2));
    assert_eq!(table.port_for(HostId(8)), Some(2));
    for id in (1..=4).chain(9..=16) {
        let port = table.port_for(HostId(id)).unwrap();
        assert!((3..=4).contains(&port), "h{id} -> {port}");
    }
}

#[test]
fn core_switch_has_one_port_per_pod() {
    for &k in FAT_TREE_K {
        let shape = FatTreeShape::new(k).unwrap();
        let per_pod = shape.half() * shape.half();
        for core in 1..=shape.core_num() {
            let table = derive_fat_tree_table(k, &format!("c{core}")).unwrap();
            for entry in &table.entries {
                assert_eq!(entry.port as usize, entry.host.index() / per_pod + 1);
            }
        }
    }
}

#[test]
fn modulo_policy_spreads_inter_pod_traffic_over_all_cores() {
    // 从 pod 0 出发的所有跨 pod 目的地，(ToR 上行口, 汇聚上行口) 组合应覆盖全部核心
    let k = 6;
    let shape = FatTreeShape::new(k).unwrap();
    let half = shape.half();
    let uplinks = UplinkSelector::default();
    let mut used = HashSet::new();
    for dst in (half * half)..shape.host_num() {
        let agg = uplinks.pick(UplinkTier::Edge, dst, half);
        let core_slot = uplinks.pick(UplinkTier::Aggregation, dst, half);
        used.insert(agg * half + core_slot);
    }
    assert_eq!(used.len(), shape.core_num());
}

#[test]
fn uplink_choice_depends_only_on_destination() {
    for uplinks in selectors() {
        for dst in 0..128 {
            let a = uplinks.pick(UplinkTier::Aggregation, dst, 4);
            let b = uplinks.pick(UplinkTier::Aggregation, dst, 4);
            assert_eq!(a, b);
            assert!(a < 4);
        }
    }
}

#[test]
fn hash_policy_differs_from_modulo_for_some_destination() {
    let modulo = derive_fat_tree_table(8, "t1").unwrap();
    let hashed =
        derive_fat_tree_table_with(8, "t1", &UplinkSelector::new(UplinkPolicy::DestinationHash, 0))
            .unwrap();
    assert_ne!(modulo, hashed);
}

#[test]
fn hash_salt_changes_some_choice() {
    let s0 = UplinkSelector::new(UplinkPolicy::DestinationHash, 0);
    let s1 = UplinkSelector::new(UplinkPolicy::DestinationHash, 1);
    let differs = (0..10_000usize)
        .any(|dst| s0.pick(UplinkTier::Edge, dst, 4) != s1.pick(UplinkTier::Edge, dst, 4));
    assert!(differs, "expected at least one destination to differ between salts");
}

#[test]
fn derivation_is_deterministic() {
    let uplinks = UplinkSelector::new(UplinkPolicy::DestinationHash, 7);
    let a = derive_fat_tree_table_with(6, "a5", &uplinks).unwrap();
    let b = derive_fat_tree_table_with(6, "a5", &uplinks).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_inputs_rejected() {
    assert!(matches!(
        derive_fat_tree_table(5, "t1"),
        Err(RouteError::UnsupportedTopologyShape { value: 5, .. })
    ));
    assert!(matches!(
        derive_fat_tree_table(10, "t1"),
        Err(RouteError::UnsupportedTopologyShape { value: 10, .. })
    ));
    assert!(matches!(
        derive_fat_tree_table(4, "t9"),
        Err(RouteError::InvalidIdentity { .. })
    ));
    assert!(matches!(
        derive_fat_tree_table(4, "b1"),
        Err(RouteError::InvalidIdentity { .. })
    ));
}
