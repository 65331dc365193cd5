use crate::error::RouteError;
use crate::net::{HostId, host_mac};
use crate::routing::{RoutingTable, derive_binary_tree_table};
use crate::topo::{BINARY_TREE_LAYERS, BinaryTreeShape};
use std::collections::HashSet;

fn ports(table: &RoutingTable) -> Vec<u16> {
    table.entries.iter().map(|e| e.port).collect()
}

#[test]
fn root_splits_hosts_in_half() {
    let table = derive_binary_tree_table(4, "a1").unwrap();
    let mut expected = vec![1u16; 8];
    expected.extend(vec![2u16; 8]);
    assert_eq!(ports(&table), expected);
}

#[test]
fn first_layer_switch_boundaries() {
    // interval = 16/4 = 4, axis = 4
    let table = derive_binary_tree_table(4, "b1").unwrap();
    let p = ports(&table);
    assert_eq!(&p[0..4], &[2, 2, 2, 2]);
    assert_eq!(&p[4..8], &[3, 3, 3, 3]);
    assert!(p[8..].iter().all(|&port| port == 1));

    let table = derive_binary_tree_table(4, "b2").unwrap();
    let p = ports(&table);
    assert!(p[..8].iter().all(|&port| port == 1));
    assert_eq!(&p[8..12], &[2, 2, 2, 2]);
    assert_eq!(&p[12..16], &[3, 3, 3, 3]);
}

#[test]
fn edge_layer_switch_serves_two_hosts() {
    let table = derive_binary_tree_table(4, "d3").unwrap();
    for entry in &table.entries {
        let expected = match entry.host.0 {
            5 => 2,
            6 => 3,
            _ => 1,
        };
        assert_eq!(entry.port, expected, "host {}", entry.host);
    }

    let table = derive_binary_tree_table(7, "g64").unwrap();
    assert_eq!(table.port_for(HostId(127)), Some(2));
    assert_eq!(table.port_for(HostId(128)), Some(3));
    assert_eq!(table.port_for(HostId(1)), Some(1));
}

#[test]
fn entries_carry_host_addresses_in_order() {
    let table = derive_binary_tree_table(5, "c3").unwrap();
    assert_eq!(table.switch, "c3");
    for (i, entry) in table.entries.iter().enumerate() {
        assert_eq!(entry.host, HostId::from_index(i));
        assert_eq!(entry.dst, host_mac(entry.host));
    }
}

#[test]
fn every_switch_covers_every_host_with_valid_ports() {
    for &layers in BINARY_TREE_LAYERS {
        let shape = BinaryTreeShape::new(layers).unwrap();
        for name in shape.name_table().switch_names() {
            let table = derive_binary_tree_table(layers, &name).unwrap();
            assert_eq!(table.len(), shape.host_num(), "{name} in {layers} layers");
            table.verify_coverage(shape.host_num()).unwrap();

            let unique: HashSet<_> = table.entries.iter().map(|e| e.dst).collect();
            assert_eq!(unique.len(), shape.host_num());

            let max_port = shape.decode(&name).unwrap().port_count();
            assert!(
                table.entries.iter().all(|e| (1..=max_port).contains(&e.port)),
                "{name} has a port outside 1..={max_port}"
            );
        }
    }
}

#[test]
fn non_root_switch_sends_only_its_subtree_downward() {
    let shape = BinaryTreeShape::new(6).unwrap();
    for name in shape.name_table().switch_names() {
        let coord = shape.decode(&name).unwrap();
        if coord.layer == 0 {
            continue;
        }
        let table = derive_binary_tree_table(6, &name).unwrap();
        let down = table.entries.iter().filter(|e| e.port != 1).count();
        assert_eq!(down, shape.host_num() >> coord.layer, "{name}");
    }
}

#[test]
fn derivation_is_deterministic() {
    let a = derive_binary_tree_table(6, "e7").unwrap();
    let b = derive_binary_tree_table(6, "e7").unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_shape_rejected() {
    assert!(matches!(
        derive_binary_tree_table(3, "a1"),
        Err(RouteError::UnsupportedTopologyShape { value: 3, .. })
    ));
    assert!(matches!(
        derive_binary_tree_table(8, "a1"),
        Err(RouteError::UnsupportedTopologyShape { value: 8, .. })
    ));
}

#[test]
fn invalid_identity_rejected() {
    assert!(matches!(
        derive_binary_tree_table(4, "z9"),
        Err(RouteError::InvalidIdentity { ref name, .. }) if name == "z9"
    ));
    assert!(matches!(
        derive_binary_tree_table(4, "b3"),
        Err(RouteError::InvalidIdentity { .. })
    ));
}

#[test]
fn coverage_check_reports_missing_entries() {
    let mut table = derive_binary_tree_table(4, "c2").unwrap();
    table.entries.pop();
    assert_eq!(
        table.verify_coverage(16),
        Err(RouteError::IncompleteCoverage {
            switch: "c2".to_string(),
            expected: 16,
            got: 15,
        })
    );

    let mut dup = derive_binary_tree_table(4, "c2").unwrap();
    dup.entries[3] = dup.entries[2];
    assert!(matches!(
        dup.verify_coverage(16),
        Err(RouteError::IncompleteCoverage { got: 15, .. })
    ));
}
