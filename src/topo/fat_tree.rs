//! Fat-tree 拓扑构建
//!
//! 链路加入顺序决定端口编号，这里的顺序与路由推导使用的端口约定一致：
//! - ToR：`1..=k/2` 为主机，`k/2+1..=k` 为本 pod 的汇聚交换机
//! - 汇聚：`1..=k/2` 为本 pod 的 ToR，`k/2+1..=k` 为核心交换机
//! - 核心：`p+1` 连向第 p 个 pod

use crate::net::{HostId, Network, NodeId};

use super::shape::{FatTreeCoord, FatTreeShape};

#[derive(Debug, Clone)]
pub struct FatTreeOpts {
    pub shape: FatTreeShape,
    pub link_bw: f64,
}

impl FatTreeOpts {
    pub fn new(shape: FatTreeShape) -> Self {
        Self {
            shape,
            link_bw: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FatTreeTopology {
    pub shape: FatTreeShape,
    pub hosts: Vec<NodeId>,
    pub edge_switches: Vec<NodeId>,
    pub agg_switches: Vec<NodeId>,
    pub core_switches: Vec<NodeId>,
}

impl FatTreeTopology {
    fn half(&self) -> usize {
        self.shape.half()
    }

    pub fn host(&self, pod: usize, edge: usize, host: usize) -> NodeId {
        let half = self.half();
        let idx = (pod * half + edge) * half + host;
        self.hosts[idx]
    }

    pub fn edge(&self, pod: usize, edge: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + edge;
        self.edge_switches[idx]
    }

    pub fn agg(&self, pod: usize, agg: usize) -> NodeId {
        let half = self.half();
        let idx = pod * half + agg;
        self.agg_switches[idx]
    }

    pub fn core(&self, group: usize, index: usize) -> NodeId {
        let half = self.half();
        let idx = group * half + index;
        self.core_switches[idx]
    }
}

fn name_of(shape: FatTreeShape, coord: FatTreeCoord) -> String {
    // 坐标由本模块按形状范围生成，必然可编码
    shape
        .switch_name(coord)
        .unwrap_or_else(|| unreachable!("coordinate {coord:?} outside k={}", shape.k()))
}

pub fn build_fat_tree(net: &mut Network, opts: &FatTreeOpts) -> FatTreeTopology {
    let shape = opts.shape;
    let k = shape.k();
    let half = shape.half();
    let bw = opts.link_bw;

    let mut core_switches = Vec::with_capacity(shape.core_num());
    for group in 0..half {
        for index in 0..half {
            let name = name_of(shape, FatTreeCoord::Core { group, index });
            core_switches.push(net.add_switch(name));
        }
    }

    let mut hosts = Vec::with_capacity(shape.host_num());
    let mut edge_switches = Vec::with_capacity(shape.tor_num());
    let mut agg_switches = Vec::with_capacity(shape.agg_num());
    let mut pod_edges: Vec<Vec<NodeId>> = Vec::with_capacity(k);
    let mut pod_aggs: Vec<Vec<NodeId>> = Vec::with_capacity(k);

    for pod in 0..k {
        let mut edges = Vec::with_capacity(half);
        let mut aggs = Vec::with_capacity(half);

        for index in 0..half {
            edges.push(net.add_switch(name_of(shape, FatTreeCoord::Edge { pod, index })));
        }
        for index in 0..half {
            aggs.push(net.add_switch(name_of(shape, FatTreeCoord::Aggregation { pod, index })));
        }

        for &edge_id in &edges {
            for _ in 0..half {
                let host_id = net.add_host(HostId::from_index(hosts.len()).name());
                net.connect(host_id, edge_id, bw);
                hosts.push(host_id);
            }
        }

        edge_switches.extend(edges.iter().copied());
        agg_switches.extend(aggs.iter().copied());
        pod_edges.push(edges);
        pod_aggs.push(aggs);
    }

    for pod in 0..k {
        for edge in 0..half {
            for agg in 0..half {
                net.connect(pod_edges[pod][edge], pod_aggs[pod][agg], bw);
            }
        }
    }

    for pod in 0..k {
        for agg in 0..half {
            let agg_id = pod_aggs[pod][agg];
            for index in 0..half {
                let core_id = core_switches[agg * half + index];
                net.connect(agg_id, core_id, bw);
            }
        }
    }

    FatTreeTopology {
        shape,
        hosts,
        edge_switches,
        agg_switches,
        core_switches,
    }
}
