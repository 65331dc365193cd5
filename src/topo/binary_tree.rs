//! 二叉树拓扑构建
//!
//! 第 `l` 层的第 `i` 台交换机连接第 `l+1` 层的 `2i`、`2i+1`；最后一层交换机的
//! 下一层就是主机。每台非根交换机先被父节点连上，因此端口 1 总是上行，
//! 2、3 分别是左、右子树；根只有 1、2 两个端口。

use crate::net::{HostId, Network, NodeId};

use super::shape::{BinaryCoord, BinaryTreeShape};

/// 二叉树拓扑配置选项
#[derive(Debug, Clone)]
pub struct BinaryTreeOpts {
    pub shape: BinaryTreeShape,
    /// 根交换机两条下行链路的带宽
    pub root_bw: f64,
    /// 其余链路带宽
    pub link_bw: f64,
}

impl BinaryTreeOpts {
    pub fn new(shape: BinaryTreeShape) -> Self {
        Self {
            shape,
            root_bw: 2.0,
            link_bw: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinaryTreeTopology {
    pub shape: BinaryTreeShape,
    pub hosts: Vec<NodeId>,
    /// `switches[layer][ordinal]`
    pub switches: Vec<Vec<NodeId>>,
}

impl BinaryTreeTopology {
    pub fn host(&self, index: usize) -> NodeId {
        self.hosts[index]
    }

    pub fn switch(&self, layer: u32, ordinal: usize) -> NodeId {
        self.switches[layer as usize][ordinal]
    }
}

/// 构建二叉树拓扑
pub fn build_binary_tree(net: &mut Network, opts: &BinaryTreeOpts) -> BinaryTreeTopology {
    let shape = opts.shape;

    let hosts: Vec<NodeId> = (0..shape.host_num())
        .map(|i| net.add_host(HostId::from_index(i).name()))
        .collect();

    let mut switches: Vec<Vec<NodeId>> = Vec::with_capacity(shape.layers() as usize);
    for layer in 0..shape.layers() {
        let row = (0..shape.switches_in_layer(layer))
            .map(|ordinal| {
                let name = shape
                    .switch_name(BinaryCoord { layer, ordinal })
                    .unwrap_or_else(|| unreachable!("layer {layer} ordinal {ordinal}"));
                net.add_switch(name)
            })
            .collect();
        switches.push(row);
    }

    for layer in 0..shape.layers() {
        let bw = if layer == 0 { opts.root_bw } else { opts.link_bw };
        let children = switches.get(layer as usize + 1).unwrap_or(&hosts);
        for (i, &parent) in switches[layer as usize].iter().enumerate() {
            net.connect(parent, children[2 * i], bw);
            net.connect(parent, children[2 * i + 1], bw);
        }
    }

    BinaryTreeTopology {
        shape,
        hosts,
        switches,
    }
}
