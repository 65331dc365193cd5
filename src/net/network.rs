//! 网络拓扑管理
//!
//! 保存节点与链路，并按仿真器的 `l2` 策略为每个节点分配端口：
//! 每个节点的端口从 1 开始，按链路加入的先后顺序递增。

use std::collections::HashMap;

use super::id::{LinkId, NodeId};
use super::link::Link;
use super::node::{Node, NodeKind};
use tracing::trace;

/// 网络拓扑
#[derive(Debug, Default, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    by_name: HashMap<String, NodeId>,
    ports: HashMap<(NodeId, u16), LinkId>,
}

impl Network {
    /// 添加主机节点
    pub fn add_host(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(name.into(), NodeKind::Host)
    }

    /// 添加交换机节点
    pub fn add_switch(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(name.into(), NodeKind::Switch)
    }

    fn add_node(&mut self, name: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.by_name.insert(name.clone(), id);
        self.nodes.push(Node::new(id, name, kind));
        id
    }

    /// 连接两个节点（创建一条无向链路），两端各分配下一个空闲端口
    pub fn connect(&mut self, a: NodeId, b: NodeId, bw: f64) -> LinkId {
        let id = LinkId(self.links.len());
        let port_a = self.take_port(a);
        let port_b = self.take_port(b);
        self.ports.insert((a, port_a), id);
        self.ports.insert((b, port_b), id);
        trace!(
            a = %self.nodes[a.0].name,
            port_a,
            b = %self.nodes[b.0].name,
            port_b,
            "分配链路端口"
        );
        self.links.push(Link {
            a,
            b,
            port_a,
            port_b,
            bw,
        });
        id
    }

    fn take_port(&mut self, node: NodeId) -> u16 {
        let n = &mut self.nodes[node.0];
        let port = n.next_port;
        n.next_port += 1;
        port
    }

    /// 按 id 获取节点
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// 按名称查找节点
    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// 所有主机，按加入顺序
    pub fn hosts(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Host)
    }

    /// 所有交换机，按加入顺序
    pub fn switches(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Switch)
    }

    /// `node` 的 `port` 端口连接的对端节点
    pub fn neighbor(&self, node: NodeId, port: u16) -> Option<NodeId> {
        let link = self.ports.get(&(node, port))?;
        self.links[link.0].endpoint(node).map(|(_, peer)| peer)
    }

    /// `node` 上通往 `peer` 的端口（存在平行链路时取编号最小者）
    pub fn port_towards(&self, node: NodeId, peer: NodeId) -> Option<u16> {
        self.links
            .iter()
            .filter_map(|l| l.endpoint(node))
            .filter(|&(_, p)| p == peer)
            .map(|(port, _)| port)
            .min()
    }
}
