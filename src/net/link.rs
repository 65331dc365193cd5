//! 链路类型
//!
//! 一条无向链路，两端各占用一个本地端口。

use super::id::NodeId;

/// 网络链路
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub a: NodeId,
    pub b: NodeId,
    /// `a` 侧端口
    pub port_a: u16,
    /// `b` 侧端口
    pub port_b: u16,
    /// 带宽（Mbps，由仿真器解释）
    pub bw: f64,
}

impl Link {
    /// 返回 `node` 在这条链路上的端口和对端节点
    pub fn endpoint(&self, node: NodeId) -> Option<(u16, NodeId)> {
        if node == self.a {
            Some((self.port_a, self.b))
        } else if node == self.b {
            Some((self.port_b, self.a))
        } else {
            None
        }
    }
}
