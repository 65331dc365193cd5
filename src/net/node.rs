//! 节点类型
//!
//! 拓扑中的节点只有两类：主机和交换机。

use super::id::NodeId;

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Host,
    Switch,
}

/// 拓扑节点
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// 下一个待分配的端口号（端口从 1 开始按连线顺序分配）
    pub(crate) next_port: u16,
}

impl Node {
    /// 创建新节点
    pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            next_port: 1,
        }
    }

    /// 已分配的端口数
    pub fn port_count(&self) -> u16 {
        self.next_port - 1
    }
}
