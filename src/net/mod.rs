//! 网络基础类型
//!
//! 此模块包含标识符、主机地址方案，以及由节点和链路组成的拓扑图。

// 子模块声明
mod id;
mod addr;
mod node;
mod link;
mod network;

// 重新导出公共接口
pub use id::{HostId, LinkId, NodeId};
pub use addr::{HOST_MAC_PREFIX, MacAddr, ParseMacError, host_ip, host_mac};
pub use node::{Node, NodeKind};
pub use link::Link;
pub use network::Network;
