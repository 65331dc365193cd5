//! 标识符类型
//!
//! 定义主机、拓扑节点和链路的标识符。

use std::fmt;

/// 主机标识符（从 1 开始编号，对应主机名 `h<id>`）
///
/// 主机地址只编码 16 位 id，因此 id 上限为 65535。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostId(pub u16);

impl HostId {
    /// 由从 0 开始的主机下标构造；下标须小于 65535
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < u16::MAX as usize, "host index {index} out of range");
        HostId(index as u16 + 1)
    }

    /// 从 0 开始的主机下标
    pub fn index(self) -> usize {
        (self.0 as usize).saturating_sub(1)
    }

    /// 主机名，例如 `h7`
    pub fn name(self) -> String {
        format!("h{}", self.0)
    }

    /// 解析 `h<ordinal>` 形式的主机名；ordinal 必须 >= 1
    pub fn from_name(name: &str) -> Option<Self> {
        let digits = name.strip_prefix('h')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match digits.parse::<u16>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(HostId(n)),
        }
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// 拓扑图中的节点标识符（主机与交换机统一编号）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// 链路标识符（在描述文件 links 数组中的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);
