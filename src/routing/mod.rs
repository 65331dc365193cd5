//! 静态路由表推导
//!
//! 输入拓扑形状和交换机名称，输出该交换机对每个目的主机的出端口。
//! 推导是纯函数：不做 I/O，不依赖全局状态，各交换机之间互不影响。

pub mod binary_tree;
pub mod ecmp;
pub mod fat_tree;
mod table;

pub use binary_tree::derive_binary_tree_table;
pub use ecmp::{UplinkPolicy, UplinkSelector, UplinkTier};
pub use fat_tree::{derive_fat_tree_table, derive_fat_tree_table_with};
pub use table::{RoutingEntry, RoutingTable};

use crate::error::RouteError;
use crate::topo::{BinaryTreeShape, FatTreeShape, TopologyShape};

/// 按任意形状推导路由表；`uplinks` 只对 fat-tree 生效
pub fn derive_table(
    shape: TopologyShape,
    switch: &str,
    uplinks: &UplinkSelector,
) -> Result<RoutingTable, RouteError> {
    match shape {
        TopologyShape::BinaryTree { layers } => {
            let shape = BinaryTreeShape::new(layers)?;
            binary_tree::derive_for(shape, shape.decode(switch)?, switch)
        }
        TopologyShape::FatTree { k } => {
            let shape = FatTreeShape::new(k)?;
            fat_tree::derive_for(shape, shape.decode(switch)?, switch, uplinks)
        }
    }
}
