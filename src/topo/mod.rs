//! 拓扑：形状、交换机命名、拓扑构建与描述文件

pub mod binary_tree;
pub mod fat_tree;
pub mod names;
pub mod p4app;
pub mod shape;

pub use names::{NameRule, NameTable, SwitchClass};
pub use p4app::P4AppConfig;
pub use shape::{
    BINARY_TREE_LAYERS, BinaryCoord, BinaryTreeShape, FAT_TREE_K, FatTreeCoord, FatTreeShape,
    TopologyShape,
};

use crate::net::Network;

use self::binary_tree::{BinaryTreeOpts, build_binary_tree};
use self::fat_tree::{FatTreeOpts, build_fat_tree};
use crate::error::RouteError;

/// 按形状构建完整拓扑（默认带宽）
pub fn build_topology(shape: TopologyShape) -> Result<Network, RouteError> {
    let mut net = Network::default();
    match shape {
        TopologyShape::BinaryTree { layers } => {
            let opts = BinaryTreeOpts::new(BinaryTreeShape::new(layers)?);
            build_binary_tree(&mut net, &opts);
        }
        TopologyShape::FatTree { k } => {
            let opts = FatTreeOpts::new(FatTreeShape::new(k)?);
            build_fat_tree(&mut net, &opts);
        }
    }
    Ok(net)
}
