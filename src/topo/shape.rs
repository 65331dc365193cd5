//! 拓扑形状与交换机坐标
//!
//! 形状只描述结构参数（二叉树层数 / fat-tree 的 k），构造时即校验取值范围。

use super::names::{NameRule, NameTable, SwitchClass};
use crate::error::RouteError;

/// 支持的二叉树交换机层数
pub const BINARY_TREE_LAYERS: &[u32] = &[4, 5, 6, 7];
/// 支持的 fat-tree 参数 k
pub const FAT_TREE_K: &[u32] = &[4, 6, 8];

/// 二叉树各层交换机的名称符号，主机固定使用 `h`
const BINARY_TREE_SYMBOLS: [char; 7] = ['a', 'b', 'c', 'd', 'e', 'f', 'g'];

/// 拓扑描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyShape {
    BinaryTree { layers: u32 },
    FatTree { k: u32 },
}

impl TopologyShape {
    /// 校验参数，失败时返回 `UnsupportedTopologyShape`
    pub fn validate(self) -> Result<Self, RouteError> {
        match self {
            TopologyShape::BinaryTree { layers } => BinaryTreeShape::new(layers).map(|_| self),
            TopologyShape::FatTree { k } => FatTreeShape::new(k).map(|_| self),
        }
    }

    pub fn host_num(self) -> Result<usize, RouteError> {
        Ok(match self {
            TopologyShape::BinaryTree { layers } => BinaryTreeShape::new(layers)?.host_num(),
            TopologyShape::FatTree { k } => FatTreeShape::new(k)?.host_num(),
        })
    }

    pub fn name_table(self) -> Result<NameTable, RouteError> {
        Ok(match self {
            TopologyShape::BinaryTree { layers } => BinaryTreeShape::new(layers)?.name_table(),
            TopologyShape::FatTree { k } => FatTreeShape::new(k)?.name_table(),
        })
    }
}

/// 已校验的二叉树形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryTreeShape {
    layers: u32,
}

/// 二叉树交换机坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryCoord {
    /// 层号，0 为根
    pub layer: u32,
    /// 层内从左到右的序号（从 0 开始）
    pub ordinal: usize,
}

impl BinaryCoord {
    /// 交换机端口数：根 2 个，其余 3 个（上行 + 左右子树）
    pub fn port_count(self) -> u16 {
        if self.layer == 0 { 2 } else { 3 }
    }
}

impl BinaryTreeShape {
    pub fn new(layers: u32) -> Result<Self, RouteError> {
        if !BINARY_TREE_LAYERS.contains(&layers) {
            return Err(RouteError::UnsupportedTopologyShape {
                family: "binary tree",
                param: "layers",
                value: layers,
                expected: BINARY_TREE_LAYERS,
            });
        }
        Ok(Self { layers })
    }

    pub fn layers(self) -> u32 {
        self.layers
    }

    /// 主机数 `2^layers`
    pub fn host_num(self) -> usize {
        1 << self.layers
    }

    /// 第 `layer` 层的交换机数 `2^layer`
    pub fn switches_in_layer(self, layer: u32) -> usize {
        1 << layer
    }

    /// 符号表：`a` 为根，往下依次 `b`、`c`……
    pub fn name_table(self) -> NameTable {
        let rules = (0..self.layers)
            .map(|layer| NameRule {
                symbol: BINARY_TREE_SYMBOLS[layer as usize],
                class: SwitchClass::Layer(layer),
                count: self.switches_in_layer(layer),
            })
            .collect();
        NameTable::new(rules)
    }

    pub fn decode(self, name: &str) -> Result<BinaryCoord, RouteError> {
        match self.name_table().decode(name)? {
            (SwitchClass::Layer(layer), ordinal) => Ok(BinaryCoord { layer, ordinal }),
            _ => Err(RouteError::invalid(name, "not a binary tree switch")),
        }
    }

    pub fn switch_name(self, coord: BinaryCoord) -> Option<String> {
        self.name_table()
            .encode(SwitchClass::Layer(coord.layer), coord.ordinal)
    }
}

/// 已校验的 fat-tree 形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatTreeShape {
    k: u32,
}

/// fat-tree 交换机坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FatTreeCoord {
    /// 第 `pod` 个 pod 内的第 `index` 台 ToR
    Edge { pod: usize, index: usize },
    /// 第 `pod` 个 pod 内的第 `index` 台汇聚交换机
    Aggregation { pod: usize, index: usize },
    /// 第 `group` 组的第 `index` 台核心交换机；组号等于其连接的汇聚交换机在 pod 内的序号
    Core { group: usize, index: usize },
}

impl FatTreeShape {
    pub fn new(k: u32) -> Result<Self, RouteError> {
        if !FAT_TREE_K.contains(&k) {
            return Err(RouteError::UnsupportedTopologyShape {
                family: "fat-tree",
                param: "k",
                value: k,
                expected: FAT_TREE_K,
            });
        }
        Ok(Self { k })
    }

    pub fn k(self) -> usize {
        self.k as usize
    }

    pub fn half(self) -> usize {
        self.k() / 2
    }

    /// 主机数 `k^3/4`
    pub fn host_num(self) -> usize {
        self.k() * self.half() * self.half()
    }

    pub fn tor_num(self) -> usize {
        self.k() * self.half()
    }

    pub fn agg_num(self) -> usize {
        self.k() * self.half()
    }

    pub fn core_num(self) -> usize {
        self.half() * self.half()
    }

    /// 每台交换机都是 k 口
    pub fn port_count(self) -> u16 {
        self.k as u16
    }

    /// 符号表：`t` 为 ToR，`a` 为汇聚，`c` 为核心，序号全局编号
    pub fn name_table(self) -> NameTable {
        NameTable::new(vec![
            NameRule {
                symbol: 't',
                class: SwitchClass::Edge,
                count: self.tor_num(),
            },
            NameRule {
                symbol: 'a',
                class: SwitchClass::Aggregation,
                count: self.agg_num(),
            },
            NameRule {
                symbol: 'c',
                class: SwitchClass::Core,
                count: self.core_num(),
            },
        ])
    }

    pub fn decode(self, name: &str) -> Result<FatTreeCoord, RouteError> {
        let half = self.half();
        match self.name_table().decode(name)? {
            (SwitchClass::Edge, i) => Ok(FatTreeCoord::Edge {
                pod: i / half,
                index: i % half,
            }),
            (SwitchClass::Aggregation, i) => Ok(FatTreeCoord::Aggregation {
                pod: i / half,
                index: i % half,
            }),
            (SwitchClass::Core, i) => Ok(FatTreeCoord::Core {
                group: i / half,
                index: i % half,
            }),
            (SwitchClass::Layer(_), _) => Err(RouteError::invalid(name, "not a fat-tree switch")),
        }
    }

    pub fn switch_name(self, coord: FatTreeCoord) -> Option<String> {
        let half = self.half();
        let (class, a, b) = match coord {
            FatTreeCoord::Edge { pod, index } => (SwitchClass::Edge, pod, index),
            FatTreeCoord::Aggregation { pod, index } => (SwitchClass::Aggregation, pod, index),
            FatTreeCoord::Core { group, index } => (SwitchClass::Core, group, index),
        };
        if b >= half {
            return None;
        }
        self.name_table().encode(class, a * half + b)
    }
}
