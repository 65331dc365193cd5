//! 拓扑来源
//!
//! 控制器启动时读取一次：交换机名称列表与拓扑形状。

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::TopologyError;
use crate::topo::{BINARY_TREE_LAYERS, FAT_TREE_K, P4AppConfig, TopologyShape};

/// 只读的拓扑来源
pub trait TopologySource {
    /// 当前拓扑形状
    fn shape(&self) -> Result<TopologyShape, TopologyError>;

    /// 需要下发路由的交换机名称
    fn switch_names(&self) -> Vec<String>;
}

/// 由形状直接枚举全部交换机
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSource {
    shape: TopologyShape,
}

impl ShapeSource {
    pub fn new(shape: TopologyShape) -> Result<Self, TopologyError> {
        Ok(Self {
            shape: shape.validate()?,
        })
    }
}

impl TopologySource for ShapeSource {
    fn shape(&self) -> Result<TopologyShape, TopologyError> {
        Ok(self.shape)
    }

    fn switch_names(&self) -> Vec<String> {
        self.shape
            .name_table()
            .map(|t| t.switch_names().collect())
            .unwrap_or_default()
    }
}

/// 从 p4app JSON 描述读取
#[derive(Debug, Clone)]
pub struct JsonTopologySource {
    config: P4AppConfig,
    shape_override: Option<TopologyShape>,
}

impl JsonTopologySource {
    pub fn new(config: P4AppConfig) -> Self {
        Self {
            config,
            shape_override: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self, TopologyError> {
        Ok(Self::new(P4AppConfig::load(path)?))
    }

    /// 显式指定形状，不再从交换机名称推断
    pub fn with_shape(mut self, shape: TopologyShape) -> Self {
        self.shape_override = Some(shape);
        self
    }

    pub fn config(&self) -> &P4AppConfig {
        &self.config
    }
}

impl TopologySource for JsonTopologySource {
    fn shape(&self) -> Result<TopologyShape, TopologyError> {
        match self.shape_override {
            Some(shape) => {
                let inferred = infer_shape(&self.switch_names()).ok();
                if inferred.is_some_and(|s| s != shape) {
                    warn!(?shape, ?inferred, "指定的拓扑形状与描述文件不一致");
                }
                Ok(shape.validate()?)
            }
            None => infer_shape(&self.switch_names()),
        }
    }

    fn switch_names(&self) -> Vec<String> {
        self.config.topology.switches.keys().cloned().collect()
    }
}

/// 从交换机名称推断拓扑形状
///
/// 依次尝试所有受支持的形状，取名称表被完整覆盖的最大者。无法识别的名称
/// 不参与推断，留给控制器按 `OnInvalid` 处理。
pub fn infer_shape(switches: &[String]) -> Result<TopologyShape, TopologyError> {
    if switches.is_empty() {
        return Err(TopologyError::InvalidShape("no switches".to_string()));
    }

    let present: HashSet<&str> = switches.iter().map(String::as_str).collect();
    let candidates = BINARY_TREE_LAYERS
        .iter()
        .map(|&layers| TopologyShape::BinaryTree { layers })
        .chain(FAT_TREE_K.iter().map(|&k| TopologyShape::FatTree { k }));

    let mut best: Option<(TopologyShape, usize)> = None;
    for shape in candidates {
        let table = shape.name_table()?;
        if !table.switch_names().all(|n| present.contains(n.as_str())) {
            continue;
        }
        let count = table.switch_count();
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((shape, count));
        }
    }

    let (shape, count) = best.ok_or_else(|| {
        TopologyError::InvalidShape(format!(
            "{} switches do not cover any supported binary tree or fat-tree",
            switches.len()
        ))
    })?;
    if count < switches.len() {
        warn!(
            ?shape,
            unrecognized = switches.len() - count,
            "部分交换机名称不属于推断出的拓扑"
        );
    }
    debug!(?shape, switches = switches.len(), "推断拓扑形状");
    Ok(shape)
}
