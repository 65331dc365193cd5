//! 错误类型
//!
//! 路由推导（纯计算）、拓扑描述读写、表项下发三类错误分开定义。

use std::io;

use thiserror::Error;

/// 路由表推导错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// 拓扑参数不在支持范围内（二叉树层数 / fat-tree k）
    #[error("unsupported {family} shape: {param}={value} (expected one of {expected:?})")]
    UnsupportedTopologyShape {
        family: &'static str,
        param: &'static str,
        value: u32,
        expected: &'static [u32],
    },
    /// 交换机名称无法在当前拓扑下解码
    #[error("invalid switch identity {name:?}: {reason}")]
    InvalidIdentity { name: String, reason: String },
    /// 推导出的表项没有覆盖全部主机
    #[error("incomplete coverage for {switch}: expected {expected} entries, got {got}")]
    IncompleteCoverage {
        switch: String,
        expected: usize,
        got: usize,
    },
}

impl RouteError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidIdentity {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// 拓扑描述文件相关错误
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("cannot access topology file: {0}")]
    Io(#[from] io::Error),
    #[error("cannot parse topology description: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Route(#[from] RouteError),
    /// 链路引用了 hosts / switches 中不存在的节点
    #[error("link references unknown node {0:?}")]
    UnknownNode(String),
    /// 无法从交换机名称推断拓扑形状
    #[error("cannot infer topology shape: {0}")]
    InvalidShape(String),
}

/// 表项下发错误
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("installer i/o failure: {0}")]
    Io(#[from] io::Error),
    /// 交换机控制面拒绝了一条命令
    #[error("switch {switch} rejected {command:?}: {reason}")]
    Rejected {
        switch: String,
        command: String,
        reason: String,
    },
}

/// 控制器编排错误
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error("cannot install table on {switch}: {source}")]
    Install {
        switch: String,
        #[source]
        source: InstallError,
    },
    /// 没有为该交换机建立控制面句柄
    #[error("no installer for switch {0}")]
    NoInstaller(String),
}
