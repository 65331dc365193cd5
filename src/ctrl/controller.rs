//! 路由控制器
//!
//! 枚举拓扑中的交换机，逐台推导路由表，再通过各自的控制面句柄下发：
//! 先清空状态，设置 `dmac` 默认动作为 `drop`，最后逐条添加 `forward` 表项。
//! 推导阶段全部完成后才开始下发，推导失败时（`Abort` 策略）不会触碰任何交换机。

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::installer::TableInstaller;
use super::source::TopologySource;
use crate::error::{ControllerError, InstallError, RouteError};
use crate::routing::{RoutingTable, UplinkSelector, derive_table};
use crate::topo::TopologyShape;

pub const DMAC_TABLE: &str = "dmac";
pub const FORWARD_ACTION: &str = "forward";
pub const DROP_ACTION: &str = "drop";

/// 交换机名称无法解码时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnInvalid {
    /// 整体失败
    #[default]
    Abort,
    /// 跳过该交换机，继续处理其余交换机
    Skip,
}

/// 推导阶段的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedTables {
    pub tables: Vec<RoutingTable>,
    pub skipped: Vec<String>,
}

/// 一次运行的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
    pub entries: usize,
}

#[derive(Debug, Clone)]
pub struct RoutingController {
    shape: TopologyShape,
    uplinks: UplinkSelector,
    on_invalid: OnInvalid,
}

impl RoutingController {
    pub fn new(shape: TopologyShape) -> Result<Self, RouteError> {
        Ok(Self {
            shape: shape.validate()?,
            uplinks: UplinkSelector::default(),
            on_invalid: OnInvalid::default(),
        })
    }

    /// 以拓扑来源给出的形状构造
    pub fn for_source(source: &dyn TopologySource) -> Result<Self, ControllerError> {
        Ok(Self::new(source.shape()?)?)
    }

    pub fn with_uplinks(mut self, uplinks: UplinkSelector) -> Self {
        self.uplinks = uplinks;
        self
    }

    pub fn with_on_invalid(mut self, on_invalid: OnInvalid) -> Self {
        self.on_invalid = on_invalid;
        self
    }

    pub fn shape(&self) -> TopologyShape {
        self.shape
    }

    /// 为每台交换机推导路由表（纯计算）
    pub fn derive_all<S: AsRef<str>>(&self, switches: &[S]) -> Result<DerivedTables, RouteError> {
        let mut out = DerivedTables::default();
        for name in switches {
            let name = name.as_ref();
            match derive_table(self.shape, name, &self.uplinks) {
                Ok(table) => out.tables.push(table),
                Err(err @ RouteError::InvalidIdentity { .. }) if self.on_invalid == OnInvalid::Skip => {
                    warn!(switch = name, %err, "跳过无法识别的交换机");
                    out.skipped.push(name.to_string());
                }
                Err(err) => return Err(err),
            }
        }
        Ok(out)
    }

    /// 通过对应的句柄下发已推导的路由表
    pub fn install_all<I: TableInstaller>(
        &self,
        derived: &DerivedTables,
        installers: &mut BTreeMap<String, I>,
    ) -> Result<RunSummary, ControllerError> {
        let mut summary = RunSummary {
            skipped: derived.skipped.clone(),
            ..RunSummary::default()
        };
        for table in &derived.tables {
            let installer = installers
                .get_mut(&table.switch)
                .ok_or_else(|| ControllerError::NoInstaller(table.switch.clone()))?;
            install_table(installer, table).map_err(|source| ControllerError::Install {
                switch: table.switch.clone(),
                source,
            })?;
            summary.installed.push(table.switch.clone());
            summary.entries += table.len();
        }
        Ok(summary)
    }

    /// 完整流程：枚举交换机、推导、建立句柄、下发。返回汇总与全部句柄。
    #[tracing::instrument(skip(self, source, connect), fields(shape = ?self.shape))]
    pub fn run<I, F>(
        &self,
        source: &dyn TopologySource,
        mut connect: F,
    ) -> Result<(RunSummary, BTreeMap<String, I>), ControllerError>
    where
        I: TableInstaller,
        F: FnMut(&str) -> Result<I, InstallError>,
    {
        let switches = source.switch_names();
        info!(switches = switches.len(), "开始推导路由表");
        let derived = self.derive_all(&switches)?;

        let mut installers = BTreeMap::new();
        for table in &derived.tables {
            let installer = connect(&table.switch).map_err(|source| ControllerError::Install {
                switch: table.switch.clone(),
                source,
            })?;
            installers.insert(table.switch.clone(), installer);
        }

        let summary = self.install_all(&derived, &mut installers)?;
        info!(
            installed = summary.installed.len(),
            skipped = summary.skipped.len(),
            entries = summary.entries,
            "✅ 路由表下发完成"
        );
        Ok((summary, installers))
    }
}

/// 向单台交换机下发一张路由表
pub fn install_table<I: TableInstaller + ?Sized>(
    installer: &mut I,
    table: &RoutingTable,
) -> Result<(), InstallError> {
    debug!(switch = installer.switch(), entries = table.len(), "下发路由表");
    installer.reset_state()?;
    installer.table_set_default(DMAC_TABLE, DROP_ACTION, &[])?;
    for entry in &table.entries {
        installer.table_add(
            DMAC_TABLE,
            FORWARD_ACTION,
            &[entry.dst.to_string()],
            &[entry.port.to_string()],
        )?;
    }
    Ok(())
}
