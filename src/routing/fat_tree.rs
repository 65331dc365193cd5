//! Fat-tree 路由推导
//!
//! 主机下标 `dst` 对应的位置：pod = `dst / (k/2)^2`，ToR = `(dst / (k/2)) % (k/2)`，
//! ToR 上的槽位 = `dst % (k/2)`。下行方向只有唯一路径；上行方向有 `k/2` 个
//! 等价端口，由 [`UplinkSelector`] 按目的主机挑选。

use tracing::{debug, trace};

use super::ecmp::{UplinkSelector, UplinkTier};
use super::table::RoutingTable;
use crate::error::RouteError;
use crate::topo::{FatTreeCoord, FatTreeShape};

/// 交换机 `coord` 转发目的主机 `dst`（从 0 开始）时的出端口
pub fn out_port(
    shape: FatTreeShape,
    coord: FatTreeCoord,
    dst: usize,
    uplinks: &UplinkSelector,
) -> u16 {
    let half = shape.half();
    let dst_pod = dst / (half * half);
    let dst_edge = (dst / half) % half;
    let dst_slot = dst % half;

    let port = match coord {
        FatTreeCoord::Edge { pod, index } => {
            if dst_pod == pod && dst_edge == index {
                dst_slot + 1
            } else {
                half + 1 + uplinks.pick(UplinkTier::Edge, dst, half)
            }
        }
        FatTreeCoord::Aggregation { pod, .. } => {
            if dst_pod == pod {
                dst_edge + 1
            } else {
                half + 1 + uplinks.pick(UplinkTier::Aggregation, dst, half)
            }
        }
        FatTreeCoord::Core { .. } => dst_pod + 1,
    };
    port as u16
}

/// 按 k 和交换机名称推导 fat-tree 路由表（默认上行策略）
pub fn derive_fat_tree_table(k: u32, switch: &str) -> Result<RoutingTable, RouteError> {
    derive_fat_tree_table_with(k, switch, &UplinkSelector::default())
}

pub fn derive_fat_tree_table_with(
    k: u32,
    switch: &str,
    uplinks: &UplinkSelector,
) -> Result<RoutingTable, RouteError> {
    let shape = FatTreeShape::new(k)?;
    let coord = shape.decode(switch)?;
    derive_for(shape, coord, switch, uplinks)
}

pub(crate) fn derive_for(
    shape: FatTreeShape,
    coord: FatTreeCoord,
    switch: &str,
    uplinks: &UplinkSelector,
) -> Result<RoutingTable, RouteError> {
    debug!(switch, ?coord, policy = ?uplinks.policy(), "推导 fat-tree 路由表");
    let host_num = shape.host_num();
    let table = RoutingTable::collect(switch, host_num, |dst| {
        let port = out_port(shape, coord, dst, uplinks);
        trace!(dst, port, "表项");
        port
    });
    table.verify_coverage(host_num)?;
    Ok(table)
}
