//! 二叉树路由推导
//!
//! 端口约定：非根交换机 1 上行、2 左子树、3 右子树；根没有上行口，1 左 2 右。

use tracing::{debug, trace};

use super::table::RoutingTable;
use crate::error::RouteError;
use crate::topo::{BinaryCoord, BinaryTreeShape};

/// 交换机 `coord` 转发目的主机 `dst`（从 0 开始）时的出端口
pub fn out_port(shape: BinaryTreeShape, coord: BinaryCoord, dst: usize) -> u16 {
    let host_num = shape.host_num();
    if coord.layer == 0 {
        return (dst / (host_num / 2)) as u16 + 1;
    }

    // 本层单棵子树下的主机数，axis 为左右子树在全局主机编号上的分界
    let interval = host_num >> (coord.layer + 1);
    let axis = 2 * coord.ordinal * interval + interval;
    if (axis - interval..axis).contains(&dst) {
        2
    } else if (axis..axis + interval).contains(&dst) {
        3
    } else {
        1
    }
}

/// 按层数和交换机名称推导二叉树路由表
pub fn derive_binary_tree_table(layers: u32, switch: &str) -> Result<RoutingTable, RouteError> {
    let shape = BinaryTreeShape::new(layers)?;
    let coord = shape.decode(switch)?;
    derive_for(shape, coord, switch)
}

pub(crate) fn derive_for(
    shape: BinaryTreeShape,
    coord: BinaryCoord,
    switch: &str,
) -> Result<RoutingTable, RouteError> {
    debug!(switch, layer = coord.layer, ordinal = coord.ordinal, "推导二叉树路由表");
    let host_num = shape.host_num();
    let table = RoutingTable::collect(switch, host_num, |dst| {
        let port = out_port(shape, coord, dst);
        trace!(dst, port, "表项");
        port
    });
    table.verify_coverage(host_num)?;
    Ok(table)
}
