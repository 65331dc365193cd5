//! 路由表
//!
//! 一台交换机的完整转发快照：每个目的主机恰好一条 `(目的 MAC, 出端口)`。

use std::collections::HashSet;

use crate::error::RouteError;
use crate::net::{HostId, MacAddr, host_mac};

/// 单条转发表项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutingEntry {
    pub host: HostId,
    pub dst: MacAddr,
    pub port: u16,
}

impl RoutingEntry {
    pub fn new(host: HostId, port: u16) -> Self {
        Self {
            host,
            dst: host_mac(host),
            port,
        }
    }
}

/// 某台交换机的路由表，表项按主机 id 升序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    pub switch: String,
    pub entries: Vec<RoutingEntry>,
}

impl RoutingTable {
    /// 对 `[0, host_num)` 的每个主机下标求出端口
    pub(crate) fn collect(
        switch: &str,
        host_num: usize,
        mut out_port: impl FnMut(usize) -> u16,
    ) -> Self {
        let entries = (0..host_num)
            .map(|i| RoutingEntry::new(HostId::from_index(i), out_port(i)))
            .collect();
        Self {
            switch: switch.to_string(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 目的主机对应的出端口
    pub fn port_for(&self, host: HostId) -> Option<u16> {
        self.entries
            .iter()
            .find(|e| e.host == host)
            .map(|e| e.port)
    }

    /// 检查表项恰好覆盖 `[1, host_num]` 的每个主机各一次
    pub fn verify_coverage(&self, host_num: usize) -> Result<(), RouteError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        let covered = self
            .entries
            .iter()
            .filter(|e| (1..=host_num).contains(&(e.host.0 as usize)) && e.dst == host_mac(e.host))
            .filter(|e| seen.insert(e.host))
            .count();
        if covered != host_num || self.entries.len() != host_num {
            return Err(RouteError::IncompleteCoverage {
                switch: self.switch.clone(),
                expected: host_num,
                got: covered,
            });
        }
        Ok(())
    }
}
