//! 仿真器拓扑描述文件（p4app JSON）
//!
//! ```json
//! {
//!   "p4_src": "p4src/l2fwd.p4",
//!   "topology": {
//!     "assignment_strategy": "l2",
//!     "links": [["a1", "b1", {"bw": 2}], ...],
//!     "hosts": {"h1": {}, ...},
//!     "switches": {"a1": {}, ...}
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{debug, info};

use crate::error::TopologyError;
use crate::net::{Network, NodeKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct P4AppConfig {
    #[serde(default = "default_p4_src")]
    pub p4_src: String,
    #[serde(default = "default_true")]
    pub cli: bool,
    #[serde(default = "default_true")]
    pub pcap_dump: bool,
    #[serde(default = "default_true")]
    pub enable_log: bool,
    pub topology: TopologySpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySpec {
    #[serde(default = "default_assignment_strategy")]
    pub assignment_strategy: String,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
    #[serde(default)]
    pub hosts: Map<String, Value>,
    #[serde(default)]
    pub switches: Map<String, Value>,
}

/// `[a, b, {"bw": ...}]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec(pub String, pub String, pub LinkOpts);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkOpts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bw: Option<Number>,
    /// 其余仿真器参数（delay、loss 等）原样保留
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_p4_src() -> String {
    "p4src/l2fwd.p4".to_string()
}

fn default_true() -> bool {
    true
}

fn default_assignment_strategy() -> String {
    "l2".to_string()
}

fn bw_number(bw: f64) -> Option<Number> {
    if bw.fract() == 0.0 && bw >= 0.0 {
        Some(Number::from(bw as u64))
    } else {
        Number::from_f64(bw)
    }
}

impl P4AppConfig {
    /// 由拓扑图生成描述；hosts / switches 按节点加入顺序输出
    pub fn from_network(net: &Network) -> Self {
        let names = |kind: NodeKind| -> Map<String, Value> {
            net.nodes()
                .iter()
                .filter(|n| n.kind == kind)
                .map(|n| (n.name.clone(), Value::Object(Map::new())))
                .collect()
        };
        let links = net
            .links()
            .iter()
            .map(|l| {
                LinkSpec(
                    net.node(l.a).name.clone(),
                    net.node(l.b).name.clone(),
                    LinkOpts {
                        bw: bw_number(l.bw),
                        extra: Map::new(),
                    },
                )
            })
            .collect();

        Self {
            p4_src: default_p4_src(),
            cli: true,
            pcap_dump: true,
            enable_log: true,
            topology: TopologySpec {
                assignment_strategy: default_assignment_strategy(),
                links,
                hosts: names(NodeKind::Host),
                switches: names(NodeKind::Switch),
            },
        }
    }

    /// 还原拓扑图；端口按 links 数组顺序重新分配
    pub fn to_network(&self) -> Result<Network, TopologyError> {
        let mut net = Network::default();
        for name in self.topology.hosts.keys() {
            net.add_host(name.clone());
        }
        for name in self.topology.switches.keys() {
            net.add_switch(name.clone());
        }
        for LinkSpec(a, b, opts) in &self.topology.links {
            let a = net
                .node_id(a)
                .ok_or_else(|| TopologyError::UnknownNode(a.clone()))?;
            let b = net
                .node_id(b)
                .ok_or_else(|| TopologyError::UnknownNode(b.clone()))?;
            let bw = opts.bw.as_ref().and_then(Number::as_f64).unwrap_or(0.0);
            net.connect(a, b, bw);
        }
        debug!(
            hosts = self.topology.hosts.len(),
            switches = self.topology.switches.len(),
            links = self.topology.links.len(),
            "拓扑描述已还原"
        );
        Ok(net)
    }

    pub fn load(path: &Path) -> Result<Self, TopologyError> {
        let raw = fs::read_to_string(path)?;
        let cfg = serde_json::from_str(&raw)?;
        info!(path = %path.display(), "读取拓扑描述");
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<(), TopologyError> {
        let mut raw = serde_json::to_string_pretty(self)?;
        raw.push('\n');
        fs::write(path, raw)?;
        info!(path = %path.display(), "写出拓扑描述");
        Ok(())
    }
}
