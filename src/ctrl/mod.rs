//! 控制器：拓扑来源、表项下发与编排

mod controller;
mod installer;
mod source;

pub use controller::{
    DMAC_TABLE, DROP_ACTION, DerivedTables, FORWARD_ACTION, OnInvalid, RoutingController,
    RunSummary, install_table,
};
pub use installer::{
    CliScriptInstaller, InstallCommand, RecordingInstaller, TableInstaller, TableSchema,
};
pub use source::{JsonTopologySource, ShapeSource, TopologySource, infer_shape};
