//! 路由控制器
//!
//! 读取拓扑描述，为每台交换机推导 `dmac` 转发表，并生成 `simple_switch_CLI`
//! 命令脚本（每台交换机一个 `<name>.txt`，或全部打印到标准输出）。

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::info;
use treefib_rs::ctrl::{
    CliScriptInstaller, JsonTopologySource, OnInvalid, RoutingController, TopologySource,
};
use treefib_rs::error::{ControllerError, TopologyError};
use treefib_rs::routing::{UplinkPolicy, UplinkSelector};
use treefib_rs::topo::TopologyShape;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Uplink {
    Modulo,
    Hash,
}

#[derive(Debug, Parser)]
#[command(name = "route-ctrl", about = "为二叉树 / fat-tree 拓扑推导并下发静态转发表")]
struct Args {
    /// 拓扑描述文件
    #[arg(long, default_value = "topology.json")]
    topology: PathBuf,
    /// 指定二叉树层数，而不是从交换机名称推断
    #[arg(long, conflicts_with = "k")]
    layers: Option<u32>,
    /// 指定 fat-tree 参数 k，而不是从交换机名称推断
    #[arg(long)]
    k: Option<u32>,
    /// fat-tree 上行口选择策略
    #[arg(long, value_enum, default_value_t = Uplink::Modulo)]
    uplink: Uplink,
    /// hash 策略使用的盐
    #[arg(long, default_value_t = 0)]
    hash_salt: u64,
    /// 跳过名称无法识别的交换机（默认直接失败）
    #[arg(long, default_value_t = false)]
    skip_invalid: bool,
    /// 命令脚本输出目录；缺省时打印到标准输出
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), ControllerError> {
    let mut source = JsonTopologySource::load(&args.topology)?;
    if let Some(layers) = args.layers {
        source = source.with_shape(TopologyShape::BinaryTree { layers });
    } else if let Some(k) = args.k {
        source = source.with_shape(TopologyShape::FatTree { k });
    }

    let policy = match args.uplink {
        Uplink::Modulo => UplinkPolicy::DestinationModulo,
        Uplink::Hash => UplinkPolicy::DestinationHash,
    };
    let on_invalid = if args.skip_invalid {
        OnInvalid::Skip
    } else {
        OnInvalid::Abort
    };
    let controller = RoutingController::for_source(&source)?
        .with_uplinks(UplinkSelector::new(policy, args.hash_salt))
        .with_on_invalid(on_invalid);
    info!(
        shape = ?controller.shape(),
        switches = source.switch_names().len(),
        p4_src = %source.config().p4_src,
        "加载拓扑"
    );

    let (summary, installers) =
        controller.run(&source, |switch| Ok(CliScriptInstaller::new(switch, Vec::new())))?;

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir).map_err(TopologyError::from)?;
    }
    for (switch, installer) in installers {
        let script = installer.into_inner();
        match &args.out_dir {
            Some(dir) => {
                let path = dir.join(format!("{switch}.txt"));
                fs::write(&path, &script).map_err(TopologyError::from)?;
            }
            None => {
                println!("# {switch}");
                print!("{}", String::from_utf8_lossy(&script));
            }
        }
    }

    println!(
        "done, installed={}, skipped={}, entries={}",
        summary.installed.len(),
        summary.skipped.len(),
        summary.entries
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("route-ctrl: {err}");
        process::exit(1);
    }
}
