//! 拓扑描述生成
//!
//! 生成二叉树或 fat-tree 的 p4app JSON 描述，写入文件或标准输出。

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::info;
use treefib_rs::error::TopologyError;
use treefib_rs::net::Network;
use treefib_rs::topo::binary_tree::{BinaryTreeOpts, build_binary_tree};
use treefib_rs::topo::fat_tree::{FatTreeOpts, build_fat_tree};
use treefib_rs::topo::{BinaryTreeShape, FatTreeShape, P4AppConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Binary,
    FatTree,
}

#[derive(Debug, Parser)]
#[command(name = "gen-topo", about = "生成二叉树 / fat-tree 拓扑描述（p4app JSON）")]
struct Args {
    #[arg(long, value_enum, default_value_t = Kind::Binary)]
    kind: Kind,
    /// 二叉树交换机层数（4、5、6、7）
    #[arg(long, default_value_t = 4)]
    layers: u32,
    /// fat-tree 参数 k（4、6、8）
    #[arg(long, default_value_t = 4)]
    k: u32,
    /// 二叉树根交换机链路带宽
    #[arg(long, default_value_t = 2.0)]
    root_bw: f64,
    /// 其余链路带宽
    #[arg(long, default_value_t = 1.0)]
    link_bw: f64,
    /// P4 程序路径
    #[arg(long)]
    p4_src: Option<String>,
    /// 输出文件；缺省时写到标准输出
    #[arg(long)]
    out: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), TopologyError> {
    let mut net = Network::default();
    match args.kind {
        Kind::Binary => {
            let opts = BinaryTreeOpts {
                shape: BinaryTreeShape::new(args.layers)?,
                root_bw: args.root_bw,
                link_bw: args.link_bw,
            };
            info!(layers = args.layers, "There are {} layers in the Binary topology", args.layers);
            build_binary_tree(&mut net, &opts);
        }
        Kind::FatTree => {
            let opts = FatTreeOpts {
                shape: FatTreeShape::new(args.k)?,
                link_bw: args.link_bw,
            };
            info!(k = args.k, "We have K={} in the FatTree topology", args.k);
            build_fat_tree(&mut net, &opts);
        }
    }

    let mut cfg = P4AppConfig::from_network(&net);
    if let Some(src) = &args.p4_src {
        cfg.p4_src = src.clone();
    }
    info!(
        hosts = cfg.topology.hosts.len(),
        switches = cfg.topology.switches.len(),
        links = cfg.topology.links.len(),
        "拓扑生成完成"
    );

    match &args.out {
        Some(path) => cfg.save(path)?,
        None => println!("{}", serde_json::to_string_pretty(&cfg)?),
    }
    Ok(())
}

fn main() {
    // 初始化 tracing（日志写到 stderr，stdout 留给 JSON）
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
        eprintln!("gen-topo: {err}");
        process::exit(1);
    }
}
