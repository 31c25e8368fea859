//! # Teleop CLI
//!
//! 平面机器人遥操作命令行工具。
//!
//! ```bash
//! # 连接手柄，向执行器发送步数并把画面写入 PNG
//! teleop-cli run --dest 192.168.1.75:12345
//!
//! # 无硬件演示：脚本输入，只打印负载
//! teleop-cli run --demo --dry-run --max-frames 200
//!
//! # 离线工具
//! teleop-cli fk --degrees 30 45
//! teleop-cli render --output robot.png 0.5 -0.25
//! teleop-cli listen --bind 0.0.0.0:12345
//! teleop-cli config init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;

use commands::{ConfigCommand, FkCommand, ListenCommand, RenderCommand, RunCommand};

/// 默认日志过滤（`RUST_LOG` 未设置时）
const DEFAULT_LOG_FILTER: &str = "teleop_cli=info,teleop_control=info";

/// Teleop CLI - 平面机器人遥操作工具
#[derive(Parser, Debug)]
#[command(name = "teleop-cli")]
#[command(about = "Game-controller teleoperation for 1R/2R planar robots", long_about = None)]
#[command(version)]
struct Cli {
    /// 配置文件（默认位于系统配置目录）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 运行遥操作会话
    Run {
        #[command(flatten)]
        args: RunCommand,
    },

    /// 打印给定关节角的变换链
    Fk {
        #[command(flatten)]
        args: FkCommand,
    },

    /// 把给定关节角渲染为 PNG
    Render {
        #[command(flatten)]
        args: RenderCommand,
    },

    /// 接收并打印命令数据报（代替远端执行器）
    Listen {
        #[command(flatten)]
        args: ListenCommand,
    },

    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    // 初始化日志（写到 stderr，stdout 留给命令输出）
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run { args } => args.execute(config_path),
        Commands::Fk { args } => args.execute(config_path),
        Commands::Render { args } => args.execute(config_path),
        Commands::Listen { args } => args.execute(),
        Commands::Config(cmd) => cmd.execute(config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["teleop-cli", "fk", "--config", "/tmp/t.toml", "0"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/t.toml")));
        assert!(matches!(cli.command, Commands::Fk { .. }));
    }
}
