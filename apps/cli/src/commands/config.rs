//! 配置管理命令

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use std::path::Path;
use teleop_control::TeleopConfig;

use crate::settings::{config_path, load_config};

/// 配置命令
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// 写入默认配置文件
    Init {
        /// 覆盖已有文件
        #[arg(long)]
        force: bool,
    },

    /// 打印生效的配置
    Show,

    /// 打印配置文件路径
    Path,
}

impl ConfigCommand {
    pub fn execute(self, explicit: Option<&Path>) -> Result<()> {
        match self {
            ConfigCommand::Init { force } => Self::init_(explicit, force),
            ConfigCommand::Show => Self::show_(explicit),
            ConfigCommand::Path => Self::path_(explicit),
        }
    }

    fn init_(explicit: Option<&Path>, force: bool) -> Result<()> {
        let path = config_path(explicit)?;
        if path.exists() && !force {
            bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        TeleopConfig::default()
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
        Ok(())
    }

    fn show_(explicit: Option<&Path>) -> Result<()> {
        let config = load_config(explicit)?;
        print!("{}", config.to_toml_string()?);
        Ok(())
    }

    fn path_(explicit: Option<&Path>) -> Result<()> {
        let path = config_path(explicit)?;
        let state = if path.exists() { "" } else { " (not created)" };
        println!("{}{}", path.display(), state);
        Ok(())
    }
}
