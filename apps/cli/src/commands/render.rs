//! render 命令
//!
//! 把给定关节角渲染为一张 PNG，样式与运行时画面一致。

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use teleop_render::{FrameSink, PngSink, RobotRenderer};

use crate::settings::{load_config, robot_and_angles};

/// 渲染参数
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// 关节角（1 或 2 个，默认弧度）
    #[arg(required = true, num_args = 1..=2, allow_negative_numbers = true)]
    pub angles: Vec<f64>,

    /// 关节角以度为单位
    #[arg(long)]
    pub degrees: bool,

    /// 连杆长度（逗号分隔，默认取配置）
    #[arg(long, value_delimiter = ',')]
    pub links: Option<Vec<f64>>,

    /// 输出文件
    #[arg(short, long, default_value = "robot.png")]
    pub output: PathBuf,

    /// 叠加坐标轴
    #[arg(long)]
    pub axes: bool,
}

impl RenderCommand {
    pub fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let mut config = load_config(config_path)?;
        if self.axes {
            config.render.show_axes = true;
        }

        let (robot, angles) =
            robot_and_angles(&config, self.links.as_deref(), &self.angles, self.degrees)?;

        let mut renderer = RobotRenderer::new(config.render.viewport()?);
        if let Some(axes) = config.render.axes() {
            renderer = renderer.with_axes(axes);
        }
        let frame = renderer.render(&robot.forward_kinematics(&angles));

        PngSink::new(&self.output)
            .present(&frame)
            .with_context(|| format!("failed to write {}", self.output.display()))?;
        println!("{} -> {}", robot, self.output.display());
        Ok(())
    }
}
