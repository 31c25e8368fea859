//! fk 命令
//!
//! 打印给定关节角下每个坐标系的齐次变换。

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::Path;
use teleop_kinematics::{PlanarRobot, Rad, TransformChain};

use crate::settings::{load_config, robot_and_angles};

/// 正运动学参数
#[derive(Args, Debug)]
pub struct FkCommand {
    /// 关节角（1 或 2 个，默认弧度）
    #[arg(required = true, num_args = 1..=2, allow_negative_numbers = true)]
    pub angles: Vec<f64>,

    /// 关节角以度为单位
    #[arg(long)]
    pub degrees: bool,

    /// 连杆长度（逗号分隔，默认取配置）
    #[arg(long, value_delimiter = ',')]
    pub links: Option<Vec<f64>>,

    /// 输出 JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct FkReport {
    model: String,
    angles: Vec<Rad>,
    frames: Vec<[[f64; 4]; 4]>,
    end_effector: [f64; 3],
}

impl FkReport {
    fn new(robot: &PlanarRobot, angles: Vec<Rad>, chain: &TransformChain) -> Self {
        let end_effector = chain
            .end_effector()
            .map(|t| {
                let p = t.translation();
                [p.x, p.y, p.z]
            })
            .unwrap_or_default();
        FkReport {
            model: robot.to_string(),
            angles,
            frames: chain.iter().map(|t| t.to_rows()).collect(),
            end_effector,
        }
    }
}

impl FkCommand {
    pub fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let config = load_config(config_path)?;
        let (robot, angles) =
            robot_and_angles(&config, self.links.as_deref(), &self.angles, self.degrees)?;
        let chain = robot.forward_kinematics(&angles);

        if self.json {
            let report = FkReport::new(&robot, angles, &chain);
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("{}", robot);
        for (i, angle) in angles.iter().enumerate() {
            println!("  θ{} = {} ({})", i + 1, angle, angle.to_deg());
        }
        for (i, frame) in chain.iter().enumerate() {
            let label = if i + 1 == chain.len() {
                "end effector".to_string()
            } else {
                format!("joint {}", i + 1)
            };
            println!("\nT{} ({}):", i, label);
            println!("{}", frame);
        }
        Ok(())
    }
}
