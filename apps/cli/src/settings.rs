//! 配置加载与命令行覆盖

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use teleop_control::{ControlMode, RobotModelKind, TeleopConfig};
use teleop_kinematics::{PlanarRobot, Rad};

/// 配置文件路径：显式指定优先，否则使用默认位置
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => TeleopConfig::default_path().context("cannot determine the config directory"),
    }
}

/// 加载配置
///
/// 显式指定的文件必须存在；默认位置不存在时使用默认配置。
pub fn load_config(explicit: Option<&Path>) -> Result<TeleopConfig> {
    match explicit {
        Some(path) => TeleopConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => match TeleopConfig::default_path() {
            Some(path) => TeleopConfig::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display())),
            None => Ok(TeleopConfig::default()),
        },
    }
}

/// `--mode` 取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Stepper,
    Power,
}

impl From<ModeArg> for ControlMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Stepper => ControlMode::Stepper,
            ModeArg::Power => ControlMode::Power,
        }
    }
}

/// 用 `--links` 覆盖机器人模型
///
/// 连杆数改变时初始角重置为 0。
pub fn override_links(config: &mut TeleopConfig, links: &[f64]) -> Result<()> {
    let model = match links.len() {
        1 => RobotModelKind::OneLink,
        2 => RobotModelKind::TwoLink,
        n => bail!("--links takes 1 or 2 lengths, got {n}"),
    };
    if config.robot.initial_angles.len() != links.len() {
        config.robot.initial_angles = vec![0.0; links.len()];
    }
    config.robot.model = model;
    config.robot.link_lengths = links.to_vec();
    Ok(())
}

/// 解析离线工具的关节角参数
///
/// 角度个数决定模型（1 或 2 个），连杆长度取 `--links` 或配置。
pub fn robot_and_angles(
    config: &TeleopConfig,
    links: Option<&[f64]>,
    angles: &[f64],
    degrees: bool,
) -> Result<(PlanarRobot, Vec<Rad>)> {
    let lengths: Vec<f64> = match links {
        Some(links) => links.to_vec(),
        None if config.robot.link_lengths.len() == angles.len() => {
            config.robot.link_lengths.clone()
        },
        None => vec![1.0; angles.len()],
    };
    if lengths.len() != angles.len() {
        bail!(
            "{} joint angles given for {} links",
            angles.len(),
            lengths.len()
        );
    }

    let robot = PlanarRobot::from_link_lengths(&lengths)?;
    let angles = angles
        .iter()
        .map(|&a| if degrees { Rad(a.to_radians()) } else { Rad(a) })
        .collect();
    Ok((robot, angles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_links() {
        let mut config = TeleopConfig::default();
        override_links(&mut config, &[1.5]).unwrap();
        assert_eq!(config.robot.model, RobotModelKind::OneLink);
        assert_eq!(config.robot.initial_angles, vec![0.0]);
        config.validate().unwrap();

        assert!(override_links(&mut config, &[1.0, 1.0, 1.0]).is_err());
    }

    #[test]
    fn test_robot_and_angles() {
        let config = TeleopConfig::default();
        let (robot, angles) = robot_and_angles(&config, None, &[90.0], true).unwrap();
        assert_eq!(robot.dof(), 1);
        assert!((angles[0].0 - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let (robot, _) = robot_and_angles(&config, None, &[0.0, 0.0], false).unwrap();
        assert_eq!(robot.link_lengths(), vec![1.0, 1.0]);

        assert!(robot_and_angles(&config, Some(&[1.0]), &[0.0, 0.0], false).is_err());
        assert!(robot_and_angles(&config, None, &[0.0, 0.0, 0.0], false).is_err());
    }
}
