//! 平面 1R / 2R 机器人模型
//!
//! 所有关节绕 Z 轴旋转，零位构型时连杆沿 +X 方向排布：
//!
//! - 1R：关节 1 位于基座；坐标系 = [关节 1, 末端]
//! - 2R：关节 2 位于 `(L1, 0, 0)`；坐标系 = [关节 1, 关节 2, 末端]

use crate::chain::SerialChain;
use crate::error::KinematicsError;
use crate::screw::ScrewAxis;
use crate::transform::{Transform, TransformChain};
use crate::units::Rad;
use std::fmt;

/// 平面模型类型
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanarModel {
    /// 单连杆
    OneLink { length: f64 },
    /// 双连杆
    TwoLink { l1: f64, l2: f64 },
}

/// 平面机器人：模型参数 + 预先构造好的串联链
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarRobot {
    model: PlanarModel,
    chain: SerialChain,
}

impl PlanarRobot {
    /// 单连杆机器人
    pub fn one_link(length: f64) -> Result<Self, KinematicsError> {
        check_length(0, length)?;

        let chain = SerialChain::new(vec![ScrewAxis::planar_revolute(0.0, 0.0)])
            .with_frame(Transform::identity(), 1)
            .with_frame(Transform::from_translation(length, 0.0, 0.0), 1);

        Ok(PlanarRobot {
            model: PlanarModel::OneLink { length },
            chain,
        })
    }

    /// 双连杆机器人
    pub fn two_link(l1: f64, l2: f64) -> Result<Self, KinematicsError> {
        check_length(0, l1)?;
        check_length(1, l2)?;

        let chain = SerialChain::new(vec![
            ScrewAxis::planar_revolute(0.0, 0.0),
            ScrewAxis::planar_revolute(l1, 0.0),
        ])
        .with_frame(Transform::identity(), 1)
        .with_frame(Transform::from_translation(l1, 0.0, 0.0), 1)
        .with_frame(Transform::from_translation(l1 + l2, 0.0, 0.0), 2);

        Ok(PlanarRobot {
            model: PlanarModel::TwoLink { l1, l2 },
            chain,
        })
    }

    /// 按连杆数量选择模型
    pub fn from_link_lengths(lengths: &[f64]) -> Result<Self, KinematicsError> {
        match *lengths {
            [length] => Self::one_link(length),
            [l1, l2] => Self::two_link(l1, l2),
            _ => Err(KinematicsError::UnsupportedDof(lengths.len())),
        }
    }

    pub fn model(&self) -> PlanarModel {
        self.model
    }

    pub fn chain(&self) -> &SerialChain {
        &self.chain
    }

    /// 自由度
    pub fn dof(&self) -> usize {
        self.chain.dof()
    }

    /// 连杆长度
    pub fn link_lengths(&self) -> Vec<f64> {
        match self.model {
            PlanarModel::OneLink { length } => vec![length],
            PlanarModel::TwoLink { l1, l2 } => vec![l1, l2],
        }
    }

    /// 最大工作半径
    pub fn reach(&self) -> f64 {
        self.link_lengths().iter().sum()
    }

    /// 正运动学
    ///
    /// # Panics
    ///
    /// `thetas.len() != self.dof()` 时 panic。
    pub fn forward_kinematics(&self, thetas: &[Rad]) -> TransformChain {
        self.chain.forward_kinematics(thetas)
    }
}

impl fmt::Display for PlanarRobot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model {
            PlanarModel::OneLink { length } => write!(f, "1R(L={length})"),
            PlanarModel::TwoLink { l1, l2 } => write!(f, "2R(L1={l1}, L2={l2})"),
        }
    }
}

fn check_length(index: usize, value: f64) -> Result<(), KinematicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::InvalidLinkLength { index, value })
    }
}
