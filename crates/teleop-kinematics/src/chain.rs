//! 指数积（Product of Exponentials）正运动学
//!
//! 空间形式：
//!
//! ```text
//! T(θ) = e^{[S1]θ1} · e^{[S2]θ2} · ... · e^{[Sn]θn} · M
//! ```
//!
//! 其中 `M` 为零位（home）构型下的坐标系位姿，`Si` 为基座坐标系下的螺旋轴。

use crate::screw::ScrewAxis;
use crate::transform::{Transform, TransformChain};
use crate::units::Rad;
use nalgebra::Matrix4;

/// 空间形式正运动学
///
/// # Panics
///
/// `screws.len() != thetas.len()` 时 panic（前置条件违反，不是可恢复错误）。
pub fn fkin_space(home: &Transform, screws: &[ScrewAxis], thetas: &[Rad]) -> Transform {
    assert_eq!(
        screws.len(),
        thetas.len(),
        "joint angle count must match screw axis count"
    );

    let product = screws
        .iter()
        .zip(thetas)
        .fold(Matrix4::identity(), |acc, (screw, &theta)| acc * screw.exp(theta));

    Transform::from_matrix(product * home.matrix())
}

/// 链中一个坐标系的定义
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    /// 零位构型下的位姿
    pub home: Transform,
    /// 影响该坐标系的前导关节数
    pub driven_by: usize,
}

/// 串联链：一组螺旋轴 + 一组坐标系
#[derive(Debug, Clone, PartialEq)]
pub struct SerialChain {
    screws: Vec<ScrewAxis>,
    frames: Vec<FrameSpec>,
}

impl SerialChain {
    /// 创建只有螺旋轴、尚无坐标系的链
    pub fn new(screws: Vec<ScrewAxis>) -> Self {
        SerialChain {
            screws,
            frames: Vec::new(),
        }
    }

    /// 追加一个坐标系（由前 `driven_by` 个关节驱动）
    ///
    /// # Panics
    ///
    /// `driven_by` 超过螺旋轴数量时 panic。
    pub fn with_frame(mut self, home: Transform, driven_by: usize) -> Self {
        assert!(
            driven_by <= self.screws.len(),
            "frame driven by {driven_by} joints but chain has {}",
            self.screws.len()
        );
        self.frames.push(FrameSpec { home, driven_by });
        self
    }

    /// 自由度（螺旋轴数量）
    pub fn dof(&self) -> usize {
        self.screws.len()
    }

    pub fn screws(&self) -> &[ScrewAxis] {
        &self.screws
    }

    pub fn frames(&self) -> &[FrameSpec] {
        &self.frames
    }

    /// 计算整条变换链
    ///
    /// 纯函数：相同输入得到相同输出，不修改任何状态。
    ///
    /// # Panics
    ///
    /// `thetas.len() != self.dof()` 时 panic。
    pub fn forward_kinematics(&self, thetas: &[Rad]) -> TransformChain {
        assert_eq!(
            thetas.len(),
            self.dof(),
            "expected {} joint angles, got {}",
            self.dof(),
            thetas.len()
        );

        let frames = self
            .frames
            .iter()
            .map(|frame| {
                let n = frame.driven_by;
                fkin_space(&frame.home, &self.screws[..n], &thetas[..n])
            })
            .collect();

        TransformChain::new(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_fkin_space_no_joints_returns_home() {
        let home = Transform::from_translation(1.0, 2.0, 0.0);
        assert_eq!(fkin_space(&home, &[], &[]), home);
    }

    #[test]
    fn test_fkin_space_single_revolute() {
        let home = Transform::from_translation(1.0, 0.0, 0.0);
        let s = [ScrewAxis::planar_revolute(0.0, 0.0)];
        let t = fkin_space(&home, &s, &[Rad::PI]);
        assert_relative_eq!(t.translation(), Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    #[should_panic(expected = "joint angle count must match screw axis count")]
    fn test_fkin_space_length_mismatch_panics() {
        let s = [ScrewAxis::planar_revolute(0.0, 0.0)];
        fkin_space(&Transform::identity(), &s, &[Rad::ZERO, Rad::ZERO]);
    }

    #[test]
    #[should_panic(expected = "expected 2 joint angles, got 1")]
    fn test_chain_length_mismatch_panics() {
        let chain = SerialChain::new(vec![
            ScrewAxis::planar_revolute(0.0, 0.0),
            ScrewAxis::planar_revolute(1.0, 0.0),
        ])
        .with_frame(Transform::identity(), 1);
        chain.forward_kinematics(&[Rad::ZERO]);
    }

    #[test]
    fn test_frames_driven_by_prefix_only() {
        // 第一个坐标系只受关节 1 影响，关节 2 的角度不应改变它
        let chain = SerialChain::new(vec![
            ScrewAxis::planar_revolute(0.0, 0.0),
            ScrewAxis::planar_revolute(1.0, 0.0),
        ])
        .with_frame(Transform::from_translation(1.0, 0.0, 0.0), 1)
        .with_frame(Transform::from_translation(2.0, 0.0, 0.0), 2);

        let a = chain.forward_kinematics(&[Rad(0.3), Rad(0.0)]);
        let b = chain.forward_kinematics(&[Rad(0.3), Rad(1.2)]);
        assert!(a.get(0).unwrap().approx_eq(b.get(0).unwrap(), 1e-12));
        assert!(!a.get(1).unwrap().approx_eq(b.get(1).unwrap(), 1e-6));
    }
}
