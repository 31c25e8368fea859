//! 运动学属性测试
//!
//! 使用 proptest 验证角度归一化与正运动学的数学性质。

use proptest::prelude::*;
use std::f64::consts::{PI, TAU};
use teleop_kinematics::{PlanarRobot, Rad};

proptest! {
    /// 归一化结果位于 (-π, π]
    #[test]
    fn wrap_range(rad in -1000.0..1000.0f64) {
        let w = Rad(rad).wrap();
        prop_assert!(w.0 > -PI && w.0 <= PI);
    }

    /// 最短角距离位于 (-π, π] 且 θ + d ≡ φ (mod 2π)
    #[test]
    fn shortest_distance_congruent(theta in -100.0..100.0f64, phi in -PI..PI) {
        let d = Rad(theta).shortest_distance_to(Rad(phi));
        prop_assert!(d.0 > -PI && d.0 <= PI);

        let residual = theta + d.0 - phi;
        let turns = (residual / TAU).round();
        prop_assert!((residual - turns * TAU).abs() < 1e-9);
    }

    /// 正运动学确定性：相同输入两次调用结果一致
    #[test]
    fn fk_deterministic(
        l1 in 0.1..5.0f64,
        l2 in 0.1..5.0f64,
        t1 in -10.0..10.0f64,
        t2 in -10.0..10.0f64,
    ) {
        let robot = PlanarRobot::two_link(l1, l2).unwrap();
        let a = robot.forward_kinematics(&[Rad(t1), Rad(t2)]);
        let b = robot.forward_kinematics(&[Rad(t1), Rad(t2)]);
        prop_assert!(a.approx_eq(&b, 1e-9));
    }

    /// 末端执行器到基座的距离不超过工作半径
    #[test]
    fn fk_within_reach(
        l1 in 0.1..5.0f64,
        l2 in 0.1..5.0f64,
        t1 in -10.0..10.0f64,
        t2 in -10.0..10.0f64,
    ) {
        let robot = PlanarRobot::two_link(l1, l2).unwrap();
        let chain = robot.forward_kinematics(&[Rad(t1), Rad(t2)]);
        let p = chain.end_effector().unwrap().translation();
        prop_assert!(p.norm() <= robot.reach() + 1e-9);
        prop_assert!(p.z.abs() < 1e-12);
    }

    /// 单连杆末端位于半径 L 的圆上，朝向等于关节角
    #[test]
    fn one_link_on_circle(length in 0.1..5.0f64, theta in -10.0..10.0f64) {
        let robot = PlanarRobot::one_link(length).unwrap();
        let chain = robot.forward_kinematics(&[Rad(theta)]);
        let ee = chain.end_effector().unwrap();
        prop_assert!((ee.translation().norm() - length).abs() < 1e-9);
        let heading_error = ee.planar_heading().shortest_distance_to(Rad(theta));
        prop_assert!(heading_error.0.abs() < 1e-9);
    }
}
