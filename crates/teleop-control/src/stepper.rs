//! 步进电机换算
//!
//! `degrees_per_step = 360° / (steps_per_rev × microsteps)`，
//! 每帧角度增量换算为步数：`round(degrees(delta) / degrees_per_step, 2)`。

use crate::error::ConfigError;
use teleop_kinematics::{Deg, Rad};

/// 步进电机机械参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepperDrive {
    steps_per_rev: u32,
    microsteps: u32,
    degrees_per_step: Deg,
}

impl StepperDrive {
    pub fn new(steps_per_rev: u32, microsteps: u32) -> Result<Self, ConfigError> {
        if steps_per_rev == 0 || microsteps == 0 {
            return Err(ConfigError::Invalid(format!(
                "stepper needs non-zero steps_per_rev and microsteps (got {steps_per_rev} x {microsteps})"
            )));
        }
        Ok(StepperDrive {
            steps_per_rev,
            microsteps,
            degrees_per_step: Deg(360.0 / (steps_per_rev as f64 * microsteps as f64)),
        })
    }

    pub fn steps_per_rev(&self) -> u32 {
        self.steps_per_rev
    }

    pub fn microsteps(&self) -> u32 {
        self.microsteps
    }

    /// 每步对应角度
    pub fn degrees_per_step(&self) -> Deg {
        self.degrees_per_step
    }

    /// 角度增量 → 步数（保留两位小数）
    pub fn step_count(&self, delta: Rad) -> f64 {
        round_to(delta.to_deg() / self.degrees_per_step, 2)
    }
}

impl Default for StepperDrive {
    /// 200 步/圈，4 细分（0.45°/步）
    fn default() -> Self {
        StepperDrive {
            steps_per_rev: 200,
            microsteps: 4,
            degrees_per_step: Deg(0.45),
        }
    }
}

/// 四舍五入到 `digits` 位小数（远离零舍入）
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    let rounded = (value * factor).round() / factor;
    // 避免 -0 出现在负载文本里
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_per_step() {
        let drive = StepperDrive::new(200, 4).unwrap();
        assert!((drive.degrees_per_step().0 - 0.45).abs() < 1e-12);
        assert_eq!(drive, StepperDrive::default());
    }

    #[test]
    fn test_four_and_a_half_degrees_is_ten_steps() {
        let drive = StepperDrive::default();
        assert_eq!(drive.step_count(Deg(4.5).to_rad()), 10.0);
        assert_eq!(drive.step_count(Deg(-4.5).to_rad()), -10.0);
    }

    #[test]
    fn test_fractional_steps_keep_two_decimals() {
        let drive = StepperDrive::default();
        // 0.001 rad ≈ 0.0573° ≈ 0.1273 步
        assert_eq!(drive.step_count(Rad(0.001)), 0.13);
        assert_eq!(drive.step_count(Rad::ZERO), 0.0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(StepperDrive::new(0, 4).is_err());
        assert!(StepperDrive::new(200, 0).is_err());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(1.235_000_1, 2), 1.24);
        assert_eq!(round_to(-0.001, 2), 0.0);
        assert!(round_to(-0.001, 2).is_sign_positive());
    }
}
