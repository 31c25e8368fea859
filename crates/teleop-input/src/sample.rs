//! 手柄采样
//!
//! `ControllerSample` 是一次轮询得到的瞬时读数，每帧覆盖，不做持久化。
//!
//! # 数值约定
//!
//! - 扳机 `l2` / `r2`：原始值 0..=255（0 为松开）
//! - 摇杆 `lx` / `ly` / `rx` / `ry`：以中心为 0，约 -128..=128，`y` 向上为正

use teleop_kinematics::Rad;

/// 按键状态（只保留控制回路关心的按键）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    pub l1: bool,
    pub r1: bool,
    pub l3: bool,
    pub r3: bool,
    pub cross: bool,
    pub circle: bool,
    pub square: bool,
    pub triangle: bool,
    pub create: bool,
    pub options: bool,
    pub ps: bool,
}

/// 单次手柄采样
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerSample {
    /// 左扳机
    pub l2: f64,
    /// 右扳机
    pub r2: f64,
    /// 左摇杆 X
    pub lx: f64,
    /// 左摇杆 Y（向上为正）
    pub ly: f64,
    /// 右摇杆 X
    pub rx: f64,
    /// 右摇杆 Y（向上为正）
    pub ry: f64,
    pub buttons: Buttons,
}

impl ControllerSample {
    /// 中性采样：扳机松开、摇杆居中、无按键
    pub const NEUTRAL: Self = ControllerSample {
        l2: 0.0,
        r2: 0.0,
        lx: 0.0,
        ly: 0.0,
        rx: 0.0,
        ry: 0.0,
        buttons: Buttons {
            l1: false,
            r1: false,
            l3: false,
            r3: false,
            cross: false,
            circle: false,
            square: false,
            triangle: false,
            create: false,
            options: false,
            ps: false,
        },
    };

    /// 只设置扳机的采样
    pub fn with_triggers(l2: f64, r2: f64) -> Self {
        ControllerSample {
            l2,
            r2,
            ..Self::NEUTRAL
        }
    }

    /// 只设置右摇杆的采样
    pub fn with_right_stick(rx: f64, ry: f64) -> Self {
        ControllerSample {
            rx,
            ry,
            ..Self::NEUTRAL
        }
    }

    /// 右摇杆方向角 `atan2(ry, rx)`
    #[inline]
    pub fn r_thumb(&self) -> Rad {
        Rad(self.ry.atan2(self.rx))
    }

    /// 左摇杆方向角 `atan2(ly, lx)`
    #[inline]
    pub fn l_thumb(&self) -> Rad {
        Rad(self.ly.atan2(self.lx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_neutral_is_default() {
        assert_eq!(ControllerSample::NEUTRAL, ControllerSample::default());
    }

    #[test]
    fn test_r_thumb_angle() {
        assert_relative_eq!(ControllerSample::with_right_stick(0.0, 100.0).r_thumb().0, FRAC_PI_2);
        assert_relative_eq!(ControllerSample::with_right_stick(100.0, 0.0).r_thumb().0, 0.0);
    }
}
