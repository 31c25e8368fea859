//! 强类型角度单位
//!
//! 使用 NewType 模式区分弧度与角度，防止控制回路中的单位混淆。
//!
//! # 示例
//!
//! ```rust
//! use teleop_kinematics::{Deg, Rad};
//!
//! let angle = Rad(std::f64::consts::PI);
//! assert!((angle.to_deg().0 - 180.0).abs() < 1e-9);
//!
//! // 最短角距离：从 170° 到 -170° 只需要 +20°
//! let d = Deg(170.0).to_rad().shortest_distance_to(Deg(-170.0).to_rad());
//! assert!((d.to_deg().0 - 20.0).abs() < 1e-9);
//! ```

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 弧度（NewType）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rad(pub f64);

impl Rad {
    /// 零弧度常量
    pub const ZERO: Self = Rad(0.0);

    /// π 弧度（180度）
    pub const PI: Self = Rad(PI);

    /// π/2 弧度（90度）
    pub const FRAC_PI_2: Self = Rad(std::f64::consts::FRAC_PI_2);

    /// 创建新的弧度值
    #[inline]
    pub const fn new(value: f64) -> Self {
        Rad(value)
    }

    /// 转换为角度
    #[inline]
    pub fn to_deg(self) -> Deg {
        Deg(self.0.to_degrees())
    }

    /// 获取原始值
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// 取绝对值
    #[inline]
    pub fn abs(self) -> Self {
        Rad(self.0.abs())
    }

    /// 归一化到 (-π, π] 范围
    ///
    /// `-π` 映射为 `π`，保证区间左开右闭。
    pub fn wrap(self) -> Self {
        // rem_euclid 结果位于 [0, 2π]（浮点舍入可能恰好取到 2π）
        let angle = (self.0 + PI).rem_euclid(TAU) - PI;
        if angle <= -PI { Rad(PI) } else { Rad(angle) }
    }

    /// 从当前角度到 `target` 的最短有符号角距离
    ///
    /// 结果位于 (-π, π]，并满足 `self + d ≡ target (mod 2π)`。
    #[inline]
    pub fn shortest_distance_to(self, target: Rad) -> Rad {
        (target - self).wrap()
    }
}

impl fmt::Display for Rad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

impl Add for Rad {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Rad(self.0 + rhs.0)
    }
}

impl Sub for Rad {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Rad(self.0 - rhs.0)
    }
}

impl Mul<f64> for Rad {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Rad(self.0 * rhs)
    }
}

impl Mul<Rad> for f64 {
    type Output = Rad;
    #[inline]
    fn mul(self, rhs: Rad) -> Rad {
        Rad(self * rhs.0)
    }
}

impl Div<f64> for Rad {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Rad(self.0 / rhs)
    }
}

impl Neg for Rad {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Rad(-self.0)
    }
}

impl AddAssign for Rad {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Rad {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// 角度（NewType）
///
/// 主要用于步进电机换算（每步角度以度为单位给出）和日志输出。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deg(pub f64);

impl Deg {
    /// 零角度常量
    pub const ZERO: Self = Deg(0.0);

    /// 创建新的角度值
    #[inline]
    pub const fn new(value: f64) -> Self {
        Deg(value)
    }

    /// 转换为弧度
    #[inline]
    pub fn to_rad(self) -> Rad {
        Rad(self.0.to_radians())
    }

    /// 获取原始值
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Deg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}°", self.0)
    }
}

impl Add for Deg {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Deg(self.0 + rhs.0)
    }
}

impl Sub for Deg {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Deg(self.0 - rhs.0)
    }
}

impl Div<Deg> for Deg {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Deg) -> f64 {
        self.0 / rhs.0
    }
}

impl From<Rad> for Deg {
    fn from(rad: Rad) -> Self {
        rad.to_deg()
    }
}

impl From<Deg> for Rad {
    fn from(deg: Deg) -> Self {
        deg.to_rad()
    }
}
