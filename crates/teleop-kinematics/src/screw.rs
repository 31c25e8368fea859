//! 螺旋轴（Screw Axis）与矩阵指数
//!
//! 螺旋轴 `S = [ω; v]` 描述刚体绕一条空间直线的旋转（及沿其平移）。
//! 对于过点 `q`、方向为单位向量 `ω` 的旋转关节，`v = -ω × q`。
//!
//! 矩阵指数 `e^{[S]θ}` 采用 Rodrigues 公式的闭式解：
//!
//! ```text
//! R = I + sinθ [ω] + (1 - cosθ) [ω]²
//! p = (Iθ + (1 - cosθ) [ω] + (θ - sinθ) [ω]²) v
//! ```

use crate::units::Rad;
use nalgebra::{Matrix3, Matrix4, Vector3, Vector6};

/// 判断旋转分量是否为零的阈值
const OMEGA_NORM_THRESHOLD: f64 = 1e-12;

/// 空间螺旋轴（相对基座坐标系）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrewAxis {
    omega: Vector3<f64>,
    v: Vector3<f64>,
}

impl ScrewAxis {
    /// 旋转关节：绕 `axis` 方向、过 `point` 的直线旋转
    ///
    /// `axis` 会被归一化；零向量退化为纯平移轴（`v = 0`）。
    pub fn revolute(axis: Vector3<f64>, point: Vector3<f64>) -> Self {
        let omega = axis.try_normalize(OMEGA_NORM_THRESHOLD).unwrap_or_else(Vector3::zeros);
        let v = -omega.cross(&point);
        ScrewAxis { omega, v }
    }

    /// 绕过 `(x, y, 0)` 的 Z 轴旋转（平面机器人的所有关节）
    pub fn planar_revolute(x: f64, y: f64) -> Self {
        Self::revolute(Vector3::z(), Vector3::new(x, y, 0.0))
    }

    /// 移动关节：沿 `direction` 平移
    pub fn prismatic(direction: Vector3<f64>) -> Self {
        let v = direction.try_normalize(OMEGA_NORM_THRESHOLD).unwrap_or_else(Vector3::zeros);
        ScrewAxis {
            omega: Vector3::zeros(),
            v,
        }
    }

    /// 从 6 维向量 `[ω; v]` 创建
    pub fn from_vector(s: Vector6<f64>) -> Self {
        ScrewAxis {
            omega: s.fixed_rows::<3>(0).into_owned(),
            v: s.fixed_rows::<3>(3).into_owned(),
        }
    }

    /// 导出为 6 维向量 `[ω; v]`
    pub fn as_vector(&self) -> Vector6<f64> {
        Vector6::new(
            self.omega.x,
            self.omega.y,
            self.omega.z,
            self.v.x,
            self.v.y,
            self.v.z,
        )
    }

    /// 角速度分量
    pub fn omega(&self) -> &Vector3<f64> {
        &self.omega
    }

    /// 线速度分量
    pub fn v(&self) -> &Vector3<f64> {
        &self.v
    }

    /// 矩阵指数 `e^{[S]θ}`
    ///
    /// 旋转分量不是单位向量时，先按其模长缩放 `θ`。
    pub fn exp(&self, theta: Rad) -> Matrix4<f64> {
        let mut t = Matrix4::identity();
        let norm = self.omega.norm();

        if norm < OMEGA_NORM_THRESHOLD {
            t.fixed_view_mut::<3, 1>(0, 3).copy_from(&(self.v * theta.0));
            return t;
        }

        let theta = theta.0 * norm;
        let w = skew(&(self.omega / norm));
        let v = self.v / norm;
        let w2 = w * w;
        let (sin, cos) = theta.sin_cos();

        let r = Matrix3::identity() + w * sin + w2 * (1.0 - cos);
        let g = Matrix3::identity() * theta + w * (1.0 - cos) + w2 * (theta - sin);

        t.fixed_view_mut::<3, 3>(0, 0).copy_from(&r);
        t.fixed_view_mut::<3, 1>(0, 3).copy_from(&(g * v));
        t
    }
}

/// 反对称矩阵 `[ω]`
pub(crate) fn skew(w: &Vector3<f64>) -> Matrix3<f64> {
    Matrix3::new(0.0, -w.z, w.y, w.z, 0.0, -w.x, -w.y, w.x, 0.0)
}
