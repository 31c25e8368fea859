//! 齐次变换与变换链
//!
//! `Transform` 是 4×4 齐次刚体变换（旋转 + 平移）。每帧从关节角重新计算，
//! 不做原地修改也不缓存。

use crate::units::Rad;
use nalgebra::{Matrix3, Matrix4, Vector3};
use std::fmt;
use std::ops::Mul;

/// 4×4 齐次刚体变换
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(Matrix4<f64>);

impl Transform {
    /// 单位变换
    pub fn identity() -> Self {
        Transform(Matrix4::identity())
    }

    /// 纯平移变换
    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = x;
        m[(1, 3)] = y;
        m[(2, 3)] = z;
        Transform(m)
    }

    /// 从原始矩阵创建（调用方保证最后一行为 `[0, 0, 0, 1]`）
    pub fn from_matrix(m: Matrix4<f64>) -> Self {
        Transform(m)
    }

    /// 原始矩阵
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.0
    }

    /// 平移列
    pub fn translation(&self) -> Vector3<f64> {
        self.0.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// 旋转块
    pub fn rotation(&self) -> Matrix3<f64> {
        self.0.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// 坐标轴方向（0 = X，1 = Y，2 = Z），即旋转块的第 `i` 列
    ///
    /// # Panics
    ///
    /// `i > 2` 时 panic。
    pub fn axis(&self, i: usize) -> Vector3<f64> {
        assert!(i < 3, "axis index out of range: {i}");
        self.0.fixed_view::<3, 1>(0, i).into_owned()
    }

    /// 变换一个点
    pub fn transform_point(&self, p: &Vector3<f64>) -> Vector3<f64> {
        self.rotation() * p + self.translation()
    }

    /// 绕 Z 轴的平面朝向角
    pub fn planar_heading(&self) -> Rad {
        Rad(self.0[(1, 0)].atan2(self.0[(0, 0)]))
    }

    /// 按行导出（用于 JSON 输出）
    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.0[(r, c)];
            }
        }
        rows
    }

    /// 逐元素比较，容差 `eps`
    pub fn approx_eq(&self, other: &Transform, eps: f64) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        Transform(self.0 * rhs.0)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "[{:>8.4} {:>8.4} {:>8.4} {:>8.4}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}

/// 变换链：基座到每个关节坐标系以及末端执行器的变换，按顺序排列
///
/// 最后一个元素是末端执行器。
#[derive(Debug, Clone, PartialEq)]
pub struct TransformChain {
    frames: Vec<Transform>,
}

impl TransformChain {
    pub fn new(frames: Vec<Transform>) -> Self {
        TransformChain { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transform> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transform> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[Transform] {
        &self.frames
    }

    /// 末端执行器变换
    pub fn end_effector(&self) -> Option<&Transform> {
        self.frames.last()
    }

    /// 各坐标系原点的平面投影 `(x, y)`
    pub fn planar_origins(&self) -> Vec<(f64, f64)> {
        self.frames
            .iter()
            .map(|t| {
                let p = t.translation();
                (p.x, p.y)
            })
            .collect()
    }

    /// 连杆线段：基座原点 → 第一个坐标系，随后相邻坐标系两两相连
    pub fn link_segments(&self) -> Vec<((f64, f64), (f64, f64))> {
        let mut points = Vec::with_capacity(self.frames.len() + 1);
        points.push((0.0, 0.0));
        points.extend(self.planar_origins());
        points.windows(2).map(|w| (w[0], w[1])).collect()
    }

    /// 逐帧比较，容差 `eps`
    pub fn approx_eq(&self, other: &TransformChain, eps: f64) -> bool {
        self.len() == other.len()
            && self.frames.iter().zip(other.frames.iter()).all(|(a, b)| a.approx_eq(b, eps))
    }
}

impl<'a> IntoIterator for &'a TransformChain {
    type Item = &'a Transform;
    type IntoIter = std::slice::Iter<'a, Transform>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
