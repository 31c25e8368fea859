//! 运动学层错误类型

use thiserror::Error;

/// 运动学模型构造错误
///
/// 关节角数量与螺旋轴数量不匹配属于前置条件违反，直接 panic，不在此列。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    /// 连杆长度非法（非正数或非有限值）
    #[error("Invalid length for link {index}: {value} (must be finite and > 0)")]
    InvalidLinkLength { index: usize, value: f64 },

    /// 不支持的自由度（只支持 1R / 2R）
    #[error("Unsupported number of links: {0} (expected 1 or 2)")]
    UnsupportedDof(usize),
}
