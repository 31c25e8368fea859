//! 关节索引
//!
//! 平面机器人最多两个旋转关节。使用枚举代替裸 `usize`，
//! 在日志和选择器（当前激活关节）中保持类型安全。

use std::fmt;

/// 关节枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Joint {
    /// 关节 1（基座旋转）
    J1 = 0,
    /// 关节 2（肘部旋转，位于连杆 1 末端）
    J2 = 1,
}

impl Joint {
    /// 所有关节
    pub const ALL: [Joint; 2] = [Joint::J1, Joint::J2];

    /// 获取关节索引（0-1）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 从索引创建关节（范围检查）
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Joint::J1),
            1 => Some(Joint::J2),
            _ => None,
        }
    }

    /// 前 `dof` 个关节
    ///
    /// `dof` 超过 2 时截断。
    pub fn first(dof: usize) -> &'static [Joint] {
        &Self::ALL[..dof.min(Self::ALL.len())]
    }

    /// 获取关节名称
    pub const fn name(self) -> &'static str {
        match self {
            Joint::J1 => "J1",
            Joint::J2 => "J2",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
