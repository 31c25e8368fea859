//! 循环选择器
//!
//! 在固定候选序列中保存一个索引，自增 / 自减时按序列长度取模回绕：
//! `index ← (index ± 1) mod len`。
//!
//! 用于选择当前受控关节。单连杆模型的序列长度为 1，此时切换是空操作。

/// 固定序列上的循环索引
#[derive(Debug, Clone, PartialEq)]
pub struct CyclicVariable<T> {
    values: Vec<T>,
    index: usize,
}

#[allow(clippy::len_without_is_empty)]
impl<T> CyclicVariable<T> {
    /// 创建循环变量，初始索引为 0
    ///
    /// 序列为空时返回 `None`。
    pub fn new(values: Vec<T>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(CyclicVariable { values, index: 0 })
    }

    /// 当前值
    pub fn get_value(&self) -> &T {
        &self.values[self.index]
    }

    /// 当前索引
    pub fn index(&self) -> usize {
        self.index
    }

    /// 序列长度（构造保证至少为 1）
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn increment(&mut self) {
        self.index = (self.index + 1) % self.values.len();
    }

    pub fn decrement(&mut self) {
        let len = self.values.len();
        self.index = (self.index + len - 1) % len;
    }
}
