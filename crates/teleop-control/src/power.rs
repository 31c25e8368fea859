//! 功率模式
//!
//! 不积分关节角，直接把扳机原始值作为电机功率发送：
//! `|L2| > deadzone` 取 L2，`|R2| > deadzone` 取 R2（R2 优先），否则为 0。

use teleop_input::ControllerSample;

/// 从采样中取功率值
pub fn power_level(sample: &ControllerSample, deadzone: f64) -> f64 {
    let mut power = 0.0;
    if sample.l2.abs() > deadzone {
        power = sample.l2;
    }
    if sample.r2.abs() > deadzone {
        power = sample.r2;
    }
    power
}

/// 功率历史
///
/// 只保留运行最大值和样本数，供功率计纵轴自动缩放（上限 = 最大值 + 1）。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerHistory {
    max: Option<f64>,
    len: u64,
}

impl PowerHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, power: f64) {
        self.max = Some(self.max.map_or(power, |m| m.max(power)));
        self.len += 1;
    }

    /// 历史最大值
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 纵轴上限
    pub fn y_limit(&self) -> f64 {
        self.max.unwrap_or(0.0) + 1.0
    }
}

/// 功率模式控制律
#[derive(Debug, Clone, PartialEq)]
pub struct PowerMode {
    deadzone: f64,
    history: PowerHistory,
}

impl PowerMode {
    pub fn new(deadzone: f64) -> Self {
        PowerMode {
            deadzone,
            history: PowerHistory::new(),
        }
    }

    /// 处理一帧采样，返回本帧功率并记入历史
    pub fn update(&mut self, sample: &ControllerSample) -> f64 {
        let power = power_level(sample, self.deadzone);
        self.history.push(power);
        power
    }

    pub fn history(&self) -> &PowerHistory {
        &self.history
    }

    pub fn deadzone(&self) -> f64 {
        self.deadzone
    }
}
