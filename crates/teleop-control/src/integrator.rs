//! 关节角积分器
//!
//! 把手柄采样映射为每帧角度增量并累加。规则按以下优先级应用，后者覆盖前者：
//!
//! 1. `|L2| > trigger_deadzone`：`delta = +step · L2 / trigger_divisor`
//! 2. `|R2| > trigger_deadzone`：`delta = -step · R2 / trigger_divisor`
//! 3. `|RX| > stick_deadzone`：比例位置控制，
//!    `delta = step · stick_gain · wrap(Rthumb - θ)`
//!
//! 累加 `θ ← θ + delta` 不设关节限位。只驱动当前激活关节，
//! L1 / R1 按下（上升沿）切换上一个 / 下一个关节。

use crate::cyclic::CyclicVariable;
use crate::error::ConfigError;
use crate::stepper::StepperDrive;
use teleop_input::{Buttons, ControllerSample};
use teleop_kinematics::{Joint, Rad};

/// 死区与增益
///
/// 数值沿用现场标定值，没有物理推导，均可通过配置覆盖。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlGains {
    /// 扳机死区（原始单位）
    pub trigger_deadzone: f64,
    /// 摇杆死区（原始单位，相对中心）
    pub stick_deadzone: f64,
    /// 基础步长（弧度）
    pub step: f64,
    /// 扳机除数
    pub trigger_divisor: f64,
    /// 摇杆比例增益
    pub stick_gain: f64,
}

impl Default for ControlGains {
    fn default() -> Self {
        ControlGains {
            trigger_deadzone: 4.0,
            stick_deadzone: 20.0,
            step: 0.001,
            trigger_divisor: 1.5,
            stick_gain: 333.0,
        }
    }
}

impl ControlGains {
    /// 单帧角度增量（纯函数）
    pub fn delta(&self, sample: &ControllerSample, current: Rad) -> Rad {
        let mut delta = Rad::ZERO;

        if sample.l2.abs() > self.trigger_deadzone {
            delta = Rad(self.step * sample.l2 / self.trigger_divisor);
        }
        if sample.r2.abs() > self.trigger_deadzone {
            delta = Rad(-self.step * sample.r2 / self.trigger_divisor);
        }
        if sample.rx.abs() > self.stick_deadzone {
            let distance = current.shortest_distance_to(sample.r_thumb());
            delta = distance * (self.step * self.stick_gain);
        }

        delta
    }
}

/// 单帧积分结果
#[derive(Debug, Clone, PartialEq)]
pub struct StepperOutput {
    /// 本帧驱动的关节
    pub active: Joint,
    /// 每个关节的增量（非激活关节为 0）
    pub deltas: Vec<Rad>,
    /// 激活关节的步数
    pub steps: f64,
}

/// 关节角积分器（步进模式）
#[derive(Debug, Clone)]
pub struct JointIntegrator {
    gains: ControlGains,
    stepper: StepperDrive,
    angles: Vec<Rad>,
    active: CyclicVariable<Joint>,
    prev_buttons: Buttons,
}

impl JointIntegrator {
    /// 创建积分器
    ///
    /// 关节数由初始角数量决定（1 或 2）。
    pub fn new(
        gains: ControlGains,
        stepper: StepperDrive,
        initial: Vec<Rad>,
    ) -> Result<Self, ConfigError> {
        let joints = Joint::first(initial.len());
        if joints.len() != initial.len() {
            return Err(ConfigError::Invalid(format!(
                "integrator supports 1 or 2 joints, got {}",
                initial.len()
            )));
        }
        let active = CyclicVariable::new(joints.to_vec())
            .ok_or_else(|| ConfigError::Invalid("integrator needs at least one joint".into()))?;

        Ok(JointIntegrator {
            gains,
            stepper,
            angles: initial,
            active,
            prev_buttons: Buttons::default(),
        })
    }

    /// 处理一帧采样：更新激活关节 → 计算增量 → 累加
    pub fn update(&mut self, sample: &ControllerSample) -> StepperOutput {
        self.select(&sample.buttons);

        let active = *self.active.get_value();
        let current = self.angles[active.index()];
        let delta = self.gains.delta(sample, current);
        self.angles[active.index()] += delta;

        let mut deltas = vec![Rad::ZERO; self.angles.len()];
        deltas[active.index()] = delta;

        StepperOutput {
            active,
            deltas,
            steps: self.stepper.step_count(delta),
        }
    }

    fn select(&mut self, buttons: &Buttons) {
        if buttons.l1 && !self.prev_buttons.l1 {
            self.active.decrement();
            tracing::debug!("Active joint -> {}", self.active.get_value());
        }
        if buttons.r1 && !self.prev_buttons.r1 {
            self.active.increment();
            tracing::debug!("Active joint -> {}", self.active.get_value());
        }
        self.prev_buttons = *buttons;
    }

    /// 当前累计关节角
    pub fn angles(&self) -> &[Rad] {
        &self.angles
    }

    pub fn active_joint(&self) -> Joint {
        *self.active.get_value()
    }

    pub fn gains(&self) -> &ControlGains {
        &self.gains
    }

    pub fn stepper(&self) -> &StepperDrive {
        &self.stepper
    }
}
