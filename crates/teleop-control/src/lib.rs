//! # Teleop Control
//!
//! 遥操作控制层：把手柄采样变成关节角增量和数据报，并驱动可视化。
//!
//! - [`JointIntegrator`]：死区 / 扳机 / 摇杆规则，关节角累加，步数换算
//! - [`PowerMode`]：扳机功率直通
//! - [`CyclicVariable`]：激活关节的循环选择
//! - [`TeleopSession`]：独占数据源、发送端和渲染输出，逐帧执行
//! - [`run_session`]：带停止标志、帧数上限和可选固定频率的运行循环
//! - [`TeleopConfig`]：TOML 配置

pub mod config;
pub mod cyclic;
pub mod error;
pub mod integrator;
pub mod loop_runner;
pub mod power;
pub mod session;
pub mod stats;
pub mod stepper;

pub use config::{
    ControlMode, RenderFailurePolicy, RenderOutput, RobotModelKind, TeleopConfig,
};
pub use cyclic::CyclicVariable;
pub use error::{ConfigError, ControlError};
pub use integrator::{ControlGains, JointIntegrator, StepperOutput};
pub use loop_runner::{LoopConfig, StopReason, run_session};
pub use power::{PowerHistory, PowerMode, power_level};
pub use session::{ControlLaw, FrameReport, RenderStage, TeleopSession};
pub use stats::LoopStats;
pub use stepper::{StepperDrive, round_to};
