//! teleop-input - 手柄输入层
//!
//! 控制回路只依赖 [`ControllerSource`] 抽象：每帧 `poll()` 一次，得到
//! [`ControllerSample`]。具体后端：
//!
//! - [`DualSense`]（feature `dualsense`）：USB 有线 DualSense，通过 rusb 读取 HID 报告
//! - [`NeutralSource`]：设备不可用时的降级替代
//! - [`ScriptedSource`]：测试 / 无硬件演示

pub mod error;
pub mod report;
pub mod sample;
pub mod source;

#[cfg(feature = "dualsense")]
pub mod dualsense;

pub use error::InputError;
pub use report::parse_usb_report;
pub use sample::{Buttons, ControllerSample};
pub use source::{ControllerSource, NeutralSource, ScriptedSource};

#[cfg(feature = "dualsense")]
pub use dualsense::DualSense;
