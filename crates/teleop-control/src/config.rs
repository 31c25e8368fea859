//! TOML 配置
//!
//! 所有字段都有默认值，缺失的段或键使用默认值；配置文件不存在时等价于全默认。
//!
//! ```toml
//! [robot]
//! model = "two-link"
//! link_lengths = [1.0, 1.0]
//!
//! [control]
//! mode = "stepper"
//!
//! [network]
//! destination = "192.168.1.75:12345"
//! ```

use crate::error::ConfigError;
use crate::integrator::ControlGains;
use crate::loop_runner::LoopConfig;
use crate::stepper::StepperDrive;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use teleop_kinematics::{KinematicsError, PlanarRobot, Rad};
use teleop_render::{AxesOverlay, RenderError, Viewport};

/// 配置目录名（位于系统配置目录下）
pub const CONFIG_DIR_NAME: &str = "planar-teleop";

/// 机器人模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RobotModelKind {
    OneLink,
    TwoLink,
}

impl RobotModelKind {
    /// 连杆数
    pub fn links(self) -> usize {
        match self {
            RobotModelKind::OneLink => 1,
            RobotModelKind::TwoLink => 2,
        }
    }
}

/// 控制模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// 积分关节角，发送步进电机步数
    Stepper,
    /// 直接发送扳机功率
    Power,
}

/// 帧输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderOutput {
    Png,
    Window,
    None,
}

/// 渲染失败处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderFailurePolicy {
    /// 记录警告，跳过该帧，继续运行
    #[default]
    SkipFrame,
    /// 终止运行循环
    Abort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    pub model: RobotModelKind,
    pub link_lengths: Vec<f64>,
    /// 初始关节角（弧度）
    pub initial_angles: Vec<f64>,
}

impl Default for RobotConfig {
    fn default() -> Self {
        RobotConfig {
            model: RobotModelKind::TwoLink,
            link_lengths: vec![1.0, 1.0],
            initial_angles: vec![0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub mode: ControlMode,
    pub trigger_deadzone: f64,
    pub stick_deadzone: f64,
    pub step: f64,
    pub trigger_divisor: f64,
    pub stick_gain: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        let gains = ControlGains::default();
        ControlConfig {
            mode: ControlMode::Stepper,
            trigger_deadzone: gains.trigger_deadzone,
            stick_deadzone: gains.stick_deadzone,
            step: gains.step,
            trigger_divisor: gains.trigger_divisor,
            stick_gain: gains.stick_gain,
        }
    }
}

impl ControlConfig {
    pub fn gains(&self) -> ControlGains {
        ControlGains {
            trigger_deadzone: self.trigger_deadzone,
            stick_deadzone: self.stick_deadzone,
            step: self.step,
            trigger_divisor: self.trigger_divisor,
            stick_gain: self.stick_gain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepperConfig {
    pub steps_per_rev: u32,
    pub microsteps: u32,
}

impl Default for StepperConfig {
    fn default() -> Self {
        StepperConfig {
            steps_per_rev: 200,
            microsteps: 4,
        }
    }
}

impl StepperConfig {
    pub fn drive(&self) -> Result<StepperDrive, ConfigError> {
        StepperDrive::new(self.steps_per_rev, self.microsteps)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// 执行器地址（IPv4:端口）
    pub destination: String,
    /// 本地绑定地址
    pub bind: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            destination: "192.168.1.75:12345".to_string(),
            bind: "0.0.0.0:0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    /// 单次读取超时（毫秒），超时复用上一次采样
    pub read_timeout_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            vendor_id: 0x054C,
            product_id: 0x0CE6,
            read_timeout_ms: 100,
        }
    }
}

impl ControllerConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub show_axes: bool,
    pub axis_length: f64,
    pub axis_alpha: f64,
    pub output: RenderOutput,
    pub png_path: PathBuf,
    pub failure_policy: RenderFailurePolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            enabled: true,
            width: 648,
            height: 448,
            x_range: [-2.0, 4.0],
            y_range: [-2.0, 2.0],
            show_axes: false,
            axis_length: 1.0,
            axis_alpha: 0.333,
            output: RenderOutput::Png,
            png_path: PathBuf::from("teleop-frame.png"),
            failure_policy: RenderFailurePolicy::SkipFrame,
        }
    }
}

impl RenderConfig {
    pub fn viewport(&self) -> Result<Viewport, RenderError> {
        Viewport::new(
            self.width,
            self.height,
            (self.x_range[0], self.x_range[1]),
            (self.y_range[0], self.y_range[1]),
        )
    }

    /// 坐标轴叠加参数（未启用时为 `None`）
    pub fn axes(&self) -> Option<AxesOverlay> {
        self.show_axes.then_some(AxesOverlay {
            length: self.axis_length,
            alpha: self.axis_alpha,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// 固定频率（Hz）；缺省时不限速轮询
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_hz: Option<f64>,
    /// 最大帧数；缺省时直到停止信号
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u64>,
    /// 统计日志间隔（秒），0 表示关闭
    pub stats_interval_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            frequency_hz: None,
            max_iterations: None,
            stats_interval_secs: 5,
        }
    }
}

impl RunConfig {
    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            frequency_hz: self.frequency_hz,
            max_iterations: self.max_iterations,
            stats_interval: (self.stats_interval_secs > 0)
                .then(|| Duration::from_secs(self.stats_interval_secs)),
        }
    }
}

/// 完整配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleopConfig {
    pub robot: RobotConfig,
    pub control: ControlConfig,
    pub stepper: StepperConfig,
    pub network: NetworkConfig,
    pub controller: ControllerConfig,
    pub render: RenderConfig,
    pub run: RunConfig,
}

impl TeleopConfig {
    /// 默认配置文件路径：`<config_dir>/planar-teleop/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// 从 TOML 文本解析并校验
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: TeleopConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 读取配置文件
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// 读取配置文件；文件不存在时返回默认配置
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 写入配置文件（自动创建父目录）
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        let robot = &self.robot;
        let links = robot.model.links();
        if robot.link_lengths.len() != links {
            return Err(ConfigError::Invalid(format!(
                "robot.link_lengths has {} entries, {:?} needs {}",
                robot.link_lengths.len(),
                robot.model,
                links
            )));
        }
        if robot.initial_angles.len() != links {
            return Err(ConfigError::Invalid(format!(
                "robot.initial_angles has {} entries, {:?} needs {}",
                robot.initial_angles.len(),
                robot.model,
                links
            )));
        }
        if let Some((i, len)) = robot
            .link_lengths
            .iter()
            .enumerate()
            .find(|(_, l)| !l.is_finite() || **l <= 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "robot.link_lengths[{i}] = {len} must be > 0"
            )));
        }
        if robot.initial_angles.iter().any(|a| !a.is_finite()) {
            return Err(ConfigError::Invalid("robot.initial_angles must be finite".into()));
        }

        let control = &self.control;
        if !(control.trigger_divisor.is_finite() && control.trigger_divisor != 0.0) {
            return Err(ConfigError::Invalid(
                "control.trigger_divisor must be finite and non-zero".into(),
            ));
        }
        let finite = [
            control.trigger_deadzone,
            control.stick_deadzone,
            control.step,
            control.stick_gain,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("control gains and deadzones must be finite".into()));
        }
        if control.trigger_deadzone < 0.0 || control.stick_deadzone < 0.0 {
            return Err(ConfigError::Invalid("control deadzones must be >= 0".into()));
        }

        self.stepper.drive()?;

        if let Some(hz) = self.run.frequency_hz
            && !(hz.is_finite() && hz > 0.0 && Duration::try_from_secs_f64(1.0 / hz).is_ok())
        {
            return Err(ConfigError::Invalid(format!("run.frequency_hz = {hz} must be > 0")));
        }

        let render = &self.render;
        for (name, [lo, hi]) in [("x_range", render.x_range), ("y_range", render.y_range)] {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(ConfigError::Invalid(format!("render.{name} = [{lo}, {hi}] is empty")));
            }
        }
        if render.enabled && (render.width == 0 || render.height == 0) {
            return Err(ConfigError::Invalid("render.width and render.height must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&render.axis_alpha) {
            return Err(ConfigError::Invalid(format!(
                "render.axis_alpha = {} must be within [0, 1]",
                render.axis_alpha
            )));
        }

        Ok(())
    }

    /// 按配置构造机器人模型
    pub fn build_robot(&self) -> Result<PlanarRobot, KinematicsError> {
        PlanarRobot::from_link_lengths(&self.robot.link_lengths)
    }

    pub fn initial_angles(&self) -> Vec<Rad> {
        self.robot.initial_angles.iter().copied().map(Rad).collect()
    }
}
