//! 遥操作会话
//!
//! 会话独占本次运行的全部资源：手柄数据源、命令发送端（套接字随会话创建、随会话释放）、
//! 机器人模型、控制律和可选的渲染输出。`step()` 执行一帧：
//!
//! ```text
//! 读取手柄 → 计算增量 / 功率 → 发送一个数据报 → 正运动学 → 渲染一帧
//! ```
//!
//! 三类运行期失败的处理：
//!
//! | 失败 | 处理 |
//! |------|------|
//! | 设备不可用 | 告警一次，改用中性采样继续 |
//! | 发送失败 | 记录并计数，继续 |
//! | 渲染失败 | 按 [`RenderFailurePolicy`] 跳帧或终止 |

use crate::config::{ControlMode, RenderConfig, RenderFailurePolicy, TeleopConfig};
use crate::error::{ConfigError, ControlError};
use crate::integrator::JointIntegrator;
use crate::power::PowerMode;
use crate::stats::LoopStats;
use teleop_input::{ControllerSample, ControllerSource};
use teleop_kinematics::{Joint, PlanarRobot, Rad};
use teleop_render::{FrameSink, RobotRenderer};
use teleop_transport::{Command, CommandSink};
use tracing::{debug, error, info, trace, warn};

/// 控制律
#[derive(Debug, Clone)]
pub enum ControlLaw {
    /// 积分关节角，发送激活关节的步数
    Stepper(JointIntegrator),
    /// 发送扳机功率
    Power(PowerMode),
}

impl ControlLaw {
    pub fn mode(&self) -> ControlMode {
        match self {
            ControlLaw::Stepper(_) => ControlMode::Stepper,
            ControlLaw::Power(_) => ControlMode::Power,
        }
    }
}

/// 渲染阶段：渲染器 + 帧输出 + 失败策略
pub struct RenderStage {
    renderer: RobotRenderer,
    sink: Box<dyn FrameSink>,
    policy: RenderFailurePolicy,
}

impl RenderStage {
    pub fn new(
        renderer: RobotRenderer,
        sink: Box<dyn FrameSink>,
        policy: RenderFailurePolicy,
    ) -> Self {
        RenderStage {
            renderer,
            sink,
            policy,
        }
    }

    /// 按 `[render]` 配置构造渲染器，帧输出由调用方提供
    pub fn from_config(
        config: &RenderConfig,
        sink: Box<dyn FrameSink>,
    ) -> Result<Self, ControlError> {
        let mut renderer = RobotRenderer::new(config.viewport()?);
        if let Some(axes) = config.axes() {
            renderer = renderer.with_axes(axes);
        }
        Ok(Self::new(renderer, sink, config.failure_policy))
    }
}

/// 单帧结果
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// 帧序号（从 0 开始）
    pub frame: u64,
    /// 本帧使用的采样
    pub sample: ControllerSample,
    /// 本帧发送的命令
    pub command: Command,
    /// 本帧驱动的关节（功率模式为 `None`）
    pub active: Option<Joint>,
    /// 更新后的关节角（功率模式为空）
    pub angles: Vec<Rad>,
    /// 数据报是否发出
    pub transmitted: bool,
    /// 是否输出了一帧画面
    pub rendered: bool,
    /// 窗口已被用户关闭
    pub window_closed: bool,
}

/// 遥操作会话
pub struct TeleopSession<S, C> {
    source: S,
    sink: C,
    robot: PlanarRobot,
    law: ControlLaw,
    render: Option<RenderStage>,
    stats: LoopStats,
    last_sample: ControllerSample,
    input_degraded: bool,
}

impl<S: ControllerSource, C: CommandSink> TeleopSession<S, C> {
    /// 创建会话
    ///
    /// 步进模式下积分器的关节数必须与机器人自由度一致。
    pub fn new(
        source: S,
        sink: C,
        robot: PlanarRobot,
        law: ControlLaw,
    ) -> Result<Self, ControlError> {
        if let ControlLaw::Stepper(integrator) = &law
            && integrator.angles().len() != robot.dof()
        {
            return Err(ConfigError::Invalid(format!(
                "{} joint angles for {}",
                integrator.angles().len(),
                robot
            ))
            .into());
        }

        Ok(TeleopSession {
            source,
            sink,
            robot,
            law,
            render: None,
            stats: LoopStats::new(),
            last_sample: ControllerSample::NEUTRAL,
            input_degraded: false,
        })
    }

    /// 按配置创建会话（不含渲染阶段）
    pub fn from_config(config: &TeleopConfig, source: S, sink: C) -> Result<Self, ControlError> {
        config.validate()?;
        let robot = config.build_robot()?;
        let law = match config.control.mode {
            ControlMode::Stepper => ControlLaw::Stepper(JointIntegrator::new(
                config.control.gains(),
                config.stepper.drive()?,
                config.initial_angles(),
            )?),
            ControlMode::Power => ControlLaw::Power(PowerMode::new(config.control.trigger_deadzone)),
        };
        Self::new(source, sink, robot, law)
    }

    /// 附加渲染阶段
    pub fn with_render(mut self, stage: RenderStage) -> Self {
        self.render = Some(stage);
        self
    }

    /// 执行一帧
    pub fn step(&mut self) -> Result<FrameReport, ControlError> {
        let frame = self.stats.frames;
        let sample = self.read_sample();

        let (command, active) = match &mut self.law {
            ControlLaw::Stepper(integrator) => {
                let out = integrator.update(&sample);
                (Command::Steps(out.steps), Some(out.active))
            },
            ControlLaw::Power(mode) => (Command::Power(mode.update(&sample)), None),
        };

        let transmitted = match self.sink.send(&command) {
            Ok(_) => {
                self.stats.datagrams_sent += 1;
                true
            },
            Err(e) => {
                self.stats.transmit_failures += 1;
                warn!("Transmit to {} failed: {}", self.sink.describe(), e);
                false
            },
        };

        let mut rendered = false;
        let mut window_closed = false;
        if let Some(stage) = self.render.as_mut() {
            let image = match &self.law {
                ControlLaw::Stepper(integrator) => stage
                    .renderer
                    .render(&self.robot.forward_kinematics(integrator.angles())),
                ControlLaw::Power(mode) => stage
                    .renderer
                    .render_power(command.value(), mode.history().y_limit()),
            };

            match stage.sink.present(&image) {
                Ok(()) => {
                    self.stats.frames_rendered += 1;
                    rendered = true;
                },
                Err(e) if e.is_window_closed() => {
                    info!("Visualization window closed");
                    window_closed = true;
                },
                Err(e) => match stage.policy {
                    RenderFailurePolicy::SkipFrame => {
                        self.stats.render_failures += 1;
                        warn!("Render to {} failed, frame skipped: {}", stage.sink.describe(), e);
                    },
                    RenderFailurePolicy::Abort => {
                        error!("Render to {} failed: {}", stage.sink.describe(), e);
                        return Err(e.into());
                    },
                },
            }
        }

        let angles = self.angles().to_vec();
        trace!(frame, %command, ?angles, ?active, "frame");
        self.stats.record_frame();

        Ok(FrameReport {
            frame,
            sample,
            command,
            active,
            angles,
            transmitted,
            rendered,
            window_closed,
        })
    }

    /// 读取一次采样
    ///
    /// 超时复用上一次采样；设备不可用时告警一次并改用中性采样。
    fn read_sample(&mut self) -> ControllerSample {
        match self.source.poll() {
            Ok(sample) => {
                if self.input_degraded {
                    info!("Controller {} is back", self.source.name());
                    self.input_degraded = false;
                }
                self.last_sample = sample;
            },
            Err(e) if e.is_timeout() => {},
            Err(e) if e.is_device_unavailable() => {
                self.stats.input_errors += 1;
                if !self.input_degraded {
                    warn!(
                        "Controller {} unavailable: {}; continuing with neutral input",
                        self.source.name(),
                        e
                    );
                    self.input_degraded = true;
                }
                self.last_sample = ControllerSample::NEUTRAL;
            },
            Err(e) => {
                self.stats.input_errors += 1;
                debug!("Controller read failed, reusing last sample: {}", e);
            },
        }
        self.last_sample
    }

    /// 当前关节角（功率模式为空）
    pub fn angles(&self) -> &[Rad] {
        match &self.law {
            ControlLaw::Stepper(integrator) => integrator.angles(),
            ControlLaw::Power(_) => &[],
        }
    }

    pub fn robot(&self) -> &PlanarRobot {
        &self.robot
    }

    pub fn law(&self) -> &ControlLaw {
        &self.law
    }

    pub fn stats(&self) -> &LoopStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut LoopStats {
        &mut self.stats
    }

    /// 命令发送端（只读）
    pub fn command_sink(&self) -> &C {
        &self.sink
    }

    /// 会话描述（用于日志）
    pub fn describe(&self) -> String {
        let render = match &self.render {
            Some(stage) => stage.sink.describe(),
            None => "off".to_string(),
        };
        format!(
            "{} mode={:?} input={} output={} render={}",
            self.robot,
            self.law.mode(),
            self.source.name(),
            self.sink.describe(),
            render
        )
    }

    /// 结束会话，交还数据源与发送端
    pub fn into_parts(self) -> (S, C) {
        (self.source, self.sink)
    }
}
