//! 运行循环
//!
//! 把 [`TeleopSession::step`] 包装成带退出条件的阻塞循环。
//!
//! # 退出条件
//!
//! - 停止标志被置位（每帧开始前检查一次，Ctrl+C 处理器设置）
//! - 达到 `max_iterations`
//! - 可视化窗口被关闭
//! - `step()` 返回错误（仅渲染失败且策略为 `Abort`）
//!
//! # 定时
//!
//! 设置 `frequency_hz` 时使用 `spin_sleep` 补足到固定周期；不设置时不限速轮询，
//! 节奏由手柄读取超时决定。
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicBool;
//! use teleop_control::{LoopConfig, run_session};
//!
//! let stop = Arc::new(AtomicBool::new(false));
//! let reason = run_session(&mut session, &LoopConfig::default(), &stop)?;
//! ```

use crate::error::{ConfigError, ControlError};
use crate::session::TeleopSession;
use spin_sleep::SpinSleeper;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use teleop_input::ControllerSource;
use teleop_transport::CommandSink;
use tracing::{error, info, warn};

/// 运行循环配置
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// 控制频率（Hz），`None` 表示不限速
    pub frequency_hz: Option<f64>,

    /// 最大帧数（`None` 表示直到停止）
    pub max_iterations: Option<u64>,

    /// 统计日志间隔（`None` 表示关闭）
    pub stats_interval: Option<Duration>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            frequency_hz: None,
            max_iterations: None,
            stats_interval: Some(Duration::from_secs(5)),
        }
    }
}

impl LoopConfig {
    fn period(&self) -> Result<Option<Duration>, ConfigError> {
        let Some(hz) = self.frequency_hz else {
            return Ok(None);
        };
        if !(hz.is_finite() && hz > 0.0) {
            return Err(ConfigError::Invalid(format!("Invalid frequency_hz: {hz} (must be > 0)")));
        }
        if hz > 10000.0 {
            warn!(
                "Very high control frequency: {} Hz. This may cause performance issues.",
                hz
            );
        }
        let period = Duration::try_from_secs_f64(1.0 / hz).map_err(|_| {
            ConfigError::Invalid(format!("frequency_hz = {hz} gives an unrepresentable period"))
        })?;
        Ok(Some(period))
    }
}

/// 循环结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// 停止标志
    StopSignal,
    /// 达到最大帧数
    MaxIterations,
    /// 窗口被关闭
    WindowClosed,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StopReason::StopSignal => "stop requested",
            StopReason::MaxIterations => "max iterations reached",
            StopReason::WindowClosed => "window closed",
        };
        f.write_str(text)
    }
}

/// 运行会话直到退出条件满足
///
/// 阻塞当前线程。累计统计可在返回后通过 `session.stats()` 读取。
pub fn run_session<S, C>(
    session: &mut TeleopSession<S, C>,
    config: &LoopConfig,
    stop: &AtomicBool,
) -> Result<StopReason, ControlError>
where
    S: ControllerSource,
    C: CommandSink,
{
    let period = config.period()?;
    let sleeper = SpinSleeper::default();

    info!("Session started: {}", session.describe());

    let mut iteration: u64 = 0;
    let reason = loop {
        if stop.load(Ordering::Relaxed) {
            break StopReason::StopSignal;
        }
        if let Some(max_iter) = config.max_iterations
            && iteration >= max_iter
        {
            break StopReason::MaxIterations;
        }

        let frame_start = Instant::now();
        let report = match session.step() {
            Ok(report) => report,
            Err(e) => {
                error!("Session aborted after {} frames: {}", iteration, e);
                return Err(e);
            },
        };
        iteration += 1;

        if report.window_closed {
            break StopReason::WindowClosed;
        }

        if let Some(interval) = config.stats_interval
            && session.stats().window_elapsed() >= interval
        {
            info!("{}", session.stats());
            session.stats_mut().reset_window();
        }

        if let Some(period) = period {
            let elapsed = frame_start.elapsed();
            if elapsed < period {
                sleeper.sleep(period - elapsed);
            }
        }
    };

    info!("Session stopped ({}): {}", reason, session.stats());
    Ok(reason)
}
