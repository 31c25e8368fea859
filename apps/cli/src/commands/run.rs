//! run 命令
//!
//! 打开手柄和发送端，逐帧运行遥操作会话，直到 Ctrl+C、帧数上限或窗口关闭。

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use teleop_control::{
    RenderOutput, RenderStage, TeleopConfig, TeleopSession, config::ControllerConfig, run_session,
};
use teleop_input::{ControllerSource, NeutralSource, ScriptedSource};
use teleop_render::{FrameSink, PngSink};
use teleop_transport::{Command, CommandSink, TransmitError, UdpTransmitter};
use tracing::{info, warn};

use crate::settings::{ModeArg, load_config, override_links};

/// 没有真实手柄节拍时的默认频率（Hz）
const FALLBACK_FREQUENCY_HZ: f64 = 60.0;

/// 会话参数（覆盖配置文件）
#[derive(Args, Debug)]
pub struct RunCommand {
    /// 执行器地址（IPv4:端口）
    #[arg(short, long)]
    pub dest: Option<String>,

    /// 本地绑定地址
    #[arg(long)]
    pub bind: Option<String>,

    /// 连杆长度（1 或 2 个，逗号分隔）
    #[arg(long, value_delimiter = ',')]
    pub links: Option<Vec<f64>>,

    /// 控制模式
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// 使用内置脚本输入（不需要手柄）
    #[arg(long)]
    pub demo: bool,

    /// 不发送数据报，只把负载打印到标准输出
    #[arg(long)]
    pub dry_run: bool,

    /// 最大帧数
    #[arg(short = 'n', long)]
    pub max_frames: Option<u64>,

    /// 固定控制频率（Hz）
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// 关闭可视化
    #[arg(long, conflicts_with_all = ["png", "window"])]
    pub no_render: bool,

    /// 把画面写入 PNG 文件
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// 在窗口中显示画面（需要 `window` feature）
    #[arg(long, conflicts_with = "png")]
    pub window: bool,

    /// 叠加坐标轴
    #[arg(long)]
    pub axes: bool,
}

impl RunCommand {
    /// 把命令行参数合并进配置
    pub fn apply(&self, config: &mut TeleopConfig) -> Result<()> {
        if let Some(dest) = &self.dest {
            config.network.destination = dest.clone();
        }
        if let Some(bind) = &self.bind {
            config.network.bind = bind.clone();
        }
        if let Some(links) = &self.links {
            override_links(config, links)?;
        }
        if let Some(mode) = self.mode {
            config.control.mode = mode.into();
        }
        if let Some(frames) = self.max_frames {
            config.run.max_iterations = Some(frames);
        }
        if let Some(hz) = self.frequency {
            config.run.frequency_hz = Some(hz);
        }
        if self.no_render {
            config.render.enabled = false;
        }
        if let Some(path) = &self.png {
            config.render.enabled = true;
            config.render.output = RenderOutput::Png;
            config.render.png_path = path.clone();
        }
        if self.window {
            config.render.enabled = true;
            config.render.output = RenderOutput::Window;
        }
        if self.axes {
            config.render.show_axes = true;
        }
        config.validate()?;
        Ok(())
    }

    pub fn execute(&self, config_path: Option<&Path>) -> Result<()> {
        let mut config = load_config(config_path)?;
        self.apply(&mut config)?;

        let stop = Arc::new(AtomicBool::new(false));
        let stop_handler = stop.clone();
        ctrlc::set_handler(move || {
            stop_handler.store(true, Ordering::Relaxed);
        })
        .context("failed to install Ctrl+C handler")?;

        let (source, has_device) = if self.demo {
            (Box::new(ScriptedSource::demo()) as Box<dyn ControllerSource>, false)
        } else {
            open_controller(&config.controller)
        };
        if !has_device && config.run.frequency_hz.is_none() {
            info!("No controller pacing, running at {} Hz", FALLBACK_FREQUENCY_HZ);
            config.run.frequency_hz = Some(FALLBACK_FREQUENCY_HZ);
        }

        let sink: Box<dyn CommandSink> = if self.dry_run {
            Box::new(StdoutSink)
        } else {
            let transmitter = UdpTransmitter::new(&config.network.bind, &config.network.destination)
                .with_context(|| {
                    format!("failed to open UDP socket to {}", config.network.destination)
                })?;
            Box::new(transmitter)
        };

        let mut session = TeleopSession::from_config(&config, source, sink)?;
        if let Some(frames) = frame_sink(&config)? {
            session = session.with_render(RenderStage::from_config(&config.render, frames)?);
        }

        let reason = run_session(&mut session, &config.run.loop_config(), &stop)?;
        let stats = session.stats();
        eprintln!(
            "Stopped ({}): {} frames, {} sent, {} transmit failures, {:.1} fps",
            reason,
            stats.frames,
            stats.datagrams_sent,
            stats.transmit_failures,
            stats.average_fps()
        );
        Ok(())
    }
}

/// 打开手柄；失败时告警一次并降级为中性输入
#[cfg(feature = "dualsense")]
fn open_controller(config: &ControllerConfig) -> (Box<dyn ControllerSource>, bool) {
    use teleop_input::DualSense;

    match DualSense::open(config.vendor_id, config.product_id, config.read_timeout()) {
        Ok(controller) => (Box::new(controller), true),
        Err(e) => {
            warn!(
                "Could not connect to the controller ({}). Make sure it is wired up and that \
                 vendor_id {:#06x} / product_id {:#06x} are correct. Continuing with neutral input.",
                e, config.vendor_id, config.product_id
            );
            (Box::new(NeutralSource), false)
        },
    }
}

#[cfg(not(feature = "dualsense"))]
fn open_controller(_config: &ControllerConfig) -> (Box<dyn ControllerSource>, bool) {
    warn!("Built without controller support; continuing with neutral input");
    (Box::new(NeutralSource), false)
}

/// 按配置创建帧输出（关闭时为 `None`）
fn frame_sink(config: &TeleopConfig) -> Result<Option<Box<dyn FrameSink>>> {
    let render = &config.render;
    if !render.enabled {
        return Ok(None);
    }
    match render.output {
        RenderOutput::None => Ok(None),
        RenderOutput::Png => Ok(Some(Box::new(PngSink::new(&render.png_path)))),
        #[cfg(feature = "window")]
        RenderOutput::Window => {
            let window = teleop_render::WindowSink::new("planar-teleop", render.width, render.height)?;
            Ok(Some(Box::new(window)))
        },
        #[cfg(not(feature = "window"))]
        RenderOutput::Window => anyhow::bail!("window output needs the `window` feature"),
    }
}

/// `--dry-run`：每帧把负载打印为一行
struct StdoutSink;

impl CommandSink for StdoutSink {
    fn send(&mut self, command: &Command) -> Result<usize, TransmitError> {
        let payload = command.encode()?;
        println!("{payload}");
        Ok(payload.len())
    }

    fn describe(&self) -> String {
        "stdout".to_string()
    }
}
