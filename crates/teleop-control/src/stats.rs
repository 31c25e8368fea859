//! 运行循环统计
//!
//! 累计计数 + 固定时间窗口帧率。窗口从创建或 `reset_window()` 开始计算，
//! 运行循环按配置的间隔输出一次并重置窗口。

use std::fmt;
use std::time::{Duration, Instant};

/// 运行循环计数器
#[derive(Debug, Clone)]
pub struct LoopStats {
    /// 已处理帧数
    pub frames: u64,
    /// 已发送数据报
    pub datagrams_sent: u64,
    /// 发送失败次数（记录后继续）
    pub transmit_failures: u64,
    /// 已输出帧数
    pub frames_rendered: u64,
    /// 渲染失败次数（跳帧）
    pub render_failures: u64,
    /// 读取手柄失败次数（超时不计）
    pub input_errors: u64,

    started: Instant,
    window_start: Instant,
    window_frames: u64,
}

impl LoopStats {
    pub fn new() -> Self {
        let now = Instant::now();
        LoopStats {
            frames: 0,
            datagrams_sent: 0,
            transmit_failures: 0,
            frames_rendered: 0,
            render_failures: 0,
            input_errors: 0,
            started: now,
            window_start: now,
            window_frames: 0,
        }
    }

    /// 记录一帧
    pub fn record_frame(&mut self) {
        self.frames += 1;
        self.window_frames += 1;
    }

    /// 自创建以来的运行时间
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// 当前窗口时长
    pub fn window_elapsed(&self) -> Duration {
        self.window_start.elapsed()
    }

    /// 当前窗口帧率
    pub fn window_fps(&self) -> f64 {
        // 避免除零（至少 1ms）
        let secs = self.window_start.elapsed().as_secs_f64().max(0.001);
        self.window_frames as f64 / secs
    }

    /// 全程平均帧率
    pub fn average_fps(&self) -> f64 {
        let secs = self.started.elapsed().as_secs_f64().max(0.001);
        self.frames as f64 / secs
    }

    /// 开始新的统计窗口（累计计数不变）
    pub fn reset_window(&mut self) {
        self.window_start = Instant::now();
        self.window_frames = 0;
    }
}

impl Default for LoopStats {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LoopStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames={} fps={:.1} sent={} tx_fail={} rendered={} render_fail={} input_err={}",
            self.frames,
            self.window_fps(),
            self.datagrams_sent,
            self.transmit_failures,
            self.frames_rendered,
            self.render_failures,
            self.input_errors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_window_reset_keeps_totals() {
        let mut stats = LoopStats::new();
        for _ in 0..5 {
            stats.record_frame();
        }
        stats.reset_window();
        stats.record_frame();

        assert_eq!(stats.frames, 6);
        assert_eq!(stats.window_frames, 1);
    }

    #[test]
    fn test_fps_is_positive() {
        let mut stats = LoopStats::new();
        thread::sleep(Duration::from_millis(20));
        for _ in 0..10 {
            stats.record_frame();
        }
        let fps = stats.window_fps();
        assert!(fps > 0.0);
        // 10 帧 / ≥20ms
        assert!(fps <= 500.0 + 1e-9);
    }

    #[test]
    fn test_display() {
        let stats = LoopStats::new();
        let text = stats.to_string();
        assert!(text.starts_with("frames=0 "));
        assert!(text.contains("tx_fail=0"));
    }
}
