//! 手柄数据源抽象
//!
//! 控制回路每帧调用一次 `poll()`。设备枚举、报告解析等细节由具体实现负责。

use crate::error::InputError;
use crate::sample::{Buttons, ControllerSample};

/// 手柄数据源
pub trait ControllerSource {
    /// 读取一次采样（每帧一次）
    fn poll(&mut self) -> Result<ControllerSample, InputError>;

    /// 数据源名称（用于日志）
    fn name(&self) -> &str {
        "controller"
    }
}

impl<S: ControllerSource + ?Sized> ControllerSource for Box<S> {
    fn poll(&mut self) -> Result<ControllerSample, InputError> {
        (**self).poll()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// 中性数据源：始终返回扳机松开、摇杆居中的采样
///
/// 设备不可用时的降级替代。
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralSource;

impl ControllerSource for NeutralSource {
    fn poll(&mut self) -> Result<ControllerSample, InputError> {
        Ok(ControllerSample::NEUTRAL)
    }

    fn name(&self) -> &str {
        "neutral"
    }
}

/// 脚本数据源：按顺序回放预设采样
///
/// 用于测试和无硬件演示。非循环模式下播放完毕后返回中性采样。
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    samples: Vec<ControllerSample>,
    cursor: usize,
    repeat: bool,
}

impl ScriptedSource {
    /// 单次播放
    pub fn new(samples: Vec<ControllerSample>) -> Self {
        ScriptedSource {
            samples,
            cursor: 0,
            repeat: false,
        }
    }

    /// 循环播放
    pub fn repeating(samples: Vec<ControllerSample>) -> Self {
        ScriptedSource {
            repeat: true,
            ..Self::new(samples)
        }
    }

    /// 内置演示脚本（循环）
    ///
    /// 依次：L2 渐进 → R2 渐进 → 切换关节 → 右摇杆画圈。
    pub fn demo() -> Self {
        let mut samples = Vec::new();

        for i in 0..=60 {
            samples.push(ControllerSample::with_triggers(i as f64 * 4.0, 0.0));
        }
        for i in 0..=60 {
            samples.push(ControllerSample::with_triggers(0.0, i as f64 * 4.0));
        }

        samples.push(ControllerSample {
            buttons: Buttons {
                r1: true,
                ..Buttons::default()
            },
            ..ControllerSample::NEUTRAL
        });
        samples.push(ControllerSample::NEUTRAL);

        for i in 0..120 {
            let phase = i as f64 / 120.0 * std::f64::consts::TAU;
            samples.push(ControllerSample::with_right_stick(
                120.0 * phase.cos(),
                120.0 * phase.sin(),
            ));
        }

        samples.push(ControllerSample {
            buttons: Buttons {
                l1: true,
                ..Buttons::default()
            },
            ..ControllerSample::NEUTRAL
        });
        samples.push(ControllerSample::NEUTRAL);

        Self::repeating(samples)
    }

    /// 剩余未播放的采样数（循环模式始终返回总数）
    pub fn remaining(&self) -> usize {
        if self.repeat {
            self.samples.len()
        } else {
            self.samples.len().saturating_sub(self.cursor)
        }
    }
}

impl ControllerSource for ScriptedSource {
    fn poll(&mut self) -> Result<ControllerSample, InputError> {
        if self.samples.is_empty() {
            return Ok(ControllerSample::NEUTRAL);
        }
        if self.cursor >= self.samples.len() {
            if !self.repeat {
                return Ok(ControllerSample::NEUTRAL);
            }
            self.cursor = 0;
        }
        let sample = self.samples[self.cursor];
        self.cursor += 1;
        Ok(sample)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_source() {
        let mut source = NeutralSource;
        assert_eq!(source.poll().unwrap(), ControllerSample::NEUTRAL);
        assert_eq!(source.name(), "neutral");
    }

    #[test]
    fn test_scripted_source_plays_once() {
        let a = ControllerSample::with_triggers(10.0, 0.0);
        let b = ControllerSample::with_triggers(0.0, 20.0);
        let mut source = ScriptedSource::new(vec![a, b]);

        assert_eq!(source.remaining(), 2);
        assert_eq!(source.poll().unwrap(), a);
        assert_eq!(source.poll().unwrap(), b);
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.poll().unwrap(), ControllerSample::NEUTRAL);
    }

    #[test]
    fn test_scripted_source_repeats() {
        let a = ControllerSample::with_triggers(10.0, 0.0);
        let mut source = ScriptedSource::repeating(vec![a]);
        for _ in 0..5 {
            assert_eq!(source.poll().unwrap(), a);
        }
    }

    #[test]
    fn test_boxed_source_delegates() {
        let mut source: Box<dyn ControllerSource> = Box::new(NeutralSource);
        assert_eq!(source.name(), "neutral");
        assert!(source.poll().is_ok());
    }

    #[test]
    fn test_demo_script_is_nonempty() {
        let mut source = ScriptedSource::demo();
        assert!(source.remaining() > 100);
        assert!(source.poll().is_ok());
    }
}
