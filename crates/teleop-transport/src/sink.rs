//! 命令发送抽象

use crate::error::TransmitError;
use crate::payload::Command;

/// 命令发送端
///
/// 每次调用 `send()` 恰好尝试发送一个数据报：不合并、不批量、不重试。
pub trait CommandSink {
    /// 发送一条命令，返回写出的字节数
    fn send(&mut self, command: &Command) -> Result<usize, TransmitError>;

    /// 目标描述（用于日志）
    fn describe(&self) -> String;
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn send(&mut self, command: &Command) -> Result<usize, TransmitError> {
        (**self).send(command)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// 记录型发送端：只记录负载，不做网络 IO
///
/// 用于 `--dry-run` 与测试。
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    payloads: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的负载
    pub fn payloads(&self) -> &[String] {
        &self.payloads
    }

    /// 取出并清空已记录的负载
    pub fn take_payloads(&mut self) -> Vec<String> {
        std::mem::take(&mut self.payloads)
    }
}

impl CommandSink for RecordingSink {
    fn send(&mut self, command: &Command) -> Result<usize, TransmitError> {
        let payload = command.encode()?;
        tracing::debug!("dry-run datagram: {}", payload);
        let len = payload.len();
        self.payloads.push(payload);
        Ok(len)
    }

    fn describe(&self) -> String {
        "dry-run".to_string()
    }
}
