//! 数据报负载
//!
//! 每个数据报只携带一个标量的 UTF-8 十进制文本：电机功率或步进电机步数。
//! 没有序号、没有分帧、没有确认。
//!
//! 文本格式为 `f64` 的最短往返表示：`10.0` → `"10"`，`10.25` → `"10.25"`。

use crate::error::TransmitError;
use std::fmt;

/// 单帧命令
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// 电机功率（扳机原始值）
    Power(f64),
    /// 步进电机步数
    Steps(f64),
}

impl Command {
    /// 标量值
    pub fn value(&self) -> f64 {
        match *self {
            Command::Power(v) | Command::Steps(v) => v,
        }
    }

    /// 命令类型名称
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Power(_) => "power",
            Command::Steps(_) => "steps",
        }
    }

    /// 编码为数据报负载
    pub fn encode(&self) -> Result<String, TransmitError> {
        encode_scalar(self.value())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.kind(), self.value())
    }
}

/// 标量 → 十进制文本
///
/// `-0.0` 输出为 `"0"`。
pub fn encode_scalar(value: f64) -> Result<String, TransmitError> {
    if !value.is_finite() {
        return Err(TransmitError::NonFinite(value));
    }
    let value = if value == 0.0 { 0.0 } else { value };
    Ok(value.to_string())
}

/// 十进制文本 → 标量（接收端 / 测试使用）
pub fn decode_scalar(payload: &[u8]) -> Result<f64, TransmitError> {
    let text = std::str::from_utf8(payload)
        .map_err(|_| TransmitError::Malformed(String::from_utf8_lossy(payload).into_owned()))?;
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TransmitError::Malformed(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_integral_values() {
        assert_eq!(Command::Power(128.0).encode().unwrap(), "128");
        assert_eq!(Command::Steps(10.0).encode().unwrap(), "10");
        assert_eq!(Command::Steps(-3.0).encode().unwrap(), "-3");
    }

    #[test]
    fn test_encode_fractional_values() {
        assert_eq!(Command::Steps(10.25).encode().unwrap(), "10.25");
        assert_eq!(Command::Steps(-0.07).encode().unwrap(), "-0.07");
    }

    #[test]
    fn test_encode_negative_zero() {
        assert_eq!(encode_scalar(-0.0).unwrap(), "0");
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        assert!(matches!(encode_scalar(f64::NAN), Err(TransmitError::NonFinite(_))));
        assert!(matches!(
            Command::Power(f64::NEG_INFINITY).encode(),
            Err(TransmitError::NonFinite(_))
        ));
    }

    #[test]
    fn test_decode() {
        assert_eq!(decode_scalar(b"10").unwrap(), 10.0);
        assert_eq!(decode_scalar(b" -2.5\n").unwrap(), -2.5);
        assert!(matches!(decode_scalar(b"ten"), Err(TransmitError::Malformed(_))));
        assert!(matches!(decode_scalar(b"NaN"), Err(TransmitError::Malformed(_))));
        assert!(matches!(decode_scalar(&[0xff, 0xfe]), Err(TransmitError::Malformed(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::Steps(1.5).to_string(), "steps=1.5");
        assert_eq!(Command::Power(0.0).kind(), "power");
    }
}
