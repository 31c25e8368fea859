//! 传输层错误类型

use thiserror::Error;

/// 发送 / 解码错误
#[derive(Error, Debug)]
pub enum TransmitError {
    /// Socket IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 地址无法解析
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// 命令值不是有限数（NaN / ±inf 无法编码为十进制文本）
    #[error("Command value is not finite: {0}")]
    NonFinite(f64),

    /// 收到的负载不是合法的十进制数
    #[error("Malformed payload: {0:?}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::TransmitError;

    #[test]
    fn test_display() {
        assert_eq!(
            TransmitError::NonFinite(f64::INFINITY).to_string(),
            "Command value is not finite: inf"
        );
        assert_eq!(
            TransmitError::Malformed("abc".into()).to_string(),
            "Malformed payload: \"abc\""
        );
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(TransmitError::from(io), TransmitError::Io(_)));
    }
}
