//! 输入层错误类型

use thiserror::Error;

/// 手柄输入错误
#[derive(Error, Debug)]
pub enum InputError {
    /// USB 错误（来自 rusb）
    #[cfg(feature = "dualsense")]
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// 未找到匹配 VID/PID 的设备
    #[error("Controller not found (vendor {vendor_id:#06x}, product {product_id:#06x})")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    /// 设备没有 HID 中断输入端点
    #[error("Controller exposes no HID interrupt IN endpoint")]
    NoHidInterface,

    /// 输入报告格式错误
    #[error("Invalid input report: {len} bytes, report id {id:#04x}")]
    InvalidReport { len: usize, id: u8 },

    /// 读取超时
    #[error("Read timeout")]
    Timeout,
}

impl InputError {
    /// 是否为超时错误
    pub fn is_timeout(&self) -> bool {
        match self {
            InputError::Timeout => true,
            #[cfg(feature = "dualsense")]
            InputError::Usb(rusb::Error::Timeout) => true,
            _ => false,
        }
    }

    /// 是否属于"设备不可用"（未连接、无权限、被占用）
    ///
    /// 这类错误可降级运行：告警一次后使用中性输入继续。
    pub fn is_device_unavailable(&self) -> bool {
        match self {
            InputError::DeviceNotFound { .. } | InputError::NoHidInterface => true,
            #[cfg(feature = "dualsense")]
            InputError::Usb(
                rusb::Error::NotFound
                | rusb::Error::NoDevice
                | rusb::Error::Access
                | rusb::Error::Busy,
            ) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InputError;

    #[test]
    fn test_device_not_found_display() {
        let err = InputError::DeviceNotFound {
            vendor_id: 0x054C,
            product_id: 0x0CE6,
        };
        assert_eq!(
            err.to_string(),
            "Controller not found (vendor 0x054c, product 0x0ce6)"
        );
        assert!(err.is_device_unavailable());
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_invalid_report_is_not_unavailable() {
        let err = InputError::InvalidReport { len: 3, id: 0x31 };
        assert!(!err.is_device_unavailable());
        assert_eq!(err.to_string(), "Invalid input report: 3 bytes, report id 0x31");
    }

    #[cfg(feature = "dualsense")]
    #[test]
    fn test_usb_error_classification() {
        let err: InputError = rusb::Error::Access.into();
        assert!(err.is_device_unavailable());

        let err: InputError = rusb::Error::Timeout.into();
        assert!(err.is_timeout());
        assert!(!err.is_device_unavailable());
    }
}
