//! DualSense USB 设备
//!
//! 通过 libusb 直接读取 HID 中断端点，不依赖系统 HID 驱动。
//! Linux 上会临时 detach 内核 `hid-playstation` 驱动，Drop 时重新 attach。

use rusb::{Device, DeviceHandle, GlobalContext};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

use crate::error::InputError;
use crate::report::parse_usb_report;
use crate::sample::ControllerSample;
use crate::source::ControllerSource;

/// HID 接口类代码
const USB_CLASS_HID: u8 = 0x03;

/// USB 输入报告长度
const REPORT_LEN: usize = 64;

/// DualSense 手柄（USB 有线）
pub struct DualSense {
    handle: DeviceHandle<GlobalContext>,
    interface_number: u8,
    endpoint_in: u8,
    read_timeout: Duration,
    /// 记录是否 claim 了接口（用于正确的资源清理）
    interface_claimed: bool,
    /// 记录是否 detach 了内核驱动
    kernel_driver_detached: bool,
    /// 最近一次有效采样（超时时复用）
    last: ControllerSample,
    buf: [u8; REPORT_LEN],
}

impl DualSense {
    /// Sony 厂商 ID
    pub const VENDOR_ID: u16 = 0x054C;
    /// DualSense 产品 ID
    pub const PRODUCT_ID: u16 = 0x0CE6;

    /// 打开默认 VID/PID 的 DualSense
    pub fn open_default(read_timeout: Duration) -> Result<Self, InputError> {
        Self::open(Self::VENDOR_ID, Self::PRODUCT_ID, read_timeout)
    }

    /// 按 VID/PID 打开手柄并 claim HID 接口
    pub fn open(
        vendor_id: u16,
        product_id: u16,
        read_timeout: Duration,
    ) -> Result<Self, InputError> {
        let device = Self::find(vendor_id, product_id)?;
        let (interface_number, endpoint_in) =
            Self::find_hid_interrupt_in(&device).ok_or(InputError::NoHidInterface)?;

        let handle = device.open()?;
        let mut controller = DualSense {
            handle,
            interface_number,
            endpoint_in,
            read_timeout,
            interface_claimed: false,
            kernel_driver_detached: false,
            last: ControllerSample::NEUTRAL,
            buf: [0u8; REPORT_LEN],
        };
        controller.prepare_interface()?;

        info!(
            "DualSense connected: bus {} addr {}, interface {}, endpoint {:#04x}",
            device.bus_number(),
            device.address(),
            interface_number,
            endpoint_in
        );
        Ok(controller)
    }

    fn find(vendor_id: u16, product_id: u16) -> Result<Device<GlobalContext>, InputError> {
        for device in rusb::devices()?.iter() {
            let desc = match device.device_descriptor() {
                Ok(desc) => desc,
                Err(_) => continue,
            };
            if desc.vendor_id() == vendor_id && desc.product_id() == product_id {
                return Ok(device);
            }
        }
        Err(InputError::DeviceNotFound {
            vendor_id,
            product_id,
        })
    }

    /// 查找 HID 接口上的中断 IN 端点
    fn find_hid_interrupt_in(device: &Device<GlobalContext>) -> Option<(u8, u8)> {
        let config = device
            .active_config_descriptor()
            .or_else(|_| device.config_descriptor(0))
            .ok()?;

        for interface in config.interfaces() {
            for desc in interface.descriptors() {
                if desc.class_code() != USB_CLASS_HID {
                    continue;
                }
                for endpoint in desc.endpoint_descriptors() {
                    if endpoint.transfer_type() == rusb::TransferType::Interrupt
                        && endpoint.direction() == rusb::Direction::In
                    {
                        return Some((desc.interface_number(), endpoint.address()));
                    }
                }
            }
        }
        None
    }

    /// 准备接口（detach driver 和 claim interface）
    fn prepare_interface(&mut self) -> Result<(), InputError> {
        if self.interface_claimed {
            return Ok(());
        }

        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            if self.handle.kernel_driver_active(self.interface_number).unwrap_or(false) {
                self.handle.detach_kernel_driver(self.interface_number)?;
                self.kernel_driver_detached = true;
                debug!("Detached kernel driver from interface {}", self.interface_number);
            }
        }

        self.handle.claim_interface(self.interface_number)?;
        self.interface_claimed = true;
        Ok(())
    }

    /// 最近一次有效采样
    pub fn last_sample(&self) -> ControllerSample {
        self.last
    }
}

impl ControllerSource for DualSense {
    /// 读取一个输入报告
    ///
    /// 超时返回上一次的采样（陈旧值），以便调用方每帧都能检查停止标志。
    fn poll(&mut self) -> Result<ControllerSample, InputError> {
        match self.handle.read_interrupt(self.endpoint_in, &mut self.buf, self.read_timeout) {
            Ok(len) => {
                let sample = parse_usb_report(&self.buf[..len])?;
                self.last = sample;
                Ok(sample)
            },
            Err(rusb::Error::Timeout) => {
                trace!("DualSense read timed out, reusing last sample");
                Ok(self.last)
            },
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "dualsense"
    }
}

impl Drop for DualSense {
    fn drop(&mut self) {
        if self.interface_claimed
            && let Err(e) = self.handle.release_interface(self.interface_number)
        {
            warn!("Failed to release DualSense interface: {}", e);
        }

        #[cfg(any(target_os = "linux", target_os = "macos"))]
        {
            if self.kernel_driver_detached
                && let Err(e) = self.handle.attach_kernel_driver(self.interface_number)
            {
                trace!("Failed to re-attach kernel driver (may be normal): {}", e);
            }
        }
    }
}
