//! DualSense USB 输入报告解析
//!
//! USB 模式下输入报告 ID 为 `0x01`，长度 64 字节。前 11 字节布局：
//!
//! | 字节 | 内容 |
//! |---|---|
//! | 0 | 报告 ID（0x01） |
//! | 1-4 | LX, LY, RX, RY（0..=255，128 居中，Y 向下增大） |
//! | 5-6 | L2, R2（0..=255） |
//! | 7 | 序号 |
//! | 8 | 方向键（低 4 位）+ □ ✕ ○ △（高 4 位） |
//! | 9 | L1 R1 L2 R2 Create Options L3 R3 |
//! | 10 | PS Touchpad Mute |

use crate::error::InputError;
use crate::sample::{Buttons, ControllerSample};

/// USB 输入报告 ID
pub const USB_INPUT_REPORT_ID: u8 = 0x01;

/// 解析所需的最小长度
pub const MIN_REPORT_LEN: usize = 11;

/// 摇杆原始中心值
const STICK_CENTER: f64 = 128.0;

/// 解析 USB 输入报告
pub fn parse_usb_report(report: &[u8]) -> Result<ControllerSample, InputError> {
    let id = report.first().copied().unwrap_or(0);
    if report.len() < MIN_REPORT_LEN || id != USB_INPUT_REPORT_ID {
        return Err(InputError::InvalidReport {
            len: report.len(),
            id,
        });
    }

    let b8 = report[8];
    let b9 = report[9];
    let b10 = report[10];

    Ok(ControllerSample {
        lx: report[1] as f64 - STICK_CENTER,
        ly: STICK_CENTER - report[2] as f64,
        rx: report[3] as f64 - STICK_CENTER,
        ry: STICK_CENTER - report[4] as f64,
        l2: report[5] as f64,
        r2: report[6] as f64,
        buttons: Buttons {
            square: b8 & 0x10 != 0,
            cross: b8 & 0x20 != 0,
            circle: b8 & 0x40 != 0,
            triangle: b8 & 0x80 != 0,
            l1: b9 & 0x01 != 0,
            r1: b9 & 0x02 != 0,
            create: b9 & 0x10 != 0,
            options: b9 & 0x20 != 0,
            l3: b9 & 0x40 != 0,
            r3: b9 & 0x80 != 0,
            ps: b10 & 0x01 != 0,
        },
    })
}
