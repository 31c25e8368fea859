//! 输入报告解析属性测试

use proptest::prelude::*;
use teleop_input::parse_usb_report;
use teleop_input::report::{MIN_REPORT_LEN, USB_INPUT_REPORT_ID};

proptest! {
    /// 任意字节都不会 panic；长度或报告 ID 不对时返回错误
    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..80)) {
        let result = parse_usb_report(&bytes);
        let well_formed = bytes.len() >= MIN_REPORT_LEN && bytes[0] == USB_INPUT_REPORT_ID;
        prop_assert_eq!(result.is_ok(), well_formed);
    }

    /// 合法报告的数值范围
    #[test]
    fn sample_ranges(mut body in proptest::collection::vec(any::<u8>(), MIN_REPORT_LEN..64)) {
        body[0] = USB_INPUT_REPORT_ID;
        let sample = parse_usb_report(&body).unwrap();

        prop_assert!((0.0..=255.0).contains(&sample.l2));
        prop_assert!((0.0..=255.0).contains(&sample.r2));
        for axis in [sample.lx, sample.ly, sample.rx, sample.ry] {
            prop_assert!((-128.0..=128.0).contains(&axis));
        }
        prop_assert!(sample.r_thumb().0.abs() <= std::f64::consts::PI);
    }
}
