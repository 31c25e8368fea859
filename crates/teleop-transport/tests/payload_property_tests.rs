//! 负载编码属性测试

use proptest::prelude::*;
use teleop_transport::{Command, decode_scalar};

proptest! {
    /// 任何有限值的文本负载都能被接收端精确还原
    #[test]
    fn payload_is_exact_decimal(value in -1.0e6..1.0e6f64) {
        let payload = Command::Steps(value).encode().unwrap();
        prop_assert!(!payload.contains('e'));
        prop_assert_eq!(decode_scalar(payload.as_bytes()).unwrap(), value);
    }

    /// 两位小数的步数不会产生多余的尾数
    #[test]
    fn hundredths_render_compactly(hundredths in -100_000i64..100_000i64) {
        let value = hundredths as f64 / 100.0;
        let payload = Command::Steps(value).encode().unwrap();
        let decimals = payload.split('.').nth(1).map_or(0, str::len);
        prop_assert!(decimals <= 2, "{} rendered as {}", value, payload);
    }
}
