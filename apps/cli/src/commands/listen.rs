//! listen 命令
//!
//! 绑定 UDP 端口并打印收到的命令负载，用作台架上的执行器替身。

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use teleop_transport::UdpListener;
use tracing::warn;

/// 接收参数
#[derive(Args, Debug)]
pub struct ListenCommand {
    /// 本地绑定地址
    #[arg(short, long, default_value = "0.0.0.0:12345")]
    pub bind: String,

    /// 收到指定数量的数据报后退出
    #[arg(short = 'n', long)]
    pub count: Option<u64>,

    /// 无数据时最长等待时间（秒），超过后退出
    #[arg(long, value_parser = parse_seconds)]
    pub idle_timeout: Option<Duration>,
}

/// 解析非负秒数
fn parse_seconds(text: &str) -> Result<Duration, String> {
    let secs: f64 = text.parse().map_err(|e| format!("invalid number '{text}': {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration '{text}': {e}"))
}

impl ListenCommand {
    pub fn execute(&self) -> Result<()> {
        let mut listener = UdpListener::bind(&self.bind, Duration::from_millis(200))
            .with_context(|| format!("failed to bind {}", self.bind))?;
        eprintln!("Listening on {}", listener.local_addr()?);

        let stop = Arc::new(AtomicBool::new(false));
        let stop_handler = stop.clone();
        ctrlc::set_handler(move || {
            stop_handler.store(true, Ordering::Relaxed);
        })
        .context("failed to install Ctrl+C handler")?;

        let idle_limit = self.idle_timeout;
        let mut idle = Duration::ZERO;
        let mut received = 0u64;

        while !stop.load(Ordering::Relaxed) {
            if let Some(count) = self.count
                && received >= count
            {
                break;
            }

            match listener.recv()? {
                Some(cmd) => {
                    idle = Duration::ZERO;
                    received += 1;
                    match cmd.value {
                        Some(value) => println!("{}\t{}\t{}", cmd.from, cmd.raw, value),
                        None => warn!("Malformed payload from {}: {:?}", cmd.from, cmd.raw),
                    }
                },
                None => {
                    idle += Duration::from_millis(200);
                    if let Some(limit) = idle_limit
                        && idle >= limit
                    {
                        eprintln!("No data for {:.1}s, exiting", idle.as_secs_f64());
                        break;
                    }
                },
            }
        }

        eprintln!("Received {} datagrams", received);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("1.5").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_seconds("0").unwrap(), Duration::ZERO);

        for bad in ["nan", "-1", "inf", "1e300", "soon"] {
            assert!(parse_seconds(bad).is_err(), "{bad} should be rejected");
        }
    }
}
