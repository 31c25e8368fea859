//! UDP 发送端与接收端
//!
//! 发送端在会话开始时创建、整个会话复用同一个 socket、会话结束时随 Drop 释放。
//! 尽力而为：不确认、不重传、不检测乱序。

use crate::error::TransmitError;
use crate::payload::{Command, decode_scalar};
use crate::sink::CommandSink;
use std::io::ErrorKind;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;
use tracing::{debug, trace};

/// 解析地址（支持主机名）
pub fn resolve(addr: &str) -> Result<SocketAddr, TransmitError> {
    addr.to_socket_addrs()
        .map_err(|e| TransmitError::InvalidAddress(format!("{addr}: {e}")))?
        .next()
        .ok_or_else(|| TransmitError::InvalidAddress(addr.to_string()))
}

/// UDP 命令发送端
#[derive(Debug)]
pub struct UdpTransmitter {
    socket: UdpSocket,
    destination: SocketAddr,
    datagrams_sent: u64,
}

impl UdpTransmitter {
    /// 创建发送端
    ///
    /// # 参数
    /// - `bind`: 本地地址（通常为 `"0.0.0.0:0"`）
    /// - `destination`: 目标地址（如 `"192.168.1.75:12345"`）
    pub fn new(bind: &str, destination: &str) -> Result<Self, TransmitError> {
        let destination = resolve(destination)?;
        let socket = UdpSocket::bind(resolve(bind)?)?;
        debug!(
            "UDP transmitter bound to {} -> {}",
            socket.local_addr()?,
            destination
        );
        Ok(UdpTransmitter {
            socket,
            destination,
            datagrams_sent: 0,
        })
    }

    pub fn destination(&self) -> SocketAddr {
        self.destination
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransmitError> {
        Ok(self.socket.local_addr()?)
    }

    /// 成功发出的数据报数量
    pub fn datagrams_sent(&self) -> u64 {
        self.datagrams_sent
    }
}

impl CommandSink for UdpTransmitter {
    fn send(&mut self, command: &Command) -> Result<usize, TransmitError> {
        let payload = command.encode()?;
        let written = self.socket.send_to(payload.as_bytes(), self.destination)?;
        self.datagrams_sent += 1;
        trace!("sent {:?} ({} bytes) to {}", payload, written, self.destination);
        Ok(written)
    }

    fn describe(&self) -> String {
        format!("udp://{}", self.destination)
    }
}

/// 接收到的一条命令
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedCommand {
    pub from: SocketAddr,
    pub raw: String,
    /// 解析结果（负载非法时为 `None`）
    pub value: Option<f64>,
}

/// UDP 命令接收端（台架调试用，代替远端执行器）
#[derive(Debug)]
pub struct UdpListener {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpListener {
    /// 绑定本地地址并设置读超时
    pub fn bind(addr: &str, read_timeout: Duration) -> Result<Self, TransmitError> {
        let socket = UdpSocket::bind(resolve(addr)?)?;
        socket.set_read_timeout(Some(read_timeout))?;
        Ok(UdpListener {
            socket,
            buf: vec![0u8; 1500],
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, TransmitError> {
        Ok(self.socket.local_addr()?)
    }

    /// 接收一个数据报；超时返回 `Ok(None)`
    pub fn recv(&mut self) -> Result<Option<ReceivedCommand>, TransmitError> {
        match self.socket.recv_from(&mut self.buf) {
            Ok((len, from)) => {
                let payload = &self.buf[..len];
                Ok(Some(ReceivedCommand {
                    from,
                    raw: String::from_utf8_lossy(payload).into_owned(),
                    value: decode_scalar(payload).ok(),
                }))
            },
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("127.0.0.1:12345").unwrap(),
            "127.0.0.1:12345".parse::<SocketAddr>().unwrap()
        );
        assert!(matches!(
            resolve("not an address"),
            Err(TransmitError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_describe() {
        let tx = UdpTransmitter::new("127.0.0.1:0", "127.0.0.1:9").unwrap();
        assert_eq!(tx.describe(), "udp://127.0.0.1:9");
        assert_eq!(tx.datagrams_sent(), 0);
    }

    #[test]
    fn test_listener_timeout_returns_none() {
        let mut rx = UdpListener::bind("127.0.0.1:0", Duration::from_millis(10)).unwrap();
        assert!(rx.recv().unwrap().is_none());
    }
}
