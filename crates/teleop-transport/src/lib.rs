//! teleop-transport - 命令传输层
//!
//! 把每帧的标量命令（功率或步数）编码为十进制文本，通过一个 UDP 数据报
//! 发往固定的 IPv4 地址和端口。尽力而为：不握手、不确认、不重传。
//!
//! ```rust,no_run
//! use teleop_transport::{Command, CommandSink, UdpTransmitter};
//!
//! let mut tx = UdpTransmitter::new("0.0.0.0:0", "192.168.1.75:12345").unwrap();
//! tx.send(&Command::Steps(10.0)).unwrap(); // 负载 "10"
//! ```

pub mod error;
pub mod payload;
pub mod sink;
pub mod udp;

pub use error::TransmitError;
pub use payload::{Command, decode_scalar, encode_scalar};
pub use sink::{CommandSink, RecordingSink};
pub use udp::{ReceivedCommand, UdpListener, UdpTransmitter, resolve};
