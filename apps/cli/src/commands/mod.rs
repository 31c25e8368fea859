//! 子命令定义和实现

pub mod config;
pub mod fk;
pub mod listen;
pub mod render;
pub mod run;

pub use config::ConfigCommand;
pub use fk::FkCommand;
pub use listen::ListenCommand;
pub use render::RenderCommand;
pub use run::RunCommand;
