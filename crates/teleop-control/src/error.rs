//! 控制层错误类型

use teleop_kinematics::KinematicsError;
use teleop_render::RenderError;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 读写配置文件失败
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML 解析失败
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML 序列化失败
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// 配置值非法
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// 控制会话错误
///
/// 传输失败与设备不可用不在此列：前者记录后继续，后者降级为中性输入。
#[derive(Error, Debug)]
pub enum ControlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 渲染失败（仅在 `RenderFailurePolicy::Abort` 下向上传播）
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),

    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),
}
