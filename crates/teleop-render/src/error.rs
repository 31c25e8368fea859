//! 渲染层错误类型

use thiserror::Error;

/// 渲染 / 显示错误
#[derive(Error, Debug)]
pub enum RenderError {
    /// 图像编码错误
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// 文件 IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 窗口后端错误
    #[error("Window error: {0}")]
    Window(String),

    /// 窗口已被用户关闭
    #[error("Window closed")]
    WindowClosed,

    /// 视口参数非法
    #[error("Invalid viewport: {0}")]
    InvalidViewport(String),
}

impl RenderError {
    /// 用户主动关闭窗口（应结束会话而不是报错）
    pub fn is_window_closed(&self) -> bool {
        matches!(self, RenderError::WindowClosed)
    }
}
