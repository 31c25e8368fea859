//! 帧输出
//!
//! [`FrameSink`] 是渲染结果的去向：PNG 文件（覆盖写入）、实时窗口（`window` feature）、
//! 内存（测试用）或直接丢弃。

use crate::error::RenderError;
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

/// 帧输出接口
pub trait FrameSink {
    /// 输出一帧
    fn present(&mut self, frame: &RgbImage) -> Result<(), RenderError>;

    /// 用于日志的描述
    fn describe(&self) -> String;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn present(&mut self, frame: &RgbImage) -> Result<(), RenderError> {
        (**self).present(frame)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// 丢弃所有帧
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &RgbImage) -> Result<(), RenderError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "none".to_string()
    }
}

/// 只保留最近一帧
#[derive(Debug, Default)]
pub struct MemorySink {
    last: Option<RgbImage>,
    frames: u64,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&RgbImage> {
        self.last.as_ref()
    }

    /// 已接收帧数
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for MemorySink {
    fn present(&mut self, frame: &RgbImage) -> Result<(), RenderError> {
        self.last = Some(frame.clone());
        self.frames += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// 每帧覆盖写入同一个 PNG 文件
///
/// 先写临时文件再重命名，外部查看器不会读到半截文件。
#[derive(Debug, Clone)]
pub struct PngSink {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        PngSink {
            path,
            tmp_path: PathBuf::from(tmp),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSink for PngSink {
    fn present(&mut self, frame: &RgbImage) -> Result<(), RenderError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        frame.save_with_format(&self.tmp_path, ImageFormat::Png)?;
        std::fs::rename(&self.tmp_path, &self.path)?;
        tracing::trace!("frame written to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("png://{}", self.path.display())
    }
}

#[cfg(feature = "window")]
pub use window::WindowSink;

#[cfg(feature = "window")]
mod window {
    use super::FrameSink;
    use crate::error::RenderError;
    use image::RgbImage;
    use minifb::{Key, Window, WindowOptions};

    /// 实时窗口（minifb）
    ///
    /// 窗口被关闭或按下 Esc 时返回 [`RenderError::WindowClosed`]。
    pub struct WindowSink {
        window: Window,
        title: String,
        buffer: Vec<u32>,
    }

    impl WindowSink {
        pub fn new(title: &str, width: u32, height: u32) -> Result<Self, RenderError> {
            let window = Window::new(
                title,
                width as usize,
                height as usize,
                WindowOptions::default(),
            )
            .map_err(|e| RenderError::Window(e.to_string()))?;
            tracing::debug!("Opened {}x{} window \"{}\"", width, height, title);
            Ok(WindowSink {
                window,
                title: title.to_string(),
                buffer: vec![0; width as usize * height as usize],
            })
        }
    }

    impl FrameSink for WindowSink {
        fn present(&mut self, frame: &RgbImage) -> Result<(), RenderError> {
            if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
                return Err(RenderError::WindowClosed);
            }

            let (w, h) = frame.dimensions();
            self.buffer.resize(w as usize * h as usize, 0);
            for (dst, px) in self.buffer.iter_mut().zip(frame.pixels()) {
                let [r, g, b] = px.0;
                *dst = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
            }

            self.window
                .update_with_buffer(&self.buffer, w as usize, h as usize)
                .map_err(|e| RenderError::Window(e.to_string()))
        }

        fn describe(&self) -> String {
            format!("window://{}", self.title)
        }
    }
}
