//! # Teleop Render
//!
//! 平面机器人运动学可视化：把 [`TransformChain`](teleop_kinematics::TransformChain)
//! 栅格化为一帧图像，并交给 [`FrameSink`] 输出（PNG / 窗口 / 内存）。
//!
//! 渲染只读消费运动学结果，不会反向影响控制回路。

pub mod canvas;
pub mod error;
pub mod renderer;
pub mod sink;
pub mod style;

pub use canvas::Canvas;
pub use error::RenderError;
pub use renderer::{AxesOverlay, RobotRenderer};
#[cfg(feature = "window")]
pub use sink::WindowSink;
pub use sink::{FrameSink, MemorySink, NullSink, PngSink};
pub use style::{PlotStyle, Viewport, hex};

pub use image::RgbImage;
