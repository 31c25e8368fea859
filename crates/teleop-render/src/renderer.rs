//! 机器人可视化
//!
//! 只读消费变换链，每次控制循环生成一帧光栅图像：
//!
//! - 连杆：基座 → 关节 → ... → 末端，红色线段
//! - 关节标记：基座与除末端外的每个坐标系原点
//! - 坐标轴（可选）：每个坐标系的 X/Y/Z 单位向量（按长度缩放，半透明）
//! - 功率模式：单点功率计，纵轴上限随历史最大值自动缩放

use crate::canvas::Canvas;
use crate::style::{PlotStyle, Viewport};
use image::{Rgb, RgbImage};
use teleop_kinematics::TransformChain;
use teleop_kinematics::nalgebra::Vector3;

/// 网格线透明度
const GRID_ALPHA: f64 = 0.08;

/// 相邻网格线的最小像素间距，超出时按整数倍抽稀
const MIN_GRID_SPACING_PX: f64 = 4.0;

/// 投影长度小于该值（像素）的坐标轴不绘制（例如平面内的 Z 轴）
const MIN_ARROW_PX: f64 = 0.5;

/// 坐标轴叠加层参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesOverlay {
    /// 单位向量缩放长度（世界单位）
    pub length: f64,
    /// 透明度
    pub alpha: f64,
}

impl Default for AxesOverlay {
    fn default() -> Self {
        AxesOverlay {
            length: 1.0,
            alpha: 0.333,
        }
    }
}

/// 机器人渲染器
#[derive(Debug, Clone)]
pub struct RobotRenderer {
    viewport: Viewport,
    style: PlotStyle,
    axes: Option<AxesOverlay>,
}

impl RobotRenderer {
    pub fn new(viewport: Viewport) -> Self {
        RobotRenderer {
            viewport,
            style: PlotStyle::default(),
            axes: None,
        }
    }

    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    /// 启用坐标轴叠加
    pub fn with_axes(mut self, overlay: AxesOverlay) -> Self {
        self.axes = Some(overlay);
        self
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// 渲染一帧机器人画面
    pub fn render(&self, chain: &TransformChain) -> RgbImage {
        let mut canvas = self.blank_plot();
        let vp = &self.viewport;
        let style = &self.style;

        for (from, to) in chain.link_segments() {
            canvas.draw_line(
                vp.to_pixel(from.0, from.1),
                vp.to_pixel(to.0, to.1),
                style.link,
                1.0,
                style.link_width,
            );
        }

        let radius = style.joint_radius as f64;
        let (bx, by) = vp.to_pixel(0.0, 0.0);
        canvas.fill_circle(bx, by, radius, style.link, 1.0);

        let origins = chain.planar_origins();
        for &(x, y) in origins.iter().take(origins.len().saturating_sub(1)) {
            let (px, py) = vp.to_pixel(x, y);
            canvas.fill_circle(px, py, radius, style.link, 1.0);
        }

        if let Some(overlay) = self.axes {
            self.draw_axes(&mut canvas, chain, overlay);
        }

        canvas.into_image()
    }

    /// 渲染功率计：x 居中的单点，纵轴 `[0, y_max]`
    pub fn render_power(&self, power: f64, y_max: f64) -> RgbImage {
        let vp = &self.viewport;
        let style = &self.style;
        let mut canvas = Canvas::new(vp.width, vp.height, style.background);

        let (_, top, _, bottom) = vp.plot_bounds();
        let x = vp.width as f64 / 2.0;
        canvas.draw_line((x, top), (x, bottom), style.spine, 1.0, 1);

        let y_max = if y_max.is_finite() && y_max > 0.0 { y_max } else { 1.0 };
        let fraction = (power / y_max).clamp(0.0, 1.0);
        let y = bottom - fraction * (bottom - top);
        canvas.fill_circle(x, y, style.joint_radius as f64, style.grid, 1.0);

        canvas.into_image()
    }

    /// 背景 + 整数网格 + 边框
    fn blank_plot(&self) -> Canvas {
        let vp = &self.viewport;
        let style = &self.style;
        let mut canvas = Canvas::new(vp.width, vp.height, style.background);
        let (left, top, right, bottom) = vp.plot_bounds();

        let stride = grid_stride(vp.scale());
        for gx in grid_ticks(vp.x_range, stride) {
            let (px, _) = vp.to_pixel(gx, 0.0);
            canvas.draw_line((px, top), (px, bottom), style.grid, GRID_ALPHA, 1);
        }
        for gy in grid_ticks(vp.y_range, stride) {
            let (_, py) = vp.to_pixel(0.0, gy);
            canvas.draw_line((left, py), (right, py), style.grid, GRID_ALPHA, 1);
        }

        canvas.draw_rect((left, top, right, bottom), style.spine, style.spine_width);
        canvas
    }

    fn draw_axes(&self, canvas: &mut Canvas, chain: &TransformChain, overlay: AxesOverlay) {
        let vp = &self.viewport;

        for frame in chain {
            let origin = frame.translation();
            let start = vp.to_pixel(origin.x, origin.y);

            for (i, &color) in self.style.axes.iter().enumerate() {
                let mut unit = Vector3::zeros();
                unit[i] = overlay.length;
                let tip = frame.transform_point(&unit);
                let end = vp.to_pixel(tip.x, tip.y);

                if (end.0 - start.0).hypot(end.1 - start.1) < MIN_ARROW_PX {
                    continue;
                }
                draw_arrow(canvas, start, end, color, overlay.alpha);
            }
        }
    }
}

/// 网格步长（世界单位，正整数）
fn grid_stride(scale: f64) -> f64 {
    (MIN_GRID_SPACING_PX / scale).ceil().max(1.0)
}

/// `range` 内 `stride` 的所有整数倍
fn grid_ticks((lo, hi): (f64, f64), stride: f64) -> impl Iterator<Item = f64> {
    let first = (lo / stride).ceil();
    let last = (hi / stride).floor();
    let count = if last >= first { (last - first) as u64 + 1 } else { 0 };
    (0..count).map(move |k| (first + k as f64) * stride)
}

/// 带箭头的线段
fn draw_arrow(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64), color: Rgb<u8>, alpha: f64) {
    canvas.draw_line(from, to, color, alpha, 2);

    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    let head = (len * 0.15).min(10.0);
    let (ux, uy) = (dx / len, dy / len);
    for side in [-1.0, 1.0] {
        // 箭头两翼：沿反方向后退，再向两侧偏移
        let wing = (
            to.0 - head * ux - side * head * 0.5 * uy,
            to.1 - head * uy + side * head * 0.5 * ux,
        );
        canvas.draw_line(to, wing, color, alpha, 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::hex;
    use teleop_kinematics::{PlanarRobot, Rad};

    fn viewport() -> Viewport {
        Viewport::new(648, 448, (-2.0, 4.0), (-2.0, 2.0)).unwrap()
    }

    #[test]
    fn test_render_dimensions() {
        let robot = PlanarRobot::one_link(1.0).unwrap();
        let chain = robot.forward_kinematics(&[Rad(0.0)]);
        let frame = RobotRenderer::new(viewport()).render(&chain);
        assert_eq!(frame.dimensions(), (648, 448));
    }

    #[test]
    fn test_link_pixels_are_red() {
        let robot = PlanarRobot::two_link(1.0, 1.0).unwrap();
        let chain = robot.forward_kinematics(&[Rad(0.0), Rad(0.0)]);
        let frame = RobotRenderer::new(viewport()).render(&chain);

        // 链沿 +X：(0.5, 0) 与 (1.5, 0) 都在连杆上；(1, 1) 不在
        let vp = viewport();
        let (x, y) = vp.to_pixel(1.5, 0.0);
        assert_eq!(*frame.get_pixel(x as u32, y as u32), hex(0xFF0000));
        let (x, y) = vp.to_pixel(0.5, 0.0);
        assert_eq!(*frame.get_pixel(x as u32, y as u32), hex(0xFF0000));
        let (x, y) = vp.to_pixel(1.0, 1.0);
        assert_ne!(*frame.get_pixel(x as u32, y as u32), hex(0xFF0000));
    }

    #[test]
    fn test_end_effector_has_no_marker() {
        let robot = PlanarRobot::one_link(1.0).unwrap();
        let chain = robot.forward_kinematics(&[Rad(0.0)]);
        let frame = RobotRenderer::new(viewport()).render(&chain);

        // 末端 (1, 0) 正上方 3 像素：有关节标记才会是红色
        let vp = viewport();
        let (x, y) = vp.to_pixel(1.0, 0.0);
        assert_ne!(*frame.get_pixel(x as u32, y as u32 - 3), hex(0xFF0000));
        let (x, y) = vp.to_pixel(0.0, 0.0);
        assert_eq!(*frame.get_pixel(x as u32, y as u32 - 3), hex(0xFF0000));
    }

    #[test]
    fn test_axes_overlay_changes_frame() {
        let robot = PlanarRobot::one_link(1.0).unwrap();
        let chain = robot.forward_kinematics(&[Rad(0.3)]);
        let plain = RobotRenderer::new(viewport()).render(&chain);
        let with_axes = RobotRenderer::new(viewport())
            .with_axes(AxesOverlay::default())
            .render(&chain);
        assert_ne!(plain, with_axes);
    }

    #[test]
    fn test_power_gauge_position() {
        let renderer = RobotRenderer::new(viewport());
        let full = renderer.render_power(10.0, 10.0);
        let (_, top, _, bottom) = viewport().plot_bounds();
        let x = 648 / 2;
        assert_eq!(*full.get_pixel(x, top as u32), PlotStyle::default().grid);

        let empty = renderer.render_power(0.0, 10.0);
        assert_eq!(*empty.get_pixel(x, bottom as u32), PlotStyle::default().grid);

        // 非法上限不 panic
        let _ = renderer.render_power(5.0, 0.0);
    }

    #[test]
    fn test_grid_stride() {
        // 默认视口约 100 px / 单位：每个整数一条
        assert_eq!(grid_stride(viewport().scale()), 1.0);
        assert_eq!(grid_stride(4.0), 1.0);
        assert_eq!(grid_stride(1.0), 4.0);
        assert_eq!(grid_stride(3.0), 2.0);
        assert_eq!(grid_stride(0.25), 16.0);
    }

    #[test]
    fn test_grid_ticks() {
        let ticks: Vec<f64> = grid_ticks((-2.0, 4.0), 1.0).collect();
        assert_eq!(ticks, vec![-2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]);

        let ticks: Vec<f64> = grid_ticks((-2.5, 9.0), 4.0).collect();
        assert_eq!(ticks, vec![0.0, 4.0, 8.0]);

        assert_eq!(grid_ticks((0.2, 0.8), 1.0).count(), 0);
    }

    #[test]
    fn test_grid_lines_bounded_by_pixels() {
        let vp = Viewport::new(648, 448, (-1e9, 1e9), (-1e9, 1e9)).unwrap();
        let stride = grid_stride(vp.scale());
        let lines =
            grid_ticks(vp.x_range, stride).count() + grid_ticks(vp.y_range, stride).count();
        assert!(lines <= (648 + 448) / 4 + 2, "{lines} grid lines");
    }
}
