//! 画面样式与视口

use crate::error::RenderError;
use image::Rgb;

/// 十六进制颜色（`0xRRGGBB`）转像素
pub const fn hex(rgb: u32) -> Rgb<u8> {
    Rgb([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8])
}

/// 画面配色与线宽
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    /// 背景色
    pub background: Rgb<u8>,
    /// 边框（spine）颜色
    pub spine: Rgb<u8>,
    /// 网格颜色
    pub grid: Rgb<u8>,
    /// 连杆与关节颜色
    pub link: Rgb<u8>,
    /// 坐标轴颜色（X, Y, Z）
    pub axes: [Rgb<u8>; 3],
    /// 连杆线宽（像素）
    pub link_width: u32,
    /// 关节标记半径（像素）
    pub joint_radius: u32,
    /// 边框线宽（像素）
    pub spine_width: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            background: hex(0xF6F6F3),
            spine: hex(0xD6D6D6),
            grid: hex(0x335095),
            link: hex(0xFF0000),
            axes: [hex(0xFF0000), hex(0x00FF00), hex(0x0000FF)],
            link_width: 2,
            joint_radius: 5,
            spine_width: 2,
        }
    }
}

/// 世界坐标 → 像素坐标映射（等比例）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// 四周留白（像素）
    pub margin: u32,
}

impl Viewport {
    /// 创建视口并校验参数
    pub fn new(
        width: u32,
        height: u32,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Result<Self, RenderError> {
        let viewport = Viewport {
            width,
            height,
            x_range,
            y_range,
            margin: 24,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    fn validate(&self) -> Result<(), RenderError> {
        if self.width <= 2 * self.margin || self.height <= 2 * self.margin {
            return Err(RenderError::InvalidViewport(format!(
                "{}x{} leaves no room inside a {}px margin",
                self.width, self.height, self.margin
            )));
        }
        let spans = [
            self.x_range.1 - self.x_range.0,
            self.y_range.1 - self.y_range.0,
        ];
        if spans.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(RenderError::InvalidViewport(format!(
                "empty range x={:?} y={:?}",
                self.x_range, self.y_range
            )));
        }
        Ok(())
    }

    /// 每世界单位对应的像素数（X/Y 相同，保证等比例）
    pub fn scale(&self) -> f64 {
        let inner_w = (self.width - 2 * self.margin) as f64;
        let inner_h = (self.height - 2 * self.margin) as f64;
        let sx = inner_w / (self.x_range.1 - self.x_range.0);
        let sy = inner_h / (self.y_range.1 - self.y_range.0);
        sx.min(sy)
    }

    /// 世界坐标 → 像素坐标（Y 轴向上）
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let scale = self.scale();
        let x_mid = (self.x_range.0 + self.x_range.1) / 2.0;
        let y_mid = (self.y_range.0 + self.y_range.1) / 2.0;
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;
        (cx + (x - x_mid) * scale, cy - (y - y_mid) * scale)
    }

    /// 绘图区域的像素边界 `(left, top, right, bottom)`
    pub fn plot_bounds(&self) -> (f64, f64, f64, f64) {
        let (left, top) = self.to_pixel(self.x_range.0, self.y_range.1);
        let (right, bottom) = self.to_pixel(self.x_range.1, self.y_range.0);
        (left, top, right, bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xF6F6F3), Rgb([0xF6, 0xF6, 0xF3]));
    }

    #[test]
    fn test_equal_aspect_mapping() {
        let vp = Viewport::new(648, 448, (-2.0, 4.0), (-2.0, 2.0)).unwrap();
        // 内部区域 600x400，x 跨度 6、y 跨度 4，比例均为 100 px/单位
        assert_eq!(vp.scale(), 100.0);
        assert_eq!(vp.to_pixel(1.0, 0.0), (324.0, 224.0));
        assert_eq!(vp.to_pixel(2.0, 1.0), (424.0, 124.0));
        assert_eq!(vp.plot_bounds(), (24.0, 24.0, 624.0, 424.0));
    }

    #[test]
    fn test_invalid_viewport() {
        assert!(Viewport::new(40, 40, (-2.0, 4.0), (-2.0, 2.0)).is_err());
        assert!(Viewport::new(640, 480, (1.0, 1.0), (-2.0, 2.0)).is_err());
        assert!(Viewport::new(640, 480, (0.0, 1.0), (2.0, f64::NAN)).is_err());
    }
}
