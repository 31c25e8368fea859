//! 光栅画布
//!
//! 在 `RgbImage` 上做最基本的绘制：带透明度的像素混合、粗线段、实心圆、矩形边框。
//! 坐标为浮点像素坐标，线段先按 Liang–Barsky 裁剪到画布再光栅化。

use image::{Rgb, RgbImage};

/// 光栅画布
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// 创建纯色画布
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Canvas {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// 按 `alpha` 混合一个像素（越界忽略）
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for c in 0..3 {
            let mixed = color.0[c] as f64 * alpha + dst.0[c] as f64 * (1.0 - alpha);
            dst.0[c] = mixed.round() as u8;
        }
    }

    /// 以 `(cx, cy)` 为中心填充实心圆
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb<u8>, alpha: f64) {
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) {
            return;
        }
        let r2 = radius * radius;
        let x0 = ((cx - radius).floor() as i64).max(0);
        let x1 = ((cx + radius).ceil() as i64).min(self.width() as i64 - 1);
        let y0 = ((cy - radius).floor() as i64).max(0);
        let y1 = ((cy + radius).ceil() as i64).min(self.height() as i64 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// 画线段（方形笔刷）
    ///
    /// 先裁剪到画布，再沿主轴逐列填充笔刷覆盖的副轴区间。
    /// 每个像素只混合一次，半透明线条不会出现深浅不一的斑点；
    /// 开销只取决于画布尺寸，与线段的世界长度无关。
    pub fn draw_line(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb<u8>,
        alpha: f64,
        width: u32,
    ) {
        let width = width.max(1) as i64;
        let half = (width - 1) / 2;
        let extra = (width - 1) - half;

        // 外扩一个笔刷宽度，保证贴边线段的笔刷仍完整
        let pad = (width + 1) as f64;
        let bounds = (
            -pad,
            -pad,
            self.width() as f64 - 1.0 + pad,
            self.height() as f64 - 1.0 + pad,
        );
        let Some((from, to)) = clip_segment(from, to, bounds) else {
            return;
        };

        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let x_major = dx.abs() >= dy.abs();
        // (主轴, 副轴) 坐标
        let (a0, b0, da, db) = if x_major {
            (from.0, from.1, dx, dy)
        } else {
            (from.1, from.0, dy, dx)
        };
        let (major_len, minor_len) = if x_major {
            (self.width() as i64, self.height() as i64)
        } else {
            (self.height() as i64, self.width() as i64)
        };

        // |slope| <= 1，相邻采样点的副轴坐标最多相差 1
        let slope = if da == 0.0 { 0.0 } else { db / da };
        let minor_at = |m: i64| (b0 + (m as f64 - a0) * slope).round() as i64;

        let (s, e) = (a0.round() as i64, (a0 + da).round() as i64);
        let (m_lo, m_hi) = (s.min(e), s.max(e));

        for c in (m_lo - half).max(0)..=(m_hi + extra).min(major_len - 1) {
            // 笔刷能覆盖第 c 列的采样点范围
            let lo = (c - extra).max(m_lo);
            let hi = (c + half).min(m_hi);
            if lo > hi {
                continue;
            }
            let (n0, n1) = (minor_at(lo), minor_at(hi));
            let n_first = (n0.min(n1) - half).max(0);
            let n_last = (n0.max(n1) + extra).min(minor_len - 1);
            for n in n_first..=n_last {
                let (x, y) = if x_major { (c, n) } else { (n, c) };
                self.blend_pixel(x, y, color, alpha);
            }
        }
    }

    /// 画矩形边框
    pub fn draw_rect(
        &mut self,
        (left, top, right, bottom): (f64, f64, f64, f64),
        color: Rgb<u8>,
        width: u32,
    ) {
        self.draw_line((left, top), (right, top), color, 1.0, width);
        self.draw_line((right, top), (right, bottom), color, 1.0, width);
        self.draw_line((right, bottom), (left, bottom), color, 1.0, width);
        self.draw_line((left, bottom), (left, top), color, 1.0, width);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// 取出图像
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

/// Liang–Barsky 线段裁剪
///
/// `bounds` 为 `(x_min, y_min, x_max, y_max)`。线段完全在外或含非有限坐标时返回 `None`。
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    (x_min, y_min, x_max, y_max): (f64, f64, f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    if ![from.0, from.1, dx, dy].iter().all(|v| v.is_finite()) {
        return None;
    }

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let edges = [
        (-dx, from.0 - x_min),
        (dx, x_max - from.0),
        (-dy, from.1 - y_min),
        (dy, y_max - from.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // 与该边平行
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    #[test]
    fn test_blend_pixel() {
        let mut canvas = Canvas::new(4, 4, WHITE);
        canvas.blend_pixel(1, 1, RED, 1.0);
        assert_eq!(canvas.pixel(1, 1), RED);

        canvas.blend_pixel(2, 2, Rgb([0, 0, 0]), 0.5);
        assert_eq!(canvas.pixel(2, 2), Rgb([128, 128, 128]));

        // 越界忽略
        canvas.blend_pixel(-1, 10, RED, 1.0);
    }

    #[test]
    fn test_draw_horizontal_line() {
        let mut canvas = Canvas::new(10, 5, WHITE);
        canvas.draw_line((1.0, 2.0), (8.0, 2.0), RED, 1.0, 1);
        for x in 1..=8 {
            assert_eq!(canvas.pixel(x, 2), RED);
        }
        assert_eq!(canvas.pixel(0, 2), WHITE);
        assert_eq!(canvas.pixel(9, 2), WHITE);
        assert_eq!(canvas.pixel(4, 1), WHITE);
    }

    #[test]
    fn test_translucent_line_blends_once() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.draw_line((0.0, 0.0), (9.0, 9.0), Rgb([0, 0, 0]), 0.5, 3);
        // 沿对角线的笔刷重叠，但每个像素只混合一次
        assert_eq!(canvas.pixel(5, 5), Rgb([128, 128, 128]));
    }

    #[test]
    fn test_fill_circle() {
        let mut canvas = Canvas::new(11, 11, WHITE);
        canvas.fill_circle(5.0, 5.0, 3.0, RED, 1.0);
        assert_eq!(canvas.pixel(5, 5), RED);
        assert_eq!(canvas.pixel(8, 5), RED);
        assert_eq!(canvas.pixel(8, 8), WHITE);
    }

    #[test]
    fn test_clip_segment() {
        let bounds = (0.0, 0.0, 10.0, 10.0);

        // 完全在内：不变
        assert_eq!(
            clip_segment((1.0, 1.0), (9.0, 5.0), bounds),
            Some(((1.0, 1.0), (9.0, 5.0)))
        );

        // 完全在外
        assert_eq!(clip_segment((-5.0, -1.0), (20.0, -1.0), bounds), None);
        assert_eq!(clip_segment((11.0, 0.0), (20.0, 9.0), bounds), None);

        // 穿过画布：裁到边界
        let (a, b) = clip_segment((-8.0, 5.0), (24.0, 5.0), bounds).unwrap();
        assert_eq!(a, (0.0, 5.0));
        assert_eq!(b, (10.0, 5.0));

        assert_eq!(clip_segment((f64::NAN, 0.0), (1.0, 1.0), bounds), None);
        assert_eq!(clip_segment((f64::MIN, 0.0), (f64::MAX, 0.0), bounds), None);
    }

    #[test]
    fn test_huge_line_is_clipped() {
        let mut canvas = Canvas::new(10, 5, WHITE);
        canvas.draw_line((-1e12, 2.0), (1e12, 2.0), RED, 1.0, 1);
        for x in 0..10 {
            assert_eq!(canvas.pixel(x, 2), RED);
        }
        assert_eq!(canvas.pixel(5, 1), WHITE);
        assert_eq!(canvas.pixel(5, 3), WHITE);
    }

    #[test]
    fn test_steep_line() {
        let mut canvas = Canvas::new(5, 10, WHITE);
        canvas.draw_line((2.0, 0.0), (2.0, 9.0), RED, 1.0, 1);
        for y in 0..10 {
            assert_eq!(canvas.pixel(2, y), RED);
        }
        assert_eq!(canvas.pixel(1, 4), WHITE);
        assert_eq!(canvas.pixel(3, 4), WHITE);
    }

    #[test]
    fn test_circle_far_outside_is_ignored() {
        let mut canvas = Canvas::new(4, 4, WHITE);
        canvas.fill_circle(1e15, -1e15, 3.0, RED, 1.0);
        canvas.fill_circle(f64::NAN, 1.0, 3.0, RED, 1.0);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(canvas.pixel(x, y), WHITE);
            }
        }
    }
}
