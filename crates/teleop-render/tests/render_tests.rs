//! 渲染输出集成测试

use std::time::{Duration, Instant};
use teleop_kinematics::{PlanarRobot, Rad};
use teleop_render::{AxesOverlay, FrameSink, PlotStyle, PngSink, RobotRenderer, Viewport};

fn renderer() -> RobotRenderer {
    let viewport = Viewport::new(320, 240, (-2.0, 4.0), (-2.0, 2.0)).unwrap();
    RobotRenderer::new(viewport).with_axes(AxesOverlay::default())
}

#[test]
fn test_png_sink_writes_decodable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frames").join("robot.png");

    let robot = PlanarRobot::two_link(1.0, 2.0).unwrap();
    let chain = robot.forward_kinematics(&[Rad(0.4), Rad(-0.8)]);
    let frame = renderer().render(&chain);

    let mut sink = PngSink::new(&path);
    sink.present(&frame).unwrap();
    // 第二帧覆盖写入
    sink.present(&frame).unwrap();

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded, frame);
    assert!(!path.with_extension("png.tmp").exists());
}

#[test]
fn test_frames_differ_with_angle() {
    let robot = PlanarRobot::one_link(1.5).unwrap();
    let r = renderer();
    let a = r.render(&robot.forward_kinematics(&[Rad(0.0)]));
    let b = r.render(&robot.forward_kinematics(&[Rad(1.0)]));
    assert_ne!(a, b);

    // 相同输入 → 相同输出
    let c = r.render(&robot.forward_kinematics(&[Rad(1.0)]));
    assert_eq!(b, c);
}

#[test]
fn test_link_outside_viewport_is_clipped() {
    let robot = PlanarRobot::one_link(100.0).unwrap();
    let frame = renderer().render(&robot.forward_kinematics(&[Rad(2.0)]));
    assert_eq!(frame.dimensions(), (320, 240));
}

#[test]
fn test_long_link_render_cost_is_bounded() {
    let viewport = Viewport::new(648, 448, (-2.0, 4.0), (-2.0, 2.0)).unwrap();
    let renderer = RobotRenderer::new(viewport).with_axes(AxesOverlay::default());
    let robot = PlanarRobot::one_link(1e6).unwrap();
    let chain = robot.forward_kinematics(&[Rad(0.3)]);

    let start = Instant::now();
    let frame = renderer.render(&chain);
    let elapsed = start.elapsed();
    assert!(elapsed < Duration::from_secs(2), "render took {elapsed:?}");

    // 连杆穿过可见区域：(2, 2·tan 0.3) 处为连杆颜色
    let (x, y) = viewport.to_pixel(2.0, 2.0 * 0.3_f64.tan());
    assert_eq!(*frame.get_pixel(x as u32, y as u32), PlotStyle::default().link);
}

#[test]
fn test_huge_viewport_range_renders() {
    let viewport = Viewport::new(648, 448, (-1e12, 1e12), (-1e12, 1e12)).unwrap();
    let robot = PlanarRobot::one_link(1.0).unwrap();

    let start = Instant::now();
    let frame = RobotRenderer::new(viewport).render(&robot.forward_kinematics(&[Rad(0.0)]));
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(frame.dimensions(), (648, 448));
}
