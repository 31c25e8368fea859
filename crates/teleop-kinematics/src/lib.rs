//! teleop-kinematics - 平面机器人正运动学
//!
//! 基于指数积（PoE / 螺旋轴）公式，为 1R / 2R 平面机器人计算从基座到
//! 每个关节坐标系及末端执行器的齐次变换链。
//!
//! # 快速开始
//!
//! ```rust
//! use teleop_kinematics::{PlanarRobot, Rad};
//!
//! let robot = PlanarRobot::two_link(1.0, 1.0).unwrap();
//! let chain = robot.forward_kinematics(&[Rad(0.0), Rad(0.0)]);
//! let p = chain.end_effector().unwrap().translation();
//! assert!((p.x - 2.0).abs() < 1e-12);
//! ```

pub mod chain;
pub mod error;
pub mod joint;
pub mod planar;
pub mod screw;
pub mod transform;
pub mod units;

pub use chain::{FrameSpec, SerialChain, fkin_space};
pub use error::KinematicsError;
pub use joint::Joint;
pub use planar::{PlanarModel, PlanarRobot};
pub use screw::ScrewAxis;
pub use transform::{Transform, TransformChain};
pub use units::{Deg, Rad};

// 下游 crate 无需单独依赖 nalgebra 即可使用向量类型
pub use nalgebra;
