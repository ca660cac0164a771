//! # 罗盘叠加层
//!
//! 地图模式下在视点位置画一个白色小三角，指示当前朝向。
//!
//! 地图的纵横轴都是翻转的，所以三角的朝向取 `heading + 180°`。
//! 所有角度都由 [`facing_angle`] 纯函数推出，不会改动视点状态。

use crate::core::color::ColorRgba;
use crate::core::frame::Frame;
use crate::core::viewpoint::ViewpointState;

pub const COMPASS_COLOR: ColorRgba = ColorRgba::WHITE;

/// `heading + 180° + offset`，转为弧度
pub fn facing_angle(heading: f64, offset_degrees: f64) -> f64 {
    (heading + 180.0 + offset_degrees).to_radians()
}

/// 罗盘三角的屏幕坐标。`anchor` 是三角的后端点，不参与填充。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompassTriangle {
    pub anchor: [f64; 2],
    pub front: [f64; 2],
    pub left: [f64; 2],
    pub right: [f64; 2],
}

impl CompassTriangle {
    /// 填充顺序：front → left → right
    pub fn polygon(&self) -> Vec<[f32; 2]> {
        [self.front, self.left, self.right]
            .iter()
            .map(|[x, y]| [*x as f32, *y as f32])
            .collect()
    }
}

fn offset(point: [f64; 2], angle: f64, length: f64) -> [f64; 2] {
    [point[0] + angle.sin() * length, point[1] + angle.cos() * length]
}

/// 根据视点与画布尺寸计算三角各顶点
pub fn compass_geometry(
    viewpoint: &ViewpointState,
    width: f64,
    height: f64,
    scale: f64,
) -> CompassTriangle {
    let heading = viewpoint.heading();
    let theta = facing_angle(heading, 0.0);
    let (x, y) = viewpoint.position();

    let base = [
        width - (x * scale + scale / 2.0),
        height - (y * scale + scale / 2.0),
    ];
    let anchor = offset(base, theta, scale * 2.0);

    CompassTriangle {
        anchor,
        front: offset(anchor, theta, scale),
        left: offset(anchor, facing_angle(heading, 90.0), scale),
        right: offset(anchor, facing_angle(heading, -90.0), scale),
    }
}

pub struct CompassOverlay;

impl CompassOverlay {
    /// 计算罗盘并作为填充三角追加到帧的叠加层
    pub fn draw(
        frame: &mut Frame,
        viewpoint: &ViewpointState,
        width: f32,
        height: f32,
        scale: f32,
    ) -> CompassTriangle {
        let triangle = compass_geometry(viewpoint, width as f64, height as f64, scale as f64);
        frame.fill_polygon(triangle.polygon(), COMPASS_COLOR);
        triangle
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use egui::Color32;

    use super::*;
    use crate::core::frame::{FrameKind, OverlayShape};

    fn assert_point(actual: [f64; 2], expected: [f64; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < 1e-9 && (actual[1] - expected[1]).abs() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn heading_zero_at_ten_ten_scale_eight() {
        let vp = ViewpointState::new(10.0, 10.0, 0.0);
        let (w, h, s) = (800.0, 600.0, 8.0);
        let tri = compass_geometry(&vp, w, h, s);

        let a = PI;
        let anchor = [
            w - (10.0 * s + s / 2.0) + a.sin() * s * 2.0,
            h - (10.0 * s + s / 2.0) + a.cos() * s * 2.0,
        ];
        assert_point(tri.anchor, anchor);
        assert_point(tri.front, [anchor[0] + a.sin() * s, anchor[1] + a.cos() * s]);
        let l = PI + PI / 2.0;
        assert_point(tri.left, [anchor[0] + l.sin() * s, anchor[1] + l.cos() * s]);
        let r = PI - PI / 2.0;
        assert_point(tri.right, [anchor[0] + r.sin() * s, anchor[1] + r.cos() * s]);

        // 数值上：后端点 (716, 500)，尖端朝屏幕上方
        assert_point(tri.anchor, [716.0, 500.0]);
        assert_point(tri.front, [716.0, 492.0]);
        assert_point(tri.left, [708.0, 500.0]);
        assert_point(tri.right, [724.0, 500.0]);
    }

    #[test]
    fn heading_is_untouched_for_all_whole_degrees() {
        for deg in 0..360 {
            let heading = deg as f64 + 0.25;
            let vp = ViewpointState::new(3.0, 4.0, heading);
            let mut frame = Frame::filled(FrameKind::Map, 1, 1, Color32::BLACK);
            CompassOverlay::draw(&mut frame, &vp, 100.0, 100.0, 8.0);
            assert_eq!(vp.heading().to_bits(), heading.to_bits());
        }
    }

    #[test]
    fn draw_appends_one_white_triangle() {
        let vp = ViewpointState::new(1.0, 1.0, 90.0);
        let mut frame = Frame::filled(FrameKind::Map, 4, 4, Color32::BLACK);
        let tri = CompassOverlay::draw(&mut frame, &vp, 64.0, 64.0, 8.0);
        assert_eq!(
            frame.overlays,
            vec![OverlayShape::FilledPolygon {
                points: tri.polygon(),
                color: COMPASS_COLOR,
            }]
        );
    }

    #[test]
    fn front_vertex_points_along_facing_angle() {
        let vp = ViewpointState::new(0.0, 0.0, 90.0);
        let tri = compass_geometry(&vp, 100.0, 100.0, 10.0);
        // heading 90 → facing 270°，尖端在后端点左侧（屏幕 x 减小）
        assert!((tri.front[0] - (tri.anchor[0] - 10.0)).abs() < 1e-9);
        assert!((tri.front[1] - tri.anchor[1]).abs() < 1e-9);
    }
}
