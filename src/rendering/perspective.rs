//! 第一人称透视：每列一条光线，按固定步长前进直到撞墙或超出消失距离。
//!
//! 墙高 1 个空间单位；投影面距离由视野角推出，距离做鱼眼校正。

use egui::Color32;
use rayon::prelude::*;

use crate::core::frame::{Frame, FrameKind};
use crate::core::render_config::RenderConfig;
use crate::core::space::SpaceModel;
use crate::core::viewpoint::{direction, ViewpointState};
use crate::rendering::FrameSize;

pub const CEILING: Color32 = Color32::from_rgb(24, 24, 32);
pub const FLOOR: Color32 = Color32::from_rgb(64, 64, 64);

/// 某一列命中的墙段
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSlice {
    pub distance: f64,
    pub height: f64,
    pub color: Color32,
}

fn config_is_usable(config: &RenderConfig) -> bool {
    let fov = config.field_of_view;
    let vd = config.vanishing_distance;
    fov.is_finite() && fov > 0.0 && fov < 180.0 && vd.is_finite() && vd > 0.0
}

/// 沿 `angle` 方向步进，返回第一个非空格子的距离与颜色
fn march(
    space: &SpaceModel,
    origin: (f64, f64),
    angle: f64,
    max_distance: f64,
    step: f64,
) -> Option<(f64, crate::core::color::ColorRgba)> {
    let (dx, dy) = direction(angle);
    let mut t = step;
    while t <= max_distance {
        let (x, y) = (origin.0 + dx * t, origin.1 + dy * t);
        if space.is_outside(x, y) {
            return None;
        }
        if let Some(color) = space.cell_at(x, y) {
            return Some((t, color));
        }
        t += step;
    }
    None
}

pub fn cast_columns(
    space: &SpaceModel,
    viewpoint: &ViewpointState,
    config: &RenderConfig,
    size: FrameSize,
    step: f64,
) -> Vec<Option<WallSlice>> {
    let fov = config.field_of_view;
    let heading = viewpoint.heading();
    let projection = (size.width as f64 / 2.0) / (fov / 2.0).to_radians().tan();
    let origin = viewpoint.position();

    (0..size.width)
        .into_par_iter()
        .map(|column| {
            // 最左列对应 heading + fov/2（左转为正）
            let offset = fov / 2.0 - fov * (column as f64 + 0.5) / size.width as f64;
            let (t, color) = march(space, origin, heading + offset, config.vanishing_distance, step)?;
            let distance = t * offset.to_radians().cos();
            let shade = 1.0 - t / config.vanishing_distance;
            Some(WallSlice {
                distance,
                height: projection / distance.max(f64::EPSILON),
                color: color.shaded(shade).into(),
            })
        })
        .collect()
}

pub fn render_perspective_frame(
    space: &SpaceModel,
    viewpoint: &ViewpointState,
    config: &RenderConfig,
    size: FrameSize,
    step: f64,
) -> Frame {
    let mut frame = Frame::filled(FrameKind::Perspective, size.width, size.height, CEILING);
    if size.is_empty() {
        return frame;
    }
    if !config_is_usable(config) || !(step.is_finite() && step > 0.0) {
        log::trace!("透视参数不可用，输出纯色帧: {config:?}");
        return frame;
    }

    let slices = cast_columns(space, viewpoint, config, size, step);
    let horizon = size.height as f64 / 2.0;

    frame
        .pixels
        .par_chunks_mut(size.width)
        .enumerate()
        .for_each(|(py, row)| {
            let y = py as f64 + 0.5;
            let background = if y < horizon { CEILING } else { FLOOR };
            for (px, pixel) in row.iter_mut().enumerate() {
                *pixel = match slices[px] {
                    Some(slice) if (y - horizon).abs() <= slice.height / 2.0 => slice.color,
                    _ => background,
                };
            }
        });

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::ColorRgba;

    fn corridor() -> SpaceModel {
        // 视点正前方 (y 增大方向) 5 格处有一堵墙
        let mut space = SpaceModel::new(20, 20);
        space.draw_rectangle(0, 15, 19, 15, Some(ColorRgba::WHITE));
        space
    }

    #[test]
    fn center_column_hits_wall_ahead() {
        let space = corridor();
        let vp = ViewpointState::new(10.5, 10.5, 0.0);
        let config = RenderConfig::default();
        let slices = cast_columns(&space, &vp, &config, FrameSize::new(9, 9), 0.01);
        let center = slices[4].expect("center ray should hit");
        assert!((center.distance - 4.5).abs() < 0.02, "{}", center.distance);
    }

    #[test]
    fn nearer_walls_are_taller() {
        let space = corridor();
        let config = RenderConfig::default();
        let size = FrameSize::new(9, 9);
        let far = cast_columns(&space, &ViewpointState::new(10.5, 5.5, 0.0), &config, size, 0.01)[4]
            .unwrap();
        let near = cast_columns(&space, &ViewpointState::new(10.5, 12.5, 0.0), &config, size, 0.01)[4]
            .unwrap();
        assert!(near.height > far.height);
    }

    #[test]
    fn non_finite_config_degrades_to_flat_frame() {
        let space = corridor();
        let vp = ViewpointState::new(10.5, 10.5, 0.0);
        let config = RenderConfig {
            field_of_view: f64::NAN,
            ..RenderConfig::default()
        };
        let frame = render_perspective_frame(&space, &vp, &config, FrameSize::new(8, 8), 0.05);
        assert_eq!(frame.pixels.len(), 64);
        assert!(frame.pixels.iter().all(|p| *p == CEILING));
    }

    #[test]
    fn walls_beyond_vanishing_distance_are_not_drawn() {
        let space = corridor();
        let vp = ViewpointState::new(10.5, 1.5, 0.0);
        let config = RenderConfig {
            vanishing_distance: 5.0,
            ..RenderConfig::default()
        };
        let slices = cast_columns(&space, &vp, &config, FrameSize::new(5, 5), 0.05);
        assert!(slices.iter().all(Option::is_none));
    }
}
