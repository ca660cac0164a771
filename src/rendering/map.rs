//! 俯视地图：格子 `(x, y)` 覆盖屏幕区域
//! `[W - (x+1)s, W - x·s] × [H - (y+1)s, H - y·s]`，横纵轴都翻转。

use egui::Color32;
use rayon::prelude::*;

use crate::core::frame::{Frame, FrameKind};
use crate::core::space::SpaceModel;
use crate::rendering::FrameSize;

/// 空地颜色
pub const MAP_BACKGROUND: Color32 = Color32::BLACK;

/// 屏幕像素中心对应的空间坐标
pub fn screen_to_space(px: usize, py: usize, size: FrameSize, scale: f32) -> (f64, f64) {
    let scale = scale as f64;
    let sx = (size.width as f64 - (px as f64 + 0.5)) / scale;
    let sy = (size.height as f64 - (py as f64 + 0.5)) / scale;
    (sx, sy)
}

/// 生成地图帧（rayon 按行并行）
pub fn render_map_frame(space: &SpaceModel, size: FrameSize, scale: f32) -> Frame {
    let mut frame = Frame::filled(FrameKind::Map, size.width, size.height, MAP_BACKGROUND);
    if size.is_empty() || !(scale.is_finite() && scale > 0.0) {
        return frame;
    }

    frame
        .pixels
        .par_chunks_mut(size.width)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, pixel) in row.iter_mut().enumerate() {
                let (sx, sy) = screen_to_space(px, py, size, scale);
                if let Some(color) = space.cell_at(sx, sy) {
                    *pixel = color.into();
                }
            }
        });

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::ColorRgba;

    #[test]
    fn cells_land_on_inverted_axes() {
        let mut space = SpaceModel::new(4, 4);
        space.draw_point(0, 0, Some(ColorRgba::WHITE));
        let size = FrameSize::new(32, 32);
        let frame = render_map_frame(&space, size, 8.0);

        // (0, 0) 位于右下角 8x8 区块
        assert_eq!(frame.pixel(31, 31), Some(Color32::WHITE));
        assert_eq!(frame.pixel(24, 24), Some(Color32::WHITE));
        assert_eq!(frame.pixel(23, 31), Some(MAP_BACKGROUND));
        assert_eq!(frame.pixel(0, 0), Some(MAP_BACKGROUND));
        assert_eq!(frame.kind, FrameKind::Map);
    }

    #[test]
    fn empty_size_yields_empty_frame() {
        let space = SpaceModel::new(4, 4);
        let frame = render_map_frame(&space, FrameSize::new(0, 10), 8.0);
        assert!(frame.pixels.is_empty());
    }
}
