//! 渲染器产出的一帧：整幅像素 + 叠加在上方的矢量图形。

use egui::Color32;

use crate::core::color::ColorRgba;

/// 帧的来源视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Map,
    Perspective,
}

/// 叠加在像素之上的矢量图形，由 Surface 在提交时绘制
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayShape {
    FilledPolygon {
        points: Vec<[f32; 2]>,
        color: ColorRgba,
    },
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub kind: FrameKind,
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Color32>,
    pub overlays: Vec<OverlayShape>,
}

impl Frame {
    pub fn filled(kind: FrameKind, width: usize, height: usize, color: Color32) -> Self {
        Self {
            kind,
            width,
            height,
            pixels: vec![color; width * height],
            overlays: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// 追加一个填充多边形（按给定顶点顺序闭合）
    pub fn fill_polygon(&mut self, points: Vec<[f32; 2]>, color: ColorRgba) {
        self.overlays.push(OverlayShape::FilledPolygon { points, color });
    }

    /// 打包为 RGBA 字节，供纹理上传
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// 把叠加图形栅格化进像素后打包为 RGBA，供 PNG 导出
    pub fn to_rgba_flattened(&self) -> Vec<u8> {
        let mut pixels = self.pixels.clone();
        for overlay in &self.overlays {
            match overlay {
                OverlayShape::FilledPolygon { points, color } => {
                    fill_convex(&mut pixels, self.width, self.height, points, (*color).into());
                }
            }
        }
        pixels.iter().flat_map(|c| c.to_array()).collect()
    }
}

/// 按像素中心填充凸多边形，顶点顺序不限
fn fill_convex(pixels: &mut [Color32], width: usize, height: usize, points: &[[f32; 2]], color: Color32) {
    if points.len() < 3 || width == 0 || height == 0 {
        return;
    }
    let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
    let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for [x, y] in points {
        min_x = min_x.min(*x);
        min_y = min_y.min(*y);
        max_x = max_x.max(*x);
        max_y = max_y.max(*y);
    }
    if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
        return;
    }

    let x0 = min_x.floor().max(0.0) as usize;
    let y0 = min_y.floor().max(0.0) as usize;
    let x1 = (max_x.ceil().max(0.0) as usize).min(width);
    let y1 = (max_y.ceil().max(0.0) as usize).min(height);

    for py in y0..y1 {
        for px in x0..x1 {
            if contains(points, px as f32 + 0.5, py as f32 + 0.5) {
                pixels[py * width + px] = color;
            }
        }
    }
}

fn contains(points: &[[f32; 2]], x: f32, y: f32) -> bool {
    let (mut pos, mut neg) = (false, false);
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        let cross = (b[0] - a[0]) * (y - a[1]) - (b[1] - a[1]) * (x - a[0]);
        pos |= cross > 0.0;
        neg |= cross < 0.0;
    }
    !(pos && neg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattening_burns_polygons_into_pixels() {
        let mut frame = Frame::filled(FrameKind::Map, 8, 8, Color32::BLACK);
        frame.fill_polygon(vec![[1.0, 1.0], [1.0, 6.0], [6.0, 1.0]], ColorRgba::WHITE);
        let rgba = frame.to_rgba_flattened();
        let at = |x: usize, y: usize| &rgba[(y * 8 + x) * 4..(y * 8 + x) * 4 + 4];

        assert_eq!(at(2, 2), &[255, 255, 255, 255]);
        assert_eq!(at(6, 6), &[0, 0, 0, 255]);
        assert_eq!(at(0, 0), &[0, 0, 0, 255]);
        // 原始像素不受影响
        assert_eq!(frame.pixel(2, 2), Some(Color32::BLACK));
    }

    #[test]
    fn polygons_outside_the_frame_are_clipped() {
        let mut frame = Frame::filled(FrameKind::Map, 4, 4, Color32::BLACK);
        frame.fill_polygon(vec![[10.0, 10.0], [20.0, 10.0], [10.0, 20.0]], ColorRgba::WHITE);
        frame.fill_polygon(vec![[-5.0, -5.0], [2.0, -5.0], [-5.0, 2.0]], ColorRgba::WHITE);
        assert_eq!(frame.to_rgba_flattened(), frame.to_rgba());
    }
}
