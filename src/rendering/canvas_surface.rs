//! egui 中央画布上的 [`Surface`] 实现：像素走 GL 纹理，叠加图形由 egui painter 画在其上。

use std::sync::{Arc, Mutex, PoisonError};

use egui::{Color32, Pos2, Rect, Shape, Stroke, Ui};

use crate::core::frame::{Frame, OverlayShape};
use crate::rendering::gl_surface::{make_surface_callback, GlSurfaceState};
use crate::rendering::{RenderError, Surface};

const BACKGROUND: Color32 = Color32::from_rgb(30, 30, 40);

pub struct CanvasSurface {
    width: f32,
    height: f32,
    scale: f32,
    gl: Arc<Mutex<GlSurfaceState>>,
    overlays: Vec<OverlayShape>,
    last_frame: Option<Frame>,
}

impl CanvasSurface {
    pub fn new(scale: f32) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            scale,
            gl: Arc::new(Mutex::new(GlSurfaceState::new())),
            overlays: Vec::new(),
            last_frame: None,
        }
    }

    /// 最近一次提交的帧
    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn gl_state(&self) -> &Arc<Mutex<GlSurfaceState>> {
        &self.gl
    }

    /// 在 `rect` 内画出当前帧与叠加图形
    pub fn paint(&self, ui: &mut Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        painter.add(make_surface_callback(self.gl.clone(), rect, BACKGROUND));

        for overlay in &self.overlays {
            match overlay {
                OverlayShape::FilledPolygon { points, color } => {
                    let points: Vec<Pos2> = points
                        .iter()
                        .map(|[x, y]| rect.min + egui::vec2(*x, *y))
                        .collect();
                    painter.add(Shape::convex_polygon(points, Color32::from(*color), Stroke::NONE));
                }
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn submit(&mut self, frame: Frame) -> Result<(), RenderError> {
        let expected = self.frame_size();
        if frame.width != expected.width || frame.height != expected.height {
            return Err(RenderError::SizeMismatch {
                frame_width: frame.width,
                frame_height: frame.height,
                surface_width: expected.width,
                surface_height: expected.height,
            });
        }

        self.gl
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_frame_pixels(frame.to_rgba(), frame.width as u32, frame.height as u32);
        self.overlays = frame.overlays.clone();
        self.last_frame = Some(frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::ColorRgba;
    use crate::core::frame::FrameKind;

    #[test]
    fn submit_rejects_frames_of_the_wrong_size() {
        let mut surface = CanvasSurface::new(8.0);
        surface.resize(10.0, 10.0);
        let frame = Frame::filled(FrameKind::Map, 5, 10, Color32::BLACK);
        assert!(matches!(
            surface.submit(frame),
            Err(RenderError::SizeMismatch { .. })
        ));
        assert!(surface.last_frame().is_none());
    }

    #[test]
    fn submit_keeps_pixels_and_overlays() {
        let mut surface = CanvasSurface::new(8.0);
        surface.resize(4.0, 3.0);
        let mut frame = Frame::filled(FrameKind::Map, 4, 3, Color32::BLACK);
        frame.fill_polygon(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]], ColorRgba::WHITE);
        surface.submit(frame).unwrap();

        assert_eq!(surface.overlays.len(), 1);
        assert!(surface.gl_state().lock().unwrap().has_frame());
        assert_eq!(surface.last_frame().map(|f| f.kind), Some(FrameKind::Map));
    }
}
