pub mod canvas_surface;
pub mod gl_surface;
pub mod map;
pub mod perspective;
pub mod renderer;

use thiserror::Error;

use crate::core::frame::Frame;
use crate::core::render_config::RenderConfig;
use crate::core::space::SpaceModel;
use crate::core::viewpoint::ViewpointState;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("帧尺寸 {frame_width}x{frame_height} 与画布 {surface_width}x{surface_height} 不一致")]
    SizeMismatch {
        frame_width: usize,
        frame_height: usize,
        surface_width: usize,
        surface_height: usize,
    },
}

/// 以像素计的帧尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    pub width: usize,
    pub height: usize,
}

impl FrameSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// 把视点与空间模型变成整幅像素帧的外部渲染器。
pub trait Renderer {
    /// 会话开始时 [`RenderConfig`] 的初始值
    fn default_config(&self) -> RenderConfig;

    /// 第一人称透视帧
    fn render_perspective(
        &self,
        space: &SpaceModel,
        viewpoint: &ViewpointState,
        config: &RenderConfig,
        size: FrameSize,
    ) -> Frame;

    /// 俯视地图帧，`scale` 为每空间单位的像素数
    fn render_map(
        &self,
        space: &SpaceModel,
        viewpoint: &ViewpointState,
        size: FrameSize,
        scale: f32,
    ) -> Frame;
}

/// 可见的输出面。
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// 空间单位到像素的缩放系数
    fn scale(&self) -> f32;

    fn resize(&mut self, width: f32, height: f32);

    /// 把一帧（连同其叠加图形）提交到可见输出
    fn submit(&mut self, frame: Frame) -> Result<(), RenderError>;

    fn frame_size(&self) -> FrameSize {
        FrameSize::new(
            self.width().max(0.0).round() as usize,
            self.height().max(0.0).round() as usize,
        )
    }
}
