use crate::config::navigator::RendererConfig;
use crate::core::frame::Frame;
use crate::core::render_config::RenderConfig;
use crate::core::space::SpaceModel;
use crate::core::viewpoint::ViewpointState;
use crate::rendering::map::render_map_frame;
use crate::rendering::perspective::render_perspective_frame;
use crate::rendering::{FrameSize, Renderer};

/// 基于网格步进的渲染器，随可执行程序一起提供。
pub struct GridRenderer {
    settings: RendererConfig,
}

impl GridRenderer {
    pub fn new(settings: RendererConfig) -> Self {
        Self { settings }
    }
}

impl Renderer for GridRenderer {
    fn default_config(&self) -> RenderConfig {
        self.settings.render_defaults()
    }

    fn render_perspective(
        &self,
        space: &SpaceModel,
        viewpoint: &ViewpointState,
        config: &RenderConfig,
        size: FrameSize,
    ) -> Frame {
        render_perspective_frame(space, viewpoint, config, size, self.settings.ray_step)
    }

    fn render_map(
        &self,
        space: &SpaceModel,
        _viewpoint: &ViewpointState,
        size: FrameSize,
        scale: f32,
    ) -> Frame {
        render_map_frame(space, size, scale)
    }
}
