//! # 导航与渲染循环控制器
//!
//! 持有视点状态，按固定节奏产出帧，计算罗盘叠加层，
//! 并在用户输入与渲染参数之间做中转。
//!
//! 所有宿主回调（按键 / 点击 / 参数编辑 / 窗口缩放）都经由
//! [`events::EventDispatcher`] 进入，渲染循环由 [`scheduler::RenderLoopScheduler`]
//! 以调用方给定的时间点驱动，因此整个控制器不依赖真实窗口即可测试。

pub mod binder;
pub mod compass;
pub mod error_overlay;
pub mod events;
pub mod input;
pub mod layout;
pub mod scheduler;

use crate::core::render_config::RenderConfig;
use crate::core::space::SpaceModel;
use crate::core::viewpoint::ViewpointState;

/// 当前使用哪种视图出帧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    Map,
    #[default]
    Perspective,
}

impl RenderMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Map => Self::Perspective,
            Self::Perspective => Self::Map,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Map => "地图",
            Self::Perspective => "透视",
        }
    }
}

/// 一次会话内的全部导航状态。
///
/// `viewpoint` 只由输入控制器写入，`config` 只由参数绑定器写入；
/// 渲染循环每个 tick 以不可变借用读取。
#[derive(Debug, Clone)]
pub struct NavigationSession {
    pub viewpoint: ViewpointState,
    pub mode: RenderMode,
    pub config: RenderConfig,
    pub space: SpaceModel,
}

impl NavigationSession {
    pub fn new(viewpoint: ViewpointState, config: RenderConfig, space: SpaceModel) -> Self {
        Self {
            viewpoint,
            mode: RenderMode::default(),
            config,
            space,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! 控制器测试共用的假渲染器 / 假画布。

    use std::cell::RefCell;

    use egui::Color32;

    use crate::core::frame::{Frame, FrameKind};
    use crate::core::render_config::RenderConfig;
    use crate::core::space::SpaceModel;
    use crate::core::viewpoint::ViewpointState;
    use crate::rendering::{FrameSize, RenderError, Renderer, Surface};

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum RenderCall {
        Map,
        Perspective { field_of_view: f64 },
    }

    #[derive(Default)]
    pub struct RecordingRenderer {
        pub calls: RefCell<Vec<RenderCall>>,
    }

    impl Renderer for RecordingRenderer {
        fn default_config(&self) -> RenderConfig {
            RenderConfig::default()
        }

        fn render_perspective(
            &self,
            _space: &SpaceModel,
            _viewpoint: &ViewpointState,
            config: &RenderConfig,
            size: FrameSize,
        ) -> Frame {
            self.calls.borrow_mut().push(RenderCall::Perspective {
                field_of_view: config.field_of_view,
            });
            Frame::filled(FrameKind::Perspective, size.width, size.height, Color32::GRAY)
        }

        fn render_map(
            &self,
            _space: &SpaceModel,
            _viewpoint: &ViewpointState,
            size: FrameSize,
            _scale: f32,
        ) -> Frame {
            self.calls.borrow_mut().push(RenderCall::Map);
            Frame::filled(FrameKind::Map, size.width, size.height, Color32::BLACK)
        }
    }

    pub struct RecordingSurface {
        pub width: f32,
        pub height: f32,
        pub scale: f32,
        pub submitted: Vec<Frame>,
    }

    impl RecordingSurface {
        pub fn new(width: f32, height: f32, scale: f32) -> Self {
            Self {
                width,
                height,
                scale,
                submitted: Vec::new(),
            }
        }
    }

    impl Surface for RecordingSurface {
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
            self.submitted.push(frame);
            Ok(())
        }
    }

    pub fn session() -> super::NavigationSession {
        super::NavigationSession::new(
            ViewpointState::new(10.0, 10.0, 0.0),
            RenderConfig::default(),
            SpaceModel::new(20, 20),
        )
    }
}
