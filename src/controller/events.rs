//! # 宿主事件分发
//!
//! 按键、切换按钮、参数编辑、视口缩放都汇入同一个 [`HostEvent`] 队列，
//! 由 [`EventDispatcher`] 交给对应的处理者。每个处理者只是
//! `(事件, 当前状态) -> 状态修改`，不触发重绘，修改在下一个 tick 生效。

use crate::controller::binder::{ConfigBinder, ConfigField};
use crate::controller::input::{InputController, KeyEvent, NavigationCommand, StepDirection};
use crate::controller::layout::{LayoutManager, ViewportSize};
use crate::controller::{NavigationSession, RenderMode};
use crate::rendering::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    KeyDown(KeyEvent),
    /// 地图 / 透视切换按钮被点击
    ToggleMap,
    /// 面板上的步进按钮
    Step(StepDirection),
    ConfigEdited { field: ConfigField, raw: String },
    Resized(ViewportSize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Navigated(NavigationCommand),
    ModeChanged(RenderMode),
    ConfigChanged { field: ConfigField, value: f64 },
    Resized { changed: bool },
    Ignored,
}

pub struct EventDispatcher {
    input: InputController,
    binder: ConfigBinder,
    layout: LayoutManager,
}

impl EventDispatcher {
    pub fn new(input: InputController, binder: ConfigBinder) -> Self {
        Self {
            input,
            binder,
            layout: LayoutManager::new(),
        }
    }

    pub fn binder_mut(&mut self) -> &mut ConfigBinder {
        &mut self.binder
    }

    pub fn dispatch<S: Surface + ?Sized>(
        &mut self,
        event: HostEvent,
        session: &mut NavigationSession,
        surface: &mut S,
    ) -> EventOutcome {
        match event {
            HostEvent::KeyDown(key) => match self.input.handle_key(&key, &mut session.viewpoint) {
                Some(command) => EventOutcome::Navigated(command),
                None => EventOutcome::Ignored,
            },
            HostEvent::ToggleMap => {
                session.mode = session.mode.toggled();
                log::info!("切换到{}视图", session.mode.label());
                EventOutcome::ModeChanged(session.mode)
            }
            HostEvent::Step(direction) => match self.input.handle_step(
                direction,
                &session.config,
                &mut session.viewpoint,
            ) {
                Some(command) => EventOutcome::Navigated(command),
                None => EventOutcome::Ignored,
            },
            HostEvent::ConfigEdited { field, raw } => {
                let value = self.binder.apply_edit(field, &raw, &mut session.config);
                EventOutcome::ConfigChanged { field, value }
            }
            HostEvent::Resized(viewport) => EventOutcome::Resized {
                changed: self.layout.apply(surface, viewport),
            },
        }
    }
}
