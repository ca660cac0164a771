use std::sync::PoisonError;
use std::time::Instant;

use eframe::egui;

use crate::config::navigator::NavigatorConfig;
use crate::controller::binder::ConfigBinder;
use crate::controller::error_overlay::ErrorOverlay;
use crate::controller::events::{EventDispatcher, HostEvent};
use crate::controller::input::{InputController, KeyEvent, Modifiers};
use crate::controller::layout::ViewportSize;
use crate::controller::scheduler::RenderLoopScheduler;
use crate::controller::NavigationSession;
use crate::core::space::demo_space;
use crate::core::viewpoint::ViewpointState;
use crate::rendering::canvas_surface::CanvasSurface;
use crate::rendering::renderer::GridRenderer;
use crate::rendering::Renderer;
use crate::storage::export::{pick_export_path, save_frame_png};
use crate::ui::canvas_view::{allocate_canvas, show_canvas};
use crate::ui::control_panel::show_control_panel;
use crate::ui::error_panel::show_error_panel;
use crate::ui::status_bar::show_status_bar;
use crate::ui::theme;

pub struct NavigatorApp {
    session: NavigationSession,
    renderer: GridRenderer,
    dispatcher: EventDispatcher,
    scheduler: RenderLoopScheduler,
    surface: CanvasSurface,
    errors: ErrorOverlay,
    pending: Vec<HostEvent>,
    last_tick: Option<Instant>,
    measured_fps: f32,
    last_status: String,
}

impl NavigatorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: NavigatorConfig, errors: ErrorOverlay) -> Self {
        theme::apply_theme(&cc.egui_ctx);

        let renderer = GridRenderer::new(config.renderer.clone());
        let render_config = renderer.default_config();

        let space_cfg = &config.space;
        let viewpoint = ViewpointState::with_heading_policy(
            space_cfg.start_x,
            space_cfg.start_y,
            space_cfg.start_heading,
            config.input.normalize_heading,
        );
        let session = NavigationSession::new(
            viewpoint,
            render_config,
            demo_space(space_cfg.width, space_cfg.length),
        );

        let dispatcher = EventDispatcher::new(
            InputController::new(&config.input),
            ConfigBinder::bind(&session.config),
        );

        log::info!(
            "导航器启动: 空间 {}x{}, {} FPS, 缩放 {}",
            space_cfg.width,
            space_cfg.length,
            config.render_loop.frames_per_second,
            config.surface.scale
        );

        Self {
            session,
            renderer,
            dispatcher,
            scheduler: RenderLoopScheduler::new(config.render_loop.frames_per_second),
            surface: CanvasSurface::new(config.surface.scale),
            errors,
            pending: Vec::new(),
            last_tick: None,
            measured_fps: 0.0,
            last_status: "就绪".to_string(),
        }
    }

    /// 把本帧的键盘输入收进事件队列。文本框获得焦点时不处理。
    fn collect_key_events(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        ctx.input(|input| {
            for event in &input.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } = event
                {
                    self.pending.push(HostEvent::KeyDown(KeyEvent {
                        key: key_identifier(*key).to_string(),
                        modifiers: Modifiers {
                            alt: modifiers.alt,
                            shift: modifiers.shift,
                            ctrl: modifiers.ctrl,
                        },
                    }));
                }
            }
        });
    }

    fn dispatch_pending(&mut self) {
        for event in std::mem::take(&mut self.pending) {
            let dispatcher = &mut self.dispatcher;
            let session = &mut self.session;
            let surface = &mut self.surface;
            self.errors
                .guard(|| dispatcher.dispatch(event, session, surface));
        }
    }

    fn run_scheduler(&mut self, now: Instant) {
        let scheduler = &mut self.scheduler;
        let session = &self.session;
        let renderer = &self.renderer;
        let surface = &mut self.surface;
        let outcome = self
            .errors
            .guard(|| scheduler.run_due(now, session, renderer, surface));

        match outcome {
            Some(Ok(Some(_report))) => {
                if let Some(previous) = self.last_tick {
                    let elapsed = now.duration_since(previous).as_secs_f32();
                    if elapsed > 0.0 {
                        let instant_fps = 1.0 / elapsed;
                        self.measured_fps = if self.measured_fps == 0.0 {
                            instant_fps
                        } else {
                            self.measured_fps * 0.9 + instant_fps * 0.1
                        };
                    }
                }
                self.last_tick = Some(now);
            }
            Some(Ok(None)) | None => {}
            Some(Err(err)) => self.errors.report(&err),
        }
    }

    fn export_png(&mut self) {
        let Some(path) = pick_export_path() else {
            return;
        };
        match save_frame_png(self.surface.last_frame(), &path) {
            Ok(()) => self.last_status = format!("已导出: {}", path.display()),
            Err(err) => {
                self.errors.report(&err);
                self.last_status = "导出失败".to_string();
            }
        }
    }
}

/// egui 按键 → 宿主按键标识。方向键用 `ArrowUp` 这类名字，其余沿用 egui 的键名。
fn key_identifier(key: egui::Key) -> &'static str {
    match key {
        egui::Key::ArrowUp => "ArrowUp",
        egui::Key::ArrowDown => "ArrowDown",
        egui::Key::ArrowLeft => "ArrowLeft",
        egui::Key::ArrowRight => "ArrowRight",
        other => other.name(),
    }
}

impl eframe::App for NavigatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_key_events(ctx);

        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = show_control_panel(ui, self.session.mode, self.dispatcher.binder_mut());

                    if action.toggle_map {
                        self.pending.push(HostEvent::ToggleMap);
                    }
                    self.pending
                        .extend(action.steps.into_iter().map(HostEvent::Step));
                    self.pending.extend(
                        action
                            .edits
                            .into_iter()
                            .map(|(field, raw)| HostEvent::ConfigEdited { field, raw }),
                    );
                    if action.export_png {
                        self.export_png();
                    }
                });
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            show_status_bar(
                ui,
                self.measured_fps,
                1.0 / self.scheduler.clock().interval().as_secs_f64(),
                self.scheduler.ticks(),
                self.session.mode,
                &self.session.viewpoint,
                self.scheduler.clock().dropped(),
                &self.last_status,
            );
            if !self.errors.log().is_empty() {
                ui.separator();
                if show_error_panel(ui, self.errors.log()) {
                    self.errors.log().clear();
                }
            }
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let rect = allocate_canvas(ui);
                self.pending.push(HostEvent::Resized(ViewportSize::new(
                    rect.width(),
                    rect.height(),
                )));
                self.dispatch_pending();

                let now = Instant::now();
                self.run_scheduler(now);

                show_canvas(ui, rect, &self.surface, self.session.mode.label());
                ctx.request_repaint_after(self.scheduler.time_until_next(now));
            });
    }

    fn on_exit(&mut self, gl: Option<&eframe::glow::Context>) {
        self.scheduler.cancel_token().cancel();
        if let Some(gl) = gl {
            self.surface
                .gl_state()
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .destroy(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_keys_map_to_bound_identifiers() {
        let input = InputController::default();
        for key in [
            egui::Key::ArrowUp,
            egui::Key::ArrowDown,
            egui::Key::ArrowLeft,
            egui::Key::ArrowRight,
        ] {
            assert!(input.command_for(key_identifier(key)).is_some(), "{key:?}");
        }
    }

    #[test]
    fn letter_keys_use_egui_names() {
        let input = InputController::default();
        assert_eq!(key_identifier(egui::Key::W), "W");
        assert!(input.command_for(key_identifier(egui::Key::W)).is_some());
        assert!(input.command_for(key_identifier(egui::Key::Q)).is_none());
    }
}
