use egui::Ui;

use crate::controller::binder::{ConfigBinder, ConfigField};
use crate::controller::input::StepDirection;
use crate::controller::RenderMode;
use crate::ui::theme;

// ── action returned to the app ──────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ControlAction {
    pub toggle_map: bool,
    pub steps: Vec<StepDirection>,
    pub edits: Vec<(ConfigField, String)>,
    pub export_png: bool,
}

// ── panel rendering ─────────────────────────────────────────

pub fn show_control_panel(ui: &mut Ui, mode: RenderMode, binder: &mut ConfigBinder) -> ControlAction {
    let mut action = ControlAction::default();

    ui.heading("控制面板");
    ui.separator();

    // ── view mode ──
    ui.label(format!("当前视图: {}", mode.label()));
    let toggle_text = match mode {
        RenderMode::Map => "👁 切换到透视",
        RenderMode::Perspective => "🗺 切换到地图",
    };
    if ui.button(toggle_text).clicked() {
        action.toggle_map = true;
    }

    ui.separator();

    // ── step controls ──
    ui.label("步进（默认步长）");
    egui::Grid::new("step_buttons")
        .num_columns(3)
        .spacing([4.0, 4.0])
        .show(ui, |ui| {
            let mut step = |ui: &mut Ui, text: &str, direction: StepDirection| {
                if ui.button(text).clicked() {
                    action.steps.push(direction);
                }
            };
            step(ui, "↺", StepDirection::TurnLeft);
            step(ui, "▲", StepDirection::Forwards);
            step(ui, "↻", StepDirection::TurnRight);
            ui.end_row();
            step(ui, "◀", StepDirection::Left);
            step(ui, "▼", StepDirection::Backwards);
            step(ui, "▶", StepDirection::Right);
            ui.end_row();
        });
    ui.colored_label(
        theme::TEXT_MUTED,
        "键盘: 方向键 小步/转向，WASD 奔跑",
    );

    ui.separator();

    // ── render parameters ──
    ui.colored_label(theme::ACCENT, "◈ 渲染参数");
    egui::Grid::new("render_params")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            for control in binder.controls_mut() {
                ui.label(control.field.label());
                let response = ui.add(
                    egui::TextEdit::singleline(&mut control.text)
                        .id_source(control.field.name())
                        .desired_width(80.0),
                );
                if response.changed() {
                    action.edits.push((control.field, control.text.clone()));
                }
                ui.end_row();
            }
        });

    ui.separator();

    // ── export ──
    if ui
        .button("📸 导出 PNG")
        .on_hover_text("保存最近一次提交的帧")
        .clicked()
    {
        action.export_png = true;
    }

    action
}
