//! # 导航器主题
//!
//! 深石板底色配琥珀色强调，与地图的黑底白墙对比分明。

use egui::style::WidgetVisuals;
use egui::{Color32, Rounding, Stroke, Visuals};

/// 琥珀色：标题与激活态描边
pub const ACCENT: Color32 = Color32::from_rgb(232, 176, 74);
/// 青色：悬停与选区
pub const ACCENT_COOL: Color32 = Color32::from_rgb(96, 186, 176);
pub const ERROR_RED: Color32 = Color32::from_rgb(236, 104, 96);

pub const BG_CANVAS: Color32 = Color32::from_rgb(18, 20, 24);
pub const BG_PANEL: Color32 = Color32::from_rgb(28, 32, 38);
const BG_WIDGET: [Color32; 3] = [
    Color32::from_rgb(42, 47, 56),
    Color32::from_rgb(54, 60, 71),
    Color32::from_rgb(66, 73, 86),
];

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 228, 232);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(168, 174, 184);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(112, 118, 130);

fn tint(widget: &mut WidgetVisuals, fill: Color32, outline: Stroke) {
    widget.bg_fill = fill;
    widget.weak_bg_fill = fill;
    widget.bg_stroke = outline;
    widget.rounding = Rounding::same(2.0);
}

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_CANVAS;
    visuals.override_text_color = Some(TEXT_PRIMARY);

    let [idle, hover, pressed] = BG_WIDGET;
    tint(&mut visuals.widgets.inactive, idle, Stroke::NONE);
    tint(&mut visuals.widgets.hovered, hover, Stroke::new(1.0, ACCENT_COOL));
    tint(&mut visuals.widgets.active, pressed, Stroke::new(1.0, ACCENT));

    visuals.selection.bg_fill = ACCENT_COOL.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_COOL);

    ctx.set_visuals(visuals);
    ctx.style_mut(|style| style.spacing.item_spacing = egui::vec2(6.0, 5.0));
}
