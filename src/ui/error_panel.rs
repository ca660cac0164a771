use egui::{ScrollArea, Ui};

use crate::controller::error_overlay::ErrorLog;
use crate::ui::theme;

/// 显示错误日志；返回 `true` 表示用户点击了清空
pub fn show_error_panel(ui: &mut Ui, log: &ErrorLog) -> bool {
    let mut clear = false;

    ui.horizontal(|ui| {
        ui.colored_label(theme::ERROR_RED, format!("⚠ 错误 ({})", log.len()));
        if ui.small_button("清空").clicked() {
            clear = true;
        }
    });

    ScrollArea::vertical()
        .max_height(96.0)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in log.lines() {
                ui.colored_label(theme::ERROR_RED, line);
            }
        });

    clear
}
