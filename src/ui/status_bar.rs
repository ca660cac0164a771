use egui::Ui;

use crate::controller::RenderMode;
use crate::core::viewpoint::ViewpointState;

pub fn show_status_bar(
    ui: &mut Ui,
    fps: f32,
    target_fps: f64,
    ticks: u64,
    mode: RenderMode,
    viewpoint: &ViewpointState,
    dropped_ticks: u64,
    message: &str,
) {
    ui.horizontal_wrapped(|ui| {
        ui.label(format!("状态: {message}"));
        ui.separator();
        ui.label(format!("视图: {}", mode.label()));
        ui.separator();
        ui.label(format!(
            "位置: ({:.1}, {:.1})  朝向: {:.1}°",
            viewpoint.x,
            viewpoint.y,
            viewpoint.heading()
        ));
        ui.separator();
        ui.label(format!("FPS: {:.0} / {:.0}", fps, target_fps));
        ui.separator();
        ui.label(format!("帧: {ticks}"));
        ui.separator();
        ui.label(format!("丢帧: {dropped_ticks}"));
    });
}
