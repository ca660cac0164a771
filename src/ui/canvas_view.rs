use egui::{Align2, FontId, Pos2, Rect, Sense, Ui};

use crate::rendering::canvas_surface::CanvasSurface;
use crate::ui::theme;

/// 占满剩余区域作为画布，返回其矩形
pub fn allocate_canvas(ui: &mut Ui) -> Rect {
    let available = ui.available_size();
    let (rect, _response) = ui.allocate_exact_size(available, Sense::hover());
    rect
}

/// 画出画布当前内容，并在左上角标注视图名
pub fn show_canvas(ui: &mut Ui, rect: Rect, surface: &CanvasSurface, caption: &str) {
    surface.paint(ui, rect);

    ui.painter_at(rect).text(
        Pos2::new(rect.left() + 8.0, rect.top() + 8.0),
        Align2::LEFT_TOP,
        caption,
        FontId::proportional(13.0),
        theme::TEXT_SECONDARY,
    );
}
