pub mod app;
pub mod canvas_view;
pub mod control_panel;
pub mod error_panel;
pub mod status_bar;
pub mod theme;
