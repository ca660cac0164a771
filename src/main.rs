mod config;
mod controller;
mod core;
mod rendering;
mod storage;
mod ui;

use anyhow::{anyhow, Context as _};

use config::navigator::load_navigator_config;
use controller::error_overlay::ErrorOverlay;
use ui::app::NavigatorApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let errors = ErrorOverlay::install();
    let config = load_navigator_config().context("导航器配置加载失败")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height])
            .with_app_id("wolf-navigator"),
        ..Default::default()
    };

    let title = config.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(NavigatorApp::new(cc, config, errors))),
    )
    .map_err(|err| anyhow!("窗口启动失败: {err}"))
}
