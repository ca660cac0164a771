//! # 导航器配置
//!
//! 内置默认值来自 `assets/navigator.json`；设置环境变量 `NAVIGATOR_CONFIG`
//! 可以指向另一个 JSON 文件整体替换。缺省字段一律回落到默认值。

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::core::render_config::RenderConfig;

const NAVIGATOR_JSON: &str = include_str!("../assets/navigator.json");

/// 覆盖内置配置的环境变量
pub const CONFIG_ENV: &str = "NAVIGATOR_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub window: WindowConfig,
    pub surface: SurfaceConfig,
    pub render_loop: RenderLoopConfig,
    pub input: InputConfig,
    pub renderer: RendererConfig,
    pub space: SpaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Wolf Navigator".to_string(),
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// 每个空间单位对应的像素数
    pub scale: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { scale: 8.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderLoopConfig {
    pub frames_per_second: f64,
}

impl Default for RenderLoopConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 30.0,
        }
    }
}

/// 按键步长。方向键为 "tiptoe"，字母键为 "run"。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// 每次转向后把朝向折回 [0, 360)
    pub normalize_heading: bool,
    pub tiptoe_distance: f64,
    pub run_distance: f64,
    pub strafe_distance: f64,
    pub turn_degrees: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            normalize_heading: true,
            tiptoe_distance: 1.0,
            run_distance: 5.0,
            strafe_distance: 2.5,
            turn_degrees: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub field_of_view: f64,
    pub vanishing_distance: f64,
    pub default_rotation_delta: f64,
    pub default_movement_distance: f64,
    /// 透视渲染时光线的步进长度（空间单位）
    pub ray_step: f64,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            field_of_view: 60.0,
            vanishing_distance: 64.0,
            default_rotation_delta: 5.0,
            default_movement_distance: 1.0,
            ray_step: 0.05,
        }
    }
}

impl RendererConfig {
    pub fn render_defaults(&self) -> RenderConfig {
        RenderConfig {
            field_of_view: self.field_of_view,
            vanishing_distance: self.vanishing_distance,
            default_rotation_delta: self.default_rotation_delta,
            default_movement_distance: self.default_movement_distance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceConfig {
    pub width: u32,
    pub length: u32,
    pub start_x: f64,
    pub start_y: f64,
    pub start_heading: f64,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            width: 100,
            length: 100,
            start_x: 50.0,
            start_y: 50.0,
            start_heading: 0.0,
        }
    }
}

impl NavigatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: NavigatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fps = self.render_loop.frames_per_second;
        if !(fps.is_finite() && fps > 0.0) {
            return Err(ConfigError::Invalid {
                field: "render_loop.frames_per_second",
                reason: format!("需要正数，实际为 {fps}"),
            });
        }
        if !(self.surface.scale.is_finite() && self.surface.scale > 0.0) {
            return Err(ConfigError::Invalid {
                field: "surface.scale",
                reason: format!("需要正数，实际为 {}", self.surface.scale),
            });
        }
        if self.space.width == 0 || self.space.length == 0 {
            return Err(ConfigError::Invalid {
                field: "space",
                reason: format!("尺寸不能为 0 ({}x{})", self.space.width, self.space.length),
            });
        }
        if !(self.renderer.ray_step.is_finite() && self.renderer.ray_step > 0.0) {
            return Err(ConfigError::Invalid {
                field: "renderer.ray_step",
                reason: format!("需要正数，实际为 {}", self.renderer.ray_step),
            });
        }
        Ok(())
    }
}

/// 加载配置：优先读取 `NAVIGATOR_CONFIG` 指向的文件，否则使用内置 JSON。
pub fn load_navigator_config() -> Result<NavigatorConfig, ConfigError> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            log::info!("使用外部配置: {path}");
            NavigatorConfig::from_json(&content)
        }
        _ => NavigatorConfig::from_json(NAVIGATOR_JSON),
    }
}
