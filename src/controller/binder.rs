//! # 参数绑定
//!
//! 四个 [`RenderConfig`] 字段各对应一个数值输入框：
//! 启动时输入框显示字段当前值，之后每次编辑立即写回配置。
//! 只做数值解析，解析失败时把 `NaN` 原样写入，交由渲染器自行降级。

use crate::core::render_config::RenderConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    FieldOfView,
    VanishingDistance,
    DefaultRotationDelta,
    DefaultMovementDistance,
}

impl ConfigField {
    pub const ALL: [ConfigField; 4] = [
        Self::FieldOfView,
        Self::VanishingDistance,
        Self::DefaultRotationDelta,
        Self::DefaultMovementDistance,
    ];

    /// 控件名
    pub fn name(self) -> &'static str {
        match self {
            Self::FieldOfView => "field-of-view",
            Self::VanishingDistance => "vanishing-distance",
            Self::DefaultRotationDelta => "default-rotation-delta",
            Self::DefaultMovementDistance => "default-movement-distance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::FieldOfView => "视野角 (°)",
            Self::VanishingDistance => "消失距离",
            Self::DefaultRotationDelta => "默认转向 (°)",
            Self::DefaultMovementDistance => "默认步长",
        }
    }

    pub fn get(self, config: &RenderConfig) -> f64 {
        match self {
            Self::FieldOfView => config.field_of_view,
            Self::VanishingDistance => config.vanishing_distance,
            Self::DefaultRotationDelta => config.default_rotation_delta,
            Self::DefaultMovementDistance => config.default_movement_distance,
        }
    }

    pub fn set(self, config: &mut RenderConfig, value: f64) {
        match self {
            Self::FieldOfView => config.field_of_view = value,
            Self::VanishingDistance => config.vanishing_distance = value,
            Self::DefaultRotationDelta => config.default_rotation_delta = value,
            Self::DefaultMovementDistance => config.default_movement_distance = value,
        }
    }
}

/// 输入框文本 → 数值；非数值得到 `NaN`
pub fn parse_control_value(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// 一个输入框及其显示文本
#[derive(Debug, Clone)]
pub struct BoundControl {
    pub field: ConfigField,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct ConfigBinder {
    controls: Vec<BoundControl>,
}

impl ConfigBinder {
    /// 用配置当前值初始化四个输入框
    pub fn bind(config: &RenderConfig) -> Self {
        let controls = ConfigField::ALL
            .iter()
            .map(|&field| BoundControl {
                field,
                text: field.get(config).to_string(),
            })
            .collect();
        Self { controls }
    }

    pub fn controls_mut(&mut self) -> &mut [BoundControl] {
        &mut self.controls
    }

    pub fn display(&self, field: ConfigField) -> &str {
        self.controls
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.text.as_str())
            .unwrap_or_default()
    }

    /// 用户编辑了某个输入框：立即写回配置，返回写入的值
    pub fn apply_edit(&mut self, field: ConfigField, raw: &str, config: &mut RenderConfig) -> f64 {
        let value = parse_control_value(raw);
        if value.is_nan() {
            log::warn!("{} 输入非数值: {raw:?}", field.name());
        }
        field.set(config, value);
        if let Some(control) = self.controls.iter_mut().find(|c| c.field == field) {
            if control.text != raw {
                control.text = raw.to_string();
            }
        }
        log::debug!("{} = {value}", field.name());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_start_with_config_values() {
        let config = RenderConfig {
            field_of_view: 75.0,
            vanishing_distance: 32.5,
            default_rotation_delta: 3.0,
            default_movement_distance: 0.5,
        };
        let binder = ConfigBinder::bind(&config);
        assert_eq!(binder.display(ConfigField::FieldOfView), "75");
        assert_eq!(binder.display(ConfigField::VanishingDistance), "32.5");
        assert_eq!(binder.display(ConfigField::DefaultRotationDelta), "3");
        assert_eq!(binder.display(ConfigField::DefaultMovementDistance), "0.5");
    }

    #[test]
    fn edit_writes_exact_value_into_config() {
        let mut config = RenderConfig::default();
        let mut binder = ConfigBinder::bind(&config);
        for (field, raw, expected) in [
            (ConfigField::FieldOfView, "90", 90.0),
            (ConfigField::VanishingDistance, " 12.25 ", 12.25),
            (ConfigField::DefaultRotationDelta, "-7", -7.0),
            (ConfigField::DefaultMovementDistance, "1e-3", 0.001),
        ] {
            binder.apply_edit(field, raw, &mut config);
            assert_eq!(field.get(&config), expected);
            assert_eq!(binder.display(field), raw);
        }
    }

    #[test]
    fn fields_are_independent() {
        let mut config = RenderConfig::default();
        let before = config;
        let mut binder = ConfigBinder::bind(&config);
        binder.apply_edit(ConfigField::VanishingDistance, "10", &mut config);
        assert_eq!(config.field_of_view, before.field_of_view);
        assert_eq!(config.default_rotation_delta, before.default_rotation_delta);
        assert_eq!(config.default_movement_distance, before.default_movement_distance);
    }

    #[test]
    fn non_numeric_text_passes_through_as_nan() {
        let mut config = RenderConfig::default();
        let mut binder = ConfigBinder::bind(&config);
        let value = binder.apply_edit(ConfigField::FieldOfView, "wide", &mut config);
        assert!(value.is_nan());
        assert!(config.field_of_view.is_nan());
    }
}
