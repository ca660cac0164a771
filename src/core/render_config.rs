use serde::{Deserialize, Serialize};

/// 外部渲染器读取的四个可调参数。
///
/// 各字段互相独立，控制器不做合法性校验（非有限值交给渲染器自行降级）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// 视野角（度）
    pub field_of_view: f64,
    /// 消失距离（空间单位）
    pub vanishing_distance: f64,
    /// 默认转向步长（度）
    pub default_rotation_delta: f64,
    /// 默认移动步长（空间单位）
    pub default_movement_distance: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            field_of_view: 60.0,
            vanishing_distance: 64.0,
            default_rotation_delta: 5.0,
            default_movement_distance: 1.0,
        }
    }
}
