//! # 输入控制器
//!
//! 把离散按键映射为视点的平移 / 转向。两档速度：
//! 方向键为 "tiptoe"（小步），字母键为 "run"（大步）。
//!
//! | 按键 | 操作 | 幅度 |
//! |---|---|---|
//! | ↑ / ↓ | 前进 / 后退 | tiptoe 距离 |
//! | ← / → | 左转 / 右转 | 转向角 |
//! | W / S | 前进 / 后退 | run 距离 |
//! | A / D | 左移 / 右移 | strafe 距离 |

use crate::config::navigator::InputConfig;
use crate::core::render_config::RenderConfig;
use crate::core::viewpoint::ViewpointState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
}

/// 宿主的按键按下事件。`key` 为按键标识，如 `"ArrowUp"`、`"w"`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
        }
    }
}

/// 对视点的一次纯粹修改
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationCommand {
    MoveForwards(f64),
    MoveBackwards(f64),
    MoveLeft(f64),
    MoveRight(f64),
    TurnLeft(f64),
    TurnRight(f64),
}

impl NavigationCommand {
    pub fn apply(self, viewpoint: &mut ViewpointState) {
        match self {
            Self::MoveForwards(d) => viewpoint.move_forwards(d),
            Self::MoveBackwards(d) => viewpoint.move_backwards(d),
            Self::MoveLeft(d) => viewpoint.move_left(d),
            Self::MoveRight(d) => viewpoint.move_right(d),
            Self::TurnLeft(deg) => viewpoint.turn_left(deg),
            Self::TurnRight(deg) => viewpoint.turn_right(deg),
        }
    }

    /// 移动距离或转向角度
    pub fn magnitude(self) -> f64 {
        match self {
            Self::MoveForwards(v)
            | Self::MoveBackwards(v)
            | Self::MoveLeft(v)
            | Self::MoveRight(v)
            | Self::TurnLeft(v)
            | Self::TurnRight(v) => v,
        }
    }
}

/// 面板上的步进按钮方向，幅度取自 [`RenderConfig`] 的默认步长
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Forwards,
    Backwards,
    Left,
    Right,
    TurnLeft,
    TurnRight,
}

impl StepDirection {
    pub fn command(self, config: &RenderConfig) -> NavigationCommand {
        let distance = config.default_movement_distance;
        let degrees = config.default_rotation_delta;
        match self {
            Self::Forwards => NavigationCommand::MoveForwards(distance),
            Self::Backwards => NavigationCommand::MoveBackwards(distance),
            Self::Left => NavigationCommand::MoveLeft(distance),
            Self::Right => NavigationCommand::MoveRight(distance),
            Self::TurnLeft => NavigationCommand::TurnLeft(degrees),
            Self::TurnRight => NavigationCommand::TurnRight(degrees),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputController {
    tiptoe: f64,
    run: f64,
    strafe: f64,
    turn: f64,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl InputController {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            tiptoe: config.tiptoe_distance,
            run: config.run_distance,
            strafe: config.strafe_distance,
            turn: config.turn_degrees,
        }
    }

    /// 按键标识（不区分大小写）对应的命令，未绑定的键返回 `None`
    pub fn command_for(&self, key: &str) -> Option<NavigationCommand> {
        let command = match key.to_lowercase().as_str() {
            "arrowup" => NavigationCommand::MoveForwards(self.tiptoe),
            "arrowdown" => NavigationCommand::MoveBackwards(self.tiptoe),
            "arrowleft" => NavigationCommand::TurnLeft(self.turn),
            "arrowright" => NavigationCommand::TurnRight(self.turn),
            "w" => NavigationCommand::MoveForwards(self.run),
            "s" => NavigationCommand::MoveBackwards(self.run),
            "a" => NavigationCommand::MoveLeft(self.strafe),
            "d" => NavigationCommand::MoveRight(self.strafe),
            _ => return None,
        };
        Some(command)
    }

    /// 处理一次按键；返回实际执行的命令
    pub fn handle_key(
        &self,
        event: &KeyEvent,
        viewpoint: &mut ViewpointState,
    ) -> Option<NavigationCommand> {
        let command = self.command_for(&event.key)?;
        command.apply(viewpoint);
        Some(command)
    }

    /// 处理一次步进按钮。步长不是有限值（输入框正被清空重填）时跳过，视点保持不变。
    pub fn handle_step(
        &self,
        direction: StepDirection,
        config: &RenderConfig,
        viewpoint: &mut ViewpointState,
    ) -> Option<NavigationCommand> {
        let command = direction.command(config);
        if !command.magnitude().is_finite() {
            log::warn!("步长非有限值，忽略步进: {command:?}");
            return None;
        }
        command.apply(viewpoint);
        Some(command)
    }
}
