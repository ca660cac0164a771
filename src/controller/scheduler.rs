//! # 渲染循环调度
//!
//! [`FrameClock`] 按 `1000 / fps` 毫秒的周期判断 tick 是否到期；时间点由调用方传入，
//! 测试可以逐 tick 驱动。落后时多出来的 tick 直接丢弃并计数，绝不积压。
//!
//! 每个 tick 内的顺序固定：出帧 → 画罗盘（仅地图模式）→ 提交到画布。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::controller::compass::CompassOverlay;
use crate::controller::{NavigationSession, RenderMode};
use crate::rendering::{RenderError, Renderer, Surface};

/// 停止渲染循环的取消令牌，可跨线程克隆
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// 一次到期判定的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDue {
    /// 本次到期前被丢弃的 tick 数
    pub skipped: u64,
}

#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    next_due: Option<Instant>,
    dropped: u64,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_micros(1)),
            next_due: None,
            dropped: 0,
        }
    }

    /// `fps` 必须为正（配置加载时已校验）
    pub fn from_fps(fps: f64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / fps))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 累计丢弃的 tick 数
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// 判断 `now` 时是否有 tick 到期。首次调用立即到期。
    pub fn poll(&mut self, now: Instant) -> Option<TickDue> {
        let Some(due) = self.next_due else {
            self.next_due = Some(now + self.interval);
            return Some(TickDue { skipped: 0 });
        };
        if now < due {
            return None;
        }

        let late = now.duration_since(due);
        let skipped = (late.as_nanos() / self.interval.as_nanos()) as u64;
        let advance = self.interval.saturating_mul((skipped + 1).min(u32::MAX as u64) as u32);
        self.next_due = Some(due + advance);
        self.dropped += skipped;
        Some(TickDue { skipped })
    }

    /// 距下一个 tick 还有多久，已到期时为 0
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }
}

/// 一个 tick 的执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub mode: RenderMode,
    pub compass_drawn: bool,
    pub skipped: u64,
}

pub struct RenderLoopScheduler {
    clock: FrameClock,
    cancel: CancelToken,
    ticks: u64,
}

impl RenderLoopScheduler {
    pub fn new(frames_per_second: f64) -> Self {
        Self {
            clock: FrameClock::from_fps(frames_per_second),
            cancel: CancelToken::new(),
            ticks: 0,
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// 已执行的 tick 总数
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.clock.time_until_next(now)
    }

    /// 执行一个 tick：按模式出帧，地图模式叠加罗盘，然后提交。
    ///
    /// 只读借用会话，视点与参数在 tick 内不会被改动。
    pub fn tick<R, S>(
        &mut self,
        session: &NavigationSession,
        renderer: &R,
        surface: &mut S,
    ) -> Result<TickReport, RenderError>
    where
        R: Renderer + ?Sized,
        S: Surface + ?Sized,
    {
        let size = surface.frame_size();
        let mode = session.mode;

        let frame = match mode {
            RenderMode::Map => {
                let mut frame =
                    renderer.render_map(&session.space, &session.viewpoint, size, surface.scale());
                CompassOverlay::draw(
                    &mut frame,
                    &session.viewpoint,
                    surface.width(),
                    surface.height(),
                    surface.scale(),
                );
                frame
            }
            RenderMode::Perspective => renderer.render_perspective(
                &session.space,
                &session.viewpoint,
                &session.config,
                size,
            ),
        };

        surface.submit(frame)?;
        self.ticks += 1;

        Ok(TickReport {
            mode,
            compass_drawn: mode == RenderMode::Map,
            skipped: 0,
        })
    }

    /// 若 `now` 时有 tick 到期则执行；已取消时什么也不做
    pub fn run_due<R, S>(
        &mut self,
        now: Instant,
        session: &NavigationSession,
        renderer: &R,
        surface: &mut S,
    ) -> Result<Option<TickReport>, RenderError>
    where
        R: Renderer + ?Sized,
        S: Surface + ?Sized,
    {
        if self.cancel.is_cancelled() {
            return Ok(None);
        }
        let Some(due) = self.clock.poll(now) else {
            return Ok(None);
        };
        if due.skipped > 0 {
            log::debug!("渲染循环落后，丢弃 {} 个 tick", due.skipped);
        }

        let mut report = self.tick(session, renderer, surface)?;
        report.skipped = due.skipped;
        Ok(Some(report))
    }
}
