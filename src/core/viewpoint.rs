//! # 视点状态
//!
//! 位置 + 朝向，唯一的可变导航状态。
//!
//! 方向约定与地图的坐标翻转一致：朝向 `h` 时前进方向为 `(sin h, cos h)`，
//! 左移取 `h + 90°` 的前进方向，右移取 `h - 90°`。

/// 单位向量：朝向 `degrees` 时的前进方向
pub fn direction(degrees: f64) -> (f64, f64) {
    let theta = degrees.to_radians();
    (theta.sin(), theta.cos())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewpointState {
    pub x: f64,
    pub y: f64,
    heading: f64,
    normalize_heading: bool,
}

impl Default for ViewpointState {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl ViewpointState {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self::with_heading_policy(x, y, heading, true)
    }

    /// `normalize_heading` 为 `false` 时朝向（含初始值）不折回 [0, 360)，转向量会无限累加
    pub fn with_heading_policy(x: f64, y: f64, heading: f64, normalize_heading: bool) -> Self {
        let mut state = Self {
            x,
            y,
            heading: 0.0,
            normalize_heading,
        };
        state.set_heading(heading);
        state
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// 当前朝向（度）
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = if self.normalize_heading {
            degrees.rem_euclid(360.0)
        } else {
            degrees
        };
    }

    // ── 平移 ──────────────────────────────────────────────

    pub fn move_forwards(&mut self, distance: f64) {
        self.translate(self.heading, distance);
    }

    pub fn move_backwards(&mut self, distance: f64) {
        self.translate(self.heading, -distance);
    }

    pub fn move_left(&mut self, distance: f64) {
        self.translate(self.heading + 90.0, distance);
    }

    pub fn move_right(&mut self, distance: f64) {
        self.translate(self.heading - 90.0, distance);
    }

    // ── 转向 ──────────────────────────────────────────────

    pub fn turn_left(&mut self, degrees: f64) {
        self.set_heading(self.heading + degrees);
    }

    pub fn turn_right(&mut self, degrees: f64) {
        self.set_heading(self.heading - degrees);
    }

    fn translate(&mut self, degrees: f64, distance: f64) {
        let (dx, dy) = direction(degrees);
        self.x += dx * distance;
        self.y += dy * distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn forward_at_zero_heading_moves_along_y() {
        let mut vp = ViewpointState::new(10.0, 10.0, 0.0);
        vp.move_forwards(3.0);
        assert!(close(vp.x, 10.0));
        assert!(close(vp.y, 13.0));
        vp.move_backwards(3.0);
        assert!(close(vp.y, 10.0));
    }

    #[test]
    fn strafing_is_perpendicular_to_heading() {
        let mut vp = ViewpointState::new(0.0, 0.0, 0.0);
        vp.move_left(2.5);
        assert!(close(vp.x, 2.5));
        assert!(close(vp.y, 0.0));
        vp.move_right(5.0);
        assert!(close(vp.x, -2.5));
        assert!(close(vp.y, 0.0));
    }

    #[test]
    fn turns_accumulate_as_signed_sum_modulo_360() {
        let mut vp = ViewpointState::new(0.0, 0.0, 350.0);
        let deltas = [(true, 15.0), (false, 40.0), (true, 1.0), (true, 400.0)];
        let mut expected = 350.0;
        for (left, d) in deltas {
            if left {
                vp.turn_left(d);
                expected += d;
            } else {
                vp.turn_right(d);
                expected -= d;
            }
        }
        assert!(close(vp.heading(), f64::rem_euclid(expected, 360.0)));
        assert!((0.0..360.0).contains(&vp.heading()));
    }

    #[test]
    fn unnormalized_heading_accumulates_freely() {
        let mut vp = ViewpointState::with_heading_policy(0.0, 0.0, 0.0, false);
        for _ in 0..400 {
            vp.turn_left(1.0);
        }
        assert!(close(vp.heading(), 400.0));
        vp.turn_right(800.0);
        assert!(close(vp.heading(), -400.0));
    }

    #[test]
    fn start_heading_wraps_only_when_normalizing() {
        assert!(close(ViewpointState::new(0.0, 0.0, 400.0).heading(), 40.0));
        assert!(close(ViewpointState::new(0.0, 0.0, -90.0).heading(), 270.0));
        let raw = ViewpointState::with_heading_policy(0.0, 0.0, 400.0, false);
        assert!(close(raw.heading(), 400.0));
    }

    #[test]
    fn turning_does_not_move_position() {
        let mut vp = ViewpointState::new(4.0, 7.0, 90.0);
        vp.turn_left(33.0);
        vp.turn_right(12.0);
        assert_eq!(vp.position(), (4.0, 7.0));
    }
}
