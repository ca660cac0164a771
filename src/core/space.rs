//! # 空间模型
//!
//! 由彩色格子组成的二维网格，`None` 表示空地。
//! 所有绘制操作都会裁剪到网格范围内，越界坐标静默忽略。

use crate::core::color::ColorRgba;

pub type Cell = Option<ColorRgba>;

#[derive(Debug, Clone)]
pub struct SpaceModel {
    width: u32,
    length: u32,
    cells: Vec<Cell>,
}

impl SpaceModel {
    pub fn new(width: u32, length: u32) -> Self {
        let len = (width as usize) * (length as usize);
        Self {
            width,
            length,
            cells: vec![None; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.length() as i64 {
            return None;
        }
        Some(y as usize * self.width() as usize + x as usize)
    }

    pub fn cell(&self, x: i64, y: i64) -> Cell {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    /// 按连续坐标查询所在格子
    pub fn cell_at(&self, x: f64, y: f64) -> Cell {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        self.cell(x.floor() as i64, y.floor() as i64)
    }

    /// 连续坐标是否落在网格之外
    pub fn is_outside(&self, x: f64, y: f64) -> bool {
        !(x >= 0.0 && y >= 0.0 && x < self.width() as f64 && y < self.length() as f64)
    }

    pub fn draw_point(&mut self, x: i64, y: i64, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// 填充以两个对角为端点的矩形（含端点，角的顺序任意）
    pub fn draw_rectangle(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, cell: Cell) {
        let (xa, xb) = (x0.min(x1).max(0), x0.max(x1).min(self.width() as i64 - 1));
        let (ya, yb) = (y0.min(y1).max(0), y0.max(y1).min(self.length() as i64 - 1));
        for y in ya..=yb {
            for x in xa..=xb {
                self.draw_point(x, y, cell);
            }
        }
    }

    /// 空心房间：厚度为 2 的矩形墙
    pub fn draw_room(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: ColorRgba) {
        let (xa, xb) = (x0.min(x1), x0.max(x1));
        let (ya, yb) = (y0.min(y1), y0.max(y1));
        let wall = Some(color);
        self.draw_rectangle(xa, ya, xb, ya + 1, wall);
        self.draw_rectangle(xa, yb - 1, xb, yb, wall);
        self.draw_rectangle(xa, ya, xa + 1, yb, wall);
        self.draw_rectangle(xb - 1, ya, xb, yb, wall);
    }

    pub fn draw_circle(&mut self, cx: i64, cy: i64, radius: i64, cell: Cell) {
        let r2 = radius * radius;
        for y in (cy - radius)..=(cy + radius) {
            for x in (cx - radius)..=(cx + radius) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r2 {
                    self.draw_point(x, y, cell);
                }
            }
        }
    }

    /// 沿网格外沿画 `thickness` 格厚的边框
    pub fn draw_border(&mut self, thickness: u32, color: ColorRgba) {
        let t = thickness as i64;
        let (w, l) = (self.width() as i64, self.length() as i64);
        for y in 0..l {
            for x in 0..w {
                if y < t || x < t || y >= l - t || x >= w - t {
                    self.draw_point(x, y, Some(color));
                }
            }
        }
    }
}

/// 演示场景：若干灰色隔墙、带门洞的房间、藏有暗门的蓝色房间、绿色圆柱，最后画白色边框。
pub fn demo_space(width: u32, length: u32) -> SpaceModel {
    let mut space = SpaceModel::new(width, length);
    let grey = Some(ColorRgba::GREY);

    space.draw_rectangle(5, 25, 9, 72, grey);
    space.draw_rectangle(15, 75, 19, 92, grey);
    space.draw_rectangle(25, 15, 29, 48, grey);
    space.draw_rectangle(95, 75, 56, 93, grey);

    // 房间 + 门洞
    space.draw_room(95, 5, 36, 43, ColorRgba::GREY);
    space.draw_rectangle(80, 42, 60, 43, None);

    // 暗门：门洞被内侧的一段墙挡住
    space.draw_room(100, 150, 600, 700, ColorRgba::BLUE);
    space.draw_rectangle(110, 160, 130, 161, Some(ColorRgba::BLUE));
    space.draw_rectangle(110, 150, 130, 151, None);

    space.draw_circle(30, 70, 10, Some(ColorRgba::GREEN));

    // 边框最后画
    space.draw_border(2, ColorRgba::WHITE);

    log::debug!("演示场景已构建: {}x{}", space.width(), space.length());
    space
}
