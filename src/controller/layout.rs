//! 画布尺寸始终跟随宿主视口。

use crate::rendering::Surface;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Default)]
pub struct LayoutManager {
    resizes: u64,
}

impl LayoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 把画布设为视口尺寸；尺寸未变时不做任何事。返回是否发生了改变。
    pub fn apply<S: Surface + ?Sized>(&mut self, surface: &mut S, viewport: ViewportSize) -> bool {
        let width = viewport.width.max(0.0);
        let height = viewport.height.max(0.0);
        if surface.width() == width && surface.height() == height {
            return false;
        }
        surface.resize(width, height);
        self.resizes += 1;
        log::debug!("画布尺寸 -> {width}x{height} (第 {} 次调整)", self.resizes);
        true
    }
}
