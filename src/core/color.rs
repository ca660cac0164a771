#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<ColorRgba> for egui::Color32 {
    fn from(value: ColorRgba) -> Self {
        egui::Color32::from_rgba_unmultiplied(value.r, value.g, value.b, value.a)
    }
}

impl ColorRgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREY: Self = Self::rgb(128, 128, 128);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GREEN: Self = Self::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// 按系数压暗，`factor` 会被夹到 [0, 1]
    pub fn shaded(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f64 * f) as u8,
            g: (self.g as f64 * f) as u8,
            b: (self.b as f64 * f) as u8,
            a: self.a,
        }
    }
}
