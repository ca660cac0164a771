//! # 帧导出
//!
//! 把最近一次提交到画布的帧保存为 PNG。

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::frame::Frame;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("还没有可导出的帧")]
    NoFrame,
    #[error("帧尺寸为空 ({width}x{height})")]
    EmptyFrame { width: usize, height: usize },
    #[error("像素缓冲区与帧尺寸 {width}x{height} 不符")]
    BufferSize { width: usize, height: usize },
    #[error("PNG 写入失败: {0}")]
    Image(#[from] image::ImageError),
}

/// 弹出保存对话框，用户取消时返回 `None`
pub fn pick_export_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name("frame.png")
        .save_file()
}

pub fn save_frame_png(frame: Option<&Frame>, path: &Path) -> Result<(), ExportError> {
    let frame = frame.ok_or(ExportError::NoFrame)?;
    if frame.width == 0 || frame.height == 0 {
        return Err(ExportError::EmptyFrame {
            width: frame.width,
            height: frame.height,
        });
    }

    let image = image::RgbaImage::from_raw(frame.width as u32, frame.height as u32, frame.to_rgba_flattened())
        .ok_or(ExportError::BufferSize {
            width: frame.width,
            height: frame.height,
        })?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    log::info!("已导出帧: {}", path.display());
    Ok(())
}
