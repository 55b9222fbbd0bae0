//! 头像裁剪器 - 显式创建/销毁的裁剪框状态
//!
//! 固定 1:1 比例，裁剪框始终落在图片内部。
//! 实际裁剪在服务端执行，这里只维护几何并导出整数坐标。

use crate::api::CropGeometry;
use crate::geometry::Rect;
use image::GenericImageView;
use thiserror::Error;

/// 裁剪框的最小边长（像素，受图片尺寸约束）
pub const MIN_CROP_SIZE: f32 = 50.0;
/// 初始裁剪框占可用边长的比例
pub const AUTO_CROP_RATIO: f32 = 0.8;

#[derive(Debug, Error)]
pub enum CropperError {
    #[error("unsupported image data: {0}")]
    Decode(String),
}

/// 裁剪器实例，由设置页控制器持有并负责销毁
pub struct Cropper {
    image_width: u32,
    image_height: u32,
    crop_box: Rect,
}

impl Cropper {
    /// 解码图片并放置初始裁剪框（居中正方形，约占短边八成）
    pub fn new(bytes: &[u8]) -> Result<Self, CropperError> {
        let img = image::load_from_memory(bytes).map_err(|e| CropperError::Decode(e.to_string()))?;
        let (width, height) = img.dimensions();

        let max_side = width.min(height) as f32;
        let side = (max_side * AUTO_CROP_RATIO)
            .max(MIN_CROP_SIZE.min(max_side))
            .min(max_side);
        let crop_box = Rect::new(
            (width as f32 - side) / 2.0,
            (height as f32 - side) / 2.0,
            side,
            side,
        );

        Ok(Self {
            image_width: width,
            image_height: height,
            crop_box,
        })
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    pub fn crop_box(&self) -> Rect {
        self.crop_box
    }

    /// 移动/缩放裁剪框；保持正方形，夹回图片边界，不小于最小尺寸
    pub fn set_crop_box(&mut self, x: f32, y: f32, size: f32) {
        let max_side = self.image_width.min(self.image_height) as f32;
        let size = size.clamp(MIN_CROP_SIZE.min(max_side), max_side);
        let x = x.clamp(0.0, self.image_width as f32 - size);
        let y = y.clamp(0.0, self.image_height as f32 - size);
        self.crop_box = Rect::new(x, y, size, size);
    }

    /// 取整后的裁剪几何，供上传接口使用
    pub fn data(&self) -> CropGeometry {
        CropGeometry {
            x: self.crop_box.x.round().max(0.0) as u32,
            y: self.crop_box.y.round().max(0.0) as u32,
            width: self.crop_box.width.round() as u32,
            height: self.crop_box.height.round() as u32,
        }
    }
}
