use async_trait::async_trait;

use crate::error::{AppError, AppResult};

/// 经纬度坐标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

/// 定位失败时的默认坐标 (首尔市厅)
pub const DEFAULT_POSITION: GeoPosition = GeoPosition {
    lat: 37.5665,
    lon: 126.9780,
};

/// 位置提供方
///
/// 失败只表示平台拿不到位置, 会话层总是用 DEFAULT_POSITION 兜底,
/// LocationUnavailable 不会传到用户面前。
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> AppResult<GeoPosition>;
}

/// 固定坐标提供方, 由外部传入坐标 (演示程序从环境变量取)
pub struct FixedLocationProvider {
    position: GeoPosition,
}

impl FixedLocationProvider {
    pub fn new(position: GeoPosition) -> Self {
        Self { position }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(&self) -> AppResult<GeoPosition> {
        Ok(self.position)
    }
}

/// 平台不支持定位时的提供方, 永远失败
pub struct UnavailableLocationProvider;

#[async_trait]
impl LocationProvider for UnavailableLocationProvider {
    async fn current_position(&self) -> AppResult<GeoPosition> {
        Err(AppError::LocationUnavailable)
    }
}
