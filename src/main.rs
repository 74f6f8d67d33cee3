use std::sync::Arc;

use chrono::Utc;
use mealhub::{
    AppContext,
    api::models::recommend::{RecommendRequest, UserId},
    api::operations::recommend::RecommendOperations,
    config::Config,
    geo::{DEFAULT_POSITION, FixedLocationProvider, GeoPosition, LocationProvider, UnavailableLocationProvider},
    session::menu::fallback_menu,
    utils::request_timestamp,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 演示程序
///
/// 有凭证时登录后走完整的 定位 -> 추천 -> 跳过 会话流程,
/// 没有凭证时用访客标识直接请求一次推荐。
#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env();
    let ctx = AppContext::new(config);

    // 坐标来自环境变量, 缺省时走定位失败 -> 默认坐标的路径
    let location: Arc<dyn LocationProvider> = match (
        std::env::var("MEALHUB_LAT").ok().and_then(|v| v.parse().ok()),
        std::env::var("MEALHUB_LON").ok().and_then(|v| v.parse().ok()),
    ) {
        (Some(lat), Some(lon)) => Arc::new(FixedLocationProvider::new(GeoPosition { lat, lon })),
        _ => Arc::new(UnavailableLocationProvider),
    };

    let credentials = (
        std::env::var("MEALHUB_LOGIN_ID"),
        std::env::var("MEALHUB_PASSWORD"),
    );

    let (Ok(login_id), Ok(password)) = credentials else {
        guest_recommendation(&ctx, &location).await;
        return;
    };

    let user_cache = ctx.user_cache();
    let account = ctx.account(user_cache.clone());
    match account.login(&login_id, &password).await {
        Ok(profile) => tracing::info!("logged in, user id {}", profile.id),
        Err(e) => {
            tracing::error!("{}", e);
            return;
        }
    }

    let mut session = ctx.session(user_cache, location);

    match session.request_recommendation().await {
        Ok(menu) => tracing::info!("오늘의 추천 메뉴: {} (id {})", menu.menu_name, menu.menu_id),
        Err(e) => {
            tracing::error!("{}", e);
            return;
        }
    }

    if std::env::var("MEALHUB_SKIP_ONCE").as_deref() == Ok("1") {
        match session.skip().await {
            Ok(menu) => tracing::info!("다른 추천 메뉴: {} (id {})", menu.menu_name, menu.menu_id),
            Err(e) => tracing::error!("{}", e),
        }
    }
}

/// 未登录时的单次推荐, 失败同样退回备选菜单
async fn guest_recommendation(ctx: &AppContext, location: &Arc<dyn LocationProvider>) {
    let position = match location.current_position().await {
        Ok(position) => position,
        Err(e) => {
            tracing::warn!("geolocation unavailable ({}), using default position", e);
            DEFAULT_POSITION
        }
    };

    let req = RecommendRequest {
        lat: position.lat,
        lon: position.lon,
        timestamp: request_timestamp(Utc::now()),
        user_id: UserId::guest(),
    };

    let menu = match RecommendOperations::request_recommendation(&ctx.http, &ctx.config, &req).await
    {
        Ok(menu) => menu,
        Err(e) => {
            tracing::warn!("recommendation failed ({}), serving fallback menu", e);
            fallback_menu()
        }
    };
    tracing::info!("오늘의 추천 메뉴: {} (id {})", menu.menu_name, menu.menu_id);
}
