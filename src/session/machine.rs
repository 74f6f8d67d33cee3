use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;

use crate::api::models::recommend::{FeedbackRequest, MenuRecommendation, RecommendRequest, UserId};
use crate::api::operations::recommend::RecommendOperations;
use crate::api::operations::party::PartyOperations;
use crate::api::models::party::PartyCode;
use crate::cache::UserInfoCache;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::geo::{DEFAULT_POSITION, GeoPosition, LocationProvider};
use crate::session::menu::fallback_menu;
use crate::session::view::{PartyOverlay, SessionView};
use crate::utils::request_timestamp;

/// 推荐会话状态机
///
/// 持有主视图状态和派对浮层, 串起 定位 -> 推荐 -> 展示 -> 跳过/地图
/// 的流转。定位和推荐的失败都在这里兜底, 反馈上报即发即忘。
/// 单线程事件驱动: 同一时刻只有一个用户意图在执行。
pub struct Session {
    http: Client,
    config: Config,
    user_cache: Arc<UserInfoCache>,
    location: Arc<dyn LocationProvider>,
    view: SessionView,
    party: PartyOverlay,
    last_position: Option<GeoPosition>,
}

impl Session {
    pub fn new(
        http: Client,
        config: Config,
        user_cache: Arc<UserInfoCache>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        Self {
            http,
            config,
            user_cache,
            location,
            view: SessionView::Idle,
            party: PartyOverlay::None,
            last_position: None,
        }
    }

    pub fn view(&self) -> &SessionView {
        &self.view
    }

    pub fn party(&self) -> PartyOverlay {
        self.party
    }

    pub fn last_position(&self) -> Option<GeoPosition> {
        self.last_position
    }

    /// "추천 받기": 定位后请求一次推荐
    ///
    /// 前置条件是拿得到用户信息; 拿不到时状态不动, 错误原样返回给
    /// 调用方提示用户。定位失败退回默认坐标, 推荐失败退回备选菜单,
    /// 这两种失败都不会让流程停在中间状态。
    pub async fn request_recommendation(&mut self) -> AppResult<MenuRecommendation> {
        let profile = match self.user_cache.get().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("recommendation rejected, no user profile: {}", e);
                return Err(e);
            }
        };

        self.view = SessionView::Locating;
        let position = match self.location.current_position().await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!("geolocation unavailable ({}), using default position", e);
                DEFAULT_POSITION
            }
        };
        self.last_position = Some(position);

        self.view = SessionView::Recommending { position };
        let menu = self.fetch_menu(profile.id, position).await;
        self.view = SessionView::result_shown(position, menu.clone());
        Ok(menu)
    }

    /// "다른 메뉴 추천": 跳过当前推荐, 换一个
    ///
    /// 只有缓存里有用户信息时可用。先收起地图, 跳过反馈即发即忘,
    /// 与新的推荐请求并发, 互不等待。
    pub async fn skip(&mut self) -> AppResult<MenuRecommendation> {
        let profile = match self.user_cache.cached() {
            Some(profile) => profile,
            None => return Err(AppError::Unauthenticated),
        };

        let menu = match &self.view {
            SessionView::ResultShown { menu, .. } => menu.clone(),
            _ => {
                return Err(AppError::ValidationFailed(
                    "当前没有展示中的推荐".to_string(),
                ));
            }
        };

        let position = self.last_position.unwrap_or(DEFAULT_POSITION);

        // 先收起地图再发新请求
        self.view = SessionView::Recommending { position };
        self.spawn_feedback(FeedbackKind::Skip, profile.id, menu.menu_id, position);

        let next = self.fetch_menu(profile.id, position).await;
        self.view = SessionView::result_shown(position, next.clone());
        Ok(next)
    }

    /// "주변 식당 찾기": 展示地图
    ///
    /// 只有缓存里有用户信息且正在展示推荐时可用;
    /// 进入地图视图时上报一次满意反馈。
    pub fn show_map(&mut self) -> AppResult<()> {
        let profile = match self.user_cache.cached() {
            Some(profile) => profile,
            None => return Err(AppError::Unauthenticated),
        };

        let (position, menu_id) = match &mut self.view {
            SessionView::ResultShown {
                position,
                menu,
                map_visible,
            } => {
                *map_visible = true;
                (*position, menu.menu_id)
            }
            _ => {
                return Err(AppError::ValidationFailed(
                    "当前没有展示中的推荐".to_string(),
                ));
            }
        };

        self.spawn_feedback(FeedbackKind::Satisfy, profile.id, menu_id, position);
        Ok(())
    }

    /// 回到首页: 清掉推荐、地图和派对浮层
    pub fn reset(&mut self) {
        self.view = SessionView::Idle;
        self.party = PartyOverlay::None;
    }

    /// 派对按钮: 浮层开/关
    pub fn toggle_party_menu(&mut self) {
        self.party = match self.party {
            PartyOverlay::None => PartyOverlay::Choosing,
            _ => PartyOverlay::None,
        };
    }

    /// "초대하기": 进入主办模式并创建派对
    pub async fn host_party(&mut self) -> AppResult<String> {
        self.party = PartyOverlay::Hosting;
        match PartyOperations::create_party(&self.http, &self.config).await {
            Ok(code) => Ok(code),
            Err(e) => {
                tracing::warn!("party create failed: {}", e);
                Err(e)
            }
        }
    }

    /// "참가하기": 进入加入模式
    pub fn begin_join_party(&mut self) {
        self.party = PartyOverlay::Joining;
    }

    /// 提交邀请码加入派对; 失败不改变主视图状态
    pub async fn join_party(&mut self, raw_code: &str) -> AppResult<()> {
        self.party = PartyOverlay::Joining;
        let code = PartyCode::parse(raw_code)?;
        match PartyOperations::join_party(&self.http, &self.config, &code).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!("party join failed: {}", e);
                Err(e)
            }
        }
    }

    /// 请求推荐并兜底, 永远返回一个菜单
    async fn fetch_menu(&self, user_id: i64, position: GeoPosition) -> MenuRecommendation {
        let req = RecommendRequest {
            lat: position.lat,
            lon: position.lon,
            timestamp: request_timestamp(Utc::now()),
            user_id: UserId::Registered(user_id),
        };

        match RecommendOperations::request_recommendation(&self.http, &self.config, &req).await {
            Ok(menu) => menu,
            Err(e) => {
                tracing::warn!("recommendation failed ({}), serving fallback menu", e);
                fallback_menu()
            }
        }
    }

    fn spawn_feedback(
        &self,
        kind: FeedbackKind,
        user_id: i64,
        menu_id: i64,
        position: GeoPosition,
    ) {
        let http = self.http.clone();
        let config = self.config.clone();
        let req = FeedbackRequest {
            user_id: UserId::Registered(user_id),
            menu_id,
            timestamp: request_timestamp(Utc::now()),
            lat: position.lat,
            lon: position.lon,
        };

        tokio::spawn(async move {
            let result = match kind {
                FeedbackKind::Skip => {
                    RecommendOperations::submit_skip_feedback(&http, &config, &req).await
                }
                FeedbackKind::Satisfy => {
                    RecommendOperations::submit_satisfaction_feedback(&http, &config, &req).await
                }
            };
            if let Err(e) = result {
                tracing::warn!("feedback submission failed: {}", e);
            }
        });
    }
}

#[derive(Debug, Clone, Copy)]
enum FeedbackKind {
    Skip,
    Satisfy,
}
