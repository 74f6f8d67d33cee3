use crate::api::models::recommend::MenuRecommendation;
use crate::geo::GeoPosition;

/// 会话主视图状态
///
/// 用和类型代替三个独立布尔开关, 地图只能挂在已展示的推荐上,
/// 非法组合在类型层面就不存在。
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    /// 初始状态, 没有推荐也没有地图
    Idle,
    /// 定位请求进行中
    Locating,
    /// 推荐请求进行中
    Recommending { position: GeoPosition },
    /// 推荐已展示, 地图可选
    ResultShown {
        position: GeoPosition,
        menu: MenuRecommendation,
        map_visible: bool,
    },
}

impl SessionView {
    /// 进入推荐展示状态, 地图总是从隐藏开始
    pub fn result_shown(position: GeoPosition, menu: MenuRecommendation) -> Self {
        SessionView::ResultShown {
            position,
            menu,
            map_visible: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SessionView::Idle)
    }

    pub fn menu(&self) -> Option<&MenuRecommendation> {
        match self {
            SessionView::ResultShown { menu, .. } => Some(menu),
            _ => None,
        }
    }

    pub fn map_visible(&self) -> bool {
        matches!(
            self,
            SessionView::ResultShown {
                map_visible: true,
                ..
            }
        )
    }
}

/// 派对浮层, 与主视图正交, 可在任意状态下开关
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyOverlay {
    None,
    /// 选择邀请/参加
    Choosing,
    Hosting,
    Joining,
}
