use rand::seq::SliceRandom;

use crate::api::models::recommend::MenuRecommendation;

/// 推荐接口不可用时的本地备选菜单
///
/// 推荐流程对用户永远不显示错误页, 失败时从这里均匀随机挑一个。
const FALLBACK_MENUS: &[(i64, &str)] = &[
    (1, "비빔밥"),
    (2, "김치찌개"),
    (3, "삼겹살"),
    (4, "불고기"),
    (5, "냉면"),
];

/// 均匀随机取一个备选菜单
pub fn fallback_menu() -> MenuRecommendation {
    let (menu_id, menu_name) = FALLBACK_MENUS
        .choose(&mut rand::thread_rng())
        .copied()
        .expect("fallback menu list is non-empty");
    MenuRecommendation {
        menu_id,
        menu_name: menu_name.to_string(),
    }
}

/// 备选列表命中判断, 测试用
pub fn is_fallback(menu: &MenuRecommendation) -> bool {
    FALLBACK_MENUS
        .iter()
        .any(|(id, name)| *id == menu.menu_id && *name == menu.menu_name)
}
