// 推荐会话模块
// 视图状态、备选菜单和状态机

pub mod machine;
pub mod menu;
pub mod view;

pub use machine::Session;
pub use view::{PartyOverlay, SessionView};
