// 各接口的请求/响应数据结构

pub mod party;
pub mod recommend;
pub mod user;

pub use party::PartyCode;
pub use recommend::{MenuRecommendation, UserId};
pub use user::UserProfile;
