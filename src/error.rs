use thiserror::Error;

/// 客户端统一错误类型
///
/// 变体划分遵循传播策略: 身份缺失与表单校验错误会阻断流程,
/// 位置和推荐错误由调用方用默认值兜底, 反馈错误仅记录日志。
#[derive(Debug, Error)]
pub enum AppError {
    /// 本地没有令牌, 无法访问需要认证的接口
    #[error("未授权访问: 本地没有登录令牌")]
    Unauthenticated,

    /// 登录/注册失败 (凭证错误或服务器拒绝)
    #[error("登录失败: {0}")]
    AuthFailed(String),

    /// 修改信息/登出/注销等账号操作失败
    #[error("账号操作失败: {0}")]
    AccountOperationFailed(String),

    /// 用户信息拉取失败 (网络错误 / 非 2xx / 响应体解析失败)
    #[error("获取用户信息失败: {0}")]
    ProfileFetchFailed(String),

    /// 位置信息不可用, 调用方总是用默认坐标恢复
    #[error("无法获取位置信息")]
    LocationUnavailable,

    /// 推荐请求失败, 调用方总是用本地备选菜单恢复
    #[error("获取推荐失败: {0}")]
    RecommendationFailed(String),

    /// 反馈提交失败, 只记录日志, 不影响状态流转
    #[error("提交反馈失败: {0}")]
    FeedbackSubmissionFailed(String),

    /// 派对创建/加入失败, 直接提示用户, 不重试
    #[error("派对操作失败: {0}")]
    PartyOperationFailed(String),

    /// 客户端表单校验失败
    #[error("{0}")]
    ValidationFailed(String),
}

impl AppError {
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

pub type AppResult<T> = Result<T, AppError>;
