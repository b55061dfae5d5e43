use sprintboard_shared::UserProfile;
use sprintboard_shared::protocol::ProfileEnvelope;

use crate::api::RawResponse;

/// 一次资料解析的结果
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    /// 解析成功
    Resolved(UserProfile),
    /// 后端报告该身份没有资料
    Missing,
    /// 传输失败、非 2xx 状态或响应无法解析
    Failed(String),
    /// 同一会话已有一个解析请求在进行，本次未发出请求
    InProgress,
    /// 请求完成时会话已经更替，结果被丢弃
    Superseded,
}

/// 把资料接口的响应归一化为 [`ProfileOutcome`]
///
/// “资料不存在”可能随 2xx 状态返回，因此先于状态码判断。
pub fn classify_profile_response(response: &RawResponse) -> ProfileOutcome {
    let envelope = response.json::<ProfileEnvelope>();

    if let Ok(envelope) = &envelope {
        if envelope.reports_missing_profile() {
            return ProfileOutcome::Missing;
        }
    }

    if !response.is_success() {
        return ProfileOutcome::Failed(response.error_message());
    }

    match envelope {
        Ok(ProfileEnvelope {
            user: Some(user), ..
        }) => ProfileOutcome::Resolved(user),
        Ok(ProfileEnvelope { message, .. }) => ProfileOutcome::Failed(
            message.unwrap_or_else(|| "响应中没有用户资料".to_string()),
        ),
        Err(e) => ProfileOutcome::Failed(e.to_string()),
    }
}
