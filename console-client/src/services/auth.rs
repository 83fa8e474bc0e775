use super::post_json;
use crate::client::ApiOutcome;
use crate::notify::NotifyingGateway;
use console_core::LoginRequest;
use serde_json::Value;

pub const LOGIN_PATH: &str = "/user/login";

/// 登录，成功后会话cookie保存在客户端的cookie存储中
pub async fn login(gateway: &NotifyingGateway, request: &LoginRequest) -> ApiOutcome<Value> {
    tracing::info!("Logging in as {}", request.user_name);
    post_json(gateway, LOGIN_PATH, request).await
}
