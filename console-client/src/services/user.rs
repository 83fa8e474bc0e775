use super::{get_by_id, now, post_json};
use crate::client::ApiOutcome;
use crate::notify::NotifyingGateway;
use console_core::{Page, UserDraft, UserInfo, UserQuery};
use serde_json::Value;

pub const LIST_PATH: &str = "/user/list";
pub const REGISTER_PATH: &str = "/user/register";
pub const REMOVE_PATH: &str = "/user/remove";
pub const UPDATE_PATH: &str = "/user/update";

pub async fn list(gateway: &NotifyingGateway, query: &UserQuery) -> ApiOutcome<Page<UserInfo>> {
    post_json(gateway, LIST_PATH, query).await
}

/// 注册用户（新建或复制），写入创建和更新时间
pub async fn create(gateway: &NotifyingGateway, mut draft: UserDraft) -> ApiOutcome<Value> {
    draft.id = None;
    draft.stamp_created(now());
    post_json(gateway, REGISTER_PATH, &draft).await
}

pub async fn update(gateway: &NotifyingGateway, mut draft: UserDraft) -> ApiOutcome<Value> {
    if draft.id.is_none() {
        return ApiOutcome::rejected("user update requires an id");
    }
    draft.stamp_updated(now());
    post_json(gateway, UPDATE_PATH, &draft).await
}

pub async fn remove(gateway: &NotifyingGateway, id: i64) -> ApiOutcome<Value> {
    get_by_id(gateway, REMOVE_PATH, id).await
}
