use super::{get_by_id, now, post_json};
use crate::client::ApiOutcome;
use crate::notify::NotifyingGateway;
use console_core::models::StatusChange;
use console_core::{ActivityDraft, ActivityInfo, ActivityQuery, ActivityStatus, Page};
use serde_json::Value;

pub const LIST_PATH: &str = "/activity/list";
pub const CREATE_PATH: &str = "/activity/create";
pub const REMOVE_PATH: &str = "/activity/remove";
pub const UPDATE_PATH: &str = "/activity/update";
pub const SWITCH_STATUS_PATH: &str = "/activity/switchStatus";

pub async fn list(
    gateway: &NotifyingGateway,
    query: &ActivityQuery,
) -> ApiOutcome<Page<ActivityInfo>> {
    post_json(gateway, LIST_PATH, query).await
}

/// 新建活动（新建或复制），写入创建和更新时间
pub async fn create(gateway: &NotifyingGateway, mut draft: ActivityDraft) -> ApiOutcome<Value> {
    if let Err(reason) = draft.validate_capacity() {
        return ApiOutcome::rejected(reason);
    }
    draft.id = None;
    draft.stamp_created(now());
    post_json(gateway, CREATE_PATH, &draft).await
}

pub async fn update(gateway: &NotifyingGateway, mut draft: ActivityDraft) -> ApiOutcome<Value> {
    if draft.id.is_none() {
        return ApiOutcome::rejected("activity update requires an id");
    }
    if let Err(reason) = draft.validate_capacity() {
        return ApiOutcome::rejected(reason);
    }
    draft.stamp_updated(now());
    post_json(gateway, UPDATE_PATH, &draft).await
}

pub async fn remove(gateway: &NotifyingGateway, id: i64) -> ApiOutcome<Value> {
    get_by_id(gateway, REMOVE_PATH, id).await
}

pub async fn switch_status(
    gateway: &NotifyingGateway,
    id: i64,
    status: ActivityStatus,
) -> ApiOutcome<Value> {
    tracing::info!("Switching activity {} to {}", id, status);
    post_json(gateway, SWITCH_STATUS_PATH, &StatusChange { id, status }).await
}

/// 发布（切到线上）
pub async fn publish(gateway: &NotifyingGateway, id: i64) -> ApiOutcome<Value> {
    switch_status(gateway, id, ActivityStatus::Online).await
}

/// 下线
pub async fn take_offline(gateway: &NotifyingGateway, id: i64) -> ApiOutcome<Value> {
    switch_status(gateway, id, ActivityStatus::Offline).await
}
