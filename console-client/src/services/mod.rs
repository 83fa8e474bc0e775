//! 后台各页面使用的接口调用
//!
//! 每个函数对应一个后端接口，结果统一为 `ApiOutcome`，由调用方决定如何处理业务失败。

pub mod activity;
pub mod auth;
pub mod user;

use crate::client::{ApiOutcome, RequestSpec};
use crate::notify::NotifyingGateway;
use console_core::models::IdParam;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// POST 并把 `body` 作为JSON请求体
pub(crate) async fn post_json<B, T>(gateway: &NotifyingGateway, url: &str, body: &B) -> ApiOutcome<T>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    match RequestSpec::new(url).json(body) {
        Ok(spec) => gateway.call(spec).await,
        Err(e) => ApiOutcome::rejected(e.to_string()),
    }
}

/// GET 并把id放在查询参数里
pub(crate) async fn get_by_id<T>(gateway: &NotifyingGateway, url: &str, id: i64) -> ApiOutcome<T>
where
    T: DeserializeOwned,
{
    match RequestSpec::get(url).query(&IdParam { id }) {
        Ok(spec) => gateway.call(spec).await,
        Err(e) => ApiOutcome::rejected(e.to_string()),
    }
}

pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
